//! Delimiter-keyed path access into nested JSON mappings.
//!
//! A [`PathStore`] owns a tree of insertion-ordered mappings and resolves
//! strings like `"key1.key2.key3"` to locations in it, memoizing resolved
//! paths. Built for callers holding deeply nested response-like data who
//! want single-call access instead of manual traversal.
//!
//! ```rust
//! use pathstore::PathStore;
//! use serde_json::json;
//!
//! let mut store = PathStore::new(r#"{"user":{"name":"ada","id":7}}"#)?;
//! assert_eq!(store.get("user.id")?, &json!(7));
//! store.set("user.roles.admin", json!(true))?;
//! assert!(store.exists("user.roles.admin"));
//! # Ok::<(), pathstore::StoreError>(())
//! ```

pub use crate::errors::{ErrorContext, ErrorKind, Result, StoreError};
pub use crate::path::{KeyPath, Segment};
pub use crate::store::{PathStore, Source, DEFAULT_DELIMITER};

pub mod cli;
pub mod errors;
pub mod path;
pub mod store;
