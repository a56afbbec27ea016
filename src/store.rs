//! The path store engine: construction, traversal, mutation, memoization.

use std::collections::HashMap;
use std::ops::Index;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::errors::{ErrorContext, Result, StoreError};
use crate::path::{KeyPath, Segment};

/// The delimiter used when none is configured.
pub const DEFAULT_DELIMITER: &str = ".";

// ============================================================================
// SOURCE: the two accepted construction inputs
// ============================================================================

/// Input accepted by [`PathStore`] construction: raw JSON text to decode, or
/// an already-built value that must be a mapping at the root.
///
/// Conversions exist for the common caller-side shapes, so constructors can
/// take `impl Into<Source>`:
///
/// ```rust
/// use pathstore::{PathStore, Source};
/// use serde_json::{json, Map};
///
/// let from_text = PathStore::new(r#"{"k": 1}"#)?;
/// let from_value = PathStore::new(json!({"k": 1}))?;
/// let from_map = PathStore::new(Map::new())?;
/// # Ok::<(), pathstore::StoreError>(())
/// ```
#[derive(Debug, Clone)]
pub enum Source {
    /// JSON text, decoded once at construction.
    Json(String),
    /// A native value; anything but `Value::Object` is rejected.
    Value(Value),
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Source::Json(text.to_string())
    }
}

impl From<String> for Source {
    fn from(text: String) -> Self {
        Source::Json(text)
    }
}

impl From<Value> for Source {
    fn from(value: Value) -> Self {
        Source::Value(value)
    }
}

impl From<Map<String, Value>> for Source {
    fn from(map: Map<String, Value>) -> Self {
        Source::Value(Value::Object(map))
    }
}

// ============================================================================
// PATH STORE: nested structure + delimiter + resolution cache
// ============================================================================

/// Delimiter-keyed access into a nested, insertion-ordered JSON mapping.
///
/// A single string such as `"key1.key2.key3"` addresses a location in the
/// structure; the store exposes [`get`](Self::get), [`set`](Self::set),
/// [`exists`](Self::exists), and [`remove`](Self::remove) keyed by such
/// strings, memoizing resolved paths. The store owns its structure
/// exclusively; callers export it with [`as_map`](Self::as_map) or
/// [`into_inner`](Self::into_inner).
///
/// # Examples
///
/// ```rust
/// use pathstore::PathStore;
/// use serde_json::json;
///
/// let mut store = PathStore::new(r#"{"user":{"name":"ada"}}"#)?;
/// assert_eq!(store.get("user.name")?.as_str(), Some("ada"));
///
/// store.set("user.login.count", json!(3))?;
/// assert!(store.exists("user.login.count"));
///
/// store.remove("user.name")?;
/// assert!(!store.exists("user.name"));
/// # Ok::<(), pathstore::StoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PathStore {
    data: Map<String, Value>,
    delimiter: String,
    cache: HashMap<String, Value>,
}

impl PathStore {
    /// Builds a store from `source` with the default `"."` delimiter.
    ///
    /// JSON text fails with [`StoreError::Decode`] if it is not valid JSON
    /// or decodes to a non-mapping root (a bare scalar, `null`, or an
    /// array). A native value fails with [`StoreError::TypeConflict`]
    /// unless it is a mapping.
    pub fn new(source: impl Into<Source>) -> Result<Self> {
        Self::with_delimiter(source, DEFAULT_DELIMITER)
    }

    /// Builds a store from `source` with a caller-chosen delimiter.
    ///
    /// The delimiter is fixed for the store's lifetime and is used verbatim
    /// when splitting path strings; it should be a non-empty string.
    pub fn with_delimiter(source: impl Into<Source>, delimiter: impl Into<String>) -> Result<Self> {
        let data = match source.into() {
            Source::Json(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Object(map)) => map,
                Ok(other) => {
                    return Err(StoreError::decode(
                        format!(
                            "expected a mapping at the document root, found {}",
                            type_name(&other)
                        ),
                        None,
                    ))
                }
                Err(cause) => {
                    return Err(StoreError::decode(
                        "source text is not valid JSON",
                        Some(cause),
                    ))
                }
            },
            Source::Value(Value::Object(map)) => map,
            Source::Value(other) => {
                return Err(StoreError::type_conflict(
                    format!(
                        "expected JSON text or a mapping, found {}",
                        type_name(&other)
                    ),
                    ErrorContext::none(),
                ))
            }
        };

        Ok(Self {
            data,
            delimiter: delimiter.into(),
            cache: HashMap::new(),
        })
    }

    /// The delimiter path strings for this store are split with.
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// The number of top-level entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// A view of the underlying structure.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Consumes the store and returns the structure it owned.
    pub fn into_inner(self) -> Map<String, Value> {
        self.data
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Resolves `path` to the value it addresses.
    ///
    /// The first successful resolution of a path is memoized; later calls
    /// return the cached value without re-walking the structure. Mutations
    /// evict every cache entry they could affect (see [`set`](Self::set)),
    /// so a cached read never disagrees with the structure.
    ///
    /// Fails with [`StoreError::KeyNotFound`] naming the first segment that
    /// is absent at its position; nothing is cached on failure.
    pub fn get(&mut self, path: &str) -> Result<&Value> {
        if !self.cache.contains_key(path) {
            let value = self.resolve(path)?.clone();
            self.cache.insert(path.to_string(), value);
        }
        Ok(&self.cache[path])
    }

    /// Whether `path` resolves to a value.
    ///
    /// A cache hit answers `true` without traversal; otherwise this runs
    /// the [`get`](Self::get) traversal, so a successful probe populates
    /// the cache exactly as `get` would. A read can only fail through
    /// absence, which is what a `false` answer reports; the structure is
    /// never changed.
    pub fn exists(&mut self, path: &str) -> bool {
        self.get(path).is_ok()
    }

    // Walks the structure for one path, left to right. Errors name the
    // first segment that cannot be resolved; a scalar met mid-path hides
    // every segment below it.
    fn resolve(&self, path: &str) -> Result<&Value> {
        let keys = KeyPath::split(path, &self.delimiter);
        let (last, front) = keys.split_last();

        let mut scope = &self.data;
        for (depth, segment) in front.iter().enumerate() {
            let Some(value) = scope.get(segment.text) else {
                return Err(absent(path, segment));
            };
            let Some(map) = value.as_object() else {
                return Err(absent(path, &keys.segments()[depth + 1]));
            };
            scope = map;
        }

        scope.get(last.text).ok_or_else(|| absent(path, last))
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Writes `value` at `path`, creating intermediate mappings as needed.
    ///
    /// An existing mapping along the way is descended into; a missing key
    /// becomes a fresh empty mapping; the final segment is assigned
    /// unconditionally, replacing whatever was there. An existing scalar
    /// met before the final segment fails with
    /// [`StoreError::TypeConflict`] and leaves the structure untouched —
    /// the conflict is detected before anything is created.
    ///
    /// A successful write refreshes the cache entry for `path` and evicts
    /// every cached ancestor or descendant of it, so reads after a write
    /// always reflect the structure.
    ///
    /// ```rust
    /// use pathstore::PathStore;
    /// use serde_json::json;
    ///
    /// let mut store = PathStore::new("{}")?;
    /// store.set("a.b.c", json!("deep"))?;
    /// assert_eq!(store.get("a.b.c")?, &json!("deep"));
    ///
    /// // Writing an ancestor replaces the whole subtree.
    /// store.set("a.b", json!(7))?;
    /// assert!(!store.exists("a.b.c"));
    /// # Ok::<(), pathstore::StoreError>(())
    /// ```
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let keys = KeyPath::split(path, &self.delimiter);
        let (last, front) = keys.split_last();

        let mut scope = &mut self.data;
        for segment in front {
            let slot = scope
                .entry(segment.text)
                .or_insert_with(|| Value::Object(Map::new()));
            match slot {
                Value::Object(map) => scope = map,
                other => {
                    return Err(StoreError::type_conflict(
                        format!(
                            "cannot descend into '{}': it holds {}, not a mapping",
                            segment.text,
                            type_name(other)
                        ),
                        ErrorContext::in_path(path, segment.range.clone()).with_help(
                            "overwrite the scalar with a mapping first, or write to a shallower path",
                        ),
                    ))
                }
            }
        }
        scope.insert(last.text.to_string(), value.clone());

        self.invalidate(path);
        self.cache.insert(path.to_string(), value);
        Ok(())
    }

    /// Deletes the value at `path`.
    ///
    /// Every segment, including the final one, must exist; otherwise this
    /// fails with [`StoreError::KeyNotFound`] and deletes nothing. The
    /// removed path and every cached ancestor or descendant of it are
    /// evicted, so a later probe of the path re-traverses and reports
    /// absence.
    pub fn remove(&mut self, path: &str) -> Result<()> {
        let keys = KeyPath::split(path, &self.delimiter);
        let (last, front) = keys.split_last();

        let mut scope = &mut self.data;
        for (depth, segment) in front.iter().enumerate() {
            let Some(value) = scope.get_mut(segment.text) else {
                return Err(absent(path, segment));
            };
            let Value::Object(map) = value else {
                return Err(absent(path, &keys.segments()[depth + 1]));
            };
            scope = map;
        }
        if scope.remove(last.text).is_none() {
            return Err(absent(path, last));
        }

        self.invalidate(path);
        Ok(())
    }

    // Evicts the exact path plus every cached ancestor or descendant of
    // it. Sibling entries are untouched.
    fn invalidate(&mut self, path: &str) {
        let delimiter = &self.delimiter;
        self.cache
            .retain(|cached, _| !overlaps(cached, path, delimiter));
    }

    // ------------------------------------------------------------------
    // Conveniences: iteration and serialization
    // ------------------------------------------------------------------

    /// Iterates over the top-level entries in insertion order.
    ///
    /// The iteration is lazy and restartable: each call reflects the
    /// current top-level state, and nested levels are not flattened.
    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.data.iter()
    }

    /// Re-encodes the entire current structure as JSON text.
    ///
    /// Reflects all prior mutations and preserves key order; the
    /// resolution cache is not consulted. Encoding a string-keyed mapping
    /// is not expected to fail.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.data)
            .map_err(|cause| StoreError::decode("could not re-encode the structure", Some(cause)))
    }

    /// Like [`to_json`](Self::to_json), with human-readable indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.data)
            .map_err(|cause| StoreError::decode("could not re-encode the structure", Some(cause)))
    }
}

impl Default for PathStore {
    /// An empty store with the default delimiter.
    fn default() -> Self {
        Self {
            data: Map::new(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            cache: HashMap::new(),
        }
    }
}

impl<'a> IntoIterator for &'a PathStore {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl Serialize for PathStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.data.serialize(serializer)
    }
}

/// Index-style access by full path string: `store["key1.key2"]`.
///
/// Resolves the same path semantics as [`PathStore::get`] (without touching
/// the cache, since indexing takes `&self`).
///
/// # Panics
///
/// Panics with the [`StoreError::KeyNotFound`] message if the path does not
/// resolve, like the standard library's map indexing. Use
/// [`PathStore::get`] for fallible access.
impl Index<&str> for PathStore {
    type Output = Value;

    fn index(&self, path: &str) -> &Value {
        match self.resolve(path) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}

fn absent(path: &str, segment: &Segment<'_>) -> StoreError {
    StoreError::key_not_found(
        format!("'{}' is absent in '{}'", segment.text, path),
        ErrorContext::in_path(path, segment.range.clone()),
    )
}

// Whether two path strings address the same location or an
// ancestor/descendant pair, i.e. one extends the other by whole segments.
fn overlaps(a: &str, b: &str, delimiter: &str) -> bool {
    a == b
        || (a.starts_with(b) && a[b.len()..].starts_with(delimiter))
        || (b.starts_with(a) && b[a.len()..].starts_with(delimiter))
}

/// The display name of a JSON value's type, for conflict reporting.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "Null",
        Value::Bool(_) => "Bool",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}

#[cfg(test)]
mod cache_tests {
    use super::*;
    use serde_json::json;

    fn sample() -> PathStore {
        PathStore::new(r#"{"key1":{"key1-1":"value1"},"key3":"value3"}"#).unwrap()
    }

    #[test]
    fn get_populates_the_cache() {
        let mut store = sample();
        store.get("key1.key1-1").unwrap();
        assert_eq!(store.cache.get("key1.key1-1"), Some(&json!("value1")));
    }

    #[test]
    fn exists_populates_the_cache() {
        let mut store = sample();
        assert!(store.exists("key1.key1-1"));
        assert_eq!(store.cache.get("key1.key1-1"), Some(&json!("value1")));
    }

    #[test]
    fn failed_get_writes_no_entry() {
        let mut store = sample();
        assert!(store.get("key1.nope").is_err());
        assert!(store.cache.is_empty());
    }

    #[test]
    fn set_refreshes_the_entry() {
        let mut store = sample();
        store.get("key3").unwrap();
        store.set("key3", json!("test")).unwrap();
        assert_eq!(store.cache.get("key3"), Some(&json!("test")));
    }

    #[test]
    fn ancestor_write_evicts_descendants() {
        let mut store = sample();
        store.get("key1.key1-1").unwrap();
        store.set("key1", json!("flat")).unwrap();
        assert!(!store.cache.contains_key("key1.key1-1"));
        assert_eq!(store.cache.get("key1"), Some(&json!("flat")));
    }

    #[test]
    fn descendant_write_evicts_ancestors() {
        let mut store = sample();
        store.get("key1").unwrap();
        store.set("key1.key1-2", json!("new")).unwrap();
        assert!(!store.cache.contains_key("key1"));
    }

    #[test]
    fn sibling_entries_survive_writes() {
        let mut store = sample();
        store.get("key3").unwrap();
        store.set("key1.key1-2", json!("new")).unwrap();
        assert_eq!(store.cache.get("key3"), Some(&json!("value3")));
    }

    #[test]
    fn prefix_eviction_respects_segment_boundaries() {
        let mut store = PathStore::new(r#"{"key":1,"key2":2}"#).unwrap();
        store.get("key2").unwrap();
        // "key" is not an ancestor of "key2"; its write must not evict it.
        store.set("key", json!(10)).unwrap();
        assert_eq!(store.cache.get("key2"), Some(&json!(2)));
    }

    #[test]
    fn remove_evicts_the_exact_path_and_descendants() {
        let mut store = sample();
        store.get("key1.key1-1").unwrap();
        store.get("key3").unwrap();
        store.remove("key1").unwrap();
        assert!(!store.cache.contains_key("key1.key1-1"));
        assert_eq!(store.cache.get("key3"), Some(&json!("value3")));
    }
}
