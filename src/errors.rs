//! The unified, `miette`-based failure type for the store.
//!
//! Every operation fails with one of three distinct, catchable classes:
//! [`Decode`](StoreError::Decode) for construction input that is not a JSON
//! mapping, [`TypeConflict`](StoreError::TypeConflict) for attempts to treat
//! a scalar as a container, and [`KeyNotFound`](StoreError::KeyNotFound) for
//! reads and removals of absent paths. When a failure is tied to a path
//! string, the error carries the string and the byte range of the offending
//! segment so reports can underline it.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode, SourceSpan};
use thiserror::Error;

/// Shorthand for results carrying a [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;

/// Type-safe classification of a [`StoreError`], for callers that dispatch
/// on the failure class rather than the full variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Source text could not be decoded into a mapping.
    Decode,
    /// A scalar stood where a mapping was required.
    TypeConflict,
    /// A path segment was absent at its position.
    KeyNotFound,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Decode => "Decode",
            ErrorKind::TypeConflict => "TypeConflict",
            ErrorKind::KeyNotFound => "KeyNotFound",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Minimal, composable context attached to an error: the path string it
/// occurred in (if any), the span of the offending segment, and an optional
/// help message.
#[derive(Debug, Default)]
pub struct ErrorContext {
    pub source: Option<Arc<NamedSource<String>>>,
    pub span: Option<SourceSpan>,
    pub help: Option<String>,
}

impl ErrorContext {
    /// An empty context (no path, no span, no help).
    pub fn none() -> Self {
        Self::default()
    }

    /// Context labeling one segment's byte range inside a path string.
    pub fn in_path(path: &str, range: Range<usize>) -> Self {
        Self {
            source: Some(Arc::new(NamedSource::new("path", path.to_string()))),
            span: Some(SourceSpan::from(range)),
            help: None,
        }
    }

    /// Attaches a help message to this context.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Unified error type for all store failure modes.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("decode error: {message}")]
    Decode {
        message: String,
        ctx: ErrorContext,
        #[source]
        cause: Option<serde_json::Error>,
    },
    #[error("type conflict: {message}")]
    TypeConflict { message: String, ctx: ErrorContext },
    #[error("key not found: {message}")]
    KeyNotFound { message: String, ctx: ErrorContext },
}

impl StoreError {
    pub(crate) fn decode(message: impl Into<String>, cause: Option<serde_json::Error>) -> Self {
        StoreError::Decode {
            message: message.into(),
            ctx: ErrorContext::none(),
            cause,
        }
    }

    pub(crate) fn type_conflict(message: impl Into<String>, ctx: ErrorContext) -> Self {
        StoreError::TypeConflict {
            message: message.into(),
            ctx,
        }
    }

    pub(crate) fn key_not_found(message: impl Into<String>, ctx: ErrorContext) -> Self {
        StoreError::KeyNotFound {
            message: message.into(),
            ctx,
        }
    }

    fn get_ctx(&self) -> &ErrorContext {
        match self {
            StoreError::Decode { ctx, .. } => ctx,
            StoreError::TypeConflict { ctx, .. } => ctx,
            StoreError::KeyNotFound { ctx, .. } => ctx,
        }
    }

    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Decode { .. } => ErrorKind::Decode,
            StoreError::TypeConflict { .. } => ErrorKind::TypeConflict,
            StoreError::KeyNotFound { .. } => ErrorKind::KeyNotFound,
        }
    }

    fn primary_label(&self) -> &'static str {
        match self {
            StoreError::Decode { .. } => "invalid document",
            StoreError::TypeConflict { .. } => "not a mapping",
            StoreError::KeyNotFound { .. } => "missing here",
        }
    }
}

impl Diagnostic for StoreError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(match self {
            StoreError::Decode { .. } => "pathstore::decode",
            StoreError::TypeConflict { .. } => "pathstore::type_conflict",
            StoreError::KeyNotFound { .. } => "pathstore::key_not_found",
        }))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.get_ctx()
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.get_ctx()
            .source
            .as_ref()
            .map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.get_ctx().span?;
        let label = LabeledSpan::new_with_span(Some(self.primary_label().to_string()), span);
        Some(Box::new(std::iter::once(label)))
    }
}
