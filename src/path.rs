//! A parsed representation of a delimited key string.

use std::fmt;
use std::ops::Range;

/// One key of a path string, with its byte range in the original string.
///
/// The range is what lets diagnostics underline the exact segment that
/// failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub range: Range<usize>,
}

/// A path string split into segments by a store's delimiter.
///
/// Splitting never yields zero segments: `""` is a single empty segment,
/// and empty segments are passed through as literal keys. Segments cannot
/// contain the delimiter; there is no escaping mechanism.
///
/// # Examples
///
/// ```rust
/// use pathstore::KeyPath;
/// let path = KeyPath::split("key1.key2", ".");
/// assert_eq!(path.segments().len(), 2);
/// assert_eq!(path.segments()[1].text, "key2");
/// assert_eq!(path.segments()[1].range, 5..9);
/// ```
#[derive(Debug, Clone)]
pub struct KeyPath<'a> {
    raw: &'a str,
    delimiter: &'a str,
    segments: Vec<Segment<'a>>,
}

impl<'a> KeyPath<'a> {
    /// Splits `raw` by `delimiter`, recording each segment's byte range.
    pub fn split(raw: &'a str, delimiter: &'a str) -> Self {
        let mut segments = Vec::new();
        let mut start = 0;
        for text in raw.split(delimiter) {
            let end = start + text.len();
            segments.push(Segment {
                text,
                range: start..end,
            });
            start = end + delimiter.len();
        }
        Self {
            raw,
            delimiter,
            segments,
        }
    }

    /// The original, unsplit path string.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// The delimiter this path was split with.
    pub fn delimiter(&self) -> &'a str {
        self.delimiter
    }

    /// All segments, left to right.
    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// The final segment and everything before it.
    pub fn split_last(&self) -> (&Segment<'a>, &[Segment<'a>]) {
        // Safe: `str::split` always yields at least one piece.
        let (last, front) = self.segments.split_last().unwrap();
        (last, front)
    }
}

impl fmt::Display for KeyPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
