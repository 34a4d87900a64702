//! Common items useful for working with Whisker source text but not
//! part of the language.

/// Location in the source text of a language element instance.
///
/// The location is defined by byte indices in the source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SourceSpan {
    /// The byte position of the starting character (0-indexed).
    pub start: usize,
    /// The byte position one past the ending character (0-indexed).
    pub end: usize,
}

impl SourceSpan {
    pub fn range(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}
