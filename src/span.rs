use std::fmt;

use codespan_reporting::diagnostic::Label;

/// A value that opaquely identifies a file registered for diagnostics.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct FileId(pub usize);

/// A byte range in an input document.
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    /// The file that the [Span] points into.
    pub file_id: FileId,

    /// The starting byte offset of the [Span].
    pub start: usize,

    /// The ending byte offset of the [Span].
    pub end: usize,
}

impl Span {
    /// Creates a new [Span] from a [FileId] and a byte range.
    pub fn new(file_id: FileId, start: usize, end: usize) -> Self {
        Self {
            file_id,
            start,
            end,
        }
    }

    /// Creates a primary label from this span.
    pub fn primary(&self) -> Label<usize> {
        Label::primary(self.file_id.0, self.start..self.end)
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Span({:?}:{}..{})", self.file_id.0, self.start, self.end)
    }
}
