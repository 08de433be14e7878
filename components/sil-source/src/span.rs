use std::{hash::Hash, sync::Arc};

use sil_util::Text;

/// A source file: a display path and its full contents.
///
/// Cloning is cheap; clones refer to the same file.
#[derive(Clone)]
pub struct SourceFile {
    data: Arc<SourceFileData>,
}

struct SourceFileData {
    path: Text,
    contents: Text,
}

impl SourceFile {
    pub fn new(path: impl Into<Text>, contents: impl Into<Text>) -> Self {
        Self {
            data: Arc::new(SourceFileData {
                path: path.into(),
                contents: contents.into(),
            }),
        }
    }

    pub fn path(&self) -> &str {
        &self.data.path
    }

    pub fn contents(&self) -> &str {
        &self.data.contents
    }

    /// The text covered by `span`.
    ///
    /// Panics if `span` is out of bounds or not on a char boundary.
    pub fn text(&self, span: Span) -> &str {
        &self.contents()[span.start.as_usize()..span.end.as_usize()]
    }
}

impl PartialEq for SourceFile {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data) || self.path() == other.path()
    }
}

impl Eq for SourceFile {}

impl Hash for SourceFile {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.path().hash(state)
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SourceFile").field(&self.path()).finish()
    }
}

/// A byte range within some source file.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Span {
    pub start: Offset,
    pub end: Offset,
}

impl Span {
    pub fn new(start: impl Into<Offset>, end: impl Into<Offset>) -> Self {
        let (start, end) = (start.into(), end.into());
        assert!(
            start <= end,
            "span starts after it ends: {start:?}..{end:?}"
        );
        Span { start, end }
    }
}

/// A span together with the file it belongs to. These are what
/// diagnostics carry.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct AbsoluteSpan {
    pub source_file: SourceFile,
    pub span: Span,
}

impl AbsoluteSpan {
    pub fn range(&self) -> std::ops::Range<usize> {
        self.span.start.as_usize()..self.span.end.as_usize()
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Offset(u32);

impl From<usize> for Offset {
    fn from(offset: usize) -> Self {
        assert!(offset < u32::MAX as usize);
        Offset(offset as u32)
    }
}

impl From<u32> for Offset {
    fn from(offset: u32) -> Self {
        Offset(offset)
    }
}

impl Offset {
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}
