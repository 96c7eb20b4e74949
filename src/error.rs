use thiserror::Error;

/// Bounds violations reported by the checked access surfaces.
///
/// The panicking surfaces ([`update`], [`query`], `tree[index]`) raise the
/// same conditions as panics instead; see each method's `# Panics` section.
///
/// [`update`]: crate::SegmentTree::update
/// [`query`]: crate::SegmentTree::query
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An element index at or past the number of elements.
    #[error("index {index} out of bounds for tree of {len} elements")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A query interval that is reversed or ends past the number of elements.
    #[error("invalid range {left}..{right} for tree of {len} elements")]
    InvalidRange {
        left: usize,
        right: usize,
        len: usize,
    },
}
