use std::ops::Range;

use crate::doc::Selection;

/// What one applied command changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    /// Block indices whose rendered form may differ, in the new tree.
    /// Extends to the end of the document when blocks were added or
    /// removed, since every later index shifted.
    pub changed: Range<usize>,
    /// Where the selection landed.
    pub new_selection: Selection,
    /// Document version after this change.
    pub version: u64,
}
