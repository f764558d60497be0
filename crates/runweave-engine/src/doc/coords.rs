use serde::{Deserialize, Serialize};

/// A canonical position in the tree: block index, run index, character
/// offset into the run text.
///
/// Coordinates are only valid against the tree they were resolved on.
/// After a mutation they must be re-resolved, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinate {
    pub block: usize,
    pub run: usize,
    pub offset: usize,
}

impl Coordinate {
    pub fn new(block: usize, run: usize, offset: usize) -> Self {
        Self { block, run, offset }
    }

    /// The very first position of a block.
    pub fn block_start(block: usize) -> Self {
        Self::new(block, 0, 0)
    }
}

/// A directional pair of coordinates: `anchor` is where the selection
/// started, `focus` where it ends. Focus may precede anchor, and the
/// orientation is preserved through formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: Coordinate,
    pub focus: Coordinate,
}

impl Selection {
    pub fn new(anchor: Coordinate, focus: Coordinate) -> Self {
        Self { anchor, focus }
    }

    /// A collapsed selection, anchor and focus on the same spot.
    pub fn caret(at: Coordinate) -> Self {
        Self::new(at, at)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}
