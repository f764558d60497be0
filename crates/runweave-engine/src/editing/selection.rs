//! Tracking between surface positions and canonical tree coordinates.
//!
//! Surfaces report carets the only way they can: a block index plus a
//! character offset into that block, blind to run structure. The tracker
//! resolves those onto [`Coordinate`]s, projects coordinates back for
//! drawing, and carries absolute offsets through edits so a position held
//! across a mutation keeps pointing at the same logical character.

use serde::{Deserialize, Serialize};

use crate::doc::{Coordinate, Document, Selection};

/// A surface position: character offset into one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LivePosition {
    pub block: usize,
    pub offset: usize,
}

impl LivePosition {
    pub fn new(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }
}

/// A surface selection between two live positions, orientation kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveRange {
    pub anchor: LivePosition,
    pub focus: LivePosition,
}

impl LiveRange {
    pub fn new(anchor: LivePosition, focus: LivePosition) -> Self {
        Self { anchor, focus }
    }

    /// A collapsed range at one spot.
    pub fn caret(block: usize, offset: usize) -> Self {
        let at = LivePosition::new(block, offset);
        Self::new(at, at)
    }
}

/// One edit's effect on the flattened document, where block boundaries
/// count as a single character. `removed` characters at `at` were
/// replaced by `inserted` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextDelta {
    pub at: usize,
    pub removed: usize,
    pub inserted: usize,
}

impl TextDelta {
    pub fn insertion(at: usize, inserted: usize) -> Self {
        Self {
            at,
            removed: 0,
            inserted,
        }
    }

    pub fn removal(at: usize, removed: usize) -> Self {
        Self {
            at,
            removed,
            inserted: 0,
        }
    }
}

/// Resolve a live position onto the current tree.
///
/// Out-of-range input is clamped, never rejected: a block index past the
/// end lands in the last surviving block, an offset past the block's text
/// lands at the block end. On a run boundary the earlier run wins, so the
/// caret inherits the style of the text on its left.
pub fn resolve(doc: &Document, live: LivePosition) -> Coordinate {
    let block = live.block.min(doc.blocks().len() - 1);
    let (run, offset) = doc.blocks()[block].locate(live.offset);
    Coordinate::new(block, run, offset)
}

/// Resolve both ends of a live range.
pub fn resolve_range(doc: &Document, range: LiveRange) -> Selection {
    Selection::new(resolve(doc, range.anchor), resolve(doc, range.focus))
}

/// Project a coordinate back into the surface's block and offset space.
pub fn project(doc: &Document, at: Coordinate) -> LivePosition {
    let block = at.block.min(doc.blocks().len() - 1);
    let b = &doc.blocks()[block];
    let run = at.run.min(b.runs.len() - 1);
    let offset = at.offset.min(b.runs[run].char_len());
    LivePosition::new(block, b.offset_of(run, offset))
}

/// Absolute offset of a live position in the flattened document.
pub fn doc_offset(doc: &Document, live: LivePosition) -> usize {
    let block = live.block.min(doc.blocks().len() - 1);
    let before: usize = doc.blocks()[..block]
        .iter()
        .map(|b| b.char_len() + 1)
        .sum();
    before + live.offset.min(doc.blocks()[block].char_len())
}

/// Live position at an absolute offset, clamped to the document end.
pub fn position_at(doc: &Document, offset: usize) -> LivePosition {
    let mut remaining = offset;
    for (index, block) in doc.blocks().iter().enumerate() {
        let len = block.char_len();
        if remaining <= len {
            return LivePosition::new(index, remaining);
        }
        remaining -= len + 1;
    }
    let last = doc.blocks().len() - 1;
    LivePosition::new(last, doc.blocks()[last].char_len())
}

/// Carry an absolute offset through an edit: offsets before the edit stay
/// put, offsets inside the removed span collapse to the edit point,
/// offsets after it shift by the length change.
pub fn transform(offset: usize, delta: &TextDelta) -> usize {
    if offset < delta.at {
        offset
    } else if offset < delta.at + delta.removed {
        delta.at
    } else {
        offset - delta.removed + delta.inserted
    }
}
