//! The canonical document tree: blocks of styled runs plus the root
//! settings, with the primitive mutation operations.

pub mod block;
pub mod coords;
pub mod document;
pub mod style;

pub use block::{Alignment, Block, BlockKind, ListKind, Run};
pub use coords::{Coordinate, Selection};
pub use document::{
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_TITLE, Document, EditError,
};
pub(crate) use document::check_style_value;
pub use style::{StyleSet, ToggleAttr, ValueAttr};
