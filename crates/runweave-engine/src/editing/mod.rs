//! Command based editing over the document tree.
//!
//! Every mutation flows through [`Editor::apply`]: a [`Cmd`] is
//! dispatched against the current selection, the tree mutates, the
//! selection is re-resolved onto the result, the version counter bumps,
//! and the caller gets a [`Patch`] describing what to redraw. Surfaces
//! translate between their flat per-block offsets and run granular
//! coordinates through the tracker in [`selection`], and hold no other
//! references into the tree.
//!
//! - [`commands`]: the `Cmd` vocabulary and per-variant handlers
//! - [`editor`]: the aggregate owning tree, selection and typing style
//! - [`selection`]: live position resolution, projection and transforms
//! - [`patch`]: the per-mutation result surfaces re-render from

pub mod commands;
pub mod editor;
pub mod patch;
pub mod selection;

pub use commands::Cmd;
pub use editor::Editor;
pub use patch::Patch;
pub use selection::{LivePosition, LiveRange, TextDelta};
