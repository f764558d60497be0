//! Presentational markup, the document's editing-surface form.
//!
//! - [`render`] emits the canonical markup (and the standalone page used
//!   for HTML export).
//! - [`parser`] reads the same subset back into blocks, strictly.
//!
//! Rendering and parsing are inverses on canonical documents; parsing
//! additionally tolerates bare text nodes and loose whitespace, then
//! canonicalizes.

mod cursor;
mod style_attr;

pub mod parser;
pub mod render;

pub use parser::parse_markup;
pub use render::{render_html_page, render_markup};
