pub mod doc;
pub mod editing;
pub mod markup;
pub mod snapshot;

// Re-export key types for easier usage
pub use doc::*;
pub use editing::{commands::*, editor::*, patch::*, selection::*};
pub use markup::{parse_markup, render_html_page, render_markup};
pub use snapshot::*;
