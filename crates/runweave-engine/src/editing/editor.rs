use crate::doc::{Coordinate, Document, EditError, Selection, StyleSet};
use crate::editing::commands::{self, Cmd};
use crate::editing::patch::Patch;
use crate::editing::selection::{self, LiveRange};

/// The editing aggregate: tree, selection, pending typing style and a
/// version counter.
///
/// All tree mutation flows through [`Editor::apply`]. A command is dispatched
/// against the current selection, the selection is re-resolved onto the
/// mutated tree, the version bumps, and the caller gets a [`Patch`]
/// saying which blocks to redraw. The surface renders from the tree and
/// never owns any state of its own beyond what it is told here.
///
/// Formatting at a collapsed selection does not touch the tree. It lands
/// in the typing style, which the next insertion consumes and which an
/// explicit selection move discards.
///
/// ```
/// use runweave_engine::editing::{Cmd, Editor, LivePosition, LiveRange};
///
/// let mut editor = Editor::new();
/// editor.apply(Cmd::InsertText("Hello world".to_string())).unwrap();
///
/// editor.set_selection(LiveRange::new(
///     LivePosition::new(0, 0),
///     LivePosition::new(0, 5),
/// ));
/// let patch = editor.apply(Cmd::Bold).unwrap();
///
/// assert_eq!(patch.version, 2);
/// assert_eq!(editor.document().plain_text(), "Hello world");
/// assert_eq!(editor.document().blocks()[0].runs.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Editor {
    doc: Document,
    selection: Selection,
    typing_style: Option<StyleSet>,
    version: u64,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// An editor over a fresh empty document.
    pub fn new() -> Self {
        Self::from_document(Document::new())
    }

    /// An editor over a restored document, caret at the very start.
    pub fn from_document(doc: Document) -> Self {
        Self {
            doc,
            selection: Selection::caret(Coordinate::block_start(0)),
            typing_style: None,
            version: 0,
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Root settings are not commands: they touch neither the tree nor
    /// the selection, so there is no patch and no version bump.
    pub fn set_title(&mut self, title: &str) {
        self.doc.set_title(title);
    }

    pub fn set_default_font_size(&mut self, size: &str) {
        self.doc.set_default_font_size(size);
    }

    pub fn set_default_font_family(&mut self, family: &str) {
        self.doc.set_default_font_family(family);
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn typing_style(&self) -> Option<&StyleSet> {
        self.typing_style.as_ref()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Take a selection reported by the surface. Moving the selection
    /// discards any pending typing style.
    pub fn set_selection(&mut self, range: LiveRange) {
        self.selection = selection::resolve_range(&self.doc, range);
        self.typing_style = None;
    }

    /// Apply one command. On success the tree has mutated, the selection
    /// points into the new tree and the version has bumped. On failure
    /// nothing changed.
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        let typing_style = self.typing_style.take();
        let outcome =
            match commands::dispatch(&mut self.doc, &self.selection, typing_style.clone(), &cmd) {
                Ok(outcome) => outcome,
                Err(err) => {
                    self.typing_style = typing_style;
                    return Err(err);
                }
            };
        self.selection = outcome.selection;
        self.typing_style = outcome.typing_style;
        self.version += 1;
        Ok(Patch {
            changed: outcome.changed,
            new_selection: self.selection,
            version: self.version,
        })
    }
}
