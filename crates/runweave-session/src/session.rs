//! The editing session: one engine [`Editor`] wired to the host's
//! gateways, with autosave after every mutation and a dirty flag that
//! only an explicit save or export clears.

use runweave_engine::doc::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, Document, EditError};
use runweave_engine::editing::{Cmd, Editor, LiveRange, Patch};
use runweave_engine::markup::render_html_page;
use runweave_engine::snapshot::{Snapshot, StructuredSnapshot};

use crate::gateway::{ConfirmationGate, ExportGateway, GatewayError, PersistenceGateway};

/// The prompt shown before an unsaved document is thrown away.
pub const NEW_DOCUMENT_PROMPT: &str = "Create a new document? Unsaved changes will be lost.";

/// Read-only signals for the presentation layer. Side-effect failures
/// land here (and in the log); they never interrupt editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionNotice {
    /// The store could not be read at startup.
    LoadFailed,
    /// The store was read but held an unusable document, now discarded.
    LoadDiscarded,
    AutosaveFailed,
    SaveFailed,
    ExportFailed,
}

/// File formats [`Session::export`] can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Html,
    Text,
    Json,
}

/// One user's editing session over one document.
///
/// Every mutating method routes through the engine editor, marks the
/// session dirty and autosaves. Gateway failures are reported as
/// [`SessionNotice`]s; the in-memory document is never rolled back and
/// never lost to an I/O problem.
pub struct Session {
    editor: Editor,
    store: Box<dyn PersistenceGateway>,
    exporter: Box<dyn ExportGateway>,
    gate: Box<dyn ConfirmationGate>,
    fresh_font_size: String,
    fresh_font_family: String,
    saved: bool,
    notices: Vec<SessionNotice>,
}

impl Session {
    /// Start a session with the stock document defaults, restoring the
    /// persisted document if the store holds a usable one.
    pub fn start(
        store: Box<dyn PersistenceGateway>,
        exporter: Box<dyn ExportGateway>,
        gate: Box<dyn ConfirmationGate>,
    ) -> Self {
        Self::start_with_defaults(store, exporter, gate, DEFAULT_FONT_SIZE, DEFAULT_FONT_FAMILY)
    }

    /// Start a session whose fresh documents use the configured root
    /// fonts instead of the stock ones.
    ///
    /// A store that cannot be read, or that holds a malformed document,
    /// yields a fresh document plus a notice; the malformed payload is
    /// left alone until the next save overwrites it.
    pub fn start_with_defaults(
        store: Box<dyn PersistenceGateway>,
        exporter: Box<dyn ExportGateway>,
        gate: Box<dyn ConfirmationGate>,
        font_size: &str,
        font_family: &str,
    ) -> Self {
        let mut notices = Vec::new();
        let restored = match store.load() {
            Ok(Some(snapshot)) => match snapshot.to_document() {
                Ok(doc) => {
                    log::debug!("Restored persisted document \"{}\"", doc.title());
                    Some(doc)
                }
                Err(err) => {
                    log::warn!("Discarding persisted document: {err}");
                    notices.push(SessionNotice::LoadDiscarded);
                    None
                }
            },
            Ok(None) => None,
            Err(GatewayError::Snapshot(err)) => {
                log::warn!("Discarding persisted document: {err}");
                notices.push(SessionNotice::LoadDiscarded);
                None
            }
            Err(err) => {
                log::warn!("Failed to load persisted document: {err}");
                notices.push(SessionNotice::LoadFailed);
                None
            }
        };
        let editor = Editor::from_document(
            restored.unwrap_or_else(|| Document::with_defaults(font_size, font_family)),
        );
        Self {
            editor,
            store,
            exporter,
            gate,
            fresh_font_size: font_size.to_string(),
            fresh_font_family: font_family.to_string(),
            saved: true,
            notices,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn document(&self) -> &Document {
        self.editor.document()
    }

    /// False once anything changed since the last explicit save or
    /// export. Autosave does not clear it.
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    pub fn notices(&self) -> &[SessionNotice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<SessionNotice> {
        std::mem::take(&mut self.notices)
    }

    pub fn set_selection(&mut self, range: LiveRange) {
        self.editor.set_selection(range);
    }

    pub fn insert_text(&mut self, text: &str) -> Result<Patch, EditError> {
        self.mutate(Cmd::InsertText(text.to_string()))
    }

    pub fn delete_selection(&mut self) -> Result<Patch, EditError> {
        self.mutate(Cmd::DeleteSelection)
    }

    pub fn delete_backward(&mut self) -> Result<Patch, EditError> {
        self.mutate(Cmd::DeleteBackward)
    }

    pub fn delete_forward(&mut self) -> Result<Patch, EditError> {
        self.mutate(Cmd::DeleteForward)
    }

    pub fn split_block(&mut self) -> Result<Patch, EditError> {
        self.mutate(Cmd::SplitBlock)
    }

    /// Apply any formatting command to the current selection.
    pub fn format(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        self.mutate(cmd)
    }

    pub fn set_title(&mut self, title: &str) {
        self.editor.set_title(title);
        self.saved = false;
        self.autosave();
    }

    pub fn set_default_font_size(&mut self, size: &str) {
        self.editor.set_default_font_size(size);
        self.saved = false;
        self.autosave();
    }

    pub fn set_default_font_family(&mut self, family: &str) {
        self.editor.set_default_font_family(family);
        self.saved = false;
        self.autosave();
    }

    /// Persist now and mark the session clean.
    pub fn save(&mut self) {
        let snapshot = Snapshot::from_document(self.editor.document());
        match self.store.save(&snapshot) {
            Ok(()) => self.saved = true,
            Err(err) => {
                log::warn!("Save failed: {err}");
                self.notices.push(SessionNotice::SaveFailed);
            }
        }
    }

    /// Hand the document to the export gateway in the chosen format and
    /// mark the session clean on success. The filename stem is the
    /// document title, or `document` when the title is empty.
    pub fn export(&mut self, format: ExportFormat) {
        let doc = self.editor.document();
        let stem = if doc.title().is_empty() {
            "document"
        } else {
            doc.title()
        };
        let (filename, mime_type, bytes) = match format {
            ExportFormat::Html => (
                format!("{stem}.html"),
                "text/html",
                render_html_page(doc).into_bytes(),
            ),
            ExportFormat::Text => (
                format!("{stem}.txt"),
                "text/plain",
                doc.plain_text().into_bytes(),
            ),
            ExportFormat::Json => {
                let json = match StructuredSnapshot::exported(doc).to_json() {
                    Ok(json) => json,
                    Err(err) => {
                        log::warn!("Export failed: {err}");
                        self.notices.push(SessionNotice::ExportFailed);
                        return;
                    }
                };
                (format!("{stem}.json"), "application/json", json.into_bytes())
            }
        };
        match self.exporter.trigger_download(&filename, mime_type, &bytes) {
            Ok(()) => self.saved = true,
            Err(err) => {
                log::warn!("Export failed: {err}");
                self.notices.push(SessionNotice::ExportFailed);
            }
        }
    }

    /// Replace the document with a fresh one, behind the confirmation
    /// gate. Returns whether the user went through with it.
    pub fn new_document(&mut self) -> bool {
        if !self.gate.confirm(NEW_DOCUMENT_PROMPT) {
            return false;
        }
        self.editor = Editor::from_document(Document::with_defaults(
            &self.fresh_font_size,
            &self.fresh_font_family,
        ));
        self.saved = true;
        true
    }

    fn mutate(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        let patch = self.editor.apply(cmd)?;
        self.saved = false;
        self.autosave();
        Ok(patch)
    }

    fn autosave(&mut self) {
        let snapshot = Snapshot::from_document(self.editor.document());
        if let Err(err) = self.store.save(&snapshot) {
            log::warn!("Autosave failed: {err}");
            self.notices.push(SessionNotice::AutosaveFailed);
        }
    }
}
