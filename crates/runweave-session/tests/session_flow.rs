//! Session behavior against scripted gateways: restore, autosave,
//! export and the new-document confirmation.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use runweave_engine::editing::{Cmd, LivePosition, LiveRange};
use runweave_engine::snapshot::Snapshot;
use runweave_session::{
    ConfirmationGate, ExportFormat, ExportGateway, GatewayError, NEW_DOCUMENT_PROMPT,
    PersistenceGateway, Session, SessionNotice,
};

/// Store double the test keeps a handle on after the session takes
/// ownership of its clone.
#[derive(Clone, Default)]
struct SharedStore {
    slot: Rc<RefCell<Option<String>>>,
    saves: Rc<RefCell<usize>>,
    fail_loads: Rc<RefCell<bool>>,
    fail_saves: Rc<RefCell<bool>>,
}

impl SharedStore {
    fn seeded(json: &str) -> Self {
        let store = Self::default();
        *store.slot.borrow_mut() = Some(json.to_string());
        store
    }

    fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn saves(&self) -> usize {
        *self.saves.borrow()
    }
}

impl PersistenceGateway for SharedStore {
    fn load(&self) -> Result<Option<Snapshot>, GatewayError> {
        if *self.fail_loads.borrow() {
            return Err(GatewayError::Io(io::Error::other("store offline")));
        }
        match self.slot.borrow().as_deref() {
            Some(json) => Ok(Some(Snapshot::from_json(json)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), GatewayError> {
        *self.saves.borrow_mut() += 1;
        if *self.fail_saves.borrow() {
            return Err(GatewayError::Io(io::Error::other("disk full")));
        }
        *self.slot.borrow_mut() = Some(snapshot.to_json()?);
        Ok(())
    }
}

#[derive(Clone, Default)]
struct SharedExporter {
    downloads: Rc<RefCell<Vec<(String, String, Vec<u8>)>>>,
    failing: Rc<RefCell<bool>>,
}

impl SharedExporter {
    fn downloads(&self) -> Vec<(String, String, Vec<u8>)> {
        self.downloads.borrow().clone()
    }
}

impl ExportGateway for SharedExporter {
    fn trigger_download(
        &mut self,
        filename: &str,
        mime_type: &str,
        bytes: &[u8],
    ) -> Result<(), GatewayError> {
        if *self.failing.borrow() {
            return Err(GatewayError::Io(io::Error::other("no download sink")));
        }
        self.downloads
            .borrow_mut()
            .push((filename.to_string(), mime_type.to_string(), bytes.to_vec()));
        Ok(())
    }
}

#[derive(Clone, Default)]
struct SharedGate {
    answer: Rc<RefCell<bool>>,
    prompts: Rc<RefCell<Vec<String>>>,
}

impl SharedGate {
    fn answering(answer: bool) -> Self {
        let gate = Self::default();
        *gate.answer.borrow_mut() = answer;
        gate
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl ConfirmationGate for SharedGate {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.borrow_mut().push(prompt.to_string());
        *self.answer.borrow()
    }
}

fn start(store: &SharedStore, exporter: &SharedExporter, gate: &SharedGate) -> Session {
    Session::start(
        Box::new(store.clone()),
        Box::new(exporter.clone()),
        Box::new(gate.clone()),
    )
}

#[test]
fn restores_the_persisted_document() {
    let store = SharedStore::seeded(
        r#"{"title":"Notes","content":"<p><span>hello</span></p>","fontSize":"16px","fontFamily":"Georgia"}"#,
    );
    let session = start(&store, &SharedExporter::default(), &SharedGate::default());

    assert_eq!(session.document().title(), "Notes");
    assert_eq!(session.document().default_font_size(), "16px");
    assert_eq!(session.document().plain_text(), "hello");
    assert!(session.is_saved());
    assert!(session.notices().is_empty());
}

#[test]
fn unreadable_store_payload_is_discarded() {
    let store = SharedStore::seeded("not json at all");
    let mut session = start(&store, &SharedExporter::default(), &SharedGate::default());

    assert_eq!(session.document().title(), "Untitled Document");
    assert_eq!(session.take_notices(), vec![SessionNotice::LoadDiscarded]);
    assert!(session.notices().is_empty());
    assert!(session.is_saved());
}

#[test]
fn unparseable_markup_is_discarded() {
    let store = SharedStore::seeded(
        r#"{"title":"x","content":"<blink>nope</blink>","fontSize":"14px","fontFamily":"Arial"}"#,
    );
    let mut session = start(&store, &SharedExporter::default(), &SharedGate::default());

    assert_eq!(session.document().plain_text(), "");
    assert_eq!(session.take_notices(), vec![SessionNotice::LoadDiscarded]);
}

#[test]
fn load_failure_raises_a_notice_and_starts_fresh() {
    let store = SharedStore::default();
    *store.fail_loads.borrow_mut() = true;
    let mut session = start(&store, &SharedExporter::default(), &SharedGate::default());

    assert_eq!(session.document().title(), "Untitled Document");
    assert_eq!(session.take_notices(), vec![SessionNotice::LoadFailed]);
}

#[test]
fn typing_autosaves_and_dirties_the_session() {
    let store = SharedStore::default();
    let mut session = start(&store, &SharedExporter::default(), &SharedGate::default());

    session.insert_text("hi").unwrap();

    assert!(!session.is_saved());
    assert_eq!(store.saves(), 1);
    let stored = store.contents().unwrap();
    assert!(stored.contains("<p><span>hi</span></p>"), "stored: {stored}");

    session.save();
    assert!(session.is_saved());
    assert_eq!(store.saves(), 2);
}

#[test]
fn formatting_autosaves_the_styled_markup() {
    let store = SharedStore::default();
    let mut session = start(&store, &SharedExporter::default(), &SharedGate::default());

    session.insert_text("bold me").unwrap();
    session.set_selection(LiveRange::new(
        LivePosition::new(0, 0),
        LivePosition::new(0, 7),
    ));
    session.format(Cmd::Bold).unwrap();

    let stored = store.contents().unwrap();
    assert!(stored.contains("font-weight: bold"), "stored: {stored}");
}

#[test]
fn rejected_style_values_never_reach_the_store() {
    let store = SharedStore::default();
    let mut session = start(&store, &SharedExporter::default(), &SharedGate::default());

    session.insert_text("pack").unwrap();
    session.set_selection(LiveRange::new(
        LivePosition::new(0, 0),
        LivePosition::new(0, 4),
    ));

    let result = session.format(Cmd::FontFamily("Geo;rgia".to_string()));
    assert!(result.is_err());

    // the failed command did not autosave, and the stored payload
    // still loads
    assert_eq!(store.saves(), 1);
    let stored = store.contents().unwrap();
    assert!(!stored.contains("Geo;rgia"), "stored: {stored}");
    assert!(Snapshot::from_json(&stored).unwrap().to_document().is_ok());
}

#[test]
fn moving_the_caret_is_not_a_mutation() {
    let store = SharedStore::default();
    let mut session = start(&store, &SharedExporter::default(), &SharedGate::default());
    session.insert_text("abc").unwrap();
    session.save();

    session.set_selection(LiveRange::caret(0, 1));

    assert!(session.is_saved());
    assert_eq!(store.saves(), 2);
}

#[test]
fn root_settings_changes_autosave() {
    let store = SharedStore::default();
    let mut session = start(&store, &SharedExporter::default(), &SharedGate::default());

    session.set_title("Journal");
    session.set_default_font_size("18px");
    session.set_default_font_family("Georgia");

    assert!(!session.is_saved());
    let stored = store.contents().unwrap();
    assert!(stored.contains(r#""title":"Journal""#));
    assert!(stored.contains(r#""fontSize":"18px""#));
    assert!(stored.contains(r#""fontFamily":"Georgia""#));
}

#[test]
fn autosave_failure_keeps_the_edit_and_raises_a_notice() {
    let store = SharedStore::default();
    let mut session = start(&store, &SharedExporter::default(), &SharedGate::default());
    *store.fail_saves.borrow_mut() = true;

    session.insert_text("still here").unwrap();

    assert_eq!(session.document().plain_text(), "still here");
    assert!(!session.is_saved());
    assert_eq!(session.take_notices(), vec![SessionNotice::AutosaveFailed]);

    session.save();
    assert!(!session.is_saved());
    assert_eq!(session.take_notices(), vec![SessionNotice::SaveFailed]);
}

#[test]
fn export_produces_one_file_per_format() {
    let store = SharedStore::default();
    let exporter = SharedExporter::default();
    let mut session = start(&store, &exporter, &SharedGate::default());
    session.set_title("Trip Plan");
    session.insert_text("pack").unwrap();

    session.export(ExportFormat::Html);
    session.export(ExportFormat::Text);
    session.export(ExportFormat::Json);

    let downloads = exporter.downloads();
    assert_eq!(downloads.len(), 3);

    assert_eq!(downloads[0].0, "Trip Plan.html");
    assert_eq!(downloads[0].1, "text/html");
    let page = String::from_utf8(downloads[0].2.clone()).unwrap();
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("<h1>Trip Plan</h1>"));

    assert_eq!(downloads[1].0, "Trip Plan.txt");
    assert_eq!(downloads[1].1, "text/plain");
    assert_eq!(downloads[1].2, b"pack");

    assert_eq!(downloads[2].0, "Trip Plan.json");
    assert_eq!(downloads[2].1, "application/json");
    let json: serde_json::Value = serde_json::from_slice(&downloads[2].2).unwrap();
    assert_eq!(json["title"], "Trip Plan");
    assert!(json["exportedAt"].is_string());

    assert!(session.is_saved());
}

#[test]
fn empty_title_exports_as_document() {
    let exporter = SharedExporter::default();
    let mut session = start(&SharedStore::default(), &exporter, &SharedGate::default());
    session.set_title("");

    session.export(ExportFormat::Text);

    assert_eq!(exporter.downloads()[0].0, "document.txt");
}

#[test]
fn export_failure_raises_a_notice() {
    let exporter = SharedExporter::default();
    *exporter.failing.borrow_mut() = true;
    let mut session = start(&SharedStore::default(), &exporter, &SharedGate::default());
    session.insert_text("x").unwrap();

    session.export(ExportFormat::Html);

    assert!(!session.is_saved());
    assert_eq!(session.take_notices(), vec![SessionNotice::ExportFailed]);
}

#[test]
fn new_document_respects_the_gate() {
    let store = SharedStore::default();
    let gate = SharedGate::answering(false);
    let mut session = start(&store, &SharedExporter::default(), &gate);
    session.insert_text("draft").unwrap();

    assert!(!session.new_document());
    assert_eq!(session.document().plain_text(), "draft");
    assert!(!session.is_saved());

    *gate.answer.borrow_mut() = true;
    let stored_before = store.contents();
    assert!(session.new_document());
    assert_eq!(session.document().plain_text(), "");
    assert_eq!(session.document().title(), "Untitled Document");
    assert!(session.is_saved());
    // The store still holds the old document until the next save.
    assert_eq!(store.contents(), stored_before);

    assert_eq!(gate.prompts(), vec![NEW_DOCUMENT_PROMPT, NEW_DOCUMENT_PROMPT]);
}
