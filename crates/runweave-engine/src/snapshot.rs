//! Durable document forms: the persistence snapshot (title plus markup
//! content) and the structured export snapshot (full block tree).

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::doc::{Block, Document};
use crate::markup::{parse_markup, render_markup};

/// Failure decoding a persisted or imported document.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The payload parsed as data but is not a document this crate
    /// understands. The content is unusable and should be discarded.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub(crate) fn malformed(msg: impl Into<String>) -> SnapshotError {
    SnapshotError::MalformedSnapshot(msg.into())
}

/// The persistence schema: what autosave writes and load reads back.
///
/// Content travels as canonical markup, so anything that renders also
/// persists, and a hand-edited store surfaces as [`SnapshotError`]
/// rather than a half-parsed tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub title: String,
    pub content: String,
    pub font_size: String,
    pub font_family: String,
}

impl Snapshot {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            title: doc.title().to_string(),
            content: render_markup(doc),
            font_size: doc.default_font_size().to_string(),
            font_family: doc.default_font_family().to_string(),
        }
    }

    pub fn to_document(&self) -> Result<Document, SnapshotError> {
        let blocks = parse_markup(&self.content)?;
        Ok(Document::from_parts(
            &self.title,
            &self.font_size,
            &self.font_family,
            blocks,
        ))
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// The export schema: the block tree itself, plus a timestamp attached
/// at export time. Decoding never consults the markup parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredSnapshot {
    pub title: String,
    pub default_font_size: String,
    pub default_font_family: String,
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
}

impl StructuredSnapshot {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            title: doc.title().to_string(),
            default_font_size: doc.default_font_size().to_string(),
            default_font_family: doc.default_font_family().to_string(),
            blocks: doc.blocks().to_vec(),
            exported_at: None,
        }
    }

    /// Like [`StructuredSnapshot::from_document`], stamped with the
    /// current UTC time in RFC 3339.
    pub fn exported(doc: &Document) -> Self {
        let mut snapshot = Self::from_document(doc);
        snapshot.exported_at = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
        snapshot
    }

    pub fn to_document(&self) -> Document {
        Document::from_parts(
            &self.title,
            &self.default_font_size,
            &self.default_font_family,
            self.blocks.clone(),
        )
    }

    /// Pretty-printed JSON, the shape written to exported `.json` files.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}
