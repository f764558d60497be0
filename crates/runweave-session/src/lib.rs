//! Session layer over the editing engine: document persistence, file
//! export and the new-document confirmation flow, all behind
//! host-supplied gateway traits so shells stay thin.

pub mod fonts;
pub mod gateway;
pub mod session;

// Re-export key types for easier usage
pub use fonts::{FONT_FAMILIES, FONT_SIZES};
pub use gateway::{
    ConfirmationGate, ExportGateway, FileStore, GatewayError, MemoryStore, PersistenceGateway,
};
pub use session::{ExportFormat, NEW_DOCUMENT_PROMPT, Session, SessionNotice};
