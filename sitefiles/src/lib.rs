//! Client-side website file handling for generated model responses.
//!
//! This crate owns everything that happens after the relay returns raw model
//! text: slicing it into named files, assembling a single previewable HTML
//! document, tracking the conversation, and exporting the accumulated file
//! set to disk. Nothing here performs network I/O.

pub mod export;
pub mod files;
pub mod preview;
pub mod session;
pub mod split;

pub use export::{ExportError, mime_type, write_files};
pub use files::FileSet;
pub use preview::{NO_HTML_PLACEHOLDER, assemble_preview};
pub use session::{MessageKind, NO_FILES_WARNING, Session, SessionError, SessionMessage};
pub use split::split_response;
