use std::path::PathBuf;
use thiserror::Error;

use crate::frame::Frame;

/// Errors an export collaborator can report back to the engine.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode animation: {0}")]
    Encode(String),
    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
    #[error("no exporter configured")]
    NoExporter,
}

/// Export collaborator contract: given the ordered frames and the playback
/// delay, produce an encoded animation file. The engine runs this on a
/// background thread and surfaces the outcome as a one-shot event; it never
/// renders pixels itself.
pub trait GifExporter: Send + Sync {
    fn export(&self, frames: &[Frame], delay_ms: u64) -> Result<PathBuf, ExportError>;
}
