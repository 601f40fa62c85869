// ABOUTME: Error taxonomy for image acquisition operations.
// ABOUTME: Configuration errors are synchronous; the rest surface from the stream drive.

use crate::engine::EngineError;
use crate::types::ParseImageRefError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors from pull and build operations.
///
/// Every operation resolves to exactly one `Ok(())` or one of these; there
/// is no separate callback channel and nothing is retried automatically.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("invalid image reference: {0}")]
    InvalidReference(#[from] ParseImageRefError),

    #[error("build requires a source path in the image descriptor")]
    MissingContext,

    #[error("build context {0} is not a directory")]
    InvalidContext(PathBuf),

    #[error("failed to archive build context: {0}")]
    ContextArchive(String),

    #[error(transparent)]
    Transport(#[from] EngineError),

    #[error("engine reported failure: {0}")]
    EngineReported(String),

    #[error("engine did not finish within {0:?}")]
    DeadlineExceeded(Duration),
}
