// ABOUTME: Image acquisition: pull from a registry or build from a local context.
// ABOUTME: Both operations drive the engine's streamed progress protocol to one outcome.

mod archive;
mod build;
mod descriptor;
mod error;
mod progress;
mod pull;
mod state;

pub use build::build;
pub use descriptor::ImageDescriptor;
pub use error::AcquireError;
pub use progress::{StreamEvent, decode_chunk, error_message};
pub use pull::pull;

use std::time::Duration;

/// Options shared by pull and build operations.
#[derive(Debug, Clone, Default)]
pub struct AcquireOptions {
    /// Abort if the engine has not finished streaming within this budget.
    /// `None` means wait indefinitely.
    pub timeout: Option<Duration>,
}
