// ABOUTME: Error type for engine transport and request failures.
// ABOUTME: In-band protocol errors are not represented here; they arrive as stream data.

use thiserror::Error;

/// Transport-level failures talking to the engine socket.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to connect to engine: {0}")]
    ConnectionFailed(String),

    #[error("engine request failed: {0}")]
    Request(String),

    #[error("engine rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("engine stream failed: {0}")]
    Stream(String),
}
