// ABOUTME: Explicit per-operation state machine for pull and build.
// ABOUTME: Makes the exactly-once terminal outcome mechanical, not incidental.

use super::error::AcquireError;
use super::progress::{self, StreamEvent};
use crate::engine::ChunkStream;
use futures::StreamExt;

/// States of a single acquisition operation.
///
/// `Succeeded` and `Failed` are terminal; events delivered after either are
/// ignored so a spurious extra `end` or data chunk can never produce a
/// second outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OperationState {
    Idle,
    Validating,
    Invoking,
    Streaming,
    Succeeded,
    Failed,
}

pub(crate) struct StreamDriver {
    state: OperationState,
}

impl StreamDriver {
    pub fn new() -> Self {
        Self {
            state: OperationState::Idle,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> OperationState {
        self.state
    }

    fn is_terminal(&self) -> bool {
        matches!(self.state, OperationState::Succeeded | OperationState::Failed)
    }

    fn advance(&mut self, next: OperationState) {
        debug_assert!(!self.is_terminal(), "advance past terminal state");
        self.state = next;
    }

    pub fn validating(&mut self) {
        self.advance(OperationState::Validating);
    }

    pub fn invoking(&mut self) {
        self.advance(OperationState::Invoking);
    }

    pub fn streaming(&mut self) {
        self.advance(OperationState::Streaming);
    }

    pub fn fail(&mut self) {
        self.state = OperationState::Failed;
    }

    /// Process one data chunk. Returns the engine's message if the chunk
    /// terminated the operation; events decoded after the error within the
    /// same chunk are not processed.
    pub fn on_chunk(&mut self, chunk: &[u8]) -> Option<String> {
        if self.is_terminal() {
            tracing::debug!(
                "ignoring {} byte chunk delivered after terminal state",
                chunk.len()
            );
            return None;
        }

        for event in progress::decode_chunk(chunk) {
            match event {
                StreamEvent::Progress(line) => tracing::debug!("engine: {line}"),
                StreamEvent::Error(message) => {
                    self.state = OperationState::Failed;
                    return Some(message);
                }
            }
        }
        None
    }

    /// Process the end of the stream. Returns false if the operation had
    /// already terminated (the extra end is ignored).
    pub fn on_end(&mut self) -> bool {
        if self.is_terminal() {
            tracing::debug!("ignoring stream end delivered after terminal state");
            return false;
        }
        self.state = OperationState::Succeeded;
        true
    }
}

/// Drain a chunk stream to its single terminal outcome.
pub(crate) async fn drain(
    stream: &mut ChunkStream,
    driver: &mut StreamDriver,
) -> Result<(), AcquireError> {
    while let Some(item) = stream.next().await {
        let chunk = match item {
            Ok(chunk) => chunk,
            Err(e) => {
                driver.fail();
                return Err(AcquireError::Transport(e));
            }
        };
        if let Some(message) = driver.on_chunk(&chunk) {
            return Err(AcquireError::EngineReported(message));
        }
    }
    driver.on_end();
    Ok(())
}
