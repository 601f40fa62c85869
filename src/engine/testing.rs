// ABOUTME: Scripted in-memory engine client for unit tests.
// ABOUTME: Records invocations and how many chunks the caller actually consumed.

use super::client::{ChunkStream, ContextStream, EngineClient};
use super::error::EngineError;
use super::sealed::Sealed;
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// What the scripted engine does when pull/build is invoked.
pub(crate) enum Script {
    /// Deliver these chunks, then end the stream.
    Chunks(Vec<Bytes>),
    /// Reject the request before any streaming begins.
    Reject { status: u16, message: String },
    /// Return a stream that never yields.
    Stall,
}

pub(crate) struct ScriptedEngine {
    script: Script,
    pub calls: AtomicUsize,
    pub delivered: Arc<AtomicUsize>,
    pub last_tag: Mutex<Option<String>>,
    pub last_context_len: AtomicUsize,
}

impl ScriptedEngine {
    pub fn with_chunks(chunks: Vec<&str>) -> Self {
        Self::new(Script::Chunks(
            chunks.into_iter().map(|c| Bytes::from(c.to_string())).collect(),
        ))
    }

    pub fn rejecting(status: u16, message: &str) -> Self {
        Self::new(Script::Reject {
            status,
            message: message.to_string(),
        })
    }

    pub fn stalled() -> Self {
        Self::new(Script::Stall)
    }

    fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            delivered: Arc::new(AtomicUsize::new(0)),
            last_tag: Mutex::new(None),
            last_context_len: AtomicUsize::new(0),
        }
    }

    fn stream(&self) -> Result<ChunkStream, EngineError> {
        match &self.script {
            Script::Chunks(chunks) => {
                let delivered = Arc::clone(&self.delivered);
                let items = chunks.clone().into_iter().map(Ok::<Bytes, EngineError>);
                Ok(Box::pin(futures::stream::iter(items).inspect(move |_| {
                    delivered.fetch_add(1, Ordering::SeqCst);
                })))
            }
            Script::Reject { status, message } => Err(EngineError::Rejected {
                status: *status,
                message: message.clone(),
            }),
            Script::Stall => Ok(Box::pin(futures::stream::pending::<Result<Bytes, EngineError>>())),
        }
    }
}

impl Sealed for ScriptedEngine {}

#[async_trait]
impl EngineClient for ScriptedEngine {
    async fn pull(&self, _reference: &str) -> Result<ChunkStream, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.stream()
    }

    async fn build_image(
        &self,
        mut context: ContextStream,
        tag: &str,
    ) -> Result<ChunkStream, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_tag.lock().unwrap() = Some(tag.to_string());
        let mut total = 0;
        while let Some(chunk) = context.next().await {
            match chunk {
                Ok(bytes) => total += bytes.len(),
                Err(e) => return Err(EngineError::Stream(e.to_string())),
            }
        }
        self.last_context_len.store(total, Ordering::SeqCst);
        self.stream()
    }
}
