// ABOUTME: The EngineClient capability trait consumed by image acquisition.
// ABOUTME: Pull and build return raw chunk streams; in-band errors arrive as data.

use super::error::EngineError;
use super::sealed::Sealed;
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;

/// Raw chunks of the engine's streamed progress output.
///
/// The engine reports in-band errors as ordinary data; an `Err` item here
/// means the transport itself failed mid-stream.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<Bytes, EngineError>> + Send>>;

/// Tar bytes fed to the engine for a build.
///
/// Read lazily so large build contexts are never buffered whole.
pub type ContextStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// The minimal engine surface image acquisition needs.
///
/// An `Err` return means the engine rejected the request before any
/// streaming began (connectivity, bad request); everything after that is
/// delivered through the chunk stream.
#[async_trait]
pub trait EngineClient: Sealed + Send + Sync {
    /// Start pulling `reference` from its registry.
    async fn pull(&self, reference: &str) -> Result<ChunkStream, EngineError>;

    /// Start building an image from a streamed tar `context`, tagged `tag`.
    async fn build_image(&self, context: ContextStream, tag: &str)
    -> Result<ChunkStream, EngineError>;
}
