// ABOUTME: Container engine access for Docker and Podman.
// ABOUTME: Socket detection, the EngineClient capability trait, and the bollard-backed client.

mod bollard;
mod client;
mod detection;
mod error;
pub(crate) mod sealed;
#[cfg(test)]
pub(crate) mod testing;
mod types;

pub use self::bollard::{BollardEngine, EngineMetadata};
pub use client::{ChunkStream, ContextStream, EngineClient};
pub use detection::{DetectionError, detect_engine};
pub use error::EngineError;
pub use types::{EngineConfig, EngineInfo, RuntimeType};
