// ABOUTME: Application-wide error types for skafos.
// ABOUTME: Uses thiserror for ergonomic error handling.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    InvalidImage(#[from] crate::types::ParseImageRefError),

    #[error(transparent)]
    Detection(#[from] crate::engine::DetectionError),

    #[error(transparent)]
    Engine(#[from] crate::engine::EngineError),

    #[error(transparent)]
    Acquire(#[from] crate::image::AcquireError),
}

pub type Result<T> = std::result::Result<T, Error>;
