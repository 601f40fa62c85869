// ABOUTME: Engine type definitions for Docker and Podman.
// ABOUTME: Includes RuntimeType, detected EngineInfo, and the EngineConfig override.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The container runtime type behind the socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeType {
    Docker,
    Podman,
}

impl std::fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeType::Docker => write!(f, "docker"),
            RuntimeType::Podman => write!(f, "podman"),
        }
    }
}

impl FromStr for RuntimeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "docker" => Ok(RuntimeType::Docker),
            "podman" => Ok(RuntimeType::Podman),
            other => Err(format!("unknown runtime '{other}' (expected docker or podman)")),
        }
    }
}

/// Detected engine socket information.
#[derive(Debug, Clone)]
pub struct EngineInfo {
    /// The type of runtime detected.
    pub runtime_type: RuntimeType,
    /// Path to the runtime socket.
    pub socket_path: String,
}

/// Configuration for explicit engine override.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// Explicit runtime type (overrides auto-detection).
    pub runtime: Option<RuntimeType>,
    /// Explicit socket path (overrides default).
    pub socket: Option<String>,
}
