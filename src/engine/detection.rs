// ABOUTME: Engine socket detection for the local system.
// ABOUTME: Checks for Podman sockets first, then Docker; explicit config wins.

use super::types::{EngineConfig, EngineInfo, RuntimeType};
use std::path::Path;

/// Error during engine detection.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("no container runtime found (checked Podman and Docker sockets)")]
    NoRuntimeFound,
}

const ROOTFUL_PODMAN: &str = "/run/podman/podman.sock";
const DOCKER_SOCKET: &str = "/var/run/docker.sock";

/// Resolve the engine socket to use.
///
/// An explicit runtime in `config` takes precedence; otherwise sockets are
/// probed in order:
/// 1. Rootless Podman socket (`/run/user/$UID/podman/podman.sock`)
/// 2. Rootful Podman socket (`/run/podman/podman.sock`)
/// 3. Docker socket (`/var/run/docker.sock`)
pub fn detect_engine(config: &EngineConfig) -> Result<EngineInfo, DetectionError> {
    if let Some(runtime_type) = config.runtime {
        let socket_path = config
            .socket
            .clone()
            .unwrap_or_else(|| default_socket_path(runtime_type));
        return Ok(EngineInfo {
            runtime_type,
            socket_path,
        });
    }

    // A bare socket override still needs a runtime type; assume the
    // Docker-compatible API, which is what both runtimes serve.
    if let Some(ref socket_path) = config.socket {
        return Ok(EngineInfo {
            runtime_type: RuntimeType::Docker,
            socket_path: socket_path.clone(),
        });
    }

    if let Some(uid) = get_uid() {
        let rootless_socket = format!("/run/user/{}/podman/podman.sock", uid);
        if Path::new(&rootless_socket).exists() {
            return Ok(EngineInfo {
                runtime_type: RuntimeType::Podman,
                socket_path: rootless_socket,
            });
        }
    }

    if Path::new(ROOTFUL_PODMAN).exists() {
        return Ok(EngineInfo {
            runtime_type: RuntimeType::Podman,
            socket_path: ROOTFUL_PODMAN.to_string(),
        });
    }

    if Path::new(DOCKER_SOCKET).exists() {
        return Ok(EngineInfo {
            runtime_type: RuntimeType::Docker,
            socket_path: DOCKER_SOCKET.to_string(),
        });
    }

    Err(DetectionError::NoRuntimeFound)
}

fn get_uid() -> Option<String> {
    std::env::var("UID").ok().or_else(|| {
        // Fall back to reading /proc/self/status
        std::fs::read_to_string("/proc/self/status")
            .ok()
            .and_then(|s| {
                s.lines()
                    .find(|l| l.starts_with("Uid:"))
                    .and_then(|l| l.split_whitespace().nth(1))
                    .map(|s| s.to_string())
            })
    })
}

fn default_socket_path(runtime: RuntimeType) -> String {
    match runtime {
        RuntimeType::Docker => DOCKER_SOCKET.to_string(),
        RuntimeType::Podman => ROOTFUL_PODMAN.to_string(),
    }
}
