// ABOUTME: Bollard-backed engine client for Docker and Podman.
// ABOUTME: Streams pull/build progress over raw HTTP on the engine socket.

use super::client::{ChunkStream, ContextStream, EngineClient};
use super::error::EngineError;
use super::sealed::Sealed;
use super::types::{EngineInfo, RuntimeType};
use crate::types::ImageRef;
use async_trait::async_trait;
use bollard::Docker;
use bollard::query_parameters::RemoveImageOptions;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use http_body_util::{BodyExt, Either, Full, StreamBody};
use hyper::body::Frame;
use hyper_util::rt::TokioIo;
use std::pin::Pin;
use tokio::net::UnixStream;

/// Docker API version prefix for the raw streaming endpoints.
const API_VERSION: &str = "v1.43";

type FrameStream = Pin<Box<dyn Stream<Item = Result<Frame<Bytes>, std::io::Error>> + Send>>;

/// Pull sends an empty body; build streams the tar context.
type RequestBody = Either<Full<Bytes>, StreamBody<FrameStream>>;

/// Metadata reported by the engine.
#[derive(Debug, Clone)]
pub struct EngineMetadata {
    pub name: String,
    pub version: String,
    pub api_version: String,
    pub os: String,
    pub arch: String,
}

/// Engine client backed by bollard.
///
/// Ancillary operations (inspect, remove, ping, info) go through the typed
/// bollard client. The streaming pull/build endpoints are driven over raw
/// HTTP/1 on the same socket so that the progress protocol reaches the
/// caller as undecoded chunks; the engine interleaves plain-text and JSON
/// lines there, and in-band errors must be classified by content.
pub struct BollardEngine {
    client: Docker,
    runtime_type: RuntimeType,
    socket_path: String,
}

impl BollardEngine {
    /// Connect to a container engine using detected engine info.
    ///
    /// Use with `detect_engine()` to resolve the socket first.
    pub fn connect(info: &EngineInfo) -> Result<Self, EngineError> {
        let client =
            Docker::connect_with_unix(&info.socket_path, 120, bollard::API_DEFAULT_VERSION)
                .map_err(|e| EngineError::ConnectionFailed(e.to_string()))?;
        Ok(Self {
            client,
            runtime_type: info.runtime_type,
            socket_path: info.socket_path.clone(),
        })
    }

    /// Get the runtime type (Docker or Podman).
    pub fn runtime_type(&self) -> RuntimeType {
        self.runtime_type
    }

    /// POST to a streaming endpoint and expose the response body as chunks.
    async fn raw_stream(
        &self,
        uri: &str,
        body: RequestBody,
        content_type: Option<&str>,
    ) -> Result<ChunkStream, EngineError> {
        let stream = UnixStream::connect(&self.socket_path).await.map_err(|e| {
            EngineError::ConnectionFailed(format!(
                "failed to connect to {}: {}",
                self.socket_path, e
            ))
        })?;

        let io = TokioIo::new(stream);

        let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
            .await
            .map_err(|e| EngineError::ConnectionFailed(format!("HTTP handshake failed: {e}")))?;

        // Spawn connection handler
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::warn!("engine connection error: {}", e);
            }
        });

        let mut builder = hyper::Request::builder()
            .method("POST")
            .uri(uri)
            .header("Host", "localhost");
        if let Some(content_type) = content_type {
            builder = builder.header("Content-Type", content_type);
        }
        let req = builder
            .body(body)
            .map_err(|e| EngineError::Request(format!("failed to build request: {e}")))?;

        let resp = sender
            .send_request(req)
            .await
            .map_err(|e| EngineError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .into_body()
                .collect()
                .await
                .map_err(|e| EngineError::Request(format!("failed to read error response: {e}")))?;
            let message = String::from_utf8_lossy(&body.to_bytes()).trim().to_string();
            return Err(EngineError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let chunks = futures::stream::unfold(resp.into_body(), |mut body| async move {
            loop {
                match body.frame().await {
                    None => return None,
                    Some(Ok(frame)) => {
                        // Trailer frames carry no data; keep polling.
                        if let Ok(data) = frame.into_data() {
                            return Some((Ok(data), body));
                        }
                    }
                    Some(Err(e)) => return Some((Err(EngineError::Stream(e.to_string())), body)),
                }
            }
        });

        Ok(Box::pin(chunks))
    }

    /// Check whether an image exists locally.
    pub async fn image_exists(&self, reference: &ImageRef) -> Result<bool, EngineError> {
        let image_name = reference.to_string();

        match self.client.inspect_image(&image_name).await {
            Ok(_) => Ok(true),
            Err(bollard::errors::Error::DockerResponseServerError {
                status_code: 404, ..
            }) => Ok(false),
            Err(e) => Err(EngineError::Request(format!(
                "failed to inspect {}: {}",
                image_name, e
            ))),
        }
    }

    /// Remove a local image.
    pub async fn remove_image(&self, reference: &ImageRef, force: bool) -> Result<(), EngineError> {
        let image_name = reference.to_string();

        let opts = RemoveImageOptions {
            force,
            ..Default::default()
        };

        self.client
            .remove_image(&image_name, Some(opts), None)
            .await
            .map_err(|e| match e {
                bollard::errors::Error::DockerResponseServerError {
                    status_code,
                    message,
                } => EngineError::Rejected {
                    status: status_code,
                    message,
                },
                other => EngineError::Request(format!("failed to remove {}: {}", image_name, other)),
            })?;

        Ok(())
    }

    /// Ping the engine daemon.
    pub async fn ping(&self) -> Result<(), EngineError> {
        self.client
            .ping()
            .await
            .map_err(|e| EngineError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }

    /// Fetch engine metadata.
    pub async fn info(&self) -> Result<EngineMetadata, EngineError> {
        let info = self
            .client
            .info()
            .await
            .map_err(|e| EngineError::ConnectionFailed(e.to_string()))?;

        let name = match self.runtime_type {
            RuntimeType::Docker => "Docker".to_string(),
            RuntimeType::Podman => "Podman".to_string(),
        };

        Ok(EngineMetadata {
            name,
            version: info.server_version.unwrap_or_default(),
            api_version: bollard::API_DEFAULT_VERSION.to_string(),
            os: info.operating_system.unwrap_or_default(),
            arch: info.architecture.unwrap_or_default(),
        })
    }
}

impl Sealed for BollardEngine {}

#[async_trait]
impl EngineClient for BollardEngine {
    async fn pull(&self, reference: &str) -> Result<ChunkStream, EngineError> {
        let uri = format!(
            "/{API_VERSION}/images/create?fromImage={}",
            urlencoding::encode(reference)
        );
        self.raw_stream(&uri, Either::Left(Full::new(Bytes::new())), None)
            .await
    }

    async fn build_image(
        &self,
        context: ContextStream,
        tag: &str,
    ) -> Result<ChunkStream, EngineError> {
        let uri = format!("/{API_VERSION}/build?t={}", urlencoding::encode(tag));
        let frames: FrameStream = Box::pin(context.map(|item| item.map(Frame::data)));
        self.raw_stream(
            &uri,
            Either::Right(StreamBody::new(frames)),
            Some("application/x-tar"),
        )
        .await
    }
}
