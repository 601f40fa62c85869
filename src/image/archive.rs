// ABOUTME: Build-context archiving via an external tar invocation.
// ABOUTME: The context root is passed explicitly; no process-wide chdir.

use super::error::AcquireError;
use crate::engine::ContextStream;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

/// Fixed archive filename inside the context root.
pub(crate) const CONTEXT_ARCHIVE_NAME: &str = "archive.tar";

/// Archive the build context into `<context_root>/archive.tar`.
///
/// Runs `tar` with the context root as its working directory so relative
/// paths inside the context resolve correctly. The archive file itself is
/// excluded to keep re-archiving a previously built context stable.
pub(crate) async fn create_context_archive(context_root: &Path) -> Result<PathBuf, AcquireError> {
    let archive_path = context_root.join(CONTEXT_ARCHIVE_NAME);

    tracing::debug!(
        "archiving build context {} to {}",
        context_root.display(),
        archive_path.display()
    );

    let output = Command::new("tar")
        .arg("-cf")
        .arg(CONTEXT_ARCHIVE_NAME)
        .arg("--exclude")
        .arg(CONTEXT_ARCHIVE_NAME)
        .arg(".")
        .current_dir(context_root)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| AcquireError::ContextArchive(format!("failed to run tar: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(AcquireError::ContextArchive(format!(
            "tar exited with {}: {}",
            output.status, stderr
        )));
    }

    Ok(archive_path)
}

/// Open the archive for upload and unlink it from the context root.
///
/// The open handle keeps the bytes readable after the unlink, so the
/// transient file never outlives the build even if the upload fails
/// mid-stream. Large contexts are read in chunks, never buffered whole.
pub(crate) async fn open_context_archive(
    archive_path: &Path,
) -> Result<ContextStream, AcquireError> {
    let file = tokio::fs::File::open(archive_path).await.map_err(|e| {
        AcquireError::ContextArchive(format!("failed to open {}: {e}", archive_path.display()))
    })?;
    if let Err(e) = tokio::fs::remove_file(archive_path).await {
        tracing::warn!(
            "failed to remove context archive {}: {e}",
            archive_path.display()
        );
    }

    let chunks = futures::stream::unfold(file, |mut file| async move {
        let mut buf = vec![0u8; 64 * 1024];
        match file.read(&mut buf).await {
            Ok(0) => None,
            Ok(n) => {
                buf.truncate(n);
                Some((Ok(Bytes::from(buf)), file))
            }
            Err(e) => Some((Err(e), file)),
        }
    });

    Ok(Box::pin(chunks))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_names(archive_path: &Path) -> Vec<String> {
        let file = std::fs::File::open(archive_path).unwrap();
        let mut archive = tar::Archive::new(file);
        archive
            .entries()
            .unwrap()
            .map(|entry| {
                entry
                    .unwrap()
                    .path()
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }

    #[tokio::test]
    async fn archives_the_context_contents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Dockerfile"), "FROM scratch\n").unwrap();
        std::fs::create_dir(dir.path().join("app")).unwrap();
        std::fs::write(dir.path().join("app").join("run.sh"), "#!/bin/sh\n").unwrap();

        let archive_path = create_context_archive(dir.path()).await.unwrap();

        assert_eq!(archive_path, dir.path().join(CONTEXT_ARCHIVE_NAME));
        let names = entry_names(&archive_path);
        assert!(names.iter().any(|n| n.ends_with("Dockerfile")));
        assert!(names.iter().any(|n| n.ends_with("app/run.sh")));
    }

    #[tokio::test]
    async fn excludes_the_archive_itself() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Dockerfile"), "FROM scratch\n").unwrap();
        // A leftover archive from a previous build must not be re-archived.
        std::fs::write(dir.path().join(CONTEXT_ARCHIVE_NAME), "stale").unwrap();

        let archive_path = create_context_archive(dir.path()).await.unwrap();

        let names = entry_names(&archive_path);
        assert!(!names.iter().any(|n| n.ends_with(CONTEXT_ARCHIVE_NAME)));
    }

    #[tokio::test]
    async fn open_unlinks_the_archive_but_streams_its_bytes() {
        use futures::StreamExt;

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Dockerfile"), "FROM scratch\n").unwrap();
        let archive_path = create_context_archive(dir.path()).await.unwrap();
        let on_disk = std::fs::metadata(&archive_path).unwrap().len() as usize;

        let mut stream = open_context_archive(&archive_path).await.unwrap();

        // Unlinked up front, yet the open handle still serves every byte.
        assert!(!archive_path.exists());
        let mut streamed = 0;
        while let Some(chunk) = stream.next().await {
            streamed += chunk.unwrap().len();
        }
        assert_eq!(streamed, on_disk);
    }

    #[tokio::test]
    async fn missing_directory_is_a_context_archive_error() {
        let result = create_context_archive(Path::new("/nonexistent/context")).await;
        assert!(matches!(result, Err(AcquireError::ContextArchive(_))));
    }
}
