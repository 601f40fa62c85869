// ABOUTME: Drives a build-context image build to its single terminal outcome.
// ABOUTME: Archives the context, uploads it, drains the progress stream.

use super::AcquireOptions;
use super::archive;
use super::descriptor::ImageDescriptor;
use super::error::AcquireError;
use super::state::{StreamDriver, drain};
use crate::engine::EngineClient;

/// Build an image from `descriptor.source_path`, tagged with the
/// descriptor's name.
///
/// The context is archived with the source directory passed explicitly to
/// the tar step, so concurrent builds with different contexts are safe. An
/// archive failure is fatal and the engine is never invoked.
pub async fn build<E>(
    engine: &E,
    descriptor: &ImageDescriptor,
    options: &AcquireOptions,
) -> Result<(), AcquireError>
where
    E: EngineClient + ?Sized,
{
    let mut driver = StreamDriver::new();

    driver.validating();
    let reference = match descriptor.image_ref() {
        Ok(reference) => reference,
        Err(e) => {
            driver.fail();
            return Err(e);
        }
    };
    let context_root = match descriptor.source_path() {
        Some(path) => path,
        None => {
            driver.fail();
            return Err(AcquireError::MissingContext);
        }
    };
    if !context_root.is_dir() {
        driver.fail();
        return Err(AcquireError::InvalidContext(context_root.to_path_buf()));
    }

    let archive_path = match archive::create_context_archive(context_root).await {
        Ok(path) => path,
        Err(e) => {
            driver.fail();
            return Err(e);
        }
    };
    let context = match archive::open_context_archive(&archive_path).await {
        Ok(stream) => stream,
        Err(e) => {
            driver.fail();
            return Err(e);
        }
    };

    tracing::info!("building {reference} from {}", context_root.display());
    driver.invoking();

    let attempt = async {
        let mut stream = match engine.build_image(context, &reference.to_string()).await {
            Ok(stream) => stream,
            Err(e) => {
                driver.fail();
                return Err(AcquireError::Transport(e));
            }
        };
        driver.streaming();
        drain(&mut stream, &mut driver).await
    };

    match options.timeout {
        Some(limit) => match tokio::time::timeout(limit, attempt).await {
            Ok(result) => result,
            Err(_) => Err(AcquireError::DeadlineExceeded(limit)),
        },
        None => attempt.await,
    }
}
