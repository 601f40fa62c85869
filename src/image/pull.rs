// ABOUTME: Drives a registry pull to its single terminal outcome.
// ABOUTME: Validates the descriptor, invokes the engine, drains the progress stream.

use super::AcquireOptions;
use super::descriptor::ImageDescriptor;
use super::error::AcquireError;
use super::state::{StreamDriver, drain};
use crate::engine::EngineClient;

/// Pull the image named by `descriptor` from its registry.
///
/// Resolves to `Ok(())` once the engine ends the progress stream without an
/// in-band error. Every failure class (bad descriptor, transport rejection,
/// engine-reported error, timeout) comes back through the same `Result`.
pub async fn pull<E>(
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

    tracing::info!("pulling {reference}");
    driver.invoking();

    let attempt = async {
        let mut stream = match engine.pull(&reference.to_string()).await {
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
