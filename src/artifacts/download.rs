use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::{error, info};

use super::{AcquisitionOutcome, ArtifactSource, ArtifactSpec};
use crate::common::error::ServerError;

const MAX_ATTEMPTS: usize = 3;
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Resolves a single artifact to its destination path.
///
/// A destination that already holds the file short-circuits to
/// `AlreadyPresent` regardless of the source. Remote artifacts are fetched
/// with a fixed number of attempts and a fixed delay between them.
pub(crate) async fn acquire_artifact(client: &Client, spec: &ArtifactSpec) -> AcquisitionOutcome {
    if spec.destination.is_file() {
        info!(artifact = %spec.name, "artifact already present");
        return AcquisitionOutcome::AlreadyPresent;
    }
    match &spec.source {
        ArtifactSource::Local => {
            error!(
                artifact = %spec.name,
                path = %spec.destination.display(),
                "artifact missing and no remote endpoint is configured"
            );
            AcquisitionOutcome::Failed { attempts: 0 }
        }
        ArtifactSource::Remote { url } => fetch_with_retries(client, spec, url).await,
    }
}

async fn fetch_with_retries(client: &Client, spec: &ArtifactSpec, url: &str) -> AcquisitionOutcome {
    for attempt in 1..=MAX_ATTEMPTS {
        match fetch(client, url, &spec.destination).await {
            Ok(()) => {
                info!(artifact = %spec.name, attempt, "artifact downloaded");
                return AcquisitionOutcome::Fetched;
            }
            Err(error) => {
                error!(artifact = %spec.name, attempt, %error, "artifact download failed");
                // A half-written file must not pass the presence check of a
                // later run.
                let _ = tokio::fs::remove_file(&spec.destination).await;
                if attempt < MAX_ATTEMPTS {
                    tokio::time::sleep(RETRY_DELAY).await;
                }
            }
        }
    }
    AcquisitionOutcome::Failed {
        attempts: MAX_ATTEMPTS,
    }
}

async fn fetch(client: &Client, url: &str, destination: &Path) -> Result<(), ServerError> {
    if let Some(parent) = destination.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut response = client.get(url).send().await?.error_for_status()?;
    let mut output_file = tokio::fs::File::create(destination).await?;
    while let Some(chunk) = response.chunk().await? {
        output_file.write_all(&chunk).await?;
    }
    output_file.flush().await?;
    Ok(())
}
