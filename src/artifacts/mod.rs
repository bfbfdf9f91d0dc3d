// Copyright 2019 Guillaume Becquin
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Artifact definitions for model weights, vocabulary and configuration files
//!
//! The question answering runtime loads its model from a fixed set of local
//! files. Before the runtime is initialized, the acquisition pipeline walks
//! the manifest of required artifacts in order and makes sure each one exists
//! at its destination, fetching missing ones from the configured remote
//! endpoint. A file that cannot be obtained makes the whole run fail: the
//! runtime must never be initialized from a partial artifact set.

mod download;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::common::error::ServerError;

/// Files the question answering runtime requires, in acquisition order.
///
/// The tokenizer is configured by the vocabulary together with the casing
/// flag of the pipeline, so no separate tokenizer configuration file is kept.
pub const REQUIRED_FILES: [&str; 3] = ["config.json", "vocab.txt", "rust_model.ot"];

/// Where an artifact is obtained from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactSource {
    /// The file is expected to already exist at its destination.
    Local,
    /// The file is fetched from a remote URL when missing.
    Remote { url: String },
}

/// A single named file required by the model runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSpec {
    pub name: String,
    pub source: ArtifactSource,
    pub destination: PathBuf,
}

/// Per-artifact acquisition outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionOutcome {
    /// The artifact was downloaded and persisted to its destination.
    Fetched,
    /// The destination already held the artifact; nothing was fetched.
    AlreadyPresent,
    /// Every attempt failed. `attempts` is 0 for a local-only artifact that
    /// was missing, as no retrieval is attempted for those.
    Failed { attempts: usize },
}

/// Process readiness after an acquisition run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessState {
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionResult {
    pub name: String,
    pub outcome: AcquisitionOutcome,
}

/// Audit record of an acquisition run.
///
/// The run is fail-fast: the first artifact to exhaust its attempts aborts the
/// pipeline, so a `Failed` report ends with the failed artifact and holds no
/// entries for later specs in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionReport {
    pub results: Vec<AcquisitionResult>,
    pub state: ReadinessState,
}

impl AcquisitionReport {
    pub fn is_ready(&self) -> bool {
        self.state == ReadinessState::Ready
    }
}

/// Local paths of the files the runtime loads.
///
/// Only produced by [`ArtifactManifest::ensure`], after every required
/// artifact resolved to `Fetched` or `AlreadyPresent`.
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    config: PathBuf,
    vocab: PathBuf,
    weights: PathBuf,
}

impl ModelArtifacts {
    pub fn config(&self) -> &Path {
        &self.config
    }

    pub fn vocab(&self) -> &Path {
        &self.vocab
    }

    pub fn weights(&self) -> &Path {
        &self.weights
    }
}

/// The fixed set of required artifacts, rooted at a local model directory.
#[derive(Debug, Clone)]
pub struct ArtifactManifest {
    specs: Vec<ArtifactSpec>,
    model_dir: PathBuf,
}

impl ArtifactManifest {
    /// Builds the manifest for a model directory. With an endpoint base URL,
    /// missing files are fetched from `<endpoint>/<name>`; without one, every
    /// file must already be present locally.
    pub fn new(model_dir: &Path, endpoint: Option<&str>) -> ArtifactManifest {
        let specs = REQUIRED_FILES
            .iter()
            .map(|name| ArtifactSpec {
                name: (*name).to_string(),
                source: match endpoint {
                    Some(endpoint) => ArtifactSource::Remote {
                        url: format!("{}/{}", endpoint.trim_end_matches('/'), name),
                    },
                    None => ArtifactSource::Local,
                },
                destination: model_dir.join(name),
            })
            .collect();
        ArtifactManifest {
            specs,
            model_dir: model_dir.to_path_buf(),
        }
    }

    pub fn specs(&self) -> &[ArtifactSpec] {
        &self.specs
    }

    /// Walks the manifest in order and acquires each artifact, aborting on the
    /// first artifact that cannot be obtained.
    pub async fn acquire(&self) -> AcquisitionReport {
        let client = reqwest::Client::new();
        let mut results = Vec::with_capacity(self.specs.len());
        for spec in &self.specs {
            let outcome = download::acquire_artifact(&client, spec).await;
            let failed = matches!(outcome, AcquisitionOutcome::Failed { .. });
            results.push(AcquisitionResult {
                name: spec.name.clone(),
                outcome,
            });
            if failed {
                return AcquisitionReport {
                    results,
                    state: ReadinessState::Failed,
                };
            }
        }
        AcquisitionReport {
            results,
            state: ReadinessState::Ready,
        }
    }

    /// Runs the acquisition pipeline and, once every artifact is accounted
    /// for, resolves the local paths the runtime loads.
    pub async fn ensure(&self) -> Result<ModelArtifacts, ServerError> {
        let report = self.acquire().await;
        match report.state {
            ReadinessState::Ready => {
                info!(model_dir = %self.model_dir.display(), "model artifacts ready");
                Ok(ModelArtifacts {
                    config: self.model_dir.join(REQUIRED_FILES[0]),
                    vocab: self.model_dir.join(REQUIRED_FILES[1]),
                    weights: self.model_dir.join(REQUIRED_FILES[2]),
                })
            }
            ReadinessState::Failed => {
                let failed = report
                    .results
                    .last()
                    .map(|result| result.name.as_str())
                    .unwrap_or("unknown");
                Err(ServerError::FileDownloadError(format!(
                    "required artifact {failed} could not be obtained"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_builds_remote_sources_from_endpoint() {
        let manifest = ArtifactManifest::new(Path::new("/tmp/model"), Some("http://host/qa/"));
        let specs = manifest.specs();
        assert_eq!(specs.len(), REQUIRED_FILES.len());
        assert_eq!(
            specs[0].source,
            ArtifactSource::Remote {
                url: "http://host/qa/config.json".to_string()
            }
        );
        assert_eq!(specs[2].destination, Path::new("/tmp/model/rust_model.ot"));
    }

    #[test]
    fn manifest_without_endpoint_is_local_only() {
        let manifest = ArtifactManifest::new(Path::new("/tmp/model"), None);
        assert!(manifest
            .specs()
            .iter()
            .all(|spec| spec.source == ArtifactSource::Local));
    }
}
