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

use rust_bert::pipelines::common::{ModelResource, ModelType};
use rust_bert::pipelines::question_answering::{
    QaInput, QuestionAnsweringConfig, QuestionAnsweringModel,
};
use rust_bert::resources::LocalResource;
use serde::Serialize;
use tracing::info;

use crate::artifacts::ModelArtifacts;
use crate::common::error::ServerError;

/// Answer span extracted from a context passage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedAnswer {
    pub answer: String,
    /// Model confidence in `[0, 1]`.
    pub score: f64,
}

/// Boundary to the span extraction runtime.
///
/// Implementations must be callable from the blocking thread pool; the model
/// itself is loaded once at startup and treated as read-only afterwards.
pub trait QaPipeline: Send {
    fn answer(&self, question: &str, context: &str) -> Result<ExtractedAnswer, ServerError>;
}

/// Torch-backed pipeline over a locally acquired DistilBERT question
/// answering fine-tune.
///
/// The runtime only ever sees local resources: remote resolution is the
/// acquisition pipeline's job, which is why construction requires a
/// [`ModelArtifacts`].
pub struct TorchQaPipeline {
    model: QuestionAnsweringModel,
}

impl TorchQaPipeline {
    pub fn new(artifacts: &ModelArtifacts) -> Result<TorchQaPipeline, ServerError> {
        let config = QuestionAnsweringConfig::new(
            ModelType::DistilBert,
            ModelResource::Torch(Box::new(LocalResource {
                local_path: artifacts.weights().to_path_buf(),
            })),
            LocalResource {
                local_path: artifacts.config().to_path_buf(),
            },
            LocalResource {
                local_path: artifacts.vocab().to_path_buf(),
            },
            None::<LocalResource>,
            false,
            None,
            None,
        );
        let model = QuestionAnsweringModel::new(config)?;
        info!("question answering model loaded");
        Ok(TorchQaPipeline { model })
    }
}

impl QaPipeline for TorchQaPipeline {
    fn answer(&self, question: &str, context: &str) -> Result<ExtractedAnswer, ServerError> {
        let input = QaInput {
            question: question.to_owned(),
            context: context.to_owned(),
        };
        self.model
            .predict(&[input], 1, 32)
            .into_iter()
            .next()
            .and_then(|answers| answers.into_iter().next())
            .map(|answer| ExtractedAnswer {
                answer: answer.answer,
                score: answer.score,
            })
            .ok_or_else(|| ServerError::InferenceError("model returned no answer span".to_string()))
    }
}
