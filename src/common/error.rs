use rust_bert::RustBertError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Artifact download error: {0}")]
    FileDownloadError(String),

    #[error("IO error: {0}")]
    IOError(String),

    #[error("Model load error: {0}")]
    LoadError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Inference error: {0}")]
    InferenceError(String),
}

impl From<reqwest::Error> for ServerError {
    fn from(error: reqwest::Error) -> Self {
        ServerError::FileDownloadError(error.to_string())
    }
}

impl From<std::io::Error> for ServerError {
    fn from(error: std::io::Error) -> Self {
        ServerError::IOError(error.to_string())
    }
}

impl From<RustBertError> for ServerError {
    fn from(error: RustBertError) -> Self {
        ServerError::LoadError(error.to_string())
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(error: serde_json::Error) -> Self {
        ServerError::LoadError(error.to_string())
    }
}
