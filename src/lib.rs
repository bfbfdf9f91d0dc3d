//! # Serving wrapper around an extractive question answering pipeline
//!
//! This crate exposes a pretrained extractive question answering model over a
//! single HTTP endpoint. Startup is a strict one-way sequence: the artifact
//! acquisition pipeline guarantees that the model files are present locally
//! (downloading any missing ones with bounded retries), the torch-backed
//! runtime is loaded from those files, the context passages are loaded, and
//! only then does the server begin accepting requests. A failure in any
//! startup stage is fatal; failures while serving are translated into
//! structured error responses and never terminate the process.

pub mod artifacts;
pub mod common;
pub mod config;
pub mod context;
pub mod pipelines;
pub mod server;

pub use common::error::ServerError;
pub use config::ServerConfig;
