//! # HTTP surface
//!
//! One POST endpoint plus liveness routes. The application state is built
//! during startup and shared read-only with every handler; the single
//! error-translation point is the [`ResponseError`] implementation below,
//! which maps validation errors to 400 responses and everything else to an
//! opaque 500 while the detail goes to the log.

pub mod routes;

use std::net::SocketAddr;
use std::sync::Mutex;

use actix_web::http::StatusCode;
use actix_web::web::Data;
use actix_web::{App, HttpResponse, HttpServer, ResponseError};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::artifacts::ArtifactManifest;
use crate::common::error::ServerError;
use crate::config::ServerConfig;
use crate::context::ContextStore;
use crate::pipelines::question_answering::{QaPipeline, TorchQaPipeline};

/// Process-wide state shared with every request handler.
///
/// Built once during startup and never reconstructed per request. The
/// pipeline sits behind a mutex because inference runs on the blocking
/// thread pool, one request at a time.
pub struct AppState {
    qa: Mutex<Box<dyn QaPipeline>>,
    contexts: ContextStore,
}

impl AppState {
    pub fn new(pipeline: Box<dyn QaPipeline>, contexts: ContextStore) -> AppState {
        AppState {
            qa: Mutex::new(pipeline),
            contexts,
        }
    }

    /// Runs the full startup sequence: artifact acquisition, runtime load,
    /// context load. Serving must not begin unless this returns `Ok`.
    pub async fn initialize(config: &ServerConfig) -> Result<AppState, ServerError> {
        let manifest = ArtifactManifest::new(&config.model_dir, config.model_endpoint.as_deref());
        let artifacts = manifest.ensure().await?;
        let pipeline = TorchQaPipeline::new(&artifacts)?;
        let contexts = match &config.contexts_file {
            Some(path) => ContextStore::from_file(path)?,
            None => ContextStore::builtin(),
        };
        info!(passages = contexts.len(), "context store loaded");
        Ok(AppState::new(Box::new(pipeline), contexts))
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::ValidationError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ServerError::ValidationError(message) => {
                warn!(%self, "rejecting request");
                message.clone()
            }
            _ => {
                error!(%self, "request failed");
                "An error occurred while processing the request".to_string()
            }
        };
        HttpResponse::build(self.status_code()).json(ErrorBody { error: message })
    }
}

/// Binds the listener and serves requests until shutdown.
pub async fn serve(bind_addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let state = Data::new(state);
    info!(%bind_addr, "server listening");
    HttpServer::new(move || {
        App::new()
            .app_data(Data::clone(&state))
            .service(routes::index)
            .service(routes::health)
            .service(routes::answer)
    })
    .bind(bind_addr)?
    .run()
    .await
}
