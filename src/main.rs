use std::process;

use bert_qa_server::server::{self, AppState};
use bert_qa_server::ServerConfig;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::parse();

    // Startup is a hard barrier: nothing is served until every artifact is
    // present and the model is loaded. Termination is decided here, not in
    // the startup sequence itself.
    let state = match AppState::initialize(&config).await {
        Ok(state) => state,
        Err(error) => {
            error!(%error, "startup failed");
            process::exit(1);
        }
    };

    if let Err(error) = server::serve(config.bind_addr, state).await {
        error!(%error, "server terminated");
        process::exit(1);
    }
}
