use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Runtime configuration, resolved from the command line and the environment.
#[derive(Debug, Parser)]
#[command(name = "bert-qa-server", about = "Question answering over HTTP")]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind_addr: SocketAddr,

    /// Base URL hosting the model artifacts. When unset, every artifact must
    /// already exist under the model directory.
    #[arg(long, env = "QA_MODEL_ENDPOINT")]
    pub model_endpoint: Option<String>,

    /// Directory the model artifacts are stored in
    #[arg(long, env = "QA_MODEL_DIR", default_value_os_t = default_model_dir())]
    pub model_dir: PathBuf,

    /// JSON file holding the selectable context passages. When unset, the
    /// built-in passage is served.
    #[arg(long, env = "QA_CONTEXTS_FILE")]
    pub contexts_file: Option<PathBuf>,
}

fn default_model_dir() -> PathBuf {
    let mut home = dirs::cache_dir().unwrap_or_else(|| PathBuf::from("."));
    home.push(".bert-qa-server");
    home
}
