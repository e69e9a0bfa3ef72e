//! Smartmark server entry point.

use smartmark::config::Config;
use smartmark::server;
use smartmark::types::errors::AppError;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        error!(error = %e, "server failed");
        let code = match e {
            AppError::Config(_) => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;
    server::serve(config).await
}
