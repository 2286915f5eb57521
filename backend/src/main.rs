use std::sync::Arc;

use backend::{bootstrap, server, types::Environment};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(environment.tracing_level().to_string()));

    // Configure logging format based on environment
    // Use JSON format for staging/production, regular format for development
    match environment {
        Environment::Production | Environment::Staging => {
            fmt().json().with_env_filter(env_filter).init();
        }
        Environment::Development => {
            fmt().with_env_filter(env_filter).init();
        }
    }

    info!("Initializing storage...");
    let uploader = Arc::new(bootstrap::build_uploader(&environment)?);
    let settings = bootstrap::upload_settings(&environment)?;
    info!("Storage initialized successfully");

    server::start(environment, uploader, settings).await
}
