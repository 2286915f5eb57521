use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, Extension, Router};
use object_uploader::ObjectUploader;
use tokio::{net::TcpListener, signal};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::routes;
use crate::types::{Environment, UploadSettings};

/// Builds the application router with its dependencies attached
pub fn router(
    environment: &Environment,
    uploader: Arc<ObjectUploader>,
    settings: UploadSettings,
) -> Router {
    routes::handler()
        .layer(Extension(uploader))
        .layer(Extension(settings))
        .layer(DefaultBodyLimit::max(environment.max_upload_bytes()))
        .layer(TimeoutLayer::new(environment.request_timeout()))
        .layer(TraceLayer::new_for_http())
}

/// Starts the server with the given environment and dependencies
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(
    environment: Environment,
    uploader: Arc<ObjectUploader>,
    settings: UploadSettings,
) -> anyhow::Result<()> {
    let router = router(&environment, uploader, settings);

    let addr = std::net::SocketAddr::from((
        [0, 0, 0, 0],
        std::env::var("PORT").map_or(Ok(8001), |p| p.parse())?,
    ));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🔄 Upload backend started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
