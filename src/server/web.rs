// Static host for the exported web build, with SPA fallback to index.html
use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use axum::Router;
use log::info;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};

use crate::server::config::WebServerConfig;

/// Every path that is not a file under `build_dir` gets `index.html`, so
/// client-side routes survive a reload.
pub fn router(build_dir: &Path) -> Router {
    let index = build_dir.join("index.html");
    Router::new().fallback_service(ServeDir::new(build_dir).fallback(ServeFile::new(index)))
}

pub async fn serve(config: &WebServerConfig) -> Result<()> {
    if !config.build_dir.join("index.html").is_file() {
        log::warn!("[WEB] {} has no index.html; did the web export run?", config.build_dir.display());
    }
    let listener = TcpListener::bind(config.addr())
        .await
        .with_context(|| format!("failed to bind {}", config.addr()))?;
    serve_on(listener, router(&config.build_dir), shutdown_signal()).await
}

pub async fn serve_on(
    listener: TcpListener,
    router: Router,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let addr: SocketAddr = listener.local_addr()?;
    info!("[WEB] Serving on http://{}", addr);
    axum::serve(listener, router).with_graceful_shutdown(shutdown).await?;
    info!("[WEB] Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("[WEB] Shutdown requested");
    }
}
