//! HTTP server lifecycle: bind, serve, shut down.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::error::Result;
use crate::metrics;
use crate::store::PgUserStore;

/// Startup options not carried by the environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServeOptions {
    /// Do not apply pending migrations before binding.
    pub skip_migrations: bool,
}

/// Connect the datastore, migrate, bind, and serve until `shutdown`.
///
/// Every failure before the listener is bound is fatal and returned as-is.
pub async fn run<F>(config: &Config, options: ServeOptions, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    metrics::init_metrics();
    if let Some(metrics_port) = config.metrics_port {
        metrics::install_exporter(metrics_port)?;
    }

    let store = PgUserStore::connect(config).await?;
    if options.skip_migrations {
        info!("Skipping schema migrations");
    } else {
        store.migrate().await?;
    }

    let router = create_router(AppState::new(Arc::new(store)));
    let listener = bind(config.port).await?;
    serve(listener, router, shutdown).await?;
    Ok(())
}

/// Bind a listener on all interfaces.
pub async fn bind(port: u16) -> std::io::Result<TcpListener> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("Server starting on port {}", port);
    Ok(listener)
}

/// Serve `router` on `listener` until `shutdown` resolves.
///
/// In-flight requests are drained before returning.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
