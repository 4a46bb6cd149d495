use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tracing::info;

use crate::errors::StartupError;
use crate::metrics;
use crate::routes;
use crate::state::ServerState;

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let addr = cfg.bind_addr();
    addr.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address {addr}: {e}")))
}

/// Seed the store and build the router.
pub async fn build_app() -> Router {
    let state = ServerState::seeded();
    metrics::set_post_count(state.posts.count().await);
    routes::build_router(state)
}

/// Public entry: bind the configured address and serve until a shutdown signal.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let addr = bind_addr(&cfg)?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.to_string(), source })?;
    let app = build_app().await;

    info!(%addr, "blog api listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("blog api stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix. In-flight requests are drained
/// by `axum::serve` after this returns.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = sigterm => {}
    }
    info!(event = "shutdown_signal", "shutdown signal received, draining connections");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_rejects_garbage_host() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "not a host".into();
        assert!(matches!(bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
    }

    #[test]
    fn bind_addr_uses_host_and_port() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "127.0.0.1".into();
        cfg.server.port = 5002;
        assert_eq!(bind_addr(&cfg).unwrap(), "127.0.0.1:5002".parse::<SocketAddr>().unwrap());
    }
}
