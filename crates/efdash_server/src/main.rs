//! Server entry point.
//!
//! # Responsibility
//! - Load configuration, start logging and verify the database opens.
//! - Serve the HTTP API until ctrl-c.

use anyhow::Context;
use axum::extract::Request;
use axum::ServiceExt;
use efdash_server::{app, AppState, ServerConfig};
use log::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env()?;

    efdash_core::init_logging(&config.log_level, config.log_dir.as_deref())
        .context("failed to initialize logging")?;

    // applies pending migrations before the first request
    efdash_core::open_db(&config.db_path).with_context(|| {
        format!("failed to open database `{}`", config.db_path.display())
    })?;

    let state = AppState::new(
        config.db_path.clone(),
        config.detailed_errors,
        config.countries_cache_ttl,
    );
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!(
        "event=server_start module=server status=ok addr={} environment={} version={}",
        config.bind_addr,
        config.environment,
        efdash_core::core_version()
    );

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app(state)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        log::warn!("event=shutdown_signal module=server status=error reason=ctrl_c_unavailable");
        std::future::pending::<()>().await;
    }
}
