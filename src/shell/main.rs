use anyhow::Context;
use tokio::net::TcpListener;

use hotspot_questions::shell::config::Config;
use hotspot_questions::shell::http::router;
use hotspot_questions::shell::state::AppState;
use hotspot_questions::shell::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    let config = Config::from_env().context("invalid configuration")?;
    let _telemetry = telemetry::init(&config.log).context("failed to initialise logging")?;
    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded .env file");
    }

    let state = AppState::from_config(&config).context("failed to wire adapters")?;

    // The service still starts without Redis; requests fail until it is back.
    match state.store.ping().await {
        Ok(()) => tracing::info!("question store reachable"),
        Err(e) => tracing::error!(error = %e, "question store unreachable at startup"),
    }

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("cannot bind {addr}"))?;
    tracing::info!(%addr, "hotspot service listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("hotspot service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
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
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received, draining connections");
}
