//! Binary crate for the current-weather HTTP service.
//!
//! This crate focuses on:
//! - Loading configuration from the environment
//! - Wiring the OpenWeather source into the domain service and router
//! - Serving with graceful, bounded shutdown

use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use weather_core::{OpenWeatherSource, WeatherService};
use weather_server::{AppState, Config, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let conf = Config::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&conf.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let source = OpenWeatherSource::new(
        conf.openweather_base_url.clone(),
        conf.openweather_api_id.clone(),
        conf.openweather_timeout(),
    );
    let state = AppState {
        domain: Arc::new(WeatherService::new(source)),
    };
    let app = routes::app(state, &conf);

    let addr = conf.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(address = %addr, "listening");

    let token = CancellationToken::new();
    let cancelled = token.clone();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { cancelled.cancelled().await })
            .await
    });

    shutdown_signal().await;
    info!("shutdown signal received, draining in-flight requests");
    token.cancel();
    match tokio::time::timeout(conf.shutdown_timeout(), server).await {
        Ok(joined) => joined.context("joining server task")?.context("serving")?,
        Err(_) => error!("graceful shutdown timed out, aborting in-flight requests"),
    }
    info!("shutting down");
    Ok(())
}

/// Resolve on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(%err, "installing Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(%err, "installing SIGTERM handler");
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
}
