//! Seller Pro Gateway - marketplace API passthrough.
//!
//! Serves `/api/search` and `/api/product/{id}` on port 5001 and shares
//! nothing with the dashboard process.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::borrow::Cow;

use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use seller_pro_gateway::app;
use seller_pro_gateway::config::GatewayConfig;
use seller_pro_gateway::state::AppState;

const DEFAULT_LOG_FILTER: &str = "seller_pro_gateway=info,tower_http=debug";

/// Start Sentry (when a DSN is set) and the tracing subscriber.
///
/// The returned guard flushes Sentry on drop and must outlive the server.
fn init_telemetry(config: &GatewayConfig) -> Option<sentry::ClientInitGuard> {
    let guard = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                environment: config.sentry_environment.clone().map(Cow::Owned),
                attach_stacktrace: true,
                ..Default::default()
            },
        ))
    });

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let sentry_layer = sentry_tracing::layer().event_filter(|metadata| match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    });

    let registry = tracing_subscriber::registry().with(filter).with(sentry_layer);
    if config.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    if guard.is_some() {
        tracing::info!("Sentry initialized");
    }
    guard
}

#[tokio::main]
async fn main() {
    let config = GatewayConfig::from_env().expect("Failed to load configuration");
    let _sentry_guard = init_telemetry(&config);

    let addr = config.socket_addr();
    tracing::info!(
        upstream = %config.api_base_url,
        user_id = %config.user_id,
        "Forwarding to marketplace"
    );

    let router = app(AppState::new(config))
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!(%addr, "Gateway listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Resolve on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate =
            signal(SignalKind::terminate()).expect("Failed to install signal handler");
        tokio::select! {
            result = tokio::signal::ctrl_c() => result.expect("Failed to install Ctrl+C handler"),
            _ = terminate.recv() => {}
        }
    }

    #[cfg(not(unix))]
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");

    tracing::info!("Shutting down gateway");
}
