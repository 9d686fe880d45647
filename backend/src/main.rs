use dotenvy::dotenv;
use axum::{
    routing::{get, post},
    Router,
    middleware
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::{TraceLayer, DefaultMakeSpan, DefaultOnResponse};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use std::sync::Arc;
use anyhow::Context;

mod config;
mod handlers {
    pub mod webhook_handlers;
}
mod api {
    pub mod resend;
}
mod models {
    pub mod lead_models;
}
mod utils {
    pub mod email_templates;
}

use api::resend::{ResendClient, SharedEmailSender};
use config::DispatcherConfig;
use handlers::webhook_handlers;

async fn health_check() -> &'static str {
    "OK"
}

pub struct AppState {
    config: DispatcherConfig,
    email_sender: SharedEmailSender,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let webhook_routes = Router::new()
        .route(
            "/api/webhook/send-email-notification",
            post(webhook_handlers::send_email_notification).options(webhook_handlers::preflight),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), webhook_handlers::validate_webhook_secret));

    Router::new()
        .route("/api/health", get(health_check))
        .merge(webhook_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
        )
        .layer(
            CorsLayer::new()
                .allow_methods([
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_origin(Any)
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::HeaderName::from_static("x-client-info"),
                    axum::http::HeaderName::from_static("apikey"),
                ])
                .expose_headers([axum::http::header::CONTENT_TYPE])
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = DispatcherConfig::from_env().context("invalid dispatcher configuration")?;

    let _guard = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((dsn, sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        }))
    });

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let email_sender: SharedEmailSender = Arc::new(ResendClient::new(
        config.resend_api_key.clone(),
        config.resend_base_url.clone(),
    ));
    if config.webhook_secret.is_none() {
        tracing::warn!("WEBHOOK_SECRET is not set, the webhook accepts unauthenticated calls");
    }

    let addr = config.server_addr;
    let state = Arc::new(AppState {
        config,
        email_sender,
    });
    let app = build_router(state);

    use tokio::net::TcpListener;

    let listener = TcpListener::bind(addr).await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Notification dispatcher listening on {}", addr);
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
