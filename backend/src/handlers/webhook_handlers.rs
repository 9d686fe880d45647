use std::sync::Arc;

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, Method, Request, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::{error, info};

use crate::api::resend::{EmailError, OutgoingEmail};
use crate::config::CC_EMAIL;
use crate::models::lead_models::{DataRequirement, WebhookPayload};
use crate::utils::email_templates;
use crate::AppState;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Invalid webhook payload: {0}")]
    Payload(String),
    #[error("INSERT event carried no record")]
    MissingRecord,
    #[error("Invalid record: {0}")]
    Record(#[from] serde_json::Error),
    #[error(transparent)]
    Email(#[from] EmailError),
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": self.to_string(),
                "success": false
            })),
        )
            .into_response()
    }
}

pub fn build_email(state: &AppState, record: &DataRequirement) -> OutgoingEmail {
    let rendered = email_templates::render(record);
    OutgoingEmail {
        from: state.config.sender(),
        to: vec![record.email.clone()],
        cc: vec![CC_EMAIL.to_string()],
        subject: email_templates::SUBJECT.to_string(),
        html: rendered.html,
        text: rendered.text,
        reply_to: CC_EMAIL.to_string(),
        idempotency_key: record.id().map(|id| format!("lead-notification/{}", id)),
    }
}

/// Turns one row-change event from the store into a welcome email.
pub async fn send_email_notification(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<WebhookPayload>, JsonRejection>,
) -> Result<Json<serde_json::Value>, DispatchError> {
    let Json(payload) = payload.map_err(|e| DispatchError::Payload(e.body_text()))?;

    if !payload.is_insert() {
        info!(
            "Skipping {} event on {}.{}",
            payload.event_type,
            payload.schema.as_deref().unwrap_or("?"),
            payload.table.as_deref().unwrap_or("?")
        );
        return Ok(Json(json!({ "message": "Skipping non-INSERT event" })));
    }
    if payload.old_record.is_some() {
        tracing::debug!("INSERT event unexpectedly carried old_record, ignoring it");
    }

    let record: DataRequirement = serde_json::from_value(payload.record.ok_or(DispatchError::MissingRecord)?)?;
    info!(
        "Sending lead notification for submission {}",
        record.id().unwrap_or_else(|| "<no id>".to_string())
    );

    let email = build_email(&state, &record);
    let resend_id = state.email_sender.send(&email).await.map_err(|e| {
        error!("Failed to send lead notification: {}", e);
        e
    })?;

    info!("Lead notification sent, resend id {}", resend_id);
    Ok(Json(json!({
        "success": true,
        "message": "Email sent successfully",
        "resend_id": resend_id
    })))
}

pub async fn preflight() -> &'static str {
    "ok"
}

// Digests have a fixed length, so the comparison time does not depend on how
// much of the token matches.
fn secret_matches(provided: &str, expected: &str) -> bool {
    Sha256::digest(provided.as_bytes()) == Sha256::digest(expected.as_bytes())
}

/// Gates the webhook behind `Authorization: Bearer <WEBHOOK_SECRET>` when a
/// secret is configured.
pub async fn validate_webhook_secret(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: Request<Body>,
    next: middleware::Next,
) -> Result<Response, StatusCode> {
    let Some(secret) = state.config.webhook_secret.as_deref() else {
        return Ok(next.run(request).await);
    };
    if request.method() == Method::OPTIONS {
        return Ok(next.run(request).await);
    }

    let provided = headers
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "));

    match provided {
        Some(token) if secret_matches(token, secret) => Ok(next.run(request).await),
        Some(_) => {
            error!("Webhook called with an invalid secret");
            Err(StatusCode::UNAUTHORIZED)
        }
        None => {
            error!("Webhook called without a secret");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
