use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
    pub reply_to: String,
    /// Sent as the `Idempotency-Key` header, never as part of the body.
    #[serde(skip)]
    pub idempotency_key: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Failed to send email: {0}")]
    Rejected(String),
    #[error("Failed to reach email provider: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Email provider returned an unreadable response: {0}")]
    MalformedResponse(String),
}

pub type SharedEmailSender = Arc<dyn EmailSender + Send + Sync>;

#[derive(Deserialize)]
struct SendResponse {
    id: String,
}

/// Anything that can deliver a rendered notification and hand back the
/// provider's message id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailSender {
    async fn send(&self, email: &OutgoingEmail) -> Result<String, EmailError>;
}

pub struct ResendClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ResendClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl EmailSender for ResendClient {
    async fn send(&self, email: &OutgoingEmail) -> Result<String, EmailError> {
        let mut request = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(email);
        if let Some(key) = &email.idempotency_key {
            request = request.header("Idempotency-Key", key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!("Resend rejected email with status {}: {}", status, detail);
            return Err(EmailError::Rejected(if detail.is_empty() {
                status.to_string()
            } else {
                detail
            }));
        }

        let raw = response.text().await?;
        let body: SendResponse = serde_json::from_str(&raw).map_err(|e| {
            tracing::error!("Resend accepted email but sent an unexpected body: {}", raw);
            EmailError::MalformedResponse(e.to_string())
        })?;
        Ok(body.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, http::{HeaderMap, StatusCode}, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    #[derive(Default)]
    struct Captured {
        headers: Option<HeaderMap>,
        body: Option<Value>,
    }

    type Shared = Arc<Mutex<Captured>>;

    async fn accept(State(captured): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
        let mut slot = captured.lock().unwrap();
        slot.headers = Some(headers);
        slot.body = Some(body);
        Json(json!({ "id": "msg_123" }))
    }

    async fn reject() -> (StatusCode, &'static str) {
        (StatusCode::UNPROCESSABLE_ENTITY, r#"{"message":"Invalid `to` field"}"#)
    }

    async fn accept_without_id() -> &'static str {
        "queued"
    }

    async fn spawn_stub(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            from: "HyphenBox Team <hello@hyphenbox.com>".to_string(),
            to: vec!["j@x.com".to_string()],
            cc: vec!["vishruth@hyphenbox.com".to_string()],
            subject: "Hello".to_string(),
            html: "<p>hi</p>".to_string(),
            text: "hi".to_string(),
            reply_to: "vishruth@hyphenbox.com".to_string(),
            idempotency_key: Some("lead-notification/abc".to_string()),
        }
    }

    #[tokio::test]
    async fn posts_email_with_bearer_auth() {
        let captured: Shared = Arc::default();
        let base = spawn_stub(
            Router::new()
                .route("/emails", post(accept))
                .with_state(captured.clone()),
        )
        .await;

        let id = ResendClient::new("re_test", base).send(&email()).await.unwrap();
        assert_eq!(id, "msg_123");

        let slot = captured.lock().unwrap();
        let headers = slot.headers.as_ref().unwrap();
        assert_eq!(headers.get("authorization").unwrap(), "Bearer re_test");
        assert_eq!(headers.get("idempotency-key").unwrap(), "lead-notification/abc");

        let body = slot.body.as_ref().unwrap();
        assert_eq!(body["to"], json!(["j@x.com"]));
        assert_eq!(body["cc"], json!(["vishruth@hyphenbox.com"]));
        assert_eq!(body["reply_to"], "vishruth@hyphenbox.com");
        assert_eq!(body["text"], "hi");
        assert!(body.get("idempotency_key").is_none());
    }

    #[tokio::test]
    async fn non_success_status_carries_provider_detail() {
        let base = spawn_stub(Router::new().route("/emails", post(reject))).await;

        let err = ResendClient::new("re_test", base).send(&email()).await.unwrap_err();
        match err {
            EmailError::Rejected(detail) => assert!(detail.contains("Invalid `to` field")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn unreadable_success_body_is_not_a_transport_error() {
        let base = spawn_stub(Router::new().route("/emails", post(accept_without_id))).await;

        let err = ResendClient::new("re_test", base).send(&email()).await.unwrap_err();
        assert!(matches!(err, EmailError::MalformedResponse(_)), "unexpected error: {:?}", err);
        assert!(err.to_string().starts_with("Email provider returned an unreadable response"));
    }
}
