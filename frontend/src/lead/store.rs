use gloo_net::http::Request;
use serde::Deserialize;

use crate::config;
use crate::lead::draft::NewLead;

pub const TABLE: &str = "data_requirements";

/// PostgREST / Postgres codes that mean the target table is not there.
const TABLE_MISSING_CODES: [&str; 3] = ["42P01", "PGRST205", "PGRST204"];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("store credentials are not configured")]
    NotConfigured,
    #[error("{message}")]
    Api { code: Option<String>, message: String },
    #[error("{0}")]
    Network(String),
    #[error("{0}")]
    Unexpected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Table or schema missing, or credentials absent.
    Configuration,
    Unreachable,
    Other,
    Unexpected,
}

impl StoreError {
    pub fn kind(&self) -> FailureKind {
        match self {
            StoreError::NotConfigured => FailureKind::Configuration,
            StoreError::Network(_) => FailureKind::Unreachable,
            StoreError::Unexpected(_) => FailureKind::Unexpected,
            StoreError::Api { code: Some(code), .. } if TABLE_MISSING_CODES.contains(&code.as_str()) => {
                FailureKind::Configuration
            }
            StoreError::Api { message, .. } => classify_message(message),
        }
    }
}

// Fallback for errors that carry no usable code. This depends on the store's
// exact wording and breaks silently if it changes.
fn classify_message(message: &str) -> FailureKind {
    if message.contains("does not exist") || message.contains("schema cache") {
        FailureKind::Configuration
    } else if message.contains("Failed to fetch") || message.contains("NetworkError") {
        FailureKind::Unreachable
    } else {
        FailureKind::Other
    }
}

pub trait LeadStore {
    /// Inserts exactly one row. Nothing is read back.
    async fn insert(&self, lead: &NewLead) -> Result<(), StoreError>;
}

#[derive(Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
}

/// Maps a non-2xx insert response to a store error. Bodies that are not a
/// PostgREST error object keep only the status.
fn rejection(status: u16, body: &str) -> StoreError {
    let fallback = || format!("insert failed with status {}", status);
    match serde_json::from_str::<PostgrestError>(body) {
        Ok(error) => {
            if let Some(details) = &error.details {
                log::warn!("Insert into {} rejected: {}", TABLE, details);
            }
            StoreError::Api {
                code: error.code,
                message: error.message.unwrap_or_else(fallback),
            }
        }
        Err(_) => StoreError::Api {
            code: None,
            message: fallback(),
        },
    }
}

pub struct SupabaseStore {
    url: String,
    anon_key: String,
}

impl SupabaseStore {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
        }
    }

    pub fn from_config() -> Self {
        Self::new(config::supabase_url(), config::supabase_anon_key())
    }

    pub fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), TABLE)
    }
}

impl LeadStore for SupabaseStore {
    async fn insert(&self, lead: &NewLead) -> Result<(), StoreError> {
        if self.url.is_empty() || self.anon_key.is_empty() {
            return Err(StoreError::NotConfigured);
        }

        let response = Request::post(&self.endpoint())
            .header("apikey", &self.anon_key)
            .header("Authorization", &format!("Bearer {}", self.anon_key))
            .header("Prefer", "return=minimal")
            .json(lead)
            .map_err(|e| StoreError::Unexpected(e.to_string()))?
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if response.ok() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(rejection(status, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(code: Option<&str>, message: &str) -> StoreError {
        StoreError::Api {
            code: code.map(str::to_string),
            message: message.to_string(),
        }
    }

    #[test]
    fn structured_codes_win_over_wording() {
        assert_eq!(api(Some("42P01"), "anything").kind(), FailureKind::Configuration);
        assert_eq!(api(Some("PGRST205"), "anything").kind(), FailureKind::Configuration);
        assert_eq!(api(Some("23505"), "duplicate key").kind(), FailureKind::Other);
    }

    #[test]
    fn message_fallback_still_recognises_known_wording() {
        assert_eq!(
            api(None, r#"relation "public.data_requirements" does not exist"#).kind(),
            FailureKind::Configuration
        );
        assert_eq!(api(None, "TypeError: Failed to fetch").kind(), FailureKind::Unreachable);
        assert_eq!(api(None, "permission denied for table").kind(), FailureKind::Other);
        assert_eq!(api(None, "network policy denied insert").kind(), FailureKind::Other);
    }

    #[test]
    fn rejection_keeps_the_postgrest_code() {
        let err = rejection(
            404,
            r#"{"code":"42P01","message":"relation \"public.data_requirements\" does not exist","details":null,"hint":null}"#,
        );
        assert_eq!(
            err,
            api(Some("42P01"), r#"relation "public.data_requirements" does not exist"#)
        );
        assert_eq!(err.kind(), FailureKind::Configuration);
    }

    #[test]
    fn rejection_without_code_falls_back_to_wording() {
        let err = rejection(400, r#"{"message":"relation data_requirements does not exist"}"#);
        assert_eq!(err, api(None, "relation data_requirements does not exist"));
        assert_eq!(err.kind(), FailureKind::Configuration);
    }

    #[test]
    fn rejection_without_message_reports_the_status() {
        let err = rejection(409, r#"{"code":"23505","details":"Key (email)=(j@x.com) already exists."}"#);
        assert_eq!(err, api(Some("23505"), "insert failed with status 409"));
        assert_eq!(err.kind(), FailureKind::Other);
    }

    #[test]
    fn unparseable_rejection_body_reports_the_status() {
        for body in ["<html>Bad Gateway</html>", ""] {
            let err = rejection(502, body);
            assert_eq!(err, api(None, "insert failed with status 502"));
            assert_eq!(err.kind(), FailureKind::Other);
        }
    }

    #[test]
    fn transport_failures_are_unreachable() {
        assert_eq!(StoreError::Network("boom".to_string()).kind(), FailureKind::Unreachable);
        assert_eq!(StoreError::NotConfigured.kind(), FailureKind::Configuration);
        assert_eq!(StoreError::Unexpected("bad json".to_string()).kind(), FailureKind::Unexpected);
    }

    #[test]
    fn endpoint_targets_the_leads_table() {
        let store = SupabaseStore::new("https://abc.supabase.co/", "anon");
        assert_eq!(store.endpoint(), "https://abc.supabase.co/rest/v1/data_requirements");
    }
}
