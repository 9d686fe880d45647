use std::net::SocketAddr;

/// Every notification is copied to this inbox and replies go back to it.
pub const CC_EMAIL: &str = "vishruth@hyphenbox.com";

pub const DEFAULT_FROM_EMAIL: &str = "hello@hyphenbox.com";
pub const DEFAULT_FROM_NAME: &str = "HyphenBox Team";
pub const DEFAULT_RESEND_BASE_URL: &str = "https://api.resend.com";
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is not a valid socket address: {value}")]
    InvalidAddr { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    pub resend_api_key: String,
    pub resend_base_url: String,
    pub from_email: String,
    pub from_name: String,
    pub webhook_secret: Option<String>,
    pub server_addr: SocketAddr,
    pub sentry_dsn: Option<String>,
}

impl DispatcherConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source. Blank values are
    /// treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let resend_api_key = get("RESEND_API_KEY").ok_or(ConfigError::Missing("RESEND_API_KEY"))?;

        let raw_addr = get("SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string());
        let server_addr = raw_addr.parse().map_err(|_| ConfigError::InvalidAddr {
            name: "SERVER_ADDR",
            value: raw_addr.clone(),
        })?;

        Ok(Self {
            resend_api_key,
            resend_base_url: get("RESEND_BASE_URL")
                .unwrap_or_else(|| DEFAULT_RESEND_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            from_email: get("FROM_EMAIL").unwrap_or_else(|| DEFAULT_FROM_EMAIL.to_string()),
            from_name: get("FROM_NAME").unwrap_or_else(|| DEFAULT_FROM_NAME.to_string()),
            webhook_secret: get("WEBHOOK_SECRET"),
            server_addr,
            sentry_dsn: get("SENTRY_DSN"),
        })
    }

    /// Sender identity in the `Name <address>` form the provider expects.
    pub fn sender(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }
}
