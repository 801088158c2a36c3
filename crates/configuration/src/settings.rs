use crate::error::ConfigError;
use config::builder::{ConfigBuilder, DefaultState};
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub api: ApiSettings,
}

/// Where the HTTP server listens and which browser origins may call it.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins. A single `"*"` allows any origin.
    pub cors_origins: Vec<String>,
}

/// Connection settings for the PostgreSQL store.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Connection URL. Required; usually supplied through `DATABASE_URL`.
    pub url: String,
    pub max_connections: u32,
    /// How long to wait for a pooled connection before giving up.
    pub acquire_timeout_secs: u64,
    /// Upper bound on a single read, including connection acquisition.
    pub query_timeout_secs: u64,
    /// Apply the bundled schema migrations at startup.
    pub run_migrations: bool,
}

/// Limits applied by the HTTP handlers.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    /// Maximum number of rows returned by `GET /animals`.
    pub max_animals: u32,
}

/// Registers the built-in defaults so every key is optional in the file.
pub(crate) fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("server.cors_origins", vec!["*"])?
        .set_default("database.url", "")?
        .set_default("database.max_connections", 10)?
        .set_default("database.acquire_timeout_secs", 5)?
        .set_default("database.query_timeout_secs", 10)?
        .set_default("database.run_migrations", false)?
        .set_default("api.max_animals", 100)
}

impl Settings {
    /// Rejects settings the server cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "DATABASE_URL must be set.".to_string(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError("server.port must be non-zero".to_string()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.database.query_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "database.query_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.api.max_animals == 0 {
            return Err(ConfigError::ValidationError(
                "api.max_animals must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl ServerSettings {
    /// The socket address to bind.
    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::ValidationError(format!("invalid server address: {e}")))
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|origin| origin == "*")
    }
}

impl DatabaseSettings {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }

    /// The connection URL with any password replaced, safe for logs.
    pub fn redacted_url(&self) -> String {
        let Some(scheme_end) = self.url.find("://") else {
            return self.url.clone();
        };
        let rest = &self.url[scheme_end + 3..];
        let Some(at) = rest.rfind('@') else {
            return self.url.clone();
        };
        match rest[..at].find(':') {
            Some(colon) => format!(
                "{}{}:***{}",
                &self.url[..scheme_end + 3],
                &rest[..colon],
                &rest[at..]
            ),
            None => self.url.clone(),
        }
    }
}
