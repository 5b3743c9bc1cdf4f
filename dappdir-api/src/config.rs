//! Server configuration loaded from environment variables.

/// Scheme that selects the in-memory backend.
pub const MEMORY_URL_SCHEME: &str = "memory://";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a valid u16, got '{0}'")]
    InvalidPort(String),
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,
    #[error("DATABASE_NAME is required for MongoDB connections")]
    MissingDatabaseName,
    #[error("Unsupported DATABASE_URL scheme: '{0}'")]
    UnsupportedDatabaseUrl(String),
}

/// Which storage backend the configuration selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseBackend {
    /// Process-local storage; `name` is only reported.
    Memory { name: Option<String> },
    MongoDb { url: String, name: String },
}

/// Server configuration.
///
/// All fields have defaults suitable for local development except the
/// database, which is optional: without it the server runs disconnected.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Database connection string.
    pub database_url: Option<String>,
    /// Database to use on the connected server.
    pub database_name: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: None,
            database_name: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var         | Default   |
    /// |-----------------|-----------|
    /// | `HOST`          | `0.0.0.0` |
    /// | `PORT`          | `8000`    |
    /// | `DATABASE_URL`  | unset     |
    /// | `DATABASE_NAME` | unset     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let host = var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host,
            port,
            database_url: var("DATABASE_URL"),
            database_name: var("DATABASE_NAME"),
        })
    }

    /// Resolves the storage backend from `DATABASE_URL` and `DATABASE_NAME`.
    pub fn database_backend(&self) -> Result<DatabaseBackend, ConfigError> {
        let url = self
            .database_url
            .as_deref()
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        if url.starts_with(MEMORY_URL_SCHEME) {
            return Ok(DatabaseBackend::Memory {
                name: self.database_name.clone(),
            });
        }

        if url.starts_with("mongodb://") || url.starts_with("mongodb+srv://") {
            let name = self
                .database_name
                .clone()
                .ok_or(ConfigError::MissingDatabaseName)?;

            return Ok(DatabaseBackend::MongoDb {
                url: url.to_string(),
                name,
            });
        }

        Err(ConfigError::UnsupportedDatabaseUrl(
            url.split("://").next().unwrap_or(url).to_string(),
        ))
    }
}
