/// Configuration management for the API server
///
/// Configuration is read from environment variables, with a `.env` file
/// loaded first when present.
///
/// # Environment Variables
///
/// - `DB_BACKEND`: `postgres` (default) or `mysql`
/// - `DATABASE_URL`: full connection string; overrides the `DB_*` parts below
/// - `DB_HOST` (default: localhost), `DB_PORT` (default: backend's standard port)
/// - `DB_USER`, `DB_PASSWORD`, `DB_NAME`: required unless `DATABASE_URL` is set
/// - `DATABASE_MAX_CONNECTIONS` (default: 10)
/// - `DATABASE_CONNECT_TIMEOUT`: pool acquire timeout in seconds (default: 30)
/// - `RUN_MIGRATIONS`: apply embedded migrations at startup (default: true)
/// - `API_HOST` (default: 0.0.0.0), `PORT` (default: 5000)
/// - `CORS_ORIGINS`: `*` or a comma-separated origin list (default: `*`)
/// - `JWT_SECRET`: token signing key, at least 32 characters (required)
/// - `JWT_EXPIRATION_HOURS` (default: 24, at most 8760)
/// - `LOG_FORMAT`: `pretty` (default) or `json`
/// - `RUST_LOG`: tracing filter
///
/// # Example
///
/// ```no_run
/// use taskboard_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;
use taskboard_shared::auth::jwt::{DEFAULT_EXPIRATION_HOURS, MAX_EXPIRATION_HOURS};
use taskboard_shared::db::pool::{DatabaseBackend, DatabaseConfig, DatabaseCredentials};

/// Default listen port
pub const DEFAULT_PORT: u16 = 5000;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseSettings,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// Log output configuration
    pub log: LogConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `*` allows any origin
    pub cors_origins: Vec<String>,
}

impl ApiConfig {
    /// Whether any origin is allowed
    pub fn cors_allows_any(&self) -> bool {
        self.cors_origins.iter().any(|origin| origin == "*")
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    /// Pool configuration handed to the store
    pub pool: DatabaseConfig,

    /// Apply embedded migrations at startup
    pub run_migrations: bool,
}

/// JWT configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for JWT signing
    ///
    /// Must be at least 32 bytes. Generate with: `openssl rand -hex 32`
    pub secret: String,

    /// Access token lifetime in hours
    pub expiration_hours: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    Pretty,

    /// One JSON object per line
    Json,
}

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Output format
    pub format: LogFormat,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing
    /// - Environment variables have invalid values
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup
    ///
    /// `from_env` delegates here; tests pass a map instead of touching the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_host = var("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let api_port = match var("PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("PORT is not a valid port: {}", e))?,
            None => DEFAULT_PORT,
        };
        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let backend = match var("DB_BACKEND") {
            Some(backend) => backend.parse::<DatabaseBackend>().map_err(anyhow::Error::msg)?,
            None => DatabaseBackend::default(),
        };

        let mut pool = DatabaseConfig {
            backend,
            ..Default::default()
        };

        match var("DATABASE_URL") {
            Some(url) => pool.url = url,
            None => {
                let required = |key: &str| {
                    var(key).ok_or_else(|| {
                        anyhow::anyhow!("{} environment variable is required when DATABASE_URL is not set", key)
                    })
                };

                let port = match var("DB_PORT") {
                    Some(port) => port
                        .parse::<u16>()
                        .map_err(|e| anyhow::anyhow!("DB_PORT is not a valid port: {}", e))?,
                    None => backend.default_port(),
                };

                pool.credentials = Some(DatabaseCredentials {
                    host: var("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
                    port,
                    user: required("DB_USER")?,
                    password: lookup("DB_PASSWORD").unwrap_or_default(),
                    database: required("DB_NAME")?,
                });
            }
        }

        if let Some(max_connections) = var("DATABASE_MAX_CONNECTIONS") {
            pool.max_connections = max_connections.parse::<u32>()?;
        }
        if let Some(timeout) = var("DATABASE_CONNECT_TIMEOUT") {
            pool.connect_timeout_seconds = timeout.parse::<u64>()?;
        }

        let run_migrations = match var("RUN_MIGRATIONS") {
            Some(flag) => parse_bool(&flag)
                .ok_or_else(|| anyhow::anyhow!("RUN_MIGRATIONS must be true or false"))?,
            None => true,
        };

        let jwt_secret = var("JWT_SECRET")
            .ok_or_else(|| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        if jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let expiration_hours = match var("JWT_EXPIRATION_HOURS") {
            Some(hours) => hours.parse::<i64>()?,
            None => DEFAULT_EXPIRATION_HOURS,
        };

        if !(1..=MAX_EXPIRATION_HOURS).contains(&expiration_hours) {
            anyhow::bail!(
                "JWT_EXPIRATION_HOURS must be between 1 and {}",
                MAX_EXPIRATION_HOURS
            );
        }

        let log_format = match var("LOG_FORMAT").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("pretty") | Some("text") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => anyhow::bail!("Unknown LOG_FORMAT: {}", other),
        };

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                cors_origins,
            },
            database: DatabaseSettings {
                pool,
                run_migrations,
            },
            jwt: JwtConfig {
                secret: jwt_secret,
                expiration_hours,
            },
            log: LogConfig { format: log_format },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
