//! Configuration management for the API server
//!
//! Configuration comes from environment variables; a `.env` file in the
//! working directory is loaded first if present.
//!
//! # Environment Variables
//!
//! - `API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `API_PORT`: Port to bind to (default: 5000)
//! - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
//! - `PRODUCTION`: Enables HSTS and `Secure` cookies (default: false)
//! - `SESSION_SECRET`: Secret for signing session tokens (required, ≥32 chars)
//! - `SESSION_TTL_HOURS`: Session lifetime (default: 168)
//! - `UPLOAD_DIR`: Where uploaded logos are written (default: ./uploads)
//! - `MAX_UPLOAD_BYTES`: Largest accepted logo (default: 5 MiB)
//! - `ADMIN_USERNAMES`: Comma-separated usernames registered as admins
//! - `RUST_LOG`: Log filter (default: moracat_api=debug,tower_http=debug)
//!
//! # Example
//!
//! ```no_run
//! use moracat_api::config::Config;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! println!("Server will listen on {}", config.bind_address());
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub uploads: UploadConfig,

    /// Usernames that are made admins when they register
    pub admin_usernames: Vec<String>,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,

    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,

    /// Production mode: HSTS header and `Secure` cookies
    pub production: bool,
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Secret key for signing session tokens
    ///
    /// Must be at least 32 bytes. Generate with: `openssl rand -hex 32`
    pub secret: String,

    pub ttl_hours: i64,
}

/// Logo upload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub dir: PathBuf,
    pub max_bytes: usize,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn comma_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `SESSION_SECRET` is missing or shorter than 32 characters
    /// - A numeric or boolean variable has an invalid value
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let host = var_or("API_HOST", "0.0.0.0");
        let port = var_or("API_PORT", "5000").parse::<u16>()?;
        let cors_origins = comma_list(&var_or("CORS_ORIGINS", "*"));
        let production = var_or("PRODUCTION", "false").parse::<bool>()?;

        let secret = env::var("SESSION_SECRET")
            .map_err(|_| anyhow::anyhow!("SESSION_SECRET environment variable is required"))?;
        if secret.len() < 32 {
            anyhow::bail!("SESSION_SECRET must be at least 32 characters long");
        }
        let ttl_hours = var_or("SESSION_TTL_HOURS", "168").parse::<i64>()?;
        if ttl_hours <= 0 {
            anyhow::bail!("SESSION_TTL_HOURS must be positive");
        }

        let dir = PathBuf::from(var_or("UPLOAD_DIR", "./uploads"));
        let max_bytes = var_or("MAX_UPLOAD_BYTES", "5242880").parse::<usize>()?;

        let admin_usernames = comma_list(&var_or("ADMIN_USERNAMES", ""));

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
                production,
            },
            session: SessionConfig { secret, ttl_hours },
            uploads: UploadConfig { dir, max_bytes },
            admin_usernames,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.session.ttl_hours)
    }

    pub fn is_admin_username(&self, username: &str) -> bool {
        self.admin_usernames.iter().any(|name| name == username)
    }
}
