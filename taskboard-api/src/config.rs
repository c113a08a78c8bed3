/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `JWT_SECRET`: Secret key for session token signing (required, 32+ chars)
/// - `CORS_ORIGINS`: Comma-separated allowed origins (default: `*`)
/// - `PRODUCTION`: Enables HSTS and requires explicit CORS origins (default: false)
/// - `SEED_DEMO_USERS`: Registers the demo accounts at startup (default: true)
/// - `SEED_PASSWORD`: Password for the demo accounts (default: 1234)
/// - `RUST_LOG`: Log filter (default: taskboard_api=debug,taskboard_shared=debug,tower_http=debug)
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

/// Minimum length of the token signing secret
pub const MIN_SECRET_LEN: usize = 32;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Session token configuration
    pub jwt: JwtConfig,

    /// Demo account seeding
    pub seed: SeedConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,

    /// Production mode: HSTS on, `*` not allowed in `cors_origins`
    pub production: bool,
}

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for token signing
    ///
    /// IMPORTANT: This must be kept secret and should be at least 32 bytes.
    /// Generate with: `openssl rand -hex 32`
    pub secret: String,
}

/// Demo account seeding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Whether to register `admin`, `maria` and `juan` at startup
    pub demo_users: bool,

    /// Shared password for the demo accounts
    #[serde(skip_serializing)]
    pub password: String,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `JWT_SECRET` is missing or shorter than 32 characters
    /// - `PRODUCTION` is set and `CORS_ORIGINS` is `*` or empty
    /// - A numeric or boolean variable has an invalid value
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = var("API_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("API_PORT is not a valid port: {}", e))?;

        let secret = lookup("JWT_SECRET")
            .ok_or_else(|| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;
        if secret.len() < MIN_SECRET_LEN {
            anyhow::bail!("JWT_SECRET must be at least {} characters long", MIN_SECRET_LEN);
        }

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "*")
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let production = parse_bool("PRODUCTION", &var("PRODUCTION", "false"))?;
        if production && (cors_origins.is_empty() || cors_origins.iter().any(|o| o == "*")) {
            anyhow::bail!("CORS_ORIGINS must list explicit origins when PRODUCTION is set");
        }

        Ok(Self {
            api: ApiConfig {
                host: var("API_HOST", "0.0.0.0"),
                port,
                cors_origins,
                production,
            },
            jwt: JwtConfig { secret },
            seed: SeedConfig {
                demo_users: parse_bool("SEED_DEMO_USERS", &var("SEED_DEMO_USERS", "true"))?,
                password: var("SEED_PASSWORD", "1234"),
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("{} must be a boolean, got {:?}", key, other),
    }
}
