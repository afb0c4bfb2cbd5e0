use crate::infrastructure::google::GOOGLE_TOKEN_INFO_URL;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Runtime configuration, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub http: HttpConfig,
    pub identity: IdentityConfig,
    /// Fixed signing secret. When unset a random key is generated per process.
    pub jwt_secret: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub port: u16,
    /// Comma separated origins; empty or `*` allows any origin
    pub cors_allowed_origins: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            cors_allowed_origins: String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub token_info_url: String,
    pub timeout: Duration,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            token_info_url: GOOGLE_TOKEN_INFO_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

impl DatabaseConfig {
    pub fn from_env(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: env_or("DB_MAX_CONNECTIONS", 20),
            min_connections: env_or("DB_MIN_CONNECTIONS", 5),
            acquire_timeout: Duration::from_secs(env_or("DB_ACQUIRE_TIMEOUT_SECS", 3)),
            idle_timeout: Duration::from_secs(env_or("DB_IDLE_TIMEOUT_SECS", 600)),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let defaults = IdentityConfig::default();
        let identity = IdentityConfig {
            token_info_url: env::var("GOOGLE_TOKEN_INFO_URL")
                .unwrap_or(defaults.token_info_url),
            timeout: Duration::from_secs(env_or(
                "IDENTITY_VERIFIER_TIMEOUT_SECS",
                defaults.timeout.as_secs(),
            )),
        };

        let http = HttpConfig {
            port: env_or("PORT", 3000),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default(),
        };

        let jwt_secret = env::var("JWT_SECRET").ok().filter(|s| !s.is_empty());

        Ok(Self {
            database: DatabaseConfig::from_env(database_url),
            http,
            identity,
            jwt_secret,
        })
    }
}
