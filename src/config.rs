use std::env;
use std::str::FromStr;

use thiserror::Error;

const DEV_JWT_SECRET: &str = "default-secret-change-me";
const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    MongoDB,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StorageBackend::MongoDB),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(other.to_string()),
        }
    }
}

/// Token and password hashing parameters, shared with handlers and the
/// auth middleware as `web::Data<AuthSettings>`.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub token_ttl_secs: i64,
    pub bcrypt_cost: u32,
}

impl AuthSettings {
    pub fn new(jwt_secret: impl Into<String>, token_ttl_secs: i64, bcrypt_cost: u32) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl_secs,
            bcrypt_cost,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub cors_origins: Vec<String>,
    pub auth: AuthSettings,
}

impl AppConfig {
    /// Reads the process environment (after `.env` has been loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_var("PORT", 5000)?;
        let storage = parse_var("STORAGE_BACKEND", StorageBackend::MongoDB)?;
        let database_url = env::var("DATABASE_URL").ok().filter(|s| !s.trim().is_empty());

        if storage == StorageBackend::MongoDB && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("⚠️  JWT_SECRET not set, using the development secret");
            DEV_JWT_SECRET.to_string()
        });
        let token_ttl_secs = parse_var("JWT_EXPIRES_IN", 3600)?;
        let bcrypt_cost = parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?;

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_ORIGINS.to_string());

        Ok(Self {
            host,
            port,
            storage,
            database_url,
            cors_origins: split_list(&cors_origins),
            auth: AuthSettings::new(jwt_secret, token_ttl_secs, bcrypt_cost),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: raw.to_string(),
    })
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
