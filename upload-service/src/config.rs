use anyhow::{anyhow, Context, Result};
use shared::observability::{LogFormat, LogLevel};

use crate::storage::MinioSettings;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub minio: MinioSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key).ok_or_else(|| anyhow!("missing required environment variable {}", key))
        };

        Ok(Self {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: lookup("SERVER_PORT")
                    .unwrap_or_else(|| "8085".to_string())
                    .parse()
                    .context("SERVER_PORT must be a port number")?,
            },
            minio: MinioSettings {
                endpoint: required("MINIO_ENDPOINT")?,
                access_key: required("MINIO_ACCESS_KEY")?,
                secret_key: required("MINIO_SECRET_KEY")?,
                use_ssl: match lookup("MINIO_USE_SSL") {
                    Some(raw) => parse_bool(&raw).context("MINIO_USE_SSL must be a boolean")?,
                    None => false,
                },
                bucket_name: required("MINIO_BUCKET_NAME")?,
                region: lookup("MINIO_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            },
            logging: LoggingConfig {
                level: lookup("LOG_LEVEL")
                    .unwrap_or_else(|| "info".to_string())
                    .parse()?,
                format: lookup("LOG_FORMAT")
                    .unwrap_or_else(|| "pretty".to_string())
                    .parse()?,
            },
        })
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(anyhow!("'{}' is not a boolean", other)),
    }
}
