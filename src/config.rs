//! Configuration management for DocDesk Server

use serde::Deserialize;
use std::env;
use std::ops::RangeInclusive;

use crate::convert::PageSize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub conversion: ConversionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum accepted upload body, in megabytes
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Idle time after which a session and its files are dropped
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversionConfig {
    pub page_size: PageSize,
    /// Argument template for an external PDF to Word converter,
    /// e.g. `pdf2docx convert {input} {output}`
    pub pdf_to_docx_command: Option<String>,
}

/// Accepted range for `MAX_UPLOAD_MB`
pub const UPLOAD_MB_RANGE: RangeInclusive<usize> = 1..=10_240;

/// Accepted range for `SESSION_TTL_MINUTES` (one minute to thirty days)
pub const SESSION_TTL_RANGE: RangeInclusive<i64> = 1..=43_200;

impl ServerConfig {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                max_upload_mb: 200,
            },
            session: SessionConfig { ttl_minutes: 60 },
            conversion: ConversionConfig {
                page_size: PageSize::Letter,
                pdf_to_docx_command: None,
            },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Ok(Config {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_var(&lookup, "SERVER_PORT", defaults.server.port)?,
                max_upload_mb: parse_in_range(
                    &lookup,
                    "MAX_UPLOAD_MB",
                    defaults.server.max_upload_mb,
                    UPLOAD_MB_RANGE,
                )?,
            },
            session: SessionConfig {
                ttl_minutes: parse_in_range(
                    &lookup,
                    "SESSION_TTL_MINUTES",
                    defaults.session.ttl_minutes,
                    SESSION_TTL_RANGE,
                )?,
            },
            conversion: ConversionConfig {
                page_size: match lookup("PAGE_SIZE") {
                    Some(value) => PageSize::from_name(&value).ok_or(ConfigError::InvalidValue {
                        name: "PAGE_SIZE",
                        value,
                    })?,
                    None => defaults.conversion.page_size,
                },
                pdf_to_docx_command: lookup("PDF_TO_DOCX_COMMAND")
                    .filter(|cmd| !cmd.trim().is_empty()),
            },
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}

fn parse_in_range<F, T>(
    lookup: &F,
    name: &'static str,
    default: T,
    range: RangeInclusive<T>,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialOrd + ToString,
{
    let value = parse_var(lookup, name, default)?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        })
    }
}
