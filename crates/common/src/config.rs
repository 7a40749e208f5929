//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

/// How gallery slugs are resolved to artworks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugLookup {
    /// Match the slug column written at create/update time
    #[default]
    Canonical,
    /// Rebuild a title from the slug and match it case-insensitively
    Legacy,
}

impl FromStr for SlugLookup {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "canonical" => Ok(SlugLookup::Canonical),
            "legacy" => Ok(SlugLookup::Legacy),
            other => Err(anyhow::anyhow!(
                "Unknown slug lookup mode: {other}. Supported modes: canonical, legacy"
            )),
        }
    }
}

impl fmt::Display for SlugLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlugLookup::Canonical => write!(f, "canonical"),
            SlugLookup::Legacy => write!(f, "legacy"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Postgres connection URL; the in-memory store is used when absent
    pub database_url: Option<String>,

    /// Session token validation
    pub jwt_secret: String,
    pub jwt_issuer: Option<String>,
    pub jwt_audience: Option<String>,
    /// Lowercased admin e-mail allowlist (empty = any valid session)
    pub admin_emails: Vec<String>,

    /// Gallery slug resolution mode
    pub slug_lookup: SlugLookup,

    /// Runtime configuration
    pub cors_allowed_origins: Option<String>,
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let slug_lookup = match non_empty("ARTWORK_SLUG_LOOKUP") {
            Some(mode) => mode.parse()?,
            None => SlugLookup::default(),
        };

        let config = Self {
            database_url: non_empty("DATABASE_URL"),

            jwt_secret: non_empty("JWT_SECRET")
                .ok_or_else(|| anyhow::anyhow!("JWT_SECRET is required"))?,
            jwt_issuer: non_empty("JWT_ISSUER"),
            jwt_audience: non_empty("JWT_AUDIENCE"),
            admin_emails: non_empty("ADMIN_EMAILS")
                .map(|list| parse_email_list(&list))
                .unwrap_or_default(),

            slug_lookup,

            cors_allowed_origins: non_empty("CORS_ALLOWED_ORIGINS"),
            rust_log: var("RUST_LOG").unwrap_or_else(|| "lindenau=debug".to_string()),
            port: var("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        };

        Ok(config)
    }
}

/// Split a comma-separated e-mail list, normalising case and dropping blanks
pub fn parse_email_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|e| e.trim().to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}
