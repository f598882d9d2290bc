//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, server port, password hashing cost and the token
//! signing secrets and lifetimes.

use crate::utils::password::DEFAULT_BCRYPT_COST;
use anyhow::{Context, Result, bail};
use std::env;

/// Upper bound on any token lifetime (ten years).
pub const MAX_LIFETIME_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub server_port: u16,
    pub bcrypt_cost: u32,
    pub tokens: TokenConfig,
}

/// Signing material and lifetimes handed to the token issuer at construction.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub access_secret: String,
    pub access_lifetime_seconds: u64,
    pub refresh_secret: String,
    pub refresh_lifetime_seconds: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from any key/value source, applying defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = lookup("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = var("DB_MAX_CONNECTIONS", "5")
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = var("DB_ACQUIRE_TIMEOUT_SECONDS", "3")
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let server_port = var("SERVER_PORT", "3000")
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        let bcrypt_cost = var("BCRYPT_COST", &DEFAULT_BCRYPT_COST.to_string())
            .parse::<u32>()
            .context("BCRYPT_COST must be a valid number")?;

        let access_secret =
            lookup("JWT_ACCESS_TOKEN_SECRET").context("JWT_ACCESS_TOKEN_SECRET not set")?;
        let access_lifetime_seconds = parse_lifetime(&var("JWT_ACCESS_TOKEN_LIFE", "15m"))
            .context("JWT_ACCESS_TOKEN_LIFE must be a duration such as 900, 15m or 1h")?;

        let refresh_secret =
            lookup("JWT_REFRESH_TOKEN_SECRET").context("JWT_REFRESH_TOKEN_SECRET not set")?;
        let refresh_lifetime_seconds = parse_lifetime(&var("JWT_REFRESH_TOKEN_LIFE", "24h"))
            .context("JWT_REFRESH_TOKEN_LIFE must be a duration such as 86400 or 24h")?;

        let tokens = TokenConfig {
            access_secret,
            access_lifetime_seconds,
            refresh_secret,
            refresh_lifetime_seconds,
        };
        tokens.validate()?;

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            server_port,
            bcrypt_cost,
            tokens,
        })
    }
}

impl TokenConfig {
    /// Rejects empty secrets and a refresh secret that equals the access secret.
    pub fn validate(&self) -> Result<()> {
        if self.access_secret.is_empty() || self.refresh_secret.is_empty() {
            bail!("token signing secrets must not be empty");
        }
        if self.access_secret == self.refresh_secret {
            bail!("JWT_ACCESS_TOKEN_SECRET and JWT_REFRESH_TOKEN_SECRET must differ");
        }
        if self.access_lifetime_seconds == 0 || self.refresh_lifetime_seconds == 0 {
            bail!("token lifetimes must be greater than zero");
        }
        if self.access_lifetime_seconds > MAX_LIFETIME_SECONDS
            || self.refresh_lifetime_seconds > MAX_LIFETIME_SECONDS
        {
            bail!("token lifetimes must not exceed {} seconds", MAX_LIFETIME_SECONDS);
        }
        Ok(())
    }
}

/// Parses a lifetime given as bare seconds or with an `s`/`m`/`h`/`d` suffix.
pub fn parse_lifetime(raw: &str) -> Result<u64> {
    let raw = raw.trim();
    let (digits, multiplier) = match raw.char_indices().last() {
        Some((idx, 's')) => (&raw[..idx], 1),
        Some((idx, 'm')) => (&raw[..idx], 60),
        Some((idx, 'h')) => (&raw[..idx], 60 * 60),
        Some((idx, 'd')) => (&raw[..idx], 24 * 60 * 60),
        Some(_) => (raw, 1),
        None => bail!("empty duration"),
    };

    let value = digits
        .trim()
        .parse::<u64>()
        .with_context(|| format!("invalid duration '{}'", raw))?;
    let seconds = value
        .checked_mul(multiplier)
        .with_context(|| format!("duration '{}' is too large", raw))?;

    if seconds == 0 {
        bail!("duration must be greater than zero");
    }
    Ok(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("DATABASE_URL", "sqlite::memory:"),
        ("JWT_ACCESS_TOKEN_SECRET", "access"),
        ("JWT_REFRESH_TOKEN_SECRET", "refresh"),
    ];

    fn token_config(access: &str, refresh: &str) -> TokenConfig {
        TokenConfig {
            access_secret: access.to_string(),
            access_lifetime_seconds: 900,
            refresh_secret: refresh.to_string(),
            refresh_lifetime_seconds: 86_400,
        }
    }

    #[test]
    fn test_parse_lifetime_units() {
        assert_eq!(parse_lifetime("900").unwrap(), 900);
        assert_eq!(parse_lifetime("30s").unwrap(), 30);
        assert_eq!(parse_lifetime("15m").unwrap(), 900);
        assert_eq!(parse_lifetime("24h").unwrap(), 86_400);
        assert_eq!(parse_lifetime("7d").unwrap(), 604_800);
        assert_eq!(parse_lifetime(" 1h ").unwrap(), 3_600);
    }

    #[test]
    fn test_parse_lifetime_rejects_garbage() {
        assert!(parse_lifetime("").is_err());
        assert!(parse_lifetime("0").is_err());
        assert!(parse_lifetime("0h").is_err());
        assert!(parse_lifetime("soon").is_err());
        assert!(parse_lifetime("-5m").is_err());
        assert!(parse_lifetime("h").is_err());
    }

    #[test]
    fn test_token_config_requires_distinct_secrets() {
        assert!(token_config("access", "refresh").validate().is_ok());
        assert!(token_config("same", "same").validate().is_err());
        assert!(token_config("", "refresh").validate().is_err());
        assert!(token_config("access", "").validate().is_err());

        let mut forever = token_config("access", "refresh");
        forever.refresh_lifetime_seconds = MAX_LIFETIME_SECONDS + 1;
        assert!(forever.validate().is_err());
    }

    #[test]
    fn test_from_lookup_applies_defaults() {
        let config = Config::from_lookup(lookup_from(&REQUIRED)).unwrap();

        assert_eq!(config.tokens.access_lifetime_seconds, 900);
        assert_eq!(config.tokens.refresh_lifetime_seconds, 86_400);
        assert_eq!(config.bcrypt_cost, DEFAULT_BCRYPT_COST);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_from_lookup_reads_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("JWT_ACCESS_TOKEN_LIFE", "1h"));
        pairs.push(("BCRYPT_COST", "12"));
        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();

        assert_eq!(config.tokens.access_lifetime_seconds, 3_600);
        assert_eq!(config.bcrypt_cost, 12);
    }

    #[test]
    fn test_from_lookup_requires_secrets_and_database() {
        for missing in ["DATABASE_URL", "JWT_ACCESS_TOKEN_SECRET", "JWT_REFRESH_TOKEN_SECRET"] {
            let pairs: Vec<_> = REQUIRED.iter().copied().filter(|(k, _)| *k != missing).collect();
            assert!(Config::from_lookup(lookup_from(&pairs)).is_err(), "{}", missing);
        }

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("JWT_ACCESS_TOKEN_LIFE", "soon"));
        assert!(Config::from_lookup(lookup_from(&pairs)).is_err());
    }
}
