use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8000";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub cors_allowed_origins: Vec<String>,
    pub database_max_connections: u32,
    pub database_acquire_timeout: Duration,
}

impl Config {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// `DATABASE_URL` is the only required key; an empty value counts as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = get_required(&lookup, "DATABASE_URL")?;

        let server_address = get_optional(&lookup, "SERVER_ADDRESS")
            .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string());

        let cors_allowed_origins = get_optional(&lookup, "CORS_ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_else(|| vec![DEFAULT_CORS_ORIGIN.to_string()]);

        let database_max_connections =
            get_parse(&lookup, "DATABASE_MAX_CONNECTIONS")?.unwrap_or(DEFAULT_MAX_CONNECTIONS);
        if database_max_connections == 0 {
            return Err(Error::Config(
                "Invalid value for DATABASE_MAX_CONNECTIONS: must be at least 1".to_string(),
            ));
        }

        let acquire_timeout_secs = get_parse(&lookup, "DATABASE_ACQUIRE_TIMEOUT_SECS")?
            .unwrap_or(DEFAULT_ACQUIRE_TIMEOUT_SECS);

        Ok(Self {
            server_address,
            database_url,
            cors_allowed_origins,
            database_max_connections,
            database_acquire_timeout: Duration::from_secs(acquire_timeout_secs),
        })
    }
}

fn get_required<F>(lookup: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    get_optional(lookup, name)
        .ok_or_else(|| Error::Config(format!("{} is not set", name)))
}

fn get_optional<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn get_parse<F, T>(lookup: &F, name: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get_optional(lookup, name) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        None => Ok(None),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_end_matches('/').to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn missing_database_url_is_a_config_error() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("DATABASE_URL")));
    }

    #[test]
    fn empty_database_url_is_a_config_error() {
        let err = Config::from_lookup(lookup_from(&[("DATABASE_URL", "   ")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config =
            Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/app")]))
                .unwrap();
        assert_eq!(config.database_url, "postgres://localhost/app");
        assert_eq!(config.server_address, DEFAULT_SERVER_ADDRESS);
        assert_eq!(config.cors_allowed_origins, vec![DEFAULT_CORS_ORIGIN.to_string()]);
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.database_acquire_timeout, Duration::from_secs(30));
    }

    #[test]
    fn optional_values_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/app"),
            ("SERVER_ADDRESS", "127.0.0.1:9000"),
            ("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test/ ,"),
            ("DATABASE_MAX_CONNECTIONS", "3"),
            ("DATABASE_ACQUIRE_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.server_address, "127.0.0.1:9000");
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert_eq!(config.database_max_connections, 3);
        assert_eq!(config.database_acquire_timeout, Duration::from_secs(5));
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/app"),
            ("DATABASE_MAX_CONNECTIONS", "many"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("DATABASE_MAX_CONNECTIONS")));

        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/app"),
            ("DATABASE_MAX_CONNECTIONS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
