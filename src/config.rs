use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use dotenvy::dotenv;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    /// `*` allows any origin, otherwise a comma-separated list
    pub cors_origin: String,

    pub db_max_connections: u32,
    pub run_migrations: bool,

    // Rate limiting, 0 disables
    pub rate_limit_per_min: u32,

    pub log_dir: PathBuf,
    pub log_level: tracing::Level,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow!("DATABASE_URL must be set"))?;

        Ok(Self {
            database_url,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 4000)?,
            cors_origin: lookup("CORS_ORIGIN").unwrap_or_else(|| "*".to_string()),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            run_migrations: parse_or(&lookup, "RUN_MIGRATIONS", true)?,
            rate_limit_per_min: parse_or(&lookup, "RATE_LIMIT_PER_MIN", 1000)?,
            log_dir: lookup("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("logs")),
            log_level: parse_or(&lookup, "LOG_LEVEL", tracing::Level::DEBUG)?,
        })
    }

    pub fn server_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("{e}"))
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        None => Ok(default),
    }
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config =
            Config::from_lookup(lookup_from(&[("DATABASE_URL", "mysql://localhost/hrms")]))
                .unwrap();

        assert_eq!(config.port, 4000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.cors_origin, "*");
        assert_eq!(config.db_max_connections, 10);
        assert!(config.run_migrations);
        assert_eq!(config.rate_limit_per_min, 1000);
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.log_level, tracing::Level::DEBUG);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "mysql://db/hrms"),
            ("PORT", "8080"),
            ("CORS_ORIGIN", "http://localhost:5173"),
            ("RUN_MIGRATIONS", "false"),
            ("RATE_LIMIT_PER_MIN", "0"),
            ("LOG_LEVEL", "warn"),
        ]))
        .unwrap();

        assert_eq!(config.server_addr(), ("0.0.0.0".to_string(), 8080));
        assert_eq!(config.cors_origin, "http://localhost:5173");
        assert!(!config.run_migrations);
        assert_eq!(config.rate_limit_per_min, 0);
        assert_eq!(config.log_level, tracing::Level::WARN);
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "4000")])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn malformed_port_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "mysql://db/hrms"),
            ("PORT", "forty"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
