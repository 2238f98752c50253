//! Server Configuration
//!
//! Read once at startup from the process environment (after `.env` is
//! loaded by `dotenvy`).

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, bail};

/// Deployment environment (`ENV`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("development") {
            Environment::Development
        } else {
            Environment::Production
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub environment: Environment,
    pub host: IpAddr,
    pub port: u16,
    /// Allowed CORS origins; `None` allows any origin
    pub frontend_origins: Option<Vec<String>>,
    pub db_min_connections: u32,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub db_max_lifetime: Duration,
}

impl ApiConfig {
    const DEFAULT_PORT: u16 = 8000;
    const DEFAULT_MIN_CONNECTIONS: u32 = 5;
    // base pool plus overflow
    const DEFAULT_MAX_CONNECTIONS: u32 = 15;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 3600;

    /// Load from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL")
            .context("DATABASE_URL must be set in environment")?;

        let environment = var("ENV")
            .map(|v| Environment::parse(v.trim()))
            .unwrap_or(Environment::Production);

        let host = match var("HOST") {
            Some(v) => v
                .trim()
                .parse()
                .with_context(|| format!("HOST is not an IP address: {}", v))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = parse_or(&var, "PORT", Self::DEFAULT_PORT)?;

        let frontend_origins = var("FRONTEND_ORIGINS").map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        });

        let db_min_connections =
            parse_or(&var, "DB_MIN_CONNECTIONS", Self::DEFAULT_MIN_CONNECTIONS)?;
        let db_max_connections =
            parse_or(&var, "DB_MAX_CONNECTIONS", Self::DEFAULT_MAX_CONNECTIONS)?;
        if db_max_connections == 0 || db_min_connections > db_max_connections {
            bail!(
                "invalid pool bounds: DB_MIN_CONNECTIONS={} DB_MAX_CONNECTIONS={}",
                db_min_connections,
                db_max_connections
            );
        }

        let db_acquire_timeout = Duration::from_secs(parse_or(
            &var,
            "DB_ACQUIRE_TIMEOUT_SECS",
            Self::DEFAULT_ACQUIRE_TIMEOUT_SECS,
        )?);

        Ok(Self {
            database_url,
            environment,
            host,
            port,
            frontend_origins,
            db_min_connections,
            db_max_connections,
            db_acquire_timeout,
            db_max_lifetime: Duration::from_secs(Self::DEFAULT_MAX_LIFETIME_SECS),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Swagger UI and the OpenAPI document are served in development only
    pub fn docs_enabled(&self) -> bool {
        self.environment == Environment::Development
    }
}

fn parse_or<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match var(key) {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} is invalid ({}): {}", key, v, e)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<ApiConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/rondas")]).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8000");
        assert_eq!(config.frontend_origins, None);
        assert_eq!(config.db_min_connections, 5);
        assert_eq!(config.db_max_connections, 15);
        assert!(!config.docs_enabled());
    }

    #[test]
    fn test_database_url_required() {
        let err = load(&[]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
        assert!(load(&[("DATABASE_URL", "  ")]).is_err());
    }

    #[test]
    fn test_development_enables_docs() {
        let config = load(&[("DATABASE_URL", "postgres://x"), ("ENV", "development")]).unwrap();
        assert!(config.docs_enabled());
        assert_eq!(config.environment.as_str(), "development");

        let config = load(&[("DATABASE_URL", "postgres://x"), ("ENV", "staging")]).unwrap();
        assert!(!config.docs_enabled());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DATABASE_URL", "postgres://x"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("FRONTEND_ORIGINS", "https://a.example, https://b.example,"),
            ("DB_MIN_CONNECTIONS", "2"),
            ("DB_MAX_CONNECTIONS", "4"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9000");
        assert_eq!(
            config.frontend_origins,
            Some(vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ])
        );
        assert_eq!(config.db_min_connections, 2);
        assert_eq!(config.db_max_connections, 4);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(load(&[("DATABASE_URL", "postgres://x"), ("PORT", "http")]).is_err());
        assert!(load(&[("DATABASE_URL", "postgres://x"), ("HOST", "localhost")]).is_err());
        assert!(
            load(&[
                ("DATABASE_URL", "postgres://x"),
                ("DB_MIN_CONNECTIONS", "10"),
                ("DB_MAX_CONNECTIONS", "5"),
            ])
            .is_err()
        );
    }
}
