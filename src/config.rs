use sqlx::postgres::PgConnectOptions;
use std::collections::HashMap;
use std::env;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Connection settings for the Esmeralda database
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// When set, used as-is instead of the individual parts
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub database: String,
    pub password: String,
    pub max_connections: u32,
}

/// Bearer token validation settings
#[derive(Clone, PartialEq)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

/// Log export settings. Logs always go to stdout as JSON; OTLP export is
/// added on top when enabled.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryConfig {
    pub otel_enabled: bool,
    /// OTLP/HTTP traces endpoint
    pub otlp_endpoint: String,
    pub service_name: String,
    pub environment: String,
    /// Fraction of traces exported, within 0.0..=1.0
    pub sampling_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub telemetry: TelemetryConfig,
    /// Append raw store errors to 400 bodies (debugging only)
    pub expose_error_detail: bool,
}

impl AppConfig {
    /// Read configuration from the process environment.
    /// Built once at startup; nothing re-reads the environment afterwards.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str| vars.get(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let jwt_secret = get("JWT_SECRET")
            .or_else(|| get("SECRET_KEY"))
            .ok_or(ConfigError::Missing("JWT_SECRET"))?
            .trim_matches('"')
            .to_string();

        Ok(Self {
            port: parse_or("PORT", get("PORT"), 3000)?,
            database: DatabaseConfig {
                url: get("DATABASE_URL"),
                host: get("DBHOST").unwrap_or_else(|| "localhost".to_string()),
                port: parse_or("DBPORT", get("DBPORT"), 5432)?,
                user: get("DBUSER").unwrap_or_else(|| "root".to_string()),
                database: get("DB").unwrap_or_else(|| "testEsmeraldos".to_string()),
                // not trimmed: passwords may carry spaces
                password: vars.get("DBPASSWORD").cloned().unwrap_or_default(),
                max_connections: parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), 5)?,
            },
            auth: AuthConfig {
                jwt_secret,
                issuer: get("JWT_ISSUER"),
                audience: get("JWT_AUDIENCE"),
            },
            telemetry: TelemetryConfig {
                otel_enabled: parse_or("OTEL_ENABLED", get("OTEL_ENABLED"), false)?,
                otlp_endpoint: get("OTEL_EXPORTER_OTLP_ENDPOINT")
                    .unwrap_or_else(|| "http://localhost:4318/v1/traces".to_string()),
                service_name: get("OTEL_SERVICE_NAME").unwrap_or_else(|| "esmeralda-api".to_string()),
                environment: get("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
                sampling_rate: parse_or("OTEL_TRACE_SAMPLING_RATE", get("OTEL_TRACE_SAMPLING_RATE"), 0.01_f64)?
                    .clamp(0.0, 1.0),
            },
            expose_error_detail: parse_or(
                "API_EXPOSE_ERROR_DETAIL",
                get("API_EXPOSE_ERROR_DETAIL"),
                false,
            )?,
        })
    }
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        match &self.url {
            Some(url) => url.parse::<PgConnectOptions>().map_err(|_| ConfigError::Invalid {
                name: "DATABASE_URL",
                value: "<unparseable url>".to_string(),
            }),
            None => Ok(PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .username(&self.user)
                .password(&self.password)
                .database(&self.database)),
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v.parse::<T>().map_err(|_| ConfigError::Invalid { name, value: v }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_vars(&vars(&[("JWT_SECRET", "s3cret")])).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.database.url, None);
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.user, "root");
        assert_eq!(config.database.database, "testEsmeraldos");
        assert_eq!(config.database.password, "");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.auth.jwt_secret, "s3cret");
        assert!(!config.expose_error_detail);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_vars(&vars(&[
            ("SECRET_KEY", "\"quoted\""),
            ("PORT", "8080"),
            ("DBHOST", "db.internal"),
            ("DBPORT", "6432"),
            ("DBUSER", "apolo"),
            ("DB", "esmeralda"),
            ("DBPASSWORD", "pw"),
            ("JWT_ISSUER", "apolohra"),
            ("API_EXPOSE_ERROR_DETAIL", "true"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 6432);
        assert_eq!(config.database.user, "apolo");
        assert_eq!(config.database.database, "esmeralda");
        assert_eq!(config.database.password, "pw");
        assert_eq!(config.auth.jwt_secret, "quoted");
        assert_eq!(config.auth.issuer.as_deref(), Some("apolohra"));
        assert_eq!(config.auth.audience, None);
        assert!(config.expose_error_detail);
    }

    #[test]
    fn test_missing_secret() {
        let result = AppConfig::from_vars(&vars(&[]));
        assert!(matches!(result, Err(ConfigError::Missing("JWT_SECRET"))));
    }

    #[test]
    fn test_invalid_port() {
        let result = AppConfig::from_vars(&vars(&[("JWT_SECRET", "s"), ("DBPORT", "mysql")]));
        match result {
            Err(ConfigError::Invalid { name, value }) => {
                assert_eq!(name, "DBPORT");
                assert_eq!(value, "mysql");
            }
            other => panic!("Expected invalid DBPORT, got {:?}", other),
        }
    }

    #[test]
    fn test_connect_options_from_url() {
        let mut config = AppConfig::from_vars(&vars(&[
            ("JWT_SECRET", "s"),
            ("DATABASE_URL", "postgres://apolo:pw@db:5433/esmeralda"),
        ]))
        .unwrap();
        let options = config.database.connect_options().unwrap();
        assert_eq!(options.get_host(), "db");
        assert_eq!(options.get_port(), 5433);
        assert_eq!(options.get_database(), Some("esmeralda"));

        config.database.url = Some("not a url".to_string());
        assert!(config.database.connect_options().is_err());
    }

    #[test]
    fn test_telemetry_defaults_to_logs_only() {
        let telemetry = AppConfig::from_vars(&vars(&[("JWT_SECRET", "s")])).unwrap().telemetry;

        assert!(!telemetry.otel_enabled);
        assert_eq!(telemetry.otlp_endpoint, "http://localhost:4318/v1/traces");
        assert_eq!(telemetry.service_name, "esmeralda-api");
        assert_eq!(telemetry.environment, "development");
        assert_eq!(telemetry.sampling_rate, 0.01);
    }

    #[test]
    fn test_telemetry_overrides() {
        let telemetry = AppConfig::from_vars(&vars(&[
            ("JWT_SECRET", "s"),
            ("OTEL_ENABLED", "true"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://collector:4318/v1/traces"),
            ("OTEL_SERVICE_NAME", "apolohra"),
            ("ENVIRONMENT", "production"),
            ("OTEL_TRACE_SAMPLING_RATE", "2.5"),
        ]))
        .unwrap()
        .telemetry;

        assert!(telemetry.otel_enabled);
        assert_eq!(telemetry.otlp_endpoint, "http://collector:4318/v1/traces");
        assert_eq!(telemetry.service_name, "apolohra");
        assert_eq!(telemetry.environment, "production");
        assert_eq!(telemetry.sampling_rate, 1.0);
    }

    #[test]
    fn test_invalid_telemetry_values() {
        let result = AppConfig::from_vars(&vars(&[("JWT_SECRET", "s"), ("OTEL_ENABLED", "yes")]));
        assert!(matches!(result, Err(ConfigError::Invalid { name: "OTEL_ENABLED", .. })));

        let result = AppConfig::from_vars(&vars(&[("JWT_SECRET", "s"), ("OTEL_TRACE_SAMPLING_RATE", "half")]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { name: "OTEL_TRACE_SAMPLING_RATE", .. })
        ));
    }

    #[test]
    fn test_auth_config_debug_redacts_secret() {
        let config = AppConfig::from_vars(&vars(&[("JWT_SECRET", "topsecret")])).unwrap();
        let debug = format!("{:?}", config.auth);
        assert!(!debug.contains("topsecret"));
    }
}
