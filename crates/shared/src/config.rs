//! Application configuration management.

use std::time::Duration;

use serde::Deserialize;

use crate::jwt::JwtConfig;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Session token configuration.
    pub jwt: JwtSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ServerConfig {
    /// Returns the per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

/// Database configuration.
#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Seconds to wait for a pool connection.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Apply pending migrations at startup.
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The URL usually embeds credentials.
        f.debug_struct("DatabaseConfig")
            .field("url", &"[hidden]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_run_migrations() -> bool {
    true
}

/// Session token settings as read from configuration sources.
#[derive(Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Token lifetime in seconds.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
}

impl std::fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"[hidden]")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish()
    }
}

fn default_token_ttl() -> u64 {
    86_400 // 24 hours
}

/// Longest accepted token lifetime: ten years.
pub const MAX_TOKEN_TTL_SECS: u64 = 10 * 365 * 86_400;

impl JwtSettings {
    /// Converts into the token service configuration.
    ///
    /// The lifetime is capped at [`MAX_TOKEN_TTL_SECS`]; [`AppConfig::validate`]
    /// rejects larger values before they get here.
    #[must_use]
    pub fn to_token_config(&self) -> JwtConfig {
        let ttl_secs = i64::try_from(self.token_ttl_secs.min(MAX_TOKEN_TTL_SECS)).unwrap_or(0);
        JwtConfig {
            secret: self.secret.clone(),
            token_ttl: chrono::Duration::seconds(ttl_secs),
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    /// A value is present but unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TXLOG").separator("__"))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that deserialize fine but cannot run.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Invalid("jwt.secret must not be empty".into()));
        }
        if !(1..=MAX_TOKEN_TTL_SECS).contains(&self.jwt.token_ttl_secs) {
            return Err(ConfigError::Invalid(format!(
                "jwt.token_ttl_secs must be between 1 and {MAX_TOKEN_TTL_SECS}"
            )));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url must not be empty".into()));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Invalid(
                "database.min_connections exceeds database.max_connections".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_ENV: [(&str, Option<&str>); 3] = [
        ("RUN_MODE", Some("txlog-config-test")),
        ("TXLOG__DATABASE__URL", Some("postgres://localhost/txlog_test")),
        ("TXLOG__JWT__SECRET", Some("s3cret")),
    ];

    #[test]
    fn test_load_from_env_with_defaults() {
        temp_env::with_vars(BASE_ENV, || {
            let config = AppConfig::load().expect("config should load");

            assert_eq!(config.database.url, "postgres://localhost/txlog_test");
            assert_eq!(config.jwt.secret, "s3cret");
            assert_eq!(config.jwt.token_ttl_secs, 86_400);
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.server.request_timeout(), Duration::from_secs(30));
            assert_eq!(config.database.max_connections, 10);
            assert!(config.database.run_migrations);
        });
    }

    #[test]
    fn test_env_overrides_defaults() {
        temp_env::with_vars(BASE_ENV, || {
            temp_env::with_vars(
                [
                    ("TXLOG__SERVER__PORT", Some("9090")),
                    ("TXLOG__JWT__TOKEN_TTL_SECS", Some("60")),
                ],
                || {
                    let config = AppConfig::load().expect("config should load");
                    assert_eq!(config.server.port, 9090);
                    assert_eq!(config.jwt.token_ttl_secs, 60);
                },
            );
        });
    }

    #[test]
    fn test_missing_secret_fails() {
        temp_env::with_vars(
            [
                ("RUN_MODE", Some("txlog-config-test")),
                ("TXLOG__DATABASE__URL", Some("postgres://localhost/txlog_test")),
                ("TXLOG__JWT__SECRET", None),
            ],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }

    #[test]
    fn test_blank_secret_is_invalid() {
        temp_env::with_vars(
            [
                ("RUN_MODE", Some("txlog-config-test")),
                ("TXLOG__DATABASE__URL", Some("postgres://localhost/txlog_test")),
                ("TXLOG__JWT__SECRET", Some("   ")),
            ],
            || {
                assert!(matches!(AppConfig::load(), Err(ConfigError::Invalid(_))));
            },
        );
    }

    #[test]
    fn test_out_of_range_token_ttl_is_invalid() {
        for ttl in ["0", "1000000000000000"] {
            temp_env::with_vars(BASE_ENV, || {
                temp_env::with_var("TXLOG__JWT__TOKEN_TTL_SECS", Some(ttl), || {
                    assert!(
                        matches!(AppConfig::load(), Err(ConfigError::Invalid(_))),
                        "ttl {ttl}"
                    );
                });
            });
        }
    }

    #[test]
    fn test_huge_token_ttl_is_capped_on_conversion() {
        let jwt = JwtSettings {
            secret: "abc".into(),
            token_ttl_secs: 1_000_000_000_000_000,
        };
        let service = crate::TokenService::new(jwt.to_token_config());

        assert_eq!(service.token_ttl_secs(), i64::try_from(MAX_TOKEN_TTL_SECS).unwrap());
        assert!(service.issue(&crate::types::UserId::new(), "a@x.com").is_ok());
    }

    #[test]
    fn test_token_config_conversion() {
        let jwt = JwtSettings {
            secret: "abc".into(),
            token_ttl_secs: 3_600,
        };
        let token_config = jwt.to_token_config();

        assert_eq!(token_config.secret, "abc");
        assert_eq!(token_config.token_ttl, chrono::Duration::hours(1));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let jwt = JwtSettings {
            secret: "abc-secret".into(),
            token_ttl_secs: 60,
        };
        assert!(!format!("{jwt:?}").contains("abc-secret"));
    }
}
