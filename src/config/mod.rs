use std::{env, path::PathBuf, str::FromStr};

use thiserror::Error;

// Главная структура конфигурации клиента
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub circuit_breaker: CircuitBreakerConfig,
}

// Настройки приложения
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rust_log: String,
}

// Настройки доступа к REST API кинотеатра
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

// Где хранится bearer-токен между запусками
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub token_file: PathBuf,
}

// Настройки Circuit Breaker
#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    pub failure_threshold: u32,
    pub timeout_seconds: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} must not be empty")]
    Empty { name: &'static str },
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: AppConfig {
                rust_log: "cinema_client=info".to_string(),
            },
            api: ApiConfig {
                base_url: "http://localhost:8080".to_string(),
                timeout_seconds: 30,
                user_agent: default_user_agent(),
            },
            session: SessionConfig {
                token_file: default_token_file(),
            },
            circuit_breaker: CircuitBreakerConfig {
                failure_threshold: 5,
                timeout_seconds: 60,
            },
        }
    }
}

impl Config {
    /// Читает конфигурацию из окружения (и `.env`, если он есть).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let defaults = Config::default();

        let base_url = env::var("CINEMA_API_URL").unwrap_or(defaults.api.base_url);
        if base_url.trim().is_empty() {
            return Err(ConfigError::Empty { name: "CINEMA_API_URL" });
        }

        Ok(Config {
            app: AppConfig {
                rust_log: env::var("RUST_LOG").unwrap_or(defaults.app.rust_log),
            },
            api: ApiConfig {
                base_url,
                timeout_seconds: parse_var(
                    "CINEMA_API_TIMEOUT_SECONDS",
                    defaults.api.timeout_seconds,
                )?,
                user_agent: env::var("CINEMA_USER_AGENT").unwrap_or(defaults.api.user_agent),
            },
            session: SessionConfig {
                token_file: env::var("CINEMA_TOKEN_FILE")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.session.token_file),
            },
            circuit_breaker: CircuitBreakerConfig {
                failure_threshold: parse_var(
                    "CIRCUIT_BREAKER_FAILURE_THRESHOLD",
                    defaults.circuit_breaker.failure_threshold,
                )?,
                timeout_seconds: parse_var(
                    "CIRCUIT_BREAKER_TIMEOUT_SECONDS",
                    defaults.circuit_breaker.timeout_seconds,
                )?,
            },
        })
    }

    /// Подменяет адрес API (флаг `--api-url`).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        Err(_) => Ok(default),
    }
}

fn default_user_agent() -> String {
    format!("cinema-client/{}", env!("CARGO_PKG_VERSION"))
}

fn default_token_file() -> PathBuf {
    env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".cinema")
        .join("token")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.circuit_breaker.failure_threshold, 5);
        assert!(config.session.token_file.ends_with(".cinema/token"));
    }

    #[test]
    fn invalid_number_is_reported_not_panicked() {
        // Переменная уникальна для теста, чтобы не мешать параллельным тестам
        env::set_var("CINEMA_TEST_BOGUS_NUMBER", "soon");
        let err = parse_var::<u64>("CINEMA_TEST_BOGUS_NUMBER", 1).unwrap_err();
        assert!(err.to_string().contains("CINEMA_TEST_BOGUS_NUMBER"));
        env::remove_var("CINEMA_TEST_BOGUS_NUMBER");

        assert_eq!(parse_var::<u64>("CINEMA_TEST_UNSET_NUMBER", 7).unwrap(), 7);
    }

    #[test]
    fn base_url_override() {
        let config = Config::default().with_base_url("http://10.0.0.5:9000");
        assert_eq!(config.api.base_url, "http://10.0.0.5:9000");
    }
}
