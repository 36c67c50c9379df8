use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://api.aimlapi.com/v1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SESSION_IDLE_MINUTES: i64 = 60;
const MAX_SESSION_IDLE_MINUTES: i64 = 60 * 24 * 365;

/// Startup configuration failures. Any of these halts the process before the
/// server binds.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Required environment variable '{0}' is not set. Add it to your environment or .env file.")]
    Missing(String),

    #[error("Environment variable '{key}' is invalid: {reason}")]
    Invalid { key: String, reason: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base_url: String,
    pub port: u16,
    pub session_idle_minutes: i64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("AIMLAPI_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing("AIMLAPI_KEY".to_string()))?;

        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "PORT".to_string(),
                reason: format!("'{raw}' is not a valid port number"),
            })?,
            None => DEFAULT_PORT,
        };

        let session_idle_minutes = match lookup("SESSION_IDLE_MINUTES") {
            Some(raw) => match raw.parse::<i64>() {
                Ok(minutes) if (1..=MAX_SESSION_IDLE_MINUTES).contains(&minutes) => minutes,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "SESSION_IDLE_MINUTES".to_string(),
                        reason: format!(
                            "'{raw}' must be between 1 and {MAX_SESSION_IDLE_MINUTES} minutes"
                        ),
                    })
                }
            },
            None => DEFAULT_SESSION_IDLE_MINUTES,
        };

        Ok(Config {
            api_key,
            api_base_url: lookup("AIMLAPI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            port,
            session_idle_minutes,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
