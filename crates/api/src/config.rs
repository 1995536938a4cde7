use std::time::Duration;

use campo_advisor::DEFAULT_BASE_URL;
use campo_core::alert::DEFAULT_ALERT_LOG_CAPACITY;
use campo_core::history::DEFAULT_HISTORY_CAPACITY;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for background tasks (default: `10`).
    pub shutdown_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:9002`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `10`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:9002".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", 10),
        }
    }
}

/// Tick loop tuning.
#[derive(Debug, Clone)]
pub struct SimulationSettings {
    /// Time between simulator ticks for each crop.
    pub tick_interval: Duration,
    /// Upper bound on a single advisor or image call.
    pub advisor_timeout: Duration,
    pub history_capacity: usize,
    pub alert_log_capacity: usize,
}

impl SimulationSettings {
    /// | Env Var                | Default |
    /// |------------------------|---------|
    /// | `TICK_INTERVAL_SECS`   | `5`     |
    /// | `ADVISOR_TIMEOUT_SECS` | `8`     |
    /// | `HISTORY_CAPACITY`     | `30`    |
    /// | `ALERT_LOG_CAPACITY`   | `20`    |
    ///
    /// Panics when either period is zero.
    pub fn from_env() -> Self {
        Self {
            tick_interval: nonzero_secs("TICK_INTERVAL_SECS", env_or("TICK_INTERVAL_SECS", 5)),
            advisor_timeout: nonzero_secs("ADVISOR_TIMEOUT_SECS", env_or("ADVISOR_TIMEOUT_SECS", 8)),
            history_capacity: env_or("HISTORY_CAPACITY", DEFAULT_HISTORY_CAPACITY),
            alert_log_capacity: env_or("ALERT_LOG_CAPACITY", DEFAULT_ALERT_LOG_CAPACITY),
        }
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(5),
            advisor_timeout: Duration::from_secs(8),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            alert_log_capacity: DEFAULT_ALERT_LOG_CAPACITY,
        }
    }
}

/// Generation service connection.
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// `None` disables the service; every call falls back.
    pub api_key: Option<String>,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
}

impl AdvisorConfig {
    /// | Env Var              | Default                                      |
    /// |----------------------|----------------------------------------------|
    /// | `GEMINI_API_KEY`     | unset                                        |
    /// | `GEMINI_BASE_URL`    | public `v1beta` endpoint                     |
    /// | `GEMINI_TEXT_MODEL`  | `gemini-2.0-flash`                           |
    /// | `GEMINI_IMAGE_MODEL` | `gemini-2.0-flash-preview-image-generation`  |
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            base_url: std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            text_model: std::env::var("GEMINI_TEXT_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".into()),
            image_model: std::env::var("GEMINI_IMAGE_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash-preview-image-generation".into()),
        }
    }
}

/// Parse `name` from the environment, falling back to `default` when unset.
///
/// Panics on a present but unparsable value so misconfiguration fails fast.
fn env_or<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{name} must be a valid number: {e}")),
        Err(_) => default,
    }
}

/// A period in whole seconds. Zero panics at startup rather than inside
/// the tick tasks.
fn nonzero_secs(name: &str, secs: u64) -> Duration {
    if secs == 0 {
        panic!("{name} must be greater than 0");
    }
    Duration::from_secs(secs)
}
