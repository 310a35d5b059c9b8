//! Configuration types.

use std::time::Duration;

use crate::backend::ChatMode;
use crate::error::ConfigError;

/// Default backend address (the FastAPI dev server).
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash.
    pub api_base: String,
    /// Timeout for profile submission and chat queries. Plan generation is
    /// slow, so this is measured in minutes.
    pub query_timeout: Duration,
    /// Timeout for the startup health check.
    pub health_timeout: Duration,
    /// Sessions per week sent with every profile (not asked during intake).
    pub sessions_per_week: u8,
    /// Mode used for free-chat queries until the user switches it.
    pub chat_mode: ChatMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            query_timeout: Duration::from_secs(180), // 3 minutes
            health_timeout: Duration::from_secs(5),
            sessions_per_week: 5,
            chat_mode: ChatMode::InDepth,
        }
    }
}

impl ClientConfig {
    /// Load configuration from `COACH_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Unparseable numbers fall back to their defaults; values that parse but
    /// make no sense are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base = match lookup("COACH_API_BASE") {
            Some(raw) => {
                let trimmed = raw.trim().trim_end_matches('/').to_string();
                if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
                    return Err(ConfigError::InvalidValue {
                        key: "COACH_API_BASE".into(),
                        message: format!("expected an http(s) URL, got {raw:?}"),
                    });
                }
                trimmed
            }
            None => defaults.api_base,
        };

        let query_timeout = lookup("COACH_QUERY_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.query_timeout);

        let health_timeout = lookup("COACH_HEALTH_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.health_timeout);

        let sessions_per_week = lookup("COACH_SESSIONS_PER_WEEK")
            .and_then(|s| s.trim().parse::<u8>().ok())
            .unwrap_or(defaults.sessions_per_week);
        if !(1..=7).contains(&sessions_per_week) {
            return Err(ConfigError::InvalidValue {
                key: "COACH_SESSIONS_PER_WEEK".into(),
                message: format!("must be between 1 and 7, got {sessions_per_week}"),
            });
        }

        let chat_mode = match lookup("COACH_CHAT_MODE") {
            Some(raw) => ChatMode::parse(&raw).ok_or_else(|| ConfigError::InvalidValue {
                key: "COACH_CHAT_MODE".into(),
                message: format!("expected quick-tip or in-depth, got {raw:?}"),
            })?,
            None => defaults.chat_mode,
        };

        Ok(Self {
            api_base,
            query_timeout,
            health_timeout,
            sessions_per_week,
            chat_mode,
        })
    }
}
