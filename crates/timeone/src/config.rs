//! Vendor feed configuration loaded from environment variables.

use std::time::Duration;

use crate::error::FeedError;
use crate::retry::RetryConfig;

pub const DEFAULT_PROGRAMS_URL: &str = "https://publisher.performance.timeone.io/xmlProgAff.php";
pub const DEFAULT_ACTIONS_URL: &str = "http://api.publicidees.com/subid.php5";

/// Credentials and endpoints for the TimeOne feed.
///
/// `Debug` is implemented by hand so the API key never reaches the logs.
#[derive(Clone)]
pub struct TimeOneConfig {
    pub partner_id: String,
    pub api_key: String,
    pub programs_url: String,
    pub actions_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Retries after the first attempt of each fetch.
    pub max_retries: u32,
}

impl TimeOneConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env var                | Default                                   |
    /// |------------------------|-------------------------------------------|
    /// | `TIMEONE_PARTNER_ID`   | **required**                              |
    /// | `TIMEONE_API_KEY`      | **required**                              |
    /// | `TIMEONE_PROGRAMS_URL` | [`DEFAULT_PROGRAMS_URL`]                  |
    /// | `TIMEONE_ACTIONS_URL`  | [`DEFAULT_ACTIONS_URL`]                   |
    /// | `TIMEONE_TIMEOUT_SECS` | `30`                                      |
    /// | `TIMEONE_MAX_RETRIES`  | `3`                                       |
    pub fn from_env() -> Result<Self, FeedError> {
        Ok(Self {
            partner_id: required("TIMEONE_PARTNER_ID")?,
            api_key: required("TIMEONE_API_KEY")?,
            programs_url: std::env::var("TIMEONE_PROGRAMS_URL")
                .unwrap_or_else(|_| DEFAULT_PROGRAMS_URL.into()),
            actions_url: std::env::var("TIMEONE_ACTIONS_URL")
                .unwrap_or_else(|_| DEFAULT_ACTIONS_URL.into()),
            timeout_secs: parsed("TIMEONE_TIMEOUT_SECS", 30)?,
            max_retries: parsed("TIMEONE_MAX_RETRIES", 3)?,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.max_retries,
            ..Default::default()
        }
    }

    /// Replace every occurrence of the API key in `text`.
    pub fn redact(&self, text: &str) -> String {
        if self.api_key.is_empty() {
            return text.to_string();
        }
        text.replace(&self.api_key, "***")
    }
}

impl std::fmt::Debug for TimeOneConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeOneConfig")
            .field("partner_id", &self.partner_id)
            .field("api_key", &"***")
            .field("programs_url", &self.programs_url)
            .field("actions_url", &self.actions_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

fn required(name: &str) -> Result<String, FeedError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(FeedError::Config(format!("{name} must be set"))),
    }
}

fn parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T, FeedError> {
    match std::env::var(name) {
        Ok(v) => v
            .parse()
            .map_err(|_| FeedError::Config(format!("{name} must be a valid number"))),
        Err(_) => Ok(default),
    }
}
