use std::{env, time::Duration};

pub const DEFAULT_BASE_URL: &str = "https://slack.com/api/";
pub const DEFAULT_MAX_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_BACKOFF_UNIT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix every Web API method is appended to.
    pub base_url: String,
    /// Retries after the first attempt. A request is dispatched at most `max_retry_attempts + 1`
    /// times.
    pub max_retry_attempts: u32,
    /// Retry `n` (starting at 1) waits `backoff_unit * (1 + n)`.
    pub backoff_unit: Duration,
    /// Share uploaded attachments to the message's channel and thread.
    pub share_uploads: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retry_attempts: DEFAULT_MAX_RETRY_ATTEMPTS,
            backoff_unit: DEFAULT_BACKOFF_UNIT,
            share_uploads: false,
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    let value = env::var(name).ok()?.to_lowercase();
    Some(value == "true" || value == "1")
}

impl ClientConfig {
    /// Defaults overridden by `SLACK_API_BASE_URL`, `SLACK_MAX_RETRY_ATTEMPTS`,
    /// `SLACK_RETRY_BACKOFF_SECS` and `SLACK_SHARE_UPLOADS`.
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            base_url: env::var("SLACK_API_BASE_URL").unwrap_or(default.base_url),
            max_retry_attempts: env::var("SLACK_MAX_RETRY_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_retry_attempts),
            backoff_unit: env::var("SLACK_RETRY_BACKOFF_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(default.backoff_unit),
            share_uploads: env_flag("SLACK_SHARE_UPLOADS").unwrap_or(default.share_uploads),
        }
    }

    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.backoff_unit
            .checked_mul(attempt.saturating_add(1))
            .unwrap_or(Duration::MAX)
    }
}
