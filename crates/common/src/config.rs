use std::path::PathBuf;
use std::time::Duration;

/// Default upstream endpoint for homework review statuses.
pub const DEFAULT_PRACTICUM_ENDPOINT: &str =
    "https://praktikum.yandex.ru/api/user_api/homework_statuses/";

/// Global application configuration loaded from environment variables.
#[derive(Clone)]
pub struct AppConfig {
    /// OAuth token for the review-tracking API
    pub practicum_token: String,

    /// Review status endpoint URL
    pub practicum_endpoint: String,

    /// Telegram bot token
    pub telegram_token: String,

    /// Destination chat for notifications
    pub telegram_chat_id: i64,

    /// Interval between successful polls (default: 300s)
    pub poll_interval: Duration,

    /// Backoff after a failed cycle (default: 5s)
    pub retry_interval: Duration,

    /// Optional request timeout for the status API. `None` leaves the
    /// transport defaults in place.
    pub http_timeout: Option<Duration>,

    /// Write logs to this file instead of stdout
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            practicum_token: std::env::var("PRACTICUM_TOKEN")
                .map_err(|_| anyhow::anyhow!("PRACTICUM_TOKEN environment variable is required"))?,
            practicum_endpoint: std::env::var("PRACTICUM_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_PRACTICUM_ENDPOINT.to_string()),
            telegram_token: std::env::var("TELEGRAM_TOKEN")
                .map_err(|_| anyhow::anyhow!("TELEGRAM_TOKEN environment variable is required"))?,
            telegram_chat_id: std::env::var("TELEGRAM_CHAT_ID")
                .map_err(|_| anyhow::anyhow!("TELEGRAM_CHAT_ID environment variable is required"))?
                .parse()
                .map_err(|_| anyhow::anyhow!("TELEGRAM_CHAT_ID must be a valid i64"))?,
            poll_interval: Duration::from_secs(
                std::env::var("POLL_INTERVAL_SECS")
                    .unwrap_or_else(|_| "300".to_string())
                    .parse()
                    .map_err(|_| anyhow::anyhow!("POLL_INTERVAL_SECS must be a valid u64"))?,
            ),
            retry_interval: Duration::from_secs(
                std::env::var("RETRY_INTERVAL_SECS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .map_err(|_| anyhow::anyhow!("RETRY_INTERVAL_SECS must be a valid u64"))?,
            ),
            http_timeout: std::env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .map(|v| {
                    v.parse()
                        .map(Duration::from_secs)
                        .map_err(|_| anyhow::anyhow!("HTTP_TIMEOUT_SECS must be a valid u64"))
                })
                .transpose()?,
            log_file: std::env::var("LOG_FILE").ok().map(PathBuf::from),
        })
    }
}

// Tokens stay out of logs.
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("practicum_token", &"<redacted>")
            .field("practicum_endpoint", &self.practicum_endpoint)
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("poll_interval", &self.poll_interval)
            .field("retry_interval", &self.retry_interval)
            .field("http_timeout", &self.http_timeout)
            .field("log_file", &self.log_file)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AppConfig {
        AppConfig {
            practicum_token: "secret-practicum".to_string(),
            practicum_endpoint: DEFAULT_PRACTICUM_ENDPOINT.to_string(),
            telegram_token: "secret-telegram".to_string(),
            telegram_chat_id: 42,
            poll_interval: Duration::from_secs(300),
            retry_interval: Duration::from_secs(5),
            http_timeout: None,
            log_file: None,
        }
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let rendered = format!("{:?}", sample());
        assert!(!rendered.contains("secret-practicum"));
        assert!(!rendered.contains("secret-telegram"));
        assert!(rendered.contains("telegram_chat_id: 42"));
    }
}
