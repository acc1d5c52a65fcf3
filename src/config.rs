use crate::error::{AppError, Result};

pub const SHEETS_API_URL: &str = "https://sheets.googleapis.com";
pub const SPREADSHEET_ID: &str = "16OsD3wm-SKWu-Bw8XG3xNd4sV36b95cZhbrsF5P7zGs";

/// Live draw feed: timestamp, date, game, draw, then up to six balls.
pub const REALTIME_RANGE: &str = "PCSO Results!A:J";

/// Daily summary: timestamp, date, game, draw, six balls, jackpot, winners.
pub const DAILY_RANGE: &str = "PCSO Daily Results!A:L";

/// Default time-to-live for both result caches (seconds).
pub const CACHE_TTL_SECS: u64 = 300;

/// Timeout applied to every Sheets API request (seconds).
pub const HTTP_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_API_PORT: u16 = 4000;

/// Cache keys, one slot per endpoint.
pub mod cache_keys {
    pub const LOTTERY_RESULTS: &str = "lotteryResults";
    pub const REALTIME_LOTTERY_RESULTS: &str = "realtimeLotteryResults";
    pub const DAILY_LOTTERY_RESULTS: &str = "dailyLotteryResults";
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub api_port: u16,
    pub sheets_api_url: String,
    pub spreadsheet_id: String,
    /// Sheet range for the live feed (REALTIME_RANGE)
    pub realtime_range: String,
    /// Sheet range for the daily summary (DAILY_RANGE)
    pub daily_range: String,
    /// Sent as `?key=` on every request (GOOGLE_API_KEY)
    pub api_key: Option<String>,
    /// Sent as a bearer token on every request (GOOGLE_ACCESS_TOKEN)
    pub access_token: Option<String>,
    pub cache_ttl_secs: u64,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let cfg = Self {
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| DEFAULT_API_PORT.to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
            sheets_api_url: std::env::var("SHEETS_API_URL")
                .unwrap_or_else(|_| SHEETS_API_URL.to_string()),
            spreadsheet_id: std::env::var("SPREADSHEET_ID")
                .unwrap_or_else(|_| SPREADSHEET_ID.to_string()),
            realtime_range: std::env::var("REALTIME_RANGE")
                .unwrap_or_else(|_| REALTIME_RANGE.to_string()),
            daily_range: std::env::var("DAILY_RANGE").unwrap_or_else(|_| DAILY_RANGE.to_string()),
            api_key: non_empty_var("GOOGLE_API_KEY"),
            access_token: non_empty_var("GOOGLE_ACCESS_TOKEN"),
            cache_ttl_secs: std::env::var("CACHE_TTL_SECS")
                .unwrap_or_else(|_| CACHE_TTL_SECS.to_string())
                .parse::<u64>()
                .unwrap_or(CACHE_TTL_SECS),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| HTTP_TIMEOUT_SECS.to_string())
                .parse::<u64>()
                .unwrap_or(HTTP_TIMEOUT_SECS),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.api_key.is_none() && self.access_token.is_none() {
            return Err(AppError::Config(
                "set GOOGLE_API_KEY or GOOGLE_ACCESS_TOKEN to read the spreadsheet".to_string(),
            ));
        }
        if self.cache_ttl_secs == 0 {
            return Err(AppError::Config("CACHE_TTL_SECS must be greater than zero".to_string()));
        }
        Ok(())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
impl Config {
    /// Config pointing at a local mock server, no env lookups.
    pub fn for_tests(sheets_api_url: &str) -> Self {
        Self {
            log_level: "debug".to_string(),
            api_port: 0,
            sheets_api_url: sheets_api_url.to_string(),
            spreadsheet_id: "sheet-id".to_string(),
            realtime_range: "Realtime!A:J".to_string(),
            daily_range: "Daily!A:L".to_string(),
            api_key: Some("test-key".to_string()),
            access_token: None,
            cache_ttl_secs: CACHE_TTL_SECS,
            http_timeout_secs: 5,
        }
    }
}
