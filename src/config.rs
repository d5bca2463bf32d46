use chrono::{Days, NaiveDate};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub vanilla_csv: String,
    pub exotic_csv: String,
    pub prices_csv: Option<String>,
    pub as_of_date: Option<NaiveDate>,
    pub output_format: OutputFormat,
    pub history_lookback_days: i64,
}

/// Upper bound on `HISTORY_LOOKBACK_DAYS`: one hundred years.
pub const MAX_HISTORY_LOOKBACK_DAYS: i64 = 36_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let vanilla_csv = required(&env_map, "VANILLA_CSV")?;
        let exotic_csv = required(&env_map, "EXOTIC_CSV")?;

        let prices_csv = env_map
            .get("PRICES_CSV")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let as_of_date = match env_map.get("AS_OF_DATE").map(|s| s.trim()) {
            None | Some("") => None,
            Some(s) => Some(NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                ConfigError::InvalidValue(
                    "AS_OF_DATE".to_string(),
                    format!("must be YYYY-MM-DD, got {}", s),
                )
            })?),
        };

        let output_format = match env_map
            .get("OUTPUT_FORMAT")
            .map(|s| s.as_str())
            .unwrap_or("text")
        {
            "text" => OutputFormat::Text,
            "json" => OutputFormat::Json,
            other => {
                return Err(ConfigError::InvalidValue(
                    "OUTPUT_FORMAT".to_string(),
                    format!("must be text or json, got {}", other),
                ))
            }
        };

        let history_lookback_days = env_map
            .get("HISTORY_LOOKBACK_DAYS")
            .map(|s| s.as_str())
            .unwrap_or("365")
            .parse::<i64>()
            .ok()
            .filter(|d| (0..=MAX_HISTORY_LOOKBACK_DAYS).contains(d))
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "HISTORY_LOOKBACK_DAYS".to_string(),
                    format!("must be an integer from 0 to {}", MAX_HISTORY_LOOKBACK_DAYS),
                )
            })?;

        Ok(Config {
            vanilla_csv,
            exotic_csv,
            prices_csv,
            as_of_date,
            output_format,
            history_lookback_days,
        })
    }
}

impl Config {
    /// Price history window `[from, to]`, ending at `as_of_date` or `today`.
    pub fn history_window(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), ConfigError> {
        let to = self.as_of_date.unwrap_or(today);
        let from = u64::try_from(self.history_lookback_days)
            .ok()
            .and_then(|days| to.checked_sub_days(Days::new(days)))
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "HISTORY_LOOKBACK_DAYS".to_string(),
                    format!(
                        "{} days before {} is out of range",
                        self.history_lookback_days, to
                    ),
                )
            })?;
        Ok((from, to))
    }
}

fn required(env_map: &HashMap<String, String>, key: &str) -> Result<String, ConfigError> {
    env_map
        .get(key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ConfigError::MissingEnv(key.to_string()))
}
