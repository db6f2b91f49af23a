// src/config.rs
use log::info;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_RATES_URL: &str = "https://www.bankrate.com/mortgages/mortgage-rates/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_HISTORY_CSV: &str = "bankrate_rates_history.csv";
pub const DEFAULT_SNAPSHOT_JSON: &str = "bankrate_loans.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub rates_url: String,
    pub user_agent: String,
    /// Append-only CSV log of every retained record
    pub history_path: PathBuf,
    /// JSON snapshot, overwritten on each run that retains records
    pub snapshot_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rates_url: DEFAULT_RATES_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            history_path: PathBuf::from(DEFAULT_HISTORY_CSV),
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_JSON),
        }
    }
}

impl Config {
    /// Build the config from the environment. Call `dotenv().ok()` first if a
    /// `.env` file should be honoured.
    pub fn from_env() -> Self {
        Config {
            rates_url: env_or("RATES_URL", DEFAULT_RATES_URL),
            user_agent: env_or("RATES_USER_AGENT", DEFAULT_USER_AGENT),
            history_path: PathBuf::from(env_or("RATES_HISTORY_CSV", DEFAULT_HISTORY_CSV)),
            snapshot_path: PathBuf::from(env_or("RATES_SNAPSHOT_JSON", DEFAULT_SNAPSHOT_JSON)),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            info!("${} not set, defaulting to {}", key, default);
            default.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_or_falls_back_for_unset_and_blank_values() {
        env::remove_var("RATES_TEST_UNSET");
        assert_eq!(env_or("RATES_TEST_UNSET", "fallback"), "fallback");

        env::set_var("RATES_TEST_BLANK", "   ");
        assert_eq!(env_or("RATES_TEST_BLANK", "fallback"), "fallback");

        env::set_var("RATES_TEST_SET", "custom.csv");
        assert_eq!(env_or("RATES_TEST_SET", "fallback"), "custom.csv");
    }

    #[test]
    fn default_points_at_the_mortgage_rates_page() {
        let config = Config::default();
        assert_eq!(config.rates_url, DEFAULT_RATES_URL);
        assert_eq!(config.history_path, PathBuf::from("bankrate_rates_history.csv"));
        assert_eq!(config.snapshot_path, PathBuf::from("bankrate_loans.json"));
    }
}
