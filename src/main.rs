use chrono::Local;
use dotenv::dotenv;
use log::{error, info};
use std::process::ExitCode;

use mortgage_rate_tracker::handlers::run::{run_once, RunOutcome};
use mortgage_rate_tracker::Config;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    // Initialize the logger, INFO unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Logger initialized. Starting mortgage rate scrape...");

    let config = Config::from_env();
    let today = Local::now().date_naive();

    match run_once(&config, today).await {
        Ok(outcome) => {
            match &outcome {
                RunOutcome::Stale { .. } => info!("Run finished with stale data, nothing to do"),
                RunOutcome::NothingNew { .. } => info!("Run finished without new rows"),
                RunOutcome::Persisted { appended, .. } => {
                    info!("Run finished: {} row(s) saved to {}", appended, config.history_path.display())
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Scrape failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
