// src/bin/test_rates.rs
use anyhow::Context;
use chrono::Local;
use dotenv::dotenv;

use mortgage_rate_tracker::services::as_of::{is_stale, resolve_as_of, ResolvedDate};
use mortgage_rate_tracker::services::extract::extract_candidates;
use mortgage_rate_tracker::services::page::{fetch_page_html, HtmlPage, RatePage};
use mortgage_rate_tracker::Config;

/// Fetch and parse the rates page without touching the history or snapshot.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    let today = Local::now().date_naive();

    let html = fetch_page_html(&config)
        .await
        .with_context(|| format!("Failed to fetch {}", config.rates_url))?;
    let page = HtmlPage::parse(&html);

    let as_of = resolve_as_of(&page, today);
    match &as_of {
        ResolvedDate::Parsed(date) => println!("Rates as of:  {}", date),
        ResolvedDate::Fallback(date, reason) => println!("Rates as of:  {} (fallback: {:?})", date, reason),
    }
    println!("Stale:        {}", is_stale(as_of.date(), today));

    let rows = page.rows();
    let candidates = extract_candidates(&rows, as_of.date());
    println!("Table rows:   {}", rows.len());
    println!("Candidates:   {}", candidates.len());
    for record in &candidates {
        println!("  {:<24} rate {:>8}  apr {:>8}", record.product, record.interest_rate, record.apr);
    }

    Ok(())
}
