// src/handlers/run.rs
use chrono::NaiveDate;
use log::info;
use std::fmt;

use crate::config::Config;
use crate::services::as_of::{is_stale, resolve_as_of, ResolvedDate};
use crate::services::extract::extract_candidates;
use crate::services::page::{fetch_page_html, HtmlPage, RatePage};
use crate::services::store::{MergeOutcome, RecordStore};
use super::error::ScrapeError;

/// How a run that did not fail came to an end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The page's data predates today; nothing was extracted or written.
    Stale { as_of: NaiveDate, today: NaiveDate },
    /// Every candidate was already in the history log.
    NothingNew { as_of: ResolvedDate, candidates: usize },
    Persisted { as_of: ResolvedDate, appended: usize },
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RunOutcome::Stale { as_of, today } => {
                write!(f, "Skipping past data: {} < {}", as_of, today)
            }
            RunOutcome::NothingNew { as_of, candidates } => write!(
                f,
                "No new data scraped for {} ({} candidate(s) already saved). Nothing saved.",
                as_of.date(),
                candidates
            ),
            RunOutcome::Persisted { as_of, appended } => {
                write!(f, "Appended {} new row(s) for {}", appended, as_of.date())
            }
        }
    }
}

/// Resolve, extract and merge one already-fetched page.
pub fn process_page<P: RatePage + ?Sized>(
    page: &P,
    store: &RecordStore,
    today: NaiveDate,
) -> Result<RunOutcome, ScrapeError> {
    let as_of = resolve_as_of(page, today);

    if is_stale(as_of.date(), today) {
        return Ok(RunOutcome::Stale { as_of: as_of.date(), today });
    }

    let candidates = extract_candidates(&page.rows(), as_of.date());
    let total = candidates.len();

    let outcome = match store.merge(candidates)? {
        MergeOutcome::NothingNew => RunOutcome::NothingNew { as_of, candidates: total },
        MergeOutcome::Persisted { appended } => RunOutcome::Persisted { as_of, appended },
    };
    Ok(outcome)
}

/// Fetch the configured page and process it once.
pub async fn run_once(config: &Config, today: NaiveDate) -> Result<RunOutcome, ScrapeError> {
    let html = fetch_page_html(config).await?;
    let page = HtmlPage::parse(&html);
    let store = RecordStore::new(&config.history_path, &config.snapshot_path);

    let outcome = process_page(&page, &store, today)?;
    info!("{}", outcome);
    Ok(outcome)
}
