// src/services/as_of.rs
use chrono::{NaiveDate, NaiveDateTime};
use log::{info, warn};
use regex::Regex;

use super::page::RatePage;

const AS_OF_PATTERN: &str = r"Rates as of (.*)";
/// e.g. "Friday, May 3, 2024 at 6:30 AM"
const AS_OF_FORMAT: &str = "%A, %B %d, %Y at %I:%M %p";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    PhraseMissing,
    Unparseable { text: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedDate {
    Parsed(NaiveDate),
    Fallback(NaiveDate, FallbackReason),
}

impl ResolvedDate {
    pub fn date(&self) -> NaiveDate {
        match self {
            ResolvedDate::Parsed(date) | ResolvedDate::Fallback(date, _) => *date,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ResolvedDate::Fallback(..))
    }
}

/// Parse the text that follows "Rates as of", keeping only the calendar date.
pub fn parse_as_of(text: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDateTime::parse_from_str(text.trim(), AS_OF_FORMAT).map(|dt| dt.date())
}

/// Work out which day the page's rates belong to, falling back to `today`
/// when the page does not say or says it in a form we cannot read.
pub fn resolve_as_of<P: RatePage + ?Sized>(page: &P, today: NaiveDate) -> ResolvedDate {
    let pattern = Regex::new(AS_OF_PATTERN).expect("static pattern must compile");

    let raw = match page.first_matching_text(&pattern) {
        Some(raw) => raw,
        None => {
            warn!("No 'Rates as of' text found, using today ({}) instead", today);
            return ResolvedDate::Fallback(today, FallbackReason::PhraseMissing);
        }
    };

    match parse_as_of(&raw) {
        Ok(date) => {
            info!("Rates are as of {}", date);
            ResolvedDate::Parsed(date)
        }
        Err(e) => {
            warn!("Failed to parse date '{}' ({}), using today ({}) instead", raw.trim(), e, today);
            ResolvedDate::Fallback(
                today,
                FallbackReason::Unparseable {
                    text: raw.trim().to_string(),
                    error: e.to_string(),
                },
            )
        }
    }
}

/// Data dated before today came from a cached or stale page.
pub fn is_stale(as_of: NaiveDate, today: NaiveDate) -> bool {
    as_of < today
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::page::RateRow;

    struct TextPage(Option<&'static str>);

    impl RatePage for TextPage {
        fn first_matching_text(&self, pattern: &Regex) -> Option<String> {
            let text = self.0?;
            pattern
                .captures(text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        }

        fn rows(&self) -> Vec<RateRow> {
            Vec::new()
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_documented_phrase_and_drops_time() {
        assert_eq!(parse_as_of("Wednesday, May 1, 2024 at 6:30 AM").unwrap(), ymd(2024, 5, 1));
        assert_eq!(parse_as_of("Tuesday, December 31, 2024 at 11:59 PM").unwrap(), ymd(2024, 12, 31));
        assert_eq!(parse_as_of("  Friday, May 03, 2024 at 12:05 PM  ").unwrap(), ymd(2024, 5, 3));
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(parse_as_of("May 1, 2024").is_err());
        assert!(parse_as_of("Wednesday, May 1, 2024").is_err());
        assert!(parse_as_of("Wednesday, Maytember 1, 2024 at 6:30 AM").is_err());
    }

    #[test]
    fn resolves_date_from_page_text() {
        let page = TextPage(Some("Rates as of Wednesday, May 1, 2024 at 6:30 AM"));
        let resolved = resolve_as_of(&page, ymd(2024, 5, 1));
        assert_eq!(resolved, ResolvedDate::Parsed(ymd(2024, 5, 1)));
        assert!(!resolved.is_fallback());
    }

    #[test]
    fn missing_phrase_falls_back_to_today() {
        let today = ymd(2024, 6, 10);
        let resolved = resolve_as_of(&TextPage(None), today);
        assert_eq!(resolved, ResolvedDate::Fallback(today, FallbackReason::PhraseMissing));
        assert_eq!(resolved.date(), today);
    }

    #[test]
    fn malformed_phrase_falls_back_to_today() {
        let today = ymd(2024, 6, 10);
        let resolved = resolve_as_of(&TextPage(Some("Rates as of yesterday-ish")), today);
        assert_eq!(resolved.date(), today);
        match resolved {
            ResolvedDate::Fallback(_, FallbackReason::Unparseable { text, .. }) => {
                assert_eq!(text, "yesterday-ish")
            }
            other => panic!("expected unparseable fallback, got {:?}", other),
        }
    }

    #[test]
    fn only_strictly_earlier_dates_are_stale() {
        let today = ymd(2024, 5, 2);
        assert!(is_stale(ymd(2024, 5, 1), today));
        assert!(!is_stale(today, today));
        assert!(!is_stale(ymd(2024, 5, 3), today));
    }
}
