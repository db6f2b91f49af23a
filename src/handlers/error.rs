// src/handlers/error.rs
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Fetch,
    History,
    Snapshot,
}

/// A failure that ends a run. Recoverable situations (stale page, nothing new)
/// are reported through `RunOutcome` instead.
#[derive(Debug, Clone)]
pub struct ScrapeError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ScrapeError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        ScrapeError {
            kind,
            message: message.into(),
        }
    }

    pub fn fetch_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Fetch, message)
    }

    pub fn history_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::History, message)
    }

    pub fn snapshot_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Snapshot, message)
    }
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let stage = match self.kind {
            ErrorKind::Fetch => "fetch",
            ErrorKind::History => "history log",
            ErrorKind::Snapshot => "snapshot",
        };
        write!(f, "{} failed: {}", stage, self.message)
    }
}

impl std::error::Error for ScrapeError {}
