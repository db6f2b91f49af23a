// src/services/store.rs
use csv::{ReaderBuilder, WriterBuilder};
use log::{debug, info};
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::handlers::error::ScrapeError;
use crate::models::{RateRecord, RecordKey, HISTORY_HEADER};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Every candidate was already in the history log; nothing was written.
    NothingNew,
    Persisted { appended: usize },
}

/// The history CSV plus the per-run JSON snapshot.
pub struct RecordStore {
    history_path: PathBuf,
    snapshot_path: PathBuf,
}

impl RecordStore {
    pub fn new(history_path: impl Into<PathBuf>, snapshot_path: impl Into<PathBuf>) -> Self {
        RecordStore {
            history_path: history_path.into(),
            snapshot_path: snapshot_path.into(),
        }
    }

    pub fn history_path(&self) -> &Path {
        &self.history_path
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Every `(Product, timestamp)` pair already in the history log. A missing
    /// log is an empty history.
    pub fn load_keys(&self) -> Result<HashSet<RecordKey>, ScrapeError> {
        if !self.history_path.exists() {
            debug!("No history at {}, starting fresh", self.history_path.display());
            return Ok(HashSet::new());
        }

        let mut rdr = ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.history_path)
            .map_err(|e| self.history_failure("open", e))?;

        let mut keys = HashSet::new();
        for result in rdr.deserialize::<RecordKey>() {
            let key = result.map_err(|e| self.history_failure("read", e))?;
            keys.insert(key);
        }

        info!("Loaded {} existing key(s) from {}", keys.len(), self.history_path.display());
        Ok(keys)
    }

    /// Replace the snapshot with `records`.
    pub fn write_snapshot(&self, records: &[RateRecord]) -> Result<(), ScrapeError> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| ScrapeError::snapshot_error(format!("failed to serialize records: {}", e)))?;

        ensure_parent_dir(&self.snapshot_path).map_err(|e| {
            ScrapeError::snapshot_error(format!("failed to create directory for {}: {}", self.snapshot_path.display(), e))
        })?;
        fs::write(&self.snapshot_path, json).map_err(|e| {
            ScrapeError::snapshot_error(format!("failed to write {}: {}", self.snapshot_path.display(), e))
        })?;

        info!("Snapshot JSON saved to {}", self.snapshot_path.display());
        Ok(())
    }

    /// Append `records` to the history log, writing the header first when the
    /// file is new or empty. Returns the number of rows appended.
    pub fn append_history(&self, records: &[RateRecord]) -> Result<usize, ScrapeError> {
        ensure_parent_dir(&self.history_path).map_err(|e| self.history_failure("create directory for", e))?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.history_path)
            .map_err(|e| self.history_failure("open", e))?;

        // Decided on the open handle so the header goes in exactly once.
        let write_header = file
            .metadata()
            .map_err(|e| self.history_failure("stat", e))?
            .len()
            == 0;

        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(file);
        if write_header {
            wtr.write_record(HISTORY_HEADER)
                .map_err(|e| self.history_failure("write header to", e))?;
        }
        for record in records {
            wtr.serialize(record)
                .map_err(|e| self.history_failure("append to", e))?;
        }
        wtr.flush().map_err(|e| self.history_failure("flush", e))?;

        info!("Appended {} new row(s) to {}", records.len(), self.history_path.display());
        Ok(records.len())
    }

    /// Drop candidates already in history, then persist whatever is left.
    pub fn merge(&self, candidates: Vec<RateRecord>) -> Result<MergeOutcome, ScrapeError> {
        let mut keys = self.load_keys()?;
        let retained = retain_new(candidates, &mut keys);

        if retained.is_empty() {
            return Ok(MergeOutcome::NothingNew);
        }

        self.write_snapshot(&retained)?;
        let appended = self.append_history(&retained)?;
        Ok(MergeOutcome::Persisted { appended })
    }

    fn history_failure(&self, action: &str, e: impl std::fmt::Display) -> ScrapeError {
        ScrapeError::history_error(format!("failed to {} {}: {}", action, self.history_path.display(), e))
    }
}

/// Keep candidates whose key is not in `seen`, recording each kept key so a
/// product listed twice on one page is only kept once.
pub fn retain_new(candidates: Vec<RateRecord>, seen: &mut HashSet<RecordKey>) -> Vec<RateRecord> {
    candidates
        .into_iter()
        .filter(|record| {
            let fresh = seen.insert(record.key());
            if !fresh {
                debug!("Skipping previously saved row: {} @ {}", record.product, record.timestamp);
            }
            fresh
        })
        .collect()
}

fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
