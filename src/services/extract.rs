// src/services/extract.rs
use chrono::NaiveDate;
use log::{debug, info};

use crate::models::RateRecord;
use super::page::{Cell, RateRow};

/// Turn table rows into candidate records stamped with `timestamp`.
/// Rows with an empty product, rate or APR are skipped.
pub fn extract_candidates(rows: &[RateRow], timestamp: NaiveDate) -> Vec<RateRecord> {
    let candidates: Vec<RateRecord> = rows
        .iter()
        .enumerate()
        .filter_map(|(idx, row)| {
            let product = row.cell(Cell::Product).trim();
            let rate = row.cell(Cell::Rate).trim();
            let apr = row.cell(Cell::Apr).trim();

            if product.is_empty() || rate.is_empty() || apr.is_empty() {
                debug!("Skipping incomplete row {}: {:?}", idx, row);
                return None;
            }
            Some(RateRecord::new(product, rate, apr, timestamp))
        })
        .collect();

    info!("Extracted {} candidate(s) from {} row(s)", candidates.len(), rows.len());
    candidates
}
