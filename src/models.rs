// src/models.rs
use serde::{Serialize, Deserialize};
use chrono::NaiveDate;

/// Column names shared by the history CSV and the JSON snapshot.
pub const HISTORY_HEADER: [&str; 4] = ["Product", "Interest Rate", "APR", "timestamp"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRecord {
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Interest Rate")]
    pub interest_rate: String,
    #[serde(rename = "APR")]
    pub apr: String,
    pub timestamp: NaiveDate,
}

impl RateRecord {
    pub fn new(
        product: impl Into<String>,
        interest_rate: impl Into<String>,
        apr: impl Into<String>,
        timestamp: NaiveDate,
    ) -> Self {
        RateRecord {
            product: product.into(),
            interest_rate: interest_rate.into(),
            apr: apr.into(),
            timestamp,
        }
    }

    pub fn key(&self) -> RecordKey {
        RecordKey {
            product: self.product.clone(),
            timestamp: self.timestamp.to_string(),
        }
    }
}

/// Identity of a row in the history log. The timestamp stays textual so rows
/// are matched exactly as they were written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct RecordKey {
    #[serde(rename = "Product")]
    pub product: String,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let record = RateRecord::new("30-Year Fixed", "6.50", "6.63", date);
        assert_eq!(
            record.key(),
            RecordKey { product: "30-Year Fixed".into(), timestamp: "2024-05-01".into() }
        );
    }

    #[test]
    fn serializes_with_history_column_names_in_order() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let record = RateRecord::new("7/1 ARM", "6.12", "7.05", date);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"Product":"7/1 ARM","Interest Rate":"6.12","APR":"7.05","timestamp":"2024-05-01"}"#
        );
    }
}
