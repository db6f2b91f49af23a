// src/services/page.rs
use log::{debug, info};
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use crate::config::Config;
use crate::handlers::error::ScrapeError;

const AS_OF_TEXT: &str = "p.mb-0";
const PURCHASE_ROWS: &str = r#"div[aria-labelledby="purchase-0"] table tbody tr"#;
const PRODUCT_CELL: &str = "th a";
const NUMERIC_CELL: &str = "td";

/// One table row as the extractor sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateRow {
    product: String,
    rate: String,
    apr: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Product,
    Rate,
    Apr,
}

impl RateRow {
    pub fn new(product: impl Into<String>, rate: impl Into<String>, apr: impl Into<String>) -> Self {
        RateRow {
            product: product.into(),
            rate: rate.into(),
            apr: apr.into(),
        }
    }

    /// Raw cell text, untrimmed. Missing cells read as "".
    pub fn cell(&self, cell: Cell) -> &str {
        match cell {
            Cell::Product => &self.product,
            Cell::Rate => &self.rate,
            Cell::Apr => &self.apr,
        }
    }
}

/// The narrow view of a fetched page that the rest of the pipeline needs.
pub trait RatePage {
    /// First text matching `pattern`. Returns capture group 1 when the pattern
    /// has one, otherwise the whole match.
    fn first_matching_text(&self, pattern: &Regex) -> Option<String>;

    /// Rows of the purchase-rates table, in document order.
    fn rows(&self) -> Vec<RateRow>;
}

/// A parsed mortgage-rates page.
pub struct HtmlPage {
    document: Html,
}

impl HtmlPage {
    pub fn parse(html: &str) -> Self {
        HtmlPage {
            document: Html::parse_document(html),
        }
    }
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector must parse")
}

fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>()
}

impl RatePage for HtmlPage {
    fn first_matching_text(&self, pattern: &Regex) -> Option<String> {
        let text_selector = selector(AS_OF_TEXT);
        self.document
            .select(&text_selector)
            .map(element_text)
            .find_map(|text| {
                pattern.captures(&text).map(|caps| {
                    caps.get(1)
                        .or_else(|| caps.get(0))
                        .map(|m| m.as_str().to_string())
                        .unwrap_or_default()
                })
            })
    }

    fn rows(&self) -> Vec<RateRow> {
        let row_selector = selector(PURCHASE_ROWS);
        let product_selector = selector(PRODUCT_CELL);
        let cell_selector = selector(NUMERIC_CELL);

        let rows: Vec<RateRow> = self
            .document
            .select(&row_selector)
            .map(|row| {
                let product = row
                    .select(&product_selector)
                    .next()
                    .map(element_text)
                    .unwrap_or_default();
                let mut cells = row.select(&cell_selector).map(element_text);
                let rate = cells.next().unwrap_or_default();
                let apr = cells.next().unwrap_or_default();
                RateRow { product, rate, apr }
            })
            .collect();

        debug!("Found {} rows in purchase table", rows.len());
        rows
    }
}

/// Download the rates page body. This is the run's only network call.
pub async fn fetch_page_html(config: &Config) -> Result<String, ScrapeError> {
    info!("Fetching mortgage rates from URL: {}", config.rates_url);

    let client = Client::builder()
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| ScrapeError::fetch_error(format!("failed to build HTTP client: {}", e)))?;

    let body = client
        .get(&config.rates_url)
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(|e| ScrapeError::fetch_error(e.to_string()))?
        .text()
        .await
        .map_err(|e| ScrapeError::fetch_error(format!("failed to read response body: {}", e)))?;

    info!("Fetched {} bytes", body.len());
    Ok(body)
}
