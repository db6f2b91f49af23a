// src/lib.rs

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;

pub use crate::config::Config;
pub use crate::handlers::error::ScrapeError;
pub use crate::handlers::run::{process_page, run_once, RunOutcome};
pub use crate::models::RateRecord;
