use crate::errors::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashMap;

/// Raw answer of a bulk price-history query, before normalization.
#[derive(Debug, Clone)]
pub enum RawHistory {
    /// One chart frame answering a single-symbol query
    Single(Value),
    /// Chart frames keyed by symbol; `Err` holds the per-symbol failure reason
    Multi(HashMap<String, std::result::Result<Value, String>>),
}

/// Base trait for price history sources
#[async_trait]
pub trait PriceSource {
    /// Name of the upstream provider, used in logs
    fn source_name(&self) -> &'static str;

    /// Fetch adjusted daily closes from `start` through the latest trading day.
    /// An `Err` means the whole batch failed.
    async fn fetch_history(&self, symbols: &[String], start: &NaiveDate) -> Result<RawHistory>;
}
