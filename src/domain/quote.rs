//! Price quotes supplied by external collaborators.
//!
//! The engine only reads quotes; fetching and caching live elsewhere.

use chrono::NaiveDate;
use std::collections::HashMap;

/// Latest known price for a ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub ticker: String,
    pub price: f64,
}

/// One point of a chronological price series.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Build a ticker -> price lookup from a quote list.
pub fn price_map(quotes: &[Quote]) -> HashMap<String, f64> {
    quotes
        .iter()
        .map(|q| (q.ticker.clone(), q.price))
        .collect()
}
