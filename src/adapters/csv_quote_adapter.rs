//! CSV quote adapter.
//!
//! Latest quotes live in one file (columns: ticker, price). Optional
//! per-ticker history sits alongside it as `<TICKER>_history.csv` (columns:
//! date, price), sorted by date on load.

use crate::domain::error::NesteggError;
use crate::domain::quote::{PricePoint, Quote};
use crate::ports::quote_port::QuotePort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvQuoteAdapter {
    quotes_path: PathBuf,
}

impl CsvQuoteAdapter {
    pub fn new(quotes_path: PathBuf) -> Self {
        Self { quotes_path }
    }

    fn history_path(&self, ticker: &str) -> PathBuf {
        let file = format!("{ticker}_history.csv");
        match self.quotes_path.parent() {
            Some(dir) => dir.join(file),
            None => PathBuf::from(file),
        }
    }
}

impl QuotePort for CsvQuoteAdapter {
    fn fetch_quotes(&self) -> Result<Vec<Quote>, NesteggError> {
        let content = fs::read_to_string(&self.quotes_path).map_err(|e| NesteggError::Data {
            reason: format!("failed to read {}: {}", self.quotes_path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut quotes = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| NesteggError::Data {
                reason: format!("CSV parse error: {e}"),
            })?;

            let ticker = record
                .get(0)
                .ok_or_else(|| NesteggError::Data {
                    reason: "missing ticker column".to_string(),
                })?
                .to_string();

            let price: f64 = record
                .get(1)
                .ok_or_else(|| NesteggError::Data {
                    reason: "missing price column".to_string(),
                })?
                .parse()
                .map_err(|e| NesteggError::Data {
                    reason: format!("invalid price value: {e}"),
                })?;

            quotes.push(Quote { ticker, price });
        }

        Ok(quotes)
    }

    fn fetch_history(&self, ticker: &str) -> Result<Option<Vec<PricePoint>>, NesteggError> {
        let path = self.history_path(ticker);
        if !path.exists() {
            // Missing history is a data gap the engine handles, not a
            // failure.
            return Ok(None);
        }
        load_price_series(&path).map(Some)
    }
}

/// Load a chronological date,price series from a CSV file.
pub fn load_price_series(path: &std::path::Path) -> Result<Vec<PricePoint>, NesteggError> {
    let content = fs::read_to_string(path).map_err(|e| NesteggError::Data {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;

    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let mut points = Vec::new();

    for result in rdr.records() {
        let record = result.map_err(|e| NesteggError::Data {
            reason: format!("CSV parse error: {e}"),
        })?;

        let date_str = record.get(0).ok_or_else(|| NesteggError::Data {
            reason: "missing date column".to_string(),
        })?;
        let date =
            NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| NesteggError::Data {
                reason: format!("invalid date format: {e}"),
            })?;

        let price: f64 = record
            .get(1)
            .ok_or_else(|| NesteggError::Data {
                reason: "missing price column".to_string(),
            })?
            .parse()
            .map_err(|e| NesteggError::Data {
                reason: format!("invalid price value: {e}"),
            })?;

        points.push(PricePoint { date, price });
    }

    points.sort_by_key(|p| p.date);
    Ok(points)
}
