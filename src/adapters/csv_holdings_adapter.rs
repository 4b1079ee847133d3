//! CSV holdings adapter.
//!
//! Expected columns: ticker, units, cost_base.

use crate::domain::error::NesteggError;
use crate::domain::holding::Holding;
use crate::ports::holdings_port::HoldingsPort;
use std::fs;
use std::path::PathBuf;

pub struct CsvHoldingsAdapter {
    path: PathBuf,
}

impl CsvHoldingsAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl HoldingsPort for CsvHoldingsAdapter {
    fn fetch_holdings(&self) -> Result<Vec<Holding>, NesteggError> {
        let content = fs::read_to_string(&self.path).map_err(|e| NesteggError::Data {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut holdings = Vec::new();

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

            let units: f64 = parse_number(&record, 1, "units")?;
            if units < 0.0 {
                return Err(NesteggError::Data {
                    reason: format!("negative units for {ticker}"),
                });
            }

            holdings.push(Holding {
                ticker,
                units,
                cost_base: parse_number(&record, 2, "cost_base")?,
            });
        }

        Ok(holdings)
    }
}

fn parse_number(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, NesteggError> {
    record
        .get(index)
        .ok_or_else(|| NesteggError::Data {
            reason: format!("missing {name} column"),
        })?
        .parse()
        .map_err(|e| NesteggError::Data {
            reason: format!("invalid {name} value: {e}"),
        })
}
