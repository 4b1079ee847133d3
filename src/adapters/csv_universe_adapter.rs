//! CSV asset universe adapter.
//!
//! Expected columns: ticker, name, category, eligible, mgmt_fee_bps,
//! volatility_3y, max_drawdown_10y, dividend_yield_12m, aum.

use crate::domain::asset::{Asset, Category, Universe};
use crate::domain::error::NesteggError;
use crate::ports::universe_port::UniversePort;
use std::fs;
use std::path::PathBuf;

pub struct CsvUniverseAdapter {
    path: PathBuf,
}

impl CsvUniverseAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl UniversePort for CsvUniverseAdapter {
    fn load_universe(&self) -> Result<Universe, NesteggError> {
        let content = fs::read_to_string(&self.path).map_err(|e| NesteggError::Data {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        parse_universe(&content)
    }
}

fn parse_universe(content: &str) -> Result<Universe, NesteggError> {
    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let mut assets = Vec::new();

    for result in rdr.records() {
        let record = result.map_err(|e| NesteggError::Data {
            reason: format!("CSV parse error: {e}"),
        })?;

        let ticker = field(&record, 0, "ticker")?.to_string();
        let name = field(&record, 1, "name")?.to_string();

        let category_str = field(&record, 2, "category")?;
        let category = Category::parse(category_str).ok_or_else(|| NesteggError::Data {
            reason: format!("unknown category '{category_str}' for {ticker}"),
        })?;

        let eligible = matches!(
            field(&record, 3, "eligible")?.to_lowercase().as_str(),
            "true" | "yes" | "1"
        );

        assets.push(Asset {
            ticker,
            name,
            category,
            eligible,
            mgmt_fee_bps: number(&record, 4, "mgmt_fee_bps")?,
            volatility_3y: number(&record, 5, "volatility_3y")?,
            max_drawdown_10y: number(&record, 6, "max_drawdown_10y")?,
            dividend_yield_12m: number(&record, 7, "dividend_yield_12m")?,
            aum: number(&record, 8, "aum")?,
        });
    }

    if assets.is_empty() {
        return Err(NesteggError::Data {
            reason: "universe file contains no assets".to_string(),
        });
    }

    Ok(Universe::new(assets))
}

fn field<'a>(record: &'a csv::StringRecord, index: usize, name: &str) -> Result<&'a str, NesteggError> {
    record.get(index).ok_or_else(|| NesteggError::Data {
        reason: format!("missing {name} column"),
    })
}

fn number(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, NesteggError> {
    field(record, index, name)?
        .parse()
        .map_err(|e| NesteggError::Data {
            reason: format!("invalid {name} value: {e}"),
        })
}
