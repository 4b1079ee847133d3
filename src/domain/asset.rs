//! Asset reference data and the tradable universe.
//!
//! Assets are static reference records loaded once from configuration and
//! never mutated at runtime.

/// Portfolio sleeve classification for an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Growth,
    Safety,
    /// Mixed-exposure product, attributed 70% growth / 30% safety.
    Bundle,
}

impl Category {
    pub fn parse(value: &str) -> Option<Category> {
        match value.to_lowercase().as_str() {
            "growth" => Some(Category::Growth),
            "safety" => Some(Category::Safety),
            "bundle" => Some(Category::Bundle),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Growth => "growth",
            Category::Safety => "safety",
            Category::Bundle => "bundle",
        }
    }
}

/// Immutable reference record for a tradable asset.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub ticker: String,
    pub name: String,
    pub category: Category,
    pub eligible: bool,
    pub mgmt_fee_bps: f64,
    pub volatility_3y: f64,
    /// Worst 10-year drawdown, stored as a negative fraction.
    pub max_drawdown_10y: f64,
    pub dividend_yield_12m: f64,
    pub aum: f64,
}

/// The full set of tradable assets.
#[derive(Debug, Clone)]
pub struct Universe {
    pub assets: Vec<Asset>,
}

impl Universe {
    pub fn new(assets: Vec<Asset>) -> Self {
        Universe { assets }
    }

    pub fn get(&self, ticker: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.ticker == ticker)
    }

    /// Eligible assets of a single category, in universe order.
    pub fn eligible_in(&self, category: Category) -> Vec<&Asset> {
        self.assets
            .iter()
            .filter(|a| a.eligible && a.category == category)
            .collect()
    }

    pub fn count(&self) -> usize {
        self.assets.len()
    }
}
