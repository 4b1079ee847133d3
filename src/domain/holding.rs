//! User holdings snapshot.

use std::collections::HashMap;

/// One position in a user's portfolio.
///
/// `cost_base` is the per-unit acquisition price, used as the valuation
/// fallback when no live quote is available.
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub ticker: String,
    pub units: f64,
    pub cost_base: f64,
}

impl Holding {
    /// Market value: units at the quoted price, or at cost base when the
    /// ticker has no quote.
    pub fn value(&self, prices: &HashMap<String, f64>) -> f64 {
        let price = prices.get(&self.ticker).copied().unwrap_or(self.cost_base);
        self.units * price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_uses_quote_when_present() {
        let holding = Holding {
            ticker: "VAS.AX".to_string(),
            units: 10.0,
            cost_base: 90.0,
        };
        let mut prices = HashMap::new();
        prices.insert("VAS.AX".to_string(), 95.0);
        assert!((holding.value(&prices) - 950.0).abs() < f64::EPSILON);
    }

    #[test]
    fn value_falls_back_to_cost_base() {
        let holding = Holding {
            ticker: "VAS.AX".to_string(),
            units: 10.0,
            cost_base: 90.0,
        };
        let prices = HashMap::new();
        assert!((holding.value(&prices) - 900.0).abs() < f64::EPSILON);
    }
}
