//! Current growth/safety allocation from a holdings snapshot.

use std::collections::HashMap;

use crate::domain::asset::{Category, Universe};
use crate::domain::holding::Holding;

/// Fraction of each holding value a bundle contributes to the growth sleeve.
/// Fixed heuristic, not user-configurable.
const BUNDLE_GROWTH_SHARE: f64 = 0.7;

/// Current portfolio split. `growth` and `safety` are fractions of `total`
/// and sum to 1 when `total > 0`; all three are 0 for an empty portfolio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Allocation {
    pub growth: f64,
    pub safety: f64,
    pub total: f64,
}

impl Allocation {
    pub const ZERO: Allocation = Allocation {
        growth: 0.0,
        safety: 0.0,
        total: 0.0,
    };
}

/// Compute the current allocation. Holdings with tickers unknown to the
/// universe are skipped; a stale ticker must not break the calculation.
pub fn allocate(
    holdings: &[Holding],
    prices: &HashMap<String, f64>,
    universe: &Universe,
) -> Allocation {
    let mut growth_value = 0.0;
    let mut safety_value = 0.0;

    for holding in holdings {
        let Some(asset) = universe.get(&holding.ticker) else {
            continue;
        };
        let value = holding.value(prices);
        match asset.category {
            Category::Growth => growth_value += value,
            Category::Safety => safety_value += value,
            Category::Bundle => {
                growth_value += value * BUNDLE_GROWTH_SHARE;
                safety_value += value * (1.0 - BUNDLE_GROWTH_SHARE);
            }
        }
    }

    let total = growth_value + safety_value;
    if total == 0.0 {
        return Allocation::ZERO;
    }

    Allocation {
        growth: growth_value / total,
        safety: safety_value / total,
        total,
    }
}
