//! Order plan generation for the next contribution.
//!
//! Combines the scorer and allocation calculator with user settings to
//! produce a concrete buy list. Pure: "today" is injected by the caller.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::domain::allocation::allocate;
use crate::domain::asset::{Category, Universe};
use crate::domain::holding::Holding;
use crate::domain::rules::RiskBandConfig;
use crate::domain::score::{score_assets, ScoredAsset};
use crate::domain::settings::{next_run_date, UserSettings};

/// Orders below this amount are silently dropped for fee efficiency.
pub const MIN_ORDER_AMOUNT: f64 = 5.0;

/// At most this fraction of the total contribution is shifted toward an
/// underweight sleeve.
pub const MAX_REBALANCE_SHIFT: f64 = 0.3;

/// Number of top-scored assets bought per sleeve.
const TOP_GROWTH_ASSETS: usize = 3;
const TOP_SAFETY_ASSETS: usize = 2;

/// One buy instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub ticker: String,
    pub name: String,
    pub amount: f64,
    pub category: Category,
    pub reason: String,
}

/// Signed sleeve drift: current fraction minus target fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drift {
    pub growth: f64,
    pub safety: f64,
}

/// The buy list for the next contribution run.
///
/// `orders` need not sum to `total_amount`: sub-minimum orders are dropped
/// and a sleeve with no eligible assets queues nothing. The shortfall is the
/// caller's signal that money was left unallocated.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPlan {
    pub orders: Vec<Order>,
    pub total_amount: f64,
    pub dip_extra: f64,
    pub drift: Drift,
    pub next_run_date: NaiveDate,
}

impl OrderPlan {
    /// Sum of queued order amounts.
    pub fn allocated(&self) -> f64 {
        self.orders.iter().map(|o| o.amount).sum()
    }
}

/// Generate the order plan for the next contribution.
pub fn build_order_plan(
    settings: &UserSettings,
    band: &RiskBandConfig,
    universe: &Universe,
    holdings: &[Holding],
    prices: &HashMap<String, f64>,
    today: NaiveDate,
) -> OrderPlan {
    let current = allocate(holdings, prices, universe);
    let target = band.target;

    let drift = Drift {
        growth: current.growth - target.growth,
        safety: current.safety - target.safety,
    };

    // Buy-the-dip extra applies only when both enabled and externally
    // flagged as triggered.
    let btd = &settings.buy_the_dip;
    let dip_extra = if btd.enabled && btd.triggered {
        btd.extra_amount
    } else {
        0.0
    };
    let total_amount = settings.contribution.amount + dip_extra;

    // Split by target weights, then boost the underweight sleeve. The boost
    // is the smaller of the drift deficit scaled by total and 30% of total,
    // and only one sleeve is boosted (growth checked first).
    let mut growth_amount = total_amount * target.growth;
    let mut safety_amount = total_amount * target.safety;

    if drift.growth < 0.0 {
        let boost = rebalance_boost(drift.growth, total_amount);
        growth_amount += boost;
        safety_amount -= boost;
    } else if drift.safety < 0.0 {
        let boost = rebalance_boost(drift.safety, total_amount);
        safety_amount += boost;
        growth_amount -= boost;
    }

    let growth_scored = score_assets(
        &owned(universe.eligible_in(Category::Growth)),
        &band.weights,
    );
    let safety_scored = score_assets(
        &owned(universe.eligible_in(Category::Safety)),
        &band.weights,
    );

    let mut orders = Vec::new();
    orders.extend(sleeve_orders(
        &growth_scored,
        TOP_GROWTH_ASSETS,
        growth_amount,
        drift.growth < 0.0,
        "growth",
    ));
    orders.extend(sleeve_orders(
        &safety_scored,
        TOP_SAFETY_ASSETS,
        safety_amount,
        drift.safety < 0.0,
        "safety",
    ));

    OrderPlan {
        orders,
        total_amount,
        dip_extra,
        drift,
        next_run_date: next_run_date(today, settings.contribution.cadence),
    }
}

/// Contribution shifted toward an underweight sleeve: capped by the sleeve's
/// actual deficit and by [`MAX_REBALANCE_SHIFT`] of the total, whichever is
/// smaller.
pub fn rebalance_boost(drift: f64, total_amount: f64) -> f64 {
    (drift.abs() * total_amount).min(total_amount * MAX_REBALANCE_SHIFT)
}

/// Split a sleeve's dollar amount across its top-N scored assets, in
/// proportion to score within the selected subset. Sub-minimum orders are
/// omitted; an empty sleeve or non-positive amount queues nothing.
fn sleeve_orders(
    scored: &[ScoredAsset],
    top_n: usize,
    amount: f64,
    rebalancing: bool,
    sleeve: &str,
) -> Vec<Order> {
    if amount <= 0.0 || scored.is_empty() {
        return Vec::new();
    }

    let top = &scored[..top_n.min(scored.len())];
    let total_score: f64 = top.iter().map(|s| s.score).sum();
    if total_score <= 0.0 {
        return Vec::new();
    }

    let reason = if rebalancing {
        format!("Rebalancing toward {sleeve} target")
    } else {
        "Regular DCA".to_string()
    };

    top.iter()
        .filter_map(|s| {
            let allocation = s.score / total_score * amount;
            if allocation < MIN_ORDER_AMOUNT {
                return None;
            }
            Some(Order {
                ticker: s.asset.ticker.clone(),
                name: s.asset.name.clone(),
                amount: round_cents(allocation),
                category: s.asset.category,
                reason: reason.clone(),
            })
        })
        .collect()
}

fn owned(assets: Vec<&crate::domain::asset::Asset>) -> Vec<crate::domain::asset::Asset> {
    assets.into_iter().cloned().collect()
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
