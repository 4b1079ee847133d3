//! Drift- and time-triggered rebalance detection.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::domain::allocation::allocate;
use crate::domain::asset::Universe;
use crate::domain::holding::Holding;
use crate::domain::rules::RiskBandConfig;

/// Elapsed months reported when no rebalance has ever happened; effectively
/// infinite, so the time trigger always fires.
const NEVER_REBALANCED_MONTHS: f64 = 999.0;

const DAYS_PER_MONTH: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebalanceReason {
    DriftExceeded,
    CadenceDue,
}

impl RebalanceReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RebalanceReason::DriftExceeded => "Drift threshold exceeded",
            RebalanceReason::CadenceDue => "Time-based rebalance due",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RebalanceCheck {
    pub needed: bool,
    pub reason: Option<RebalanceReason>,
    pub max_drift: f64,
    pub months_since_rebalance: i64,
}

/// Check whether a rebalance is due, by drift or by elapsed time. When both
/// conditions hold, the drift reason takes precedence in the report.
pub fn check_rebalance(
    holdings: &[Holding],
    prices: &HashMap<String, f64>,
    universe: &Universe,
    band: &RiskBandConfig,
    hard_cadence_months: i64,
    last_rebalance: Option<NaiveDate>,
    today: NaiveDate,
) -> RebalanceCheck {
    let current = allocate(holdings, prices, universe);
    let target = band.target;

    let growth_drift = (current.growth - target.growth).abs();
    let safety_drift = (current.safety - target.safety).abs();
    let max_drift = growth_drift.max(safety_drift);

    let drift_exceeded = max_drift > band.drift_trigger;

    let months_since = match last_rebalance {
        Some(date) => (today - date).num_days() as f64 / DAYS_PER_MONTH,
        None => NEVER_REBALANCED_MONTHS,
    };
    let cadence_exceeded = months_since >= hard_cadence_months as f64;

    let reason = if drift_exceeded {
        Some(RebalanceReason::DriftExceeded)
    } else if cadence_exceeded {
        Some(RebalanceReason::CadenceDue)
    } else {
        None
    };

    RebalanceCheck {
        needed: drift_exceeded || cadence_exceeded,
        reason,
        max_drift,
        months_since_rebalance: months_since.floor() as i64,
    }
}
