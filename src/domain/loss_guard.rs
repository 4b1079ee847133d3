//! Loss Guard: three independent guardrail checks that can redirect
//! contributions to safety assets.
//!
//! Each check is pure and returns its own result struct; [`run_loss_guard`]
//! executes whichever checks have the data they need and collects the
//! triggered ones as [`GuardrailEvent`]s for the caller to log or alert on.

use std::collections::HashMap;

use crate::domain::allocation::allocate;
use crate::domain::asset::Universe;
use crate::domain::holding::Holding;
use crate::domain::quote::PricePoint;

/// Loss Guard thresholds. Percentages, not fractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LossGuardConfig {
    pub safety_floor_pct: f64,
    pub growth_target_pct: f64,
    pub growth_cap_pct: f64,
    /// Weekly price change at or below this triggers the brake.
    pub weekly_brake_pct: f64,
}

impl Default for LossGuardConfig {
    fn default() -> Self {
        LossGuardConfig {
            safety_floor_pct: 30.0,
            growth_target_pct: 70.0,
            growth_cap_pct: 7.0,
            weekly_brake_pct: -5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrakeCheck {
    pub triggered: bool,
    pub drop_pct: f64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloorCheck {
    pub triggered: bool,
    pub current_pct: f64,
    pub floor_pct: f64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CapCheck {
    pub triggered: bool,
    pub current_pct: f64,
    pub max_allowed: f64,
    pub reason: String,
}

/// A triggered guardrail, with its metric payload.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardrailEvent {
    Brake(BrakeCheck),
    Floor(FloorCheck),
    Cap(CapCheck),
}

impl GuardrailEvent {
    pub fn severity(&self) -> Severity {
        match self {
            GuardrailEvent::Brake(_) => Severity::High,
            GuardrailEvent::Floor(_) | GuardrailEvent::Cap(_) => Severity::Medium,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            GuardrailEvent::Brake(c) => &c.reason,
            GuardrailEvent::Floor(c) => &c.reason,
            GuardrailEvent::Cap(c) => &c.reason,
        }
    }
}

/// Weekly brake: compare the latest price to the one ~7 points back (the
/// earliest point when fewer than 8 exist). Fewer than 2 points is a data
/// gap, reported untriggered.
pub fn check_weekly_brake(series: &[PricePoint], threshold_pct: f64) -> BrakeCheck {
    if series.len() < 2 {
        return BrakeCheck {
            triggered: false,
            drop_pct: 0.0,
            reason: "Insufficient data".to_string(),
        };
    }

    let latest = &series[series.len() - 1];
    let week_ago = &series[series.len().saturating_sub(8)];

    let drop_pct = round2((latest.price - week_ago.price) / week_ago.price * 100.0);
    let triggered = drop_pct <= threshold_pct;

    let reason = if triggered {
        format!(
            "Portfolio down {:.1}% this week - routing to Safety",
            drop_pct.abs()
        )
    } else {
        "No significant drop detected".to_string()
    };

    BrakeCheck {
        triggered,
        drop_pct,
        reason,
    }
}

/// Safety floor: triggered when the safety allocation percentage sits below
/// the configured floor.
pub fn check_safety_floor(safety_pct: f64, floor_pct: f64) -> FloorCheck {
    let triggered = safety_pct < floor_pct;
    let reason = if triggered {
        format!("Safety allocation {safety_pct:.1}% < floor {floor_pct:.0}% - redirect to Safety")
    } else {
        "Safety floor maintained".to_string()
    };
    FloorCheck {
        triggered,
        current_pct: round1(safety_pct),
        floor_pct,
        reason,
    }
}

/// Growth cap: triggered when the growth allocation percentage exceeds
/// target plus cap.
pub fn check_growth_cap(growth_pct: f64, target_pct: f64, cap_pct: f64) -> CapCheck {
    let max_allowed = target_pct + cap_pct;
    let triggered = growth_pct > max_allowed;
    let reason = if triggered {
        format!("Growth allocation {growth_pct:.1}% > cap {max_allowed:.0}% - redirect to Safety")
    } else {
        "Growth cap not exceeded".to_string()
    };
    CapCheck {
        triggered,
        current_pct: round1(growth_pct),
        max_allowed,
        reason,
    }
}

/// Run every check that has the data it needs. The brake requires a price
/// series; floor and cap require a non-empty holdings snapshot.
pub fn run_loss_guard(
    holdings: &[Holding],
    prices: &HashMap<String, f64>,
    universe: &Universe,
    series: Option<&[PricePoint]>,
    config: &LossGuardConfig,
) -> Vec<GuardrailEvent> {
    let mut events = Vec::new();

    if let Some(series) = series {
        let brake = check_weekly_brake(series, config.weekly_brake_pct);
        if brake.triggered {
            events.push(GuardrailEvent::Brake(brake));
        }
    }

    if !holdings.is_empty() {
        let allocation = allocate(holdings, prices, universe);
        let safety_pct = allocation.safety * 100.0;
        let growth_pct = allocation.growth * 100.0;

        let floor = check_safety_floor(safety_pct, config.safety_floor_pct);
        if floor.triggered {
            events.push(GuardrailEvent::Floor(floor));
        }

        let cap = check_growth_cap(growth_pct, config.growth_target_pct, config.growth_cap_pct);
        if cap.triggered {
            events.push(GuardrailEvent::Cap(cap));
        }
    }

    events
}

/// Map a triggered event set to a single recommendation line.
pub fn recommendation(events: &[GuardrailEvent]) -> String {
    if events.is_empty() {
        return "All systems normal. Continue with your planned allocation.".to_string();
    }
    if events.iter().any(|e| e.severity() == Severity::High) {
        return "ALERT: Route this week's contribution to Safety assets until conditions improve."
            .to_string();
    }
    "NOTICE: Consider adjusting your next contribution to rebalance toward Safety.".to_string()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
