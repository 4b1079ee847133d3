//! Risk-band rules and engine-wide thresholds.
//!
//! Loaded once from the rules file and treated as immutable configuration.

use std::collections::HashMap;

use crate::domain::error::NesteggError;
use crate::domain::loss_guard::LossGuardConfig;

/// Scoring weights for one risk band. Non-negative fractions, expected to
/// sum to 1 (enforced by config validation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub diversification: f64,
    pub fee: f64,
    pub volatility: f64,
    pub drawdown: f64,
    pub income: f64,
    pub quality: f64,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.diversification + self.fee + self.volatility + self.drawdown + self.income
            + self.quality
    }
}

/// Target growth/safety split for one risk band. Fractions sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetAllocation {
    pub growth: f64,
    pub safety: f64,
}

/// Full configuration for one named risk band.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskBandConfig {
    pub weights: ScoringWeights,
    pub target: TargetAllocation,
    /// Sleeve drift fraction beyond which a rebalance is flagged.
    pub drift_trigger: f64,
}

/// Radar tilt sizing defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarConfig {
    pub max_tilt_amount: f64,
    pub monthly_cap: f64,
}

impl Default for RadarConfig {
    fn default() -> Self {
        RadarConfig {
            max_tilt_amount: 10.0,
            monthly_cap: 80.0,
        }
    }
}

/// The full rules table: risk bands plus engine-wide thresholds.
#[derive(Debug, Clone)]
pub struct Rules {
    pub bands: HashMap<String, RiskBandConfig>,
    /// Hard time-based rebalance cadence, in months.
    pub hard_cadence_months: i64,
    pub loss_guard: LossGuardConfig,
    pub radar: RadarConfig,
}

impl Rules {
    /// Look up a risk band by name. An unknown band is a configuration
    /// error, never silently defaulted.
    pub fn band(&self, name: &str) -> Result<&RiskBandConfig, NesteggError> {
        self.bands
            .get(name)
            .ok_or_else(|| NesteggError::UnknownRiskBand {
                band: name.to_string(),
            })
    }
}
