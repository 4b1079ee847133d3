//! Radar: macro-stress scoring and contribution tilt recommendations.
//!
//! Indicators arrive from the caller; the engine never fetches market data.

use crate::domain::rules::RadarConfig;

/// Macro market indicators supplied externally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroIndicators {
    /// Volatility index level.
    pub vix: f64,
    /// Percentage move in a major equity index over the last week.
    pub equity_drop: f64,
    /// 10-year bond yield, percent.
    pub bond_yield: f64,
}

impl Default for MacroIndicators {
    fn default() -> Self {
        MacroIndicators {
            vix: 15.0,
            equity_drop: 0.0,
            bond_yield: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StressLevel {
    Low,
    Medium,
    High,
}

impl StressLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StressLevel::Low => "low",
            StressLevel::Medium => "medium",
            StressLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MacroStress {
    /// Additive stress score, clamped to 0-100.
    pub score: u32,
    pub level: StressLevel,
    pub reason: String,
    pub indicators: MacroIndicators,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiltDirection {
    None,
    Safety,
    Growth,
}

impl TiltDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TiltDirection::None => "none",
            TiltDirection::Safety => "safety",
            TiltDirection::Growth => "growth",
        }
    }
}

/// A recommended extra contribution leg.
#[derive(Debug, Clone, PartialEq)]
pub struct Tilt {
    pub amount: f64,
    pub direction: TiltDirection,
    pub reason: String,
}

/// Per-user tilt state for the current month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltState {
    pub btd_enabled: bool,
    /// Tilt dollars already spent this month.
    pub monthly_cap_used: f64,
}

/// Score macro stress from the supplied indicators. Additive contributions:
/// VIX above 30 adds 40 (above 20 adds 20), a weekly equity drop below -5%
/// adds 30 (below -2% adds 15), bond yields above 5% add 20. Level
/// thresholds sit at 30 and 60.
pub fn macro_stress(indicators: MacroIndicators) -> MacroStress {
    let mut score = 0u32;
    let mut reasons = Vec::new();

    if indicators.vix > 30.0 {
        score += 40;
        reasons.push(format!("High volatility (VIX {:.1})", indicators.vix));
    } else if indicators.vix > 20.0 {
        score += 20;
        reasons.push(format!("Elevated volatility (VIX {:.1})", indicators.vix));
    }

    if indicators.equity_drop < -5.0 {
        score += 30;
        reasons.push(format!(
            "Significant equity drop ({:.1}%)",
            indicators.equity_drop
        ));
    } else if indicators.equity_drop < -2.0 {
        score += 15;
        reasons.push(format!(
            "Moderate equity drop ({:.1}%)",
            indicators.equity_drop
        ));
    }

    if indicators.bond_yield > 5.0 {
        score += 20;
        reasons.push(format!("High bond yields ({:.1}%)", indicators.bond_yield));
    }

    let level = if score >= 60 {
        StressLevel::High
    } else if score >= 30 {
        StressLevel::Medium
    } else {
        StressLevel::Low
    };

    MacroStress {
        score: score.min(100),
        level,
        reason: if reasons.is_empty() {
            "Markets stable".to_string()
        } else {
            reasons.join("; ")
        },
        indicators,
    }
}

/// Equity drop below this, with buy-the-dip on and medium stress, earns a
/// growth tilt.
const BTD_DIP_THRESHOLD_PCT: f64 = -3.0;

/// Recommend a tilt for the given stress reading. A priority-ordered
/// decision tree: an exhausted monthly cap blocks everything, high stress
/// tilts to safety, and only then does a buy-the-dip growth tilt apply.
pub fn calculate_tilt(stress: &MacroStress, config: &RadarConfig, state: &TiltState) -> Tilt {
    let cap_remaining = config.monthly_cap - state.monthly_cap_used;
    if cap_remaining <= 0.0 {
        return Tilt {
            amount: 0.0,
            direction: TiltDirection::None,
            reason: format!(
                "Monthly tilt cap reached (${:.0}/${:.0})",
                state.monthly_cap_used, config.monthly_cap
            ),
        };
    }

    if stress.level == StressLevel::High {
        let amount = config.max_tilt_amount.min(cap_remaining);
        return Tilt {
            amount,
            direction: TiltDirection::Safety,
            reason: format!("High macro stress detected - add ${amount:.0} to Safety"),
        };
    }

    if stress.level == StressLevel::Medium
        && state.btd_enabled
        && stress.indicators.equity_drop < BTD_DIP_THRESHOLD_PCT
    {
        let amount = config.max_tilt_amount.min(cap_remaining);
        return Tilt {
            amount,
            direction: TiltDirection::Growth,
            reason: format!("BTD active: Market dip detected - add ${amount:.0} to Growth"),
        };
    }

    Tilt {
        amount: 0.0,
        direction: TiltDirection::None,
        reason: "No tilt recommended (markets stable)".to_string(),
    }
}

/// Human-readable Radar summary for display surfaces.
pub fn radar_summary(stress: &MacroStress, tilt: &Tilt) -> String {
    let mut out = format!(
        "Macro Stress: {} ({}/100)\nReason: {}\n",
        stress.level.as_str().to_uppercase(),
        stress.score,
        stress.reason
    );
    if tilt.amount > 0.0 {
        out.push_str(&format!("Recommendation: {}", tilt.reason));
    } else {
        out.push_str(&tilt.reason);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicators(vix: f64, equity_drop: f64, bond_yield: f64) -> MacroIndicators {
        MacroIndicators {
            vix,
            equity_drop,
            bond_yield,
        }
    }

    #[test]
    fn calm_markets_score_zero() {
        let stress = macro_stress(MacroIndicators::default());
        assert_eq!(stress.score, 0);
        assert_eq!(stress.level, StressLevel::Low);
        assert_eq!(stress.reason, "Markets stable");
    }

    #[test]
    fn elevated_vix_is_medium() {
        let stress = macro_stress(indicators(25.0, -2.5, 4.0));
        assert_eq!(stress.score, 35);
        assert_eq!(stress.level, StressLevel::Medium);
    }

    #[test]
    fn all_indicators_stressed_is_high() {
        let stress = macro_stress(indicators(35.0, -6.0, 5.5));
        assert_eq!(stress.score, 90);
        assert_eq!(stress.level, StressLevel::High);
        assert!(stress.reason.contains("High volatility"));
        assert!(stress.reason.contains("Significant equity drop"));
        assert!(stress.reason.contains("High bond yields"));
    }

    #[test]
    fn level_threshold_boundaries() {
        // Exactly 30 is medium; 60 is high.
        assert_eq!(macro_stress(indicators(15.0, -6.0, 4.0)).score, 30);
        assert_eq!(
            macro_stress(indicators(15.0, -6.0, 4.0)).level,
            StressLevel::Medium
        );
        assert_eq!(macro_stress(indicators(35.0, -3.0, 4.0)).score, 55);
        assert_eq!(
            macro_stress(indicators(35.0, -3.0, 4.0)).level,
            StressLevel::Medium
        );
        assert_eq!(macro_stress(indicators(35.0, -3.0, 5.5)).score, 75);
        assert_eq!(
            macro_stress(indicators(35.0, -3.0, 5.5)).level,
            StressLevel::High
        );
    }

    fn config() -> RadarConfig {
        RadarConfig {
            max_tilt_amount: 10.0,
            monthly_cap: 80.0,
        }
    }

    #[test]
    fn exhausted_cap_blocks_any_tilt() {
        let stress = macro_stress(indicators(40.0, -8.0, 6.0));
        let state = TiltState {
            btd_enabled: true,
            monthly_cap_used: 80.0,
        };
        let tilt = calculate_tilt(&stress, &config(), &state);
        assert_eq!(tilt.amount, 0.0);
        assert_eq!(tilt.direction, TiltDirection::None);
        assert!(tilt.reason.contains("cap reached"));
    }

    #[test]
    fn high_stress_tilts_to_safety() {
        let stress = macro_stress(indicators(35.0, -6.0, 4.0));
        let state = TiltState {
            btd_enabled: true,
            monthly_cap_used: 0.0,
        };
        let tilt = calculate_tilt(&stress, &config(), &state);
        assert_eq!(tilt.direction, TiltDirection::Safety);
        assert_eq!(tilt.amount, 10.0);
    }

    #[test]
    fn safety_tilt_beats_buy_the_dip() {
        // High stress with a deep dip and BTD enabled still goes to safety.
        let stress = macro_stress(indicators(35.0, -8.0, 5.5));
        assert_eq!(stress.level, StressLevel::High);
        let state = TiltState {
            btd_enabled: true,
            monthly_cap_used: 0.0,
        };
        let tilt = calculate_tilt(&stress, &config(), &state);
        assert_eq!(tilt.direction, TiltDirection::Safety);
    }

    #[test]
    fn medium_stress_with_btd_and_dip_tilts_to_growth() {
        let stress = macro_stress(indicators(25.0, -3.5, 4.0));
        assert_eq!(stress.level, StressLevel::Medium);
        let state = TiltState {
            btd_enabled: true,
            monthly_cap_used: 0.0,
        };
        let tilt = calculate_tilt(&stress, &config(), &state);
        assert_eq!(tilt.direction, TiltDirection::Growth);
        assert_eq!(tilt.amount, 10.0);
    }

    #[test]
    fn medium_stress_without_btd_does_nothing() {
        let stress = macro_stress(indicators(25.0, -3.5, 4.0));
        let state = TiltState {
            btd_enabled: false,
            monthly_cap_used: 0.0,
        };
        let tilt = calculate_tilt(&stress, &config(), &state);
        assert_eq!(tilt.direction, TiltDirection::None);
    }

    #[test]
    fn tilt_sized_by_cap_remaining() {
        let stress = macro_stress(indicators(40.0, -8.0, 6.0));
        let state = TiltState {
            btd_enabled: false,
            monthly_cap_used: 74.0,
        };
        let tilt = calculate_tilt(&stress, &config(), &state);
        assert_eq!(tilt.amount, 6.0);
        assert_eq!(tilt.direction, TiltDirection::Safety);
    }

    #[test]
    fn summary_mentions_level_and_recommendation() {
        let stress = macro_stress(indicators(35.0, -6.0, 4.0));
        let state = TiltState {
            btd_enabled: false,
            monthly_cap_used: 0.0,
        };
        let tilt = calculate_tilt(&stress, &config(), &state);
        let summary = radar_summary(&stress, &tilt);
        assert!(summary.contains("Macro Stress: HIGH"));
        assert!(summary.contains("Recommendation:"));
    }
}
