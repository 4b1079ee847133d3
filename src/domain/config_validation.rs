//! Rules file validation.
//!
//! Validates every field of the rules configuration before an evaluation
//! runs, so a bad file fails loudly instead of producing a quiet mis-plan.

use crate::domain::error::NesteggError;
use crate::ports::config_port::ConfigPort;

pub const BAND_SECTION_PREFIX: &str = "band.";

const WEIGHT_KEYS: [&str; 6] = [
    "weight_diversification",
    "weight_fee",
    "weight_volatility",
    "weight_drawdown",
    "weight_income",
    "weight_quality",
];

const SUM_TOLERANCE: f64 = 1e-6;

/// Names of the risk-band sections present in the config.
pub fn band_sections(config: &dyn ConfigPort) -> Vec<String> {
    config
        .sections()
        .into_iter()
        .filter(|s| s.starts_with(BAND_SECTION_PREFIX))
        .collect()
}

pub fn validate_rules_config(config: &dyn ConfigPort) -> Result<(), NesteggError> {
    let bands = band_sections(config);
    if bands.is_empty() {
        return Err(NesteggError::ConfigMissing {
            section: format!("{BAND_SECTION_PREFIX}<name>"),
            key: "weights/target/drift_trigger".to_string(),
        });
    }
    for section in &bands {
        validate_band(config, section)?;
    }
    validate_rebalancing(config)?;
    validate_loss_guard(config)?;
    validate_radar(config)?;
    validate_settings(config, &bands)?;
    Ok(())
}

fn validate_band(config: &dyn ConfigPort, section: &str) -> Result<(), NesteggError> {
    let mut weight_sum = 0.0;
    for key in WEIGHT_KEYS {
        let value = require_double(config, section, key)?;
        if value < 0.0 {
            return Err(invalid(section, key, "weight must be non-negative"));
        }
        weight_sum += value;
    }
    if (weight_sum - 1.0).abs() > SUM_TOLERANCE {
        return Err(invalid(
            section,
            "weight_*",
            &format!("weights must sum to 1, got {weight_sum}"),
        ));
    }

    let growth = require_double(config, section, "target_growth")?;
    let safety = require_double(config, section, "target_safety")?;
    if !(0.0..=1.0).contains(&growth) || !(0.0..=1.0).contains(&safety) {
        return Err(invalid(
            section,
            "target_growth",
            "target fractions must be between 0 and 1",
        ));
    }
    if (growth + safety - 1.0).abs() > SUM_TOLERANCE {
        return Err(invalid(
            section,
            "target_growth",
            &format!("target fractions must sum to 1, got {}", growth + safety),
        ));
    }

    let drift_trigger = require_double(config, section, "drift_trigger")?;
    if drift_trigger <= 0.0 || drift_trigger >= 1.0 {
        return Err(invalid(
            section,
            "drift_trigger",
            "drift_trigger must be between 0 and 1 exclusive",
        ));
    }

    Ok(())
}

fn validate_rebalancing(config: &dyn ConfigPort) -> Result<(), NesteggError> {
    let months = config.get_int("rebalancing", "hard_cadence_months", 12);
    if months < 1 {
        return Err(invalid(
            "rebalancing",
            "hard_cadence_months",
            "hard_cadence_months must be at least 1",
        ));
    }
    Ok(())
}

fn validate_loss_guard(config: &dyn ConfigPort) -> Result<(), NesteggError> {
    let floor = config.get_double("loss_guard", "safety_floor_pct", 30.0);
    if !(0.0..=100.0).contains(&floor) {
        return Err(invalid(
            "loss_guard",
            "safety_floor_pct",
            "safety_floor_pct must be between 0 and 100",
        ));
    }
    let target = config.get_double("loss_guard", "growth_target_pct", 70.0);
    if !(0.0..=100.0).contains(&target) {
        return Err(invalid(
            "loss_guard",
            "growth_target_pct",
            "growth_target_pct must be between 0 and 100",
        ));
    }
    let cap = config.get_double("loss_guard", "growth_cap_pct", 7.0);
    if cap < 0.0 {
        return Err(invalid(
            "loss_guard",
            "growth_cap_pct",
            "growth_cap_pct must be non-negative",
        ));
    }
    let brake = config.get_double("loss_guard", "weekly_brake_pct", -5.0);
    if brake > 0.0 {
        return Err(invalid(
            "loss_guard",
            "weekly_brake_pct",
            "weekly_brake_pct must be zero or negative",
        ));
    }
    Ok(())
}

fn validate_radar(config: &dyn ConfigPort) -> Result<(), NesteggError> {
    let max_tilt = config.get_double("radar", "max_tilt_amount", 10.0);
    if max_tilt < 0.0 {
        return Err(invalid(
            "radar",
            "max_tilt_amount",
            "max_tilt_amount must be non-negative",
        ));
    }
    let cap = config.get_double("radar", "monthly_cap", 80.0);
    if cap < 0.0 {
        return Err(invalid(
            "radar",
            "monthly_cap",
            "monthly_cap must be non-negative",
        ));
    }
    Ok(())
}

fn validate_settings(config: &dyn ConfigPort, bands: &[String]) -> Result<(), NesteggError> {
    // The settings section is optional; when present, its band must exist
    // and the contribution must be positive.
    let Some(risk_band) = config.get_string("settings", "risk_band") else {
        return Ok(());
    };
    let section = format!("{BAND_SECTION_PREFIX}{risk_band}");
    if !bands.contains(&section) {
        return Err(NesteggError::UnknownRiskBand { band: risk_band });
    }

    let amount = config.get_double("settings", "contribution_amount", 0.0);
    if amount <= 0.0 {
        return Err(invalid(
            "settings",
            "contribution_amount",
            "contribution_amount must be positive",
        ));
    }
    let extra = config.get_double("settings", "btd_extra_amount", 0.0);
    if extra < 0.0 {
        return Err(invalid(
            "settings",
            "btd_extra_amount",
            "btd_extra_amount must be non-negative",
        ));
    }
    Ok(())
}

fn require_double(config: &dyn ConfigPort, section: &str, key: &str) -> Result<f64, NesteggError> {
    match config.get_string(section, key) {
        Some(raw) => raw.trim().parse().map_err(|_| {
            invalid(section, key, "expected a number")
        }),
        None => Err(NesteggError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }),
    }
}

fn invalid(section: &str, key: &str, reason: &str) -> NesteggError {
    NesteggError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
