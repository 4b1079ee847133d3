//! User settings and contribution scheduling.

use chrono::{Duration, Months, NaiveDate};

/// Contribution cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    Weekly,
    Fortnightly,
    Monthly,
}

impl Cadence {
    /// Parse a cadence string. Unrecognized values fall back to weekly,
    /// the documented default.
    pub fn parse(value: &str) -> Cadence {
        match value.to_lowercase().as_str() {
            "fortnightly" => Cadence::Fortnightly,
            "monthly" => Cadence::Monthly,
            _ => Cadence::Weekly,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Cadence::Weekly => "weekly",
            Cadence::Fortnightly => "fortnightly",
            Cadence::Monthly => "monthly",
        }
    }

    /// Factor converting one contribution at this cadence to a monthly
    /// equivalent amount.
    pub fn monthly_factor(&self) -> f64 {
        match self {
            Cadence::Weekly => 4.33,
            Cadence::Fortnightly => 2.17,
            Cadence::Monthly => 1.0,
        }
    }
}

/// Recurring contribution configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    pub amount: f64,
    pub cadence: Cadence,
}

/// Buy-the-dip settings. `triggered` is an external signal supplied by the
/// caller; the engine never computes it.
#[derive(Debug, Clone, PartialEq)]
pub struct BuyTheDip {
    pub enabled: bool,
    pub triggered: bool,
    pub extra_amount: f64,
}

/// Per-user engine inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSettings {
    pub risk_band: String,
    pub contribution: Contribution,
    pub buy_the_dip: BuyTheDip,
}

impl UserSettings {
    /// Monthly-equivalent contribution amount, for projections.
    pub fn monthly_contribution(&self) -> f64 {
        self.contribution.amount * self.contribution.cadence.monthly_factor()
    }
}

/// Date of the next contribution run. Monthly adds one calendar month,
/// clamping to the end of shorter months.
pub fn next_run_date(today: NaiveDate, cadence: Cadence) -> NaiveDate {
    match cadence {
        Cadence::Weekly => today + Duration::days(7),
        Cadence::Fortnightly => today + Duration::days(14),
        Cadence::Monthly => today.checked_add_months(Months::new(1)).unwrap_or(today),
    }
}
