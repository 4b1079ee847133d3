#![allow(dead_code)]

use chrono::NaiveDate;
use nestegg::domain::asset::{Asset, Category, Universe};
use nestegg::domain::holding::Holding;
use nestegg::domain::loss_guard::LossGuardConfig;
use nestegg::domain::quote::PricePoint;
use nestegg::domain::rules::{
    RadarConfig, RiskBandConfig, Rules, ScoringWeights, TargetAllocation,
};
use nestegg::domain::settings::{BuyTheDip, Cadence, Contribution, UserSettings};
use std::collections::HashMap;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_asset(ticker: &str, category: Category, fee: f64, vol: f64, aum: f64) -> Asset {
    Asset {
        ticker: ticker.to_string(),
        name: format!("{ticker} Fund"),
        category,
        eligible: true,
        mgmt_fee_bps: fee,
        volatility_3y: vol,
        max_drawdown_10y: -0.30,
        dividend_yield_12m: 0.035,
        aum,
    }
}

/// Five-asset universe mirroring a typical ASX ETF menu: three growth, two
/// safety.
pub fn sample_universe() -> Universe {
    Universe::new(vec![
        make_asset("VAS.AX", Category::Growth, 10.0, 0.13, 15e9),
        make_asset("VGS.AX", Category::Growth, 18.0, 0.12, 25e9),
        make_asset("IVV.AX", Category::Growth, 4.0, 0.14, 40e9),
        make_asset("VAF.AX", Category::Safety, 20.0, 0.03, 10e9),
        make_asset("GOLD.AX", Category::Safety, 40.0, 0.11, 3e9),
    ])
}

pub fn balanced_band() -> RiskBandConfig {
    RiskBandConfig {
        weights: ScoringWeights {
            diversification: 0.25,
            fee: 0.20,
            volatility: 0.15,
            drawdown: 0.15,
            income: 0.10,
            quality: 0.15,
        },
        target: TargetAllocation {
            growth: 0.7,
            safety: 0.3,
        },
        drift_trigger: 0.05,
    }
}

pub fn sample_rules() -> Rules {
    let mut bands = HashMap::new();
    bands.insert("balanced".to_string(), balanced_band());
    Rules {
        bands,
        hard_cadence_months: 12,
        loss_guard: LossGuardConfig::default(),
        radar: RadarConfig::default(),
    }
}

pub fn make_holding(ticker: &str, units: f64, cost_base: f64) -> Holding {
    Holding {
        ticker: ticker.to_string(),
        units,
        cost_base,
    }
}

pub fn make_settings(amount: f64, cadence: Cadence) -> UserSettings {
    UserSettings {
        risk_band: "balanced".to_string(),
        contribution: Contribution { amount, cadence },
        buy_the_dip: BuyTheDip {
            enabled: false,
            triggered: false,
            extra_amount: 0.0,
        },
    }
}

/// Price series starting at `start_price`, applying each daily percentage
/// change in `moves`.
pub fn series_from_moves(start_price: f64, moves: &[f64]) -> Vec<PricePoint> {
    let start = date(2024, 3, 1);
    let mut price = start_price;
    let mut points = vec![PricePoint { date: start, price }];
    for (i, pct) in moves.iter().enumerate() {
        price *= 1.0 + pct / 100.0;
        points.push(PricePoint {
            date: start + chrono::Duration::days(i as i64 + 1),
            price,
        });
    }
    points
}
