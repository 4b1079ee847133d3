//! CLI integration tests for config and data wiring.
//!
//! Covers:
//! - Rules and settings construction from real INI files on disk
//! - Config validation failures surfacing with the right keys
//! - CSV adapters feeding the full plan pipeline end to end

mod common;

use common::*;
use nestegg::adapters::csv_holdings_adapter::CsvHoldingsAdapter;
use nestegg::adapters::csv_quote_adapter::CsvQuoteAdapter;
use nestegg::adapters::csv_universe_adapter::CsvUniverseAdapter;
use nestegg::adapters::file_config_adapter::FileConfigAdapter;
use nestegg::cli::{build_rules, build_settings};
use nestegg::domain::config_validation::validate_rules_config;
use nestegg::domain::error::NesteggError;
use nestegg::domain::plan::build_order_plan;
use nestegg::domain::quote::price_map;
use nestegg::domain::settings::Cadence;
use nestegg::ports::holdings_port::HoldingsPort;
use nestegg::ports::quote_port::QuotePort;
use nestegg::ports::universe_port::UniversePort;
use std::fs;
use std::io::Write;

const VALID_INI: &str = r#"
[band.conservative]
weight_diversification = 0.20
weight_fee = 0.15
weight_volatility = 0.25
weight_drawdown = 0.25
weight_income = 0.10
weight_quality = 0.05
target_growth = 0.4
target_safety = 0.6
drift_trigger = 0.04

[band.balanced]
weight_diversification = 0.25
weight_fee = 0.20
weight_volatility = 0.15
weight_drawdown = 0.15
weight_income = 0.10
weight_quality = 0.15
target_growth = 0.7
target_safety = 0.3
drift_trigger = 0.05

[band.growth]
weight_diversification = 0.25
weight_fee = 0.25
weight_volatility = 0.10
weight_drawdown = 0.10
weight_income = 0.05
weight_quality = 0.25
target_growth = 0.85
target_safety = 0.15
drift_trigger = 0.07

[rebalancing]
hard_cadence_months = 12

[loss_guard]
safety_floor_pct = 30
growth_target_pct = 70
growth_cap_pct = 7
weekly_brake_pct = -5

[radar]
max_tilt_amount = 10
monthly_cap = 80

[settings]
risk_band = balanced
contribution_amount = 50
cadence = weekly
btd_enabled = true
btd_extra_amount = 15
"#;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

mod config_pipeline {
    use super::*;

    #[test]
    fn valid_ini_builds_three_bands() {
        let file = write_temp_ini(VALID_INI);
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        validate_rules_config(&adapter).unwrap();

        let rules = build_rules(&adapter);
        assert_eq!(rules.bands.len(), 3);
        assert_eq!(rules.band("growth").unwrap().target.growth, 0.85);
        assert_eq!(rules.band("conservative").unwrap().drift_trigger, 0.04);
    }

    #[test]
    fn settings_built_from_ini() {
        let file = write_temp_ini(VALID_INI);
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();

        let settings = build_settings(&adapter, None, None, None, false).unwrap();
        assert_eq!(settings.risk_band, "balanced");
        assert_eq!(settings.contribution.cadence, Cadence::Weekly);
        assert!(settings.buy_the_dip.enabled);
    }

    #[test]
    fn broken_weights_fail_validation() {
        let bad = VALID_INI.replace("weight_quality = 0.15", "weight_quality = 0.45");
        let file = write_temp_ini(&bad);
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        let err = validate_rules_config(&adapter).unwrap_err();
        assert!(matches!(err, NesteggError::ConfigInvalid { key, .. } if key == "weight_*"));
    }

    #[test]
    fn settings_referencing_missing_band_fail() {
        let bad = VALID_INI.replace("risk_band = balanced", "risk_band = turbo");
        let file = write_temp_ini(&bad);
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        let err = validate_rules_config(&adapter).unwrap_err();
        assert!(matches!(err, NesteggError::UnknownRiskBand { band } if band == "turbo"));
    }
}

mod data_pipeline {
    use super::*;

    const UNIVERSE_CSV: &str = "\
ticker,name,category,eligible,mgmt_fee_bps,volatility_3y,max_drawdown_10y,dividend_yield_12m,aum
VAS.AX,Vanguard Australian Shares,growth,true,10,0.13,-0.32,0.038,15000000000
VGS.AX,Vanguard Global Shares,growth,true,18,0.12,-0.28,0.026,25000000000
IVV.AX,iShares S&P 500,growth,true,4,0.14,-0.34,0.013,40000000000
VAF.AX,Vanguard Australian Fixed Interest,safety,true,20,0.03,-0.08,0.034,10000000000
GOLD.AX,Global X Physical Gold,safety,true,40,0.11,-0.18,0.0,3000000000
";

    #[test]
    fn csv_files_drive_a_full_plan() {
        let dir = tempfile::TempDir::new().unwrap();
        let universe_path = dir.path().join("universe.csv");
        let holdings_path = dir.path().join("holdings.csv");
        let quotes_path = dir.path().join("quotes.csv");
        fs::write(&universe_path, UNIVERSE_CSV).unwrap();
        fs::write(
            &holdings_path,
            "ticker,units,cost_base\nVAS.AX,10,90.0\nVAF.AX,20,45.0\n",
        )
        .unwrap();
        fs::write(&quotes_path, "ticker,price\nVAS.AX,95.0\nVAF.AX,46.0\n").unwrap();

        let universe = CsvUniverseAdapter::new(universe_path)
            .load_universe()
            .unwrap();
        let holdings = CsvHoldingsAdapter::new(holdings_path)
            .fetch_holdings()
            .unwrap();
        let quotes = CsvQuoteAdapter::new(quotes_path).fetch_quotes().unwrap();
        let prices = price_map(&quotes);

        let plan = build_order_plan(
            &make_settings(100.0, Cadence::Weekly),
            &balanced_band(),
            &universe,
            &holdings,
            &prices,
            date(2024, 6, 3),
        );

        // 950 growth vs 920 safety: growth near 51%, well under the 70%
        // target, so the boost routes everything to growth.
        assert!(plan.drift.growth < 0.0);
        assert!(!plan.orders.is_empty());
        assert!(plan.allocated() <= plan.total_amount + 0.02);
        assert_eq!(plan.next_run_date, date(2024, 6, 10));
    }

    #[test]
    fn stale_holding_ticker_survives_pipeline() {
        let dir = tempfile::TempDir::new().unwrap();
        let universe_path = dir.path().join("universe.csv");
        let holdings_path = dir.path().join("holdings.csv");
        fs::write(&universe_path, UNIVERSE_CSV).unwrap();
        fs::write(
            &holdings_path,
            "ticker,units,cost_base\nVAS.AX,10,90.0\nDELISTED.AX,5,10.0\n",
        )
        .unwrap();

        let universe = CsvUniverseAdapter::new(universe_path)
            .load_universe()
            .unwrap();
        let holdings = CsvHoldingsAdapter::new(holdings_path)
            .fetch_holdings()
            .unwrap();

        let plan = build_order_plan(
            &make_settings(100.0, Cadence::Weekly),
            &balanced_band(),
            &universe,
            &holdings,
            &std::collections::HashMap::new(),
            date(2024, 6, 3),
        );
        // The unknown ticker contributes nothing but breaks nothing.
        assert!(!plan.orders.is_empty());
    }

    #[test]
    fn history_round_trips_through_quote_adapter() {
        let dir = tempfile::TempDir::new().unwrap();
        let quotes_path = dir.path().join("quotes.csv");
        fs::write(&quotes_path, "ticker,price\nVAS.AX,95.0\n").unwrap();
        fs::write(
            dir.path().join("VAS.AX_history.csv"),
            "date,price\n2024-03-01,100.0\n2024-03-02,98.0\n2024-03-03,94.0\n",
        )
        .unwrap();

        let adapter = CsvQuoteAdapter::new(quotes_path);
        let history = adapter.fetch_history("VAS.AX").unwrap().unwrap();
        assert_eq!(history.len(), 3);

        let check = nestegg::domain::loss_guard::check_weekly_brake(&history, -5.0);
        assert!(check.triggered);
        assert!((check.drop_pct - -6.0).abs() < 0.01);

        assert!(adapter.fetch_history("VAF.AX").unwrap().is_none());
    }
}
