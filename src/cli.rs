//! CLI definition and dispatch.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_holdings_adapter::CsvHoldingsAdapter;
use crate::adapters::csv_quote_adapter::{load_price_series, CsvQuoteAdapter};
use crate::adapters::csv_universe_adapter::CsvUniverseAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::allocation::allocate;
use crate::domain::asset::Universe;
use crate::domain::config_validation::{band_sections, validate_rules_config, BAND_SECTION_PREFIX};
use crate::domain::error::NesteggError;
use crate::domain::holding::Holding;
use crate::domain::loss_guard::{recommendation, run_loss_guard, LossGuardConfig};
use crate::domain::plan::build_order_plan;
use crate::domain::projection::project_future_value;
use crate::domain::quote::price_map;
use crate::domain::radar::{calculate_tilt, macro_stress, radar_summary, MacroIndicators, TiltState};
use crate::domain::rebalance::check_rebalance;
use crate::domain::rules::{RadarConfig, RiskBandConfig, Rules, ScoringWeights, TargetAllocation};
use crate::domain::score::score_assets;
use crate::domain::settings::{BuyTheDip, Cadence, Contribution, UserSettings};
use crate::ports::config_port::ConfigPort;
use crate::ports::holdings_port::HoldingsPort;
use crate::ports::quote_port::QuotePort;
use crate::ports::universe_port::UniversePort;

#[derive(Parser, Debug)]
#[command(name = "nestegg", about = "Micro-investing allocation engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the order plan for the next contribution
    Plan {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        universe: Option<PathBuf>,
        #[arg(long)]
        holdings: Option<PathBuf>,
        #[arg(long)]
        quotes: Option<PathBuf>,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        cadence: Option<String>,
        #[arg(long)]
        risk_band: Option<String>,
        /// Mark the buy-the-dip signal as triggered for this run
        #[arg(long)]
        dip_triggered: bool,
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Rank the asset universe for a risk band
    Score {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        universe: Option<PathBuf>,
        #[arg(long)]
        risk_band: Option<String>,
    },
    /// Run the rebalance monitor and Loss Guard checks
    Check {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        universe: Option<PathBuf>,
        #[arg(long)]
        holdings: Option<PathBuf>,
        #[arg(long)]
        quotes: Option<PathBuf>,
        /// Portfolio-level price history CSV (date,price) for the weekly brake
        #[arg(long)]
        history: Option<PathBuf>,
        #[arg(long)]
        risk_band: Option<String>,
        #[arg(long)]
        last_rebalance: Option<NaiveDate>,
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Score macro stress and recommend a contribution tilt
    Radar {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long, default_value_t = 15.0)]
        vix: f64,
        /// Weekly change in a major equity index, percent
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        equity_drop: f64,
        #[arg(long, default_value_t = 4.0)]
        bond_yield: f64,
        /// Tilt dollars already spent this month
        #[arg(long, default_value_t = 0.0)]
        cap_used: f64,
    },
    /// Validate a rules configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Plan {
            config,
            universe,
            holdings,
            quotes,
            amount,
            cadence,
            risk_band,
            dip_triggered,
            today,
        } => run_plan(
            &config,
            universe.as_ref(),
            holdings.as_ref(),
            quotes.as_ref(),
            amount,
            cadence.as_deref(),
            risk_band.as_deref(),
            dip_triggered,
            today,
        ),
        Command::Score {
            config,
            universe,
            risk_band,
        } => run_score(&config, universe.as_ref(), risk_band.as_deref()),
        Command::Check {
            config,
            universe,
            holdings,
            quotes,
            history,
            risk_band,
            last_rebalance,
            today,
        } => run_check(
            &config,
            universe.as_ref(),
            holdings.as_ref(),
            quotes.as_ref(),
            history.as_ref(),
            risk_band.as_deref(),
            last_rebalance,
            today,
        ),
        Command::Radar {
            config,
            vix,
            equity_drop,
            bond_yield,
            cap_used,
        } => run_radar(&config, vix, equity_drop, bond_yield, cap_used),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = NesteggError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        fail(&err)
    })
}

fn fail(err: &NesteggError) -> ExitCode {
    eprintln!("error: {err}");
    err.into()
}

/// Build the rules table from a validated config.
pub fn build_rules(config: &dyn ConfigPort) -> Rules {
    let mut bands = HashMap::new();
    for section in band_sections(config) {
        let name = section[BAND_SECTION_PREFIX.len()..].to_string();
        bands.insert(
            name,
            RiskBandConfig {
                weights: ScoringWeights {
                    diversification: config.get_double(&section, "weight_diversification", 0.0),
                    fee: config.get_double(&section, "weight_fee", 0.0),
                    volatility: config.get_double(&section, "weight_volatility", 0.0),
                    drawdown: config.get_double(&section, "weight_drawdown", 0.0),
                    income: config.get_double(&section, "weight_income", 0.0),
                    quality: config.get_double(&section, "weight_quality", 0.0),
                },
                target: TargetAllocation {
                    growth: config.get_double(&section, "target_growth", 0.0),
                    safety: config.get_double(&section, "target_safety", 0.0),
                },
                drift_trigger: config.get_double(&section, "drift_trigger", 0.05),
            },
        );
    }

    Rules {
        bands,
        hard_cadence_months: config.get_int("rebalancing", "hard_cadence_months", 12),
        loss_guard: LossGuardConfig {
            safety_floor_pct: config.get_double("loss_guard", "safety_floor_pct", 30.0),
            growth_target_pct: config.get_double("loss_guard", "growth_target_pct", 70.0),
            growth_cap_pct: config.get_double("loss_guard", "growth_cap_pct", 7.0),
            weekly_brake_pct: config.get_double("loss_guard", "weekly_brake_pct", -5.0),
        },
        radar: RadarConfig {
            max_tilt_amount: config.get_double("radar", "max_tilt_amount", 10.0),
            monthly_cap: config.get_double("radar", "monthly_cap", 80.0),
        },
    }
}

/// Build user settings from config with CLI overrides. The buy-the-dip
/// `triggered` flag is an external signal supplied per run.
pub fn build_settings(
    config: &dyn ConfigPort,
    amount_override: Option<f64>,
    cadence_override: Option<&str>,
    band_override: Option<&str>,
    dip_triggered: bool,
) -> Result<UserSettings, NesteggError> {
    let risk_band = band_override
        .map(str::to_string)
        .or_else(|| config.get_string("settings", "risk_band"))
        .ok_or_else(|| NesteggError::ConfigMissing {
            section: "settings".to_string(),
            key: "risk_band".to_string(),
        })?;

    let amount = match amount_override {
        Some(a) => a,
        None => {
            let a = config.get_double("settings", "contribution_amount", 0.0);
            if a <= 0.0 {
                return Err(NesteggError::ConfigMissing {
                    section: "settings".to_string(),
                    key: "contribution_amount".to_string(),
                });
            }
            a
        }
    };

    let cadence_str = cadence_override
        .map(str::to_string)
        .or_else(|| config.get_string("settings", "cadence"))
        .unwrap_or_default();

    Ok(UserSettings {
        risk_band,
        contribution: Contribution {
            amount,
            cadence: Cadence::parse(&cadence_str),
        },
        buy_the_dip: BuyTheDip {
            enabled: config.get_bool("settings", "btd_enabled", false),
            triggered: dip_triggered,
            extra_amount: config.get_double("settings", "btd_extra_amount", 0.0),
        },
    })
}

fn resolve_path(
    flag: Option<&PathBuf>,
    config: &dyn ConfigPort,
    key: &str,
) -> Option<PathBuf> {
    flag.cloned()
        .or_else(|| config.get_string("data", key).map(PathBuf::from))
}

fn load_universe_from(
    flag: Option<&PathBuf>,
    config: &dyn ConfigPort,
) -> Result<Universe, NesteggError> {
    let path = resolve_path(flag, config, "universe").ok_or_else(|| NesteggError::ConfigMissing {
        section: "data".to_string(),
        key: "universe".to_string(),
    })?;
    CsvUniverseAdapter::new(path).load_universe()
}

fn load_holdings_from(
    flag: Option<&PathBuf>,
    config: &dyn ConfigPort,
) -> Result<Vec<Holding>, NesteggError> {
    match resolve_path(flag, config, "holdings") {
        Some(path) => CsvHoldingsAdapter::new(path).fetch_holdings(),
        None => Ok(Vec::new()),
    }
}

fn load_prices_from(
    flag: Option<&PathBuf>,
    config: &dyn ConfigPort,
) -> Result<HashMap<String, f64>, NesteggError> {
    match resolve_path(flag, config, "quotes") {
        Some(path) => {
            let quotes = CsvQuoteAdapter::new(path).fetch_quotes()?;
            Ok(price_map(&quotes))
        }
        None => Ok(HashMap::new()),
    }
}

fn today_or_now(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Local::now().date_naive())
}

const PROJECTION_YEARS: u32 = 10;
const PROJECTION_ANNUAL_RETURN: f64 = 0.07;

#[allow(clippy::too_many_arguments)]
fn run_plan(
    config_path: &PathBuf,
    universe_flag: Option<&PathBuf>,
    holdings_flag: Option<&PathBuf>,
    quotes_flag: Option<&PathBuf>,
    amount: Option<f64>,
    cadence: Option<&str>,
    risk_band: Option<&str>,
    dip_triggered: bool,
    today: Option<NaiveDate>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_rules_config(&adapter) {
        return fail(&e);
    }

    let rules = build_rules(&adapter);
    let settings = match build_settings(&adapter, amount, cadence, risk_band, dip_triggered) {
        Ok(s) => s,
        Err(e) => return fail(&e),
    };
    let band = match rules.band(&settings.risk_band) {
        Ok(b) => b,
        Err(e) => return fail(&e),
    };

    let universe = match load_universe_from(universe_flag, &adapter) {
        Ok(u) => u,
        Err(e) => return fail(&e),
    };
    let holdings = match load_holdings_from(holdings_flag, &adapter) {
        Ok(h) => h,
        Err(e) => return fail(&e),
    };
    let prices = match load_prices_from(quotes_flag, &adapter) {
        Ok(p) => p,
        Err(e) => return fail(&e),
    };

    let today = today_or_now(today);
    let plan = build_order_plan(&settings, band, &universe, &holdings, &prices, today);

    println!(
        "Order plan ({} band, {} cadence)",
        settings.risk_band,
        settings.contribution.cadence.as_str()
    );
    if plan.orders.is_empty() {
        println!("  no orders queued");
    }
    for order in &plan.orders {
        println!(
            "  {:<10} {:<40} ${:>8.2}  {}",
            order.ticker, order.name, order.amount, order.reason
        );
    }
    println!("Total: ${:.2}", plan.total_amount);
    if plan.dip_extra > 0.0 {
        println!("Includes dip extra: ${:.2}", plan.dip_extra);
    }
    let queued = plan.allocated();
    if queued < plan.total_amount {
        println!(
            "Queued: ${:.2} (${:.2} unallocated)",
            queued,
            plan.total_amount - queued
        );
    }
    println!(
        "Drift: growth {:+.1}% / safety {:+.1}%",
        plan.drift.growth * 100.0,
        plan.drift.safety * 100.0
    );
    println!("Next run: {}", plan.next_run_date);

    let current = allocate(&holdings, &prices, &universe);
    let projected = project_future_value(
        current.total,
        settings.monthly_contribution(),
        PROJECTION_ANNUAL_RETURN,
        PROJECTION_YEARS,
    );
    println!(
        "Projected value in {}y at {:.0}%: ${:.2}",
        PROJECTION_YEARS,
        PROJECTION_ANNUAL_RETURN * 100.0,
        projected
    );

    ExitCode::SUCCESS
}

fn run_score(
    config_path: &PathBuf,
    universe_flag: Option<&PathBuf>,
    risk_band: Option<&str>,
) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_rules_config(&adapter) {
        return fail(&e);
    }

    let rules = build_rules(&adapter);
    let band_name = match risk_band
        .map(str::to_string)
        .or_else(|| adapter.get_string("settings", "risk_band"))
    {
        Some(b) => b,
        None => {
            return fail(&NesteggError::ConfigMissing {
                section: "settings".to_string(),
                key: "risk_band".to_string(),
            })
        }
    };
    let band = match rules.band(&band_name) {
        Ok(b) => b,
        Err(e) => return fail(&e),
    };

    let universe = match load_universe_from(universe_flag, &adapter) {
        Ok(u) => u,
        Err(e) => return fail(&e),
    };

    let scored = score_assets(&universe.assets, &band.weights);
    println!("Asset ranking ({band_name} band)");
    println!(
        "  {:<10} {:<8} {:>6}  {:>5} {:>5} {:>5} {:>5} {:>5} {:>5}",
        "ticker", "category", "score", "div", "fee", "vol", "dd", "inc", "qual"
    );
    for s in &scored {
        println!(
            "  {:<10} {:<8} {:>6.3}  {:>5.2} {:>5.2} {:>5.2} {:>5.2} {:>5.2} {:>5.2}",
            s.asset.ticker,
            s.asset.category.as_str(),
            s.score,
            s.components.diversification,
            s.components.fee,
            s.components.volatility,
            s.components.drawdown,
            s.components.income,
            s.components.quality,
        );
    }

    ExitCode::SUCCESS
}

#[allow(clippy::too_many_arguments)]
fn run_check(
    config_path: &PathBuf,
    universe_flag: Option<&PathBuf>,
    holdings_flag: Option<&PathBuf>,
    quotes_flag: Option<&PathBuf>,
    history_flag: Option<&PathBuf>,
    risk_band: Option<&str>,
    last_rebalance: Option<NaiveDate>,
    today: Option<NaiveDate>,
) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_rules_config(&adapter) {
        return fail(&e);
    }

    let rules = build_rules(&adapter);
    let band_name = match risk_band
        .map(str::to_string)
        .or_else(|| adapter.get_string("settings", "risk_band"))
    {
        Some(b) => b,
        None => {
            return fail(&NesteggError::ConfigMissing {
                section: "settings".to_string(),
                key: "risk_band".to_string(),
            })
        }
    };
    let band = match rules.band(&band_name) {
        Ok(b) => b,
        Err(e) => return fail(&e),
    };

    let universe = match load_universe_from(universe_flag, &adapter) {
        Ok(u) => u,
        Err(e) => return fail(&e),
    };
    let holdings = match load_holdings_from(holdings_flag, &adapter) {
        Ok(h) => h,
        Err(e) => return fail(&e),
    };
    let prices = match load_prices_from(quotes_flag, &adapter) {
        Ok(p) => p,
        Err(e) => return fail(&e),
    };

    let history = match history_flag
        .map(|p| load_price_series(p))
        .transpose()
    {
        Ok(h) => h,
        Err(e) => return fail(&e),
    };

    let today = today_or_now(today);

    let check = check_rebalance(
        &holdings,
        &prices,
        &universe,
        band,
        rules.hard_cadence_months,
        last_rebalance,
        today,
    );
    println!("Rebalance check ({band_name} band)");
    println!("  max drift: {:.1}%", check.max_drift * 100.0);
    println!(
        "  months since rebalance: {}",
        check.months_since_rebalance
    );
    match check.reason {
        Some(reason) => println!("  needed: yes ({})", reason.as_str()),
        None => println!("  needed: no"),
    }

    let events = run_loss_guard(
        &holdings,
        &prices,
        &universe,
        history.as_deref(),
        &rules.loss_guard,
    );
    println!("Loss Guard");
    if events.is_empty() {
        println!("  no guardrails triggered");
    }
    for event in &events {
        println!("  [{:?}] {}", event.severity(), event.reason());
    }
    println!("{}", recommendation(&events));

    ExitCode::SUCCESS
}

fn run_radar(
    config_path: &PathBuf,
    vix: f64,
    equity_drop: f64,
    bond_yield: f64,
    cap_used: f64,
) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_rules_config(&adapter) {
        return fail(&e);
    }

    let rules = build_rules(&adapter);
    let stress = macro_stress(MacroIndicators {
        vix,
        equity_drop,
        bond_yield,
    });
    let state = TiltState {
        btd_enabled: adapter.get_bool("settings", "btd_enabled", false),
        monthly_cap_used: cap_used,
    };
    let tilt = calculate_tilt(&stress, &rules.radar, &state);

    println!("{}", radar_summary(&stress, &tilt));
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    match validate_rules_config(&adapter) {
        Ok(()) => {
            let bands = band_sections(&adapter);
            println!("Config OK: {} risk band(s)", bands.len());
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}
