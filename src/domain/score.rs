//! Composite asset scoring.
//!
//! Each asset gets six component scores normalized to 0-1 (higher is always
//! better), combined into a weighted composite using the risk band's weights.
//! Pure function of its inputs.

use crate::domain::asset::Asset;
use crate::domain::rules::ScoringWeights;

/// Per-component score breakdown, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreComponents {
    pub diversification: f64,
    pub fee: f64,
    pub volatility: f64,
    pub drawdown: f64,
    pub income: f64,
    pub quality: f64,
}

/// An asset with its composite score. Transient projection, recomputed on
/// every scoring call.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredAsset {
    pub asset: Asset,
    pub score: f64,
    pub components: ScoreComponents,
}

/// Placeholder diversification component. The source data carries no
/// correlation series, so this is a fixed approximation rather than a true
/// correlation measure. Replacing it with real diversification math would
/// change ranking outcomes and needs a deliberate decision.
const DIVERSIFICATION_SCORE: f64 = 0.7;

/// Score and rank assets, sorted descending by composite score.
pub fn score_assets(assets: &[Asset], weights: &ScoringWeights) -> Vec<ScoredAsset> {
    let max_fee = fold_max(assets, |a| a.mgmt_fee_bps);
    let max_vol = fold_max(assets, |a| a.volatility_3y);
    let max_dd = fold_max(assets, |a| a.max_drawdown_10y.abs());
    let max_yield = fold_max(assets, |a| a.dividend_yield_12m);
    let max_aum = fold_max(assets, |a| a.aum);

    let mut scored: Vec<ScoredAsset> = assets
        .iter()
        .map(|asset| {
            let components = ScoreComponents {
                diversification: DIVERSIFICATION_SCORE,
                fee: inverse_ratio(asset.mgmt_fee_bps, max_fee),
                volatility: inverse_ratio(asset.volatility_3y, max_vol),
                drawdown: inverse_ratio(asset.max_drawdown_10y.abs(), max_dd),
                income: ratio(asset.dividend_yield_12m, max_yield),
                quality: ratio(asset.aum, max_aum),
            };

            let score = weights.diversification * components.diversification
                + weights.fee * components.fee
                + weights.volatility * components.volatility
                + weights.drawdown * components.drawdown
                + weights.income * components.income
                + weights.quality * components.quality;

            ScoredAsset {
                asset: asset.clone(),
                score,
                components,
            }
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

fn fold_max(assets: &[Asset], f: impl Fn(&Asset) -> f64) -> f64 {
    assets.iter().map(f).fold(0.0, f64::max)
}

/// `value / max`, or 0 when the whole set maxes at 0.
fn ratio(value: f64, max: f64) -> f64 {
    if max > 0.0 { value / max } else { 0.0 }
}

/// `1 - value / max` (lower raw value is better), or 0 when max is 0.
fn inverse_ratio(value: f64, max: f64) -> f64 {
    if max > 0.0 { 1.0 - value / max } else { 0.0 }
}
