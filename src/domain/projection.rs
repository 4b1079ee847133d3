//! Compound-growth projection of future portfolio value.

/// Projected value after `years` of compounding at `annual_return`, with a
/// fixed monthly contribution treated as an ordinary annuity.
pub fn project_future_value(
    current_value: f64,
    monthly_contribution: f64,
    annual_return: f64,
    years: u32,
) -> f64 {
    let monthly_rate = annual_return / 12.0;
    let months = (years * 12) as f64;

    let fv_current = current_value * (1.0 + monthly_rate).powf(months);

    let fv_contributions = if monthly_rate == 0.0 {
        monthly_contribution * months
    } else {
        monthly_contribution * (((1.0 + monthly_rate).powf(months) - 1.0) / monthly_rate)
    };

    fv_current + fv_contributions
}
