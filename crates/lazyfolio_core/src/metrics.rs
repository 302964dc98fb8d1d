//! Risk and return statistics for a portfolio return series
//!
//! Batch computations over the full series; nothing here is incremental.

use crate::error::SeriesError;
use crate::model::{PortfolioReturnSeries, StatsSummary};

/// Assumed trading days per year for annualisation
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Compute annualised return, annualised volatility, the return/risk ratio
/// and the maximum drawdown of `series`.
pub fn compute_stats(series: &PortfolioReturnSeries) -> Result<StatsSummary, SeriesError> {
    if series.is_empty() {
        return Err(SeriesError::EmptySeries);
    }

    let returns: Vec<f64> = series.daily_returns().collect();
    let mean = mean(&returns);
    let annual_return = (1.0 + mean).powf(TRADING_DAYS_PER_YEAR) - 1.0;
    let annual_risk = sample_std_dev(&returns, mean) * TRADING_DAYS_PER_YEAR.sqrt();
    let sharpe = if annual_risk != 0.0 {
        annual_return / annual_risk
    } else {
        0.0
    };

    let total_return = series
        .cumulative_returns()
        .last()
        .map_or(0.0, |last| last / 100.0 - 1.0);

    Ok(StatsSummary {
        annual_return,
        annual_risk,
        sharpe,
        max_drawdown: max_drawdown(series.cumulative_returns()),
        total_return,
        observations: returns.len(),
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator).
///
/// Zero for fewer than two observations or an all-equal series.
fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    let Some(&first) = values.first() else {
        return 0.0;
    };
    if values.len() < 2 || values.iter().all(|&v| v == first) {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Minimum of `value / running_peak - 1`; 0 when the curve never declines.
pub fn max_drawdown(cumulative: impl IntoIterator<Item = f64>) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;
    for value in cumulative {
        peak = peak.max(value);
        worst = worst.min(value / peak - 1.0);
    }
    worst
}
