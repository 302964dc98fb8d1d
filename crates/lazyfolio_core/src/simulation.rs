//! Growth simulation with scheduled contributions
//!
//! The initial investment lands on the first date. A monthly contribution lands
//! on the earliest trading date of every later calendar month that has one;
//! months without a trading date are skipped, not carried over.
//!
//! Values are a single left scan over `(date, return, contribution)`:
//!
//! ```text
//! value[0] = initial
//! value[i] = value[i-1] * (1 + return[i]) + contribution[i]
//! ```
//!
//! New money therefore does not earn the return of the day it arrives.

use jiff::civil::Date;

use crate::config::validate_amounts;
use crate::date_math::MonthKey;
use crate::error::SeriesError;
use crate::model::{GrowthPoint, GrowthTrajectory, PortfolioReturnSeries};

/// Cash added on each date: `initial` on the first, `monthly` on the first
/// trading date of each subsequent month, 0 elsewhere.
///
/// `dates` must be ascending.
#[must_use]
pub fn contribution_schedule(dates: &[Date], initial: f64, monthly: f64) -> Vec<f64> {
    let Some(&first) = dates.first() else {
        return Vec::new();
    };

    let mut current_month = MonthKey::of(first);
    let mut schedule = Vec::with_capacity(dates.len());
    schedule.push(initial);
    for &date in &dates[1..] {
        let month = MonthKey::of(date);
        if month != current_month {
            current_month = month;
            schedule.push(monthly);
        } else {
            schedule.push(0.0);
        }
    }
    schedule
}

/// Simulate portfolio value over a return series.
///
/// Fails with `EmptySeries` when there are no observations and with
/// `InvalidParameters` for a non-positive initial investment or a negative
/// monthly contribution.
pub fn simulate(
    series: &PortfolioReturnSeries,
    initial_investment: f64,
    monthly_contribution: f64,
) -> Result<GrowthTrajectory, SeriesError> {
    validate_amounts(initial_investment, monthly_contribution)?;
    if series.is_empty() {
        return Err(SeriesError::EmptySeries);
    }

    let dates: Vec<Date> = series.dates().collect();
    let schedule = contribution_schedule(&dates, initial_investment, monthly_contribution);

    let points: Vec<GrowthPoint> = series
        .points()
        .iter()
        .zip(schedule)
        .scan(
            (None::<f64>, 0.0),
            |(value, invested), (point, contribution)| {
                let next = match *value {
                    None => initial_investment,
                    Some(prior) => prior * (1.0 + point.daily_return) + contribution,
                };
                *value = Some(next);
                *invested += contribution;
                Some(GrowthPoint {
                    date: point.date,
                    daily_return: point.daily_return,
                    contribution,
                    cumulative_contribution: *invested,
                    portfolio_value: next,
                })
            },
        )
        .collect();

    tracing::debug!(
        rows = points.len(),
        final_value = points.last().map_or(0.0, |p| p.portfolio_value),
        "simulated growth trajectory"
    );

    Ok(GrowthTrajectory { points })
}
