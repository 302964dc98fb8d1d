//! Tests for growth simulation over aggregated returns
//!
//! These tests verify:
//! - Monthly contributions land once per later calendar month
//! - Cumulative contributions track the schedule
//! - The first value is exactly the initial investment
//! - The recurrence value[i] = value[i-1] * (1 + r[i]) + c[i] holds throughout

use jiff::civil::{Date, date};

use super::{closes_from_returns, prices};
use crate::aggregate::aggregate;
use crate::config::{JoinPolicy, PortfolioBuilder};
use crate::model::{DateRange, PortfolioReturnSeries};
use crate::provider::InMemoryProvider;
use crate::simulation::simulate;

/// One trading date per month, 13 consecutive months
fn monthly_dates() -> Vec<Date> {
    (0..13)
        .map(|i| {
            let year = 2023 + (i / 12) as i16;
            let month = (i % 12 + 1) as i8;
            date(year, month, 3)
        })
        .collect()
}

fn monthly_series() -> PortfolioReturnSeries {
    let returns: Vec<f64> = (0..12).map(|i| if i % 3 == 0 { -0.02 } else { 0.015 }).collect();
    let provider = InMemoryProvider::new().with_series(prices(
        "VT",
        &monthly_dates(),
        &closes_from_returns(&returns),
    ));
    let portfolio = PortfolioBuilder::new("World").holding("VT", 1.0).build().unwrap();
    aggregate(&provider, &portfolio, DateRange::all(), JoinPolicy::Lenient)
        .unwrap()
        .series
}

#[test]
fn test_thirteen_months_twelve_contributions() {
    let trajectory = simulate(&monthly_series(), 10_000.0, 500.0).unwrap();

    assert_eq!(trajectory.points.len(), 13);
    assert_eq!(trajectory.contribution_events().count(), 12);
    assert!(trajectory.contribution_events().all(|p| p.contribution == 500.0));
    assert_eq!(trajectory.last().unwrap().cumulative_contribution, 16_000.0);
}

#[test]
fn test_first_value_is_initial_investment() {
    let trajectory = simulate(&monthly_series(), 12_345.67, 500.0).unwrap();
    let first = trajectory.first().unwrap();
    assert_eq!(first.portfolio_value, 12_345.67);
    assert_eq!(first.contribution, 12_345.67);
    assert_eq!(first.cumulative_contribution, 12_345.67);
}

#[test]
fn test_zero_contribution_keeps_invested_flat() {
    let trajectory = simulate(&monthly_series(), 10_000.0, 0.0).unwrap();
    assert!(
        trajectory
            .points
            .iter()
            .all(|p| p.cumulative_contribution == 10_000.0)
    );
    assert_eq!(trajectory.contribution_events().count(), 0);
}

#[test]
fn test_value_recurrence_holds() {
    let trajectory = simulate(&monthly_series(), 10_000.0, 500.0).unwrap();
    for pair in trajectory.points.windows(2) {
        let expected = pair[0].portfolio_value * (1.0 + pair[1].daily_return) + pair[1].contribution;
        assert_eq!(pair[1].portfolio_value, expected);
    }
}

#[test]
fn test_dates_preserved_from_provider() {
    let trajectory = simulate(&monthly_series(), 10_000.0, 500.0).unwrap();
    let dates: Vec<Date> = trajectory.points.iter().map(|p| p.date).collect();
    assert_eq!(dates, monthly_dates());
}

#[test]
fn test_daily_calendar_contributes_on_first_trading_day() {
    // Jan 30 .. Feb 2 with the weekend gap; Feb 1 is the first February date
    let dates = [
        date(2024, 1, 30),
        date(2024, 1, 31),
        date(2024, 2, 1),
        date(2024, 2, 2),
    ];
    let provider = InMemoryProvider::new().with_series(prices(
        "VT",
        &dates,
        &closes_from_returns(&[0.01, 0.0, -0.01]),
    ));
    let portfolio = PortfolioBuilder::new("World").holding("VT", 1.0).build().unwrap();
    let series = aggregate(&provider, &portfolio, DateRange::all(), JoinPolicy::Lenient)
        .unwrap()
        .series;

    let trajectory = simulate(&series, 1_000.0, 100.0).unwrap();
    let contributions: Vec<f64> = trajectory.points.iter().map(|p| p.contribution).collect();
    assert_eq!(contributions, vec![1_000.0, 0.0, 100.0, 0.0]);

    let snapshots = trajectory.monthly_snapshots();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].date, date(2024, 1, 31));
    assert_eq!(snapshots[1].total_invested, 1_100.0);
}
