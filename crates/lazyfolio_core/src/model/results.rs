//! Result types produced by the engine

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::date_math::{MonthKey, days_between};
use crate::error::{AggregateError, Unavailable};
use crate::model::{PortfolioReturnSeries, Ticker};

/// A holding that was left out of a lenient aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentUnavailable {
    pub ticker: Ticker,
    pub weight: f64,
    #[serde(with = "unavailable_reason")]
    pub reason: Unavailable,
}

mod unavailable_reason {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::error::Unavailable;

    pub fn serialize<S: Serializer>(reason: &Unavailable, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(reason)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Unavailable, D::Error> {
        let text = String::deserialize(d)?;
        Ok(match text.as_str() {
            "unknown ticker" => Unavailable::UnknownTicker,
            "no price data" => Unavailable::NoData,
            other => Unavailable::Source(
                other
                    .strip_prefix("source error: ")
                    .unwrap_or(other)
                    .to_string(),
            ),
        })
    }
}

/// Portfolio return series plus a record of which holdings contributed.
///
/// Under the lenient join policy some holdings may be missing; callers
/// branch on [`AggregatedReturns::is_partial`] rather than inspecting logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedReturns {
    pub series: PortfolioReturnSeries,
    pub included: Vec<Ticker>,
    pub missing: Vec<InstrumentUnavailable>,
}

impl AggregatedReturns {
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.missing.is_empty()
    }

    /// Sum of the weights of the holdings that produced data
    #[must_use]
    pub fn covered_weight(&self, total_weight: f64) -> f64 {
        total_weight - self.missing.iter().map(|m| m.weight).sum::<f64>()
    }
}

/// One row of a growth trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub date: Date,
    pub daily_return: f64,
    /// External cash added on this date (initial investment on the first row)
    pub contribution: f64,
    pub cumulative_contribution: f64,
    pub portfolio_value: f64,
}

/// Day-by-day portfolio value with scheduled cash injections
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GrowthTrajectory {
    pub points: Vec<GrowthPoint>,
}

impl GrowthTrajectory {
    #[must_use]
    pub fn first(&self) -> Option<&GrowthPoint> {
        self.points.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&GrowthPoint> {
        self.points.last()
    }

    /// Monthly contributions made after the initial investment
    pub fn contribution_events(&self) -> impl Iterator<Item = &GrowthPoint> + '_ {
        self.points.iter().skip(1).filter(|p| p.contribution != 0.0)
    }

    /// Final value, money put in, and the resulting profit
    #[must_use]
    pub fn summary(&self) -> Option<GrowthSummary> {
        let first = self.first()?;
        let last = self.last()?;
        Some(GrowthSummary::new(
            first.date,
            last.date,
            last.portfolio_value,
            last.cumulative_contribution,
        ))
    }

    /// Last row of each calendar month
    #[must_use]
    pub fn monthly_snapshots(&self) -> Vec<MonthlySnapshot> {
        let mut snapshots: Vec<MonthlySnapshot> = Vec::new();
        for point in &self.points {
            let month = MonthKey::of(point.date);
            let snapshot = MonthlySnapshot::new(month, point);
            match snapshots.last_mut() {
                Some(last) if last.month == month => *last = snapshot,
                _ => snapshots.push(snapshot),
            }
        }
        snapshots
    }
}

/// Headline figures for a finished trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthSummary {
    pub start_date: Date,
    pub end_date: Date,
    pub calendar_days: i32,
    pub final_value: f64,
    pub total_invested: f64,
    pub profit: f64,
    /// `profit / total_invested` as a fraction
    pub roi: f64,
}

impl GrowthSummary {
    fn new(start_date: Date, end_date: Date, final_value: f64, total_invested: f64) -> Self {
        let profit = final_value - total_invested;
        Self {
            start_date,
            end_date,
            calendar_days: days_between(start_date, end_date),
            final_value,
            total_invested,
            profit,
            roi: profit / total_invested,
        }
    }
}

/// Month-end view of a trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlySnapshot {
    pub month: MonthKey,
    /// Last trading date observed in the month
    pub date: Date,
    pub portfolio_value: f64,
    pub total_invested: f64,
    pub profit: f64,
    pub roi: f64,
}

impl MonthlySnapshot {
    fn new(month: MonthKey, point: &GrowthPoint) -> Self {
        let profit = point.portfolio_value - point.cumulative_contribution;
        Self {
            month,
            date: point.date,
            portfolio_value: point.portfolio_value,
            total_invested: point.cumulative_contribution,
            profit,
            roi: profit / point.cumulative_contribution,
        }
    }
}

/// Annualised risk/return statistics for a return series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub annual_return: f64,
    pub annual_risk: f64,
    /// `annual_return / annual_risk`, or 0 when risk is 0
    pub sharpe: f64,
    /// Largest peak-to-trough decline as a non-positive fraction
    pub max_drawdown: f64,
    /// Growth over the whole series as a fraction
    pub total_return: f64,
    pub observations: usize,
}

/// Everything produced for a single-portfolio simulation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub portfolio: String,
    pub returns: AggregatedReturns,
    pub trajectory: GrowthTrajectory,
    pub stats: StatsSummary,
}

/// Aggregated returns and statistics for one compared portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub returns: AggregatedReturns,
    pub stats: StatsSummary,
}

/// One entry of a comparison, in the order the portfolios were requested
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonEntry {
    pub portfolio: String,
    pub outcome: Result<ComparisonReport, AggregateError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn point(d: Date, contribution: f64, cumulative: f64, value: f64) -> GrowthPoint {
        GrowthPoint {
            date: d,
            daily_return: 0.0,
            contribution,
            cumulative_contribution: cumulative,
            portfolio_value: value,
        }
    }

    fn trajectory() -> GrowthTrajectory {
        GrowthTrajectory {
            points: vec![
                point(date(2024, 1, 2), 1000.0, 1000.0, 1000.0),
                point(date(2024, 1, 31), 0.0, 1000.0, 1050.0),
                point(date(2024, 2, 1), 100.0, 1100.0, 1160.0),
                point(date(2024, 2, 29), 0.0, 1100.0, 1210.0),
            ],
        }
    }

    #[test]
    fn test_summary() {
        let summary = trajectory().summary().unwrap();
        assert_eq!(summary.final_value, 1210.0);
        assert_eq!(summary.total_invested, 1100.0);
        assert!((summary.profit - 110.0).abs() < 1e-9);
        assert!((summary.roi - 0.1).abs() < 1e-12);
        assert_eq!(summary.calendar_days, 58);
    }

    #[test]
    fn test_monthly_snapshots_take_last_row() {
        let snapshots = trajectory().monthly_snapshots();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].date, date(2024, 1, 31));
        assert_eq!(snapshots[0].portfolio_value, 1050.0);
        assert_eq!(snapshots[1].month, MonthKey { year: 2024, month: 2 });
        assert!((snapshots[1].profit - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_contribution_events_skip_initial() {
        let t = trajectory();
        let events: Vec<Date> = t.contribution_events().map(|p| p.date).collect();
        assert_eq!(events, vec![date(2024, 2, 1)]);
    }

    #[test]
    fn test_empty_trajectory_has_no_summary() {
        assert!(GrowthTrajectory::default().summary().is_none());
        assert!(GrowthTrajectory::default().monthly_snapshots().is_empty());
    }

    #[test]
    fn test_missing_reason_serializes_as_text() {
        let missing = InstrumentUnavailable {
            ticker: Ticker::new("TIP"),
            weight: 0.33,
            reason: Unavailable::Source("bad row".to_string()),
        };
        let json = serde_json::to_string(&missing).unwrap();
        assert!(json.contains("\"source error: bad row\""));
        let back: InstrumentUnavailable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, missing);
    }
}
