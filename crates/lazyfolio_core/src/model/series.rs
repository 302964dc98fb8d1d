//! Date-indexed price and return series
//!
//! All series here are strictly increasing by date. Constructors enforce the
//! ordering so downstream code can rely on it without re-sorting.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::ParameterError;
use crate::model::Ticker;

/// Inclusive date window; an open bound means "from the start" / "to the end"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<Date>,
    pub end: Option<Date>,
}

impl DateRange {
    /// Unbounded range covering every observation
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Closed range, rejected if `end < start`
    pub fn new(start: Date, end: Date) -> Result<Self, ParameterError> {
        let range = Self {
            start: Some(start),
            end: Some(end),
        };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if end < start => {
                Err(ParameterError::InvertedDateRange { start, end })
            }
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// A single closing price observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: Date,
    pub close: f64,
}

/// Daily observation with the return since the previous observation.
///
/// `daily_return` is `None` for the first observation of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPoint {
    pub date: Date,
    pub close: f64,
    pub daily_return: Option<f64>,
}

/// Chronologically ordered closing prices for one ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    ticker: Ticker,
    points: Vec<PricePoint>,
}

/// Returned when price points are not strictly increasing by date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnorderedDates {
    pub previous: Date,
    pub next: Date,
}

impl std::fmt::Display for UnorderedDates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "date {} does not follow {}", self.next, self.previous)
    }
}

impl std::error::Error for UnorderedDates {}

impl PriceSeries {
    /// Build a series from points that are already strictly increasing by date.
    pub fn new(ticker: Ticker, points: Vec<PricePoint>) -> Result<Self, UnorderedDates> {
        if let Some(pair) = points.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(UnorderedDates {
                previous: pair[0].date,
                next: pair[1].date,
            });
        }
        Ok(Self { ticker, points })
    }

    /// Build a series from unordered points, sorting by date.
    ///
    /// When a date appears more than once the later point wins.
    #[must_use]
    pub fn from_unordered(ticker: Ticker, mut points: Vec<PricePoint>) -> Self {
        // Stable sort keeps input order among equal dates
        points.sort_by_key(|p| p.date);
        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }
        Self {
            ticker,
            points: deduped,
        }
    }

    #[must_use]
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn first_date(&self) -> Option<Date> {
        self.points.first().map(|p| p.date)
    }

    #[must_use]
    pub fn last_date(&self) -> Option<Date> {
        self.points.last().map(|p| p.date)
    }

    /// Restrict to observations inside `range`.
    #[must_use]
    pub fn within(&self, range: DateRange) -> Self {
        Self {
            ticker: self.ticker.clone(),
            points: self
                .points
                .iter()
                .filter(|p| range.contains(p.date))
                .copied()
                .collect(),
        }
    }

    /// Keep only the observations whose dates satisfy `keep`.
    #[must_use]
    pub fn retain_dates(&self, keep: impl Fn(Date) -> bool) -> Self {
        Self {
            ticker: self.ticker.clone(),
            points: self.points.iter().filter(|p| keep(p.date)).copied().collect(),
        }
    }

    /// Daily simple returns: `close[t] / close[t-1] - 1`, absent for the first row.
    #[must_use]
    pub fn returns(&self) -> Vec<ReturnPoint> {
        let mut previous: Option<f64> = None;
        self.points
            .iter()
            .map(|p| {
                let daily_return = previous.map(|prev| p.close / prev - 1.0);
                previous = Some(p.close);
                ReturnPoint {
                    date: p.date,
                    close: p.close,
                    daily_return,
                }
            })
            .collect()
    }
}

/// One row of a portfolio return series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReturnPoint {
    pub date: Date,
    /// Sum of weighted holding returns (fractional, 0.01 = 1%)
    pub daily_return: f64,
    /// `100 * prod(1 + r)` over all rows up to and including this one
    pub cumulative_return: f64,
}

/// Portfolio daily returns with a 100-based cumulative index
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PortfolioReturnSeries {
    points: Vec<PortfolioReturnPoint>,
}

impl PortfolioReturnSeries {
    /// Build from `(date, daily_return)` pairs, computing the cumulative index.
    pub fn from_returns(
        returns: impl IntoIterator<Item = (Date, f64)>,
    ) -> Result<Self, UnorderedDates> {
        let mut growth = 1.0;
        let points: Vec<PortfolioReturnPoint> = returns
            .into_iter()
            .map(|(date, daily_return)| {
                growth *= 1.0 + daily_return;
                PortfolioReturnPoint {
                    date,
                    daily_return,
                    cumulative_return: 100.0 * growth,
                }
            })
            .collect();

        if let Some(pair) = points.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(UnorderedDates {
                previous: pair[0].date,
                next: pair[1].date,
            });
        }
        Ok(Self { points })
    }

    #[must_use]
    pub fn points(&self) -> &[PortfolioReturnPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.points.iter().map(|p| p.date)
    }

    pub fn daily_returns(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.daily_return)
    }

    pub fn cumulative_returns(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.cumulative_return)
    }
}
