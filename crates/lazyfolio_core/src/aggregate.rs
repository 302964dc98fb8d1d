//! Portfolio return aggregation
//!
//! Turns per-ticker price series into one weighted daily-return series and its
//! 100-based cumulative index. The join across tickers is explicit and chosen
//! by [`JoinPolicy`]:
//!
//! - `Lenient`: dates are the union of every available ticker's dates. On a
//!   date where a ticker has no return (absent row, or its first observation)
//!   it contributes 0. Unavailable tickers are skipped and listed in
//!   [`AggregatedReturns::missing`].
//! - `Strict`: every ticker must be available. Prices are restricted to the
//!   dates common to all tickers before returns are computed, so each return
//!   spans the same interval for every holding.
//!
//! Returns are computed over the history preceding the window as well, so the
//! first day of the window keeps its return against the prior close. Only a
//! ticker's very first observation has no return.

use std::collections::BTreeMap;

use jiff::civil::Date;
use rustc_hash::FxHashMap;

use crate::config::JoinPolicy;
use crate::error::{AggregateError, Unavailable};
use crate::model::{
    AggregatedReturns, DateRange, InstrumentUnavailable, PortfolioDefinition,
    PortfolioReturnSeries, PriceSeries, ReturnPoint, Ticker,
};
use crate::provider::PriceSeriesProvider;

/// Aggregate a portfolio's holdings into a single return series.
///
/// Returns `PortfolioUnavailable` only when no holding yields any data.
pub fn aggregate<P: PriceSeriesProvider + ?Sized>(
    provider: &P,
    portfolio: &PortfolioDefinition,
    range: DateRange,
    policy: JoinPolicy,
) -> Result<AggregatedReturns, AggregateError> {
    range.validate()?;

    let fetched = fetch_holdings(provider, portfolio, range);
    let result = match policy {
        JoinPolicy::Lenient => join_union(fetched, range),
        JoinPolicy::Strict => join_intersection(fetched, range),
    }?;

    tracing::debug!(
        portfolio = portfolio.name(),
        rows = result.series.len(),
        included = result.included.len(),
        missing = result.missing.len(),
        "aggregated portfolio returns"
    );
    Ok(result)
}

/// Each holding's weight with either its series or the reason it is missing
struct Fetched {
    ticker: Ticker,
    weight: f64,
    series: Result<PriceSeries, Unavailable>,
}

fn fetch_holdings<P: PriceSeriesProvider + ?Sized>(
    provider: &P,
    portfolio: &PortfolioDefinition,
    range: DateRange,
) -> Vec<Fetched> {
    // Everything up to the end of the window, for the lookback close
    let history = DateRange {
        start: None,
        end: range.end,
    };
    portfolio
        .holdings()
        .iter()
        .map(|holding| {
            let series = provider
                .get_series(&holding.ticker, history)
                .and_then(|series| {
                    if series.points().iter().any(|p| range.contains(p.date)) {
                        Ok(series)
                    } else {
                        Err(Unavailable::NoData)
                    }
                });
            Fetched {
                ticker: holding.ticker.clone(),
                weight: holding.weight,
                series,
            }
        })
        .collect()
}

fn join_union(
    fetched: Vec<Fetched>,
    range: DateRange,
) -> Result<AggregatedReturns, AggregateError> {
    let mut table: BTreeMap<Date, f64> = BTreeMap::new();
    let mut included = Vec::new();
    let mut missing = Vec::new();

    for Fetched {
        ticker,
        weight,
        series,
    } in fetched
    {
        match series {
            Ok(series) => {
                for point in in_window(series.returns(), range) {
                    *table.entry(point.date).or_insert(0.0) +=
                        point.daily_return.unwrap_or(0.0) * weight;
                }
                included.push(ticker);
            }
            Err(reason) => {
                tracing::warn!(ticker = %ticker, reason = %reason, "skipping unavailable holding");
                missing.push(InstrumentUnavailable {
                    ticker,
                    weight,
                    reason,
                });
            }
        }
    }

    if included.is_empty() {
        return Err(AggregateError::PortfolioUnavailable);
    }

    Ok(AggregatedReturns {
        series: into_series(table)?,
        included,
        missing,
    })
}

fn join_intersection(
    fetched: Vec<Fetched>,
    range: DateRange,
) -> Result<AggregatedReturns, AggregateError> {
    let mut available = Vec::with_capacity(fetched.len());
    for Fetched {
        ticker,
        weight,
        series,
    } in fetched
    {
        match series {
            Ok(series) => available.push((ticker, weight, series)),
            Err(reason) => return Err(AggregateError::MissingInstrumentData { ticker, reason }),
        }
    }

    if available.is_empty() {
        return Err(AggregateError::PortfolioUnavailable);
    }

    // Series dates are unique, so a count equal to the holding count means
    // every holding traded that day
    let mut seen: FxHashMap<Date, usize> = FxHashMap::default();
    for (_, _, series) in &available {
        for point in series.points() {
            *seen.entry(point.date).or_insert(0) += 1;
        }
    }
    let holding_count = available.len();
    let is_common = |date: Date| seen.get(&date) == Some(&holding_count);

    let mut table: BTreeMap<Date, f64> = BTreeMap::new();
    let mut included = Vec::with_capacity(holding_count);
    for (ticker, weight, series) in available {
        for point in in_window(series.retain_dates(is_common).returns(), range) {
            *table.entry(point.date).or_insert(0.0) += point.daily_return.unwrap_or(0.0) * weight;
        }
        included.push(ticker);
    }

    if table.is_empty() {
        return Err(AggregateError::NoCommonDates);
    }

    Ok(AggregatedReturns {
        series: into_series(table)?,
        included,
        missing: Vec::new(),
    })
}

fn in_window(returns: Vec<ReturnPoint>, range: DateRange) -> impl Iterator<Item = ReturnPoint> {
    returns.into_iter().filter(move |p| range.contains(p.date))
}

fn into_series(table: BTreeMap<Date, f64>) -> Result<PortfolioReturnSeries, AggregateError> {
    // BTreeMap keys are unique and ascending, so ordering cannot fail here
    PortfolioReturnSeries::from_returns(table).map_err(|_| AggregateError::PortfolioUnavailable)
}
