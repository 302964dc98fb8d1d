//! Scenario tests for the lazyfolio engine
//!
//! Tests are organized by topic:
//! - `aggregation` - Weighted returns, cumulative index, partial coverage
//! - `growth` - Contribution scheduling and value compounding end to end
//! - `comparison` - Multi-portfolio requests and ordering
//! - `engine` - Whole-request validation and catalog lookups

mod comparison;
mod growth;

use jiff::civil::Date;

use crate::model::{PricePoint, PriceSeries, Ticker};

/// Build a price series from closes on consecutive entries of `dates`
pub(crate) fn prices(ticker: &str, dates: &[Date], closes: &[f64]) -> PriceSeries {
    PriceSeries::new(
        Ticker::new(ticker),
        dates
            .iter()
            .zip(closes)
            .map(|(&date, &close)| PricePoint { date, close })
            .collect(),
    )
    .unwrap()
}

/// Build closes that realise the given returns after a starting close of 100
pub(crate) fn closes_from_returns(returns: &[f64]) -> Vec<f64> {
    let mut close = 100.0;
    let mut closes = vec![close];
    for r in returns {
        close *= 1.0 + r;
        closes.push(close);
    }
    closes
}
