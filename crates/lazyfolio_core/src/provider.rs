//! Price series sources
//!
//! The engine never reads files or talks to the network itself. It asks a
//! [`PriceSeriesProvider`] for each ticker and treats [`Unavailable`] as a
//! normal outcome.

use rustc_hash::FxHashMap;

use crate::error::Unavailable;
use crate::model::{DateRange, PriceSeries, Ticker};

/// Supplies clean, ascending, deduplicated daily closes for a ticker.
///
/// Implementations must be shareable across threads: comparisons may fetch
/// several portfolios concurrently.
pub trait PriceSeriesProvider: Send + Sync {
    /// Series restricted to `range`, or why the ticker cannot be supplied.
    fn get_series(&self, ticker: &Ticker, range: DateRange) -> Result<PriceSeries, Unavailable>;
}

impl<P: PriceSeriesProvider + ?Sized> PriceSeriesProvider for &P {
    fn get_series(&self, ticker: &Ticker, range: DateRange) -> Result<PriceSeries, Unavailable> {
        (**self).get_series(ticker, range)
    }
}

impl<P: PriceSeriesProvider + ?Sized> PriceSeriesProvider for Box<P> {
    fn get_series(&self, ticker: &Ticker, range: DateRange) -> Result<PriceSeries, Unavailable> {
        (**self).get_series(ticker, range)
    }
}

/// Provider backed by series held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    series: FxHashMap<Ticker, PriceSeries>,
}

impl InMemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the series for its ticker
    #[must_use]
    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.insert(series);
        self
    }

    pub fn insert(&mut self, series: PriceSeries) {
        self.series.insert(series.ticker().clone(), series);
    }
}

impl PriceSeriesProvider for InMemoryProvider {
    fn get_series(&self, ticker: &Ticker, range: DateRange) -> Result<PriceSeries, Unavailable> {
        let series = self.series.get(ticker).ok_or(Unavailable::UnknownTicker)?;
        let restricted = series.within(range);
        if restricted.is_empty() {
            return Err(Unavailable::NoData);
        }
        Ok(restricted)
    }
}
