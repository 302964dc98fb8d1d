//! Request-level entry points
//!
//! [`Engine`] owns the injected provider, catalog and join policy. Every call
//! is a pure computation over freshly fetched data; nothing is cached between
//! requests.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use jiff::civil::Date;

use crate::aggregate::aggregate;
use crate::config::{JoinPolicy, PortfolioCatalog, SimulationRequest};
use crate::error::{AggregateError, RequestError, Unavailable};
use crate::metrics::compute_stats;
use crate::model::{
    AggregatedReturns, ComparisonEntry, ComparisonReport, DateRange, Holding,
    PortfolioDefinition, PortfolioReport, PortfolioReturnSeries, Ticker,
};
use crate::provider::PriceSeriesProvider;
use crate::simulation::simulate;

pub struct Engine<P> {
    provider: P,
    catalog: PortfolioCatalog,
    policy: JoinPolicy,
}

impl<P: PriceSeriesProvider> Engine<P> {
    #[must_use]
    pub fn new(provider: P, catalog: PortfolioCatalog) -> Self {
        Self {
            provider,
            catalog,
            policy: JoinPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_join_policy(mut self, policy: JoinPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &PortfolioCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn join_policy(&self) -> JoinPolicy {
        self.policy
    }

    /// Aggregate an explicit portfolio definition over `range`.
    pub fn aggregate(
        &self,
        portfolio: &PortfolioDefinition,
        range: DateRange,
    ) -> Result<AggregatedReturns, AggregateError> {
        aggregate(&self.provider, portfolio, range, self.policy)
    }

    /// Aggregate a catalog portfolio by name.
    pub fn aggregate_named(
        &self,
        name: &str,
        range: DateRange,
    ) -> Result<AggregatedReturns, AggregateError> {
        let portfolio = self.catalog.get(name)?;
        self.aggregate(portfolio, range)
    }

    /// Validate, aggregate, simulate growth and compute statistics.
    pub fn run(&self, request: &SimulationRequest) -> Result<PortfolioReport, RequestError> {
        request.validate()?;
        let returns = self.aggregate_named(&request.portfolio, request.range)?;
        let trajectory = simulate(
            &returns.series,
            request.initial_investment,
            request.monthly_contribution,
        )?;
        let stats = compute_stats(&returns.series)?;

        tracing::info!(
            portfolio = %request.portfolio,
            rows = trajectory.points.len(),
            partial = returns.is_partial(),
            "simulation finished"
        );

        Ok(PortfolioReport {
            portfolio: request.portfolio.clone(),
            returns,
            trajectory,
            stats,
        })
    }

    /// Aggregate and score several catalog portfolios.
    ///
    /// Entries come back in request order. A failure for one portfolio is
    /// recorded in its entry and never stops the others.
    pub fn compare<S: AsRef<str> + Sync>(
        &self,
        portfolios: &[S],
        range: DateRange,
    ) -> Vec<ComparisonEntry> {
        #[cfg(feature = "parallel")]
        let entries = portfolios
            .par_iter()
            .map(|name| self.compare_one(name.as_ref(), range))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let entries = portfolios
            .iter()
            .map(|name| self.compare_one(name.as_ref(), range))
            .collect();

        entries
    }

    fn compare_one(&self, name: &str, range: DateRange) -> ComparisonEntry {
        let outcome = self.aggregate_named(name, range).and_then(|returns| {
            // Aggregation never yields an empty series, so stats cannot fail here
            let stats =
                compute_stats(&returns.series).map_err(|_| AggregateError::PortfolioUnavailable)?;
            Ok(ComparisonReport { returns, stats })
        });

        if let Err(err) = &outcome {
            tracing::warn!(portfolio = name, error = %err, "portfolio skipped in comparison");
        }

        ComparisonEntry {
            portfolio: name.to_string(),
            outcome,
        }
    }

    /// Daily returns and cumulative index of a single instrument.
    pub fn instrument_returns(
        &self,
        ticker: &Ticker,
        range: DateRange,
    ) -> Result<PortfolioReturnSeries, AggregateError> {
        let single = PortfolioDefinition::new(
            ticker.to_string(),
            vec![Holding {
                ticker: ticker.clone(),
                weight: 1.0,
            }],
        )?;
        aggregate(&self.provider, &single, range, JoinPolicy::Strict).map(|r| r.series)
    }

    /// First and last dates the provider holds for `ticker`.
    pub fn available_range(&self, ticker: &Ticker) -> Result<(Date, Date), Unavailable> {
        let series = self.provider.get_series(ticker, DateRange::all())?;
        match (series.first_date(), series.last_date()) {
            (Some(first), Some(last)) => Ok((first, last)),
            _ => Err(Unavailable::NoData),
        }
    }
}
