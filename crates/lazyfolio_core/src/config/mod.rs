//! Engine configuration
//!
//! The [`PortfolioCatalog`] is immutable and injected into the engine at
//! construction; per-request inputs live in [`SimulationRequest`].
//!
//! # Builder DSL
//!
//! ```ignore
//! use lazyfolio_core::config::{CatalogBuilder, PortfolioBuilder};
//!
//! let catalog = CatalogBuilder::new()
//!     .instrument("VT", "Vanguard Total World Stock ETF", "Global Stocks")
//!     .instrument("BND", "Vanguard Total Bond Market Fund", "Bonds")
//!     .portfolio(PortfolioBuilder::new("Two-fund Portfolio")
//!         .holding("VT", 0.60)
//!         .holding("BND", 0.40))
//!     .build()?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ParameterError;
use crate::model::DateRange;

pub mod builder;
pub mod catalog;

pub use builder::{CatalogBuilder, PortfolioBuilder};
pub use catalog::PortfolioCatalog;

/// How per-ticker return columns are joined by date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinPolicy {
    /// Union of dates; a ticker absent on a date contributes 0 that day.
    /// Unavailable tickers are skipped and reported.
    #[default]
    Lenient,
    /// Intersection of price dates; any unavailable ticker fails the request.
    Strict,
}

/// Inputs for simulating one catalog portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub portfolio: String,
    #[serde(default)]
    pub range: DateRange,
    pub initial_investment: f64,
    #[serde(default)]
    pub monthly_contribution: f64,
}

impl SimulationRequest {
    #[must_use]
    pub fn new(portfolio: impl Into<String>, range: DateRange) -> Self {
        Self {
            portfolio: portfolio.into(),
            range,
            initial_investment: 10_000.0,
            monthly_contribution: 500.0,
        }
    }

    #[must_use]
    pub fn initial_investment(mut self, amount: f64) -> Self {
        self.initial_investment = amount;
        self
    }

    #[must_use]
    pub fn monthly_contribution(mut self, amount: f64) -> Self {
        self.monthly_contribution = amount;
        self
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        self.range.validate()?;
        validate_amounts(self.initial_investment, self.monthly_contribution)
    }
}

/// Check the cash-flow parameters of a growth simulation
pub fn validate_amounts(
    initial_investment: f64,
    monthly_contribution: f64,
) -> Result<(), ParameterError> {
    if !initial_investment.is_finite() {
        return Err(ParameterError::NonFiniteAmount("initial investment"));
    }
    if !monthly_contribution.is_finite() {
        return Err(ParameterError::NonFiniteAmount("monthly contribution"));
    }
    if initial_investment <= 0.0 {
        return Err(ParameterError::NonPositiveInitialInvestment(
            initial_investment,
        ));
    }
    if monthly_contribution < 0.0 {
        return Err(ParameterError::NegativeContribution(monthly_contribution));
    }
    Ok(())
}
