//! Fixed-allocation portfolio definitions

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::ParameterError;
use crate::model::Ticker;

/// One ticker and its target weight (fraction of capital)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub ticker: Ticker,
    pub weight: f64,
}

/// A named set of holdings with fixed target weights.
///
/// Weights apply to each holding's own return stream; no rebalancing is
/// modelled. Holdings keep the order they were declared in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPortfolio")]
pub struct PortfolioDefinition {
    name: String,
    holdings: Vec<Holding>,
}

#[derive(Deserialize)]
struct RawPortfolio {
    name: String,
    holdings: Vec<Holding>,
}

impl TryFrom<RawPortfolio> for PortfolioDefinition {
    type Error = ParameterError;

    fn try_from(raw: RawPortfolio) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.holdings)
    }
}

impl PortfolioDefinition {
    /// Validate and build a definition.
    ///
    /// Weights must be positive and finite, tickers unique, and the set non-empty.
    pub fn new(name: impl Into<String>, holdings: Vec<Holding>) -> Result<Self, ParameterError> {
        let name = name.into();
        if holdings.is_empty() {
            return Err(ParameterError::EmptyPortfolio(name));
        }

        let mut seen = FxHashSet::default();
        for holding in &holdings {
            if !holding.weight.is_finite() || holding.weight <= 0.0 {
                return Err(ParameterError::NonPositiveWeight {
                    ticker: holding.ticker.clone(),
                    weight: holding.weight,
                });
            }
            if !seen.insert(&holding.ticker) {
                return Err(ParameterError::DuplicateTicker(holding.ticker.clone()));
            }
        }

        let total = holdings.iter().map(|h| h.weight).sum::<f64>();
        if (total - 1.0).abs() > 1e-6 {
            tracing::warn!(portfolio = %name, total_weight = total, "portfolio weights do not sum to 1");
        }

        Ok(Self { name, holdings })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    #[must_use]
    pub fn weight_of(&self, ticker: &Ticker) -> Option<f64> {
        self.holdings
            .iter()
            .find(|h| &h.ticker == ticker)
            .map(|h| h.weight)
    }

    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.holdings.iter().map(|h| h.weight).sum()
    }
}

/// Display metadata for an instrument; never used by the numeric engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentInfo {
    pub description: String,
    pub category: String,
}

/// One row of a portfolio composition table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionRow {
    pub ticker: Ticker,
    pub description: String,
    pub category: String,
    pub weight: f64,
}

/// Total weight held in one asset category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAllocation {
    pub category: String,
    pub weight: f64,
}
