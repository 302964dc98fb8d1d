//! Fluent builders for portfolios and catalogs
//!
//! Validation is deferred to `build()` so chains read top to bottom without
//! intermediate `?`.

use rustc_hash::FxHashMap;

use super::PortfolioCatalog;
use crate::error::ParameterError;
use crate::model::{Holding, InstrumentInfo, PortfolioDefinition, Ticker};

/// Builder for a single [`PortfolioDefinition`]
#[derive(Debug, Clone)]
pub struct PortfolioBuilder {
    name: String,
    holdings: Vec<Holding>,
}

impl PortfolioBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            holdings: Vec::new(),
        }
    }

    /// Add a holding; weight is a fraction of capital (0.6 = 60%)
    #[must_use]
    pub fn holding(mut self, ticker: impl Into<Ticker>, weight: f64) -> Self {
        self.holdings.push(Holding {
            ticker: ticker.into(),
            weight,
        });
        self
    }

    pub fn build(self) -> Result<PortfolioDefinition, ParameterError> {
        PortfolioDefinition::new(self.name, self.holdings)
    }
}

/// Builder for a [`PortfolioCatalog`]
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    instruments: FxHashMap<Ticker, InstrumentInfo>,
    portfolios: Vec<PortfolioBuilder>,
}

impl CatalogBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn instrument(
        mut self,
        ticker: impl Into<Ticker>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        self.instruments.insert(
            ticker.into(),
            InstrumentInfo {
                description: description.into(),
                category: category.into(),
            },
        );
        self
    }

    #[must_use]
    pub fn portfolio(mut self, portfolio: PortfolioBuilder) -> Self {
        self.portfolios.push(portfolio);
        self
    }

    pub fn build(self) -> Result<PortfolioCatalog, ParameterError> {
        let portfolios = self
            .portfolios
            .into_iter()
            .map(PortfolioBuilder::build)
            .collect::<Result<Vec<_>, _>>()?;
        PortfolioCatalog::new(portfolios, self.instruments)
    }
}
