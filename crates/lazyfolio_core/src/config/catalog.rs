//! Immutable catalog of named portfolios and instrument metadata

use rustc_hash::FxHashMap;

use crate::config::{CatalogBuilder, PortfolioBuilder};
use crate::error::{LookupError, ParameterError};
use crate::model::{
    CategoryAllocation, CompositionRow, InstrumentInfo, PortfolioDefinition, Ticker,
};

const UNKNOWN_CATEGORY: &str = "Other";

/// Named portfolios in declaration order, plus display metadata per ticker
#[derive(Debug, Clone, Default)]
pub struct PortfolioCatalog {
    portfolios: Vec<PortfolioDefinition>,
    by_name: FxHashMap<String, usize>,
    instruments: FxHashMap<Ticker, InstrumentInfo>,
}

impl PortfolioCatalog {
    /// Build a catalog, rejecting duplicate portfolio names.
    pub fn new(
        portfolios: Vec<PortfolioDefinition>,
        instruments: FxHashMap<Ticker, InstrumentInfo>,
    ) -> Result<Self, ParameterError> {
        let mut by_name = FxHashMap::default();
        for (idx, portfolio) in portfolios.iter().enumerate() {
            if by_name.insert(portfolio.name().to_string(), idx).is_some() {
                return Err(ParameterError::DuplicatePortfolio(
                    portfolio.name().to_string(),
                ));
            }
        }
        Ok(Self {
            portfolios,
            by_name,
            instruments,
        })
    }

    /// The classic Bogleheads lazy portfolios
    pub fn bogleheads() -> Result<Self, ParameterError> {
        CatalogBuilder::new()
            .instrument("VT", "Vanguard Total World Stock ETF", "Global Stocks")
            .instrument("BND", "Vanguard Total Bond Market Fund", "Bonds")
            .instrument("VTI", "Vanguard Total Stock Market Fund", "US Stocks")
            .instrument(
                "VXUS",
                "Vanguard Total International Stock Fund",
                "International Stocks",
            )
            .instrument("ITOT", "iShares Total US Stock Market Fund", "US Stocks")
            .instrument("IXUS", "iShares International Stock Fund", "International Stocks")
            .instrument("TIP", "Inflation-Protected Securities Fund", "TIPS Bonds")
            .portfolio(
                PortfolioBuilder::new("Two-fund Portfolio")
                    .holding("VT", 0.60)
                    .holding("BND", 0.40),
            )
            .portfolio(
                PortfolioBuilder::new("Taylor Larimore's Three-Fund Portfolio")
                    .holding("VTI", 0.34)
                    .holding("VXUS", 0.33)
                    .holding("BND", 0.33),
            )
            .portfolio(
                PortfolioBuilder::new("Scott Burns' Margarita Portfolio")
                    .holding("ITOT", 0.34)
                    .holding("IXUS", 0.33)
                    .holding("TIP", 0.33),
            )
            .portfolio(
                PortfolioBuilder::new("Rick Ferri's Lazy Three-Fund Portfolio")
                    .holding("VTI", 0.40)
                    .holding("VXUS", 0.20)
                    .holding("BND", 0.40),
            )
            .build()
    }

    pub fn get(&self, name: &str) -> Result<&PortfolioDefinition, LookupError> {
        self.by_name
            .get(name)
            .map(|&idx| &self.portfolios[idx])
            .ok_or_else(|| LookupError::PortfolioNotFound(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.portfolios.iter().map(PortfolioDefinition::name)
    }

    pub fn portfolios(&self) -> &[PortfolioDefinition] {
        &self.portfolios
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.portfolios.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.portfolios.is_empty()
    }

    #[must_use]
    pub fn instrument(&self, ticker: &Ticker) -> Option<&InstrumentInfo> {
        self.instruments.get(ticker)
    }

    /// Human-readable name, falling back to the ticker itself
    #[must_use]
    pub fn describe<'a>(&'a self, ticker: &'a Ticker) -> &'a str {
        self.instruments
            .get(ticker)
            .map_or(ticker.as_str(), |info| info.description.as_str())
    }

    #[must_use]
    pub fn category<'a>(&'a self, ticker: &Ticker) -> &'a str {
        self.instruments
            .get(ticker)
            .map_or(UNKNOWN_CATEGORY, |info| info.category.as_str())
    }

    /// Holdings of a portfolio joined with their display metadata
    #[must_use]
    pub fn composition(&self, portfolio: &PortfolioDefinition) -> Vec<CompositionRow> {
        portfolio
            .holdings()
            .iter()
            .map(|h| CompositionRow {
                ticker: h.ticker.clone(),
                description: self.describe(&h.ticker).to_string(),
                category: self.category(&h.ticker).to_string(),
                weight: h.weight,
            })
            .collect()
    }

    /// Weights summed per category, in order of first appearance
    #[must_use]
    pub fn allocation_by_category(&self, portfolio: &PortfolioDefinition) -> Vec<CategoryAllocation> {
        let mut allocations: Vec<CategoryAllocation> = Vec::new();
        for holding in portfolio.holdings() {
            let category = self.category(&holding.ticker);
            match allocations.iter_mut().find(|a| a.category == category) {
                Some(existing) => existing.weight += holding.weight,
                None => allocations.push(CategoryAllocation {
                    category: category.to_string(),
                    weight: holding.weight,
                }),
            }
        }
        allocations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bogleheads_catalog() {
        let catalog = PortfolioCatalog::bogleheads().unwrap();
        assert_eq!(catalog.len(), 4);
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(names[0], "Two-fund Portfolio");
        assert_eq!(names[3], "Rick Ferri's Lazy Three-Fund Portfolio");

        for portfolio in catalog.portfolios() {
            assert!((portfolio.total_weight() - 1.0).abs() < 1e-9, "{}", portfolio.name());
        }
    }

    #[test]
    fn test_lookup_missing_portfolio() {
        let catalog = PortfolioCatalog::bogleheads().unwrap();
        assert_eq!(
            catalog.get("Golden Butterfly").unwrap_err(),
            LookupError::PortfolioNotFound("Golden Butterfly".to_string())
        );
    }

    #[test]
    fn test_metadata_fallbacks() {
        let catalog = PortfolioCatalog::bogleheads().unwrap();
        let unknown = Ticker::new("GLD");
        assert_eq!(catalog.describe(&unknown), "GLD");
        assert_eq!(catalog.category(&unknown), "Other");
        assert_eq!(catalog.category(&Ticker::new("TIP")), "TIPS Bonds");
    }

    #[test]
    fn test_allocation_by_category_merges() {
        let catalog = PortfolioCatalog::bogleheads().unwrap();
        let margarita = catalog.get("Scott Burns' Margarita Portfolio").unwrap();
        let allocation = catalog.allocation_by_category(margarita);
        assert_eq!(allocation.len(), 3);
        assert_eq!(allocation[0].category, "US Stocks");

        let custom = PortfolioDefinition::new(
            "US heavy",
            vec![
                crate::model::Holding {
                    ticker: Ticker::new("VTI"),
                    weight: 0.5,
                },
                crate::model::Holding {
                    ticker: Ticker::new("ITOT"),
                    weight: 0.5,
                },
            ],
        )
        .unwrap();
        let allocation = catalog.allocation_by_category(&custom);
        assert_eq!(allocation.len(), 1);
        assert!((allocation[0].weight - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_composition_rows() {
        let catalog = PortfolioCatalog::bogleheads().unwrap();
        let two_fund = catalog.get("Two-fund Portfolio").unwrap();
        let rows = catalog.composition(two_fund);
        assert_eq!(rows[0].description, "Vanguard Total World Stock ETF");
        assert_eq!(rows[1].category, "Bonds");
        assert_eq!(rows[1].weight, 0.40);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let def = PortfolioDefinition::new(
            "Same",
            vec![crate::model::Holding {
                ticker: Ticker::new("VT"),
                weight: 1.0,
            }],
        )
        .unwrap();
        let err = PortfolioCatalog::new(vec![def.clone(), def], FxHashMap::default()).unwrap_err();
        assert_eq!(err, ParameterError::DuplicatePortfolio("Same".to_string()));
    }
}
