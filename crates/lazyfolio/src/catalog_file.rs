//! YAML catalog of instruments and portfolios
//!
//! ```yaml
//! instruments:
//!   VT:
//!     file: HistoricalPrices_VT.csv
//!     description: Vanguard Total World Stock ETF
//!     category: Global Stocks
//! portfolios:
//!   - name: World Only
//!     holdings:
//!       - { ticker: VT, weight: 1.0 }
//! ```
//!
//! Instruments without a `file` keep the built-in file mapping.

use std::collections::{BTreeMap, HashMap};

use lazyfolio_core::error::ParameterError;
use lazyfolio_core::model::{InstrumentInfo, PortfolioDefinition, Ticker};
use lazyfolio_core::PortfolioCatalog;
use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Price export file for each ticker of the built-in catalog
const BUILTIN_FILES: &[(&str, &str)] = &[
    ("VT", "HistoricalPrices_VT.csv"),
    ("BND", "HistoricalPrices_VBTLX.csv"),
    ("VTI", "HistoricalPrices_VTSAX.csv"),
    ("ITOT", "HistoricalPrices_VTSAX.csv"),
    ("VXUS", "HistoricalPrices_VTIAX.csv"),
    ("IXUS", "HistoricalPrices_VTIAX.csv"),
    ("TIP", "HistoricalPrices_VAIPX.csv"),
];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstrumentEntry {
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// On-disk layout of a catalog file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub instruments: BTreeMap<String, InstrumentEntry>,
    #[serde(default)]
    pub portfolios: Vec<PortfolioDefinition>,
}

/// A catalog together with the price file of each ticker
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: PortfolioCatalog,
    pub files: HashMap<Ticker, String>,
}

pub fn builtin_files() -> HashMap<Ticker, String> {
    BUILTIN_FILES
        .iter()
        .map(|(ticker, file)| (Ticker::new(ticker), (*file).to_string()))
        .collect()
}

/// The Bogleheads catalog with its default price files
pub fn builtin() -> Result<LoadedCatalog, ParameterError> {
    Ok(LoadedCatalog {
        catalog: PortfolioCatalog::bogleheads()?,
        files: builtin_files(),
    })
}

impl CatalogFile {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    /// Resolve into a catalog; rejects duplicate portfolio names.
    pub fn into_loaded(self) -> Result<LoadedCatalog, ParameterError> {
        let mut files = builtin_files();
        let mut instruments = FxHashMap::default();

        for (symbol, entry) in self.instruments {
            let ticker = Ticker::new(&symbol);
            if let Some(file) = entry.file {
                files.insert(ticker.clone(), file);
            }
            if entry.description.is_some() || entry.category.is_some() {
                let info = InstrumentInfo {
                    description: entry.description.unwrap_or_else(|| ticker.to_string()),
                    category: entry.category.unwrap_or_else(|| "Other".to_string()),
                };
                instruments.insert(ticker, info);
            }
        }

        let catalog = PortfolioCatalog::new(self.portfolios, instruments)?;
        tracing::debug!(
            portfolios = catalog.len(),
            mapped_files = files.len(),
            "catalog resolved"
        );
        Ok(LoadedCatalog { catalog, files })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
instruments:
  vt:
    file: world.csv
    description: World stocks
    category: Global Stocks
  GLD:
    file: gold.csv
portfolios:
  - name: Gold Bug
    holdings:
      - ticker: GLD
        weight: 0.5
      - ticker: VT
        weight: 0.5
  - name: Bonds
    holdings:
      - { ticker: BND, weight: 1.0 }
"#;

    #[test]
    fn test_parse_and_resolve() {
        let loaded = CatalogFile::from_yaml(YAML).unwrap().into_loaded().unwrap();

        let names: Vec<&str> = loaded.catalog.names().collect();
        assert_eq!(names, vec!["Gold Bug", "Bonds"]);

        let gold = loaded.catalog.get("Gold Bug").unwrap();
        assert_eq!(gold.weight_of(&Ticker::new("GLD")), Some(0.5));

        assert_eq!(loaded.files[&Ticker::new("VT")], "world.csv");
        assert_eq!(loaded.files[&Ticker::new("GLD")], "gold.csv");
        // Built-in mapping survives for tickers the file does not mention
        assert_eq!(
            loaded.files[&Ticker::new("BND")],
            "HistoricalPrices_VBTLX.csv"
        );

        assert_eq!(loaded.catalog.describe(&Ticker::new("VT")), "World stocks");
        assert_eq!(loaded.catalog.category(&Ticker::new("GLD")), "Other");
    }

    #[test]
    fn test_invalid_weight_is_rejected() {
        let yaml = r#"
portfolios:
  - name: Broken
    holdings:
      - { ticker: VT, weight: -0.5 }
"#;
        assert!(CatalogFile::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_duplicate_portfolio_names() {
        let yaml = r#"
portfolios:
  - name: Same
    holdings: [{ ticker: VT, weight: 1.0 }]
  - name: Same
    holdings: [{ ticker: BND, weight: 1.0 }]
"#;
        let err = CatalogFile::from_yaml(yaml)
            .unwrap()
            .into_loaded()
            .unwrap_err();
        assert_eq!(err, ParameterError::DuplicatePortfolio("Same".to_string()));
    }

    #[test]
    fn test_builtin_covers_bogleheads_tickers() {
        let loaded = builtin().unwrap();
        for portfolio in loaded.catalog.portfolios() {
            for holding in portfolio.holdings() {
                assert!(loaded.files.contains_key(&holding.ticker));
            }
        }
    }
}
