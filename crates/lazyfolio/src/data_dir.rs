//! Data directory layout
//!
//! ```text
//! ~/.lazyfolio/
//!   catalog.yaml         # optional instrument and portfolio catalog
//!   historical_data/
//!     HistoricalPrices_VT.csv
//!     ...
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use lazyfolio_core::error::ParameterError;

use crate::catalog_file::{self, CatalogFile, LoadedCatalog};
use crate::price_files::CsvPriceProvider;

const CATALOG_FILE: &str = "catalog.yaml";
const HISTORICAL_DATA_DIR: &str = "historical_data";

/// Errors raised while reading the data directory
#[derive(Debug)]
pub enum LoadError {
    Io { path: PathBuf, message: String },
    Parse { path: PathBuf, message: String },
    Catalog(ParameterError),
    MissingDataDir(PathBuf),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, message } => {
                write!(f, "IO error reading {}: {message}", path.display())
            }
            LoadError::Parse { path, message } => {
                write!(f, "Parse error in {}: {message}", path.display())
            }
            LoadError::Catalog(err) => write!(f, "Invalid catalog: {err}"),
            LoadError::MissingDataDir(path) => {
                write!(f, "Historical data directory not found: {}", path.display())
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Catalog(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParameterError> for LoadError {
    fn from(err: ParameterError) -> Self {
        LoadError::Catalog(err)
    }
}

pub struct DataDirectory {
    root: PathBuf,
}

impl DataDirectory {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// `~/.lazyfolio`, or `./.lazyfolio` when there is no home directory
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".lazyfolio")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn historical_data(&self) -> PathBuf {
        self.root.join(HISTORICAL_DATA_DIR)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(CATALOG_FILE)
    }

    /// Load `explicit` if given, else `catalog.yaml` when present, else the
    /// built-in catalog.
    pub fn load_catalog(&self, explicit: Option<&Path>) -> Result<LoadedCatalog, LoadError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = self.catalog_path();
                if !default.is_file() {
                    tracing::debug!("no catalog file, using built-in portfolios");
                    return Ok(catalog_file::builtin()?);
                }
                default
            }
        };

        let content = fs::read_to_string(&path).map_err(|e| LoadError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let file = CatalogFile::from_yaml(&content).map_err(|e| LoadError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;
        tracing::info!(path = %path.display(), "loaded catalog file");
        Ok(file.into_loaded()?)
    }

    /// Provider over `historical_data`; the directory must exist.
    pub fn price_provider(&self, catalog: &LoadedCatalog) -> Result<CsvPriceProvider, LoadError> {
        let dir = self.historical_data();
        if !dir.is_dir() {
            return Err(LoadError::MissingDataDir(dir));
        }
        Ok(CsvPriceProvider::new(dir, catalog.files.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_catalog_when_no_file() {
        let dir = tempdir().unwrap();
        let data = DataDirectory::new(dir.path().to_path_buf());
        let loaded = data.load_catalog(None).unwrap();
        assert_eq!(loaded.catalog.len(), 4);
    }

    #[test]
    fn test_catalog_file_in_data_dir() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("catalog.yaml"),
            "portfolios:\n  - name: Solo\n    holdings:\n      - { ticker: VT, weight: 1.0 }\n",
        )
        .unwrap();
        let data = DataDirectory::new(dir.path().to_path_buf());
        let loaded = data.load_catalog(None).unwrap();
        assert_eq!(loaded.catalog.names().collect::<Vec<_>>(), vec!["Solo"]);
    }

    #[test]
    fn test_explicit_catalog_errors() {
        let dir = tempdir().unwrap();
        let data = DataDirectory::new(dir.path().to_path_buf());

        let missing = dir.path().join("nope.yaml");
        assert!(matches!(
            data.load_catalog(Some(&missing)),
            Err(LoadError::Io { .. })
        ));

        let broken = dir.path().join("broken.yaml");
        fs::write(&broken, "portfolios: [unclosed\n").unwrap();
        assert!(matches!(
            data.load_catalog(Some(&broken)),
            Err(LoadError::Parse { .. })
        ));
    }

    #[test]
    fn test_price_provider_requires_historical_data() {
        let dir = tempdir().unwrap();
        let data = DataDirectory::new(dir.path().to_path_buf());
        let loaded = catalog_file::builtin().unwrap();

        let err = data.price_provider(&loaded).unwrap_err();
        assert!(matches!(err, LoadError::MissingDataDir(_)));

        fs::create_dir(data.historical_data()).unwrap();
        assert!(data.price_provider(&loaded).is_ok());
    }
}
