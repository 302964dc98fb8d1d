//! Wiring between the data directory and the engine

use std::path::{Path, PathBuf};

use jiff::ToSpan;
use jiff::civil::{Date, date};
use lazyfolio_core::model::{DateRange, Ticker};
use lazyfolio_core::{Engine, JoinPolicy};

use crate::data_dir::{DataDirectory, LoadError};
use crate::price_files::CsvPriceProvider;

/// Days skipped after the first available price when choosing a default start
const DEFAULT_START_OFFSET_DAYS: i32 = 90;

/// Ticker whose history decides the default simulation window
pub const DEFAULT_REFERENCE_TICKER: &str = "VT";

pub struct App {
    data_dir: DataDirectory,
    engine: Engine<CsvPriceProvider>,
}

impl App {
    pub fn load(
        data_dir: PathBuf,
        catalog: Option<&Path>,
        policy: JoinPolicy,
    ) -> Result<Self, LoadError> {
        let data_dir = DataDirectory::new(data_dir);
        let loaded = data_dir.load_catalog(catalog)?;
        let provider = data_dir.price_provider(&loaded)?;
        tracing::info!(
            data_dir = %data_dir.root().display(),
            portfolios = loaded.catalog.len(),
            ?policy,
            "data directory loaded"
        );
        let engine = Engine::new(provider, loaded.catalog).with_join_policy(policy);
        Ok(Self { data_dir, engine })
    }

    pub fn data_dir(&self) -> &DataDirectory {
        &self.data_dir
    }

    pub fn engine(&self) -> &Engine<CsvPriceProvider> {
        &self.engine
    }

    /// Fill unspecified bounds from the history of `reference`.
    pub fn window(
        &self,
        reference: &Ticker,
        start: Option<Date>,
        end: Option<Date>,
        today: Date,
    ) -> DateRange {
        let available = match self.engine.available_range(reference) {
            Ok(range) => Some(range),
            Err(reason) => {
                tracing::warn!(ticker = %reference, %reason, "no reference history, using fallback window");
                None
            }
        };
        default_window(available, start, end, today)
    }
}

/// Start 90 days after the first available price and end at the last one.
///
/// Past the end of the calendar the start stays at the first price. Without
/// any history the window is 2010-01-01 through `today`. Explicit
/// bounds always win.
pub fn default_window(
    available: Option<(Date, Date)>,
    start: Option<Date>,
    end: Option<Date>,
    today: Date,
) -> DateRange {
    let (default_start, default_end) = match available {
        Some((first, last)) => {
            let start = first
                .checked_add(DEFAULT_START_OFFSET_DAYS.days())
                .unwrap_or(first);
            (start, last)
        }
        None => (date(2010, 1, 1), today),
    };
    DateRange {
        start: Some(start.unwrap_or(default_start)),
        end: Some(end.unwrap_or(default_end)),
    }
}
