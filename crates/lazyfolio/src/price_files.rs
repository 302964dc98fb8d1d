//! Daily closes read from CSV exports on disk
//!
//! Each ticker maps to one file under the `historical_data` directory. Files
//! carry a header row with at least `Date` and `Close` columns (header names
//! are matched after trimming, ignoring case). Dates are `MM/DD/YY`; ISO
//! `YYYY-MM-DD` is accepted as well.

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use jiff::civil::Date;
use lazyfolio_core::error::Unavailable;
use lazyfolio_core::model::{DateRange, PricePoint, PriceSeries, Ticker};
use lazyfolio_core::PriceSeriesProvider;

const DATE_FORMAT: &str = "%m/%d/%y";

/// [`PriceSeriesProvider`] over a directory of CSV files
#[derive(Debug, Clone)]
pub struct CsvPriceProvider {
    dir: PathBuf,
    files: HashMap<Ticker, String>,
}

impl CsvPriceProvider {
    pub fn new(dir: impl Into<PathBuf>, files: HashMap<Ticker, String>) -> Self {
        Self {
            dir: dir.into(),
            files,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `ticker`, if the ticker is mapped at all
    pub fn path_for(&self, ticker: &Ticker) -> Option<PathBuf> {
        self.files.get(ticker).map(|file| self.dir.join(file))
    }

    /// Full history of `ticker`, sorted and deduplicated
    pub fn load(&self, ticker: &Ticker) -> Result<PriceSeries, Unavailable> {
        let path = self.path_for(ticker).ok_or(Unavailable::UnknownTicker)?;
        if !path.is_file() {
            tracing::warn!(ticker = %ticker, path = %path.display(), "price file not found");
            return Err(Unavailable::NoData);
        }
        let points = read_prices(&path)?;
        tracing::debug!(ticker = %ticker, rows = points.len(), "loaded price file");
        Ok(PriceSeries::from_unordered(ticker.clone(), points))
    }
}

impl PriceSeriesProvider for CsvPriceProvider {
    fn get_series(&self, ticker: &Ticker, range: DateRange) -> Result<PriceSeries, Unavailable> {
        let series = self.load(ticker)?.within(range);
        if series.is_empty() {
            return Err(Unavailable::NoData);
        }
        Ok(series)
    }
}

fn column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

fn parse_date(text: &str) -> Option<Date> {
    Date::strptime(DATE_FORMAT, text)
        .ok()
        .or_else(|| text.parse().ok())
}

fn read_prices(path: &Path) -> Result<Vec<PricePoint>, Unavailable> {
    let source = |msg: String| Unavailable::Source(format!("{}: {msg}", path.display()));

    let file = File::open(path).map_err(|e| source(e.to_string()))?;
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(file);

    let headers = reader.headers().map_err(|e| source(e.to_string()))?.clone();
    let (Some(date_col), Some(close_col)) = (column(&headers, "Date"), column(&headers, "Close"))
    else {
        return Err(source("missing Date or Close column".to_string()));
    };

    let mut points = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| source(e.to_string()))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        // Header is line 1
        let line = idx + 2;
        let raw_date = record.get(date_col).unwrap_or_default();
        let date = parse_date(raw_date)
            .ok_or_else(|| source(format!("line {line}: invalid date {raw_date:?}")))?;
        let raw_close = record.get(close_col).unwrap_or_default();
        let close = raw_close
            .replace(',', "")
            .parse::<f64>()
            .ok()
            .filter(|c| c.is_finite())
            .ok_or_else(|| source(format!("line {line}: invalid close {raw_close:?}")))?;
        points.push(PricePoint { date, close });
    }
    Ok(points)
}
