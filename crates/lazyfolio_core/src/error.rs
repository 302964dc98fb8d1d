use std::fmt;

use jiff::civil::Date;

use crate::model::Ticker;

/// Inputs rejected before any computation starts
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterError {
    NonPositiveInitialInvestment(f64),
    NegativeContribution(f64),
    NonFiniteAmount(&'static str),
    InvertedDateRange { start: Date, end: Date },
    NonPositiveWeight { ticker: Ticker, weight: f64 },
    DuplicateTicker(Ticker),
    EmptyPortfolio(String),
    DuplicatePortfolio(String),
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::NonPositiveInitialInvestment(amount) => {
                write!(f, "initial investment must be positive (got {amount})")
            }
            ParameterError::NegativeContribution(amount) => {
                write!(f, "monthly contribution cannot be negative (got {amount})")
            }
            ParameterError::NonFiniteAmount(field) => write!(f, "{field} must be a finite number"),
            ParameterError::InvertedDateRange { start, end } => {
                write!(f, "end date {end} is before start date {start}")
            }
            ParameterError::NonPositiveWeight { ticker, weight } => {
                write!(f, "weight for {ticker} must be positive (got {weight})")
            }
            ParameterError::DuplicateTicker(ticker) => {
                write!(f, "ticker {ticker} appears more than once")
            }
            ParameterError::EmptyPortfolio(name) => write!(f, "portfolio '{name}' has no holdings"),
            ParameterError::DuplicatePortfolio(name) => {
                write!(f, "portfolio '{name}' is defined more than once")
            }
        }
    }
}

impl std::error::Error for ParameterError {}

/// Errors related to catalog lookups
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    PortfolioNotFound(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::PortfolioNotFound(name) => write!(f, "portfolio '{name}' not found"),
        }
    }
}

impl std::error::Error for LookupError {}

/// Why a price series provider could not supply a ticker.
///
/// This is an expected outcome rather than a failure of the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    /// The provider has no mapping for this ticker
    UnknownTicker,
    /// The ticker is known but no observations exist (or none in range)
    NoData,
    /// The backing data exists but could not be read
    Source(String),
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unavailable::UnknownTicker => write!(f, "unknown ticker"),
            Unavailable::NoData => write!(f, "no price data"),
            Unavailable::Source(msg) => write!(f, "source error: {msg}"),
        }
    }
}

impl std::error::Error for Unavailable {}

/// Errors from building a portfolio return series
#[derive(Debug, Clone, PartialEq)]
pub enum AggregateError {
    InvalidParameters(ParameterError),
    Lookup(LookupError),
    /// Strict join policy: one holding could not be supplied
    MissingInstrumentData { ticker: Ticker, reason: Unavailable },
    /// No holding produced any data
    PortfolioUnavailable,
    /// Strict join policy: holdings share no trading dates
    NoCommonDates,
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateError::InvalidParameters(e) => write!(f, "{e}"),
            AggregateError::Lookup(e) => write!(f, "{e}"),
            AggregateError::MissingInstrumentData { ticker, reason } => {
                write!(f, "missing data for {ticker}: {reason}")
            }
            AggregateError::PortfolioUnavailable => {
                write!(f, "no price data available for any holding")
            }
            AggregateError::NoCommonDates => write!(f, "holdings share no common trading dates"),
        }
    }
}

impl std::error::Error for AggregateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AggregateError::InvalidParameters(e) => Some(e),
            AggregateError::Lookup(e) => Some(e),
            AggregateError::MissingInstrumentData { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl From<ParameterError> for AggregateError {
    fn from(err: ParameterError) -> Self {
        AggregateError::InvalidParameters(err)
    }
}

impl From<LookupError> for AggregateError {
    fn from(err: LookupError) -> Self {
        AggregateError::Lookup(err)
    }
}

/// Errors from growth simulation and statistics
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesError {
    EmptySeries,
    InvalidParameters(ParameterError),
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesError::EmptySeries => write!(f, "return series has no observations"),
            SeriesError::InvalidParameters(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SeriesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SeriesError::InvalidParameters(e) => Some(e),
            SeriesError::EmptySeries => None,
        }
    }
}

impl From<ParameterError> for SeriesError {
    fn from(err: ParameterError) -> Self {
        SeriesError::InvalidParameters(err)
    }
}

/// Errors from a whole simulation or comparison request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestError {
    Aggregate(AggregateError),
    Series(SeriesError),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Aggregate(e) => write!(f, "{e}"),
            RequestError::Series(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::Aggregate(e) => Some(e),
            RequestError::Series(e) => Some(e),
        }
    }
}

impl From<AggregateError> for RequestError {
    fn from(err: AggregateError) -> Self {
        RequestError::Aggregate(err)
    }
}

impl From<SeriesError> for RequestError {
    fn from(err: SeriesError) -> Self {
        RequestError::Series(err)
    }
}

impl From<ParameterError> for RequestError {
    fn from(err: ParameterError) -> Self {
        RequestError::Aggregate(AggregateError::InvalidParameters(err))
    }
}

impl From<LookupError> for RequestError {
    fn from(err: LookupError) -> Self {
        RequestError::Aggregate(AggregateError::Lookup(err))
    }
}
