//! Lazy portfolio growth simulation library
//!
//! This crate simulates fixed-allocation, buy-and-hold portfolios built from a
//! handful of index funds. It supports:
//! - Weighted aggregation of per-ticker daily returns with an explicit join policy
//! - Growth simulation with an initial lump sum and monthly contributions
//! - Annualised return, volatility, return/risk ratio and maximum drawdown
//! - Side-by-side comparison of catalog portfolios (parallel with `rayon`)
//!
//! Price data comes from a [`PriceSeriesProvider`] injected into the [`Engine`]
//! together with an immutable [`PortfolioCatalog`].
//!
//! ```ignore
//! use lazyfolio_core::{Engine, PortfolioCatalog, SimulationRequest};
//! use lazyfolio_core::model::DateRange;
//!
//! let engine = Engine::new(provider, PortfolioCatalog::bogleheads()?);
//! let request = SimulationRequest::new("Two-fund Portfolio", DateRange::all())
//!     .initial_investment(10_000.0)
//!     .monthly_contribution(500.0);
//! let report = engine.run(&request)?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod aggregate;
pub mod date_math;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod provider;
pub mod simulation;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{
    CatalogBuilder, JoinPolicy, PortfolioBuilder, PortfolioCatalog, SimulationRequest,
};
pub use engine::Engine;
pub use provider::{InMemoryProvider, PriceSeriesProvider};
