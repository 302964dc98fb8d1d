//! Tests for multi-portfolio comparison

use jiff::civil::{Date, date};

use super::{closes_from_returns, prices};
use crate::config::{CatalogBuilder, PortfolioBuilder};
use crate::engine::Engine;
use crate::error::{AggregateError, LookupError};
use crate::model::DateRange;
use crate::provider::InMemoryProvider;

fn days() -> Vec<Date> {
    vec![
        date(2022, 6, 1),
        date(2022, 6, 2),
        date(2022, 6, 3),
        date(2022, 6, 6),
    ]
}

fn engine() -> Engine<InMemoryProvider> {
    let provider = InMemoryProvider::new()
        .with_series(prices(
            "STK",
            &days(),
            &closes_from_returns(&[0.02, -0.05, 0.01]),
        ))
        .with_series(prices(
            "BND",
            &days(),
            &closes_from_returns(&[0.001, 0.001, 0.001]),
        ));

    let catalog = CatalogBuilder::new()
        .portfolio(PortfolioBuilder::new("Stocks").holding("STK", 1.0))
        .portfolio(PortfolioBuilder::new("Bonds").holding("BND", 1.0))
        .portfolio(
            PortfolioBuilder::new("Balanced")
                .holding("STK", 0.5)
                .holding("BND", 0.5),
        )
        .portfolio(PortfolioBuilder::new("Gold").holding("GLD", 1.0))
        .build()
        .unwrap();

    Engine::new(provider, catalog)
}

#[test]
fn test_compare_preserves_request_order() {
    let engine = engine();
    let requested = ["Balanced", "Bonds", "Stocks"];
    let entries = engine.compare(&requested, DateRange::all());

    let names: Vec<&str> = entries.iter().map(|e| e.portfolio.as_str()).collect();
    assert_eq!(names, requested);
    assert!(entries.iter().all(|e| e.outcome.is_ok()));
}

#[test]
fn test_compare_isolates_failures() {
    let engine = engine();
    let entries = engine.compare(&["Gold", "Stocks", "Missing"], DateRange::all());

    assert_eq!(
        entries[0].outcome.as_ref().unwrap_err(),
        &AggregateError::PortfolioUnavailable
    );
    assert!(entries[1].outcome.is_ok());
    assert_eq!(
        entries[2].outcome.as_ref().unwrap_err(),
        &AggregateError::Lookup(LookupError::PortfolioNotFound("Missing".to_string()))
    );
}

#[test]
fn test_compare_stats_reflect_risk() {
    let engine = engine();
    let entries = engine.compare(&["Stocks", "Bonds"], DateRange::all());

    let stocks = entries[0].outcome.as_ref().unwrap();
    let bonds = entries[1].outcome.as_ref().unwrap();

    assert!(stocks.stats.annual_risk > bonds.stats.annual_risk);
    assert!(stocks.stats.max_drawdown < 0.0);
    // Bonds only ever rise
    assert_eq!(bonds.stats.max_drawdown, 0.0);
}

#[test]
fn test_compare_matches_individual_aggregation() {
    let engine = engine();
    let entries = engine.compare(&["Balanced"], DateRange::all());
    let direct = engine
        .aggregate_named("Balanced", DateRange::all())
        .unwrap();
    assert_eq!(entries[0].outcome.as_ref().unwrap().returns, direct);
}
