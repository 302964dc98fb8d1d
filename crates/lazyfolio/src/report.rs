//! Text and JSON rendering of engine results

use lazyfolio_core::PortfolioCatalog;
use lazyfolio_core::model::{
    CategoryAllocation, ComparisonEntry, ComparisonReport, CompositionRow, PortfolioReport,
    StatsSummary,
};
use serde::Serialize;

use crate::format::{format_currency, format_percentage, format_ratio};

/// Catalog entry as listed by `lazyfolio portfolios --json`
#[derive(Debug, Serialize)]
pub struct PortfolioListing {
    pub name: String,
    pub holdings: Vec<CompositionRow>,
    pub allocation: Vec<CategoryAllocation>,
}

#[derive(Debug, Serialize)]
struct ComparisonOutcome<'a> {
    portfolio: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a ComparisonReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn portfolio_listings(catalog: &PortfolioCatalog) -> Vec<PortfolioListing> {
    catalog
        .portfolios()
        .iter()
        .map(|p| PortfolioListing {
            name: p.name().to_string(),
            holdings: catalog.composition(p),
            allocation: catalog.allocation_by_category(p),
        })
        .collect()
}

pub fn render_portfolios(catalog: &PortfolioCatalog) -> String {
    let mut lines = Vec::new();
    for listing in portfolio_listings(catalog) {
        lines.push(listing.name.clone());
        for row in &listing.holdings {
            lines.push(format!(
                "  {:<6} {:>8}  {} ({})",
                row.ticker.as_str(),
                format_percentage(row.weight),
                row.description,
                row.category
            ));
        }
        let allocation: Vec<String> = listing
            .allocation
            .iter()
            .map(|a| format!("{} {}", a.category, format_percentage(a.weight)))
            .collect();
        lines.push(format!("  Allocation: {}", allocation.join(", ")));
        lines.push(String::new());
    }
    lines.join("\n")
}

fn stats_lines(stats: &StatsSummary) -> Vec<String> {
    vec![
        format!("  Annual return:   {:>12}", format_percentage(stats.annual_return)),
        format!("  Annual risk:     {:>12}", format_percentage(stats.annual_risk)),
        format!("  Sharpe ratio:    {:>12}", format_ratio(stats.sharpe)),
        format!("  Max drawdown:    {:>12}", format_percentage(stats.max_drawdown)),
        format!("  Total return:    {:>12}", format_percentage(stats.total_return)),
    ]
}

pub fn render_simulation(report: &PortfolioReport, catalog: &PortfolioCatalog) -> String {
    let mut lines = vec![report.portfolio.clone()];

    if let Some(summary) = report.trajectory.summary() {
        lines.push(format!(
            "  {} to {} ({} days)",
            summary.start_date, summary.end_date, summary.calendar_days
        ));
        lines.push(String::new());
        lines.push(format!("  Final value:     {:>16}", format_currency(summary.final_value)));
        lines.push(format!(
            "  Total invested:  {:>16}",
            format_currency(summary.total_invested)
        ));
        lines.push(format!("  Profit/loss:     {:>16}", format_currency(summary.profit)));
        lines.push(format!("  ROI:             {:>16}", format_percentage(summary.roi)));
    }

    lines.push(String::new());
    lines.extend(stats_lines(&report.stats));

    if report.returns.is_partial() {
        let total = catalog
            .get(&report.portfolio)
            .map_or(1.0, |p| p.total_weight());
        let missing: Vec<String> = report
            .returns
            .missing
            .iter()
            .map(|m| format!("{} ({})", m.ticker, m.reason))
            .collect();
        lines.push(String::new());
        lines.push(format!(
            "  Partial coverage ({} of weight): missing {}",
            format_percentage(report.returns.covered_weight(total)),
            missing.join(", ")
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "  {:<8} {:>16} {:>16} {:>16} {:>9}",
        "Month", "Value", "Invested", "Profit", "ROI"
    ));
    for snapshot in report.trajectory.monthly_snapshots() {
        lines.push(format!(
            "  {:<8} {:>16} {:>16} {:>16} {:>9}",
            snapshot.month.to_string(),
            format_currency(snapshot.portfolio_value),
            format_currency(snapshot.total_invested),
            format_currency(snapshot.profit),
            format_percentage(snapshot.roi)
        ));
    }

    lines.join("\n")
}

pub fn render_comparison(entries: &[ComparisonEntry]) -> String {
    let width = entries
        .iter()
        .map(|e| e.portfolio.len())
        .max()
        .unwrap_or(0)
        .max("Portfolio".len());

    let mut lines = vec![format!(
        "{:<width$} {:>10} {:>10} {:>7} {:>10} {:>10}",
        "Portfolio", "Return", "Risk", "Sharpe", "Drawdown", "Total"
    )];
    let mut failures = Vec::new();

    for entry in entries {
        match &entry.outcome {
            Ok(report) => {
                let s = &report.stats;
                let flag = if report.returns.is_partial() { " *" } else { "" };
                lines.push(format!(
                    "{:<width$} {:>10} {:>10} {:>7} {:>10} {:>10}{flag}",
                    entry.portfolio,
                    format_percentage(s.annual_return),
                    format_percentage(s.annual_risk),
                    format_ratio(s.sharpe),
                    format_percentage(s.max_drawdown),
                    format_percentage(s.total_return),
                ));
            }
            Err(err) => failures.push(format!("  {}: {err}", entry.portfolio)),
        }
    }

    if entries
        .iter()
        .any(|e| e.outcome.as_ref().is_ok_and(|r| r.returns.is_partial()))
    {
        lines.push(String::new());
        lines.push("* some holdings had no price data".to_string());
    }
    if !failures.is_empty() {
        lines.push(String::new());
        lines.push("Failed:".to_string());
        lines.extend(failures);
    }

    lines.join("\n")
}

pub fn simulation_json(report: &PortfolioReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

pub fn comparison_json(entries: &[ComparisonEntry]) -> serde_json::Result<String> {
    let outcomes: Vec<ComparisonOutcome<'_>> = entries
        .iter()
        .map(|entry| ComparisonOutcome {
            portfolio: &entry.portfolio,
            report: entry.outcome.as_ref().ok(),
            error: entry.outcome.as_ref().err().map(ToString::to_string),
        })
        .collect();
    serde_json::to_string_pretty(&outcomes)
}

pub fn portfolios_json(catalog: &PortfolioCatalog) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&portfolio_listings(catalog))
}
