mod ids;
mod portfolio;
mod results;
mod series;

pub use ids::Ticker;
pub use portfolio::{CategoryAllocation, CompositionRow, Holding, InstrumentInfo, PortfolioDefinition};
pub use results::{
    AggregatedReturns, ComparisonEntry, ComparisonReport, GrowthPoint, GrowthSummary,
    GrowthTrajectory, InstrumentUnavailable, MonthlySnapshot, PortfolioReport, StatsSummary,
};
pub use series::{
    DateRange, PortfolioReturnPoint, PortfolioReturnSeries, PricePoint, PriceSeries, ReturnPoint,
    UnorderedDates,
};
