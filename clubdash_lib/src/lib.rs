//! Library layer for the club dashboard: the ticker detail aggregator over the
//! FMP API, its view model and formatting, and the club's static data.
//!
//! The aggregator runs the detail-view queries concurrently, tolerates each
//! one failing on its own, and falls back to a synthetic price series when
//! live history is unavailable.

pub mod aggregator;
pub mod club;
pub mod config;
pub mod error;
pub mod format;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod queries;
pub mod synthetic;
pub mod validation;

pub use fmp_api;

pub use aggregator::DetailAggregator;
pub use config::DetailConfig;
pub use error::ClubDashError;
pub use loader::{DetailLoader, DetailState};
pub use model::{
    AggregationResult, AnalystOutlook, ChartSource, IncomeQuarter, InsiderTrade, KeyMetrics,
    NewsItem, PricePoint,
};
