//! Catalogue of the FMP resources behind the ticker detail view.
//!
//! Every endpoint except [`Endpoint::KeyMetrics`] carries its own query
//! string; the client appends the API key after whatever is already there.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything outside the RFC 3986 unreserved set is escaped in path segments.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Trading days of daily closes requested for the price chart.
pub const HISTORY_DAYS: usize = 180;
/// Quarterly income statements requested.
pub const INCOME_QUARTERS: usize = 6;
/// Forward EPS estimate periods requested (only the first is used).
pub const ESTIMATE_PERIODS: usize = 2;
/// Insider filings requested.
pub const INSIDER_LIMIT: usize = 3;
/// News items requested.
pub const NEWS_LIMIT: usize = 3;

/// An upstream resource keyed by ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Daily closing prices, newest first.
    PriceHistory,
    /// Trailing-twelve-month valuation metrics.
    KeyMetrics,
    /// Quarterly income statements, newest first.
    IncomeStatement,
    /// Buy/hold/sell recommendation counts.
    AnalystRatings,
    /// Low/consensus/high analyst price targets.
    PriceTargetConsensus,
    /// Forward analyst estimates, nearest period first.
    EpsEstimate,
    /// Insider trading filings, newest first.
    InsiderTrading,
    /// News articles tagged with the ticker, newest first.
    StockNews,
}

impl Endpoint {
    pub const ALL: [Endpoint; 8] = [
        Endpoint::PriceHistory,
        Endpoint::KeyMetrics,
        Endpoint::IncomeStatement,
        Endpoint::AnalystRatings,
        Endpoint::PriceTargetConsensus,
        Endpoint::EpsEstimate,
        Endpoint::InsiderTrading,
        Endpoint::StockNews,
    ];

    /// Short name used in log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PriceHistory => "price_history",
            Self::KeyMetrics => "key_metrics",
            Self::IncomeStatement => "income_statement",
            Self::AnalystRatings => "analyst_ratings",
            Self::PriceTargetConsensus => "price_target_consensus",
            Self::EpsEstimate => "eps_estimate",
            Self::InsiderTrading => "insider_trading",
            Self::StockNews => "stock_news",
        }
    }

    /// Resource path (with query string, if any) for `ticker`. The ticker is
    /// escaped for wherever it lands, path segment or query value.
    pub fn path(&self, ticker: &str) -> String {
        let t = encode_path_segment(ticker);
        let q = encode_component(ticker);
        match self {
            Self::PriceHistory => format!(
                "/api/v3/historical-price-full/{}?serietype=line&timeseries={}",
                t, HISTORY_DAYS
            ),
            Self::KeyMetrics => format!("/api/v3/key-metrics-ttm/{}", t),
            Self::IncomeStatement => format!(
                "/api/v3/income-statement/{}?period=quarter&limit={}",
                t, INCOME_QUARTERS
            ),
            Self::AnalystRatings => {
                format!("/api/v3/analyst-stock-recommendations/{}?limit=1", t)
            }
            Self::PriceTargetConsensus => format!("/api/v4/price-target-consensus?symbol={}", q),
            Self::EpsEstimate => format!(
                "/api/v3/analyst-estimates/{}?period=quarter&limit={}",
                t, ESTIMATE_PERIODS
            ),
            Self::InsiderTrading => {
                format!("/api/v4/insider-trading?symbol={}&limit={}", q, INSIDER_LIMIT)
            }
            Self::StockNews => format!("/api/v3/stock_news?tickers={}&limit={}", q, NEWS_LIMIT),
        }
    }
}

/// Form-encodes a query value (space becomes `+`).
pub fn encode_component(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Percent-encodes one path segment (space becomes `%20`, `/` and `+` are escaped).
pub fn encode_path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}
