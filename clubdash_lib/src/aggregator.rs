//! Fetch-cycle orchestration for the ticker detail view.
//!
//! All seven queries are polled together and every one is allowed to settle.
//! A failed query only leaves its own field group at the default; the price
//! chart is the one group with a fallback, replaced wholesale by a synthetic
//! walk when live history is missing.

use fmp_api::Client;
use tokio_util::sync::CancellationToken;

use crate::error::ClubDashError;
use crate::model::{
    AggregationResult, AnalystOutlook, ChartSource, IncomeQuarter, InsiderTrade, KeyMetrics,
    NewsItem, PricePoint, NOTICE_LIVE_UNAVAILABLE, NOTICE_MISSING_CREDENTIAL,
};
use crate::queries;
use crate::synthetic::synthetic_series;

/// Settled outcome of every query in one cycle.
#[derive(Debug)]
pub struct Settled {
    pub price_history: Result<Vec<PricePoint>, ClubDashError>,
    pub key_metrics: Result<KeyMetrics, ClubDashError>,
    pub income_quarters: Result<Vec<IncomeQuarter>, ClubDashError>,
    pub analyst_consensus: Result<AnalystOutlook, ClubDashError>,
    pub eps_estimate: Result<Option<f64>, ClubDashError>,
    pub insider_trades: Result<Vec<InsiderTrade>, ClubDashError>,
    pub news_items: Result<Vec<NewsItem>, ClubDashError>,
}

/// Builds [`AggregationResult`]s for tickers against one FMP host.
#[derive(Debug, Clone)]
pub struct DetailAggregator {
    base_url: String,
}

impl Default for DetailAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailAggregator {
    /// Creates an aggregator pointing at the production FMP API.
    pub fn new() -> Self {
        Self::with_base_url(fmp_api::DEFAULT_BASE_URL)
    }

    /// Creates an aggregator with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }

    /// Runs one fetch cycle for `ticker`.
    ///
    /// Without a credential no request is made and the result is synthetic.
    /// Returns `None` if `cancel` fired before the cycle settled; a cancelled
    /// cycle has nothing to publish.
    pub async fn aggregate(
        &self,
        ticker: &str,
        credential: Option<&str>,
        cancel: &CancellationToken,
    ) -> Option<AggregationResult> {
        let Some(api_key) = credential.map(str::trim).filter(|k| !k.is_empty()) else {
            tracing::info!(ticker, "no API key configured, serving mock data");
            return Some(AggregationResult::fallback(
                ticker,
                synthetic_series(),
                NOTICE_MISSING_CREDENTIAL,
            ));
        };
        if cancel.is_cancelled() {
            return None;
        }

        let client = match Client::with_base_url(&self.base_url, api_key.to_string()) {
            Ok(client) => client,
            Err(e) => {
                tracing::error!(ticker, "failed to build FMP client: {}", e);
                return Some(total_failure(ticker));
            }
        };

        let settled = fetch_all(&client, ticker, cancel).await;
        if cancel.is_cancelled() {
            tracing::debug!(ticker, "fetch cycle cancelled, discarding results");
            return None;
        }
        Some(merge(ticker, settled))
    }
}

/// The result published when a cycle fails outside the individual queries.
pub fn total_failure(ticker: &str) -> AggregationResult {
    AggregationResult::fallback(ticker, synthetic_series(), NOTICE_LIVE_UNAVAILABLE)
}

/// Polls all seven queries concurrently and waits for each to settle.
pub async fn fetch_all(client: &Client, ticker: &str, cancel: &CancellationToken) -> Settled {
    let (
        price_history,
        key_metrics,
        income_quarters,
        analyst_consensus,
        eps_estimate,
        insider_trades,
        news_items,
    ) = tokio::join!(
        queries::price_history(client, ticker, cancel),
        queries::key_metrics(client, ticker, cancel),
        queries::income_quarters(client, ticker, cancel),
        queries::analyst_consensus(client, ticker, cancel),
        queries::eps_estimate(client, ticker, cancel),
        queries::insider_trades(client, ticker, cancel),
        queries::news_items(client, ticker, cancel),
    );
    Settled {
        price_history,
        key_metrics,
        income_quarters,
        analyst_consensus,
        eps_estimate,
        insider_trades,
        news_items,
    }
}

/// Folds settled outcomes into one result. Each group is written only by its
/// own query; the analyst consensus lands before the EPS slot is filled.
pub fn merge(ticker: &str, settled: Settled) -> AggregationResult {
    let mut result = AggregationResult {
        ticker: ticker.to_string(),
        price_history: Vec::new(),
        chart_source: ChartSource::Live,
        key_metrics: KeyMetrics::default(),
        income_quarters: Vec::new(),
        analyst: AnalystOutlook::default(),
        insider_trades: Vec::new(),
        news_items: Vec::new(),
        notice: None,
    };

    if let Some(metrics) = adopt(ticker, "key_metrics", settled.key_metrics) {
        result.key_metrics = metrics;
    }
    if let Some(quarters) = adopt(ticker, "income_quarters", settled.income_quarters) {
        result.income_quarters = quarters;
    }
    if let Some(outlook) = adopt(ticker, "analyst_consensus", settled.analyst_consensus) {
        result.analyst = outlook;
    }
    if let Some(eps) = adopt(ticker, "eps_estimate", settled.eps_estimate) {
        result.analyst.eps_next_quarter = eps;
    }
    if let Some(trades) = adopt(ticker, "insider_trades", settled.insider_trades) {
        result.insider_trades = trades;
    }
    if let Some(items) = adopt(ticker, "news_items", settled.news_items) {
        result.news_items = items;
    }

    match adopt(ticker, "price_history", settled.price_history) {
        Some(points) if !points.is_empty() => result.price_history = points,
        _ => {
            tracing::info!(ticker, "no live price history, substituting mock series");
            result.price_history = synthetic_series();
            result.chart_source = ChartSource::Mock;
            result.notice = Some(NOTICE_LIVE_UNAVAILABLE.to_string());
        }
    }

    result
}

fn adopt<T>(ticker: &str, query: &str, outcome: Result<T, ClubDashError>) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(e) if e.is_cancelled() => None,
        Err(e) => {
            tracing::warn!(ticker, query, "query failed: {}", e);
            None
        }
    }
}
