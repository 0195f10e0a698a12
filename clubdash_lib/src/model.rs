//! View-model types for the ticker detail view.
//!
//! Every numeric field is `Option<f64>`/`Option<u32>`; `None` renders as a
//! placeholder. Values only become `Some` after passing the finite-number
//! checks in [`crate::normalize`].

use serde::{Deserialize, Serialize};

/// Advisory shown when no API key is configured.
pub const NOTICE_MISSING_CREDENTIAL: &str = "Add credential to load live data.";
/// Advisory shown when the price series had to be replaced by mock data.
pub const NOTICE_LIVE_UNAVAILABLE: &str = "Live data unavailable; showing mock performance.";

/// One point on the price chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Calendar date for live data, step index for synthetic data.
    pub date: String,
    pub value: f64,
}

/// Latest valuation snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetrics {
    pub pe: Option<f64>,
    pub ps: Option<f64>,
    pub ev_to_ebitda: Option<f64>,
    pub market_cap: Option<f64>,
    pub fcf_per_share: Option<f64>,
}

/// One quarterly income statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeQuarter {
    pub date: String,
    pub revenue: Option<f64>,
    pub net_income: Option<f64>,
}

/// Analyst recommendation counts, price targets, and next-quarter EPS.
///
/// Filled by two independent queries: the consensus query owns everything
/// except `eps_next_quarter`, which only the EPS estimate query writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalystOutlook {
    pub buy: Option<u32>,
    pub hold: Option<u32>,
    pub sell: Option<u32>,
    pub strong_buy: Option<u32>,
    pub strong_sell: Option<u32>,
    pub price_target_low: Option<f64>,
    pub price_target_avg: Option<f64>,
    pub price_target_high: Option<f64>,
    pub eps_next_quarter: Option<f64>,
}

impl AnalystOutlook {
    /// Total number of ratings across all buckets, if any bucket is known.
    /// Saturates at `u32::MAX`.
    pub fn total_ratings(&self) -> Option<u32> {
        let buckets = [
            self.strong_buy,
            self.buy,
            self.hold,
            self.sell,
            self.strong_sell,
        ];
        if buckets.iter().all(Option::is_none) {
            return None;
        }
        Some(
            buckets
                .iter()
                .flatten()
                .fold(0u32, |total, n| total.saturating_add(*n)),
        )
    }
}

/// An insider trading filing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsiderTrade {
    pub filer: Option<String>,
    pub position: Option<String>,
    pub transaction_type: Option<String>,
    pub date: Option<String>,
}

/// A news article about the ticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub headline: Option<String>,
    pub url: Option<String>,
    pub published_date: Option<String>,
    pub site: Option<String>,
}

/// Where the price chart data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartSource {
    Live,
    Mock,
}

impl std::fmt::Display for ChartSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Mock => write!(f, "mock"),
        }
    }
}

/// Everything the detail view renders for one ticker.
///
/// Built once per fetch cycle and never modified after publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
    pub ticker: String,
    pub price_history: Vec<PricePoint>,
    pub chart_source: ChartSource,
    pub key_metrics: KeyMetrics,
    pub income_quarters: Vec<IncomeQuarter>,
    pub analyst: AnalystOutlook,
    pub insider_trades: Vec<InsiderTrade>,
    pub news_items: Vec<NewsItem>,
    /// Advisory message accompanying a degraded state.
    pub notice: Option<String>,
}

impl AggregationResult {
    /// A result with every group at its default and a synthetic price series.
    pub fn fallback(ticker: &str, price_history: Vec<PricePoint>, notice: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            price_history,
            chart_source: ChartSource::Mock,
            key_metrics: KeyMetrics::default(),
            income_quarters: Vec::new(),
            analyst: AnalystOutlook::default(),
            insider_trades: Vec::new(),
            news_items: Vec::new(),
            notice: Some(notice.to_string()),
        }
    }

    /// Change from the first to the last point of the price series.
    pub fn price_change(&self) -> Option<f64> {
        let first = self.price_history.first()?.value;
        let last = self.price_history.last()?.value;
        Some(last - first)
    }

    /// Percentage change from the first to the last point of the price series.
    pub fn price_change_pct(&self) -> Option<f64> {
        let first = self.price_history.first()?.value;
        if first == 0.0 {
            return None;
        }
        self.price_change().map(|delta| delta / first * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str, value: f64) -> PricePoint {
        PricePoint {
            date: date.to_string(),
            value,
        }
    }

    #[test]
    fn fallback_is_mock_with_notice() {
        let result =
            AggregationResult::fallback("AAPL", vec![point("0", 100.0)], NOTICE_LIVE_UNAVAILABLE);
        assert_eq!(result.chart_source, ChartSource::Mock);
        assert_eq!(result.notice.as_deref(), Some(NOTICE_LIVE_UNAVAILABLE));
        assert_eq!(result.key_metrics, KeyMetrics::default());
        assert!(result.news_items.is_empty());
    }

    #[test]
    fn price_change_spans_first_to_last() {
        let mut result = AggregationResult::fallback("X", Vec::new(), "n");
        assert_eq!(result.price_change(), None);

        result.price_history = vec![point("a", 100.0), point("b", 90.0), point("c", 110.0)];
        assert_eq!(result.price_change(), Some(10.0));
        assert_eq!(result.price_change_pct(), Some(10.0));
    }

    #[test]
    fn price_change_pct_guards_zero_start() {
        let mut result = AggregationResult::fallback("X", Vec::new(), "n");
        result.price_history = vec![point("a", 0.0), point("b", 5.0)];
        assert_eq!(result.price_change_pct(), None);
    }

    #[test]
    fn total_ratings_sums_known_buckets() {
        let outlook = AnalystOutlook {
            buy: Some(10),
            hold: Some(5),
            strong_buy: Some(3),
            ..Default::default()
        };
        assert_eq!(outlook.total_ratings(), Some(18));
        assert_eq!(AnalystOutlook::default().total_ratings(), None);
    }

    #[test]
    fn total_ratings_saturates_instead_of_overflowing() {
        let outlook = AnalystOutlook {
            buy: Some(u32::MAX),
            hold: Some(1),
            ..Default::default()
        };
        assert_eq!(outlook.total_ratings(), Some(u32::MAX));
    }

    #[test]
    fn serializes_camel_case_for_consumers() {
        let result = AggregationResult::fallback("AAPL", Vec::new(), "n");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["chartSource"], "mock");
        assert!(json["keyMetrics"]["evToEbitda"].is_null());
        assert!(json.get("priceHistory").is_some());
        assert!(json.get("newsItems").is_some());
    }
}
