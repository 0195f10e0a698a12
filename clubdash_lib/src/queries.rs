//! The seven upstream queries behind the detail view.
//!
//! Each query fetches one resource (two for the analyst consensus) and maps
//! the payload into a model type. Only transport, status, body-decoding, and
//! cancellation failures are errors; missing or malformed fields become
//! `None` and absent payloads become defaults.

use fmp_api::{Client, Endpoint, INCOME_QUARTERS, INSIDER_LIMIT, NEWS_LIMIT};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::error::ClubDashError;
use crate::model::{AnalystOutlook, IncomeQuarter, InsiderTrade, KeyMetrics, NewsItem, PricePoint};
use crate::normalize::{aliases, first_record, pick_count, pick_number, pick_text, records};

/// Daily closes, oldest first.
pub async fn price_history(
    client: &Client,
    ticker: &str,
    cancel: &CancellationToken,
) -> Result<Vec<PricePoint>, ClubDashError> {
    let payload = client.fetch(Endpoint::PriceHistory, ticker, cancel).await?;
    Ok(parse_price_history(&payload))
}

/// Latest trailing-twelve-month valuation metrics.
pub async fn key_metrics(
    client: &Client,
    ticker: &str,
    cancel: &CancellationToken,
) -> Result<KeyMetrics, ClubDashError> {
    let payload = client.fetch(Endpoint::KeyMetrics, ticker, cancel).await?;
    Ok(parse_key_metrics(&payload))
}

/// Up to six most recent quarters, oldest first.
pub async fn income_quarters(
    client: &Client,
    ticker: &str,
    cancel: &CancellationToken,
) -> Result<Vec<IncomeQuarter>, ClubDashError> {
    let payload = client.fetch(Endpoint::IncomeStatement, ticker, cancel).await?;
    Ok(parse_income_quarters(&payload))
}

/// Recommendation counts plus price targets. Both calls run together and
/// both must succeed. `eps_next_quarter` is always `None` here.
pub async fn analyst_consensus(
    client: &Client,
    ticker: &str,
    cancel: &CancellationToken,
) -> Result<AnalystOutlook, ClubDashError> {
    let (ratings, targets) = tokio::try_join!(
        client.fetch(Endpoint::AnalystRatings, ticker, cancel),
        client.fetch(Endpoint::PriceTargetConsensus, ticker, cancel),
    )?;
    Ok(parse_analyst_consensus(&ratings, &targets))
}

/// Consensus EPS for the nearest upcoming quarter.
pub async fn eps_estimate(
    client: &Client,
    ticker: &str,
    cancel: &CancellationToken,
) -> Result<Option<f64>, ClubDashError> {
    let payload = client.fetch(Endpoint::EpsEstimate, ticker, cancel).await?;
    Ok(parse_eps_estimate(&payload))
}

/// Up to three insider filings in upstream order.
pub async fn insider_trades(
    client: &Client,
    ticker: &str,
    cancel: &CancellationToken,
) -> Result<Vec<InsiderTrade>, ClubDashError> {
    let payload = client.fetch(Endpoint::InsiderTrading, ticker, cancel).await?;
    Ok(parse_insider_trades(&payload))
}

/// Up to three news items in upstream order.
pub async fn news_items(
    client: &Client,
    ticker: &str,
    cancel: &CancellationToken,
) -> Result<Vec<NewsItem>, ClubDashError> {
    let payload = client.fetch(Endpoint::StockNews, ticker, cancel).await?;
    Ok(parse_news_items(&payload))
}

// -- Payload parsers --

/// Points without a date or a finite close are dropped. Upstream is newest
/// first, so the result is reversed.
pub fn parse_price_history(payload: &Value) -> Vec<PricePoint> {
    let mut points: Vec<PricePoint> = records(payload, Some("historical"))
        .into_iter()
        .filter_map(|r| {
            Some(PricePoint {
                date: pick_text(r, aliases::PRICE_DATE)?,
                value: pick_number(r, aliases::PRICE_CLOSE)?,
            })
        })
        .collect();
    points.reverse();
    points
}

pub fn parse_key_metrics(payload: &Value) -> KeyMetrics {
    let Some(r) = first_record(payload) else {
        return KeyMetrics::default();
    };
    KeyMetrics {
        pe: pick_number(r, aliases::PE),
        ps: pick_number(r, aliases::PS),
        ev_to_ebitda: pick_number(r, aliases::EV_TO_EBITDA),
        market_cap: pick_number(r, aliases::MARKET_CAP),
        fcf_per_share: pick_number(r, aliases::FCF_PER_SHARE),
    }
}

/// Keeps the six most recent quarters (upstream is newest first), then
/// reverses them into chronological order.
pub fn parse_income_quarters(payload: &Value) -> Vec<IncomeQuarter> {
    let mut quarters: Vec<IncomeQuarter> = records(payload, None)
        .into_iter()
        .take(INCOME_QUARTERS)
        .map(|r| IncomeQuarter {
            date: pick_text(r, aliases::INCOME_DATE).unwrap_or_default(),
            revenue: pick_number(r, aliases::REVENUE),
            net_income: pick_number(r, aliases::NET_INCOME),
        })
        .collect();
    quarters.reverse();
    quarters
}

pub fn parse_analyst_consensus(ratings: &Value, targets: &Value) -> AnalystOutlook {
    let mut outlook = AnalystOutlook::default();
    if let Some(r) = first_record(ratings) {
        outlook.buy = pick_count(r, aliases::RATING_BUY);
        outlook.hold = pick_count(r, aliases::RATING_HOLD);
        outlook.sell = pick_count(r, aliases::RATING_SELL);
        outlook.strong_buy = pick_count(r, aliases::RATING_STRONG_BUY);
        outlook.strong_sell = pick_count(r, aliases::RATING_STRONG_SELL);
    }
    if let Some(t) = first_record(targets) {
        outlook.price_target_low = pick_number(t, aliases::TARGET_LOW);
        outlook.price_target_avg = pick_number(t, aliases::TARGET_AVG);
        outlook.price_target_high = pick_number(t, aliases::TARGET_HIGH);
    }
    outlook
}

pub fn parse_eps_estimate(payload: &Value) -> Option<f64> {
    first_record(payload).and_then(|r| pick_number(r, aliases::EPS_ESTIMATE))
}

pub fn parse_insider_trades(payload: &Value) -> Vec<InsiderTrade> {
    records(payload, None)
        .into_iter()
        .take(INSIDER_LIMIT)
        .map(|r| InsiderTrade {
            filer: pick_text(r, aliases::INSIDER_FILER),
            position: pick_text(r, aliases::INSIDER_POSITION),
            transaction_type: pick_text(r, aliases::INSIDER_TRANSACTION),
            date: pick_text(r, aliases::INSIDER_DATE),
        })
        .collect()
}

pub fn parse_news_items(payload: &Value) -> Vec<NewsItem> {
    records(payload, None)
        .into_iter()
        .take(NEWS_LIMIT)
        .map(|r| NewsItem {
            headline: pick_text(r, aliases::NEWS_HEADLINE),
            url: pick_text(r, aliases::NEWS_URL),
            published_date: pick_text(r, aliases::NEWS_PUBLISHED),
            site: pick_text(r, aliases::NEWS_SITE),
        })
        .collect()
}
