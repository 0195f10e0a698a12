use super::*;
use clubdash_lib::club::{PORTFOLIO, ROTATION, WATCHLIST};
use clubdash_lib::model::NOTICE_LIVE_UNAVAILABLE;
use clubdash_lib::queries::{
    parse_analyst_consensus, parse_eps_estimate, parse_income_quarters, parse_insider_trades,
    parse_key_metrics, parse_news_items, parse_price_history,
};
use clubdash_lib::synthetic::synthetic_series;
use clubdash_lib::ChartSource;

fn fixture(json_str: &str) -> serde_json::Value {
    serde_json::from_str(json_str).unwrap()
}

fn load_live_result() -> AggregationResult {
    let history = fixture(include_str!("../../clubdash_lib/tests/fixtures/price_history.json"));
    let metrics = fixture(include_str!("../../clubdash_lib/tests/fixtures/key_metrics.json"));
    let income = fixture(include_str!("../../clubdash_lib/tests/fixtures/income_statement.json"));
    let ratings = fixture(include_str!("../../clubdash_lib/tests/fixtures/analyst_ratings.json"));
    let targets = fixture(include_str!("../../clubdash_lib/tests/fixtures/price_target.json"));
    let estimates = fixture(include_str!("../../clubdash_lib/tests/fixtures/analyst_estimates.json"));
    let insiders = fixture(include_str!("../../clubdash_lib/tests/fixtures/insider_trading.json"));
    let news = fixture(include_str!("../../clubdash_lib/tests/fixtures/stock_news.json"));

    let mut analyst = parse_analyst_consensus(&ratings, &targets);
    analyst.eps_next_quarter = parse_eps_estimate(&estimates);

    AggregationResult {
        ticker: "AAPL".to_string(),
        price_history: parse_price_history(&history),
        chart_source: ChartSource::Live,
        key_metrics: parse_key_metrics(&metrics),
        income_quarters: parse_income_quarters(&income),
        analyst,
        insider_trades: parse_insider_trades(&insiders),
        news_items: parse_news_items(&news),
        notice: None,
    }
}

fn load_mock_result() -> AggregationResult {
    AggregationResult::fallback("AAPL", synthetic_series(), NOTICE_LIVE_UNAVAILABLE)
}

fn value_of<'a>(rows: &'a [MetricRow], label: &str) -> &'a str {
    rows.iter()
        .find(|r| r.metric == label)
        .map(|r| r.value.as_str())
        .unwrap()
}

// -- Club rows --

#[test]
fn test_build_holding_rows_mapping() {
    let rows = build_holding_rows(PORTFOLIO.holdings);
    assert_eq!(rows.len(), 10);

    let row = &rows[0];
    assert_eq!(row.ticker, "NVDA");
    assert_eq!(row.shares, 41);
    assert_eq!(row.value, "$7,334.08");
    assert_eq!(row.gain, "+88.90%");
    assert_eq!(row.first_buy, "Jan 17, 2024");
}

#[test]
fn test_build_watchlist_rows_has_company_names() {
    let rows = build_watchlist_rows(WATCHLIST);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].company, "Union Pacific Corporation");
    assert_eq!(rows[2].ticker, "INTC");
}

#[test]
fn test_build_allocation_rows_weights() {
    let rows = build_allocation_rows(&clubdash_lib::club::allocation());
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0].name, "NVDA");
    assert_eq!(rows[5].name, "Other");

    let total: f64 = rows
        .iter()
        .map(|r| r.weight.trim_end_matches('%').parse::<f64>().unwrap())
        .sum();
    assert!((total - 100.0).abs() < 0.5);
}

#[test]
fn test_build_allocation_rows_empty_total() {
    let rows = build_allocation_rows(&[AllocationSlice {
        name: "Other".to_string(),
        value: 0.0,
    }]);
    assert_eq!(rows[0].weight, "—");
}

#[test]
fn test_build_rotation_rows_current_first() {
    let rows = build_rotation_rows(&ROTATION);
    assert_eq!(rows.len(), 1 + ROTATION.next_up.len());
    assert_eq!(rows[0].slot, "Current");
    assert_eq!(rows[0].ticker, "INTC");
    assert_eq!(rows[0].due, "Nov 23, 2025");
    assert_eq!(rows[1].slot, "Next 1");
    assert_eq!(rows[1].ticker, "—");
}

// -- Detail rows --

#[test]
fn test_build_position_rows() {
    let holding = clubdash_lib::club::holding("AAPL").unwrap();
    let rows = build_position_rows(holding);
    assert_eq!(value_of(&rows, "Shares"), "8");
    assert_eq!(value_of(&rows, "Market Value"), "$2,171.92");
    assert_eq!(value_of(&rows, "Gain"), "+25.10%");
    assert_eq!(value_of(&rows, "First Buy"), "Apr 15, 2024");
}

#[test]
fn test_build_chart_rows_live() {
    let result = load_live_result();
    let rows = build_chart_rows(&result);
    assert_eq!(value_of(&rows, "Source"), "live");
    assert_eq!(value_of(&rows, "Points"), "5");
    assert_eq!(value_of(&rows, "Last Close"), "$212.49");
    assert_eq!(value_of(&rows, "Change"), "+19.37");
}

#[test]
fn test_build_chart_rows_mock() {
    let rows = build_chart_rows(&load_mock_result());
    assert_eq!(value_of(&rows, "Source"), "mock");
    assert_eq!(value_of(&rows, "Points"), "30");
}

#[test]
fn test_build_key_metric_rows_mapping() {
    let result = load_live_result();
    let rows = build_key_metric_rows(&result.key_metrics);
    assert_eq!(value_of(&rows, "P/E"), "28.40");
    assert_eq!(value_of(&rows, "P/S"), "7.92");
    assert_eq!(value_of(&rows, "EV/EBITDA"), "22.61");
    assert_eq!(value_of(&rows, "Market Cap"), "1.5T");
    assert_eq!(value_of(&rows, "FCF/Share"), "—");
}

#[test]
fn test_build_key_metric_rows_all_missing() {
    let rows = build_key_metric_rows(&KeyMetrics::default());
    assert!(rows.iter().all(|r| r.value == "—"));
}

#[test]
fn test_build_analyst_rows_mapping() {
    let result = load_live_result();
    let rows = build_analyst_rows(&result.analyst);
    assert_eq!(value_of(&rows, "Buy"), "24");
    assert_eq!(value_of(&rows, "Strong Sell"), "0");
    assert_eq!(value_of(&rows, "Target Avg"), "$213.85");
    assert_eq!(value_of(&rows, "Target High"), "$275.00");
    assert_eq!(value_of(&rows, "EPS Next Qtr"), "1.60");
    assert_eq!(value_of(&rows, "Total"), "40");
}

#[test]
fn test_build_analyst_rows_total_saturates() {
    let outlook = parse_analyst_consensus(
        &serde_json::json!([{"buy": 4294967295u64, "hold": 1}]),
        &serde_json::json!([]),
    );
    let rows = build_analyst_rows(&outlook);
    assert_eq!(value_of(&rows, "Buy"), "4294967295");
    assert_eq!(value_of(&rows, "Total"), "4294967295");
}

#[test]
fn test_build_analyst_rows_total_unknown() {
    let rows = build_analyst_rows(&AnalystOutlook::default());
    assert_eq!(value_of(&rows, "Total"), "—");
}

#[test]
fn test_build_income_rows_ascending() {
    let result = load_live_result();
    let rows = build_income_rows(&result);
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0].quarter, "Dec 31, 2022");
    assert_eq!(rows[5].quarter, "Mar 30, 2024");
    assert_eq!(rows[4].revenue, "119.6B");
}

#[test]
fn test_build_insider_rows_mapping() {
    let result = load_live_result();
    let rows = build_insider_rows(&result);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].filer, "COOK TIMOTHY D");
    assert_eq!(rows[0].position, "officer: CEO");
    assert_eq!(rows[0].transaction_type, "S-Sale");
    assert_eq!(rows[0].date, "Apr 1, 2024");
}

#[test]
fn test_build_news_rows_mapping() {
    let result = load_live_result();
    let rows = build_news_rows(&result);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].date, "Jun 14, 2024");
    assert_eq!(rows[0].source, "reuters.com");
}

#[test]
fn test_mock_result_has_empty_lists() {
    let result = load_mock_result();
    assert!(build_income_rows(&result).is_empty());
    assert!(build_insider_rows(&result).is_empty());
    assert!(build_news_rows(&result).is_empty());
    assert_eq!(build_price_rows(&result).len(), 30);
}

// -- Rendering --

#[test]
fn test_markdown_metric_headers() {
    let result = load_live_result();
    let md = render(&build_key_metric_rows(&result.key_metrics), &OutputFormat::Markdown);
    let header_line = md.lines().next().unwrap();
    assert!(header_line.contains("Metric"));
    assert!(header_line.contains("Value"));
    assert!(md.contains("| P/E"));
}

#[test]
fn test_markdown_empty_produces_headers_only() {
    let rows: Vec<NewsRow> = build_news_rows(&load_mock_result());
    let md = render(&rows, &OutputFormat::Markdown);
    let lines: Vec<&str> = md.lines().collect();
    assert!(lines.len() <= 2, "expected at most 2 lines for empty table, got {}", lines.len());
}

#[test]
fn test_json_result_is_camel_case() {
    let json = serde_json::to_value(load_live_result()).unwrap();
    assert_eq!(json["chartSource"], "live");
    assert_eq!(json["keyMetrics"]["pe"], 28.4);
    assert!(json["notice"].is_null());
}
