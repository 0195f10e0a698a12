use clubdash_lib::club::{AllocationSlice, Completion, Headline, Holding, Rotation, WatchlistItem};
use clubdash_lib::format::{
    format_compact, format_count, format_currency, format_date, format_delta, format_percent,
    format_ratio, format_text, PLACEHOLDER,
};
use clubdash_lib::{AggregationResult, AnalystOutlook, KeyMetrics};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Markdown,
}

#[derive(Tabled)]
pub struct HoldingRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Shares")]
    shares: u32,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Gain")]
    gain: String,
    #[tabled(rename = "First Buy")]
    first_buy: String,
}

#[derive(Tabled)]
pub struct WatchlistRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Company")]
    company: String,
    #[tabled(rename = "Note")]
    note: String,
}

#[derive(Tabled)]
pub struct AllocationRow {
    #[tabled(rename = "Holding")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Weight")]
    weight: String,
}

#[derive(Tabled)]
pub struct RotationRow {
    #[tabled(rename = "Slot")]
    slot: String,
    #[tabled(rename = "Member")]
    member: String,
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Due")]
    due: String,
}

#[derive(Tabled)]
pub struct CompletionRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Member")]
    member: String,
    #[tabled(rename = "Date")]
    date: String,
}

#[derive(Tabled)]
pub struct HeadlineRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Headline")]
    headline: String,
}

/// Label/value pair for key metrics, analyst outlook, and position stats.
#[derive(Tabled)]
pub struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
pub struct PriceRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Close")]
    close: String,
}

#[derive(Tabled)]
pub struct IncomeRow {
    #[tabled(rename = "Quarter")]
    quarter: String,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Net Income")]
    net_income: String,
}

#[derive(Tabled)]
pub struct InsiderRow {
    #[tabled(rename = "Filer")]
    filer: String,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Type")]
    transaction_type: String,
    #[tabled(rename = "Date")]
    date: String,
}

#[derive(Tabled)]
pub struct NewsRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Headline")]
    headline: String,
    #[tabled(rename = "Source")]
    source: String,
}

// -- Row builders --

pub fn build_holding_rows(holdings: &[Holding]) -> Vec<HoldingRow> {
    holdings
        .iter()
        .map(|h| HoldingRow {
            ticker: h.ticker.to_string(),
            shares: h.shares,
            value: format_currency(Some(h.market_value)),
            gain: format_percent(Some(h.gain_pct)),
            first_buy: format_date(h.first_buy),
        })
        .collect()
}

pub fn build_watchlist_rows(items: &[WatchlistItem]) -> Vec<WatchlistRow> {
    items
        .iter()
        .map(|w| WatchlistRow {
            ticker: w.ticker.to_string(),
            company: clubdash_lib::club::stock_detail(w.ticker).name,
            note: w.note.to_string(),
        })
        .collect()
}

pub fn build_allocation_rows(slices: &[AllocationSlice]) -> Vec<AllocationRow> {
    let total: f64 = slices.iter().map(|s| s.value).sum();
    slices
        .iter()
        .map(|s| AllocationRow {
            name: s.name.clone(),
            value: format_currency(Some(s.value)),
            weight: if total > 0.0 {
                format!("{:.1}%", s.value / total * 100.0)
            } else {
                PLACEHOLDER.to_string()
            },
        })
        .collect()
}

pub fn build_rotation_rows(rotation: &Rotation) -> Vec<RotationRow> {
    let current = RotationRow {
        slot: "Current".to_string(),
        member: rotation.current.assigned_to.to_string(),
        ticker: rotation.current.ticker.to_string(),
        due: format_date(rotation.current.due_date),
    };
    std::iter::once(current)
        .chain(rotation.next_up.iter().enumerate().map(|(i, member)| RotationRow {
            slot: format!("Next {}", i + 1),
            member: member.to_string(),
            ticker: PLACEHOLDER.to_string(),
            due: PLACEHOLDER.to_string(),
        }))
        .collect()
}

pub fn build_completion_rows(completions: &[Completion]) -> Vec<CompletionRow> {
    completions
        .iter()
        .map(|c| CompletionRow {
            ticker: c.ticker.to_string(),
            member: c.member.to_string(),
            date: c.date.to_string(),
        })
        .collect()
}

pub fn build_headline_rows(headlines: &[Headline]) -> Vec<HeadlineRow> {
    headlines
        .iter()
        .map(|h| HeadlineRow {
            ticker: h.ticker.to_string(),
            headline: h.headline.to_string(),
        })
        .collect()
}

fn metric(label: &str, value: String) -> MetricRow {
    MetricRow {
        metric: label.to_string(),
        value,
    }
}

pub fn build_position_rows(holding: &Holding) -> Vec<MetricRow> {
    vec![
        metric("Shares", holding.shares.to_string()),
        metric("Market Value", format_currency(Some(holding.market_value))),
        metric("Gain", format_percent(Some(holding.gain_pct))),
        metric("First Buy", format_date(holding.first_buy)),
    ]
}

/// Chart provenance plus first-to-last movement of the price series.
pub fn build_chart_rows(result: &AggregationResult) -> Vec<MetricRow> {
    let last = result.price_history.last().map(|p| p.value);
    vec![
        metric("Source", result.chart_source.to_string()),
        metric("Points", result.price_history.len().to_string()),
        metric("Last Close", format_currency(last)),
        metric("Change", format_delta(result.price_change())),
        metric("Change %", format_percent(result.price_change_pct())),
    ]
}

pub fn build_key_metric_rows(metrics: &KeyMetrics) -> Vec<MetricRow> {
    vec![
        metric("P/E", format_ratio(metrics.pe)),
        metric("P/S", format_ratio(metrics.ps)),
        metric("EV/EBITDA", format_ratio(metrics.ev_to_ebitda)),
        metric("Market Cap", format_compact(metrics.market_cap)),
        metric("FCF/Share", format_ratio(metrics.fcf_per_share)),
    ]
}

pub fn build_analyst_rows(outlook: &AnalystOutlook) -> Vec<MetricRow> {
    vec![
        metric("Strong Buy", format_count(outlook.strong_buy)),
        metric("Buy", format_count(outlook.buy)),
        metric("Hold", format_count(outlook.hold)),
        metric("Sell", format_count(outlook.sell)),
        metric("Strong Sell", format_count(outlook.strong_sell)),
        metric("Total", format_count(outlook.total_ratings())),
        metric("Target Low", format_currency(outlook.price_target_low)),
        metric("Target Avg", format_currency(outlook.price_target_avg)),
        metric("Target High", format_currency(outlook.price_target_high)),
        metric("EPS Next Qtr", format_ratio(outlook.eps_next_quarter)),
    ]
}

pub fn build_price_rows(result: &AggregationResult) -> Vec<PriceRow> {
    result
        .price_history
        .iter()
        .map(|p| PriceRow {
            date: format_date(&p.date),
            close: format_currency(Some(p.value)),
        })
        .collect()
}

pub fn build_income_rows(result: &AggregationResult) -> Vec<IncomeRow> {
    result
        .income_quarters
        .iter()
        .map(|q| IncomeRow {
            quarter: format_date(&q.date),
            revenue: format_compact(q.revenue),
            net_income: format_compact(q.net_income),
        })
        .collect()
}

pub fn build_insider_rows(result: &AggregationResult) -> Vec<InsiderRow> {
    result
        .insider_trades
        .iter()
        .map(|t| InsiderRow {
            filer: format_text(t.filer.as_deref()),
            position: format_text(t.position.as_deref()),
            transaction_type: format_text(t.transaction_type.as_deref()),
            date: t
                .date
                .as_deref()
                .map(format_date)
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        })
        .collect()
}

pub fn build_news_rows(result: &AggregationResult) -> Vec<NewsRow> {
    result
        .news_items
        .iter()
        .map(|n| NewsRow {
            date: n
                .published_date
                .as_deref()
                .map(format_date)
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            headline: format_text(n.headline.as_deref()),
            source: format_text(n.site.as_deref()),
        })
        .collect()
}

// -- Table and markdown output --

fn render<T: Tabled>(rows: &[T], format: &OutputFormat) -> String {
    let mut table = Table::new(rows);
    if let OutputFormat::Markdown = format {
        table.with(Style::markdown());
    }
    table.to_string()
}

/// Prints a titled table. An empty section prints the placeholder instead
/// of a bare header row.
pub fn print_section<T: Tabled>(title: &str, rows: &[T], format: &OutputFormat) {
    match format {
        OutputFormat::Markdown => println!("\n## {}\n", title),
        _ => println!("\n{}", title),
    }
    if rows.is_empty() {
        println!("{}", PLACEHOLDER);
    } else {
        println!("{}", render(rows, format));
    }
}

pub fn print_table<T: Tabled>(rows: &[T], format: &OutputFormat) {
    println!("{}", render(rows, format));
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
