//! The `detail` subcommand: one fetch cycle for a ticker, rendered next to the
//! club's own position in it.

use anyhow::{bail, Context, Result};
use clap::Args;
use clubdash_lib::club::{self, Holding};
use clubdash_lib::{validation, AggregationResult, DetailConfig, DetailLoader};
use serde::Serialize;

use crate::output::{
    build_analyst_rows, build_chart_rows, build_income_rows, build_insider_rows,
    build_key_metric_rows, build_news_rows, build_position_rows, build_price_rows, print_json,
    print_section, OutputFormat,
};

#[derive(Args)]
pub struct DetailArgs {
    /// Ticker symbol (e.g. AAPL, BRK.B)
    pub ticker: String,

    /// Print every point of the price series instead of a summary
    #[arg(long)]
    pub history: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DetailView<'a> {
    name: String,
    description: String,
    position: Option<&'static Holding>,
    #[serde(flatten)]
    detail: &'a AggregationResult,
}

pub async fn run(args: &DetailArgs, config: &DetailConfig, format: &OutputFormat) -> Result<()> {
    let ticker = validation::validate_ticker(&args.ticker)?;

    let loader = DetailLoader::new(config);
    let mut updates = loader.subscribe();
    loader.load(&ticker);

    let state = tokio::select! {
        settled = updates.wait_for(|s| !s.loading) => settled?.clone(),
        _ = tokio::signal::ctrl_c() => {
            loader.close();
            bail!("interrupted while loading {}", ticker);
        }
    };
    let result = state
        .result
        .with_context(|| format!("no result published for {}", ticker))?;

    if let Some(notice) = result.notice.as_deref() {
        eprintln!("{}", notice);
    }
    print_detail(&ticker, &result, args.history, format);
    Ok(())
}

fn print_detail(ticker: &str, result: &AggregationResult, history: bool, format: &OutputFormat) {
    let detail = club::stock_detail(ticker);
    let position = club::holding(ticker);

    if let OutputFormat::Json = format {
        print_json(&DetailView {
            name: detail.name,
            description: detail.description,
            position,
            detail: result,
        });
        return;
    }

    match format {
        OutputFormat::Markdown => println!("# {} ({})\n\n{}", detail.name, ticker, detail.description),
        _ => println!("{} ({})\n{}", detail.name, ticker, detail.description),
    }

    if let Some(holding) = position {
        print_section("Club Position", &build_position_rows(holding), format);
    }
    print_section("Price Chart", &build_chart_rows(result), format);
    if history {
        print_section("Price History", &build_price_rows(result), format);
    }
    print_section("Key Metrics", &build_key_metric_rows(&result.key_metrics), format);
    print_section("Quarterly Income", &build_income_rows(result), format);
    print_section("Analyst Outlook", &build_analyst_rows(&result.analyst), format);
    print_section("Insider Trades", &build_insider_rows(result), format);
    print_section("News", &build_news_rows(result), format);
}
