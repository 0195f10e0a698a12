mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clubdash_lib::DetailConfig;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "clubdash")]
#[command(about = "Investment club dashboard with live ticker details from Financial Modeling Prep")]
struct Cli {
    /// Output format: table, json, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// FMP API key (overrides FMP_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Portfolio summary, allocation, rotation, and headlines
    Dashboard,
    /// List club holdings
    Holdings,
    /// List watchlist tickers
    Watchlist,
    /// Show the stock-study rotation
    Rotation,
    /// Load live detail for one ticker
    Detail(commands::detail::DetailArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clubdash=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // A missing .env is fine; the key may come from the environment or --api-key.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let config = DetailConfig::from_env().with_api_key(cli.api_key.clone());

    match &cli.command {
        Commands::Dashboard => commands::club::run_dashboard(&format),
        Commands::Holdings => commands::club::run_holdings(&format),
        Commands::Watchlist => commands::club::run_watchlist(&format),
        Commands::Rotation => commands::club::run_rotation(&format),
        Commands::Detail(args) => commands::detail::run(args, &config, &format).await?,
    }

    Ok(())
}
