//! Subcommands over the club's own data: dashboard, holdings, watchlist, and
//! the stock-study rotation. None of these touch the network.

use chrono::Local;
use clubdash_lib::club::{
    self, AllocationSlice, Completion, Headline, Holding, Rotation, WatchlistItem, CLUB_NAME,
    MARKET_HEADLINES, NEXT_UP_MEMBER, PORTFOLIO, RECENT_COMPLETIONS, ROTATION, WATCHLIST,
};
use clubdash_lib::format::{format_currency, format_date, format_percent};
use serde::Serialize;

use crate::output::{
    build_allocation_rows, build_completion_rows, build_headline_rows, build_holding_rows,
    build_rotation_rows, build_watchlist_rows, print_json, print_section, print_table,
    OutputFormat,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardView {
    club: &'static str,
    total_value: f64,
    total_gain_pct: f64,
    allocation: Vec<AllocationSlice>,
    holdings: &'static [Holding],
    watchlist: &'static [WatchlistItem],
    rotation: Rotation,
    next_up_member: &'static str,
    recent_completions: &'static [Completion],
    headlines: &'static [Headline],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RotationView {
    rotation: Rotation,
    next_up_member: &'static str,
    recent_completions: &'static [Completion],
}

pub fn run_dashboard(format: &OutputFormat) {
    let allocation = club::allocation();
    if let OutputFormat::Json = format {
        print_json(&DashboardView {
            club: CLUB_NAME,
            total_value: PORTFOLIO.total_value,
            total_gain_pct: PORTFOLIO.total_gain_pct,
            allocation,
            holdings: PORTFOLIO.holdings,
            watchlist: WATCHLIST,
            rotation: ROTATION,
            next_up_member: NEXT_UP_MEMBER,
            recent_completions: RECENT_COMPLETIONS,
            headlines: MARKET_HEADLINES,
        });
        return;
    }

    println!(
        "{} | {} ({}) as of {}",
        CLUB_NAME,
        format_currency(Some(PORTFOLIO.total_value)),
        format_percent(Some(PORTFOLIO.total_gain_pct)),
        Local::now().format("%b %-d, %Y"),
    );
    println!(
        "Current study: {} by {}, due {}. Next up: {}",
        ROTATION.current.ticker,
        ROTATION.current.assigned_to,
        format_date(ROTATION.current.due_date),
        NEXT_UP_MEMBER,
    );

    print_section("Allocation", &build_allocation_rows(&allocation), format);
    print_section("Holdings", &build_holding_rows(PORTFOLIO.holdings), format);
    print_section("Watchlist", &build_watchlist_rows(WATCHLIST), format);
    print_section(
        "Recent Studies",
        &build_completion_rows(RECENT_COMPLETIONS),
        format,
    );
    print_section("Headlines", &build_headline_rows(MARKET_HEADLINES), format);
}

pub fn run_holdings(format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&PORTFOLIO.holdings),
        _ => print_table(&build_holding_rows(PORTFOLIO.holdings), format),
    }
}

pub fn run_watchlist(format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&WATCHLIST),
        _ => print_table(&build_watchlist_rows(WATCHLIST), format),
    }
}

pub fn run_rotation(format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&RotationView {
            rotation: ROTATION,
            next_up_member: NEXT_UP_MEMBER,
            recent_completions: RECENT_COMPLETIONS,
        }),
        _ => {
            print_table(&build_rotation_rows(&ROTATION), format);
            print_section(
                "Recent Studies",
                &build_completion_rows(RECENT_COMPLETIONS),
                format,
            );
        }
    }
}
