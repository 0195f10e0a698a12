//! Static investment-club data: holdings, watchlist, study rotation, and
//! company blurbs.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub ticker: &'static str,
    pub shares: u32,
    pub market_value: f64,
    pub gain_pct: f64,
    /// ISO date of the first purchase.
    pub first_buy: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub total_value: f64,
    pub total_gain_pct: f64,
    pub holdings: &'static [Holding],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WatchlistItem {
    pub ticker: &'static str,
    pub note: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub ticker: &'static str,
    pub assigned_to: &'static str,
    pub due_date: &'static str,
}

/// The stock-study rotation: who is presenting now and who follows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rotation {
    pub current: Assignment,
    pub next_up: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Completion {
    pub ticker: &'static str,
    pub member: &'static str,
    pub date: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Headline {
    pub ticker: &'static str,
    pub headline: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockDetail {
    pub name: String,
    pub description: String,
}

/// One slice of the allocation breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationSlice {
    pub name: String,
    pub value: f64,
}

pub const CLUB_NAME: &str = "Stevens Legacy";

pub const PORTFOLIO: Portfolio = Portfolio {
    total_value: 23189.28,
    total_gain_pct: 41.2,
    holdings: &[
        Holding { ticker: "NVDA", shares: 41, market_value: 7334.08, gain_pct: 88.9, first_buy: "2024-01-17" },
        Holding { ticker: "FBTC", shares: 39, market_value: 2875.08, gain_pct: 42.0, first_buy: "2024-06-13" },
        Holding { ticker: "JPM", shares: 9, market_value: 2682.18, gain_pct: 14.8, first_buy: "2024-04-15" },
        Holding { ticker: "AAPL", shares: 8, market_value: 2171.92, gain_pct: 25.1, first_buy: "2024-04-15" },
        Holding { ticker: "AMD", shares: 10, market_value: 2037.80, gain_pct: 51.2, first_buy: "2024-07-15" },
        Holding { ticker: "VEEV", shares: 7, market_value: 1708.42, gain_pct: 6.9, first_buy: "2025-04-29" },
        Holding { ticker: "PLTR", shares: 8, market_value: 1238.80, gain_pct: 30.9, first_buy: "2025-06-23" },
        Holding { ticker: "SERV", shares: 92, market_value: 796.72, gain_pct: 49.5, first_buy: "2024-09-09" },
        Holding { ticker: "DIS", shares: 8, market_value: 834.24, gain_pct: 1.2, first_buy: "2024-02-20" },
        Holding { ticker: "NFLX", shares: 2, market_value: 208.62, gain_pct: 24.1, first_buy: "2025-01-13" },
    ],
};

pub const WATCHLIST: &[WatchlistItem] = &[
    WatchlistItem { ticker: "UNP", note: "Railroads; stable performer" },
    WatchlistItem { ticker: "EME", note: "Construction/engineering" },
    WatchlistItem { ticker: "INTC", note: "Semiconductors; next assignment" },
];

pub const ROTATION: Rotation = Rotation {
    current: Assignment {
        ticker: "INTC",
        assigned_to: "Charles Lamont Allen",
        due_date: "2025-11-23",
    },
    next_up: &["Joe E Stevens", "Justin H Bell", "Melissa R"],
};

pub const NEXT_UP_MEMBER: &str = "Justin H Bell";

pub const RECENT_COMPLETIONS: &[Completion] = &[
    Completion { ticker: "NVDA", member: "Joe E Stevens", date: "Jan 17" },
    Completion { ticker: "DIS", member: "Melissa R", date: "Feb 20" },
    Completion { ticker: "JPM", member: "Charles Lamont Allen", date: "Apr 15" },
];

pub const MARKET_HEADLINES: &[Headline] = &[
    Headline { ticker: "NVDA", headline: "NVIDIA shares rally following GTC 2024 keynotes" },
    Headline { ticker: "AAPL", headline: "Apple talks with Google to let Gemini power iPhone AI features" },
    Headline { ticker: "JPM", headline: "JPMorgan Chase raises dividend by 10%" },
];

/// Ticker, company name, description.
const STOCK_DETAILS: &[(&str, &str, &str)] = &[
    ("NVDA", "NVIDIA Corporation", "NVIDIA Corporation is the global leader in AI computing. The company's GPUs are essential for deep learning and AI applications."),
    ("FBTC", "Fidelity Bitcoin ETF", "Fidelity Wise Origin Bitcoin Fund. A spot Bitcoin ETF that seeks to track the performance of bitcoin."),
    ("JPM", "JPMorgan Chase & Co.", "A leading global financial services firm with assets of $3.7 trillion and operations worldwide."),
    ("AAPL", "Apple Inc.", "Designs, manufactures, and markets smartphones, personal computers, tablets, wearables, and accessories."),
    ("AMD", "Advanced Micro Devices", "A global semiconductor company that develops computer processors and related technologies for business and consumer markets."),
    ("VEEV", "Veeva Systems Inc.", "A leader in cloud-based software for the global life sciences industry."),
    ("PLTR", "Palantir Technologies", "Builds software that empowers organizations to effectively integrate their data, decisions, and operations."),
    ("SERV", "Serve Robotics", "Develops advanced AI-powered low-emissions delivery robots."),
    ("DIS", "The Walt Disney Company", "A diversified worldwide entertainment company with operations in media, theme parks, and products."),
    ("NFLX", "Netflix, Inc.", "A subscription streaming service and production company offering a library of films and television series."),
    ("UNP", "Union Pacific Corporation", "Operates North America's premier railroad franchise, covering 23 states in the western two-thirds of the United States."),
    ("EME", "EMCOR Group, Inc.", "A leader in mechanical and electrical construction, industrial and energy infrastructure, and building services."),
    ("INTC", "Intel Corporation", "A multinational corporation and technology company, one of the world's largest semiconductor chip manufacturers."),
];

const UNKNOWN_DESCRIPTION: &str = "Company overview not available.";

/// Number of named slices in [`allocation`]; the rest collapse into "Other".
const TOP_SLICES: usize = 5;

/// The club position in `ticker`, if it holds one.
pub fn holding(ticker: &str) -> Option<&'static Holding> {
    PORTFOLIO
        .holdings
        .iter()
        .find(|h| h.ticker.eq_ignore_ascii_case(ticker))
}

/// Name and description for `ticker`. Unknown tickers get the ticker as
/// name and a stock "not available" description.
pub fn stock_detail(ticker: &str) -> StockDetail {
    STOCK_DETAILS
        .iter()
        .find(|(t, _, _)| t.eq_ignore_ascii_case(ticker))
        .map(|(_, name, description)| StockDetail {
            name: name.to_string(),
            description: description.to_string(),
        })
        .unwrap_or_else(|| StockDetail {
            name: ticker.to_string(),
            description: UNKNOWN_DESCRIPTION.to_string(),
        })
}

/// Portfolio breakdown by market value: the five largest holdings followed
/// by one "Other" slice summing the remainder.
pub fn allocation() -> Vec<AllocationSlice> {
    let mut sorted: Vec<&Holding> = PORTFOLIO.holdings.iter().collect();
    sorted.sort_by(|a, b| b.market_value.total_cmp(&a.market_value));

    let (top, rest) = sorted.split_at(TOP_SLICES.min(sorted.len()));
    let mut slices: Vec<AllocationSlice> = top
        .iter()
        .map(|h| AllocationSlice {
            name: h.ticker.to_string(),
            value: h.market_value,
        })
        .collect();
    slices.push(AllocationSlice {
        name: "Other".to_string(),
        value: rest.iter().map(|h| h.market_value).sum(),
    });
    slices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holding_lookup_is_case_insensitive() {
        let nvda = holding("nvda").unwrap();
        assert_eq!(nvda.shares, 41);
        assert_eq!(nvda.first_buy, "2024-01-17");
        assert!(holding("UNP").is_none());
    }

    #[test]
    fn stock_detail_known_and_unknown() {
        assert_eq!(stock_detail("INTC").name, "Intel Corporation");
        let unknown = stock_detail("ZZZZ");
        assert_eq!(unknown.name, "ZZZZ");
        assert_eq!(unknown.description, UNKNOWN_DESCRIPTION);
    }

    #[test]
    fn every_holding_and_watch_item_has_details() {
        for ticker in PORTFOLIO
            .holdings
            .iter()
            .map(|h| h.ticker)
            .chain(WATCHLIST.iter().map(|w| w.ticker))
        {
            assert_ne!(stock_detail(ticker).description, UNKNOWN_DESCRIPTION, "{}", ticker);
        }
    }

    #[test]
    fn allocation_is_top_five_plus_other() {
        let slices = allocation();
        assert_eq!(slices.len(), 6);
        let names: Vec<_> = slices.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["NVDA", "FBTC", "JPM", "AAPL", "AMD", "Other"]);

        let other = slices.last().unwrap().value;
        let expected = 1708.42 + 1238.80 + 796.72 + 834.24 + 208.62;
        assert!((other - expected).abs() < 1e-6);
    }

    #[test]
    fn allocation_covers_whole_portfolio() {
        let total: f64 = allocation().iter().map(|s| s.value).sum();
        let holdings: f64 = PORTFOLIO.holdings.iter().map(|h| h.market_value).sum();
        assert!((total - holdings).abs() < 1e-6);
    }

    #[test]
    fn current_assignment_is_on_watchlist() {
        assert!(WATCHLIST.iter().any(|w| w.ticker == ROTATION.current.ticker));
        assert!(ROTATION.next_up.contains(&NEXT_UP_MEMBER));
    }
}
