//! Display formatting for view-model values.
//!
//! Absent values render as [`PLACEHOLDER`] everywhere.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const PLACEHOLDER: &str = "—";

/// Magnitude suffixes for [`format_compact`], largest first.
const COMPACT_SCALES: [(f64, &str); 3] = [(1e12, "T"), (1e9, "B"), (1e6, "M")];

/// US dollars with thousands separators and two decimals, e.g. `$23,189.28`.
pub fn format_currency(value: Option<f64>) -> String {
    let Some(v) = value else {
        return PLACEHOLDER.to_string();
    };
    let fixed = format!("{:.2}", v.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if v < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(whole), cents)
}

/// Market-cap style magnitude: `1.5T`, `2B`, `640.3M`, or the plain numeral
/// below one million.
pub fn format_compact(value: Option<f64>) -> String {
    let Some(v) = value else {
        return PLACEHOLDER.to_string();
    };
    for (i, (threshold, suffix)) in COMPACT_SCALES.iter().enumerate() {
        if v.abs() < *threshold {
            continue;
        }
        let scaled = (v / threshold * 10.0).round() / 10.0;
        // 999.96M rounds to 1000.0M; show it as 1B instead.
        if scaled.abs() >= 1000.0 && i > 0 {
            let (_, larger) = COMPACT_SCALES[i - 1];
            return format!("{}{}", one_decimal_unless_whole(scaled / 1000.0), larger);
        }
        return format!("{}{}", one_decimal_unless_whole(scaled), suffix);
    }
    plain_number(v)
}

/// Signed two-decimal delta: `+1.23`, `-0.50`, `0.00`.
pub fn format_delta(value: Option<f64>) -> String {
    match value {
        Some(v) if v > 0.0 => format!("+{:.2}", v),
        Some(v) => format!("{:.2}", v),
        None => PLACEHOLDER.to_string(),
    }
}

/// [`format_delta`] with a percent sign.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(_) => format!("{}%", format_delta(value)),
        None => PLACEHOLDER.to_string(),
    }
}

/// Plain two-decimal number for ratios such as P/E.
pub fn format_ratio(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn format_count(value: Option<u32>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn format_text(value: Option<&str>) -> String {
    value.unwrap_or(PLACEHOLDER).to_string()
}

/// `Jan 17, 2024` for ISO dates, date-times, and RFC 3339 timestamps.
/// Anything else is returned unchanged.
pub fn format_date(raw: &str) -> String {
    let trimmed = raw.trim();
    let parsed = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        });
    match parsed {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

fn one_decimal_unless_whole(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else {
        format!("{:.1}", v)
    }
}

fn plain_number(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else {
        v.to_string()
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
