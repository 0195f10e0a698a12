//! Field normalization for FMP payloads.
//!
//! FMP names the same field differently across endpoints and API versions
//! (`peRatioTTM` vs `peRatio`, `analystRatingsbuy` vs `buy`). Each field has
//! an ordered alias list below; the first alias present with a non-null value
//! is the candidate, and the field is only populated if that candidate is a
//! finite number. Later aliases are never consulted once a candidate exists.

use serde_json::{Map, Value};

type Record = Map<String, Value>;

pub mod aliases {
    pub const PRICE_DATE: &[&str] = &["date", "label"];
    pub const PRICE_CLOSE: &[&str] = &["close", "adjClose", "price"];

    pub const PE: &[&str] = &["peRatioTTM", "peRatio", "priceEarningsRatioTTM", "priceEarningsRatio"];
    pub const PS: &[&str] = &["priceToSalesRatioTTM", "priceToSalesRatio"];
    pub const EV_TO_EBITDA: &[&str] = &[
        "enterpriseValueOverEBITDATTM",
        "evToEbitdaTTM",
        "enterpriseValueOverEBITDA",
        "evToEBITDA",
    ];
    pub const MARKET_CAP: &[&str] = &["marketCapTTM", "marketCap"];
    pub const FCF_PER_SHARE: &[&str] = &["freeCashFlowPerShareTTM", "freeCashFlowPerShare"];

    pub const INCOME_DATE: &[&str] = &["date", "fillingDate", "acceptedDate"];
    pub const REVENUE: &[&str] = &["revenue", "totalRevenue"];
    pub const NET_INCOME: &[&str] = &["netIncome", "netIncomeLoss"];

    pub const RATING_BUY: &[&str] = &["analystRatingsbuy", "analystRatingsBuy", "buy"];
    pub const RATING_HOLD: &[&str] = &["analystRatingsHold", "hold"];
    pub const RATING_SELL: &[&str] = &["analystRatingsSell", "sell"];
    pub const RATING_STRONG_BUY: &[&str] = &["analystRatingsStrongBuy", "strongBuy"];
    pub const RATING_STRONG_SELL: &[&str] = &["analystRatingsStrongSell", "strongSell"];

    pub const TARGET_LOW: &[&str] = &["targetLow", "priceTargetLow"];
    pub const TARGET_AVG: &[&str] = &["targetConsensus", "targetMedian", "priceTargetAverage"];
    pub const TARGET_HIGH: &[&str] = &["targetHigh", "priceTargetHigh"];

    pub const EPS_ESTIMATE: &[&str] = &["estimatedEpsAvg", "epsAvg", "estimatedEps"];

    pub const INSIDER_FILER: &[&str] = &["reportingName", "name", "filer"];
    pub const INSIDER_POSITION: &[&str] = &["typeOfOwner", "position", "title"];
    pub const INSIDER_TRANSACTION: &[&str] = &["transactionType", "acquistionOrDisposition"];
    pub const INSIDER_DATE: &[&str] = &["transactionDate", "filingDate"];

    pub const NEWS_HEADLINE: &[&str] = &["title", "headline"];
    pub const NEWS_URL: &[&str] = &["url", "link"];
    pub const NEWS_PUBLISHED: &[&str] = &["publishedDate", "date"];
    pub const NEWS_SITE: &[&str] = &["site", "source", "publisher"];
}

/// Coerces a JSON value to a finite `f64`.
///
/// Accepts numbers and numeric strings (surrounding whitespace ignored).
/// Booleans, empty strings, `"N/A"`, `"NaN"`, and infinities yield `None`.
pub fn finite_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Returns the first non-null value among `keys`.
pub fn candidate<'a>(record: &'a Record, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|value| !value.is_null())
}

/// Numeric field lookup through an alias list.
pub fn pick_number(record: &Record, keys: &[&str]) -> Option<f64> {
    candidate(record, keys).and_then(finite_number)
}

/// Count field lookup: the candidate must be a non-negative whole number.
pub fn pick_count(record: &Record, keys: &[&str]) -> Option<u32> {
    let n = pick_number(record, keys)?;
    if n < 0.0 || n.fract() != 0.0 || n > f64::from(u32::MAX) {
        return None;
    }
    Some(n as u32)
}

/// Text field lookup. Numbers are rendered as text; blank strings yield `None`.
pub fn pick_text(record: &Record, keys: &[&str]) -> Option<String> {
    match candidate(record, keys)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// All object records in a payload.
///
/// Accepts a top-level array, an object wrapping the array under `wrapper`,
/// or a single bare object. Non-object array entries are skipped.
pub fn records<'a>(payload: &'a Value, wrapper: Option<&str>) -> Vec<&'a Record> {
    let list = match (payload, wrapper) {
        (Value::Object(obj), Some(key)) => match obj.get(key) {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        (Value::Object(obj), None) => return vec![obj],
        (Value::Array(items), _) => items,
        _ => return Vec::new(),
    };
    list.iter().filter_map(Value::as_object).collect()
}

/// The first object record in a payload, if any.
pub fn first_record(payload: &Value) -> Option<&Record> {
    records(payload, None).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Record {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn finite_number_accepts_numbers_and_numeric_strings() {
        assert_eq!(finite_number(&json!(28.4)), Some(28.4));
        assert_eq!(finite_number(&json!(-3)), Some(-3.0));
        assert_eq!(finite_number(&json!("1500000000000")), Some(1.5e12));
        assert_eq!(finite_number(&json!(" 12.5 ")), Some(12.5));
    }

    #[test]
    fn finite_number_rejects_non_finite_and_garbage() {
        assert_eq!(finite_number(&json!("N/A")), None);
        assert_eq!(finite_number(&json!("NaN")), None);
        assert_eq!(finite_number(&json!("inf")), None);
        assert_eq!(finite_number(&json!("")), None);
        assert_eq!(finite_number(&json!(true)), None);
        assert_eq!(finite_number(&json!(null)), None);
        assert_eq!(finite_number(&json!([1])), None);
    }

    #[test]
    fn first_non_null_alias_wins() {
        let record = obj(json!({"peRatioTTM": null, "peRatio": 21.0, "priceEarningsRatio": 99.0}));
        assert_eq!(pick_number(&record, aliases::PE), Some(21.0));
    }

    #[test]
    fn unparsable_candidate_does_not_fall_through() {
        let record = obj(json!({"peRatioTTM": "N/A", "peRatio": 21.0}));
        assert_eq!(pick_number(&record, aliases::PE), None);
    }

    #[test]
    fn missing_field_is_none() {
        let record = obj(json!({"other": 1}));
        assert_eq!(pick_number(&record, aliases::MARKET_CAP), None);
        assert_eq!(pick_text(&record, aliases::NEWS_URL), None);
    }

    #[test]
    fn counts_must_be_whole_and_non_negative() {
        let record = obj(json!({"buy": 12, "hold": "4", "sell": -1, "strongBuy": 2.5}));
        assert_eq!(pick_count(&record, aliases::RATING_BUY), Some(12));
        assert_eq!(pick_count(&record, aliases::RATING_HOLD), Some(4));
        assert_eq!(pick_count(&record, aliases::RATING_SELL), None);
        assert_eq!(pick_count(&record, aliases::RATING_STRONG_BUY), None);
    }

    #[test]
    fn text_trims_and_renders_numbers() {
        let record = obj(json!({"title": "  Headline ", "site": "", "url": 42}));
        assert_eq!(pick_text(&record, aliases::NEWS_HEADLINE).as_deref(), Some("Headline"));
        assert_eq!(pick_text(&record, aliases::NEWS_SITE), None);
        assert_eq!(pick_text(&record, aliases::NEWS_URL).as_deref(), Some("42"));
    }

    #[test]
    fn records_handles_array_object_and_wrapper() {
        let array = json!([{"a": 1}, "skip", {"a": 2}]);
        assert_eq!(records(&array, None).len(), 2);

        let single = json!({"a": 1});
        assert_eq!(records(&single, None).len(), 1);

        let wrapped = json!({"symbol": "AAPL", "historical": [{"a": 1}, {"a": 2}, {"a": 3}]});
        assert_eq!(records(&wrapped, Some("historical")).len(), 3);

        let empty_wrapper = json!({});
        assert!(records(&empty_wrapper, Some("historical")).is_empty());

        assert!(records(&json!(null), None).is_empty());
        assert!(first_record(&json!([])).is_none());
    }
}
