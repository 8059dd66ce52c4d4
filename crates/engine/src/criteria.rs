//! Criteria map - the engine's input boundary.
//!
//! Callers (HTTP handlers, the CLI) hand the engine a flat mapping from
//! filter-key strings to already-deserialized values. Query-string transports
//! deliver every value as text; JSON transports deliver typed values. The
//! coercion helpers here bridge both worlds and encode the engine's failure
//! policy: un-coercible values degrade to "empty result", blank values to
//! "no filtering".

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A single already-deserialized filter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Boolean flag.
    Bool(bool),
    /// Numeric value (integers and decimals alike).
    Number(Decimal),
    /// Free-form text.
    Text(String),
    /// List of strings.
    List(Vec<String>),
}

/// Outcome of coercing a raw [`FilterValue`] to a typed one.
///
/// The three variants map one-to-one onto the engine's failure policy:
/// blank input leaves the clause as a pass-through, un-coercible input makes
/// the clause select the empty set, and a usable value filters normally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coerced<T> {
    /// Empty/blank input: the clause passes every record through.
    Blank,
    /// Un-coercible input: the clause selects the empty set.
    Invalid,
    /// Usable value.
    Value(T),
}

impl FilterValue {
    /// Coerce to text. Numbers render to their canonical string form.
    #[must_use]
    pub fn coerce_text(&self) -> Coerced<String> {
        match self {
            Self::Text(s) if s.trim().is_empty() => Coerced::Blank,
            Self::Text(s) => Coerced::Value(s.trim().to_owned()),
            Self::Number(n) => Coerced::Value(n.to_string()),
            Self::Bool(_) | Self::List(_) => Coerced::Invalid,
        }
    }

    /// Coerce to a decimal number.
    #[must_use]
    pub fn coerce_number(&self) -> Coerced<Decimal> {
        match self {
            Self::Number(n) => Coerced::Value(*n),
            Self::Text(s) if s.trim().is_empty() => Coerced::Blank,
            Self::Text(s) => s
                .trim()
                .parse::<Decimal>()
                .map_or(Coerced::Invalid, Coerced::Value),
            Self::Bool(_) | Self::List(_) => Coerced::Invalid,
        }
    }

    /// Coerce to an integer. Fractional numbers are invalid.
    #[must_use]
    pub fn coerce_integer(&self) -> Coerced<i64> {
        match self.coerce_number() {
            Coerced::Blank => Coerced::Blank,
            Coerced::Invalid => Coerced::Invalid,
            Coerced::Value(n) => {
                if n.is_integer() {
                    n.to_i64().map_or(Coerced::Invalid, Coerced::Value)
                } else {
                    Coerced::Invalid
                }
            }
        }
    }

    /// Coerce to a boolean. Text accepts `true`/`false`/`1`/`0`
    /// (case-insensitive).
    #[must_use]
    pub fn coerce_boolean(&self) -> Coerced<bool> {
        match self {
            Self::Bool(b) => Coerced::Value(*b),
            Self::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "" => Coerced::Blank,
                "true" | "1" => Coerced::Value(true),
                "false" | "0" => Coerced::Value(false),
                _ => Coerced::Invalid,
            },
            Self::Number(_) | Self::List(_) => Coerced::Invalid,
        }
    }

    /// Coerce to a UTC timestamp.
    ///
    /// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` (and the `T`-separated
    /// variant) interpreted as UTC, and bare `YYYY-MM-DD` (midnight UTC).
    #[must_use]
    pub fn coerce_datetime(&self) -> Coerced<DateTime<Utc>> {
        match self {
            Self::Text(s) if s.trim().is_empty() => Coerced::Blank,
            Self::Text(s) => parse_datetime(s.trim()).map_or(Coerced::Invalid, Coerced::Value),
            Self::Number(_) | Self::Bool(_) | Self::List(_) => Coerced::Invalid,
        }
    }

    /// Coerce to a two-sided decimal range `(min, max)`.
    ///
    /// Accepts a two-element list, `"min,max"` text (either side may be
    /// blank), or a bare number treated as the lower bound.
    #[must_use]
    pub fn coerce_decimal_range(&self) -> Coerced<(Option<Decimal>, Option<Decimal>)> {
        match self {
            Self::Number(n) => Coerced::Value((Some(*n), None)),
            _ => match self.range_bounds() {
                Coerced::Blank => Coerced::Blank,
                Coerced::Invalid => Coerced::Invalid,
                Coerced::Value((min, max)) => {
                    parse_bounds(min.as_deref(), max.as_deref(), |s| {
                        s.parse::<Decimal>().ok()
                    })
                }
            },
        }
    }

    /// Coerce to a two-sided timestamp range `(min, max)`.
    #[must_use]
    pub fn coerce_datetime_range(&self) -> Coerced<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
        match self.range_bounds() {
            Coerced::Blank => Coerced::Blank,
            Coerced::Invalid => Coerced::Invalid,
            Coerced::Value((min, max)) => {
                parse_bounds(min.as_deref(), max.as_deref(), parse_datetime)
            }
        }
    }

    /// Split a range-shaped value into raw `(min, max)` bound strings.
    fn range_bounds(&self) -> Coerced<(Option<String>, Option<String>)> {
        let bound = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_owned())
        };
        match self {
            Self::List(items) => {
                let mut it = items.iter();
                let min = it.next().map(String::as_str).and_then(bound);
                let max = it.next().map(String::as_str).and_then(bound);
                match (min, max) {
                    (None, None) => Coerced::Blank,
                    pair => Coerced::Value(pair),
                }
            }
            Self::Text(s) => {
                let (raw_min, raw_max) = s.split_once(',').unwrap_or((s.as_str(), ""));
                match (bound(raw_min), bound(raw_max)) {
                    (None, None) => Coerced::Blank,
                    pair => Coerced::Value(pair),
                }
            }
            Self::Number(_) | Self::Bool(_) => Coerced::Invalid,
        }
    }
}

/// Parse each present bound; any unparseable bound invalidates the range.
fn parse_bounds<T>(
    min: Option<&str>,
    max: Option<&str>,
    parse: impl Fn(&str) -> Option<T>,
) -> Coerced<(Option<T>, Option<T>)> {
    let one = |raw: Option<&str>| match raw {
        None => Some(None),
        Some(s) => parse(s).map(Some),
    };
    match (one(min), one(max)) {
        (Some(lo), Some(hi)) => Coerced::Value((lo, hi)),
        _ => Coerced::Invalid,
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        Self::Number(Decimal::from(n))
    }
}

impl From<Decimal> for FilterValue {
    fn from(n: Decimal) -> Self {
        Self::Number(n)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

/// A flat, ordered mapping from filter-key strings to values.
///
/// Unknown keys are ignored by the compilers, so criteria maps may carry
/// unrelated parameters without failing the whole query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Criteria(BTreeMap<String, FilterValue>);

impl Criteria {
    /// Create an empty criteria map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key/value pair, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up the value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.0.get(key)
    }

    /// Iterate over key/value pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for Criteria {
    /// Build a criteria map from raw string pairs (query-string shape).
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k, FilterValue::Text(v)))
                .collect(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_text() {
        assert_eq!(
            FilterValue::from("john").coerce_text(),
            Coerced::Value("john".to_owned())
        );
        assert_eq!(FilterValue::from("   ").coerce_text(), Coerced::Blank);
        assert_eq!(FilterValue::from(true).coerce_text(), Coerced::Invalid);
        assert_eq!(
            FilterValue::from(5i64).coerce_text(),
            Coerced::Value("5".to_owned())
        );
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(
            FilterValue::from("19.99").coerce_number(),
            Coerced::Value("19.99".parse().unwrap())
        );
        assert_eq!(FilterValue::from("abc").coerce_number(), Coerced::Invalid);
        assert_eq!(FilterValue::from("").coerce_number(), Coerced::Blank);
    }

    #[test]
    fn test_coerce_integer_rejects_fractions() {
        assert_eq!(FilterValue::from("3").coerce_integer(), Coerced::Value(3));
        assert_eq!(FilterValue::from("3.5").coerce_integer(), Coerced::Invalid);
        assert_eq!(FilterValue::from("abc").coerce_integer(), Coerced::Invalid);
    }

    #[test]
    fn test_coerce_boolean() {
        assert_eq!(FilterValue::from(true).coerce_boolean(), Coerced::Value(true));
        assert_eq!(
            FilterValue::from("TRUE").coerce_boolean(),
            Coerced::Value(true)
        );
        assert_eq!(
            FilterValue::from("0").coerce_boolean(),
            Coerced::Value(false)
        );
        assert_eq!(FilterValue::from("maybe").coerce_boolean(), Coerced::Invalid);
        assert_eq!(FilterValue::from("").coerce_boolean(), Coerced::Blank);
    }

    #[test]
    fn test_coerce_datetime_formats() {
        for raw in [
            "2024-06-01T12:30:00Z",
            "2024-06-01 12:30:00",
            "2024-06-01T12:30:00",
        ] {
            let Coerced::Value(ts) = FilterValue::from(raw).coerce_datetime() else {
                panic!("expected {raw} to parse");
            };
            assert_eq!(ts.date_naive().to_string(), "2024-06-01");
        }
        assert!(matches!(
            FilterValue::from("2024-06-01").coerce_datetime(),
            Coerced::Value(_)
        ));
        assert_eq!(
            FilterValue::from("not a date").coerce_datetime(),
            Coerced::Invalid
        );
    }

    #[test]
    fn test_coerce_decimal_range_shapes() {
        let both = FilterValue::from("10,20").coerce_decimal_range();
        assert_eq!(
            both,
            Coerced::Value((Some(Decimal::from(10)), Some(Decimal::from(20))))
        );

        let min_only = FilterValue::from("10,").coerce_decimal_range();
        assert_eq!(min_only, Coerced::Value((Some(Decimal::from(10)), None)));

        let max_only = FilterValue::from(",20").coerce_decimal_range();
        assert_eq!(max_only, Coerced::Value((None, Some(Decimal::from(20)))));

        let list = FilterValue::from(vec!["10".to_owned(), "20".to_owned()])
            .coerce_decimal_range();
        assert_eq!(
            list,
            Coerced::Value((Some(Decimal::from(10)), Some(Decimal::from(20))))
        );

        assert_eq!(
            FilterValue::from("abc,20").coerce_decimal_range(),
            Coerced::Invalid
        );
        assert_eq!(FilterValue::from(",").coerce_decimal_range(), Coerced::Blank);
    }

    #[test]
    fn test_criteria_from_pairs_is_text() {
        let criteria: Criteria = vec![("name".to_owned(), "john".to_owned())]
            .into_iter()
            .collect();
        assert_eq!(criteria.get("name"), Some(&FilterValue::from("john")));
    }

    #[test]
    fn test_criteria_serde_untagged() {
        let json = r#"{"has_phone": true, "low_stock": 10, "name": "john", "ids": ["a", "b"]}"#;
        let criteria: Criteria = serde_json::from_str(json).unwrap();
        assert_eq!(criteria.get("has_phone"), Some(&FilterValue::Bool(true)));
        assert_eq!(
            criteria.get("low_stock"),
            Some(&FilterValue::Number(Decimal::from(10)))
        );
        assert_eq!(criteria.get("name"), Some(&FilterValue::from("john")));
        assert_eq!(
            criteria.get("ids"),
            Some(&FilterValue::List(vec!["a".to_owned(), "b".to_owned()]))
        );
    }
}
