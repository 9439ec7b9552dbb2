//! Typed accessors over a mutation's free-form `mutation_properties` bag.
//!
//! Accessors never raise; a missing or malformed value is signalled with a
//! sentinel (empty string, [`invalid_date`], zero) for downstream handler
//! validation to interpret.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;

/// A read-only view over a single mutation's `mutation_properties` object.
pub struct PropertyBag<'a> {
    properties: &'a serde_json::Map<String, Value>,
}

impl<'a> PropertyBag<'a> {
    pub fn new(properties: &'a serde_json::Map<String, Value>) -> Self {
        Self { properties }
    }

    /// Returns the value coerced to a string, or an empty string if absent.
    pub fn string(&self, key: &str) -> String {
        self.raw_string(key).unwrap_or_default()
    }

    /// Returns `None` if the key is absent or coerces to an empty string.
    pub fn nullable_string(&self, key: &str) -> Option<String> {
        self.raw_string(key).filter(|s| !s.is_empty())
    }

    fn raw_string(&self, key: &str) -> Option<String> {
        match self.properties.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Parses an ISO calendar date (`YYYY-MM-DD`). Returns [`invalid_date`]
    /// if the key is absent or the value doesn't parse.
    pub fn date(&self, key: &str) -> NaiveDate {
        self.nullable_date(key).unwrap_or_else(invalid_date)
    }

    /// `None` if the key is absent or the value doesn't parse as a date.
    pub fn nullable_date(&self, key: &str) -> Option<NaiveDate> {
        let raw = match self.properties.get(key)? {
            Value::String(s) => s.as_str(),
            _ => return None,
        };
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }

    /// Parses a numeric (integer, float, decimal, or numeric-string) value.
    /// Returns `0` if absent or unparseable.
    pub fn decimal(&self, key: &str) -> Decimal {
        match self.properties.get(key) {
            Some(Value::Number(n)) => Decimal::from_str(&n.to_string()).unwrap_or_default(),
            Some(Value::String(s)) => Decimal::from_str(s.trim()).unwrap_or_default(),
            _ => Decimal::ZERO,
        }
    }
}

/// Sentinel "invalid" date returned when a required date property is
/// absent or unparseable: `0001-01-01`.
pub fn invalid_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).expect("0001-01-01 is a valid calendar date")
}
