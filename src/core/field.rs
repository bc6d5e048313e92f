//! Field value types and ordering

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A polymorphic field value that can hold different types
///
/// Records expose their sortable fields through this type. An absent value is
/// represented by `None` at the call site, never by a variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
}

impl FieldValue {
    /// Ascending order between two present values.
    ///
    /// Numbers compare numerically (integers and floats mix), dates
    /// chronologically, booleans `false < true` and strings through
    /// [`collate`]. Values of different kinds are reported as equal so that a
    /// stable sort keeps their relative order.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        use FieldValue::*;

        match (self, other) {
            (String(a), String(b)) => collate(a, b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Integer(a), Float(b)) => (*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal),
            (Float(a), Integer(b)) => a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal),
            (Float(a), Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Boolean(a), Boolean(b)) => a.cmp(b),
            (DateTime(a), DateTime(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

/// Text ordering for display columns such as `name` and `number`.
///
/// Letters are compared case-insensitively first (`"а" < "Б" < "в"`), and only
/// strings that are equal under case folding fall back to code point order so
/// the result stays total.
pub fn collate(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_field_value_from() {
        assert_eq!(FieldValue::from("test"), FieldValue::String("test".to_string()));
        assert_eq!(FieldValue::from(42i64), FieldValue::Integer(42));
    }

    #[test]
    fn test_field_value_untagged_json() {
        assert_eq!(serde_json::to_value(FieldValue::Integer(42)).unwrap(), 42);
        assert_eq!(serde_json::to_value(FieldValue::from("x")).unwrap(), "x");
    }

    #[test]
    fn test_compare_numbers() {
        assert_eq!(FieldValue::Integer(1).compare(&FieldValue::Integer(2)), Ordering::Less);
        assert_eq!(FieldValue::Float(2.5).compare(&FieldValue::Integer(2)), Ordering::Greater);
        assert_eq!(FieldValue::Integer(3).compare(&FieldValue::Float(3.0)), Ordering::Equal);
        assert_eq!(
            FieldValue::Float(f64::NAN).compare(&FieldValue::Float(1.0)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_compare_dates() {
        let earlier = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(
            FieldValue::from(earlier).compare(&FieldValue::from(later)),
            Ordering::Less
        );
    }

    #[test]
    fn test_compare_mixed_kinds_is_equal() {
        assert_eq!(
            FieldValue::from("10").compare(&FieldValue::Integer(9)),
            Ordering::Equal
        );
        assert_eq!(
            FieldValue::Boolean(true).compare(&FieldValue::from("a")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_collate_ignores_case_first() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("Квартира", "дом"), Ordering::Greater);
        assert_eq!(collate("дом", "Квартира"), Ordering::Less);
    }

    #[test]
    fn test_collate_is_total() {
        assert_ne!(collate("Дом", "дом"), Ordering::Equal);
        assert_eq!(collate("дом", "дом"), Ordering::Equal);
    }

    #[test]
    fn test_serde_untagged() {
        let json = serde_json::to_string(&FieldValue::Integer(7)).unwrap();
        assert_eq!(json, "7");
        let json = serde_json::to_string(&FieldValue::from("ЗО-1")).unwrap();
        assert_eq!(json, "\"ЗО-1\"");
    }
}
