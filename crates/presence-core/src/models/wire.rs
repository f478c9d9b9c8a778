//! Lenient field decoders for server records.
//!
//! The backend is inconsistent about scalar types (ids and phone numbers
//! arrive as numbers or strings, hours as numbers or numeric strings). A
//! value of the wrong scalar type is coerced when it can be and treated as
//! absent otherwise, so one odd record never fails a whole list.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Strings as-is, numbers and booleans in their JSON text form.
pub(crate) fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Numbers as-is, strings parsed as decimals.
pub(crate) fn loose_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Non-negative integers that fit in `u32`, from numbers or strings.
pub(crate) fn loose_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "loose_string")]
        id: Option<String>,
        #[serde(default, deserialize_with = "loose_f64")]
        hours: Option<f64>,
        #[serde(default, deserialize_with = "loose_u32")]
        age: Option<u32>,
    }

    fn sample(json: &str) -> Sample {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_coerces_mismatched_scalars() {
        let s = sample(r#"{"id": 42, "hours": "7.5", "age": "31"}"#);
        assert_eq!(s.id.as_deref(), Some("42"));
        assert_eq!(s.hours, Some(7.5));
        assert_eq!(s.age, Some(31));
    }

    #[test]
    fn test_unusable_values_are_absent() {
        let s = sample(r#"{"id": {"oid": "x"}, "hours": "n/a", "age": -3}"#);
        assert_eq!(s.id, None);
        assert_eq!(s.hours, None);
        assert_eq!(s.age, None);

        let missing = sample("{}");
        assert_eq!(missing.id, None);
        assert_eq!(missing.hours, None);

        let nulls = sample(r#"{"id": null, "hours": null, "age": null}"#);
        assert_eq!(nulls.id, None);
        assert_eq!(nulls.age, None);
    }
}
