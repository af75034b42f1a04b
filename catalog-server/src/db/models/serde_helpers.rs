//! Common serde helpers for values coming from SurrealDB and from admin forms
//!
//! 支持两种 RecordId 格式的反序列化：
//! - 字符串格式 "table:id" (来自 API JSON)
//! - SurrealDB 原生格式 (来自数据库)
//!
//! Numeric form fields arrive as numbers *or* text; the lenient helpers
//! coerce both and treat a blank string as "field absent", never as zero.

use serde::{Deserialize, Deserializer, Serializer};
use surrealdb::RecordId;

/// Deserialize bool that treats null as true
pub fn bool_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(true))
}

/// Number-or-text payload value
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Lenient {
    Number(f64),
    Text(String),
}

impl Lenient {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Lenient::Number(n) => Some(*n),
            Lenient::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    trimmed.parse::<f64>().ok()
                }
            }
        }
    }
}

/// Deserialize an optional number that may arrive as text.
///
/// Blank or unparseable text maps to None; required-field enforcement
/// happens in the service layer, not here.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Lenient>::deserialize(deserializer)?.and_then(|v| v.as_f64()))
}

/// Deserialize an optional integer that may arrive as text (truncating)
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Lenient>::deserialize(deserializer)?
        .and_then(|v| v.as_f64())
        .map(|n| n as i64))
}

/// 内部辅助：同时支持字符串和原生 RecordId 格式
#[derive(Debug, Clone)]
struct FlexibleRecordId(RecordId);

impl<'de> Deserialize<'de> for FlexibleRecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        use std::fmt;

        struct FlexibleVisitor;

        impl<'de> Visitor<'de> for FlexibleVisitor {
            type Value = FlexibleRecordId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string 'table:id' or RecordId")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                value
                    .parse::<RecordId>()
                    .map(FlexibleRecordId)
                    .map_err(|_| de::Error::custom(format!("invalid RecordId: {}", value)))
            }

            fn visit_map<M>(self, map: M) -> Result<Self::Value, M::Error>
            where
                M: de::MapAccess<'de>,
            {
                // 委托给 RecordId 原生反序列化
                RecordId::deserialize(de::value::MapAccessDeserializer::new(map))
                    .map(FlexibleRecordId)
            }
        }

        deserializer.deserialize_any(FlexibleVisitor)
    }
}

/// Option<RecordId> serialization as "table:id" string
pub mod option_record_id {
    use super::*;

    pub fn serialize<S>(id: &Option<RecordId>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match id {
            Some(id) => s.serialize_some(&id.to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<RecordId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<FlexibleRecordId>::deserialize(d).map(|opt| opt.map(|f| f.0))
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default, deserialize_with = "super::lenient_f64")]
        price: Option<f64>,
        #[serde(default, deserialize_with = "super::lenient_i64")]
        order: Option<i64>,
        #[serde(default = "default_true", deserialize_with = "super::bool_true")]
        is_listed: bool,
    }

    fn default_true() -> bool {
        true
    }

    #[test]
    fn coerces_numeric_text() {
        let p: Payload = serde_json::from_str(r#"{"price": "499.5", "order": "3"}"#).unwrap();
        assert_eq!(p.price, Some(499.5));
        assert_eq!(p.order, Some(3));
    }

    #[test]
    fn blank_text_means_absent() {
        let p: Payload = serde_json::from_str(r#"{"price": "", "order": "  "}"#).unwrap();
        assert_eq!(p.price, None);
        assert_eq!(p.order, None);
    }

    #[test]
    fn passes_numbers_through() {
        let p: Payload = serde_json::from_str(r#"{"price": 1200, "order": 2}"#).unwrap();
        assert_eq!(p.price, Some(1200.0));
        assert_eq!(p.order, Some(2));
    }

    #[test]
    fn garbage_text_means_absent() {
        let p: Payload = serde_json::from_str(r#"{"price": "12abc"}"#).unwrap();
        assert_eq!(p.price, None);
    }

    #[test]
    fn null_listed_flag_defaults_true() {
        let p: Payload = serde_json::from_str(r#"{"is_listed": null}"#).unwrap();
        assert!(p.is_listed);
        let p: Payload = serde_json::from_str(r#"{"is_listed": false}"#).unwrap();
        assert!(!p.is_listed);
        let p: Payload = serde_json::from_str(r#"{}"#).unwrap();
        assert!(p.is_listed);
    }
}
