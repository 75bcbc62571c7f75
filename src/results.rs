use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Key every record carries; pinned as the first output column
pub const URL_KEY: &str = "url";

/// Key carrying the failure message on error rows
pub const ERROR_KEY: &str = "error";

/// A single feature value. Flags are stored as `Int(0 | 1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl FeatureValue {
    pub fn flag(value: bool) -> Self {
        FeatureValue::Int(i64::from(value))
    }

    /// Numeric view of the value; text is parsed when it looks like a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Int(v) => Some(*v as f64),
            FeatureValue::Float(v) => Some(*v),
            FeatureValue::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FeatureValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Int(v) => write!(f, "{v}"),
            FeatureValue::Float(v) if v.is_finite() => write!(f, "{v}"),
            FeatureValue::Float(_) => Ok(()),
            FeatureValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        FeatureValue::flag(value)
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        FeatureValue::Int(value)
    }
}

impl From<usize> for FeatureValue {
    fn from(value: usize) -> Self {
        FeatureValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Float(value)
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        FeatureValue::Text(value)
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::Text(value.to_string())
    }
}

/// One output row: either a full feature record or an error placeholder.
///
/// Both shapes are plain maps so rows with different key sets can share one
/// superset header when written out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FeatureValue>,
}

impl Record {
    /// Create an empty feature record for a URL
    pub fn new(url: &str) -> Self {
        let mut record = Self::default();
        record.insert(URL_KEY, url);
        record
    }

    /// Create an error row carrying only the URL and the failure message
    pub fn error(url: &str, message: &str) -> Self {
        let mut record = Self::new(url);
        record.insert(ERROR_KEY, message);
        record
    }

    pub fn url(&self) -> &str {
        self.fields
            .get(URL_KEY)
            .and_then(FeatureValue::as_str)
            .unwrap_or_default()
    }

    pub fn is_error(&self) -> bool {
        self.fields.contains_key(ERROR_KEY)
    }

    pub fn insert(&mut self, key: &str, value: impl Into<FeatureValue>) {
        self.fields.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FeatureValue> {
        self.fields.get(key)
    }

    /// Numeric value of a feature, 0 when missing or non-numeric
    pub fn number(&self, key: &str) -> f64 {
        self.get(key).and_then(FeatureValue::as_f64).unwrap_or(0.0)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_record_shape() {
        let record = Record::error("https://example.com", "timed out");
        assert!(record.is_error());
        assert_eq!(record.url(), "https://example.com");
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_checkpoint_json_keeps_value_types() {
        let mut record = Record::new("https://example.com");
        record.insert("has_faq", true);
        record.insert("word_count", 120usize);
        record.insert("image_to_text_ratio", 2.5);
        record.insert("headline_text", "Grow faster");

        let json = serde_json::to_string(&record).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get("has_faq"), Some(&FeatureValue::Int(1)));
        assert_eq!(back.get("image_to_text_ratio"), Some(&FeatureValue::Float(2.5)));
        assert_eq!(back, record);
    }

    #[test]
    fn test_display_never_renders_nan() {
        assert_eq!(FeatureValue::Float(f64::NAN).to_string(), "");
        assert_eq!(FeatureValue::Int(3).to_string(), "3");
    }
}
