//! Field values held by a form store.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Number, Value};

/// Value of a scalar field.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Text(String),
    Number(f64),
    Bool(bool),
    /// Normalised `YYYY-MM-DD` date string.
    Date(String),
}

impl ScalarValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::Text(text) | ScalarValue::Date(text) => Some(text),
            _ => None,
        }
    }

    /// True for text-like values that are blank after trimming.
    pub fn is_blank(&self) -> bool {
        self.as_str().map(|text| text.trim().is_empty()).unwrap_or(false)
    }

    pub fn to_json(&self) -> Value {
        match self {
            ScalarValue::Text(text) | ScalarValue::Date(text) => Value::String(text.clone()),
            ScalarValue::Bool(flag) => Value::Bool(*flag),
            ScalarValue::Number(number) => number_to_json(*number),
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Text(text) | ScalarValue::Date(text) => f.write_str(text),
            ScalarValue::Bool(flag) => write!(f, "{}", if *flag { "yes" } else { "no" }),
            ScalarValue::Number(number) => write!(f, "{}", number),
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Text(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::Text(value)
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        ScalarValue::Bool(value)
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        ScalarValue::Number(value)
    }
}

fn number_to_json(number: f64) -> Value {
    if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
        Value::Number(Number::from(number as i64))
    } else {
        Number::from_f64(number)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

/// One committed item of an object-list field, keyed in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectItem {
    entries: Vec<(&'static str, String)>,
}

impl ObjectItem {
    pub fn new(entries: Vec<(&'static str, String)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, sub_field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| *key == sub_field)
            .map(|(_, value)| value.as_str())
    }

    pub fn entries(&self) -> &[(&'static str, String)] {
        &self.entries
    }

    /// Compact one-line rendering, e.g. `event: Exam, date: 2025-05-01`.
    pub fn summary(&self) -> String {
        self.entries
            .iter()
            .map(|(key, value)| format!("{key}: {value}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Serialize for ObjectItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Current value of any field in a form record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(ScalarValue),
    StringList(Vec<String>),
    ObjectList(Vec<ObjectItem>),
    LinkMap(BTreeMap<&'static str, String>),
}

impl FieldValue {
    /// Number of committed items for list fields.
    pub fn len(&self) -> Option<usize> {
        match self {
            FieldValue::StringList(items) => Some(items.len()),
            FieldValue::ObjectList(items) => Some(items.len()),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Scalar(scalar) => scalar.to_json(),
            FieldValue::StringList(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            FieldValue::ObjectList(items) => Value::Array(
                items
                    .iter()
                    .map(|item| serde_json::to_value(item).unwrap_or(Value::Null))
                    .collect(),
            ),
            FieldValue::LinkMap(links) => Value::Object(
                links
                    .iter()
                    .map(|(key, url)| (key.to_string(), Value::String(url.clone())))
                    .collect(),
            ),
        }
    }
}
