//! Static field schemas describing the shape and validation rules of a form.

use std::fmt;
use std::hash::Hash;

use chrono::NaiveDate;

use super::value::ScalarValue;

/// Enumerated identifier of one field in a record form.
///
/// Each record declares its own `enum` of fields so that stores and schemas
/// are keyed by a closed set rather than free-form strings.
pub trait FieldId: Copy + Eq + Ord + Hash + fmt::Debug + Send + Sync + 'static {
    /// Key used in the assembled JSON record.
    fn key(&self) -> &'static str;

    /// Human-readable label.
    fn label(&self) -> &'static str;
}

/// Supported primitive kinds for scalar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Text,
    Number,
    Boolean,
    Date,
}

impl ScalarKind {
    /// Converts raw text input into a typed value, or `None` when the input
    /// does not fit the kind.
    pub fn parse(self, raw: &str) -> Option<ScalarValue> {
        let trimmed = raw.trim();
        match self {
            ScalarKind::Text => Some(ScalarValue::Text(raw.to_string())),
            ScalarKind::Number => trimmed
                .parse::<f64>()
                .ok()
                .filter(|number| number.is_finite())
                .map(ScalarValue::Number),
            ScalarKind::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "1" | "on" => Some(ScalarValue::Bool(true)),
                "false" | "no" | "n" | "0" | "off" => Some(ScalarValue::Bool(false)),
                _ => None,
            },
            ScalarKind::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .map(|date| ScalarValue::Date(date.format("%Y-%m-%d").to_string())),
        }
    }
}

/// Tagged description of a field's value shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Scalar(ScalarKind),
    StringList,
    /// List of fixed-shape records; sub-field order is the item's key order.
    ObjectList {
        sub_fields: &'static [&'static str],
    },
    /// Fixed set of link-type keys mapped to URLs.
    LinkMap {
        keys: &'static [&'static str],
    },
}

impl FieldKind {
    pub fn is_list(&self) -> bool {
        matches!(self, FieldKind::StringList | FieldKind::ObjectList { .. })
    }
}

/// Declarative description of a single form field.
#[derive(Debug, Clone)]
pub struct FieldSpec<F: FieldId> {
    pub id: F,
    pub kind: FieldKind,
    pub required: bool,
    pub min_items: usize,
}

impl<F: FieldId> FieldSpec<F> {
    pub fn new(id: F, kind: FieldKind) -> Self {
        Self {
            id,
            kind,
            required: false,
            min_items: 0,
        }
    }

    pub fn text(id: F) -> Self {
        Self::new(id, FieldKind::Scalar(ScalarKind::Text))
    }

    pub fn number(id: F) -> Self {
        Self::new(id, FieldKind::Scalar(ScalarKind::Number))
    }

    pub fn boolean(id: F) -> Self {
        Self::new(id, FieldKind::Scalar(ScalarKind::Boolean))
    }

    pub fn date(id: F) -> Self {
        Self::new(id, FieldKind::Scalar(ScalarKind::Date))
    }

    pub fn string_list(id: F) -> Self {
        Self::new(id, FieldKind::StringList)
    }

    pub fn object_list(id: F, sub_fields: &'static [&'static str]) -> Self {
        Self::new(id, FieldKind::ObjectList { sub_fields })
    }

    pub fn link_map(id: F, keys: &'static [&'static str]) -> Self {
        Self::new(id, FieldKind::LinkMap { keys })
    }

    pub fn with_required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_min_items(mut self, min_items: usize) -> Self {
        self.min_items = min_items;
        self
    }

    pub fn key(&self) -> &'static str {
        self.id.key()
    }

    pub fn label(&self) -> &'static str {
        self.id.label()
    }
}

/// Ordered set of field specs for one record form.
#[derive(Debug, Clone)]
pub struct FieldSchema<F: FieldId> {
    pub name: &'static str,
    fields: Vec<FieldSpec<F>>,
}

impl<F: FieldId> FieldSchema<F> {
    pub fn new(name: &'static str, fields: Vec<FieldSpec<F>>) -> Self {
        Self { name, fields }
    }

    pub fn fields(&self) -> &[FieldSpec<F>] {
        &self.fields
    }

    pub fn spec(&self, id: F) -> Option<&FieldSpec<F>> {
        self.fields.iter().find(|spec| spec.id == id)
    }

    pub fn kind(&self, id: F) -> Option<&FieldKind> {
        self.spec(id).map(|spec| &spec.kind)
    }

    /// Looks a field up by its wire key, case-insensitively.
    pub fn find_key(&self, key: &str) -> Option<&FieldSpec<F>> {
        let needle = key.trim();
        self.fields
            .iter()
            .find(|spec| spec.key().eq_ignore_ascii_case(needle))
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|spec| spec.key())
    }
}
