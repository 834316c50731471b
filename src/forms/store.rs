//! In-memory state of one open form: committed field values plus the
//! pending input buffer for list fields.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use super::schema::{FieldId, FieldKind, FieldSchema, ScalarKind};
use super::value::{FieldValue, ObjectItem, ScalarValue};

/// Slot in the pending input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BufferKey<F: FieldId> {
    /// Text being typed for a string-list field.
    Item(F),
    /// Text being typed for one sub-field of an object-list field.
    Sub(F, &'static str),
}

impl<F: FieldId> BufferKey<F> {
    pub fn field(&self) -> F {
        match self {
            BufferKey::Item(field) | BufferKey::Sub(field, _) => *field,
        }
    }
}

/// Holds the current value of every field for one open modal.
///
/// Mutations never fail: input that does not apply (blank list items,
/// partial object items, out-of-range indices, wrong field kinds) is ignored
/// and reported through the returned `bool`.
#[derive(Debug, Clone)]
pub struct FormStore<F: FieldId> {
    session: Uuid,
    schema: Arc<FieldSchema<F>>,
    values: BTreeMap<F, FieldValue>,
    pending: BTreeMap<BufferKey<F>, String>,
}

impl<F: FieldId> FormStore<F> {
    pub fn new(schema: Arc<FieldSchema<F>>) -> Self {
        let mut store = Self {
            session: Uuid::new_v4(),
            schema,
            values: BTreeMap::new(),
            pending: BTreeMap::new(),
        };
        store.seed_defaults();
        store
    }

    /// Builds a store pre-populated from an existing record's JSON form.
    ///
    /// Keys are matched by the schema's wire keys; values that do not fit a
    /// field's kind are skipped.
    pub fn from_json(schema: Arc<FieldSchema<F>>, record: &Value) -> Self {
        let mut store = Self::new(schema);
        let Some(object) = record.as_object() else {
            return store;
        };
        let specs: Vec<(F, FieldKind)> = store
            .schema
            .fields()
            .iter()
            .map(|spec| (spec.id, spec.kind.clone()))
            .collect();
        for (field, kind) in specs {
            if let Some(value) = object.get(field.key()).and_then(|raw| decode(&kind, raw)) {
                store.prefill(field, value);
            }
        }
        store
    }

    fn seed_defaults(&mut self) {
        for spec in self.schema.fields() {
            let initial = match &spec.kind {
                FieldKind::Scalar(ScalarKind::Boolean) => {
                    Some(FieldValue::Scalar(ScalarValue::Bool(false)))
                }
                FieldKind::Scalar(_) => None,
                FieldKind::StringList => Some(FieldValue::StringList(Vec::new())),
                FieldKind::ObjectList { .. } => Some(FieldValue::ObjectList(Vec::new())),
                FieldKind::LinkMap { keys } => Some(FieldValue::LinkMap(
                    keys.iter().map(|key| (*key, String::new())).collect(),
                )),
            };
            if let Some(value) = initial {
                self.values.insert(spec.id, value);
            }
        }
    }

    /// Identifier of this modal session, used to correlate log lines.
    pub fn session(&self) -> Uuid {
        self.session
    }

    pub fn schema(&self) -> &FieldSchema<F> {
        &self.schema
    }

    pub fn shared_schema(&self) -> Arc<FieldSchema<F>> {
        Arc::clone(&self.schema)
    }

    pub fn value(&self, field: F) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    pub fn scalar(&self, field: F) -> Option<&ScalarValue> {
        match self.values.get(&field) {
            Some(FieldValue::Scalar(scalar)) => Some(scalar),
            _ => None,
        }
    }

    pub fn text(&self, field: F) -> Option<&str> {
        self.scalar(field).and_then(ScalarValue::as_str)
    }

    pub fn string_list(&self, field: F) -> &[String] {
        match self.values.get(&field) {
            Some(FieldValue::StringList(items)) => items,
            _ => &[],
        }
    }

    pub fn object_list(&self, field: F) -> &[ObjectItem] {
        match self.values.get(&field) {
            Some(FieldValue::ObjectList(items)) => items,
            _ => &[],
        }
    }

    pub fn link(&self, field: F, link_key: &str) -> Option<&str> {
        match self.values.get(&field) {
            Some(FieldValue::LinkMap(links)) => links.get(link_key).map(String::as_str),
            _ => None,
        }
    }

    pub fn pending(&self, key: BufferKey<F>) -> &str {
        self.pending.get(&key).map(String::as_str).unwrap_or("")
    }

    /// Replaces a scalar field's value unconditionally.
    pub fn set_scalar(&mut self, field: F, value: impl Into<ScalarValue>) -> bool {
        if !matches!(self.schema.kind(field), Some(FieldKind::Scalar(_))) {
            debug!(session = %self.session, ?field, "set_scalar ignored for non-scalar field");
            return false;
        }
        self.values.insert(field, FieldValue::Scalar(value.into()));
        true
    }

    /// Boolean fields take the checked state of their control.
    pub fn set_checked(&mut self, field: F, checked: bool) -> bool {
        if self.schema.kind(field) != Some(&FieldKind::Scalar(ScalarKind::Boolean)) {
            debug!(session = %self.session, ?field, "set_checked ignored for non-boolean field");
            return false;
        }
        self.values
            .insert(field, FieldValue::Scalar(ScalarValue::Bool(checked)));
        true
    }

    /// Parses raw text according to the field's scalar kind. Clearing a
    /// number or date input removes the value.
    pub fn set_scalar_input(&mut self, field: F, raw: &str) -> bool {
        let Some(FieldKind::Scalar(kind)) = self.schema.kind(field).cloned() else {
            debug!(session = %self.session, ?field, "scalar input ignored for non-scalar field");
            return false;
        };
        if raw.trim().is_empty() && matches!(kind, ScalarKind::Number | ScalarKind::Date) {
            return self.values.remove(&field).is_some();
        }
        match kind.parse(raw) {
            Some(value) => {
                self.values.insert(field, FieldValue::Scalar(value));
                true
            }
            None => {
                debug!(session = %self.session, ?field, raw, "unparsable scalar input ignored");
                false
            }
        }
    }

    pub fn clear_scalar(&mut self, field: F) -> bool {
        match self.schema.kind(field) {
            Some(FieldKind::Scalar(_)) => self.values.remove(&field).is_some(),
            _ => false,
        }
    }

    /// Sets one URL slot of a link-map field. Unknown link keys are ignored.
    pub fn set_link(&mut self, field: F, link_key: &str, url: &str) -> bool {
        let Some(FieldKind::LinkMap { keys }) = self.schema.kind(field) else {
            return false;
        };
        let Some(slot) = keys.iter().find(|key| key.eq_ignore_ascii_case(link_key)) else {
            debug!(session = %self.session, ?field, link_key, "unknown link key ignored");
            return false;
        };
        let slot = *slot;
        match self.values.get_mut(&field) {
            Some(FieldValue::LinkMap(links)) => {
                links.insert(slot, url.trim().to_string());
                true
            }
            _ => false,
        }
    }

    /// Updates one pending buffer slot. The slot must belong to a list field
    /// (and, for object lists, to a declared sub-field).
    pub fn set_pending_input(&mut self, key: BufferKey<F>, value: impl Into<String>) -> bool {
        let valid = match (key, self.schema.kind(key.field())) {
            (BufferKey::Item(_), Some(FieldKind::StringList)) => true,
            (BufferKey::Sub(_, sub), Some(FieldKind::ObjectList { sub_fields })) => {
                sub_fields.contains(&sub)
            }
            _ => false,
        };
        if !valid {
            debug!(session = %self.session, ?key, "pending input ignored for unknown slot");
            return false;
        }
        self.pending.insert(key, value.into());
        true
    }

    /// Appends the trimmed pending value of a string-list field and clears
    /// the slot. Blank input is a no-op.
    pub fn commit_list_item(&mut self, field: F) -> bool {
        let key = BufferKey::Item(field);
        let pending = self.pending(key).to_string();
        if !self.append_list_item(field, &pending) {
            return false;
        }
        self.pending.remove(&key);
        true
    }

    /// Appends a value to a string-list field without going through the
    /// pending buffer (uploaded URLs, for instance). Blank values are ignored.
    pub fn append_list_item(&mut self, field: F, value: &str) -> bool {
        if self.schema.kind(field) != Some(&FieldKind::StringList) {
            return false;
        }
        let trimmed = value.trim();
        if trimmed.is_empty() {
            debug!(session = %self.session, ?field, "blank list item not committed");
            return false;
        }
        match self.values.get_mut(&field) {
            Some(FieldValue::StringList(items)) => items.push(trimmed.to_string()),
            _ => {
                self.values
                    .insert(field, FieldValue::StringList(vec![trimmed.to_string()]));
            }
        }
        true
    }

    /// Appends an object item when every declared sub-field has a non-blank
    /// pending value; otherwise nothing changes.
    pub fn commit_object_item(&mut self, field: F) -> bool {
        let Some(FieldKind::ObjectList { sub_fields }) = self.schema.kind(field) else {
            return false;
        };
        let sub_fields = *sub_fields;
        let mut entries = Vec::with_capacity(sub_fields.len());
        for sub in sub_fields {
            let trimmed = self.pending(BufferKey::Sub(field, *sub)).trim();
            if trimmed.is_empty() {
                debug!(session = %self.session, ?field, sub, "incomplete item not committed");
                return false;
            }
            entries.push((*sub, trimmed.to_string()));
        }
        let item = ObjectItem::new(entries);
        match self.values.get_mut(&field) {
            Some(FieldValue::ObjectList(items)) => items.push(item),
            _ => {
                self.values.insert(field, FieldValue::ObjectList(vec![item]));
            }
        }
        for sub in sub_fields {
            self.pending.remove(&BufferKey::Sub(field, *sub));
        }
        true
    }

    /// Removes the item at `index`, keeping the order of the rest.
    pub fn remove_list_item(&mut self, field: F, index: usize) -> bool {
        let removed = match self.values.get_mut(&field) {
            Some(FieldValue::StringList(items)) if index < items.len() => {
                items.remove(index);
                true
            }
            Some(FieldValue::ObjectList(items)) if index < items.len() => {
                items.remove(index);
                true
            }
            _ => false,
        };
        if !removed {
            debug!(session = %self.session, ?field, index, "remove ignored");
        }
        removed
    }

    /// Seeds a value for edit flows. The value must match the field's kind.
    pub fn prefill(&mut self, field: F, value: FieldValue) -> bool {
        let fits = matches!(
            (self.schema.kind(field), &value),
            (Some(FieldKind::Scalar(_)), FieldValue::Scalar(_))
                | (Some(FieldKind::StringList), FieldValue::StringList(_))
                | (Some(FieldKind::ObjectList { .. }), FieldValue::ObjectList(_))
                | (Some(FieldKind::LinkMap { .. }), FieldValue::LinkMap(_))
        );
        if fits {
            self.values.insert(field, value);
        }
        fits
    }

    /// Clears every value and pending slot, back to a freshly opened form.
    pub fn reset(&mut self) {
        self.values.clear();
        self.pending.clear();
        self.seed_defaults();
    }

    /// Assembles the record as a JSON object keyed by wire keys. Scalars that
    /// were never set are omitted.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        for spec in self.schema.fields() {
            if let Some(value) = self.values.get(&spec.id) {
                object.insert(spec.key().to_string(), value.to_json());
            }
        }
        Value::Object(object)
    }
}

fn decode(kind: &FieldKind, raw: &Value) -> Option<FieldValue> {
    match kind {
        FieldKind::Scalar(scalar) => decode_scalar(*scalar, raw).map(FieldValue::Scalar),
        FieldKind::StringList => raw.as_array().map(|items| {
            FieldValue::StringList(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect(),
            )
        }),
        FieldKind::ObjectList { sub_fields } => raw.as_array().map(|items| {
            FieldValue::ObjectList(
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .filter_map(|object| {
                        let values: Vec<_> = sub_fields
                            .iter()
                            .map(|sub| (*sub, json_text(object.get(*sub)).trim().to_string()))
                            .collect();
                        // Partial items never enter a form, loaded or typed.
                        if values.iter().any(|(_, value)| value.is_empty()) {
                            return None;
                        }
                        Some(ObjectItem::new(values))
                    })
                    .collect(),
            )
        }),
        FieldKind::LinkMap { keys } => raw.as_object().map(|object| {
            FieldValue::LinkMap(
                keys.iter()
                    .map(|key| (*key, json_text(object.get(*key))))
                    .collect(),
            )
        }),
    }
}

fn decode_scalar(kind: ScalarKind, raw: &Value) -> Option<ScalarValue> {
    match (kind, raw) {
        (ScalarKind::Text, Value::String(text)) => Some(ScalarValue::Text(text.clone())),
        (ScalarKind::Text, Value::Number(number)) => Some(ScalarValue::Text(number.to_string())),
        (ScalarKind::Number, Value::Number(number)) => number.as_f64().map(ScalarValue::Number),
        (ScalarKind::Number, Value::String(text)) => kind.parse(text),
        (ScalarKind::Boolean, Value::Bool(flag)) => Some(ScalarValue::Bool(*flag)),
        // Stored dates may carry a time component; keep only the calendar day.
        (ScalarKind::Date, Value::String(text)) => {
            kind.parse(text.get(..10).unwrap_or(text.as_str()))
        }
        _ => None,
    }
}

fn json_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::schema::tests::{demo_schema, DemoField};

    fn store() -> FormStore<DemoField> {
        FormStore::new(Arc::new(demo_schema()))
    }

    #[test]
    fn blank_list_input_leaves_list_unchanged() {
        let mut form = store();
        for blank in ["", "   ", "\t\n"] {
            form.set_pending_input(BufferKey::Item(DemoField::Skills), blank);
            assert!(!form.commit_list_item(DemoField::Skills));
            assert!(form.string_list(DemoField::Skills).is_empty());
        }
    }

    #[test]
    fn list_items_are_trimmed_and_buffer_cleared() {
        let mut form = store();
        form.set_pending_input(BufferKey::Item(DemoField::Skills), "  Rust ");
        assert!(form.commit_list_item(DemoField::Skills));
        assert_eq!(form.string_list(DemoField::Skills), ["Rust"]);
        assert_eq!(form.pending(BufferKey::Item(DemoField::Skills)), "");
    }

    #[test]
    fn duplicates_are_allowed_in_string_lists() {
        let mut form = store();
        for _ in 0..2 {
            form.set_pending_input(BufferKey::Item(DemoField::Skills), "Go");
            form.commit_list_item(DemoField::Skills);
        }
        assert_eq!(form.string_list(DemoField::Skills), ["Go", "Go"]);
    }

    #[test]
    fn partial_object_input_never_produces_an_item() {
        let mut form = store();
        form.set_pending_input(BufferKey::Sub(DemoField::Dates, "event"), "Exam");
        form.set_pending_input(BufferKey::Sub(DemoField::Dates, "date"), "  ");
        assert!(!form.commit_object_item(DemoField::Dates));
        assert!(form.object_list(DemoField::Dates).is_empty());
        // Pending values survive a rejected commit.
        assert_eq!(form.pending(BufferKey::Sub(DemoField::Dates, "event")), "Exam");

        form.set_pending_input(BufferKey::Sub(DemoField::Dates, "date"), " 2025-05-01 ");
        assert!(form.commit_object_item(DemoField::Dates));
        let items = form.object_list(DemoField::Dates);
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].entries(),
            [("event", "Exam".to_string()), ("date", "2025-05-01".to_string())]
        );
        assert_eq!(form.pending(BufferKey::Sub(DemoField::Dates, "event")), "");
        assert_eq!(form.pending(BufferKey::Sub(DemoField::Dates, "date")), "");
    }

    #[test]
    fn undeclared_sub_fields_are_rejected() {
        let mut form = store();
        assert!(!form.set_pending_input(BufferKey::Sub(DemoField::Dates, "venue"), "Hall A"));
        assert!(!form.set_pending_input(BufferKey::Item(DemoField::Dates), "x"));
        assert!(!form.set_pending_input(BufferKey::Item(DemoField::Title), "x"));
    }

    #[test]
    fn removal_preserves_relative_order() {
        let mut form = store();
        for skill in ["a", "b", "c", "d"] {
            form.set_pending_input(BufferKey::Item(DemoField::Skills), skill);
            form.commit_list_item(DemoField::Skills);
        }
        assert!(form.remove_list_item(DemoField::Skills, 1));
        assert_eq!(form.string_list(DemoField::Skills), ["a", "c", "d"]);
        assert!(!form.remove_list_item(DemoField::Skills, 3));
        assert_eq!(form.string_list(DemoField::Skills), ["a", "c", "d"]);
    }

    #[test]
    fn scalar_setters_respect_field_kinds() {
        let mut form = store();
        assert!(form.set_scalar(DemoField::Title, "Intern"));
        assert!(!form.set_scalar(DemoField::Skills, "nope"));
        assert!(form.set_checked(DemoField::Remote, true));
        assert!(!form.set_checked(DemoField::Title, true));
        assert!(form.set_scalar_input(DemoField::Stipend, "15000"));
        assert!(!form.set_scalar_input(DemoField::Stipend, "a lot"));
        assert_eq!(form.scalar(DemoField::Stipend), Some(&ScalarValue::Number(15000.0)));
        assert!(form.set_scalar_input(DemoField::Stipend, ""));
        assert_eq!(form.scalar(DemoField::Stipend), None);
    }

    #[test]
    fn links_only_accept_declared_keys() {
        let mut form = store();
        assert!(form.set_link(DemoField::Links, "GitHub", " https://github.com/x "));
        assert!(!form.set_link(DemoField::Links, "twitter", "https://x.com/x"));
        assert_eq!(form.link(DemoField::Links, "github"), Some("https://github.com/x"));
        assert_eq!(form.link(DemoField::Links, "website"), Some(""));
    }

    #[test]
    fn json_round_trip_prefills_edit_forms() {
        let record = serde_json::json!({
            "_id": "abc",
            "title": "Intern",
            "organization": "Acme",
            "is_remote": true,
            "stipend": 12000,
            "deadline": "2025-02-01T00:00:00.000Z",
            "skills_required": ["Rust", " ", "SQL"],
            "important_dates": [{"event": "Apply", "date": "2025-01-01"}],
            "social_links": {"github": "https://github.com/acme"}
        });
        let form = FormStore::from_json(Arc::new(demo_schema()), &record);
        assert_eq!(form.text(DemoField::Title), Some("Intern"));
        assert_eq!(form.scalar(DemoField::Remote), Some(&ScalarValue::Bool(true)));
        assert_eq!(form.text(DemoField::Deadline), Some("2025-02-01"));
        assert_eq!(form.string_list(DemoField::Skills), ["Rust", "SQL"]);
        assert_eq!(form.object_list(DemoField::Dates)[0].get("event"), Some("Apply"));
        assert_eq!(form.link(DemoField::Links, "website"), Some(""));

        let json = form.to_json();
        assert_eq!(json["stipend"], serde_json::json!(12000));
        assert_eq!(json["important_dates"][0]["date"], "2025-01-01");
        assert!(json.get("_id").is_none());
    }

    #[test]
    fn loaded_object_items_missing_a_sub_field_are_dropped() {
        let record = serde_json::json!({
            "important_dates": [
                {"event": " Apply ", "date": "2025-01-01"},
                {"event": "Results"},
                {"event": "Interview", "date": "  "},
                {"event": null, "date": "2025-03-01"}
            ]
        });
        let form = FormStore::from_json(Arc::new(demo_schema()), &record);
        let dates = form.object_list(DemoField::Dates);
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].get("event"), Some("Apply"));
        assert_eq!(dates[0].get("date"), Some("2025-01-01"));
    }

    #[test]
    fn reset_returns_to_a_fresh_form() {
        let mut form = store();
        form.set_scalar(DemoField::Title, "x");
        form.set_pending_input(BufferKey::Item(DemoField::Skills), "Go");
        form.reset();
        assert_eq!(form.text(DemoField::Title), None);
        assert_eq!(form.pending(BufferKey::Item(DemoField::Skills)), "");
        assert_eq!(form.scalar(DemoField::Remote), Some(&ScalarValue::Bool(false)));
    }
}
