//! Headless collection-field editor: per-list views derived from the store
//! and the add/remove/input events that mutate it.

use super::schema::{FieldId, FieldKind, FieldSchema};
use super::store::{BufferKey, FormStore};

/// Event emitted by a list field's controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent<F: FieldId> {
    Input { key: BufferKey<F>, value: String },
    Add(F),
    Remove { field: F, index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSlot<F: FieldId> {
    pub key: BufferKey<F>,
    pub label: String,
    pub value: String,
}

/// A rendered item, keyed by its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub index: usize,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFieldView<F: FieldId> {
    pub field: F,
    pub label: &'static str,
    pub inputs: Vec<InputSlot<F>>,
    pub items: Vec<ItemView>,
}

pub struct CollectionEditor;

impl CollectionEditor {
    /// Builds a view for every list field, straight from the store's
    /// current values.
    pub fn views<F: FieldId>(store: &FormStore<F>) -> Vec<ListFieldView<F>> {
        store
            .schema()
            .fields()
            .iter()
            .filter_map(|spec| Self::view(store, spec.id))
            .collect()
    }

    pub fn view<F: FieldId>(store: &FormStore<F>, field: F) -> Option<ListFieldView<F>> {
        let (inputs, items) = match store.schema().kind(field)? {
            FieldKind::StringList => {
                let key = BufferKey::Item(field);
                let inputs = vec![InputSlot {
                    key,
                    label: field.label().to_string(),
                    value: store.pending(key).to_string(),
                }];
                let items = store
                    .string_list(field)
                    .iter()
                    .enumerate()
                    .map(|(index, item)| ItemView {
                        index,
                        label: item.clone(),
                    })
                    .collect();
                (inputs, items)
            }
            FieldKind::ObjectList { sub_fields } => {
                let inputs = sub_fields
                    .iter()
                    .map(|sub| {
                        let key = BufferKey::Sub(field, *sub);
                        InputSlot {
                            key,
                            label: sub.replace('_', " "),
                            value: store.pending(key).to_string(),
                        }
                    })
                    .collect();
                let items = store
                    .object_list(field)
                    .iter()
                    .enumerate()
                    .map(|(index, item)| ItemView {
                        index,
                        label: item.summary(),
                    })
                    .collect();
                (inputs, items)
            }
            FieldKind::Scalar(_) | FieldKind::LinkMap { .. } => return None,
        };
        Some(ListFieldView {
            field,
            label: field.label(),
            inputs,
            items,
        })
    }

    pub fn apply<F: FieldId>(store: &mut FormStore<F>, event: EditorEvent<F>) -> bool {
        match event {
            EditorEvent::Input { key, value } => store.set_pending_input(key, value),
            EditorEvent::Add(field) => match store.schema().kind(field) {
                Some(FieldKind::StringList) => store.commit_list_item(field),
                Some(FieldKind::ObjectList { .. }) => store.commit_object_item(field),
                _ => false,
            },
            EditorEvent::Remove { field, index } => store.remove_list_item(field, index),
        }
    }

    /// Applies a parsed edit, whether it targets a scalar, a link, or a list.
    pub fn apply_edit<F: FieldId>(store: &mut FormStore<F>, edit: FieldEdit<F>) -> bool {
        match edit {
            FieldEdit::Scalar { field, raw } => store.set_scalar_input(field, &raw),
            FieldEdit::Link { field, key, url } => store.set_link(field, &key, &url),
            FieldEdit::Append { field, values } => {
                let keys: Vec<BufferKey<F>> = match store.schema().kind(field) {
                    Some(FieldKind::StringList) => vec![BufferKey::Item(field)],
                    Some(FieldKind::ObjectList { sub_fields }) => sub_fields
                        .iter()
                        .map(|sub| BufferKey::Sub(field, *sub))
                        .collect(),
                    _ => return false,
                };
                for (key, value) in keys.into_iter().zip(values) {
                    store.set_pending_input(key, value);
                }
                Self::apply(store, EditorEvent::Add(field))
            }
            FieldEdit::Event(event) => Self::apply(store, event),
        }
    }
}

/// One textual edit as typed in the operator shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit<F: FieldId> {
    /// `key=value`
    Scalar { field: F, raw: String },
    /// `key.link=url` on a link-map field
    Link { field: F, key: String, url: String },
    /// `key+=value`, or `key+=a|b|c` for object lists (sub-fields in order)
    Append { field: F, values: Vec<String> },
    /// `key.sub=value` (pending input), `key+` (commit), `key-=index` (remove)
    Event(EditorEvent<F>),
}

/// Parses one `key…` token against a schema.
pub fn parse_edit<F: FieldId>(
    schema: &FieldSchema<F>,
    token: &str,
) -> Result<FieldEdit<F>, String> {
    let lookup = |key: &str| {
        schema
            .find_key(key)
            .map(|spec| (spec.id, spec.kind.clone()))
            .ok_or_else(|| format!("unknown field `{}`", key.trim()))
    };

    if let Some((key, value)) = token.split_once("+=") {
        let (field, kind) = lookup(key)?;
        let values = match kind {
            FieldKind::ObjectList { .. } => value.split('|').map(str::to_string).collect(),
            FieldKind::StringList => vec![value.to_string()],
            _ => return Err(format!("`{}` is not a list field", field.key())),
        };
        return Ok(FieldEdit::Append { field, values });
    }

    if let Some((key, index)) = token.split_once("-=") {
        let (field, kind) = lookup(key)?;
        if !kind.is_list() {
            return Err(format!("`{}` is not a list field", field.key()));
        }
        let index = index
            .trim()
            .parse::<usize>()
            .map_err(|_| format!("`{}` is not an item index", index.trim()))?;
        return Ok(FieldEdit::Event(EditorEvent::Remove { field, index }));
    }

    if let Some(key) = token.strip_suffix('+').filter(|key| !key.contains('=')) {
        let (field, _) = lookup(key)?;
        return Ok(FieldEdit::Event(EditorEvent::Add(field)));
    }

    let (target, value) = token
        .split_once('=')
        .ok_or_else(|| format!("expected `field=value`, got `{token}`"))?;

    if let Some((key, sub)) = target.split_once('.') {
        let (field, kind) = lookup(key)?;
        return match kind {
            FieldKind::LinkMap { .. } => Ok(FieldEdit::Link {
                field,
                key: sub.trim().to_string(),
                url: value.to_string(),
            }),
            FieldKind::ObjectList { sub_fields } => {
                let sub = sub_fields
                    .iter()
                    .find(|candidate| candidate.eq_ignore_ascii_case(sub.trim()))
                    .ok_or_else(|| {
                        format!("`{}` has no sub-field `{}`", field.key(), sub.trim())
                    })?;
                Ok(FieldEdit::Event(EditorEvent::Input {
                    key: BufferKey::Sub(field, *sub),
                    value: value.to_string(),
                }))
            }
            _ => Err(format!("`{}` has no sub-fields", field.key())),
        };
    }

    let (field, kind) = lookup(target)?;
    match kind {
        FieldKind::Scalar(_) => Ok(FieldEdit::Scalar {
            field,
            raw: value.to_string(),
        }),
        FieldKind::StringList => Ok(FieldEdit::Event(EditorEvent::Input {
            key: BufferKey::Item(field),
            value: value.to_string(),
        })),
        _ => Err(format!(
            "`{}` takes `{}.<key>=…` or `{}+=…`",
            field.key(),
            field.key(),
            field.key()
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::forms::schema::tests::{demo_schema, DemoField};

    #[test]
    fn views_reflect_the_store_without_caching() {
        let mut store = FormStore::new(Arc::new(demo_schema()));
        let views = CollectionEditor::views(&store);
        assert_eq!(
            views.iter().map(|view| view.field).collect::<Vec<_>>(),
            [DemoField::Skills, DemoField::Dates]
        );
        assert_eq!(views[1].inputs.len(), 2);

        CollectionEditor::apply(
            &mut store,
            EditorEvent::Input {
                key: BufferKey::Item(DemoField::Skills),
                value: "Rust".into(),
            },
        );
        CollectionEditor::apply(&mut store, EditorEvent::Add(DemoField::Skills));
        let view = CollectionEditor::view(&store, DemoField::Skills).expect("list view");
        assert_eq!(
            view.items,
            vec![ItemView {
                index: 0,
                label: "Rust".into()
            }]
        );

        store.reset();
        let view = CollectionEditor::view(&store, DemoField::Skills).expect("list view");
        assert!(view.items.is_empty());
    }

    #[test]
    fn parsed_edits_drive_every_field_kind() {
        let schema = Arc::new(demo_schema());
        let mut store = FormStore::new(Arc::clone(&schema));
        for token in [
            "title=Backend intern",
            "is_remote=yes",
            "skills_required+=Rust",
            "skills_required+=SQL",
            "important_dates+=Apply by|2025-01-10",
            "important_dates.event=Interview",
            "important_dates.date=2025-01-20",
            "important_dates+",
            "social_links.github=https://github.com/acme",
            "skills_required-=0",
        ] {
            let edit = parse_edit(&schema, token).unwrap_or_else(|err| panic!("{token}: {err}"));
            assert!(CollectionEditor::apply_edit(&mut store, edit), "{token} did not apply");
        }
        assert_eq!(store.text(DemoField::Title), Some("Backend intern"));
        assert_eq!(store.string_list(DemoField::Skills), ["SQL"]);
        let dates = store.object_list(DemoField::Dates);
        assert_eq!(dates.len(), 2);
        assert_eq!(dates[1].get("event"), Some("Interview"));
        assert_eq!(store.link(DemoField::Links, "github"), Some("https://github.com/acme"));
    }

    #[test]
    fn parse_errors_name_the_problem() {
        let schema = demo_schema();
        assert!(parse_edit(&schema, "venue=Hall").unwrap_err().contains("unknown field"));
        assert!(parse_edit(&schema, "title+=x").unwrap_err().contains("not a list"));
        assert!(parse_edit(&schema, "skills_required-=first").is_err());
        assert!(parse_edit(&schema, "important_dates.venue=x").is_err());
        assert!(parse_edit(&schema, "title").is_err());
    }
}
