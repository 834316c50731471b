//! Schema-driven form engine used by every record modal.
//!
//! A [`FieldSchema`] describes a record's fields; a [`FormStore`] holds the
//! values of one open form; [`CollectionEditor`] exposes list fields as
//! add/remove controls; the [`SubmissionGate`] decides whether the record may
//! be submitted and by whom; [`Modal`] ties them to open/close/submit.

pub mod editor;
pub mod gate;
pub mod modal;
pub mod schema;
pub mod store;
pub mod value;

pub use editor::{parse_edit, CollectionEditor, EditorEvent, FieldEdit, ListFieldView};
pub use gate::{is_valid, validate, GateAction, GateOutcome, SubmissionGate, ValidationIssue};
pub use modal::{EditEnvelope, Modal, ModalMode, Submission, SubmitOutcome};
pub use schema::{FieldId, FieldKind, FieldSchema, FieldSpec, ScalarKind};
pub use store::{BufferKey, FormStore};
pub use value::{FieldValue, ObjectItem, ScalarValue};
