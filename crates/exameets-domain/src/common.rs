//! Shared traits and small value types used by several records.

use serde::{Deserialize, Serialize};

/// Identifier assigned by the remote API (a document id string).
pub type RecordId = String;

/// Exposes the server-side identifier of a persisted record.
///
/// Records that have not been created yet carry no id.
pub trait Identifiable {
    fn id(&self) -> Option<&str>;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// A dated milestone such as "Registration opens" or "Exam day".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ImportantDate {
    pub event: String,
    pub date: String,
}

impl ImportantDate {
    pub fn new(event: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            date: date.into(),
        }
    }
}

macro_rules! impl_record_traits {
    ($ty:ty, $name:ident, $label:literal) => {
        impl $crate::common::Identifiable for $ty {
            fn id(&self) -> Option<&str> {
                self.id.as_deref()
            }
        }

        impl $crate::common::NamedEntity for $ty {
            fn name(&self) -> &str {
                &self.$name
            }
        }

        impl $crate::common::Displayable for $ty {
            fn display_label(&self) -> String {
                format!("{} ({})", self.$name, $label)
            }
        }
    };
}

pub(crate) use impl_record_traits;

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use serde;
