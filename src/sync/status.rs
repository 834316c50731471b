use std::fmt;

use serde::Serialize;

/// Position of an operation in `idle -> pending -> fulfilled | rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending,
    Fulfilled,
    Rejected,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Idle => "idle",
            Phase::Pending => "pending",
            Phase::Fulfilled => "fulfilled",
            Phase::Rejected => "rejected",
        };
        f.write_str(label)
    }
}

/// Status triple of one remote operation plus its last payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationStatus<T> {
    pub is_loading: bool,
    pub error: Option<String>,
    pub success: bool,
    pub response: Option<T>,
}

impl<T> Default for OperationStatus<T> {
    fn default() -> Self {
        Self {
            is_loading: false,
            error: None,
            success: false,
            response: None,
        }
    }
}

impl<T> OperationStatus<T> {
    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Pending
        } else if self.error.is_some() {
            Phase::Rejected
        } else if self.success {
            Phase::Fulfilled
        } else {
            Phase::Idle
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase() == Phase::Idle
    }

    // Starting again clears the previous outcome but keeps the last payload
    // visible until a new one arrives.
    pub(crate) fn start(&mut self) {
        self.is_loading = true;
        self.error = None;
        self.success = false;
    }

    pub(crate) fn fulfil(&mut self, response: T) {
        self.is_loading = false;
        self.error = None;
        self.success = true;
        self.response = Some(response);
    }

    pub(crate) fn reject(&mut self, message: String) {
        self.is_loading = false;
        self.error = Some(message);
        self.success = false;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
