//! Remote sync slice: status tracking for the asynchronous API calls.
//!
//! [`SyncState`] holds one [`OperationStatus`] per [`OperationKey`];
//! [`reduce`] is its only writer. [`SyncStore`] publishes a snapshot after
//! each action and [`QuizController`] drives the operations.

mod cancel;
mod controller;
mod slice;
mod status;
mod store;

pub use cancel::CancelToken;
pub use controller::QuizController;
pub use slice::{reduce, OperationKey, SyncAction, SyncState};
pub use status::{OperationStatus, Phase};
pub use store::SyncStore;
