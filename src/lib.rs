#![doc(test(attr(deny(warnings))))]

//! Exameets admin portal core: schema-driven record forms, the submission
//! gate, the remote sync slice for quiz operations, and the operator shell
//! that drives them against the Exameets API.

pub mod analytics;
pub mod api;
pub mod auth;
pub mod cli;
pub mod errors;
pub mod forms;
pub mod media;
pub mod records;
pub mod sync;
pub mod utils;

use std::sync::Once;

use exameets_config::ConfigManager;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing, honouring the persisted log filter, and emits
/// a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        let configured = ConfigManager::from_env()
            .and_then(|manager| manager.load())
            .ok()
            .and_then(|config| config.log_filter);
        utils::init_tracing(configured.as_deref());
        tracing::info!("Exameets admin tracing initialized.");
    });
}
