//! exameets-config
//!
//! Persistent operator preferences for the admin tooling: API endpoint,
//! media host settings, session principal, and logging.
//! Owns the Config data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{Config, MediaSettings, SessionSettings};
