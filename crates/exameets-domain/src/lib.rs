//! exameets-domain
//!
//! Records managed by the Exameets admin portal and the payloads exchanged
//! with its REST API. No I/O, no CLI, no HTTP. Only data types and enums.

pub mod analytics;
pub mod common;
pub mod exam;
pub mod opportunity;
pub mod quiz;
pub mod team;

pub use analytics::*;
pub use common::*;
pub use exam::*;
pub use opportunity::*;
pub use quiz::*;
pub use team::*;
