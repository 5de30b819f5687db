//! # Account Settings API
//!
//! Flow implementations for the account settings workflow.

pub mod flows;

pub use flows::settings::{SettingsFlow, SettingsFlowConfig, SettingsResponse, SettingsUpdate};
