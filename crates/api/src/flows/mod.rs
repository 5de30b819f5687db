pub mod settings;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use settings::{SettingsFlow, SettingsFlowConfig, SettingsResponse, SettingsUpdate};
