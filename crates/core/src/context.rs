use std::sync::Arc;

use crate::adapters::StoreAdapter;
use crate::config::SettingsConfig;
use crate::email::Mailer;
use crate::error::{SettingsError, SettingsResult};

/// Shared context handed to workflow operations.
///
/// Bundles the configuration, the store adapter, and the optional mailer so
/// operations receive one argument instead of three.
pub struct SettingsContext<DB: StoreAdapter> {
    pub config: Arc<SettingsConfig>,
    pub store: Arc<DB>,
    pub mailer: Option<Arc<dyn Mailer>>,
}

impl<DB: StoreAdapter> SettingsContext<DB> {
    pub fn new(config: Arc<SettingsConfig>, store: Arc<DB>) -> Self {
        let mailer = config.mailer.clone();
        Self {
            config,
            store,
            mailer,
        }
    }

    /// Get the mailer, returning an error if none is configured.
    pub fn mailer(&self) -> SettingsResult<&dyn Mailer> {
        self.mailer
            .as_deref()
            .ok_or_else(|| SettingsError::config("No mailer configured"))
    }
}

impl<DB: StoreAdapter> Clone for SettingsContext<DB> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            store: self.store.clone(),
            mailer: self.mailer.clone(),
        }
    }
}
