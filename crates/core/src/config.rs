use std::sync::Arc;

use crate::email::Mailer;
use crate::error::SettingsError;

/// Top-level configuration for the settings workflow.
#[derive(Clone)]
pub struct SettingsConfig {
    /// Application name, used in email subjects and templates.
    ///
    /// Defaults to `"Account Settings"`.
    pub app_name: String,

    /// Base URL the application is served from (e.g. `"http://localhost:3000"`).
    ///
    /// Confirmation links in verification emails are built from this URL.
    pub base_url: String,

    /// Mailer for dispatching verification emails.
    ///
    /// When unset, email-change requests still record their verification token
    /// but log a warning instead of sending mail.
    pub mailer: Option<Arc<dyn Mailer>>,
}

impl std::fmt::Debug for SettingsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsConfig")
            .field("app_name", &self.app_name)
            .field("base_url", &self.base_url)
            .field("mailer", &self.mailer.is_some())
            .finish()
    }
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            app_name: "Account Settings".to_string(),
            base_url: "http://localhost:3000".to_string(),
            mailer: None,
        }
    }
}

impl SettingsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the application name.
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    /// Set the base URL (e.g. `"https://myapp.com"`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the mailer used for verification emails.
    pub fn mailer<M: Mailer + 'static>(mut self, mailer: M) -> Self {
        self.mailer = Some(Arc::new(mailer));
        self
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.base_url.is_empty() {
            return Err(SettingsError::config("Base URL cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(SettingsError::config(
                "Base URL must start with http:// or https://",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_empty_base_url() {
        let config = SettingsConfig::new().base_url("");
        assert!(config.validate().is_err());

        let config = SettingsConfig::new().base_url("https://myapp.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_schemeless_base_url() {
        let config = SettingsConfig::new().base_url("myapp.com");
        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_does_not_leak_the_mailer() {
        let config = SettingsConfig::new().mailer(crate::email::ConsoleMailer);
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("mailer: true"));
    }
}
