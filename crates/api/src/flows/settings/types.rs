use serde::{Deserialize, Serialize};
use validator::Validate;

/// Settings update payload.
///
/// Every field is optional; absent fields leave the stored value untouched.
/// Which fields actually reach storage is decided by the flow, not by the
/// payload: email changes go through verification, password changes require
/// the old password, and OAuth accounts have their credential fields
/// discarded up front.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SettingsUpdate {
    pub name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub image: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "twoFactorEnabled")]
    pub two_factor_enabled: Option<bool>,
    /// Current password, required alongside `newPassword` to change it.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
    #[serde(rename = "newPassword")]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: Option<String>,
}

/// Which branch of the flow completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UpdateOutcome {
    VerificationEmailSent,
    PasswordUpdated,
    SettingsUpdated,
    EmailUpdated,
}

impl UpdateOutcome {
    pub(crate) fn message(self) -> &'static str {
        match self {
            Self::VerificationEmailSent => "Verification email sent",
            Self::PasswordUpdated => "Password updated",
            Self::SettingsUpdated => "Settings updated",
            Self::EmailUpdated => "Email updated",
        }
    }
}

/// Outcome of a flow invocation, as presented to the caller.
///
/// Serializes to `{"success": "..."}` or `{"error": "..."}`. Every
/// anticipated outcome of the workflow folds into one of the two variants;
/// infrastructure faults do not appear here, they propagate as
/// `Err(SettingsError)` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsResponse {
    Success(String),
    Error(String),
}

impl SettingsResponse {
    pub(crate) fn success(message: impl Into<String>) -> Self {
        Self::Success(message.into())
    }

    pub(crate) fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Error(message) => message,
        }
    }
}
