use chrono::Duration;

use account_settings_core::adapters::StoreAdapter;
use account_settings_core::identity::IdentityResolver;
use account_settings_core::{SettingsContext, SettingsResult};

pub(super) mod handlers;
pub(super) mod types;


use handlers::*;
pub use types::{SettingsResponse, SettingsUpdate};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the settings flow.
#[derive(Debug, Clone)]
pub struct SettingsFlowConfig {
    /// How long an email-change verification token remains valid.
    /// Default: 1 day.
    pub verification_token_expires_in: Duration,
}

impl Default for SettingsFlowConfig {
    fn default() -> Self {
        Self {
            verification_token_expires_in: Duration::hours(24),
        }
    }
}

// ---------------------------------------------------------------------------
// Flow
// ---------------------------------------------------------------------------

/// Self-service account settings flow (profile, email, and password updates).
///
/// Every invocation takes exactly one of three branches: email change
/// (issues a verification token instead of writing the email), password
/// change (requires the current password), or generic profile update.
pub struct SettingsFlow {
    config: SettingsFlowConfig,
}

impl SettingsFlow {
    pub fn new() -> Self {
        Self {
            config: SettingsFlowConfig::default(),
        }
    }

    pub fn with_config(config: SettingsFlowConfig) -> Self {
        Self { config }
    }

    // -- builder helpers --

    pub fn verification_token_expires_in(mut self, duration: Duration) -> Self {
        self.config.verification_token_expires_in = duration;
        self
    }
}

impl Default for SettingsFlow {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Entry points (delegate to core functions)
// ---------------------------------------------------------------------------

impl SettingsFlow {
    /// Apply a settings update on behalf of the resolved actor.
    ///
    /// Expects a payload that already passed `validator` checks. Rejections
    /// (unauthorized, taken email, wrong old password, combined change) fold
    /// into [`SettingsResponse::Error`]; infrastructure faults propagate as
    /// `Err`.
    pub async fn apply<DB: StoreAdapter>(
        &self,
        identity: &dyn IdentityResolver,
        payload: &SettingsUpdate,
        ctx: &SettingsContext<DB>,
    ) -> SettingsResult<SettingsResponse> {
        match update_settings_core(identity, payload, &self.config, ctx).await {
            Ok(outcome) => Ok(SettingsResponse::success(outcome.message())),
            Err(err) if err.is_rejection() => Ok(SettingsResponse::error(err.to_string())),
            Err(err) => Err(err),
        }
    }

    /// Complete a pending email change with the token from the confirmation
    /// link.
    pub async fn confirm_email_change<DB: StoreAdapter>(
        &self,
        token: &str,
        ctx: &SettingsContext<DB>,
    ) -> SettingsResult<SettingsResponse> {
        match confirm_email_change_core(token, ctx).await {
            Ok(outcome) => Ok(SettingsResponse::success(outcome.message())),
            Err(err) if err.is_rejection() => Ok(SettingsResponse::error(err.to_string())),
            Err(err) => Err(err),
        }
    }
}
