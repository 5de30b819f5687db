use std::sync::Arc;

use validator::Validate;

use account_settings_api::{SettingsFlow, SettingsFlowConfig, SettingsResponse, SettingsUpdate};
use account_settings_core::adapters::StoreAdapter;
use account_settings_core::identity::IdentityResolver;
use account_settings_core::{
    Mailer, SettingsConfig, SettingsContext, SettingsError, SettingsResult,
};

/// The assembled settings service, generic over the store adapter.
pub struct AccountSettings<DB: StoreAdapter> {
    config: Arc<SettingsConfig>,
    flow: SettingsFlow,
    context: SettingsContext<DB>,
}

/// Initial builder for configuring the service.
///
/// Call `.store(adapter)` to obtain a [`TypedSettingsBuilder`] that accepts
/// the flow configuration and can be built.
pub struct SettingsBuilder {
    config: SettingsConfig,
}

/// Typed builder returned by [`SettingsBuilder::store`].
pub struct TypedSettingsBuilder<DB: StoreAdapter> {
    config: SettingsConfig,
    store: Arc<DB>,
    flow_config: SettingsFlowConfig,
}

impl SettingsBuilder {
    pub fn new(config: SettingsConfig) -> Self {
        Self { config }
    }

    /// Set the mailer used for verification emails.
    pub fn mailer<M: Mailer + 'static>(mut self, mailer: M) -> Self {
        self.config.mailer = Some(Arc::new(mailer));
        self
    }

    /// Set the store adapter, returning a [`TypedSettingsBuilder`].
    pub fn store<DB: StoreAdapter>(self, store: DB) -> TypedSettingsBuilder<DB> {
        TypedSettingsBuilder {
            config: self.config,
            store: Arc::new(store),
            flow_config: SettingsFlowConfig::default(),
        }
    }
}

impl<DB: StoreAdapter> TypedSettingsBuilder<DB> {
    /// Set the mailer used for verification emails.
    pub fn mailer<M: Mailer + 'static>(mut self, mailer: M) -> Self {
        self.config.mailer = Some(Arc::new(mailer));
        self
    }

    /// Override the flow configuration.
    pub fn flow(mut self, config: SettingsFlowConfig) -> Self {
        self.flow_config = config;
        self
    }

    /// Build the service.
    pub fn build(self) -> SettingsResult<AccountSettings<DB>> {
        self.config.validate()?;

        let config = Arc::new(self.config);
        let context = SettingsContext::new(config.clone(), self.store);

        Ok(AccountSettings {
            config,
            flow: SettingsFlow::with_config(self.flow_config),
            context,
        })
    }
}

impl<DB: StoreAdapter> AccountSettings<DB> {
    /// Create a new settings service builder.
    #[allow(clippy::new_ret_no_self)]
    pub fn new(config: SettingsConfig) -> SettingsBuilder {
        SettingsBuilder::new(config)
    }

    /// Validate and apply a settings update on behalf of the resolved actor.
    ///
    /// Payload validation failures surface as `Err(SettingsError::Validation)`
    /// rather than a tagged response; the flow itself only ever sees validated
    /// payloads.
    pub async fn update(
        &self,
        identity: &dyn IdentityResolver,
        payload: &SettingsUpdate,
    ) -> SettingsResult<SettingsResponse> {
        payload
            .validate()
            .map_err(|e| SettingsError::validation(first_validation_message(&e)))?;

        self.flow.apply(identity, payload, &self.context).await
    }

    /// Complete a pending email change with the token from the confirmation
    /// link.
    pub async fn confirm_email_change(&self, token: &str) -> SettingsResult<SettingsResponse> {
        self.flow.confirm_email_change(token, &self.context).await
    }

    // -- accessors --

    pub fn config(&self) -> &SettingsConfig {
        &self.config
    }

    pub fn store(&self) -> &DB {
        &self.context.store
    }
}

/// Pick one message out of `validator::ValidationErrors`; the first failure
/// wins.
fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field))
            })
        })
        .next()
        .unwrap_or_else(|| "Validation failed".to_string())
}
