//! Shared fixtures for flow tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use account_settings_core::adapters::{MemoryStoreAdapter, UserOps};
use account_settings_core::{
    CreateUser, Mailer, SettingsConfig, SettingsContext, SettingsError, SettingsResult, User,
};

/// A mailer that records every dispatch for later assertions.
#[derive(Clone, Default)]
pub(crate) struct RecordingMailer {
    sent: Arc<Mutex<Vec<SentEmail>>>,
}

#[derive(Clone, Debug)]
pub(crate) struct SentEmail {
    pub(crate) to: String,
    pub(crate) subject: String,
    pub(crate) html: String,
    pub(crate) text: String,
}

impl RecordingMailer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, html: &str, text: &str) -> SettingsResult<()> {
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }
}

/// A mailer that always fails, for dispatch-failure tests.
pub(crate) struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(
        &self,
        _to: &str,
        _subject: &str,
        _html: &str,
        _text: &str,
    ) -> SettingsResult<()> {
        Err(SettingsError::mail("smtp unreachable"))
    }
}

/// Context over a fresh memory store with a recording mailer attached.
pub(crate) fn create_test_context() -> (SettingsContext<MemoryStoreAdapter>, RecordingMailer) {
    let mailer = RecordingMailer::new();
    let config = SettingsConfig::new()
        .base_url("http://localhost:3000")
        .mailer(mailer.clone());
    let ctx = SettingsContext::new(Arc::new(config), Arc::new(MemoryStoreAdapter::new()));
    (ctx, mailer)
}

/// Context with the given mailer (or none) instead of the recording default.
pub(crate) fn create_test_context_with_mailer(
    mailer: Option<Arc<dyn Mailer>>,
) -> SettingsContext<MemoryStoreAdapter> {
    let mut config = SettingsConfig::new().base_url("http://localhost:3000");
    config.mailer = mailer;
    SettingsContext::new(Arc::new(config), Arc::new(MemoryStoreAdapter::new()))
}

pub(crate) async fn create_user(
    ctx: &SettingsContext<MemoryStoreAdapter>,
    create: CreateUser,
) -> User {
    ctx.store.create_user(create).await.unwrap()
}
