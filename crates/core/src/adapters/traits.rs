use async_trait::async_trait;

use crate::entity::{UserRecord, VerificationRecord};
use crate::error::SettingsResult;
use crate::types::{CreateUser, CreateVerification, UpdateUser};

/// User persistence operations.
#[async_trait]
pub trait UserOps: Send + Sync + 'static {
    type User: UserRecord;

    async fn create_user(&self, user: CreateUser) -> SettingsResult<Self::User>;
    async fn get_user_by_id(&self, id: &str) -> SettingsResult<Option<Self::User>>;
    async fn get_user_by_email(&self, email: &str) -> SettingsResult<Option<Self::User>>;
    async fn update_user(&self, id: &str, update: UpdateUser) -> SettingsResult<Self::User>;
}

/// Verification token persistence operations.
///
/// Lookups return rows regardless of expiry. The workflow decides what an
/// expired token means, so adapters must not filter them out.
#[async_trait]
pub trait VerificationOps: Send + Sync + 'static {
    type Verification: VerificationRecord;

    async fn create_verification(
        &self,
        verification: CreateVerification,
    ) -> SettingsResult<Self::Verification>;
    async fn get_verification_by_value(
        &self,
        value: &str,
    ) -> SettingsResult<Option<Self::Verification>>;
    async fn get_verification_by_identifier(
        &self,
        identifier: &str,
    ) -> SettingsResult<Option<Self::Verification>>;
    async fn delete_verification(&self, id: &str) -> SettingsResult<()>;
    async fn delete_expired_verifications(&self) -> SettingsResult<usize>;
}
