//! Entity traits for the settings workflow.
//!
//! The workflow reads stored records through these traits, so applications can
//! bring their own entity structs with custom field names and extra fields.
//! The built-in [`User`](crate::types::User) and
//! [`Verification`](crate::types::Verification) types implement them out of
//! the box.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Trait representing a stored user record.
///
/// The workflow reads user fields through these getters. Custom types must
/// provide all of them and may carry additional fields.
pub trait UserRecord: Clone + Send + Sync + Serialize + std::fmt::Debug + 'static {
    fn id(&self) -> &str;
    fn email(&self) -> Option<&str>;
    fn name(&self) -> Option<&str>;
    fn email_verified(&self) -> bool;
    fn image(&self) -> Option<&str>;
    fn role(&self) -> Option<&str>;
    fn two_factor_enabled(&self) -> bool;
    /// Credential hash, if the account has a local password.
    ///
    /// Accounts provisioned through an OAuth provider have none, and the
    /// workflow refuses password changes for them.
    fn password_hash(&self) -> Option<&str>;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;
}

/// Trait representing a pending email-change verification token.
pub trait VerificationRecord: Clone + Send + Sync + Serialize + std::fmt::Debug + 'static {
    fn id(&self) -> &str;
    fn identifier(&self) -> &str;
    fn value(&self) -> &str;
    fn expires_at(&self) -> DateTime<Utc>;
    fn created_at(&self) -> DateTime<Utc>;

    /// Check if the token has expired.
    fn is_expired(&self) -> bool {
        self.expires_at() < Utc::now()
    }
}
