//! # Account Settings Core
//!
//! Core abstractions for the account settings workflow. Contains traits,
//! types, configuration, and error handling.

pub mod adapters;
pub mod config;
pub mod context;
pub mod email;
pub mod entity;
pub mod error;
pub mod identity;
pub mod password;
pub mod types;

// Re-export commonly used items
pub use adapters::{
    MemoryStoreAdapter, MemoryUser, MemoryVerification, StoreAdapter, UserOps, VerificationOps,
};
#[cfg(feature = "sqlx-postgres")]
pub use adapters::{PoolConfig, PoolStats, SqlxEntity, SqlxStoreAdapter};
pub use config::SettingsConfig;
pub use context::SettingsContext;
pub use email::{ConsoleMailer, Mailer};
pub use entity::{UserRecord, VerificationRecord};
pub use error::{SettingsError, SettingsResult, StoreError};
pub use identity::{Actor, FixedIdentity, IdentityResolver};
pub use password::{hash_password, verify_password};
pub use types::{CreateUser, CreateVerification, UpdateUser, User, Verification};
