//! # Account Settings
//!
//! A self-service account settings workflow for Rust applications: profile
//! updates, password changes with old-password proof, and email changes
//! confirmed out-of-band through a verification token.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use account_settings::adapters::MemoryStoreAdapter;
//! use account_settings::{Actor, FixedIdentity, SettingsBuilder, SettingsConfig, SettingsUpdate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SettingsConfig::new().base_url("http://localhost:3000");
//!
//!     let settings = SettingsBuilder::new(config)
//!         .store(MemoryStoreAdapter::new())
//!         .build()?;
//!
//!     let identity = FixedIdentity::authenticated(Actor::local("user-1", "user@example.com"));
//!     let update = SettingsUpdate {
//!         name: Some("New Name".to_string()),
//!         ..Default::default()
//!     };
//!
//!     let response = settings.update(&identity, &update).await?;
//!     println!("{}", response.message());
//!     Ok(())
//! }
//! ```

// The AccountSettings struct lives in the root crate because it ties the
// flow layer (account-settings-api) to the core context (account-settings-core).
pub mod service;

// Re-export core abstractions
pub use account_settings_core::{
    Actor, ConsoleMailer, CreateUser, CreateVerification, FixedIdentity, IdentityResolver, Mailer,
    MemoryStoreAdapter, MemoryUser, MemoryVerification, SettingsConfig, SettingsContext,
    SettingsError, SettingsResult, StoreAdapter, StoreError, UpdateUser, User, UserOps,
    Verification, VerificationOps, hash_password, verify_password,
};

// Re-export entity traits
pub use account_settings_core::entity::{UserRecord, VerificationRecord};

// Re-export adapters
pub mod adapters {
    pub use account_settings_core::{
        MemoryStoreAdapter, MemoryUser, MemoryVerification, StoreAdapter, UserOps, VerificationOps,
    };

    #[cfg(feature = "sqlx-postgres")]
    pub use account_settings_core::adapters::database::sqlx_adapter::{
        PoolConfig, PoolStats, SqlxEntity, SqlxStoreAdapter,
    };
}

// Re-export flows
pub mod flows {
    pub use account_settings_api::flows::*;
}

pub use account_settings_api::{SettingsFlow, SettingsFlowConfig, SettingsResponse, SettingsUpdate};

// Re-export the main AccountSettings struct
pub use service::{AccountSettings, SettingsBuilder, TypedSettingsBuilder};
