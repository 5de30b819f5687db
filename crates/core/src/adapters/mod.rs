pub mod database;
pub mod memory;
mod traits;

pub use database::{StoreAdapter, UserOps, VerificationOps};
pub use memory::{MemoryStoreAdapter, MemoryUser, MemoryVerification};

#[cfg(feature = "sqlx-postgres")]
pub use database::sqlx_adapter::{PoolConfig, PoolStats, SqlxEntity, SqlxStoreAdapter};
