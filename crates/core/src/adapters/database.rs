pub use super::traits::{UserOps, VerificationOps};

/// Store adapter trait for persistence.
///
/// Combines the entity-specific operation traits. Any type that implements
/// both sub-traits (`UserOps`, `VerificationOps`) automatically implements
/// `StoreAdapter` via the blanket impl.
///
/// Use the sub-traits directly when you only need a subset of operations.
pub trait StoreAdapter: UserOps + VerificationOps {}

impl<T> StoreAdapter for T where T: UserOps + VerificationOps {}

/// PostgreSQL persistence behind the `sqlx-postgres` feature.
///
/// The built-in queries expect the schema below. `email_verified` and
/// `two_factor_enabled` must be `NOT NULL` because the built-in `User`
/// decodes them as plain booleans; `identifier` is `TEXT` because
/// change-email identifiers embed the requested address.
///
/// ```sql
/// CREATE TABLE IF NOT EXISTS users (
///     id VARCHAR(255) PRIMARY KEY,
///     email VARCHAR(255) UNIQUE,
///     name VARCHAR(255),
///     image TEXT,
///     email_verified BOOLEAN NOT NULL DEFAULT false,
///     role VARCHAR(50),
///     two_factor_enabled BOOLEAN NOT NULL DEFAULT false,
///     password_hash VARCHAR(255),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
///
/// CREATE TABLE IF NOT EXISTS verifications (
///     id VARCHAR(255) PRIMARY KEY,
///     identifier TEXT NOT NULL,
///     value VARCHAR(255) UNIQUE NOT NULL,
///     expires_at TIMESTAMPTZ NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
///
/// CREATE INDEX IF NOT EXISTS idx_verifications_identifier ON verifications(identifier);
/// ```
#[cfg(feature = "sqlx-postgres")]
pub mod sqlx_adapter {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;

    use crate::entity::{UserRecord, VerificationRecord};
    use crate::error::{SettingsError, SettingsResult, StoreError};
    use crate::types::{CreateUser, CreateVerification, UpdateUser, User, Verification};
    use sqlx::PgPool;
    use sqlx::postgres::PgRow;
    use std::marker::PhantomData;
    use uuid::Uuid;

    /// Blanket trait combining all bounds needed for SQLx-based entity types.
    ///
    /// Any type that implements `sqlx::FromRow` plus the standard marker
    /// traits automatically satisfies this bound. Custom entity types just
    /// need `#[derive(sqlx::FromRow)]` (or a manual `FromRow` impl) alongside
    /// their record trait impl.
    pub trait SqlxEntity:
        for<'r> sqlx::FromRow<'r, PgRow> + Send + Sync + Unpin + Clone + 'static
    {
    }

    impl<T> SqlxEntity for T where
        T: for<'r> sqlx::FromRow<'r, PgRow> + Send + Sync + Unpin + Clone + 'static
    {
    }

    /// PostgreSQL store adapter via SQLx.
    ///
    /// Generic over entity types. Use default type parameters for the
    /// built-in types, or supply your own structs that implement the record
    /// traits plus `sqlx::FromRow`.
    pub struct SqlxStoreAdapter<U = User, V = Verification> {
        pool: PgPool,
        _phantom: PhantomData<(U, V)>,
    }

    /// Constructors for the default (built-in) entity types.
    impl SqlxStoreAdapter {
        pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
            let pool = PgPool::connect(database_url).await?;
            Ok(Self {
                pool,
                _phantom: PhantomData,
            })
        }

        pub async fn with_config(
            database_url: &str,
            config: PoolConfig,
        ) -> Result<Self, sqlx::Error> {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .acquire_timeout(config.acquire_timeout)
                .idle_timeout(config.idle_timeout)
                .max_lifetime(config.max_lifetime)
                .connect(database_url)
                .await?;
            Ok(Self {
                pool,
                _phantom: PhantomData,
            })
        }
    }

    /// Methods available for all type parameterizations.
    impl<U, V> SqlxStoreAdapter<U, V> {
        pub fn from_pool(pool: PgPool) -> Self {
            Self {
                pool,
                _phantom: PhantomData,
            }
        }

        pub async fn test_connection(&self) -> Result<(), sqlx::Error> {
            sqlx::query("SELECT 1").execute(&self.pool).await?;
            Ok(())
        }

        pub fn pool_stats(&self) -> PoolStats {
            PoolStats {
                size: self.pool.size(),
                idle: self.pool.num_idle(),
            }
        }

        pub async fn close(&self) {
            self.pool.close().await;
        }
    }

    #[derive(Debug, Clone)]
    pub struct PoolConfig {
        pub max_connections: u32,
        pub min_connections: u32,
        pub acquire_timeout: std::time::Duration,
        pub idle_timeout: Option<std::time::Duration>,
        pub max_lifetime: Option<std::time::Duration>,
    }

    impl Default for PoolConfig {
        fn default() -> Self {
            Self {
                max_connections: 10,
                min_connections: 0,
                acquire_timeout: std::time::Duration::from_secs(30),
                idle_timeout: Some(std::time::Duration::from_secs(600)),
                max_lifetime: Some(std::time::Duration::from_secs(1800)),
            }
        }
    }

    #[derive(Debug, Clone)]
    pub struct PoolStats {
        pub size: u32,
        pub idle: usize,
    }

    // -- UserOps --

    #[async_trait]
    impl<U, V> UserOps for SqlxStoreAdapter<U, V>
    where
        U: UserRecord + SqlxEntity,
        V: VerificationRecord + SqlxEntity,
    {
        type User = U;

        async fn create_user(&self, create_user: CreateUser) -> SettingsResult<U> {
            let id = create_user.id.unwrap_or_else(|| Uuid::new_v4().to_string());
            let now = Utc::now();

            let user = sqlx::query_as::<_, U>(
                r#"
                INSERT INTO users (id, email, name, image, email_verified, role, two_factor_enabled, password_hash, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING *
                "#,
            )
            .bind(&id)
            .bind(&create_user.email)
            .bind(&create_user.name)
            .bind(&create_user.image)
            .bind(create_user.email_verified.unwrap_or(false))
            .bind(&create_user.role)
            .bind(create_user.two_factor_enabled.unwrap_or(false))
            .bind(&create_user.password_hash)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

            Ok(user)
        }

        async fn get_user_by_id(&self, id: &str) -> SettingsResult<Option<U>> {
            let user = sqlx::query_as::<_, U>("SELECT * FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(user)
        }

        async fn get_user_by_email(&self, email: &str) -> SettingsResult<Option<U>> {
            let user = sqlx::query_as::<_, U>("SELECT * FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
            Ok(user)
        }

        async fn update_user(&self, id: &str, update: UpdateUser) -> SettingsResult<U> {
            let mut query = sqlx::QueryBuilder::new("UPDATE users SET updated_at = NOW()");
            let mut has_updates = false;

            if let Some(email) = &update.email {
                query.push(", email = ");
                query.push_bind(email);
                has_updates = true;
            }
            if let Some(name) = &update.name {
                query.push(", name = ");
                query.push_bind(name);
                has_updates = true;
            }
            if let Some(image) = &update.image {
                query.push(", image = ");
                query.push_bind(image);
                has_updates = true;
            }
            if let Some(email_verified) = update.email_verified {
                query.push(", email_verified = ");
                query.push_bind(email_verified);
                has_updates = true;
            }
            if let Some(role) = &update.role {
                query.push(", role = ");
                query.push_bind(role);
                has_updates = true;
            }
            if let Some(two_factor_enabled) = update.two_factor_enabled {
                query.push(", two_factor_enabled = ");
                query.push_bind(two_factor_enabled);
                has_updates = true;
            }
            if let Some(password_hash) = &update.password_hash {
                query.push(", password_hash = ");
                query.push_bind(password_hash);
                has_updates = true;
            }

            if !has_updates {
                return self.get_user_by_id(id).await?.ok_or_else(|| {
                    SettingsError::Store(StoreError::Query(format!("no user with id {}", id)))
                });
            }

            query.push(" WHERE id = ");
            query.push_bind(id);
            query.push(" RETURNING *");

            let user = query.build_query_as::<U>().fetch_one(&self.pool).await?;
            Ok(user)
        }
    }

    // -- VerificationOps --

    #[async_trait]
    impl<U, V> VerificationOps for SqlxStoreAdapter<U, V>
    where
        U: UserRecord + SqlxEntity,
        V: VerificationRecord + SqlxEntity,
    {
        type Verification = V;

        async fn create_verification(
            &self,
            create_verification: CreateVerification,
        ) -> SettingsResult<V> {
            let id = Uuid::new_v4().to_string();
            let now = Utc::now();

            let verification = sqlx::query_as::<_, V>(
                r#"
                INSERT INTO verifications (id, identifier, value, expires_at, created_at)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
                "#,
            )
            .bind(&id)
            .bind(&create_verification.identifier)
            .bind(&create_verification.value)
            .bind(create_verification.expires_at)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

            Ok(verification)
        }

        async fn get_verification_by_value(&self, value: &str) -> SettingsResult<Option<V>> {
            let verification =
                sqlx::query_as::<_, V>("SELECT * FROM verifications WHERE value = $1")
                    .bind(value)
                    .fetch_optional(&self.pool)
                    .await?;
            Ok(verification)
        }

        async fn get_verification_by_identifier(
            &self,
            identifier: &str,
        ) -> SettingsResult<Option<V>> {
            let verification = sqlx::query_as::<_, V>(
                "SELECT * FROM verifications WHERE identifier = $1 ORDER BY created_at DESC LIMIT 1",
            )
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await?;
            Ok(verification)
        }

        async fn delete_verification(&self, id: &str) -> SettingsResult<()> {
            sqlx::query("DELETE FROM verifications WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;
            Ok(())
        }

        async fn delete_expired_verifications(&self) -> SettingsResult<usize> {
            let result = sqlx::query("DELETE FROM verifications WHERE expires_at < NOW()")
                .execute(&self.pool)
                .await?;
            Ok(result.rows_affected() as usize)
        }
    }
}

#[cfg(feature = "sqlx-postgres")]
pub use sqlx_adapter::{SqlxEntity, SqlxStoreAdapter};
