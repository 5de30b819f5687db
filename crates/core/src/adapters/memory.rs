use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::entity::{UserRecord, VerificationRecord};
use crate::error::{SettingsError, SettingsResult, StoreError};
use crate::types::{CreateUser, CreateVerification, UpdateUser, User, Verification};

use super::traits::{UserOps, VerificationOps};

// ─── Memory entity traits ──────────────────────────────────────────────
//
// These traits extend the read-only record traits with construction and
// mutation methods needed by `MemoryStoreAdapter`. Implement these on your
// custom entity types to use them with the in-memory adapter.

/// Construction and mutation for user entities stored in memory.
pub trait MemoryUser: UserRecord {
    /// Construct a new user from creation data.
    fn from_create(id: String, create: &CreateUser, now: DateTime<Utc>) -> Self;
    /// Apply an update in place.
    fn apply_update(&mut self, update: &UpdateUser);
}

/// Construction for verification entities stored in memory.
pub trait MemoryVerification: VerificationRecord {
    fn from_create(id: String, create: &CreateVerification, now: DateTime<Utc>) -> Self;
}

// ─── Default implementations for built-in types ─────────────────────────

impl MemoryUser for User {
    fn from_create(id: String, create: &CreateUser, now: DateTime<Utc>) -> Self {
        User {
            id,
            name: create.name.clone(),
            email: create.email.clone(),
            email_verified: create.email_verified.unwrap_or(false),
            image: create.image.clone(),
            role: create.role.clone(),
            two_factor_enabled: create.two_factor_enabled.unwrap_or(false),
            password_hash: create.password_hash.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, update: &UpdateUser) {
        if let Some(email) = &update.email {
            self.email = Some(email.clone());
        }
        if let Some(name) = &update.name {
            self.name = Some(name.clone());
        }
        if let Some(image) = &update.image {
            self.image = Some(image.clone());
        }
        if let Some(email_verified) = update.email_verified {
            self.email_verified = email_verified;
        }
        if let Some(role) = &update.role {
            self.role = Some(role.clone());
        }
        if let Some(two_factor_enabled) = update.two_factor_enabled {
            self.two_factor_enabled = two_factor_enabled;
        }
        if let Some(password_hash) = &update.password_hash {
            self.password_hash = Some(password_hash.clone());
        }
        self.updated_at = Utc::now();
    }
}

impl MemoryVerification for Verification {
    fn from_create(id: String, create: &CreateVerification, now: DateTime<Utc>) -> Self {
        Verification {
            id,
            identifier: create.identifier.clone(),
            value: create.value.clone(),
            expires_at: create.expires_at,
            created_at: now,
        }
    }
}

// ─── Generic in-memory adapter ──────────────────────────────────────────

/// In-memory store adapter for testing and development.
///
/// Generic over entity types. Use default type parameters for the built-in
/// types, or supply your own custom structs that implement the `Memory*`
/// traits.
///
/// ```rust,ignore
/// // Using built-in types (no turbofish needed):
/// let store = MemoryStoreAdapter::new();
///
/// // Using custom types:
/// let store = MemoryStoreAdapter::<MyUser, MyVerification>::default();
/// ```
pub struct MemoryStoreAdapter<U = User, V = Verification> {
    users: Arc<Mutex<HashMap<String, U>>>,
    verifications: Arc<Mutex<HashMap<String, V>>>,
    email_index: Arc<Mutex<HashMap<String, String>>>,
}

/// Constructor for the default (built-in) entity types.
/// Use `Default::default()` for custom type parameterizations.
impl MemoryStoreAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<U, V> Default for MemoryStoreAdapter<U, V> {
    fn default() -> Self {
        Self {
            users: Arc::new(Mutex::new(HashMap::new())),
            verifications: Arc::new(Mutex::new(HashMap::new())),
            email_index: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<U, V> Clone for MemoryStoreAdapter<U, V> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            verifications: Arc::clone(&self.verifications),
            email_index: Arc::clone(&self.email_index),
        }
    }
}

// ── User operations ──

#[async_trait]
impl<U, V> UserOps for MemoryStoreAdapter<U, V>
where
    U: MemoryUser,
    V: MemoryVerification,
{
    type User = U;

    async fn create_user(&self, create_user: CreateUser) -> SettingsResult<U> {
        let mut users = self.users.lock().unwrap();
        let mut email_index = self.email_index.lock().unwrap();

        let id = create_user
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        if let Some(email) = &create_user.email
            && email_index.contains_key(email)
        {
            return Err(SettingsError::Store(StoreError::Constraint(
                "email already exists".to_string(),
            )));
        }

        let now = Utc::now();
        let user = U::from_create(id.clone(), &create_user, now);

        users.insert(id.clone(), user.clone());

        if let Some(email) = &create_user.email {
            email_index.insert(email.clone(), id);
        }

        Ok(user)
    }

    async fn get_user_by_id(&self, id: &str) -> SettingsResult<Option<U>> {
        let users = self.users.lock().unwrap();
        Ok(users.get(id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> SettingsResult<Option<U>> {
        let email_index = self.email_index.lock().unwrap();
        let users = self.users.lock().unwrap();

        if let Some(user_id) = email_index.get(email) {
            Ok(users.get(user_id).cloned())
        } else {
            Ok(None)
        }
    }

    async fn update_user(&self, id: &str, update: UpdateUser) -> SettingsResult<U> {
        let mut users = self.users.lock().unwrap();
        let mut email_index = self.email_index.lock().unwrap();

        let user = users.get_mut(id).ok_or_else(|| {
            SettingsError::Store(StoreError::Query(format!("no user with id {}", id)))
        })?;

        // Update the index BEFORE mutation (read old values via trait getters)
        if let Some(new_email) = &update.email {
            if let Some(old_email) = user.email() {
                email_index.remove(old_email);
            }
            email_index.insert(new_email.clone(), id.to_string());
        }

        user.apply_update(&update);
        Ok(user.clone())
    }
}

// ── Verification operations ──

#[async_trait]
impl<U, V> VerificationOps for MemoryStoreAdapter<U, V>
where
    U: MemoryUser,
    V: MemoryVerification,
{
    type Verification = V;

    async fn create_verification(&self, create: CreateVerification) -> SettingsResult<V> {
        let mut verifications = self.verifications.lock().unwrap();

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let verification = V::from_create(id.clone(), &create, now);

        verifications.insert(id, verification.clone());
        Ok(verification)
    }

    async fn get_verification_by_value(&self, value: &str) -> SettingsResult<Option<V>> {
        let verifications = self.verifications.lock().unwrap();
        Ok(verifications.values().find(|v| v.value() == value).cloned())
    }

    async fn get_verification_by_identifier(&self, identifier: &str) -> SettingsResult<Option<V>> {
        let verifications = self.verifications.lock().unwrap();
        Ok(verifications
            .values()
            .filter(|v| v.identifier() == identifier)
            .max_by_key(|v| v.created_at())
            .cloned())
    }

    async fn delete_verification(&self, id: &str) -> SettingsResult<()> {
        let mut verifications = self.verifications.lock().unwrap();
        verifications.remove(id);
        Ok(())
    }

    async fn delete_expired_verifications(&self) -> SettingsResult<usize> {
        let mut verifications = self.verifications.lock().unwrap();
        let before = verifications.len();
        verifications.retain(|_, v| !v.is_expired());
        Ok(before - verifications.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_create_user_rejects_duplicate_email() {
        let store = MemoryStoreAdapter::new();
        store
            .create_user(CreateUser::new().with_email("a@x.com"))
            .await
            .unwrap();

        let err = store
            .create_user(CreateUser::new().with_email("a@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Store(StoreError::Constraint(_))
        ));
    }

    #[tokio::test]
    async fn test_create_user_stores_every_builder_field() {
        let store = MemoryStoreAdapter::new();
        let user = store
            .create_user(
                CreateUser::new()
                    .with_email("admin@x.com")
                    .with_name("Admin")
                    .with_image("https://example.com/admin.png")
                    .with_email_verified(true)
                    .with_role("admin")
                    .with_password_hash("$argon2id$stub"),
            )
            .await
            .unwrap();

        assert_eq!(user.email.as_deref(), Some("admin@x.com"));
        assert_eq!(user.name.as_deref(), Some("Admin"));
        assert_eq!(user.image.as_deref(), Some("https://example.com/admin.png"));
        assert!(user.email_verified);
        assert_eq!(user.role.as_deref(), Some("admin"));
        assert_eq!(user.password_hash.as_deref(), Some("$argon2id$stub"));
    }

    #[tokio::test]
    async fn test_update_user_resyncs_email_index() {
        let store = MemoryStoreAdapter::new();
        let user = store
            .create_user(CreateUser::new().with_email("a@x.com"))
            .await
            .unwrap();

        store
            .update_user(
                &user.id,
                UpdateUser {
                    email: Some("b@x.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(store.get_user_by_email("a@x.com").await.unwrap().is_none());
        let by_new = store
            .get_user_by_email("b@x.com")
            .await
            .unwrap()
            .expect("new email should resolve");
        assert_eq!(by_new.id, user.id);
    }

    #[tokio::test]
    async fn test_latest_verification_wins_for_identifier() {
        let store = MemoryStoreAdapter::new();

        store
            .create_verification(CreateVerification {
                identifier: "change_email:u1:b@x.com".to_string(),
                value: "ce_first".to_string(),
                expires_at: Utc::now() + Duration::hours(1),
            })
            .await
            .unwrap();

        // Distinct created_at stamps for the two rows.
        std::thread::sleep(std::time::Duration::from_millis(5));

        store
            .create_verification(CreateVerification {
                identifier: "change_email:u1:b@x.com".to_string(),
                value: "ce_second".to_string(),
                expires_at: Utc::now() + Duration::hours(1),
            })
            .await
            .unwrap();

        let latest = store
            .get_verification_by_identifier("change_email:u1:b@x.com")
            .await
            .unwrap()
            .expect("identifier should resolve");
        assert_eq!(latest.value, "ce_second");
    }

    #[tokio::test]
    async fn test_delete_expired_verifications_sweeps_only_expired() {
        let store = MemoryStoreAdapter::new();

        store
            .create_verification(CreateVerification {
                identifier: "change_email:u1:b@x.com".to_string(),
                value: "ce_stale".to_string(),
                expires_at: Utc::now() - Duration::hours(1),
            })
            .await
            .unwrap();
        store
            .create_verification(CreateVerification {
                identifier: "change_email:u2:c@x.com".to_string(),
                value: "ce_live".to_string(),
                expires_at: Utc::now() + Duration::hours(1),
            })
            .await
            .unwrap();

        let swept = store.delete_expired_verifications().await.unwrap();
        assert_eq!(swept, 1);

        assert!(
            store
                .get_verification_by_value("ce_stale")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            store
                .get_verification_by_value("ce_live")
                .await
                .unwrap()
                .is_some()
        );
    }
}
