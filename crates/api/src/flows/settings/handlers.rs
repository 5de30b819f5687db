use chrono::Utc;
use uuid::Uuid;

use account_settings_core::adapters::StoreAdapter;
use account_settings_core::entity::{UserRecord, VerificationRecord};
use account_settings_core::identity::IdentityResolver;
use account_settings_core::{
    CreateVerification, SettingsContext, SettingsError, SettingsResult, UpdateUser, hash_password,
    verify_password,
};

use super::SettingsFlowConfig;
use super::types::{SettingsUpdate, UpdateOutcome};

// ---------------------------------------------------------------------------
// Shared helpers (token creation, email sending)
// ---------------------------------------------------------------------------

/// Create a verification token, persist it, and return `(token_value, confirmation_url)`.
pub(super) async fn create_verification_token<DB: StoreAdapter>(
    ctx: &SettingsContext<DB>,
    identifier: &str,
    token_prefix: &str,
    expires_at: chrono::DateTime<Utc>,
    default_path: &str,
) -> SettingsResult<(String, String)> {
    let token_value = format!("{}_{}", token_prefix, Uuid::new_v4());

    let create_verification = CreateVerification {
        identifier: identifier.to_string(),
        value: token_value.clone(),
        expires_at,
    };

    ctx.store.create_verification(create_verification).await?;

    let confirmation_url = format!(
        "{}/{}?token={}",
        ctx.config.base_url, default_path, token_value
    );

    Ok((token_value, confirmation_url))
}

/// Send an email using the configured mailer, logging on failure.
///
/// Dispatch is fire-and-forget: a send failure must not fail the invocation
/// that requested it.
pub(super) async fn send_email_or_log<DB: StoreAdapter>(
    ctx: &SettingsContext<DB>,
    to: &str,
    subject: &str,
    html: &str,
    text: &str,
    action: &str,
) {
    if let Ok(mailer) = ctx.mailer() {
        if let Err(e) = mailer.send(to, subject, html, text).await {
            tracing::warn!(
                flow = "settings",
                action = action,
                email = to,
                error = %e,
                "Failed to send email"
            );
        }
    } else {
        tracing::warn!(
            flow = "settings",
            action = action,
            email = to,
            "No mailer configured, skipping email"
        );
    }
}

// ---------------------------------------------------------------------------
// Core functions (framework-agnostic business logic)
// ---------------------------------------------------------------------------

pub(crate) async fn update_settings_core<DB: StoreAdapter>(
    identity: &dyn IdentityResolver,
    payload: &SettingsUpdate,
    config: &SettingsFlowConfig,
    ctx: &SettingsContext<DB>,
) -> SettingsResult<UpdateOutcome> {
    let actor = identity
        .current_actor()
        .await?
        .ok_or(SettingsError::Unauthorized)?;

    // OAuth accounts manage credentials at the provider; discard those fields
    // before any branch logic sees them.
    let mut payload = payload.clone();
    if actor.is_oauth {
        payload.email = None;
        payload.password = None;
        payload.new_password = None;
        payload.two_factor_enabled = None;
    }

    let user = ctx
        .store
        .get_user_by_id(&actor.id)
        .await?
        .ok_or(SettingsError::Unauthorized)?;

    // The actor's email is the session view of the account; a payload email
    // equal to it is not a change request.
    let email_change = payload
        .email
        .as_deref()
        .filter(|new_email| actor.email.as_deref() != Some(*new_email));

    // Without a stored hash there is no credential to change; the password
    // fields are ignored and the request falls through to the generic branch.
    let password_change = match (payload.password.as_deref(), payload.new_password.as_deref()) {
        (Some(old_password), Some(new_password)) => user
            .password_hash()
            .map(|stored_hash| (old_password, new_password, stored_hash)),
        _ => None,
    };

    if email_change.is_some() && password_change.is_some() {
        return Err(SettingsError::CombinedCredentialChange);
    }

    // -- email change: verify before write --
    if let Some(new_email) = email_change {
        if let Some(existing) = ctx.store.get_user_by_email(new_email).await?
            && existing.id() != actor.id
        {
            return Err(SettingsError::EmailTaken);
        }

        let identifier = format!("change_email:{}:{}", actor.id, new_email);
        let expires_at = Utc::now() + config.verification_token_expires_in;
        let (_token, confirmation_url) = create_verification_token(
            ctx,
            &identifier,
            "ce",
            expires_at,
            "settings/confirm-email",
        )
        .await?;

        let subject = "Confirm your email change";
        let html = format!(
            "<p>Click the link below to confirm your new email address:</p>\
             <p><a href=\"{url}\">Confirm Email Change</a></p>",
            url = confirmation_url
        );
        let text = format!("Confirm your email change: {}", confirmation_url);

        send_email_or_log(ctx, new_email, subject, &html, &text, "change-email").await;

        // The stored email stays as-is until the token is confirmed.
        return Ok(UpdateOutcome::VerificationEmailSent);
    }

    // -- password change: confirm the old password, store only the new hash --
    if let Some((old_password, new_password, stored_hash)) = password_change {
        verify_password(old_password, stored_hash)?;

        let update = UpdateUser {
            name: payload.name.clone(),
            image: payload.image.clone(),
            role: payload.role.clone(),
            two_factor_enabled: payload.two_factor_enabled,
            password_hash: Some(hash_password(new_password)?),
            ..Default::default()
        };
        ctx.store.update_user(user.id(), update).await?;

        return Ok(UpdateOutcome::PasswordUpdated);
    }

    // -- generic update: allow-listed profile fields only --
    let update = UpdateUser {
        name: payload.name.clone(),
        image: payload.image.clone(),
        role: payload.role.clone(),
        two_factor_enabled: payload.two_factor_enabled,
        ..Default::default()
    };
    ctx.store.update_user(user.id(), update).await?;

    Ok(UpdateOutcome::SettingsUpdated)
}

pub(crate) async fn confirm_email_change_core<DB: StoreAdapter>(
    token: &str,
    ctx: &SettingsContext<DB>,
) -> SettingsResult<UpdateOutcome> {
    let verification = ctx
        .store
        .get_verification_by_value(token)
        .await?
        .ok_or(SettingsError::InvalidToken)?;

    if verification.is_expired() {
        ctx.store.delete_verification(verification.id()).await?;
        return Err(SettingsError::TokenExpired);
    }

    let identifier = verification.identifier();
    let parts: Vec<&str> = identifier.splitn(3, ':').collect();
    if parts.len() != 3 || parts[0] != "change_email" {
        return Err(SettingsError::InvalidToken);
    }

    let user_id = parts[1];
    let new_email = parts[2];
    let verification_id = verification.id().to_string();

    let user = ctx
        .store
        .get_user_by_id(user_id)
        .await?
        .ok_or(SettingsError::InvalidToken)?;

    // The availability check at request time is advisory; re-check now that
    // we are about to write.
    if let Some(existing) = ctx.store.get_user_by_email(new_email).await?
        && existing.id() != user.id()
    {
        ctx.store.delete_verification(&verification_id).await?;
        return Err(SettingsError::EmailTaken);
    }

    let update = UpdateUser {
        email: Some(new_email.to_string()),
        email_verified: Some(true),
        ..Default::default()
    };
    ctx.store.update_user(user.id(), update).await?;

    // Consume the token
    ctx.store.delete_verification(&verification_id).await?;

    Ok(UpdateOutcome::EmailUpdated)
}
