//! Auth Session
//!
//! Orchestrates the identity provider: form-field validation before any
//! provider call, the email-verification gate on login, and the
//! register-then-verify flow. Holds no state of its own; the current
//! identity is observed through the provider's watch channel.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::Identity;

use super::error::{AuthError, AuthResult};
use super::provider::IdentityProvider;

/// Session orchestration over an identity provider
pub struct AuthSession {
    provider: Arc<dyn IdentityProvider>,
}

impl AuthSession {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    /// Current identity and its lifecycle notifications
    pub fn identity(&self) -> watch::Receiver<Option<Identity>> {
        self.provider.identity_changes()
    }

    /// Sign in; an unverified email forces an immediate sign-out
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<Identity> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let identity = self.provider.sign_in(email.trim(), password).await?;
        if !identity.email_verified {
            if let Err(e) = self.provider.sign_out().await {
                log::warn!("sign-out after unverified login failed: {}", e);
            }
            return Err(AuthError::EmailNotVerified);
        }
        Ok(identity)
    }

    /// Create an account, send the verification email and sign out
    ///
    /// The user must verify the address before the first real login.
    pub async fn register(&self, email: &str, password: &str) -> AuthResult<Identity> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let identity = self.provider.register(email.trim(), password).await?;
        self.provider.send_verification_email().await?;
        self.provider.sign_out().await?;
        Ok(identity)
    }

    pub async fn logout(&self) -> AuthResult<()> {
        self.provider.sign_out().await
    }

    pub async fn resend_verification_email(&self) -> AuthResult<()> {
        self.provider.send_verification_email().await
    }

    pub async fn change_password(&self, new_password: &str) -> AuthResult<()> {
        if new_password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        self.provider.update_password(new_password).await
    }

    pub async fn update_display_name(&self, name: &str) -> AuthResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingFields);
        }
        self.provider.update_display_name(name).await
    }
}
