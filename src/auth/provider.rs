//! Identity Provider Trait
//!
//! Abstract interface to the hosted identity service. Implementations
//! translate their wire errors through [`AuthError::from_provider_code`]
//! before returning.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::Identity;

use super::error::AuthResult;

/// External identity service (sign-in, account and profile management)
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authenticate with email and password
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<Identity>;

    /// Create a new account
    async fn register(&self, email: &str, password: &str) -> AuthResult<Identity>;

    /// End the current session
    async fn sign_out(&self) -> AuthResult<()>;

    /// Send a verification email to the current account
    async fn send_verification_email(&self) -> AuthResult<()>;

    /// Change the current account's password
    async fn update_password(&self, new_password: &str) -> AuthResult<()>;

    /// Change the current account's display name
    async fn update_display_name(&self, name: &str) -> AuthResult<()>;

    /// Lifecycle notifications: identity becomes present / absent
    fn identity_changes(&self) -> watch::Receiver<Option<Identity>>;
}
