//! Auth Layer
//!
//! Identity collaborator boundary: closed error set, provider trait and
//! session orchestration.

mod error;
mod provider;
mod session;

pub use error::{AuthError, AuthResult};
pub use provider::IdentityProvider;
pub use session::AuthSession;
