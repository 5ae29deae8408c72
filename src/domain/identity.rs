//! Signed-in Identity
//!
//! The opaque account context scoping all list documents. Produced by the
//! identity provider; the core never mutates it.

use serde::{Deserialize, Serialize};

use super::list::UserId;

/// The current user as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: UserId,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub email_verified: bool,
}

impl Identity {
    pub fn new(uid: UserId) -> Self {
        Self {
            uid,
            email: None,
            display_name: None,
            email_verified: false,
        }
    }
}
