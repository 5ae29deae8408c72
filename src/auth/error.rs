//! Auth Errors
//!
//! Closed error set for the identity collaborator. Provider error codes
//! are mapped to variants exactly once, at this boundary; downstream code
//! matches on variants and never re-inspects codes.

use serde::{Deserialize, Serialize};

/// Result type for identity operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Everything the identity provider can reject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthError {
    InvalidEmail,
    UserDisabled,
    UserNotFound,
    WrongPassword,
    InvalidCredential,
    TooManyRequests,
    NetworkFailure,
    EmailAlreadyInUse,
    WeakPassword,
    OperationNotAllowed,
    /// Sign-in succeeded upstream but the email is not verified yet;
    /// forces an immediate sign-out
    EmailNotVerified,
    /// A required form field was left empty; rejected before any
    /// provider call
    MissingFields,
    /// Unrecognized provider code, kept for logging
    Other(String),
}

impl AuthError {
    /// Map a provider error code (e.g. "auth/wrong-password") to a variant
    pub fn from_provider_code(code: &str) -> Self {
        match code {
            "auth/invalid-email" => AuthError::InvalidEmail,
            "auth/user-disabled" => AuthError::UserDisabled,
            "auth/user-not-found" => AuthError::UserNotFound,
            "auth/wrong-password" => AuthError::WrongPassword,
            "auth/invalid-credential" => AuthError::InvalidCredential,
            "auth/too-many-requests" => AuthError::TooManyRequests,
            "auth/network-request-failed" => AuthError::NetworkFailure,
            "auth/email-already-in-use" => AuthError::EmailAlreadyInUse,
            "auth/weak-password" => AuthError::WeakPassword,
            "auth/operation-not-allowed" => AuthError::OperationNotAllowed,
            other => AuthError::Other(other.to_string()),
        }
    }

    /// Fixed human-readable message shown in the notification toast
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::InvalidEmail => "El formato del correo electrónico no es válido",
            AuthError::UserDisabled => "Esta cuenta ha sido deshabilitada",
            AuthError::UserNotFound => "No existe una cuenta con este correo electrónico",
            AuthError::WrongPassword => "Contraseña incorrecta",
            AuthError::InvalidCredential => {
                "Credenciales inválidas. Por favor, verifica tu correo y contraseña"
            }
            AuthError::TooManyRequests => {
                "Demasiados intentos fallidos. Por favor, inténtalo más tarde"
            }
            AuthError::NetworkFailure => {
                "Error de conexión. Por favor, verifica tu conexión a internet"
            }
            AuthError::EmailAlreadyInUse => "Este correo electrónico ya está registrado",
            AuthError::WeakPassword => "La contraseña es demasiado débil",
            AuthError::OperationNotAllowed => "La operación no está permitida",
            AuthError::EmailNotVerified => {
                "Verifica tu correo electrónico y vuelve a intentar iniciar sesión"
            }
            AuthError::MissingFields => "Por favor, completa todos los campos",
            AuthError::Other(_) => {
                "Error al procesar la solicitud. Por favor, inténtalo de nuevo"
            }
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for AuthError {}
