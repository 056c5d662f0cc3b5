use thiserror::Error;

use super::role::Role;

/// Business errors for role resolution and access checks
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("unknown role: {0}")]
    UnknownRole(String),
    #[error("unknown role level: {0}")]
    UnknownRoleLevel(i32),
    #[error("forbidden: requires {required}, have {actual}")]
    Forbidden { required: Role, actual: Role },
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::UnknownRole(_) => 1001,
            AuthError::UnknownRoleLevel(_) => 1002,
            AuthError::Forbidden { .. } => 1003,
        }
    }
}
