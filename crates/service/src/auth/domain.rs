use std::fmt;

use serde::{Deserialize, Serialize};

use super::role::Role;

/// Principal resolved by the authentication flow after credentials check out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPrincipal {
    pub user_id: i64,
    pub role: Role,
    /// `None` for principals not bound to a store (e.g. admins).
    pub store_id: Option<i64>,
}

/// Payload returned to a client after a successful login.
///
/// Built in one call and never mutated; fields are read through accessors.
/// Serialises as `{"token", "roleLevel", "storeId", "userId"}` with
/// `storeId: null` when the principal has no store.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    token: String,
    role_level: i32,
    #[serde(default)]
    store_id: Option<i64>,
    user_id: i64,
}

impl LoginResponse {
    pub fn new(token: impl Into<String>, role_level: i32, store_id: Option<i64>, user_id: i64) -> Self {
        Self { token: token.into(), role_level, store_id, user_id }
    }

    /// Build from a resolved principal, taking the level from the role table.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthPrincipal, LoginResponse, Role};
    /// let principal = AuthPrincipal { user_id: 7, role: Role::Manager, store_id: Some(3) };
    /// let resp = LoginResponse::for_principal("tok", &principal);
    /// assert_eq!(resp.role_level(), 1);
    /// assert_eq!(resp.store_id(), Some(3));
    /// ```
    pub fn for_principal(token: impl Into<String>, principal: &AuthPrincipal) -> Self {
        Self::new(token, principal.role.level(), principal.store_id, principal.user_id)
    }

    pub fn token(&self) -> &str { &self.token }

    pub fn role_level(&self) -> i32 { self.role_level }

    pub fn store_id(&self) -> Option<i64> { self.store_id }

    pub fn user_id(&self) -> i64 { self.user_id }

    /// Role for the carried level, if it maps to one.
    pub fn role(&self) -> Option<Role> { Role::from_level(self.role_level) }
}

// Keeps bearer tokens out of logs.
impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &"<redacted>")
            .field("role_level", &self.role_level)
            .field("store_id", &self.store_id)
            .field("user_id", &self.user_id)
            .finish()
    }
}
