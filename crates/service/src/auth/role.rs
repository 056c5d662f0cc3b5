use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::AuthError;

/// Closed set of principal roles.
///
/// Each role carries a fixed authority level; a lower level is more
/// privileged. Comparisons elsewhere go through [`Role::level`] or
/// [`Role::satisfies`], never through declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Manager,
    User,
}

impl Role {
    /// Every role, most privileged first.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Manager, Role::User];

    pub const fn level(self) -> i32 {
        match self {
            Role::Admin => 0,
            Role::Manager => 1,
            Role::User => 2,
        }
    }

    pub fn from_level(level: i32) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.level() == level)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::User => "USER",
        }
    }

    /// True when this role is at least as privileged as `required`.
    ///
    /// ```
    /// use service::auth::Role;
    /// assert!(Role::Admin.satisfies(Role::Manager));
    /// assert!(Role::Manager.satisfies(Role::Manager));
    /// assert!(!Role::User.satisfies(Role::Manager));
    /// ```
    pub const fn satisfies(self, required: Role) -> bool {
        required.level() >= self.level()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AuthError::UnknownRole(s.to_string()))
    }
}
