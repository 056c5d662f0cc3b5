use tracing::debug;

use super::errors::AuthError;
use super::role::Role;

/// Check a numeric role level (as carried by a login response) against a
/// required role. Returns the resolved role on success.
pub fn authorize(role_level: i32, required: Role) -> Result<Role, AuthError> {
    let actual = Role::from_level(role_level).ok_or(AuthError::UnknownRoleLevel(role_level))?;
    if !actual.satisfies(required) {
        debug!(%required, %actual, "access denied");
        return Err(AuthError::Forbidden { required, actual });
    }
    Ok(actual)
}
