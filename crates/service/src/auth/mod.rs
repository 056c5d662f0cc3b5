//! Auth module: role table, login response shape and access checks.
//!
//! Credential verification and token issuance live outside this crate; the
//! types here describe what that flow produces and how levels are compared.

pub mod access;
pub mod domain;
pub mod errors;
pub mod role;

pub use access::authorize;
pub use domain::{AuthPrincipal, LoginResponse};
pub use errors::AuthError;
pub use role::Role;
