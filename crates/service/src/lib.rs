//! Service layer on top of `models`.
//! - `auth`: role table, login response and level-based access checks.
//! - `sync`: per-store sync record lookup behind a repository trait.

pub mod errors;
pub mod auth;
pub mod sync;
