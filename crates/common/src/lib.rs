//! Ambient helpers shared by every crate in the workspace.

pub mod utils;

pub use utils::logging::{
    init_logging_compact, init_logging_compact_to, init_logging_default, init_logging_json,
    init_logging_json_to,
};
