pub mod errors;
pub mod db;
pub mod store;
pub mod sync_record;
