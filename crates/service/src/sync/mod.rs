//! Per-store sync records: lookup (repository trait, SeaORM and in-memory
//! implementations) and the write helper a synchronization job calls after
//! deciding between create and update.

pub mod repository;
pub mod repo;

pub use repo::seaorm::SeaOrmSyncRecordRepository;
pub use repository::SyncRecordRepository;

use sea_orm::DatabaseConnection;
use tracing::info;

use crate::errors::ServiceError;
use models::sync_record;

/// Record a sync outcome for a store.
///
/// Does not serialise concurrent writers for the same store; callers that
/// need at-most-one record per store must coordinate around this call.
pub async fn record_sync(db: &DatabaseConnection, store_id: i64, status: &str) -> Result<sync_record::Model, ServiceError> {
    let saved = sync_record::upsert_for_store(db, store_id, status).await?;
    info!(store_id, record_id = saved.id, status = %saved.status, "sync_recorded");
    Ok(saved)
}
