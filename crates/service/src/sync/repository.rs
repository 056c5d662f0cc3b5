use async_trait::async_trait;

use models::sync_record;

use crate::errors::ServiceError;

/// Lookup of the sync record belonging to a store.
#[async_trait]
pub trait SyncRecordRepository: Send + Sync {
    /// `Ok(None)` when the store has no record, including unknown or negative
    /// ids. `Err` only on storage faults. When the at-most-one-per-store
    /// convention is broken, the record with the lowest id wins.
    async fn find_by_store(&self, store_id: i64) -> Result<Option<sync_record::Model>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::RwLock;

    /// # Examples
    /// ```
    /// use service::sync::{SyncRecordRepository, repository::mock::MockSyncRecordRepository};
    /// let repo = MockSyncRecordRepository::default();
    /// repo.insert(MockSyncRecordRepository::record(1, 5, "synced")).unwrap();
    /// let found = tokio_test::block_on(repo.find_by_store(5)).unwrap();
    /// assert_eq!(found.map(|r| r.id), Some(1));
    /// assert!(tokio_test::block_on(repo.find_by_store(6)).unwrap().is_none());
    /// ```
    #[derive(Default)]
    pub struct MockSyncRecordRepository {
        records: RwLock<Vec<sync_record::Model>>,
        fail_next: AtomicBool,
    }

    impl MockSyncRecordRepository {
        pub fn insert(&self, record: sync_record::Model) -> Result<(), ServiceError> {
            let mut records = self.records.write().map_err(|_| ServiceError::db("mock store poisoned"))?;
            records.push(record);
            Ok(())
        }

        /// Make the next lookup fail as a storage fault would.
        pub fn fail_next(&self) {
            self.fail_next.store(true, Ordering::SeqCst);
        }

        /// Fresh record stamped with the current time.
        pub fn record(id: i64, store_id: i64, status: &str) -> sync_record::Model {
            let now = chrono::Utc::now().into();
            sync_record::Model {
                id,
                store_id,
                status: status.to_string(),
                last_synced_at: None,
                created_at: now,
                updated_at: now,
            }
        }
    }

    #[async_trait]
    impl SyncRecordRepository for MockSyncRecordRepository {
        async fn find_by_store(&self, store_id: i64) -> Result<Option<sync_record::Model>, ServiceError> {
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(ServiceError::db("simulated storage fault"));
            }
            let records = self.records.read().map_err(|_| ServiceError::db("mock store poisoned"))?;
            Ok(records.iter().filter(|r| r.store_id == store_id).min_by_key(|r| r.id).cloned())
        }
    }
}
