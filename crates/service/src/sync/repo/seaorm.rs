use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use tracing::{instrument, warn};

use models::sync_record;

use crate::errors::ServiceError;
use crate::sync::repository::SyncRecordRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmSyncRecordRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmSyncRecordRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl SyncRecordRepository for SeaOrmSyncRecordRepository {
    #[instrument(skip(self))]
    async fn find_by_store(&self, store_id: i64) -> Result<Option<sync_record::Model>, ServiceError> {
        // Two rows are enough to notice a broken at-most-one convention.
        let rows = sync_record::Entity::find()
            .filter(sync_record::Column::StoreId.eq(store_id))
            .order_by_asc(sync_record::Column::Id)
            .limit(2u64)
            .all(&self.db)
            .await
            .map_err(ServiceError::db)?;
        if rows.len() > 1 {
            warn!(store_id, "multiple sync records for store; using lowest id");
        }
        Ok(rows.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
    use std::sync::{Arc, Mutex};

    fn record(id: i64, store_id: i64) -> sync_record::Model {
        let now = Utc::now().into();
        sync_record::Model {
            id,
            store_id,
            status: sync_record::status::SYNCED.into(),
            last_synced_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn absent_record_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<sync_record::Model>::new()])
            .into_connection();
        let repo = SeaOrmSyncRecordRepository::new(db);
        assert!(repo.find_by_store(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn issues_one_parameterised_query() {
        let rec = record(1, 5);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![rec.clone()]])
            .into_connection();
        let repo = SeaOrmSyncRecordRepository::new(db);
        assert_eq!(repo.find_by_store(5).await.unwrap(), Some(rec));

        let log = repo.db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let stmt = &log[0].statements()[0];
        assert!(stmt.sql.contains(r#"WHERE "sync_record"."store_id" = $1"#), "{}", stmt.sql);
        assert!(stmt.sql.contains(r#"ORDER BY "sync_record"."id" ASC"#), "{}", stmt.sql);
        assert!(stmt.sql.ends_with("LIMIT $2"), "{}", stmt.sql);
        let values = stmt.values.clone().map(|v| v.0).unwrap_or_default();
        assert_eq!(values, vec![sea_orm::Value::from(5i64), sea_orm::Value::from(2u64)]);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> { Ok(()) }
    }

    /// Run `find_by_store` with a subscriber capturing warnings.
    async fn lookup_capturing_warnings(rows: Vec<sync_record::Model>) -> (Option<sync_record::Model>, String) {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([rows])
            .into_connection();
        let found = SeaOrmSyncRecordRepository::new(db).find_by_store(5).await.unwrap();
        let text = String::from_utf8(out.0.lock().unwrap().clone()).unwrap();
        (found, text)
    }

    #[tokio::test]
    async fn duplicates_pick_first_row_and_warn() {
        let (found, logs) = lookup_capturing_warnings(vec![record(2, 5), record(8, 5)]).await;
        assert_eq!(found.map(|r| r.id), Some(2));
        assert!(logs.contains("multiple sync records for store"), "{logs}");
        assert!(logs.contains("store_id=5"), "{logs}");
    }

    #[tokio::test]
    async fn single_row_does_not_warn() {
        let (found, logs) = lookup_capturing_warnings(vec![record(2, 5)]).await;
        assert_eq!(found.map(|r| r.id), Some(2));
        assert!(logs.is_empty(), "{logs}");
    }

    #[tokio::test]
    async fn storage_fault_propagates() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Conn(sea_orm::RuntimeErr::Internal("pool timed out".into()))])
            .into_connection();
        let repo = SeaOrmSyncRecordRepository::new(db);
        match repo.find_by_store(5).await {
            Err(ServiceError::Db(msg)) => assert!(msg.contains("pool timed out"), "{msg}"),
            other => panic!("expected db error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn record_sync_goes_through_model_upsert() {
        let saved = record(3, 9);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<sync_record::Model>::new()])
            .append_query_results([vec![saved.clone()]])
            .into_connection();
        let got = crate::sync::record_sync(&db, 9, sync_record::status::SYNCED).await.unwrap();
        assert_eq!(got, saved);
    }

    #[tokio::test]
    async fn record_sync_rejects_blank_status() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let err = crate::sync::record_sync(&db, 9, " ").await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(models::errors::ModelError::Validation(_))));
    }
}
