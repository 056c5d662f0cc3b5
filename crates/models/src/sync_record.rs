use sea_orm::{entity::prelude::*, ColumnTrait, DatabaseConnection, NotSet, QueryFilter, QueryOrder, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::errors;
use crate::store;

/// Conventional values for [`Model::status`]. Any non-empty string is stored.
pub mod status {
    pub const PENDING: &str = "pending";
    pub const SYNCED: &str = "synced";
    pub const FAILED: &str = "failed";
}

/// Per-store synchronization state.
///
/// At most one row per `store_id` is expected, but nothing at this layer
/// enforces it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sync_record")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub store_id: i64,
    pub status: String,
    pub last_synced_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Store,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Store => Entity::belongs_to(store::Entity)
                .from(Column::StoreId)
                .to(store::Column::Id)
                .into(),
        }
    }
}

impl Related<store::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Store.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_status(status: &str) -> Result<(), errors::ModelError> {
    if status.trim().is_empty() {
        return Err(errors::ModelError::Validation("status required".into()));
    }
    Ok(())
}

/// Record a sync outcome for a store: update the store's existing record
/// (lowest id) or insert one if none exists.
///
/// `status` is trimmed before it is validated, compared and stored.
/// `last_synced_at` moves only when it is [`status::SYNCED`].
/// Find and write are separate statements; two writers for the same store
/// racing here can both insert.
#[instrument(skip(db))]
pub async fn upsert_for_store(
    db: &DatabaseConnection,
    store_id: i64,
    status: &str,
) -> Result<Model, errors::ModelError> {
    let status = status.trim();
    validate_status(status)?;
    let now: DateTimeWithTimeZone = Utc::now().into();
    let synced_at = (status == status::SYNCED).then_some(now);

    let existing = Entity::find()
        .filter(Column::StoreId.eq(store_id))
        .order_by_asc(Column::Id)
        .one(db)
        .await?;

    if let Some(existing) = existing {
        debug!(record_id = existing.id, "updating sync record");
        let mut am: ActiveModel = existing.into();
        am.status = Set(status.to_string());
        if synced_at.is_some() {
            am.last_synced_at = Set(synced_at);
        }
        am.updated_at = Set(now);
        Ok(am.update(db).await?)
    } else {
        debug!("creating sync record");
        let am = ActiveModel {
            id: NotSet,
            store_id: Set(store_id),
            status: Set(status.to_string()),
            last_synced_at: Set(synced_at),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(am.insert(db).await?)
    }
}
