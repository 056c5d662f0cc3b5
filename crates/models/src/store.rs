use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::sync_record;

/// A retail location; the tenant that scopes users and sync records.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "store")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    SyncRecord,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::SyncRecord => Entity::has_many(sync_record::Entity).into(),
        }
    }
}

impl Related<sync_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SyncRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
