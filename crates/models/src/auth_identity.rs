use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, ColumnTrait, QueryFilter, ActiveModelTrait, Set, DatabaseConnection, SqlErr};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::user;

/// Closed set of authentication providers; unknown values are unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum ProviderName {
    #[sea_orm(string_value = "onsite")]
    Onsite,
    #[sea_orm(string_value = "twitter")]
    Twitter,
    #[sea_orm(string_value = "google")]
    Google,
}

impl Default for ProviderName {
    fn default() -> Self { ProviderName::Onsite }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "auth_identity")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub provider_name: ProviderName,
    pub provider_identifier: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(
    db: &DatabaseConnection,
    user_id: i32,
    provider: ProviderName,
    provider_identifier: &str,
) -> Result<Model, errors::ModelError> {
    if provider_identifier.trim().is_empty() {
        return Err(errors::ModelError::Validation("provider identifier required".into()));
    }
    let am = ActiveModel {
        user_id: Set(user_id),
        provider_name: Set(provider),
        provider_identifier: Set(provider_identifier.to_string()),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    // The unique indexes on (provider_name, provider_identifier) and
    // (user_id, provider_name) are the guard under concurrent inserts.
    match am.insert(db).await {
        Ok(created) => Ok(created),
        Err(e) => match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Err(errors::ModelError::Conflict(msg)),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Err(errors::ModelError::ForeignKey(msg)),
            _ => Err(errors::ModelError::Db(e.to_string())),
        },
    }
}

pub async fn find_by_provider_identity(
    db: &DatabaseConnection,
    provider: ProviderName,
    provider_identifier: &str,
) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::ProviderName.eq(provider))
        .filter(Column::ProviderIdentifier.eq(provider_identifier))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_user(db: &DatabaseConnection, user_id: i32) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Resolve the owning user for a binding, via the declared association.
pub async fn find_owner(db: &DatabaseConnection, identity: &Model) -> Result<Option<user::Model>, errors::ModelError> {
    identity
        .find_related(user::Entity)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(errors::ModelError::NotFound("auth identity not found".into()));
    }
    Ok(())
}
