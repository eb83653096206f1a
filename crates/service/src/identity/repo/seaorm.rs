use sea_orm::{DatabaseConnection, EntityTrait};

use models::auth_identity::{self, ProviderName};
use models::errors::ModelError;
use models::user;

use crate::identity::domain::{Account, IdentityBinding, Provider};
use crate::identity::errors::IdentityError;
use crate::identity::repository::{IdentityRepository, UserDirectory};

pub struct SeaOrmIdentityRepository {
    pub db: DatabaseConnection,
}

fn to_provider_name(provider: Provider) -> ProviderName {
    match provider {
        Provider::Onsite => ProviderName::Onsite,
        Provider::Twitter => ProviderName::Twitter,
        Provider::Google => ProviderName::Google,
    }
}

fn to_provider(name: ProviderName) -> Provider {
    match name {
        ProviderName::Onsite => Provider::Onsite,
        ProviderName::Twitter => Provider::Twitter,
        ProviderName::Google => Provider::Google,
    }
}

fn to_binding(model: auth_identity::Model) -> IdentityBinding {
    IdentityBinding {
        id: model.id,
        user_id: model.user_id,
        provider: to_provider(model.provider_name),
        provider_identifier: model.provider_identifier,
    }
}

fn map_model_err(e: ModelError) -> IdentityError {
    match e {
        ModelError::Validation(msg) => IdentityError::Validation(msg),
        ModelError::NotFound(msg) => IdentityError::NotFound(msg),
        ModelError::Conflict(msg) => IdentityError::DuplicateBinding(msg),
        ModelError::ForeignKey(msg) => IdentityError::ReferentialIntegrity(msg),
        ModelError::Db(msg) => IdentityError::Repository(msg),
    }
}

#[async_trait::async_trait]
impl IdentityRepository for SeaOrmIdentityRepository {
    async fn insert(&self, user_id: i32, provider: Provider, provider_identifier: &str) -> Result<IdentityBinding, IdentityError> {
        let created = auth_identity::create(&self.db, user_id, to_provider_name(provider), provider_identifier)
            .await
            .map_err(map_model_err)?;
        Ok(to_binding(created))
    }

    async fn find_by_provider_identity(&self, provider: Provider, provider_identifier: &str) -> Result<Option<IdentityBinding>, IdentityError> {
        let found = auth_identity::find_by_provider_identity(&self.db, to_provider_name(provider), provider_identifier)
            .await
            .map_err(map_model_err)?;
        Ok(found.map(to_binding))
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<IdentityBinding>, IdentityError> {
        let found = auth_identity::find_by_user(&self.db, user_id)
            .await
            .map_err(map_model_err)?;
        Ok(found.into_iter().map(to_binding).collect())
    }

    async fn delete(&self, id: i32) -> Result<bool, IdentityError> {
        match auth_identity::delete(&self.db, id).await {
            Ok(()) => Ok(true),
            Err(ModelError::NotFound(_)) => Ok(false),
            Err(e) => Err(map_model_err(e)),
        }
    }
}

pub struct SeaOrmUserDirectory {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl UserDirectory for SeaOrmUserDirectory {
    async fn find_account(&self, user_id: i32) -> Result<Option<Account>, IdentityError> {
        let found = user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| IdentityError::Repository(e.to_string()))?;
        Ok(found.map(|u| Account { id: u.id, email: u.email, name: u.name }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::domain::NewBinding;
    use crate::identity::IdentityLinkStore;
    use crate::test_support::get_db;
    use std::sync::Arc;
    use uuid::Uuid;

    #[tokio::test]
    async fn link_resolve_unlink_against_database() {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return;
        }
        let Some(db) = get_db().await else { return };

        let email = format!("store_{}@example.com", Uuid::new_v4());
        let owner = models::user::create(&db, &email, "Store User").await.expect("create user");

        let store = IdentityLinkStore::new(
            Arc::new(SeaOrmIdentityRepository { db: db.clone() }),
            Arc::new(SeaOrmUserDirectory { db: db.clone() }),
        );

        let identifier = format!("g-{}", Uuid::new_v4());
        let binding = store
            .link(NewBinding { user_id: owner.id, provider: Provider::Google, provider_identifier: identifier.clone() })
            .await
            .expect("link");
        assert_eq!(binding.user_id, owner.id);
        assert_eq!(binding.provider, Provider::Google);

        let account = store.resolve(Provider::Google, &identifier).await.expect("resolve");
        assert_eq!(account.id, owner.id);
        assert_eq!(account.email, email);

        let bindings = store.bindings_for(owner.id).await.expect("bindings_for");
        assert_eq!(bindings.len(), 1);

        store.unlink(binding.id).await.expect("unlink");
        assert!(store.bindings_for(owner.id).await.expect("bindings_for").is_empty());

        models::user::delete(&db, owner.id).await.expect("cleanup user");
    }
}
