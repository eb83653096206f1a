use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{Account, IdentityBinding, NewBinding, Provider};
use super::errors::IdentityError;
use super::repository::{IdentityRepository, UserDirectory};

/// Identity link store independent of the storage backend.
///
/// Collaborators arrive by explicit injection: the binding repository and the
/// user directory are supplied at construction time.
pub struct IdentityLinkStore<R: IdentityRepository, U: UserDirectory> {
    repo: Arc<R>,
    users: Arc<U>,
}

impl<R: IdentityRepository, U: UserDirectory> IdentityLinkStore<R, U> {
    pub fn new(repo: Arc<R>, users: Arc<U>) -> Self {
        Self { repo, users }
    }

    /// Link a provider identity to an existing user.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::identity::IdentityLinkStore;
    /// use service::identity::domain::{Account, NewBinding, Provider};
    /// use service::identity::repository::mock::{MockIdentityRepository, MockUserDirectory};
    /// let users = MockUserDirectory::default()
    ///     .with_account(Account { id: 1, email: "user@example.com".into(), name: "Test".into() });
    /// let store = IdentityLinkStore::new(Arc::new(MockIdentityRepository::default()), Arc::new(users));
    /// let input = NewBinding { user_id: 1, provider: Provider::Google, provider_identifier: "g-123".into() };
    /// let binding = tokio_test::block_on(store.link(input)).unwrap();
    /// assert_eq!(binding.user_id, 1);
    /// ```
    #[instrument(skip(self, input), fields(user_id = input.user_id, provider = %input.provider))]
    pub async fn link(&self, input: NewBinding) -> Result<IdentityBinding, IdentityError> {
        let identifier = input.provider_identifier.trim();
        if identifier.is_empty() {
            return Err(IdentityError::Validation("provider identifier required".into()));
        }
        if self.users.find_account(input.user_id).await?.is_none() {
            return Err(IdentityError::ReferentialIntegrity(format!("user {} does not exist", input.user_id)));
        }
        if let Some(existing) = self.repo.find_by_provider_identity(input.provider, identifier).await? {
            debug!(binding_id = existing.id, "identity already bound");
            return Err(IdentityError::DuplicateBinding(format!("{}:{} already bound", input.provider, identifier)));
        }
        if self.repo.find_by_user(input.user_id).await?.iter().any(|b| b.provider == input.provider) {
            return Err(IdentityError::DuplicateBinding(format!("user {} already bound to {}", input.user_id, input.provider)));
        }

        // The storage's unique indexes remain the guard if two callers race
        // past the checks above.
        let binding = self.repo.insert(input.user_id, input.provider, identifier).await?;
        info!(binding_id = binding.id, user_id = binding.user_id, provider = %binding.provider, "identity_linked");
        Ok(binding)
    }

    /// Resolve an incoming provider identity to the owning account.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::identity::IdentityLinkStore;
    /// use service::identity::domain::{Account, NewBinding, Provider};
    /// use service::identity::repository::mock::{MockIdentityRepository, MockUserDirectory};
    /// let users = MockUserDirectory::default()
    ///     .with_account(Account { id: 7, email: "u@e.com".into(), name: "N".into() });
    /// let store = IdentityLinkStore::new(Arc::new(MockIdentityRepository::default()), Arc::new(users));
    /// let input = NewBinding { user_id: 7, provider: Provider::Onsite, provider_identifier: "alice".into() };
    /// let _ = tokio_test::block_on(store.link(input)).unwrap();
    /// let account = tokio_test::block_on(store.resolve(Provider::Onsite, "alice")).unwrap();
    /// assert_eq!(account.id, 7);
    /// ```
    #[instrument(skip(self, provider_identifier), fields(provider = %provider))]
    pub async fn resolve(&self, provider: Provider, provider_identifier: &str) -> Result<Account, IdentityError> {
        let binding = self
            .repo
            .find_by_provider_identity(provider, provider_identifier)
            .await?
            .ok_or_else(|| IdentityError::not_found("identity binding"))?;
        let account = self
            .users
            .find_account(binding.user_id)
            .await?
            .ok_or_else(|| {
                IdentityError::ReferentialIntegrity(format!("binding {} references missing user {}", binding.id, binding.user_id))
            })?;
        debug!(binding_id = binding.id, user_id = account.id, "identity_resolved");
        Ok(account)
    }

    /// All provider bindings held by a user.
    pub async fn bindings_for(&self, user_id: i32) -> Result<Vec<IdentityBinding>, IdentityError> {
        self.repo.find_by_user(user_id).await
    }

    /// Remove a binding by id.
    #[instrument(skip(self))]
    pub async fn unlink(&self, id: i32) -> Result<(), IdentityError> {
        if !self.repo.delete(id).await? {
            return Err(IdentityError::not_found("identity binding"));
        }
        info!(binding_id = id, "identity_unlinked");
        Ok(())
    }
}
