use async_trait::async_trait;

use super::domain::{Account, IdentityBinding, Provider};
use super::errors::IdentityError;

/// Repository abstraction for identity-binding persistence.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Insert a new binding. The storage guards uniqueness of
    /// `(provider, provider_identifier)` and `(user_id, provider)`; a losing
    /// concurrent insert surfaces `DuplicateBinding`.
    async fn insert(&self, user_id: i32, provider: Provider, provider_identifier: &str) -> Result<IdentityBinding, IdentityError>;

    async fn find_by_provider_identity(&self, provider: Provider, provider_identifier: &str) -> Result<Option<IdentityBinding>, IdentityError>;
    async fn find_by_user(&self, user_id: i32) -> Result<Vec<IdentityBinding>, IdentityError>;

    /// Remove a binding; `false` when no such binding exists.
    async fn delete(&self, id: i32) -> Result<bool, IdentityError>;
}

/// Read-only accessor for the external user collaborator, injected into the
/// store at construction time.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_account(&self, user_id: i32) -> Result<Option<Account>, IdentityError>;
}

/// Simple in-memory mock repositories for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockIdentityRepository {
        next_id: Mutex<i32>,
        bindings: Mutex<HashMap<i32, IdentityBinding>>, // key: binding id
    }

    #[async_trait]
    impl IdentityRepository for MockIdentityRepository {
        async fn insert(&self, user_id: i32, provider: Provider, provider_identifier: &str) -> Result<IdentityBinding, IdentityError> {
            let mut bindings = self.bindings.lock().unwrap();
            // Mirror the unique indexes of the real storage.
            if bindings.values().any(|b| b.provider == provider && b.provider_identifier == provider_identifier) {
                return Err(IdentityError::DuplicateBinding(format!("{}:{} already bound", provider, provider_identifier)));
            }
            if bindings.values().any(|b| b.user_id == user_id && b.provider == provider) {
                return Err(IdentityError::DuplicateBinding(format!("user {} already bound to {}", user_id, provider)));
            }
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let binding = IdentityBinding {
                id: *next_id,
                user_id,
                provider,
                provider_identifier: provider_identifier.to_string(),
            };
            bindings.insert(binding.id, binding.clone());
            Ok(binding)
        }

        async fn find_by_provider_identity(&self, provider: Provider, provider_identifier: &str) -> Result<Option<IdentityBinding>, IdentityError> {
            let bindings = self.bindings.lock().unwrap();
            Ok(bindings
                .values()
                .find(|b| b.provider == provider && b.provider_identifier == provider_identifier)
                .cloned())
        }

        async fn find_by_user(&self, user_id: i32) -> Result<Vec<IdentityBinding>, IdentityError> {
            let bindings = self.bindings.lock().unwrap();
            let mut found: Vec<IdentityBinding> = bindings.values().filter(|b| b.user_id == user_id).cloned().collect();
            found.sort_by_key(|b| b.id);
            Ok(found)
        }

        async fn delete(&self, id: i32) -> Result<bool, IdentityError> {
            let mut bindings = self.bindings.lock().unwrap();
            Ok(bindings.remove(&id).is_some())
        }
    }

    #[derive(Default)]
    pub struct MockUserDirectory {
        accounts: Mutex<HashMap<i32, Account>>, // key: user id
    }

    impl MockUserDirectory {
        pub fn with_account(self, account: Account) -> Self {
            self.accounts.lock().unwrap().insert(account.id, account);
            self
        }
    }

    #[async_trait]
    impl UserDirectory for MockUserDirectory {
        async fn find_account(&self, user_id: i32) -> Result<Option<Account>, IdentityError> {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts.get(&user_id).cloned())
        }
    }
}
