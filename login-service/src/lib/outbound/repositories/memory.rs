use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::credential::errors::StoreError;
use crate::credential::models::Credential;
use crate::credential::ports::CredentialStore;

/// Credential store kept in process memory, keyed by username.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    credentials: Arc<RwLock<HashMap<String, Credential>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the credential stored under its username.
    pub async fn insert(&self, credential: Credential) {
        self.credentials
            .write()
            .await
            .insert(credential.username.clone(), credential);
    }

    pub async fn len(&self) -> usize {
        self.credentials.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.credentials.read().await.is_empty()
    }
}

impl FromIterator<Credential> for InMemoryCredentialStore {
    fn from_iter<I: IntoIterator<Item = Credential>>(iter: I) -> Self {
        let credentials = iter
            .into_iter()
            .map(|credential| (credential.username.clone(), credential))
            .collect();

        Self {
            credentials: Arc::new(RwLock::new(credentials)),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Credential>, StoreError> {
        Ok(self.credentials.read().await.get(username).cloned())
    }
}
