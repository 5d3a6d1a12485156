//! In-memory public-role permission store.
//!
//! Holds the enabled action strings in a mutex-guarded set. Useful for
//! bootstrap dry runs and tests; nothing is persisted.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{PermissionStore, PermissionStoreError};

/// Permission store keeping the public role's actions in memory.
#[derive(Debug, Default)]
pub struct InMemoryPermissionStore {
    actions: Mutex<BTreeSet<String>>,
}

impl InMemoryPermissionStore {
    /// Create a store whose public role already holds `actions`.
    pub fn with_actions<I, S>(actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            actions: Mutex::new(actions.into_iter().map(Into::into).collect()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeSet<String>>, PermissionStoreError> {
        self.actions
            .lock()
            .map_err(|_| PermissionStoreError::query("permission store lock poisoned"))
    }
}

#[async_trait]
impl PermissionStore for InMemoryPermissionStore {
    async fn public_permissions(&self) -> Result<BTreeSet<String>, PermissionStoreError> {
        Ok(self.lock()?.clone())
    }

    async fn grant_public(&self, actions: &[String]) -> Result<(), PermissionStoreError> {
        self.lock()?.extend(actions.iter().cloned());
        Ok(())
    }

    async fn revoke_public(&self, actions: &[String]) -> Result<(), PermissionStoreError> {
        let mut enabled = self.lock()?;
        for action in actions {
            enabled.remove(action);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn grants_and_revokes_are_visible() {
        let store = InMemoryPermissionStore::with_actions(["api::page.page.find"]);

        store
            .grant_public(&["api::page.page.findOne".to_owned()])
            .await
            .expect("grant");
        store
            .revoke_public(&["api::page.page.find".to_owned()])
            .await
            .expect("revoke");

        let actions = store.public_permissions().await.expect("read");
        assert_eq!(
            actions,
            BTreeSet::from(["api::page.page.findOne".to_owned()])
        );
    }
}
