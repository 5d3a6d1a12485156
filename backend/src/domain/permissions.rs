//! Public-role permission reconciliation run at repository bootstrap.
//!
//! The public read path needs `find`/`findOne` on each published content
//! kind, `find` on the settings singleton and `create` on contact inquiries.
//! Reconciliation converges the public role on exactly that set for the
//! managed kinds; permissions on other namespaces are left untouched.

use std::collections::BTreeSet;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use super::ports::{PermissionStore, PermissionStoreError};

const API_NAMESPACE: &str = "api::";

/// Managed content kinds and the public actions each should expose.
const PUBLIC_ACTIONS: [(&str, &[&str]); 8] = [
    ("page", &["find", "findOne"]),
    ("about-section", &["find", "findOne"]),
    ("blog-post", &["find", "findOne"]),
    ("case-study", &["find", "findOne"]),
    ("job-listing", &["find", "findOne"]),
    ("brand-story", &["find", "findOne"]),
    ("site-setting", &["find"]),
    ("contact-inquiry", &["create"]),
];

/// Build the permission string for `action` on `kind`.
///
/// # Examples
///
/// ```rust
/// use agency_content::domain::permission_action;
///
/// assert_eq!(permission_action("page", "find"), "api::page.page.find");
/// ```
pub fn permission_action(kind: &str, action: &str) -> String {
    format!("{API_NAMESPACE}{kind}.{kind}.{action}")
}

/// Every permission the public role should hold.
pub fn desired_public_permissions() -> BTreeSet<String> {
    PUBLIC_ACTIONS
        .iter()
        .flat_map(|(kind, actions)| {
            actions
                .iter()
                .map(move |action| permission_action(kind, action))
        })
        .collect()
}

fn is_managed(permission: &str) -> bool {
    let Some(rest) = permission.strip_prefix(API_NAMESPACE) else {
        return false;
    };
    PUBLIC_ACTIONS
        .iter()
        .any(|(kind, _)| rest.starts_with(&format!("{kind}.{kind}.")))
}

/// Changes applied by one reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationReport {
    /// Permissions newly enabled.
    pub granted: Vec<String>,
    /// Permissions disabled.
    pub revoked: Vec<String>,
}

impl ReconciliationReport {
    /// Return `true` when the run changed nothing.
    pub fn is_noop(&self) -> bool {
        self.granted.is_empty() && self.revoked.is_empty()
    }
}

/// Errors raised while reconciling permissions.
#[derive(Debug, Error)]
pub enum ReconciliationError {
    /// The permission store failed.
    #[error("permission reconciliation failed: {0}")]
    Store(#[from] PermissionStoreError),
}

/// Converges the public role on [`desired_public_permissions`].
#[derive(Clone)]
pub struct PermissionReconciler<S> {
    store: Arc<S>,
}

impl<S> PermissionReconciler<S> {
    /// Create a reconciler over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S> PermissionReconciler<S>
where
    S: PermissionStore,
{
    /// Grant missing public permissions and revoke managed extras.
    ///
    /// Running twice in a row leaves the second report empty.
    pub async fn reconcile(&self) -> Result<ReconciliationReport, ReconciliationError> {
        let desired = desired_public_permissions();
        let current = self.store.public_permissions().await?;

        let granted: Vec<String> = desired.difference(&current).cloned().collect();
        let revoked: Vec<String> = current
            .iter()
            .filter(|permission| is_managed(permission) && !desired.contains(*permission))
            .cloned()
            .collect();

        if !granted.is_empty() {
            self.store.grant_public(&granted).await?;
        }
        if !revoked.is_empty() {
            self.store.revoke_public(&revoked).await?;
        }

        info!(
            granted = granted.len(),
            revoked = revoked.len(),
            "public permissions reconciled"
        );
        Ok(ReconciliationReport { granted, revoked })
    }
}

#[cfg(test)]
mod tests {
    //! Reconciliation behaviour against a mocked permission store.

    use super::*;
    use crate::domain::ports::MockPermissionStore;
    use rstest::rstest;

    #[rstest]
    fn desired_set_covers_reads_settings_and_inquiry_creation() {
        let desired = desired_public_permissions();
        assert_eq!(desired.len(), 14);
        assert!(desired.contains("api::blog-post.blog-post.findOne"));
        assert!(desired.contains("api::site-setting.site-setting.find"));
        assert!(!desired.contains("api::site-setting.site-setting.findOne"));
        assert!(desired.contains("api::contact-inquiry.contact-inquiry.create"));
        assert!(!desired.contains("api::contact-inquiry.contact-inquiry.find"));
    }

    #[rstest]
    #[case("api::contact-inquiry.contact-inquiry.find", true)]
    #[case("api::page.page.delete", true)]
    #[case("api::newsletter.newsletter.find", false)]
    #[case("plugin::upload.content-api.find", false)]
    fn managed_permissions_are_limited_to_known_kinds(
        #[case] permission: &str,
        #[case] managed: bool,
    ) {
        assert_eq!(is_managed(permission), managed);
    }

    #[tokio::test]
    async fn grants_missing_and_revokes_managed_extras() {
        let mut store = MockPermissionStore::new();
        store.expect_public_permissions().times(1).return_once(|| {
            Ok(BTreeSet::from([
                "api::page.page.find".to_owned(),
                "api::contact-inquiry.contact-inquiry.find".to_owned(),
                "plugin::upload.content-api.find".to_owned(),
            ]))
        });
        store
            .expect_grant_public()
            .withf(|actions: &[String]| {
                actions.len() == 13 && !actions.contains(&"api::page.page.find".to_owned())
            })
            .times(1)
            .return_once(|_| Ok(()));
        store
            .expect_revoke_public()
            .withf(|actions: &[String]| {
                actions == ["api::contact-inquiry.contact-inquiry.find".to_owned()]
            })
            .times(1)
            .return_once(|_| Ok(()));

        let report = PermissionReconciler::new(Arc::new(store))
            .reconcile()
            .await
            .expect("reconciliation succeeds");

        assert_eq!(report.granted.len(), 13);
        assert_eq!(
            report.revoked,
            vec!["api::contact-inquiry.contact-inquiry.find".to_owned()]
        );
    }

    #[tokio::test]
    async fn converged_store_is_left_alone() {
        let mut store = MockPermissionStore::new();
        store
            .expect_public_permissions()
            .times(1)
            .return_once(|| Ok(desired_public_permissions()));
        store.expect_grant_public().times(0);
        store.expect_revoke_public().times(0);

        let report = PermissionReconciler::new(Arc::new(store))
            .reconcile()
            .await
            .expect("reconciliation succeeds");

        assert!(report.is_noop());
    }

    #[tokio::test]
    async fn store_failures_surface() {
        let mut store = MockPermissionStore::new();
        store
            .expect_public_permissions()
            .times(1)
            .return_once(|| Err(PermissionStoreError::connection("refused")));

        let error = PermissionReconciler::new(Arc::new(store))
            .reconcile()
            .await
            .expect_err("store failure");

        assert!(error.to_string().contains("refused"));
    }
}
