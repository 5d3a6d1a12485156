//! Driven port over the repository's public-role permission table.
//!
//! Permissions are addressed by their action string, for example
//! `api::page.page.find`.

use std::collections::BTreeSet;

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised while reading or updating public permissions.
    pub enum PermissionStoreError {
        /// The permission store could not be reached.
        Connection { message: String } =>
            "permission store connection failed: {message}",
        /// A read or write against the permission store failed.
        Query { message: String } =>
            "permission store query failed: {message}",
    }
}

/// Port for inspecting and changing the public role's permissions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PermissionStore: Send + Sync {
    /// Return every action currently enabled for the public role.
    async fn public_permissions(&self) -> Result<BTreeSet<String>, PermissionStoreError>;

    /// Enable `actions` for the public role.
    async fn grant_public(&self, actions: &[String]) -> Result<(), PermissionStoreError>;

    /// Disable `actions` for the public role.
    async fn revoke_public(&self, actions: &[String]) -> Result<(), PermissionStoreError>;
}
