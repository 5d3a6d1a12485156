//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **content_api**: reqwest-backed transport to the content repository
//! - **queue**: in-process notification queue drained by a tokio task
//! - **notifications**: notification sender that records deliveries as log events
//! - **permissions**: in-memory public-role permission store
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod content_api;
pub mod notifications;
pub mod permissions;
pub mod queue;
