//! Content-fetch client and repository-side services for the agency
//! marketing site.
//!
//! - [`domain`] holds the content kinds, the classified error taxonomy, the
//!   client and the repository-side services, all written against ports.
//! - [`outbound`] provides the adapters: a reqwest transport, an in-process
//!   notification queue and in-memory stores.
//! - [`config`] loads connection settings through OrthoConfig.

pub mod config;
pub mod domain;
pub mod outbound;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::{ConfigError, ContentApiConfig, ContentApiSettings};
pub use domain::{ContentClient, ContentError, ErrorKind};
