//! Test doubles shared by unit and integration tests.
//!
//! Compiled for the crate's own tests and, through the `test-support`
//! feature, for the integration suites under `tests/`.

pub mod content_repository;

pub use content_repository::InMemoryContentRepository;
