//! Content repository outbound adapters.
//!
//! This module provides a thin HTTP implementation of the
//! `ContentTransport` port.

mod http_transport;

pub use http_transport::ReqwestContentTransport;
