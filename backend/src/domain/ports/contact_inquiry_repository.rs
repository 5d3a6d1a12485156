//! Driven port persisting contact inquiries.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::ContactInquiry;

define_port_error! {
    /// Errors raised when storing contact inquiries.
    pub enum ContactInquiryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "contact inquiry repository connection failed: {message}",
        /// The insert was rejected.
        Rejected { message: String } =>
            "contact inquiry was rejected: {message}",
    }
}

/// Port for storing stamped contact inquiries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactInquiryRepository: Send + Sync {
    /// Persist `inquiry` and return it with its assigned identifier.
    async fn create(
        &self,
        inquiry: ContactInquiry,
    ) -> Result<ContactInquiry, ContactInquiryRepositoryError>;
}

/// Fixture repository that assigns identifier `1` and stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureContactInquiryRepository;

#[async_trait]
impl ContactInquiryRepository for FixtureContactInquiryRepository {
    async fn create(
        &self,
        inquiry: ContactInquiry,
    ) -> Result<ContactInquiry, ContactInquiryRepositoryError> {
        Ok(inquiry.with_id(1))
    }
}
