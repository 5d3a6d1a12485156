//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod contact_inquiry_repository;
mod content_transport;
mod notification_queue;
mod notification_sender;
mod permission_store;

#[cfg(test)]
pub use contact_inquiry_repository::MockContactInquiryRepository;
pub use contact_inquiry_repository::{
    ContactInquiryRepository, ContactInquiryRepositoryError, FixtureContactInquiryRepository,
};
#[cfg(test)]
pub use content_transport::MockContentTransport;
pub use content_transport::{
    ContentTransport, FixtureContentTransport, TransportError, TransportMethod, TransportRequest,
    TransportResponse,
};
#[cfg(test)]
pub use notification_queue::MockNotificationQueue;
pub use notification_queue::{NotificationQueue, NotificationQueueError};
#[cfg(test)]
pub use notification_sender::MockNotificationSender;
pub use notification_sender::{NotificationSendError, NotificationSender};
#[cfg(test)]
pub use permission_store::MockPermissionStore;
pub use permission_store::{PermissionStore, PermissionStoreError};
