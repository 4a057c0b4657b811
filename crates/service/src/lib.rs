//! Topic hierarchy, version chains, and role-gated access.
//!
//! [`hierarchy::TopicHierarchy`] owns every graph and version algorithm and
//! knows nothing about permissions. [`secure::SecureTopicService`] wraps it:
//! mutations are checked before they run, and multi-result reads are filtered
//! down to what the acting principal may see.

pub mod error;
pub mod hierarchy;
pub mod secure;

pub use error::{ServiceError, ServiceResult};
pub use hierarchy::TopicHierarchy;
pub use secure::SecureTopicService;
