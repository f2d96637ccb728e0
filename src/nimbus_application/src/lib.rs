pub mod credentials;
pub mod notifications;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

pub use credentials::{CredentialService, CredentialServiceError, RejectionReason};
pub use notifications::Notifier;
pub use use_cases::*;
