//! Credential record persisted as the resource state.

mod record;
pub mod secret;

pub use record::{CredentialRecord, SAFETY_MARGIN_SECS};
