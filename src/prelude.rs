//! Prelude module for convenient imports.
//!
//! ```rust
//! use slack_token::prelude::*;
//! ```

pub use crate::Error;
pub use crate::Result;

// Client
pub use crate::client::{ClientConfig, RemoteCall, RemoteCallExt, SlackClient};

// Credentials
pub use crate::credential::CredentialRecord;
pub use crate::rotation::Rotator;

// Resource
pub use crate::resource::{
    AttributeValue, Diagnostics, PlannedChange, Resource, ResourceData, ResourceInstance,
    TokenResource,
};

// Provider
pub use crate::provider::{Provider, ProviderConfig};

// Storage
pub use crate::storage::{FileStateStore, MemoryStateStore, StateStore};

pub use tokio_util::sync::CancellationToken;
