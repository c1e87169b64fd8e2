//! # slack-token
//!
//! Lifecycle management for a rotating Slack token / refresh-token pair, exposed as a
//! declarative infrastructure resource.
//!
//! The resource can only be imported from an existing refresh token. Every planning cycle
//! decides whether the cached token is still usable; once it is stale the planned values
//! become unknown and the next apply rotates the pair through `tooling.tokens.rotate`.
//!
//! ```rust,no_run
//! use slack_token::{Provider, ProviderConfig, ResourceData, ResourceInstance};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), slack_token::Error> {
//! let provider = Provider::new(ProviderConfig::new("1.0.0"))?;
//! let mut instance = ResourceInstance::new(provider.token_resource());
//! instance.import("xoxe-1-refresh")?;
//!
//! let change = instance.plan(&ResourceData::default());
//! instance.apply(change, &CancellationToken::new()).await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod client;
pub mod credential;
pub mod observability;
pub mod prelude;
pub mod provider;
pub mod resource;
pub mod rotation;
pub mod staleness;
pub mod storage;

pub use client::{ClientConfig, RemoteCall, RemoteCallExt, SlackClient};
pub use credential::{CredentialRecord, SAFETY_MARGIN_SECS};
pub use provider::{Provider, ProviderConfig, ProviderMetadata};
pub use resource::{
    AttributeValue, Diagnostic, Diagnostics, PlannedChange, Resource, ResourceData,
    ResourceInstance, Schema, Severity, TokenResource,
};
pub use rotation::{ROTATE_METHOD, RotateResponse, Rotator};
pub use staleness::{StalenessDecision, is_stale};
pub use storage::{FileStateStore, MemoryStateStore, StateStore};

/// Error type for token lifecycle operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The request never produced a response (DNS, connect, timeout, body read).
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The API answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    RemoteHttp { status: u16, body: String },

    /// The JSON envelope carried a non-empty `error` field.
    #[error("{0}")]
    RemoteApi(String),

    /// The response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The caller cancelled the call before it completed.
    #[error("Request cancelled")]
    Cancelled,

    /// The requested lifecycle transition does not exist for this resource.
    #[error("{operation} is not supported: {reason}")]
    UnsupportedOperation {
        operation: &'static str,
        reason: String,
    },

    /// Malformed plan, state or client configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Token rotation failed; the prior state stays authoritative.
    #[error("Unable to rotate token, got error: {source}")]
    Rotation {
        #[source]
        source: Box<Error>,
    },

    /// State store file operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error category for diagnostics and retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Network failures that may succeed on a later attempt
    Transport,
    /// The remote API rejected the call
    Remote,
    /// Unexpected response shape
    Decode,
    /// Cancelled by the caller
    Cancelled,
    /// Lifecycle transition the resource does not offer
    Unsupported,
    /// Invalid plan, state or configuration
    Configuration,
    /// Local IO
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Remote => "remote",
            ErrorCategory::Decode => "decode",
            ErrorCategory::Cancelled => "cancelled",
            ErrorCategory::Unsupported => "unsupported",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Internal => "internal",
        }
    }
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    pub fn unsupported(operation: &'static str, reason: impl Into<String>) -> Self {
        Error::UnsupportedOperation {
            operation,
            reason: reason.into(),
        }
    }

    /// Wrap a gateway failure with the rotation label.
    pub fn rotation(source: Error) -> Self {
        Error::Rotation {
            source: Box::new(source),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Transport(_) => ErrorCategory::Transport,
            Error::RemoteHttp { .. } | Error::RemoteApi(_) => ErrorCategory::Remote,
            Error::Decode(_) => ErrorCategory::Decode,
            Error::Cancelled => ErrorCategory::Cancelled,
            Error::UnsupportedOperation { .. } => ErrorCategory::Unsupported,
            Error::Configuration(_) => ErrorCategory::Configuration,
            Error::Rotation { source } => source.category(),
            Error::Io(_) => ErrorCategory::Internal,
        }
    }

    /// The innermost error, looking through the rotation label.
    pub fn root(&self) -> &Error {
        match self {
            Error::Rotation { source } => source.root(),
            other => other,
        }
    }

    /// Whether a later identical attempt could succeed. Nothing in this crate retries.
    pub fn is_retryable(&self) -> bool {
        match self.root() {
            Error::Transport(_) => true,
            Error::RemoteHttp { status, .. } => *status == 429 || (500..=599).contains(status),
            _ => false,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self.root() {
            Error::RemoteHttp { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The API error code for envelope failures, e.g. `invalid_refresh_token`.
    pub fn api_error(&self) -> Option<&str> {
        match self.root() {
            Error::RemoteApi(code) => Some(code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_error_display() {
        let err = Error::rotation(Error::RemoteApi("invalid_auth".into()));
        assert_eq!(
            err.to_string(),
            "Unable to rotate token, got error: invalid_auth"
        );
    }

    #[test]
    fn test_category_looks_through_rotation() {
        let err = Error::rotation(Error::RemoteHttp {
            status: 503,
            body: "unavailable".into(),
        });
        assert_eq!(err.category(), ErrorCategory::Remote);
        assert_eq!(err.status_code(), Some(503));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_is_retryable() {
        assert!(!Error::RemoteApi("invalid_auth".into()).is_retryable());
        assert!(!Error::Cancelled.is_retryable());
        assert!(!Error::unsupported("create", "import only").is_retryable());
        assert!(
            !Error::RemoteHttp {
                status: 400,
                body: String::new()
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_api_error_code() {
        let err = Error::rotation(Error::RemoteApi("token_expired".into()));
        assert_eq!(err.api_error(), Some("token_expired"));
        assert_eq!(Error::Cancelled.api_error(), None);
    }

    #[test]
    fn test_unsupported_display() {
        let err = Error::unsupported("create", "import the refresh token instead");
        assert_eq!(
            err.to_string(),
            "create is not supported: import the refresh token instead"
        );
        assert_eq!(err.category(), ErrorCategory::Unsupported);
    }
}
