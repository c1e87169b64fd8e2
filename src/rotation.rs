//! Token rotation through `tooling.tokens.rotate`.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::client::{RemoteCall, RemoteCallExt};
use crate::credential::CredentialRecord;
use crate::credential::secret::deserialize_secret;
use crate::{Error, Result};

/// Remote method exchanging a refresh token for a new credential pair.
pub const ROTATE_METHOD: &str = "tooling.tokens.rotate";

/// Payload of a successful rotation.
#[derive(Debug, Deserialize)]
pub struct RotateResponse {
    #[serde(deserialize_with = "deserialize_secret")]
    pub token: SecretString,
    #[serde(deserialize_with = "deserialize_secret")]
    pub refresh_token: SecretString,
    /// Upstream expiry, Unix seconds, before the safety margin.
    pub exp: i64,
}

impl RotateResponse {
    pub fn into_record(self) -> Result<CredentialRecord> {
        CredentialRecord::from_upstream(self.token, self.refresh_token, self.exp)
    }
}

/// Exchanges a refresh token for a fresh [`CredentialRecord`].
///
/// The refresh token is single-use: two rotators sharing one upstream refresh token will
/// invalidate each other.
#[derive(Clone)]
pub struct Rotator {
    gateway: Arc<dyn RemoteCall>,
}

impl Rotator {
    pub fn new(gateway: Arc<dyn RemoteCall>) -> Self {
        Self { gateway }
    }

    /// Rotate once. Failures come back wrapped in [`Error::Rotation`]; nothing is retried.
    pub async fn rotate(
        &self,
        refresh_token: &SecretString,
        cancel: &CancellationToken,
    ) -> Result<CredentialRecord> {
        tracing::debug!(gateway = self.gateway.name(), "Rotating token");

        let response: RotateResponse = self
            .gateway
            .call(
                ROTATE_METHOD,
                &[("refresh_token", refresh_token.expose_secret())],
                cancel,
            )
            .await
            .map_err(Error::rotation)?;

        let record = response.into_record().map_err(Error::rotation)?;
        tracing::info!(expires_at = record.expires_at(), "Token rotated");
        Ok(record)
    }
}

impl std::fmt::Debug for Rotator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rotator")
            .field("gateway", &self.gateway.name())
            .finish()
    }
}
