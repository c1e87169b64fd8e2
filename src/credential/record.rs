//! Token / refresh-token / expiry triple.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::secret::{deserialize_secret, serialize_secret};
use crate::staleness::is_stale;
use crate::{Error, Result};

/// Deducted from the upstream expiry so rotation happens well before the token dies.
pub const SAFETY_MARGIN_SECS: i64 = 3 * 60 * 60;

/// A fully known credential pair.
///
/// Records are never mutated; rotation always produces a new one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CredentialRecord {
    #[serde(serialize_with = "serialize_secret", deserialize_with = "deserialize_secret")]
    token: SecretString,
    #[serde(serialize_with = "serialize_secret", deserialize_with = "deserialize_secret")]
    refresh_token: SecretString,
    /// Unix seconds, safety margin already applied.
    expires_at: i64,
}

impl CredentialRecord {
    /// Create a record from already-adjusted values.
    pub fn new(
        token: impl Into<SecretString>,
        refresh_token: impl Into<SecretString>,
        expires_at: i64,
    ) -> Result<Self> {
        let token = token.into();
        let refresh_token = refresh_token.into();

        if token.expose_secret().is_empty() {
            return Err(invalid("token is empty"));
        }
        if refresh_token.expose_secret().is_empty() {
            return Err(invalid("refresh_token is empty"));
        }

        Ok(Self {
            token,
            refresh_token,
            expires_at,
        })
    }

    /// Create a record from an upstream rotation result, applying [`SAFETY_MARGIN_SECS`].
    pub fn from_upstream(
        token: impl Into<SecretString>,
        refresh_token: impl Into<SecretString>,
        upstream_exp: i64,
    ) -> Result<Self> {
        Self::new(
            token,
            refresh_token,
            upstream_exp.saturating_sub(SAFETY_MARGIN_SECS),
        )
    }

    pub fn token(&self) -> &SecretString {
        &self.token
    }

    pub fn refresh_token(&self) -> &SecretString {
        &self.refresh_token
    }

    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// Get expiration as DateTime.
    pub fn expires_at_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires_at, 0)
    }

    /// Check staleness against a Unix timestamp.
    pub fn is_stale_at(&self, now: i64) -> bool {
        is_stale(self.expires_at, now)
    }

    /// Check staleness against the current time.
    pub fn is_stale(&self) -> bool {
        self.is_stale_at(Utc::now().timestamp())
    }
}

fn invalid(message: &str) -> Error {
    Error::Decode(<serde_json::Error as serde::de::Error>::custom(message))
}
