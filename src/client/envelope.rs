//! Slack Web API response envelope.

use serde::Deserialize;

use crate::{Error, Result};

/// Fields every Slack Web API response carries next to its payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default)]
    pub ok: Option<bool>,
    /// Error code; empty or absent on success.
    #[serde(default)]
    pub error: Option<String>,
    /// Non-fatal notice, e.g. a deprecation.
    #[serde(default)]
    pub warning: Option<String>,
}

impl ResponseEnvelope {
    pub fn parse(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Map a non-empty `error` field to [`Error::RemoteApi`].
    pub fn into_result(self) -> Result<()> {
        match self.error {
            Some(error) if !error.is_empty() => Err(Error::RemoteApi(error)),
            _ => Ok(()),
        }
    }
}
