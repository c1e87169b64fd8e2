//! Slack Web API gateway.
//!
//! One authenticated GET per call, no retries. Every failure funnels into [`crate::Error`]:
//! transport failures, non-success HTTP statuses, envelope `error` codes, undecodable bodies
//! and caller cancellation.

pub mod config;
pub mod envelope;

pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use envelope::ResponseEnvelope;

use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use url::Url;

use crate::observability::RemoteCallSpan;
use crate::{Error, Result};

/// A single remote call to a named API method.
#[async_trait]
pub trait RemoteCall: Send + Sync {
    /// Gateway name for logging.
    fn name(&self) -> &str;

    /// Call `method` with `params` and return the body once the envelope reports success.
    async fn call_raw(
        &self,
        method: &str,
        params: &[(&str, &str)],
        cancel: &CancellationToken,
    ) -> Result<Bytes>;
}

/// Typed access on top of [`RemoteCall`].
pub trait RemoteCallExt: RemoteCall {
    /// Call `method` and decode the full body into `T`.
    fn call<T: DeserializeOwned + Send>(
        &self,
        method: &str,
        params: &[(&str, &str)],
        cancel: &CancellationToken,
    ) -> impl std::future::Future<Output = Result<T>> + Send
    where
        Self: Sync,
    {
        async move {
            let body = self.call_raw(method, params, cancel).await?;
            let value: T = serde_json::from_slice(&body)?;
            Ok(value)
        }
    }
}

impl<G: RemoteCall + ?Sized> RemoteCallExt for G {}

/// `reqwest`-backed gateway to the Slack Web API.
#[derive(Clone, Debug)]
pub struct SlackClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl SlackClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(Error::Transport)?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn execute(&self, url: Url, span: &RemoteCallSpan) -> Result<Bytes> {
        // reqwest errors embed the request URL, which carries secrets in its query.
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Transport(e.without_url()))?;

        let status = response.status();
        span.record_status(status.as_u16());

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(e.without_url()))?;

        if !status.is_success() {
            return Err(Error::RemoteHttp {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let envelope = ResponseEnvelope::parse(&body)?;
        if let Some(ref warning) = envelope.warning {
            tracing::warn!(warning = %warning, "Slack API returned a warning");
        }
        envelope.into_result()?;

        Ok(body)
    }
}

#[async_trait]
impl RemoteCall for SlackClient {
    fn name(&self) -> &str {
        "slack"
    }

    async fn call_raw(
        &self,
        method: &str,
        params: &[(&str, &str)],
        cancel: &CancellationToken,
    ) -> Result<Bytes> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let url = self.config.method_url(method, params)?;
        let span = RemoteCallSpan::new(method);

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::Cancelled),
            result = self.execute(url, &span).instrument(span.span().clone()) => result,
        };

        if let Err(ref e) = result {
            tracing::debug!(method, category = e.category().as_str(), error = %e, "Remote call failed");
        }
        span.finish(&result);
        result
    }
}
