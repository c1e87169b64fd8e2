//! Provider bootstrap.
//!
//! A [`Provider`] is built once per process from a [`ProviderConfig`]. It owns the shared
//! remote gateway and hands out the resources it offers.

use std::sync::Arc;

use crate::Result;
use crate::client::{ClientConfig, RemoteCall, SlackClient};
use crate::resource::{Resource, TOKEN_RESOURCE_TYPE, TokenResource};
use crate::rotation::Rotator;

/// Type name the provider registers under.
pub const PROVIDER_TYPE_NAME: &str = "slack-token";

/// Default registry address.
pub const PROVIDER_ADDRESS: &str = "registry.terraform.io/change-engine/slack-token";

const PROVIDER_DESCRIPTION: &str =
    "This is for refreshing Slack Refresh Tokens for use in other providers.";

/// Process bootstrap values.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    /// Release version, `dev` for local builds.
    pub version: String,
    /// Run with debug support (verbose logging).
    pub debug: bool,
    /// Registry address the host knows the provider by.
    pub address: String,
    pub client: ClientConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            version: "dev".to_string(),
            debug: false,
            address: PROVIDER_ADDRESS.to_string(),
            client: ClientConfig::default(),
        }
    }
}

impl ProviderConfig {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Default::default()
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_client(mut self, client: ClientConfig) -> Self {
        self.client = client;
        self
    }
}

/// Identity reported to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderMetadata {
    pub type_name: &'static str,
    pub version: String,
}

/// Entry point handing out token resources over one shared gateway.
#[derive(Clone)]
pub struct Provider {
    config: ProviderConfig,
    gateway: Arc<dyn RemoteCall>,
}

impl Provider {
    /// Build a provider talking to the Slack API described by `config.client`.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = SlackClient::new(config.client.clone())?;
        tracing::debug!(
            version = %config.version,
            address = %config.address,
            base_url = %config.client.base_url,
            "Provider configured"
        );
        Ok(Self::with_gateway(config, Arc::new(client)))
    }

    /// Build a provider over a caller-supplied gateway.
    pub fn with_gateway(config: ProviderConfig, gateway: Arc<dyn RemoteCall>) -> Self {
        Self { config, gateway }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn gateway(&self) -> &Arc<dyn RemoteCall> {
        &self.gateway
    }

    pub fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: PROVIDER_TYPE_NAME,
            version: self.config.version.clone(),
        }
    }

    pub fn description(&self) -> &'static str {
        PROVIDER_DESCRIPTION
    }

    pub fn token_resource(&self) -> TokenResource {
        TokenResource::new(Rotator::new(self.gateway.clone()))
    }

    /// Every resource type this provider offers.
    pub fn resources(&self) -> Vec<Box<dyn Resource>> {
        vec![Box::new(self.token_resource())]
    }

    pub fn resource(&self, type_name: &str) -> Option<Box<dyn Resource>> {
        match type_name {
            TOKEN_RESOURCE_TYPE => Some(Box::new(self.token_resource())),
            _ => None,
        }
    }

    /// The provider offers no data sources.
    pub fn data_sources(&self) -> &'static [&'static str] {
        &[]
    }
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("config", &self.config)
            .field("gateway", &self.gateway.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProviderConfig::default();
        assert_eq!(config.version, "dev");
        assert!(!config.debug);
        assert_eq!(config.address, PROVIDER_ADDRESS);
        assert_eq!(config.client.base_url, "https://slack.com/api/");
    }

    #[test]
    fn test_config_builder() {
        let config = ProviderConfig::new("1.2.3")
            .with_debug(true)
            .with_address("example.com/acme/slack-token");
        assert_eq!(config.version, "1.2.3");
        assert!(config.debug);
        assert_eq!(config.address, "example.com/acme/slack-token");
    }

    #[test]
    fn test_metadata_and_resources() {
        let provider = Provider::new(ProviderConfig::new("1.0.0")).unwrap();
        assert_eq!(
            provider.metadata(),
            ProviderMetadata {
                type_name: "slack-token",
                version: "1.0.0".into(),
            }
        );
        assert_eq!(
            provider.description(),
            "This is for refreshing Slack Refresh Tokens for use in other providers."
        );
        assert!(provider.data_sources().is_empty());

        let resources = provider.resources();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].type_name(), "slack-token_refresh");
        assert!(provider.resource("slack-token_refresh").is_some());
        assert!(provider.resource("slack-token_other").is_none());
    }
}
