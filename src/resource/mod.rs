//! Host-facing token resource.
//!
//! [`Resource`] is the boundary a host protocol adapts to; [`TokenResource`] implements the
//! lifecycle once:
//! - **Create** always fails: a first refresh token cannot be minted upstream.
//! - **Read** trusts persisted state: token state cannot be fetched without rotating.
//! - **Update** rotates through [`Rotator`].
//! - **Delete** forgets local state; nothing is revoked upstream.
//! - **Import** seeds state from a refresh token.

mod data;
mod diagnostics;
mod instance;
pub mod schema;
mod value;

pub use data::{ResourceData, StoredState};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use instance::ResourceInstance;
pub use schema::{AttributeKind, AttributeSchema, Schema};
pub use value::AttributeValue;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::rotation::Rotator;
use crate::staleness::StalenessDecision;
use crate::{Error, Result};

/// Type name of the token refresh resource.
pub const TOKEN_RESOURCE_TYPE: &str = "slack-token_refresh";

const CREATE_UNSUPPORTED: &str = "Refresh Token cannot be created only imported.";

/// Outcome of planning one resource instance.
#[derive(Clone, Debug)]
pub enum PlannedChange {
    /// No prior state exists.
    Create(ResourceData),
    /// Prior state is stale and must be rotated.
    Update(ResourceData),
    /// Prior state is fresh and is kept as is.
    NoOp,
}

impl PlannedChange {
    pub fn planned(&self) -> Option<&ResourceData> {
        match self {
            PlannedChange::Create(data) | PlannedChange::Update(data) => Some(data),
            PlannedChange::NoOp => None,
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, PlannedChange::NoOp)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PlannedChange::Create(_) => "create",
            PlannedChange::Update(_) => "update",
            PlannedChange::NoOp => "noop",
        }
    }
}

/// Lifecycle operations a host drives for one resource type.
#[async_trait]
pub trait Resource: Send + Sync {
    fn type_name(&self) -> &str;

    fn schema(&self) -> Schema;

    /// Plan the next state from configuration and prior state at Unix time `now`.
    fn plan(&self, config: &ResourceData, prior: Option<&ResourceData>, now: i64)
    -> PlannedChange;

    async fn create(
        &self,
        planned: &ResourceData,
        cancel: &CancellationToken,
    ) -> Result<ResourceData>;

    async fn read(&self, current: &ResourceData, cancel: &CancellationToken)
    -> Result<ResourceData>;

    async fn update(
        &self,
        prior: &ResourceData,
        planned: &ResourceData,
        cancel: &CancellationToken,
    ) -> Result<ResourceData>;

    async fn delete(&self, current: &ResourceData) -> Result<()>;

    /// Seed state from an import identifier.
    fn import_state(&self, id: &str) -> Result<ResourceData>;
}

/// Rotating Slack token resource.
#[derive(Clone, Debug)]
pub struct TokenResource {
    rotator: Rotator,
}

impl TokenResource {
    pub fn new(rotator: Rotator) -> Self {
        Self { rotator }
    }

    pub fn rotator(&self) -> &Rotator {
        &self.rotator
    }
}

#[async_trait]
impl Resource for TokenResource {
    fn type_name(&self) -> &str {
        TOKEN_RESOURCE_TYPE
    }

    fn schema(&self) -> Schema {
        schema::token_resource_schema()
    }

    fn plan(
        &self,
        config: &ResourceData,
        prior: Option<&ResourceData>,
        now: i64,
    ) -> PlannedChange {
        let Some(prior) = prior else {
            return PlannedChange::Create(ResourceData {
                expires: config.expires.clone().or_unknown(),
                token: config.token.clone().or_unknown(),
                refresh_token: config.refresh_token.clone().or_unknown(),
            });
        };

        let mut planned = ResourceData {
            expires: config.expires.or_prior(&prior.expires),
            token: config.token.or_prior(&prior.token),
            refresh_token: config.refresh_token.or_prior(&prior.refresh_token),
        };

        let decision = StalenessDecision::evaluate(&planned.expires, now);
        decision.apply(&config.expires, &mut planned.expires);
        decision.apply(&config.token, &mut planned.token);
        decision.apply(&config.refresh_token, &mut planned.refresh_token);

        tracing::debug!(
            stale = decision.is_stale(),
            expires = ?planned.expires.as_known(),
            "Planned token resource"
        );

        // Only a stale record rotates; explicit config alone never does.
        if decision.is_stale() {
            PlannedChange::Update(planned)
        } else {
            PlannedChange::NoOp
        }
    }

    async fn create(
        &self,
        _planned: &ResourceData,
        _cancel: &CancellationToken,
    ) -> Result<ResourceData> {
        Err(Error::unsupported("create", CREATE_UNSUPPORTED))
    }

    async fn read(
        &self,
        current: &ResourceData,
        _cancel: &CancellationToken,
    ) -> Result<ResourceData> {
        Ok(current.clone())
    }

    async fn update(
        &self,
        prior: &ResourceData,
        _planned: &ResourceData,
        cancel: &CancellationToken,
    ) -> Result<ResourceData> {
        let refresh_token = prior.known_refresh_token()?;
        let record = self.rotator.rotate(refresh_token, cancel).await?;
        Ok(ResourceData::from(record))
    }

    async fn delete(&self, _current: &ResourceData) -> Result<()> {
        tracing::debug!("Removing token resource from state; upstream tokens stay valid");
        Ok(())
    }

    fn import_state(&self, id: &str) -> Result<ResourceData> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::config("import ID must be the refresh token"));
        }
        Ok(ResourceData::imported(id.to_string()))
    }
}
