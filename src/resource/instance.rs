//! One managed resource instance and its state.

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use super::{PlannedChange, Resource, ResourceData, TokenResource};
use crate::credential::CredentialRecord;
use crate::storage::StateStore;
use crate::{Error, Result};

/// Owns the state of exactly one resource instance.
///
/// Operations run one at a time (`&mut self`). State is replaced only after an operation
/// succeeds, so a failed rotation leaves the previous record authoritative.
#[derive(Debug)]
pub struct ResourceInstance<R = TokenResource> {
    resource: R,
    state: Option<ResourceData>,
}

impl<R: Resource> ResourceInstance<R> {
    pub fn new(resource: R) -> Self {
        Self {
            resource,
            state: None,
        }
    }

    pub fn with_state(resource: R, state: ResourceData) -> Self {
        Self {
            resource,
            state: Some(state),
        }
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub fn state(&self) -> Option<&ResourceData> {
        self.state.as_ref()
    }

    /// The current credential, once a rotation has filled every attribute.
    pub fn record(&self) -> Result<CredentialRecord> {
        let state = self
            .state
            .as_ref()
            .ok_or_else(|| Error::config("resource has no state"))?;
        CredentialRecord::try_from(state)
    }

    /// Seed state from an import identifier. Existing state is never overwritten.
    pub fn import(&mut self, id: &str) -> Result<()> {
        if self.state.is_some() {
            return Err(Error::config(format!(
                "{} already has state; delete it before importing",
                self.resource.type_name()
            )));
        }
        self.state = Some(self.resource.import_state(id)?);
        tracing::info!(resource = self.resource.type_name(), "Imported refresh token");
        Ok(())
    }

    /// Plan against the current time.
    pub fn plan(&self, config: &ResourceData) -> PlannedChange {
        self.plan_at(config, Utc::now().timestamp())
    }

    pub fn plan_at(&self, config: &ResourceData, now: i64) -> PlannedChange {
        self.resource.plan(config, self.state.as_ref(), now)
    }

    /// Apply a planned change.
    pub async fn apply(&mut self, change: PlannedChange, cancel: &CancellationToken) -> Result<()> {
        let next = match change {
            PlannedChange::NoOp => return Ok(()),
            PlannedChange::Create(planned) => self.resource.create(&planned, cancel).await?,
            PlannedChange::Update(planned) => {
                let prior = self
                    .state
                    .as_ref()
                    .ok_or_else(|| Error::config("cannot update a resource without state"))?;
                self.resource.update(prior, &planned, cancel).await?
            }
        };
        self.state = Some(next);
        Ok(())
    }

    /// Plan against the current time and apply the result. Returns whether anything changed.
    pub async fn converge(
        &mut self,
        config: &ResourceData,
        cancel: &CancellationToken,
    ) -> Result<bool> {
        let change = self.plan(config);
        let changed = !change.is_noop();
        self.apply(change, cancel).await?;
        Ok(changed)
    }

    /// Re-read state through the resource.
    pub async fn refresh(&mut self, cancel: &CancellationToken) -> Result<()> {
        if let Some(current) = self.state.as_ref() {
            let read = self.resource.read(current, cancel).await?;
            self.state = Some(read);
        }
        Ok(())
    }

    /// Delete the resource and drop its state.
    pub async fn destroy(&mut self) -> Result<()> {
        if let Some(current) = self.state.as_ref() {
            self.resource.delete(current).await?;
        }
        self.state = None;
        Ok(())
    }

    /// Load the instance stored under `address`.
    pub async fn load(resource: R, store: &dyn StateStore, address: &str) -> Result<Self> {
        let state = store.load(address).await?;
        Ok(Self { resource, state })
    }

    /// Persist the current state under `address`, removing the entry when there is none.
    pub async fn save(&self, store: &dyn StateStore, address: &str) -> Result<()> {
        match self.state.as_ref() {
            Some(state) => store.save(address, state).await,
            None => store.remove(address).await.map(|_| ()),
        }
    }
}
