// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Lifecycle of a managed Traefik object: server-side apply, refresh,
//! delete with convergence wait, and import.

use super::state::{Metadata, ResourceState};
use crate::error::{ProviderError, Result};
use crate::kubernetes::ObjectRef;
use crate::types::TraefikObject;
use crate::wait::{object_absent, object_matches, WaitOutcome};
use kube::api::{ApiResource, DynamicObject, Patch};
use kube::{Api, Client};
use schemars::schema::RootSchema;
use std::marker::PhantomData;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

pub struct ManifestResource<K> {
    client: Client,
    field_manager: String,
    cancel: CancellationToken,
    _kind: PhantomData<fn() -> K>,
}

impl<K: TraefikObject> ManifestResource<K> {
    pub fn new(client: Client, field_manager: impl Into<String>, cancel: CancellationToken) -> Self {
        Self {
            client,
            field_manager: field_manager.into(),
            cancel,
            _kind: PhantomData,
        }
    }

    /// JSON schema of the resource state
    pub fn schema() -> RootSchema {
        schemars::schema_for!(ResourceState<K::Spec>)
    }

    fn api(&self, namespace: &str) -> Api<K> {
        Api::namespaced(self.client.clone(), namespace)
    }

    #[instrument(skip(self, plan), fields(resource_type = %K::KIND, id = %plan.metadata))]
    pub async fn create(&self, plan: ResourceState<K::Spec>) -> Result<ResourceState<K::Spec>> {
        info!("Creating resource");
        self.apply(plan).await
    }

    #[instrument(skip(self, plan), fields(resource_type = %K::KIND, id = %plan.metadata))]
    pub async fn update(&self, plan: ResourceState<K::Spec>) -> Result<ResourceState<K::Spec>> {
        info!("Updating resource");
        self.apply(plan).await
    }

    /// Server-side apply the planned object, then wait for the upsert conditions
    async fn apply(&self, mut plan: ResourceState<K::Spec>) -> Result<ResourceState<K::Spec>> {
        let target = plan.target::<K>();
        let object: K = plan.to_object();
        let params = plan.patch_params(&self.field_manager);

        let applied = self
            .api(&target.namespace)
            .patch(&target.name, &params, &Patch::Apply(&object))
            .await?;
        debug!("Applied {}", target);

        if let Some(wait) = &plan.wait_for_upsert {
            let poller = wait.poller()?.with_cancellation(self.cancel.clone());
            let api: Api<DynamicObject> = Api::namespaced_with(
                self.client.clone(),
                &target.namespace,
                &ApiResource::erase::<K>(&()),
            );
            let what = target.to_string();
            let (api, name, conditions) = (&api, target.name.as_str(), wait.conditions.as_slice());

            poller
                .wait_until(&what, move || object_matches(api, name, conditions))
                .await?
                .into_result(&what)?;
        }

        plan.refresh(&applied);
        Ok(plan)
    }

    /// Refresh state from the cluster; `None` when the object no longer exists
    #[instrument(skip(self, prior), fields(resource_type = %K::KIND, id = %prior.metadata))]
    pub async fn read(&self, prior: ResourceState<K::Spec>) -> Result<Option<ResourceState<K::Spec>>> {
        let target = prior.target::<K>();

        match self.api(&target.namespace).get_opt(&target.name).await? {
            Some(live) => {
                let mut state = prior;
                state.refresh(&live);
                Ok(Some(state))
            }
            None => {
                warn!("{} no longer exists, removing from state", target);
                Ok(None)
            }
        }
    }

    /// Delete the object and wait until it is gone
    #[instrument(skip(self, prior), fields(resource_type = %K::KIND, id = %prior.metadata))]
    pub async fn delete(&self, prior: &ResourceState<K::Spec>) -> Result<()> {
        let target = prior.target::<K>();
        let api = self.api(&target.namespace);
        let poller = prior.delete_poller()?.with_cancellation(self.cancel.clone());

        let deleted_uid = match api
            .delete(&target.name, &prior.delete_params())
            .await
            .map_err(ProviderError::from)
        {
            Ok(response) => response.left().and_then(|obj| obj.meta().uid.clone()),
            Err(err) if err.is_not_found() => {
                info!("{} already deleted", target);
                return Ok(());
            }
            Err(err) => return Err(err),
        };
        debug!("Delete of {} accepted", target);

        let what = target.to_string();
        let (api, name, uid) = (&api, target.name.as_str(), deleted_uid.as_deref());
        let outcome = poller
            .wait_until(&what, move || object_absent(api, name, uid))
            .await?
            .into_result(&what)?;

        match outcome {
            WaitOutcome::Pending => info!("{} deletion requested, not waiting for removal", target),
            _ => info!("{} deleted", target),
        }
        Ok(())
    }

    /// Adopt an existing object by `<namespace>/<name>` id
    #[instrument(skip(self), fields(resource_type = %K::KIND))]
    pub async fn import(&self, id: &str) -> Result<ResourceState<K::Spec>> {
        let (namespace, name) = ObjectRef::parse_id(id)?;
        let target = ObjectRef::new::<K>(&namespace, &name);

        let live = self
            .api(&namespace)
            .get_opt(&name)
            .await?
            .ok_or_else(|| ProviderError::NotFound(target.to_string()))?;

        let mut state = ResourceState::new(Metadata::new(&namespace, &name), live.spec().clone());
        state.refresh(&live);
        info!("Imported {}", target);
        Ok(state)
    }
}
