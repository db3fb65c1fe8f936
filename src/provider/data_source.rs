// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

use super::state::DataSourceState;
use crate::error::{ProviderError, Result};
use crate::kubernetes::ObjectRef;
use crate::types::TraefikObject;
use kube::{Api, Client};
use schemars::schema::RootSchema;
use std::marker::PhantomData;
use tracing::{debug, instrument};

/// Read-only lookup of an existing Traefik object
pub struct ManifestDataSource<K> {
    client: Client,
    _kind: PhantomData<fn() -> K>,
}

impl<K: TraefikObject> ManifestDataSource<K> {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            _kind: PhantomData,
        }
    }

    pub fn schema() -> RootSchema {
        schemars::schema_for!(DataSourceState<K::Spec>)
    }

    #[instrument(skip(self), fields(resource_type = %K::KIND))]
    pub async fn read(&self, namespace: &str, name: &str) -> Result<DataSourceState<K::Spec>> {
        let target = ObjectRef::new::<K>(namespace, name);
        let api: Api<K> = Api::namespaced(self.client.clone(), namespace);

        let live = api
            .get_opt(name)
            .await?
            .ok_or_else(|| ProviderError::NotFound(target.to_string()))?;
        debug!("Read {}", target);

        Ok(DataSourceState::from_object(namespace, name, &live))
    }
}
