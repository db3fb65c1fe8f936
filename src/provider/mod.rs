// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resources and data sources for every Traefik kind, sharing one client.

pub mod data_source;
pub mod resource;
pub mod state;

pub use data_source::ManifestDataSource;
pub use resource::ManifestResource;
pub use state::{
    DataSourceState, DeletionPropagation, Metadata, ResourceState, WaitForDelete, WaitForUpsert,
};

use crate::config::Config;
use crate::types::{Kind, TraefikObject};
use kube::Client;
use schemars::schema::RootSchema;
use tokio_util::sync::CancellationToken;

pub struct TraefikProvider {
    client: Client,
    config: Config,
    cancel: CancellationToken,
}

impl TraefikProvider {
    pub fn new(client: Client, config: Config) -> Self {
        Self {
            client,
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Cancelling `cancel` aborts every pending wait
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resource<K: TraefikObject>(&self) -> ManifestResource<K> {
        ManifestResource::new(
            self.client.clone(),
            self.config.field_manager.clone(),
            self.cancel.clone(),
        )
    }

    pub fn data_source<K: TraefikObject>(&self) -> ManifestDataSource<K> {
        ManifestDataSource::new(self.client.clone())
    }

    pub fn resource_schema(kind: Kind) -> RootSchema {
        crate::with_kind!(kind, K => ManifestResource::<K>::schema())
    }

    pub fn data_source_schema(kind: Kind) -> RootSchema {
        crate::with_kind!(kind, K => ManifestDataSource::<K>::schema())
    }
}
