// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Terraform-style state documents and their conversion to Kubernetes objects.

use crate::constants::DEFAULT_NAMESPACE;
use crate::error::Result;
use crate::kubernetes::ObjectRef;
use crate::types::TraefikObject;
use crate::wait::{FieldCondition, Poller};
use kube::api::{DeleteParams, ObjectMeta, PatchParams};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
pub struct Metadata {
    pub name: String,
    /// Defaults to `default`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}

impl Metadata {
    pub fn new(namespace: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        }
    }

    pub fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE)
    }

    /// Take labels and annotations from the live object
    fn refresh(&mut self, live: &ObjectMeta) {
        if let Some(namespace) = &live.namespace {
            self.namespace = Some(namespace.clone());
        }
        self.labels = merge_map(self.labels.take(), live.labels.clone());
        self.annotations = merge_map(self.annotations.take(), live.annotations.clone());
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace(), self.name)
    }
}

/// The API server drops empty maps; keep an explicitly empty map from state
fn merge_map(
    prior: Option<BTreeMap<String, String>>,
    live: Option<BTreeMap<String, String>>,
) -> Option<BTreeMap<String, String>> {
    match live {
        Some(map) if !map.is_empty() => Some(map),
        _ => prior.filter(|p| p.is_empty()),
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub enum DeletionPropagation {
    Foreground,
    Background,
    Orphan,
}

/// Wait after create/update until the live object matches every condition
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
pub struct WaitForUpsert {
    #[serde(default)]
    pub conditions: Vec<FieldCondition>,
    /// Duration such as `30s`; `0s` checks once, negative waits up to a week
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_interval: Option<String>,
}

impl WaitForUpsert {
    pub fn poller(&self) -> Result<Poller> {
        Poller::from_settings(self.timeout.as_deref(), self.poll_interval.as_deref())
    }
}

/// Wait after delete until the object is gone
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
pub struct WaitForDelete {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_interval: Option<String>,
}

impl WaitForDelete {
    pub fn poller(&self) -> Result<Poller> {
        Poller::from_settings(self.timeout.as_deref(), self.poll_interval.as_deref())
    }
}

/// State of a managed resource
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct ResourceState<S> {
    /// `<namespace>/<name>`, computed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub metadata: Metadata,
    pub spec: S,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_manager: Option<String>,
    #[serde(default)]
    pub force_conflicts: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_for_upsert: Option<WaitForUpsert>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_for_delete: Option<WaitForDelete>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_propagation: Option<DeletionPropagation>,
}

impl<S: Clone> ResourceState<S> {
    pub fn new(metadata: Metadata, spec: S) -> Self {
        Self {
            id: None,
            metadata,
            spec,
            field_manager: None,
            force_conflicts: false,
            wait_for_upsert: None,
            wait_for_delete: None,
            deletion_propagation: None,
        }
    }

    pub fn target<K: TraefikObject<Spec = S>>(&self) -> ObjectRef {
        ObjectRef::new::<K>(self.metadata.namespace(), &self.metadata.name)
    }

    /// Build the object to submit with server-side apply
    pub fn to_object<K: TraefikObject<Spec = S>>(&self) -> K {
        let mut object = K::from_spec(&self.metadata.name, self.spec.clone());
        let meta = object.meta_mut();
        meta.namespace = Some(self.metadata.namespace().to_string());
        meta.labels = self.metadata.labels.clone();
        meta.annotations = self.metadata.annotations.clone();
        object
    }

    /// Copy what the API server reports back into this state
    pub fn refresh<K: TraefikObject<Spec = S>>(&mut self, live: &K) {
        self.metadata.refresh(live.meta());
        self.spec = live.spec().clone();
        self.id = Some(self.target::<K>().id());
    }

    pub fn patch_params(&self, default_field_manager: &str) -> PatchParams {
        let manager = self
            .field_manager
            .as_deref()
            .unwrap_or(default_field_manager);
        let params = PatchParams::apply(manager);
        if self.force_conflicts {
            params.force()
        } else {
            params
        }
    }

    pub fn delete_params(&self) -> DeleteParams {
        match self.deletion_propagation {
            Some(DeletionPropagation::Foreground) => DeleteParams::foreground(),
            Some(DeletionPropagation::Background) => DeleteParams::background(),
            Some(DeletionPropagation::Orphan) => DeleteParams::orphan(),
            None => DeleteParams::default(),
        }
    }

    pub fn delete_poller(&self) -> Result<Poller> {
        self.wait_for_delete.clone().unwrap_or_default().poller()
    }
}

/// State of a data source lookup
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct DataSourceState<S> {
    pub id: String,
    pub metadata: Metadata,
    pub spec: S,
}

impl<S: Clone> DataSourceState<S> {
    pub fn from_object<K: TraefikObject<Spec = S>>(namespace: &str, name: &str, live: &K) -> Self {
        let mut metadata = Metadata::new(namespace, name);
        metadata.refresh(live.meta());
        let id = ObjectRef::new::<K>(metadata.namespace(), name).id();
        Self {
            id,
            metadata,
            spec: live.spec().clone(),
        }
    }
}
