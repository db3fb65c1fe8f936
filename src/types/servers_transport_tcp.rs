// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::common::{IntOrString, Spiffe};
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// Connection settings between Traefik and TCP backends
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(
    group = "traefik.io",
    version = "v1alpha1",
    kind = "ServersTransportTCP",
    root = "ServersTransportTcp",
    plural = "serverstransporttcps",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct ServersTransportTcpSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dial_timeout: Option<IntOrString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dial_keep_alive: Option<IntOrString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination_delay: Option<IntOrString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsClientConfig>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TlsClientConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure_skip_verify: Option<bool>,
    #[serde(rename = "rootCAsSecrets", skip_serializing_if = "Option::is_none")]
    pub root_cas_secrets: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificates_secrets: Option<Vec<String>>,
    #[serde(rename = "peerCertURI", skip_serializing_if = "Option::is_none")]
    pub peer_cert_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spiffe: Option<Spiffe>,
}
