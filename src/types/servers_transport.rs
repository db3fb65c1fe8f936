// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::common::{IntOrString, Spiffe};
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// Connection settings between Traefik and HTTP backends
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(
    group = "traefik.io",
    version = "v1alpha1",
    kind = "ServersTransport",
    plural = "serverstransports",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct ServersTransportSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure_skip_verify: Option<bool>,
    #[serde(rename = "rootCAsSecrets", skip_serializing_if = "Option::is_none")]
    pub root_cas_secrets: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificates_secrets: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_idle_conns_per_host: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forwarding_timeouts: Option<ForwardingTimeouts>,
    #[serde(rename = "disableHTTP2", skip_serializing_if = "Option::is_none")]
    pub disable_http2: Option<bool>,
    #[serde(rename = "peerCertURI", skip_serializing_if = "Option::is_none")]
    pub peer_cert_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spiffe: Option<Spiffe>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForwardingTimeouts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dial_timeout: Option<IntOrString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_header_timeout: Option<IntOrString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_conn_timeout: Option<IntOrString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_idle_timeout: Option<IntOrString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ping_timeout: Option<IntOrString>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_acronym_field_names() {
        let spec = ServersTransportSpec {
            root_cas_secrets: Some(vec!["ca".to_string()]),
            disable_http2: Some(true),
            peer_cert_uri: Some("spiffe://cluster.local/ns/default/sa/web".to_string()),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&spec).unwrap(),
            json!({
                "rootCAsSecrets": ["ca"],
                "disableHTTP2": true,
                "peerCertURI": "spiffe://cluster.local/ns/default/sa/web"
            })
        );
    }
}
