// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::common::{LoadBalancerSpec, Sticky};
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// Weighted or mirrored composition of other services
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(
    group = "traefik.io",
    version = "v1alpha1",
    kind = "TraefikService",
    plural = "traefikservices",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct TraefikServiceSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted: Option<Weighted>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirroring: Option<Mirroring>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Weighted {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<LoadBalancerSpec>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky: Option<Sticky>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Mirroring {
    /// The main service receiving all requests
    #[serde(flatten)]
    pub service: LoadBalancerSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirrors: Option<Vec<MirrorService>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_body_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirror_body: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MirrorService {
    #[serde(flatten)]
    pub service: LoadBalancerSpec,
    /// Share of requests copied to this mirror, 0 to 100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mirroring_flattens_main_service() {
        let spec: TraefikServiceSpec = serde_json::from_value(json!({
            "mirroring": {
                "name": "primary",
                "port": 80,
                "mirrors": [{ "name": "shadow", "port": 80, "percent": 10 }]
            }
        }))
        .unwrap();

        let mirroring = spec.mirroring.unwrap();
        assert_eq!(mirroring.service.name, "primary");
        let mirrors = mirroring.mirrors.unwrap();
        assert_eq!(mirrors[0].service.name, "shadow");
        assert_eq!(mirrors[0].percent, Some(10));
    }
}
