// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::common::{Domain, LoadBalancerSpec, ObjectReference};
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// HTTP router
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(
    group = "traefik.io",
    version = "v1alpha1",
    kind = "IngressRoute",
    plural = "ingressroutes",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct IngressRouteSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_points: Option<Vec<String>>,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<Tls>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Rule expression, e.g. ``Host(`example.com`) && PathPrefix(`/api`)``
    #[serde(rename = "match")]
    pub match_expr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syntax: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<LoadBalancerSpec>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middlewares: Option<Vec<ObjectReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observability: Option<RouterObservability>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouterObservability {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_logs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracing: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tls {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<ObjectReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<ObjectReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_resolver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domains: Option<Vec<Domain>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::Resource;
    use serde_json::json;

    #[test]
    fn test_api_coordinates() {
        assert_eq!(IngressRoute::group(&()), "traefik.io");
        assert_eq!(IngressRoute::version(&()), "v1alpha1");
        assert_eq!(IngressRoute::plural(&()), "ingressroutes");
    }

    #[test]
    fn test_route_serializes_match_keyword() {
        let spec = IngressRouteSpec {
            entry_points: Some(vec!["websecure".to_string()]),
            routes: vec![Route {
                match_expr: "Host(`example.com`)".to_string(),
                kind: Some("Rule".to_string()),
                services: Some(vec![LoadBalancerSpec {
                    name: "whoami".to_string(),
                    ..Default::default()
                }]),
                ..Default::default()
            }],
            tls: Some(Tls {
                cert_resolver: Some("letsencrypt".to_string()),
                ..Default::default()
            }),
        };

        assert_eq!(
            serde_json::to_value(&spec).unwrap(),
            json!({
                "entryPoints": ["websecure"],
                "routes": [{
                    "match": "Host(`example.com`)",
                    "kind": "Rule",
                    "services": [{ "name": "whoami" }]
                }],
                "tls": { "certResolver": "letsencrypt" }
            })
        );
    }
}
