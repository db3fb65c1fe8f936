// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Traefik custom resources (`traefik.io/v1alpha1`) and the registry of
//! resource types exposed by the provider.

pub mod common;
pub mod ingress_route;
pub mod ingress_route_tcp;
pub mod ingress_route_udp;
pub mod middleware;
pub mod middleware_tcp;
pub mod servers_transport;
pub mod servers_transport_tcp;
pub mod tls_option;
pub mod tls_store;
pub mod traefik_service;

pub use ingress_route::{IngressRoute, IngressRouteSpec};
pub use ingress_route_tcp::{IngressRouteTcp, IngressRouteTcpSpec};
pub use ingress_route_udp::{IngressRouteUdp, IngressRouteUdpSpec};
pub use middleware::{Middleware, MiddlewareSpec};
pub use middleware_tcp::{MiddlewareTcp, MiddlewareTcpSpec};
pub use servers_transport::{ServersTransport, ServersTransportSpec};
pub use servers_transport_tcp::{ServersTransportTcp, ServersTransportTcpSpec};
pub use tls_option::{TlsOption, TlsOptionSpec};
pub use tls_store::{TlsStore, TlsStoreSpec};
pub use traefik_service::{TraefikService, TraefikServiceSpec};

use k8s_openapi::NamespaceResourceScope;
use kube::Resource;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Every Traefik kind the provider manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    IngressRoute,
    IngressRouteTcp,
    IngressRouteUdp,
    Middleware,
    MiddlewareTcp,
    ServersTransport,
    ServersTransportTcp,
    TlsOption,
    TlsStore,
    TraefikService,
}

impl Kind {
    pub const ALL: [Kind; 10] = [
        Kind::IngressRoute,
        Kind::IngressRouteTcp,
        Kind::IngressRouteUdp,
        Kind::Middleware,
        Kind::MiddlewareTcp,
        Kind::ServersTransport,
        Kind::ServersTransportTcp,
        Kind::TlsOption,
        Kind::TlsStore,
        Kind::TraefikService,
    ];

    /// Terraform type name of the resource and data source
    pub fn resource_type(self) -> &'static str {
        match self {
            Kind::IngressRoute => "traefik_io_ingress_route_v1alpha1",
            Kind::IngressRouteTcp => "traefik_io_ingress_route_tcp_v1alpha1",
            Kind::IngressRouteUdp => "traefik_io_ingress_route_udp_v1alpha1",
            Kind::Middleware => "traefik_io_middleware_v1alpha1",
            Kind::MiddlewareTcp => "traefik_io_middleware_tcp_v1alpha1",
            Kind::ServersTransport => "traefik_io_servers_transport_v1alpha1",
            Kind::ServersTransportTcp => "traefik_io_servers_transport_tcp_v1alpha1",
            Kind::TlsOption => "traefik_io_tls_option_v1alpha1",
            Kind::TlsStore => "traefik_io_tls_store_v1alpha1",
            Kind::TraefikService => "traefik_io_traefik_service_v1alpha1",
        }
    }

    pub fn from_resource_type(name: &str) -> Option<Kind> {
        Kind::ALL.into_iter().find(|k| k.resource_type() == name)
    }

    /// The Kubernetes kind, e.g. `IngressRouteTCP`
    pub fn api_kind(self) -> String {
        crate::with_kind!(self, K => K::kind(&()).into_owned())
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource_type())
    }
}

/// A namespaced Traefik custom resource with a typed spec
pub trait TraefikObject:
    Resource<DynamicType = (), Scope = NamespaceResourceScope>
    + Clone
    + fmt::Debug
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    type Spec: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + JsonSchema + Send + Sync + 'static;

    const KIND: Kind;

    fn from_spec(name: &str, spec: Self::Spec) -> Self;

    fn spec(&self) -> &Self::Spec;
}

macro_rules! traefik_object {
    ($($ty:ident => $spec:ident, $kind:ident;)*) => {
        $(
            impl TraefikObject for $ty {
                type Spec = $spec;

                const KIND: Kind = Kind::$kind;

                fn from_spec(name: &str, spec: $spec) -> Self {
                    $ty::new(name, spec)
                }

                fn spec(&self) -> &$spec {
                    &self.spec
                }
            }
        )*
    };
}

traefik_object! {
    IngressRoute => IngressRouteSpec, IngressRoute;
    IngressRouteTcp => IngressRouteTcpSpec, IngressRouteTcp;
    IngressRouteUdp => IngressRouteUdpSpec, IngressRouteUdp;
    Middleware => MiddlewareSpec, Middleware;
    MiddlewareTcp => MiddlewareTcpSpec, MiddlewareTcp;
    ServersTransport => ServersTransportSpec, ServersTransport;
    ServersTransportTcp => ServersTransportTcpSpec, ServersTransportTcp;
    TlsOption => TlsOptionSpec, TlsOption;
    TlsStore => TlsStoreSpec, TlsStore;
    TraefikService => TraefikServiceSpec, TraefikService;
}

/// Run generic code for the concrete type behind a [`Kind`].
///
/// ```ignore
/// let plural = with_kind!(kind, K => K::plural(&()).into_owned());
/// ```
#[macro_export]
macro_rules! with_kind {
    ($kind:expr, $k:ident => $body:expr) => {
        match $kind {
            $crate::types::Kind::IngressRoute => {
                type $k = $crate::types::IngressRoute;
                $body
            }
            $crate::types::Kind::IngressRouteTcp => {
                type $k = $crate::types::IngressRouteTcp;
                $body
            }
            $crate::types::Kind::IngressRouteUdp => {
                type $k = $crate::types::IngressRouteUdp;
                $body
            }
            $crate::types::Kind::Middleware => {
                type $k = $crate::types::Middleware;
                $body
            }
            $crate::types::Kind::MiddlewareTcp => {
                type $k = $crate::types::MiddlewareTcp;
                $body
            }
            $crate::types::Kind::ServersTransport => {
                type $k = $crate::types::ServersTransport;
                $body
            }
            $crate::types::Kind::ServersTransportTcp => {
                type $k = $crate::types::ServersTransportTcp;
                $body
            }
            $crate::types::Kind::TlsOption => {
                type $k = $crate::types::TlsOption;
                $body
            }
            $crate::types::Kind::TlsStore => {
                type $k = $crate::types::TlsStore;
                $body
            }
            $crate::types::Kind::TraefikService => {
                type $k = $crate::types::TraefikService;
                $body
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::traefik;
    use std::collections::HashSet;

    #[test]
    fn test_resource_type_round_trip() {
        for kind in Kind::ALL {
            assert_eq!(Kind::from_resource_type(kind.resource_type()), Some(kind));
        }
        assert_eq!(Kind::from_resource_type("traefik_io_unknown_v1alpha1"), None);
    }

    #[test]
    fn test_all_kinds_live_in_traefik_group() {
        for kind in Kind::ALL {
            let (group, version) = crate::with_kind!(kind, K => (
                K::group(&()).into_owned(),
                K::version(&()).into_owned(),
            ));
            assert_eq!(group, traefik::GROUP);
            assert_eq!(version, traefik::VERSION);
        }
    }

    #[test]
    fn test_kind_constants_match_registry() {
        for kind in Kind::ALL {
            assert_eq!(crate::with_kind!(kind, K => K::KIND), kind);
        }
    }

    #[test]
    fn test_plurals_are_unique() {
        let plurals: HashSet<String> = Kind::ALL
            .into_iter()
            .map(|kind| crate::with_kind!(kind, K => K::plural(&()).into_owned()))
            .collect();
        assert_eq!(plurals.len(), Kind::ALL.len());
    }

    #[test]
    fn test_api_kind_uses_traefik_names() {
        assert_eq!(Kind::IngressRouteUdp.api_kind(), "IngressRouteUDP");
        assert_eq!(Kind::TlsStore.api_kind(), "TLSStore");
        assert_eq!(Kind::TraefikService.api_kind(), "TraefikService");
    }

    #[test]
    fn test_renamed_roots_keep_upper_case_kinds() {
        assert_eq!(IngressRouteTcp::kind(&()), "IngressRouteTCP");
        assert_eq!(IngressRouteUdp::kind(&()), "IngressRouteUDP");
        assert_eq!(MiddlewareTcp::kind(&()), "MiddlewareTCP");
        assert_eq!(ServersTransportTcp::kind(&()), "ServersTransportTCP");
        assert_eq!(TlsOption::kind(&()), "TLSOption");
        assert_eq!(TlsStore::kind(&()), "TLSStore");

        let store = TlsStore::from_spec("default", TlsStoreSpec::default());
        let value = serde_json::to_value(&store).unwrap();
        assert_eq!(value["kind"], "TLSStore");
        assert_eq!(value["apiVersion"], "traefik.io/v1alpha1");
    }

    #[test]
    fn test_from_spec_sets_name() {
        let route = IngressRoute::from_spec("web", IngressRouteSpec::default());
        assert_eq!(route.metadata.name.as_deref(), Some("web"));
        assert_eq!(route.spec(), &IngressRouteSpec::default());
    }
}
