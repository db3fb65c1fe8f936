// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Identity of a remote object: API coordinates plus namespace and name.

use crate::constants::DEFAULT_NAMESPACE;
use crate::error::{ProviderError, Result};
use kube::Resource;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub group: String,
    pub version: String,
    /// Plural resource name, e.g. `ingressroutes`
    pub resource: String,
    pub kind: String,
    pub namespace: String,
    pub name: String,
}

impl ObjectRef {
    pub fn new<K: Resource<DynamicType = ()>>(namespace: &str, name: &str) -> Self {
        Self {
            group: K::group(&()).into_owned(),
            version: K::version(&()).into_owned(),
            resource: K::plural(&()).into_owned(),
            kind: K::kind(&()).into_owned(),
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }

    /// Resource id in `<namespace>/<name>` form
    pub fn id(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }

    /// Split an import id; a bare name lands in the default namespace
    pub fn parse_id(id: &str) -> Result<(String, String)> {
        let invalid = || ProviderError::InvalidImportId(id.to_string());

        match id.split_once('/') {
            Some((namespace, name)) => {
                if namespace.is_empty() || name.is_empty() || name.contains('/') {
                    return Err(invalid());
                }
                Ok((namespace.to_string(), name.to_string()))
            }
            None if !id.is_empty() => Ok((DEFAULT_NAMESPACE.to_string(), id.to_string())),
            None => Err(invalid()),
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} {} {}/{}",
            self.group, self.version, self.kind, self.namespace, self.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IngressRouteTcp, Middleware};

    #[test]
    fn test_new_uses_api_coordinates() {
        let target = ObjectRef::new::<IngressRouteTcp>("edge", "postgres");

        assert_eq!(target.group, "traefik.io");
        assert_eq!(target.version, "v1alpha1");
        assert_eq!(target.resource, "ingressroutetcps");
        assert_eq!(target.kind, "IngressRouteTCP");
        assert_eq!(target.id(), "edge/postgres");
    }

    #[test]
    fn test_display() {
        let target = ObjectRef::new::<Middleware>("default", "strip-api");
        assert_eq!(
            target.to_string(),
            "traefik.io/v1alpha1 Middleware default/strip-api"
        );
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(
            ObjectRef::parse_id("edge/web").unwrap(),
            ("edge".to_string(), "web".to_string())
        );
        assert_eq!(
            ObjectRef::parse_id("web").unwrap(),
            ("default".to_string(), "web".to_string())
        );
    }

    #[test]
    fn test_parse_id_rejects_malformed() {
        for id in ["", "/web", "edge/", "a/b/c"] {
            assert!(
                matches!(ObjectRef::parse_id(id), Err(ProviderError::InvalidImportId(_))),
                "expected '{}' to be rejected",
                id
            );
        }
    }
}
