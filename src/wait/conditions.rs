// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Predicates over live objects used by the convergence poller.

use crate::error::{ProviderError, Result};
use kube::api::DynamicObject;
use kube::runtime::wait::{conditions, Condition};
use kube::{Api, Resource};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Debug;

/// Expect the value found at `jsonpath` to equal `value`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct FieldCondition {
    pub jsonpath: String,
    pub value: String,
}

impl FieldCondition {
    pub fn new(jsonpath: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            jsonpath: jsonpath.into(),
            value: value.into(),
        }
    }

    /// Check this condition against a JSON document
    pub fn matches(&self, object: &Value) -> Result<bool> {
        let path = normalize_jsonpath(&self.jsonpath);
        let selected = jsonpath_lib::select(object, &path)
            .map_err(|e| ProviderError::InvalidJsonPath(format!("{}: {:?}", self.jsonpath, e)))?;

        Ok(selected.iter().any(|v| value_to_string(v) == self.value))
    }
}

/// Whether the object is gone, or was replaced by one with a different UID
pub fn is_absent<K: Resource>(object: Option<&K>, deleted_uid: Option<&str>) -> bool {
    match deleted_uid {
        Some(uid) => conditions::is_deleted(uid).matches_object(object),
        None => object.is_none(),
    }
}

/// Whether every condition holds for the object
pub fn fields_match(object: &Value, conditions: &[FieldCondition]) -> Result<bool> {
    for condition in conditions {
        if !condition.matches(object)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Fetch the object and report whether it has been deleted
pub async fn object_absent<K>(api: &Api<K>, name: &str, deleted_uid: Option<&str>) -> Result<bool>
where
    K: Resource + Clone + DeserializeOwned + Debug,
{
    let current = api.get_opt(name).await?;
    Ok(is_absent(current.as_ref(), deleted_uid))
}

/// Fetch the object and report whether all conditions hold; a missing object does not match yet.
///
/// The object is read untyped so fields outside the typed spec, such as `status`, stay visible.
pub async fn object_matches(
    api: &Api<DynamicObject>,
    name: &str,
    conditions: &[FieldCondition],
) -> Result<bool> {
    let Some(current) = api.get_opt(name).await? else {
        return Ok(false);
    };
    fields_match(&serde_json::to_value(&current)?, conditions)
}

/// Accept kubectl style `{.a.b}` and bare `a.b` paths as well as `$.a.b`
fn normalize_jsonpath(path: &str) -> String {
    let trimmed = path.trim();
    let inner = trimmed
        .strip_prefix('{')
        .and_then(|p| p.strip_suffix('}'))
        .unwrap_or(trimmed)
        .trim();

    if inner.starts_with('$') {
        inner.to_string()
    } else if inner.starts_with('.') || inner.starts_with('[') {
        format!("${}", inner)
    } else {
        format!("$.{}", inner)
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
