// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to parse kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Timed out after {elapsed:?} waiting for {target} ({checks} checks)")]
    WaitTimeoutExceeded {
        target: String,
        elapsed: Duration,
        checks: u32,
    },

    #[error("Wait for {0} was cancelled")]
    Cancelled(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid JSONPath expression: {0}")]
    InvalidJsonPath(String),

    #[error("Invalid import id '{0}', expected <namespace>/<name>")]
    InvalidImportId(String),

    #[error("Failed to convert state: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ProviderError {
    /// Whether the object does not exist, either reported by us or by the API server
    pub fn is_not_found(&self) -> bool {
        match self {
            ProviderError::NotFound(_) => true,
            ProviderError::KubeError(kube::Error::Api(err)) => err.code == 404,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
