// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::env;

use crate::constants::DEFAULT_FIELD_MANAGER;

/// Provider configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Field manager used for server-side apply unless a resource overrides it
    pub field_manager: String,
    /// Kubeconfig context to use instead of the current one
    pub kube_context: Option<String>,
    /// Raw kubeconfig document, takes precedence over the inferred config
    pub kubeconfig_data: Option<String>,
    pub wait_for_crds: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            field_manager: DEFAULT_FIELD_MANAGER.to_string(),
            kube_context: None,
            kubeconfig_data: None,
            wait_for_crds: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let field_manager = env::var("TRAEFIK_PROVIDER_FIELD_MANAGER")
            .unwrap_or_else(|_| DEFAULT_FIELD_MANAGER.to_string());
        if field_manager.trim().is_empty() {
            anyhow::bail!("TRAEFIK_PROVIDER_FIELD_MANAGER must not be empty");
        }

        let kube_context = non_empty_var("KUBE_CONTEXT");
        let kubeconfig_data = non_empty_var("KUBECONFIG_DATA");

        let wait_for_crds: bool = env::var("TRAEFIK_PROVIDER_WAIT_FOR_CRDS")
            .unwrap_or("false".to_string())
            .parse()
            .context("TRAEFIK_PROVIDER_WAIT_FOR_CRDS must be 'true' or 'false'")?;

        Ok(Config {
            field_manager,
            kube_context,
            kubeconfig_data,
            wait_for_crds,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
