// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes client creation from the provider configuration

use crate::config::Config;
use crate::error::{ProviderError, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config as KConfig};
use tracing::{debug, info, instrument};

/// Create the client shared by every resource and data source
#[instrument(skip(config), fields(context = ?config.kube_context))]
pub async fn create_client(config: &Config) -> Result<Client> {
    let options = KubeConfigOptions {
        context: config.kube_context.clone(),
        ..Default::default()
    };

    let client_config = match (&config.kubeconfig_data, &config.kube_context) {
        (Some(kubeconfig), _) => {
            debug!("Using kubeconfig from provider configuration");
            config_from_kubeconfig(kubeconfig, &options).await?
        }
        (None, Some(context)) => {
            debug!("Using kubeconfig context '{}'", context);
            KConfig::from_kubeconfig(&options).await.map_err(|e| {
                ProviderError::KubeconfigError(format!(
                    "Failed to load context {}: {}",
                    context, e
                ))
            })?
        }
        (None, None) => KConfig::infer()
            .await
            .map_err(|e| ProviderError::KubeconfigError(format!("Failed to infer config: {}", e)))?,
    };

    info!("Connecting to Kubernetes API at {}", client_config.cluster_url);

    Client::try_from(client_config)
        .map_err(|e| ProviderError::KubeconfigError(format!("Failed to create client: {}", e)))
}

/// Build a client configuration from a kubeconfig document
async fn config_from_kubeconfig(kubeconfig: &str, options: &KubeConfigOptions) -> Result<KConfig> {
    let kubeconfig_parsed: Kubeconfig = serde_yaml::from_str(kubeconfig)
        .map_err(|e| ProviderError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e)))?;

    KConfig::from_custom_kubeconfig(kubeconfig_parsed, options)
        .await
        .map_err(|e| ProviderError::KubeconfigError(format!("Failed to create config: {}", e)))
}
