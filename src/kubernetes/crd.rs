// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! CRD availability checking utilities

use crate::constants::traefik::{GROUP, VERSION};
use crate::error::Result;
use crate::types::Kind;
use crate::wait::Poller;
use kube::{discovery::Discovery, Client};
use tracing::{info, instrument};

/// Wait until every Traefik kind is served by the API server.
#[instrument(skip(client, poller))]
pub async fn ensure_traefik_crds(client: &Client, poller: &Poller) -> Result<()> {
    let what = format!("Traefik CRDs ({}/{})", GROUP, VERSION);

    poller
        .wait_until(&what, move || async move {
            let served = served_kinds(client).await?;
            let missing = missing_kinds(&served);
            if !missing.is_empty() {
                info!(
                    "Traefik CRDs not yet available, missing: {}",
                    missing.join(", ")
                );
            }
            Ok(missing.is_empty())
        })
        .await?
        .into_result(&what)?;

    info!("Traefik CRDs ({}/{}) are available", GROUP, VERSION);
    Ok(())
}

/// Kinds the API server serves in the Traefik group at our version
async fn served_kinds(client: &Client) -> Result<Vec<String>> {
    let discovery = Discovery::new(client.clone())
        .filter(&[GROUP])
        .run()
        .await?;

    let mut kinds = Vec::new();
    for group in discovery.groups() {
        if group.name() == GROUP {
            for (ar, _) in group.recommended_resources() {
                if ar.version == VERSION {
                    kinds.push(ar.kind);
                }
            }
        }
    }

    Ok(kinds)
}

/// Kubernetes kinds of the provider that are not in `served`
fn missing_kinds(served: &[String]) -> Vec<String> {
    Kind::ALL
        .into_iter()
        .map(Kind::api_kind)
        .filter(|kind| !served.contains(kind))
        .collect()
}
