// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use traefik_crd_provider::config::Config;
use traefik_crd_provider::constants::{crd, DEFAULT_NAMESPACE};
use traefik_crd_provider::kubernetes::{create_client, ensure_traefik_crds};
use traefik_crd_provider::provider::{ResourceState, TraefikProvider};
use traefik_crd_provider::types::{Kind, TraefikObject};
use traefik_crd_provider::wait::{Poller, Timeout};
use traefik_crd_provider::with_kind;

#[derive(Parser, Debug)]
#[command(name = "traefik-provider", version, about = "Manage Traefik custom resources")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the resource types and their Kubernetes kinds
    Types,
    /// Print the JSON schema of a resource type
    Schema {
        #[arg(value_parser = parse_kind)]
        kind: Kind,
        /// Schema of the data source instead of the resource
        #[arg(long)]
        data_source: bool,
    },
    #[command(flatten)]
    Cluster(ClusterCommand),
}

#[derive(Subcommand, Debug)]
enum ClusterCommand {
    /// Create or update the resource described by a state file
    Apply {
        #[arg(value_parser = parse_kind)]
        kind: Kind,
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Refresh a state file from the cluster
    Read {
        #[arg(value_parser = parse_kind)]
        kind: Kind,
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Delete the resource described by a state file and wait until it is gone
    Delete {
        #[arg(value_parser = parse_kind)]
        kind: Kind,
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Import an existing object by <namespace>/<name>
    Import {
        #[arg(value_parser = parse_kind)]
        kind: Kind,
        id: String,
    },
    /// Look up an existing object (data source)
    Get {
        #[arg(value_parser = parse_kind)]
        kind: Kind,
        name: String,
        #[arg(short, long, default_value = DEFAULT_NAMESPACE)]
        namespace: String,
    },
}

impl ClusterCommand {
    fn kind(&self) -> Kind {
        match self {
            ClusterCommand::Apply { kind, .. }
            | ClusterCommand::Read { kind, .. }
            | ClusterCommand::Delete { kind, .. }
            | ClusterCommand::Import { kind, .. }
            | ClusterCommand::Get { kind, .. } => *kind,
        }
    }
}

fn parse_kind(name: &str) -> std::result::Result<Kind, String> {
    Kind::from_resource_type(name).ok_or_else(|| {
        let known: Vec<&str> = Kind::ALL.iter().map(|k| k.resource_type()).collect();
        format!("unknown resource type '{}', expected one of: {}", name, known.join(", "))
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing, stdout is reserved for state output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Types => {
            for kind in Kind::ALL {
                println!("{}\t{}", kind, kind.api_kind());
            }
            Ok(())
        }
        Command::Schema { kind, data_source } => {
            if data_source {
                print_json(&TraefikProvider::data_source_schema(kind))
            } else {
                print_json(&TraefikProvider::resource_schema(kind))
            }
        }
        Command::Cluster(command) => run(command).await,
    }
}

async fn run(command: ClusterCommand) -> Result<()> {
    // Load configuration
    let config = Config::from_env()?;
    info!("Using field manager '{}'", config.field_manager);

    let cancel = CancellationToken::new();
    cancel_on_ctrl_c(cancel.clone());

    let client = create_client(&config).await?;

    if config.wait_for_crds {
        info!("Waiting for Traefik CRDs to become available...");
        let poller = Poller::new(
            Timeout::from_duration(Duration::from_secs(crd::TIMEOUT_SECS)),
            Duration::from_secs(crd::POLL_INTERVAL_SECS),
        )
        .with_cancellation(cancel.clone());
        ensure_traefik_crds(&client, &poller).await?;
    }

    let provider = TraefikProvider::new(client, config).with_cancellation(cancel);
    with_kind!(command.kind(), K => execute::<K>(&provider, command).await)
}

async fn execute<K: TraefikObject>(provider: &TraefikProvider, command: ClusterCommand) -> Result<()> {
    match command {
        ClusterCommand::Apply { file, .. } => {
            let plan: ResourceState<K::Spec> = read_state(&file)?;
            let resource = provider.resource::<K>();
            let state = if plan.id.is_some() {
                resource.update(plan).await?
            } else {
                resource.create(plan).await?
            };
            print_json(&state)
        }
        ClusterCommand::Read { file, .. } => {
            let prior: ResourceState<K::Spec> = read_state(&file)?;
            match provider.resource::<K>().read(prior).await? {
                Some(state) => print_json(&state),
                None => print_json(&serde_json::Value::Null),
            }
        }
        ClusterCommand::Delete { file, .. } => {
            let prior: ResourceState<K::Spec> = read_state(&file)?;
            provider.resource::<K>().delete(&prior).await?;
            Ok(())
        }
        ClusterCommand::Import { id, .. } => print_json(&provider.resource::<K>().import(&id).await?),
        ClusterCommand::Get {
            name, namespace, ..
        } => print_json(&provider.data_source::<K>().read(&namespace, &name).await?),
    }
}

/// Read a YAML or JSON state file
fn read_state<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Invalid state file {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cancel_on_ctrl_c(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling pending waits");
            cancel.cancel();
        }
    });
}
