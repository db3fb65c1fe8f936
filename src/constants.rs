// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// The field manager used for server-side apply when none is configured
pub const DEFAULT_FIELD_MANAGER: &str = "traefik-provider";

/// Namespace used when a resource does not declare one
pub const DEFAULT_NAMESPACE: &str = "default";

/// Traefik API coordinates
pub mod traefik {
    pub const GROUP: &str = "traefik.io";
    pub const VERSION: &str = "v1alpha1";
}

/// Convergence polling defaults
pub mod wait {
    use std::time::Duration;

    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
    /// Effective ceiling applied to negative timeouts (one week)
    pub const UNBOUNDED_CEILING: Duration = Duration::from_secs(7 * 24 * 60 * 60);
}

/// CRD polling configuration
pub mod crd {
    /// Polling interval in seconds when waiting for the Traefik CRDs
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// How long to wait for the Traefik CRDs to be served
    pub const TIMEOUT_SECS: u64 = 300;
}
