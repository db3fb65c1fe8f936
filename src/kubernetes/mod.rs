// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation, CRD discovery, and object identity.

pub mod client;
pub mod crd;
pub mod object_ref;

pub use client::create_client;
pub use crd::ensure_traefik_crds;
pub use object_ref::ObjectRef;
