// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Waiting for remote objects to converge: deletion and upsert conditions.

pub mod conditions;
pub mod duration;
pub mod poller;

pub use conditions::{fields_match, is_absent, object_absent, object_matches, FieldCondition};
pub use duration::Timeout;
pub use poller::{Poller, WaitOutcome};
