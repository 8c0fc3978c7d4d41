//! Strata Gateway
//!
//! The seam between the engine and its external persistence collaborator.
//!
//! # Core Concepts
//!
//! - [`PlanStore`]: the async CRUD contract the excluded backend must
//!   satisfy - rows in, rows out, scoped by tenant, no retry/backoff here.
//! - [`Table`]: the nine tables the engine consumes.
//! - [`MemoryStore`]: DashMap-backed reference implementation used by
//!   tests and simulations.
//! - [`load_snapshot`]: one consistent pass fetching all aggregation
//!   tables concurrently into a [`strata_model::PlanSnapshot`]; nothing is
//!   re-fetched mid-computation.
//!
//! Failures surface as [`GatewayError`] and propagate as-is; the engine
//! treats a failed fetch as "not fetched", never as partial success.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod memory;
mod snapshot;
mod store;

pub use memory::MemoryStore;
pub use snapshot::{load_snapshot, SnapshotLoad};
pub use store::{GatewayError, PlanStore, Table};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
