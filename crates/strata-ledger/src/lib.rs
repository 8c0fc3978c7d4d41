//! Strata Ledger
//!
//! Append-only realization ledger feeding Activity-level completion.
//!
//! # Core Concepts
//!
//! - [`ActivityLedger`]: the dated observations for one Activity. Entries
//!   are validated before append, hash-chained after it, and never
//!   rewritten - a correction is a new record.
//! - [`LedgerSet`]: per-Activity ledgers for one tenant, built from a
//!   snapshot's realization table.
//! - Completion is the arithmetic mean over **all** records, equal weight.
//!   Every observation is a fact, not a superseding state, so the latest
//!   record does not outrank earlier ones. Empty ledger reads `0`.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod chain;
mod error;
mod ledger;

pub use chain::ChainHash;
pub use error::LedgerError;
pub use ledger::{validate_record, ActivityLedger, LedgerEntry, LedgerSet};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
