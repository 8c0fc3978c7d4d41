//! Strata Revision
//!
//! The audited change workflow for hierarchy nodes.
//!
//! # Core Concepts
//!
//! - [`diff_snapshots`]: shallow, JSON-semantic key-by-key diff of a
//!   before/after state pair. `changed_fields` is always derived from it,
//!   never user-supplied.
//! - [`Revision`]: an immutable-once-applied record of one proposed change -
//!   full snapshots, the derived field set, the deciding authority.
//! - [`RevisionStatus`]: `Draft → Review → {Approved, Rejected}`,
//!   `Approved → Applied`; `Applied` and `Rejected` are terminal.
//!   Transition legality is a pure table lookup, validated on every
//!   advance.
//!
//! Applying a revision - persisting the record and mutating the underlying
//! entity - is the engine facade's job; this crate only decides what may
//! happen and in which order.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod diff;
mod error;
mod revision;
mod state;

pub use diff::{diff_snapshots, FieldChange};
pub use error::RevisionError;
pub use revision::{Decision, Revision, RevisionId, RevisionReason, RevisionType};
pub use state::{allowed_transitions, validate_transition, RevisionStatus};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
