//! Strata Core - Plan Engine
//!
//! The facade over the whole engine:
//! - Pulls one consistent snapshot per pass through the gateway
//! - Recomputes the derived completion/budget view on demand
//! - Validates and appends realization records
//! - Drives expenses and revisions through their approval workflows
//!
//! # Example
//!
//! ```rust,ignore
//! use strata_core::{EngineConfig, PlanEngine};
//! use strata_gateway::MemoryStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = PlanEngine::new(MemoryStore::new(), EngineConfig::new());
//!
//! let view = engine.load_and_recompute(&tenant, as_of).await?;
//! println!("{} areas rolled up", view.tree.areas.len());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod config;
pub mod engine;
pub mod error;
pub mod view;

// Re-exports for convenience
pub use config::EngineConfig;
pub use engine::PlanEngine;
pub use error::EngineError;
pub use view::{recompute, DerivedView};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the plan engine
    pub use crate::{recompute, DerivedView, EngineConfig, EngineError, PlanEngine};
    pub use strata_gateway::{MemoryStore, PlanStore, Table};
    pub use strata_model::{PlanSnapshot, TenantId};
    pub use strata_revision::{Decision, Revision, RevisionStatus};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
