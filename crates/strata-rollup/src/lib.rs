//! Strata Rollup
//!
//! Bottom-up completion and budget aggregation over a plan snapshot.
//!
//! # Core Concepts
//!
//! - [`completion`]: a single node's completion ratio from actual/target
//!   values, honoring directionality, clamped to `[0,100]`.
//! - [`rollup`]: the recursive pass producing a [`RollupTree`] - each
//!   parent's completion is the mean of its non-cancelled children's.
//! - [`activity_budget`] / [`chapter_budgets`]: planned vs approved-actual
//!   amounts with the signed variance convention (positive = under budget).
//! - [`assess_schedule`]: delay assessment against an explicit `as_of`
//!   date - no ambient clock anywhere in the crate.
//!
//! Everything here is a pure function of its inputs. There is no error
//! type: malformed input degrades to zero so the derived view can always
//! render.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod aggregate;
mod budget;
mod completion;
mod schedule;

pub use aggregate::{rollup, NodeRollup, RollupTree};
pub use budget::{activity_budget, chapter_budget, chapter_budgets, BudgetLine, ChapterBudget};
pub use completion::completion;
pub use schedule::{assess_schedule, ScheduleStatus};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
