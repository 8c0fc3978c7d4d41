//! Status and classification enums shared across the hierarchy

use serde::{Deserialize, Serialize};

/// Lifecycle status of a hierarchy node
///
/// A cancelled node contributes `0` completion and is excluded from its
/// parent's average - not averaged in at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    /// In progress
    Active,
    /// Finished
    Completed,
    /// Behind schedule
    Delayed,
    /// Dropped from the plan; excluded from all aggregation
    Cancelled,
}

impl NodeStatus {
    /// Whether this node is excluded from parent averages
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Stable string form (matches the store's column values)
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Delayed => "delayed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Default for NodeStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// Indicator directionality
///
/// `Increasing` means higher actuals are better (coverage, output counts);
/// `Decreasing` means lower actuals are better (defect rates, backlog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increasing,
    Decreasing,
}

impl Default for Direction {
    fn default() -> Self {
        Self::Increasing
    }
}

/// Expense approval status
///
/// Only `Approved` expenses count toward an Activity's actual budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseStatus {
    Approved,
    Rejected,
    Pending,
}

impl ExpenseStatus {
    /// Pending is the only non-terminal decision state
    #[inline]
    #[must_use]
    pub fn is_decided(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl Default for ExpenseStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Whether a realization record carries an expense claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseFlag {
    Yes,
    No,
    #[serde(alias = "not-required")]
    NotRequired,
}

impl Default for ExpenseFlag {
    fn default() -> Self {
        Self::NotRequired
    }
}

/// The five hierarchy levels, parent-to-child order
///
/// Indicator and Activity are siblings under Target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemLevel {
    Area,
    Objective,
    Target,
    Indicator,
    Activity,
}

impl ItemLevel {
    /// Stable string form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Objective => "objective",
            Self::Target => "target",
            Self::Indicator => "indicator",
            Self::Activity => "activity",
        }
    }

    /// Store table holding this level's rows
    #[inline]
    #[must_use]
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Area => "areas",
            Self::Objective => "objectives",
            Self::Target => "targets",
            Self::Indicator => "indicators",
            Self::Activity => "activities",
        }
    }
}

impl std::fmt::Display for ItemLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
