//! Engine configuration

use serde::{Deserialize, Serialize};

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Refuse a snapshot containing rows that failed normalization
    /// instead of skipping them with a warning
    pub strict_rows: bool,
    /// Verify the referenced Activity exists before persisting a
    /// realization record (one extra fetch per append)
    pub check_activity_exists: bool,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With strict row handling
    #[inline]
    #[must_use]
    pub fn with_strict_rows(mut self, strict: bool) -> Self {
        self.strict_rows = strict;
        self
    }

    /// With Activity existence checking on realization append
    #[inline]
    #[must_use]
    pub fn with_activity_check(mut self, check: bool) -> Self {
        self.check_activity_exists = check;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strict_rows: false,
            check_activity_exists: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_lenient_but_checked() {
        let config = EngineConfig::new();
        assert!(!config.strict_rows);
        assert!(config.check_activity_exists);
    }

    #[test]
    fn builder_overrides() {
        let config = EngineConfig::new()
            .with_strict_rows(true)
            .with_activity_check(false);
        assert!(config.strict_rows);
        assert!(!config.check_activity_exists);
    }
}
