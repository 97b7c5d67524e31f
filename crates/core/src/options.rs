//! Typed query options for contributor listings.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Default number of contributors always shown before the threshold applies.
pub const DEFAULT_LIMIT: i64 = 10;

/// Default minimum edit count for contributors listed past the limit.
pub const DEFAULT_THRESHOLD: i64 = 2;

/// Deployment-wide cutoff settings, passed explicitly into every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributorsConfig {
    /// Contributors shown unconditionally (subject to ties, see
    /// [`crate::contributors::select_contributors`]).
    pub limit: i64,
    /// After `limit` rows, contributors with fewer edits than this are folded
    /// into the "others" count.
    pub threshold: i64,
}

impl Default for ContributorsConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Sort key for a contributor listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Edit count, highest first.
    #[default]
    Count,
    /// Editor display name, in reverse lexical order.
    User,
}

/// Options for a single contributors query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Exclude anonymous editors (editor id 0).
    pub filter_anonymous: bool,
    /// Roll up every page whose title starts with the target title.
    pub page_prefix: bool,
    pub sort_by: SortBy,
    /// Reverse the sorted sequence as a final step.
    pub ascending: bool,
    pub limit: i64,
    pub threshold: i64,
    /// Fold low-count contributors into "others". Disabled for raw export.
    pub use_threshold: bool,
}

impl QueryOptions {
    /// Options with every flag off and cutoffs taken from `config`.
    pub fn from_config(config: &ContributorsConfig) -> Self {
        Self {
            filter_anonymous: false,
            page_prefix: false,
            sort_by: SortBy::Count,
            ascending: false,
            limit: config.limit,
            threshold: config.threshold,
            use_threshold: true,
        }
    }

    /// Same options with thresholding disabled.
    pub fn unthresholded(self) -> Self {
        Self {
            use_threshold: false,
            ..self
        }
    }

    /// Reject negative cutoffs.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.limit < 0 {
            return Err(CoreError::Validation("limit must not be negative".into()));
        }
        if self.threshold < 0 {
            return Err(CoreError::Validation(
                "threshold must not be negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn defaults_follow_config() {
        let config = ContributorsConfig {
            limit: 3,
            threshold: 7,
        };
        let opts = QueryOptions::from_config(&config);
        assert_eq!(opts.limit, 3);
        assert_eq!(opts.threshold, 7);
        assert!(opts.use_threshold);
        assert_eq!(opts.sort_by, SortBy::Count);
        assert!(!opts.unthresholded().use_threshold);
    }

    #[test]
    fn negative_cutoffs_are_rejected() {
        let mut opts = QueryOptions::from_config(&ContributorsConfig::default());
        assert!(opts.validate().is_ok());

        opts.limit = -1;
        assert_matches!(opts.validate(), Err(CoreError::Validation(_)));

        opts.limit = 0;
        opts.threshold = -5;
        assert_matches!(opts.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn sort_by_deserializes_lowercase() {
        let parsed: SortBy = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(parsed, SortBy::User);
    }
}
