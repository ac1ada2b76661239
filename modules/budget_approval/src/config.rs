//! Configuration for the budget approval module

use serde::{Deserialize, Serialize};

/// Budget approval module configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Reject decisions must carry a non-blank comment
    #[serde(default = "default_true")]
    pub require_rejection_comment: bool,

    /// Longest approval chain a plan may be created with
    #[serde(default = "default_max_levels")]
    pub max_levels: usize,

    /// Levels without an assigned approver may be decided by any user of the tenant
    #[serde(default = "default_true")]
    pub allow_unassigned_approver: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            require_rejection_comment: true,
            max_levels: default_max_levels(),
            allow_unassigned_approver: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_levels() -> usize {
    10
}
