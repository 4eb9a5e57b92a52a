//! Deployment tiers derived from the git branch.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle stage of a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentTier {
    /// Built from `develop`.
    Test,
    /// Built from `staging`.
    Staging,
    /// Built from `master`.
    Prod,
}

impl DeploymentTier {
    /// Slug token of the tier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Staging => "staging",
            Self::Prod => "prod",
        }
    }

    /// Tier for a branch name. Other branches have no tier.
    #[must_use]
    pub fn from_branch(branch: &str) -> Option<Self> {
        match branch {
            "develop" => Some(Self::Test),
            "staging" => Some(Self::Staging),
            "master" => Some(Self::Prod),
            _ => None,
        }
    }
}

impl fmt::Display for DeploymentTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
