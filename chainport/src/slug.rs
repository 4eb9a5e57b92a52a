//! Monitoring project slugs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::networks::{ChainFamily, Network};
use crate::tier::DeploymentTier;

/// Identifier of the verification/monitoring project a deployment reports to.
///
/// Always of the shape `chainport-<family>-<tier>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectSlug(String);

impl ProjectSlug {
    /// Build the slug for a chain family and deployment tier.
    #[must_use]
    pub fn new(family: ChainFamily, tier: DeploymentTier) -> Self {
        Self(format!("chainport-{family}-{tier}"))
    }

    /// The slug string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derive the project slug from a network and a branch name.
///
/// The two lookups are independent: the network is not checked against the
/// branch here, that is [`crate::validator::check_branch`]'s job.
///
/// # Errors
///
/// [`Error::UnmappedNetwork`] if the network has no chain family,
/// [`Error::UnmappedBranch`] if the branch has no deployment tier.
pub fn project_slug(network: Network, branch: &str) -> Result<ProjectSlug> {
    let (family, tier) = slug_parts(network, branch)?;
    Ok(ProjectSlug::new(family, tier))
}

/// Chain family and deployment tier a slug is built from.
///
/// # Errors
///
/// Same as [`project_slug`].
pub fn slug_parts(network: Network, branch: &str) -> Result<(ChainFamily, DeploymentTier)> {
    let family = network
        .chain_family()
        .ok_or(Error::UnmappedNetwork(network))?;
    let tier =
        DeploymentTier::from_branch(branch).ok_or_else(|| Error::UnmappedBranch(branch.to_owned()))?;
    Ok((family, tier))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug(network: Network, branch: &str) -> String {
        project_slug(network, branch).unwrap().to_string()
    }

    #[test]
    fn develop_ropsten() {
        assert_eq!(slug(Network::Ropsten, "develop"), "chainport-eth-test");
    }

    #[test]
    fn lookups_are_independent() {
        assert_eq!(slug(Network::RopstenStaging, "master"), "chainport-eth-prod");
        assert_eq!(slug(Network::BinanceTest, "staging"), "chainport-bsc-staging");
    }

    #[test]
    fn family_ignores_branch() {
        for branch in ["develop", "staging", "master"] {
            assert!(slug(Network::Ropsten, branch).starts_with("chainport-eth-"));
            assert!(slug(Network::BinanceTestStaging, branch).starts_with("chainport-bsc-"));
        }
    }

    #[test]
    fn tier_ignores_network() {
        for network in [Network::Ropsten, Network::BinanceTest] {
            assert!(slug(network, "develop").ends_with("-test"));
            assert!(slug(network, "staging").ends_with("-staging"));
            assert!(slug(network, "master").ends_with("-prod"));
        }
    }

    #[test]
    fn deterministic() {
        assert_eq!(
            project_slug(Network::BinanceTest, "master").ok(),
            project_slug(Network::BinanceTest, "master").ok()
        );
    }

    #[test]
    fn unmapped_network_is_an_error() {
        let err = project_slug(Network::Mainnet, "master").unwrap_err();
        assert!(matches!(err, Error::UnmappedNetwork(Network::Mainnet)));
    }

    #[test]
    fn unmapped_branch_is_an_error() {
        let err = project_slug(Network::Ropsten, "feature/x").unwrap_err();
        assert!(matches!(err, Error::UnmappedBranch(ref b) if b == "feature/x"));
    }
}
