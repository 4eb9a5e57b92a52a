//! Branch/network pairing guard.
//!
//! Each sanctioned network may only be deployed from one branch, so a
//! staging or production configuration cannot go out from the wrong one.

use crate::error::{Error, Result};
use crate::git::BranchReader;
use crate::networks::Network;

/// Check `network` against an already known branch.
///
/// # Errors
///
/// [`Error::BranchMismatch`] if the network is sanctioned for another branch,
/// [`Error::UnknownNetworkConfiguration`] if it has no sanctioned branch.
pub fn check_branch(network: Network, branch: &str) -> Result<()> {
    let expected = network
        .required_branch()
        .ok_or(Error::UnknownNetworkConfiguration(network))?;
    if branch != expected {
        return Err(Error::BranchMismatch {
            network,
            expected,
            actual: branch.to_owned(),
        });
    }
    Ok(())
}

/// Check `network` against the branch currently checked out.
///
/// # Errors
///
/// Propagates branch lookup failures and everything [`check_branch`] rejects.
pub fn validate(network: Network, branches: &impl BranchReader) -> Result<()> {
    let branch = branches.current_branch()?;
    check_branch(network, &branch)?;
    tracing::info!(%network, branch, "branch/network pairing ok");
    Ok(())
}
