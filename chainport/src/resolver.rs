//! Environment resolution: network selection, tier lookup and slug derivation.

use crate::context::ContextStore;
use crate::error::{Error, Result};
use crate::git::BranchReader;
use crate::networks::{ChainFamily, Network};
use crate::slug::{ProjectSlug, slug_parts};
use crate::tier::DeploymentTier;
use crate::validator;

/// How the network for this invocation is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkSelection {
    /// Given by the caller; persisted for later invocations.
    Explicit(Network),
    /// Taken from the persisted deployment context.
    Persisted,
}

impl From<Option<Network>> for NetworkSelection {
    fn from(network: Option<Network>) -> Self {
        network.map_or(Self::Persisted, Self::Explicit)
    }
}

/// Resolve the network for this invocation.
///
/// An explicit network is saved to `store` before being returned.
///
/// # Errors
///
/// [`Error::MissingContext`] if nothing was ever saved,
/// [`Error::UnknownNetwork`] if the saved token is not a known network,
/// and any store failure.
pub fn resolve_network(store: &mut impl ContextStore, selection: NetworkSelection) -> Result<Network> {
    match selection {
        NetworkSelection::Explicit(network) => {
            store.save(network)?;
            Ok(network)
        }
        NetworkSelection::Persisted => store.get()?.ok_or(Error::MissingContext)?.network(),
    }
}

/// Everything derived for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The targeted network.
    pub network: Network,
    /// The checked out branch.
    pub branch: String,
    /// Chain family of the network.
    pub family: ChainFamily,
    /// Tier of the branch.
    pub tier: DeploymentTier,
    /// The monitoring project slug.
    pub slug: ProjectSlug,
}

/// Resolves the deployment environment against a context store and a branch source.
#[derive(Debug)]
pub struct Resolver<S, B> {
    store: S,
    branches: B,
}

impl<S: ContextStore, B: BranchReader> Resolver<S, B> {
    /// Create a resolver.
    pub const fn new(store: S, branches: B) -> Self {
        Self { store, branches }
    }

    /// The underlying context store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Pick the network, persisting it when explicit.
    ///
    /// # Errors
    ///
    /// See [`resolve_network`].
    pub fn network(&mut self, selection: NetworkSelection) -> Result<Network> {
        resolve_network(&mut self.store, selection)
    }

    /// Resolve network, branch, family, tier and slug.
    ///
    /// # Errors
    ///
    /// Network selection failures, branch lookup failures, and the same
    /// unmapped network/branch errors as [`crate::slug::project_slug`].
    pub fn resolve(&mut self, selection: NetworkSelection) -> Result<Resolution> {
        // A failed branch read must leave the persisted context untouched.
        let branch = self.branches.current_branch()?;
        let network = self.network(selection)?;
        let (family, tier) = slug_parts(network, &branch)?;
        let slug = ProjectSlug::new(family, tier);

        tracing::info!(%network, branch, %slug, "resolved deployment environment");
        Ok(Resolution {
            network,
            branch,
            family,
            tier,
            slug,
        })
    }

    /// Resolve only the project slug.
    ///
    /// # Errors
    ///
    /// See [`Resolver::resolve`].
    pub fn slug(&mut self, selection: NetworkSelection) -> Result<ProjectSlug> {
        self.resolve(selection).map(|r| r.slug)
    }

    /// Run the branch/network guard for the selected network and return it.
    ///
    /// # Errors
    ///
    /// Branch lookup and network selection failures, and everything
    /// [`validator::check_branch`] rejects.
    pub fn check(&mut self, selection: NetworkSelection) -> Result<Network> {
        let branch = self.branches.current_branch()?;
        let network = self.network(selection)?;
        validator::check_branch(network, &branch)?;
        tracing::info!(%network, branch, "branch/network pairing ok");
        Ok(network)
    }
}
