//! Error types for the resolver.

use std::path::PathBuf;

use crate::networks::Network;

/// Errors produced while resolving or validating a deployment environment.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A sanctioned network was targeted from the wrong git branch.
    #[error("wrong branch: network `{network}` must be deployed from `{expected}`, current branch is `{actual}`")]
    BranchMismatch {
        /// The targeted network.
        network: Network,
        /// The branch the network is sanctioned for.
        expected: &'static str,
        /// The branch actually checked out.
        actual: String,
    },

    /// The token does not name any known network.
    #[error("unknown network `{0}`")]
    UnknownNetwork(String),

    /// The network has no branch pairing, so it cannot be validated.
    #[error("wrong network configuration: `{0}` has no sanctioned branch")]
    UnknownNetworkConfiguration(Network),

    /// The network has no chain family, so no project slug exists for it.
    #[error("network `{0}` has no chain family")]
    UnmappedNetwork(Network),

    /// The branch has no deployment tier.
    #[error("branch `{0}` has no deployment tier")]
    UnmappedBranch(String),

    /// No network was given and none has been persisted yet.
    #[error("no network selected and no deployment context saved yet")]
    MissingContext,

    /// Filesystem failure on the given path.
    #[error("{}: {source}", path.display())]
    Io {
        /// The file or directory being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Deployment context (de)serialization failure.
    #[error("deployment context: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file parse failure.
    #[error("config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The current branch could not be read from git.
    #[error("git: {0}")]
    Git(String),
}

/// Convenience alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
