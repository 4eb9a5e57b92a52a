//! Deployment environment resolution for the ChainPort contract toolchain.
//!
//! Maps the targeted [`Network`] to a [`ChainFamily`] and the current git
//! branch to a [`DeploymentTier`], guards sanctioned branch/network pairings
//! and derives the [`ProjectSlug`] that routes verification and monitoring
//! data to the right backend project.
//!
//! ```
//! use chainport::{MemoryContextStore, FixedBranch, NetworkSelection, Network, Resolver};
//!
//! let mut resolver = Resolver::new(MemoryContextStore::default(), FixedBranch::new("develop"));
//! let resolution = resolver.resolve(NetworkSelection::Explicit(Network::Ropsten))?;
//! assert_eq!(resolution.slug.as_str(), "chainport-eth-test");
//! # Ok::<(), chainport::Error>(())
//! ```

pub mod case;
pub mod config;
pub mod context;
pub mod error;
pub mod git;
pub mod networks;
pub mod resolver;
pub mod slug;
pub mod tier;
pub mod validator;

pub use config::{Config, Connection, Credentials, MonitoringConfig};
pub use context::{ContextStore, DeploymentContext, FileContextStore, MemoryContextStore};
pub use error::{Error, Result};
pub use git::{BranchReader, FixedBranch, GitCli};
pub use networks::{ChainFamily, Network, NetworkParams};
pub use resolver::{NetworkSelection, Resolution, Resolver, resolve_network};
pub use slug::{ProjectSlug, project_slug, slug_parts};
pub use tier::DeploymentTier;
pub use validator::{check_branch, validate};
