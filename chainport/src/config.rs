//! Toolchain configuration loaded from `chainport.toml`.
//!
//! Every field has a built-in default, so the toolchain works without any
//! config file. Credentials never live in the file; they come from the
//! process environment (see [`Credentials::from_env`]).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::context::DEFAULT_CONTEXT_FILE;
use crate::error::{Error, Result};
use crate::networks::Network;
use crate::slug::ProjectSlug;

/// Default config file name, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "chainport.toml";

/// Environment variable holding the deployer's signing key.
pub const SIGNER_KEY_VAR: &str = "PK";

/// Environment variable holding the monitoring backend account.
pub const MONITORING_USERNAME_VAR: &str = "USERNAME";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Deployment context record, relative to the working directory.
    pub context_file: PathBuf,
    /// Default task-runner network, shown by `networks` and `context`.
    ///
    /// Resolution never falls back to it: an unset deployment context is
    /// an error.
    pub default_network: Network,
    /// Compiler settings.
    pub solidity: SolidityConfig,
    /// Project layout.
    pub paths: PathsConfig,
    /// RPC url overrides keyed by network token.
    pub rpc: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            context_file: PathBuf::from(DEFAULT_CONTEXT_FILE),
            default_network: Network::DEFAULT,
            solidity: SolidityConfig::default(),
            paths: PathsConfig::default(),
            rpc: HashMap::new(),
        }
    }
}

/// Solidity compiler settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolidityConfig {
    /// `solc` version.
    pub version: String,
}

impl Default for SolidityConfig {
    fn default() -> Self {
        Self {
            version: "0.6.12".to_owned(),
        }
    }
}

/// Source and build output directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Contract sources.
    pub sources: PathBuf,
    /// Contract tests.
    pub tests: PathBuf,
    /// Compiler cache.
    pub cache: PathBuf,
    /// Build artifacts.
    pub artifacts: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            sources: PathBuf::from("./contracts"),
            tests: PathBuf::from("./test"),
            cache: PathBuf::from("./cache"),
            artifacts: PathBuf::from("./artifacts"),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// Returns [`Config::default`] if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&text)?)
    }

    /// RPC url for a network: the configured override, else the built-in one.
    #[must_use]
    pub fn rpc_url(&self, network: Network) -> Option<&str> {
        self.rpc
            .get(network.as_str())
            .map(String::as_str)
            .or_else(|| network.params().map(|p| p.url))
    }

    /// Connection settings for the task runner, with the signer key from
    /// `credentials` as the network's account. `local` never gets one.
    #[must_use]
    pub fn connection(&self, network: Network, credentials: &Credentials) -> Option<Connection> {
        let params = network.params()?;
        let accounts = match (network, &credentials.signer_key) {
            (Network::Local, _) | (_, None) => Vec::new(),
            (_, Some(key)) => vec![key.clone()],
        };
        Some(Connection {
            url: self.rpc_url(network).unwrap_or(params.url).to_owned(),
            chain_id: params.chain_id,
            gas_price: params.gas_price,
            timeout_ms: params.timeout_ms,
            accounts,
        })
    }

    /// Context record path resolved against `dir`.
    #[must_use]
    pub fn context_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.context_file)
    }
}

/// Resolved connection settings for one network.
#[derive(Clone, PartialEq, Eq)]
pub struct Connection {
    /// JSON-RPC endpoint, after overrides.
    pub url: String,
    /// EIP-155 chain ID, when pinned.
    pub chain_id: Option<u64>,
    /// Gas price in wei, when pinned.
    pub gas_price: Option<u64>,
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Signer keys.
    pub accounts: Vec<String>,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("url", &self.url)
            .field("chain_id", &self.chain_id)
            .field("gas_price", &self.gas_price)
            .field("timeout_ms", &self.timeout_ms)
            .field("accounts", &self.accounts.len())
            .finish()
    }
}

/// Secrets and accounts passed through from the environment, unvalidated.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Deployer private key.
    pub signer_key: Option<String>,
    /// Monitoring backend account name.
    pub monitoring_username: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("signer_key", &self.signer_key.as_ref().map(|_| "<redacted>"))
            .field("monitoring_username", &self.monitoring_username)
            .finish()
    }
}

impl Credentials {
    /// Read [`SIGNER_KEY_VAR`] and [`MONITORING_USERNAME_VAR`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            signer_key: lookup(SIGNER_KEY_VAR),
            monitoring_username: lookup(MONITORING_USERNAME_VAR),
        }
    }
}

/// Project selector handed to the verification/monitoring backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitoringConfig {
    /// Backend account.
    pub username: Option<String>,
    /// Project slug.
    pub project: ProjectSlug,
}

impl MonitoringConfig {
    /// Pair the resolved slug with the account from the credentials.
    #[must_use]
    pub fn new(credentials: &Credentials, project: ProjectSlug) -> Self {
        Self {
            username: credentials.monitoring_username.clone(),
            project,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::networks::ChainFamily;
    use crate::tier::DeploymentTier;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_network, Network::Local);
        assert_eq!(config.solidity.version, "0.6.12");
        assert_eq!(config.paths.artifacts, PathBuf::from("./artifacts"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &path,
            r#"
default_network = "ropsten"

[paths]
sources = "./src"

[rpc]
binancetest = "https://bsc.example.com"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.default_network, Network::Ropsten);
        assert_eq!(config.paths.sources, PathBuf::from("./src"));
        assert_eq!(config.paths.tests, PathBuf::from("./test"));
        assert_eq!(config.context_file, PathBuf::from(DEFAULT_CONTEXT_FILE));
        assert_eq!(config.rpc_url(Network::BinanceTest), Some("https://bsc.example.com"));
        assert_eq!(config.rpc_url(Network::Local), Some("http://localhost:8545"));
        assert_eq!(config.rpc_url(Network::BinanceMainnet), None);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "default_network = \"kovan\"").unwrap();
        assert!(matches!(Config::load(&path), Err(Error::Toml(_))));
    }

    #[test]
    fn connection_carries_signer_key() {
        let mut config = Config::default();
        config
            .rpc
            .insert("ropsten".to_owned(), "https://ropsten.example.com".to_owned());
        let creds = Credentials {
            signer_key: Some("0xabc".to_owned()),
            monitoring_username: None,
        };

        let ropsten = config.connection(Network::Ropsten, &creds).unwrap();
        assert_eq!(ropsten.url, "https://ropsten.example.com");
        assert_eq!(ropsten.chain_id, Some(3));
        assert_eq!(ropsten.accounts, vec!["0xabc".to_owned()]);
        assert!(!format!("{ropsten:?}").contains("0xabc"));

        let local = config.connection(Network::Local, &creds).unwrap();
        assert!(local.accounts.is_empty());

        assert!(config.connection(Network::BinanceMainnet, &creds).is_none());
        let anonymous = config
            .connection(Network::Mainnet, &Credentials::default())
            .unwrap();
        assert!(anonymous.accounts.is_empty());
    }

    #[test]
    fn credentials_pass_through() {
        let creds = Credentials::from_lookup(|key| match key {
            "PK" => Some("0xabc".to_owned()),
            "USERNAME" => Some("chainport".to_owned()),
            _ => None,
        });
        assert_eq!(creds.signer_key.as_deref(), Some("0xabc"));
        assert!(!format!("{creds:?}").contains("0xabc"));

        let monitoring =
            MonitoringConfig::new(&creds, ProjectSlug::new(ChainFamily::Bsc, DeploymentTier::Prod));
        assert_eq!(monitoring.username.as_deref(), Some("chainport"));
        assert_eq!(monitoring.project.as_str(), "chainport-bsc-prod");
    }
}
