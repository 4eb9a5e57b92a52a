//! Persisted deployment context.
//!
//! Remembers the last explicitly targeted network so that later tasks
//! invoked without one (compile, test, verify) resolve the same deployment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::networks::Network;

/// Default file name of the context record, relative to the working directory.
pub const DEFAULT_CONTEXT_FILE: &str = "deployment-context.json";

/// The persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentContext {
    /// Identifier of the last targeted network, as given.
    pub network: String,
}

impl DeploymentContext {
    /// Record for a network.
    #[must_use]
    pub fn new(network: Network) -> Self {
        Self {
            network: network.as_str().to_owned(),
        }
    }

    /// Parse the stored identifier.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownNetwork`] if the stored token is not a known network.
    pub fn network(&self) -> Result<Network> {
        self.network.parse()
    }
}

/// Load/save interface for the deployment context.
pub trait ContextStore {
    /// Read the persisted record. `None` before anything was saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read or decoded.
    fn get(&self) -> Result<Option<DeploymentContext>>;

    /// Overwrite the record's network.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn save(&mut self, network: Network) -> Result<()>;
}

impl<S: ContextStore + ?Sized> ContextStore for &mut S {
    fn get(&self) -> Result<Option<DeploymentContext>> {
        (**self).get()
    }

    fn save(&mut self, network: Network) -> Result<()> {
        (**self).save(network)
    }
}

/// JSON file backed store.
#[derive(Debug, Clone)]
pub struct FileContextStore {
    path: PathBuf,
}

impl FileContextStore {
    /// Store at an explicit path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`DEFAULT_CONTEXT_FILE`] inside `dir`.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(DEFAULT_CONTEXT_FILE))
    }

    /// Path of the record.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
        move |source| Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl ContextStore for FileContextStore {
    fn get(&self) -> Result<Option<DeploymentContext>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no deployment context yet");
            return Ok(None);
        }
        let data = std::fs::read_to_string(&self.path).map_err(Self::io_err(&self.path))?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    /// Written to a sibling temporary file, then renamed into place.
    fn save(&mut self, network: Network) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(Self::io_err(dir))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        let body = serde_json::to_string_pretty(&DeploymentContext::new(network))?;

        std::fs::write(&tmp, body.as_bytes()).map_err(Self::io_err(&tmp))?;
        std::fs::rename(&tmp, &self.path).map_err(Self::io_err(&self.path))?;

        tracing::debug!(path = %self.path.display(), %network, "saved deployment context");
        Ok(())
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryContextStore {
    record: Option<DeploymentContext>,
}

impl MemoryContextStore {
    /// Store pre-seeded with a record.
    #[must_use]
    pub const fn with_record(record: DeploymentContext) -> Self {
        Self {
            record: Some(record),
        }
    }
}

impl ContextStore for MemoryContextStore {
    fn get(&self) -> Result<Option<DeploymentContext>> {
        Ok(self.record.clone())
    }

    fn save(&mut self, network: Network) -> Result<()> {
        self.record = Some(DeploymentContext::new(network));
        Ok(())
    }
}
