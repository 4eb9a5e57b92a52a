//! Current git branch lookup.

use std::path::PathBuf;
use std::process::Command;

use crate::error::{Error, Result};

/// Source of the currently checked out branch name.
pub trait BranchReader {
    /// Name of the current branch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Git`] if the branch cannot be determined.
    fn current_branch(&self) -> Result<String>;
}

impl<B: BranchReader + ?Sized> BranchReader for &B {
    fn current_branch(&self) -> Result<String> {
        (**self).current_branch()
    }
}

/// Reads the branch by running `git symbolic-ref --short HEAD`.
///
/// Works on an unborn branch (fresh repository without commits); fails
/// outside a repository and on a detached `HEAD`.
#[derive(Debug, Clone)]
pub struct GitCli {
    dir: PathBuf,
}

impl GitCli {
    /// Reader for the repository containing `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl BranchReader for GitCli {
    fn current_branch(&self) -> Result<String> {
        let output = Command::new("git")
            .args(["symbolic-ref", "--short", "HEAD"])
            .current_dir(&self.dir)
            .output()
            .map_err(|e| Error::Git(format!("running git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Git(format!(
                "git symbolic-ref failed in {}: {}",
                self.dir.display(),
                stderr.trim()
            )));
        }

        let branch = String::from_utf8(output.stdout)
            .map_err(|e| Error::Git(format!("branch name is not UTF-8: {e}")))?;
        let branch = branch.trim();
        if branch.is_empty() {
            return Err(Error::Git("empty branch name".to_owned()));
        }
        tracing::debug!(branch, "read current branch");
        Ok(branch.to_owned())
    }
}

/// A branch known up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedBranch(String);

impl FixedBranch {
    /// Reader that always reports `branch`.
    #[must_use]
    pub fn new(branch: impl Into<String>) -> Self {
        Self(branch.into())
    }
}

impl BranchReader for FixedBranch {
    fn current_branch(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}
