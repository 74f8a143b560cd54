//! Repository identity: the first key of the reservation store

use crate::{Result, StoreError};
use git2::{ErrorCode, Repository};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Maps a file location to the identity of the repository that owns it
pub trait RepositoryIdentity {
    fn identify(&self, file: &Path) -> Result<String>;
}

/// Uses the URL of a git remote (`origin` by default)
///
/// A file outside any repository is identified by the current working
/// directory. A repository without the configured remote is an error.
#[derive(Debug, Clone)]
pub struct GitRemoteIdentity {
    remote: String,
}

impl GitRemoteIdentity {
    pub fn new(remote: impl Into<String>) -> Self {
        Self {
            remote: remote.into(),
        }
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    fn workdir_fallback(file: &Path) -> Result<String> {
        let cwd = std::env::current_dir().map_err(|source| StoreError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        Ok(cwd.to_string_lossy().into_owned())
    }
}

impl Default for GitRemoteIdentity {
    fn default() -> Self {
        Self::new("origin")
    }
}

impl RepositoryIdentity for GitRemoteIdentity {
    fn identify(&self, file: &Path) -> Result<String> {
        let start: PathBuf = match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let repo = match Repository::discover(&start) {
            Ok(repo) => repo,
            Err(e) if e.code() == ErrorCode::NotFound => {
                warn!(file = %file.display(), "not inside a git repository, using working directory as identity");
                return Self::workdir_fallback(file);
            }
            Err(source) => {
                return Err(StoreError::Git {
                    path: file.to_path_buf(),
                    source,
                })
            }
        };

        let remote = match repo.find_remote(&self.remote) {
            Ok(remote) => remote,
            Err(e) if e.code() == ErrorCode::NotFound => {
                return Err(StoreError::MissingRemote {
                    path: file.to_path_buf(),
                    remote: self.remote.clone(),
                })
            }
            Err(source) => {
                return Err(StoreError::Git {
                    path: file.to_path_buf(),
                    source,
                })
            }
        };

        let url = remote
            .url()
            .ok_or_else(|| StoreError::RemoteWithoutUrl {
                path: file.to_path_buf(),
                remote: self.remote.clone(),
            })?
            .to_string();
        debug!(file = %file.display(), %url, "resolved repository identity");
        Ok(url)
    }
}

/// Same identity for every file
#[derive(Debug, Clone)]
pub struct FixedIdentity(pub String);

impl FixedIdentity {
    pub fn new(identity: impl Into<String>) -> Self {
        Self(identity.into())
    }
}

impl RepositoryIdentity for FixedIdentity {
    fn identify(&self, _file: &Path) -> Result<String> {
        Ok(self.0.clone())
    }
}
