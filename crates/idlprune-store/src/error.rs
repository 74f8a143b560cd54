//! Error types for store operations

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse reservation file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("cannot serialize reservations: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("git error for {path}: {source}")]
    Git {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("repository of {path} has no remote named `{remote}`")]
    MissingRemote { path: PathBuf, remote: String },

    #[error("remote `{remote}` of {path} has no readable URL")]
    RemoteWithoutUrl { path: PathBuf, remote: String },
}
