//! File-backed store (`pruner.yml`)

use crate::{ReservationStore, Result, StickyConfig, StickyDocument, StoreError};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Default reservation file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "pruner.yml";

/// Store persisted as a YAML document
#[derive(Debug, Clone)]
pub struct YamlFileStore {
    path: PathBuf,
}

impl YamlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for YamlFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_FILE)
    }
}

impl ReservationStore for YamlFileStore {
    fn load(&self) -> Result<StickyConfig> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no reservation file, starting empty");
                return Ok(StickyConfig::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        if content.trim().is_empty() {
            return Ok(StickyConfig::new());
        }

        let doc: StickyDocument =
            serde_yaml::from_str(&content).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        Ok(StickyConfig::from(doc))
    }

    fn save(&mut self, config: &StickyConfig) -> Result<()> {
        let yaml = serde_yaml::to_string(&StickyDocument::from(config))
            .map_err(StoreError::Serialize)?;

        // write next to the target, then rename into place
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| self.io_error(e))?;

        // deleted on drop unless persisted
        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(yaml.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        debug!(
            path = %self.path.display(),
            files = config.file_count(),
            "saved reservations"
        );
        Ok(())
    }
}
