//! Sticky reservation configuration

use idlprune_ast::SymbolSet;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// On-disk layout of the reservation file
///
/// ```yaml
/// reserved_gits:
///   - git: git@github.com:org/idl.git
///     files:
///       - file: idl/user.thrift
///         names: [Address, GetUser, User]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickyDocument {
    #[serde(default)]
    pub reserved_gits: Vec<ReservedRepository>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedRepository {
    pub git: String,
    #[serde(default)]
    pub files: Vec<ReservedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedFile {
    pub file: String,
    #[serde(default)]
    pub names: Vec<String>,
}

/// Reserved names keyed by repository identity, then by file path
///
/// Entries keep first-seen order so that saving produces a stable file.
/// Name lists are always sorted case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StickyConfig {
    repositories: IndexMap<String, IndexMap<String, Vec<String>>>,
}

impl StickyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }

    /// Names stored for a file, `None` if nothing was ever recorded
    pub fn names(&self, repository: &str, file: &str) -> Option<&[String]> {
        self.repositories
            .get(repository)
            .and_then(|files| files.get(file))
            .map(Vec::as_slice)
    }

    /// Union `names` into the entry for (`repository`, `file`)
    ///
    /// Returns whether the stored list grew. An empty `names` never creates an entry.
    pub fn merge<I, S>(&mut self, repository: &str, file: &str, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let incoming: SymbolSet = names.into_iter().collect();
        if incoming.is_empty() {
            return false;
        }

        let entry = self
            .repositories
            .entry(repository.to_string())
            .or_default()
            .entry(file.to_string())
            .or_default();

        let before = entry.len();
        let mut merged: SymbolSet = entry.drain(..).collect();
        merged.extend(incoming.iter());
        *entry = merged.to_ordered_list();
        entry.len() != before
    }

    pub fn repositories(&self) -> impl Iterator<Item = &str> {
        self.repositories.keys().map(String::as_str)
    }

    /// (file, names) entries recorded for a repository
    pub fn files(&self, repository: &str) -> impl Iterator<Item = (&str, &[String])> {
        self.repositories
            .get(repository)
            .into_iter()
            .flat_map(|files| files.iter().map(|(f, n)| (f.as_str(), n.as_slice())))
    }

    /// Total number of (repository, file) entries
    pub fn file_count(&self) -> usize {
        self.repositories.values().map(IndexMap::len).sum()
    }
}

impl From<StickyDocument> for StickyConfig {
    fn from(doc: StickyDocument) -> Self {
        let mut config = StickyConfig::new();
        for repo in doc.reserved_gits {
            for file in repo.files {
                config.merge(&repo.git, &file.file, file.names);
            }
        }
        config
    }
}

impl From<&StickyConfig> for StickyDocument {
    fn from(config: &StickyConfig) -> Self {
        StickyDocument {
            reserved_gits: config
                .repositories
                .iter()
                .map(|(git, files)| ReservedRepository {
                    git: git.clone(),
                    files: files
                        .iter()
                        .map(|(file, names)| ReservedFile {
                            file: file.clone(),
                            names: names.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}
