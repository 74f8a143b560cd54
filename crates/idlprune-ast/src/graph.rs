//! File graph: every document of a run, connected by include edges

use crate::{normalize_filename, Document};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Index of a document in an [`IdlGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub u32);

/// Arena of documents addressed by [`FileId`]
///
/// Paths are unique after normalization, so a file reached through several
/// include edges is a single shared node. [`IdlGraph::insert`] reuses the
/// existing node; a serialized graph that lists a path twice is rejected.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(try_from = "GraphFiles")]
pub struct IdlGraph {
    files: Vec<Document>,

    #[serde(skip)]
    by_path: HashMap<String, FileId>,
}

#[derive(Deserialize)]
struct GraphFiles {
    #[serde(default)]
    files: Vec<Document>,
}

impl TryFrom<GraphFiles> for IdlGraph {
    type Error = String;

    fn try_from(raw: GraphFiles) -> Result<Self, Self::Error> {
        let mut graph = IdlGraph::new();
        for doc in raw.files {
            if let Some(first) = graph.id_of(&doc.path) {
                return Err(format!(
                    "duplicate file `{}` (already listed as file #{})",
                    normalize_filename(&doc.path),
                    first.0
                ));
            }
            graph.push(doc);
        }
        Ok(graph)
    }
}

impl IdlGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document, returning its id
    ///
    /// If a document with the same normalized path is already present its id
    /// is returned and `doc` is discarded.
    pub fn insert(&mut self, doc: Document) -> FileId {
        let path = normalize_filename(&doc.path);
        if let Some(id) = self.by_path.get(&path) {
            return *id;
        }
        self.push(Document { path, ..doc })
    }

    fn push(&mut self, mut doc: Document) -> FileId {
        doc.path = normalize_filename(&doc.path);
        // keep ids positional so include targets in serialized graphs stay valid
        let id = FileId(self.files.len() as u32);
        self.by_path.entry(doc.path.clone()).or_insert(id);
        self.files.push(doc);
        id
    }

    pub fn get(&self, id: FileId) -> Option<&Document> {
        self.files.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: FileId) -> Option<&mut Document> {
        self.files.get_mut(id.0 as usize)
    }

    /// Look up a document id by path
    pub fn id_of(&self, path: &str) -> Option<FileId> {
        self.by_path.get(&normalize_filename(path)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FileId, &Document)> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, doc)| (FileId(i as u32), doc))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
