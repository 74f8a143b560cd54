//! Recursive mode: prune a whole include graph with sticky reservations

use std::collections::{HashMap, HashSet};
use std::path::Path;

use idlprune_ast::{FileId, IdlGraph};
use idlprune_store::{RepositoryIdentity, ReservationStore, StickyConfig};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::sweep::{sweep, SweepStats};
use crate::{ContextMap, IncludeResolver, MarkMode, Marker, PruneError, Result};

/// Outcome of one file in a prune run
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub repository: Option<String>,
    /// Final reserved set, case-insensitively sorted
    pub reserved: Vec<String>,
    pub removed: SweepStats,
}

/// Include edge removed because its target ended up with nothing reserved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedInclude {
    pub owner: String,
    pub include: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PruneReport {
    /// Swept files, in depth-first order from the root
    pub files: Vec<FileReport>,
    pub dropped_includes: Vec<DroppedInclude>,
    /// Number of store entries that gained names in this run
    pub store_updates: usize,
}

impl PruneReport {
    pub fn file(&self, path: &str) -> Option<&FileReport> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn total_removed(&self) -> usize {
        self.files.iter().map(|f| f.removed.total()).sum()
    }
}

/// Visit state for the include walk
#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Done,
}

/// Drives marking, store updates and sweeping over an include graph
///
/// A run is collect-all then sweep-all:
/// 1. load the store and walk the include graph depth-first, resolving each
///    file's repository and seeding its context from the store (the root is
///    also seeded with the explicit reservations)
/// 2. mark every file to its fixpoint, includers before includees, merging
///    each result into the store
/// 3. save the store
/// 4. sweep every file still in use and drop includes of unused files
///
/// Everything that can fail happens before step 4, so a failed run leaves
/// the graph untouched.
pub struct Pruner<'a> {
    store: &'a mut dyn ReservationStore,
    identity: &'a dyn RepositoryIdentity,
}

impl<'a> Pruner<'a> {
    pub fn new(store: &'a mut dyn ReservationStore, identity: &'a dyn RepositoryIdentity) -> Self {
        Self { store, identity }
    }

    pub fn run<S: AsRef<str>>(
        &mut self,
        graph: &mut IdlGraph,
        root: FileId,
        reserved: &[S],
    ) -> Result<PruneReport> {
        let mut config = self.store.load()?;
        let mut contexts = ContextMap::new();

        let root_path = graph
            .get(root)
            .map(|doc| doc.path.clone())
            .ok_or_else(|| PruneError::UnknownInclude {
                file: "<root>".into(),
                include: format!("file #{}", root.0),
            })?;
        contexts.get_or_create(&root_path).seed(reserved);

        let order = {
            let mut collector = Collector {
                graph: &*graph,
                identity: self.identity,
                config: &config,
                contexts: &mut contexts,
                state: HashMap::new(),
                path: Vec::new(),
                postorder: Vec::new(),
            };
            collector.visit(root)?;
            collector.postorder
        };

        let store_updates = mark_all(graph, &order, &mut contexts, &mut config)?;
        self.store.save(&config)?;

        let mut report = PruneReport {
            store_updates,
            ..PruneReport::default()
        };
        let mut sweeper = Sweeper {
            contexts: &contexts,
            swept: HashSet::new(),
            report: &mut report,
        };
        sweeper.visit(graph, root);
        Ok(report)
    }
}

/// Depth-first walk that seeds contexts and orders files
struct Collector<'c> {
    graph: &'c IdlGraph,
    identity: &'c dyn RepositoryIdentity,
    config: &'c StickyConfig,
    contexts: &'c mut ContextMap,
    state: HashMap<FileId, VisitState>,
    path: Vec<FileId>,
    postorder: Vec<FileId>,
}

impl Collector<'_> {
    fn visit(&mut self, id: FileId) -> Result<()> {
        match self.state.get(&id) {
            Some(VisitState::Done) => return Ok(()),
            Some(VisitState::InProgress) => return Err(self.cycle_error(id)),
            None => {}
        }
        self.state.insert(id, VisitState::InProgress);
        self.path.push(id);

        let graph = self.graph;
        let Some(doc) = graph.get(id) else {
            return Err(PruneError::UnknownInclude {
                file: "<root>".into(),
                include: format!("file #{}", id.0),
            });
        };

        let repository = self
            .identity
            .identify(Path::new(&doc.path))
            .map_err(|source| PruneError::Identity {
                file: doc.path.clone(),
                source,
            })?;

        let context = self.contexts.get_or_create(&doc.path);
        if let Some(names) = self.config.names(&repository, &doc.path) {
            debug!(file = %doc.path, count = names.len(), "loaded sticky reservations");
            context.seed(names);
        }
        context.repository = Some(repository);

        for include in &doc.includes {
            if graph.get(include.target).is_none() {
                return Err(PruneError::UnknownInclude {
                    file: doc.path.clone(),
                    include: include.path.clone(),
                });
            }
            self.visit(include.target)?;
        }

        self.path.pop();
        self.state.insert(id, VisitState::Done);
        self.postorder.push(id);
        Ok(())
    }

    fn cycle_error(&self, id: FileId) -> PruneError {
        let start = self.path.iter().position(|p| *p == id).unwrap_or(0);
        let name = |id: &FileId| {
            self.graph
                .get(*id)
                .map(|d| d.path.clone())
                .unwrap_or_else(|| "?".into())
        };
        let mut cycle: Vec<String> = self.path[start..].iter().map(name).collect();
        cycle.push(name(&id));
        PruneError::CyclicInclude {
            cycle: cycle.join(" -> "),
        }
    }
}

/// Mark every collected file, includers first, and record results in the store
///
/// `postorder` reversed is a topological order of the include DAG, so every
/// name propagated into a file arrives before that file is marked.
fn mark_all(
    graph: &IdlGraph,
    postorder: &[FileId],
    contexts: &mut ContextMap,
    config: &mut StickyConfig,
) -> Result<usize> {
    let mut updates = 0;

    for id in postorder.iter().rev() {
        let Some(doc) = graph.get(*id) else { continue };
        let mut context = contexts.take(&doc.path);

        {
            let resolver = IncludeResolver::new(graph, contexts);
            let mut marker = Marker::new(doc, &mut context, resolver, MarkMode::Recursive);
            marker.mark_functions()?;
            marker.run_to_fixpoint()?;
        }

        info!(
            file = %doc.path,
            reserved = context.reserved.len(),
            "collected reservations"
        );

        if let Some(repository) = &context.repository {
            if config.merge(repository, &doc.path, context.reserved.to_ordered_list()) {
                updates += 1;
            }
        }
        contexts.put(context);
    }

    Ok(updates)
}

/// Depth-first sweep that visits each file once and drops unused includes
struct Sweeper<'c> {
    contexts: &'c ContextMap,
    swept: HashSet<FileId>,
    report: &'c mut PruneReport,
}

impl Sweeper<'_> {
    fn visit(&mut self, graph: &mut IdlGraph, id: FileId) {
        if !self.swept.insert(id) {
            return;
        }

        let unused: HashSet<FileId> = match graph.get(id) {
            Some(doc) => doc
                .includes
                .iter()
                .filter(|inc| {
                    graph
                        .get(inc.target)
                        .map_or(true, |target| self.contexts.is_unused(&target.path))
                })
                .map(|inc| inc.target)
                .collect(),
            None => return,
        };

        let Some(doc) = graph.get_mut(id) else { return };
        let context = self.contexts.get(&doc.path);
        let empty = Default::default();
        let reserved = context.map_or(&empty, |c| &c.reserved);

        let removed = sweep(doc, reserved);
        info!(file = %doc.path, removed = removed.total(), "swept");

        let mut kept = Vec::new();
        let owner = doc.path.clone();
        doc.includes.retain(|inc| {
            if unused.contains(&inc.target) {
                warn!(file = %owner, include = %inc.path, "dropping unused include");
                self.report.dropped_includes.push(DroppedInclude {
                    owner: owner.clone(),
                    include: inc.path.clone(),
                });
                false
            } else {
                kept.push(inc.target);
                true
            }
        });

        self.report.files.push(FileReport {
            path: owner,
            repository: context.and_then(|c| c.repository.clone()),
            reserved: context
                .map(|c| c.reserved.to_ordered_list())
                .unwrap_or_default(),
            removed,
        });

        for target in kept {
            self.visit(graph, target);
        }
    }
}
