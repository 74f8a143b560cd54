//! Per-file reservation state

use idlprune_ast::SymbolSet;
use std::collections::HashMap;
use tracing::debug;

/// Reserved names of one file and the bookkeeping of its fixpoint loop
#[derive(Debug, Clone, Default)]
pub struct ReservationContext {
    /// Normalized path of the file
    pub path: String,
    pub reserved: SymbolSet,
    /// Set whenever a name is added; cleared at the start of every marking pass
    pub more_added: bool,
    /// Repository identity, first key into the sticky store (recursive mode only)
    pub repository: Option<String>,
}

impl ReservationContext {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Reserve `name`, returning whether it was new
    pub fn insert(&mut self, name: &str) -> bool {
        let added = self.reserved.insert(name);
        if added {
            self.more_added = true;
        }
        added
    }

    /// Reserve every name in `names`
    pub fn seed<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.insert(name.as_ref());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reserved.is_empty()
    }
}

/// Reservation contexts keyed by normalized file path
#[derive(Debug, Default)]
pub struct ContextMap {
    contexts: HashMap<String, ReservationContext>,
}

impl ContextMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&ReservationContext> {
        self.contexts.get(path)
    }

    /// Context of `path`, created empty on first use
    pub fn get_or_create(&mut self, path: &str) -> &mut ReservationContext {
        self.contexts.entry(path.to_string()).or_insert_with(|| {
            debug!(file = path, "created reservation context");
            ReservationContext::new(path)
        })
    }

    /// Detach a context so it can be marked while others receive propagated names
    pub fn take(&mut self, path: &str) -> ReservationContext {
        self.contexts
            .remove(path)
            .unwrap_or_else(|| ReservationContext::new(path))
    }

    pub fn put(&mut self, context: ReservationContext) {
        self.contexts.insert(context.path.clone(), context);
    }

    /// True when `path` has no context or its context reserves nothing
    pub fn is_unused(&self, path: &str) -> bool {
        self.get(path).map_or(true, ReservationContext::is_empty)
    }
}
