//! Cross-file resolution: "used in file A" becomes "keep in file B"

use idlprune_ast::{Document, IdlGraph, Include, TypeRef};
use tracing::debug;

use crate::{ContextMap, Propagate, PruneError, Result};

/// Find the include edge a qualified reference crosses
///
/// Uses the include position recorded by the parser when present, and falls
/// back to matching the qualifier against the include file stems.
pub fn resolve_include<'d>(owner: &'d Document, reference: &TypeRef) -> Result<&'d Include> {
    let edge = match reference.include {
        Some(index) => owner.include(index),
        None => reference
            .qualifier()
            .and_then(|qualifier| owner.include_named(qualifier)),
    };

    edge.ok_or_else(|| PruneError::MalformedReference {
        file: owner.path.clone(),
        name: reference.name.clone(),
        span: reference.span,
    })
}

/// Routes qualified references into the context of the included file
///
/// Contexts are created on demand, so a file can receive names before the
/// orchestrator has visited it.
pub struct IncludeResolver<'a> {
    graph: &'a IdlGraph,
    contexts: &'a mut ContextMap,
}

impl<'a> IncludeResolver<'a> {
    pub fn new(graph: &'a IdlGraph, contexts: &'a mut ContextMap) -> Self {
        Self { graph, contexts }
    }
}

impl Propagate for IncludeResolver<'_> {
    fn propagate(&mut self, owner: &Document, reference: &TypeRef) -> Result<()> {
        let edge = resolve_include(owner, reference)?;
        let target = self
            .graph
            .get(edge.target)
            .ok_or_else(|| PruneError::UnknownInclude {
                file: owner.path.clone(),
                include: edge.path.clone(),
            })?;

        let symbol = reference.symbol();
        if self.contexts.get_or_create(&target.path).insert(symbol) {
            debug!(
                from = %owner.path,
                to = %target.path,
                name = symbol,
                "propagated across include"
            );
        }
        Ok(())
    }
}
