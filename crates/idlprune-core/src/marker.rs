//! Reachability marking: grows a file's reserved set to a fixpoint

use idlprune_ast::{Document, Function, TypeExpr, TypeRef};
use tracing::{debug, trace};

use crate::walker::for_each_symbol;
use crate::{ReservationContext, Result};

/// Which rule families a marker applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkMode {
    /// Single merged document: no constants, qualified names stay local
    Flat,
    /// Include graph: constants are marked, qualified names cross files
    Recursive,
}

/// Receives qualified references found while marking a file
pub trait Propagate {
    fn propagate(&mut self, owner: &Document, reference: &TypeRef) -> Result<()>;
}

/// Used in flat mode, where there is nothing to propagate to
pub struct NoPropagation;

impl Propagate for NoPropagation {
    fn propagate(&mut self, _owner: &Document, _reference: &TypeRef) -> Result<()> {
        Ok(())
    }
}

/// Marks everything reachable from the reserved names of one document
pub struct Marker<'a, P: Propagate> {
    document: &'a Document,
    context: &'a mut ReservationContext,
    propagate: P,
    mode: MarkMode,
}

impl<'a, P: Propagate> Marker<'a, P> {
    pub fn new(
        document: &'a Document,
        context: &'a mut ReservationContext,
        propagate: P,
        mode: MarkMode,
    ) -> Self {
        Self {
            document,
            context,
            propagate,
            mode,
        }
    }

    /// Mark the signatures of every reserved service function
    pub fn mark_functions(&mut self) -> Result<()> {
        let document = self.document;
        for function in document.functions() {
            self.mark_function(function)?;
        }
        Ok(())
    }

    /// Mark return, argument and throws types of `function` if its name is reserved
    pub fn mark_function(&mut self, function: &'a Function) -> Result<()> {
        if !self.context.reserved.contains(&function.name) {
            return Ok(());
        }

        self.mark_type(function.return_type.as_ref())?;
        for field in function.arguments.iter().chain(function.throws.iter()) {
            self.mark_type(Some(&field.ty))?;
        }
        Ok(())
    }

    /// Repeat marking passes until one adds no name. Returns the number of passes.
    ///
    /// Each pass walks the fields of reserved structs, unions and exceptions,
    /// the targets of reserved typedefs, and in recursive mode the types of
    /// reserved constants. The reserved set only grows and is bounded by the
    /// names spelled in the document, so the loop terminates.
    pub fn run_to_fixpoint(&mut self) -> Result<usize> {
        let document = self.document;
        let mut passes = 0;

        self.context.more_added = true;
        while self.context.more_added {
            self.context.more_added = false;
            passes += 1;

            for structured in document.struct_likes() {
                if self.context.reserved.contains(&structured.name) {
                    for field in &structured.fields {
                        self.mark_type(Some(&field.ty))?;
                    }
                }
            }

            for typedef in &document.typedefs {
                if self.context.reserved.contains(&typedef.alias) {
                    self.mark_type(Some(&typedef.ty))?;
                }
            }

            if self.mode == MarkMode::Recursive {
                for constant in &document.constants {
                    if self.context.reserved.contains(&constant.name) {
                        self.mark_type(Some(&constant.ty))?;
                    }
                }
            }
        }

        trace!(file = %document.path, passes, "fixpoint reached");
        Ok(passes)
    }

    fn mark_type(&mut self, ty: Option<&'a TypeExpr>) -> Result<()> {
        for_each_symbol(ty, &mut |reference| self.add_name(reference))
    }

    fn add_name(&mut self, reference: &'a TypeRef) -> Result<()> {
        if self.context.insert(&reference.name) {
            debug!(file = %self.document.path, name = %reference.name, "reserved");
        }

        // re-sent on every sighting; the target insert is idempotent
        if self.mode == MarkMode::Recursive && reference.is_qualified() {
            self.propagate.propagate(self.document, reference)?;
        }
        Ok(())
    }
}
