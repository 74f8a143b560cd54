//! Sweep: delete every declaration that is not reserved

use idlprune_ast::{Document, StructLike, SymbolSet};
use serde::Serialize;
use std::fmt;

/// Number of declarations removed from one document, per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepStats {
    pub functions: usize,
    pub structs: usize,
    pub unions: usize,
    pub exceptions: usize,
    pub typedefs: usize,
    pub enums: usize,
}

impl SweepStats {
    pub fn total(&self) -> usize {
        self.functions + self.structs + self.unions + self.exceptions + self.typedefs + self.enums
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for SweepStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} functions, {} structs, {} unions, {} exceptions, {} typedefs, {} enums",
            self.functions, self.structs, self.unions, self.exceptions, self.typedefs, self.enums
        )
    }
}

/// Keep only reserved functions, structured types, typedefs and enums
///
/// Retained items keep their relative order. Constants, includes and
/// services themselves are left alone.
pub fn sweep(document: &mut Document, reserved: &SymbolSet) -> SweepStats {
    let mut stats = SweepStats::default();

    for service in &mut document.services {
        stats.functions += retain_counting(&mut service.functions, |f| reserved.contains(&f.name));
    }

    stats.structs = filter_struct_likes(&mut document.structs, reserved);
    stats.unions = filter_struct_likes(&mut document.unions, reserved);
    stats.exceptions = filter_struct_likes(&mut document.exceptions, reserved);
    stats.typedefs = retain_counting(&mut document.typedefs, |t| reserved.contains(&t.alias));
    stats.enums = retain_counting(&mut document.enums, |e| reserved.contains(&e.name));

    stats
}

fn filter_struct_likes(items: &mut Vec<StructLike>, reserved: &SymbolSet) -> usize {
    retain_counting(items, |s| reserved.contains(&s.name))
}

fn retain_counting<T>(items: &mut Vec<T>, keep: impl FnMut(&T) -> bool) -> usize {
    let before = items.len();
    items.retain(keep);
    before - items.len()
}
