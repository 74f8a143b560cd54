//! Flat mode: prune a single, already merged document

use idlprune_ast::Document;
use serde::Serialize;
use tracing::info;

use crate::sweep::{sweep, SweepStats};
use crate::{MarkMode, Marker, NoPropagation, ReservationContext, Result};

/// Outcome of [`crop`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct CropReport {
    /// Final reserved set, case-insensitively sorted
    pub reserved: Vec<String>,
    pub removed: SweepStats,
}

/// Remove everything in `document` that `reserved` does not transitively need
///
/// Qualified names are treated as plain local names and constants are not
/// followed; there is no store and no include graph. An empty reservation
/// list leaves the document untouched.
pub fn crop<S: AsRef<str>>(document: &mut Document, reserved: &[S]) -> Result<CropReport> {
    if reserved.is_empty() {
        return Ok(CropReport::default());
    }

    let mut context = ReservationContext::new(document.path.clone());
    context.seed(reserved);

    {
        let mut marker = Marker::new(&*document, &mut context, NoPropagation, MarkMode::Flat);
        marker.mark_functions()?;
        marker.run_to_fixpoint()?;
    }

    let removed = sweep(document, &context.reserved);
    info!(
        file = %document.path,
        reserved = context.reserved.len(),
        removed = removed.total(),
        "cropped"
    );

    Ok(CropReport {
        reserved: context.reserved.to_ordered_list(),
        removed,
    })
}
