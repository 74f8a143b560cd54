//! idlprune core - Dead-declaration elimination for IDL files
//!
//! Starting from a set of reserved names (service functions or types), the
//! pruner computes everything those names transitively depend on and
//! deletes every other function, struct, union, exception, typedef and enum.
//!
//! # Modes
//!
//! - [`crop`]: a single document that has already been merged, no persistence
//! - [`Pruner`]: a graph of documents connected by includes. Uses of
//!   `include.Symbol` reserve `Symbol` in the included file, includes whose
//!   target keeps nothing are dropped, and every file's reserved set is
//!   merged into a sticky [`ReservationStore`](idlprune_store::ReservationStore)
//!   so later runs keep at least as much.
//!
//! # Usage
//!
//! ```ignore
//! use idlprune_core::Pruner;
//! use idlprune_store::{GitRemoteIdentity, YamlFileStore};
//!
//! let mut store = YamlFileStore::default();
//! let identity = GitRemoteIdentity::default();
//! let report = Pruner::new(&mut store, &identity).run(&mut graph, root, &["GetUser"])?;
//! for dropped in &report.dropped_includes {
//!     eprintln!("{}: dropped include {}", dropped.owner, dropped.include);
//! }
//! ```

mod context;
mod crop;
mod error;
mod marker;
mod prune;
mod resolver;
pub mod sweep;
pub mod walker;

pub use context::{ContextMap, ReservationContext};
pub use crop::{crop, CropReport};
pub use error::{PruneError, Result};
pub use marker::{MarkMode, Marker, NoPropagation, Propagate};
pub use prune::{DroppedInclude, FileReport, PruneReport, Pruner};
pub use resolver::{resolve_include, IncludeResolver};
pub use sweep::{sweep, SweepStats};
