//! idlprune Store - Sticky reservations persisted across pruning runs
//!
//! A prune run records, for every file it keeps anything from, the set of
//! reserved names it computed. The next run starts from that record, so what
//! a file is allowed to keep only ever grows.
//!
//! ## Layout
//!
//! Reservations are keyed by repository identity (usually the `origin`
//! remote URL of the repository holding the file) and then by file path.
//! Backends implement [`ReservationStore`]:
//! - [`MemoryStore`] for tests
//! - [`YamlFileStore`] for the `pruner.yml` file used by the CLI

mod config;
mod error;
mod identity;
mod memory;
mod provider;
mod yaml_store;

pub use config::{ReservedFile, ReservedRepository, StickyConfig, StickyDocument};
pub use error::{Result, StoreError};
pub use identity::{FixedIdentity, GitRemoteIdentity, RepositoryIdentity};
pub use memory::MemoryStore;
pub use provider::ReservationStore;
pub use yaml_store::{YamlFileStore, DEFAULT_CONFIG_FILE};
