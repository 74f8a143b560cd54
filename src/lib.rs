//! idlprune - Dead declaration pruning for Thrift IDL include graphs
//!
//! This is the root workspace crate that provides integration tests.
//! The actual implementation is in the workspace member crates.

// Re-export main crates for convenience
pub use idlprune_ast as ast;
pub use idlprune_core as prune;
pub use idlprune_store as store;
