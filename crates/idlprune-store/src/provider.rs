//! Storage backend interface

use crate::{Result, StickyConfig};

/// Where sticky reservations live between runs
///
/// A run loads the configuration once before marking and saves it once after
/// every file has been marked. Implementations do not need locking; a caller
/// must not run two prunes against the same store concurrently.
pub trait ReservationStore {
    /// Read the stored configuration. A store that does not exist yet is empty.
    fn load(&self) -> Result<StickyConfig>;

    /// Replace the stored configuration
    fn save(&mut self, config: &StickyConfig) -> Result<()>;
}
