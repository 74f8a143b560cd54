//! In-memory store for testing

use crate::{ReservationStore, Result, StickyConfig};

/// Non-persistent store. Counts saves so tests can check the load-once/save-once lifecycle.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    config: StickyConfig,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `config`, as if a previous run had saved it
    pub fn with_config(config: StickyConfig) -> Self {
        Self { config, saves: 0 }
    }

    pub fn config(&self) -> &StickyConfig {
        &self.config
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl ReservationStore for MemoryStore {
    fn load(&self) -> Result<StickyConfig> {
        Ok(self.config.clone())
    }

    fn save(&mut self, config: &StickyConfig) -> Result<()> {
        self.config = config.clone();
        self.saves += 1;
        Ok(())
    }
}
