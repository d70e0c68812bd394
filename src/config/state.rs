// Application state module
// Shared, read-only state handed to every connection

use std::sync::Arc;

use super::types::Config;
use crate::fixtures::Fixtures;
use crate::routing::RouteTable;

/// Application state
///
/// Built once at startup and shared behind an `Arc`; nothing in here is
/// mutated while serving.
pub struct AppState {
    pub config: Config,
    pub fixtures: Arc<Fixtures>,
    pub routes: RouteTable,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            fixtures: Arc::new(config.fixtures.clone()),
            routes: RouteTable::demo(),
        }
    }

    /// Replace the fixed payloads, tokens and bodies
    #[must_use]
    pub fn with_fixtures(mut self, fixtures: Fixtures) -> Self {
        self.fixtures = Arc::new(fixtures);
        self
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}
