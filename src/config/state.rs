// Application state module
// Read-only snapshot of the loaded configuration shared across connections

use super::types::Config;

/// Application state
///
/// Built once before the listener starts and never mutated afterwards. The
/// route table itself is fixed in code; only paths and logging behavior come
/// from configuration.
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }
}
