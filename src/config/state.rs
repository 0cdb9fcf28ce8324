// Application state module
// Configuration and storage shared by every connection

use super::types::Config;
use crate::store::Store;

/// Application state
pub struct AppState {
    pub config: Config,
    pub store: Store,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = Store::new(&config.storage);
        Self { config, store }
    }
}
