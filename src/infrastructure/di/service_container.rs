//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::StandupService;
use crate::config::Settings;
use crate::infrastructure::store::JsonFileStore;
use crate::infrastructure::traits::{FileSystem, KeyValueStore, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Persistent key-value store
    pub store: Arc<dyn KeyValueStore>,

    pub standup: StandupService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    ///
    /// The store lives at `settings.store_path()`.
    pub fn new(settings: Settings) -> Self {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        let store = Arc::new(JsonFileStore::new(fs.clone(), settings.store_path()));
        Self::with_deps(settings, fs, store)
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let settings = Arc::new(settings);
        let standup = StandupService::new(store.clone());

        Self {
            settings,
            fs,
            store,
            standup,
        }
    }
}
