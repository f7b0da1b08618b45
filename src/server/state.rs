//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::error::ExcerptResult;
use crate::field::FormatCatalog;
use crate::formatter::{
    BasicTextFilter, FormatterRegistry, InMemorySettingsStore, JsonFileSettingsStore,
    SettingsStore, StandardElements,
};

/// Shared application state.
pub struct AppState {
    /// Service configuration.
    pub config: ServiceConfig,
    /// Registered formatters.
    pub registry: FormatterRegistry,
    /// Known text formats.
    pub formats: FormatCatalog,
    /// Element defaults.
    pub elements: StandardElements,
    /// Text filter run before trimming.
    pub filter: BasicTextFilter,
    /// Per-display settings.
    pub store: Box<dyn SettingsStore>,
}

impl AppState {
    /// Create the state described by `config`.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn new(config: ServiceConfig) -> ExcerptResult<Arc<Self>> {
        config.validate()?;

        let store: Box<dyn SettingsStore> = match &config.settings_path {
            Some(path) => {
                tracing::info!("Display settings file: {}", path.display());
                Box::new(JsonFileSettingsStore::new(path.clone()))
            }
            None => {
                tracing::info!("Display settings kept in memory");
                Box::new(InMemorySettingsStore::new())
            }
        };

        Ok(Self::with_store(config, store))
    }

    /// Create state around an existing settings store.
    #[must_use]
    pub fn with_store(config: ServiceConfig, store: Box<dyn SettingsStore>) -> Arc<Self> {
        Arc::new(Self {
            config,
            registry: FormatterRegistry::with_defaults(),
            formats: FormatCatalog::with_defaults(),
            elements: StandardElements,
            filter: BasicTextFilter,
            store,
        })
    }
}
