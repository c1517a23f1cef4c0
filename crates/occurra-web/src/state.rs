//! Shared application state for the web server.

use std::sync::Arc;

use minijinja::Environment;
use occurra_common::Result;
use occurra_config::Config;
use occurra_ingestion::sources::gbif::GbifClient;
use occurra_ingestion::sources::OccurrenceSource;

use crate::render;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub config: Config,
    /// Where searches go; GBIF in production.
    pub source: Arc<dyn OccurrenceSource>,
    pub templates: Environment<'static>,
}

impl AppState {
    /// State backed by the GBIF endpoint from `config`.
    pub fn new(config: Config) -> Result<Self> {
        let source = Arc::new(GbifClient::from_config(&config.gbif)?);
        Self::with_source(config, source)
    }

    pub fn with_source(config: Config, source: Arc<dyn OccurrenceSource>) -> Result<Self> {
        Ok(Self { config, source, templates: render::environment()? })
    }
}

pub type SharedState = Arc<AppState>;
