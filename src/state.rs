use crate::catalog::CATALOG;
use crate::config::AppConfig;
use crate::document::{DocumentError, MatriculaGenerator};
use crate::enrollment::validation::ValidationPolicy;

/// Shared state handed to every request. Holds no per-request data.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub generator: MatriculaGenerator,
}

impl AppState {
    /// Build the state with the real conversion tools.
    pub fn new(config: AppConfig) -> Result<Self, DocumentError> {
        let generator = MatriculaGenerator::from_config(&config)?;
        Ok(Self::with_generator(config, generator))
    }

    pub fn with_generator(config: AppConfig, generator: MatriculaGenerator) -> Self {
        Self { config, generator }
    }

    pub fn validation_policy(&self) -> ValidationPolicy<'static> {
        ValidationPolicy {
            require_fields: self.config.require_fields,
            catalog: self.config.validate_catalog.then(|| &*CATALOG),
        }
    }
}
