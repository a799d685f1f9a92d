//! Error types for the recomp engine

use thiserror::Error;

/// Errors that can occur at the engine's loading seams.
///
/// The calculation functions themselves are total over valid-shape input and
/// never return errors; bad data inside a batch is reported as non-fatal
/// warnings instead (see `EngineWarning`).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to load config: {0}")]
    ConfigError(String),

    #[error("Failed to load food catalog: {0}")]
    CatalogError(String),
}
