use super::config::ConfigError;
use crate::core::io::band_data::BandDataFileError;
use crate::core::materials::MaterialsError;
use crate::core::models::band_data::BandDataError;
use crate::scattering::error::ScatteringError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load band data: {0}")]
    BandDataFile(#[from] BandDataFileError),

    #[error("Failed to load material properties: {0}")]
    Materials(#[from] MaterialsError),

    #[error("Invalid band data: {0}")]
    BandData(#[from] BandDataError),

    #[error("Scattering setup failed: {0}")]
    Scattering(#[from] ScatteringError),

    #[error("No scattering mechanisms selected: {reason}")]
    NoMechanisms { reason: String },

    #[error("Failed to write rates to '{path}': {source}")]
    Output { path: String, source: csv::Error },
}
