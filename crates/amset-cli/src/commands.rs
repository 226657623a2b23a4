pub mod mechanisms;
pub mod rates;
pub mod screening;

use crate::error::{CliError, Result};
use amset::core::io::band_data::BandDataFile;
use amset::core::models::band_data::BandData;
use std::path::Path;
use tracing::info;

pub(crate) fn load_band_data(path: &Path) -> Result<BandData> {
    info!("Loading band data from {:?}", path);
    let band_data = BandDataFile::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    info!(
        ndops = band_data.ndops(),
        ntemps = band_data.ntemps(),
        nkpoints = band_data.nkpoints(),
        is_metal = band_data.is_metal,
        "Band data loaded."
    );
    Ok(band_data)
}
