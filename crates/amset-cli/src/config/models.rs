use amset::engine::config::RateConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub band_data_path: PathBuf,
    pub output_path: PathBuf,
    pub core_config: RateConfig,
}
