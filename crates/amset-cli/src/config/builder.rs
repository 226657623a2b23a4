use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileMechanisms};
use super::models::AppConfig;
use crate::cli::RatesArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use amset::core::constants::EV_TO_HARTREE;
use amset::core::materials::MaterialProperties;
use amset::engine::config::RateConfigBuilder;
use amset::engine::error::EngineError;
use std::path::Path;
use tracing::debug;

pub fn build_config(args: &RatesArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = load_file_config(args.config.as_deref(), &args.set_values)?;

    let scattering_file = file_config.scattering.unwrap_or_default();
    let materials = resolve_materials(file_config.materials, args.materials.as_deref())?;

    let mechanisms = match (&args.mechanisms, &scattering_file.mechanisms) {
        (Some(cli_list), _) => {
            parser::parse_mechanisms(cli_list).map_err(|e| CliError::Argument(e.to_string()))?
        }
        (None, Some(file_val)) => file_val
            .to_selection()
            .map_err(|e| CliError::Config(e.to_string()))?,
        (None, None) => parser::parse_mechanisms(defaults.mechanisms)
            .map_err(|e| CliError::Config(e.to_string()))?,
    };

    let gaussian_width_ev = args
        .gaussian_width
        .or(scattering_file.gaussian_width)
        .unwrap_or(defaults.gaussian_width);
    debug!(gaussian_width_ev, ?mechanisms, "Resolved scattering settings.");

    let core_config = RateConfigBuilder::new()
        .materials(materials)
        .mechanisms(mechanisms)
        .gaussian_width(gaussian_width_ev * EV_TO_HARTREE)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        band_data_path: args.band_data.clone(),
        output_path: args.output.clone(),
        core_config,
    })
}

/// Material properties from an optional settings file with `-S` overrides
/// applied, falling back to a standalone materials file for anything unset.
/// Scattering settings in the file are ignored.
pub fn build_materials(
    config: Option<&Path>,
    materials_path: Option<&Path>,
    set_values: &[String],
) -> Result<MaterialProperties> {
    let file_config = load_file_config(config, set_values)?;
    resolve_materials(file_config.materials, materials_path)
}

fn resolve_materials(
    inline: Option<MaterialProperties>,
    materials_path: Option<&Path>,
) -> Result<MaterialProperties> {
    let inline = inline.unwrap_or_default();
    match materials_path {
        Some(path) => {
            let loaded = MaterialProperties::load(path).map_err(EngineError::from)?;
            debug!(path = %path.display(), "Loaded material properties file.");
            Ok(inline.merged_with(&loaded))
        }
        None => Ok(inline),
    }
}

fn load_file_config(path: Option<&Path>, set_values: &[String]) -> Result<FileConfig> {
    let file_config = match path {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    apply_set_values(file_config, set_values)
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value_str) =
            parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;
        let float = || parser::parse_float(key, value_str).map_err(|e| CliError::Config(e.to_string()));

        match key {
            "scattering.mechanisms" => {
                config
                    .scattering
                    .get_or_insert_with(Default::default)
                    .mechanisms = Some(FileMechanisms::Text(value_str.to_string()));
            }
            "scattering.gaussian-width" => {
                config
                    .scattering
                    .get_or_insert_with(Default::default)
                    .gaussian_width = Some(float()?);
            }
            "materials.deformation-potential" => {
                config
                    .materials
                    .get_or_insert_with(Default::default)
                    .deformation_potential = Some(
                    parser::parse_deformation_potential(value_str)
                        .map_err(|e| CliError::Config(e.to_string()))?,
                );
            }
            "materials.elastic-constant" => {
                config
                    .materials
                    .get_or_insert_with(Default::default)
                    .elastic_constant = Some(float()?);
            }
            "materials.donor-charge" => {
                config
                    .materials
                    .get_or_insert_with(Default::default)
                    .donor_charge = Some(float()?);
            }
            "materials.acceptor-charge" => {
                config
                    .materials
                    .get_or_insert_with(Default::default)
                    .acceptor_charge = Some(float()?);
            }
            "materials.static-dielectric" => {
                config
                    .materials
                    .get_or_insert_with(Default::default)
                    .static_dielectric = Some(float()?);
            }
            "materials.piezoelectric-coefficient" => {
                config
                    .materials
                    .get_or_insert_with(Default::default)
                    .piezoelectric_coefficient = Some(float()?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
