use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Deformation potential in eV, either shared by all bands or split into
/// valence and conduction band values.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(untagged)]
pub enum DeformationPotential {
    Single(f64),
    Pair(f64, f64),
}

/// Material constants consumed by the scattering mechanisms.
///
/// Every field is optional so that a mechanism can report exactly which of
/// its inputs is missing.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct MaterialProperties {
    /// eV.
    pub deformation_potential: Option<DeformationPotential>,
    /// GPa.
    pub elastic_constant: Option<f64>,
    pub donor_charge: Option<f64>,
    pub acceptor_charge: Option<f64>,
    /// Relative static permittivity.
    pub static_dielectric: Option<f64>,
    /// C/m².
    pub piezoelectric_coefficient: Option<f64>,
}

#[derive(Debug, Error)]
pub enum MaterialsError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

impl MaterialProperties {
    pub fn load(path: &Path) -> Result<Self, MaterialsError> {
        let content = std::fs::read_to_string(path).map_err(|e| MaterialsError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| MaterialsError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    /// Whether the named property has a value. Names use the snake_case
    /// spelling the scattering mechanisms declare.
    pub fn has(&self, property: &str) -> bool {
        match property {
            "deformation_potential" => self.deformation_potential.is_some(),
            "elastic_constant" => self.elastic_constant.is_some(),
            "donor_charge" => self.donor_charge.is_some(),
            "acceptor_charge" => self.acceptor_charge.is_some(),
            "static_dielectric" => self.static_dielectric.is_some(),
            "piezoelectric_coefficient" => self.piezoelectric_coefficient.is_some(),
            _ => false,
        }
    }

    /// Fills every unset field from `other`.
    pub fn merged_with(mut self, other: &MaterialProperties) -> Self {
        self.deformation_potential = self.deformation_potential.or(other.deformation_potential);
        self.elastic_constant = self.elastic_constant.or(other.elastic_constant);
        self.donor_charge = self.donor_charge.or(other.donor_charge);
        self.acceptor_charge = self.acceptor_charge.or(other.acceptor_charge);
        self.static_dielectric = self.static_dielectric.or(other.static_dielectric);
        self.piezoelectric_coefficient = self
            .piezoelectric_coefficient
            .or(other.piezoelectric_coefficient);
        self
    }
}
