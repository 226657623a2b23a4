use crate::core::materials::MaterialProperties;
use crate::scattering::ScatteringType;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum MechanismSelection {
    /// Every mechanism whose material properties are available.
    Auto,
    Explicit(Vec<ScatteringType>),
}

impl MechanismSelection {
    pub fn resolve(&self, materials: &MaterialProperties) -> Vec<ScatteringType> {
        match self {
            Self::Auto => ScatteringType::auto(materials),
            Self::Explicit(types) => types.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateConfig {
    pub materials: MaterialProperties,
    pub mechanisms: MechanismSelection,
    /// Standard deviation of the Gaussian replacing the energy-conserving
    /// delta function, in Hartree.
    pub gaussian_width: f64,
}

#[derive(Default)]
pub struct RateConfigBuilder {
    materials: Option<MaterialProperties>,
    mechanisms: Option<MechanismSelection>,
    gaussian_width: Option<f64>,
}

impl RateConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn materials(mut self, materials: MaterialProperties) -> Self {
        self.materials = Some(materials);
        self
    }
    pub fn mechanisms(mut self, selection: MechanismSelection) -> Self {
        self.mechanisms = Some(selection);
        self
    }
    pub fn gaussian_width(mut self, width_hartree: f64) -> Self {
        self.gaussian_width = Some(width_hartree);
        self
    }

    pub fn build(self) -> Result<RateConfig, ConfigError> {
        let gaussian_width = self
            .gaussian_width
            .ok_or(ConfigError::MissingParameter("gaussian_width"))?;
        if !(gaussian_width.is_finite() && gaussian_width > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "gaussian_width",
                reason: format!("must be a positive number, got {}", gaussian_width),
            });
        }

        let mechanisms = self
            .mechanisms
            .ok_or(ConfigError::MissingParameter("mechanisms"))?;
        if matches!(&mechanisms, MechanismSelection::Explicit(types) if types.is_empty()) {
            return Err(ConfigError::InvalidParameter {
                name: "mechanisms",
                reason: "explicit mechanism list is empty".to_string(),
            });
        }

        Ok(RateConfig {
            materials: self
                .materials
                .ok_or(ConfigError::MissingParameter("materials"))?,
            mechanisms,
            gaussian_width,
        })
    }
}
