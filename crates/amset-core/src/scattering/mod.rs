//! # Elastic Scattering Module
//!
//! Scattering mechanisms in which the electron energy is conserved. Each
//! mechanism splits its matrix element into a state-dependent `prefactor`,
//! evaluated once per (spin, band) on the (doping, temperature) grid, and a
//! momentum-transfer `factor` evaluated for every |q|² the rate integral
//! visits.
//!
//! ## Mechanisms
//!
//! - [`adp`] - Acoustic deformation potential (`ADP`)
//! - [`imp`] - Ionized impurity (`IMP`)
//! - [`pie`] - Piezoelectric (`PIE`)
//!
//! [`screening`] provides the inverse screening length shared by the
//! impurity model.

pub mod adp;
pub mod error;
pub mod factor;
pub mod imp;
pub mod pie;
pub mod screening;

use crate::core::materials::MaterialProperties;
use crate::core::models::band_data::BandData;
use crate::core::models::spin::Spin;
use adp::AcousticDeformationPotentialScattering;
use error::ScatteringError;
use factor::ScatteringFactor;
use imp::IonizedImpurityScattering;
use nalgebra::DMatrix;
use pie::PiezoelectricScattering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub trait ElasticScattering: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn required_properties(&self) -> &'static [&'static str];

    /// Rate prefactor with shape (doping, temperature).
    fn prefactor(&self, spin: Spin, band_index: usize) -> DMatrix<f64>;

    /// Momentum-dependent factor with shape (doping, temperature, q), for
    /// squared momentum transfers in bohr⁻².
    fn factor(&self, norm_q_sq: &[f64]) -> ScatteringFactor;
}

/// Grid information every mechanism captures from the band data.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatteringBase {
    pub doping: Vec<f64>,
    pub temperatures: Vec<f64>,
    pub nbands: BTreeMap<Spin, usize>,
    pub spins: Vec<Spin>,
}

impl ScatteringBase {
    pub fn new(band_data: &BandData) -> Self {
        Self {
            doping: band_data.doping.clone(),
            temperatures: band_data.temperatures.clone(),
            nbands: band_data
                .bands
                .iter()
                .map(|(&spin, bands)| (spin, bands.nbands()))
                .collect(),
            spins: band_data.spins().collect(),
        }
    }

    pub fn ndops(&self) -> usize {
        self.doping.len()
    }

    pub fn ntemps(&self) -> usize {
        self.temperatures.len()
    }

    /// `scale · T` broadcast over the (doping, temperature) grid.
    pub fn temperature_grid(&self, scale: f64) -> DMatrix<f64> {
        DMatrix::from_fn(self.ndops(), self.ntemps(), |_, t| {
            scale * self.temperatures[t]
        })
    }
}

pub(crate) fn require<T>(
    mechanism: &'static str,
    property: &'static str,
    value: Option<T>,
) -> Result<T, ScatteringError> {
    value.ok_or(ScatteringError::MissingProperty {
        mechanism,
        property,
    })
}

pub(crate) fn require_positive(
    mechanism: &'static str,
    property: &'static str,
    value: Option<f64>,
) -> Result<f64, ScatteringError> {
    let value = require(mechanism, property, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ScatteringError::InvalidProperty {
            mechanism,
            property,
            reason: format!("must be positive, got {}", value),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScatteringType {
    Adp,
    Imp,
    Pie,
}

impl ScatteringType {
    pub const ALL: [ScatteringType; 3] = [Self::Adp, Self::Imp, Self::Pie];

    pub fn name(self) -> &'static str {
        match self {
            Self::Adp => AcousticDeformationPotentialScattering::NAME,
            Self::Imp => IonizedImpurityScattering::NAME,
            Self::Pie => PiezoelectricScattering::NAME,
        }
    }

    pub fn required_properties(self) -> &'static [&'static str] {
        match self {
            Self::Adp => AcousticDeformationPotentialScattering::REQUIRED_PROPERTIES,
            Self::Imp => IonizedImpurityScattering::REQUIRED_PROPERTIES,
            Self::Pie => PiezoelectricScattering::REQUIRED_PROPERTIES,
        }
    }

    pub fn is_available(self, properties: &MaterialProperties) -> bool {
        self.required_properties()
            .iter()
            .all(|property| properties.has(property))
    }

    /// Every mechanism whose required properties are all set.
    pub fn auto(properties: &MaterialProperties) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|t| t.is_available(properties))
            .collect()
    }

    pub fn build(
        self,
        properties: &MaterialProperties,
        band_data: &BandData,
    ) -> Result<Box<dyn ElasticScattering>, ScatteringError> {
        Ok(match self {
            Self::Adp => Box::new(AcousticDeformationPotentialScattering::new(
                properties, band_data,
            )?),
            Self::Imp => Box::new(IonizedImpurityScattering::new(properties, band_data)?),
            Self::Pie => Box::new(PiezoelectricScattering::new(properties, band_data)?),
        })
    }
}

impl FromStr for ScatteringType {
    type Err = ScatteringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ScatteringError::UnknownMechanism(s.to_string()))
    }
}

impl fmt::Display for ScatteringType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Constructs the requested mechanisms, deduplicated and in canonical order.
pub fn build_mechanisms(
    types: &[ScatteringType],
    properties: &MaterialProperties,
    band_data: &BandData,
) -> Result<Vec<Box<dyn ElasticScattering>>, ScatteringError> {
    let mut types = types.to_vec();
    types.sort();
    types.dedup();
    types
        .into_iter()
        .map(|t| t.build(properties, band_data))
        .collect()
}
