use super::error::ScatteringError;
use super::factor::ScatteringFactor;
use super::{ElasticScattering, ScatteringBase, require, require_positive};
use crate::core::constants::{E, EPSILON_0, FOUR_PI_SQ, HBAR, K_B};
use crate::core::materials::MaterialProperties;
use crate::core::models::band_data::BandData;
use crate::core::models::spin::Spin;
use nalgebra::DMatrix;

/// Piezoelectric scattering from acoustic phonons in non-centrosymmetric crystals.
#[derive(Debug, Clone)]
pub struct PiezoelectricScattering {
    base: ScatteringBase,
    prefactor: f64,
}

impl PiezoelectricScattering {
    pub const NAME: &'static str = "PIE";
    pub const REQUIRED_PROPERTIES: &'static [&'static str] =
        &["piezoelectric_coefficient", "static_dielectric"];

    pub fn new(
        properties: &MaterialProperties,
        band_data: &BandData,
    ) -> Result<Self, ScatteringError> {
        let coefficient = require(
            Self::NAME,
            "piezoelectric_coefficient",
            properties.piezoelectric_coefficient,
        )?;
        let static_dielectric = require_positive(
            Self::NAME,
            "static_dielectric",
            properties.static_dielectric,
        )?;

        let unit_conversion = 1e9 / E;
        let prefactor = unit_conversion * E * E * K_B * coefficient * coefficient
            / (FOUR_PI_SQ * HBAR * EPSILON_0 * static_dielectric);

        Ok(Self {
            base: ScatteringBase::new(band_data),
            prefactor,
        })
    }
}

impl ElasticScattering for PiezoelectricScattering {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn required_properties(&self) -> &'static [&'static str] {
        Self::REQUIRED_PROPERTIES
    }

    fn prefactor(&self, _spin: Spin, _band_index: usize) -> DMatrix<f64> {
        self.base.temperature_grid(self.prefactor)
    }

    /// 1/q², which diverges at q² = 0.
    fn factor(&self, norm_q_sq: &[f64]) -> ScatteringFactor {
        ScatteringFactor::from_fn(
            self.base.ndops(),
            self.base.ntemps(),
            norm_q_sq.len(),
            |_, _, k| 1.0 / norm_q_sq[k],
        )
    }
}
