use super::error::ScatteringError;
use super::factor::ScatteringFactor;
use super::{ElasticScattering, ScatteringBase, require, require_positive};
use crate::core::constants::{BOLTZMANN, EV_TO_HARTREE, FOUR_PI_SQ, GPA_TO_AU, SECOND};
use crate::core::materials::{DeformationPotential, MaterialProperties};
use crate::core::models::band_data::BandData;
use crate::core::models::spin::Spin;
use nalgebra::DMatrix;
use std::collections::BTreeMap;
use tracing::warn;

/// Deformation potential after resolving it against the metallic character
/// of the system, in Hartree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedDeformationPotential {
    Shared(f64),
    Split { valence: f64, conduction: f64 },
}

impl ResolvedDeformationPotential {
    fn resolve(potential: DeformationPotential, is_metal: bool) -> Self {
        match (potential, is_metal) {
            (DeformationPotential::Pair(valence, _), true) => {
                warn!(
                    "System is metallic but deformation potentials for both the valence and \
                     conduction bands have been set... using the valence band potential for all bands"
                );
                Self::Shared(valence * EV_TO_HARTREE)
            }
            (DeformationPotential::Single(value), true) => Self::Shared(value * EV_TO_HARTREE),
            (DeformationPotential::Single(value), false) => {
                warn!(
                    "System is semiconducting but only one deformation potential has been set... \
                     using this potential for all bands."
                );
                Self::Split {
                    valence: value * EV_TO_HARTREE,
                    conduction: value * EV_TO_HARTREE,
                }
            }
            (DeformationPotential::Pair(valence, conduction), false) => Self::Split {
                valence: valence * EV_TO_HARTREE,
                conduction: conduction * EV_TO_HARTREE,
            },
        }
    }

    fn for_band(&self, band_index: usize, vb_index: Option<usize>) -> f64 {
        match *self {
            Self::Shared(value) => value,
            Self::Split {
                valence,
                conduction,
            } => {
                if vb_index.is_some_and(|vb| band_index > vb) {
                    conduction
                } else {
                    valence
                }
            }
        }
    }
}

/// Acoustic deformation potential scattering.
///
/// Rate prefactor k_B T D² / (4π² C) with a q-independent factor.
#[derive(Debug, Clone)]
pub struct AcousticDeformationPotentialScattering {
    base: ScatteringBase,
    vb_index: BTreeMap<Spin, usize>,
    is_metal: bool,
    prefactor: f64,
    deformation_potential: ResolvedDeformationPotential,
}

impl AcousticDeformationPotentialScattering {
    pub const NAME: &'static str = "ADP";
    pub const REQUIRED_PROPERTIES: &'static [&'static str] =
        &["deformation_potential", "elastic_constant"];

    pub fn new(
        properties: &MaterialProperties,
        band_data: &BandData,
    ) -> Result<Self, ScatteringError> {
        let potential = require(
            Self::NAME,
            "deformation_potential",
            properties.deformation_potential,
        )?;
        let elastic_constant = require_positive(
            Self::NAME,
            "elastic_constant",
            properties.elastic_constant,
        )?;

        let vb_index = band_data
            .bands
            .iter()
            .map(|(&spin, bands)| (spin, bands.vb_index))
            .collect();

        Ok(Self {
            base: ScatteringBase::new(band_data),
            vb_index,
            is_metal: band_data.is_metal,
            prefactor: BOLTZMANN * SECOND / (FOUR_PI_SQ * elastic_constant * GPA_TO_AU),
            deformation_potential: ResolvedDeformationPotential::resolve(
                potential,
                band_data.is_metal,
            ),
        })
    }

    pub fn deformation_potential(&self) -> ResolvedDeformationPotential {
        self.deformation_potential
    }

    pub fn is_metal(&self) -> bool {
        self.is_metal
    }
}

impl ElasticScattering for AcousticDeformationPotentialScattering {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn required_properties(&self) -> &'static [&'static str] {
        Self::REQUIRED_PROPERTIES
    }

    fn prefactor(&self, spin: Spin, band_index: usize) -> DMatrix<f64> {
        let potential = self
            .deformation_potential
            .for_band(band_index, self.vb_index.get(&spin).copied());
        self.base
            .temperature_grid(self.prefactor * potential * potential)
    }

    fn factor(&self, norm_q_sq: &[f64]) -> ScatteringFactor {
        ScatteringFactor::filled(self.base.ndops(), self.base.ntemps(), norm_q_sq.len(), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::band_data::fixtures::simple_band_data;

    const TOLERANCE: f64 = 1e-12;

    fn properties(potential: DeformationPotential) -> MaterialProperties {
        MaterialProperties {
            deformation_potential: Some(potential),
            elastic_constant: Some(100.0),
            ..Default::default()
        }
    }

    fn rel_approx_equal(a: f64, b: f64) -> bool {
        ((a - b) / b).abs() < TOLERANCE
    }

    #[test]
    fn new_fails_without_elastic_constant() {
        let props = MaterialProperties {
            deformation_potential: Some(DeformationPotential::Single(5.0)),
            ..Default::default()
        };
        let result = AcousticDeformationPotentialScattering::new(&props, &simple_band_data(false));
        assert_eq!(
            result.unwrap_err(),
            ScatteringError::MissingProperty {
                mechanism: "ADP",
                property: "elastic_constant"
            }
        );
    }

    #[test]
    fn new_rejects_non_positive_elastic_constant() {
        let mut props = properties(DeformationPotential::Single(5.0));
        props.elastic_constant = Some(0.0);
        let result = AcousticDeformationPotentialScattering::new(&props, &simple_band_data(false));
        assert!(matches!(
            result,
            Err(ScatteringError::InvalidProperty { .. })
        ));
    }

    #[test]
    fn metal_with_pair_uses_valence_potential_for_all_bands() {
        let adp = AcousticDeformationPotentialScattering::new(
            &properties(DeformationPotential::Pair(4.0, 9.0)),
            &simple_band_data(true),
        )
        .unwrap();
        assert_eq!(
            adp.deformation_potential(),
            ResolvedDeformationPotential::Shared(4.0 * EV_TO_HARTREE)
        );
        assert_eq!(adp.prefactor(Spin::Up, 0), adp.prefactor(Spin::Up, 1));
    }

    #[test]
    fn semiconductor_with_single_value_uses_it_for_both_band_edges() {
        let adp = AcousticDeformationPotentialScattering::new(
            &properties(DeformationPotential::Single(6.0)),
            &simple_band_data(false),
        )
        .unwrap();
        assert_eq!(
            adp.deformation_potential(),
            ResolvedDeformationPotential::Split {
                valence: 6.0 * EV_TO_HARTREE,
                conduction: 6.0 * EV_TO_HARTREE,
            }
        );
    }

    #[test]
    fn semiconductor_prefactor_switches_potential_above_valence_band() {
        let adp = AcousticDeformationPotentialScattering::new(
            &properties(DeformationPotential::Pair(2.0, 4.0)),
            &simple_band_data(false),
        )
        .unwrap();
        let valence = adp.prefactor(Spin::Up, 0);
        let conduction = adp.prefactor(Spin::Up, 1);
        for (v, c) in valence.iter().zip(conduction.iter()) {
            assert!(rel_approx_equal(c / v, 4.0));
        }
    }

    #[test]
    fn prefactor_matches_formula_and_scales_with_temperature() {
        let data = simple_band_data(true);
        let adp = AcousticDeformationPotentialScattering::new(
            &properties(DeformationPotential::Single(5.0)),
            &data,
        )
        .unwrap();
        let prefactor = adp.prefactor(Spin::Up, 0);
        assert_eq!(prefactor.shape(), (2, 2));

        let d = 5.0 * EV_TO_HARTREE;
        let expected_300 = BOLTZMANN * SECOND / (FOUR_PI_SQ * 100.0 * GPA_TO_AU) * 300.0 * d * d;
        assert!(rel_approx_equal(prefactor[(0, 0)], expected_300));
        assert!(rel_approx_equal(prefactor[(1, 0)], expected_300));
        assert!(rel_approx_equal(prefactor[(0, 1)], 2.0 * expected_300));
    }

    #[test]
    fn factor_is_ones_with_doping_temperature_q_shape() {
        let adp = AcousticDeformationPotentialScattering::new(
            &properties(DeformationPotential::Single(5.0)),
            &simple_band_data(false),
        )
        .unwrap();
        let factor = adp.factor(&[0.1, 0.2, 0.3]);
        assert_eq!(factor.shape(), (2, 2, 3));
        assert_eq!(factor, ScatteringFactor::filled(2, 2, 3, 1.0));
    }
}
