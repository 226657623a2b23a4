use super::error::ScatteringError;
use super::factor::ScatteringFactor;
use super::screening::calculate_inverse_screening_length_sq;
use super::{ElasticScattering, ScatteringBase, require, require_positive};
use crate::core::constants::{FOUR_PI, SECOND, per_bohr3_to_per_cm3};
use crate::core::materials::MaterialProperties;
use crate::core::models::band_data::BandData;
use crate::core::models::spin::Spin;
use nalgebra::DMatrix;
use tracing::debug;

/// Ionized impurity scattering in the Brooks–Herring picture.
///
/// The impurity concentration is inferred from the free carrier
/// concentrations and the donor/acceptor charges; screening uses the inverse
/// screening length from [`calculate_inverse_screening_length_sq`].
#[derive(Debug, Clone)]
pub struct IonizedImpurityScattering {
    base: ScatteringBase,
    inverse_screening_length_sq: DMatrix<f64>,
    impurity_concentration: DMatrix<f64>,
    prefactor: DMatrix<f64>,
}

impl IonizedImpurityScattering {
    pub const NAME: &'static str = "IMP";
    pub const REQUIRED_PROPERTIES: &'static [&'static str] =
        &["acceptor_charge", "donor_charge", "static_dielectric"];

    pub fn new(
        properties: &MaterialProperties,
        band_data: &BandData,
    ) -> Result<Self, ScatteringError> {
        let acceptor_charge = require(Self::NAME, "acceptor_charge", properties.acceptor_charge)?;
        let donor_charge = require(Self::NAME, "donor_charge", properties.donor_charge)?;
        let static_dielectric = require_positive(
            Self::NAME,
            "static_dielectric",
            properties.static_dielectric,
        )?;

        debug!("Initializing IMP scattering");

        let inverse_screening_length_sq =
            calculate_inverse_screening_length_sq(band_data, static_dielectric);

        let impurity_concentration =
            DMatrix::from_fn(band_data.ndops(), band_data.ntemps(), |n, t| {
                band_data.electron_conc[(n, t)].abs() * donor_charge.powi(2)
                    + band_data.hole_conc[(n, t)].abs() * acceptor_charge.powi(2)
            });

        debug!("Inverse screening length (β) and impurity concentration (Nᵢᵢ):");
        for n in 0..band_data.ndops() {
            for t in 0..band_data.ntemps() {
                debug!(
                    "    {:.2e} cm⁻³ & {} K: β² = {:.3e} a₀⁻², Nᵢᵢ = {:.3e} cm⁻³",
                    per_bohr3_to_per_cm3(band_data.doping[n]),
                    band_data.temperatures[t],
                    inverse_screening_length_sq[(n, t)],
                    per_bohr3_to_per_cm3(impurity_concentration[(n, t)]),
                );
            }
        }

        let prefactor =
            &impurity_concentration * (FOUR_PI * FOUR_PI * SECOND / static_dielectric.powi(2));

        Ok(Self {
            base: ScatteringBase::new(band_data),
            inverse_screening_length_sq,
            impurity_concentration,
            prefactor,
        })
    }

    /// β² in bohr⁻², shape (doping, temperature).
    pub fn inverse_screening_length_sq(&self) -> &DMatrix<f64> {
        &self.inverse_screening_length_sq
    }

    /// Nᵢᵢ in bohr⁻³, shape (doping, temperature).
    pub fn impurity_concentration(&self) -> &DMatrix<f64> {
        &self.impurity_concentration
    }
}

impl ElasticScattering for IonizedImpurityScattering {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn required_properties(&self) -> &'static [&'static str] {
        Self::REQUIRED_PROPERTIES
    }

    fn prefactor(&self, _spin: Spin, _band_index: usize) -> DMatrix<f64> {
        self.prefactor.clone()
    }

    fn factor(&self, norm_q_sq: &[f64]) -> ScatteringFactor {
        ScatteringFactor::from_fn(
            self.base.ndops(),
            self.base.ntemps(),
            norm_q_sq.len(),
            |n, t, k| {
                let screened = norm_q_sq[k] + self.inverse_screening_length_sq[(n, t)];
                1.0 / (screened * screened)
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::band_data::fixtures::simple_band_data;

    fn properties() -> MaterialProperties {
        MaterialProperties {
            donor_charge: Some(1.0),
            acceptor_charge: Some(2.0),
            static_dielectric: Some(10.0),
            ..Default::default()
        }
    }

    fn rel_approx_equal(a: f64, b: f64) -> bool {
        ((a - b) / b).abs() < 1e-12
    }

    #[test]
    fn new_reports_first_missing_property_in_declared_order() {
        let result = IonizedImpurityScattering::new(
            &MaterialProperties::default(),
            &simple_band_data(false),
        );
        assert_eq!(
            result.unwrap_err(),
            ScatteringError::MissingProperty {
                mechanism: "IMP",
                property: "acceptor_charge"
            }
        );
    }

    #[test]
    fn new_rejects_zero_dielectric_constant() {
        let mut props = properties();
        props.static_dielectric = Some(0.0);
        let result = IonizedImpurityScattering::new(&props, &simple_band_data(false));
        assert!(matches!(
            result,
            Err(ScatteringError::InvalidProperty {
                property: "static_dielectric",
                ..
            })
        ));
    }

    #[test]
    fn impurity_concentration_weights_carriers_by_squared_charges() {
        let data = simple_band_data(false);
        let imp = IonizedImpurityScattering::new(&properties(), &data).unwrap();
        let expected = data.electron_conc[(1, 0)] * 1.0 + data.hole_conc[(1, 0)] * 4.0;
        assert!(rel_approx_equal(imp.impurity_concentration()[(1, 0)], expected));
    }

    #[test]
    fn prefactor_is_independent_of_spin_and_band() {
        let data = simple_band_data(false);
        let imp = IonizedImpurityScattering::new(&properties(), &data).unwrap();
        assert_eq!(imp.prefactor(Spin::Up, 0), imp.prefactor(Spin::Down, 7));

        let expected = imp.impurity_concentration()[(0, 1)] * FOUR_PI * FOUR_PI * SECOND / 100.0;
        assert!(rel_approx_equal(imp.prefactor(Spin::Up, 0)[(0, 1)], expected));
    }

    #[test]
    fn factor_is_screened_coulomb_squared() {
        let data = simple_band_data(false);
        let imp = IonizedImpurityScattering::new(&properties(), &data).unwrap();
        let q_sq = [0.0, 0.5, 2.0];
        let factor = imp.factor(&q_sq);
        assert_eq!(factor.shape(), (2, 2, 3));

        let beta_sq = imp.inverse_screening_length_sq()[(1, 1)];
        for (k, &q) in q_sq.iter().enumerate() {
            let expected = 1.0 / (q + beta_sq).powi(2);
            assert!(rel_approx_equal(factor[(1, 1, k)], expected));
        }
    }

    #[test]
    fn factor_decreases_with_momentum_transfer() {
        let imp = IonizedImpurityScattering::new(&properties(), &simple_band_data(false)).unwrap();
        let factor = imp.factor(&[0.1, 1.0]);
        assert!(factor[(0, 0, 0)] > factor[(0, 0, 1)]);
    }
}
