use crate::core::constants::per_bohr3_to_per_cm3;
use crate::core::materials::MaterialProperties;
use crate::core::models::band_data::BandData;
use crate::engine::error::EngineError;
use crate::scattering::screening::calculate_inverse_screening_length_sq;
use crate::scattering::imp::IonizedImpurityScattering;
use crate::scattering::require_positive;
use tracing::{info, instrument};

/// Screening summary for one (doping, temperature) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningEntry {
    pub doping_cm3: f64,
    pub temperature: f64,
    /// β² in bohr⁻².
    pub inverse_screening_length_sq: f64,
    pub impurity_concentration_cm3: f64,
}

/// Tabulates β² and the ionized impurity concentration on the band data's
/// doping and temperature grid. Donor and acceptor charges default to 1.
#[instrument(skip_all, name = "screening_workflow")]
pub fn run(
    band_data: &BandData,
    materials: &MaterialProperties,
) -> Result<Vec<ScreeningEntry>, EngineError> {
    band_data.validate()?;
    let static_dielectric = require_positive(
        IonizedImpurityScattering::NAME,
        "static_dielectric",
        materials.static_dielectric,
    )?;
    let donor_charge = materials.donor_charge.unwrap_or(1.0);
    let acceptor_charge = materials.acceptor_charge.unwrap_or(1.0);

    let beta_sq = calculate_inverse_screening_length_sq(band_data, static_dielectric);
    info!(
        ndops = band_data.ndops(),
        ntemps = band_data.ntemps(),
        "Calculated inverse screening lengths."
    );

    let mut entries = Vec::with_capacity(band_data.ndops() * band_data.ntemps());
    for n in 0..band_data.ndops() {
        for t in 0..band_data.ntemps() {
            let n_ii = band_data.electron_conc[(n, t)].abs() * donor_charge.powi(2)
                + band_data.hole_conc[(n, t)].abs() * acceptor_charge.powi(2);
            entries.push(ScreeningEntry {
                doping_cm3: per_bohr3_to_per_cm3(band_data.doping[n]),
                temperature: band_data.temperatures[t],
                inverse_screening_length_sq: beta_sq[(n, t)],
                impurity_concentration_cm3: per_bohr3_to_per_cm3(n_ii),
            });
        }
    }
    Ok(entries)
}
