use crate::core::constants::{BOLTZMANN, FOUR_PI};
use crate::core::models::band_data::BandData;
use crate::core::stats::{fermi_dirac, trapz};
use nalgebra::DMatrix;

/// Inverse screening length squared, β², in bohr⁻² for every
/// (doping, temperature) pair.
///
/// β² = 4π / (ε k_B T V) · ∫ g(E) f(E) [1 − f(E)] dE
///
/// where g is the total DOS of the cell, f the Fermi–Dirac occupation at the
/// pair's Fermi level and V the cell volume.
pub fn calculate_inverse_screening_length_sq(
    band_data: &BandData,
    static_dielectric: f64,
) -> DMatrix<f64> {
    let energies = band_data.dos.energies();
    let tdos = band_data.dos.total();
    let volume = band_data.structure.volume();

    DMatrix::from_fn(band_data.ndops(), band_data.ntemps(), |n, t| {
        let ef = band_data.fermi_levels[(n, t)];
        let temp = band_data.temperatures[t];
        let kt = temp * BOLTZMANN;

        let integrand: Vec<f64> = energies
            .iter()
            .zip(tdos)
            .map(|(&e, &g)| {
                let f = fermi_dirac(e, ef, kt);
                g * f * (1.0 - f)
            })
            .collect();
        let integral = trapz(&integrand, energies);

        integral * FOUR_PI / (static_dielectric * BOLTZMANN * temp * volume)
    })
}
