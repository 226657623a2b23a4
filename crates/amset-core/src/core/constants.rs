//! Physical constants and unit conversions.
//!
//! SI values follow CODATA 2018. Everything the scattering models compute
//! internally is in Hartree atomic units, so the conversion factors below
//! are what the I/O layer uses to move user-facing quantities (eV, Å,
//! cm⁻³, GPa) into that system.

use std::f64::consts::PI;

/// Elementary charge in coulombs.
pub const E: f64 = 1.602_176_634e-19;

/// Reduced Planck constant in J·s.
pub const HBAR: f64 = 1.054_571_817e-34;

/// Boltzmann constant in J/K.
pub const K_B: f64 = 1.380_649e-23;

/// Vacuum permittivity in F/m.
pub const EPSILON_0: f64 = 8.854_187_812_8e-12;

/// Hartree energy in electron volts.
pub const HARTREE_TO_EV: f64 = 27.211_386_245_988;

/// Hartree energy in joules.
pub const HARTREE_TO_JOULE: f64 = 4.359_744_722_207_1e-18;

/// One electron volt expressed in Hartree.
pub const EV_TO_HARTREE: f64 = 1.0 / HARTREE_TO_EV;

/// Atomic unit of time in seconds.
pub const AU_TIME_TO_SECOND: f64 = 2.418_884_326_585_7e-17;

/// One second expressed in atomic units of time.
pub const SECOND: f64 = 1.0 / AU_TIME_TO_SECOND;

/// Boltzmann constant in Hartree/K.
pub const BOLTZMANN: f64 = K_B / HARTREE_TO_JOULE;

pub const BOHR_TO_M: f64 = 5.291_772_109_03e-11;
pub const BOHR_TO_CM: f64 = BOHR_TO_M * 100.0;
pub const BOHR_TO_ANGSTROM: f64 = BOHR_TO_M * 1e10;

/// One GPa expressed in Hartree/bohr³.
pub const GPA_TO_AU: f64 = 1e9 * BOHR_TO_M * BOHR_TO_M * BOHR_TO_M / HARTREE_TO_JOULE;

/// Converts a carrier concentration in cm⁻³ to bohr⁻³.
#[inline]
pub fn per_cm3_to_per_bohr3(value: f64) -> f64 {
    value * BOHR_TO_CM.powi(3)
}

/// Converts a carrier concentration in bohr⁻³ to cm⁻³.
#[inline]
pub fn per_bohr3_to_per_cm3(value: f64) -> f64 {
    value * (1.0 / BOHR_TO_CM).powi(3)
}

pub(crate) const FOUR_PI: f64 = 4.0 * PI;
pub(crate) const FOUR_PI_SQ: f64 = 4.0 * PI * PI;

#[cfg(test)]
mod tests {
    use super::*;

    fn rel_approx_equal(a: f64, b: f64, rel: f64) -> bool {
        ((a - b) / b).abs() < rel
    }

    #[test]
    fn boltzmann_in_hartree_matches_reference_value() {
        assert!(rel_approx_equal(BOLTZMANN, 3.166_811_563e-6, 1e-8));
    }

    #[test]
    fn gpa_to_au_matches_atomic_unit_of_pressure() {
        let atomic_unit_of_pressure_pa = 2.942_101_569_7e13;
        assert!(rel_approx_equal(GPA_TO_AU, 1e9 / atomic_unit_of_pressure_pa, 1e-8));
    }

    #[test]
    fn bohr_to_angstrom_matches_reference_value() {
        assert!(rel_approx_equal(BOHR_TO_ANGSTROM, 0.529_177_210_903, 1e-12));
    }

    #[test]
    fn concentration_conversions_are_inverse() {
        let conc = 1e18;
        let back = per_bohr3_to_per_cm3(per_cm3_to_per_bohr3(conc));
        assert!(rel_approx_equal(back, conc, 1e-12));
    }

    #[test]
    fn second_is_inverse_of_atomic_time() {
        assert!(rel_approx_equal(SECOND * AU_TIME_TO_SECOND, 1.0, 1e-15));
    }
}
