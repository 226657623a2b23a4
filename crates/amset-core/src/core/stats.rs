use std::f64::consts::PI;

/// Arguments of the exponential beyond this are treated as fully (un)occupied.
const FD_EXPONENT_LIMIT: f64 = 700.0;

/// Fermi–Dirac occupation of a state at `energy` for a given Fermi level and
/// thermal energy `kt` (all in the same energy unit).
#[inline]
pub fn fermi_dirac(energy: f64, fermi_level: f64, kt: f64) -> f64 {
    let x = (energy - fermi_level) / kt;
    if x > FD_EXPONENT_LIMIT {
        0.0
    } else if x < -FD_EXPONENT_LIMIT {
        1.0
    } else {
        1.0 / (x.exp() + 1.0)
    }
}

/// Integrates `y` over the sample points `x` with the trapezoidal rule.
///
/// Slices of different length are integrated over their common prefix.
pub fn trapz(y: &[f64], x: &[f64]) -> f64 {
    let n = y.len().min(x.len());
    (1..n)
        .map(|i| 0.5 * (y[i - 1] + y[i]) * (x[i] - x[i - 1]))
        .sum()
}

/// Normalized Gaussian used to broaden the energy-conserving delta function.
#[inline]
pub fn gaussian_delta(x: f64, width: f64) -> f64 {
    let z = x / width;
    (-0.5 * z * z).exp() / (width * (2.0 * PI).sqrt())
}
