use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DosError {
    #[error("DOS energies ({energies}) and totals ({total}) have different lengths")]
    LengthMismatch { energies: usize, total: usize },
    #[error("DOS needs at least two energy points, found {0}")]
    TooFewPoints(usize),
    #[error("DOS energies must be strictly increasing (index {0})")]
    NotIncreasing(usize),
}

/// Total density of states on an energy grid, in atomic units (Hartree, states/Hartree).
#[derive(Debug, Clone, PartialEq)]
pub struct Dos {
    energies: Vec<f64>,
    total: Vec<f64>,
}

impl Dos {
    pub fn new(energies: Vec<f64>, total: Vec<f64>) -> Result<Self, DosError> {
        if energies.len() != total.len() {
            return Err(DosError::LengthMismatch {
                energies: energies.len(),
                total: total.len(),
            });
        }
        if energies.len() < 2 {
            return Err(DosError::TooFewPoints(energies.len()));
        }
        if let Some(idx) = energies.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(DosError::NotIncreasing(idx + 1));
        }
        Ok(Self { energies, total })
    }

    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    pub fn total(&self) -> &[f64] {
        &self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_matching_increasing_grid() {
        let dos = Dos::new(vec![0.0, 0.1, 0.2], vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(dos.energies().len(), 3);
        assert_eq!(dos.total()[2], 3.0);
    }

    #[test]
    fn new_rejects_length_mismatch() {
        let result = Dos::new(vec![0.0, 0.1], vec![1.0]);
        assert_eq!(
            result,
            Err(DosError::LengthMismatch {
                energies: 2,
                total: 1
            })
        );
    }

    #[test]
    fn new_rejects_non_increasing_energies() {
        let result = Dos::new(vec![0.0, 0.2, 0.1], vec![1.0, 1.0, 1.0]);
        assert_eq!(result, Err(DosError::NotIncreasing(2)));
    }

    #[test]
    fn new_rejects_nan_energies() {
        let result = Dos::new(vec![0.0, f64::NAN, 0.2], vec![1.0, 1.0, 1.0]);
        assert_eq!(result, Err(DosError::NotIncreasing(1)));
    }

    #[test]
    fn new_rejects_single_point() {
        assert_eq!(
            Dos::new(vec![0.0], vec![1.0]),
            Err(DosError::TooFewPoints(1))
        );
    }
}
