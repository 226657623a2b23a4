use nalgebra::{Matrix3, Vector3};
use std::f64::consts::PI;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LatticeError {
    #[error("Lattice matrix is singular (volume {volume:e} bohr³)")]
    Singular { volume: f64 },
}

/// Real-space lattice with rows as lattice vectors, in bohr.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    matrix: Matrix3<f64>,
    reciprocal: Matrix3<f64>,
}

impl Lattice {
    pub fn new(matrix: Matrix3<f64>) -> Result<Self, LatticeError> {
        let volume = matrix.determinant().abs();
        if volume < 1e-12 {
            return Err(LatticeError::Singular { volume });
        }
        let inverse = matrix
            .try_inverse()
            .ok_or(LatticeError::Singular { volume })?;
        let reciprocal = inverse.transpose() * (2.0 * PI);
        Ok(Self { matrix, reciprocal })
    }

    pub fn from_rows(rows: [[f64; 3]; 3]) -> Result<Self, LatticeError> {
        Self::new(Matrix3::from_row_slice(&[
            rows[0][0], rows[0][1], rows[0][2], rows[1][0], rows[1][1], rows[1][2], rows[2][0],
            rows[2][1], rows[2][2],
        ]))
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// Cell volume in bohr³.
    pub fn volume(&self) -> f64 {
        self.matrix.determinant().abs()
    }

    /// Reciprocal lattice (rows are reciprocal vectors including the 2π factor), in bohr⁻¹.
    pub fn reciprocal_lattice(&self) -> &Matrix3<f64> {
        &self.reciprocal
    }

    /// Squared Cartesian length of a fractional k-point difference, after
    /// folding it back to the nearest periodic image.
    pub fn cartesian_q_sq(&self, frac_diff: &Vector3<f64>) -> f64 {
        let wrapped = frac_diff.map(|x| x - x.round());
        (self.reciprocal.transpose() * wrapped).norm_squared()
    }
}
