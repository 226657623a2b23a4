use super::dos::Dos;
use super::lattice::Lattice;
use super::spin::Spin;
use nalgebra::{DMatrix, Vector3};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BandDataError {
    #[error("'{0}' must not be empty")]
    Empty(&'static str),
    #[error("'{field}' has shape {found:?}, expected {expected:?} (doping × temperature)")]
    Shape {
        field: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("Temperatures must be positive and finite, found {0} K")]
    NonPositiveTemperature(f64),
    #[error("Band energies for spin {spin} cover {found} k-points, expected {expected}")]
    KpointCount {
        spin: Spin,
        expected: usize,
        found: usize,
    },
    #[error("Valence band index {vb_index} for spin {spin} is out of range ({nbands} bands)")]
    VbIndexOutOfRange {
        spin: Spin,
        vb_index: usize,
        nbands: usize,
    },
}

/// Band energies for one spin channel.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinBands {
    /// Energies in Hartree, one row per band and one column per k-point.
    pub energies: DMatrix<f64>,
    /// Index of the highest valence band.
    pub vb_index: usize,
}

impl SpinBands {
    pub fn nbands(&self) -> usize {
        self.energies.nrows()
    }
}

/// Electronic structure and carrier statistics on a (doping, temperature) grid.
///
/// All quantities are in atomic units: energies in Hartree, lengths in bohr and
/// concentrations in bohr⁻³. `fermi_levels`, `electron_conc` and `hole_conc`
/// have one row per doping level and one column per temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct BandData {
    pub doping: Vec<f64>,
    pub temperatures: Vec<f64>,
    pub fermi_levels: DMatrix<f64>,
    pub electron_conc: DMatrix<f64>,
    pub hole_conc: DMatrix<f64>,
    pub is_metal: bool,
    pub structure: Lattice,
    pub dos: Dos,
    /// k-points in fractional reciprocal coordinates.
    pub kpoints: Vec<Vector3<f64>>,
    pub bands: BTreeMap<Spin, SpinBands>,
}

impl BandData {
    pub fn ndops(&self) -> usize {
        self.doping.len()
    }

    pub fn ntemps(&self) -> usize {
        self.temperatures.len()
    }

    pub fn nkpoints(&self) -> usize {
        self.kpoints.len()
    }

    pub fn spins(&self) -> impl Iterator<Item = Spin> + '_ {
        self.bands.keys().copied()
    }

    pub fn nbands(&self, spin: Spin) -> usize {
        self.bands.get(&spin).map_or(0, SpinBands::nbands)
    }

    pub fn vb_index(&self, spin: Spin) -> Option<usize> {
        self.bands.get(&spin).map(|b| b.vb_index)
    }

    pub fn validate(&self) -> Result<(), BandDataError> {
        if self.doping.is_empty() {
            return Err(BandDataError::Empty("doping"));
        }
        if self.temperatures.is_empty() {
            return Err(BandDataError::Empty("temperatures"));
        }
        if let Some(&t) = self.temperatures.iter().find(|&&t| !(t.is_finite() && t > 0.0)) {
            return Err(BandDataError::NonPositiveTemperature(t));
        }

        let expected = (self.ndops(), self.ntemps());
        for (field, grid) in [
            ("fermi-levels", &self.fermi_levels),
            ("electron-conc", &self.electron_conc),
            ("hole-conc", &self.hole_conc),
        ] {
            if grid.shape() != expected {
                return Err(BandDataError::Shape {
                    field,
                    expected,
                    found: grid.shape(),
                });
            }
        }

        if self.kpoints.is_empty() {
            return Err(BandDataError::Empty("kpoints"));
        }
        if self.bands.is_empty() {
            return Err(BandDataError::Empty("bands"));
        }
        for (&spin, bands) in &self.bands {
            if bands.energies.ncols() != self.nkpoints() {
                return Err(BandDataError::KpointCount {
                    spin,
                    expected: self.nkpoints(),
                    found: bands.energies.ncols(),
                });
            }
            if !self.is_metal && bands.vb_index >= bands.nbands() {
                return Err(BandDataError::VbIndexOutOfRange {
                    spin,
                    vb_index: bands.vb_index,
                    nbands: bands.nbands(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Two doping levels, two temperatures, one spin channel with a valence and
    /// a conduction band sampled on four k-points along x of a cubic cell.
    pub(crate) fn simple_band_data(is_metal: bool) -> BandData {
        let energies: Vec<f64> = (0..=200).map(|i| -0.5 + i as f64 * 0.005).collect();
        let total = vec![10.0; energies.len()];

        let mut bands = BTreeMap::new();
        bands.insert(
            Spin::Up,
            SpinBands {
                energies: DMatrix::from_row_slice(
                    2,
                    4,
                    &[-0.10, -0.11, -0.12, -0.11, 0.10, 0.11, 0.12, 0.11],
                ),
                vb_index: 0,
            },
        );

        BandData {
            doping: vec![1e-6, -1e-6],
            temperatures: vec![300.0, 600.0],
            fermi_levels: DMatrix::from_row_slice(2, 2, &[0.05, 0.04, -0.05, -0.04]),
            electron_conc: DMatrix::from_row_slice(2, 2, &[1e-6, 1.1e-6, 1e-9, 1e-8]),
            hole_conc: DMatrix::from_row_slice(2, 2, &[1e-9, 1e-8, 1e-6, 1.1e-6]),
            is_metal,
            structure: Lattice::from_rows([[10.0, 0.0, 0.0], [0.0, 10.0, 0.0], [0.0, 0.0, 10.0]])
                .unwrap(),
            dos: Dos::new(energies, total).unwrap(),
            kpoints: vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(0.25, 0.0, 0.0),
                Vector3::new(0.5, 0.0, 0.0),
                Vector3::new(0.75, 0.0, 0.0),
            ],
            bands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::simple_band_data;
    use super::*;

    #[test]
    fn fixture_is_valid() {
        assert_eq!(simple_band_data(false).validate(), Ok(()));
    }

    #[test]
    fn accessors_report_grid_dimensions() {
        let data = simple_band_data(false);
        assert_eq!(data.ndops(), 2);
        assert_eq!(data.ntemps(), 2);
        assert_eq!(data.nkpoints(), 4);
        assert_eq!(data.spins().collect::<Vec<_>>(), vec![Spin::Up]);
        assert_eq!(data.nbands(Spin::Up), 2);
        assert_eq!(data.nbands(Spin::Down), 0);
        assert_eq!(data.vb_index(Spin::Up), Some(0));
    }

    #[test]
    fn validate_rejects_non_positive_temperature() {
        let mut data = simple_band_data(false);
        data.temperatures[1] = 0.0;
        assert_eq!(
            data.validate(),
            Err(BandDataError::NonPositiveTemperature(0.0))
        );
    }

    #[test]
    fn validate_rejects_nan_and_infinite_temperatures() {
        for bad in [f64::NAN, f64::INFINITY] {
            let mut data = simple_band_data(false);
            data.temperatures[0] = bad;
            assert!(matches!(
                data.validate(),
                Err(BandDataError::NonPositiveTemperature(_))
            ));
        }
    }

    #[test]
    fn validate_rejects_mismatched_fermi_level_grid() {
        let mut data = simple_band_data(false);
        data.fermi_levels = DMatrix::zeros(1, 2);
        assert_eq!(
            data.validate(),
            Err(BandDataError::Shape {
                field: "fermi-levels",
                expected: (2, 2),
                found: (1, 2),
            })
        );
    }

    #[test]
    fn validate_rejects_band_energies_with_wrong_kpoint_count() {
        let mut data = simple_band_data(false);
        data.kpoints.pop();
        assert!(matches!(
            data.validate(),
            Err(BandDataError::KpointCount {
                expected: 3,
                found: 4,
                ..
            })
        ));
    }

    #[test]
    fn validate_checks_vb_index_only_for_semiconductors() {
        let mut data = simple_band_data(false);
        data.bands.get_mut(&Spin::Up).unwrap().vb_index = 5;
        assert!(matches!(
            data.validate(),
            Err(BandDataError::VbIndexOutOfRange { .. })
        ));

        data.is_metal = true;
        assert_eq!(data.validate(), Ok(()));
    }
}
