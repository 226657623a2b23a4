use crate::core::constants::{
    BOHR_TO_ANGSTROM, EV_TO_HARTREE, HARTREE_TO_EV, per_cm3_to_per_bohr3,
};
use crate::core::models::band_data::{BandData, BandDataError, SpinBands};
use crate::core::models::dos::{Dos, DosError};
use crate::core::models::lattice::{Lattice, LatticeError};
use crate::core::models::spin::{ParseSpinError, Spin};
use nalgebra::{DMatrix, Vector3};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum BandDataFileError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Row {row} of '{field}' has {found} values, expected {expected}")]
    Ragged {
        field: String,
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("No density of states given: set either a [dos] table or 'dos-file'")]
    MissingDos,
    #[error("Both a [dos] table and 'dos-file' are set; use only one")]
    AmbiguousDos,
    #[error(transparent)]
    Dos(#[from] DosError),
    #[error(transparent)]
    Lattice(#[from] LatticeError),
    #[error(transparent)]
    Spin(#[from] ParseSpinError),
    #[error("Band energies for spin {0} are given more than once")]
    DuplicateSpin(Spin),
    #[error("Invalid band data: {0}")]
    Invalid(#[from] BandDataError),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawBandData {
    #[serde(default)]
    is_metal: bool,
    doping: Vec<f64>,
    temperatures: Vec<f64>,
    fermi_levels: Vec<Vec<f64>>,
    electron_conc: Vec<Vec<f64>>,
    hole_conc: Vec<Vec<f64>>,
    lattice: [[f64; 3]; 3],
    kpoints: Vec<[f64; 3]>,
    dos: Option<RawDos>,
    dos_file: Option<PathBuf>,
    bands: BTreeMap<String, RawSpinBands>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDos {
    energies: Vec<f64>,
    total: Vec<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawSpinBands {
    vb_index: usize,
    energies: Vec<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct DosRecord {
    energy: f64,
    dos: f64,
}

/// Reader for band data files.
///
/// The TOML layout uses laboratory units: energies in eV, the lattice in Å,
/// concentrations in cm⁻³ and the DOS in states/eV per cell. Values are
/// converted to atomic units on load.
///
/// ```toml
/// is-metal = false
/// doping = [1e18, -1e18]
/// temperatures = [300.0]
/// fermi-levels = [[0.9], [0.1]]
/// electron-conc = [[1e18], [1e2]]
/// hole-conc = [[1e2], [1e18]]
/// lattice = [[5.4, 0.0, 0.0], [0.0, 5.4, 0.0], [0.0, 0.0, 5.4]]
/// kpoints = [[0.0, 0.0, 0.0], [0.5, 0.0, 0.0]]
/// dos-file = "dos.csv"
///
/// [bands.up]
/// vb-index = 0
/// energies = [[0.0, -0.4], [1.1, 1.5]]
/// ```
pub struct BandDataFile;

impl BandDataFile {
    pub fn read_from_path(path: &Path) -> Result<BandData, BandDataFileError> {
        let content = std::fs::read_to_string(path).map_err(|e| BandDataFileError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let data = Self::read_from_str(&content, base_dir)?;
        debug!(
            path = %path.display(),
            ndops = data.ndops(),
            ntemps = data.ntemps(),
            nkpoints = data.nkpoints(),
            "Loaded band data."
        );
        Ok(data)
    }

    /// Parses band data from TOML text; `dos-file` is resolved against `base_dir`.
    pub fn read_from_str(content: &str, base_dir: &Path) -> Result<BandData, BandDataFileError> {
        let raw: RawBandData = toml::from_str(content)?;

        let ntemps = raw.temperatures.len();
        let nkpoints = raw.kpoints.len();

        let dos = match (raw.dos, raw.dos_file) {
            (Some(_), Some(_)) => return Err(BandDataFileError::AmbiguousDos),
            (None, None) => return Err(BandDataFileError::MissingDos),
            (Some(table), None) => (table.energies, table.total),
            (None, Some(file)) => read_dos_csv(&base_dir.join(file))?,
        };
        let dos = Dos::new(
            dos.0.iter().map(|e| e * EV_TO_HARTREE).collect(),
            dos.1.iter().map(|d| d * HARTREE_TO_EV).collect(),
        )?;

        let lattice_rows = raw.lattice.map(|row| row.map(|x| x / BOHR_TO_ANGSTROM));

        let mut bands = BTreeMap::new();
        for (name, spin_bands) in raw.bands {
            let spin: Spin = name.parse()?;
            let energies = to_matrix(
                &format!("bands.{}.energies", name),
                &spin_bands.energies,
                nkpoints,
                EV_TO_HARTREE,
            )?;
            let previous = bands.insert(
                spin,
                SpinBands {
                    energies,
                    vb_index: spin_bands.vb_index,
                },
            );
            if previous.is_some() {
                return Err(BandDataFileError::DuplicateSpin(spin));
            }
        }

        let data = BandData {
            doping: raw
                .doping
                .iter()
                .map(|&d| per_cm3_to_per_bohr3(d))
                .collect(),
            temperatures: raw.temperatures,
            fermi_levels: to_matrix("fermi-levels", &raw.fermi_levels, ntemps, EV_TO_HARTREE)?,
            electron_conc: to_matrix(
                "electron-conc",
                &raw.electron_conc,
                ntemps,
                per_cm3_to_per_bohr3(1.0),
            )?,
            hole_conc: to_matrix(
                "hole-conc",
                &raw.hole_conc,
                ntemps,
                per_cm3_to_per_bohr3(1.0),
            )?,
            is_metal: raw.is_metal,
            structure: Lattice::from_rows(lattice_rows)?,
            dos,
            kpoints: raw
                .kpoints
                .iter()
                .map(|k| Vector3::new(k[0], k[1], k[2]))
                .collect(),
            bands,
        };
        data.validate()?;
        Ok(data)
    }
}

fn to_matrix(
    field: &str,
    rows: &[Vec<f64>],
    ncols: usize,
    scale: f64,
) -> Result<DMatrix<f64>, BandDataFileError> {
    if let Some((row, values)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
        return Err(BandDataFileError::Ragged {
            field: field.to_string(),
            row,
            expected: ncols,
            found: values.len(),
        });
    }
    Ok(DMatrix::from_fn(rows.len(), ncols, |i, j| rows[i][j] * scale))
}

fn read_dos_csv(path: &Path) -> Result<(Vec<f64>, Vec<f64>), BandDataFileError> {
    let csv_error = |e: csv::Error| BandDataFileError::Csv {
        path: path.to_string_lossy().to_string(),
        source: e,
    };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_error)?;

    let mut energies = Vec::new();
    let mut totals = Vec::new();
    for result in reader.deserialize::<DosRecord>() {
        let record = result.map_err(csv_error)?;
        energies.push(record.energy);
        totals.push(record.dos);
    }
    Ok((energies, totals))
}
