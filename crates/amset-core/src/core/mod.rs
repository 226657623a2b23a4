//! # Core Module
//!
//! The stateless foundation of the library: physical constants, statistical
//! helpers, the electronic-structure data model, material properties and file
//! I/O.
//!
//! ## Unit Conventions
//!
//! Everything inside the library is in Hartree atomic units. Band energies and
//! Fermi levels are in Hartree, lengths in bohr and carrier concentrations in
//! bohr⁻³. The [`io`] layer converts from the laboratory units used in input
//! files (eV, Å, cm⁻³) and back when writing results.
//!
//! ## Key Components
//!
//! - [`constants`] - CODATA constants and unit conversion factors
//! - [`stats`] - Fermi–Dirac occupation, trapezoidal integration, Gaussian broadening
//! - [`models`] - Lattice, density of states, band data and rate tables
//! - [`materials`] - Material constants required by the scattering mechanisms
//! - [`io`] - Band data reader and rate table writer

pub mod constants;
pub mod io;
pub mod materials;
pub mod models;
pub mod stats;
