//! # Core Models Module
//!
//! Data structures describing the electronic structure that the scattering
//! models operate on.
//!
//! - [`spin`] - Spin channels
//! - [`lattice`] - Real and reciprocal lattice, k-point distances
//! - [`dos`] - Total density of states
//! - [`band_data`] - Band energies, k-points and carrier statistics on the
//!   (doping, temperature) grid
//! - [`rate_table`] - Scattering rates per electronic state

pub mod band_data;
pub mod dos;
pub mod lattice;
pub mod rate_table;
pub mod spin;
