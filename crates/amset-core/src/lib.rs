//! # AMSET Core Library
//!
//! Elastic electron scattering rates for semiconductors and metals, computed
//! from band energies on a k-point mesh and a small set of material
//! properties.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Physical constants, statistics helpers, the
//!   band data and rate table models, material properties and file I/O. All
//!   quantities are held in Hartree atomic units.
//!
//! - **[`scattering`]: The Physics.** The [`scattering::ElasticScattering`]
//!   trait and its implementations (acoustic deformation potential, ionized
//!   impurity and piezoelectric), plus the screening-length calculation they
//!   share.
//!
//! - **[`engine`]: The Integrator.** Configuration, progress reporting and the
//!   rate integration over the Brillouin zone.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that select and
//!   build mechanisms from a configuration and run the engine.

pub mod core;
pub mod engine;
pub mod scattering;
pub mod workflows;
