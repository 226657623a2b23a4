//! # Engine Module
//!
//! The computational layer that turns band data and scattering mechanisms
//! into per-state scattering rates.
//!
//! - **Configuration** ([`config`]) - Material properties, mechanism selection and
//!   integration settings, assembled through a validating builder
//! - **Rate Integration** ([`rates`]) - The k-point loop that sums mechanism factors over
//!   energy-conserving final states, parallelized with rayon when the `parallel`
//!   feature is enabled
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events for front ends
//! - **Error Handling** ([`error`]) - Engine-level error type wrapping every lower layer

pub mod config;
pub mod error;
pub mod progress;
pub mod rates;
