//! # Workflows Module
//!
//! Top-level entry points: each workflow takes loaded band data and a
//! configuration and returns finished results.
//!
//! - **Rates Workflow** ([`rates`]) - Mechanism selection and construction followed by the
//!   elastic rate integration
//! - **Screening Workflow** ([`screening`]) - Inverse screening lengths and impurity
//!   concentrations for every doping and temperature

pub mod rates;
pub mod screening;
