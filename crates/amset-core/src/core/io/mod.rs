//! Reading band data files and writing scattering rate tables.

pub mod band_data;
pub mod rates;
