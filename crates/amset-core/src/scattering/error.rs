use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ScatteringError {
    #[error("{mechanism} scattering requires the '{property}' material property")]
    MissingProperty {
        mechanism: &'static str,
        property: &'static str,
    },

    #[error("Invalid '{property}' for {mechanism} scattering: {reason}")]
    InvalidProperty {
        mechanism: &'static str,
        property: &'static str,
        reason: String,
    },

    #[error("Unknown scattering mechanism '{0}'. Expected one of ADP, IMP, PIE.")]
    UnknownMechanism(String),
}
