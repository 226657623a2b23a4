use amset::core::materials::DeformationPotential;
use amset::engine::config::MechanismSelection;
use amset::scattering::ScatteringType;
use amset::scattering::error::ScatteringError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),

    #[error("Invalid float value for {key}: {value}")]
    InvalidFloat { key: String, value: String },

    #[error(
        "Invalid deformation potential '{0}'. Expected a single value (e.g., '8.6') or a valence,conduction pair (e.g., '8.6,6.5')."
    )]
    InvalidDeformationPotential(String),

    #[error("Mechanism list cannot be empty. Use 'auto' to select by available properties.")]
    EmptyMechanismList,

    #[error(transparent)]
    Mechanism(#[from] ScatteringError),
}

pub fn parse_key_value(pair: &str) -> Result<(&str, &str), ParseError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(ParseError::InvalidKeyValue(pair.to_string())),
    }
}

pub fn parse_float(key: &str, value: &str) -> Result<f64, ParseError> {
    value.trim().parse().map_err(|_| ParseError::InvalidFloat {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Parses `auto` or a comma-separated list of mechanism names.
pub fn parse_mechanisms(text: &str) -> Result<MechanismSelection, ParseError> {
    if text.trim().eq_ignore_ascii_case("auto") {
        return Ok(MechanismSelection::Auto);
    }
    let names: Vec<&str> = text.split(',').filter(|s| !s.trim().is_empty()).collect();
    parse_mechanism_names(&names)
}

pub fn parse_mechanism_names<S: AsRef<str>>(names: &[S]) -> Result<MechanismSelection, ParseError> {
    if names.is_empty() {
        return Err(ParseError::EmptyMechanismList);
    }
    let types = names
        .iter()
        .map(|name| name.as_ref().parse::<ScatteringType>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MechanismSelection::Explicit(types))
}

pub fn parse_deformation_potential(value: &str) -> Result<DeformationPotential, ParseError> {
    let invalid = || ParseError::InvalidDeformationPotential(value.to_string());
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let numbers = parts
        .iter()
        .map(|p| p.parse::<f64>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;
    match numbers.as_slice() {
        [single] => Ok(DeformationPotential::Single(*single)),
        [valence, conduction] => Ok(DeformationPotential::Pair(*valence, *conduction)),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_value_splits_on_first_equals() {
        assert_eq!(
            parse_key_value("scattering.mechanisms=ADP,IMP"),
            Ok(("scattering.mechanisms", "ADP,IMP"))
        );
        assert_eq!(parse_key_value(" a = b=c "), Ok(("a", "b=c")));
    }

    #[test]
    fn key_value_rejects_missing_separator_or_key() {
        assert!(matches!(
            parse_key_value("scattering.mechanisms"),
            Err(ParseError::InvalidKeyValue(_))
        ));
        assert!(matches!(
            parse_key_value("=5"),
            Err(ParseError::InvalidKeyValue(_))
        ));
    }

    #[test]
    fn mechanisms_accepts_auto_in_any_case() {
        assert_eq!(parse_mechanisms("AUTO"), Ok(MechanismSelection::Auto));
        assert_eq!(parse_mechanisms(" auto "), Ok(MechanismSelection::Auto));
    }

    #[test]
    fn mechanisms_parses_comma_separated_list() {
        assert_eq!(
            parse_mechanisms("adp, PIE"),
            Ok(MechanismSelection::Explicit(vec![
                ScatteringType::Adp,
                ScatteringType::Pie
            ]))
        );
    }

    #[test]
    fn mechanisms_rejects_empty_and_unknown_entries() {
        assert_eq!(parse_mechanisms(" , "), Err(ParseError::EmptyMechanismList));
        assert_eq!(
            parse_mechanisms("ADP,POP"),
            Err(ParseError::Mechanism(ScatteringError::UnknownMechanism(
                "POP".to_string()
            )))
        );
    }

    #[test]
    fn deformation_potential_accepts_single_or_pair() {
        assert_eq!(
            parse_deformation_potential("8.6"),
            Ok(DeformationPotential::Single(8.6))
        );
        assert_eq!(
            parse_deformation_potential("8.6, 6.5"),
            Ok(DeformationPotential::Pair(8.6, 6.5))
        );
        assert!(parse_deformation_potential("1,2,3").is_err());
        assert!(parse_deformation_potential("abc").is_err());
    }
}
