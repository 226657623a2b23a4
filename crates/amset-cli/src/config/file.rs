use crate::error::{CliError, Result};
use crate::utils::parser::{self, ParseError};
use amset::core::materials::MaterialProperties;
use amset::engine::config::MechanismSelection;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Mechanism selection as written in a settings file: either a string
/// (`"auto"` or `"ADP,IMP"`) or a list of names.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum FileMechanisms {
    Text(String),
    List(Vec<String>),
}

impl FileMechanisms {
    pub fn to_selection(&self) -> std::result::Result<MechanismSelection, ParseError> {
        match self {
            Self::Text(text) => parser::parse_mechanisms(text),
            Self::List(names) => parser::parse_mechanism_names(names),
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileScatteringConfig {
    pub mechanisms: Option<FileMechanisms>,
    /// eV.
    pub gaussian_width: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub materials: Option<MaterialProperties>,
    pub scattering: Option<FileScatteringConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
