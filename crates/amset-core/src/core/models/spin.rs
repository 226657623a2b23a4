use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spin {
    Up,
    Down,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid spin channel '{0}'. Expected 'up' or 'down'.")]
pub struct ParseSpinError(String);

impl FromStr for Spin {
    type Err = ParseSpinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" | "1" => Ok(Spin::Up),
            "down" | "-1" => Ok(Spin::Down),
            _ => Err(ParseSpinError(s.to_string())),
        }
    }
}

impl fmt::Display for Spin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spin::Up => write!(f, "up"),
            Spin::Down => write!(f, "down"),
        }
    }
}
