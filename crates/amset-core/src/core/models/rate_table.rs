use super::spin::Spin;
use nalgebra::DMatrix;

/// Scattering rates of one electronic state, one (doping × temperature)
/// matrix per mechanism in the order of [`RateTable::mechanisms`].
#[derive(Debug, Clone, PartialEq)]
pub struct StateRates {
    pub spin: Spin,
    pub band: usize,
    pub kpoint: usize,
    pub by_mechanism: Vec<DMatrix<f64>>,
}

impl StateRates {
    /// Sum over all mechanisms (Matthiessen's rule).
    pub fn total(&self) -> Option<DMatrix<f64>> {
        let mut iter = self.by_mechanism.iter();
        let first = iter.next()?.clone();
        Some(iter.fold(first, |acc, m| acc + m))
    }
}

/// Elastic scattering rates in s⁻¹ for every (spin, band, k-point).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    pub mechanisms: Vec<&'static str>,
    pub states: Vec<StateRates>,
}

impl RateTable {
    pub fn new(mechanisms: Vec<&'static str>) -> Self {
        Self {
            mechanisms,
            states: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, spin: Spin, band: usize, kpoint: usize) -> Option<&StateRates> {
        self.states
            .iter()
            .find(|s| s.spin == spin && s.band == band && s.kpoint == kpoint)
    }

    pub fn mechanism_index(&self, name: &str) -> Option<usize> {
        self.mechanisms.iter().position(|m| m.eq_ignore_ascii_case(name))
    }

    /// Orders states by spin, band and k-point.
    pub fn sort(&mut self) {
        self.states
            .sort_by(|a, b| (a.spin, a.band, a.kpoint).cmp(&(b.spin, b.band, b.kpoint)));
    }
}
