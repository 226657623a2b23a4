use std::ops::Index;

/// Dense (doping, temperature, q-point) grid returned by
/// [`ElasticScattering::factor`](super::ElasticScattering::factor).
#[derive(Debug, Clone, PartialEq)]
pub struct ScatteringFactor {
    ndops: usize,
    ntemps: usize,
    nq: usize,
    data: Vec<f64>,
}

impl ScatteringFactor {
    pub fn filled(ndops: usize, ntemps: usize, nq: usize, value: f64) -> Self {
        Self {
            ndops,
            ntemps,
            nq,
            data: vec![value; ndops * ntemps * nq],
        }
    }

    pub fn from_fn<F>(ndops: usize, ntemps: usize, nq: usize, f: F) -> Self
    where
        F: Fn(usize, usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(ndops * ntemps * nq);
        for n in 0..ndops {
            for t in 0..ntemps {
                for k in 0..nq {
                    data.push(f(n, t, k));
                }
            }
        }
        Self {
            ndops,
            ntemps,
            nq,
            data,
        }
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        (self.ndops, self.ntemps, self.nq)
    }

    #[inline]
    pub fn get(&self, n: usize, t: usize, k: usize) -> Option<f64> {
        if n < self.ndops && t < self.ntemps && k < self.nq {
            Some(self.data[self.offset(n, t, k)])
        } else {
            None
        }
    }

    /// Values along the q axis for one (doping, temperature) pair.
    pub fn q_slice(&self, n: usize, t: usize) -> &[f64] {
        let start = self.offset(n, t, 0);
        &self.data[start..start + self.nq]
    }

    #[inline]
    fn offset(&self, n: usize, t: usize, k: usize) -> usize {
        (n * self.ntemps + t) * self.nq + k
    }
}

impl Index<(usize, usize, usize)> for ScatteringFactor {
    type Output = f64;

    fn index(&self, (n, t, k): (usize, usize, usize)) -> &f64 {
        &self.data[self.offset(n, t, k)]
    }
}
