//! Dynamic time warping distance
//!
//! Classic DTW over the three-feature vector of each cell, using squared
//! weighted differences as the local cost. An alternative to the
//! sliding-window metric for series that drift in speed.

use super::TrendDistance;
use crate::models::{FeatureWeights, TrendCell, TrendLine};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DynamicTimeWarping {
    pub weights: FeatureWeights,
}

impl DynamicTimeWarping {
    pub fn new(weights: FeatureWeights) -> Self {
        Self { weights }
    }

    /// `sum_k w_k * (a_k - b_k)^2`
    pub fn local_cost(&self, a: &TrendCell, b: &TrendCell) -> f64 {
        let (fa, fb) = (a.features(), b.features());
        self.weights
            .as_array()
            .iter()
            .zip(fa.iter().zip(fb.iter()))
            .map(|(w, (x, y))| w * (x - y) * (x - y))
            .sum()
    }

    /// Cumulative warping cost between two cell sequences
    ///
    /// Two empty sequences cost nothing; an empty sequence cannot be warped
    /// onto a non-empty one, so that case is infinite.
    pub fn warp(&self, a: &[TrendCell], b: &[TrendCell]) -> f64 {
        match (a.is_empty(), b.is_empty()) {
            (true, true) => return 0.0,
            (true, false) | (false, true) => return f64::INFINITY,
            _ => {}
        }

        // Two rows of the cumulative cost matrix, indexed by position in `b`
        let mut prev = Vec::with_capacity(b.len());
        let mut running = 0.0;
        for cell in b {
            running += self.local_cost(&a[0], cell);
            prev.push(running);
        }

        let mut curr = vec![0.0; b.len()];
        for x in &a[1..] {
            curr[0] = prev[0] + self.local_cost(x, &b[0]);
            for j in 1..b.len() {
                let best = prev[j].min(curr[j - 1]).min(prev[j - 1]);
                curr[j] = self.local_cost(x, &b[j]) + best;
            }
            std::mem::swap(&mut prev, &mut curr);
        }

        prev[b.len() - 1]
    }
}

impl TrendDistance for DynamicTimeWarping {
    fn distance(&self, a: &TrendLine, b: &TrendLine) -> f64 {
        self.warp(&a.data, &b.data)
    }

    fn name(&self) -> &'static str {
        "dtw"
    }
}
