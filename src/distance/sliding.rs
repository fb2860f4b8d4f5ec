//! Sliding-window alignment distance
//!
//! The shorter line is laid over every contiguous stretch of the longer one
//! and the cheapest placement wins. There is no warping: cells are compared
//! one to one. Cost is `O(L_long * L_short)`.

use super::TrendDistance;
use crate::models::{FeatureWeights, TrendCell, TrendLine};

/// Best placement of the shorter line inside the longer one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alignment {
    /// Offset into the longer line
    pub offset: usize,
    pub distance: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SlidingWindow {
    pub weights: FeatureWeights,
}

impl SlidingWindow {
    pub fn new(weights: FeatureWeights) -> Self {
        Self { weights }
    }

    /// Summed cell distance of `short` placed at `offset` in `long`
    ///
    /// Stops early once the sum exceeds `bound`.
    fn placement_cost(
        &self,
        short: &[TrendCell],
        long: &[TrendCell],
        offset: usize,
        bound: f64,
    ) -> f64 {
        let mut total = 0.0;
        for (x, y) in short.iter().zip(&long[offset..]) {
            total += x.distance(y, &self.weights);
            if total > bound {
                break;
            }
        }
        total
    }

    /// Find the cheapest placement, first offset on ties
    pub fn best_alignment(&self, a: &TrendLine, b: &TrendLine) -> Alignment {
        let (short, long) = if a.len() <= b.len() {
            (&a.data, &b.data)
        } else {
            (&b.data, &a.data)
        };

        if short.is_empty() {
            return Alignment {
                offset: 0,
                distance: 0.0,
            };
        }

        let mut best = Alignment {
            offset: 0,
            distance: f64::INFINITY,
        };
        for offset in 0..=long.len() - short.len() {
            let cost = self.placement_cost(short, long, offset, best.distance);
            if cost < best.distance {
                best = Alignment {
                    offset,
                    distance: cost,
                };
            }
        }
        best
    }
}

impl TrendDistance for SlidingWindow {
    fn distance(&self, a: &TrendLine, b: &TrendLine) -> f64 {
        self.best_alignment(a, b).distance
    }

    fn name(&self) -> &'static str {
        "sliding-window"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(counts: &[u64]) -> TrendLine {
        let mut line = TrendLine::blank("t", 0, 120, counts.len(), false);
        for (cell, &count) in line.data.iter_mut().zip(counts) {
            cell.count = count;
        }
        line.compute_deltas();
        line
    }

    #[test]
    fn test_equal_length_single_offset() {
        let metric = SlidingWindow::default();
        let a = line(&[1, 2, 3]);
        let b = line(&[1, 2, 4]);
        // counts differ by 1 at the end, delta by 1, delta_delta by 1
        assert!((metric.distance(&a, &b) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_finds_embedded_pattern() {
        let metric = SlidingWindow::default();
        let mut short = line(&[0, 0, 0]);
        let mut long = line(&[9, 9, 0, 0, 0, 9]);
        // compare raw counts only
        for cell in short.data.iter_mut().chain(long.data.iter_mut()) {
            cell.delta = 0;
            cell.delta_delta = 0;
        }

        let alignment = metric.best_alignment(&short, &long);
        assert_eq!(alignment.offset, 2);
        assert_eq!(alignment.distance, 0.0);
        assert_eq!(metric.distance(&long, &short), 0.0);
    }

    #[test]
    fn test_self_distance_zero() {
        let metric = SlidingWindow::default();
        let a = line(&[5, 1, 8, 3, 3]);
        assert_eq!(metric.distance(&a, &a), 0.0);
    }

    #[test]
    fn test_empty_line() {
        let metric = SlidingWindow::default();
        let empty = line(&[]);
        let a = line(&[1, 2]);
        assert_eq!(metric.distance(&empty, &a), 0.0);
        assert_eq!(metric.distance(&empty, &empty), 0.0);
    }

    #[test]
    fn test_weights_scale_distance() {
        let a = line(&[4]);
        let b = line(&[1]);
        let metric = SlidingWindow::new(FeatureWeights {
            count: 2.0,
            delta: 1.0,
            delta_delta: 1.0,
        });
        assert!((metric.distance(&a, &b) - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_tie_keeps_first_offset() {
        let metric = SlidingWindow::default();
        let short = line(&[1]);
        let long = line(&[1, 1, 1]);
        // every placement costs zero
        assert_eq!(metric.best_alignment(&short, &long).offset, 0);
    }
}
