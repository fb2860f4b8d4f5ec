//! Leave-one-out nearest-neighbor evaluation
//!
//! Each trend line is classified by the label of its nearest other line in
//! the model. Accuracy is the share of lines whose nearest neighbor carries
//! the same label. This is `O(T^2)` distance evaluations over `T` lines and is
//! meant for model sizes in the hundreds, not more.

use serde::{Deserialize, Serialize};

use crate::distance::TrendDistance;
use crate::error::{Error, Result};
use crate::models::TrendModel;

/// Closest other line for one line of the model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Index into the model's trends
    pub index: usize,
    pub distance: f64,
}

/// Outcome of a leave-one-out run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LooReport {
    pub total: usize,
    pub correct: usize,
    pub true_positives: usize,
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl LooReport {
    /// `correct / total`, in `[0, 1]`
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }

    fn record(&mut self, actual: bool, predicted: bool) {
        self.total += 1;
        match (actual, predicted) {
            (true, true) => self.true_positives += 1,
            (false, false) => self.true_negatives += 1,
            (false, true) => self.false_positives += 1,
            (true, false) => self.false_negatives += 1,
        }
        if actual == predicted {
            self.correct += 1;
        }
    }
}

/// Leave-one-out evaluator over any [`TrendDistance`]
#[derive(Debug, Clone)]
pub struct LeaveOneOut<D> {
    metric: D,
}

impl<D: TrendDistance> LeaveOneOut<D> {
    pub fn new(metric: D) -> Self {
        Self { metric }
    }

    pub fn metric(&self) -> &D {
        &self.metric
    }

    /// Nearest line to `index` other than itself, first one on ties
    pub fn nearest_neighbor(&self, model: &TrendModel, index: usize) -> Option<Neighbor> {
        let target = model.trends.get(index)?;
        let mut best: Option<Neighbor> = None;

        for (j, other) in model.iter().enumerate() {
            if j == index {
                continue;
            }
            let distance = self.metric.distance(target, other);
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(Neighbor { index: j, distance });
            }
        }

        best
    }

    /// Classify every line by its nearest neighbor
    pub fn evaluate(&self, model: &TrendModel) -> Result<LooReport> {
        if model.len() < 2 {
            return Err(Error::empty_model(format!(
                "leave-one-out needs at least 2 trendlines, model has {}",
                model.len()
            )));
        }

        let mut report = LooReport::default();
        for (i, trend) in model.iter().enumerate() {
            let Some(neighbor) = self.nearest_neighbor(model, i) else {
                continue;
            };
            let predicted = model.trends[neighbor.index].trending();
            tracing::debug!(
                name = %trend.name,
                neighbor = %model.trends[neighbor.index].name,
                distance = neighbor.distance,
                actual = trend.trending(),
                predicted,
                "Classified trendline"
            );
            report.record(trend.trending(), predicted);
        }

        tracing::info!(
            metric = self.metric.name(),
            total = report.total,
            correct = report.correct,
            accuracy = report.accuracy(),
            "Leave-one-out evaluation complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{DistanceMetric, SlidingWindow};
    use crate::models::TrendLine;

    fn single(name: &str, count: u64, trending: bool) -> TrendLine {
        let mut line = TrendLine::blank(name, 0, 120, 1, trending);
        line.data[0].count = count;
        line
    }

    #[test]
    fn test_hand_computed_accuracy() {
        let model = TrendModel::from_trends(vec![
            single("a", 0, true),
            single("b", 2, true),
            single("c", 10, false),
            single("d", 5, false),
        ]);
        let report = LeaveOneOut::new(SlidingWindow::default())
            .evaluate(&model)
            .unwrap();

        // a -> b, b -> a, c -> d, d -> b (wrong)
        assert_eq!(report.total, 4);
        assert_eq!(report.correct, 3);
        assert_eq!(report.true_positives, 2);
        assert_eq!(report.true_negatives, 1);
        assert_eq!(report.false_positives, 1);
        assert_eq!(report.false_negatives, 0);
        assert!((report.accuracy() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_identical_lines_with_different_labels() {
        let model = TrendModel::from_trends(vec![single("a", 3, true), single("b", 3, false)]);
        let report = LeaveOneOut::new(DistanceMetric::default())
            .evaluate(&model)
            .unwrap();
        assert_eq!(report.accuracy(), 0.0);
    }

    #[test]
    fn test_identical_lines_with_same_label() {
        let model = TrendModel::from_trends(vec![single("a", 3, false), single("b", 3, false)]);
        let report = LeaveOneOut::new(DistanceMetric::default())
            .evaluate(&model)
            .unwrap();
        assert_eq!(report.accuracy(), 1.0);
    }

    #[test]
    fn test_tie_picks_first_neighbor() {
        let model = TrendModel::from_trends(vec![
            single("x", 5, true),
            single("y", 4, false),
            single("z", 6, true),
        ]);
        let loo = LeaveOneOut::new(SlidingWindow::default());
        let neighbor = loo.nearest_neighbor(&model, 0).unwrap();
        assert_eq!(neighbor.index, 1);
        assert_eq!(neighbor.distance, 1.0);
    }

    #[test]
    fn test_too_small_model_is_error() {
        let loo = LeaveOneOut::new(SlidingWindow::default());
        assert!(matches!(
            loo.evaluate(&TrendModel::new()),
            Err(Error::EmptyModel { .. })
        ));
        let one = TrendModel::from_trends(vec![single("a", 1, true)]);
        assert!(matches!(loo.evaluate(&one), Err(Error::EmptyModel { .. })));
    }

    #[test]
    fn test_nearest_neighbor_out_of_range() {
        let model = TrendModel::from_trends(vec![single("a", 1, true)]);
        let loo = LeaveOneOut::new(SlidingWindow::default());
        assert!(loo.nearest_neighbor(&model, 0).is_none());
        assert!(loo.nearest_neighbor(&model, 5).is_none());
    }
}
