use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use twittp::config::Config;
use twittp::distance::{DistanceMetric, MetricKind};
use twittp::evaluation::LeaveOneOut;
use twittp::models::TrendModel;

/// Run leave-one-out evaluation on a saved model and write the accuracy to `out`
pub fn loo_test<W: Write>(
    out: &mut W,
    config: &Config,
    model_path: &Path,
    metric: Option<MetricKind>,
) -> Result<f64> {
    let model = TrendModel::load(model_path)
        .with_context(|| format!("Failed to load model from {}", model_path.display()))?;

    let kind = metric.unwrap_or(config.distance.metric);
    let metric = DistanceMetric::new(kind, config.distance.weights);
    let report = LeaveOneOut::new(metric)
        .evaluate(&model)
        .with_context(|| format!("Cannot evaluate {}", model_path.display()))?;

    tracing::info!(
        metric = %kind,
        true_positives = report.true_positives,
        true_negatives = report.true_negatives,
        false_positives = report.false_positives,
        false_negatives = report.false_negatives,
        "Confusion counts"
    );

    let accuracy = report.accuracy();
    writeln!(out, "{accuracy}")?;
    Ok(accuracy)
}
