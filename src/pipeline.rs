//! End-to-end model construction
//!
//! Runs the stages in order: snapshot ingestion, run extraction, word model,
//! negative synthesis and feature population. The message file is read twice,
//! once for the word model and once for the counts.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::analytics::{populate_from_file, NegativeSynthesizer, RunExtractor, WordFrequencyModel};
use crate::config::ModelConfig;
use crate::error::{Error, Result};
use crate::ingest::{Stopwords, TrendIngestor};
use crate::models::TrendModel;

/// Builds a [`TrendModel`] from a tweet file and a trend snapshot file
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    config: ModelConfig,
    stopwords: Stopwords,
}

impl ModelBuilder {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            stopwords: Stopwords::new(),
        }
    }

    /// Set words to leave out of negative trend names
    pub fn with_stopwords(mut self, stopwords: Stopwords) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Random source for negative synthesis, seeded from config when set
    fn rng(&self) -> ChaCha8Rng {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        tracing::info!(seed, "Seeding negative trend sampler");
        ChaCha8Rng::seed_from_u64(seed)
    }

    /// Build the model, failing with [`Error::Config`] on an invalid config
    pub fn build(&self, tweets: &Path, trends: &Path) -> Result<TrendModel> {
        let mut rng = self.rng();
        self.build_with_rng(tweets, trends, &mut rng)
    }

    pub fn build_with_rng<R: Rng + ?Sized>(
        &self,
        tweets: &Path,
        trends: &Path,
        rng: &mut R,
    ) -> Result<TrendModel> {
        self.config.validate()?;

        let file = File::open(trends)
            .map_err(|e| Error::with_source(format!("Failed to open {}", trends.display()), e))?;
        let twitter_trends = TrendIngestor::ingest(
            BufReader::new(file),
            &trends.display().to_string(),
            self.config.window_size,
        )?;

        let positive = RunExtractor::new(self.config.minimum_trend_size, self.config.trend_preempt)
            .extract(&twitter_trends);
        if positive.is_empty() {
            return Err(Error::empty_model(format!(
                "no trend in {} lasted {} consecutive windows",
                trends.display(),
                self.config.minimum_trend_size
            )));
        }

        let words = WordFrequencyModel::from_file(tweets, &self.stopwords)?;
        let negative = NegativeSynthesizer::new(&words, &self.config)
            .construct_negative_trends(&positive, rng)?;

        let mut all = positive;
        all.extend(negative);
        populate_from_file(&mut all, tweets)?;

        let model = TrendModel::from_trends(all);
        tracing::info!(
            positive = model.positive_count(),
            negative = model.negative_count(),
            "Model built"
        );
        Ok(model)
    }
}
