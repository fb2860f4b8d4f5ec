//! Synthetic non-trend construction
//!
//! Negative trends are made to look like the positive ones: their names are
//! drawn from the corpus vocabulary with frequency-proportional sampling, and
//! their spans reuse the positive lengths inside the positive time range.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::word_model::{WordFrequencyModel, WordSampler};
use crate::config::ModelConfig;
use crate::error::{Error, Result};
use crate::models::TrendLine;

/// Time range and lengths that negative spans are drawn from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanBounds {
    pub min_start: i64,
    pub max_end: i64,
    pub window_size: i64,
    /// Multiset of positive trend lengths
    pub lengths: Vec<usize>,
}

impl SpanBounds {
    /// Bounds covering all positive trends, `None` if there are none
    pub fn from_positive(positive: &[TrendLine], window_size: i64) -> Option<Self> {
        let min_start = positive.iter().map(|t| t.start_ts).min()?;
        let max_end = positive.iter().map(TrendLine::end_ts).max()?;
        Some(Self {
            min_start,
            max_end,
            window_size,
            lengths: positive.iter().map(TrendLine::len).collect(),
        })
    }

    /// Number of whole windows between `min_start` and `max_end`
    pub fn windows(&self) -> usize {
        ((self.max_end - self.min_start) / self.window_size).max(0) as usize
    }

    /// Draw a window-aligned `(start_ts, len)` inside the bounds
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> (i64, usize) {
        let windows = self.windows();
        let len = self.lengths.choose(rng).copied().unwrap_or(0).min(windows);
        let offset = rng.gen_range(0..=windows - len);
        (self.min_start + offset as i64 * self.window_size, len)
    }
}

/// Generates negative trend names and spans
#[derive(Debug, Clone)]
pub struct NegativeSynthesizer<'a> {
    sampler: Option<WordSampler<'a>>,
    min_words: usize,
    max_words: usize,
    max_attempts: usize,
    window_size: i64,
}

impl<'a> NegativeSynthesizer<'a> {
    pub fn new(words: &'a WordFrequencyModel, config: &ModelConfig) -> Self {
        Self {
            sampler: words.sampler(),
            min_words: config.min_name_words,
            max_words: config.max_name_words,
            max_attempts: config.max_name_attempts,
            window_size: config.window_size,
        }
    }

    fn check_name_range(&self) -> Result<()> {
        if self.min_words == 0 || self.min_words > self.max_words {
            return Err(Error::config(format!(
                "name word range {}..={} is empty",
                self.min_words, self.max_words
            )));
        }
        Ok(())
    }

    /// Draw `n` distinct names that match no positive trend name
    ///
    /// Each name is redrawn until it is unused. After `max_attempts` draws for
    /// a single name the search gives up with [`Error::SamplingStarvation`].
    pub fn random_trend_names<R: Rng + ?Sized>(
        &self,
        positive: &[TrendLine],
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<String>> {
        if n == 0 {
            return Ok(Vec::new());
        }
        self.check_name_range()?;
        let Some(sampler) = &self.sampler else {
            return Err(Error::SamplingStarvation {
                requested: n,
                produced: 0,
                attempts: 0,
            });
        };

        let mut taken: HashSet<String> = positive.iter().map(|t| t.name.clone()).collect();
        let mut names = Vec::with_capacity(n);
        let mut total_attempts = 0usize;

        while names.len() < n {
            let mut accepted = None;
            for _ in 0..self.max_attempts {
                total_attempts += 1;
                let word_count = rng.gen_range(self.min_words..=self.max_words);
                let candidate = (0..word_count)
                    .map(|_| sampler.sample(rng))
                    .collect::<Vec<_>>()
                    .join(" ");
                if !taken.contains(&candidate) {
                    accepted = Some(candidate);
                    break;
                }
            }

            let Some(name) = accepted else {
                return Err(Error::SamplingStarvation {
                    requested: n,
                    produced: names.len(),
                    attempts: total_attempts,
                });
            };
            taken.insert(name.clone());
            names.push(name);
        }

        tracing::debug!(requested = n, attempts = total_attempts, "Sampled negative trend names");
        Ok(names)
    }

    /// Build one unpopulated negative line per positive line
    pub fn construct_negative_trends<R: Rng + ?Sized>(
        &self,
        positive: &[TrendLine],
        rng: &mut R,
    ) -> Result<Vec<TrendLine>> {
        if self.window_size <= 0 {
            return Err(Error::config("window_size must be greater than 0"));
        }
        let Some(bounds) = SpanBounds::from_positive(positive, self.window_size) else {
            return Ok(Vec::new());
        };

        let names = self.random_trend_names(positive, positive.len(), rng)?;
        let negatives: Vec<TrendLine> = names
            .into_iter()
            .map(|name| {
                let (start_ts, len) = bounds.sample(rng);
                TrendLine::blank(name, start_ts, self.window_size, len, false)
            })
            .collect();

        tracing::info!(
            count = negatives.len(),
            min_start = bounds.min_start,
            max_end = bounds.max_end,
            "Constructed negative trends"
        );
        Ok(negatives)
    }
}
