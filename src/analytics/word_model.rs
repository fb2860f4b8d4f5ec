//! Word frequency model of the message corpus
//!
//! Tokens are lowercased, then every real word (see [`is_real_word`]) that is
//! not a stopword is counted. The counts are kept in lexicographic order so
//! that sampling with a fixed seed is reproducible across runs.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ingest::{JsonLines, MessageRecord, Stopwords};
use crate::utils::{is_real_word, tokenize};

/// Token occurrence counts over a message corpus
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFrequencyModel {
    counts: BTreeMap<String, u64>,
    total: u64,
}

impl WordFrequencyModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the accepted tokens of one message
    pub fn add_text(&mut self, text: &str, stopwords: &Stopwords) {
        for token in tokenize(text) {
            let word = token.to_lowercase();
            if !is_real_word(&word) || stopwords.contains(&word) {
                continue;
            }
            *self.counts.entry(word).or_insert(0) += 1;
            self.total += 1;
        }
    }

    /// Build the model from a JSON-lines message source
    pub fn from_messages<R: BufRead>(
        reader: R,
        source_name: &str,
        stopwords: &Stopwords,
    ) -> Result<Self> {
        let mut model = Self::new();
        let mut messages = 0usize;

        for record in JsonLines::<R, MessageRecord>::new(reader, source_name) {
            let (_, message) = record?;
            model.add_text(&message.text, stopwords);
            messages += 1;
        }

        tracing::info!(
            source = source_name,
            messages,
            distinct_words = model.len(),
            total_words = model.total(),
            "Built word frequency model"
        );
        Ok(model)
    }

    /// Build the model from a message file
    pub fn from_file(path: &Path, stopwords: &Stopwords) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| Error::with_source(format!("Failed to open {}", path.display()), e))?;
        Self::from_messages(BufReader::new(file), &path.display().to_string(), stopwords)
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn count(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(w, &c)| (w.as_str(), c))
    }

    /// Frequency-proportional sampler over the words, `None` if empty
    pub fn sampler(&self) -> Option<WordSampler<'_>> {
        if self.total == 0 {
            return None;
        }

        let mut words = Vec::with_capacity(self.counts.len());
        let mut cumulative = Vec::with_capacity(self.counts.len());
        let mut running = 0u64;
        for (word, count) in self.iter() {
            running += count;
            words.push(word);
            cumulative.push(running);
        }

        Some(WordSampler { words, cumulative })
    }
}

/// Draws words with probability proportional to their counts
#[derive(Debug, Clone)]
pub struct WordSampler<'a> {
    words: Vec<&'a str>,
    cumulative: Vec<u64>,
}

impl<'a> WordSampler<'a> {
    pub fn total_weight(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Word whose cumulative bucket contains `x`, for `x` in `[0, total_weight)`
    pub fn word_at(&self, x: u64) -> &'a str {
        let idx = self.cumulative.partition_point(|&c| c <= x);
        self.words[idx.min(self.words.len() - 1)]
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &'a str {
        let x = rng.gen_range(0..self.total_weight());
        self.word_at(x)
    }
}
