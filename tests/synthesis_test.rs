//! Tests for negative trend synthesis

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use twittp::analytics::{NegativeSynthesizer, SpanBounds, WordFrequencyModel};
use twittp::config::ModelConfig;
use twittp::error::Error;
use twittp::ingest::Stopwords;
use twittp::models::TrendLine;

const BASE_TS: i64 = 1_318_885_200;

fn vocabulary(text: &str) -> WordFrequencyModel {
    let mut model = WordFrequencyModel::new();
    model.add_text(text, &Stopwords::new());
    model
}

fn positives(names: &[&str]) -> Vec<TrendLine> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| TrendLine::blank(*name, BASE_TS + i as i64 * 600, 120, 30 + i, true))
        .collect()
}

proptest! {
    #[test]
    fn negative_names_avoid_positive_names(seed in any::<u64>()) {
        // Tiny vocabulary so collisions with positive names are likely
        let words = vocabulary("rain rain rain snow snow fog");
        let positive = positives(&["rain", "snow", "rain snow", "fog"]);
        let config = ModelConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let names = NegativeSynthesizer::new(&words, &config)
            .random_trend_names(&positive, 6, &mut rng)
            .unwrap();

        prop_assert_eq!(names.len(), 6);
        for (i, name) in names.iter().enumerate() {
            prop_assert!(positive.iter().all(|p| &p.name != name));
            prop_assert!(names[i + 1..].iter().all(|other| other != name));
        }
    }

    #[test]
    fn negative_spans_stay_in_range(seed in any::<u64>()) {
        let words = vocabulary("apples oranges pears plums");
        let positive = positives(&["#a", "#b", "#c"]);
        let bounds = SpanBounds::from_positive(&positive, 120).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let negatives = NegativeSynthesizer::new(&words, &ModelConfig::default())
            .construct_negative_trends(&positive, &mut rng)
            .unwrap();

        prop_assert_eq!(negatives.len(), positive.len());
        for line in &negatives {
            prop_assert!(!line.trending());
            prop_assert!(line.start_ts >= bounds.min_start);
            prop_assert!(line.end_ts() <= bounds.max_end);
            prop_assert_eq!((line.start_ts - bounds.min_start) % 120, 0);
            prop_assert!(bounds.lengths.contains(&line.len()));
        }
    }
}

#[test]
fn test_exhausted_vocabulary_starves() {
    // Only three one-word names and no room for more
    let words = vocabulary("alpha beta gamma");
    let config = ModelConfig {
        max_name_words: 1,
        max_name_attempts: 200,
        ..Default::default()
    };
    let positive = positives(&["alpha"]);
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    let err = NegativeSynthesizer::new(&words, &config)
        .random_trend_names(&positive, 3, &mut rng)
        .unwrap_err();

    match err {
        Error::SamplingStarvation {
            requested,
            produced,
            ..
        } => {
            assert_eq!(requested, 3);
            assert_eq!(produced, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_vocabulary_starves() {
    let words = WordFrequencyModel::new();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let result = NegativeSynthesizer::new(&words, &ModelConfig::default())
        .random_trend_names(&positives(&["x"]), 1, &mut rng);
    assert!(matches!(result, Err(Error::SamplingStarvation { produced: 0, .. })));
}
