//! Domain entities: core data structures

use std::fmt;

use rand::Rng;
use serde::Serialize;

/// Ordered, immutable list of review bodies.
///
/// Every element has a non-empty trimmed length. A corpus is built once per
/// load and replaced wholesale on reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewCorpus {
    reviews: Vec<String>,
}

impl ReviewCorpus {
    /// Build a corpus, dropping blank entries.
    pub fn new<I, S>(reviews: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let reviews = reviews
            .into_iter()
            .map(Into::into)
            .filter(|r: &String| !r.trim().is_empty())
            .collect();
        Self { reviews }
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    pub fn reviews(&self) -> &[String] {
        &self.reviews
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.reviews.get(index).map(String::as_str)
    }

    pub fn contains(&self, review: &str) -> bool {
        self.reviews.iter().any(|r| r == review)
    }

    /// Pick one review uniformly at random from `[0, len)`.
    ///
    /// Returns `None` for an empty corpus.
    pub fn pick_random_with<R: Rng>(&self, rng: &mut R) -> Option<&str> {
        if self.reviews.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.reviews.len());
        self.get(index)
    }

    /// Pick one review using the thread-local RNG.
    pub fn pick_random(&self) -> Option<&str> {
        self.pick_random_with(&mut rand::rng())
    }
}

/// Row accounting for a single corpus load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Data rows seen (header excluded)
    pub rows: usize,
    /// Reviews kept in the corpus
    pub kept: usize,
    /// Rows dropped because the text value was blank or missing
    pub blank: usize,
    /// Rows whose field count differs from the header (text still used)
    pub malformed: usize,
}

/// Result bucket shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentBucket {
    Positive,
    Negative,
    Neutral,
}

impl SentimentBucket {
    /// Bucket a normalized label/score pair.
    ///
    /// Only confident POSITIVE/NEGATIVE results get their own bucket; low
    /// confidence and unknown labels are neutral.
    pub fn classify(label: &str, score: f64) -> Self {
        if score > CONFIDENCE_THRESHOLD && label == POSITIVE_LABEL {
            SentimentBucket::Positive
        } else if score > CONFIDENCE_THRESHOLD && label == NEGATIVE_LABEL {
            SentimentBucket::Negative
        } else {
            SentimentBucket::Neutral
        }
    }
}

impl fmt::Display for SentimentBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SentimentBucket::Positive => "positive",
            SentimentBucket::Negative => "negative",
            SentimentBucket::Neutral => "neutral",
        };
        f.write_str(s)
    }
}

pub const POSITIVE_LABEL: &str = "POSITIVE";
pub const NEGATIVE_LABEL: &str = "NEGATIVE";
pub const CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Normalized outcome of one classification request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// Uppercased label as returned by the service
    pub label: String,
    pub score: f64,
    pub bucket: SentimentBucket,
}

impl ClassificationResult {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        let label = label.into().to_uppercase();
        let bucket = SentimentBucket::classify(&label, score);
        Self {
            label,
            score,
            bucket,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn given_blank_entries_when_building_corpus_then_drops_them() {
        let corpus = ReviewCorpus::new(["good", "   ", "", "bad\n"]);
        assert_eq!(corpus.reviews(), &["good".to_string(), "bad\n".to_string()]);
    }

    #[test]
    fn given_empty_corpus_when_picking_then_returns_none() {
        let corpus = ReviewCorpus::default();
        assert_eq!(corpus.pick_random(), None);
    }

    #[test]
    fn given_seeded_rng_when_picking_repeatedly_then_every_pick_is_member() {
        let corpus = ReviewCorpus::new(["a", "b", "c", "d"]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let pick = corpus.pick_random_with(&mut rng).unwrap();
            assert!(corpus.contains(pick));
        }
    }

    #[test]
    fn given_many_picks_then_every_index_is_reachable() {
        let corpus = ReviewCorpus::new(["a", "b", "c"]);
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 3];
        for _ in 0..300 {
            let pick = corpus.pick_random_with(&mut rng).unwrap();
            let idx = corpus.reviews().iter().position(|r| r == pick).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_bucket_rules() {
        assert_eq!(SentimentBucket::classify("POSITIVE", 0.91), SentimentBucket::Positive);
        assert_eq!(SentimentBucket::classify("NEGATIVE", 0.73), SentimentBucket::Negative);
        assert_eq!(SentimentBucket::classify("POSITIVE", 0.4), SentimentBucket::Neutral);
        assert_eq!(SentimentBucket::classify("POSITIVE", 0.5), SentimentBucket::Neutral);
        assert_eq!(SentimentBucket::classify("LABEL_1", 0.99), SentimentBucket::Neutral);
    }

    #[test]
    fn given_lowercase_label_when_creating_result_then_uppercases() {
        let result = ClassificationResult::new("negative", 0.8);
        assert_eq!(result.label, "NEGATIVE");
        assert_eq!(result.bucket, SentimentBucket::Negative);
    }
}
