//! Embedding-based similarity ranking with keyword fallback.

use std::cmp::Ordering;
use std::sync::Arc;

use chronika_core::error::{ChronikaError, Result};
use chronika_core::types::Leader;
use rand::seq::SliceRandom;

use crate::encoder::Encoder;
use crate::matcher::{keyword_search, searchable_text};

/// Cosine similarity between two vectors, in [-1, 1].
///
/// A zero-norm vector scores 0.0 against anything rather than dividing by
/// zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same length");

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Ranks candidate leaders against a query by embedding similarity.
pub struct Ranker {
    encoder: Arc<dyn Encoder>,
    shuffle_fallback: bool,
}

impl Ranker {
    pub fn new(encoder: Arc<dyn Encoder>, shuffle_fallback: bool) -> Self {
        Self { encoder, shuffle_fallback }
    }

    /// Rank `candidates` against `query`, keeping scores strictly above
    /// `threshold`, best first, at most `top_k` records.
    ///
    /// With the encoder unavailable the call degrades to keyword search
    /// truncated to `top_k` (the threshold does not apply there).
    pub fn rank(
        &self,
        query: &str,
        candidates: &[Leader],
        top_k: usize,
        threshold: f32,
    ) -> Result<Vec<Leader>> {
        if query.trim().is_empty() {
            return Err(ChronikaError::InvalidQuery("query must not be empty".into()));
        }

        let Some(query_vec) = self.encoder.encode(query)? else {
            return Ok(keyword_fallback(query, candidates, top_k));
        };

        let mut scored: Vec<(usize, f32)> = Vec::with_capacity(candidates.len());
        for (idx, leader) in candidates.iter().enumerate() {
            let text = searchable_text(leader);
            match self.encoder.encode(&text) {
                Ok(Some(vec)) => scored.push((idx, cosine_similarity(&query_vec, &vec))),
                // Encoder died mid-batch. Mixing semantic and keyword scores
                // in one response would be inconsistent, so redo the whole
                // call through the fallback.
                Ok(None) => return Ok(keyword_fallback(query, candidates, top_k)),
                Err(e) => {
                    tracing::warn!("Skipping candidate {}: {e}", leader.id);
                }
            }
        }

        scored.retain(|(_, score)| *score > threshold);
        // stable sort: exact ties keep input order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(idx, _)| candidates[idx].clone())
            .collect())
    }

    /// Leaders similar to `target`, excluding the target itself.
    ///
    /// With no model available this returns a shuffle of the other leaders
    /// (or their input order when `shuffle_fallback` is off) instead of a
    /// keyword match against the target's whole biography text.
    pub fn recommend(
        &self,
        target: &Leader,
        all: &[Leader],
        count: usize,
        threshold: f32,
    ) -> Result<Vec<Leader>> {
        let mut others: Vec<Leader> = all.iter().filter(|l| l.id != target.id).cloned().collect();

        if !self.encoder.is_available() {
            if self.shuffle_fallback {
                others.shuffle(&mut rand::thread_rng());
            }
            others.truncate(count);
            return Ok(others);
        }

        self.rank(&searchable_text(target), &others, count, threshold)
    }
}

fn keyword_fallback(query: &str, candidates: &[Leader], top_k: usize) -> Vec<Leader> {
    let mut matches = keyword_search(query, candidates);
    matches.truncate(top_k);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::Embedding;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    /// Deterministic encoder for tests: counts topic keywords into a 3-dim
    /// vector. Texts without any keyword embed to the zero vector.
    fn toy_vector(text: &str) -> Embedding {
        let t = text.to_lowercase();
        let count = |w: &str| t.matches(w).count() as f32;
        vec![count("revolution"), count("industrial"), count("space")]
    }

    struct StubEncoder {
        enabled: bool,
        /// texts containing this fail with a per-candidate error
        fail_on: Option<&'static str>,
        /// number of successful encodes before the stub reports unavailable
        budget: Option<AtomicUsize>,
    }

    impl StubEncoder {
        fn available() -> Self {
            Self { enabled: true, fail_on: None, budget: None }
        }

        fn unavailable() -> Self {
            Self { enabled: false, fail_on: None, budget: None }
        }

        fn with_budget(n: usize) -> Self {
            Self { enabled: true, fail_on: None, budget: Some(AtomicUsize::new(n)) }
        }
    }

    impl Encoder for StubEncoder {
        fn encode(&self, text: &str) -> chronika_core::error::Result<Option<Embedding>> {
            if !self.enabled {
                return Ok(None);
            }
            if let Some(budget) = &self.budget {
                if budget.fetch_update(AtomicOrdering::SeqCst, AtomicOrdering::SeqCst, |n| n.checked_sub(1)).is_err() {
                    return Ok(None);
                }
            }
            if let Some(marker) = self.fail_on {
                if text.contains(marker) {
                    return Err(ChronikaError::Encoding("malformed text".into()));
                }
            }
            Ok(Some(toy_vector(text)))
        }

        fn is_available(&self) -> bool {
            self.enabled
        }

        fn model_name(&self) -> &str {
            "stub"
        }
    }

    fn ranker(encoder: StubEncoder) -> Ranker {
        Ranker::new(Arc::new(encoder), false)
    }

    fn leader(id: i64, name: &str, achievements: &str) -> Leader {
        Leader {
            id,
            name_primary: name.to_string(),
            name_secondary: name.to_string(),
            achievements: achievements.to_string(),
            ..Default::default()
        }
    }

    fn fixture() -> Vec<Leader> {
        vec![
            leader(1, "Lenin", "revolution revolution revolution"),
            leader(2, "Stalin", "industrial steel and one revolution"),
            leader(3, "Khrushchev", "space program"),
            leader(4, "Chernenko", "quiet continuity"),
        ]
    }

    #[test]
    fn test_cosine_identical_is_one() {
        let a = vec![0.3, 0.5, 0.2];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_symmetric() {
        let a = vec![1.0, 2.0, 0.0];
        let b = vec![0.5, 0.0, 3.0];
        assert!((cosine_similarity(&a, &b) - cosine_similarity(&b, &a)).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_is_zero() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_vector_scores_zero() {
        let a = vec![0.0, 0.0, 0.0];
        let b = vec![1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
        assert_eq!(cosine_similarity(&a, &a), 0.0);
    }

    #[test]
    fn test_rank_orders_by_similarity() {
        let r = ranker(StubEncoder::available());
        let results = r.rank("revolution", &fixture(), 10, 0.3).unwrap();
        // 1 is pure revolution, 2 mentions it once among other topics;
        // 3 and 4 score 0 and are filtered by the threshold
        let ids: Vec<i64> = results.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_rank_respects_top_k() {
        let r = ranker(StubEncoder::available());
        let results = r.rank("revolution", &fixture(), 1, 0.0).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);
    }

    #[test]
    fn test_threshold_monotonicity() {
        let r = ranker(StubEncoder::available());
        let candidates = fixture();
        let loose = r.rank("revolution industrial", &candidates, 10, 0.1).unwrap();
        let strict = r.rank("revolution industrial", &candidates, 10, 0.6).unwrap();
        assert!(strict.len() <= loose.len());
        for l in &strict {
            assert!(loose.iter().any(|o| o.id == l.id));
        }
    }

    #[test]
    fn test_empty_query_is_invalid() {
        let r = ranker(StubEncoder::available());
        let err = r.rank("   ", &fixture(), 5, 0.3).unwrap_err();
        assert!(matches!(err, ChronikaError::InvalidQuery(_)));
    }

    #[test]
    fn test_fallback_is_literal_substring_in_input_order() {
        let r = ranker(StubEncoder::unavailable());
        let results = r.rank("Lenin", &fixture(), 5, 0.3).unwrap();
        let ids: Vec<i64> = results.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1]);

        // whole phrase is matched literally, so this finds nothing even
        // though every word appears somewhere
        let results = r.rank("revolution leader industrialization", &fixture(), 5, 0.3).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_fallback_respects_top_k() {
        let r = ranker(StubEncoder::unavailable());
        // the common "e" matches all four candidates
        let results = r.rank("e", &fixture(), 2, 0.3).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, 1);
        assert_eq!(results[1].id, 2);
    }

    #[test]
    fn test_per_candidate_failure_skips_only_that_candidate() {
        let encoder = StubEncoder {
            enabled: true,
            fail_on: Some("Stalin"),
            budget: None,
        };
        let r = ranker(encoder);
        let results = r.rank("revolution industrial", &fixture(), 10, 0.0).unwrap();
        assert!(results.iter().all(|l| l.id != 2));
        assert!(results.iter().any(|l| l.id == 1));
    }

    #[test]
    fn test_mid_batch_unavailability_falls_back_entirely() {
        // budget of 2: the query and the first candidate encode, then the
        // encoder reports unavailable — the whole call must degrade to the
        // keyword matcher rather than return a partial semantic ranking
        let r = ranker(StubEncoder::with_budget(2));
        let results = r.rank("Lenin", &fixture(), 5, 0.0).unwrap();
        let ids: Vec<i64> = results.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_recommend_excludes_target() {
        let r = ranker(StubEncoder::available());
        let all = fixture();
        let results = r.recommend(&all[0], &all, 5, -1.0).unwrap();
        assert!(results.iter().all(|l| l.id != 1));
    }

    #[test]
    fn test_recommend_caps_count() {
        let r = ranker(StubEncoder::available());
        let all = fixture();
        let results = r.recommend(&all[1], &all, 2, -1.0).unwrap();
        assert!(results.len() <= 2);
        assert!(results.iter().all(|l| l.id != 2));
    }

    #[test]
    fn test_recommend_fallback_without_shuffle_keeps_order() {
        let r = Ranker::new(Arc::new(StubEncoder::unavailable()), false);
        let all = fixture();
        let results = r.recommend(&all[0], &all, 2, 0.3).unwrap();
        let ids: Vec<i64> = results.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_recommend_fallback_shuffle_draws_from_others() {
        let r = Ranker::new(Arc::new(StubEncoder::unavailable()), true);
        let all = fixture();
        let results = r.recommend(&all[0], &all, 3, 0.3).unwrap();
        assert_eq!(results.len(), 3);
        for l in &results {
            assert!(l.id != 1);
            assert!(all.iter().any(|o| o.id == l.id));
        }
    }
}
