//! # Chronika AI
//!
//! Semantic search, recommendations and fact generation for the leader
//! catalog.
//!
//! ## Design
//! - **Fact bank** — curated snippets per leader, field-derived fallback
//! - **Text matcher** — case-insensitive substring containment, no ranking
//! - **Embedding encoder** — fastembed sentence model, lazy one-shot load
//! - **Similarity ranker** — cosine similarity, threshold filter, top-k
//!
//! ## How it works
//! ```text
//! search("реформы и гласность")
//!   ↓ encode query + every candidate      (encoder available)
//!   ↓ cosine similarity, keep > threshold, stable sort, top-k
//! ordered leaders
//!
//!   ↓ substring containment               (encoder unavailable)
//! leaders whose fields contain the query, input order
//! ```
//!
//! A deployment without model weights keeps answering searches through the
//! keyword path; nothing in this crate aborts the host process.

pub mod encoder;
pub mod facts;
pub mod matcher;
pub mod ranker;

pub use encoder::{Embedding, Encoder, SentenceEncoder};
pub use facts::FactBank;
pub use ranker::{cosine_similarity, Ranker};

use std::sync::Arc;

use chronika_core::config::AiConfig;
use chronika_core::error::Result;
use chronika_core::types::Leader;

/// Facade over the fact bank, encoder and ranker.
///
/// Constructed once at startup and shared behind an `Arc`. The embedding
/// model inside is loaded lazily on the first encode; there is no global
/// model state outside this handle.
pub struct AiService {
    config: AiConfig,
    fact_bank: FactBank,
    encoder: Arc<dyn Encoder>,
    ranker: Ranker,
}

impl AiService {
    pub fn new(config: AiConfig) -> Self {
        let encoder: Arc<dyn Encoder> = Arc::new(SentenceEncoder::new(&config));
        Self::with_encoder(config, encoder)
    }

    /// Build with a caller-supplied encoder (tests inject a deterministic
    /// stub here).
    pub fn with_encoder(config: AiConfig, encoder: Arc<dyn Encoder>) -> Self {
        let ranker = Ranker::new(encoder.clone(), config.shuffle_fallback);
        Self { config, fact_bank: FactBank::new(), encoder, ranker }
    }

    /// Trigger the one-shot model load now instead of on the first search.
    pub fn warm_up(&self) -> Result<()> {
        self.encoder.warm_up()
    }

    /// Semantic search over `candidates` with keyword fallback.
    pub fn search(&self, query: &str, candidates: &[Leader]) -> Result<Vec<Leader>> {
        self.ranker.rank(
            query,
            candidates,
            self.config.search_top_k,
            self.config.similarity_threshold,
        )
    }

    /// Leaders similar to `target`, target itself excluded.
    pub fn recommend(&self, target: &Leader, all: &[Leader], count: usize) -> Result<Vec<Leader>> {
        self.ranker.recommend(target, all, count, self.config.similarity_threshold)
    }

    /// Up to `count` facts about `leader`. Pure read; persistence is the
    /// storage layer's concern.
    pub fn facts_for(&self, leader: &Leader, count: usize) -> Vec<String> {
        self.fact_bank.facts_for(leader, count)
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }
}
