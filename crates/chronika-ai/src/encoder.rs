//! Sentence embedding encoder.
//!
//! Wraps a fastembed (ONNX) sentence-embedding model behind the [`Encoder`]
//! trait. The model is loaded lazily on first use and at most once per
//! process: a failed load marks the encoder unavailable for the rest of the
//! process lifetime, so callers fall back to keyword search instead of
//! re-triggering the loader on every request.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use chronika_core::config::AiConfig;
use chronika_core::error::{ChronikaError, Result};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

/// Fixed-length embedding vector.
pub type Embedding = Vec<f32>;

/// Maps text to a fixed-length vector.
pub trait Encoder: Send + Sync {
    /// Encode one text.
    ///
    /// `Ok(None)` is the sentinel for "encoder unavailable" (disabled by
    /// config, or the one-shot model load failed) — callers branch to the
    /// keyword fallback deterministically. `Err` is a per-text failure;
    /// callers skip that text only.
    fn encode(&self, text: &str) -> Result<Option<Embedding>>;

    /// False once the encoder is known to be unusable for this process.
    fn is_available(&self) -> bool;

    fn model_name(&self) -> &str;

    /// Force any lazy initialization now. Useful at startup so the first
    /// search does not pay the model load.
    fn warm_up(&self) -> Result<()> {
        Ok(())
    }
}

/// Truncate on a char boundary so multi-byte text never splits mid-character.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// fastembed-backed sentence encoder.
pub struct SentenceEncoder {
    model_name: String,
    cache_dir: String,
    enabled: bool,
    max_input_chars: usize,
    /// `None` inside the cell records a permanently failed load.
    model: OnceLock<Option<Mutex<TextEmbedding>>>,
}

impl SentenceEncoder {
    pub fn new(cfg: &AiConfig) -> Self {
        Self {
            model_name: cfg.model.clone(),
            cache_dir: cfg.cache_dir.clone(),
            enabled: cfg.enabled,
            max_input_chars: cfg.max_input_chars,
            model: OnceLock::new(),
        }
    }

    fn model_kind(name: &str) -> EmbeddingModel {
        match name {
            "sentence-transformers/all-MiniLM-L6-v2" => EmbeddingModel::AllMiniLML6V2,
            "BAAI/bge-small-en-v1.5" => EmbeddingModel::BGESmallENV15,
            "BAAI/bge-base-en-v1.5" => EmbeddingModel::BGEBaseENV15,
            "BAAI/bge-large-en-v1.5" => EmbeddingModel::BGELargeENV15,
            "sentence-transformers/paraphrase-multilingual-MiniLM-L12-v2" => {
                EmbeddingModel::ParaphraseMLMiniLML12V2
            }
            other => {
                tracing::warn!("Unknown embedding model '{other}', using all-MiniLM-L6-v2");
                EmbeddingModel::AllMiniLML6V2
            }
        }
    }

    /// Load the model at most once. Concurrent first callers block on the
    /// in-flight load; everyone observes the same outcome afterwards.
    fn model(&self) -> Option<&Mutex<TextEmbedding>> {
        self.model
            .get_or_init(|| {
                let opts = InitOptions::new(Self::model_kind(&self.model_name))
                    .with_cache_dir(PathBuf::from(&self.cache_dir))
                    .with_show_download_progress(false);
                match TextEmbedding::try_new(opts) {
                    Ok(m) => {
                        tracing::info!("Embedding model loaded: {}", self.model_name);
                        Some(Mutex::new(m))
                    }
                    Err(e) => {
                        tracing::warn!(
                            "Failed to load embedding model '{}': {e} — keyword search only",
                            self.model_name
                        );
                        None
                    }
                }
            })
            .as_ref()
    }
}

impl Encoder for SentenceEncoder {
    fn encode(&self, text: &str) -> Result<Option<Embedding>> {
        if !self.enabled {
            return Ok(None);
        }
        let Some(model) = self.model() else {
            return Ok(None);
        };
        let text = truncate_chars(text, self.max_input_chars);
        let mut model = model
            .lock()
            .map_err(|e| ChronikaError::Encoding(format!("model lock poisoned: {e}")))?;
        let vectors = model
            .embed(vec![text.to_string()], None)
            .map_err(|e| ChronikaError::Encoding(e.to_string()))?;
        let vector = vectors
            .into_iter()
            .next()
            .ok_or_else(|| ChronikaError::Encoding("model returned no embedding".into()))?;
        Ok(Some(vector))
    }

    fn is_available(&self) -> bool {
        self.enabled && self.model.get().map_or(true, |m| m.is_some())
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn warm_up(&self) -> Result<()> {
        if !self.enabled {
            return Err(ChronikaError::EncoderUnavailable("embeddings disabled".into()));
        }
        match self.model() {
            Some(_) => Ok(()),
            None => Err(ChronikaError::EncoderUnavailable(format!(
                "model '{}' failed to load",
                self.model_name
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
        assert_eq!(truncate_chars("short", 512), "short");
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn test_truncate_multibyte() {
        // Cyrillic chars are two bytes each; slicing must stay on boundaries
        let text = "Владимир Ильич Ленин";
        let cut = truncate_chars(text, 8);
        assert_eq!(cut, "Владимир");
        assert_eq!(cut.chars().count(), 8);
    }

    #[test]
    fn test_disabled_encoder_is_unavailable() {
        let cfg = AiConfig { enabled: false, ..Default::default() };
        let encoder = SentenceEncoder::new(&cfg);
        assert!(!encoder.is_available());
        // sentinel, not an error
        assert!(encoder.encode("anything").unwrap().is_none());
    }
}
