//! Offline bag-of-words embedder.
//!
//! Each lowercase word is hashed with SHA-256 into a bucket and a sign, and
//! the accumulated vector is L2-normalized. Texts that share words end up
//! close together, which is enough for demos and tests without a model.

use sha2::{Digest, Sha256};

use mnemo_core::memory::embedder::Embedder;
use mnemo_types::error::CollaboratorError;

use super::embedder::EMBEDDING_DIMENSION;

pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0_f32; self.dimension];
        if self.dimension == 0 {
            return vector;
        }

        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let digest = Sha256::digest(word.to_lowercase().as_bytes());
            let bucket = u64::from_le_bytes([
                digest[0], digest[1], digest[2], digest[3], digest[4], digest[5], digest[6],
                digest[7],
            ]) as usize
                % self.dimension;
            let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in vector.iter_mut() {
                *v /= norm;
            }
        }
        vector
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(EMBEDDING_DIMENSION)
    }
}

impl Embedder for HashingEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, CollaboratorError> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }

    fn model_name(&self) -> &str {
        "hashing-bow"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use mnemo_core::memory::index::squared_l2;

    use super::*;

    #[tokio::test]
    async fn test_embeddings_are_deterministic_and_normalized() {
        let embedder = HashingEmbedder::default();
        let texts = vec!["Vaccines train the immune system".to_string()];

        let a = embedder.embed(&texts).await.unwrap();
        let b = embedder.embed(&texts).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0].len(), EMBEDDING_DIMENSION);

        let norm: f32 = a[0].iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_shared_words_are_closer() {
        let embedder = HashingEmbedder::default();
        let vectors = embedder
            .embed(&[
                "vaccines protect against disease".to_string(),
                "how do vaccines protect people".to_string(),
                "the renaissance began in italy".to_string(),
            ])
            .await
            .unwrap();

        let related = squared_l2(&vectors[0], &vectors[1]);
        let unrelated = squared_l2(&vectors[0], &vectors[2]);
        assert!(related < unrelated, "{related} should be < {unrelated}");
    }

    #[tokio::test]
    async fn test_case_and_punctuation_are_ignored() {
        let embedder = HashingEmbedder::new(16);
        let vectors = embedder
            .embed(&["Hello, World!".to_string(), "hello world".to_string()])
            .await
            .unwrap();
        assert_eq!(vectors[0], vectors[1]);
    }

    #[tokio::test]
    async fn test_text_without_words_is_zero_vector() {
        let embedder = HashingEmbedder::new(8);
        let vectors = embedder.embed(&["...".to_string()]).await.unwrap();
        assert_eq!(vectors[0], vec![0.0; 8]);
    }
}
