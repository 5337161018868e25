//! Offline extractive condenser.
//!
//! Keeps the leading sentences of a text while they fit in `max_length`
//! tokens. When the first sentence alone is too long, it is cut at a word
//! boundary, or at a character boundary when even its first word is too long. Lead sentences are a strong baseline for news-like prose and
//! need no model, which makes this the condenser for `--offline` runs.

use std::sync::Arc;

use mnemo_core::memory::condenser::Condenser;
use mnemo_core::memory::tokens::TokenCounter;
use mnemo_types::error::CollaboratorError;

pub struct LeadSentenceCondenser {
    tokens: Arc<dyn TokenCounter>,
}

impl LeadSentenceCondenser {
    pub fn new(tokens: Arc<dyn TokenCounter>) -> Self {
        Self { tokens }
    }

    /// Longest word prefix of `text` that fits in `max_length` tokens.
    fn truncate_words(&self, text: &str, max_length: usize) -> String {
        let mut out = String::new();
        for word in text.split_whitespace() {
            let candidate = if out.is_empty() {
                word.to_string()
            } else {
                format!("{out} {word}")
            };
            if self.tokens.count_tokens(&candidate) > max_length {
                break;
            }
            out = candidate;
        }
        out
    }

    /// Longest character prefix of `text` that fits in `max_length` tokens,
    /// or the first character when nothing fits.
    fn truncate_chars(&self, text: &str, max_length: usize) -> String {
        let ends: Vec<usize> = text
            .char_indices()
            .map(|(i, c)| i + c.len_utf8())
            .collect();
        let fits =
            ends.partition_point(|&end| self.tokens.count_tokens(&text[..end]) <= max_length);
        let end = match fits {
            0 => ends.first().copied().unwrap_or(0),
            n => ends[n - 1],
        };
        text[..end].to_string()
    }
}

/// Split after `.`, `!` or `?` when followed by whitespace.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            if let Some(&(_, next)) = chars.peek() {
                if next.is_whitespace() {
                    let end = i + c.len_utf8();
                    let sentence = text[start..end].trim();
                    if !sentence.is_empty() {
                        sentences.push(sentence);
                    }
                    start = end;
                }
            }
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

impl Condenser for LeadSentenceCondenser {
    async fn condense(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
    ) -> Result<String, CollaboratorError> {
        let mut out = String::new();

        for sentence in split_sentences(text) {
            let candidate = if out.is_empty() {
                sentence.to_string()
            } else {
                format!("{out} {sentence}")
            };

            if self.tokens.count_tokens(&candidate) <= max_length {
                out = candidate;
                continue;
            }
            if out.is_empty() || self.tokens.count_tokens(&out) < min_length {
                out = self.truncate_words(&candidate, max_length);
            }
            break;
        }

        // A single word longer than max_length (URL, blob, unspaced script).
        if out.is_empty() {
            out = self.truncate_chars(text.trim(), max_length);
        }

        Ok(out)
    }

    fn name(&self) -> &str {
        "lead-sentence"
    }
}

#[cfg(test)]
mod tests {
    use mnemo_core::memory::box_condenser::BoxCondenser;
    use mnemo_core::memory::box_embedder::BoxEmbedder;
    use mnemo_core::memory::store::MemoryStore;
    use mnemo_core::memory::tokens::EstimatedTokenCounter;
    use mnemo_types::config::MemoryConfig;

    use crate::vector::hashing::HashingEmbedder;

    use super::*;

    struct WordCounter;

    impl TokenCounter for WordCounter {
        fn count_tokens(&self, text: &str) -> usize {
            text.split_whitespace().count()
        }
    }

    fn condenser() -> LeadSentenceCondenser {
        LeadSentenceCondenser::new(Arc::new(WordCounter))
    }

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("One two. Three four! Five? Version 1.5 ships");
        assert_eq!(
            sentences,
            vec!["One two.", "Three four!", "Five?", "Version 1.5 ships"]
        );
    }

    #[tokio::test]
    async fn test_keeps_leading_sentences_that_fit() {
        let text = "Vaccines train the immune system to spot pathogens. \
                    They introduce weakened or inactivated germs. \
                    The body then produces antibodies. \
                    This protects against future infection for years to come.";
        let out = condenser().condense(text, 3, 15).await.unwrap();
        assert_eq!(
            out,
            "Vaccines train the immune system to spot pathogens. \
             They introduce weakened or inactivated germs."
        );
    }

    #[tokio::test]
    async fn test_cuts_overlong_first_sentence() {
        let text = (0..50).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let out = condenser().condense(&text, 10, 30).await.unwrap();
        assert_eq!(WordCounter.count_tokens(&out), 30);
        assert!(out.starts_with("w0 w1 w2"));
    }

    #[tokio::test]
    async fn test_tops_up_to_min_length() {
        // First sentence is shorter than min_length and the second overflows.
        let text = format!(
            "Short one. {}",
            (0..40).map(|i| format!("x{i}")).collect::<Vec<_>>().join(" ")
        );
        let out = condenser().condense(&text, 10, 20).await.unwrap();
        assert_eq!(WordCounter.count_tokens(&out), 20);
        assert!(out.starts_with("Short one. x0"));
    }

    fn long_url() -> String {
        format!("https://example.com/{}", "a".repeat(150))
    }

    #[tokio::test]
    async fn test_unbroken_token_is_cut_at_char_boundary() {
        let condenser = LeadSentenceCondenser::new(Arc::new(EstimatedTokenCounter));
        let out = condenser.condense(&long_url(), 10, 30).await.unwrap();
        assert_eq!(out.chars().count(), 120);
        assert!(out.starts_with("https://example.com/aaa"));
        assert_eq!(EstimatedTokenCounter.count_tokens(&out), 30);
    }

    #[tokio::test]
    async fn test_unspaced_script_is_cut_at_char_boundary() {
        let condenser = LeadSentenceCondenser::new(Arc::new(EstimatedTokenCounter));
        let text = "記憶".repeat(100);
        let out = condenser.condense(&text, 10, 30).await.unwrap();
        assert_eq!(out.chars().count(), 120);
    }

    #[tokio::test]
    async fn test_zero_min_length_still_truncates_first_sentence() {
        let text = (0..50).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let out = condenser().condense(&text, 0, 30).await.unwrap();
        assert_eq!(WordCounter.count_tokens(&out), 30);
    }

    #[tokio::test]
    async fn test_zero_max_length_keeps_first_character() {
        let condenser = LeadSentenceCondenser::new(Arc::new(EstimatedTokenCounter));
        let out = condenser.condense("abcdef", 0, 0).await.unwrap();
        assert_eq!(out, "a");
    }

    #[tokio::test]
    async fn test_offline_store_accepts_long_url() {
        let tokens: Arc<dyn TokenCounter> = Arc::new(EstimatedTokenCounter);
        let store = MemoryStore::new(
            BoxEmbedder::new(HashingEmbedder::default()),
            BoxCondenser::new(LeadSentenceCondenser::new(Arc::clone(&tokens))),
            tokens,
            MemoryConfig::default(),
        );

        let outcome = store.add_detailed(&long_url()).await.unwrap();
        assert!(outcome.condensed);
        assert!(!outcome.stored_text.is_empty());
        assert_eq!(store.len().await, 1);
    }
}
