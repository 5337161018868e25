//! `MemoryStore`: the ingestion pipeline and query façade.
//!
//! `add` decides the stored form of a text (verbatim below the token
//! threshold, condensed above it), embeds it and commits text and vector as
//! one record. `query` embeds the query text and maps the nearest ordinals
//! back to stored texts.
//!
//! The text list and the vector index share one `RwLock`. Collaborator calls
//! happen before the lock is taken; the write lock is held only to assign the
//! ordinal and append to both containers, so readers never observe a
//! half-inserted record.

use std::sync::Arc;

use tokio::sync::RwLock;

use mnemo_types::config::MemoryConfig;
use mnemo_types::error::{CollaboratorError, MemoryError};
use mnemo_types::memory::{IngestOutcome, RankedMemory, Record, StoredText};

use super::box_condenser::BoxCondenser;
use super::box_embedder::BoxEmbedder;
use super::index::{FlatL2Index, VectorIndex};
use super::tokens::TokenCounter;

/// Texts and vectors kept in lockstep: `texts[i]` belongs to index row `i`.
struct StoreState<I> {
    texts: Vec<String>,
    index: I,
}

impl<I: VectorIndex> StoreState<I> {
    fn len(&self) -> usize {
        self.texts.len()
    }

    /// Append a fully built record. Either both containers grow or neither does.
    fn commit(&mut self, record: Record) -> Result<usize, MemoryError> {
        let ordinal = self.index.add(record.vector)?;
        debug_assert_eq!(ordinal, record.ordinal);
        debug_assert_eq!(ordinal, self.texts.len());
        self.texts.push(record.text);
        Ok(ordinal)
    }
}

/// In-memory semantic memory over injected collaborators.
///
/// Generic over the index so an approximate structure can replace
/// [`FlatL2Index`]; the index must keep the ascending-distance, ascending-
/// ordinal ordering contract.
pub struct MemoryStore<I: VectorIndex = FlatL2Index> {
    embedder: BoxEmbedder,
    condenser: BoxCondenser,
    tokens: Arc<dyn TokenCounter>,
    config: MemoryConfig,
    dimension: usize,
    state: RwLock<StoreState<I>>,
}

impl MemoryStore<FlatL2Index> {
    /// Create an empty store backed by an exact flat L2 index sized to the
    /// embedder's dimension.
    pub fn new(
        embedder: BoxEmbedder,
        condenser: BoxCondenser,
        tokens: Arc<dyn TokenCounter>,
        config: MemoryConfig,
    ) -> Self {
        let index = FlatL2Index::new(embedder.dimension());
        Self::assemble(embedder, condenser, tokens, config, index)
    }
}

impl<I: VectorIndex> MemoryStore<I> {
    /// Create an empty store over a caller-supplied index.
    ///
    /// The index must be empty and share the embedder's dimension.
    pub fn with_index(
        embedder: BoxEmbedder,
        condenser: BoxCondenser,
        tokens: Arc<dyn TokenCounter>,
        config: MemoryConfig,
        index: I,
    ) -> Result<Self, MemoryError> {
        if index.dimension() != embedder.dimension() {
            return Err(MemoryError::DimensionMismatch {
                expected: embedder.dimension(),
                actual: index.dimension(),
            });
        }
        if !index.is_empty() {
            return Err(MemoryError::IndexNotEmpty(index.len()));
        }
        Ok(Self::assemble(embedder, condenser, tokens, config, index))
    }

    fn assemble(
        embedder: BoxEmbedder,
        condenser: BoxCondenser,
        tokens: Arc<dyn TokenCounter>,
        config: MemoryConfig,
        index: I,
    ) -> Self {
        let dimension = embedder.dimension();
        tracing::debug!(
            embedder = embedder.model_name(),
            condenser = condenser.name(),
            dimension,
            "memory store created"
        );
        Self {
            embedder,
            condenser,
            tokens,
            config,
            dimension,
            state: RwLock::new(StoreState {
                texts: Vec::new(),
                index,
            }),
        }
    }

    /// Ingest `text` and return its stored form.
    pub async fn add(&self, text: &str) -> Result<String, MemoryError> {
        self.add_detailed(text).await.map(|outcome| outcome.stored_text)
    }

    /// Ingest `text`, reporting the assigned ordinal and whether it was condensed.
    #[tracing::instrument(
        name = "memory_add",
        skip(self, text),
        fields(
            text_len = text.len(),
            token_count = tracing::field::Empty,
            condensed = tracing::field::Empty,
            ordinal = tracing::field::Empty,
        )
    )]
    pub async fn add_detailed(&self, text: &str) -> Result<IngestOutcome, MemoryError> {
        if text.trim().is_empty() {
            return Err(MemoryError::EmptyText);
        }

        let span = tracing::Span::current();
        let token_count = self.tokens.count_tokens(text);
        let condensed = token_count >= self.config.condense_threshold;
        span.record("token_count", token_count);
        span.record("condensed", condensed);

        let stored_text = if condensed {
            self.condense(text).await?
        } else {
            text.to_string()
        };

        let vector = self.embed_one(&stored_text).await?;

        let ordinal = {
            let mut state = self.state.write().await;
            let record = Record {
                ordinal: state.len(),
                text: stored_text.clone(),
                vector,
            };
            state.commit(record)?
        };
        span.record("ordinal", ordinal);

        tracing::debug!(ordinal, condensed, "memory stored");

        Ok(IngestOutcome {
            ordinal,
            stored_text,
            token_count,
            condensed,
        })
    }

    /// Stored texts nearest to `text`, closest first.
    pub async fn query(&self, text: &str, k: usize) -> Result<Vec<String>, MemoryError> {
        let ranked = self.query_ranked(text, k).await?;
        Ok(ranked.into_iter().map(|m| m.text).collect())
    }

    /// [`Self::query`] with the configured default limit.
    pub async fn query_default(&self, text: &str) -> Result<Vec<String>, MemoryError> {
        self.query(text, self.config.default_top_k).await
    }

    /// Nearest stored memories with their ordinals and squared L2 distances.
    ///
    /// An empty store yields an empty result without calling the embedder,
    /// before `k` or `text` are validated.
    #[tracing::instrument(
        name = "memory_query",
        skip(self, text),
        fields(hits = tracing::field::Empty)
    )]
    pub async fn query_ranked(
        &self,
        text: &str,
        k: usize,
    ) -> Result<Vec<RankedMemory>, MemoryError> {
        if self.is_empty().await {
            tracing::Span::current().record("hits", 0);
            return Ok(Vec::new());
        }
        if k == 0 {
            return Err(MemoryError::InvalidLimit(k));
        }
        if text.trim().is_empty() {
            return Err(MemoryError::EmptyText);
        }

        let vector = self.embed_one(text).await?;

        let state = self.state.read().await;
        let hits = state.index.search(&vector, k)?;
        let ranked: Vec<RankedMemory> = hits
            .into_iter()
            .filter_map(|hit| {
                state.texts.get(hit.ordinal).map(|text| RankedMemory {
                    ordinal: hit.ordinal,
                    text: text.clone(),
                    distance: hit.distance,
                })
            })
            .collect();

        tracing::Span::current().record("hits", ranked.len());
        Ok(ranked)
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        let state = self.state.read().await;
        debug_assert_eq!(state.texts.len(), state.index.len());
        state.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// The record at `ordinal`, including a copy of its vector.
    pub async fn get(&self, ordinal: usize) -> Option<Record> {
        let state = self.state.read().await;
        let text = state.texts.get(ordinal)?;
        let vector = state.index.vector(ordinal)?;
        Some(Record {
            ordinal,
            text: text.clone(),
            vector: vector.to_vec(),
        })
    }

    /// All stored texts in insertion order.
    pub async fn records(&self) -> Vec<StoredText> {
        let state = self.state.read().await;
        state
            .texts
            .iter()
            .enumerate()
            .map(|(ordinal, text)| StoredText {
                ordinal,
                text: text.clone(),
            })
            .collect()
    }

    /// Vector dimension fixed at construction.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    pub fn embedder_model(&self) -> &str {
        self.embedder.model_name()
    }

    pub fn condenser_name(&self) -> &str {
        self.condenser.name()
    }

    async fn condense(&self, text: &str) -> Result<String, MemoryError> {
        let condensed = self
            .condenser
            .condense(
                text,
                self.config.condense_min_length,
                self.config.condense_max_length,
            )
            .await
            .map_err(MemoryError::condenser)?;

        let condensed = condensed.trim();
        if condensed.is_empty() {
            return Err(MemoryError::condenser(CollaboratorError::InvalidResponse(
                "condenser returned empty text".into(),
            )));
        }
        Ok(condensed.to_string())
    }

    /// Embed a single text and check the result against the store dimension.
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>, MemoryError> {
        let mut vectors = self
            .embedder
            .embed(&[text.to_string()])
            .await
            .map_err(MemoryError::embedder)?;

        if vectors.len() != 1 {
            return Err(MemoryError::EmbeddingCountMismatch {
                expected: 1,
                actual: vectors.len(),
            });
        }
        let vector = vectors.remove(0);

        if vector.len() != self.dimension {
            return Err(MemoryError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }
        Ok(vector)
    }
}
