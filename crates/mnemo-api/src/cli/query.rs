//! `mnemo query`: ingest a file line by line, then ask one question.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use tracing::Instrument;

use mnemo_core::memory::store::MemoryStore;
use mnemo_observe::attrs;
use mnemo_types::memory::RankedMemory;

use super::output::{OutputMode, print_results};
use crate::state::AppState;

/// Non-empty, trimmed lines of `content`.
pub fn texts_from_lines(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Ask `question` against `store`, returning up to `k` ranked memories.
pub async fn ask(store: &MemoryStore, question: &str, k: usize) -> Result<Vec<RankedMemory>> {
    let span = tracing::info_span!(
        "ask",
        { attrs::MNEMO_OPERATION_NAME } = attrs::OP_QUERY,
        { attrs::MNEMO_QUERY_K } = k,
    );
    store
        .query_ranked(question, k)
        .instrument(span)
        .await
        .context("Query failed")
}

/// Run a one-shot query over the texts in `file`.
///
/// # Examples
///
/// ```bash
/// mnemo query --file transcript.txt "What did the user decide about caching?"
/// mnemo --offline --json query -f notes.txt -k 5 "deadlines"
/// ```
pub async fn run(
    state: &AppState,
    file: &Path,
    question: &str,
    k: Option<usize>,
    mode: OutputMode,
) -> Result<()> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let texts = texts_from_lines(&content);

    let store = state.build_store(mode.is_styled()).await?;
    let k = state.top_k(k);

    for (line, text) in texts.iter().enumerate() {
        let span = tracing::info_span!("ingest", { attrs::MNEMO_OPERATION_NAME } = attrs::OP_ADD);
        let outcome = store
            .add_detailed(text)
            .instrument(span)
            .await
            .with_context(|| format!("Failed to store text {} of {}", line + 1, texts.len()))?;
        tracing::debug!(
            { attrs::MNEMO_MEMORY_ORDINAL } = outcome.ordinal,
            condensed = outcome.condensed,
            "text stored"
        );
    }

    if mode.is_styled() {
        println!();
        println!(
            "  {} Stored {} texts from {}",
            style("✓").green().bold(),
            style(texts.len()).bold(),
            style(file.display()).cyan()
        );
    }

    let results = ask(&store, question, k).await?;
    print_results(mode, question, k, &results)
}
