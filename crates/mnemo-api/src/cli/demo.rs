//! `mnemo demo`: seed the store with sample passages and ask a question.
//!
//! The twelve passages span technology, science, history and society. All of
//! them are long enough to go through the condenser.

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::Instrument;

use mnemo_core::memory::store::MemoryStore;
use mnemo_observe::attrs;

use super::output::{OutputMode, print_results};
use crate::state::AppState;

/// Question asked when `--question` is not given.
pub const DEFAULT_QUESTION: &str = "How do vaccines protect people from diseases?";

/// Sample passages, grouped four ways.
pub const SAMPLE_PASSAGES: [&str; 12] = [
    // Technology
    "Artificial intelligence is rapidly transforming industries worldwide, enabling companies to analyze vast amounts of data and automate processes with unprecedented efficiency. Through machine learning algorithms, AI systems are capable of recognizing patterns, predicting outcomes, and continuously improving their performance. In sectors like healthcare, finance, and retail, AI is being used to enhance customer experiences, improve decision-making, and optimize operations. However, the widespread adoption of AI also raises concerns about job displacement, data privacy, and ethical implications, which need to be addressed as the technology continues to evolve.",
    "Quantum computing represents a groundbreaking shift in the field of computing, leveraging the principles of quantum mechanics to perform computations that would be impossible for traditional computers. Unlike classical bits, which represent either a 0 or a 1, quantum bits, or qubits, can exist in multiple states simultaneously, allowing quantum computers to solve certain complex problems exponentially faster than classical counterparts. While quantum computing holds great promise for fields such as cryptography, optimization, and drug discovery, the technology is still in its infancy, with many technical challenges to overcome before it becomes widely accessible.",
    "Blockchain technology ensures data integrity through decentralized consensus mechanisms and cryptographic security. It allows for transparent and immutable transactions, making it ideal for applications such as financial transactions, supply chain tracking, and secure voting systems. By eliminating the need for intermediaries, blockchain has the potential to reduce costs and increase trust across industries. However, concerns about scalability, energy consumption, and regulatory issues remain challenges that need to be addressed for blockchain to reach its full potential.",
    // Science
    "CRISPR-Cas9 technology has revolutionized the field of genetic engineering, providing scientists with an efficient and precise tool to modify DNA at the molecular level. By utilizing the natural defense mechanisms of bacteria, researchers can target specific genes and either activate, deactivate, or alter them with incredible accuracy. This breakthrough has vast potential for treating genetic disorders, improving agricultural crops, and advancing biomedical research. However, ethical concerns surrounding the use of CRISPR, especially in human germline editing, continue to spark debate about the potential risks and long-term consequences of manipulating the genetic code.",
    "Climate change is one of the most pressing challenges facing humanity today, driven primarily by the increasing concentration of greenhouse gases in the atmosphere, such as carbon dioxide (CO2), methane (CH4), and nitrous oxide (N2O). These gases trap heat and cause the Earth's average temperature to rise, leading to melting polar ice, rising sea levels, and more extreme weather events. The primary sources of greenhouse gas emissions are the burning of fossil fuels for energy, deforestation, and industrial activities. Tackling climate change requires urgent global cooperation to reduce emissions, transition to renewable energy sources, and implement policies to mitigate its impacts.",
    "Vaccines stimulate the immune system to recognize and fight pathogens without causing disease. They work by introducing a weakened or inactivated form of the pathogen or its components into the body, prompting the immune system to produce antibodies. This helps the body develop immunity against the pathogen, which can prevent future infections. Vaccines have been instrumental in reducing the spread of infectious diseases such as polio, measles, and smallpox, and they continue to play a crucial role in public health efforts worldwide.",
    // History
    "The Renaissance was a cultural and intellectual movement that began in Italy in the 14th century and spread across Europe over the following centuries. This period saw a renewed interest in the classical art, literature, and philosophy of ancient Greece and Rome, as well as significant advancements in science, politics, and exploration. The Renaissance produced some of the most famous artists in history, such as Leonardo da Vinci, Michelangelo, and Raphael, whose works continue to inspire awe and admiration. It also led to the rise of humanism, which emphasized the value of the individual and the pursuit of knowledge. The Renaissance laid the foundation for the modern world, influencing the development of Western civilization.",
    "World War II was one of the most devastating conflicts in human history, involving more than 30 countries and causing the deaths of millions of people. The war began in 1939 with the invasion of Poland by Nazi Germany, followed by the involvement of the Soviet Union, the United States, and other nations. The war's outcome reshaped global politics, with the defeat of the Axis powers and the establishment of two superpowers: the United States and the Soviet Union. The war also led to the creation of the United Nations, an international organization designed to promote peace and prevent future conflicts. The legacy of World War II continues to shape global relations and international policy to this day.",
    "The Industrial Revolution was a period of profound economic and social change that began in the late 18th century in Great Britain and spread to other parts of the world. It marked the transition from agrarian economies to industrialized societies, characterized by the growth of factories, mechanized production, and the rise of urbanization. This period saw the invention of new technologies, such as the steam engine and the spinning jenny, which revolutionized manufacturing processes and transportation. The Industrial Revolution significantly impacted social structures, leading to the growth of the middle class, but also created challenges such as poor working conditions and child labor.",
    // Society
    "Social media has had a profound impact on the way people communicate, connect, and share information. Platforms like Facebook, Twitter, Instagram, and TikTok allow individuals to instantly share their thoughts, photos, and videos with a global audience. While social media has democratized information and facilitated social movements, it has also contributed to the spread of misinformation, echo chambers, and cyberbullying. The rapid dissemination of news and opinions on social media can influence public opinion, political elections, and even social norms. As the influence of social media continues to grow, it raises important questions about privacy, accountability, and its role in society.",
    "Universal basic income (UBI) is a policy proposal in which a government guarantees a regular, unconditional cash payment to all citizens, regardless of their income or employment status. The idea behind UBI is to reduce poverty and income inequality by ensuring that everyone has a basic level of financial security. Proponents argue that UBI could also provide people with the freedom to pursue education, entrepreneurship, or creative endeavors without the fear of financial instability. Critics, however, question the economic feasibility of UBI and whether it would lead to disincentives to work. While no country has fully implemented UBI, some pilot programs are being tested to assess its potential impact.",
    "Education inequality continues to be a major social issue, often reflecting broader disparities in wealth and access to resources. In many countries, children from low-income families are less likely to have access to quality education, which can perpetuate cycles of poverty and inequality. Factors such as inadequate school funding, lack of access to technology, and limited educational opportunities can contribute to this problem. Addressing education inequality requires systemic changes in the education system, as well as policies that ensure all students have access to the resources and opportunities they need to succeed.",
];

/// Add `passages` in order, returning how many were condensed.
pub async fn seed(store: &MemoryStore, passages: &[&str], progress: &ProgressBar) -> Result<usize> {
    let mut condensed = 0;
    for (i, passage) in passages.iter().enumerate() {
        let outcome = store
            .add_detailed(passage)
            .await
            .with_context(|| format!("Failed to store passage {}", i + 1))?;
        tracing::debug!(
            ordinal = outcome.ordinal,
            token_count = outcome.token_count,
            condensed = outcome.condensed,
            "passage stored"
        );
        if outcome.condensed {
            condensed += 1;
        }
        progress.inc(1);
    }
    Ok(condensed)
}

/// Run the demo.
///
/// # Examples
///
/// ```bash
/// mnemo demo
/// mnemo --offline demo --question "What drove the Industrial Revolution?" -k 2
/// ```
pub async fn run(
    state: &AppState,
    question: Option<String>,
    k: Option<usize>,
    mode: OutputMode,
) -> Result<()> {
    let store = state.build_store(mode.is_styled()).await?;
    let k = state.top_k(k);
    let question = question.unwrap_or_else(|| DEFAULT_QUESTION.to_string());

    let progress = if mode.is_styled() {
        ProgressBar::new(SAMPLE_PASSAGES.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );
    progress.set_message("Condensing and embedding passages...");

    let span = tracing::info_span!(
        "seed",
        { attrs::MNEMO_OPERATION_NAME } = attrs::OP_SEED,
        { attrs::MNEMO_MEMORY_COUNT } = SAMPLE_PASSAGES.len(),
        { attrs::MNEMO_EMBEDDER_MODEL } = store.embedder_model(),
        { attrs::MNEMO_CONDENSER_NAME } = store.condenser_name(),
    );
    let condensed = seed(&store, &SAMPLE_PASSAGES, &progress)
        .instrument(span)
        .await?;
    progress.finish_and_clear();

    if mode.is_styled() {
        println!();
        println!(
            "  {} Stored {} passages ({} condensed)",
            style("✓").green().bold(),
            style(SAMPLE_PASSAGES.len()).bold(),
            condensed
        );
    }

    let results = super::query::ask(&store, &question, k).await?;
    print_results(mode, &question, k, &results)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mnemo_core::memory::box_condenser::BoxCondenser;
    use mnemo_core::memory::box_embedder::BoxEmbedder;
    use mnemo_core::memory::tokens::{EstimatedTokenCounter, TokenCounter};
    use mnemo_infra::llm::lead::LeadSentenceCondenser;
    use mnemo_infra::vector::hashing::HashingEmbedder;
    use mnemo_types::config::MemoryConfig;

    use super::*;

    fn offline_store() -> MemoryStore {
        let tokens = Arc::new(EstimatedTokenCounter);
        MemoryStore::new(
            BoxEmbedder::new(HashingEmbedder::default()),
            BoxCondenser::new(LeadSentenceCondenser::new(tokens.clone())),
            tokens,
            MemoryConfig::default(),
        )
    }

    #[test]
    fn test_sample_passages_are_long() {
        let counter = EstimatedTokenCounter;
        for passage in SAMPLE_PASSAGES {
            assert!(counter.count_tokens(passage) >= 30);
        }
    }

    #[tokio::test]
    async fn test_seed_condenses_every_passage() {
        let store = offline_store();
        let condensed = seed(&store, &SAMPLE_PASSAGES, &ProgressBar::hidden())
            .await
            .unwrap();

        assert_eq!(condensed, SAMPLE_PASSAGES.len());
        assert_eq!(store.len().await, SAMPLE_PASSAGES.len());

        let records = store.records().await;
        assert!(records[5].text.starts_with("Vaccines stimulate the immune system"));
        for (ordinal, record) in records.iter().enumerate() {
            assert_eq!(record.ordinal, ordinal);
            assert!(record.text.len() < SAMPLE_PASSAGES[ordinal].len());
        }
    }

    #[tokio::test]
    async fn test_default_question_returns_k_distinct_memories() {
        let store = offline_store();
        seed(&store, &SAMPLE_PASSAGES, &ProgressBar::hidden())
            .await
            .unwrap();

        let results = super::super::query::ask(&store, DEFAULT_QUESTION, 3)
            .await
            .unwrap();
        assert_eq!(results.len(), 3);
        assert!(results[0].distance <= results[1].distance);
        assert!(results[1].distance <= results[2].distance);
        assert_ne!(results[0].ordinal, results[1].ordinal);
        assert_ne!(results[1].ordinal, results[2].ordinal);
    }
}
