//! `mnemo session`: interactive add/ask loop over one in-memory store.
//!
//! Commands, one per line:
//!
//! - `add <text>`: store a text (condensed when long)
//! - `ask <question>`: show the closest memories
//! - `list`: show every stored memory
//! - `help`: show the commands
//! - `quit` / `exit` or end of input: leave

use std::io::Write;

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use mnemo_core::memory::store::MemoryStore;

use super::output::{OutputMode, print_results, truncate_chars};
use crate::state::AppState;

#[derive(Debug, PartialEq, Eq)]
pub enum SessionCommand<'a> {
    Add(&'a str),
    Ask(&'a str),
    List,
    Help,
    Quit,
    Empty,
    Unknown(&'a str),
}

/// Parse one input line. The verb is case-insensitive.
pub fn parse_command(line: &str) -> SessionCommand<'_> {
    let line = line.trim();
    if line.is_empty() {
        return SessionCommand::Empty;
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_lowercase().as_str() {
        "add" if !rest.is_empty() => SessionCommand::Add(rest),
        "ask" if !rest.is_empty() => SessionCommand::Ask(rest),
        "list" | "ls" => SessionCommand::List,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        _ => SessionCommand::Unknown(line),
    }
}

/// Counts reported when the session ends.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub added: usize,
    pub asked: usize,
}

fn print_help() {
    println!();
    println!("  {}  store a text", style("add <text>").cyan());
    println!("  {}  show the closest memories", style("ask <question>").cyan());
    println!("  {}  show every stored memory", style("list").cyan());
    println!("  {}  leave the session", style("quit").cyan());
    println!();
}

async fn print_records(store: &MemoryStore, mode: OutputMode) -> Result<()> {
    let records = store.records().await;

    match mode {
        OutputMode::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputMode::Quiet => {
            for record in &records {
                println!("{}", record.text);
            }
        }
        OutputMode::Styled => {
            if records.is_empty() {
                println!("  {} Nothing stored yet.", style("i").blue().bold());
                return Ok(());
            }
            let mut table = Table::new();
            table.load_preset(presets::UTF8_FULL_CONDENSED);
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec![
                Cell::new("#").fg(Color::White),
                Cell::new("Memory").fg(Color::White),
            ]);
            for record in &records {
                table.add_row(vec![
                    Cell::new(record.ordinal).fg(Color::Cyan),
                    Cell::new(truncate_chars(&record.text, 200)).fg(Color::White),
                ]);
            }
            println!("{table}");
        }
    }
    Ok(())
}

/// Drive the session over `input` until `quit` or end of input.
///
/// Failed `add` and `ask` commands are reported and the session continues;
/// the store is unchanged by a failed `add`.
pub async fn run_loop<R>(
    store: &MemoryStore,
    input: R,
    k: usize,
    mode: OutputMode,
) -> Result<SessionSummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut summary = SessionSummary::default();

    loop {
        if mode.is_styled() {
            print!("{} ", style("mnemo>").cyan().bold());
            std::io::stdout().flush()?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            SessionCommand::Add(text) => match store.add_detailed(text).await {
                Ok(outcome) => {
                    summary.added += 1;
                    match mode {
                        OutputMode::Json => println!("{}", serde_json::to_string(&outcome)?),
                        OutputMode::Quiet => {}
                        OutputMode::Styled => {
                            let how = if outcome.condensed { "condensed" } else { "verbatim" };
                            println!(
                                "  {} #{} stored {how}: {}",
                                style("✓").green().bold(),
                                outcome.ordinal,
                                truncate_chars(&outcome.stored_text, 120)
                            );
                        }
                    }
                }
                Err(e) => eprintln!("  {} {e}", style("✗").red().bold()),
            },
            SessionCommand::Ask(question) => match store.query_ranked(question, k).await {
                Ok(results) => {
                    summary.asked += 1;
                    print_results(mode, question, k, &results)?;
                }
                Err(e) => eprintln!("  {} {e}", style("✗").red().bold()),
            },
            SessionCommand::List => print_records(store, mode).await?,
            SessionCommand::Help => print_help(),
            SessionCommand::Quit => break,
            SessionCommand::Empty => {}
            SessionCommand::Unknown(text) => {
                eprintln!(
                    "  {} Unknown command '{}'. Type 'help' for commands.",
                    style("?").yellow().bold(),
                    text
                );
            }
        }
    }

    Ok(summary)
}

/// Start an interactive session on stdin.
///
/// # Examples
///
/// ```bash
/// mnemo session
/// mnemo --offline session
/// ```
pub async fn run(state: &AppState, mode: OutputMode) -> Result<()> {
    let store = state.build_store(mode.is_styled()).await?;
    let k = state.top_k(None);

    if mode.is_styled() {
        println!();
        println!(
            "  {} mnemo session ({} / {})",
            style("*").cyan().bold(),
            style(store.embedder_model()).dim(),
            style(store.condenser_name()).dim()
        );
        print_help();
    }

    let summary = run_loop(&store, BufReader::new(tokio::io::stdin()), k, mode).await?;
    tracing::info!(added = summary.added, asked = summary.asked, "session ended");

    if mode.is_styled() {
        println!();
        println!(
            "  {} {} added, {} asked",
            style("Bye.").dim(),
            summary.added,
            summary.asked
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mnemo_core::memory::box_condenser::BoxCondenser;
    use mnemo_core::memory::box_embedder::BoxEmbedder;
    use mnemo_core::memory::tokens::EstimatedTokenCounter;
    use mnemo_infra::llm::lead::LeadSentenceCondenser;
    use mnemo_infra::vector::hashing::HashingEmbedder;
    use mnemo_types::config::MemoryConfig;

    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("add  the cat sat "), SessionCommand::Add("the cat sat"));
        assert_eq!(parse_command("ASK where?"), SessionCommand::Ask("where?"));
        assert_eq!(parse_command("list"), SessionCommand::List);
        assert_eq!(parse_command("exit"), SessionCommand::Quit);
        assert_eq!(parse_command("   "), SessionCommand::Empty);
        assert_eq!(parse_command("add"), SessionCommand::Unknown("add"));
        assert_eq!(parse_command("remember x"), SessionCommand::Unknown("remember x"));
    }

    #[tokio::test]
    async fn test_run_loop_adds_and_asks() {
        let tokens = Arc::new(EstimatedTokenCounter);
        let store = MemoryStore::new(
            BoxEmbedder::new(HashingEmbedder::default()),
            BoxCondenser::new(LeadSentenceCondenser::new(tokens.clone())),
            tokens,
            MemoryConfig::default(),
        );

        let input: &[u8] = b"add the cat sat on the mat\n\
                             add stock markets fell\n\
                             bogus\n\
                             ask where is the cat\n\
                             list\n\
                             quit\n\
                             add never reached\n";

        let summary = run_loop(&store, input, 1, OutputMode::Quiet).await.unwrap();
        assert_eq!(summary, SessionSummary { added: 2, asked: 1 });
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_run_loop_stops_at_end_of_input() {
        let tokens = Arc::new(EstimatedTokenCounter);
        let store = MemoryStore::new(
            BoxEmbedder::new(HashingEmbedder::new(8)),
            BoxCondenser::new(LeadSentenceCondenser::new(tokens.clone())),
            tokens,
            MemoryConfig::default(),
        );

        let input: &[u8] = b"add one\nadd two";
        let summary = run_loop(&store, input, 3, OutputMode::Quiet).await.unwrap();
        assert_eq!(summary.added, 2);
    }
}
