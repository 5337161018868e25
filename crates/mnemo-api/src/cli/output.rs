//! Rendering of query results shared by the `demo`, `query` and `session`
//! commands.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use serde::Serialize;

use mnemo_types::memory::RankedMemory;

/// How results are printed, derived from the global `--json` / `--quiet` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Styled,
    Json,
    Quiet,
}

impl OutputMode {
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if json {
            OutputMode::Json
        } else if quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Styled
        }
    }

    pub fn is_styled(self) -> bool {
        self == OutputMode::Styled
    }
}

#[derive(Serialize)]
struct QueryReport<'a> {
    question: &'a str,
    k: usize,
    results: &'a [RankedMemory],
}

/// Shorten `text` to at most `max` characters, ending in `...` when cut.
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Print the answer to a question in the requested mode.
pub fn print_results(
    mode: OutputMode,
    question: &str,
    k: usize,
    results: &[RankedMemory],
) -> Result<()> {
    match mode {
        OutputMode::Json => {
            let report = QueryReport {
                question,
                k,
                results,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputMode::Quiet => {
            for memory in results {
                println!("{}", memory.text);
            }
        }
        OutputMode::Styled => {
            println!();
            println!("  {} {}", style("?").cyan().bold(), style(question).bold());
            println!();

            if results.is_empty() {
                println!(
                    "  {} No memories stored yet.",
                    style("i").blue().bold()
                );
                println!();
                return Ok(());
            }

            let mut table = Table::new();
            table.load_preset(presets::UTF8_FULL_CONDENSED);
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec![
                Cell::new("#").fg(Color::White),
                Cell::new("Distance").fg(Color::White),
                Cell::new("Memory").fg(Color::White),
            ]);

            for (rank, memory) in results.iter().enumerate() {
                table.add_row(vec![
                    Cell::new(rank + 1).fg(Color::Cyan),
                    Cell::new(format!("{:.4}", memory.distance)).fg(Color::Yellow),
                    Cell::new(truncate_chars(&memory.text, 200)).fg(Color::White),
                ]);
            }

            println!("{table}");
            println!();
        }
    }
    Ok(())
}
