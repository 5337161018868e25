//! CLI command definitions for the `mnemo` binary.
//!
//! Uses clap derive macros for argument parsing. Every command builds the
//! memory store it needs from the effective configuration; the store lives
//! only as long as the process.

pub mod config;
pub mod demo;
pub mod output;
pub mod query;
pub mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Semantic memory for generated text: condense, embed, recall.
#[derive(Parser)]
#[command(name = "mnemo", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except results and errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file to use instead of `$MNEMO_DATA_DIR/config.toml`.
    #[arg(long, global = true, env = "MNEMO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Use the hashing embedder and lead-sentence condenser (no model, no network).
    #[arg(long, global = true)]
    pub offline: bool,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long, global = true, hide = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Seed the store with the bundled sample passages and ask a question.
    Demo {
        /// Question to ask once the passages are stored.
        #[arg(short, long)]
        question: Option<String>,

        /// Number of memories to return (defaults to memory.default_top_k).
        #[arg(short)]
        k: Option<usize>,
    },

    /// Ingest every non-empty line of a file, then ask a question.
    Query {
        /// File with one text per line.
        #[arg(short, long)]
        file: PathBuf,

        /// Number of memories to return (defaults to memory.default_top_k).
        #[arg(short)]
        k: Option<usize>,

        /// Question to ask.
        question: String,
    },

    /// Interactive session: add texts and ask questions against them.
    Session,

    /// Print the effective configuration.
    Config,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_query_with_globals() {
        let cli = Cli::try_parse_from([
            "mnemo",
            "--offline",
            "query",
            "--file",
            "notes.txt",
            "-k",
            "5",
            "what changed?",
            "--json",
        ])
        .unwrap();

        assert!(cli.offline);
        assert!(cli.json);
        match cli.command {
            Commands::Query { file, k, question } => {
                assert_eq!(file, PathBuf::from("notes.txt"));
                assert_eq!(k, Some(5));
                assert_eq!(question, "what changed?");
            }
            _ => panic!("expected query command"),
        }
    }

    #[test]
    fn test_parse_demo_defaults() {
        let cli = Cli::try_parse_from(["mnemo", "-vv", "demo"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Demo { question, k } => {
                assert!(question.is_none());
                assert!(k.is_none());
            }
            _ => panic!("expected demo command"),
        }
    }
}
