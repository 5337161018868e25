//! mnemo CLI entry point.
//!
//! Binary name: `mnemo`
//!
//! Parses CLI arguments, sets up tracing, resolves configuration, then
//! dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::output::OutputMode;
use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,mnemo_core=debug,mnemo_infra=debug,mnemo_api=debug",
        _ => "trace",
    };
    mnemo_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need configuration
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "mnemo", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.config.as_deref(), cli.offline).await?;
    let mode = OutputMode::from_flags(cli.json, cli.quiet);

    let result = match cli.command {
        Commands::Demo { question, k } => cli::demo::run(&state, question, k, mode).await,
        Commands::Query { file, k, question } => {
            cli::query::run(&state, &file, &question, k, mode).await
        }
        Commands::Session => cli::session::run(&state, mode).await,
        Commands::Config => cli::config::show(&state, mode).await,
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    mnemo_observe::tracing_setup::shutdown_tracing();
    result
}
