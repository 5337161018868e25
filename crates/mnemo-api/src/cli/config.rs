//! `mnemo config`: print the effective configuration.

use anyhow::Result;
use console::style;
use serde::Serialize;

use mnemo_types::config::MnemoConfig;

use super::output::OutputMode;
use crate::state::AppState;

#[derive(Serialize)]
struct ConfigReport<'a> {
    config_path: String,
    config_file_exists: bool,
    data_dir: String,
    offline: bool,
    config: &'a MnemoConfig,
}

/// Print where configuration came from and the values in effect.
pub async fn show(state: &AppState, mode: OutputMode) -> Result<()> {
    let exists = tokio::fs::try_exists(&state.config_path)
        .await
        .unwrap_or(false);

    if mode == OutputMode::Json {
        let report = ConfigReport {
            config_path: state.config_path.display().to_string(),
            config_file_exists: exists,
            data_dir: state.data_dir.display().to_string(),
            offline: state.offline,
            config: &state.config,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let rendered = toml::to_string_pretty(&state.config)?;

    if mode.is_styled() {
        println!();
        let source = if exists {
            style(state.config_path.display().to_string()).cyan()
        } else {
            style(format!("{} (not found, defaults)", state.config_path.display())).dim()
        };
        println!("  {} {}", style("Config:").bold(), source);
        println!(
            "  {} {}",
            style("Mode:").bold(),
            if state.offline { "offline" } else { "online" }
        );
        println!();
    }
    print!("{rendered}");
    Ok(())
}
