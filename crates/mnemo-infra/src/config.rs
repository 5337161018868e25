//! Configuration loader for mnemo.
//!
//! Reads `config.toml` from the data directory (`~/.mnemo/` by default) and
//! deserializes it into [`MnemoConfig`]. The data-directory file is optional:
//! defaults are used when it is missing or malformed. A file named explicitly
//! with `--config` goes through [`load_config_file`], which fails loudly.

use std::path::{Path, PathBuf};

use mnemo_types::config::MnemoConfig;
use mnemo_types::error::ConfigError;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "MNEMO_DATA_DIR";

/// Resolve the data directory: `$MNEMO_DATA_DIR`, else `~/.mnemo`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".mnemo"))
        .unwrap_or_else(|| PathBuf::from(".mnemo"))
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: returns [`MnemoConfig::default()`].
/// - Unreadable, unparsable or invalid file: logs a warning, returns the default.
pub async fn load_config(data_dir: &Path) -> MnemoConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return MnemoConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return MnemoConfig::default();
        }
    };

    match parse_config(&config_path, &content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            MnemoConfig::default()
        }
    }
}

/// Load and validate an explicitly named configuration file.
pub async fn load_config_file(path: &Path) -> Result<MnemoConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    parse_config(path, &content)
}

fn parse_config(path: &Path, content: &str) -> Result<MnemoConfig, ConfigError> {
    let config: MnemoConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config, MnemoConfig::default());
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
[memory]
condense_threshold = 64
default_top_k = 5

[embedder]
model = "bge-small-en-v1.5"
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.memory.condense_threshold, 64);
        assert_eq!(config.memory.default_top_k, 5);
        assert_eq!(config.embedder.model, "bge-small-en-v1.5");
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config, MnemoConfig::default());
    }

    #[tokio::test]
    async fn load_config_failing_validation_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "[memory]\ndefault_top_k = 0\n")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.memory.default_top_k, 3);
    }

    #[tokio::test]
    async fn load_config_file_missing_is_read_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_config_file(&tmp.path().join("absent.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[tokio::test]
    async fn load_config_file_malformed_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("mnemo.toml");
        tokio::fs::write(&path, "[memory\n").await.unwrap();

        let err = load_config_file(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[tokio::test]
    async fn load_config_file_rejects_inverted_bounds() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("mnemo.toml");
        tokio::fs::write(
            &path,
            "[memory]\ncondense_min_length = 50\ncondense_max_length = 20\n",
        )
        .await
        .unwrap();

        let err = load_config_file(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
