//! Configuration loading and parsing

use anyhow::{Context, Result};
use ir_command_codes::ResolverConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Load configuration from a TOML file
///
/// Relative remote paths are taken relative to the config file's directory.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    if let Some(base) = path.parent() {
        for remote in config.resolver.remotes.iter_mut() {
            if remote.is_relative() {
                *remote = base.join(&*remote);
            }
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [resolver]
            include_builtin = false
            remotes = ["remotes/car-mp3.toml"]

            [output]
            format = "json"
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert!(!config.resolver.include_builtin);
        assert_eq!(config.resolver.remotes.len(), 1);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.resolver.include_builtin);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_remote_paths_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[resolver]\nremotes = [\"tv.toml\", \"/abs/dvd.toml\"]\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.resolver.remotes[0], dir.path().join("tv.toml"));
        assert_eq!(config.resolver.remotes[1], PathBuf::from("/abs/dvd.toml"));
    }
}
