use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Error;

pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

/// The [youtube] block from config.toml.
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct YoutubeConfig {
    pub api_key: Option<String>,
    pub api_key_command: Option<String>,
}

/// Top-level ytpick config file structure.
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct YtpickConfig {
    pub youtube: Option<YoutubeConfig>,
}

impl YtpickConfig {
    /// Load config from ~/.ytpick/config.toml. Returns default if the file
    /// doesn't exist.
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        if !path.exists() {
            return Ok(YtpickConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: YtpickConfig =
            toml::from_str(&content).with_context(|| "Failed to parse config.toml")?;
        Ok(config)
    }

    /// Display config with secrets redacted.
    pub fn display_redacted(&self) -> String {
        let mut lines = Vec::new();
        if let Some(ref yt) = self.youtube {
            lines.push("[youtube]".to_string());
            if let Some(ref key) = yt.api_key {
                // Char-wise so a non-ASCII key can't split a code point.
                let chars: Vec<char> = key.chars().collect();
                let redacted = if chars.len() > 8 {
                    format!(
                        "{}...{}",
                        chars[..4].iter().collect::<String>(),
                        chars[chars.len() - 4..].iter().collect::<String>()
                    )
                } else {
                    "****".to_string()
                };
                lines.push(format!("  api_key = \"{redacted}\""));
            }
            if let Some(ref cmd) = yt.api_key_command {
                lines.push(format!("  api_key_command = \"{cmd}\""));
            }
        }
        if lines.len() <= 1 {
            lines.push("(no API key configured)".to_string());
        }
        lines.join("\n")
    }
}

/// Resolve the Data API key through the chain:
/// CLI flag > YOUTUBE_API_KEY env var > config api_key > config command.
///
/// Runs before any network call; a missing key blocks the whole action.
pub fn resolve_api_key(cli_flag: Option<&str>, config: &YtpickConfig) -> Result<String> {
    if let Some(key) = cli_flag {
        if !key.is_empty() {
            return Ok(key.to_string());
        }
    }

    if let Ok(val) = std::env::var(API_KEY_ENV) {
        let val = val.trim().to_string();
        if !val.is_empty() {
            return Ok(val);
        }
    }

    if let Some(ref yt) = config.youtube {
        if let Some(ref key) = yt.api_key {
            if !key.is_empty() {
                return Ok(key.clone());
            }
        }

        if let Some(ref cmd) = yt.api_key_command {
            if !cmd.is_empty() {
                let output = std::process::Command::new("sh")
                    .arg("-c")
                    .arg(cmd)
                    .output()
                    .with_context(|| format!("Failed to run api_key_command: {cmd}"))?;

                if !output.status.success() {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    bail!(
                        "api_key_command failed (exit {}): {}",
                        output.status.code().unwrap_or(-1),
                        stderr.trim()
                    );
                }

                let secret = String::from_utf8(output.stdout)
                    .context("api_key_command output is not valid UTF-8")?
                    .trim()
                    .to_string();

                if !secret.is_empty() {
                    return Ok(secret);
                }
            }
        }
    }

    Err(Error::MissingApiKey.into())
}

/// Path to the config file: ~/.ytpick/config.toml
pub fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".ytpick").join("config.toml"))
}

/// Default config template content.
pub fn default_config_template() -> &'static str {
    r#"# ~/.ytpick/config.toml
# Credential resolution order: --api-key flag > YOUTUBE_API_KEY env > api_key > api_key_command

[youtube]
# api_key = "your-youtube-data-api-v3-key"
# api_key_command = "your-secrets-manager-command-here"
"#
}

/// Create the default config file if it doesn't already exist.
pub fn init_config() -> Result<bool> {
    let path = config_path()?;
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, default_config_template())?;
    Ok(true)
}
