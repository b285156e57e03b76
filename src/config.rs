// ABOUTME: Settings structures and TOML loading for the sshcfg command-line tool
// ABOUTME: Holds where the SSH config lives and how deeply includes may nest

use crate::ssh::SshPaths;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Config {
    pub ssh: SshConfig,
    #[serde(default)]
    pub parsing: ParsingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SshConfig {
    pub config_path: String,
    pub ssh_dir: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ParsingConfig {
    #[serde(default)]
    pub max_include_depth: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ssh: SshConfig {
                config_path: "~/.ssh/config".to_string(),
                ssh_dir: "~/.ssh".to_string(),
            },
            parsing: ParsingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    pub fn default_config_content() -> &'static str {
        r#"# sshcfg Configuration

[ssh]
# Config file read when no --file is given
config_path = "~/.ssh/config"
# Relative Include patterns are resolved against this directory
ssh_dir = "~/.ssh"

[parsing]
# Stop following Include directives nested deeper than this.
# Leave unset to follow includes without a limit (cycles are not detected).
# max_include_depth = 16

[output]
# "text" or "json"
format = "text"
"#
    }

    pub fn load_from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration")
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
        Self::load_from_str(&content)
    }

    /// Loads `path` if it exists, otherwise falls back to the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to determine config directory")?;
        Ok(config_dir.join("sshcfg").join("config.toml"))
    }

    pub fn expand_path(&mut self) -> Result<()> {
        self.ssh.config_path = expand_tilde(&self.ssh.config_path)?;
        self.ssh.ssh_dir = expand_tilde(&self.ssh.ssh_dir)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.ssh.config_path.is_empty() {
            anyhow::bail!("ssh.config_path cannot be empty");
        }

        if self.ssh.ssh_dir.is_empty() {
            anyhow::bail!("ssh.ssh_dir cannot be empty");
        }

        if self.parsing.max_include_depth == Some(0) {
            anyhow::bail!("max_include_depth must be greater than 0");
        }

        Ok(())
    }

    /// Paths after tilde expansion; call `expand_path` first.
    pub fn ssh_paths(&self) -> SshPaths {
        SshPaths {
            ssh_dir: PathBuf::from(&self.ssh.ssh_dir),
            config_path: PathBuf::from(&self.ssh.config_path),
        }
    }

    pub fn save_default_config(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(path, Self::default_config_content())
            .with_context(|| format!("Failed to write default config to: {}", path.display()))?;

        Ok(())
    }
}

fn expand_tilde(path: &str) -> Result<String> {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = dirs::home_dir().context("Failed to determine home directory")?;
        Ok(home.join(rest).to_string_lossy().into_owned())
    } else if path == "~" {
        let home = dirs::home_dir().context("Failed to determine home directory")?;
        Ok(home.to_string_lossy().into_owned())
    } else {
        Ok(path.to_string())
    }
}
