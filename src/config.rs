use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

/// Config file read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "launch-dash.toml";

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Parser)]
#[command(name = "launch-dash", version, about = "SpaceX launch records dashboard")]
pub struct Cli {
    /// Launch records file (.csv, .json or .parquet)
    pub data: Option<PathBuf>,

    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Initially selected launch site ("ALL" for every site)
    #[arg(long)]
    pub site: Option<String>,
}

// ---------------------------------------------------------------------------
// Config file
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub data: Option<PathBuf>,
    pub default_site: Option<String>,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 1200.0,
            height: 800.0,
        }
    }
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("parsing config")
    }

    fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in {}", path.display()))
    }
}

// ---------------------------------------------------------------------------
// Resolved settings: CLI > file > defaults
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data: Option<PathBuf>,
    pub default_site: Option<String>,
    pub window: WindowConfig,
}

impl Settings {
    /// Merge the CLI with the config file. An explicit `--config` must exist;
    /// the default file is optional.
    pub fn resolve(cli: Cli) -> Result<Self> {
        Self::resolve_in(cli, Path::new("."))
    }

    fn resolve_in(cli: Cli, cwd: &Path) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::read(path)?,
            None => {
                let path = cwd.join(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    FileConfig::read(&path)?
                } else {
                    FileConfig::default()
                }
            }
        };

        Ok(Settings {
            data: cli.data.or(file.data),
            default_site: cli.site.or(file.default_site),
            window: file.window,
        })
    }
}
