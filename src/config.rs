//! Persisted settings.
//!
//! Read from `<config dir>/wikidiff/config.toml`, then overridden by
//! `WIKIDIFF_*` environment variables and finally by command-line flags.

use crate::adapters::AlignAlgorithm;
use crate::ui::html::{ActionBinding, DataBinding, ScriptBinding};
use crate::ui::styles::DEFAULT_STYLE_SHEET;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONTEXT_LINES: usize = 2;

/// How row actions are exposed to the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BindingKind {
    /// JSON in `data-click` / `data-dblclick` attributes.
    #[default]
    Data,
    /// `window.external` script callbacks.
    Script,
}

impl BindingKind {
    pub fn binding(self) -> Box<dyn ActionBinding> {
        match self {
            BindingKind::Data => Box::new(DataBinding),
            BindingKind::Script => Box::new(ScriptBinding),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub context_lines: usize,
    pub style_sheet: PathBuf,
    pub algorithm: AlignAlgorithm,
    pub binding: BindingKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            context_lines: DEFAULT_CONTEXT_LINES,
            style_sheet: PathBuf::from(DEFAULT_STYLE_SHEET),
            algorithm: AlignAlgorithm::default(),
            binding: BindingKind::default(),
        }
    }
}

impl Config {
    /// Load the user config file and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match config_path() {
            Ok(path) => Self::load_from(&path)?,
            Err(e) => {
                tracing::debug!(error = %e, "no config directory, using defaults");
                Self::default()
            }
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Apply `WIKIDIFF_CONTEXT_LINES` and `WIKIDIFF_STYLE_SHEET`.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = var("WIKIDIFF_CONTEXT_LINES") {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                self.context_lines = trimmed.parse().with_context(|| {
                    format!("WIKIDIFF_CONTEXT_LINES must be a non-negative integer, got '{}'", trimmed)
                })?;
            }
        }

        if let Some(value) = var("WIKIDIFF_STYLE_SHEET") {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                self.style_sheet = PathBuf::from(trimmed);
            }
        }

        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().context("config dir not found")?;
    Ok(dir.join("wikidiff").join("config.toml"))
}
