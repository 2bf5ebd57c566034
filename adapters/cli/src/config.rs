//! Display configuration loaded from an optional TOML file.
//!
//! Resolution order is command line over file over built-in defaults, field
//! by field, so a config file can pin the board size while the tick rate is
//! still tweakable per run.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

pub(crate) const DEFAULT_WIDTH: u32 = 8;
pub(crate) const DEFAULT_CELL_LENGTH: f32 = 50.0;
pub(crate) const DEFAULT_TICKS_PER_SECOND: u32 = 5;

/// Optional display settings as they appear in the TOML file.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct DisplayConfig {
    pub(crate) width: Option<u32>,
    pub(crate) cell_length: Option<f32>,
    pub(crate) ticks_per_second: Option<u32>,
}

impl DisplayConfig {
    /// Reads and parses the configuration file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        parse(&contents).with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

fn parse(contents: &str) -> Result<DisplayConfig> {
    Ok(toml::from_str(contents)?)
}

/// Per-field command-line overrides applied on top of the file.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Overrides {
    pub(crate) width: Option<u32>,
    pub(crate) cell_length: Option<f32>,
    pub(crate) ticks_per_second: Option<u32>,
}

/// Fully resolved display settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Settings {
    pub(crate) width: u32,
    pub(crate) cell_length: f32,
    pub(crate) ticks_per_second: u32,
}

impl Settings {
    /// Merges overrides, file values, and defaults, in that precedence.
    pub(crate) fn resolve(overrides: Overrides, file: Option<DisplayConfig>) -> Self {
        let file = file.unwrap_or_default();
        Self {
            width: overrides.width.or(file.width).unwrap_or(DEFAULT_WIDTH),
            cell_length: overrides
                .cell_length
                .or(file.cell_length)
                .unwrap_or(DEFAULT_CELL_LENGTH),
            ticks_per_second: overrides
                .ticks_per_second
                .or(file.ticks_per_second)
                .unwrap_or(DEFAULT_TICKS_PER_SECOND),
        }
    }
}
