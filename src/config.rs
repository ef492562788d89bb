use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::DEFAULT_PALETTE;
use crate::error::OsmViewError;
use crate::feature::{AssembleOptions, ColorBasis};
use crate::query::{DEFAULT_ROW_LIMIT, ROW_LIMITS};
use crate::viewport::{DEFAULT_ROUND_TO, MAX_ROUND_TO};

/// Tunables for one explorer session. Every field has a default, so a
/// config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Decimal places viewport corners are rounded to.
    pub round_to: u32,
    /// Padding is `10^-pad_digits`; follows `round_to` when unset.
    pub pad_digits: Option<u32>,
    pub palette: Vec<String>,
    pub color_basis: ColorBasis,
    pub row_limit: usize,
    /// Number of distinct viewport queries kept in the LRU cache.
    pub cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            round_to: DEFAULT_ROUND_TO,
            pad_digits: None,
            palette: DEFAULT_PALETTE.iter().map(ToString::to_string).collect(),
            color_basis: ColorBasis::default(),
            row_limit: DEFAULT_ROW_LIMIT,
            cache_capacity: 32,
        }
    }
}

impl Config {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("[config] Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("[config] Failed to read {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("[config] Invalid config in {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), OsmViewError> {
        if self.round_to > MAX_ROUND_TO || self.pad_digits.is_some_and(|p| p > MAX_ROUND_TO) {
            return Err(OsmViewError::invalid(format!("round_to and pad_digits must be at most {MAX_ROUND_TO}")));
        }
        if self.pad_digits.is_some_and(|p| p > self.round_to) {
            return Err(OsmViewError::invalid("pad_digits must not exceed round_to"));
        }
        if self.palette.is_empty() {
            return Err(OsmViewError::invalid("palette is empty"));
        }
        if !ROW_LIMITS.contains(&self.row_limit) {
            return Err(OsmViewError::invalid(format!("row_limit must be one of {ROW_LIMITS:?}")));
        }
        if self.cache_capacity == 0 {
            return Err(OsmViewError::invalid("cache_capacity must be at least 1"));
        }
        Ok(())
    }

    pub fn pad_digits(&self) -> u32 { self.pad_digits.unwrap_or(self.round_to) }

    pub fn assemble_options(&self) -> AssembleOptions {
        AssembleOptions { palette: self.palette.clone(), color_basis: self.color_basis }
    }
}
