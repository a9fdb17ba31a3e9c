//! Compiler Configuration
//!
//! Loaded from JSON; every field has a default so an empty object is a
//! valid configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Result, UcdError};

/// Configuration for a table build
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Directory holding the UCD and ms-use source files
    pub data_dir: PathBuf,
    /// Unicode version the sources are expected to come from
    pub unicode_version: String,
    /// Blocks whose codepoints are left out of the category table
    pub blacklisted_blocks: Vec<String>,
    /// Category table shape
    pub layout: TableLayout,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            unicode_version: "13.0.0".into(),
            blacklisted_blocks: vec!["Samaritan".into(), "Thai".into(), "Lao".into()],
            layout: TableLayout::default(),
        }
    }
}

impl CompilerConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| UcdError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        self.layout.validate()
    }
}

/// Shape of the compacted category table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TableLayout {
    /// Region boundaries are rounded out to multiples of this
    pub alignment: u32,
    /// Largest distance from a region's end to the next range's start that
    /// still extends the region instead of opening a new one
    pub max_gap: u32,
    /// Codepoint bits dropped to get the dispatch page
    pub page_bits: u32,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            alignment: 8,
            max_gap: 1 + 16 * 3,
            page_bits: 12,
        }
    }
}

impl TableLayout {
    pub fn validate(&self) -> Result<()> {
        if self.alignment == 0 || !self.alignment.is_power_of_two() {
            return Err(UcdError::InvalidConfig(format!(
                "alignment must be a power of two, got {}",
                self.alignment
            )));
        }
        if !(1..=21).contains(&self.page_bits) {
            return Err(UcdError::InvalidConfig(format!(
                "page_bits must be within 1..=21, got {}",
                self.page_bits
            )));
        }
        Ok(())
    }
}
