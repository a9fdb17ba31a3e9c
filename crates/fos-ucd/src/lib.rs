//! fOS UCD - Shaping Table Compiler
//!
//! This crate turns Unicode Character Database files into the tables the
//! fOS complex-script shaper links against:
//! - Codepoint to Universal Shaping Engine category (paged, compacted table)
//! - Per-script prohibited vowel sequence matchers (dotted circle insertion)
//! - Extended_Pictographic ranges (emoji cluster handling)
//!
//! Every stage is a pure transform of the previous stage's output. Any
//! violated invariant aborts the whole build.

pub mod blocks;
pub mod classify;
pub mod codegen;
pub mod config;
pub mod constraints;
pub mod emoji;
pub mod ingest;
pub mod parser;
pub mod properties;
pub mod script;
pub mod source;
pub mod table;

pub use blocks::{Block, BlockTable};
pub use classify::{classify, classify_all, Category, ClassifiedSet, Position, Role};
pub use config::{CompilerConfig, TableLayout};
pub use constraints::{
    compile_matchers, parse_constraints, ConstraintSequence, ConstraintTrie, GlyphBuffer,
    GlyphRecord, Matcher, ScriptMatchers, TrieNode, DOTTED_CIRCLE,
};
pub use emoji::PictographicSet;
pub use ingest::{ingest, CodepointRecord, RecordSet};
pub use script::{ScriptTable, ScriptTag};
pub use source::{DataSource, DirSource, MemorySource, SourceFile};
pub use table::{coalesce, compile_table, DispatchTable, Range, Region, MIN_OCCUPANCY};

use std::path::PathBuf;

/// Largest Unicode scalar value
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// Compiler error types
#[derive(Debug, thiserror::Error)]
pub enum UcdError {
    #[error("classification ambiguity at U+{codepoint:04X} ({attributes}): matched {matched:?}")]
    ClassificationAmbiguity {
        codepoint: u32,
        attributes: String,
        matched: Vec<Role>,
    },

    #[error("position ambiguity at U+{codepoint:04X}: {role:?} with {position} matched {matched:?}")]
    PositionAmbiguity {
        codepoint: u32,
        role: Role,
        position: properties::PositionalCategory,
        matched: Vec<Position>,
    },

    #[error("U+{codepoint:04X}: {role:?} cannot carry positional category {position}")]
    StrayPosition {
        codepoint: u32,
        role: Role,
        position: properties::PositionalCategory,
    },

    #[error("table too sparse: occupancy {ratio:.4} below {floor} ({used} of {total} entries used)")]
    OccupancyViolation {
        ratio: f64,
        floor: f64,
        used: usize,
        total: usize,
    },

    #[error("{file}:{line}: {reason}")]
    Malformed {
        file: String,
        line: usize,
        reason: String,
    },

    #[error("missing source file {file} in {location}; fetch it from {hint}")]
    MissingSource {
        file: String,
        location: String,
        hint: String,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("prohibited sequence {sequence:04X?} conflicts with another {script} sequence")]
    ConstraintConflict { script: String, sequence: Vec<u32> },

    #[error("prohibited sequence {sequence:04X?} starts with a codepoint that has no script")]
    UnscriptedConstraint { sequence: Vec<u32> },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, UcdError>;

/// Ingest, classify and compact the category table.
pub fn build_classifier(source: &dyn DataSource, config: &CompilerConfig) -> Result<DispatchTable> {
    let records = ingest(source, config)?;
    let classified = classify_all(&records)?;
    compile_table(&classified, &config.layout)
}

/// Build the per-script prohibited sequence matchers.
pub fn build_matchers(source: &dyn DataSource) -> Result<ScriptMatchers> {
    let scripts = ScriptTable::parse(&source.read(SourceFile::Scripts)?)?;
    let sequences = parse_constraints(&source.read(SourceFile::InvalidClusters)?)?;
    compile_matchers(&sequences, &scripts)
}

/// Build the Extended_Pictographic range set.
pub fn build_pictographic(source: &dyn DataSource) -> Result<PictographicSet> {
    PictographicSet::parse(&source.read(SourceFile::EmojiData)?)
}
