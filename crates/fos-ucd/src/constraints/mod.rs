//! Prohibited Vowel Sequences
//!
//! Reads IndicShapingInvalidCluster.txt, groups each sequence under the
//! script of its first codepoint and builds one matcher per script.
//!
//! ```text
//! 0905 0946       # DEVANAGARI LETTER A + DEVANAGARI VOWEL SIGN SHORT E
//! ```

mod matcher;
mod trie;

pub use matcher::{GlyphBuffer, GlyphRecord, Matcher, ScriptMatchers, DOTTED_CIRCLE};
pub use trie::{Conflict, ConstraintTrie, TrieNode};

use std::collections::HashMap;

use crate::parser::{parse_hex, strip_comment};
use crate::script::{ScriptTable, ScriptTag};
use crate::{Result, UcdError};

const FILE: &str = "ms-use/IndicShapingInvalidCluster.txt";

/// One prohibited codepoint sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintSequence {
    /// 1-based line number in the source file
    pub line: usize,
    pub codepoints: Vec<u32>,
}

/// Parse the prohibited sequence list
pub fn parse_constraints(text: &str) -> Result<Vec<ConstraintSequence>> {
    let mut sequences = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let field = strip_comment(raw).split(';').next().unwrap_or_default();
        let codepoints = field
            .split_whitespace()
            .map(|cp| {
                parse_hex(cp).ok_or_else(|| UcdError::Malformed {
                    file: FILE.to_string(),
                    line,
                    reason: format!("invalid codepoint '{cp}'"),
                })
            })
            .collect::<Result<Vec<u32>>>()?;

        match codepoints.len() {
            0 => continue,
            1 => {
                return Err(UcdError::Malformed {
                    file: FILE.to_string(),
                    line,
                    reason: format!("prohibited sequence is too short: {codepoints:04X?}"),
                });
            }
            _ => sequences.push(ConstraintSequence { line, codepoints }),
        }
    }
    Ok(sequences)
}

/// Build the per-script matchers, ordered as `scripts` orders them
pub fn compile_matchers(sequences: &[ConstraintSequence], scripts: &ScriptTable) -> Result<ScriptMatchers> {
    let mut tries: HashMap<ScriptTag, ConstraintTrie> = HashMap::new();
    for sequence in sequences {
        let first = sequence.codepoints.first().copied().unwrap_or_default();
        let script = scripts
            .script_of(first)
            .ok_or_else(|| UcdError::UnscriptedConstraint {
                sequence: sequence.codepoints.clone(),
            })?;
        tries
            .entry(script.clone())
            .or_insert_with(|| ConstraintTrie::new(script.clone()))
            .insert(&sequence.codepoints)?;
    }

    let mut tries: Vec<ConstraintTrie> = tries.into_values().collect();
    tries.sort_by_key(|trie| scripts.order_of(trie.script()));

    for trie in &tries {
        tracing::debug!("{}: {} prohibited sequences", trie.script(), trie.len());
    }
    tracing::info!(
        "Compiled {} prohibited sequences into {} script matchers",
        sequences.len(),
        tries.len()
    );
    Ok(ScriptMatchers::new(tries.into_iter().map(Matcher::new).collect()))
}
