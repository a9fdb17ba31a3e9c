//! Prohibited Sequence Trie
//!
//! A node is either a `Chain` (the one remaining sequence below this point)
//! or a `Branch` keyed by the next codepoint. `Chain([])` marks the end of
//! a prohibited sequence. No stored sequence may be a prefix of another.

use std::collections::BTreeMap;

use crate::script::ScriptTag;
use crate::{Result, UcdError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrieNode {
    Chain(Vec<u32>),
    Branch(BTreeMap<u32, TrieNode>),
}

/// Insertion would make one sequence a prefix of another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict;

impl TrieNode {
    /// End of a prohibited sequence
    pub fn leaf() -> Self {
        TrieNode::Chain(Vec::new())
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TrieNode::Chain(rest) if rest.is_empty())
    }

    /// Add `sequence` below this node
    pub fn insert(&mut self, sequence: &[u32]) -> std::result::Result<(), Conflict> {
        match self {
            TrieNode::Chain(chain) => {
                if chain.as_slice() == sequence {
                    return Ok(());
                }
                if chain.starts_with(sequence) || sequence.starts_with(chain) {
                    return Err(Conflict);
                }
                // Both non-empty and diverging somewhere: split on the first element
                let mut children = BTreeMap::new();
                children.insert(chain[0], TrieNode::Chain(chain[1..].to_vec()));
                *self = TrieNode::Branch(children);
                self.insert(sequence)
            }
            TrieNode::Branch(children) => {
                let Some((&first, rest)) = sequence.split_first() else {
                    return Err(Conflict);
                };
                match children.get_mut(&first) {
                    Some(child) => child.insert(rest),
                    None => {
                        children.insert(first, TrieNode::Chain(rest.to_vec()));
                        Ok(())
                    }
                }
            }
        }
    }

    /// Length of the stored sequence `glyphs` starts with
    pub fn match_len(&self, glyphs: &[u32]) -> Option<usize> {
        match self {
            TrieNode::Chain(chain) => glyphs.starts_with(chain).then_some(chain.len()),
            TrieNode::Branch(children) => {
                let (first, rest) = glyphs.split_first()?;
                children.get(first)?.match_len(rest).map(|n| n + 1)
            }
        }
    }

    /// Number of sequences stored below this node
    pub fn sequence_count(&self) -> usize {
        match self {
            TrieNode::Chain(_) => 1,
            TrieNode::Branch(children) => children.values().map(TrieNode::sequence_count).sum(),
        }
    }
}

/// Prohibited sequences of one script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintTrie {
    script: ScriptTag,
    root: Option<TrieNode>,
}

impl ConstraintTrie {
    pub fn new(script: ScriptTag) -> Self {
        Self { script, root: None }
    }

    pub fn insert(&mut self, sequence: &[u32]) -> Result<()> {
        let conflict = || UcdError::ConstraintConflict {
            script: self.script.to_string(),
            sequence: sequence.to_vec(),
        };
        if sequence.is_empty() {
            return Err(conflict());
        }
        let result = match self.root.as_mut() {
            Some(root) => root.insert(sequence),
            None => {
                self.root = Some(TrieNode::Chain(sequence.to_vec()));
                Ok(())
            }
        };
        result.map_err(|Conflict| conflict())
    }

    /// Length of the prohibited run at the start of `glyphs`
    pub fn match_len(&self, glyphs: &[u32]) -> Option<usize> {
        self.root.as_ref()?.match_len(glyphs)
    }

    pub fn script(&self) -> &ScriptTag {
        &self.script
    }

    pub fn root(&self) -> Option<&TrieNode> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, TrieNode::sequence_count)
    }
}
