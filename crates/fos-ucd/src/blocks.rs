//! Unicode Blocks
//!
//! Block names from Blocks.txt are interned once; records carry a small
//! `Block` handle and range merging compares handles, not strings.

use std::collections::HashMap;
use std::sync::Arc;

use crate::parser::{CodepointRange, UcdReader};
use crate::Result;

/// Name given to codepoints outside every block
pub const NO_BLOCK: &str = "No_Block";

/// Interned block reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Block(u16);

impl Block {
    /// The `No_Block` handle, always interned first
    pub const NONE: Block = Block(0);

    pub fn id(self) -> u16 {
        self.0
    }
}

impl Default for Block {
    fn default() -> Self {
        Block::NONE
    }
}

/// Block name interner plus the codepoint ranges of each block
#[derive(Debug, Clone)]
pub struct BlockTable {
    names: Vec<Arc<str>>,
    lookup: HashMap<Arc<str>, u16>,
    /// Sorted by start, non-overlapping
    ranges: Vec<(CodepointRange, Block)>,
}

impl Default for BlockTable {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockTable {
    pub fn new() -> Self {
        let mut table = Self {
            names: Vec::new(),
            lookup: HashMap::new(),
            ranges: Vec::new(),
        };
        table.intern(NO_BLOCK);
        table
    }

    /// Parse Blocks.txt
    pub fn parse(text: &str) -> Result<Self> {
        let mut table = Self::new();
        for line in UcdReader::new("Blocks.txt", text) {
            let line = line?;
            let name = line.field(1).unwrap_or_default();
            table.insert_range(line.range, name);
        }
        tracing::debug!("Parsed {} blocks", table.ranges.len());
        Ok(table)
    }

    /// Intern a block name
    pub fn intern(&mut self, name: &str) -> Block {
        if let Some(&id) = self.lookup.get(name) {
            return Block(id);
        }

        let id = self.names.len() as u16;
        let arc: Arc<str> = name.into();
        self.names.push(arc.clone());
        self.lookup.insert(arc, id);
        Block(id)
    }

    /// Assign `range` to the block `name`
    pub fn insert_range(&mut self, range: CodepointRange, name: &str) -> Block {
        let block = self.intern(name);
        let at = self.ranges.partition_point(|(r, _)| r.start < range.start);
        self.ranges.insert(at, (range, block));
        block
    }

    /// Block containing `codepoint`, `Block::NONE` if unassigned
    pub fn block_of(&self, codepoint: u32) -> Block {
        let at = self.ranges.partition_point(|(r, _)| r.start <= codepoint);
        match at.checked_sub(1).map(|i| &self.ranges[i]) {
            Some((range, block)) if range.contains(codepoint) => *block,
            _ => Block::NONE,
        }
    }

    /// Find an already interned block by name
    pub fn find(&self, name: &str) -> Option<Block> {
        self.lookup.get(name).map(|&id| Block(id))
    }

    /// Name of `block`
    pub fn name(&self, block: Block) -> &str {
        self.names
            .get(block.0 as usize)
            .map(|s| s.as_ref())
            .unwrap_or(NO_BLOCK)
    }

    /// Number of interned names, `No_Block` included
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
