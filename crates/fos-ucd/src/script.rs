//! Script Membership
//!
//! Parsed from Scripts.txt. Scripts are ordered by the start of the first
//! range the file lists for them; matcher dispatch and generated code follow
//! that order.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::parser::{CodepointRange, UcdReader};
use crate::Result;

/// UCD long script name, e.g. `Devanagari`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScriptTag(Arc<str>);

impl ScriptTag {
    pub fn new(name: &str) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScriptTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScriptTag {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Codepoint → script map plus the canonical script order
#[derive(Debug, Clone, Default)]
pub struct ScriptTable {
    /// Canonical order
    scripts: Vec<ScriptTag>,
    order: HashMap<ScriptTag, usize>,
    /// Sorted by start
    ranges: Vec<(CodepointRange, usize)>,
}

impl ScriptTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse Scripts.txt
    pub fn parse(text: &str) -> Result<Self> {
        let mut table = Self::new();
        let mut first_starts = Vec::new();
        for line in UcdReader::new("Scripts.txt", text) {
            let line = line?;
            if table.insert_range(line.range, line.field(1).unwrap_or_default()) {
                first_starts.push(line.range.start);
            }
        }
        table.sort_scripts(&first_starts);
        table.ranges.sort_by_key(|(range, _)| range.start);
        tracing::debug!(
            "Parsed {} script ranges across {} scripts",
            table.ranges.len(),
            table.scripts.len()
        );
        Ok(table)
    }

    /// Returns whether `name` is new
    fn insert_range(&mut self, range: CodepointRange, name: &str) -> bool {
        let tag = ScriptTag::new(name);
        let (index, new) = match self.order.get(&tag) {
            Some(&index) => (index, false),
            None => {
                let index = self.scripts.len();
                self.scripts.push(tag.clone());
                self.order.insert(tag, index);
                (index, true)
            }
        };
        self.ranges.push((range, index));
        new
    }

    /// Reorder scripts by the start of their first range
    fn sort_scripts(&mut self, first_starts: &[u32]) {
        let mut by_start: Vec<usize> = (0..self.scripts.len()).collect();
        by_start.sort_by_key(|&i| first_starts.get(i).copied().unwrap_or(u32::MAX));

        let mut rank = vec![0; by_start.len()];
        for (position, &index) in by_start.iter().enumerate() {
            rank[index] = position;
        }
        self.scripts = by_start.iter().map(|&i| self.scripts[i].clone()).collect();
        for (_, index) in &mut self.ranges {
            *index = rank[*index];
        }
        self.order = self
            .scripts
            .iter()
            .enumerate()
            .map(|(position, tag)| (tag.clone(), position))
            .collect();
    }

    /// Script of `codepoint`, if any range covers it
    pub fn script_of(&self, codepoint: u32) -> Option<&ScriptTag> {
        let at = self.ranges.partition_point(|(r, _)| r.start <= codepoint);
        let (range, index) = self.ranges.get(at.checked_sub(1)?)?;
        range.contains(codepoint).then(|| &self.scripts[*index])
    }

    /// Position of `script` in the canonical order
    pub fn order_of(&self, script: &ScriptTag) -> Option<usize> {
        self.order.get(script).copied()
    }

    /// Scripts in canonical order
    pub fn scripts(&self) -> &[ScriptTag] {
        &self.scripts
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}
