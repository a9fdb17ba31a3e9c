//! Range Coalescing

use crate::blocks::Block;
use crate::classify::{Category, ClassifiedSet};

/// Maximal run of consecutive codepoints sharing category and block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: u32,
    /// Inclusive
    pub end: u32,
    pub category: Category,
    pub block: Block,
}

impl Range {
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        self.start <= codepoint && codepoint <= self.end
    }
}

/// Merge the non-default entries of `classified` into sorted, disjoint ranges
pub fn coalesce(classified: &ClassifiedSet) -> Vec<Range> {
    let mut ranges: Vec<Range> = Vec::new();
    for (codepoint, category, block) in classified.iter() {
        if category.is_default() {
            continue;
        }
        match ranges.last_mut() {
            Some(last)
                if last.end + 1 == codepoint && last.category == category && last.block == block =>
            {
                last.end = codepoint;
            }
            _ => ranges.push(Range {
                start: codepoint,
                end: codepoint,
                category,
                block,
            }),
        }
    }

    tracing::debug!("Coalesced {} codepoints into {} ranges", classified.len(), ranges.len());
    ranges
}
