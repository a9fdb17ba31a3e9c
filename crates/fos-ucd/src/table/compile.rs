//! Region Partitioning and Paged Dispatch
//!
//! Ranges are rounded out to the layout alignment and grouped into regions.
//! A range close enough to the previous region extends it, the gap between
//! them stored as default entries. Regions are laid end to end in a single
//! backing array and indexed by page (`codepoint >> page_bits`).

use std::collections::BTreeMap;
use std::sync::Arc;

use super::ranges::{coalesce, Range};
use crate::blocks::Block;
use crate::classify::{Category, ClassifiedSet};
use crate::config::TableLayout;
use crate::{Result, UcdError, MAX_CODEPOINT};

/// Smallest acceptable share of non-default entries in the backing array
pub const MIN_OCCUPANCY: f64 = 0.50;

/// Contiguous slice of the codepoint space stored in the backing array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start: u32,
    /// Inclusive
    pub end: u32,
    /// Index of `start` in the backing array
    pub offset: usize,
}

impl Region {
    pub fn contains(&self, codepoint: u32) -> bool {
        self.start <= codepoint && codepoint <= self.end
    }

    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }
}

/// Regions touching one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    /// Indices into `DispatchTable::regions`, ascending
    pub regions: Vec<usize>,
}

/// Compiled category table
#[derive(Debug, Clone)]
pub struct DispatchTable {
    regions: Vec<Region>,
    backing: Vec<Category>,
    pages: Vec<Page>,
    page_bits: u32,
    used: usize,
    /// First codepoint of each run of a named block
    block_starts: Vec<(u32, Arc<str>)>,
}

impl DispatchTable {
    /// Category of `codepoint`, `Category::OTHER` outside every region
    pub fn category_of(&self, codepoint: u32) -> Category {
        if codepoint > MAX_CODEPOINT {
            return Category::OTHER;
        }
        let page = codepoint >> self.page_bits;
        let Ok(at) = self.pages.binary_search_by_key(&page, |p| p.page) else {
            return Category::OTHER;
        };
        self.pages[at]
            .regions
            .iter()
            .map(|&i| &self.regions[i])
            .find(|region| region.contains(codepoint))
            .and_then(|region| {
                self.backing
                    .get((codepoint - region.start) as usize + region.offset)
                    .copied()
            })
            .unwrap_or(Category::OTHER)
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn backing(&self) -> &[Category] {
        &self.backing
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_bits(&self) -> u32 {
        self.page_bits
    }

    /// Non-default entries in the backing array
    pub fn used(&self) -> usize {
        self.used
    }

    pub fn total(&self) -> usize {
        self.backing.len()
    }

    /// Share of non-default entries, 1.0 for an empty table
    pub fn occupancy(&self) -> f64 {
        if self.backing.is_empty() {
            1.0
        } else {
            self.used as f64 / self.backing.len() as f64
        }
    }

    pub fn block_starts(&self) -> &[(u32, Arc<str>)] {
        &self.block_starts
    }
}

/// Group aligned ranges into regions
fn partition(ranges: &[Range], layout: &TableLayout) -> Vec<(u32, u32)> {
    let align = layout.alignment;
    let mut spans: Vec<(u32, u32)> = Vec::new();
    for range in ranges {
        let start = range.start / align * align;
        let end = (range.end / align * align).saturating_add(align - 1).min(MAX_CODEPOINT);
        match spans.last_mut() {
            Some(last) if start <= last.1.saturating_add(layout.max_gap) => {
                last.1 = last.1.max(end);
            }
            _ => spans.push((start, end)),
        }
    }
    spans
}

/// Compile the classified set into a paged table
pub fn compile_table(classified: &ClassifiedSet, layout: &TableLayout) -> Result<DispatchTable> {
    layout.validate()?;
    let ranges = coalesce(classified);
    let spans = partition(&ranges, layout);

    let mut regions = Vec::with_capacity(spans.len());
    let mut backing = Vec::new();
    for (start, end) in spans {
        regions.push(Region {
            start,
            end,
            offset: backing.len(),
        });
        backing.extend((start..=end).map(|u| classified.get(u).unwrap_or(Category::OTHER)));
    }
    let used = backing.iter().filter(|c| !c.is_default()).count();

    let mut by_page: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (index, region) in regions.iter().enumerate() {
        for page in (region.start >> layout.page_bits)..=(region.end >> layout.page_bits) {
            by_page.entry(page).or_default().push(index);
        }
    }
    let pages: Vec<Page> = by_page
        .into_iter()
        .map(|(page, regions)| Page { page, regions })
        .collect();

    let mut block_starts: Vec<(u32, Arc<str>)> = Vec::new();
    let mut last_block = Block::NONE;
    for range in &ranges {
        if range.block != Block::NONE && range.block != last_block {
            block_starts.push((range.start, classified.blocks().name(range.block).into()));
            last_block = range.block;
        }
    }

    let table = DispatchTable {
        regions,
        backing,
        pages,
        page_bits: layout.page_bits,
        used,
        block_starts,
    };

    let occupancy = table.occupancy();
    tracing::info!(
        "Compiled {} ranges into {} regions over {} pages: {} of {} entries used ({:.2}%)",
        ranges.len(),
        table.regions.len(),
        table.pages.len(),
        table.used,
        table.total(),
        occupancy * 100.0
    );

    if occupancy < MIN_OCCUPANCY {
        tracing::warn!("Category table below occupancy floor");
        return Err(UcdError::OccupancyViolation {
            ratio: occupancy,
            floor: MIN_OCCUPANCY,
            used: table.used,
            total: table.total(),
        });
    }
    Ok(table)
}
