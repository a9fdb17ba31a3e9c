//! Extended_Pictographic
//!
//! The shaper keeps emoji ZWJ sequences in one cluster. Which codepoints
//! count as pictographic comes from emoji-data.txt.

use crate::parser::{CodepointRange, UcdReader};
use crate::Result;

const PROPERTY: &str = "Extended_Pictographic";

/// Sorted, merged Extended_Pictographic ranges
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PictographicSet {
    ranges: Vec<CodepointRange>,
}

impl PictographicSet {
    /// Parse emoji-data.txt, keeping only Extended_Pictographic lines
    pub fn parse(text: &str) -> Result<Self> {
        let mut ranges = Vec::new();
        for line in UcdReader::new("emoji/emoji-data.txt", text) {
            let line = line?;
            if line.field(1) == Some(PROPERTY) {
                ranges.push(line.range);
            }
        }
        let set = Self::from_ranges(ranges);
        tracing::debug!("Parsed {} Extended_Pictographic ranges", set.ranges.len());
        Ok(set)
    }

    /// Build from ranges in any order, merging adjacent and overlapping ones
    pub fn from_ranges(mut ranges: Vec<CodepointRange>) -> Self {
        ranges.sort();
        let mut merged: Vec<CodepointRange> = Vec::with_capacity(ranges.len());
        for range in ranges {
            match merged.last_mut() {
                Some(last) if range.start <= last.end.saturating_add(1) => {
                    last.end = last.end.max(range.end);
                }
                _ => merged.push(range),
            }
        }
        Self { ranges: merged }
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        let at = self.ranges.partition_point(|r| r.start <= codepoint);
        at.checked_sub(1)
            .is_some_and(|i| self.ranges[i].contains(codepoint))
    }

    pub fn ranges(&self) -> &[CodepointRange] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMOJI_DATA: &str = "\
# emoji-data.txt
0023          ; Emoji                # 1.1  [1] (#️)       number sign
00A9          ; Extended_Pictographic# 1.1  [1] (©️)       copyright
00AE          ; Extended_Pictographic# 1.1  [1] (®️)       registered
2194..2199    ; Extended_Pictographic# 1.1  [6] (↔️..↙️)    left-right arrow..down-left arrow
21A9..21AA    ; Extended_Pictographic# 1.1  [2] (↩️..↪️)    right arrow curving left..left arrow curving right
1F000..1F0FF  ; Extended_Pictographic#   NA[256] (🀀️..🃿️)    <reserved-1F000>..<reserved-1F0FF>
1F10D..1F10F  ; Extended_Pictographic# 5.2  [3] (🄍️..🄏️)    circled zero with slash..circled dollar sign with overlay
1F100..1F10C  ; Extended_Pictographic# 5.2  [13]
";

    #[test]
    fn test_only_pictographic_lines() {
        let set = PictographicSet::parse(EMOJI_DATA).unwrap();
        assert!(!set.contains(0x0023));
        assert!(set.contains(0x00A9));
        assert!(!set.contains(0x00AA));
        assert!(set.contains(0x2197));
        assert!(!set.contains(0x21A0));
    }

    #[test]
    fn test_adjacent_ranges_merge() {
        let set = PictographicSet::parse(EMOJI_DATA).unwrap();
        let ranges: Vec<(u32, u32)> = set.ranges().iter().map(|r| (r.start, r.end)).collect();
        assert_eq!(
            ranges,
            [
                (0x00A9, 0x00A9),
                (0x00AE, 0x00AE),
                (0x2194, 0x2199),
                (0x21A9, 0x21AA),
                (0x1F000, 0x1F10F),
            ]
        );
    }
}
