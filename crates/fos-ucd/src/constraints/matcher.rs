//! Dotted Circle Insertion
//!
//! Scans a glyph buffer for prohibited runs and inserts U+25CC in front of
//! each, so the run renders as an obviously broken cluster instead of a
//! look-alike of a different vowel.

use std::collections::HashMap;

use super::trie::ConstraintTrie;
use crate::script::ScriptTag;

/// U+25CC DOTTED CIRCLE
pub const DOTTED_CIRCLE: u32 = 0x25CC;

/// One entry of the shaping buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRecord {
    /// Codepoint before glyph mapping
    pub glyph: u32,
    pub cluster: u32,
    /// Part of the preceding glyph's cluster
    pub continuation: bool,
}

impl GlyphRecord {
    pub fn new(glyph: u32, cluster: u32) -> Self {
        Self {
            glyph,
            cluster,
            continuation: false,
        }
    }
}

/// Glyph buffer the matcher rewrites
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphBuffer {
    pub glyphs: Vec<GlyphRecord>,
    /// Leave prohibited runs untouched
    pub do_not_insert_dotted_circle: bool,
}

impl GlyphBuffer {
    /// One glyph per codepoint, cluster values are the indices
    pub fn from_codepoints(codepoints: &[u32]) -> Self {
        Self {
            glyphs: codepoints
                .iter()
                .enumerate()
                .map(|(i, &u)| GlyphRecord::new(u, i as u32))
                .collect(),
            do_not_insert_dotted_circle: false,
        }
    }

    pub fn codepoints(&self) -> Vec<u32> {
        self.glyphs.iter().map(|g| g.glyph).collect()
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Matcher for one script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    trie: ConstraintTrie,
}

impl Matcher {
    pub fn new(trie: ConstraintTrie) -> Self {
        Self { trie }
    }

    pub fn script(&self) -> &ScriptTag {
        self.trie.script()
    }

    pub fn trie(&self) -> &ConstraintTrie {
        &self.trie
    }

    /// Insert a dotted circle before every prohibited run. Returns whether
    /// anything was inserted; the buffer is only rebuilt in that case.
    ///
    /// Runs do not overlap: scanning resumes after the last glyph of a
    /// matched run.
    pub fn scan_and_fix(&self, buffer: &mut GlyphBuffer) -> bool {
        if buffer.do_not_insert_dotted_circle {
            return false;
        }

        let codepoints = buffer.codepoints();
        let glyphs = &buffer.glyphs;
        let mut out: Vec<GlyphRecord> = Vec::new();
        let mut fixed = false;
        let mut i = 0;
        while i < glyphs.len() {
            match self.trie.match_len(&codepoints[i..]) {
                Some(len) => {
                    if !fixed {
                        out.reserve(glyphs.len() + 1);
                        out.extend_from_slice(&glyphs[..i]);
                        fixed = true;
                    }
                    out.push(GlyphRecord::new(DOTTED_CIRCLE, glyphs[i].cluster));
                    out.extend_from_slice(&glyphs[i..i + len]);
                    i += len;
                }
                None => {
                    if fixed {
                        out.push(glyphs[i]);
                    }
                    i += 1;
                }
            }
        }

        if fixed {
            tracing::trace!(
                "Inserted {} dotted circles for {}",
                out.len() - glyphs.len(),
                self.script()
            );
            buffer.glyphs = out;
        }
        fixed
    }
}

/// Matchers of every script with prohibited sequences, in script order
#[derive(Debug, Clone, Default)]
pub struct ScriptMatchers {
    matchers: Vec<Matcher>,
    index: HashMap<ScriptTag, usize>,
}

impl ScriptMatchers {
    /// `matchers` must already be in canonical script order
    pub fn new(matchers: Vec<Matcher>) -> Self {
        let index = matchers
            .iter()
            .enumerate()
            .map(|(i, m)| (m.script().clone(), i))
            .collect();
        Self { matchers, index }
    }

    pub fn get(&self, script: &ScriptTag) -> Option<&Matcher> {
        self.index.get(script).map(|&i| &self.matchers[i])
    }

    /// Fix `buffer` with the matcher of `script`; scripts without
    /// prohibited sequences leave it untouched
    pub fn scan_and_fix(&self, buffer: &mut GlyphBuffer, script: &ScriptTag) -> bool {
        match self.get(script) {
            Some(matcher) => matcher.scan_and_fix(buffer),
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Matcher> {
        self.matchers.iter()
    }

    pub fn scripts(&self) -> impl Iterator<Item = &ScriptTag> {
        self.matchers.iter().map(Matcher::script)
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(sequences: &[&[u32]]) -> Matcher {
        let mut trie = ConstraintTrie::new(ScriptTag::new("Devanagari"));
        for sequence in sequences {
            trie.insert(sequence).unwrap();
        }
        Matcher::new(trie)
    }

    #[test]
    fn test_inserts_before_run() {
        let m = matcher(&[&[0x0905, 0x093E]]);
        let mut buffer = GlyphBuffer::from_codepoints(&[0x0915, 0x0905, 0x093E, 0x0915]);
        assert!(m.scan_and_fix(&mut buffer));
        assert_eq!(buffer.codepoints(), [0x0915, DOTTED_CIRCLE, 0x0905, 0x093E, 0x0915]);

        let circle = buffer.glyphs[1];
        assert_eq!(circle.cluster, 1);
        assert!(!circle.continuation);
    }

    #[test]
    fn test_every_run_is_fixed() {
        let m = matcher(&[&[0x0905, 0x093E]]);
        let mut buffer = GlyphBuffer::from_codepoints(&[0x0905, 0x093E, 0x0905, 0x093E]);
        assert!(m.scan_and_fix(&mut buffer));
        assert_eq!(
            buffer.codepoints(),
            [DOTTED_CIRCLE, 0x0905, 0x093E, DOTTED_CIRCLE, 0x0905, 0x093E]
        );
    }

    #[test]
    fn test_matched_run_is_not_rescanned() {
        let m = matcher(&[&[0x0905, 0x093E], &[0x093E, 0x0945]]);
        let mut buffer = GlyphBuffer::from_codepoints(&[0x0905, 0x093E, 0x0945]);
        assert!(m.scan_and_fix(&mut buffer));
        assert_eq!(buffer.codepoints(), [DOTTED_CIRCLE, 0x0905, 0x093E, 0x0945]);

        // The overlapping sequence still matches on its own
        let mut buffer = GlyphBuffer::from_codepoints(&[0x0915, 0x093E, 0x0945]);
        assert!(m.scan_and_fix(&mut buffer));
        assert_eq!(buffer.codepoints(), [0x0915, DOTTED_CIRCLE, 0x093E, 0x0945]);
        assert_eq!(buffer.glyphs[1].cluster, 1);
    }

    #[test]
    fn test_clean_buffer_is_untouched() {
        let m = matcher(&[&[0x0905, 0x093E]]);
        let mut buffer = GlyphBuffer::from_codepoints(&[0x0905, 0x0915, 0x093E]);
        let before = buffer.clone();
        assert!(!m.scan_and_fix(&mut buffer));
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_opt_out() {
        let m = matcher(&[&[0x0905, 0x093E]]);
        let mut buffer = GlyphBuffer::from_codepoints(&[0x0905, 0x093E]);
        buffer.do_not_insert_dotted_circle = true;
        assert!(!m.scan_and_fix(&mut buffer));
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_unknown_script_passes_through() {
        let matchers = ScriptMatchers::new(vec![matcher(&[&[0x0905, 0x093E]])]);
        let mut buffer = GlyphBuffer::from_codepoints(&[0x0905, 0x093E]);
        assert!(!matchers.scan_and_fix(&mut buffer, &ScriptTag::new("Tamil")));
        assert_eq!(buffer.len(), 2);
        assert!(matchers.scan_and_fix(&mut buffer, &ScriptTag::new("Devanagari")));
        assert_eq!(buffer.len(), 3);
    }
}
