//! Rust Source Generation
//!
//! Renders the compiled artifacts as Rust source for the shaper crate.
//! Output depends only on the input tables, so identical data always
//! produces byte-identical files.

use std::collections::BTreeMap;
use std::fmt;

use crate::classify::Category;
use crate::constraints::{ScriptMatchers, TrieNode, DOTTED_CIRCLE};
use crate::emoji::PictographicSet;
use crate::table::DispatchTable;

const HEADER: &str = "// WARNING: this file was generated by fos-ucd-gen, do not edit";

/// Entries per row of the rendered table
const ROW: u32 = 16;

/// Buffer rewriting loop of the generated matcher file, over the shaper's
/// `GlyphBuffer` and `prohibited_run`
const SCAN_AND_FIX: &str = "\
/// Insert a dotted circle before every prohibited run of `script` in
/// `buffer`. Returns whether anything was inserted.
pub fn scan_and_fix(buffer: &mut GlyphBuffer, script: &str) -> bool {
    if buffer.do_not_insert_dotted_circle {
        return false;
    }

    let codepoints: Vec<u32> = buffer.glyphs.iter().map(|g| g.glyph).collect();
    let mut out: Vec<GlyphRecord> = Vec::new();
    let mut fixed = false;
    let mut i = 0;
    while i < codepoints.len() {
        match prohibited_run(script, &codepoints[i..]) {
            Some(len) => {
                if !fixed {
                    out.reserve(codepoints.len() + 1);
                    out.extend_from_slice(&buffer.glyphs[..i]);
                    fixed = true;
                }
                out.push(GlyphRecord {
                    glyph: DOTTED_CIRCLE,
                    cluster: buffer.glyphs[i].cluster,
                    continuation: false,
                });
                out.extend_from_slice(&buffer.glyphs[i..i + len]);
                i += len;
            }
            None => {
                if fixed {
                    out.push(buffer.glyphs[i]);
                }
                i += 1;
            }
        }
    }

    if fixed {
        buffer.glyphs = out;
    }
    fixed
}
";

pub fn render_category_table(table: &DispatchTable) -> String {
    CategoryTableSource(table).to_string()
}

pub fn render_matchers(matchers: &ScriptMatchers) -> String {
    MatcherSource(matchers).to_string()
}

pub fn render_pictographic(set: &PictographicSet) -> String {
    PictographicSource(set).to_string()
}

/// Name of a constant in the generated table, `VPst`
pub fn category_constant(category: Category) -> String {
    category.to_string()
}

/// Function name of a script matcher, `match_old_italic`
pub fn matcher_name(script: &str) -> String {
    let mut name = String::from("match_");
    for c in script.chars() {
        if c.is_ascii_alphanumeric() {
            name.push(c.to_ascii_lowercase());
        } else {
            name.push('_');
        }
    }
    name
}

// ============================================================================
// Category table
// ============================================================================

struct CategoryTableSource<'a>(&'a DispatchTable);

impl fmt::Display for CategoryTableSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.0;
        writeln!(f, "{HEADER}")?;
        writeln!(
            f,
            "// {} of {} entries used ({:.2}%)",
            table.used(),
            table.total(),
            table.occupancy() * 100.0
        )?;
        writeln!(f)?;
        writeln!(f, "use super::universal::{{Category, category::*}};")?;
        writeln!(f)?;
        writeln!(f, "#[rustfmt::skip]")?;
        write!(f, "const USE_TABLE: &[Category] = &[")?;

        let mut labels = table.block_starts().iter().peekable();
        for region in table.regions() {
            let mut row_start = region.start;
            while row_start <= region.end {
                let row_end = row_start.saturating_add(ROW - 1).min(region.end);
                while let Some((_, name)) = labels.next_if(|(start, _)| *start <= row_end) {
                    write!(f, "\n\n  /* {name} */")?;
                }
                write!(f, "\n  /* {row_start:04X} */")?;
                for u in row_start..=row_end {
                    let index = (u - region.start) as usize + region.offset;
                    let category = table.backing().get(index).copied().unwrap_or_default();
                    write!(f, "{:>6},", category_constant(category))?;
                }
                row_start = row_end + 1;
            }
        }
        writeln!(f)?;
        writeln!(f, "];")?;
        writeln!(f)?;

        for region in table.regions() {
            writeln!(f, "const USE_OFFSET_0X{:04X}: usize = {};", region.start, region.offset)?;
        }
        writeln!(f)?;

        let regions = table.regions();
        writeln!(f, "#[rustfmt::skip]")?;
        writeln!(f, "pub fn get_category(u: u32) -> Category {{")?;
        writeln!(f, "    match u >> {} {{", table.page_bits())?;
        for page in table.pages() {
            writeln!(f, "        0x{:X} => {{", page.page)?;
            for region in page.regions.iter().filter_map(|&i| regions.get(i)) {
                writeln!(
                    f,
                    "            if (0x{start:04X}..=0x{end:04X}).contains(&u) {{ return USE_TABLE[u as usize - 0x{start:04X} + USE_OFFSET_0X{start:04X}]; }}",
                    start = region.start,
                    end = region.end
                )?;
            }
            writeln!(f, "        }}")?;
        }
        writeln!(f, "        _ => {{}}")?;
        writeln!(f, "    }}")?;
        writeln!(f)?;
        writeln!(f, "    {}", category_constant(Category::OTHER))?;
        writeln!(f, "}}")
    }
}

// ============================================================================
// Prohibited sequence matchers
// ============================================================================

struct MatcherSource<'a>(&'a ScriptMatchers);

impl fmt::Display for MatcherSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEADER}")?;
        writeln!(f)?;
        writeln!(f, "use super::buffer::{{GlyphBuffer, GlyphRecord}};")?;
        writeln!(f)?;
        writeln!(f, "/// U+25CC DOTTED CIRCLE")?;
        writeln!(f, "pub const DOTTED_CIRCLE: u32 = 0x{DOTTED_CIRCLE:04X};")?;

        for matcher in self.0.iter() {
            let script = matcher.script().as_str();
            writeln!(f)?;
            writeln!(f, "fn {}(glyphs: &[u32]) -> Option<usize> {{", matcher_name(script))?;
            let body = match matcher.trie().root() {
                Some(root) => render_node(root, 0, 1),
                None => "None".to_string(),
            };
            writeln!(f, "    {body}")?;
            writeln!(f, "}}")?;
        }

        writeln!(f)?;
        writeln!(f, "/// Length of the prohibited run at the start of `glyphs`")?;
        writeln!(f, "pub fn prohibited_run(script: &str, glyphs: &[u32]) -> Option<usize> {{")?;
        writeln!(f, "    match script {{")?;
        for script in self.0.scripts() {
            writeln!(f, "        {:?} => {}(glyphs),", script.as_str(), matcher_name(script.as_str()))?;
        }
        writeln!(f, "        _ => None,")?;
        writeln!(f, "    }}")?;
        writeln!(f, "}}")?;
        writeln!(f)?;
        f.write_str(SCAN_AND_FIX)
    }
}

/// Expression matching `glyphs[depth..]` against `node`
fn render_node(node: &TrieNode, depth: usize, indent: usize) -> String {
    match node {
        TrieNode::Chain(rest) if rest.is_empty() => format!("Some({depth})"),
        TrieNode::Chain(rest) => {
            let end = depth + rest.len();
            let pattern = rest
                .iter()
                .map(|u| format!("0x{u:04X}"))
                .collect::<Vec<_>>()
                .join(", ");
            format!("matches!(glyphs.get({depth}..{end}), Some([{pattern}])).then_some({end})")
        }
        TrieNode::Branch(children) => {
            // Children whose bodies render identically share one arm
            let mut arms: BTreeMap<String, Vec<u32>> = BTreeMap::new();
            for (&label, child) in children {
                arms.entry(render_node(child, depth + 1, indent + 1))
                    .or_default()
                    .push(label);
            }
            let mut arms: Vec<(Vec<u32>, String)> =
                arms.into_iter().map(|(body, labels)| (labels, body)).collect();
            arms.sort_by_key(|(labels, _)| labels.first().copied());

            let pad = "    ".repeat(indent + 1);
            let mut out = format!("match *glyphs.get({depth})? {{\n");
            for (labels, body) in arms {
                let labels = labels
                    .iter()
                    .map(|u| format!("0x{u:04X}"))
                    .collect::<Vec<_>>()
                    .join(" | ");
                out.push_str(&format!("{pad}{labels} => {body},\n"));
            }
            out.push_str(&format!("{pad}_ => None,\n"));
            out.push_str(&"    ".repeat(indent));
            out.push('}');
            out
        }
    }
}

// ============================================================================
// Extended_Pictographic
// ============================================================================

struct PictographicSource<'a>(&'a PictographicSet);

impl fmt::Display for PictographicSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEADER}")?;
        writeln!(f)?;
        writeln!(f, "#[rustfmt::skip]")?;
        writeln!(f, "pub fn is_emoji_extended_pictographic(u: u32) -> bool {{")?;
        writeln!(f, "    match u {{")?;
        for range in self.0.ranges() {
            if range.start == range.end {
                writeln!(f, "        0x{:04X} => true,", range.start)?;
            } else {
                writeln!(f, "        0x{:04X}..=0x{:04X} => true,", range.start, range.end)?;
            }
        }
        writeln!(f, "        _ => false,")?;
        writeln!(f, "    }}")?;
        writeln!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{ClassifiedSet, Position, Role};
    use crate::config::TableLayout;
    use crate::constraints::{ConstraintTrie, Matcher};
    use crate::parser::CodepointRange;
    use crate::script::ScriptTag;
    use crate::table::compile_table;

    fn matchers() -> ScriptMatchers {
        let mut deva = ConstraintTrie::new(ScriptTag::new("Devanagari"));
        for sequence in [[0x0905, 0x093E], [0x0905, 0x0946], [0x0906, 0x0945]] {
            deva.insert(&sequence).unwrap();
        }
        let mut tamil = ConstraintTrie::new(ScriptTag::new("Tamil"));
        tamil.insert(&[0x0B85, 0x0BC2, 0x0BCD]).unwrap();
        ScriptMatchers::new(vec![Matcher::new(deva), Matcher::new(tamil)])
    }

    #[test]
    fn test_category_table_source() {
        let set: ClassifiedSet = (0x0915..=0x0939)
            .map(|u| (u, Category::plain(Role::Base)))
            .chain([(0x093E, Category::positioned(Role::Vowel, Position::Post))])
            .collect();
        let table = compile_table(&set, &TableLayout::default()).unwrap();
        let source = render_category_table(&table);

        assert!(source.starts_with(HEADER));
        assert!(source.contains("const USE_OFFSET_0X0910: usize = 0;"));
        assert!(source.contains("  /* 0910 */     O,     O,     O,     O,     O,     B,"));
        assert!(source.contains("  VPst,"));
        assert!(source.contains(
            "if (0x0910..=0x093F).contains(&u) { return USE_TABLE[u as usize - 0x0910 + USE_OFFSET_0X0910]; }"
        ));
        assert!(source.contains("    match u >> 12 {\n        0x0 => {"));
        assert!(source.trim_end().ends_with("O\n}"));
    }

    #[test]
    fn test_matcher_source_groups_labels() {
        let source = render_matchers(&matchers());
        let expected_deva = "\
fn match_devanagari(glyphs: &[u32]) -> Option<usize> {
    match *glyphs.get(0)? {
        0x0905 => match *glyphs.get(1)? {
            0x093E | 0x0946 => Some(2),
            _ => None,
        },
        0x0906 => matches!(glyphs.get(1..2), Some([0x0945])).then_some(2),
        _ => None,
    }
}
";
        assert!(source.contains(expected_deva), "{source}");
        assert!(source.contains(
            "fn match_tamil(glyphs: &[u32]) -> Option<usize> {\n    matches!(glyphs.get(0..3), Some([0x0B85, 0x0BC2, 0x0BCD])).then_some(3)\n}"
        ));
        assert!(source.contains("        \"Devanagari\" => match_devanagari(glyphs),\n        \"Tamil\" => match_tamil(glyphs),"));
    }

    #[test]
    fn test_matcher_source_rewrites_buffers() {
        let source = render_matchers(&matchers());
        assert!(source.contains("use super::buffer::{GlyphBuffer, GlyphRecord};"));
        assert!(source.contains("pub const DOTTED_CIRCLE: u32 = 0x25CC;"));
        assert!(source.contains("pub fn scan_and_fix(buffer: &mut GlyphBuffer, script: &str) -> bool {"));
        assert!(source.contains("    if buffer.do_not_insert_dotted_circle {\n        return false;\n    }"));
        assert!(source.contains("        match prohibited_run(script, &codepoints[i..]) {"));
        assert!(source.contains("                out.extend_from_slice(&buffer.glyphs[i..i + len]);\n                i += len;"));

        let dispatch = source.find("pub fn prohibited_run").unwrap();
        let rewrite = source.find("pub fn scan_and_fix").unwrap();
        assert!(dispatch < rewrite);
        assert!(source.ends_with("    fixed\n}\n"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        assert_eq!(render_matchers(&matchers()), render_matchers(&matchers()));
    }

    #[test]
    fn test_pictographic_source() {
        let set = PictographicSet::from_ranges(vec![
            CodepointRange::new(0x2194, 0x2199),
            CodepointRange::single(0x00A9),
        ]);
        let source = render_pictographic(&set);
        assert!(source.contains("        0x00A9 => true,\n        0x2194..=0x2199 => true,\n        _ => false,"));
    }

    #[test]
    fn test_matcher_names() {
        assert_eq!(matcher_name("Old_Italic"), "match_old_italic");
        assert_eq!(matcher_name("Devanagari"), "match_devanagari");
    }
}
