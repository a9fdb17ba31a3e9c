//! Attribute Ingestion
//!
//! Merges the per-property UCD tables into one record per codepoint. Only
//! the syllabic and positional tables (and the override list) introduce
//! codepoints; general category, joining type and block refine them.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::ops::RangeInclusive;

use crate::blocks::{Block, BlockTable};
use crate::config::CompilerConfig;
use crate::parser::{UcdLine, UcdReader};
use crate::properties::{GeneralCategory, JoiningType, PositionalCategory, SyllabicCategory};
use crate::source::{DataSource, SourceFile};
use crate::{Result, UcdError};

/// Merged attributes of one codepoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodepointRecord {
    pub codepoint: u32,
    pub syllabic: SyllabicCategory,
    pub positional: PositionalCategory,
    pub general: GeneralCategory,
    pub joining: JoiningType,
    pub block: Block,
}

impl CodepointRecord {
    /// Record with every axis at its default
    pub fn new(codepoint: u32) -> Self {
        Self {
            codepoint,
            syllabic: SyllabicCategory::default(),
            positional: PositionalCategory::default(),
            general: GeneralCategory::default(),
            joining: JoiningType::default(),
            block: Block::NONE,
        }
    }
}

/// Syllabic categories forced on codepoints the Indic files get wrong or
/// do not list yet, applied after the overlays.
pub const SYLLABIC_OVERRIDES: &[(RangeInclusive<u32>, SyllabicCategory)] = &[
    // Used by USE but absent from the Indic files
    (0x0640..=0x0640, SyllabicCategory::Other),
    (0x07CA..=0x07EA, SyllabicCategory::Other),
    (0x07FA..=0x07FA, SyllabicCategory::Other),
    (0x0840..=0x0858, SyllabicCategory::Other),
    (0x1887..=0x18A8, SyllabicCategory::Other),
    (0x18AA..=0x18AA, SyllabicCategory::Other),
    (0x1B61..=0x1B61, SyllabicCategory::Other),
    (0x1B63..=0x1B67, SyllabicCategory::Other),
    (0x1B69..=0x1B6A, SyllabicCategory::Other),
    (0x2060..=0x2060, SyllabicCategory::Other),
    (0xA840..=0xA872, SyllabicCategory::Other),
    (0x10B80..=0x10B91, SyllabicCategory::Other),
    (0x10BA9..=0x10BAE, SyllabicCategory::Other),
    (0x10FB0..=0x10FB0, SyllabicCategory::Other),
    (0x10FB2..=0x10FB6, SyllabicCategory::Other),
    (0x10FB8..=0x10FBF, SyllabicCategory::Other),
    (0x10FC1..=0x10FC4, SyllabicCategory::Other),
    (0x10FC9..=0x10FCB, SyllabicCategory::Other),
    // https://github.com/harfbuzz/harfbuzz/pull/1685
    (0x1B5B..=0x1B5C, SyllabicCategory::ConsonantPlaceholder),
    (0x1B5F..=0x1B5F, SyllabicCategory::ConsonantPlaceholder),
    (0x1B62..=0x1B62, SyllabicCategory::ConsonantPlaceholder),
    (0x1B68..=0x1B68, SyllabicCategory::ConsonantPlaceholder),
    // https://github.com/harfbuzz/harfbuzz/issues/1035
    (0x11C44..=0x11C45, SyllabicCategory::ConsonantPlaceholder),
    // https://github.com/harfbuzz/harfbuzz/pull/1399
    (0x111C8..=0x111C8, SyllabicCategory::ConsonantPlaceholder),
];

/// Records of every non-blacklisted codepoint the sources mention
#[derive(Debug, Clone)]
pub struct RecordSet {
    records: BTreeMap<u32, CodepointRecord>,
    blocks: BlockTable,
}

impl RecordSet {
    pub fn new(records: BTreeMap<u32, CodepointRecord>, blocks: BlockTable) -> Self {
        Self { records, blocks }
    }

    pub fn get(&self, codepoint: u32) -> Option<&CodepointRecord> {
        self.records.get(&codepoint)
    }

    /// Records in ascending codepoint order
    pub fn iter(&self) -> impl Iterator<Item = &CodepointRecord> {
        self.records.values()
    }

    pub fn blocks(&self) -> &BlockTable {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read every attribute table from `source` and merge them
pub fn ingest(source: &dyn DataSource, config: &CompilerConfig) -> Result<RecordSet> {
    let mut syllabic: BTreeMap<u32, SyllabicCategory> = BTreeMap::new();
    read_property(
        source,
        SourceFile::SyllabicCategory,
        |r| r,
        1,
        &mut syllabic,
        SyllabicCategory::from_ucd,
    )?;
    read_property(
        source,
        SourceFile::SyllabicOverlay,
        |r| r.commented_data_after("USE_Syllabic_Category"),
        1,
        &mut syllabic,
        |v| match v {
            // https://github.com/MicrosoftDocs/typography-issues/issues/336
            "Consonant_Final_Modifier" => Some(SyllabicCategory::SyllableModifier),
            _ => SyllabicCategory::from_ucd(v),
        },
    )?;
    for (range, category) in SYLLABIC_OVERRIDES {
        for codepoint in range.clone() {
            syllabic.insert(codepoint, *category);
        }
    }

    let mut positional: BTreeMap<u32, PositionalCategory> = BTreeMap::new();
    read_property(
        source,
        SourceFile::PositionalCategory,
        |r| r,
        1,
        &mut positional,
        PositionalCategory::from_ucd,
    )?;
    read_property(
        source,
        SourceFile::PositionalOverlay,
        |r| r,
        1,
        &mut positional,
        |v| match v {
            "NA" => Some(PositionalCategory::NotApplicable),
            _ => PositionalCategory::from_ucd(v),
        },
    )?;

    let mut general: HashMap<u32, GeneralCategory> = HashMap::new();
    read_property(
        source,
        SourceFile::UnicodeData,
        |r| r.min_fields(3),
        2,
        &mut general,
        GeneralCategory::from_ucd,
    )?;

    let mut joining: HashMap<u32, JoiningType> = HashMap::new();
    read_property(
        source,
        SourceFile::ArabicShaping,
        |r| r.min_fields(3),
        2,
        &mut joining,
        JoiningType::from_ucd,
    )?;

    let blocks = BlockTable::parse(&source.read(SourceFile::Blocks)?)?;
    let blacklist = config
        .blacklisted_blocks
        .iter()
        .map(|name| {
            blocks.find(name).ok_or_else(|| {
                UcdError::InvalidConfig(format!("blacklisted block '{name}' is not listed in Blocks.txt"))
            })
        })
        .collect::<Result<HashSet<Block>>>()?;

    let codepoints: BTreeSet<u32> = syllabic.keys().chain(positional.keys()).copied().collect();
    let mut records = BTreeMap::new();
    let mut dropped = 0usize;
    for codepoint in codepoints {
        let block = blocks.block_of(codepoint);
        if blacklist.contains(&block) {
            dropped += 1;
            continue;
        }
        let record = CodepointRecord {
            codepoint,
            syllabic: syllabic.get(&codepoint).copied().unwrap_or_default(),
            positional: positional.get(&codepoint).copied().unwrap_or_default(),
            general: general.get(&codepoint).copied().unwrap_or_default(),
            joining: joining.get(&codepoint).copied().unwrap_or_default(),
            block,
        };
        records.insert(codepoint, record);
    }

    tracing::info!(
        "Ingested {} codepoint records ({} dropped by block blacklist)",
        records.len(),
        dropped
    );
    Ok(RecordSet::new(records, blocks))
}

/// Store the value in field `index` of every line of `file` into `out`
fn read_property<T, M>(
    source: &dyn DataSource,
    file: SourceFile,
    configure: impl FnOnce(UcdReader<'_>) -> UcdReader<'_>,
    index: usize,
    out: &mut M,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<()>
where
    T: Copy,
    M: Extend<(u32, T)>,
{
    let text = source.read(file)?;
    let mut lines = 0usize;
    for line in configure(UcdReader::new(file.path(), &text)) {
        let line = line?;
        let value = property_value(file, &line, index, &parse)?;
        out.extend(line.range.iter().map(|u| (u, value)));
        lines += 1;
    }
    tracing::debug!("Read {} data lines from {}", lines, file.path());
    Ok(())
}

fn property_value<T>(
    file: SourceFile,
    line: &UcdLine<'_>,
    index: usize,
    parse: &impl Fn(&str) -> Option<T>,
) -> Result<T> {
    let raw = line.field(index).unwrap_or_default();
    parse(raw).ok_or_else(|| UcdError::Malformed {
        file: file.path().to_string(),
        line: line.number,
        reason: format!("unknown property value '{raw}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    fn source() -> MemorySource {
        MemorySource::new()
            .with(
                SourceFile::SyllabicCategory,
                "# IndicSyllabicCategory\n0915..0917 ; Consonant\n093E ; Vowel_Dependent\n0E01 ; Consonant\n",
            )
            .with(
                SourceFile::SyllabicOverlay,
                "# USE_Syllabic_Category\n0917 ; Consonant_Final_Modifier\n# 0918 ; Consonant\n",
            )
            .with(SourceFile::PositionalCategory, "093E ; Right\n0940 ; Right\n")
            .with(SourceFile::PositionalOverlay, "0940 ; NA\n")
            .with(
                SourceFile::UnicodeData,
                "0915;DEVANAGARI LETTER KA;Lo;0;L;;;;;N;;;;;\n093E;DEVANAGARI VOWEL SIGN AA;Mc;0;L;;;;;N;;;;;\n1B61;BALINESE MUSICAL SYMBOL DONG;So;0;L;;;;;N;;;;;\n0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;;0061;\n",
            )
            .with(SourceFile::ArabicShaping, "# ArabicShaping\n0628; BEH; D; BEH\n0640; TATWEEL; C; No_Joining_Group\n")
            .with(
                SourceFile::Blocks,
                "0800..083F; Samaritan\n0900..097F; Devanagari\n0E00..0E7F; Thai\n0E80..0EFF; Lao\n",
            )
    }

    #[test]
    fn test_merges_axes() {
        let records = ingest(&source(), &CompilerConfig::default()).unwrap();
        let ka = records.get(0x0915).unwrap();
        assert_eq!(ka.syllabic, SyllabicCategory::Consonant);
        assert_eq!(ka.general, GeneralCategory::OtherLetter);
        assert_eq!(ka.positional, PositionalCategory::NotApplicable);
        assert_eq!(records.blocks().name(ka.block), "Devanagari");

        let aa = records.get(0x093E).unwrap();
        assert_eq!(aa.positional, PositionalCategory::Right);
        assert_eq!(aa.general, GeneralCategory::SpacingMark);
    }

    #[test]
    fn test_overlay_quirks() {
        let records = ingest(&source(), &CompilerConfig::default()).unwrap();
        assert_eq!(records.get(0x0917).unwrap().syllabic, SyllabicCategory::SyllableModifier);
        assert_eq!(records.get(0x0918).unwrap().syllabic, SyllabicCategory::Consonant);
        assert_eq!(records.get(0x0940).unwrap().positional, PositionalCategory::NotApplicable);
    }

    #[test]
    fn test_refining_tables_do_not_add_codepoints() {
        let records = ingest(&source(), &CompilerConfig::default()).unwrap();
        assert!(records.get(0x0041).is_none());
        assert!(records.get(0x0628).is_none());
        // Forced in by the override list, then refined
        assert_eq!(records.get(0x0640).unwrap().joining, JoiningType::JoinCausing);
        assert_eq!(records.get(0x1B61).unwrap().general, GeneralCategory::OtherSymbol);
        assert!(records.get(0x1B60).is_none());
    }

    #[test]
    fn test_overrides_introduce_codepoints() {
        let records = ingest(&source(), &CompilerConfig::default()).unwrap();
        let placeholder = records.get(0x1B5B).unwrap();
        assert_eq!(placeholder.syllabic, SyllabicCategory::ConsonantPlaceholder);
        assert_eq!(placeholder.general, GeneralCategory::Unassigned);
        assert_eq!(placeholder.block, Block::NONE);
        assert_eq!(records.get(0x2060).unwrap().syllabic, SyllabicCategory::Other);
    }

    #[test]
    fn test_blacklisted_blocks_are_dropped() {
        let records = ingest(&source(), &CompilerConfig::default()).unwrap();
        assert!(records.get(0x0E01).is_none());

        let config = CompilerConfig {
            blacklisted_blocks: Vec::new(),
            ..CompilerConfig::default()
        };
        let records = ingest(&source(), &config).unwrap();
        assert!(records.get(0x0E01).is_some());
    }

    #[test]
    fn test_unknown_blacklisted_block_is_rejected() {
        let config = CompilerConfig {
            blacklisted_blocks: vec!["Thai".into(), "Thia".into()],
            ..CompilerConfig::default()
        };
        let err = ingest(&source(), &config).unwrap_err();
        assert!(matches!(err, UcdError::InvalidConfig(ref reason) if reason.contains("'Thia'")));
    }

    #[test]
    fn test_unknown_value_is_malformed() {
        let source = source().with(SourceFile::PositionalCategory, "093E ; Sideways\n");
        let err = ingest(&source, &CompilerConfig::default()).unwrap_err();
        match err {
            UcdError::Malformed { file, line, reason } => {
                assert_eq!(file, "IndicPositionalCategory.txt");
                assert_eq!(line, 1);
                assert!(reason.contains("Sideways"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file_is_reported() {
        let mut source = MemorySource::new();
        source.insert(SourceFile::SyllabicCategory, "");
        let err = ingest(&source, &CompilerConfig::default()).unwrap_err();
        assert!(matches!(err, UcdError::MissingSource { ref file, .. } if file.ends_with("IndicSyllabicCategory-Additional.txt")));
    }
}
