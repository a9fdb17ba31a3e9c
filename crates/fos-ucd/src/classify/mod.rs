//! Role Classification
//!
//! Turns a merged `CodepointRecord` into a USE category:
//! 1. Fixed corrections patch known gaps in the source data
//! 2. Every role predicate is evaluated, exactly one must hold
//! 3. Positionally refined roles pick exactly one position suffix
//!
//! Zero or several matches in step 2 or 3 abort the build. Nothing is ever
//! resolved by predicate order.

pub mod corrections;
pub mod position;
pub mod rules;

use std::collections::BTreeMap;
use std::fmt;

use crate::blocks::{Block, BlockTable};
use crate::ingest::{CodepointRecord, RecordSet};
use crate::properties::{GeneralCategory, JoiningType, PositionalCategory, SyllabicCategory};
use crate::Result;

/// Base shaping role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// O
    Other,
    /// B
    Base,
    /// N
    BaseNumber,
    /// GB, dotted circle and other placeholders
    GenericBase,
    /// F
    ConsonantFinal,
    /// FM
    ConsonantFinalModifier,
    /// M
    ConsonantMedial,
    /// CM, nukta and gemination marks
    ConsonantModifier,
    /// SUB
    ConsonantSubjoined,
    /// CS
    ConsonantWithStacker,
    /// H
    Halant,
    /// HVM
    HalantOrVowelModifier,
    /// HN
    HalantNumber,
    /// G
    Hieroglyph,
    /// J
    HieroglyphJoiner,
    /// SB
    HieroglyphSegmentBegin,
    /// SE
    HieroglyphSegmentEnd,
    /// ZWNJ
    NonJoiner,
    /// R
    Repha,
    /// S
    Symbol,
    /// Sk
    Sakot,
    /// SM
    SymbolModifier,
    /// V
    Vowel,
    /// VM
    VowelModifier,
}

impl Role {
    /// Every role, in predicate evaluation order
    pub const ALL: &'static [Role] = &[
        Role::Base,
        Role::BaseNumber,
        Role::GenericBase,
        Role::ConsonantFinal,
        Role::ConsonantFinalModifier,
        Role::ConsonantMedial,
        Role::ConsonantModifier,
        Role::ConsonantSubjoined,
        Role::ConsonantWithStacker,
        Role::Halant,
        Role::HalantOrVowelModifier,
        Role::HalantNumber,
        Role::Hieroglyph,
        Role::HieroglyphJoiner,
        Role::HieroglyphSegmentBegin,
        Role::HieroglyphSegmentEnd,
        Role::NonJoiner,
        Role::Other,
        Role::Repha,
        Role::Sakot,
        Role::Symbol,
        Role::SymbolModifier,
        Role::Vowel,
        Role::VowelModifier,
    ];

    /// Short tag used by the shaper's category constants
    pub fn tag(self) -> &'static str {
        match self {
            Role::Other => "O",
            Role::Base => "B",
            Role::BaseNumber => "N",
            Role::GenericBase => "GB",
            Role::ConsonantFinal => "F",
            Role::ConsonantFinalModifier => "FM",
            Role::ConsonantMedial => "M",
            Role::ConsonantModifier => "CM",
            Role::ConsonantSubjoined => "SUB",
            Role::ConsonantWithStacker => "CS",
            Role::Halant => "H",
            Role::HalantOrVowelModifier => "HVM",
            Role::HalantNumber => "HN",
            Role::Hieroglyph => "G",
            Role::HieroglyphJoiner => "J",
            Role::HieroglyphSegmentBegin => "SB",
            Role::HieroglyphSegmentEnd => "SE",
            Role::NonJoiner => "ZWNJ",
            Role::Repha => "R",
            Role::Symbol => "S",
            Role::Sakot => "Sk",
            Role::SymbolModifier => "SM",
            Role::Vowel => "V",
            Role::VowelModifier => "VM",
        }
    }
}

/// Positional suffix of a refined role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    Above,
    Below,
    Post,
    Pre,
}

impl Position {
    pub fn suffix(self) -> &'static str {
        match self {
            Position::Above => "Abv",
            Position::Below => "Blw",
            Position::Post => "Pst",
            Position::Pre => "Pre",
        }
    }
}

/// Compiled classification of one codepoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Category {
    pub role: Role,
    pub position: Option<Position>,
}

impl Category {
    /// Category of every codepoint absent from the table
    pub const OTHER: Category = Category::plain(Role::Other);

    pub const fn plain(role: Role) -> Self {
        Self { role, position: None }
    }

    pub const fn positioned(role: Role, position: Position) -> Self {
        Self { role, position: Some(position) }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::OTHER
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::OTHER
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.role.tag())?;
        if let Some(position) = self.position {
            f.write_str(position.suffix())?;
        }
        Ok(())
    }
}

/// Attributes the predicates see, after corrections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attributes {
    pub codepoint: u32,
    pub syllabic: SyllabicCategory,
    pub positional: PositionalCategory,
    pub general: GeneralCategory,
    pub joining: JoiningType,
}

impl Attributes {
    pub fn of(record: &CodepointRecord) -> Self {
        Self {
            codepoint: record.codepoint,
            syllabic: record.syllabic,
            positional: record.positional,
            general: record.general,
            joining: record.joining,
        }
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.syllabic, self.positional, self.general, self.joining
        )
    }
}

/// Classify one record
pub fn classify(record: &CodepointRecord) -> Result<Category> {
    let mut attrs = Attributes::of(record);
    corrections::apply_syllabic(&mut attrs);
    let role = rules::resolve_role(&attrs)?;
    corrections::apply_positional(&mut attrs);
    let position = position::resolve_position(role, &attrs)?;
    Ok(Category { role, position })
}

/// Classify every record, failing on the first ambiguous one
pub fn classify_all(records: &RecordSet) -> Result<ClassifiedSet> {
    let mut set = ClassifiedSet::new(records.blocks().clone());
    for record in records.iter() {
        set.insert(record.codepoint, classify(record)?, record.block);
    }

    tracing::info!(
        "Classified {} codepoints, {} with a non-default category",
        set.len(),
        set.iter().filter(|(_, c, _)| !c.is_default()).count()
    );
    Ok(set)
}

/// Category and block of every classified codepoint
#[derive(Debug, Clone, Default)]
pub struct ClassifiedSet {
    entries: BTreeMap<u32, (Category, Block)>,
    blocks: BlockTable,
}

impl ClassifiedSet {
    pub fn new(blocks: BlockTable) -> Self {
        Self {
            entries: BTreeMap::new(),
            blocks,
        }
    }

    pub fn insert(&mut self, codepoint: u32, category: Category, block: Block) {
        self.entries.insert(codepoint, (category, block));
    }

    /// Category of a classified codepoint
    pub fn get(&self, codepoint: u32) -> Option<Category> {
        self.entries.get(&codepoint).map(|&(category, _)| category)
    }

    /// Entries in ascending codepoint order
    pub fn iter(&self) -> impl Iterator<Item = (u32, Category, Block)> + '_ {
        self.entries.iter().map(|(&u, &(category, block))| (u, category, block))
    }

    pub fn blocks(&self) -> &BlockTable {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(u32, Category)> for ClassifiedSet {
    fn from_iter<I: IntoIterator<Item = (u32, Category)>>(iter: I) -> Self {
        let mut set = ClassifiedSet::default();
        for (codepoint, category) in iter {
            set.insert(codepoint, category, Block::NONE);
        }
        set
    }
}
