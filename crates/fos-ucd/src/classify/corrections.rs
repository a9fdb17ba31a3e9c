//! Data Corrections
//!
//! Codepoints whose UCD attributes disagree with what the shaper needs.
//! Syllabic fixes run before role resolution, positional fixes after it.

use std::ops::RangeInclusive;

use super::Attributes;
use crate::properties::{PositionalCategory as Ipc, SyllabicCategory as Isc};

/// Syllabic category fixes
pub const SYLLABIC: &[(RangeInclusive<u32>, Isc)] = &[
    // No syllabic category assigned, but a positional one
    (0x1CE2..=0x1CE8, Isc::CantillationMark),
    (0x0F18..=0x0F19, Isc::VowelDependent),
    (0x0F3E..=0x0F3F, Isc::VowelDependent),
    // https://github.com/harfbuzz/harfbuzz/pull/627
    (0x1BF2..=0x1BF3, Isc::Nukta),
    // Only valid after some nasalization marks, possibly only U+1CE9..U+1CF1
    (0x1CED..=0x1CED, Isc::ToneMark),
    // https://github.com/microsoft/font-tools/issues/1
    (0xA982..=0xA982, Isc::ConsonantSucceedingRepha),
];

/// Positional category fixes
pub const POSITIONAL: &[(RangeInclusive<u32>, Ipc)] = &[
    (0x0953..=0x0954, Ipc::NotApplicable),
    (0x103C..=0x103C, Ipc::Left),
    (0xA926..=0xA92A, Ipc::Top),
    // https://github.com/harfbuzz/harfbuzz/pull/1037
    (0x11302..=0x11303, Ipc::Top),
    (0x114C1..=0x114C1, Ipc::Top),
    (0x1171E..=0x1171E, Ipc::Left),
    (0x1CF8..=0x1CF9, Ipc::Top),
    // https://github.com/harfbuzz/harfbuzz/pull/982
    (0x1112A..=0x1112B, Ipc::Top),
    (0x11131..=0x11132, Ipc::Top),
];

fn lookup<T: Copy>(table: &[(RangeInclusive<u32>, T)], codepoint: u32) -> Option<T> {
    table
        .iter()
        .find(|(range, _)| range.contains(&codepoint))
        .map(|(_, value)| *value)
}

pub fn apply_syllabic(attrs: &mut Attributes) {
    if let Some(syllabic) = lookup(SYLLABIC, attrs.codepoint) {
        attrs.syllabic = syllabic;
    }
    if (0x1BF2..=0x1BF3).contains(&attrs.codepoint) {
        attrs.positional = Ipc::Bottom;
    }
}

pub fn apply_positional(attrs: &mut Attributes) {
    if let Some(positional) = lookup(POSITIONAL, attrs.codepoint) {
        attrs.positional = positional;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::{GeneralCategory, JoiningType};

    fn attrs(codepoint: u32) -> Attributes {
        Attributes {
            codepoint,
            syllabic: Isc::Other,
            positional: Ipc::Right,
            general: GeneralCategory::NonspacingMark,
            joining: JoiningType::Unlisted,
        }
    }

    #[test]
    fn test_syllabic_fixes() {
        let mut a = attrs(0x1CE5);
        apply_syllabic(&mut a);
        assert_eq!(a.syllabic, Isc::CantillationMark);
        assert_eq!(a.positional, Ipc::Right);

        let mut a = attrs(0x1BF3);
        apply_syllabic(&mut a);
        assert_eq!((a.syllabic, a.positional), (Isc::Nukta, Ipc::Bottom));
    }

    #[test]
    fn test_positional_fixes() {
        let mut a = attrs(0x0953);
        apply_positional(&mut a);
        assert_eq!(a.positional, Ipc::NotApplicable);

        let mut a = attrs(0x11132);
        apply_positional(&mut a);
        assert_eq!(a.positional, Ipc::Top);
    }

    #[test]
    fn test_untouched_codepoints() {
        let mut a = attrs(0x0915);
        apply_syllabic(&mut a);
        apply_positional(&mut a);
        assert_eq!(a, attrs(0x0915));
    }
}
