//! Role Predicates
//!
//! One pure predicate per role. Some are defined in terms of others (an
//! Other never overlaps a Base) but none depends on evaluation order.

use super::{Attributes, Role};
use crate::properties::{GeneralCategory as Gc, SyllabicCategory as Isc};
use crate::{Result, UcdError};

/// Predicate for `role`
pub fn predicate(role: Role) -> fn(&Attributes) -> bool {
    match role {
        Role::Base => is_base,
        Role::BaseNumber => is_base_num,
        Role::GenericBase => is_base_other,
        Role::ConsonantFinal => is_cons_final,
        Role::ConsonantFinalModifier => is_cons_final_mod,
        Role::ConsonantMedial => is_cons_med,
        Role::ConsonantModifier => is_cons_mod,
        Role::ConsonantSubjoined => is_cons_sub,
        Role::ConsonantWithStacker => is_cons_with_stacker,
        Role::Halant => is_halant,
        Role::HalantOrVowelModifier => is_halant_or_vowel_modifier,
        Role::HalantNumber => is_halant_num,
        Role::Hieroglyph => is_hieroglyph,
        Role::HieroglyphJoiner => is_hieroglyph_joiner,
        Role::HieroglyphSegmentBegin => is_hieroglyph_segment_begin,
        Role::HieroglyphSegmentEnd => is_hieroglyph_segment_end,
        Role::NonJoiner => is_zwnj,
        Role::Other => is_other,
        Role::Repha => is_repha,
        Role::Sakot => is_sakot,
        Role::Symbol => is_symbol,
        Role::SymbolModifier => is_symbol_modifier,
        Role::Vowel => is_vowel,
        Role::VowelModifier => is_vowel_modifier,
    }
}

/// The single role whose predicate holds
pub fn resolve_role(attrs: &Attributes) -> Result<Role> {
    let matched: Vec<Role> = Role::ALL
        .iter()
        .copied()
        .filter(|&role| predicate(role)(attrs))
        .collect();

    match matched.as_slice() {
        [role] => Ok(*role),
        _ => Err(UcdError::ClassificationAmbiguity {
            codepoint: attrs.codepoint,
            attributes: attrs.to_string(),
            matched,
        }),
    }
}

// ============================================================================
// Predicates
// ============================================================================

fn is_base(a: &Attributes) -> bool {
    matches!(
        a.syllabic,
        Isc::Number | Isc::Consonant | Isc::ConsonantHeadLetter | Isc::ToneLetter | Isc::VowelIndependent
    ) || (a.joining.is_joining() && a.syllabic != Isc::Joiner)
        || (a.general == Gc::OtherLetter
            && matches!(
                a.syllabic,
                Isc::Avagraha
                    | Isc::Bindu
                    | Isc::ConsonantFinal
                    | Isc::ConsonantMedial
                    | Isc::ConsonantSubjoined
                    | Isc::Vowel
                    | Isc::VowelDependent
            ))
}

fn is_base_num(a: &Attributes) -> bool {
    a.syllabic == Isc::BrahmiJoiningNumber
}

fn is_base_other(a: &Attributes) -> bool {
    a.syllabic == Isc::ConsonantPlaceholder
        || matches!(a.codepoint, 0x2015 | 0x2022 | 0x25FB..=0x25FE)
}

fn is_cons_final(a: &Attributes) -> bool {
    (a.syllabic == Isc::ConsonantFinal && a.general != Gc::OtherLetter)
        || a.syllabic == Isc::ConsonantSucceedingRepha
}

fn is_cons_final_mod(a: &Attributes) -> bool {
    a.syllabic == Isc::SyllableModifier
}

fn is_cons_med(a: &Attributes) -> bool {
    (a.syllabic == Isc::ConsonantMedial && a.general != Gc::OtherLetter)
        || a.syllabic == Isc::ConsonantInitialPostfixed
}

fn is_cons_mod(a: &Attributes) -> bool {
    matches!(a.syllabic, Isc::Nukta | Isc::GeminationMark | Isc::ConsonantKiller)
        && !is_symbol_modifier(a)
}

fn is_cons_sub(a: &Attributes) -> bool {
    a.syllabic == Isc::ConsonantSubjoined && a.general != Gc::OtherLetter
}

fn is_cons_with_stacker(a: &Attributes) -> bool {
    a.syllabic == Isc::ConsonantWithStacker
}

fn is_halant(a: &Attributes) -> bool {
    matches!(a.syllabic, Isc::Virama | Isc::InvisibleStacker)
        && !is_halant_or_vowel_modifier(a)
        && !is_sakot(a)
}

fn is_halant_or_vowel_modifier(a: &Attributes) -> bool {
    matches!(a.codepoint, 0x11046 | 0x1134D)
}

fn is_halant_num(a: &Attributes) -> bool {
    a.syllabic == Isc::NumberJoiner
}

fn is_hieroglyph(a: &Attributes) -> bool {
    a.syllabic == Isc::Hieroglyph
}

fn is_hieroglyph_joiner(a: &Attributes) -> bool {
    a.syllabic == Isc::HieroglyphJoiner
}

fn is_hieroglyph_segment_begin(a: &Attributes) -> bool {
    a.syllabic == Isc::HieroglyphSegmentBegin
}

fn is_hieroglyph_segment_end(a: &Attributes) -> bool {
    a.syllabic == Isc::HieroglyphSegmentEnd
}

fn is_zwnj(a: &Attributes) -> bool {
    a.syllabic == Isc::NonJoiner
}

fn is_other(a: &Attributes) -> bool {
    (matches!(a.general, Gc::Unassigned | Gc::OtherPunctuation)
        || matches!(
            a.syllabic,
            Isc::ConsonantDead | Isc::Joiner | Isc::ModifyingLetter | Isc::Other
        ))
        && !is_base(a)
        && !is_base_other(a)
        && !is_symbol(a)
        && !is_symbol_modifier(a)
}

fn is_repha(a: &Attributes) -> bool {
    matches!(a.syllabic, Isc::ConsonantPrecedingRepha | Isc::ConsonantPrefixed)
}

fn is_sakot(a: &Attributes) -> bool {
    a.codepoint == 0x1A60
}

fn is_symbol(a: &Attributes) -> bool {
    if matches!(a.codepoint, 0x25CC | 0x1E14F) {
        return false;
    }
    matches!(a.general, Gc::OtherSymbol | Gc::CurrencySymbol)
        && !matches!(a.codepoint, 0x0F01 | 0x1B62 | 0x1B68)
}

fn is_symbol_modifier(a: &Attributes) -> bool {
    (0x1B6B..=0x1B73).contains(&a.codepoint)
}

fn is_vowel(a: &Attributes) -> bool {
    a.syllabic == Isc::PureKiller
        || (a.general != Gc::OtherLetter
            && matches!(a.syllabic, Isc::Vowel | Isc::VowelDependent)
            && a.codepoint != 0xAA29)
}

fn is_vowel_modifier(a: &Attributes) -> bool {
    matches!(
        a.syllabic,
        Isc::ToneMark | Isc::CantillationMark | Isc::RegisterShifter | Isc::Visarga
    ) || (a.general != Gc::OtherLetter && (a.syllabic == Isc::Bindu || a.codepoint == 0xAA29))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::{JoiningType, PositionalCategory};

    fn attrs(codepoint: u32, syllabic: Isc, general: Gc) -> Attributes {
        Attributes {
            codepoint,
            syllabic,
            positional: PositionalCategory::NotApplicable,
            general,
            joining: JoiningType::Unlisted,
        }
    }

    #[test]
    fn test_joining_letters_are_bases() {
        let beh = Attributes {
            joining: JoiningType::DualJoining,
            ..attrs(0x10AC0, Isc::Other, Gc::OtherLetter)
        };
        assert_eq!(resolve_role(&beh).unwrap(), Role::Base);
    }

    #[test]
    fn test_letter_marks_are_bases() {
        // Khmer independent-looking vowel letters carry a dependent category
        let a = attrs(0x17A3, Isc::VowelDependent, Gc::OtherLetter);
        assert_eq!(resolve_role(&a).unwrap(), Role::Base);
        let a = attrs(0x17B6, Isc::VowelDependent, Gc::SpacingMark);
        assert_eq!(resolve_role(&a).unwrap(), Role::Vowel);
    }

    #[test]
    fn test_codepoint_exceptions() {
        let a = attrs(0x11046, Isc::Virama, Gc::NonspacingMark);
        assert_eq!(resolve_role(&a).unwrap(), Role::HalantOrVowelModifier);
        let a = attrs(0x1A60, Isc::InvisibleStacker, Gc::NonspacingMark);
        assert_eq!(resolve_role(&a).unwrap(), Role::Sakot);
        let a = attrs(0xAA29, Isc::VowelDependent, Gc::NonspacingMark);
        assert_eq!(resolve_role(&a).unwrap(), Role::VowelModifier);
        let a = attrs(0x2022, Isc::Other, Gc::OtherPunctuation);
        assert_eq!(resolve_role(&a).unwrap(), Role::GenericBase);
        let a = attrs(0x1B73, Isc::Nukta, Gc::NonspacingMark);
        assert_eq!(resolve_role(&a).unwrap(), Role::SymbolModifier);
    }

    #[test]
    fn test_dotted_circle_is_not_a_symbol() {
        let a = attrs(0x25CC, Isc::Other, Gc::OtherSymbol);
        assert!(!is_symbol(&a));
        let a = attrs(0x0F01, Isc::Other, Gc::OtherSymbol);
        assert!(!is_symbol(&a));
        assert_eq!(resolve_role(&a).unwrap(), Role::Other);
    }

    #[test]
    fn test_ambiguity_reports_attributes() {
        let a = attrs(0x1B6B, Isc::Other, Gc::OtherSymbol);
        let err = resolve_role(&a).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("U+1B6B"));
        assert!(message.contains("Other"));
    }
}
