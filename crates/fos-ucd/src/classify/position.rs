//! Positional Refinement
//!
//! Seven roles split by where the glyph attaches. Each has a table of
//! position suffix to the positional categories that select it; a refined
//! codepoint must hit exactly one row.

use super::{Attributes, Position, Role};
use crate::properties::PositionalCategory as Ipc;
use crate::{Result, UcdError};

type PositionTable = &'static [(Position, &'static [Ipc])];

/// How a role treats the positional category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refinement {
    /// Exactly one row must match
    Table(PositionTable),
    /// Any positional category, no suffix
    Unpositioned,
    /// Only Not_Applicable or Visual_Order_Left
    Stray,
}

const FINAL: PositionTable = &[
    (Position::Above, &[Ipc::Top]),
    (Position::Below, &[Ipc::Bottom]),
    (Position::Post, &[Ipc::Right]),
];

const MEDIAL: PositionTable = &[
    (Position::Above, &[Ipc::Top]),
    (Position::Below, &[Ipc::Bottom, Ipc::BottomAndLeft]),
    (Position::Post, &[Ipc::Right]),
    (Position::Pre, &[Ipc::Left]),
];

const MODIFIER: PositionTable = &[
    (Position::Above, &[Ipc::Top]),
    (Position::Below, &[Ipc::Bottom, Ipc::Overstruck]),
];

const VOWEL: PositionTable = &[
    (
        Position::Above,
        &[Ipc::Top, Ipc::TopAndBottom, Ipc::TopAndBottomAndRight, Ipc::TopAndRight],
    ),
    (Position::Below, &[Ipc::Bottom, Ipc::Overstruck, Ipc::BottomAndRight]),
    (Position::Post, &[Ipc::Right]),
    (
        Position::Pre,
        &[Ipc::Left, Ipc::TopAndLeft, Ipc::TopAndLeftAndRight, Ipc::LeftAndRight],
    ),
];

const VOWEL_MODIFIER: PositionTable = &[
    (Position::Above, &[Ipc::Top]),
    (Position::Below, &[Ipc::Bottom, Ipc::Overstruck]),
    (Position::Post, &[Ipc::Right]),
    (Position::Pre, &[Ipc::Left]),
];

const SYMBOL_MODIFIER: PositionTable = &[
    (Position::Above, &[Ipc::Top]),
    (Position::Below, &[Ipc::Bottom]),
];

const FINAL_MODIFIER: PositionTable = &[
    (Position::Above, &[Ipc::Top]),
    (Position::Below, &[Ipc::Bottom]),
    (Position::Post, &[Ipc::NotApplicable]),
];

pub fn refinement(role: Role) -> Refinement {
    match role {
        Role::ConsonantFinal => Refinement::Table(FINAL),
        Role::ConsonantMedial => Refinement::Table(MEDIAL),
        Role::ConsonantModifier => Refinement::Table(MODIFIER),
        Role::Vowel => Refinement::Table(VOWEL),
        Role::VowelModifier => Refinement::Table(VOWEL_MODIFIER),
        Role::SymbolModifier => Refinement::Table(SYMBOL_MODIFIER),
        Role::ConsonantFinalModifier => Refinement::Table(FINAL_MODIFIER),
        Role::Halant
        | Role::HalantOrVowelModifier
        | Role::Base
        | Role::Repha
        | Role::ConsonantSubjoined => Refinement::Unpositioned,
        _ => Refinement::Stray,
    }
}

/// Position suffix for `role`, `None` for unrefined roles
pub fn resolve_position(role: Role, attrs: &Attributes) -> Result<Option<Position>> {
    match refinement(role) {
        Refinement::Table(table) => {
            let matched: Vec<Position> = table
                .iter()
                .filter(|(_, categories)| categories.contains(&attrs.positional))
                .map(|(position, _)| *position)
                .collect();
            match matched.as_slice() {
                [position] => Ok(Some(*position)),
                _ => Err(UcdError::PositionAmbiguity {
                    codepoint: attrs.codepoint,
                    role,
                    position: attrs.positional,
                    matched,
                }),
            }
        }
        Refinement::Unpositioned => Ok(None),
        Refinement::Stray => {
            if matches!(attrs.positional, Ipc::NotApplicable | Ipc::VisualOrderLeft)
                || attrs.codepoint == 0x0F7F
            {
                Ok(None)
            } else {
                Err(UcdError::StrayPosition {
                    codepoint: attrs.codepoint,
                    role,
                    position: attrs.positional,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::{GeneralCategory, JoiningType, SyllabicCategory};

    fn attrs(codepoint: u32, positional: Ipc) -> Attributes {
        Attributes {
            codepoint,
            syllabic: SyllabicCategory::Other,
            positional,
            general: GeneralCategory::NonspacingMark,
            joining: JoiningType::Unlisted,
        }
    }

    #[test]
    fn test_rows_do_not_overlap() {
        for role in Role::ALL {
            if let Refinement::Table(table) = refinement(*role) {
                for category in Ipc::ALL {
                    let hits = table.iter().filter(|(_, c)| c.contains(category)).count();
                    assert!(hits <= 1, "{role:?} {category}");
                }
            }
        }
    }

    #[test]
    fn test_vowel_positions() {
        let at = |p| resolve_position(Role::Vowel, &attrs(0x0B48, p)).unwrap();
        assert_eq!(at(Ipc::TopAndLeftAndRight), Some(Position::Pre));
        assert_eq!(at(Ipc::TopAndBottom), Some(Position::Above));
        assert_eq!(at(Ipc::BottomAndRight), Some(Position::Below));
        assert_eq!(at(Ipc::Right), Some(Position::Post));
    }

    #[test]
    fn test_final_modifier_without_position_is_post() {
        let position = resolve_position(Role::ConsonantFinalModifier, &attrs(0x1B03, Ipc::NotApplicable));
        assert_eq!(position.unwrap(), Some(Position::Post));
    }

    #[test]
    fn test_unmatched_position_is_fatal() {
        let err = resolve_position(Role::ConsonantModifier, &attrs(0x093C, Ipc::Right)).unwrap_err();
        match err {
            UcdError::PositionAmbiguity { codepoint, role, position, matched } => {
                assert_eq!(codepoint, 0x093C);
                assert_eq!(role, Role::ConsonantModifier);
                assert_eq!(position, Ipc::Right);
                assert!(matched.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unpositioned_roles_accept_anything() {
        assert_eq!(resolve_position(Role::Halant, &attrs(0x094D, Ipc::Bottom)).unwrap(), None);
        assert_eq!(resolve_position(Role::Base, &attrs(0x0915, Ipc::Right)).unwrap(), None);
    }

    #[test]
    fn test_stray_positions() {
        assert_eq!(resolve_position(Role::Other, &attrs(0x0F7F, Ipc::Right)).unwrap(), None);
        assert_eq!(
            resolve_position(Role::Symbol, &attrs(0x1B61, Ipc::VisualOrderLeft)).unwrap(),
            None
        );
        let err = resolve_position(Role::Symbol, &attrs(0x1B61, Ipc::Top)).unwrap_err();
        assert!(matches!(err, UcdError::StrayPosition { codepoint: 0x1B61, .. }));
    }
}
