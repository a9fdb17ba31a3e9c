//! Unicode Property Values
//!
//! Closed enums for the four property axes the classifier reads. Each value
//! knows its UCD spelling, so ingestion maps text to tags once and every
//! later comparison is tag identity.

macro_rules! property_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $property:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $ucd:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// UCD property name
            pub const PROPERTY: &'static str = $property;

            /// Every value, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Look up a value by its UCD spelling
            pub fn from_ucd(name: &str) -> Option<Self> {
                match name {
                    $( $ucd => Some($name::$variant), )+
                    _ => None,
                }
            }

            /// UCD spelling of the value
            pub fn ucd_name(self) -> &'static str {
                match self {
                    $( $name::$variant => $ucd, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.ucd_name())
            }
        }
    };
}

property_enum! {
    /// General_Category (UnicodeData.txt field 2)
    pub enum GeneralCategory : "General_Category" {
        Control => "Cc",
        Format => "Cf",
        Unassigned => "Cn",
        PrivateUse => "Co",
        Surrogate => "Cs",
        LowercaseLetter => "Ll",
        ModifierLetter => "Lm",
        OtherLetter => "Lo",
        TitlecaseLetter => "Lt",
        UppercaseLetter => "Lu",
        SpacingMark => "Mc",
        EnclosingMark => "Me",
        NonspacingMark => "Mn",
        DecimalNumber => "Nd",
        LetterNumber => "Nl",
        OtherNumber => "No",
        ConnectorPunctuation => "Pc",
        DashPunctuation => "Pd",
        ClosePunctuation => "Pe",
        FinalPunctuation => "Pf",
        InitialPunctuation => "Pi",
        OtherPunctuation => "Po",
        OpenPunctuation => "Ps",
        CurrencySymbol => "Sc",
        ModifierSymbol => "Sk",
        MathSymbol => "Sm",
        OtherSymbol => "So",
        LineSeparator => "Zl",
        ParagraphSeparator => "Zp",
        SpaceSeparator => "Zs",
    }
}

property_enum! {
    /// Indic_Syllabic_Category
    pub enum SyllabicCategory : "Indic_Syllabic_Category" {
        Other => "Other",
        Bindu => "Bindu",
        Visarga => "Visarga",
        Avagraha => "Avagraha",
        Nukta => "Nukta",
        Virama => "Virama",
        PureKiller => "Pure_Killer",
        InvisibleStacker => "Invisible_Stacker",
        VowelIndependent => "Vowel_Independent",
        VowelDependent => "Vowel_Dependent",
        Vowel => "Vowel",
        ConsonantPlaceholder => "Consonant_Placeholder",
        Consonant => "Consonant",
        ConsonantDead => "Consonant_Dead",
        ConsonantWithStacker => "Consonant_With_Stacker",
        ConsonantPrefixed => "Consonant_Prefixed",
        ConsonantPrecedingRepha => "Consonant_Preceding_Repha",
        ConsonantSucceedingRepha => "Consonant_Succeeding_Repha",
        ConsonantSubjoined => "Consonant_Subjoined",
        ConsonantMedial => "Consonant_Medial",
        ConsonantFinal => "Consonant_Final",
        ConsonantHeadLetter => "Consonant_Head_Letter",
        ConsonantInitialPostfixed => "Consonant_Initial_Postfixed",
        ModifyingLetter => "Modifying_Letter",
        ToneLetter => "Tone_Letter",
        ToneMark => "Tone_Mark",
        GeminationMark => "Gemination_Mark",
        CantillationMark => "Cantillation_Mark",
        RegisterShifter => "Register_Shifter",
        SyllableModifier => "Syllable_Modifier",
        ConsonantKiller => "Consonant_Killer",
        NonJoiner => "Non_Joiner",
        Joiner => "Joiner",
        NumberJoiner => "Number_Joiner",
        Number => "Number",
        BrahmiJoiningNumber => "Brahmi_Joining_Number",
        Hieroglyph => "Hieroglyph",
        HieroglyphJoiner => "Hieroglyph_Joiner",
        HieroglyphSegmentBegin => "Hieroglyph_Segment_Begin",
        HieroglyphSegmentEnd => "Hieroglyph_Segment_End",
    }
}

property_enum! {
    /// Indic_Positional_Category
    pub enum PositionalCategory : "Indic_Positional_Category" {
        NotApplicable => "Not_Applicable",
        Right => "Right",
        Left => "Left",
        VisualOrderLeft => "Visual_Order_Left",
        LeftAndRight => "Left_And_Right",
        Top => "Top",
        Bottom => "Bottom",
        TopAndBottom => "Top_And_Bottom",
        TopAndRight => "Top_And_Right",
        TopAndLeft => "Top_And_Left",
        TopAndLeftAndRight => "Top_And_Left_And_Right",
        BottomAndLeft => "Bottom_And_Left",
        BottomAndRight => "Bottom_And_Right",
        TopAndBottomAndRight => "Top_And_Bottom_And_Right",
        Overstruck => "Overstruck",
    }
}

property_enum! {
    /// Joining_Type (ArabicShaping.txt field 2)
    pub enum JoiningType : "Joining_Type" {
        JoinCausing => "C",
        DualJoining => "D",
        LeftJoining => "L",
        RightJoining => "R",
        Transparent => "T",
        NonJoining => "U",
        /// Not listed in ArabicShaping.txt
        Unlisted => "X",
    }
}

impl Default for GeneralCategory {
    fn default() -> Self {
        GeneralCategory::Unassigned
    }
}

impl Default for SyllabicCategory {
    fn default() -> Self {
        SyllabicCategory::Other
    }
}

impl Default for PositionalCategory {
    fn default() -> Self {
        PositionalCategory::NotApplicable
    }
}

impl Default for JoiningType {
    fn default() -> Self {
        JoiningType::Unlisted
    }
}

impl JoiningType {
    /// Whether the character takes part in cursive joining
    pub fn is_joining(self) -> bool {
        matches!(
            self,
            JoiningType::JoinCausing
                | JoiningType::DualJoining
                | JoiningType::LeftJoining
                | JoiningType::RightJoining
        )
    }
}
