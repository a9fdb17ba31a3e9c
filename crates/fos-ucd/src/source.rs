//! Source Files
//!
//! The compiler reads a fixed set of files. Where they come from is behind
//! the `DataSource` trait: a directory on disk for real builds, a map of
//! strings for tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::{Result, UcdError};

/// Every input file the compiler knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceFile {
    SyllabicCategory,
    PositionalCategory,
    UnicodeData,
    ArabicShaping,
    Blocks,
    Scripts,
    /// ms-use overlay for Indic_Syllabic_Category
    SyllabicOverlay,
    /// ms-use overlay for Indic_Positional_Category
    PositionalOverlay,
    /// ms-use prohibited vowel sequences
    InvalidClusters,
    EmojiData,
}

impl SourceFile {
    pub const ALL: &'static [SourceFile] = &[
        SourceFile::SyllabicCategory,
        SourceFile::PositionalCategory,
        SourceFile::UnicodeData,
        SourceFile::ArabicShaping,
        SourceFile::Blocks,
        SourceFile::Scripts,
        SourceFile::SyllabicOverlay,
        SourceFile::PositionalOverlay,
        SourceFile::InvalidClusters,
        SourceFile::EmojiData,
    ];

    /// Path relative to the data directory
    pub fn path(self) -> &'static str {
        match self {
            SourceFile::SyllabicCategory => "IndicSyllabicCategory.txt",
            SourceFile::PositionalCategory => "IndicPositionalCategory.txt",
            SourceFile::UnicodeData => "UnicodeData.txt",
            SourceFile::ArabicShaping => "ArabicShaping.txt",
            SourceFile::Blocks => "Blocks.txt",
            SourceFile::Scripts => "Scripts.txt",
            SourceFile::SyllabicOverlay => "ms-use/IndicSyllabicCategory-Additional.txt",
            SourceFile::PositionalOverlay => "ms-use/IndicPositionalCategory-Additional.txt",
            SourceFile::InvalidClusters => "ms-use/IndicShapingInvalidCluster.txt",
            SourceFile::EmojiData => "emoji/emoji-data.txt",
        }
    }

    /// Where to download the file for a given Unicode version
    pub fn origin(self, unicode_version: &str) -> String {
        match self {
            SourceFile::SyllabicOverlay
            | SourceFile::PositionalOverlay
            | SourceFile::InvalidClusters => {
                "the USE data files \
                 (https://github.com/harfbuzz/harfbuzz/tree/main/src/ms-use)"
                    .to_string()
            }
            _ => format!("https://unicode.org/Public/{unicode_version}/ucd/{}", self.path()),
        }
    }
}

/// Provider of source file contents
pub trait DataSource {
    /// Full text of `file`, `UcdError::MissingSource` if it is absent
    fn read(&self, file: SourceFile) -> Result<String>;
}

/// Source files in a directory laid out like the UCD distribution
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
    unicode_version: String,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>, unicode_version: &str) -> Self {
        Self {
            root: root.into(),
            unicode_version: unicode_version.to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DataSource for DirSource {
    fn read(&self, file: SourceFile) -> Result<String> {
        let path = self.root.join(file.path());
        tracing::debug!("Reading {}", path.display());
        std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                UcdError::MissingSource {
                    file: file.path().to_string(),
                    location: self.root.display().to_string(),
                    hint: file.origin(&self.unicode_version),
                }
            } else {
                UcdError::Io { path, source }
            }
        })
    }
}

/// In-memory source files
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<SourceFile, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    pub fn with(mut self, file: SourceFile, text: impl Into<String>) -> Self {
        self.insert(file, text);
        self
    }

    pub fn insert(&mut self, file: SourceFile, text: impl Into<String>) {
        self.files.insert(file, text.into());
    }
}

impl DataSource for MemorySource {
    fn read(&self, file: SourceFile) -> Result<String> {
        self.files.get(&file).cloned().ok_or_else(|| UcdError::MissingSource {
            file: file.path().to_string(),
            location: "in-memory source".to_string(),
            hint: file.origin("13.0.0"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_in_directory() {
        let dir = std::env::temp_dir().join("fos-ucd-missing-source-test");
        let source = DirSource::new(&dir, "13.0.0");
        let err = source.read(SourceFile::Blocks).unwrap_err();
        match err {
            UcdError::MissingSource { file, location, hint } => {
                assert_eq!(file, "Blocks.txt");
                assert_eq!(location, dir.display().to_string());
                assert_eq!(hint, "https://unicode.org/Public/13.0.0/ucd/Blocks.txt");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_memory_source() {
        let source = MemorySource::new().with(SourceFile::Scripts, "0900..097F ; Devanagari\n");
        assert!(source.read(SourceFile::Scripts).unwrap().contains("Devanagari"));
        assert!(matches!(
            source.read(SourceFile::InvalidClusters),
            Err(UcdError::MissingSource { .. })
        ));
    }

    #[test]
    fn test_directory_source_reads_files() {
        let dir = std::env::temp_dir().join(format!("fos-ucd-source-test-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("ms-use")).unwrap();
        std::fs::write(dir.join("ms-use/IndicShapingInvalidCluster.txt"), "0905 093E\n").unwrap();

        let source = DirSource::new(&dir, "13.0.0");
        assert_eq!(source.read(SourceFile::InvalidClusters).unwrap(), "0905 093E\n");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
