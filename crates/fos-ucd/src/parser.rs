//! UCD Line Parser
//!
//! Reads the `;`-delimited tabular format shared by the Unicode data files:
//!
//! ```text
//! 0900..0902    ; Bindu      # Mn   [3] DEVANAGARI SIGN INVERTED CANDRABINDU..
//! 0903          ; Visarga    # Mc       DEVANAGARI SIGN VISARGA
//! ```
//!
//! Blank and comment-only lines are skipped. Anything else must parse, a bad
//! line is an error rather than a silent skip.

use crate::{Result, UcdError, MAX_CODEPOINT};

/// Inclusive codepoint range from field 0 of a data line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CodepointRange {
    pub start: u32,
    pub end: u32,
}

impl CodepointRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn single(codepoint: u32) -> Self {
        Self { start: codepoint, end: codepoint }
    }

    /// Parse `XXXX` or `XXXX..YYYY`
    pub fn parse(field: &str) -> Option<Self> {
        let field = field.trim();
        let range = match field.split_once("..") {
            Some((start, end)) => Self::new(parse_hex(start)?, parse_hex(end)?),
            None => Self::single(parse_hex(field)?),
        };
        (range.start <= range.end && range.end <= MAX_CODEPOINT).then_some(range)
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        self.start <= codepoint && codepoint <= self.end
    }

    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<u32> {
        self.start..=self.end
    }
}

/// Parse a bare hex codepoint
pub fn parse_hex(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() || s.len() > 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(s, 16).ok()
}

/// Drop a trailing `#` comment
pub fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(i) => &line[..i],
        None => line,
    }
}

/// One data line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UcdLine<'a> {
    /// 1-based line number
    pub number: usize,
    pub range: CodepointRange,
    /// Trimmed fields after field 0
    pub fields: Vec<&'a str>,
}

impl<'a> UcdLine<'a> {
    /// Field `index`, counting field 0 as the codepoint range
    pub fn field(&self, index: usize) -> Option<&'a str> {
        index.checked_sub(1).and_then(|i| self.fields.get(i).copied())
    }
}

/// Iterator over the data lines of one file
pub struct UcdReader<'a> {
    file: &'a str,
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    min_fields: usize,
    commented_data_marker: Option<&'static str>,
    in_commented_data: bool,
}

impl<'a> UcdReader<'a> {
    /// Read `text`, reporting errors against `file`
    pub fn new(file: &'a str, text: &'a str) -> Self {
        Self {
            file,
            lines: text.lines().enumerate(),
            min_fields: 2,
            commented_data_marker: None,
            in_commented_data: false,
        }
    }

    /// Minimum number of fields per data line, field 0 included
    pub fn min_fields(mut self, count: usize) -> Self {
        self.min_fields = count.max(1);
        self
    }

    /// Once a line containing `marker` is seen, read `# XXXX ; Value` lines as data
    pub fn commented_data_after(mut self, marker: &'static str) -> Self {
        self.commented_data_marker = Some(marker);
        self
    }

    fn malformed(&self, number: usize, reason: impl Into<String>) -> UcdError {
        UcdError::Malformed {
            file: self.file.to_string(),
            line: number,
            reason: reason.into(),
        }
    }

    fn parse_line(&mut self, number: usize, raw: &'a str) -> Option<Result<UcdLine<'a>>> {
        let mut line = raw;
        if self.in_commented_data && line.starts_with("# ") && line.contains(';') {
            line = &line[2..];
        } else if let Some(marker) = self.commented_data_marker {
            if line.contains(marker) {
                self.in_commented_data = true;
            }
        }

        let data = strip_comment(line).trim();
        if data.is_empty() {
            return None;
        }

        let mut parts = data.split(';').map(str::trim);
        let head = parts.next().unwrap_or_default();
        let fields: Vec<&'a str> = parts.collect();
        if fields.len() + 1 < self.min_fields {
            return Some(Err(self.malformed(
                number,
                format!("expected at least {} fields, found {}", self.min_fields, fields.len() + 1),
            )));
        }

        let Some(range) = CodepointRange::parse(head) else {
            return Some(Err(self.malformed(number, format!("invalid codepoint range '{head}'"))));
        };

        Some(Ok(UcdLine { number, range, fields }))
    }
}

impl<'a> Iterator for UcdReader<'a> {
    type Item = Result<UcdLine<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, raw)) = self.lines.next() {
            if let Some(item) = self.parse_line(index + 1, raw) {
                return Some(item);
            }
        }
        None
    }
}

/// Parse every data line of `text`, requiring `min_fields` fields each
pub fn parse_lines<'a>(file: &'a str, text: &'a str, min_fields: usize) -> Result<Vec<UcdLine<'a>>> {
    UcdReader::new(file, text).min_fields(min_fields).collect()
}
