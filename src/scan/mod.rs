// src/scan/mod.rs

//! Output scanners.
//!
//! A scanner is a pure projection from a command's complete captured output
//! to a finite sequence of structured entries. It runs exactly once per
//! command, after the output capture is finished, and cannot influence the
//! captured text or the result record.

use std::collections::BTreeMap;

use regex::Regex;

use crate::errors::Result;

/// One structured record extracted from a command's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEntry {
    /// 1-based line number in the captured output.
    pub line: usize,
    /// The matched text.
    pub text: String,
    /// Named fields extracted by the scanner.
    pub fields: BTreeMap<String, String>,
}

/// Pure projection from captured output to structured entries.
pub trait Scanner: Send + Sync {
    fn scan(&self, output: &str) -> Vec<ScanEntry>;
}

/// Scanner that matches a compiled pattern against each output line and
/// extracts named capture groups as entry fields.
///
/// ```
/// # use shellrig::RegexScanner;
/// # use shellrig::Scanner;
/// let scanner = RegexScanner::new(r"(?P<level>ERROR|WARN): (?P<msg>.+)").unwrap();
/// let entries = scanner.scan("ok\nERROR: boom\n");
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].line, 2);
/// assert_eq!(entries[0].fields["level"], "ERROR");
/// ```
#[derive(Debug)]
pub struct RegexScanner {
    pattern: Regex,
}

impl RegexScanner {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl Scanner for RegexScanner {
    fn scan(&self, output: &str) -> Vec<ScanEntry> {
        let mut entries = Vec::new();

        for (idx, line) in output.lines().enumerate() {
            let Some(caps) = self.pattern.captures(line) else {
                continue;
            };

            let mut fields = BTreeMap::new();
            for name in self.pattern.capture_names().flatten() {
                if let Some(value) = caps.name(name) {
                    fields.insert(name.to_string(), value.as_str().to_string());
                }
            }

            let text = caps
                .get(0)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();

            entries.push(ScanEntry {
                line: idx + 1,
                text,
                fields,
            });
        }

        entries
    }
}
