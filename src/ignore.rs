//! Ignore list: regular expressions matched against full command lines.
//!
//! The list is read once at startup and is immutable afterwards. A process whose
//! command line matches any rule is never signaled.
//!
//! File format:
//! - one pattern per line, surrounding whitespace trimmed
//! - blank lines and lines starting with `#` are skipped
//! - patterns use search semantics: `docker` matches `/usr/bin/dockerd`

use crate::error::IgnoreError;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Compiled ignore rules.
#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    rules: Vec<Regex>,
}

impl IgnoreList {
    /// Compiles every non-comment line. The first malformed pattern aborts the load.
    pub fn load<I, S>(lines: I) -> Result<Self, IgnoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = Vec::new();

        for (idx, raw) in lines.into_iter().enumerate() {
            let line = raw.as_ref().trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let rule = Regex::new(line).map_err(|source| IgnoreError::Pattern {
                line: idx + 1,
                pattern: line.to_string(),
                source,
            })?;
            rules.push(rule);
        }

        Ok(Self { rules })
    }

    /// Parses ignore rules from a string holding the whole file.
    pub fn from_str_content(content: &str) -> Result<Self, IgnoreError> {
        Self::load(content.lines())
    }

    /// Reads and compiles an ignore file.
    pub fn from_file(path: &Path) -> Result<Self, IgnoreError> {
        let content = fs::read_to_string(path).map_err(|source| IgnoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str_content(&content)
    }

    /// True iff at least one rule matches somewhere in `cmdline`.
    pub fn is_ignored(&self, cmdline: &str) -> bool {
        self.rules.iter().any(|rule| rule.is_match(cmdline))
    }

    /// Source text of the loaded rules, in file order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(Regex::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
