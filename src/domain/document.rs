//! Section → option → text configuration document.
//!
//! The text form follows the INI dialect the tool has always written:
//! `[section]` headers, `key = value` (or `key: value`) lines, full-line
//! `#`/`;` comments and indented continuation lines. Section and option
//! order is insertion order and survives a parse/serialize cycle.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::DocumentError;

/// Options of one section, in insertion order.
pub type Section = IndexMap<String, String>;

/// A parsed configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sections: IndexMap<String, Section>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Section names in order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    #[must_use]
    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// Add an empty section; returns `false` if it already exists.
    pub fn add_section(&mut self, section: &str) -> bool {
        if self.has_section(section) {
            return false;
        }
        self.sections.insert(section.to_string(), Section::new());
        true
    }

    /// Option names of a section, or `None` when the section is missing.
    #[must_use]
    pub fn options(&self, section: &str) -> Option<Vec<String>> {
        self.sections
            .get(section)
            .map(|options| options.keys().cloned().collect())
    }

    #[must_use]
    pub fn section(&self, section: &str) -> Option<&Section> {
        self.sections.get(section)
    }

    #[must_use]
    pub fn has_option(&self, section: &str, option: &str) -> bool {
        self.get(section, option).is_some()
    }

    #[must_use]
    pub fn get(&self, section: &str, option: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|options| options.get(option))
            .map(String::as_str)
    }

    /// Set an option, creating the section when needed.
    pub fn set(&mut self, section: &str, option: &str, value: impl Into<String>) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(option.to_string(), value.into());
    }

    /// Remove an option; returns `false` if it was not present.
    pub fn remove(&mut self, section: &str, option: &str) -> bool {
        self.sections
            .get_mut(section)
            .and_then(|options| options.shift_remove(option))
            .is_some()
    }

    /// Strict boolean reading: only `true`/`false` in any case qualify.
    #[must_use]
    pub fn get_strict_bool(&self, section: &str, option: &str) -> Option<bool> {
        self.get(section, option).and_then(parse_strict_bool)
    }

    /// Overlay every option of `other` onto this document.
    pub fn merge(&mut self, other: &Document) {
        for (name, options) in &other.sections {
            let target = self.sections.entry(name.clone()).or_default();
            for (option, value) in options {
                target.insert(option.clone(), value.clone());
            }
        }
    }
}

/// `Some(bool)` when `text` is exactly `true` or `false`, ignoring case.
#[must_use]
pub fn parse_strict_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

impl FromStr for Document {
    type Err = DocumentError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut document = Document::new();
        let mut current_section: Option<String> = None;
        let mut current_option: Option<String> = None;
        let mut offset = 0;

        for (index, raw_line) in text.split('\n').enumerate() {
            let line_number = index + 1;
            let line_offset = offset;
            offset += raw_line.len() + 1;
            let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
            let trimmed = line.trim();
            let len = line.len();

            if trimmed.is_empty() {
                current_option = None;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let indented = line.starts_with(char::is_whitespace);
            if indented {
                if let (Some(section), Some(option)) = (&current_section, &current_option) {
                    if let Some(value) = document
                        .sections
                        .get_mut(section)
                        .and_then(|options| options.get_mut(option))
                    {
                        if !value.is_empty() {
                            value.push('\n');
                        }
                        value.push_str(trimmed);
                        continue;
                    }
                }
            }

            if !indented && line.starts_with('[') && trimmed.ends_with(']') {
                let name = &trimmed[1..trimmed.len() - 1];
                if !document.add_section(name) {
                    return Err(DocumentError::DuplicateSection {
                        section: name.to_string(),
                        line: line_number,
                        offset: line_offset,
                        len,
                    });
                }
                current_section = Some(name.to_string());
                current_option = None;
                continue;
            }

            let Some(section) = current_section.clone() else {
                return Err(DocumentError::MissingSectionHeader {
                    line: line_number,
                    offset: line_offset,
                    len,
                });
            };
            let Some(split) = trimmed.find(['=', ':']) else {
                return Err(DocumentError::MissingDelimiter {
                    line: line_number,
                    offset: line_offset,
                    len,
                });
            };
            let option = trimmed[..split].trim();
            let value = trimmed[split + 1..].trim();
            if option.is_empty() {
                return Err(DocumentError::EmptyOption {
                    line: line_number,
                    offset: line_offset,
                    len,
                });
            }
            if document.has_option(&section, option) {
                return Err(DocumentError::DuplicateOption {
                    section,
                    option: option.to_string(),
                    line: line_number,
                    offset: line_offset,
                    len,
                });
            }
            document.set(&section, option, value);
            current_option = Some(option.to_string());
        }

        Ok(document)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, options) in &self.sections {
            writeln!(f, "[{name}]")?;
            for (option, value) in options {
                writeln!(f, "{option} = {}", value.replace('\n', "\n\t"))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
