//! Miette-based diagnostics for malformed documents.
//!
//! A document that fails to parse is reported with its text, the offending
//! line labelled, and a hint on the expected syntax.

use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

use crate::error::DocumentError;

/// Parse error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(trading_peripheral::document))]
pub struct DocumentDiagnostic {
    /// Human-readable error message.
    pub message: String,

    /// Document text, named after its path.
    #[source_code]
    pub src: NamedSource<String>,

    /// Byte offset and length of the offending line.
    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl DocumentDiagnostic {
    /// Build a diagnostic for `error`, or `None` when it has no location.
    #[must_use]
    pub fn from_error(error: &DocumentError, name: &str, text: &str) -> Option<Self> {
        let (offset, len) = error.span()?;
        Some(Self {
            message: error.to_string(),
            src: NamedSource::new(name, text.to_string()),
            span: (offset, len).into(),
            help: help_for(error).map(str::to_string),
        })
    }

    /// Wrap into a printable report.
    #[must_use]
    pub fn into_report(self) -> Report {
        Report::new(self)
    }
}

fn help_for(error: &DocumentError) -> Option<&'static str> {
    match error {
        DocumentError::MissingSectionHeader { .. } => {
            Some("options must follow a [section] header")
        }
        DocumentError::DuplicateSection { .. } => Some("merge the two sections into one"),
        DocumentError::DuplicateOption { .. } => Some("keep only one definition of the option"),
        DocumentError::MissingDelimiter { .. } => {
            Some("write options as 'key = value'; indent continuation lines")
        }
        DocumentError::EmptyOption { .. } => Some("give the option a name before the '='"),
        DocumentError::Encoding => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_points_at_offending_line() {
        let text = "[General]\nheadless\n";
        let error = DocumentError::MissingDelimiter {
            line: 2,
            offset: 10,
            len: 8,
        };
        let diagnostic = DocumentDiagnostic::from_error(&error, "doc.ini", text).unwrap();
        assert_eq!(diagnostic.span, SourceSpan::from((10, 8)));
        assert!(diagnostic.message.contains("line 2"));
        assert!(diagnostic.help.is_some());
    }

    #[test]
    fn encoding_errors_have_no_diagnostic() {
        assert!(DocumentDiagnostic::from_error(&DocumentError::Encoding, "doc.ini", "").is_none());
    }
}
