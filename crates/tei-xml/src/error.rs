//! Error types for XML parsing with source locations.

use crate::types::SourceSpan;

/// Result type alias for tei-xml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during XML parsing.
///
/// Every variant is fatal: a document that fails to parse produces no tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// XML syntax error reported by quick-xml.
    #[error("XML syntax error: {message}")]
    XmlSyntax {
        message: String,
        /// Byte offset where the error occurred.
        position: Option<usize>,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof {
        /// What was expected when EOF was encountered.
        expected: String,
        span: Option<SourceSpan>,
    },

    #[error("mismatched end tag: expected </{expected}>, found </{found}>")]
    MismatchedEndTag {
        expected: String,
        found: String,
        span: Option<SourceSpan>,
    },

    #[error("invalid XML structure: {message}")]
    InvalidStructure {
        message: String,
        span: Option<SourceSpan>,
    },

    #[error("empty XML document: no root element found")]
    EmptyDocument,

    #[error("invalid XML: multiple root elements")]
    MultipleRoots { span: Option<SourceSpan> },

    #[error("unknown character encoding `{label}`")]
    UnknownEncoding { label: String },

    #[error("input is not valid {encoding}")]
    MalformedEncoding { encoding: String },
}

impl Error {
    /// Short stable identifier for the error class.
    pub fn code(&self) -> &'static str {
        match self {
            Error::XmlSyntax { .. } => "xml-syntax",
            Error::UnexpectedEof { .. } => "xml-unexpected-eof",
            Error::MismatchedEndTag { .. } => "xml-mismatched-end-tag",
            Error::InvalidStructure { .. } => "xml-invalid-structure",
            Error::EmptyDocument => "xml-empty-document",
            Error::MultipleRoots { .. } => "xml-multiple-roots",
            Error::UnknownEncoding { .. } => "xml-unknown-encoding",
            Error::MalformedEncoding { .. } => "xml-malformed-encoding",
        }
    }

    /// Source span the error points at, if known.
    pub fn span(&self) -> Option<SourceSpan> {
        match self {
            Error::XmlSyntax { position, .. } => position.map(|p| SourceSpan::new(p, p)),
            Error::UnexpectedEof { span, .. }
            | Error::MismatchedEndTag { span, .. }
            | Error::InvalidStructure { span, .. }
            | Error::MultipleRoots { span } => *span,
            Error::EmptyDocument
            | Error::UnknownEncoding { .. }
            | Error::MalformedEncoding { .. } => None,
        }
    }

    fn hint(&self) -> Option<&'static str> {
        match self {
            Error::MismatchedEndTag { .. } => {
                Some("check that all opening tags have matching closing tags")
            }
            Error::EmptyDocument => Some("add a root element to the document"),
            Error::MultipleRoots { .. } => {
                Some("wrap multiple elements in a single container element")
            }
            Error::UnknownEncoding { .. } => {
                Some("declare a supported encoding such as UTF-8 or ISO-8859-1")
            }
            Error::MalformedEncoding { .. } => {
                Some("check the encoding named in the XML declaration")
            }
            _ => None,
        }
    }

    /// Render the error as a source snippet pointing at the failing location.
    ///
    /// `path` is only used as the label of the snippet. Errors without a
    /// location point at the start of the document.
    pub fn render(&self, path: &str, source: &str) -> String {
        use ariadne::{Color, Config, Label, Report, ReportKind, Source};

        // ariadne counts characters, the parser counts bytes
        let span = self.span().unwrap_or_default();
        let mut start = char_index(source, span.start);
        let mut end = char_index(source, span.end).max(start);
        let total = source.chars().count();
        if start == end {
            if end < total {
                end += 1;
            } else if start > 0 {
                start -= 1;
            }
        }

        let path = path.to_string();
        let mut report = Report::build(ReportKind::Error, path.clone(), start)
            .with_config(Config::default().with_color(false))
            .with_message(format!("[{}] {}", self.code(), self));
        if total > 0 {
            report = report.with_label(
                Label::new((path.clone(), start..end))
                    .with_message(self.to_string())
                    .with_color(Color::Red),
            );
        }
        if let Some(hint) = self.hint() {
            report = report.with_help(hint);
        }

        let mut output = Vec::new();
        if report
            .finish()
            .write((path, Source::from(source)), &mut output)
            .is_err()
        {
            return self.to_string();
        }
        String::from_utf8(output).unwrap_or_else(|_| self.to_string())
    }
}

fn char_index(source: &str, byte_offset: usize) -> usize {
    source
        .char_indices()
        .take_while(|(i, _)| *i < byte_offset)
        .count()
}
