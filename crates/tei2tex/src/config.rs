//! Output configuration.
//!
//! Every field has a default, and the defaults reproduce the preamble and
//! index heading of a French edition:
//!
//! ```toml
//! document-class = "article"
//! input-encoding = "utf8"
//! font-encoding = "T1"
//! language = "french"
//! index-heading = "Index des personnes"
//! verse-break = "literal"
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct TexConfig {
    /// Argument of `\documentclass`.
    pub document_class: String,

    /// Option passed to the `inputenc` package.
    pub input_encoding: String,

    /// Option passed to the `fontenc` package.
    pub font_encoding: String,

    /// Option passed to the `babel` package.
    pub language: String,

    /// Title of the person index section.
    pub index_heading: String,

    /// What ends each verse line.
    pub verse_break: VerseBreak,
}

/// Terminator appended to every `<l>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerseBreak {
    /// A space, two backslashes and the letter `n`, with no newline. Lines of
    /// one `<lg>` end up on a single output line.
    #[default]
    Literal,

    /// A space, the `\\` line break command and a newline.
    Newline,
}

impl Default for TexConfig {
    fn default() -> Self {
        Self {
            document_class: "article".to_string(),
            input_encoding: "utf8".to_string(),
            font_encoding: "T1".to_string(),
            language: "french".to_string(),
            index_heading: "Index des personnes".to_string(),
            verse_break: VerseBreak::default(),
        }
    }
}

impl TexConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a TOML configuration file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
