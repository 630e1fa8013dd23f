//! LaTeX command literals.
//!
//! Text taken from the transcription is emitted verbatim; nothing here
//! escapes LaTeX special characters.

use crate::config::{TexConfig, VerseBreak};

pub const PAGE_BREAK: &str = "\\newpage\n";

/// Verse line terminator: backslash pair and a literal `n`.
pub const LINE_BREAK_LITERAL: &str = " \\\\n";

/// Verse line terminator: backslash pair and a newline.
pub const LINE_BREAK_NEWLINE: &str = " \\\\\n";

pub const BEGIN_ITEMIZE: &str = "\\begin{itemize}\n";
pub const END_ITEMIZE: &str = "\\end{itemize}\n";
pub const END_DOCUMENT: &str = "\\end{document}\n";

/// Emitted in place of the body when the document has none.
pub const MISSING_BODY: &str = "% Aucun <body> trouvé\n";

pub fn italic(content: &str) -> String {
    format!("\\textit{{{}}}", content)
}

pub fn unnumbered_section(title: &str) -> String {
    format!("\\section*{{{}}}\n", title)
}

pub fn line_break(style: VerseBreak) -> &'static str {
    match style {
        VerseBreak::Literal => LINE_BREAK_LITERAL,
        VerseBreak::Newline => LINE_BREAK_NEWLINE,
    }
}

/// One `itemize` entry: `  \item <label>: <value>`.
pub fn item(label: &str, value: &str) -> String {
    format!("  \\item {}: {}\n", label, value)
}

/// Everything up to and including `\begin{document}`.
pub fn preamble(config: &TexConfig) -> String {
    let mut out = String::new();
    out.push_str(&format!("\\documentclass{{{}}}\n", config.document_class));
    out.push_str(&format!("\\usepackage[{}]{{inputenc}}\n", config.input_encoding));
    out.push_str(&format!("\\usepackage[{}]{{fontenc}}\n", config.font_encoding));
    out.push_str(&format!("\\usepackage[{}]{{babel}}\n", config.language));
    out.push_str("\\usepackage{hyperref}\n");
    out.push_str("\\begin{document}\n");
    out
}
