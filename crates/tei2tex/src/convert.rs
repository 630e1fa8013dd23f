//! Whole-document conversion.

use crate::config::TexConfig;
use crate::error::Result;
use crate::index::render_index;
use crate::latex;
use crate::occurrences::OccurrenceMap;
use crate::registry::PersonRegistry;
use crate::walker::{FIRST_PAGE, visit};
use crate::TEI_NS;
use tei_xml::XmlDocument;
use tracing::{debug, warn};

/// The result of converting one document.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The complete LaTeX source.
    pub latex: String,

    pub registry: PersonRegistry,

    pub occurrences: OccurrenceMap,

    /// Page number in effect at the end of the body.
    pub last_page: u32,

    /// Whether a `<body>` was found. Without one the output carries a
    /// placeholder comment instead of content.
    pub body_found: bool,
}

/// Parse `source` and convert it.
///
/// # Errors
///
/// Fails only if `source` is not well-formed XML.
pub fn convert_str(source: &str, config: &TexConfig) -> Result<Conversion> {
    let document = tei_xml::parse(source)?;
    Ok(convert_document(&document, config))
}

/// Decode, parse and convert raw file contents.
///
/// The character encoding comes from a byte order mark or the XML
/// declaration, see [`tei_xml::decode`].
///
/// # Errors
///
/// Fails if the bytes do not decode or are not well-formed XML.
pub fn convert_bytes(bytes: &[u8], config: &TexConfig) -> Result<Conversion> {
    let source = tei_xml::decode(bytes)?;
    convert_str(&source, config)
}

/// Convert a parsed document.
///
/// The body is the first TEI `body` element below the root; each of its
/// children is walked in order, starting on page 1.
pub fn convert_document(document: &XmlDocument, config: &TexConfig) -> Conversion {
    let registry = PersonRegistry::from_document(&document.root);
    debug!(persons = registry.len(), "person registry built");

    let mut occurrences = OccurrenceMap::new();
    let mut page = FIRST_PAGE;
    let mut out = latex::preamble(config);

    let body = document.root.find_descendant(Some(TEI_NS), "body");
    match body {
        Some(body) => {
            for node in &body.children {
                let (fragment, next) = visit(node, page, &mut occurrences, config.verse_break);
                out.push_str(&fragment);
                page = next;
            }
            debug!(pages = page, references = occurrences.len(), "body converted");
        }
        None => {
            warn!("document has no <body>; writing a placeholder");
            out.push_str(latex::MISSING_BODY);
        }
    }

    out.push_str(&render_index(&registry, &occurrences, &config.index_heading));
    out.push_str(latex::END_DOCUMENT);

    Conversion {
        latex: out,
        registry,
        occurrences,
        last_page: page,
        body_found: body.is_some(),
    }
}
