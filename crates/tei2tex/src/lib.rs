//! Convert TEI transcriptions to LaTeX.
//!
//! The conversion keeps only the regularized reading of the transcription
//! (`<reg>` inside `<choice>`), drops original spellings and editorial
//! furniture (`<orig>`, `<fw>`, `<lb>`), turns page breaks into `\newpage`,
//! italic `<hi>` into `\textit`, terminates verse lines (see [`VerseBreak`]), and
//! ends the document with an index of the persons declared in
//! `<listPerson>`, each followed by the pages on which they are referenced.
//!
//! The work is split in three passes over a parsed [`tei_xml::XmlDocument`]:
//!
//! 1. [`registry::PersonRegistry::from_document`] collects declared persons.
//! 2. [`walker::visit`] walks the body once, threading the page counter and
//!    filling an [`occurrences::OccurrenceMap`].
//! 3. [`index::render_index`] emits the index from both.
//!
//! [`convert::convert_document`] composes them with the fixed preamble.
//!
//! # Example
//!
//! ```rust
//! use tei2tex::{TexConfig, convert_str};
//!
//! let conversion = convert_str(
//!     r##"<TEI xmlns="http://www.tei-c.org/ns/1.0">
//!       <teiHeader><listPerson>
//!         <person xml:id="p1"><persName>Jeanne</persName></person>
//!       </listPerson></teiHeader>
//!       <text><body>
//!         <pb/><p><persName ref="#p1">Jeanne D.</persName></p>
//!       </body></text>
//!     </TEI>"##,
//!     &TexConfig::default(),
//! )
//! .unwrap();
//!
//! assert!(conversion.latex.contains("\\item Jeanne: 2\n"));
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod index;
pub mod latex;
pub mod occurrences;
pub mod registry;
pub mod walker;

pub use config::{TexConfig, VerseBreak};
pub use convert::{Conversion, convert_bytes, convert_document, convert_str};
pub use error::{Error, Result};
pub use occurrences::OccurrenceMap;
pub use registry::PersonRegistry;

/// The TEI P5 namespace.
pub const TEI_NS: &str = "http://www.tei-c.org/ns/1.0";
