//! Source-tracked XML parsing for TEI documents.
//!
//! This crate wraps [`quick-xml`] to build a read-only tree of
//! [`XmlElement`]s in the "text / tail" shape used by TEI tooling: every
//! element carries the text that precedes its first child and the text that
//! follows its own end tag. Element and attribute names are resolved against
//! their in-scope namespace declarations, and every node remembers its byte
//! span in the source so parse failures can be rendered with context.
//!
//! Raw file contents go through [`decode`] first, which honours a byte order
//! mark or the `encoding` named in the XML declaration.
//!
//! # Example
//!
//! ```rust
//! use tei_xml::parse;
//!
//! let doc = parse(r#"<TEI xmlns="http://www.tei-c.org/ns/1.0">
//!   <text><body><p>Hello <hi rend="italic">world</hi>!</p></body></text>
//! </TEI>"#).unwrap();
//!
//! let ns = Some("http://www.tei-c.org/ns/1.0");
//! let body = doc.root.find_descendant(ns, "body").unwrap();
//! let p = body.child(ns, "p").unwrap();
//! assert_eq!(p.text, "Hello ");
//! assert_eq!(p.children[0].tail, "!");
//! assert_eq!(p.text_content(), "Hello world!");
//! ```

pub mod decode;
pub mod error;
pub mod parser;
pub mod types;

pub use decode::decode;
pub use error::{Error, Result};
pub use parser::parse;
pub use types::{SourceSpan, XML_NS, XMLNS_NS, XmlAttribute, XmlDocument, XmlElement};
