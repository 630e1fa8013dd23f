//! XML parser that builds [`XmlDocument`] trees.

use crate::types::{SourceSpan, XML_NS, XMLNS_NS, XmlAttribute, XmlDocument, XmlElement};
use crate::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};

/// Parse XML from a string.
///
/// Text is kept exactly as written (no trimming), character references are
/// unescaped and CDATA sections become plain text.
///
/// # Example
///
/// ```rust
/// use tei_xml::parse;
///
/// let doc = parse(r#"<root xmlns:x="urn:x"><x:child a="1"/> tail</root>"#).unwrap();
/// assert_eq!(doc.root.name, "root");
/// assert_eq!(doc.root.children[0].namespace.as_deref(), Some("urn:x"));
/// assert_eq!(doc.root.children[0].tail, " tail");
/// ```
///
/// # Errors
///
/// Returns an error if the XML is malformed.
pub fn parse(content: &str) -> Result<XmlDocument> {
    let mut parser = XmlParser::new(content);
    parser.parse()
}

/// A namespace declaration: prefix (`None` for the default namespace) and URI.
/// An empty URI undeclares the default namespace.
type Binding = (Option<String>, String);

/// Internal parser state.
struct XmlParser<'a> {
    reader: Reader<&'a [u8]>,

    /// Elements whose end tag has not been seen yet.
    stack: Vec<BuildNode>,
}

/// An element under construction.
struct BuildNode {
    element: XmlElement,

    /// Namespace declarations made on this element.
    bindings: Vec<Binding>,
}

/// An attribute as written, before namespace resolution.
struct RawAttribute {
    qualified: String,
    value: String,
    name_span: SourceSpan,
}

impl<'a> XmlParser<'a> {
    fn new(source: &'a str) -> Self {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;

        Self {
            reader,
            stack: Vec::new(),
        }
    }

    fn parse(&mut self) -> Result<XmlDocument> {
        let mut root: Option<XmlElement> = None;

        loop {
            let event_start = self.reader.buffer_position() as usize;

            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    let node = self.open_element(&e, event_start)?;
                    self.stack.push(node);
                }
                Ok(Event::End(e)) => {
                    let element = self.close_element(&e)?;
                    self.attach(element, &mut root)?;
                }
                Ok(Event::Empty(e)) => {
                    let mut node = self.open_element(&e, event_start)?;
                    let end_offset = self.reader.buffer_position() as usize;
                    node.element.span = SourceSpan::new(event_start, end_offset);
                    self.attach(node.element, &mut root)?;
                }
                Ok(Event::Text(e)) => {
                    self.handle_text(&e, event_start)?;
                }
                Ok(Event::CData(e)) => {
                    self.handle_cdata(&e, event_start)?;
                }
                Ok(Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_)) => {}
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlSyntax {
                        message: e.to_string(),
                        position: Some(self.reader.error_position() as usize),
                    });
                }
            }
        }

        if let Some(node) = self.stack.last() {
            return Err(Error::UnexpectedEof {
                expected: format!("closing tag </{}>", qualified(&node.element)),
                span: Some(node.element.name_span),
            });
        }

        let root = root.ok_or(Error::EmptyDocument)?;
        Ok(XmlDocument::new(root))
    }

    /// Hand a finished element to its parent, or make it the root.
    fn attach(&mut self, element: XmlElement, root: &mut Option<XmlElement>) -> Result<()> {
        match self.stack.last_mut() {
            Some(parent) => {
                parent.element.children.push(element);
                Ok(())
            }
            None if root.is_some() => Err(Error::MultipleRoots {
                span: Some(element.span),
            }),
            None => {
                *root = Some(element);
                Ok(())
            }
        }
    }

    fn open_element(&self, e: &BytesStart<'_>, event_start: usize) -> Result<BuildNode> {
        let (prefix, name) = split_qualified(&String::from_utf8_lossy(e.name().as_ref()));
        let name_start = event_start + 1; // Skip '<'
        let name_span = SourceSpan::new(name_start, name_start + e.name().as_ref().len());

        let raw = self.parse_attributes(e, event_start)?;

        let mut bindings = Vec::new();
        for attr in &raw {
            if attr.qualified == "xmlns" {
                bindings.push((None, attr.value.clone()));
            } else if let Some(declared) = attr.qualified.strip_prefix("xmlns:") {
                bindings.push((Some(declared.to_string()), attr.value.clone()));
            }
        }

        let namespace = self.resolve(&bindings, prefix.as_deref(), name_span)?;

        let mut attributes = Vec::with_capacity(raw.len());
        for attr in raw {
            let (attr_prefix, attr_name) = split_qualified(&attr.qualified);
            let attr_namespace = match attr_prefix.as_deref() {
                None if attr_name == "xmlns" => Some(XMLNS_NS.to_string()),
                None => None,
                Some("xmlns") => Some(XMLNS_NS.to_string()),
                Some(p) => self.resolve(&bindings, Some(p), attr.name_span)?,
            };
            attributes.push(XmlAttribute {
                name: attr_name,
                name_span: attr.name_span,
                prefix: attr_prefix,
                namespace: attr_namespace,
                value: attr.value,
            });
        }

        Ok(BuildNode {
            element: XmlElement {
                name,
                name_span,
                prefix,
                namespace,
                attributes,
                span: SourceSpan::new(event_start, event_start),
                ..XmlElement::default()
            },
            bindings,
        })
    }

    fn close_element(&mut self, e: &BytesEnd<'_>) -> Result<XmlElement> {
        let end_name = String::from_utf8_lossy(e.name().as_ref()).to_string();

        let node = self.stack.pop().ok_or_else(|| Error::InvalidStructure {
            message: format!("unexpected closing tag </{}>", end_name),
            span: None,
        })?;

        let expected = qualified(&node.element);
        if expected != end_name {
            return Err(Error::MismatchedEndTag {
                expected,
                found: end_name,
                span: Some(node.element.name_span),
            });
        }

        let mut element = node.element;
        element.span.end = self.reader.buffer_position() as usize;
        Ok(element)
    }

    fn handle_text(&mut self, e: &BytesText<'_>, event_start: usize) -> Result<()> {
        let text = e.unescape().map_err(|err| Error::XmlSyntax {
            message: format!("invalid text content: {}", err),
            position: Some(event_start),
        })?;
        let end_offset = self.reader.buffer_position() as usize;
        self.push_text(&text, SourceSpan::new(event_start, end_offset))
    }

    fn handle_cdata(&mut self, e: &BytesCData<'_>, event_start: usize) -> Result<()> {
        let text = String::from_utf8_lossy(e.as_ref()).to_string();
        let end_offset = self.reader.buffer_position() as usize;
        self.push_text(&text, SourceSpan::new(event_start, end_offset))
    }

    /// Append character data to the open element: into the tail of its last
    /// child if it has one, otherwise into its leading text.
    fn push_text(&mut self, text: &str, span: SourceSpan) -> Result<()> {
        match self.stack.last_mut() {
            Some(node) => {
                match node.element.children.last_mut() {
                    Some(last) => last.tail.push_str(text),
                    None => node.element.text.push_str(text),
                }
                Ok(())
            }
            None if text.trim().is_empty() => Ok(()),
            None => Err(Error::InvalidStructure {
                message: "text outside of the root element".to_string(),
                span: Some(span),
            }),
        }
    }

    /// Resolve a prefix against the declarations on the element being opened
    /// and then on each open ancestor, innermost first.
    fn resolve(
        &self,
        own: &[Binding],
        prefix: Option<&str>,
        span: SourceSpan,
    ) -> Result<Option<String>> {
        if prefix == Some("xml") {
            return Ok(Some(XML_NS.to_string()));
        }

        let scopes = std::iter::once(own).chain(self.stack.iter().rev().map(|n| n.bindings.as_slice()));
        for bindings in scopes {
            if let Some((_, uri)) = bindings.iter().rev().find(|(p, _)| p.as_deref() == prefix) {
                return Ok((!uri.is_empty()).then(|| uri.clone()));
            }
        }

        match prefix {
            None => Ok(None),
            Some(p) => Err(Error::InvalidStructure {
                message: format!("undeclared namespace prefix `{}`", p),
                span: Some(span),
            }),
        }
    }

    fn parse_attributes(&self, e: &BytesStart<'_>, tag_start: usize) -> Result<Vec<RawAttribute>> {
        let mut attributes = Vec::new();

        // The tag content starts after '<'
        let content_start = tag_start + 1;
        let tag_str = String::from_utf8_lossy(e.as_ref());
        let mut search_from = e.name().as_ref().len();

        for attr_result in e.attributes() {
            let attr = attr_result.map_err(|err| Error::XmlSyntax {
                message: format!("attribute error: {}", err),
                position: Some(tag_start),
            })?;

            let qualified = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr.unescape_value().map_err(|err| Error::XmlSyntax {
                message: format!("invalid attribute value: {}", err),
                position: Some(tag_start),
            })?;

            let (name_span, consumed) =
                find_attribute_name(&tag_str, search_from, &qualified, content_start);
            search_from = consumed;

            attributes.push(RawAttribute {
                qualified,
                value: value.into_owned(),
                name_span,
            });
        }

        Ok(attributes)
    }
}

fn split_qualified(full_name: &str) -> (Option<String>, String) {
    match full_name.split_once(':') {
        Some((prefix, local)) => (Some(prefix.to_string()), local.to_string()),
        None => (None, full_name.to_string()),
    }
}

fn qualified(element: &XmlElement) -> String {
    match &element.prefix {
        Some(prefix) => format!("{}:{}", prefix, element.name),
        None => element.name.clone(),
    }
}

/// Locate an attribute's name inside the raw tag content.
///
/// Returns the name span and the position in `tag_str` just after the
/// attribute's value, where the search for the next attribute resumes.
fn find_attribute_name(
    tag_str: &str,
    search_start: usize,
    attr_name: &str,
    content_start: usize,
) -> (SourceSpan, usize) {
    let search_area = tag_str.get(search_start..).unwrap_or("");

    let Some(rel_pos) = search_area.find(attr_name) else {
        return (SourceSpan::new(content_start, content_start + 1), search_start);
    };

    let name_start = search_start + rel_pos;
    let name_end = name_start + attr_name.len();
    let name_span = SourceSpan::new(content_start + name_start, content_start + name_end);

    // Skip whitespace, '=' and whitespace again
    let after_name = &tag_str[name_end..];
    let trimmed = after_name.trim_start();
    let trimmed = trimmed.strip_prefix('=').unwrap_or(trimmed).trim_start();
    let value_start = name_end + (after_name.len() - trimmed.len());

    let value_end = match trimmed.chars().next() {
        Some(quote @ ('"' | '\'')) => trimmed[1..]
            .find(quote)
            .map_or(tag_str.len(), |p| value_start + 1 + p + 1),
        _ => value_start,
    };

    (name_span, value_end)
}
