//! Core types for source-tracked XML trees.

/// Namespace permanently bound to the `xml` prefix (`xml:id`, `xml:lang`).
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Namespace of `xmlns` / `xmlns:*` declaration attributes.
pub const XMLNS_NS: &str = "http://www.w3.org/2000/xmlns/";

/// A half-open byte range into the parsed source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceSpan {
    pub start: usize,
    pub end: usize,
}

impl SourceSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A parsed XML document.
#[derive(Debug, Clone)]
pub struct XmlDocument {
    /// The root element of the document.
    pub root: XmlElement,
}

/// An XML element.
///
/// Mixed content is stored the way TEI processors expect it: `text` holds the
/// character data between the start tag and the first child element, and each
/// child's `tail` holds the character data between that child's end tag and
/// the next sibling (or the parent's end tag). Comments and processing
/// instructions are dropped, and the text on either side of them is joined.
#[derive(Debug, Clone, Default)]
pub struct XmlElement {
    /// Local name (without prefix).
    pub name: String,

    /// Span of the qualified name in the start tag.
    pub name_span: SourceSpan,

    /// Namespace prefix as written, if any.
    pub prefix: Option<String>,

    /// Resolved namespace URI, if the element is in a namespace.
    pub namespace: Option<String>,

    pub attributes: Vec<XmlAttribute>,

    /// Child elements in document order.
    pub children: Vec<XmlElement>,

    /// Text before the first child element.
    pub text: String,

    /// Text after this element's end tag, up to the next sibling.
    pub tail: String,

    /// Span from the `<` of the start tag to the `>` of the end tag.
    pub span: SourceSpan,
}

/// An XML attribute.
#[derive(Debug, Clone, Default)]
pub struct XmlAttribute {
    /// Local name (without prefix).
    pub name: String,

    pub name_span: SourceSpan,

    pub prefix: Option<String>,

    /// Resolved namespace URI. Unprefixed attributes are never namespaced.
    pub namespace: Option<String>,

    /// Attribute value after unescaping entities.
    pub value: String,
}

impl XmlDocument {
    pub fn new(root: XmlElement) -> Self {
        Self { root }
    }
}

impl XmlElement {
    /// Create an element with no attributes, children or text.
    pub fn new(name: impl Into<String>, namespace: Option<&str>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn local_name(&self) -> &str {
        &self.name
    }

    /// Whether this element has the given namespace and local name.
    pub fn is(&self, namespace: Option<&str>, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == namespace
    }

    /// Value of the attribute with this namespace and local name.
    pub fn attribute_ns(&self, namespace: Option<&str>, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name && a.namespace.as_deref() == namespace)
            .map(|a| a.value.as_str())
    }

    /// First direct child with this namespace and local name.
    pub fn child(&self, namespace: Option<&str>, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.is(namespace, name))
    }

    /// All direct children with this namespace and local name.
    pub fn children_named<'a>(
        &'a self,
        namespace: Option<&'a str>,
        name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.is(namespace, name))
    }

    /// Pre-order iterator over every element below this one (not including
    /// this element).
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// First descendant, in document order, with this namespace and local name.
    pub fn find_descendant(&self, namespace: Option<&str>, name: &str) -> Option<&XmlElement> {
        self.descendants().find(|e| e.is(namespace, name))
    }

    /// Concatenated character data of this element and all its descendants.
    ///
    /// The element's own `tail` is not part of its content and is excluded;
    /// tails of descendants are included.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.collect_text(out);
            out.push_str(&child.tail);
        }
    }
}

/// Iterator returned by [`XmlElement::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}
