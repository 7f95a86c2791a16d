//! Base Element class for ODF XML elements.
//!
//! This module provides the namespace-aware element tree the spreadsheet
//! reader walks. Unlike a flattened text model, text and element children
//! are kept interleaved in document order, which the `text:s` run-length
//! decoder depends on.

use crate::common::{Error, Result};
use crate::odf::elements::namespace::{NamespaceScopes, QualifiedName, TEXTNS};
use quick_xml::events::{BytesStart, Event};
use smallvec::SmallVec;

/// A namespace-qualified attribute
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: QualifiedName,
    pub value: String,
}

/// A child of an element: either a nested element or a run of character data
#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    /// Whether this node has children of its own (text never does)
    pub fn has_children(&self) -> bool {
        match self {
            Node::Element(element) => !element.children.is_empty(),
            Node::Text(_) => false,
        }
    }

    /// Concatenated character data of this node and everything below it
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            },
            Node::Text(text) => out.push_str(text),
        }
    }
}

/// Base trait for ODF elements
///
/// This is the boundary between the spreadsheet reader and the tree: ordered
/// children, attribute lookup by `(namespace, name)`, and the element's
/// qualified type name.
pub trait ElementBase {
    /// Get the qualified name of this element
    fn qualified_name(&self) -> &QualifiedName;

    /// Get the ordered child nodes of this element
    fn nodes(&self) -> &[Node];

    /// Get attribute value by namespace URI and local name
    fn attribute(&self, namespace_uri: &str, local_name: &str) -> Option<&str>;

    /// Check whether this element is `local_name` in namespace `namespace_uri`
    fn is_named(&self, namespace_uri: &str, local_name: &str) -> bool {
        self.qualified_name().is(namespace_uri, local_name)
    }

    /// Get attribute value by prefixed name, e.g. `"table:name"`
    fn get_attribute(&self, name: &str) -> Option<&str> {
        let name = QualifiedName::from_string(name);
        match name.namespace_uri.as_deref() {
            Some(uri) => self.attribute(uri, &name.local_name),
            None => None,
        }
    }

    /// Check if element has any child nodes
    fn has_children(&self) -> bool {
        !self.nodes().is_empty()
    }

    /// Get the literal text of this element: all descendant character data
    /// concatenated in document order
    fn text(&self) -> String {
        let mut out = String::new();
        for node in self.nodes() {
            node.collect_text(&mut out);
        }
        out
    }
}

/// Concrete Element implementation with namespace support
#[derive(Debug, Clone)]
pub struct Element {
    name: QualifiedName,
    attributes: SmallVec<[Attribute; 4]>,
    pub(crate) children: Vec<Node>,
}

impl Element {
    /// Create a new element from a prefixed tag name (`"table:table-cell"`)
    pub fn new(tag_name: &str) -> Self {
        Self::with_name(QualifiedName::from_string(tag_name))
    }

    fn with_name(name: QualifiedName) -> Self {
        Self {
            name,
            attributes: SmallVec::new(),
            children: Vec::new(),
        }
    }

    /// Set attribute value by prefixed name, replacing any previous value
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let name = QualifiedName::from_string(name);
        match self.attributes.iter_mut().find(|a| a.name.matches(&name)) {
            Some(existing) => existing.value = value.to_string(),
            None => self.attributes.push(Attribute {
                name,
                value: value.to_string(),
            }),
        }
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Add character data, merging with a directly preceding text node
    pub fn add_text(&mut self, text: &str) {
        if let Some(Node::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(Node::Text(text.to_string()));
        }
    }

    /// Builder form of [`Element::set_attribute`]
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder form of [`Element::add_child`]
    pub fn with_child(mut self, child: Element) -> Self {
        self.add_child(child);
        self
    }

    /// Builder form of [`Element::add_text`]
    pub fn with_text(mut self, text: &str) -> Self {
        self.add_text(text);
        self
    }

    /// Get the attributes of this element
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Iterate over child elements, skipping text
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// All descendant elements with the given name, in document order.
    ///
    /// Matches nested inside other matches are included.
    pub fn descendants(&self, namespace_uri: &str, local_name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_descendants(namespace_uri, local_name, &mut found);
        found
    }

    fn collect_descendants<'a>(
        &'a self,
        namespace_uri: &str,
        local_name: &str,
        found: &mut Vec<&'a Element>,
    ) {
        for child in self.elements() {
            if child.is_named(namespace_uri, local_name) {
                found.push(child);
            }
            child.collect_descendants(namespace_uri, local_name, found);
        }
    }

    /// Create element tree from XML bytes
    ///
    /// Namespace prefixes are resolved against the declarations in scope.
    /// Whitespace-only character data is kept only inside text-namespace
    /// elements, where it is content rather than indentation.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = quick_xml::Reader::from_reader(bytes);
        let mut buf = Vec::new();
        let mut scopes = NamespaceScopes::new();
        let mut stack: Vec<Element> = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    let element = Self::open(e, &mut scopes)?;
                    stack.push(element);
                },
                Event::Empty(ref e) => {
                    let element = Self::open(e, &mut scopes)?;
                    scopes.pop();
                    if let Some(root) = Self::close(&mut stack, element) {
                        return Ok(root);
                    }
                },
                Event::End(_) => {
                    scopes.pop();
                    if let Some(element) = stack.pop()
                        && let Some(root) = Self::close(&mut stack, element)
                    {
                        return Ok(root);
                    }
                },
                Event::Text(ref t) => {
                    let text = std::str::from_utf8(t).map_err(|_| {
                        Error::InvalidFormat("Invalid UTF-8 in text content".to_string())
                    })?;
                    Self::push_text(&mut stack, text);
                },
                Event::CData(ref t) => {
                    let text = std::str::from_utf8(t).map_err(|_| {
                        Error::InvalidFormat("Invalid UTF-8 in CDATA section".to_string())
                    })?;
                    Self::push_text(&mut stack, text);
                },
                Event::GeneralRef(ref r) => {
                    let name = std::str::from_utf8(r).map_err(|_| {
                        Error::InvalidFormat("Invalid UTF-8 in entity reference".to_string())
                    })?;
                    let resolved = resolve_reference(name)?;
                    if let Some(current) = stack.last_mut() {
                        current.add_text(&resolved);
                    }
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        Err(Error::InvalidFormat("No root element found".to_string()))
    }

    /// Build an element from a start tag, opening its namespace scope
    fn open(e: &BytesStart<'_>, scopes: &mut NamespaceScopes) -> Result<Self> {
        let tag_name = std::str::from_utf8(e.name().as_ref())
            .map_err(|_| Error::InvalidFormat("Invalid UTF-8 in tag name".to_string()))?
            .to_string();

        let mut raw: SmallVec<[(String, String); 8]> = SmallVec::new();
        for attr_result in e.attributes() {
            let attr =
                attr_result.map_err(|_| Error::InvalidFormat("Invalid attribute".to_string()))?;
            let key = std::str::from_utf8(attr.key.as_ref()).map_err(|_| {
                Error::InvalidFormat("Invalid UTF-8 in attribute key".to_string())
            })?;
            let value = std::str::from_utf8(&attr.value).map_err(|_| {
                Error::InvalidFormat("Invalid UTF-8 in attribute value".to_string())
            })?;
            let value = quick_xml::escape::unescape(value)?;
            raw.push((key.to_string(), value.into_owned()));
        }

        // Declarations on this tag are in scope for the tag itself
        scopes.push(
            raw.iter()
                .filter(|(key, _)| key == "xmlns" || key.starts_with("xmlns:"))
                .map(|(key, value)| (key.as_str(), value.as_str())),
        );

        let mut element = Element::with_name(scopes.element_name(&tag_name));
        for (key, value) in raw {
            if key == "xmlns" || key.starts_with("xmlns:") {
                continue;
            }
            element.attributes.push(Attribute {
                name: scopes.attribute_name(&key),
                value,
            });
        }

        Ok(element)
    }

    /// Attach a finished element to its parent; returns it if it was the root
    fn close(stack: &mut [Element], element: Element) -> Option<Element> {
        match stack.last_mut() {
            Some(parent) => {
                parent.add_child(element);
                None
            },
            None => Some(element),
        }
    }

    fn push_text(stack: &mut [Element], text: &str) {
        let Some(current) = stack.last_mut() else {
            return;
        };
        let in_text_content = current.name.namespace_uri.as_deref() == Some(TEXTNS);
        if in_text_content || !text.trim().is_empty() {
            current.add_text(text);
        }
    }
}

impl ElementBase for Element {
    fn qualified_name(&self) -> &QualifiedName {
        &self.name
    }

    fn nodes(&self) -> &[Node] {
        &self.children
    }

    fn attribute(&self, namespace_uri: &str, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.is(namespace_uri, local_name))
            .map(|a| a.value.as_str())
    }
}

/// Resolve the name between `&` and `;` of a character or entity reference
fn resolve_reference(name: &str) -> Result<String> {
    if let Some(code) = name.strip_prefix('#') {
        let parsed = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => code.parse::<u32>(),
        };
        return parsed
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .ok_or_else(|| Error::XmlError(format!("Invalid character reference '&{};'", name)));
    }

    quick_xml::escape::resolve_predefined_entity(name)
        .map(str::to_string)
        .ok_or_else(|| Error::XmlError(format!("Unknown entity '&{};'", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::elements::namespace::{OFFICENS, TABLENS};

    const CONTENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0"
    xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0"
    xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0">
  <office:body>
    <office:spreadsheet>
      <table:table table:name="Sheet &amp; Co">
        <table:table-row>
          <table:table-cell office:value-type="string"><text:p>a<text:s text:c="2"/>b &lt;c&gt;</text:p></table:table-cell>
          <table:covered-table-cell/>
        </table:table-row>
      </table:table>
    </office:spreadsheet>
  </office:body>
</office:document-content>"#;

    #[test]
    fn test_from_bytes_builds_namespaced_tree() {
        let root = Element::from_bytes(CONTENT.as_bytes()).unwrap();
        assert!(root.is_named(OFFICENS, "document-content"));

        let tables = root.descendants(TABLENS, "table");
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].get_attribute("table:name"), Some("Sheet & Co"));

        let rows = tables[0].descendants(TABLENS, "table-row");
        assert_eq!(rows.len(), 1);
        // Indentation between cells is not kept
        assert_eq!(rows[0].nodes().len(), 2);
    }

    #[test]
    fn test_text_keeps_fragment_order() {
        let root = Element::from_bytes(CONTENT.as_bytes()).unwrap();
        let cell = root.descendants(TABLENS, "table-cell")[0];
        let paragraph = cell.elements().next().unwrap();

        assert_eq!(paragraph.nodes().len(), 3);
        assert!(matches!(&paragraph.nodes()[0], Node::Text(t) if t == "a"));
        assert!(matches!(&paragraph.nodes()[2], Node::Text(t) if t == "b <c>"));
        assert_eq!(cell.text(), "ab <c>");
    }

    #[test]
    fn test_custom_prefixes_resolve() {
        let xml = r#"<t:table xmlns:t="urn:oasis:names:tc:opendocument:xmlns:table:1.0" t:name="x"><t:table-row/></t:table>"#;
        let root = Element::from_bytes(xml.as_bytes()).unwrap();
        assert!(root.is_named(TABLENS, "table"));
        assert_eq!(root.attribute(TABLENS, "name"), Some("x"));
        assert_eq!(root.descendants(TABLENS, "table-row").len(), 1);
    }

    #[test]
    fn test_character_references() {
        let xml = r#"<text:p xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0">&#65;&#x42;</text:p>"#;
        let root = Element::from_bytes(xml.as_bytes()).unwrap();
        assert_eq!(root.text(), "AB");
    }

    #[test]
    fn test_no_root_is_an_error() {
        assert!(Element::from_bytes(b"").is_err());
    }

    #[test]
    fn test_builder_api() {
        let cell = Element::new("table:table-cell")
            .with_attribute("office:value-type", "float")
            .with_attribute("office:value", "1")
            .with_attribute("office:value", "2")
            .with_child(Element::new("text:p").with_text("2"));
        assert_eq!(cell.attributes().len(), 2);
        assert_eq!(cell.attribute(OFFICENS, "value"), Some("2"));
        assert_eq!(cell.text(), "2");
        assert!(cell.has_children());
    }
}
