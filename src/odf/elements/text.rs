//! Text-related ODF elements.
//!
//! Cell text in ODF stores runs of spaces as `<text:s text:c="N"/>` markers
//! instead of literal whitespace. [`decode_text`] reverses that encoding.

use super::attr_parser::count_attribute;
use super::element::{ElementBase, Node};
use super::namespace::TEXTNS;
use crate::common::{Error, Result};

/// Decode the textual content of an element, expanding space-run markers
///
/// Children are visited in document order: text is copied verbatim, a
/// `text:s` marker contributes `text:c` spaces (1 when absent), and any other
/// element is decoded recursively and spliced in. Nothing is trimmed, and
/// consecutive paragraphs are joined without a separator.
///
/// # Examples
///
/// ```
/// use odsgrid::odf::elements::element::Element;
/// use odsgrid::odf::elements::text::decode_text;
///
/// let p = Element::new("text:p")
///     .with_text("a")
///     .with_child(Element::new("text:s").with_attribute("text:c", "3"))
///     .with_text("b");
/// assert_eq!(decode_text(&p).unwrap(), "a   b");
/// ```
pub fn decode_text<E: ElementBase + ?Sized>(element: &E) -> Result<String> {
    let mut out = String::new();
    append_text(element.nodes(), &mut out)?;
    Ok(out)
}

fn append_text(nodes: &[Node], out: &mut String) -> Result<()> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) if element.is_named(TEXTNS, "s") => {
                let spaces = count_attribute(element, "text:c", 1)?;
                out.try_reserve(spaces)
                    .map_err(|_| Error::capacity_exceeded(spaces))?;
                out.extend(std::iter::repeat_n(' ', spaces));
            },
            Node::Element(element) => append_text(element.nodes(), out)?,
        }
    }
    Ok(())
}
