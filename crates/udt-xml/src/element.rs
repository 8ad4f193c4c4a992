//! In-memory element tree and the exact pretty-printer.
//!
//! The historical document format is byte-exact: single-quoted XML
//! declaration labelled `iso-8859-1`, four spaces of indentation per
//! depth level, attributes in insertion order, and a space before the
//! `/>` of self-closing elements. Golden-file comparisons depend on
//! every one of those details, so emission is done here rather than
//! through `quick_xml::Writer`. Parsing still runs through the
//! `quick_xml` event reader.

use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Result, XmlError};

/// Declaration emitted at the top of every document.
pub const XML_DECLARATION: &str = "<?xml version='1.0' encoding='iso-8859-1'?>";

const INDENT: &str = "    ";

/// One element of the hierarchical document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append an attribute; emission order is insertion order.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push((name.into(), value.into()));
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// Children with the given element name, in document order.
    ///
    /// The yielded references borrow only the element, not the name.
    pub fn children_named<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a XmlElement> + use<'a, 'n> {
        self.children.iter().filter(move |child| child.name == name)
    }

    #[must_use]
    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// Render the element as a complete document, declaration included.
    #[must_use]
    pub fn to_document_string(&self) -> String {
        let mut out = String::new();
        out.push_str(XML_DECLARATION);
        out.push('\n');
        self.write_into(&mut out, 0);
        out
    }

    fn write_into(&self, out: &mut String, depth: usize) {
        for _ in 0..depth {
            out.push_str(INDENT);
        }
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value.as_str()));
            out.push('"');
        }
        if self.children.is_empty() {
            out.push_str(" />");
        } else {
            out.push_str(">\n");
            for child in &self.children {
                child.write_into(out, depth + 1);
                out.push('\n');
            }
            for _ in 0..depth {
                out.push_str(INDENT);
            }
            out.push_str("</");
            out.push_str(&self.name);
            out.push('>');
        }
    }

    /// Parse a document into its root element.
    ///
    /// Text content is ignored; the format is attribute-only.
    pub fn parse(xml: &str) -> Result<XmlElement> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    stack.push(element_from_start(&start)?);
                }
                Event::Empty(start) => {
                    let element = element_from_start(&start)?;
                    attach(&mut stack, &mut root, element);
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| XmlError::UnexpectedRoot {
                        found: String::from("(unbalanced end tag)"),
                    })?;
                    attach(&mut stack, &mut root, element);
                }
                Event::Eof => break,
                Event::Decl(_)
                | Event::Text(_)
                | Event::CData(_)
                | Event::Comment(_)
                | Event::PI(_)
                | Event::DocType(_)
                | Event::GeneralRef(_) => {}
            }
        }

        root.ok_or_else(|| XmlError::UnexpectedRoot {
            found: String::from("(empty document)"),
        })
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_string();
    let mut element = XmlElement::new(name);
    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = std::str::from_utf8(attribute.key.as_ref())?.to_string();
        let value = attribute.unescape_value()?.into_owned();
        element.set_attribute(key, value);
    }
    Ok(element)
}

fn attach(stack: &mut Vec<XmlElement>, root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.push_child(element),
        // first completed top-level element wins; trailing junk is ignored
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_element_renders_self_closing_with_space() {
        let mut element = XmlElement::new("UmlProject");
        element.set_attribute("fileName", ".");
        assert_eq!(
            element.to_document_string(),
            "<?xml version='1.0' encoding='iso-8859-1'?>\n<UmlProject fileName=\".\" />"
        );
    }

    #[test]
    fn nesting_indents_four_spaces_per_level() {
        let mut root = XmlElement::new("UmlProject");
        let mut diagram = XmlElement::new("UMLDiagram");
        diagram.set_attribute("title", "");
        let mut class = XmlElement::new("UmlClass");
        class.set_attribute("id", "a");
        diagram.push_child(class);
        root.push_child(diagram);

        assert_eq!(
            root.to_document_string(),
            "<?xml version='1.0' encoding='iso-8859-1'?>\n\
             <UmlProject>\n\
             \x20   <UMLDiagram title=\"\">\n\
             \x20       <UmlClass id=\"a\" />\n\
             \x20   </UMLDiagram>\n\
             </UmlProject>"
        );
    }

    #[test]
    fn children_named_yields_refs_that_outlive_the_name() {
        let mut root = XmlElement::new("UMLDiagram");
        root.push_child(XmlElement::new("UmlClass"));
        root.push_child(XmlElement::new("UmlNote"));
        root.push_child(XmlElement::new("UmlClass"));

        let first = {
            let name = String::from("UmlClass");
            root.children_named(&name).next()
        };
        assert_eq!(first.map(XmlElement::name), Some("UmlClass"));
    }

    #[test]
    fn attribute_values_are_escaped_and_unescaped() {
        let mut element = XmlElement::new("UmlNote");
        element.set_attribute("content", "a < b & \"c\"");
        let text = element.to_document_string();
        assert!(text.contains("content=\"a &lt; b &amp; &quot;c&quot;\""));

        let parsed = XmlElement::parse(&text).unwrap();
        assert_eq!(parsed.attribute("content"), Some("a < b & \"c\""));
    }

    #[test]
    fn parse_preserves_child_order() {
        let parsed = XmlElement::parse(
            "<Top><A x=\"1\" /><B /><A x=\"2\" /></Top>",
        )
        .unwrap();
        let a_values: Vec<_> = parsed
            .children_named("A")
            .map(|a| a.attribute("x").unwrap())
            .collect();
        assert_eq!(a_values, ["1", "2"]);
        assert_eq!(parsed.children().len(), 3);
    }
}
