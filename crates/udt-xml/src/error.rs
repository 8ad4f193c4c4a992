//! Error types for the XML codec.

use thiserror::Error;

/// Errors that can occur while encoding or decoding a project document.
///
/// Structural errors abort the whole project: a silently dropped link
/// or shape is a data-loss bug, so partial graphs are never returned.
#[derive(Debug, Error)]
pub enum XmlError {
    /// Root element is not `UmlProject`.
    #[error("unexpected root element: {found}")]
    UnexpectedRoot { found: String },

    /// A required attribute is absent.
    #[error("element <{element}> is missing required attribute {attribute}")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    /// An attribute value failed to parse.
    #[error("element <{element}> has invalid {attribute} value {value:?}")]
    InvalidAttribute {
        element: String,
        attribute: &'static str,
        value: String,
    },

    /// Declared schema version has no known vocabulary.
    #[error("unsupported schema version: {version}")]
    UnsupportedVersion { version: String },

    /// A diagram child element outside the closed set for its kind.
    #[error("unknown shape element <{element}> in document {title:?}")]
    UnknownShapeType { element: String, title: String },

    /// Link-model `type` tag outside the closed enumeration.
    #[error("link {link_id} has unknown link type {value:?}")]
    UnknownLinkType { link_id: String, value: String },

    /// A shape or link element must nest exactly one model element.
    #[error("element {owner_id} nests {count} model elements, expected exactly one")]
    ModelCardinality { owner_id: String, count: usize },

    /// Two shapes in the same document share an id.
    #[error("duplicate shape id {id} in document {title:?}")]
    DuplicateShapeId { id: String, title: String },

    /// A link references a shape id absent from its document.
    #[error("link {link_id} references unknown shape id {missing}")]
    UnresolvedReference { link_id: String, missing: String },

    /// A lollipop interface attached to a shape id absent from its document.
    #[error("lollipop interface {interface:?} is attached to unknown shape id {missing}")]
    UnattachedLollipop { interface: String, missing: String },

    /// Duplicate document title under the reject policy.
    #[error("duplicate document title {title:?}")]
    DuplicateTitle { title: String },

    /// Low-level XML syntax error.
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute syntax.
    #[error("attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// Attribute decoding error.
    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Element or attribute name is not UTF-8.
    #[error("utf8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

pub type Result<T> = std::result::Result<T, XmlError>;
