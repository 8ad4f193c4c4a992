//! XML codec for UML diagram projects.
//!
//! This crate turns an in-memory [`udt_model::UmlProject`] into the
//! project XML dialect and back. The text side is deliberately stable:
//! fixed element and attribute order, 4-space indentation, and a
//! single-quoted declaration, so that saving an unchanged project
//! produces an unchanged file.
//!
//! # Example
//!
//! ```
//! use udt_model::UmlProject;
//! use udt_xml::{deserialize_project, serialize_project};
//!
//! let project = UmlProject::new();
//! let xml = serialize_project(&project).unwrap();
//! let round_tripped = deserialize_project(&xml).unwrap();
//! assert_eq!(project.documents.len(), round_tripped.documents.len());
//! ```
//!
//! # Schema versions
//!
//! Two schema versions are understood on input, selected by the root
//! element's `version` attribute: 12.0 (legacy `Pyut*` model element
//! names) and 14.0 (`Model*` names). Output is always the current
//! version; loading a legacy file and saving it migrates it.

mod deserializer;
mod element;
mod error;
mod serializer;
mod vocabulary;

pub use deserializer::{
    DeserializeOptions, DuplicateTitles, deserialize_project, deserialize_project_with,
};
pub use element::{XML_DECLARATION, XmlElement};
pub use error::{Result, XmlError};
pub use serializer::{project_to_element, serialize_project};
pub use vocabulary::SchemaVersion;
