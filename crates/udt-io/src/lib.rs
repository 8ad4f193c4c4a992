//! Project file envelope for UML diagram projects.
//!
//! Two on-disk representations wrap the same XML document: `.udt`
//! files hold a zlib-compressed stream with no extra framing, and
//! `.xml` files hold the text as-is. Writes go through a temp file and
//! rename so an interrupted save never corrupts an existing project.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use udt_io::{read, write_project};
//! use udt_model::UmlProject;
//!
//! let project = UmlProject::new();
//! write_project(&project, Path::new("diagrams/shop.udt")).unwrap();
//! let loaded = read(Path::new("diagrams/shop.udt")).unwrap();
//! assert!(loaded.documents.is_empty());
//! ```

mod error;
mod load;
mod save;
mod suffix;

pub use error::{ProjectIoError, Result};
pub use load::{read, read_project, read_project_with, read_xml, read_xml_with};
pub use save::{WriteOptions, write_project, write_project_with, write_xml, write_xml_with};
pub use suffix::{PROJECT_SUFFIX, SuffixPolicy, XML_SUFFIX};
