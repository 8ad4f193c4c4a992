//! Documents and the project container.

use std::path::PathBuf;

use crate::links::UmlLink;
use crate::lollipop::UmlLollipopInterface;
use crate::shapes::{UmlActor, UmlClass, UmlNote, UmlText, UmlUseCase};

/// Schema version the serializer currently emits.
pub const CURRENT_SCHEMA_VERSION: &str = "14.0";

/// Which kind of diagram a document holds.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum UmlDocumentKind {
    Class,
    UseCase,
    Sequence,
    #[default]
    NotSet,
}

impl UmlDocumentKind {
    /// Canonical label written to the `documentType` attribute.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Class => "Class Document",
            Self::UseCase => "Use Case Document",
            Self::Sequence => "Sequence Document",
            Self::NotSet => "Not Set",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Class Document" => Some(Self::Class),
            "Use Case Document" => Some(Self::UseCase),
            "Sequence Document" => Some(Self::Sequence),
            "Not Set" => Some(Self::NotSet),
            _ => None,
        }
    }
}

/// One diagram page within a project.
///
/// Shape collections are ordered; the order drives serialization
/// determinism but carries no diagram semantics.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UmlDocument {
    pub title: String,
    pub kind: UmlDocumentKind,
    pub scroll_position_x: i32,
    pub scroll_position_y: i32,
    pub pixels_per_unit_x: i32,
    pub pixels_per_unit_y: i32,
    pub classes: Vec<UmlClass>,
    pub notes: Vec<UmlNote>,
    pub texts: Vec<UmlText>,
    pub actors: Vec<UmlActor>,
    pub use_cases: Vec<UmlUseCase>,
    pub links: Vec<UmlLink>,
    pub lollipop_interfaces: Vec<UmlLollipopInterface>,
}

impl UmlDocument {
    #[must_use]
    pub fn new(kind: UmlDocumentKind, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind,
            ..Self::default()
        }
    }

    /// True when the document holds no shapes or links at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
            && self.notes.is_empty()
            && self.texts.is_empty()
            && self.actors.is_empty()
            && self.use_cases.is_empty()
            && self.links.is_empty()
            && self.lollipop_interfaces.is_empty()
    }
}

impl Default for UmlDocument {
    fn default() -> Self {
        Self {
            title: String::new(),
            kind: UmlDocumentKind::NotSet,
            scroll_position_x: 1,
            scroll_position_y: 1,
            pixels_per_unit_x: 1,
            pixels_per_unit_y: 1,
            classes: Vec::new(),
            notes: Vec::new(),
            texts: Vec::new(),
            actors: Vec::new(),
            use_cases: Vec::new(),
            links: Vec::new(),
            lollipop_interfaces: Vec::new(),
        }
    }
}

/// Insertion-ordered document collection keyed by title.
///
/// Replacing an existing title keeps the original position so that a
/// re-serialized project stays byte-stable.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UmlDocuments(Vec<UmlDocument>);

impl UmlDocuments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document under its title, replacing any existing entry
    /// with the same title in place. Returns the replaced document.
    pub fn insert(&mut self, document: UmlDocument) -> Option<UmlDocument> {
        match self.0.iter_mut().find(|d| d.title == document.title) {
            Some(existing) => Some(std::mem::replace(existing, document)),
            None => {
                self.0.push(document);
                None
            }
        }
    }

    #[must_use]
    pub fn get(&self, title: &str) -> Option<&UmlDocument> {
        self.0.iter().find(|d| d.title == title)
    }

    #[must_use]
    pub fn contains_title(&self, title: &str) -> bool {
        self.get(title).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UmlDocument> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a UmlDocuments {
    type Item = &'a UmlDocument;
    type IntoIter = std::slice::Iter<'a, UmlDocument>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<UmlDocument> for UmlDocuments {
    fn from_iter<T: IntoIterator<Item = UmlDocument>>(iter: T) -> Self {
        let mut documents = Self::new();
        for document in iter {
            documents.insert(document);
        }
        documents
    }
}

/// Root container: metadata plus the document collection.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UmlProject {
    /// Informational path of the project file.
    pub file_name: PathBuf,
    /// Schema version declared by the source document; newly authored
    /// projects carry [`CURRENT_SCHEMA_VERSION`].
    pub schema_version: String,
    /// Path associated with generated source code.
    pub code_path: PathBuf,
    pub documents: UmlDocuments,
}

impl UmlProject {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for UmlProject {
    fn default() -> Self {
        Self {
            file_name: PathBuf::new(),
            schema_version: CURRENT_SCHEMA_VERSION.to_string(),
            code_path: PathBuf::new(),
            documents: UmlDocuments::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_kind_labels_round_trip() {
        for kind in [
            UmlDocumentKind::Class,
            UmlDocumentKind::UseCase,
            UmlDocumentKind::Sequence,
            UmlDocumentKind::NotSet,
        ] {
            assert_eq!(UmlDocumentKind::from_label(kind.label()), Some(kind));
        }
        assert_eq!(UmlDocumentKind::from_label("State Document"), None);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut documents = UmlDocuments::new();
        documents.insert(UmlDocument::new(UmlDocumentKind::Class, "first"));
        documents.insert(UmlDocument::new(UmlDocumentKind::Class, "second"));

        let replaced = documents.insert(UmlDocument::new(UmlDocumentKind::UseCase, "first"));
        assert_eq!(replaced.map(|d| d.kind), Some(UmlDocumentKind::Class));

        let titles: Vec<&str> = documents.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, ["first", "second"]);
        assert_eq!(documents.get("first").map(|d| d.kind), Some(UmlDocumentKind::UseCase));
    }

    #[test]
    fn new_projects_carry_the_current_schema_version() {
        assert_eq!(UmlProject::new().schema_version, CURRENT_SCHEMA_VERSION);
    }
}
