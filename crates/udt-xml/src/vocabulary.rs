//! Schema versions and their element vocabularies.
//!
//! The structural element names (`UmlProject`, `UMLDiagram`, the shape
//! and link elements) are shared by every schema version; only the
//! embedded model-element names changed when the vocabulary moved from
//! domain-prefixed (`Pyut*`, version 12.0) to generic (`Model*`,
//! version 14.0). The serializer always emits the current vocabulary;
//! the deserializer selects one from the document's declared `version`.

use crate::error::XmlError;

/// Element and attribute names shared by all schema versions.
pub mod names {
    pub const PROJECT: &str = "UmlProject";
    pub const DIAGRAM: &str = "UMLDiagram";
    pub const UML_CLASS: &str = "UmlClass";
    pub const UML_NOTE: &str = "UmlNote";
    pub const UML_TEXT: &str = "UmlText";
    pub const UML_ACTOR: &str = "UmlActor";
    pub const UML_USE_CASE: &str = "UmlUseCase";
    pub const UML_LINK: &str = "UmlLink";
    pub const UML_LOLLIPOP_INTERFACE: &str = "UmlLollipopInterface";
    pub const LINE_CONTROL_POINT: &str = "LineControlPoint";
    pub const ASSOCIATION_NAME: &str = "AssociationName";
    pub const SOURCE_CARDINALITY: &str = "SourceCardinality";
    pub const DESTINATION_CARDINALITY: &str = "DestinationCardinality";
    pub const IMPLEMENTOR: &str = "Implementor";

    pub const ATTR_FILE_NAME: &str = "fileName";
    pub const ATTR_VERSION: &str = "version";
    pub const ATTR_CODE_PATH: &str = "codePath";
    pub const ATTR_DOCUMENT_TYPE: &str = "documentType";
    pub const ATTR_TITLE: &str = "title";
    pub const ATTR_SCROLL_POSITION_X: &str = "scrollPositionX";
    pub const ATTR_SCROLL_POSITION_Y: &str = "scrollPositionY";
    pub const ATTR_PIXELS_PER_UNIT_X: &str = "pixelsPerUnitX";
    pub const ATTR_PIXELS_PER_UNIT_Y: &str = "pixelsPerUnitY";
    pub const ATTR_ID: &str = "id";
    pub const ATTR_WIDTH: &str = "width";
    pub const ATTR_HEIGHT: &str = "height";
    pub const ATTR_X: &str = "x";
    pub const ATTR_Y: &str = "y";
    pub const ATTR_FROM_X: &str = "fromX";
    pub const ATTR_FROM_Y: &str = "fromY";
    pub const ATTR_TO_X: &str = "toX";
    pub const ATTR_TO_Y: &str = "toY";
    pub const ATTR_SPLINE: &str = "spline";
    pub const ATTR_DELTA_X: &str = "deltaX";
    pub const ATTR_DELTA_Y: &str = "deltaY";
    pub const ATTR_NAME: &str = "name";
    pub const ATTR_TYPE: &str = "type";
    pub const ATTR_SOURCE_ID: &str = "sourceId";
    pub const ATTR_DESTINATION_ID: &str = "destinationId";
    pub const ATTR_BIDIRECTIONAL: &str = "bidirectional";
    pub const ATTR_SOURCE_CARDINALITY_VALUE: &str = "sourceCardinalityValue";
    pub const ATTR_DESTINATION_CARDINALITY_VALUE: &str = "destinationCardinalityValue";
    pub const ATTR_LINE_CENTUM: &str = "lineCentum";
    pub const ATTR_ATTACHMENT_SIDE: &str = "attachmentSide";
    pub const ATTR_ATTACHED_TO_ID: &str = "attachedToId";
    pub const ATTR_IMPLEMENTING_CLASS_NAME: &str = "implementingClassName";
    pub const ATTR_CONTENT: &str = "content";
    pub const ATTR_DESCRIPTION: &str = "description";
    pub const ATTR_DISPLAY_METHODS: &str = "displayMethods";
    pub const ATTR_DISPLAY_PARAMETERS: &str = "displayParameters";
    pub const ATTR_DISPLAY_CONSTRUCTOR: &str = "displayConstructor";
    pub const ATTR_DISPLAY_DUNDER_METHODS: &str = "displayDunderMethods";
    pub const ATTR_DISPLAY_FIELDS: &str = "displayFields";
    pub const ATTR_DISPLAY_STEREOTYPE: &str = "displayStereotype";
    pub const ATTR_VISIBILITY: &str = "visibility";
    pub const ATTR_RETURN_TYPE: &str = "returnType";
    pub const ATTR_DEFAULT_VALUE: &str = "defaultValue";
}

/// Version-dependent model-element names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vocabulary {
    pub model_class: &'static str,
    pub model_note: &'static str,
    pub model_text: &'static str,
    pub model_actor: &'static str,
    pub model_use_case: &'static str,
    pub model_link: &'static str,
    pub model_interface: &'static str,
    pub model_method: &'static str,
    pub model_field: &'static str,
    pub model_parameter: &'static str,
}

const V12_VOCABULARY: Vocabulary = Vocabulary {
    model_class: "PyutClass",
    model_note: "PyutNote",
    model_text: "PyutText",
    model_actor: "PyutActor",
    model_use_case: "PyutUseCase",
    model_link: "PyutLink",
    model_interface: "PyutInterface",
    model_method: "PyutMethod",
    model_field: "PyutField",
    model_parameter: "PyutParameter",
};

const V14_VOCABULARY: Vocabulary = Vocabulary {
    model_class: "ModelClass",
    model_note: "ModelNote",
    model_text: "ModelText",
    model_actor: "ModelActor",
    model_use_case: "ModelUseCase",
    model_link: "ModelLink",
    model_interface: "ModelInterface",
    model_method: "ModelMethod",
    model_field: "ModelField",
    model_parameter: "ModelParameter",
};

/// A schema version the codec knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaVersion {
    /// Version 12.0, `Pyut*` model-element names.
    V12,
    /// Version 14.0, `Model*` model-element names.
    V14,
}

impl SchemaVersion {
    /// Version the serializer emits.
    pub const CURRENT: Self = Self::V14;

    /// Map a declared `version` attribute to a known vocabulary.
    ///
    /// # Errors
    ///
    /// `UnsupportedVersion` when the token has no known mapping; the
    /// codec never guesses.
    pub fn from_token(token: &str) -> Result<Self, XmlError> {
        match token {
            "12.0" => Ok(Self::V12),
            "14.0" => Ok(Self::V14),
            _ => Err(XmlError::UnsupportedVersion {
                version: token.to_string(),
            }),
        }
    }

    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::V12 => "12.0",
            Self::V14 => "14.0",
        }
    }

    #[must_use]
    pub(crate) const fn vocabulary(self) -> &'static Vocabulary {
        match self {
            Self::V12 => &V12_VOCABULARY,
            Self::V14 => &V14_VOCABULARY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_versions_resolve() {
        assert_eq!(SchemaVersion::from_token("12.0").unwrap(), SchemaVersion::V12);
        assert_eq!(SchemaVersion::from_token("14.0").unwrap(), SchemaVersion::V14);
    }

    #[test]
    fn unknown_version_is_a_hard_failure() {
        let err = SchemaVersion::from_token("11.0").unwrap_err();
        assert!(matches!(err, XmlError::UnsupportedVersion { version } if version == "11.0"));
    }

    #[test]
    fn current_vocabulary_uses_model_prefix() {
        let vocabulary = SchemaVersion::CURRENT.vocabulary();
        assert_eq!(vocabulary.model_class, "ModelClass");
        assert_eq!(SchemaVersion::CURRENT.token(), "14.0");
    }

    #[test]
    fn v12_vocabulary_uses_domain_prefix() {
        assert_eq!(SchemaVersion::V12.vocabulary().model_link, "PyutLink");
    }
}
