//! Node-like visual elements and their embedded model objects.
//!
//! Every shape pairs canvas geometry (id, position, size) with a
//! variant-specific model object carrying the logical payload. The
//! model object is what the embedded class/note/actor means; the shape
//! is where it sits.

use crate::geometry::{ShapeRect, UmlDimensions, UmlPosition};
use crate::ids::{ModelId, ShapeId};

/// Tri-state display preference used by class diagrams.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum DisplayTriState {
    True,
    False,
    #[default]
    Unspecified,
}

impl DisplayTriState {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::True => "True",
            Self::False => "False",
            Self::Unspecified => "Unspecified",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "True" => Some(Self::True),
            "False" => Some(Self::False),
            "Unspecified" => Some(Self::Unspecified),
            _ => None,
        }
    }
}

/// Member visibility of fields and methods.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Protected,
}

impl Visibility {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::Private => "PRIVATE",
            Self::Protected => "PROTECTED",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "PUBLIC" => Some(Self::Public),
            "PRIVATE" => Some(Self::Private),
            "PROTECTED" => Some(Self::Protected),
            _ => None,
        }
    }
}

/// One parameter of a class method.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Parameter {
    pub name: String,
    pub parameter_type: String,
    pub default_value: String,
}

/// A method of a class model.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Method {
    pub name: String,
    pub visibility: Visibility,
    pub return_type: String,
    pub parameters: Vec<Parameter>,
}

/// A field of a class model.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Field {
    pub name: String,
    pub visibility: Visibility,
    pub field_type: String,
    pub default_value: String,
}

/// Logical payload of a class shape.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClassModel {
    pub id: ModelId,
    pub name: String,
    pub display_methods: bool,
    pub display_parameters: DisplayTriState,
    pub display_constructor: DisplayTriState,
    pub display_dunder_methods: DisplayTriState,
    pub display_fields: bool,
    pub display_stereotype: bool,
    pub file_name: String,
    pub description: String,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
}

impl ClassModel {
    #[must_use]
    pub fn new(id: ModelId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Default for ClassModel {
    fn default() -> Self {
        Self {
            id: ModelId::default(),
            name: String::new(),
            display_methods: true,
            display_parameters: DisplayTriState::Unspecified,
            display_constructor: DisplayTriState::Unspecified,
            display_dunder_methods: DisplayTriState::Unspecified,
            display_fields: true,
            display_stereotype: true,
            file_name: String::new(),
            description: String::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }
}

/// Logical payload of a note shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NoteModel {
    pub id: ModelId,
    pub content: String,
    pub file_name: String,
}

/// Logical payload of a free-text shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TextModel {
    pub id: ModelId,
    pub content: String,
}

/// Logical payload of an actor shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActorModel {
    pub id: ModelId,
    pub name: String,
    pub file_name: String,
}

/// Logical payload of a use-case shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UseCaseModel {
    pub id: ModelId,
    pub name: String,
    pub file_name: String,
}

/// A class placed on a document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UmlClass {
    pub id: ShapeId,
    pub position: UmlPosition,
    pub size: UmlDimensions,
    pub model: ClassModel,
}

impl UmlClass {
    #[must_use]
    pub fn new(id: ShapeId, model: ClassModel) -> Self {
        Self {
            id,
            position: UmlPosition::default(),
            size: UmlDimensions::default(),
            model,
        }
    }

    /// Footprint used for connector endpoint computation.
    #[must_use]
    pub const fn rect(&self) -> ShapeRect {
        ShapeRect::new(self.position, self.size)
    }
}

/// A note placed on a document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UmlNote {
    pub id: ShapeId,
    pub position: UmlPosition,
    pub size: UmlDimensions,
    pub model: NoteModel,
}

impl UmlNote {
    #[must_use]
    pub fn new(id: ShapeId, model: NoteModel) -> Self {
        Self {
            id,
            position: UmlPosition::default(),
            size: UmlDimensions::default(),
            model,
        }
    }

    #[must_use]
    pub const fn rect(&self) -> ShapeRect {
        ShapeRect::new(self.position, self.size)
    }
}

/// A free-text block placed on a document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UmlText {
    pub id: ShapeId,
    pub position: UmlPosition,
    pub size: UmlDimensions,
    pub model: TextModel,
}

impl UmlText {
    #[must_use]
    pub fn new(id: ShapeId, model: TextModel) -> Self {
        Self {
            id,
            position: UmlPosition::default(),
            size: UmlDimensions::default(),
            model,
        }
    }

    #[must_use]
    pub const fn rect(&self) -> ShapeRect {
        ShapeRect::new(self.position, self.size)
    }
}

/// An actor placed on a use-case document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UmlActor {
    pub id: ShapeId,
    pub position: UmlPosition,
    pub size: UmlDimensions,
    pub model: ActorModel,
}

impl UmlActor {
    #[must_use]
    pub fn new(id: ShapeId, model: ActorModel) -> Self {
        Self {
            id,
            position: UmlPosition::default(),
            size: UmlDimensions::default(),
            model,
        }
    }

    #[must_use]
    pub const fn rect(&self) -> ShapeRect {
        ShapeRect::new(self.position, self.size)
    }
}

/// A use case placed on a use-case document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UmlUseCase {
    pub id: ShapeId,
    pub position: UmlPosition,
    pub size: UmlDimensions,
    pub model: UseCaseModel,
}

impl UmlUseCase {
    #[must_use]
    pub fn new(id: ShapeId, model: UseCaseModel) -> Self {
        Self {
            id,
            position: UmlPosition::default(),
            size: UmlDimensions::default(),
            model,
        }
    }

    #[must_use]
    pub const fn rect(&self) -> ShapeRect {
        ShapeRect::new(self.position, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_model_defaults_match_display_conventions() {
        let model = ClassModel::new(ModelId::new(0), "ClassName1");
        assert!(model.display_methods);
        assert!(model.display_fields);
        assert!(model.display_stereotype);
        assert_eq!(model.display_parameters, DisplayTriState::Unspecified);
    }

    #[test]
    fn shape_rect_uses_position_and_size() {
        let mut class = UmlClass::new(ShapeId::new("a"), ClassModel::default());
        class.position = UmlPosition::new(100, 100);
        class.size = UmlDimensions::new(150, 75);
        assert_eq!(class.rect().center(), UmlPosition::new(175, 137));
    }
}
