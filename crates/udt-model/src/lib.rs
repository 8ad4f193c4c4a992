//! Document model for UML diagram projects.
//!
//! A [`UmlProject`] holds diagram pages ([`UmlDocument`]) keyed by
//! title; each page holds typed shapes (classes, notes, texts, actors,
//! use cases), typed links between them, and lollipop interfaces.
//! Shapes embed a model object carrying the logical payload, distinct
//! from their canvas geometry.
//!
//! The crate is a leaf: it defines the graph the `udt-xml` codec walks
//! and the endpoint geometry that codec recomputes, but knows nothing
//! about XML or files.

pub mod document;
pub mod geometry;
pub mod ids;
pub mod links;
pub mod lollipop;
pub mod shapes;

pub use document::{
    CURRENT_SCHEMA_VERSION, UmlDocument, UmlDocumentKind, UmlDocuments, UmlProject,
};
pub use geometry::{
    DeltaXy, EndPoints, ShapeRect, UmlDimensions, UmlPosition, line_end_points, perimeter_point,
};
pub use ids::{ModelId, ShapeId};
pub use links::{AssociationLabel, AssociationLabels, Connector, ModelLink, UmlLink};
pub use lollipop::{AttachmentSide, ModelInterface, UmlLollipopInterface};
pub use shapes::{
    ActorModel, ClassModel, DisplayTriState, Field, Method, NoteModel, Parameter, TextModel,
    UmlActor, UmlClass, UmlNote, UmlText, UmlUseCase, UseCaseModel, Visibility,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_serializes_to_json() {
        let mut project = UmlProject::new();
        project
            .documents
            .insert(UmlDocument::new(UmlDocumentKind::Class, "Diagram"));

        let json = serde_json::to_string(&project).expect("serialize project");
        let round: UmlProject = serde_json::from_str(&json).expect("deserialize project");
        assert_eq!(round, project);
    }
}
