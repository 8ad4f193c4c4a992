//! Edge-like visual elements connecting two shapes.
//!
//! A connector's stored control points are the interior points only;
//! the two endpoints are derived geometry, recomputed from the
//! connected shapes at serialization time and carried as `end_points`
//! after a load until the owning application re-lays the diagram out.

use crate::geometry::{DeltaXy, EndPoints, UmlPosition};
use crate::ids::ShapeId;

/// Logical payload shared by every link variant.
///
/// `source_id` and `destination_id` reference shape IDs within the same
/// document; resolution happens during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ModelLink {
    pub name: String,
    pub source_id: ShapeId,
    pub destination_id: ShapeId,
    pub bidirectional: bool,
    pub source_cardinality: String,
    pub destination_cardinality: String,
}

/// Visual state common to every link variant.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Connector {
    pub id: ShapeId,
    /// Derived attachment points; authoritative only after a load.
    pub end_points: EndPoints,
    pub spline: bool,
    /// Interior control points, endpoints excluded.
    pub control_points: Vec<UmlPosition>,
    pub model: ModelLink,
}

impl Connector {
    #[must_use]
    pub fn new(id: ShapeId, model: ModelLink) -> Self {
        Self {
            id,
            end_points: EndPoints::default(),
            spline: false,
            control_points: Vec::new(),
            model,
        }
    }
}

/// One positionable label attached to an association.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssociationLabel {
    pub delta: DeltaXy,
}

/// The three labels every association carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssociationLabels {
    pub name: AssociationLabel,
    pub source_cardinality: AssociationLabel,
    pub destination_cardinality: AssociationLabel,
}

/// A typed relationship between two shapes.
///
/// The variant is the link type; there is no separate stored tag, so a
/// new variant is a compile error everywhere links are handled.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum UmlLink {
    Association {
        connector: Connector,
        labels: AssociationLabels,
    },
    Inheritance(Connector),
    Interface(Connector),
    NoteLink(Connector),
}

impl UmlLink {
    #[must_use]
    pub const fn connector(&self) -> &Connector {
        match self {
            Self::Association { connector, .. }
            | Self::Inheritance(connector)
            | Self::Interface(connector)
            | Self::NoteLink(connector) => connector,
        }
    }

    pub const fn connector_mut(&mut self) -> &mut Connector {
        match self {
            Self::Association { connector, .. }
            | Self::Inheritance(connector)
            | Self::Interface(connector)
            | Self::NoteLink(connector) => connector,
        }
    }

    /// Wire tag of the link type.
    #[must_use]
    pub const fn type_label(&self) -> &'static str {
        match self {
            Self::Association { .. } => "ASSOCIATION",
            Self::Inheritance(_) => "INHERITANCE",
            Self::Interface(_) => "INTERFACE",
            Self::NoteLink(_) => "NOTELINK",
        }
    }
}
