//! Lollipop interfaces.
//!
//! A lollipop is a link-like element anchored to a single class at a
//! fractional position along one side of its perimeter, rather than
//! connecting two full shapes.

use crate::ids::{ModelId, ShapeId};

/// Side of the attached class a lollipop is mounted on.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum AttachmentSide {
    #[default]
    Top,
    Right,
    Bottom,
    Left,
}

impl AttachmentSide {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Top => "Top",
            Self::Right => "Right",
            Self::Bottom => "Bottom",
            Self::Left => "Left",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Top" => Some(Self::Top),
            "Right" => Some(Self::Right),
            "Bottom" => Some(Self::Bottom),
            "Left" => Some(Self::Left),
            _ => None,
        }
    }
}

/// Logical payload of a lollipop: the interface and its implementors.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ModelInterface {
    pub id: ModelId,
    pub name: String,
    pub description: String,
    /// Class names implementing this interface.
    pub implementors: Vec<String>,
}

/// An interface realization mounted on one class.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UmlLollipopInterface {
    /// Fraction along the attachment side, `0.0..=1.0`.
    pub line_centum: f64,
    pub attachment_side: AttachmentSide,
    pub attached_to: ShapeId,
    pub interface: ModelInterface,
}

impl UmlLollipopInterface {
    #[must_use]
    pub fn new(attached_to: ShapeId, interface: ModelInterface) -> Self {
        Self {
            line_centum: 0.0,
            attachment_side: AttachmentSide::default(),
            attached_to,
            interface,
        }
    }
}
