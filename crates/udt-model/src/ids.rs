//! Identifier newtypes.
//!
//! Shapes are addressed by an opaque string token assigned externally;
//! model objects carry their own numeric identifier. The two namespaces
//! never mix: links resolve against [`ShapeId`]s, while [`ModelId`]s are
//! purely informational payload.

use std::fmt;

/// Opaque identifier of a shape or link, unique within a document.
///
/// The codec makes no assumption about the token's format.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct ShapeId(String);

impl ShapeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShapeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Numeric identifier internal to a model object.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct ModelId(u32);

impl ModelId {
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ModelId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_ids_are_opaque() {
        let id = ShapeId::new("play.small.long.group");
        assert_eq!(id.as_str(), "play.small.long.group");
        assert_eq!(id.to_string(), "play.small.long.group");
    }

    #[test]
    fn model_ids_are_numeric() {
        let id = ModelId::new(777);
        assert_eq!(id.value(), 777);
        assert_eq!(id.to_string(), "777");
    }
}
