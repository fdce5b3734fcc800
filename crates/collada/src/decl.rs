//! Document records for geometry.

use collada_core::{Result, SourceDecl};
use collada_mesh::PrimitiveDecl;
use serde::{Deserialize, Serialize};

/// One `<input>` of a `<vertices>` pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexPoolInput {
    /// `POSITION`, `NORMAL`, `TEXCOORD`, ...
    pub semantic: String,
    /// `#id` reference to a source.
    pub source: String,
}

/// A `<vertices>` element: the pool addressed by `VERTEX` inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerticesDecl {
    pub id: String,
    pub inputs: Vec<VertexPoolInput>,
}

impl VerticesDecl {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            inputs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_input(mut self, semantic: impl Into<String>, source: impl Into<String>) -> Self {
        self.inputs.push(VertexPoolInput {
            semantic: semantic.into(),
            source: source.into(),
        });
        self
    }
}

/// A `<geometry>` holding one `<mesh>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryDecl {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sources: Vec<SourceDecl>,
    #[serde(default)]
    pub vertices: Option<VerticesDecl>,
    #[serde(default)]
    pub primitives: Vec<PrimitiveDecl>,
}

impl GeometryDecl {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_json() {
        let decl = GeometryDecl::from_json(r#"{ "id": "empty" }"#).unwrap();
        assert_eq!(decl.id, "empty");
        assert!(decl.sources.is_empty());
        assert!(decl.vertices.is_none());
        let back = GeometryDecl::from_json(&decl.to_json().unwrap()).unwrap();
        assert_eq!(back, decl);
    }

    #[test]
    fn test_bad_json() {
        let err = GeometryDecl::from_json("{ \"id\": 3 }").unwrap_err();
        assert_eq!(err.kind(), collada_core::ErrorKind::Malformed);
    }
}
