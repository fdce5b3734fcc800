//! Document records for primitives.
//!
//! Index buffers are written as whitespace-separated text, the way `<p>` and `<vcount>`
//! carry them.

use collada_core::InputDecl;
use serde::{Deserialize, Serialize};

/// The element a primitive was declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Lines,
    Triangles,
    Polylist,
    Polygons,
}

impl PrimitiveKind {
    /// The COLLADA element name.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Lines => "lines",
            Self::Triangles => "triangles",
            Self::Polylist => "polylist",
            Self::Polygons => "polygons",
        }
    }
}

/// One `<p>` of a `<polygons>` element, with its `<ph>` hole loops.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolygonDecl {
    #[serde(with = "index_text")]
    pub p: Vec<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", with = "index_text::many")]
    pub holes: Vec<Vec<u32>>,
}

/// A `<lines>`, `<triangles>`, `<polylist>` or `<polygons>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimitiveDecl {
    pub kind: PrimitiveKind,
    #[serde(default)]
    pub material: Option<String>,
    /// Declared number of shapes.
    #[serde(default)]
    pub count: Option<usize>,
    pub inputs: Vec<InputDecl>,
    /// Flat index buffer; unused by `polygons`.
    #[serde(default, with = "index_text::optional")]
    pub p: Option<Vec<u32>>,
    /// Vertex count per polygon, `polylist` only.
    #[serde(default, with = "index_text::optional")]
    pub vcount: Option<Vec<u32>>,
    /// Per-polygon index buffers, `polygons` only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub polygons: Vec<PolygonDecl>,
}

impl PrimitiveDecl {
    /// An empty record of the given kind.
    pub fn new(kind: PrimitiveKind, inputs: Vec<InputDecl>) -> Self {
        Self {
            kind,
            material: None,
            count: None,
            inputs,
            p: None,
            vcount: None,
            polygons: Vec::new(),
        }
    }
}

mod index_text {
    use collada_core::text;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(values: &[u32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&text::format_ints(values))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u32>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        text::parse_ints(&raw).map_err(D::Error::custom)
    }

    pub mod optional {
        use super::{text, Deserialize, Deserializer, Error, Serializer};

        pub fn serialize<S: Serializer>(
            values: &Option<Vec<u32>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match values {
                Some(values) => serializer.serialize_some(&text::format_ints(values)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Vec<u32>>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| text::parse_ints(&raw).map_err(D::Error::custom))
                .transpose()
        }
    }

    pub mod many {
        use super::{text, Deserialize, Deserializer, Error, Serializer};

        pub fn serialize<S: Serializer>(
            values: &[Vec<u32>],
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(values.iter().map(|v| text::format_ints(v)))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Vec<Vec<u32>>, D::Error> {
            Vec::<String>::deserialize(deserializer)?
                .iter()
                .map(|raw| text::parse_ints(raw).map_err(D::Error::custom))
                .collect()
        }
    }
}
