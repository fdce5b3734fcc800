//! Input semantics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What an index column dereferences.
///
/// The eight semantics the primitive engine understands have their own variants; anything else
/// is carried verbatim in [`Semantic::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Semantic {
    Vertex,
    Normal,
    Texcoord,
    TexTangent,
    TexBinormal,
    Color,
    Tangent,
    Binormal,
    Other(String),
}

impl Semantic {
    /// The semantics with a dedicated bucket, in bucket order.
    pub const KNOWN: [Semantic; 8] = [
        Semantic::Vertex,
        Semantic::Normal,
        Semantic::Texcoord,
        Semantic::TexBinormal,
        Semantic::TexTangent,
        Semantic::Color,
        Semantic::Tangent,
        Semantic::Binormal,
    ];

    /// Maps a sub-semantic of a `<vertices>` pool. `POSITION` keeps the `VERTEX` label.
    pub fn from_vertex_pool(name: &str) -> Self {
        if name == "POSITION" {
            Self::Vertex
        } else {
            Self::from(name)
        }
    }

    /// Position of this semantic's bucket in [`Semantic::KNOWN`].
    pub fn bucket(&self) -> Option<usize> {
        Self::KNOWN.iter().position(|k| k == self)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Vertex => "VERTEX",
            Self::Normal => "NORMAL",
            Self::Texcoord => "TEXCOORD",
            Self::TexTangent => "TEXTANGENT",
            Self::TexBinormal => "TEXBINORMAL",
            Self::Color => "COLOR",
            Self::Tangent => "TANGENT",
            Self::Binormal => "BINORMAL",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for Semantic {
    fn from(s: &str) -> Self {
        match s {
            "VERTEX" => Self::Vertex,
            "NORMAL" => Self::Normal,
            "TEXCOORD" => Self::Texcoord,
            "TEXTANGENT" => Self::TexTangent,
            "TEXBINORMAL" => Self::TexBinormal,
            "COLOR" => Self::Color,
            "TANGENT" => Self::Tangent,
            "BINORMAL" => Self::Binormal,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Semantic {
    fn from(s: String) -> Self {
        match Self::from(s.as_str()) {
            Self::Other(_) => Self::Other(s),
            known => known,
        }
    }
}

impl From<Semantic> for String {
    fn from(s: Semantic) -> Self {
        match s {
            Semantic::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Semantic {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for Semantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
