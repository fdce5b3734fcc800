//! The primitive family as one type.

use std::sync::Arc;

use collada_core::{
    resolve_inputs, ColladaError, ErrorCollector, Material, MaterialMap, Result, Scope,
};
use glam::Mat4;

use crate::base::PrimitiveCore;
use crate::bound::{BoundLineSet, BoundPolygons, BoundPolylist, BoundTriangleSet};
use crate::decl::{PrimitiveDecl, PrimitiveKind};
use crate::line_set::LineSet;
use crate::polygons::Polygons;
use crate::polylist::Polylist;
use crate::triangle_set::TriangleSet;

/// Any of the four primitive kinds.
#[derive(Debug, Clone)]
pub enum Primitive {
    Lines(LineSet),
    Triangles(TriangleSet),
    Polylist(Polylist),
    Polygons(Polygons),
}

impl Primitive {
    /// Decodes a primitive record against `scope`.
    ///
    /// Unknown input semantics and dropped polygon holes are reported to `errors`; everything
    /// else that is wrong with the record is returned.
    pub fn load(decl: &PrimitiveDecl, scope: &Scope, errors: &mut ErrorCollector) -> Result<Self> {
        let inputs = resolve_inputs(scope, &decl.inputs, errors)?;
        let material = decl.material.clone();
        let p = || {
            decl.p.clone().ok_or_else(|| {
                ColladaError::incomplete(format!("<{}> has no index buffer", decl.kind.tag()))
            })
        };

        let primitive = match decl.kind {
            PrimitiveKind::Lines => Self::Lines(LineSet::new(inputs, p()?, material)?),
            PrimitiveKind::Triangles => {
                Self::Triangles(TriangleSet::new(inputs, p()?, material)?)
            }
            PrimitiveKind::Polylist => {
                let vcount = decl
                    .vcount
                    .clone()
                    .ok_or_else(|| ColladaError::incomplete("<polylist> has no vcount"))?;
                Self::Polylist(Polylist::new(inputs, p()?, vcount, material)?)
            }
            PrimitiveKind::Polygons => {
                let holes = decl.polygons.iter().filter(|p| !p.holes.is_empty()).count();
                if holes > 0 {
                    errors.push(ColladaError::Unsupported(format!(
                        "{holes} polygons with holes; only outer boundaries are kept"
                    )));
                }
                let blocks: Vec<Vec<u32>> = decl.polygons.iter().map(|p| p.p.clone()).collect();
                Self::Polygons(Polygons::new(inputs, &blocks, material)?)
            }
        };

        if let Some(count) = decl.count {
            if count != primitive.len() {
                return Err(ColladaError::malformed(format!(
                    "<{}> declares {count} shapes but holds {}",
                    decl.kind.tag(),
                    primitive.len()
                )));
            }
        }
        Ok(primitive)
    }

    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Lines(_) => PrimitiveKind::Lines,
            Self::Triangles(_) => PrimitiveKind::Triangles,
            Self::Polylist(_) => PrimitiveKind::Polylist,
            Self::Polygons(_) => PrimitiveKind::Polygons,
        }
    }

    pub fn core(&self) -> &PrimitiveCore {
        match self {
            Self::Lines(p) => p.core(),
            Self::Triangles(p) => p.core(),
            Self::Polylist(p) => p.core(),
            Self::Polygons(p) => p.as_polylist().core(),
        }
    }

    /// The unresolved material symbol.
    pub fn material(&self) -> Option<&str> {
        self.core().material()
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        match self {
            Self::Lines(p) => p.len(),
            Self::Triangles(p) => p.len(),
            Self::Polylist(p) => p.len(),
            Self::Polygons(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The triangle view: the primitive itself for triangles, the cached fan triangulation for
    /// polygon kinds, nothing for lines.
    pub fn triangleset(&self) -> Option<&TriangleSet> {
        match self {
            Self::Lines(_) => None,
            Self::Triangles(p) => Some(p),
            Self::Polylist(p) => Some(p.triangleset()),
            Self::Polygons(p) => Some(p.triangleset()),
        }
    }

    pub fn bind(&self, matrix: &Mat4, materials: &MaterialMap) -> BoundPrimitive {
        match self {
            Self::Lines(p) => BoundPrimitive::Lines(p.bind(matrix, materials)),
            Self::Triangles(p) => BoundPrimitive::Triangles(p.bind(matrix, materials)),
            Self::Polylist(p) => BoundPrimitive::Polylist(p.bind(matrix, materials)),
            Self::Polygons(p) => BoundPrimitive::Polygons(p.bind(matrix, materials)),
        }
    }

    pub fn to_decl(&self) -> PrimitiveDecl {
        match self {
            Self::Lines(p) => p.to_decl(),
            Self::Triangles(p) => p.to_decl(),
            Self::Polylist(p) => p.to_decl(),
            Self::Polygons(p) => p.to_decl(),
        }
    }
}

impl From<LineSet> for Primitive {
    fn from(p: LineSet) -> Self {
        Self::Lines(p)
    }
}

impl From<TriangleSet> for Primitive {
    fn from(p: TriangleSet) -> Self {
        Self::Triangles(p)
    }
}

impl From<Polylist> for Primitive {
    fn from(p: Polylist) -> Self {
        Self::Polylist(p)
    }
}

impl From<Polygons> for Primitive {
    fn from(p: Polygons) -> Self {
        Self::Polygons(p)
    }
}

/// Any of the four bound primitive kinds.
#[derive(Debug, Clone)]
pub enum BoundPrimitive {
    Lines(BoundLineSet),
    Triangles(BoundTriangleSet),
    Polylist(BoundPolylist),
    Polygons(BoundPolygons),
}

impl BoundPrimitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Lines(_) => PrimitiveKind::Lines,
            Self::Triangles(_) => PrimitiveKind::Triangles,
            Self::Polylist(_) => PrimitiveKind::Polylist,
            Self::Polygons(_) => PrimitiveKind::Polygons,
        }
    }

    /// The transformed primitive data.
    pub fn core(&self) -> &PrimitiveCore {
        match self {
            Self::Lines(p) => p.core(),
            Self::Triangles(p) => p.core(),
            Self::Polylist(p) => p.core(),
            Self::Polygons(p) => p.core(),
        }
    }

    pub fn material(&self) -> Option<&Arc<Material>> {
        match self {
            Self::Lines(p) => p.material(),
            Self::Triangles(p) => p.material(),
            Self::Polylist(p) => p.material(),
            Self::Polygons(p) => p.material(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Lines(p) => p.len(),
            Self::Triangles(p) => p.len(),
            Self::Polylist(p) => p.len(),
            Self::Polygons(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// See [`Primitive::triangleset`].
    pub fn triangleset(&self) -> Option<&BoundTriangleSet> {
        match self {
            Self::Lines(_) => None,
            Self::Triangles(p) => Some(p),
            Self::Polylist(p) => Some(p.triangleset()),
            Self::Polygons(p) => Some(p.triangleset()),
        }
    }
}
