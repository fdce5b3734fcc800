//! Mesh primitives for collada-rs.
//!
//! A primitive pairs the inputs resolved by [`collada_core::resolve_inputs`] with a flat,
//! interleaved index buffer. On construction every input's index column is split out into an
//! attribute [`Stream`] and bounds-checked against its source, so shape access never fails:
//!
//! - [`LineSet`], [`TriangleSet`], [`Polylist`] and [`Polygons`], unified by [`Primitive`]
//! - shape views [`Line`], [`Triangle`] and [`Polygon`]
//! - fan triangulation of polygon primitives, cached per instance
//! - smooth normal and texture tangent generation on triangle sets
//! - bound variants carrying world-space positions and a resolved material

// Geometry code intentionally uses casts for indices and coordinates
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod array;
pub mod attributes;
pub mod base;
pub mod bound;
pub mod decl;
pub mod line_set;
pub mod polygons;
pub mod polylist;
pub mod primitive;
pub mod shape;
pub mod triangle_set;

#[cfg(test)]
mod test_util;

pub use array::VectorArray;
pub use attributes::{Stream, VertexStreams};
pub use base::PrimitiveCore;
pub use bound::{
    matrix_from_row_major, BoundLineSet, BoundPolygons, BoundPolylist, BoundTriangleSet,
    ResolvedMaterial,
};
pub use decl::{PolygonDecl, PrimitiveDecl, PrimitiveKind};
pub use line_set::LineSet;
pub use polygons::Polygons;
pub use polylist::Polylist;
pub use primitive::{BoundPrimitive, Primitive};
pub use shape::{Line, Polygon, ShapeMaterial, Triangle};
pub use triangle_set::TriangleSet;
