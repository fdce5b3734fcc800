//! collada-rs: a Rust-native document model for COLLADA mesh geometry.
//!
//! Geometry is described by typed source arrays and primitives whose inputs index into them
//! through one flat, interleaved index buffer. This crate turns those records into primitives
//! with validated attribute streams, exposes them as shapes, and binds them into world space
//! with a material assignment.
//!
//! # Quick Start
//!
//! ```
//! use collada::*;
//!
//! fn main() -> Result<()> {
//!     let json = r##"{
//!         "id": "tri",
//!         "sources": [{
//!             "id": "pos",
//!             "kind": "float",
//!             "array": "0 0 0  1 0 0  0 1 0",
//!             "components": ["X", "Y", "Z"]
//!         }],
//!         "vertices": { "id": "verts", "inputs": [{ "semantic": "POSITION", "source": "#pos" }] },
//!         "primitives": [{
//!             "kind": "triangles",
//!             "count": 1,
//!             "inputs": [{ "offset": 0, "semantic": "VERTEX", "source": "#verts" }],
//!             "p": "0 1 2"
//!         }]
//!     }"##;
//!
//!     let (geometry, warnings) = load_geometry_json(json, &LoadOptions::default())?;
//!     assert!(warnings.is_empty());
//!
//!     let bound = geometry.bind(&Mat4::from_translation(Vec3::Z), &MaterialMap::new());
//!     let triangle = bound.primitives()[0].triangleset().unwrap().shape(0).unwrap();
//!     assert_eq!(triangle.vertices[1], Vec3::new(1.0, 0.0, 1.0));
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`collada_core`]: sources, semantics, input resolution, materials, errors and options
//! - [`collada_mesh`]: line sets, triangle sets, polylists and polygons with their bound forms
//! - this crate: [`Geometry`] and its JSON records

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod decl;
pub mod geometry;

pub use collada_core;
pub use collada_mesh;

// Re-export core types
pub use collada_core::{
    ColladaError, ErrorCollector, ErrorKind, InputDecl, InputList, LoadOptions, Mat4, Material,
    MaterialBinding, MaterialMap, Result, Semantic, Source, SourceDecl, SourceKind, Vec2, Vec3,
    Vec4, VertexInputBinding,
};

// Re-export mesh types
pub use collada_mesh::{
    matrix_from_row_major, BoundLineSet, BoundPolygons, BoundPolylist, BoundPrimitive,
    BoundTriangleSet, Line, LineSet, Polygon, PolygonDecl, Polygons, Polylist, Primitive,
    PrimitiveDecl, PrimitiveKind, ShapeMaterial, Triangle, TriangleSet, VectorArray,
};

pub use decl::{GeometryDecl, VertexPoolInput, VerticesDecl};
pub use geometry::{BoundGeometry, Geometry};

/// Installs the `env_logger` backend, configured through `RUST_LOG`.
///
/// Calling this more than once is harmless.
pub fn init_logging() {
    let _ = env_logger::try_init();
}

/// Parses a geometry record from JSON and loads it.
///
/// Returns the geometry together with the errors that were recorded instead of raised.
pub fn load_geometry_json(
    text: &str,
    options: &LoadOptions,
) -> Result<(Geometry, Vec<ColladaError>)> {
    let decl = GeometryDecl::from_json(text)?;
    let mut errors = ErrorCollector::new();
    let geometry = Geometry::load(&decl, options, &mut errors)?;
    Ok((geometry, errors.take()))
}

/// Serializes a geometry back into a JSON record.
pub fn save_geometry_json(geometry: &Geometry) -> Result<String> {
    geometry.save().to_json()
}
