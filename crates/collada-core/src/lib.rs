//! Core abstractions for collada-rs.
//!
//! This crate provides the building blocks that the mesh primitives are decoded from:
//! - [`Source`] typed arrays and their text form
//! - [`Semantic`]s and [`resolve_inputs`], which groups a primitive's inputs by semantic
//! - [`Material`] bindings applied at bind time
//! - Error types, the [`ErrorCollector`] and [`LoadOptions`]

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod input;
pub mod material;
pub mod options;
pub mod semantic;
pub mod source;
pub mod text;

pub use error::{ColladaError, ErrorCollector, ErrorKind, Result};
pub use input::{
    parse_ref, resolve_inputs, Input, InputDecl, InputList, InputMap, Scope, ScopeEntry,
    VertexBundle,
};
pub use material::{Material, MaterialBinding, MaterialMap, VertexInputBinding};
pub use options::LoadOptions;
pub use semantic::Semantic;
pub use source::{Source, SourceData, SourceDecl, SourceKind};

// Re-export glam types for convenience
pub use glam::{Mat4, Vec2, Vec3, Vec4};
