//! Triangle primitives.

mod geometry;

pub(crate) use geometry::{generate_normals, generate_tex_tangents_and_binormals};

use std::sync::Arc;

use collada_core::{InputMap, MaterialMap, Result};
use glam::Mat4;

use crate::base::PrimitiveCore;
use crate::bound::{BoundTriangleSet, ResolvedMaterial};
use crate::decl::{PrimitiveDecl, PrimitiveKind};
use crate::shape::{self, ShapeMaterial, Triangle};

/// A `<triangles>` primitive: every three index tuples form one triangle.
#[derive(Debug, Clone)]
pub struct TriangleSet {
    core: PrimitiveCore,
}

impl TriangleSet {
    /// Creates a triangle set from resolved inputs and a flat interleaved index buffer.
    ///
    /// # Errors
    ///
    /// * [`collada_core::ColladaError::Incomplete`] without inputs or without a `VERTEX` input
    /// * [`collada_core::ColladaError::Malformed`] if the buffer is not a whole number of
    ///   triangles or an index is out of range
    pub fn new(
        inputs: InputMap,
        index: impl Into<Arc<[u32]>>,
        material: Option<String>,
    ) -> Result<Self> {
        let core = PrimitiveCore::new(inputs, index.into(), material, 3)?;
        log::debug!("built triangle set with {} triangles", core.corners() / 3);
        Ok(Self { core })
    }

    /// Wraps an already validated core whose corner count is a multiple of three.
    pub(crate) fn from_core(core: PrimitiveCore) -> Self {
        Self { core }
    }

    pub fn core(&self) -> &PrimitiveCore {
        &self.core
    }

    pub fn material(&self) -> Option<&str> {
        self.core.material()
    }

    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.core.corners() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `i`-th triangle.
    ///
    /// Without a normal stream every corner carries the flat face normal of the triangle.
    /// Nothing is stored back.
    pub fn shape(&self, i: usize) -> Option<Triangle> {
        (i < self.len()).then(|| {
            let material = self.core.material().map(|m| ShapeMaterial::Symbol(m.into()));
            shape::triangle(self.core.streams(), [3 * i, 3 * i + 1, 3 * i + 2], material)
        })
    }

    pub fn shapes(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.len()).filter_map(|i| self.shape(i))
    }

    /// Replaces the normal stream with smooth per-position normals.
    ///
    /// Afterwards the normal index equals the vertex index.
    pub fn generate_normals(&mut self) {
        generate_normals(self.core.streams_mut());
    }

    /// Computes one texture tangent and one texture binormal per corner from the first
    /// texcoord set.
    ///
    /// # Errors
    ///
    /// [`collada_core::ColladaError::Incomplete`] if there are no normals or no texcoords.
    pub fn generate_tex_tangents_and_binormals(&mut self) -> Result<()> {
        generate_tex_tangents_and_binormals(self.core.streams_mut())
    }

    /// Applies a world transform and resolves the material symbol.
    pub fn bind(&self, matrix: &Mat4, materials: &MaterialMap) -> BoundTriangleSet {
        BoundTriangleSet::new(
            self.core.transformed(matrix),
            ResolvedMaterial::resolve(self.material(), materials),
        )
    }

    pub fn to_decl(&self) -> PrimitiveDecl {
        let inputs = self.core.inputs().decls().to_vec();
        let mut decl = PrimitiveDecl::new(PrimitiveKind::Triangles, inputs);
        decl.material = self.core.material().map(String::from);
        decl.count = Some(self.len());
        decl.p = Some(self.core.index().to_vec());
        decl
    }
}
