//! Line segment primitives.

use std::sync::Arc;

use collada_core::{InputMap, MaterialMap, Result};
use glam::Mat4;

use crate::base::PrimitiveCore;
use crate::bound::{BoundLineSet, ResolvedMaterial};
use crate::decl::{PrimitiveDecl, PrimitiveKind};
use crate::shape::{self, Line, ShapeMaterial};

/// A `<lines>` primitive: every two index tuples form one segment.
#[derive(Debug, Clone)]
pub struct LineSet {
    core: PrimitiveCore,
}

impl LineSet {
    /// Creates a line set from resolved inputs and a flat interleaved index buffer.
    ///
    /// # Errors
    ///
    /// * [`collada_core::ColladaError::Incomplete`] without inputs or without a `VERTEX` input
    /// * [`collada_core::ColladaError::Malformed`] if the buffer is not a whole number of lines
    ///   or an index is out of range
    pub fn new(
        inputs: InputMap,
        index: impl Into<Arc<[u32]>>,
        material: Option<String>,
    ) -> Result<Self> {
        let core = PrimitiveCore::new(inputs, index.into(), material, 2)?;
        log::debug!("built line set with {} lines", core.corners() / 2);
        Ok(Self { core })
    }

    pub fn core(&self) -> &PrimitiveCore {
        &self.core
    }

    pub fn material(&self) -> Option<&str> {
        self.core.material()
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.core.corners() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `i`-th line.
    pub fn shape(&self, i: usize) -> Option<Line> {
        (i < self.len()).then(|| {
            let material = self.core.material().map(|m| ShapeMaterial::Symbol(m.into()));
            shape::line(self.core.streams(), [2 * i, 2 * i + 1], material)
        })
    }

    pub fn shapes(&self) -> impl Iterator<Item = Line> + '_ {
        (0..self.len()).filter_map(|i| self.shape(i))
    }

    /// Applies a world transform and resolves the material symbol.
    pub fn bind(&self, matrix: &Mat4, materials: &MaterialMap) -> BoundLineSet {
        BoundLineSet::new(
            self.core.transformed(matrix),
            ResolvedMaterial::resolve(self.material(), materials),
        )
    }

    pub fn to_decl(&self) -> PrimitiveDecl {
        let inputs = self.core.inputs().decls().to_vec();
        let mut decl = PrimitiveDecl::new(PrimitiveKind::Lines, inputs);
        decl.material = self.core.material().map(String::from);
        decl.count = Some(self.len());
        decl.p = Some(self.core.index().to_vec());
        decl
    }
}
