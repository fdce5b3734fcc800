//! Dereferenced attribute arrays.

use std::sync::Arc;

use collada_core::Source;
use glam::{Vec2, Vec3, Vec4};

/// Row storage behind an attribute stream.
///
/// Arrays read straight from the document share the [`Source`] by reference. Arrays produced
/// by binding or by normal/tangent generation own their values.
#[derive(Debug, Clone)]
pub enum VectorArray {
    Shared(Arc<Source>),
    Owned { values: Arc<[f32]>, stride: usize },
}

impl VectorArray {
    /// Wraps freshly computed 3-vectors.
    pub fn from_vec3s(values: &[Vec3]) -> Self {
        Self::Owned {
            values: bytemuck::cast_slice::<Vec3, f32>(values).into(),
            stride: 3,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            Self::Shared(source) => source.len(),
            Self::Owned { values, stride } => values.len() / stride,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stride(&self) -> usize {
        match self {
            Self::Shared(source) => source.stride(),
            Self::Owned { stride, .. } => *stride,
        }
    }

    /// The flat row-major values. Empty for name/idref sources.
    pub fn to_flat(&self) -> &[f32] {
        match self {
            Self::Shared(source) => source.floats().unwrap_or_default(),
            Self::Owned { values, .. } => values,
        }
    }

    /// Views the rows as `Vec3`s when the stride is exactly three.
    pub fn as_vec3s(&self) -> Option<&[Vec3]> {
        if self.stride() != 3 {
            return None;
        }
        bytemuck::try_cast_slice(self.to_flat()).ok()
    }

    /// The source this array reads from, if it is shared.
    pub fn source(&self) -> Option<&Arc<Source>> {
        match self {
            Self::Shared(source) => Some(source),
            Self::Owned { .. } => None,
        }
    }

    pub fn vec2(&self, row: usize) -> Vec2 {
        let mut out = [0.0; 2];
        self.read_into(row, &mut out);
        Vec2::from_array(out)
    }

    pub fn vec3(&self, row: usize) -> Vec3 {
        let mut out = [0.0; 3];
        self.read_into(row, &mut out);
        Vec3::from_array(out)
    }

    /// Rows narrower than four get `w = 1`.
    pub fn vec4(&self, row: usize) -> Vec4 {
        let mut out = [0.0, 0.0, 0.0, 1.0];
        self.read_into(row, &mut out);
        Vec4::from_array(out)
    }

    /// Applies `f` to every row read as a `Vec3`, producing an owned array.
    pub fn map_vec3(&self, f: impl Fn(Vec3) -> Vec3) -> Self {
        let mapped: Vec<Vec3> = (0..self.len()).map(|row| f(self.vec3(row))).collect();
        Self::from_vec3s(&mapped)
    }

    fn read_into(&self, row: usize, out: &mut [f32]) {
        let stride = self.stride();
        let n = stride.min(out.len());
        let Some(end) = row.checked_mul(stride).and_then(|start| start.checked_add(n)) else {
            return;
        };
        if let Some(values) = self.to_flat().get(end - n..end) {
            out[..n].copy_from_slice(values);
        }
    }
}
