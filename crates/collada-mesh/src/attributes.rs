//! Per-semantic attribute streams decoded from an interleaved index buffer.

use std::sync::Arc;

use collada_core::{ColladaError, Input, InputMap, Result, Semantic};
use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::array::VectorArray;

/// One dereferenced attribute: its row array plus one index per corner.
#[derive(Debug, Clone)]
pub struct Stream {
    pub array: VectorArray,
    /// Row of `array` used by each corner, in corner order.
    pub index: Arc<[u32]>,
    pub set: Option<u32>,
}

impl Stream {
    /// Decodes the index column of `input` from the raw buffer and bounds-checks it.
    fn decode(input: &Input, raw: &[u32], nindices: usize) -> Result<Self> {
        let index: Arc<[u32]> = raw
            .iter()
            .skip(input.offset)
            .step_by(nindices)
            .copied()
            .collect();
        let rows = input.source.len();
        if let Some(&max) = index.iter().max() {
            if max as usize >= rows {
                return Err(ColladaError::malformed(format!(
                    "{} index {max} out of range for source '{}' with {rows} rows",
                    input.semantic, input.source_id
                )));
            }
        }
        Ok(Self {
            array: VectorArray::Shared(Arc::clone(&input.source)),
            index,
            set: input.set,
        })
    }

    /// Number of corners.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn vec2_at(&self, corner: usize) -> Vec2 {
        self.array.vec2(self.index[corner] as usize)
    }

    pub fn vec3_at(&self, corner: usize) -> Vec3 {
        self.array.vec3(self.index[corner] as usize)
    }

    pub fn vec4_at(&self, corner: usize) -> Vec4 {
        self.array.vec4(self.index[corner] as usize)
    }

    /// Keeps only the given corners, in the given order. The array is shared.
    pub(crate) fn gather(&self, corners: &[usize]) -> Self {
        Self {
            array: self.array.clone(),
            index: corners.iter().map(|&c| self.index[c]).collect(),
            set: self.set,
        }
    }
}

/// All attribute streams of a primitive.
///
/// The first input of a semantic is its canonical stream. Texcoord, texture tangent and texture
/// binormal semantics keep every input, in declaration order.
#[derive(Debug, Clone)]
pub struct VertexStreams {
    pub vertex: Stream,
    pub normal: Option<Stream>,
    pub color: Option<Stream>,
    pub tangent: Option<Stream>,
    pub binormal: Option<Stream>,
    pub texcoords: Vec<Stream>,
    pub textangents: Vec<Stream>,
    pub texbinormals: Vec<Stream>,
}

impl VertexStreams {
    /// Decodes every known semantic of `inputs` from the raw index buffer.
    pub fn decode(inputs: &InputMap, raw: &[u32], nindices: usize) -> Result<Self> {
        let first = |semantic: &Semantic| {
            inputs
                .first(semantic)
                .map(|input| Stream::decode(input, raw, nindices))
                .transpose()
        };
        let all = |semantic: &Semantic| {
            inputs
                .get(semantic)
                .iter()
                .map(|input| Stream::decode(input, raw, nindices))
                .collect::<Result<Vec<_>>>()
        };

        let vertex = first(&Semantic::Vertex)?
            .ok_or_else(|| ColladaError::incomplete("primitive has no VERTEX input"))?;
        Ok(Self {
            vertex,
            normal: first(&Semantic::Normal)?,
            color: first(&Semantic::Color)?,
            tangent: first(&Semantic::Tangent)?,
            binormal: first(&Semantic::Binormal)?,
            texcoords: all(&Semantic::Texcoord)?,
            textangents: all(&Semantic::TexTangent)?,
            texbinormals: all(&Semantic::TexBinormal)?,
        })
    }

    /// Number of corners (index tuples).
    pub fn corners(&self) -> usize {
        self.vertex.len()
    }

    pub fn vertex_at(&self, corner: usize) -> Vec3 {
        self.vertex.vec3_at(corner)
    }

    pub fn normal_at(&self, corner: usize) -> Option<Vec3> {
        self.normal.as_ref().map(|n| n.vec3_at(corner))
    }

    /// One coordinate per texcoord stream.
    pub fn texcoords_at(&self, corner: usize) -> Vec<Vec2> {
        self.texcoords.iter().map(|t| t.vec2_at(corner)).collect()
    }

    /// Restricts every stream to `corners`.
    pub(crate) fn gather(&self, corners: &[usize]) -> Self {
        let one = |s: &Option<Stream>| s.as_ref().map(|s| s.gather(corners));
        let many = |s: &[Stream]| -> Vec<Stream> { s.iter().map(|s| s.gather(corners)).collect() };
        Self {
            vertex: self.vertex.gather(corners),
            normal: one(&self.normal),
            color: one(&self.color),
            tangent: one(&self.tangent),
            binormal: one(&self.binormal),
            texcoords: many(&self.texcoords),
            textangents: many(&self.textangents),
            texbinormals: many(&self.texbinormals),
        }
    }

    /// Copies with positions transformed as points and normals as directions.
    ///
    /// Index arrays and every other stream are shared with `self`.
    pub(crate) fn transformed(&self, matrix: &Mat4) -> Self {
        let vertex = Stream {
            array: self.vertex.array.map_vec3(|v| matrix.transform_point3(v)),
            ..self.vertex.clone()
        };
        let normal = self.normal.as_ref().map(|n| Stream {
            array: n.array.map_vec3(|v| matrix.transform_vector3(v)),
            ..n.clone()
        });
        Self {
            vertex,
            normal,
            ..self.clone()
        }
    }
}
