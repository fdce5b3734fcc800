//! State shared by every primitive kind.

use std::sync::Arc;

use collada_core::{ColladaError, InputMap, Result, Semantic};
use glam::Mat4;

use crate::attributes::VertexStreams;

/// Inputs, raw index buffer and decoded streams of a primitive.
#[derive(Debug, Clone)]
pub struct PrimitiveCore {
    inputs: InputMap,
    material: Option<String>,
    index: Arc<[u32]>,
    nindices: usize,
    streams: VertexStreams,
}

impl PrimitiveCore {
    /// Validates and decodes a primitive.
    ///
    /// `group` is the number of index tuples per shape (2 for lines, 3 for triangles, 1 for
    /// polygon primitives); the buffer must hold a whole number of shapes.
    pub fn new(
        inputs: InputMap,
        index: Arc<[u32]>,
        material: Option<String>,
        group: usize,
    ) -> Result<Self> {
        if inputs.is_empty() {
            return Err(ColladaError::incomplete("primitive has no inputs"));
        }
        if inputs.first(&Semantic::Vertex).is_none() {
            return Err(ColladaError::incomplete("primitive has no VERTEX input"));
        }
        let nindices = inputs.nindices();
        let block = nindices.checked_mul(group).ok_or_else(|| {
            let offset = inputs.max_offset().unwrap_or_default();
            ColladaError::malformed(format!("input offset {offset} is out of range"))
        })?;
        if index.len() % block != 0 {
            return Err(ColladaError::malformed(format!(
                "index buffer of {} values is not a multiple of {block} ({nindices} per vertex)",
                index.len()
            )));
        }
        let streams = VertexStreams::decode(&inputs, &index, nindices)?;
        Ok(Self {
            inputs,
            material,
            index,
            nindices,
            streams,
        })
    }

    pub fn inputs(&self) -> &InputMap {
        &self.inputs
    }

    /// The unresolved material symbol.
    pub fn material(&self) -> Option<&str> {
        self.material.as_deref()
    }

    /// The raw interleaved index buffer.
    pub fn index(&self) -> &Arc<[u32]> {
        &self.index
    }

    /// Number of interleaved index columns per vertex tuple.
    pub fn nindices(&self) -> usize {
        self.nindices
    }

    pub fn streams(&self) -> &VertexStreams {
        &self.streams
    }

    pub(crate) fn streams_mut(&mut self) -> &mut VertexStreams {
        &mut self.streams
    }

    /// Number of vertex tuples.
    pub fn corners(&self) -> usize {
        self.streams.corners()
    }

    /// The raw index tuple of one corner.
    pub fn tuple(&self, corner: usize) -> &[u32] {
        &self.index[corner * self.nindices..(corner + 1) * self.nindices]
    }

    /// A core holding only `corners`, in order. Nothing is revalidated: the result indexes the
    /// same arrays with a subset of already checked indices.
    pub(crate) fn gather(&self, corners: &[usize]) -> Self {
        let index: Arc<[u32]> = corners
            .iter()
            .flat_map(|&c| self.tuple(c).iter().copied())
            .collect();
        Self {
            inputs: self.inputs.clone(),
            material: self.material.clone(),
            index,
            nindices: self.nindices,
            streams: self.streams.gather(corners),
        }
    }

    /// A copy with transformed positions and normals.
    pub(crate) fn transformed(&self, matrix: &Mat4) -> Self {
        Self {
            streams: self.streams.transformed(matrix),
            ..self.clone()
        }
    }
}
