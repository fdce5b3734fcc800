//! Per-element shape views.
//!
//! Shapes are plain records gathered on demand from a primitive's streams. They own their data
//! and are never written back.

use std::sync::Arc;

use collada_core::Material;
use glam::{Vec2, Vec3};

use crate::attributes::VertexStreams;

/// The material a shape is drawn with: the raw symbol for unbound primitives, the resolved
/// material once bound.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeMaterial {
    Symbol(String),
    Bound(Arc<Material>),
}

/// A line segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Position indices of the endpoints.
    pub indices: [u32; 2],
    pub vertices: [Vec3; 2],
    pub normals: Option<[Vec3; 2]>,
    /// One pair per texcoord stream.
    pub texcoords: Vec<[Vec2; 2]>,
    pub material: Option<ShapeMaterial>,
}

/// A triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    /// Position indices of the corners.
    pub indices: [u32; 3],
    pub vertices: [Vec3; 3],
    pub normals: Option<[Vec3; 3]>,
    /// One triple per texcoord stream.
    pub texcoords: Vec<[Vec2; 3]>,
    pub material: Option<ShapeMaterial>,
}

impl Triangle {
    /// Flat face normal, `normalize(cross(normalize(v2 - v0), normalize(v1 - v0)))`.
    pub fn face_normal(&self) -> Vec3 {
        let [v0, v1, v2] = self.vertices;
        (v2 - v0)
            .normalize()
            .cross((v1 - v0).normalize())
            .normalize()
    }
}

/// A polygon of any arity.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub indices: Vec<u32>,
    pub vertices: Vec<Vec3>,
    pub normals: Option<Vec<Vec3>>,
    /// One ring per texcoord stream.
    pub texcoords: Vec<Vec<Vec2>>,
    pub material: Option<ShapeMaterial>,
}

impl Polygon {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Fan triangulation around the first vertex: `(0, i, i + 1)` for `i = 1..n - 1`.
    ///
    /// Normals and texcoords are carried through as they are; nothing is synthesized.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (1..self.len().saturating_sub(1)).map(move |i| {
            let pick = [0, i, i + 1];
            Triangle {
                indices: pick.map(|k| self.indices[k]),
                vertices: pick.map(|k| self.vertices[k]),
                normals: self.normals.as_ref().map(|n| pick.map(|k| n[k])),
                texcoords: self
                    .texcoords
                    .iter()
                    .map(|ring| pick.map(|k| ring[k]))
                    .collect(),
                material: self.material.clone(),
            }
        })
    }
}

fn corner_indices<const N: usize>(streams: &VertexStreams, corners: [usize; N]) -> [u32; N] {
    corners.map(|c| streams.vertex.index[c])
}

pub(crate) fn line(
    streams: &VertexStreams,
    corners: [usize; 2],
    material: Option<ShapeMaterial>,
) -> Line {
    Line {
        indices: corner_indices(streams, corners),
        vertices: corners.map(|c| streams.vertex_at(c)),
        normals: streams.normal.as_ref().map(|n| corners.map(|c| n.vec3_at(c))),
        texcoords: streams
            .texcoords
            .iter()
            .map(|t| corners.map(|c| t.vec2_at(c)))
            .collect(),
        material,
    }
}

/// Builds a triangle. Without a normal stream every corner gets the flat face normal.
pub(crate) fn triangle(
    streams: &VertexStreams,
    corners: [usize; 3],
    material: Option<ShapeMaterial>,
) -> Triangle {
    let mut triangle = Triangle {
        indices: corner_indices(streams, corners),
        vertices: corners.map(|c| streams.vertex_at(c)),
        normals: streams.normal.as_ref().map(|n| corners.map(|c| n.vec3_at(c))),
        texcoords: streams
            .texcoords
            .iter()
            .map(|t| corners.map(|c| t.vec2_at(c)))
            .collect(),
        material,
    };
    if triangle.normals.is_none() {
        triangle.normals = Some([triangle.face_normal(); 3]);
    }
    triangle
}

pub(crate) fn polygon(
    streams: &VertexStreams,
    corners: std::ops::Range<usize>,
    material: Option<ShapeMaterial>,
) -> Polygon {
    Polygon {
        indices: corners.clone().map(|c| streams.vertex.index[c]).collect(),
        vertices: corners.clone().map(|c| streams.vertex_at(c)).collect(),
        normals: streams
            .normal
            .as_ref()
            .map(|n| corners.clone().map(|c| n.vec3_at(c)).collect()),
        texcoords: streams
            .texcoords
            .iter()
            .map(|t| corners.clone().map(|c| t.vec2_at(c)).collect())
            .collect(),
        material,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon {
            indices: vec![0, 1, 2, 3],
            vertices: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            normals: None,
            texcoords: vec![vec![Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y]],
            material: Some(ShapeMaterial::Symbol("mat".into())),
        }
    }

    /// Test polygon fan triangulation pivots on the first vertex.
    #[test]
    fn test_polygon_triangles() {
        let tris: Vec<Triangle> = square().triangles().collect();
        assert_eq!(tris.len(), 2);
        assert_eq!(tris[0].indices, [0, 1, 2]);
        assert_eq!(tris[1].indices, [0, 2, 3]);
        assert_eq!(tris[1].texcoords[0], [Vec2::ZERO, Vec2::ONE, Vec2::Y]);
        assert!(tris[0].normals.is_none());
        assert_eq!(tris[0].material, Some(ShapeMaterial::Symbol("mat".into())));
    }

    /// Test degenerate polygons yield no triangles.
    #[test]
    fn test_small_polygon() {
        let mut poly = square();
        poly.vertices.truncate(2);
        poly.indices.truncate(2);
        assert_eq!(poly.triangles().count(), 0);
        poly.vertices.clear();
        assert!(poly.is_empty());
        assert_eq!(poly.triangles().count(), 0);
    }

    /// Test face normal orientation.
    #[test]
    fn test_face_normal() {
        let tri = Triangle {
            indices: [0, 1, 2],
            vertices: [Vec3::ZERO, Vec3::X, Vec3::Y],
            normals: None,
            texcoords: Vec::new(),
            material: None,
        };
        // cross(v2 - v0, v1 - v0) = cross(Y, X) = -Z
        assert_eq!(tri.face_normal(), Vec3::NEG_Z);
    }
}
