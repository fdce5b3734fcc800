//! Derived data for triangle streams: smooth vertex normals and the texture tangent basis.

use std::sync::Arc;

use collada_core::{ColladaError, Result};
use glam::Vec3;

use crate::array::VectorArray;
use crate::attributes::{Stream, VertexStreams};

/// Accumulates unit face normals into per-position slots and normalizes them.
///
/// Slots that received no contribution (or cancelling ones) stay zero.
pub(crate) fn generate_normals(streams: &mut VertexStreams) {
    let vertex = &streams.vertex;
    let mut normals = vec![Vec3::ZERO; vertex.array.len()];

    for tri in vertex.index.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i as usize);
        let v0 = vertex.array.vec3(a);
        let v1 = vertex.array.vec3(b);
        let v2 = vertex.array.vec3(c);
        let face = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }

    for normal in &mut normals {
        *normal = normal.normalize_or_zero();
    }

    log::debug!("generated {} vertex normals", normals.len());
    streams.normal = Some(Stream {
        array: VectorArray::from_vec3s(&normals),
        index: Arc::clone(&vertex.index),
        set: None,
    });
}

/// Per-corner texture tangents and binormals from the first texcoord set.
///
/// Raw UV-space directions are accumulated per position like face normals, then each corner's
/// tangent is orthogonalized against that corner's normal. The binormal is
/// `cross(normal, tangent)` flipped by the handedness of the accumulated bitangent.
///
/// Triangles with a degenerate UV mapping divide by zero; the resulting non-finite values are
/// kept.
pub(crate) fn generate_tex_tangents_and_binormals(streams: &mut VertexStreams) -> Result<()> {
    let normal = streams.normal.as_ref().ok_or_else(|| {
        ColladaError::incomplete("texture tangents need normals; generate them first")
    })?;
    let uv = streams
        .texcoords
        .first()
        .ok_or_else(|| ColladaError::incomplete("texture tangents need a TEXCOORD input"))?;
    let vertex = &streams.vertex;

    let mut sdirs = vec![Vec3::ZERO; vertex.array.len()];
    let mut tdirs = vec![Vec3::ZERO; vertex.array.len()];
    for (t, tri) in vertex.index.chunks_exact(3).enumerate() {
        let corners = [3 * t, 3 * t + 1, 3 * t + 2];
        let [p0, p1, p2] = corners.map(|c| vertex.vec3_at(c));
        let [w0, w1, w2] = corners.map(|c| uv.vec2_at(c));

        let edge1 = p1 - p0;
        let edge2 = p2 - p0;
        let d1 = w1 - w0;
        let d2 = w2 - w0;
        let r = 1.0 / (d1.x * d2.y - d2.x * d1.y);
        let sdir = (edge1 * d2.y - edge2 * d1.y) * r;
        let tdir = (edge2 * d1.x - edge1 * d2.x) * r;

        for &i in tri {
            sdirs[i as usize] += sdir;
            tdirs[i as usize] += tdir;
        }
    }

    let corners = vertex.len();
    let mut tangents = Vec::with_capacity(corners);
    let mut binormals = Vec::with_capacity(corners);
    for c in 0..corners {
        let position = vertex.index[c] as usize;
        let n = normal.vec3_at(c);
        let sdir = sdirs[position];

        // Gram-Schmidt
        let tangent = (sdir - n * n.dot(sdir)).normalize();
        let bitangent = n.cross(tangent);
        let handedness = if bitangent.dot(tdirs[position]) < 0.0 {
            -1.0
        } else {
            1.0
        };
        tangents.push(tangent);
        binormals.push(bitangent * handedness);
    }

    let set = uv.set;
    let sequential: Arc<[u32]> = (0u32..).take(corners).collect();
    log::debug!("generated {corners} texture tangents");
    streams.textangents = vec![Stream {
        array: VectorArray::from_vec3s(&tangents),
        index: Arc::clone(&sequential),
        set,
    }];
    streams.texbinormals = vec![Stream {
        array: VectorArray::from_vec3s(&binormals),
        index: sequential,
        set,
    }];
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::test_util::{inputs, quad_scope};
    use crate::TriangleSet;
    use collada_core::{ColladaError, InputList};
    use glam::Vec3;

    /// Two triangles sharing an edge in the z = 0 plane, wound counter-clockwise.
    fn quad(with_uv: bool) -> TriangleSet {
        let scope = quad_scope();
        let mut list = InputList::new().add_input(0, "VERTEX", "#pos", None);
        if with_uv {
            list = list.add_input(0, "TEXCOORD", "#uv", Some(0));
        }
        TriangleSet::new(inputs(&scope, &list), vec![0, 1, 2, 0, 2, 3], None).unwrap()
    }

    /// Test generated normals are unit, per position and indexed like vertices.
    #[test]
    fn test_generate_normals() {
        let mut tris = quad(false);
        tris.generate_normals();
        let streams = tris.core().streams();
        let normal = streams.normal.as_ref().unwrap();

        assert_eq!(normal.array.len(), streams.vertex.array.len());
        assert_eq!(normal.index, streams.vertex.index);
        for row in 0..normal.array.len() {
            assert!((normal.array.vec3(row) - Vec3::Z).length() < 1e-6);
        }
        let shape = tris.shape(1).unwrap();
        assert_eq!(shape.normals, Some([Vec3::Z; 3]));
    }

    /// Test unreferenced positions keep a zero normal instead of NaN.
    #[test]
    fn test_unused_position_zero_normal() {
        let scope = quad_scope();
        let list = InputList::new().add_input(0, "VERTEX", "#pos", None);
        let mut tris = TriangleSet::new(inputs(&scope, &list), vec![0, 1, 2], None).unwrap();
        tris.generate_normals();
        let normal = tris.core().streams().normal.as_ref().unwrap();
        assert_eq!(normal.array.vec3(3), Vec3::ZERO);
    }

    /// Test the tangent basis of a planar quad with an axis-aligned UV map.
    #[test]
    fn test_tangents_and_binormals() {
        let mut tris = quad(true);
        tris.generate_normals();
        tris.generate_tex_tangents_and_binormals().unwrap();
        let streams = tris.core().streams();

        let tangents = &streams.textangents[0];
        let binormals = &streams.texbinormals[0];
        assert_eq!(&*tangents.index, &[0, 1, 2, 3, 4, 5]);
        assert_eq!(tangents.set, Some(0));
        for c in 0..6 {
            assert!((tangents.vec3_at(c) - Vec3::X).length() < 1e-5);
            assert!((binormals.vec3_at(c) - Vec3::Y).length() < 1e-5);
        }
    }

    /// Test mirrored UVs flip the tangent while the binormal keeps following V.
    #[test]
    fn test_mirrored_handedness() {
        let scope = quad_scope();
        let list = InputList::new()
            .add_input(0, "VERTEX", "#pos", None)
            .add_input(0, "TEXCOORD", "#uv_mirrored", None);
        let mut tris =
            TriangleSet::new(inputs(&scope, &list), vec![0, 1, 2, 0, 2, 3], None).unwrap();
        tris.generate_normals();
        tris.generate_tex_tangents_and_binormals().unwrap();
        let streams = tris.core().streams();
        let tangent = streams.textangents[0].vec3_at(0);
        let binormal = streams.texbinormals[0].vec3_at(0);
        assert!((tangent - Vec3::NEG_X).length() < 1e-5);
        // cross(n, t) points down -Y, so the handedness sign is negative.
        assert!((binormal - Vec3::Y).length() < 1e-5);
    }

    /// Test tangent generation prerequisites.
    #[test]
    fn test_tangents_need_normals_and_uvs() {
        let mut tris = quad(true);
        assert!(matches!(
            tris.generate_tex_tangents_and_binormals(),
            Err(ColladaError::Incomplete(_))
        ));
        let mut tris = quad(false);
        tris.generate_normals();
        assert!(matches!(
            tris.generate_tex_tangents_and_binormals(),
            Err(ColladaError::Incomplete(_))
        ));
    }

    /// Test degenerate UV triangles do not panic.
    #[test]
    fn test_degenerate_uv() {
        let scope = quad_scope();
        let list = InputList::new()
            .add_input(0, "VERTEX", "#pos", None)
            .add_input(0, "TEXCOORD", "#uv_flat", None);
        let mut tris = TriangleSet::new(inputs(&scope, &list), vec![0, 1, 2], None).unwrap();
        tris.generate_normals();
        tris.generate_tex_tangents_and_binormals().unwrap();
        let tangent = tris.core().streams().textangents[0].vec3_at(0);
        assert!(!tangent.is_finite());
    }
}
