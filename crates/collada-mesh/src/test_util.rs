//! Fixtures shared by unit tests.

use std::sync::Arc;

use collada_core::{resolve_inputs, ErrorCollector, InputList, InputMap, Scope, Source};
use glam::Vec3;

use crate::polylist::Polylist;

pub fn inputs(scope: &Scope, list: &InputList) -> InputMap {
    resolve_inputs(scope, list.inputs(), &mut ErrorCollector::new()).unwrap()
}

fn float_source(id: &str, values: &[f32], components: &[&str]) -> Arc<Source> {
    Arc::new(Source::new_float(id, values.to_vec(), components.iter().copied()).unwrap())
}

/// `n` positions `(i % 2, i / 2, 0)` under id `pos`.
pub fn positions_scope(n: usize) -> Scope {
    let values: Vec<f32> = (0..n)
        .flat_map(|i| [(i % 2) as f32, (i / 2) as f32, 0.0])
        .collect();
    let mut scope = Scope::new();
    scope.insert_source(float_source("pos", &values, &["X", "Y", "Z"]));
    scope
}

/// A unit square in z = 0 with `uv`, `uv_mirrored` (U flipped) and `uv_flat` (all zero) maps.
pub fn quad_scope() -> Scope {
    let mut scope = Scope::new();
    scope.insert_source(float_source(
        "pos",
        &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0],
        &["X", "Y", "Z"],
    ));
    scope.insert_source(float_source(
        "uv",
        &[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0],
        &["S", "T"],
    ));
    scope.insert_source(float_source(
        "uv_mirrored",
        &[1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        &["S", "T"],
    ));
    scope.insert_source(float_source("uv_flat", &[0.0; 8], &["S", "T"]));
    scope
}

const CUBE_FACES: [[u32; 4]; 6] = [
    [0, 3, 2, 1],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [2, 3, 7, 6],
    [1, 2, 6, 5],
    [0, 4, 7, 3],
];

const CUBE_NORMALS: [Vec3; 6] = [
    Vec3::NEG_Z,
    Vec3::Z,
    Vec3::NEG_Y,
    Vec3::Y,
    Vec3::X,
    Vec3::NEG_X,
];

/// Eight corners, one normal per face corner, six quads.
pub fn cube_polylist() -> Polylist {
    let positions: Vec<f32> = (0..8)
        .flat_map(|i| {
            // 0..4 is the z = -1 ring, 4..8 the z = 1 ring, both counter-clockwise around +Z.
            let x = if matches!(i % 4, 1 | 2) { 1.0 } else { -1.0 };
            let y = if matches!(i % 4, 2 | 3) { 1.0 } else { -1.0 };
            let z = if i >= 4 { 1.0 } else { -1.0 };
            [x, y, z]
        })
        .collect();
    let normals: Vec<f32> = CUBE_NORMALS
        .iter()
        .flat_map(|n| std::iter::repeat(n.to_array()).take(4).flatten())
        .collect();

    let mut scope = Scope::new();
    scope.insert_source(float_source("pos", &positions, &["X", "Y", "Z"]));
    scope.insert_source(float_source("nrm", &normals, &["X", "Y", "Z"]));
    let list = InputList::new()
        .add_input(0, "VERTEX", "#pos", None)
        .add_input(1, "NORMAL", "#nrm", None);

    let index: Vec<u32> = CUBE_FACES
        .iter()
        .enumerate()
        .flat_map(|(f, face)| {
            let f = u32::try_from(f).unwrap();
            face.iter()
                .enumerate()
                .flat_map(move |(k, &v)| [v, 4 * f + u32::try_from(k).unwrap()])
        })
        .collect();
    Polylist::new(inputs(&scope, &list), index, vec![4; 6], Some("cube".into())).unwrap()
}
