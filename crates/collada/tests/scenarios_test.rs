//! End-to-end primitive scenarios built through the `Geometry` API.

use std::sync::Arc;

use collada::*;

fn float_source(id: &str, values: Vec<f32>, components: &[&str]) -> Source {
    Source::new_float(id, values, components.iter().copied()).expect("valid source")
}

fn flatten(points: &[Vec3]) -> Vec<f32> {
    points.iter().flat_map(|p| p.to_array()).collect()
}

/// Line set over a zig-zag of six positions.
#[test]
fn test_line_set_scenario() {
    let positions: Vec<Vec3> = (0..6)
        .map(|i| Vec3::new(i as f32, (i % 2) as f32, 0.0))
        .collect();
    let geometry = Geometry::new(
        "lines",
        None,
        vec![float_source("pos", flatten(&positions), &["X", "Y", "Z"])],
        Some(VerticesDecl::new("verts").with_input("POSITION", "#pos")),
    )
    .expect("geometry");

    let inputs = InputList::new().add_input(0, "VERTEX", "#verts", None);
    let lines = geometry
        .create_line_set(
            vec![0, 1, 1, 2, 2, 3, 3, 4, 4, 5],
            &inputs,
            None,
            &mut ErrorCollector::new(),
        )
        .expect("line set");

    assert_eq!(lines.len(), 5);
    let first = lines.shape(0).expect("first line");
    assert_eq!(first.vertices, [positions[0], positions[1]]);
    assert_eq!(first.indices, [0, 1]);
    let last = lines.shape(4).expect("last line");
    assert_eq!(last.vertices, [positions[4], positions[5]]);
    assert!(lines.shape(5).is_none());
}

fn cube_geometry() -> (Geometry, Vec<Vec3>, [[u32; 4]; 6]) {
    let positions: Vec<Vec3> = (0..8)
        .map(|i| {
            let x = if matches!(i % 4, 1 | 2) { 1.0 } else { -1.0 };
            let y = if matches!(i % 4, 2 | 3) { 1.0 } else { -1.0 };
            let z = if i >= 4 { 1.0 } else { -1.0 };
            Vec3::new(x, y, z)
        })
        .collect();
    let faces = [
        [0, 3, 2, 1],
        [4, 5, 6, 7],
        [0, 1, 5, 4],
        [2, 3, 7, 6],
        [1, 2, 6, 5],
        [0, 4, 7, 3],
    ];
    let face_normals = [
        Vec3::NEG_Z,
        Vec3::Z,
        Vec3::NEG_Y,
        Vec3::Y,
        Vec3::X,
        Vec3::NEG_X,
    ];
    let normals: Vec<Vec3> = face_normals.iter().flat_map(|n| [*n; 4]).collect();

    let geometry = Geometry::new(
        "cube",
        Some("Cube".into()),
        vec![
            float_source("pos", flatten(&positions), &["X", "Y", "Z"]),
            float_source("nrm", flatten(&normals), &["X", "Y", "Z"]),
        ],
        Some(VerticesDecl::new("verts").with_input("POSITION", "#pos")),
    )
    .expect("geometry");
    (geometry, positions, faces)
}

fn cube_polylist(geometry: &Geometry, faces: &[[u32; 4]; 6]) -> Polylist {
    let mut index = Vec::new();
    let mut corner = 0u32;
    for face in faces {
        for &v in face {
            index.extend([v, corner]);
            corner += 1;
        }
    }
    let inputs = InputList::new()
        .add_input(0, "VERTEX", "#verts", None)
        .add_input(1, "NORMAL", "#nrm", None);
    geometry
        .create_polylist(
            index,
            vec![4; 6],
            &inputs,
            Some("cube-mat"),
            &mut ErrorCollector::new(),
        )
        .expect("polylist")
}

/// Cube of six quads triangulates into twelve triangles.
#[test]
fn test_cube_scenario() {
    let (geometry, positions, faces) = cube_geometry();
    let polylist = cube_polylist(&geometry, &faces);

    assert_eq!(polylist.len(), 6);
    let tris = polylist.triangleset();
    assert_eq!(tris.len(), 12);

    let first = tris.shape(0).expect("first triangle");
    let face0 = faces[0];
    assert_eq!(
        first.vertices,
        [
            positions[face0[0] as usize],
            positions[face0[1] as usize],
            positions[face0[2] as usize],
        ]
    );
    assert_eq!(first.normals, Some([Vec3::NEG_Z; 3]));

    // Second fan triangle of the last face.
    let last = tris.shape(11).expect("last triangle");
    assert_eq!(last.indices, [faces[5][0], faces[5][2], faces[5][3]]);
    assert_eq!(last.normals, Some([Vec3::NEG_X; 3]));

    // The cached view is the same instance on every call.
    assert!(std::ptr::eq(polylist.triangleset(), tris));
}

/// Triangles without normals report the flat face normal at each corner.
#[test]
fn test_missing_normals_scenario() {
    let geometry = Geometry::new(
        "tris",
        None,
        vec![float_source(
            "pos",
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
            &["X", "Y", "Z"],
        )],
        None,
    )
    .expect("geometry");
    let inputs = InputList::new().add_input(0, "VERTEX", "#pos", None);
    let tris = geometry
        .create_triangle_set(
            vec![0, 1, 2, 0, 2, 3, 1, 3, 2],
            &inputs,
            None,
            &mut ErrorCollector::new(),
        )
        .expect("triangle set");

    for tri in tris.shapes() {
        let n = tri.face_normal();
        assert_eq!(tri.normals, Some([n; 3]));
        assert!((n.length() - 1.0).abs() < 1e-5);
    }
    // Counter-clockwise in the XY plane.
    let first = tris.shape(0).expect("first triangle");
    assert!((first.face_normal() - Vec3::NEG_Z).length() < 1e-6);
}

/// Identity binding keeps the data; translation moves positions only.
#[test]
fn test_bind_scenario() {
    let (mut geometry, _, faces) = cube_geometry();
    geometry.push_primitive(cube_polylist(&geometry, &faces));

    let identity = geometry.bind(&Mat4::IDENTITY, &MaterialMap::new());
    let offset = Vec3::new(2.0, -3.0, 0.5);
    let moved = geometry.bind(&Mat4::from_translation(offset), &MaterialMap::new());

    let original: Vec<Polygon> = match &geometry.primitives()[0] {
        Primitive::Polylist(p) => p.shapes().collect(),
        other => panic!("unexpected primitive {:?}", other.kind()),
    };
    let (BoundPrimitive::Polylist(same), BoundPrimitive::Polylist(shifted)) =
        (&identity.primitives()[0], &moved.primitives()[0])
    else {
        panic!("expected bound polylists");
    };

    for (i, polygon) in original.iter().enumerate() {
        let a = same.shape(i).expect("identity shape");
        let b = shifted.shape(i).expect("translated shape");
        assert_eq!(a.vertices, polygon.vertices);
        assert_eq!(a.normals, polygon.normals);
        assert_eq!(b.normals, polygon.normals);
        for (v, w) in polygon.vertices.iter().zip(&b.vertices) {
            assert!((*w - (*v + offset)).length() < 1e-6);
        }
    }

    assert_eq!(moved.id(), "cube");
    assert_eq!(*moved.matrix(), Mat4::from_translation(offset));
}

/// A symbol missing from the material map binds to no material.
#[test]
fn test_missing_material_scenario() {
    let (geometry, _, faces) = cube_geometry();
    let polylist = cube_polylist(&geometry, &faces);

    let bound = polylist.bind(&Mat4::IDENTITY, &MaterialMap::new());
    assert!(bound.material().is_none());
    assert!(bound.input_map().is_empty());
    assert!(bound
        .shapes()
        .all(|p| p.material.is_none() && p.vertices.len() == 4));

    let steel = Arc::new(Material::new("steel").with_name("Steel"));
    let materials = MaterialMap::new().with(MaterialBinding::new("cube-mat", Arc::clone(&steel)));
    let bound = polylist.bind(&Mat4::IDENTITY, &materials);
    assert_eq!(bound.material().map(|m| m.id.as_str()), Some("steel"));
    let tri = bound.triangleset().shape(0).expect("bound triangle");
    assert_eq!(tri.material, Some(ShapeMaterial::Bound(steel)));
}

/// Smooth normals and tangent frames on a textured quad.
#[test]
fn test_generated_attributes() {
    let geometry = Geometry::new(
        "quad",
        None,
        vec![
            float_source(
                "pos",
                vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0],
                &["X", "Y", "Z"],
            ),
            float_source("uv", vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0], &["U", "V"]),
        ],
        Some(VerticesDecl::new("verts").with_input("POSITION", "#pos")),
    )
    .expect("geometry");
    let inputs = InputList::new()
        .add_input(0, "VERTEX", "#verts", None)
        .add_input(1, "TEXCOORD", "#uv", Some(0));
    let mut tris = geometry
        .create_triangle_set(
            vec![0, 0, 1, 1, 2, 2, 0, 0, 2, 2, 3, 3],
            &inputs,
            Some("m"),
            &mut ErrorCollector::new(),
        )
        .expect("triangle set");

    let err = tris
        .generate_tex_tangents_and_binormals()
        .expect_err("tangents need normals");
    assert_eq!(err.kind(), ErrorKind::Incomplete);

    tris.generate_normals();
    for tri in tris.shapes() {
        for n in tri.normals.expect("generated normals") {
            assert!((n - Vec3::Z).length() < 1e-6);
        }
    }

    tris.generate_tex_tangents_and_binormals()
        .expect("tangent frames");
    let streams = tris.core().streams();
    assert_eq!(streams.textangents.len(), 1);
    assert_eq!(streams.texbinormals.len(), 1);
    for corner in 0..streams.corners() {
        assert!((streams.textangents[0].vec3_at(corner) - Vec3::X).length() < 1e-5);
        assert!((streams.texbinormals[0].vec3_at(corner) - Vec3::Y).length() < 1e-5);
    }

    let materials = MaterialMap::new().with(
        MaterialBinding::new("m", Arc::new(Material::new("mat")))
            .with_input("UVSET0", Semantic::Texcoord, Some(0)),
    );
    let bound = tris.bind(&Mat4::IDENTITY, &materials);
    assert_eq!(bound.texcoord_set_for("UVSET0"), Some(0));
    assert_eq!(bound.texcoord_set_for("UVSET1"), None);
}
