//! Primitives bound to a world transform and a material assignment.
//!
//! Binding allocates new position and normal arrays; every index array and every other
//! attribute stream stays shared with the unbound primitive.

use std::sync::{Arc, OnceLock};

use collada_core::{Material, MaterialMap, Semantic, VertexInputBinding};
use glam::Mat4;

use crate::attributes::Stream;
use crate::base::PrimitiveCore;
use crate::polylist::{fan_corners, PolyRanges};
use crate::shape::{self, Line, Polygon, ShapeMaterial, Triangle};
use crate::triangle_set::generate_normals;

/// Builds a matrix from 16 row-major values, the order COLLADA writes `<matrix>` in.
pub fn matrix_from_row_major(values: &[f32; 16]) -> Mat4 {
    Mat4::from_cols_array(values).transpose()
}

/// The outcome of looking a material symbol up in a [`MaterialMap`].
///
/// A symbol without a binding leaves both the material and the input remap table empty.
#[derive(Debug, Clone, Default)]
pub struct ResolvedMaterial {
    pub material: Option<Arc<Material>>,
    pub inputs: Vec<VertexInputBinding>,
}

impl ResolvedMaterial {
    pub fn resolve(symbol: Option<&str>, materials: &MaterialMap) -> Self {
        let Some(binding) = symbol.and_then(|s| materials.get(s)) else {
            if let Some(symbol) = symbol {
                log::debug!("material symbol '{symbol}' has no binding");
            }
            return Self::default();
        };
        Self {
            material: Some(Arc::clone(&binding.target)),
            inputs: binding.inputs.clone(),
        }
    }

    fn shape_material(&self) -> Option<ShapeMaterial> {
        self.material.clone().map(ShapeMaterial::Bound)
    }

    /// Position in `texcoords` of the stream a shader parameter is bound to.
    ///
    /// A binding without `input_set` selects the first texcoord stream.
    pub fn texcoord_set_for(&self, param: &str, texcoords: &[Stream]) -> Option<usize> {
        let binding = self
            .inputs
            .iter()
            .find(|b| b.semantic == param && b.input_semantic == Semantic::Texcoord)?;
        match binding.input_set {
            Some(set) => texcoords.iter().position(|t| t.set == Some(set)),
            None => (!texcoords.is_empty()).then_some(0),
        }
    }
}

/// A bound [`crate::LineSet`].
#[derive(Debug, Clone)]
pub struct BoundLineSet {
    core: PrimitiveCore,
    material: ResolvedMaterial,
}

impl BoundLineSet {
    pub(crate) fn new(core: PrimitiveCore, material: ResolvedMaterial) -> Self {
        Self { core, material }
    }

    /// The transformed primitive data.
    pub fn core(&self) -> &PrimitiveCore {
        &self.core
    }

    pub fn material(&self) -> Option<&Arc<Material>> {
        self.material.material.as_ref()
    }

    pub fn input_map(&self) -> &[VertexInputBinding] {
        &self.material.inputs
    }

    pub fn texcoord_set_for(&self, param: &str) -> Option<usize> {
        self.material
            .texcoord_set_for(param, &self.core.streams().texcoords)
    }

    pub fn len(&self) -> usize {
        self.core.corners() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn shape(&self, i: usize) -> Option<Line> {
        (i < self.len()).then(|| {
            shape::line(
                self.core.streams(),
                [2 * i, 2 * i + 1],
                self.material.shape_material(),
            )
        })
    }

    pub fn shapes(&self) -> impl Iterator<Item = Line> + '_ {
        (0..self.len()).filter_map(|i| self.shape(i))
    }
}

/// A bound [`crate::TriangleSet`].
#[derive(Debug, Clone)]
pub struct BoundTriangleSet {
    core: PrimitiveCore,
    material: ResolvedMaterial,
}

impl BoundTriangleSet {
    pub(crate) fn new(core: PrimitiveCore, material: ResolvedMaterial) -> Self {
        Self { core, material }
    }

    /// The transformed primitive data.
    pub fn core(&self) -> &PrimitiveCore {
        &self.core
    }

    pub fn material(&self) -> Option<&Arc<Material>> {
        self.material.material.as_ref()
    }

    pub fn input_map(&self) -> &[VertexInputBinding] {
        &self.material.inputs
    }

    pub fn texcoord_set_for(&self, param: &str) -> Option<usize> {
        self.material
            .texcoord_set_for(param, &self.core.streams().texcoords)
    }

    pub fn len(&self) -> usize {
        self.core.corners() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `i`-th triangle in world space, with the flat normal fallback of
    /// [`crate::TriangleSet::shape`].
    pub fn shape(&self, i: usize) -> Option<Triangle> {
        (i < self.len()).then(|| {
            shape::triangle(
                self.core.streams(),
                [3 * i, 3 * i + 1, 3 * i + 2],
                self.material.shape_material(),
            )
        })
    }

    pub fn shapes(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.len()).filter_map(|i| self.shape(i))
    }

    /// Replaces the normal stream with smooth per-position normals of the transformed
    /// positions.
    pub fn generate_normals(&mut self) {
        generate_normals(self.core.streams_mut());
    }
}

/// A bound [`crate::Polylist`].
#[derive(Debug, Clone)]
pub struct BoundPolylist {
    core: PrimitiveCore,
    ranges: PolyRanges,
    material: ResolvedMaterial,
    triangles: OnceLock<BoundTriangleSet>,
}

impl BoundPolylist {
    pub(crate) fn new(core: PrimitiveCore, ranges: PolyRanges, material: ResolvedMaterial) -> Self {
        Self {
            core,
            ranges,
            material,
            triangles: OnceLock::new(),
        }
    }

    /// The transformed primitive data.
    pub fn core(&self) -> &PrimitiveCore {
        &self.core
    }

    pub fn material(&self) -> Option<&Arc<Material>> {
        self.material.material.as_ref()
    }

    pub fn input_map(&self) -> &[VertexInputBinding] {
        &self.material.inputs
    }

    pub fn texcoord_set_for(&self, param: &str) -> Option<usize> {
        self.material
            .texcoord_set_for(param, &self.core.streams().texcoords)
    }

    pub fn vcounts(&self) -> &[u32] {
        &self.ranges.vcounts
    }

    pub fn len(&self) -> usize {
        self.ranges.vcounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn shape(&self, i: usize) -> Option<Polygon> {
        (i < self.len()).then(|| {
            shape::polygon(
                self.core.streams(),
                self.ranges.range(i),
                self.material.shape_material(),
            )
        })
    }

    pub fn shapes(&self) -> impl Iterator<Item = Polygon> + '_ {
        (0..self.len()).filter_map(|i| self.shape(i))
    }

    /// The fan triangulation in world space, computed once and cached.
    pub fn triangleset(&self) -> &BoundTriangleSet {
        self.triangles.get_or_init(|| {
            let corners = fan_corners(&self.ranges);
            BoundTriangleSet::new(self.core.gather(&corners), self.material.clone())
        })
    }
}

/// A bound [`crate::Polygons`].
#[derive(Debug, Clone)]
pub struct BoundPolygons {
    polylist: BoundPolylist,
}

impl From<BoundPolylist> for BoundPolygons {
    fn from(polylist: BoundPolylist) -> Self {
        Self { polylist }
    }
}

impl BoundPolygons {
    pub fn as_polylist(&self) -> &BoundPolylist {
        &self.polylist
    }

    pub fn core(&self) -> &PrimitiveCore {
        self.polylist.core()
    }

    pub fn material(&self) -> Option<&Arc<Material>> {
        self.polylist.material()
    }

    pub fn input_map(&self) -> &[VertexInputBinding] {
        self.polylist.input_map()
    }

    pub fn texcoord_set_for(&self, param: &str) -> Option<usize> {
        self.polylist.texcoord_set_for(param)
    }

    pub fn len(&self) -> usize {
        self.polylist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polylist.is_empty()
    }

    pub fn shape(&self, i: usize) -> Option<Polygon> {
        self.polylist.shape(i)
    }

    pub fn shapes(&self) -> impl Iterator<Item = Polygon> + '_ {
        self.polylist.shapes()
    }

    pub fn triangleset(&self) -> &BoundTriangleSet {
        self.polylist.triangleset()
    }
}
