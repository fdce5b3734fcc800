//! Polygon primitives with a per-polygon vertex count.

mod triangulate;

pub(crate) use triangulate::fan_corners;

use std::sync::{Arc, OnceLock};

use collada_core::{ColladaError, InputMap, MaterialMap, Result};
use glam::Mat4;

use crate::base::PrimitiveCore;
use crate::bound::{BoundPolylist, ResolvedMaterial};
use crate::decl::{PrimitiveDecl, PrimitiveKind};
use crate::shape::{self, Polygon, ShapeMaterial};
use crate::triangle_set::TriangleSet;

/// Polygon boundaries derived from `vcounts`.
#[derive(Debug, Clone)]
pub(crate) struct PolyRanges {
    pub vcounts: Arc<[u32]>,
    pub polystarts: Arc<[usize]>,
    pub polyends: Arc<[usize]>,
}

impl PolyRanges {
    fn new(vcounts: Arc<[u32]>) -> Self {
        let polyends: Arc<[usize]> = vcounts
            .iter()
            .scan(0usize, |end, &n| {
                *end += n as usize;
                Some(*end)
            })
            .collect();
        let polystarts = polyends
            .iter()
            .zip(vcounts.iter())
            .map(|(&end, &n)| end - n as usize)
            .collect();
        Self {
            vcounts,
            polystarts,
            polyends,
        }
    }

    /// Total number of corners.
    pub fn nvertices(&self) -> usize {
        self.polyends.last().copied().unwrap_or(0)
    }

    pub fn range(&self, i: usize) -> std::ops::Range<usize> {
        self.polystarts[i]..self.polyends[i]
    }
}

/// A `<polylist>` primitive.
#[derive(Debug, Clone)]
pub struct Polylist {
    core: PrimitiveCore,
    ranges: PolyRanges,
    triangles: OnceLock<TriangleSet>,
}

impl Polylist {
    /// Creates a polylist from resolved inputs, a flat interleaved index buffer and the vertex
    /// count of every polygon.
    ///
    /// # Errors
    ///
    /// * [`ColladaError::Incomplete`] without inputs or without a `VERTEX` input
    /// * [`ColladaError::Malformed`] if `vcounts` does not add up to the number of index
    ///   tuples or an index is out of range
    pub fn new(
        inputs: InputMap,
        index: impl Into<Arc<[u32]>>,
        vcounts: impl Into<Arc<[u32]>>,
        material: Option<String>,
    ) -> Result<Self> {
        let core = PrimitiveCore::new(inputs, index.into(), material, 1)?;
        let ranges = PolyRanges::new(vcounts.into());
        if ranges.nvertices() != core.corners() {
            return Err(ColladaError::malformed(format!(
                "vcounts describe {} vertices but the index buffer holds {}",
                ranges.nvertices(),
                core.corners()
            )));
        }
        log::debug!("built polylist with {} polygons", ranges.vcounts.len());
        Ok(Self {
            core,
            ranges,
            triangles: OnceLock::new(),
        })
    }

    pub fn core(&self) -> &PrimitiveCore {
        &self.core
    }

    pub fn material(&self) -> Option<&str> {
        self.core.material()
    }

    /// Vertex count of every polygon.
    pub fn vcounts(&self) -> &[u32] {
        &self.ranges.vcounts
    }

    /// First corner of every polygon.
    pub fn polystarts(&self) -> &[usize] {
        &self.ranges.polystarts
    }

    /// One past the last corner of every polygon.
    pub fn polyends(&self) -> &[usize] {
        &self.ranges.polyends
    }

    pub(crate) fn ranges(&self) -> &PolyRanges {
        &self.ranges
    }

    /// Number of polygons.
    pub fn len(&self) -> usize {
        self.ranges.vcounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `i`-th polygon.
    pub fn shape(&self, i: usize) -> Option<Polygon> {
        (i < self.len()).then(|| {
            let material = self.core.material().map(|m| ShapeMaterial::Symbol(m.into()));
            shape::polygon(self.core.streams(), self.ranges.range(i), material)
        })
    }

    pub fn shapes(&self) -> impl Iterator<Item = Polygon> + '_ {
        (0..self.len()).filter_map(|i| self.shape(i))
    }

    /// The fan triangulation of every polygon, computed once and cached.
    pub fn triangleset(&self) -> &TriangleSet {
        self.triangles.get_or_init(|| {
            let corners = fan_corners(&self.ranges);
            log::debug!("triangulated polylist into {} triangles", corners.len() / 3);
            TriangleSet::from_core(self.core.gather(&corners))
        })
    }

    /// Applies a world transform and resolves the material symbol.
    pub fn bind(&self, matrix: &Mat4, materials: &MaterialMap) -> BoundPolylist {
        BoundPolylist::new(
            self.core.transformed(matrix),
            self.ranges.clone(),
            ResolvedMaterial::resolve(self.material(), materials),
        )
    }

    pub fn to_decl(&self) -> PrimitiveDecl {
        let inputs = self.core.inputs().decls().to_vec();
        let mut decl = PrimitiveDecl::new(PrimitiveKind::Polylist, inputs);
        decl.material = self.core.material().map(String::from);
        decl.count = Some(self.len());
        decl.p = Some(self.core.index().to_vec());
        decl.vcount = Some(self.ranges.vcounts.to_vec());
        decl
    }
}
