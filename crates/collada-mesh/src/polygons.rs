//! Polygon primitives with independently sized index blocks.

use collada_core::{ColladaError, InputMap, MaterialMap, Result};
use glam::Mat4;

use crate::bound::BoundPolygons;
use crate::decl::{PolygonDecl, PrimitiveDecl, PrimitiveKind};
use crate::polylist::Polylist;
use crate::shape::Polygon;
use crate::triangle_set::TriangleSet;

/// A `<polygons>` primitive.
///
/// Each polygon arrives as its own interleaved index block. The blocks are concatenated and
/// the primitive is stored exactly like a [`Polylist`]. Hole loops are not represented.
#[derive(Debug, Clone)]
pub struct Polygons {
    polylist: Polylist,
}

impl Polygons {
    /// # Errors
    ///
    /// * [`ColladaError::Incomplete`] without inputs or without a `VERTEX` input
    /// * [`ColladaError::Malformed`] if a block is not a whole number of index tuples or an
    ///   index is out of range
    pub fn new(inputs: InputMap, polygons: &[Vec<u32>], material: Option<String>) -> Result<Self> {
        let nindices = inputs.nindices().max(1);
        let mut vcounts = Vec::with_capacity(polygons.len());
        for (i, block) in polygons.iter().enumerate() {
            if block.len() % nindices != 0 {
                return Err(ColladaError::malformed(format!(
                    "polygon {i} has {} indices, not a multiple of {nindices}",
                    block.len()
                )));
            }
            let count = u32::try_from(block.len() / nindices).map_err(|_| {
                ColladaError::malformed(format!("polygon {i} has too many vertices"))
            })?;
            vcounts.push(count);
        }
        let index: Vec<u32> = polygons.concat();
        Ok(Self {
            polylist: Polylist::new(inputs, index, vcounts, material)?,
        })
    }

    /// The normalized polylist form.
    pub fn as_polylist(&self) -> &Polylist {
        &self.polylist
    }

    pub fn material(&self) -> Option<&str> {
        self.polylist.material()
    }

    pub fn vcounts(&self) -> &[u32] {
        self.polylist.vcounts()
    }

    /// Number of polygons.
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

    /// The fan triangulation of every polygon, computed once and cached.
    pub fn triangleset(&self) -> &TriangleSet {
        self.polylist.triangleset()
    }

    pub fn bind(&self, matrix: &Mat4, materials: &MaterialMap) -> BoundPolygons {
        BoundPolygons::from(self.polylist.bind(matrix, materials))
    }

    /// Writes one `<p>` block per polygon.
    pub fn to_decl(&self) -> PrimitiveDecl {
        let core = self.polylist.core();
        let nindices = core.nindices();
        let inputs = core.inputs().decls().to_vec();
        let mut decl = PrimitiveDecl::new(PrimitiveKind::Polygons, inputs);
        decl.material = core.material().map(String::from);
        decl.count = Some(self.len());
        decl.polygons = self
            .polylist
            .polystarts()
            .iter()
            .zip(self.polylist.polyends())
            .map(|(&start, &end)| PolygonDecl {
                p: core.index()[start * nindices..end * nindices].to_vec(),
                holes: Vec::new(),
            })
            .collect();
        decl
    }
}
