//! Geometry: sources, the vertex pool and a list of primitives.

use std::sync::Arc;

use collada_core::{
    parse_ref, resolve_inputs, ColladaError, ErrorCollector, InputList, InputMap, LoadOptions,
    MaterialMap, Result, Scope, Source, VertexBundle,
};
use collada_mesh::{BoundPrimitive, LineSet, Polygons, Polylist, Primitive, TriangleSet};
use glam::Mat4;

use crate::decl::{GeometryDecl, VerticesDecl};

/// A `<geometry>` with mesh content.
#[derive(Debug, Clone)]
pub struct Geometry {
    id: String,
    name: Option<String>,
    sources: Vec<Arc<Source>>,
    vertices: Option<VerticesDecl>,
    scope: Scope,
    primitives: Vec<Primitive>,
}

impl Geometry {
    /// Creates a geometry without primitives.
    ///
    /// # Errors
    ///
    /// * [`ColladaError::BrokenRef`] if a vertex pool input names a source that is not given
    /// * [`ColladaError::Incomplete`] if the vertex pool has no `POSITION` input
    pub fn new(
        id: impl Into<String>,
        name: Option<String>,
        sources: Vec<Source>,
        vertices: Option<VerticesDecl>,
    ) -> Result<Self> {
        let id = id.into();
        let sources: Vec<Arc<Source>> = sources.into_iter().map(Arc::new).collect();
        let mut scope = Scope::new();
        for source in &sources {
            if scope.get(source.id()).is_some() {
                log::warn!("geometry '{id}': duplicate source id '{}'", source.id());
            }
            scope.insert_source(Arc::clone(source));
        }
        if let Some(pool) = &vertices {
            scope.insert_bundle(vertex_bundle(pool, &scope)?);
        }
        Ok(Self {
            id,
            name,
            sources,
            vertices,
            scope,
            primitives: Vec::new(),
        })
    }

    /// Builds a geometry from its record.
    ///
    /// Each source and primitive is decoded on its own. A failure whose class is listed in
    /// `options.ignore` is pushed to `errors` and only that element is dropped; any other
    /// failure aborts the load.
    pub fn load(
        decl: &GeometryDecl,
        options: &LoadOptions,
        errors: &mut ErrorCollector,
    ) -> Result<Self> {
        let mut sources = Vec::with_capacity(decl.sources.len());
        for source in &decl.sources {
            match Source::load(source, options.strict_numbers) {
                Ok(s) => sources.push(s),
                Err(e) if options.ignores(e.kind()) => {
                    log::warn!("geometry '{}': skipping source '{}'", decl.id, source.id);
                    errors.push(e);
                }
                Err(e) => return Err(e),
            }
        }

        let mut geometry = Self::new(
            decl.id.clone(),
            decl.name.clone(),
            sources,
            decl.vertices.clone(),
        )?;

        for (i, primitive) in decl.primitives.iter().enumerate() {
            match Primitive::load(primitive, &geometry.scope, errors) {
                Ok(p) => geometry.primitives.push(p),
                Err(e) if options.ignores(e.kind()) => {
                    log::warn!(
                        "geometry '{}': skipping <{}> #{i}",
                        decl.id,
                        primitive.kind.tag()
                    );
                    errors.push(e);
                }
                Err(e) => return Err(e),
            }
        }

        log::debug!(
            "loaded geometry '{}' with {} primitives",
            geometry.id,
            geometry.primitives.len()
        );
        Ok(geometry)
    }

    /// Writes the geometry back into a record.
    pub fn save(&self) -> GeometryDecl {
        GeometryDecl {
            id: self.id.clone(),
            name: self.name.clone(),
            sources: self.sources.iter().map(|s| s.save()).collect(),
            vertices: self.vertices.clone(),
            primitives: self.primitives.iter().map(Primitive::to_decl).collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn sources(&self) -> &[Arc<Source>] {
        &self.sources
    }

    pub fn source(&self, id: &str) -> Option<&Arc<Source>> {
        self.scope.source(id)
    }

    pub fn vertices(&self) -> Option<&VerticesDecl> {
        self.vertices.as_ref()
    }

    /// The id lookup table inputs are resolved against.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn push_primitive(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    fn resolve(&self, inputs: &InputList, errors: &mut ErrorCollector) -> Result<InputMap> {
        resolve_inputs(&self.scope, inputs.inputs(), errors)
    }

    /// Creates a line set over this geometry's sources. The result is not added.
    ///
    /// Unknown input semantics are reported to `errors`, as [`Primitive::load`] does.
    pub fn create_line_set(
        &self,
        index: Vec<u32>,
        inputs: &InputList,
        material: Option<&str>,
        errors: &mut ErrorCollector,
    ) -> Result<LineSet> {
        LineSet::new(self.resolve(inputs, errors)?, index, material.map(String::from))
    }

    /// Creates a triangle set over this geometry's sources. The result is not added.
    pub fn create_triangle_set(
        &self,
        index: Vec<u32>,
        inputs: &InputList,
        material: Option<&str>,
        errors: &mut ErrorCollector,
    ) -> Result<TriangleSet> {
        TriangleSet::new(self.resolve(inputs, errors)?, index, material.map(String::from))
    }

    /// Creates a polylist over this geometry's sources. The result is not added.
    pub fn create_polylist(
        &self,
        index: Vec<u32>,
        vcounts: Vec<u32>,
        inputs: &InputList,
        material: Option<&str>,
        errors: &mut ErrorCollector,
    ) -> Result<Polylist> {
        Polylist::new(
            self.resolve(inputs, errors)?,
            index,
            vcounts,
            material.map(String::from),
        )
    }

    /// Creates a polygons primitive from one index block per polygon. The result is not added.
    pub fn create_polygons(
        &self,
        polygons: &[Vec<u32>],
        inputs: &InputList,
        material: Option<&str>,
        errors: &mut ErrorCollector,
    ) -> Result<Polygons> {
        Polygons::new(self.resolve(inputs, errors)?, polygons, material.map(String::from))
    }

    /// Binds every primitive to a world transform and a material assignment.
    pub fn bind(&self, matrix: &Mat4, materials: &MaterialMap) -> BoundGeometry {
        BoundGeometry {
            id: self.id.clone(),
            matrix: *matrix,
            primitives: self
                .primitives
                .iter()
                .map(|p| p.bind(matrix, materials))
                .collect(),
        }
    }
}

fn vertex_bundle(pool: &VerticesDecl, scope: &Scope) -> Result<VertexBundle> {
    let mut inputs = Vec::with_capacity(pool.inputs.len());
    for input in &pool.inputs {
        let id = parse_ref(&input.source)?;
        let source = scope.source(id).ok_or_else(|| {
            ColladaError::broken_ref(format!(
                "vertices '{}' references missing source '{id}'",
                pool.id
            ))
        })?;
        inputs.push((input.semantic.clone(), Arc::clone(source)));
    }
    if !inputs.iter().any(|(semantic, _)| semantic == "POSITION") {
        return Err(ColladaError::incomplete(format!(
            "vertices '{}' has no POSITION input",
            pool.id
        )));
    }
    Ok(VertexBundle {
        id: pool.id.clone(),
        inputs,
    })
}

/// A geometry instantiated in the scene.
#[derive(Debug, Clone)]
pub struct BoundGeometry {
    id: String,
    matrix: Mat4,
    primitives: Vec<BoundPrimitive>,
}

impl BoundGeometry {
    /// Id of the geometry this was bound from.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    pub fn primitives(&self) -> &[BoundPrimitive] {
        &self.primitives
    }
}
