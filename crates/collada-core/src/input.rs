//! Input declarations and their resolution against a source scope.
//!
//! COLLADA primitives index several sources through one interleaved index buffer. Each input
//! names a semantic, a source and the column (`offset`) of its index within every vertex tuple.
//! [`resolve_inputs`] turns a list of declarations into an [`InputMap`]: inputs grouped by
//! semantic, each carrying the source it dereferences.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ColladaError, ErrorCollector, Result};
use crate::semantic::Semantic;
use crate::source::Source;

/// One `<input>` of a primitive, as written in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDecl {
    pub offset: usize,
    pub semantic: String,
    /// `#id` reference to a source or vertex pool.
    pub source: String,
    #[serde(default)]
    pub set: Option<u32>,
}

/// Builder for the input declarations of a primitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputList {
    inputs: Vec<InputDecl>,
}

impl InputList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an input. `source` is an `#id` reference.
    #[must_use]
    pub fn add_input(
        mut self,
        offset: usize,
        semantic: impl Into<String>,
        source: impl Into<String>,
        set: Option<u32>,
    ) -> Self {
        self.inputs.push(InputDecl {
            offset,
            semantic: semantic.into(),
            source: source.into(),
            set,
        });
        self
    }

    pub fn inputs(&self) -> &[InputDecl] {
        &self.inputs
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl From<InputList> for Vec<InputDecl> {
    fn from(list: InputList) -> Self {
        list.inputs
    }
}

impl From<Vec<InputDecl>> for InputList {
    fn from(inputs: Vec<InputDecl>) -> Self {
        Self { inputs }
    }
}

/// A resolved input.
#[derive(Debug, Clone)]
pub struct Input {
    pub offset: usize,
    pub semantic: Semantic,
    /// Id of the dereferenced source, without the leading `#`.
    pub source_id: String,
    pub set: Option<u32>,
    pub source: Arc<Source>,
}

/// A `<vertices>` pool: several semantics addressed through a single `VERTEX` input.
#[derive(Debug, Clone)]
pub struct VertexBundle {
    pub id: String,
    /// Sub-semantic name (`POSITION`, `NORMAL`, ...) and its source, in declaration order.
    pub inputs: Vec<(String, Arc<Source>)>,
}

/// What an id resolves to during input decoding.
#[derive(Debug, Clone)]
pub enum ScopeEntry {
    Source(Arc<Source>),
    VertexBundle(VertexBundle),
}

/// Id lookup table for input resolution.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    entries: HashMap<String, ScopeEntry>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a source under its own id, replacing any previous entry.
    pub fn insert_source(&mut self, source: Arc<Source>) {
        self.entries
            .insert(source.id().to_string(), ScopeEntry::Source(source));
    }

    /// Adds a vertex pool under its id, replacing any previous entry.
    pub fn insert_bundle(&mut self, bundle: VertexBundle) {
        self.entries
            .insert(bundle.id.clone(), ScopeEntry::VertexBundle(bundle));
    }

    pub fn get(&self, id: &str) -> Option<&ScopeEntry> {
        self.entries.get(id)
    }

    /// Looks up a plain source.
    pub fn source(&self, id: &str) -> Option<&Arc<Source>> {
        match self.entries.get(id)? {
            ScopeEntry::Source(s) => Some(s),
            ScopeEntry::VertexBundle(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Inputs grouped by semantic.
///
/// The eight known semantics always have a bucket (possibly empty); unknown semantics get one
/// bucket each.
#[derive(Debug, Clone, Default)]
pub struct InputMap {
    known: [Vec<Input>; 8],
    other: BTreeMap<String, Vec<Input>>,
    decls: Vec<InputDecl>,
}

impl InputMap {
    /// The inputs of one semantic, in declaration order.
    pub fn get(&self, semantic: &Semantic) -> &[Input] {
        let bucket = match semantic.bucket() {
            Some(b) => Some(&self.known[b]),
            None => self.other.get(semantic.as_str()),
        };
        bucket.map(Vec::as_slice).unwrap_or_default()
    }

    /// The first (canonical) input of a semantic.
    pub fn first(&self, semantic: &Semantic) -> Option<&Input> {
        self.get(semantic).first()
    }

    /// All bucket keys: the eight known semantics followed by any unknown ones.
    pub fn keys(&self) -> impl Iterator<Item = Semantic> + '_ {
        Semantic::KNOWN
            .into_iter()
            .chain(self.other.keys().map(|k| Semantic::Other(k.clone())))
    }

    /// Iterates over every resolved input.
    pub fn iter(&self) -> impl Iterator<Item = &Input> {
        self.known
            .iter()
            .chain(self.other.values())
            .flat_map(|bucket| bucket.iter())
    }

    /// Number of resolved inputs across all buckets.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.known.iter().all(Vec::is_empty) && self.other.values().all(Vec::is_empty)
    }

    /// Highest offset among all inputs.
    pub fn max_offset(&self) -> Option<usize> {
        self.iter().map(|i| i.offset).max()
    }

    /// Number of interleaved index columns per vertex tuple.
    ///
    /// Saturates at `usize::MAX` for an offset of `usize::MAX`.
    pub fn nindices(&self) -> usize {
        self.max_offset().map_or(0, |m| m.saturating_add(1))
    }

    /// The declarations this map was resolved from.
    pub fn decls(&self) -> &[InputDecl] {
        &self.decls
    }

    fn push(&mut self, input: Input) {
        let bucket = match input.semantic.bucket() {
            Some(b) => &mut self.known[b],
            None => self
                .other
                .entry(input.semantic.as_str().to_string())
                .or_default(),
        };
        bucket.push(input);
    }
}

/// Strips the `#` from a source reference.
pub fn parse_ref(reference: &str) -> Result<&str> {
    match reference.strip_prefix('#') {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(ColladaError::malformed(format!(
            "invalid source reference '{reference}'"
        ))),
    }
}

/// Resolves input declarations against `scope` and groups them by semantic.
///
/// A `VERTEX` input that references a vertex pool is replaced by one input per pool entry, all
/// sharing the original offset and set. Unknown semantics are kept in their own bucket and
/// reported to `errors` as unsupported.
///
/// # Errors
///
/// * [`ColladaError::Malformed`] if a reference is not of the form `#id`, or a non-`VERTEX`
///   input references a vertex pool
/// * [`ColladaError::BrokenRef`] if a referenced id is not in scope
pub fn resolve_inputs(
    scope: &Scope,
    decls: &[InputDecl],
    errors: &mut ErrorCollector,
) -> Result<InputMap> {
    let mut map = InputMap {
        decls: decls.to_vec(),
        ..InputMap::default()
    };

    for decl in decls {
        let id = parse_ref(&decl.source)?;
        let semantic = Semantic::from(decl.semantic.as_str());
        let entry = scope.get(id).ok_or_else(|| {
            ColladaError::broken_ref(format!(
                "input {semantic} references '{id}', which is not in scope"
            ))
        })?;

        match (entry, &semantic) {
            (ScopeEntry::VertexBundle(bundle), Semantic::Vertex) => {
                for (name, source) in &bundle.inputs {
                    let semantic = Semantic::from_vertex_pool(name);
                    if !semantic.is_known() {
                        errors.push(ColladaError::Unsupported(format!(
                            "vertex pool '{}' semantic '{semantic}'",
                            bundle.id
                        )));
                    }
                    map.push(Input {
                        offset: decl.offset,
                        semantic,
                        source_id: source.id().to_string(),
                        set: decl.set,
                        source: Arc::clone(source),
                    });
                }
            }
            (ScopeEntry::VertexBundle(bundle), _) => {
                return Err(ColladaError::malformed(format!(
                    "{semantic} input references vertex pool '{}'",
                    bundle.id
                )));
            }
            (ScopeEntry::Source(source), _) => {
                if !semantic.is_known() {
                    errors.push(ColladaError::Unsupported(format!(
                        "input semantic '{semantic}'"
                    )));
                }
                map.push(Input {
                    offset: decl.offset,
                    semantic: semantic.clone(),
                    source_id: id.to_string(),
                    set: decl.set,
                    source: Arc::clone(source),
                });
            }
        }
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn scope() -> Scope {
        let mut scope = Scope::new();
        let pos = Arc::new(Source::new_float("pos", vec![0.0; 9], ["X", "Y", "Z"]).unwrap());
        let nrm = Arc::new(Source::new_float("nrm", vec![0.0; 9], ["X", "Y", "Z"]).unwrap());
        let uv = Arc::new(Source::new_float("uv", vec![0.0; 6], ["S", "T"]).unwrap());
        scope.insert_bundle(VertexBundle {
            id: "verts".into(),
            inputs: vec![
                ("POSITION".into(), Arc::clone(&pos)),
                ("NORMAL".into(), Arc::clone(&nrm)),
            ],
        });
        scope.insert_source(pos);
        scope.insert_source(nrm);
        scope.insert_source(uv);
        scope
    }

    #[test]
    fn test_parse_ref() {
        assert_eq!(parse_ref("#pos").unwrap(), "pos");
        assert!(matches!(parse_ref("pos"), Err(ColladaError::Malformed(_))));
        assert!(matches!(parse_ref("#"), Err(ColladaError::Malformed(_))));
        assert!(matches!(parse_ref(""), Err(ColladaError::Malformed(_))));
    }

    #[test]
    fn test_vertex_bundle_expansion() {
        let list = InputList::new()
            .add_input(0, "VERTEX", "#verts", None)
            .add_input(1, "TEXCOORD", "#uv", Some(0));
        let mut errors = ErrorCollector::new();
        let map = resolve_inputs(&scope(), list.inputs(), &mut errors).unwrap();

        let vertex = map.first(&Semantic::Vertex).unwrap();
        assert_eq!(vertex.source_id, "pos");
        assert_eq!(vertex.offset, 0);
        let normal = map.first(&Semantic::Normal).unwrap();
        assert_eq!(normal.source_id, "nrm");
        assert_eq!(normal.offset, 0);
        assert_eq!(map.get(&Semantic::Texcoord)[0].set, Some(0));
        assert_eq!(map.len(), 3);
        assert_eq!(map.nindices(), 2);
        assert_eq!(map.decls().len(), 2);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_all_known_keys_present() {
        let list = InputList::new().add_input(0, "VERTEX", "#pos", None);
        let map = resolve_inputs(&scope(), list.inputs(), &mut ErrorCollector::new()).unwrap();
        let keys: Vec<Semantic> = map.keys().collect();
        assert_eq!(keys.len(), 8);
        assert!(map.get(&Semantic::Color).is_empty());
    }

    #[test]
    fn test_unknown_semantic_is_kept() {
        let list = InputList::new()
            .add_input(0, "VERTEX", "#pos", None)
            .add_input(3, "WEIGHT", "#uv", None);
        let mut errors = ErrorCollector::new();
        let map = resolve_inputs(&scope(), list.inputs(), &mut errors).unwrap();
        let weight = Semantic::Other("WEIGHT".into());
        assert_eq!(map.get(&weight).len(), 1);
        assert_eq!(map.keys().count(), 9);
        assert_eq!(map.nindices(), 4);
        assert_eq!(errors.count_of(ErrorKind::Unsupported), 1);
    }

    #[test]
    fn test_unknown_pool_semantic_is_reported() {
        let mut scope = scope();
        let pos = Arc::clone(scope.source("pos").unwrap());
        let weights = Arc::new(Source::new_float("w", vec![0.0; 3], ["W"]).unwrap());
        scope.insert_bundle(VertexBundle {
            id: "skinned".into(),
            inputs: vec![
                ("POSITION".into(), pos),
                ("WEIGHT".into(), weights),
            ],
        });
        let list = InputList::new().add_input(0, "VERTEX", "#skinned", None);
        let mut errors = ErrorCollector::new();
        let map = resolve_inputs(&scope, list.inputs(), &mut errors).unwrap();
        assert_eq!(map.get(&Semantic::Other("WEIGHT".into())).len(), 1);
        assert_eq!(map.get(&Semantic::Vertex).len(), 1);
        assert_eq!(errors.count_of(ErrorKind::Unsupported), 1);
    }

    #[test]
    fn test_broken_ref() {
        let list = InputList::new().add_input(0, "VERTEX", "#missing", None);
        let err = resolve_inputs(&scope(), list.inputs(), &mut ErrorCollector::new()).unwrap_err();
        assert!(matches!(err, ColladaError::BrokenRef(_)));
    }

    #[test]
    fn test_bundle_only_for_vertex() {
        let list = InputList::new().add_input(0, "NORMAL", "#verts", None);
        let err = resolve_inputs(&scope(), list.inputs(), &mut ErrorCollector::new()).unwrap_err();
        assert!(matches!(err, ColladaError::Malformed(_)));
    }

    #[test]
    fn test_scope_lookup() {
        let scope = scope();
        assert_eq!(scope.len(), 4);
        assert!(scope.source("pos").is_some());
        assert!(scope.source("verts").is_none());
        assert!(matches!(
            scope.get("verts"),
            Some(ScopeEntry::VertexBundle(_))
        ));
    }
}
