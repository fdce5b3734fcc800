//! Typed source arrays.
//!
//! A [`Source`] owns one homogeneous flat array together with the names of the components
//! that reshape it into fixed-width rows (`X Y Z`, `S T`, ...).

use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::{ColladaError, Result};
use crate::text;

/// The element type of a source array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// `<float_array>`
    Float,
    /// `<Name_array>`
    Name,
    /// `<IDREF_array>`
    IdRef,
}

/// The flat buffer owned by a [`Source`].
#[derive(Debug, Clone, PartialEq)]
pub enum SourceData {
    Float(Vec<f32>),
    Name(Vec<String>),
    IdRef(Vec<String>),
}

impl SourceData {
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Float(_) => SourceKind::Float,
            Self::Name(_) => SourceKind::Name,
            Self::IdRef(_) => SourceKind::IdRef,
        }
    }

    /// Number of scalars in the buffer.
    pub fn len(&self) -> usize {
        match self {
            Self::Float(v) => v.len(),
            Self::Name(v) | Self::IdRef(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A flat, typed array reshaped into rows of `components().len()` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    id: String,
    data: SourceData,
    components: Vec<String>,
}

impl Source {
    /// Creates a source, validating that the buffer splits evenly into rows.
    ///
    /// Two-component `(U, V)` sources are relabeled `(S, T)`; three-component `(S, T, P)`
    /// sources lose their third component since 3D texture coordinates are not supported.
    pub fn new(
        id: impl Into<String>,
        data: SourceData,
        components: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self> {
        let id = id.into();
        let components: Vec<String> = components.into_iter().map(Into::into).collect();
        if components.is_empty() {
            return Err(ColladaError::incomplete(format!(
                "source '{id}' declares no components"
            )));
        }
        check_stride(&id, data.len(), components.len())?;
        let mut source = Self {
            id,
            data,
            components,
        };
        source.normalize_texcoords();
        Ok(source)
    }

    /// Creates a float source.
    pub fn new_float(
        id: impl Into<String>,
        values: Vec<f32>,
        components: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self> {
        Self::new(id, SourceData::Float(values), components)
    }

    /// Creates a `Name_array` source.
    pub fn new_name(
        id: impl Into<String>,
        values: Vec<String>,
        components: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self> {
        Self::new(id, SourceData::Name(values), components)
    }

    /// Creates an `IDREF_array` source.
    pub fn new_idref(
        id: impl Into<String>,
        values: Vec<String>,
        components: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self> {
        Self::new(id, SourceData::IdRef(values), components)
    }

    fn normalize_texcoords(&mut self) {
        let labels: Vec<&str> = self.components.iter().map(String::as_str).collect();
        match labels.as_slice() {
            ["U", "V"] => self.components = vec!["S".into(), "T".into()],
            ["S", "T", "P"] => {
                log::warn!(
                    "source '{}': 3D texture coordinates unsupported, dropping P",
                    self.id
                );
                match &mut self.data {
                    SourceData::Float(values) => drop_third(values),
                    SourceData::Name(values) | SourceData::IdRef(values) => drop_third(values),
                }
                self.components.truncate(2);
            }
            _ => {}
        }
    }

    /// Loads a source from its document record.
    ///
    /// `strict_numbers` controls whether unparsable float tokens are errors or zeros.
    pub fn load(decl: &SourceDecl, strict_numbers: bool) -> Result<Self> {
        let text = decl.array.as_deref().ok_or_else(|| {
            ColladaError::incomplete(format!("source '{}' has no backing array", decl.id))
        })?;
        let data = match decl.kind {
            SourceKind::Float => SourceData::Float(text::parse_floats(text, strict_numbers)?),
            SourceKind::Name => SourceData::Name(text::parse_names(text)),
            SourceKind::IdRef => SourceData::IdRef(text::parse_names(text)),
        };
        if let Some(count) = decl.count {
            if count != data.len() {
                return Err(ColladaError::malformed(format!(
                    "source '{}' declares {count} values but holds {}",
                    decl.id,
                    data.len()
                )));
            }
        }
        if let Some(stride) = decl.stride {
            if stride != decl.components.len() {
                return Err(ColladaError::malformed(format!(
                    "source '{}' has stride {stride} but {} components",
                    decl.id,
                    decl.components.len()
                )));
            }
        }
        Self::new(decl.id.clone(), data, decl.components.iter().cloned())
    }

    /// Serializes this source back into a document record.
    ///
    /// `count` and `stride` are always rewritten from the current buffer.
    pub fn save(&self) -> SourceDecl {
        let array = match &self.data {
            SourceData::Float(v) => text::format_floats(v),
            SourceData::Name(v) | SourceData::IdRef(v) => text::format_names(v),
        };
        SourceDecl {
            id: self.id.clone(),
            kind: self.kind(),
            array: Some(array),
            count: Some(self.data.len()),
            stride: Some(self.stride()),
            components: self.components.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> SourceKind {
        self.data.kind()
    }

    pub fn data(&self) -> &SourceData {
        &self.data
    }

    /// Replaces the buffer. The new buffer must still split into rows of the current width.
    pub fn set_data(&mut self, data: SourceData) -> Result<()> {
        check_stride(&self.id, data.len(), self.components.len())?;
        self.data = data;
        Ok(())
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// Row width.
    pub fn stride(&self) -> usize {
        self.components.len()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.data.len() / self.stride()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The flat float buffer, if this is a float source.
    pub fn floats(&self) -> Option<&[f32]> {
        match &self.data {
            SourceData::Float(v) => Some(v),
            _ => None,
        }
    }

    /// The flat string buffer, if this is a name or idref source.
    pub fn names(&self) -> Option<&[String]> {
        match &self.data {
            SourceData::Name(v) | SourceData::IdRef(v) => Some(v),
            SourceData::Float(_) => None,
        }
    }

    /// Returns one row of a float source.
    pub fn row(&self, row: usize) -> Option<&[f32]> {
        let stride = self.stride();
        let start = row.checked_mul(stride)?;
        self.floats()?.get(start..start.checked_add(stride)?)
    }

    /// Iterates over the rows of a float source. Empty for string sources.
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.floats()
            .unwrap_or_default()
            .chunks_exact(self.stride())
    }

    /// Reads a row as a `Vec2`, padding missing components with zero. Rows out of range, and
    /// string sources, read as zero.
    pub fn vec2(&self, row: usize) -> Vec2 {
        let mut out = [0.0; 2];
        self.read_into(row, &mut out);
        Vec2::from_array(out)
    }

    /// Reads a row as a `Vec3`, padding missing components with zero.
    pub fn vec3(&self, row: usize) -> Vec3 {
        let mut out = [0.0; 3];
        self.read_into(row, &mut out);
        Vec3::from_array(out)
    }

    /// Reads a row as a `Vec4`. Rows narrower than four get `w = 1` (opaque color).
    pub fn vec4(&self, row: usize) -> Vec4 {
        let mut out = [0.0, 0.0, 0.0, 1.0];
        self.read_into(row, &mut out);
        Vec4::from_array(out)
    }

    fn read_into(&self, row: usize, out: &mut [f32]) {
        let Some(values) = self.floats() else {
            return;
        };
        let stride = self.stride();
        let n = stride.min(out.len());
        let Some(end) = row.checked_mul(stride).and_then(|start| start.checked_add(n)) else {
            return;
        };
        if let Some(row) = values.get(end - n..end) {
            out[..n].copy_from_slice(row);
        }
    }
}

/// Keeps the first two values of every three.
fn drop_third<T>(values: &mut Vec<T>) {
    let mut i = 0;
    values.retain(|_| {
        i += 1;
        i % 3 != 0
    });
}

fn check_stride(id: &str, len: usize, stride: usize) -> Result<()> {
    if stride == 0 || len % stride != 0 {
        return Err(ColladaError::malformed(format!(
            "source '{id}' holds {len} values, not a multiple of stride {stride}"
        )));
    }
    Ok(())
}

/// Document record for a `<source>`: its array text and accessor description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDecl {
    pub id: String,
    pub kind: SourceKind,
    /// Whitespace-separated array content. `None` when the array element is missing.
    #[serde(default)]
    pub array: Option<String>,
    /// Declared scalar count.
    #[serde(default)]
    pub count: Option<usize>,
    /// Declared accessor stride.
    #[serde(default)]
    pub stride: Option<usize>,
    /// Accessor parameter names.
    pub components: Vec<String>,
}

impl SourceDecl {
    /// Convenience constructor for a float source record.
    pub fn float(id: impl Into<String>, array: impl Into<String>, components: &[&str]) -> Self {
        Self {
            id: id.into(),
            kind: SourceKind::Float,
            array: Some(array.into()),
            count: None,
            stride: None,
            components: components.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}
