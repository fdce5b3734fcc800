//! Materials as seen by the primitive engine.
//!
//! Primitives only carry a material *symbol*. At bind time a [`MaterialMap`] resolves symbols
//! to concrete [`Material`]s, optionally remapping shader parameters onto texcoord sets.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::semantic::Semantic;

/// A material. Effects and parameters live outside this crate; only identity is kept here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Id of the effect this material instantiates.
    #[serde(default)]
    pub effect: Option<String>,
}

impl Material {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            effect: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = Some(effect.into());
        self
    }
}

/// A `<bind_vertex_input>`: routes a shader parameter to an input semantic and set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexInputBinding {
    /// Parameter name used by the effect, e.g. `UVSET0`.
    pub semantic: String,
    pub input_semantic: Semantic,
    #[serde(default)]
    pub input_set: Option<u32>,
}

/// An `<instance_material>`: binds a primitive's material symbol to a material.
#[derive(Debug, Clone)]
pub struct MaterialBinding {
    pub symbol: String,
    pub target: Arc<Material>,
    pub inputs: Vec<VertexInputBinding>,
}

impl MaterialBinding {
    pub fn new(symbol: impl Into<String>, target: Arc<Material>) -> Self {
        Self {
            symbol: symbol.into(),
            target,
            inputs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_input(
        mut self,
        semantic: impl Into<String>,
        input_semantic: Semantic,
        input_set: Option<u32>,
    ) -> Self {
        self.inputs.push(VertexInputBinding {
            semantic: semantic.into(),
            input_semantic,
            input_set,
        });
        self
    }
}

/// Symbol to material binding lookup, supplied when a primitive is bound.
#[derive(Debug, Clone, Default)]
pub struct MaterialMap {
    bindings: HashMap<String, MaterialBinding>,
}

impl MaterialMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binding, replacing any previous binding of the same symbol.
    pub fn insert(&mut self, binding: MaterialBinding) {
        self.bindings.insert(binding.symbol.clone(), binding);
    }

    #[must_use]
    pub fn with(mut self, binding: MaterialBinding) -> Self {
        self.insert(binding);
        self
    }

    pub fn get(&self, symbol: &str) -> Option<&MaterialBinding> {
        self.bindings.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
