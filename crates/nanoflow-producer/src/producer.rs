//! Producer declarations
//!
//! A [`Producer`] names a computation from input quantities to output
//! quantities through a [`CallTemplate`]. Three shapes exist:
//!
//! - plain producers, rendered once per scope
//! - vector producers, expanded once per element of their vector configs
//! - producer groups, which schedule sub-producers and combine their outputs
//!
//! Producers are immutable once built and shared as [`ProducerRef`].

use crate::error::ProducerError;
use crate::params::{ParamSource, ParamValue};
use crate::template::{CallTemplate, RenderContext};
use indexmap::IndexMap;
use nanoflow_quantity::{Quantity, Scope, ScopeSet};
use serde::Serialize;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// Shared producer handle
pub type ProducerRef = Arc<Producer>;

/// Per-call parameter values produced by vector expansion
pub type Expansion = IndexMap<String, ParamValue>;

/// Declared inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Inputs {
    /// Same inputs in every scope
    Uniform(Vec<Quantity>),

    /// Inputs depending on the scope
    PerScope(IndexMap<Scope, Vec<Quantity>>),
}

impl Default for Inputs {
    fn default() -> Self {
        Self::Uniform(Vec::new())
    }
}

/// Declared outputs
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "shape", content = "columns", rename_all = "snake_case")]
pub enum Outputs {
    /// No column, the call filters events
    None,

    /// A generated internal column named after the producer
    #[default]
    Internal,

    /// Explicit columns
    Columns(Vec<Quantity>),
}

/// Producer shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProducerKind {
    /// Plain producer
    Plain,

    /// Expanded per element of the named vector configs
    Vector {
        /// Configuration keys holding the vectors
        vec_configs: Vec<String>,
    },

    /// Group of sub-producers
    Group {
        /// Sub-producers in scheduling order
        #[serde(serialize_with = "serialize_names")]
        subproducers: Vec<ProducerRef>,
    },
}

fn serialize_names<S: serde::Serializer>(
    producers: &[ProducerRef],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(producers.iter().map(|p| p.name()))
}

/// Named computation over quantities
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Producer {
    name: String,
    call: Option<CallTemplate>,
    inputs: Inputs,
    outputs: Outputs,
    scopes: ScopeSet,
    #[serde(flatten)]
    kind: ProducerKind,
    #[serde(skip)]
    misapplied: Option<&'static str>,
}

impl Producer {
    /// Start a plain producer
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ProducerBuilder {
        ProducerBuilder::new(name.into(), ProducerKind::Plain)
    }

    /// Start a vector producer
    #[must_use]
    pub fn vector(name: impl Into<String>) -> ProducerBuilder {
        ProducerBuilder::new(
            name.into(),
            ProducerKind::Vector {
                vec_configs: Vec::new(),
            },
        )
    }

    /// Start a producer group
    #[must_use]
    pub fn group(name: impl Into<String>) -> ProducerBuilder {
        ProducerBuilder::new(
            name.into(),
            ProducerKind::Group {
                subproducers: Vec::new(),
            },
        )
    }

    /// Producer name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Call template, `None` for bundles
    #[inline]
    #[must_use]
    pub fn call(&self) -> Option<&CallTemplate> {
        self.call.as_ref()
    }

    /// Declared inputs
    #[inline]
    #[must_use]
    pub fn declared_inputs(&self) -> &Inputs {
        &self.inputs
    }

    /// Declared output shape
    #[inline]
    #[must_use]
    pub fn declared_outputs(&self) -> &Outputs {
        &self.outputs
    }

    /// Applicable scopes
    #[inline]
    #[must_use]
    pub fn scopes(&self) -> &ScopeSet {
        &self.scopes
    }

    /// Producer shape
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &ProducerKind {
        &self.kind
    }

    /// Short label for the shape
    #[must_use]
    pub fn kind_label(&self) -> &'static str {
        match &self.kind {
            ProducerKind::Plain => "producer",
            ProducerKind::Vector { .. } => "vector",
            ProducerKind::Group { .. } if self.call.is_none() => "bundle",
            ProducerKind::Group { .. } => "group",
        }
    }

    /// Sub-producers, empty unless this is a group
    #[must_use]
    pub fn subproducers(&self) -> &[ProducerRef] {
        match &self.kind {
            ProducerKind::Group { subproducers } => subproducers,
            _ => &[],
        }
    }

    /// Vector config keys, empty unless this is a vector producer
    #[must_use]
    pub fn vec_configs(&self) -> &[String] {
        match &self.kind {
            ProducerKind::Vector { vec_configs } => vec_configs,
            _ => &[],
        }
    }

    /// Builder method that was called on a producer of the wrong shape
    ///
    /// Set by [`ProducerBuilder::vec_configs`] on non-vector producers and
    /// by [`ProducerBuilder::subproducers`] on non-groups.
    #[inline]
    #[must_use]
    pub fn misapplied_builder(&self) -> Option<&'static str> {
        self.misapplied
    }

    /// True for groups without a call
    #[inline]
    #[must_use]
    pub fn is_bundle(&self) -> bool {
        matches!(self.kind, ProducerKind::Group { .. }) && self.call.is_none()
    }

    /// True if the producer applies to `scope`
    #[inline]
    #[must_use]
    pub fn is_valid_in(&self, scope: &Scope) -> bool {
        self.scopes.contains(scope)
    }

    /// Declared inputs for `scope`
    ///
    /// `None` when inputs are scope-dependent and `scope` has no entry.
    #[must_use]
    pub fn inputs_for(&self, scope: &Scope) -> Option<&[Quantity]> {
        match &self.inputs {
            Inputs::Uniform(inputs) => Some(inputs),
            Inputs::PerScope(map) => map.get(scope).map(Vec::as_slice),
        }
    }

    /// Arguments passed as `{input}`: declared inputs followed, for groups
    /// with a call, by every sub-producer output in sub-producer order
    ///
    /// # Errors
    /// [`ProducerError::MissingScopeInputs`] when `scope` has no input entry
    pub fn call_inputs(&self, scope: &Scope) -> Result<Vec<Quantity>, ProducerError> {
        let declared = self
            .inputs_for(scope)
            .ok_or_else(|| ProducerError::MissingScopeInputs {
                producer: self.name.clone(),
                scope: scope.clone(),
            })?;

        let mut inputs = declared.to_vec();
        if !self.is_bundle() {
            for sub in self.subproducers() {
                inputs.extend(sub.outputs());
            }
        }
        Ok(inputs)
    }

    /// Output columns in declaration order
    #[must_use]
    pub fn outputs(&self) -> Vec<Quantity> {
        match &self.outputs {
            Outputs::None => Vec::new(),
            Outputs::Internal => vec![Quantity::internal(&self.name)],
            Outputs::Columns(columns) => columns.clone(),
        }
    }

    /// True if the call adds no column
    #[inline]
    #[must_use]
    pub fn is_filter(&self) -> bool {
        matches!(self.outputs, Outputs::None)
    }

    /// Per-call parameter sets for this producer in `scope`
    ///
    /// Plain producers and groups yield one empty set, bundles yield none, and
    /// vector producers yield one set per vector element.
    ///
    /// # Errors
    /// - [`ProducerError::MissingVectorConfig`] / [`ProducerError::NotAVector`]
    ///   for absent or scalar vector entries
    /// - [`ProducerError::VectorLengthMismatch`] for vectors of unequal length
    /// - [`ProducerError::VectorOutputCollision`] when a vector producer with
    ///   output columns expands to more than one call
    pub fn expand(
        &self,
        scope: &Scope,
        params: &dyn ParamSource,
    ) -> Result<Vec<Expansion>, ProducerError> {
        if self.is_bundle() {
            return Ok(Vec::new());
        }
        let ProducerKind::Vector { vec_configs } = &self.kind else {
            return Ok(vec![Expansion::new()]);
        };

        let mut vectors: Vec<(&str, &[ParamValue])> = Vec::with_capacity(vec_configs.len());
        for key in vec_configs {
            let value = params
                .lookup(scope, key)
                .ok_or_else(|| ProducerError::MissingVectorConfig {
                    producer: self.name.clone(),
                    key: key.clone(),
                    scope: scope.clone(),
                })?;
            let items = value.as_list().ok_or_else(|| ProducerError::NotAVector {
                producer: self.name.clone(),
                key: key.clone(),
            })?;
            vectors.push((key.as_str(), items));
        }

        let calls = vectors.first().map_or(0, |(_, items)| items.len());
        for (key, items) in &vectors {
            if items.len() != calls {
                return Err(ProducerError::VectorLengthMismatch {
                    producer: self.name.clone(),
                    key: (*key).to_string(),
                    expected: calls,
                    found: items.len(),
                });
            }
        }
        if calls > 1 && !self.outputs().is_empty() {
            return Err(ProducerError::VectorOutputCollision {
                producer: self.name.clone(),
                calls,
            });
        }

        Ok((0..calls)
            .map(|i| {
                vectors
                    .iter()
                    .map(|(key, items)| ((*key).to_string(), items[i].clone()))
                    .collect()
            })
            .collect())
    }

    /// Render one call expression
    ///
    /// # Errors
    /// - [`ProducerError::NotValidInScope`] if the producer does not apply
    /// - [`ProducerError::NoCall`] for bundles
    /// - [`ProducerError::Render`] for template failures
    pub fn render_call(
        &self,
        scope: &Scope,
        df: &str,
        params: &dyn ParamSource,
        expansion: &Expansion,
    ) -> Result<String, ProducerError> {
        if !self.is_valid_in(scope) {
            return Err(ProducerError::NotValidInScope {
                producer: self.name.clone(),
                scope: scope.clone(),
            });
        }
        let call = self.call.as_ref().ok_or_else(|| ProducerError::NoCall {
            producer: self.name.clone(),
        })?;

        let inputs = self.call_inputs(scope)?;
        let outputs = self.outputs();
        let ctx = RenderContext {
            scope,
            df,
            inputs: &inputs,
            outputs: &outputs,
            params,
            overrides: (!expansion.is_empty()).then_some(expansion),
        };
        call.render(&ctx).map_err(|source| ProducerError::Render {
            producer: self.name.clone(),
            source,
        })
    }
}

impl Display for Producer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) {}", self.name, self.kind_label(), self.scopes)
    }
}

/// Builder for [`Producer`]
///
/// Declaring a producer never fails; structural checks happen when the
/// producer is registered.
#[derive(Debug, Clone)]
#[must_use]
pub struct ProducerBuilder {
    producer: Producer,
}

impl ProducerBuilder {
    fn new(name: String, kind: ProducerKind) -> Self {
        Self {
            producer: Producer {
                name,
                call: None,
                inputs: Inputs::default(),
                outputs: Outputs::default(),
                scopes: ScopeSet::new(),
                kind,
                misapplied: None,
            },
        }
    }

    /// Set the call template
    pub fn call(mut self, call: &'static str) -> Self {
        self.producer.call = Some(CallTemplate::from_static(call));
        self
    }

    /// Set a runtime call template
    pub fn call_template(mut self, call: CallTemplate) -> Self {
        self.producer.call = Some(call);
        self
    }

    /// Uniform inputs
    pub fn inputs(mut self, inputs: impl IntoIterator<Item = Quantity>) -> Self {
        self.producer.inputs = Inputs::Uniform(inputs.into_iter().collect());
        self
    }

    /// Scope-dependent inputs
    pub fn inputs_per_scope<I>(mut self, inputs: impl IntoIterator<Item = (&'static str, I)>) -> Self
    where
        I: IntoIterator<Item = Quantity>,
    {
        self.producer.inputs = Inputs::PerScope(
            inputs
                .into_iter()
                .map(|(scope, qs)| (Scope::from_static(scope), qs.into_iter().collect()))
                .collect(),
        );
        self
    }

    /// Explicit output columns
    pub fn outputs(mut self, outputs: impl IntoIterator<Item = Quantity>) -> Self {
        self.producer.outputs = Outputs::Columns(outputs.into_iter().collect());
        self
    }

    /// Generated internal output column
    pub fn internal_output(mut self) -> Self {
        self.producer.outputs = Outputs::Internal;
        self
    }

    /// No output column, the call filters events
    pub fn no_output(mut self) -> Self {
        self.producer.outputs = Outputs::None;
        self
    }

    /// Applicable scopes
    pub fn scopes(mut self, scopes: &[&'static str]) -> Self {
        self.producer.scopes = ScopeSet::from_labels(scopes);
        self
    }

    /// Vector config keys (vector producers only)
    ///
    /// On other shapes the call is recorded and rejected at registration.
    pub fn vec_configs(mut self, keys: &[&str]) -> Self {
        if let ProducerKind::Vector { vec_configs } = &mut self.producer.kind {
            *vec_configs = keys.iter().map(|k| (*k).to_string()).collect();
        } else {
            self.producer.misapplied.get_or_insert("vec_configs");
        }
        self
    }

    /// Sub-producers (groups only)
    ///
    /// On other shapes the call is recorded and rejected at registration.
    pub fn subproducers(mut self, subs: impl IntoIterator<Item = ProducerRef>) -> Self {
        if let ProducerKind::Group { subproducers } = &mut self.producer.kind {
            *subproducers = subs.into_iter().collect();
        } else {
            self.producer.misapplied.get_or_insert("subproducers");
        }
        self
    }

    /// Finish the declaration
    ///
    /// Groups without a call become bundles whose outputs are the
    /// concatenated sub-producer outputs.
    #[must_use]
    pub fn build(mut self) -> ProducerRef {
        if self.producer.is_bundle() {
            let combined: Vec<Quantity> = self
                .producer
                .subproducers()
                .iter()
                .flat_map(|s| s.outputs())
                .collect();
            self.producer.outputs = Outputs::Columns(combined);
        }
        Arc::new(self.producer)
    }
}
