//! Resolved plans
//!
//! A [`ResolvedPlan`] is the ordered list of producers to run per scope,
//! `global` first.

use indexmap::IndexMap;
use nanoflow_producer::ProducerRef;
use nanoflow_quantity::{Quantity, Scope};
use serde::Serialize;

/// What to resolve
#[derive(Debug, Clone, Default)]
pub struct ResolveRequest {
    scopes: IndexMap<Scope, ScopeRequest>,
}

/// Request for one scope
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeRequest {
    /// Producer names in request order
    pub producers: Vec<String>,
    /// Output column names in request order
    pub outputs: Vec<String>,
}

impl ResolveRequest {
    /// Create empty request
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or extend the request for `scope`
    #[must_use]
    pub fn scope<P, O>(mut self, scope: Scope, producers: P, outputs: O) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        let entry = self.scopes.entry(scope).or_default();
        entry.producers.extend(producers.into_iter().map(Into::into));
        entry.outputs.extend(outputs.into_iter().map(Into::into));
        self
    }

    /// Scopes in resolution order: `global` first, then request order
    pub fn ordered(&self) -> impl Iterator<Item = (&Scope, &ScopeRequest)> {
        self.scopes
            .iter()
            .filter(|(s, _)| s.is_global())
            .chain(self.scopes.iter().filter(|(s, _)| !s.is_global()))
    }

    /// Number of scopes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

/// Ordered producers of one scope
#[derive(Debug, Clone, Serialize)]
pub struct ScopePlan {
    /// Scope
    pub scope: Scope,
    /// Producers in execution order
    #[serde(serialize_with = "serialize_names")]
    pub producers: Vec<ProducerRef>,
    /// Columns written to the output ntuple
    pub outputs: Vec<Quantity>,
    /// Producers dropped because no requested output depends on them
    pub pruned: Vec<String>,
}

fn serialize_names<S: serde::Serializer>(
    producers: &[ProducerRef],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(producers.iter().map(|p| p.name()))
}

impl ScopePlan {
    /// Producer names in execution order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.producers.iter().map(|p| p.name()).collect()
    }

    /// Position of a producer in the execution order
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.producers.iter().position(|p| p.name() == name)
    }
}

/// Per-scope execution plan
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolvedPlan {
    /// Scope plans, `global` first
    pub scopes: Vec<ScopePlan>,
}

impl ResolvedPlan {
    /// Plan for one scope
    #[must_use]
    pub fn scope(&self, scope: &Scope) -> Option<&ScopePlan> {
        self.scopes.iter().find(|p| &p.scope == scope)
    }

    /// Plan of the `global` scope
    #[must_use]
    pub fn global(&self) -> Option<&ScopePlan> {
        self.scope(&Scope::GLOBAL)
    }

    /// Channel scope plans in order
    pub fn channels(&self) -> impl Iterator<Item = &ScopePlan> {
        self.scopes.iter().filter(|p| !p.scope.is_global())
    }

    /// Total scheduled producers across scopes
    #[must_use]
    pub fn producer_count(&self) -> usize {
        self.scopes.iter().map(|s| s.producers.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_orders_global_first() {
        let request = ResolveRequest::new()
            .scope(Scope::new("mt"), ["GoodMuons"], ["good_muons_mask"])
            .scope(Scope::GLOBAL, ["BaseMuons"], Vec::<String>::new())
            .scope(Scope::new("et"), ["ExtraMuonsVeto"], Vec::<String>::new());

        let order: Vec<_> = request.ordered().map(|(s, _)| s.as_str()).collect();
        assert_eq!(order, ["global", "mt", "et"]);
        assert_eq!(request.len(), 3);
    }

    #[test]
    fn request_extends_existing_scope() {
        let request = ResolveRequest::new()
            .scope(Scope::GLOBAL, ["Lumi"], ["lumi"])
            .scope(Scope::GLOBAL, ["PUweights"], ["puweight"]);

        let (_, global) = request.ordered().next().unwrap();
        assert_eq!(global.producers, ["Lumi", "PUweights"]);
        assert_eq!(global.outputs, ["lumi", "puweight"]);
    }
}
