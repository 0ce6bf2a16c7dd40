//! Per-scope dependency resolution
//!
//! Provides [`Resolver`], which turns a [`ResolveRequest`] into a
//! [`ResolvedPlan`]:
//!
//! 1. filter requested producers by scope
//! 2. flatten groups (sub-producers first) and drop duplicates
//! 3. claim outputs, one writer per quantity and scope
//! 4. check every input is available
//! 5. order producers topologically, ties broken by request order
//! 6. collect requested outputs
//! 7. optionally prune producers no requested output depends on

use crate::error::ResolveError;
use crate::plan::{ResolveRequest, ResolvedPlan, ScopePlan, ScopeRequest};
use crate::registry::ProducerRegistry;
use indexmap::IndexMap;
use nanoflow_producer::ProducerRef;
use nanoflow_quantity::{Quantity, QuantityIndex, QuantityKind, Scope};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

/// Resolver over a registry
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'r> {
    registry: &'r ProducerRegistry,
    optimize: bool,
}

impl<'r> Resolver<'r> {
    /// Create resolver with pruning enabled
    #[inline]
    #[must_use]
    pub fn new(registry: &'r ProducerRegistry) -> Self {
        Self {
            registry,
            optimize: true,
        }
    }

    /// Enable or disable output-driven pruning
    #[inline]
    #[must_use]
    pub fn with_optimize(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }

    /// Resolve a request into an ordered plan
    ///
    /// # Errors
    /// Any [`ResolveError`]; resolution stops at the first failing scope.
    pub fn resolve(&self, request: &ResolveRequest) -> Result<ResolvedPlan, ResolveError> {
        if request.is_empty() {
            return Err(ResolveError::EmptyRequest);
        }

        let mut index = QuantityIndex::new();
        let mut in_global: HashSet<String> = HashSet::new();
        let mut reused: HashMap<Scope, Vec<Quantity>> = HashMap::new();
        let mut scopes = Vec::with_capacity(request.len());

        for (scope, scope_request) in request.ordered() {
            let _span = tracing::info_span!("resolve_scope", scope = %scope).entered();

            let (selected, from_global) = self.select(scope, scope_request, &in_global)?;
            if !from_global.is_empty() {
                reused.insert(scope.clone(), from_global);
            }
            for producer in &selected {
                for output in producer.outputs() {
                    index.claim(scope, &output, producer.name())?;
                }
            }

            let mut inputs = Vec::with_capacity(selected.len());
            for producer in &selected {
                let call_inputs = producer.call_inputs(scope)?;
                if let Some(missing) = call_inputs.iter().find(|q| !index.is_available(scope, q)) {
                    return Err(ResolveError::UnresolvedInput {
                        producer: producer.name().to_string(),
                        quantity: missing.name().to_string(),
                        scope: scope.clone(),
                        providers: self.registry.providers_of(missing, scope),
                    });
                }
                inputs.push(call_inputs);
            }

            let producers = order(scope, selected, &inputs, &index)?;
            let outputs = self.requested_outputs(scope, scope_request, &index)?;

            if scope.is_global() {
                in_global = producers.iter().map(|p| p.name().to_string()).collect();
            }
            tracing::info!(
                producers = producers.len(),
                outputs = outputs.len(),
                "resolved scope"
            );
            scopes.push(ScopePlan {
                scope: scope.clone(),
                producers,
                outputs,
                pruned: Vec::new(),
            });
        }

        if self.optimize {
            prune(&mut scopes, &reused);
        }
        Ok(ResolvedPlan { scopes })
    }

    /// Producers to schedule in `scope`, plus the outputs of requested
    /// producers already scheduled in `global`
    fn select(
        &self,
        scope: &Scope,
        request: &ScopeRequest,
        in_global: &HashSet<String>,
    ) -> Result<(Vec<ProducerRef>, Vec<Quantity>), ResolveError> {
        let mut selected: IndexMap<String, ProducerRef> = IndexMap::new();
        let mut from_global = Vec::new();
        for name in &request.producers {
            let producer = self
                .registry
                .get(name)
                .ok_or_else(|| ResolveError::UnknownProducer {
                    name: name.clone(),
                    scope: scope.clone(),
                })?;
            visit(scope, producer, in_global, &mut selected, &mut from_global)?;
        }
        Ok((selected.into_values().collect(), from_global))
    }

    fn requested_outputs(
        &self,
        scope: &Scope,
        request: &ScopeRequest,
        index: &QuantityIndex,
    ) -> Result<Vec<Quantity>, ResolveError> {
        let mut outputs: Vec<Quantity> = Vec::with_capacity(request.outputs.len());
        for name in &request.outputs {
            let probe = Quantity::new(name.clone(), QuantityKind::Derived);
            let quantity = if let Some(writer) = index.writer(scope, &probe) {
                self.registry
                    .get(writer)
                    .and_then(|p| p.outputs().into_iter().find(|q| *q == probe))
                    .unwrap_or(probe)
            } else if let Some(raw) = self.registry.nano_aod_column(name) {
                raw
            } else {
                return Err(ResolveError::UnknownOutput {
                    quantity: name.clone(),
                    scope: scope.clone(),
                });
            };

            if quantity.is_internal() {
                return Err(ResolveError::InternalOutputRequested {
                    quantity: name.clone(),
                    scope: scope.clone(),
                });
            }
            if !outputs.contains(&quantity) {
                outputs.push(quantity);
            }
        }
        Ok(outputs)
    }
}

fn visit(
    scope: &Scope,
    producer: &ProducerRef,
    in_global: &HashSet<String>,
    selected: &mut IndexMap<String, ProducerRef>,
    from_global: &mut Vec<Quantity>,
) -> Result<(), ResolveError> {
    if !producer.is_valid_in(scope) {
        return Err(ResolveError::ScopeMismatch {
            producer: producer.name().to_string(),
            scope: scope.clone(),
            valid: producer.scopes().to_string(),
        });
    }
    if in_global.contains(producer.name()) {
        tracing::debug!(producer = producer.name(), "already scheduled in global");
        from_global.extend(producer.outputs());
        return Ok(());
    }
    if selected.contains_key(producer.name()) {
        tracing::debug!(producer = producer.name(), "already scheduled");
        return Ok(());
    }

    for sub in producer.subproducers() {
        visit(scope, sub, in_global, selected, from_global)?;
    }
    if !producer.is_bundle() {
        selected.insert(producer.name().to_string(), Arc::clone(producer));
    }
    Ok(())
}

/// Stable topological order: among ready producers the earliest selected runs
/// first
fn order(
    scope: &Scope,
    selected: Vec<ProducerRef>,
    inputs: &[Vec<Quantity>],
    index: &QuantityIndex,
) -> Result<Vec<ProducerRef>, ResolveError> {
    let count = selected.len();
    let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(count, count);
    let nodes: Vec<NodeIndex> = (0..count).map(|i| graph.add_node(i)).collect();
    let position: HashMap<&str, usize> = selected
        .iter()
        .enumerate()
        .map(|(i, p)| (p.name(), i))
        .collect();

    for (reader, reads) in inputs.iter().enumerate() {
        for quantity in reads {
            let writer = index
                .direct_writer(scope, quantity)
                .and_then(|w| position.get(w));
            if let Some(&writer) = writer {
                graph.update_edge(nodes[writer], nodes[reader], ());
            }
        }
    }

    let mut indegree: Vec<usize> = nodes
        .iter()
        .map(|&n| graph.neighbors_directed(n, Direction::Incoming).count())
        .collect();
    let mut ready: BTreeSet<usize> = (0..count).filter(|&i| indegree[i] == 0).collect();
    let mut sorted = Vec::with_capacity(count);

    while let Some(next) = ready.pop_first() {
        sorted.push(next);
        for succ in graph.neighbors_directed(nodes[next], Direction::Outgoing) {
            let j = graph[succ];
            indegree[j] -= 1;
            if indegree[j] == 0 {
                ready.insert(j);
            }
        }
    }

    if sorted.len() < count {
        let cycle = tarjan_scc(&graph)
            .into_iter()
            .find(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
            .unwrap_or_default();
        let mut members: Vec<usize> = cycle.iter().map(|&n| graph[n]).collect();
        members.sort_unstable();
        return Err(ResolveError::CycleDetected {
            scope: scope.clone(),
            producers: members
                .into_iter()
                .map(|i| selected[i].name().to_string())
                .collect(),
        });
    }

    Ok(sorted.into_iter().map(|i| Arc::clone(&selected[i])).collect())
}

/// Drop producers none of the requested outputs depend on
///
/// Channel scopes with requested outputs are pruned first; whatever they (and
/// unpruned channels) still read from `global` is then kept there. Global
/// producers an unpruned channel requested by name are kept as well. Filters
/// always stay.
fn prune(scopes: &mut [ScopePlan], reused: &HashMap<Scope, Vec<Quantity>>) {
    let channel_pruning = scopes
        .iter()
        .any(|p| !p.scope.is_global() && !p.outputs.is_empty());
    let mut global_needed: HashSet<Quantity> = HashSet::new();

    for plan in scopes.iter_mut().filter(|p| !p.scope.is_global()) {
        if plan.outputs.is_empty() {
            if let Some(outputs) = reused.get(&plan.scope) {
                global_needed.extend(outputs.iter().cloned());
            }
            for producer in &plan.producers {
                if let Ok(inputs) = producer.call_inputs(&plan.scope) {
                    global_needed.extend(inputs);
                }
            }
            continue;
        }
        let needed = plan.outputs.iter().cloned().collect();
        global_needed.extend(prune_scope(plan, needed));
    }

    if let Some(global) = scopes.iter_mut().find(|p| p.scope.is_global()) {
        if channel_pruning || !global.outputs.is_empty() {
            global_needed.extend(global.outputs.iter().cloned());
            prune_scope(global, global_needed);
        }
    }
}

fn prune_scope(plan: &mut ScopePlan, mut needed: HashSet<Quantity>) -> HashSet<Quantity> {
    let mut kept = Vec::with_capacity(plan.producers.len());
    let mut pruned = Vec::new();

    for producer in plan.producers.iter().rev() {
        let keep = producer.is_filter() || producer.outputs().iter().any(|q| needed.contains(q));
        if keep {
            if let Ok(inputs) = producer.call_inputs(&plan.scope) {
                needed.extend(inputs);
            }
            kept.push(Arc::clone(producer));
        } else {
            pruned.push(producer.name().to_string());
        }
    }

    kept.reverse();
    pruned.reverse();
    if !pruned.is_empty() {
        tracing::info!(scope = %plan.scope, pruned = ?pruned, "pruned producers without requested outputs");
    }
    plan.producers = kept;
    plan.pruned = pruned;
    needed
}
