//! Producer registry
//!
//! Provides [`ProducerRegistry`], the name-keyed catalog every resolution
//! runs against.

use crate::error::{RegistryError, ValidationIssue};
use indexmap::IndexMap;
use nanoflow_producer::{Inputs, Producer, ProducerKind, ProducerRef};
use nanoflow_quantity::{Quantity, QuantityIndex, QuantityKind, Scope, ScopeSet};
use std::sync::Arc;

/// Registry of producers by name
///
/// Registering a group registers its sub-producers first, so iteration order
/// always lists a sub-producer before any group using it. Registering an
/// identical declaration twice is a no-op; this is how two groups can share
/// one sub-producer.
#[derive(Debug, Default, Clone)]
pub struct ProducerRegistry {
    producers: IndexMap<String, ProducerRef>,
}

impl ProducerRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a producer and, recursively, its sub-producers
    ///
    /// # Errors
    /// Returns the first structural problem found, see [`RegistryError`].
    pub fn register(&mut self, producer: ProducerRef) -> Result<(), RegistryError> {
        if let Some(existing) = self.producers.get(producer.name()) {
            if Arc::ptr_eq(existing, &producer) || **existing == *producer {
                tracing::trace!(producer = producer.name(), "already registered");
                return Ok(());
            }
            return Err(RegistryError::ConflictingDefinition {
                name: producer.name().to_string(),
            });
        }

        Self::check_declaration(&producer)?;
        for sub in producer.subproducers() {
            self.register(Arc::clone(sub))?;
        }

        tracing::debug!(
            producer = producer.name(),
            kind = producer.kind_label(),
            scopes = %producer.scopes(),
            "registered producer"
        );
        self.producers
            .insert(producer.name().to_string(), producer);
        Ok(())
    }

    /// Register several producers
    ///
    /// # Errors
    /// Stops at the first failing registration.
    pub fn register_all(
        &mut self,
        producers: impl IntoIterator<Item = ProducerRef>,
    ) -> Result<(), RegistryError> {
        producers.into_iter().try_for_each(|p| self.register(p))
    }

    fn check_declaration(producer: &Producer) -> Result<(), RegistryError> {
        let name = producer.name();
        if !Quantity::is_valid_name(name) {
            return Err(RegistryError::InvalidName {
                producer: name.to_string(),
            });
        }
        if producer.scopes().is_empty() {
            return Err(RegistryError::NoScopes {
                producer: name.to_string(),
            });
        }

        if let Some(method) = producer.misapplied_builder() {
            return Err(RegistryError::MisappliedBuilder {
                producer: name.to_string(),
                method,
                kind: producer.kind_label(),
            });
        }
        if matches!(producer.kind(), ProducerKind::Vector { .. })
            && producer.vec_configs().is_empty()
        {
            return Err(RegistryError::EmptyVectorConfigs {
                producer: name.to_string(),
            });
        }

        match producer.call() {
            Some(call) => call
                .validate()
                .map_err(|source| RegistryError::InvalidTemplate {
                    producer: name.to_string(),
                    source,
                })?,
            None if producer.is_bundle() => {}
            None => {
                return Err(RegistryError::MissingCall {
                    producer: name.to_string(),
                })
            }
        }

        if let Inputs::PerScope(map) = producer.declared_inputs() {
            for scope in producer.scopes() {
                if !map.contains_key(scope) {
                    return Err(RegistryError::ScopeInputsMismatch {
                        producer: name.to_string(),
                        scope: scope.clone(),
                    });
                }
            }
            if let Some(extra) = map.keys().find(|s| !producer.is_valid_in(s)) {
                return Err(RegistryError::ScopeInputsMismatch {
                    producer: name.to_string(),
                    scope: extra.clone(),
                });
            }
        }

        if matches!(producer.kind(), ProducerKind::Group { .. }) {
            if producer.subproducers().is_empty() {
                return Err(RegistryError::EmptyGroup {
                    group: name.to_string(),
                });
            }
            for sub in producer.subproducers() {
                let missing = producer.scopes().missing_from(sub.scopes());
                if !missing.is_empty() {
                    return Err(RegistryError::SubproducerScope {
                        group: name.to_string(),
                        subproducer: sub.name().to_string(),
                        missing: missing.into_iter().cloned().collect(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Lookup by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ProducerRef> {
        self.producers.get(name)
    }

    /// Check if a producer is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.producers.contains_key(name)
    }

    /// Number of registered producers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.producers.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }

    /// Iterate in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ProducerRef> {
        self.producers.values()
    }

    /// Producers valid in `scope`
    pub fn in_scope<'a>(&'a self, scope: &'a Scope) -> impl Iterator<Item = &'a ProducerRef> {
        self.producers.values().filter(move |p| p.is_valid_in(scope))
    }

    /// Every scope mentioned by a registered producer
    #[must_use]
    pub fn scopes(&self) -> ScopeSet {
        self.producers
            .values()
            .flat_map(|p| p.scopes().iter().cloned())
            .collect()
    }

    /// Names of non-bundle producers writing `quantity` in `scope`, or in
    /// `global` for channel scopes
    #[must_use]
    pub fn providers_of(&self, quantity: &Quantity, scope: &Scope) -> Vec<String> {
        self.producers
            .values()
            .filter(|p| !p.is_bundle())
            .filter(|p| p.is_valid_in(scope) || p.is_valid_in(&Scope::GLOBAL))
            .filter(|p| p.outputs().contains(quantity))
            .map(|p| p.name().to_string())
            .collect()
    }

    /// NanoAOD branch with this name read by any registered producer
    #[must_use]
    pub fn nano_aod_column(&self, name: &str) -> Option<Quantity> {
        let probe = Quantity::new(name, QuantityKind::NanoAod);
        self.producers.values().find_map(|p| {
            let found = match p.declared_inputs() {
                Inputs::Uniform(inputs) => inputs.iter().find(|q| **q == probe),
                Inputs::PerScope(map) => map.values().flatten().find(|q| **q == probe),
            };
            found.filter(|q| q.is_nano_aod()).cloned()
        })
    }

    /// Check catalog-wide structural properties
    ///
    /// - every output is written by one producer per scope, and channel
    ///   producers do not rewrite `global` outputs
    /// - every input is a NanoAOD branch or an output of a producer valid in
    ///   the same scope or in `global`
    /// - bundle outputs equal their sub-producer outputs
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let mut issues = Vec::new();
        let mut index = QuantityIndex::new();
        let scopes = self.scopes();

        // global claims first so channel shadowing is detected
        let ordered_scopes = scopes
            .iter()
            .filter(|s| s.is_global())
            .chain(scopes.iter().filter(|s| !s.is_global()));
        for scope in ordered_scopes {
            for producer in self.in_scope(scope).filter(|p| !p.is_bundle()) {
                for output in producer.outputs() {
                    if let Err(e) = index.claim(scope, &output, producer.name()) {
                        issues.push(ValidationIssue::DuplicateOutput(e));
                    }
                }
            }
        }

        for producer in self.producers.values() {
            if producer.is_bundle() {
                let combined: Vec<Quantity> = producer
                    .subproducers()
                    .iter()
                    .flat_map(|s| s.outputs())
                    .collect();
                if combined != producer.outputs() {
                    issues.push(ValidationIssue::BundleOutputMismatch {
                        group: producer.name().to_string(),
                    });
                }
                continue;
            }

            for scope in producer.scopes() {
                let inputs = match producer.call_inputs(scope) {
                    Ok(inputs) => inputs,
                    Err(e) => {
                        issues.push(ValidationIssue::Producer(e));
                        continue;
                    }
                };
                for input in inputs {
                    if !index.is_available(scope, &input) {
                        issues.push(ValidationIssue::UnresolvedInput {
                            producer: producer.name().to_string(),
                            quantity: input.name().to_string(),
                            scope: scope.clone(),
                        });
                    }
                }
            }
        }

        if issues.is_empty() {
            tracing::info!(producers = self.len(), scopes = scopes.len(), "registry valid");
        } else {
            tracing::warn!(issues = issues.len(), "registry validation found issues");
        }

        ValidationReport {
            producer_count: self.len(),
            scope_count: scopes.len(),
            issues,
        }
    }
}

/// Result of [`ProducerRegistry::validate`]
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Registered producers
    pub producer_count: usize,
    /// Distinct scopes
    pub scope_count: usize,
    /// Problems found
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// True if no issue was found
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Convert into a result
    ///
    /// # Errors
    /// Returns the issue list if not empty.
    pub fn into_result(self) -> Result<Self, Vec<ValidationIssue>> {
        if self.issues.is_empty() {
            Ok(self)
        } else {
            Err(self.issues)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MUON_PT: Quantity = Quantity::nano_aod("Muon_pt");
    const MUON_ETA: Quantity = Quantity::nano_aod("Muon_eta");
    const BASE_MASK: Quantity = Quantity::derived("base_muons_mask");

    fn cut(name: &str, input: Quantity, scopes: &[&'static str]) -> ProducerRef {
        Producer::builder(name)
            .call("physicsobject::Cut({df}, {input}, {output})")
            .inputs([input])
            .internal_output()
            .scopes(scopes)
            .build()
    }

    fn base_muons(subs: Vec<ProducerRef>) -> ProducerRef {
        Producer::group("BaseMuons")
            .call("physicsobject::CombineMasks({df}, {output}, {input})")
            .outputs([BASE_MASK])
            .scopes(&["global"])
            .subproducers(subs)
            .build()
    }

    #[test]
    fn registry_new_empty() {
        let registry = ProducerRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn register_group_registers_subs_first() {
        let mut registry = ProducerRegistry::new();
        registry
            .register(base_muons(vec![
                cut("MuonPtCut", MUON_PT, &["global"]),
                cut("MuonEtaCut", MUON_ETA, &["global"]),
            ]))
            .unwrap();

        let names: Vec<_> = registry.iter().map(|p| p.name()).collect();
        assert_eq!(names, ["MuonPtCut", "MuonEtaCut", "BaseMuons"]);
    }

    #[test]
    fn shared_subproducer_deduplicated() {
        let eta = cut("MuonEtaCut", MUON_ETA, &["global"]);
        let mut registry = ProducerRegistry::new();
        registry.register(base_muons(vec![Arc::clone(&eta)])).unwrap();

        let other = Producer::group("DiMuonVetoMuons")
            .call("physicsobject::CombineMasks({df}, {output}, {input})")
            .scopes(&["global"])
            .subproducers([cut("MuonEtaCut", MUON_ETA, &["global"])])
            .build();
        registry.register(other).unwrap();

        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn conflicting_definition_rejected() {
        let mut registry = ProducerRegistry::new();
        registry.register(cut("MuonPtCut", MUON_PT, &["global"])).unwrap();

        let err = registry
            .register(cut("MuonPtCut", MUON_ETA, &["global"]))
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::ConflictingDefinition {
                name: "MuonPtCut".into()
            }
        );
    }

    #[test]
    fn empty_group_rejected() {
        let mut registry = ProducerRegistry::new();
        let err = registry.register(base_muons(Vec::new())).unwrap_err();
        assert!(matches!(err, RegistryError::EmptyGroup { .. }));
    }

    #[test]
    fn vector_without_configs_rejected() {
        let met = Producer::vector("MetFilter")
            .call(r#"metfilter::ApplyMetFilter({df}, "{met_filters}", "{met_filters}")"#)
            .no_output()
            .scopes(&["global"])
            .build();

        let mut registry = ProducerRegistry::new();
        assert_eq!(
            registry.register(met),
            Err(RegistryError::EmptyVectorConfigs {
                producer: "MetFilter".into()
            })
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn misapplied_builder_call_rejected() {
        let plain = Producer::builder("MetFilter")
            .call(r#"metfilter::ApplyMetFilter({df}, "{met_filters}", "{met_filters}")"#)
            .no_output()
            .scopes(&["global"])
            .vec_configs(&["met_filters"])
            .build();
        assert_eq!(
            ProducerRegistry::new().register(plain),
            Err(RegistryError::MisappliedBuilder {
                producer: "MetFilter".into(),
                method: "vec_configs",
                kind: "producer",
            })
        );

        let not_a_group = Producer::builder("Lumi")
            .call("basefunctions::rename<UInt_t>({df}, {input}, {output})")
            .scopes(&["global"])
            .subproducers([cut("MuonPtCut", MUON_PT, &["global"])])
            .build();
        assert!(matches!(
            ProducerRegistry::new().register(not_a_group),
            Err(RegistryError::MisappliedBuilder { method: "subproducers", .. })
        ));
    }

    #[test]
    fn subproducer_scope_must_cover_group() {
        let group = Producer::group("GoodMuons")
            .call("physicsobject::CombineMasks({df}, {output}, {input})")
            .outputs([Quantity::derived("good_muons_mask")])
            .scopes(&["em", "mt"])
            .subproducers([cut("GoodMuonPtCut", MUON_PT, &["mt"])])
            .build();

        let err = ProducerRegistry::new().register(group).unwrap_err();
        assert_eq!(
            err,
            RegistryError::SubproducerScope {
                group: "GoodMuons".into(),
                subproducer: "GoodMuonPtCut".into(),
                missing: vec![Scope::new("em")],
            }
        );
    }

    #[test]
    fn missing_call_and_bad_template() {
        let no_call = Producer::builder("NoCall").scopes(&["global"]).build();
        assert!(matches!(
            ProducerRegistry::new().register(no_call),
            Err(RegistryError::MissingCall { .. })
        ));

        let bad = Producer::builder("Bad")
            .call("f({df}, {1})")
            .scopes(&["global"])
            .build();
        assert!(matches!(
            ProducerRegistry::new().register(bad),
            Err(RegistryError::InvalidTemplate { .. })
        ));
    }

    #[test]
    fn no_scopes_and_bad_name() {
        let unscoped = Producer::builder("Unscoped").call("f({df})").build();
        assert!(matches!(
            ProducerRegistry::new().register(unscoped),
            Err(RegistryError::NoScopes { .. })
        ));

        let bad_name = Producer::builder("bad name")
            .call("f({df})")
            .scopes(&["global"])
            .build();
        assert!(matches!(
            ProducerRegistry::new().register(bad_name),
            Err(RegistryError::InvalidName { .. })
        ));
    }

    #[test]
    fn per_scope_inputs_must_match_scopes() {
        let veto = Producer::builder("ExtraMuonsVeto")
            .call("physicsobject::LeptonVetoFlag({df}, {output}, {input})")
            .inputs_per_scope([("mt", vec![BASE_MASK])])
            .outputs([Quantity::derived("extramuon_veto")])
            .scopes(&["mt", "et"])
            .build();

        let err = ProducerRegistry::new().register(veto).unwrap_err();
        assert_eq!(
            err,
            RegistryError::ScopeInputsMismatch {
                producer: "ExtraMuonsVeto".into(),
                scope: Scope::new("et"),
            }
        );
    }

    #[test]
    fn validate_accepts_consistent_catalog() {
        let mut registry = ProducerRegistry::new();
        registry
            .register(base_muons(vec![cut("MuonPtCut", MUON_PT, &["global"])]))
            .unwrap();
        registry
            .register(
                Producer::builder("VetoFlag")
                    .call("physicsobject::LeptonVetoFlag({df}, {output}, {input})")
                    .inputs([BASE_MASK])
                    .outputs([Quantity::derived("muon_veto")])
                    .scopes(&["mt"])
                    .build(),
            )
            .unwrap();

        let report = registry.validate();
        assert!(report.is_valid(), "{:?}", report.issues);
        assert_eq!(report.producer_count, 3);
        assert_eq!(report.scope_count, 2);
    }

    #[test]
    fn validate_reports_duplicates_and_unresolved() {
        let mut registry = ProducerRegistry::new();
        for name in ["Lumi", "OtherLumi"] {
            registry
                .register(
                    Producer::builder(name)
                        .call("basefunctions::rename<UInt_t>({df}, {input}, {output})")
                        .inputs([Quantity::nano_aod("luminosityBlock")])
                        .outputs([Quantity::derived("lumi")])
                        .scopes(&["global"])
                        .build(),
                )
                .unwrap();
        }
        registry
            .register(
                Producer::builder("Reader")
                    .call("f({df}, {input}, {output})")
                    .inputs([Quantity::derived("ditaupair")])
                    .outputs([Quantity::derived("pt_1")])
                    .scopes(&["mt"])
                    .build(),
            )
            .unwrap();

        let issues = registry.validate().issues;
        assert_eq!(issues.len(), 2);
        assert!(matches!(issues[0], ValidationIssue::DuplicateOutput(_)));
        assert!(matches!(
            &issues[1],
            ValidationIssue::UnresolvedInput { quantity, .. } if quantity == "ditaupair"
        ));
    }

    #[test]
    fn providers_and_nano_aod_lookup() {
        let mut registry = ProducerRegistry::new();
        registry
            .register(base_muons(vec![cut("MuonPtCut", MUON_PT, &["global"])]))
            .unwrap();

        assert_eq!(
            registry.providers_of(&BASE_MASK, &Scope::new("mt")),
            vec!["BaseMuons".to_string()]
        );
        assert!(registry.providers_of(&Quantity::derived("x"), &Scope::GLOBAL).is_empty());
        assert_eq!(registry.nano_aod_column("Muon_pt"), Some(MUON_PT));
        assert_eq!(registry.nano_aod_column("Muon_phi"), None);
    }
}
