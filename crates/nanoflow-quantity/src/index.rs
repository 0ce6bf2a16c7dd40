//! Per-scope writer ownership
//!
//! Provides [`QuantityIndex`], which records the single producer allowed to
//! write each quantity in each scope.

use crate::quantity::Quantity;
use crate::scope::Scope;
use indexmap::IndexMap;

/// Writer ownership table
///
/// A quantity is *available* in a scope when it is a NanoAOD branch, when a
/// producer claimed it in that scope, or when a producer claimed it in
/// `global`.
#[derive(Debug, Clone, Default)]
pub struct QuantityIndex {
    writers: IndexMap<Scope, IndexMap<Quantity, String>>,
}

impl QuantityIndex {
    /// Create empty index
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `producer` as the writer of `quantity` in `scope`
    ///
    /// Claiming twice with the same producer is a no-op.
    ///
    /// # Errors
    /// - [`QuantityError::InvalidName`] for malformed column names
    /// - [`QuantityError::NanoAodOverwrite`] when claiming a raw branch
    /// - [`QuantityError::AlreadyClaimed`] when another producer owns the
    ///   quantity in this scope, or in `global` for a channel scope
    pub fn claim(
        &mut self,
        scope: &Scope,
        quantity: &Quantity,
        producer: &str,
    ) -> Result<(), QuantityError> {
        if !Quantity::is_valid_name(quantity.name()) {
            return Err(QuantityError::InvalidName(quantity.name().to_string()));
        }
        if quantity.is_nano_aod() {
            return Err(QuantityError::NanoAodOverwrite {
                quantity: quantity.name().to_string(),
                producer: producer.to_string(),
            });
        }

        if let Some(owner) = self.direct_writer(scope, quantity) {
            if owner == producer {
                return Ok(());
            }
            return Err(QuantityError::AlreadyClaimed {
                quantity: quantity.name().to_string(),
                scope: scope.clone(),
                owner: owner.to_string(),
                claimant: producer.to_string(),
            });
        }

        if !scope.is_global() {
            if let Some(owner) = self.direct_writer(&Scope::GLOBAL, quantity) {
                if owner != producer {
                    return Err(QuantityError::AlreadyClaimed {
                        quantity: quantity.name().to_string(),
                        scope: Scope::GLOBAL,
                        owner: owner.to_string(),
                        claimant: producer.to_string(),
                    });
                }
            }
        }

        self.writers
            .entry(scope.clone())
            .or_default()
            .insert(quantity.clone(), producer.to_string());
        Ok(())
    }

    /// Writer of `quantity` claimed directly in `scope`, without `global` fallback
    #[must_use]
    pub fn direct_writer(&self, scope: &Scope, quantity: &Quantity) -> Option<&str> {
        self.writers
            .get(scope)
            .and_then(|w| w.get(quantity))
            .map(String::as_str)
    }

    /// Writer of `quantity` as seen from `scope`
    ///
    /// Falls back to the `global` writer for channel scopes.
    #[must_use]
    pub fn writer(&self, scope: &Scope, quantity: &Quantity) -> Option<&str> {
        self.direct_writer(scope, quantity).or_else(|| {
            if scope.is_global() {
                None
            } else {
                self.direct_writer(&Scope::GLOBAL, quantity)
            }
        })
    }

    /// Check whether `quantity` can be read in `scope`
    #[must_use]
    pub fn is_available(&self, scope: &Scope, quantity: &Quantity) -> bool {
        quantity.is_nano_aod() || self.writer(scope, quantity).is_some()
    }

    /// Quantities claimed directly in `scope`, in claim order
    pub fn claimed_in<'a>(&'a self, scope: &Scope) -> impl Iterator<Item = &'a Quantity> + 'a {
        self.writers.get(scope).into_iter().flat_map(IndexMap::keys)
    }

    /// Scopes with at least one claim
    pub fn scopes(&self) -> impl Iterator<Item = &Scope> {
        self.writers.keys()
    }

    /// Total number of claims across scopes
    #[must_use]
    pub fn len(&self) -> usize {
        self.writers.values().map(IndexMap::len).sum()
    }

    /// Check if no quantity was claimed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Errors for quantity ownership
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuantityError {
    /// Two producers write the same column
    #[error("quantity '{quantity}' in scope '{scope}' is already written by '{owner}', cannot be claimed by '{claimant}'")]
    AlreadyClaimed {
        /// Column name
        quantity: String,
        /// Scope holding the existing claim
        scope: Scope,
        /// Existing writer
        owner: String,
        /// Rejected writer
        claimant: String,
    },

    /// Producer declares a raw branch as output
    #[error("producer '{producer}' cannot overwrite NanoAOD branch '{quantity}'")]
    NanoAodOverwrite {
        /// Column name
        quantity: String,
        /// Offending producer
        producer: String,
    },

    /// Malformed column name
    #[error("invalid quantity name: '{0}'")]
    InvalidName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mt() -> Scope {
        Scope::from_static("mt")
    }

    #[test]
    fn claim_and_lookup() {
        let mut index = QuantityIndex::new();
        let q = Quantity::derived("good_muons_mask");

        index.claim(&mt(), &q, "GoodMuons").unwrap();

        assert_eq!(index.writer(&mt(), &q), Some("GoodMuons"));
        assert!(index.is_available(&mt(), &q));
        assert!(!index.is_available(&Scope::from_static("et"), &q));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn reclaim_by_same_producer_is_noop() {
        let mut index = QuantityIndex::new();
        let q = Quantity::derived("lumi");

        index.claim(&Scope::GLOBAL, &q, "Lumi").unwrap();
        index.claim(&Scope::GLOBAL, &q, "Lumi").unwrap();

        assert_eq!(index.len(), 1);
    }

    #[test]
    fn duplicate_writer_rejected() {
        let mut index = QuantityIndex::new();
        let q = Quantity::derived("lumi");

        index.claim(&Scope::GLOBAL, &q, "Lumi").unwrap();
        let err = index.claim(&Scope::GLOBAL, &q, "OtherLumi").unwrap_err();

        assert!(matches!(err, QuantityError::AlreadyClaimed { ref owner, .. } if owner == "Lumi"));
    }

    #[test]
    fn channel_cannot_shadow_global_output() {
        let mut index = QuantityIndex::new();
        let q = Quantity::derived("base_muons_mask");

        index.claim(&Scope::GLOBAL, &q, "BaseMuons").unwrap();
        let err = index.claim(&mt(), &q, "ChannelMuons").unwrap_err();

        assert!(matches!(err, QuantityError::AlreadyClaimed { ref scope, .. } if scope.is_global()));
    }

    #[test]
    fn same_name_in_disjoint_channels_is_allowed() {
        let mut index = QuantityIndex::new();
        let q = Quantity::derived("ditaupair");

        index.claim(&mt(), &q, "MuTauPairSelection").unwrap();
        index.claim(&Scope::from_static("em"), &q, "ElMuPairSelection").unwrap();

        assert_eq!(index.scopes().count(), 2);
    }

    #[test]
    fn global_outputs_visible_in_channels() {
        let mut index = QuantityIndex::new();
        let q = Quantity::derived("puweight");
        index.claim(&Scope::GLOBAL, &q, "PUweights").unwrap();

        assert_eq!(index.writer(&mt(), &q), Some("PUweights"));
        assert_eq!(index.claimed_in(&mt()).count(), 0);
    }

    #[test]
    fn nano_aod_cannot_be_claimed() {
        let mut index = QuantityIndex::new();
        let err = index
            .claim(&Scope::GLOBAL, &Quantity::nano_aod("Muon_pt"), "Bad")
            .unwrap_err();
        assert!(matches!(err, QuantityError::NanoAodOverwrite { .. }));
    }

    #[test]
    fn invalid_name_rejected() {
        let mut index = QuantityIndex::new();
        let err = index
            .claim(&Scope::GLOBAL, &Quantity::new("bad name", Default::default()), "P")
            .unwrap_err();
        assert_eq!(err, QuantityError::InvalidName("bad name".into()));
    }
}
