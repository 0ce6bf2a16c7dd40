//! Quantity - named per-event columns
//!
//! Provides [`Quantity`], the key that ties producer inputs and outputs to
//! columns of the event dataframe.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

/// Where a quantity comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityKind {
    /// Raw branch of the input NanoAOD file, always available
    NanoAod,

    /// Column written by a producer, may be requested as ntuple output
    #[default]
    Derived,

    /// Generated column carrying a sub-producer result into its group
    Internal,
}

/// Named per-event data column
///
/// Equality, ordering and hashing only look at the name: the kind is
/// descriptive metadata used during resolution.
///
/// # Example
/// ```
/// use nanoflow_quantity::{Quantity, QuantityKind};
///
/// const MUON_ETA: Quantity = Quantity::nano_aod("Muon_eta");
/// assert_eq!(MUON_ETA.name(), "Muon_eta");
/// assert_eq!(MUON_ETA.kind(), QuantityKind::NanoAod);
/// assert_eq!(MUON_ETA.quoted(), "\"Muon_eta\"");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quantity {
    name: Cow<'static, str>,
    #[serde(default)]
    kind: QuantityKind,
}

impl Quantity {
    /// Raw NanoAOD branch
    #[inline]
    #[must_use]
    pub const fn nano_aod(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            kind: QuantityKind::NanoAod,
        }
    }

    /// Producer-written column with a static name
    #[inline]
    #[must_use]
    pub const fn derived(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            kind: QuantityKind::Derived,
        }
    }

    /// Internal column generated for a producer declared without outputs
    ///
    /// The name only depends on the producer name, so every group sharing the
    /// sub-producer reads the same column.
    #[must_use]
    pub fn internal(producer: &str) -> Self {
        Self {
            name: Cow::Owned(format!("{producer}_output")),
            kind: QuantityKind::Internal,
        }
    }

    /// Quantity with a runtime name
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, kind: QuantityKind) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            kind,
        }
    }

    /// Column name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Quantity kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> QuantityKind {
        self.kind
    }

    /// True for raw NanoAOD branches
    #[inline]
    #[must_use]
    pub fn is_nano_aod(&self) -> bool {
        self.kind == QuantityKind::NanoAod
    }

    /// True for generated internal columns
    #[inline]
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.kind == QuantityKind::Internal
    }

    /// Name wrapped in double quotes, as passed to the generated call
    #[must_use]
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.name)
    }

    /// Check that the name is a valid column identifier
    ///
    /// Columns end up as C++ string literals and ntuple branch names, so only
    /// ASCII letters, digits and underscores are accepted, and the name must
    /// not start with a digit.
    #[must_use]
    pub fn is_valid_name(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Quantity {}

impl Hash for Quantity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quantity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn quantity_const_constructors() {
        const PT: Quantity = Quantity::nano_aod("Muon_pt");
        const MASK: Quantity = Quantity::derived("base_muons_mask");

        assert!(PT.is_nano_aod());
        assert_eq!(MASK.kind(), QuantityKind::Derived);
        assert_eq!(MASK.name(), "base_muons_mask");
    }

    #[test]
    fn internal_name_follows_producer() {
        let q = Quantity::internal("MuonEtaCut");
        assert_eq!(q.name(), "MuonEtaCut_output");
        assert!(q.is_internal());
        assert_eq!(q, Quantity::internal("MuonEtaCut"));
    }

    #[test]
    fn equality_ignores_kind() {
        let a = Quantity::derived("pt_1");
        let b = Quantity::new("pt_1", QuantityKind::Internal);
        assert_eq!(a, b);

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn ordering_by_name() {
        let mut qs = vec![
            Quantity::derived("b"),
            Quantity::nano_aod("a"),
            Quantity::derived("c"),
        ];
        qs.sort();
        let names: Vec<_> = qs.iter().map(Quantity::name).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn quoted_and_display() {
        let q = Quantity::nano_aod("Tau_pt");
        assert_eq!(q.quoted(), "\"Tau_pt\"");
        assert_eq!(q.to_string(), "Tau_pt");
    }

    #[test]
    fn valid_names() {
        assert!(Quantity::is_valid_name("Muon_pfRelIso04_all"));
        assert!(Quantity::is_valid_name("_hidden"));
        assert!(!Quantity::is_valid_name(""));
        assert!(!Quantity::is_valid_name("1st"));
        assert!(!Quantity::is_valid_name("has space"));
        assert!(!Quantity::is_valid_name("dash-ed"));
    }

    #[test]
    fn serde_defaults_to_derived() {
        let q: Quantity = serde_json::from_str(r#"{"name":"lumi"}"#).unwrap();
        assert_eq!(q.kind(), QuantityKind::Derived);
        assert_eq!(q.name(), "lumi");
    }
}
