//! Analysis scopes
//!
//! A [`Scope`] labels the analysis channel a producer applies to. The
//! `global` scope is evaluated first and its outputs are visible to every
//! channel scope.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Analysis-channel label
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scope(Cow<'static, str>);

impl Scope {
    /// The shared scope evaluated before any channel
    pub const GLOBAL: Scope = Scope(Cow::Borrowed("global"));

    /// Scope with a static label
    #[inline]
    #[must_use]
    pub const fn from_static(label: &'static str) -> Self {
        Self(Cow::Borrowed(label))
    }

    /// Scope with a runtime label
    #[inline]
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(Cow::Owned(label.into()))
    }

    /// Label as string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the `global` scope
    #[inline]
    #[must_use]
    pub fn is_global(&self) -> bool {
        *self == Self::GLOBAL
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Scope {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Scope {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Insertion-ordered set of scopes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeSet {
    scopes: IndexSet<Scope>,
}

impl ScopeSet {
    /// Create empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from static labels, keeping first-seen order
    #[must_use]
    pub fn from_labels(labels: &[&'static str]) -> Self {
        labels.iter().copied().map(Scope::from_static).collect()
    }

    /// Add a scope, returns false if already present
    pub fn insert(&mut self, scope: Scope) -> bool {
        self.scopes.insert(scope)
    }

    /// Check membership
    #[inline]
    #[must_use]
    pub fn contains(&self, scope: &Scope) -> bool {
        self.scopes.contains(scope)
    }

    /// True if both sets share at least one scope
    #[must_use]
    pub fn overlaps(&self, other: &ScopeSet) -> bool {
        self.scopes.iter().any(|s| other.contains(s))
    }

    /// True if every scope of `self` is in `other`
    #[must_use]
    pub fn is_subset(&self, other: &ScopeSet) -> bool {
        self.scopes.iter().all(|s| other.contains(s))
    }

    /// Scopes of `self` missing from `other`
    #[must_use]
    pub fn missing_from<'a>(&'a self, other: &'a ScopeSet) -> Vec<&'a Scope> {
        self.scopes.iter().filter(|s| !other.contains(s)).collect()
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

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter()
    }
}

impl FromIterator<Scope> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = Scope>>(iter: I) -> Self {
        Self {
            scopes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ScopeSet {
    type Item = &'a Scope;
    type IntoIter = indexmap::set::Iter<'a, Scope>;

    fn into_iter(self) -> Self::IntoIter {
        self.scopes.iter()
    }
}

impl Display for ScopeSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.scopes.iter().map(Scope::as_str).collect();
        write!(f, "[{}]", labels.join(", "))
    }
}
