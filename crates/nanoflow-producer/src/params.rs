//! Configuration parameter values
//!
//! Provides [`ParamValue`] and the [`ParamSource`] lookup seam used when a
//! call template names a configuration key.

use indexmap::IndexMap;
use nanoflow_quantity::Scope;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Value of a run-configuration parameter
///
/// Deserializes untagged, so `23.0`, `"Tight"`, `true` and
/// `["Flag_goodVertices"]` all map directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Boolean flag
    Bool(bool),

    /// Integer
    Int(i64),

    /// Floating point number
    Float(f64),

    /// String, inserted verbatim
    Str(String),

    /// List of values
    List(Vec<ParamValue>),
}

impl ParamValue {
    /// Elements if this is a list
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[ParamValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// String content if this is a string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Render as a C++ argument fragment
    ///
    /// Scalars render bare. List elements are joined with `", "`; string
    /// elements are quoted and nested lists are wrapped in braces.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::List(items) => items
                .iter()
                .map(Self::render_element)
                .collect::<Vec<_>>()
                .join(", "),
            other => other.render_scalar(),
        }
    }

    fn render_element(&self) -> String {
        match self {
            Self::Str(s) => format!("\"{s}\""),
            Self::List(_) => format!("{{{}}}", self.render()),
            other => other.render_scalar(),
        }
    }

    fn render_scalar(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Str(s) => s.clone(),
            Self::List(_) => self.render(),
        }
    }
}

impl Display for ParamValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

/// Lookup of configuration parameters per scope
pub trait ParamSource {
    /// Value of `key` as seen from `scope`
    fn lookup(&self, scope: &Scope, key: &str) -> Option<&ParamValue>;
}

/// Flat parameter table, identical for every scope
pub type ParamTable = IndexMap<String, ParamValue>;

impl ParamSource for ParamTable {
    fn lookup(&self, _scope: &Scope, key: &str) -> Option<&ParamValue> {
        self.get(key)
    }
}
