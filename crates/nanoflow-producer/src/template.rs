//! Call templates
//!
//! A [`CallTemplate`] is the C++ call expression of a producer with `{name}`
//! placeholders. Built-in placeholders are filled from the producer itself,
//! everything else comes from the run configuration.
//!
//! | placeholder | rendered as |
//! |---|---|
//! | `{df}` | dataframe handle the call reads |
//! | `{input}` | `"a", "b"` |
//! | `{output}` | `"out"` |
//! | `{input_vec}` / `{output_vec}` | `{"a", "b"}` |
//! | `{vec_open}` / `{vec_close}` | `{` / `}` |

use crate::params::{ParamSource, ParamValue};
use indexmap::IndexMap;
use nanoflow_quantity::{Quantity, Scope};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid placeholder regex")
});

/// Placeholders filled from the producer rather than the configuration
pub const BUILTIN_PLACEHOLDERS: &[&str] = &[
    "df",
    "input",
    "output",
    "input_vec",
    "output_vec",
    "vec_open",
    "vec_close",
];

/// C++ call expression with `{name}` placeholders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallTemplate {
    raw: Cow<'static, str>,
}

/// Values used to fill a template
pub struct RenderContext<'a> {
    /// Scope the call is generated for
    pub scope: &'a Scope,

    /// Dataframe handle read by the call
    pub df: &'a str,

    /// Ordered call inputs
    pub inputs: &'a [Quantity],

    /// Ordered call outputs
    pub outputs: &'a [Quantity],

    /// Run configuration
    pub params: &'a dyn ParamSource,

    /// Per-call values taking precedence over `params` (vector expansion)
    pub overrides: Option<&'a IndexMap<String, ParamValue>>,
}

impl CallTemplate {
    /// Template from a static string
    #[inline]
    #[must_use]
    pub const fn from_static(raw: &'static str) -> Self {
        Self {
            raw: Cow::Borrowed(raw),
        }
    }

    /// Template from a runtime string
    #[inline]
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: Cow::Owned(raw.into()),
        }
    }

    /// Template from a runtime string, checked with [`Self::validate`]
    ///
    /// # Errors
    /// See [`Self::validate`]
    pub fn parse(raw: impl Into<String>) -> Result<Self, TemplateError> {
        let template = Self::new(raw);
        template.validate()?;
        Ok(template)
    }

    /// Unrendered template text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// All placeholder names in order of appearance (with repeats)
    #[must_use]
    pub fn placeholders(&self) -> Vec<&str> {
        PLACEHOLDER
            .captures_iter(&self.raw)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect()
    }

    /// Placeholders that must come from the run configuration, deduplicated
    #[must_use]
    pub fn config_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for key in self.placeholders() {
            if !BUILTIN_PLACEHOLDERS.contains(&key) && !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }

    /// Check if the template references `{name}`
    #[must_use]
    pub fn uses(&self, name: &str) -> bool {
        self.placeholders().contains(&name)
    }

    /// Check the template is well formed
    ///
    /// # Errors
    /// - [`TemplateError::Empty`] for blank templates
    /// - [`TemplateError::StrayBrace`] for a brace outside a placeholder
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.raw.trim().is_empty() {
            return Err(TemplateError::Empty);
        }

        let stripped = PLACEHOLDER.replace_all(&self.raw, |caps: &regex::Captures<'_>| {
            " ".repeat(caps[0].len())
        });
        if let Some(position) = stripped.find(['{', '}']) {
            return Err(TemplateError::StrayBrace {
                template: self.raw.to_string(),
                position,
            });
        }
        Ok(())
    }

    /// Fill every placeholder
    ///
    /// # Errors
    /// - [`TemplateError::UnresolvedPlaceholder`] when a configuration key is
    ///   missing for the scope
    /// - [`TemplateError::MissingOutputs`] when `{output}` is used by a
    ///   producer without outputs
    pub fn render(&self, ctx: &RenderContext<'_>) -> Result<String, TemplateError> {
        let mut rendered = String::with_capacity(self.raw.len() + 32);
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(&self.raw) {
            let (Some(whole), Some(key)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            rendered.push_str(&self.raw[last..whole.start()]);
            rendered.push_str(&Self::fill(key.as_str(), ctx)?);
            last = whole.end();
        }
        rendered.push_str(&self.raw[last..]);

        Ok(rendered)
    }

    fn fill(key: &str, ctx: &RenderContext<'_>) -> Result<String, TemplateError> {
        let value = match key {
            "df" => ctx.df.to_string(),
            "input" => join_quoted(ctx.inputs),
            "input_vec" => format!("{{{}}}", join_quoted(ctx.inputs)),
            "output" | "output_vec" => {
                if ctx.outputs.is_empty() {
                    return Err(TemplateError::MissingOutputs {
                        placeholder: key.to_string(),
                    });
                }
                if key == "output" {
                    join_quoted(ctx.outputs)
                } else {
                    format!("{{{}}}", join_quoted(ctx.outputs))
                }
            }
            "vec_open" => "{".to_string(),
            "vec_close" => "}".to_string(),
            other => ctx
                .overrides
                .and_then(|o| o.get(other))
                .or_else(|| ctx.params.lookup(ctx.scope, other))
                .map(ParamValue::render)
                .ok_or_else(|| TemplateError::UnresolvedPlaceholder {
                    key: other.to_string(),
                    scope: ctx.scope.clone(),
                })?,
        };
        Ok(value)
    }
}

fn join_quoted(quantities: &[Quantity]) -> String {
    quantities
        .iter()
        .map(Quantity::quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Display for CallTemplate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Template errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// Configuration key not found
    #[error("no value for '{{{key}}}' in scope '{scope}'")]
    UnresolvedPlaceholder {
        /// Placeholder name
        key: String,
        /// Scope of the lookup
        scope: Scope,
    },

    /// `{output}` used without outputs
    #[error("'{{{placeholder}}}' used by a producer without outputs")]
    MissingOutputs {
        /// Placeholder name
        placeholder: String,
    },

    /// Unbalanced brace
    #[error("stray brace at byte {position} in '{template}'")]
    StrayBrace {
        /// Offending template
        template: String,
        /// Byte offset
        position: usize,
    },

    /// Blank template
    #[error("call template is empty")]
    Empty,
}
