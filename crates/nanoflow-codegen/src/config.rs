//! Run configuration
//!
//! A [`RunConfig`] names the scopes to generate, the producers and output
//! columns per scope, and the parameter values filled into call templates.

use crate::error::ConfigError;
use indexmap::IndexMap;
use nanoflow_graph::ResolveRequest;
use nanoflow_producer::{ParamSource, ParamTable, ParamValue};
use nanoflow_quantity::Scope;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration of one generation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Data-taking era
    #[serde(default)]
    pub era: String,

    /// Sample type
    #[serde(default)]
    pub sample: String,

    /// Scopes to generate, in order
    pub scopes: Vec<Scope>,

    /// Parameter tables by scope; `global` holds defaults
    #[serde(default)]
    pub parameters: IndexMap<Scope, ParamTable>,

    /// Requested producers by scope
    #[serde(default)]
    pub producers: IndexMap<Scope, Vec<String>>,

    /// Requested output columns by scope
    #[serde(default)]
    pub outputs: IndexMap<Scope, Vec<String>>,
}

impl RunConfig {
    /// Parse from TOML string
    ///
    /// # Errors
    /// Returns error if TOML is invalid or the config is inconsistent
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from YAML string
    ///
    /// # Errors
    /// Returns error if YAML is invalid or the config is inconsistent
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from JSON string
    ///
    /// # Errors
    /// Returns error if JSON is invalid or the config is inconsistent
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a file, choosing the parser by extension
    ///
    /// # Errors
    /// - [`ConfigError::Io`] if the file cannot be read
    /// - [`ConfigError::UnsupportedFormat`] for unknown extensions
    /// - parse and consistency errors
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self, ConfigError> = match extension.as_deref() {
            Some("toml") => Self::from_toml,
            Some("yaml" | "yml") => Self::from_yaml,
            Some("json") => Self::from_json,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = parse(&content)?;
        tracing::debug!(path = %path.display(), scopes = config.scopes.len(), "loaded run config");
        Ok(config)
    }

    /// Check that every table only names configured scopes
    ///
    /// `parameters.global` is always allowed.
    ///
    /// # Errors
    /// [`ConfigError::NoScopes`] or [`ConfigError::UnknownScope`]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scopes.is_empty() {
            return Err(ConfigError::NoScopes);
        }
        let tables = [
            ("parameters", self.parameters.keys().collect::<Vec<_>>()),
            ("producers", self.producers.keys().collect()),
            ("outputs", self.outputs.keys().collect()),
        ];
        for (table, keys) in tables {
            let unknown = keys.into_iter().find(|s| {
                !self.scopes.contains(*s) && !(table == "parameters" && s.is_global())
            });
            if let Some(scope) = unknown {
                return Err(ConfigError::UnknownScope {
                    table,
                    scope: scope.clone(),
                });
            }
        }
        Ok(())
    }

    /// Resolution request covering every configured scope
    #[must_use]
    pub fn to_request(&self) -> ResolveRequest {
        self.scopes.iter().fold(ResolveRequest::new(), |request, scope| {
            request.scope(
                scope.clone(),
                self.producers.get(scope).into_iter().flatten().cloned(),
                self.outputs.get(scope).into_iter().flatten().cloned(),
            )
        })
    }
}

impl ParamSource for RunConfig {
    fn lookup(&self, scope: &Scope, key: &str) -> Option<&ParamValue> {
        self.parameters
            .get(scope)
            .and_then(|table| table.get(key))
            .or_else(|| {
                self.parameters
                    .get(&Scope::GLOBAL)
                    .and_then(|table| table.get(key))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CONFIG: &str = r#"
era = "2018"
sample = "dy"
scopes = ["global", "mt"]

[parameters.global]
min_muon_pt = 10.0
max_muon_eta = 2.4

[parameters.mt]
min_muon_pt = 23.0

[producers]
global = ["BaseMuons"]
mt = ["GoodMuons"]

[outputs]
mt = ["good_muons_mask"]
"#;

    #[test]
    fn parse_toml() {
        let config = RunConfig::from_toml(CONFIG).unwrap();
        assert_eq!(config.era, "2018");
        assert_eq!(config.scopes, [Scope::GLOBAL, Scope::new("mt")]);
        assert_eq!(config.producers[&Scope::new("mt")], ["GoodMuons"]);
    }

    #[test]
    fn scope_parameters_override_global() {
        let config = RunConfig::from_toml(CONFIG).unwrap();
        let mt = Scope::new("mt");

        assert_eq!(config.lookup(&mt, "min_muon_pt"), Some(&ParamValue::Float(23.0)));
        assert_eq!(config.lookup(&mt, "max_muon_eta"), Some(&ParamValue::Float(2.4)));
        assert_eq!(
            config.lookup(&Scope::GLOBAL, "min_muon_pt"),
            Some(&ParamValue::Float(10.0))
        );
        assert_eq!(config.lookup(&mt, "missing"), None);
    }

    #[test]
    fn request_follows_scope_order() {
        let config = RunConfig::from_toml(CONFIG).unwrap();
        let request = config.to_request();

        let scopes: Vec<_> = request.ordered().map(|(s, r)| (s.as_str(), r.producers.clone())).collect();
        assert_eq!(
            scopes,
            [
                ("global", vec!["BaseMuons".to_string()]),
                ("mt", vec!["GoodMuons".to_string()]),
            ]
        );
    }

    #[test]
    fn yaml_and_json_equivalent() {
        let yaml = r"
scopes: [global, mt]
parameters:
  global:
    met_filters: [Flag_goodVertices]
producers:
  global: [MetFilter]
";
        let json = r#"{
            "scopes": ["global", "mt"],
            "parameters": {"global": {"met_filters": ["Flag_goodVertices"]}},
            "producers": {"global": ["MetFilter"]}
        }"#;

        assert_eq!(RunConfig::from_yaml(yaml).unwrap(), RunConfig::from_json(json).unwrap());
    }

    #[test]
    fn unknown_scope_rejected() {
        let err = RunConfig::from_toml(
            r#"
scopes = ["global"]
[outputs]
mt = ["pt_1"]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownScope { table: "outputs", .. }));
    }

    #[test]
    fn global_parameters_allowed_without_global_scope() {
        let config = RunConfig::from_toml(
            r#"
scopes = ["mt"]
[parameters.global]
min_muon_pt = 20
"#,
        )
        .unwrap();
        assert_eq!(
            config.lookup(&Scope::new("mt"), "min_muon_pt"),
            Some(&ParamValue::Int(20))
        );
    }

    #[test]
    fn empty_scopes_rejected() {
        assert!(matches!(
            RunConfig::from_json(r#"{"scopes": []}"#),
            Err(ConfigError::NoScopes)
        ));
    }

    #[test]
    fn unknown_field_rejected() {
        assert!(matches!(
            RunConfig::from_toml("scopes = [\"global\"]\nchannel = \"mt\""),
            Err(ConfigError::InvalidToml(_))
        ));
    }

    #[test]
    fn unsupported_extension_rejected() {
        assert!(matches!(
            RunConfig::load("config.ini"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
