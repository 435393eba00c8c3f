//! Ordered path-alias rewrites applied to import specifiers.

use crate::error::{Error, Result};
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

/// A mapping rule as written in config: `pattern` is a regex, `replacement`
/// may reference captures with `$1` or `${name}`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct PathMappingCfg {
    pub pattern: String,
    pub replacement: String,
}

#[derive(Debug, Clone)]
pub struct PathMapping {
    pattern: Regex,
    replacement: String,
}

impl PathMapping {
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| Error::Mapping {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: regex,
            replacement: replacement.into(),
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

#[derive(Debug, Clone, Default)]
pub struct PathMappings {
    rules: Vec<PathMapping>,
}

impl PathMappings {
    pub fn new(rules: Vec<PathMapping>) -> Self {
        Self { rules }
    }

    /// Compile config rules, failing on the first invalid pattern.
    pub fn from_config(rules: &[PathMappingCfg]) -> Result<Self> {
        let mappings = rules
            .iter()
            .map(|r| PathMapping::new(&r.pattern, r.replacement.clone()))
            .collect::<Result<Vec<_>>>()
            .map(Self::new)?;
        for rule in mappings.rules() {
            debug!(
                pattern = rule.pattern(),
                replacement = rule.replacement(),
                "path mapping"
            );
        }
        Ok(mappings)
    }

    pub fn push(&mut self, rule: PathMapping) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[PathMapping] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule in order; each rewrites the first match in the
    /// output of the previous one.
    pub fn apply(&self, module: &str) -> String {
        self.rules.iter().fold(module.to_string(), |current, rule| {
            rule.pattern
                .replace(&current, rule.replacement.as_str())
                .into_owned()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_apply_in_order() {
        let mappings = PathMappings::new(vec![
            PathMapping::new("^@base/(.*)", "source/$1").unwrap(),
            PathMapping::new("^source/", "src/").unwrap(),
        ]);
        assert_eq!(mappings.apply("@base/models/user"), "src/models/user");
        assert_eq!(mappings.apply("lodash"), "lodash");
    }

    #[test]
    fn test_only_first_match_is_replaced() {
        let mappings = PathMappings::new(vec![PathMapping::new("x", "y").unwrap()]);
        assert_eq!(mappings.apply("x/x"), "y/x");
    }

    #[test]
    fn test_named_captures() {
        let mappings =
            PathMappings::new(vec![PathMapping::new("^~(?P<rest>.*)", "app${rest}").unwrap()]);
        assert_eq!(mappings.apply("~/views/home"), "app/views/home");
    }

    #[test]
    fn test_from_config_keeps_rule_order() {
        let mappings = PathMappings::from_config(&[
            PathMappingCfg {
                pattern: "^@base/(.*)".into(),
                replacement: "src/$1".into(),
            },
            PathMappingCfg {
                pattern: "^~/".into(),
                replacement: "app/".into(),
            },
        ])
        .unwrap();
        let rules: Vec<_> = mappings
            .rules()
            .iter()
            .map(|r| (r.pattern(), r.replacement()))
            .collect();
        assert_eq!(rules, vec![("^@base/(.*)", "src/$1"), ("^~/", "app/")]);
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let err = PathMappings::from_config(&[PathMappingCfg {
            pattern: "(".into(),
            replacement: "".into(),
        }])
        .unwrap_err();
        assert!(matches!(err, Error::Mapping { .. }));
        assert!(err.to_string().contains("'('"));
    }
}
