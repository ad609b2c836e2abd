//! Core structures and parsing logic for grammar descriptions.
//!
//! This module defines the internal representation of a grammar as parsed from
//! Tree-sitter's JSON format. It uses [`serde_json`] for deserialization; the
//! rule graph itself lives in the `rules` submodule.

use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

mod rules;

pub use rules::{Rule, RuleType, RuleValue};

use crate::validate::ValidationError;

/// Represents a full grammar description.
///
/// This structure mirrors the serialized JSON format produced by
/// `tree-sitter generate` (`src/grammar.json`). It captures the complete rule
/// set along with auxiliary metadata such as precedences, conflicts, and
/// supertypes.
///
/// `rules` is keyed by name and carries no ordering, so the start rule is
/// always passed explicitly to [`validate`](crate::validate::validate).
///
/// See <https://tree-sitter.github.io/tree-sitter/assets/schemas/grammar.schema.json>
#[derive(Debug, Clone, Deserialize)]
pub struct Grammar {
    /// Optional `$schema` field from the JSON, typically used for schema
    /// validation or editor integration.
    #[serde(rename = "$schema", default)]
    pub schema: Option<String>,

    /// The short name of the grammar (e.g. `"transparency"`).
    pub name: String,

    /// Optional name of a base grammar that this one inherits from.
    #[serde(default)]
    pub inherits: Option<String>,

    /// Map of all rule identifiers to their corresponding definitions.
    pub rules: HashMap<String, Rule>,

    /// "Extras" that may appear between other tokens, such as whitespace or comments.
    #[serde(default)]
    pub extras: Option<Vec<Rule>>,

    /// Rules implemented externally via a scanner.
    #[serde(default)]
    pub externals: Option<Vec<Rule>>,

    /// Names of rules that should be inlined into other rules.
    #[serde(default)]
    pub inline: Option<Vec<String>>,

    /// Precedence orderings, highest first. Entries are `STRING` names or
    /// `SYMBOL` references.
    #[serde(default)]
    pub precedences: Option<Vec<Vec<Rule>>>,

    /// Explicit conflict groups expected during parsing.
    #[serde(default)]
    pub conflicts: Option<Vec<Vec<String>>>,

    /// Context-specific reserved word definitions.
    #[serde(default)]
    pub reserved: Option<HashMap<String, Vec<Rule>>>,

    /// The special rule name used to identify word tokens (keywords, identifiers, etc.).
    #[serde(default)]
    pub word: Option<String>,

    /// A list of node supertypes, grouping related syntactic forms.
    #[serde(default)]
    pub supertypes: Option<Vec<String>>,
}

impl Grammar {
    /// Looks up a rule by name.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Rule names in a stable order: `start` first (when defined), then the
    /// rest sorted by name.
    #[must_use]
    pub fn ordered_rule_names<'g>(&'g self, start: &str) -> Vec<&'g str> {
        let mut names: Vec<&str> = self
            .rules
            .keys()
            .map(String::as_str)
            .filter(|name| *name != start)
            .collect();
        names.sort_unstable();
        if let Some((name, _)) = self.rules.get_key_value(start) {
            names.insert(0, name.as_str());
        }
        names
    }

    /// Returns `true` if `name` is listed as a supertype.
    #[must_use]
    pub fn is_supertype(&self, name: &str) -> bool {
        self.supertypes
            .as_ref()
            .is_some_and(|names| names.iter().any(|s| s == name))
    }
}

/// Parse a JSON grammar definition into a strongly typed [`Grammar`] structure.
///
/// # Errors
///
/// Returns [`GrammarError::JsonParse`] if the provided string is not valid JSON
/// or fails schema deserialization.
pub fn parse_grammar(json: &str) -> Result<Grammar, GrammarError> {
    serde_json::from_str(json).map_err(|e| GrammarError::JsonParse(e.to_string()))
}

/// Possible errors raised while reading a grammar description.
#[derive(Debug, Error)]
pub enum GrammarError {
    /// The input JSON was syntactically invalid or structurally mismatched.
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Higher-level structural or semantic validation failure.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}
