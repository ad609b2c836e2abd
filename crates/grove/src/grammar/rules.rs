//! Core types for representing grammar rules.
//!
//! This module contains the types used to model grammar rules and their
//! structure according to the Tree-sitter JSON schema.

use serde::Deserialize;

/// Represents a grammar rule in the Tree-sitter format.
///
/// Each rule corresponds to a node in the grammar's rule graph, identified by a
/// [`RuleType`] and containing type-specific fields such as `members` or
/// `content`.
///
/// A `Rule` can be atomic (like a literal or regex) or composite
/// (like a sequence, choice, or precedence group). Together, they
/// form a self-describing syntax graph.
#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    /// The discriminant identifying what kind of rule this is.
    #[serde(rename = "type")]
    pub rule_type: RuleType,

    /// Optional literal or numeric value, depending on rule kind.
    #[serde(default)]
    pub value: Option<RuleValue>,

    /// Optional name used by `SYMBOL` and `FIELD` rules.
    #[serde(default)]
    pub name: Option<String>,

    /// Optional nested rule for unary constructs such as `REPEAT` or `PREC`.
    #[serde(default)]
    pub content: Option<Box<Rule>>,

    /// List of child rules for compound constructs (`SEQ`, `CHOICE`).
    #[serde(default)]
    pub members: Vec<Rule>,

    /// Whether the node produced by an `ALIAS` rule is named.
    #[serde(default)]
    pub named: Option<bool>,

    /// Regex flags attached to a `PATTERN` rule.
    #[serde(default)]
    pub flags: Option<String>,

    /// Optional context label used for reserved-word handling.
    #[serde(default)]
    pub context_name: Option<String>,
}

/// A literal or numeric value attached to a rule node.
///
/// `RuleValue` abstracts small scalar payloads that alter how a rule behaves,
/// such as precedence numbers or literal match text. The JSON carries the bare
/// scalar, so the variant is picked by its shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    /// A string literal value (e.g. `"+"`, `"if"`).
    String(String),

    /// An integer numeric value (used by precedence modifiers).
    Integer(i32),
}

/// The enumeration of all recognized Tree-sitter rule types.
///
/// Each variant corresponds to one of the `type` strings found in the JSON
/// grammar format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RuleType {
    /// An empty production.
    #[serde(rename = "BLANK")]
    Blank,
    /// A literal string token.
    #[serde(rename = "STRING")]
    String,
    /// A regular-expression pattern token.
    #[serde(rename = "PATTERN")]
    Pattern,
    /// A reference to another named rule.
    #[serde(rename = "SYMBOL")]
    Symbol,
    /// A rule that matches one of several alternatives.
    #[serde(rename = "CHOICE")]
    Choice,
    /// A sequential composition of member rules.
    #[serde(rename = "SEQ")]
    Seq,
    /// A zero-or-more repetition of a rule.
    #[serde(rename = "REPEAT")]
    Repeat,
    /// A one-or-more repetition of a rule.
    #[serde(rename = "REPEAT1")]
    Repeat1,
    /// A generic precedence wrapper.
    #[serde(rename = "PREC")]
    Prec,
    /// A left-associative precedence wrapper.
    #[serde(rename = "PREC_LEFT")]
    PrecLeft,
    /// A right-associative precedence wrapper.
    #[serde(rename = "PREC_RIGHT")]
    PrecRight,
    /// A dynamic (runtime) precedence wrapper.
    #[serde(rename = "PREC_DYNAMIC")]
    PrecDynamic,
    /// A named field applied to a subrule.
    #[serde(rename = "FIELD")]
    Field,
    /// An alias providing an alternate node name.
    #[serde(rename = "ALIAS")]
    Alias,
    /// A tokenization wrapper.
    #[serde(rename = "TOKEN")]
    Token,
    /// A token that must appear immediately without leading trivia.
    #[serde(rename = "IMMEDIATE_TOKEN")]
    ImmediateToken,
    /// A reserved-word context wrapper.
    #[serde(rename = "RESERVED")]
    Reserved,
}

impl RuleType {
    /// Returns the canonical string name of this rule type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RuleType::Blank => "BLANK",
            RuleType::String => "STRING",
            RuleType::Pattern => "PATTERN",
            RuleType::Symbol => "SYMBOL",
            RuleType::Choice => "CHOICE",
            RuleType::Seq => "SEQ",
            RuleType::Repeat => "REPEAT",
            RuleType::Repeat1 => "REPEAT1",
            RuleType::Prec => "PREC",
            RuleType::PrecLeft => "PREC_LEFT",
            RuleType::PrecRight => "PREC_RIGHT",
            RuleType::PrecDynamic => "PREC_DYNAMIC",
            RuleType::Field => "FIELD",
            RuleType::Alias => "ALIAS",
            RuleType::Token => "TOKEN",
            RuleType::ImmediateToken => "IMMEDIATE_TOKEN",
            RuleType::Reserved => "RESERVED",
        }
    }

    /// Returns `true` for the precedence wrappers, which never change what a
    /// rule matches.
    #[must_use]
    pub fn is_precedence(self) -> bool {
        matches!(
            self,
            RuleType::Prec | RuleType::PrecLeft | RuleType::PrecRight | RuleType::PrecDynamic
        )
    }
}

impl Rule {
    /// Returns the canonical string name of this rule type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.rule_type.as_str()
    }

    /// Returns `true` if this rule is a symbol reference.
    #[must_use]
    pub fn is_symbol(&self) -> bool {
        matches!(self.rule_type, RuleType::Symbol)
    }

    /// Returns `true` if the whole rule lexes as a single token.
    ///
    /// Precedence wrappers are looked through; anything else that composes
    /// other rules is syntactic.
    #[must_use]
    pub fn is_lexical(&self) -> bool {
        let mut rule = self;
        while rule.rule_type.is_precedence() {
            match &rule.content {
                Some(content) => rule = content,
                None => return false,
            }
        }
        matches!(
            rule.rule_type,
            RuleType::Token | RuleType::ImmediateToken | RuleType::Pattern | RuleType::String
        )
    }

    /// Returns the referenced symbol name, if applicable.
    #[must_use]
    pub fn symbol_name(&self) -> Option<&str> {
        if self.is_symbol() {
            self.name.as_deref()
        } else {
            None
        }
    }

    /// Returns the numeric precedence value if this rule is a precedence wrapper.
    #[must_use]
    pub fn precedence(&self) -> Option<i32> {
        if self.rule_type.is_precedence() {
            self.value.as_ref().and_then(|v| match v {
                RuleValue::Integer(i) => Some(*i),
                RuleValue::String(_) => None,
            })
        } else {
            None
        }
    }

    /// Returns the literal string value if this is a `STRING` rule.
    #[must_use]
    pub fn string_value(&self) -> Option<&str> {
        if matches!(self.rule_type, RuleType::String) {
            self.text_value()
        } else {
            None
        }
    }

    /// Returns the alias name and whether it is named, if this is an `ALIAS` rule.
    #[must_use]
    pub fn alias_value(&self) -> Option<(&str, bool)> {
        if matches!(self.rule_type, RuleType::Alias) {
            self.text_value()
                .map(|value| (value, self.named.unwrap_or(false)))
        } else {
            None
        }
    }

    /// Returns the field name if this is a `FIELD` rule.
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        if matches!(self.rule_type, RuleType::Field) {
            self.name.as_deref()
        } else {
            None
        }
    }

    /// Child rules in traversal order: `members` for compound rules, then
    /// `content` for wrappers.
    pub fn children(&self) -> impl Iterator<Item = &Rule> {
        self.members.iter().chain(self.content.as_deref())
    }

    fn text_value(&self) -> Option<&str> {
        self.value.as_ref().and_then(|v| match v {
            RuleValue::String(s) => Some(s.as_str()),
            RuleValue::Integer(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(json: &str) -> Rule {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_string_value() {
        let r = rule(r#"{"type": "STRING", "value": "+"}"#);
        assert_eq!(r.value, Some(RuleValue::String("+".to_string())));
        assert_eq!(r.string_value(), Some("+"));
        assert_eq!(r.precedence(), None);
        assert!(r.is_lexical());
    }

    #[test]
    fn test_integer_value() {
        let r = rule(r#"{"type": "PREC_LEFT", "value": 11, "content": {"type": "BLANK"}}"#);
        assert_eq!(r.value, Some(RuleValue::Integer(11)));
        assert_eq!(r.precedence(), Some(11));
        assert_eq!(r.string_value(), None);
    }

    #[test]
    fn test_negative_precedence() {
        let r = rule(r#"{"type": "PREC_RIGHT", "value": -1, "content": {"type": "BLANK"}}"#);
        assert_eq!(r.precedence(), Some(-1));
    }

    #[test]
    fn test_named_precedence_has_no_level() {
        let r = rule(r#"{"type": "PREC", "value": "assign", "content": {"type": "BLANK"}}"#);
        assert_eq!(r.value, Some(RuleValue::String("assign".to_string())));
        assert_eq!(r.precedence(), None);
    }

    #[test]
    fn test_alias_value() {
        let r = rule(
            r#"{"type": "ALIAS", "content": {"type": "STRING", "value": "return"}, "named": true, "value": "keyword"}"#,
        );
        assert_eq!(r.alias_value(), Some(("keyword", true)));
        assert_eq!(r.children().count(), 1);
    }

    #[test]
    fn test_unknown_rule_type_is_rejected() {
        assert!(serde_json::from_str::<Rule>(r#"{"type": "MAYBE"}"#).is_err());
    }
}
