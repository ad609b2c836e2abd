//! Validation routines for grammar descriptions.
//!
//! This module performs structural checks over parsed [`Grammar`]
//! definitions, such as verifying symbol references, ensuring all rules are reachable,
//! detecting left recursion, and confirming precedence consistency. Grammar
//! crates run it over their `grammar.json` before parse tables are generated
//! from it.

use crate::grammar::{Grammar, Rule, RuleType};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Represents a validation failure encountered when checking a grammar.
///
/// Validation errors indicate issues such as undefined symbols or a missing
/// start rule. Softer findings (unreachable rules, left recursion) are only
/// logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// The descriptive human-readable error message.
    pub message: String,
}

impl ValidationError {
    /// Creates a new [`ValidationError`] from a message string.
    fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

/// Performs semantic validation of a parsed [`Grammar`].
///
/// This function runs several consistency passes over the grammar:
///
/// - Checks that the start rule is defined.
/// - Checks that all referenced symbols are defined, including those named by
///   extras, `inline`, `supertypes` and `word`.
/// - Warns about rules unreachable from `start`.
/// - Reports immediate left recursion.
/// - Reports rules mixing precedence levels.
///
/// # Errors
///
/// Returns a [`ValidationError`] if any structural rule violation is detected.
pub fn validate(grammar: &Grammar, start: &str) -> Result<(), ValidationError> {
    if grammar.rules.is_empty() {
        return Err(ValidationError::new("grammar has no rules"));
    }
    if !grammar.rules.contains_key(start) {
        return Err(ValidationError::new(format!(
            "start rule '{start}' is not defined"
        )));
    }

    check_undefined_symbols(grammar)?;
    check_named_references(grammar)?;
    check_unreachable_rules(grammar, start);
    check_left_recursion(grammar);
    check_precedence(grammar);

    Ok(())
}

fn check_undefined_symbols(grammar: &Grammar) -> Result<(), ValidationError> {
    let defined: HashSet<&str> = grammar.rules.keys().map(String::as_str).collect();

    for name in grammar.ordered_rule_names("") {
        check_rule_symbols(&grammar.rules[name], &defined, name)?;
    }

    for extra in grammar.extras.iter().flatten() {
        check_rule_symbols(extra, &defined, "extras")?;
    }

    Ok(())
}

fn check_rule_symbols(
    rule: &Rule,
    defined: &HashSet<&str>,
    context: &str,
) -> Result<(), ValidationError> {
    if let Some(name) = rule.symbol_name() {
        if !defined.contains(name) {
            return Err(ValidationError::new(format!(
                "undefined symbol '{name}' referenced in rule '{context}'"
            )));
        }
    }

    for child in rule.children() {
        check_rule_symbols(child, defined, context)?;
    }
    Ok(())
}

fn check_named_references(grammar: &Grammar) -> Result<(), ValidationError> {
    let lists = [
        ("inline", grammar.inline.as_deref()),
        ("supertypes", grammar.supertypes.as_deref()),
    ];

    for (list, names) in lists {
        for name in names.unwrap_or_default() {
            if !grammar.rules.contains_key(name) {
                return Err(ValidationError::new(format!(
                    "undefined rule '{name}' listed in '{list}'"
                )));
            }
        }
    }

    if let Some(word) = &grammar.word {
        if !grammar.rules.contains_key(word) {
            return Err(ValidationError::new(format!(
                "undefined word rule '{word}'"
            )));
        }
    }

    Ok(())
}

fn check_unreachable_rules(grammar: &Grammar, start: &str) {
    let mut reachable = HashSet::new();
    let mut to_visit = vec![start];

    // Extras can appear anywhere, so they are roots too.
    for extra in grammar.extras.iter().flatten() {
        collect_referenced_symbols(extra, &mut to_visit);
    }

    while let Some(rule_name) = to_visit.pop() {
        if !reachable.insert(rule_name) {
            continue; // Already visited
        }

        if let Some(rule) = grammar.rule(rule_name) {
            collect_referenced_symbols(rule, &mut to_visit);
        }
    }

    for rule_name in grammar.ordered_rule_names(start) {
        let inline_contains = grammar
            .inline
            .as_ref()
            .is_some_and(|v| v.iter().any(|i| i == rule_name));

        if !reachable.contains(rule_name) && !inline_contains {
            tracing::warn!(rule = rule_name, "unreachable rule");
        }
    }
}

fn collect_referenced_symbols<'g>(rule: &'g Rule, symbols: &mut Vec<&'g str>) {
    if let Some(name) = rule.symbol_name() {
        symbols.push(name);
    }

    for child in rule.children() {
        collect_referenced_symbols(child, symbols);
    }
}

fn check_left_recursion(grammar: &Grammar) {
    for (rule_name, rule) in &grammar.rules {
        if has_immediate_left_recursion(rule, rule_name) {
            // LR tables handle left recursion; only right recursion grows the stack.
            tracing::debug!(rule = rule_name.as_str(), "rule has left recursion");
        }
    }
}

fn has_immediate_left_recursion(rule: &Rule, target: &str) -> bool {
    match rule.rule_type {
        RuleType::Symbol => rule.name.as_deref() == Some(target),

        RuleType::Seq => rule
            .members
            .first()
            .is_some_and(|first| has_immediate_left_recursion(first, target)),

        RuleType::Choice => rule
            .members
            .iter()
            .any(|member| has_immediate_left_recursion(member, target)),

        RuleType::Prec
        | RuleType::PrecLeft
        | RuleType::PrecRight
        | RuleType::PrecDynamic
        | RuleType::Field
        | RuleType::Alias => rule
            .content
            .as_deref()
            .is_some_and(|content| has_immediate_left_recursion(content, target)),

        _ => false,
    }
}

fn check_precedence(grammar: &Grammar) {
    let mut prec_levels: HashMap<&str, Vec<i32>> = HashMap::new();

    for (rule_name, rule) in &grammar.rules {
        collect_precedence_levels(rule, &mut prec_levels, rule_name);
    }

    for (rule, levels) in &prec_levels {
        if levels.len() > 1 {
            tracing::debug!(rule, ?levels, "rule has multiple precedence levels");
        }
    }
}

fn collect_precedence_levels<'g>(
    rule: &Rule,
    levels: &mut HashMap<&'g str, Vec<i32>>,
    context: &'g str,
) {
    if let Some(p) = rule.precedence() {
        levels.entry(context).or_default().push(p);
    }

    for child in rule.children() {
        collect_precedence_levels(child, levels, context);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::parse_grammar;

    fn grammar(json: &str) -> Grammar {
        parse_grammar(json).unwrap()
    }

    #[test]
    fn test_valid_grammar_passes() {
        let g = grammar(
            r##"{
            "name": "test",
            "extras": [{"type": "SYMBOL", "name": "comment"}],
            "rules": {
                "source_file": {"type": "REPEAT", "content": {"type": "SYMBOL", "name": "item"}},
                "item": {"type": "STRING", "value": "x"},
                "comment": {"type": "PATTERN", "value": "#.*"}
            }
        }"##,
        );

        assert_eq!(validate(&g, "source_file"), Ok(()));
    }

    #[test]
    fn test_undefined_symbol_is_rejected() {
        let g = grammar(
            r#"{
            "name": "test",
            "rules": {
                "source_file": {"type": "SEQ", "members": [
                    {"type": "STRING", "value": "("},
                    {"type": "SYMBOL", "name": "missing"}
                ]}
            }
        }"#,
        );

        let err = validate(&g, "source_file").unwrap_err();
        assert_eq!(
            err.message,
            "undefined symbol 'missing' referenced in rule 'source_file'"
        );
    }

    #[test]
    fn test_undefined_extra_is_rejected() {
        let g = grammar(
            r#"{
            "name": "test",
            "extras": [{"type": "SYMBOL", "name": "comment"}],
            "rules": {
                "source_file": {"type": "STRING", "value": "x"}
            }
        }"#,
        );

        let err = validate(&g, "source_file").unwrap_err();
        assert!(err.message.contains("'comment'"));
        assert!(err.message.contains("'extras'"));
    }

    #[test]
    fn test_missing_start_rule_is_rejected() {
        let g = grammar(
            r#"{
            "name": "test",
            "rules": {
                "item": {"type": "STRING", "value": "x"}
            }
        }"#,
        );

        let err = validate(&g, "source_file").unwrap_err();
        assert_eq!(err.message, "start rule 'source_file' is not defined");
    }

    #[test]
    fn test_undefined_supertype_is_rejected() {
        let g = grammar(
            r#"{
            "name": "test",
            "supertypes": ["_expression"],
            "rules": {
                "source_file": {"type": "STRING", "value": "x"}
            }
        }"#,
        );

        let err = validate(&g, "source_file").unwrap_err();
        assert_eq!(
            err.message,
            "undefined rule '_expression' listed in 'supertypes'"
        );
    }

    #[test]
    fn test_left_recursion_detection() {
        let g = grammar(
            r#"{
            "name": "test",
            "rules": {
                "expr": {"type": "PREC_LEFT", "value": 1, "content": {"type": "SEQ", "members": [
                    {"type": "SYMBOL", "name": "expr"},
                    {"type": "STRING", "value": "+"},
                    {"type": "SYMBOL", "name": "expr"}
                ]}},
                "atom": {"type": "SEQ", "members": [
                    {"type": "STRING", "value": "("},
                    {"type": "SYMBOL", "name": "expr"}
                ]}
            }
        }"#,
        );

        assert!(has_immediate_left_recursion(&g.rules["expr"], "expr"));
        assert!(!has_immediate_left_recursion(&g.rules["atom"], "expr"));
    }
}
