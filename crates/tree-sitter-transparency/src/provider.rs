//! The host side of the entry point: calls it, and treats a null result as
//! "no descriptor" instead of wrapping it.
use std::ffi::c_void;
use std::ptr::NonNull;

use grove::Language;
use tree_sitter_language::LanguageFn;

/// Calls `language_fn` and returns the `TSLanguage` pointer it produced, or
/// `None` if it returned null.
///
/// Generated entry points return the address of a static, so the pointer is
/// valid for the rest of the process.
#[must_use]
#[allow(unsafe_code)]
pub fn raw_descriptor(language_fn: LanguageFn) -> Option<NonNull<c_void>> {
    // SAFETY: a `LanguageFn` wraps a tree-sitter entry point, which takes no
    // arguments and has no preconditions.
    let raw = unsafe { (language_fn.into_raw())() };
    NonNull::new(raw.cast_mut().cast::<c_void>())
}

/// The language behind `language_fn`, or `None` if its entry point returned
/// null.
#[must_use]
pub fn descriptor(language_fn: LanguageFn) -> Option<Language> {
    raw_descriptor(language_fn).map(|_| Language::new(language_fn))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GRAMMAR_JSON, GRAMMAR_NAME, LANGUAGE, START_RULE};
    use grove::grammar::RuleType;
    use grove::{parse_grammar, validate};

    #[test]
    fn test_entry_point_is_stable() {
        let first = raw_descriptor(LANGUAGE).unwrap();
        assert_eq!(raw_descriptor(LANGUAGE), Some(first));
        assert_eq!(descriptor(LANGUAGE), descriptor(LANGUAGE));
    }

    #[test]
    fn test_embedded_grammar_is_valid() {
        let grammar = parse_grammar(GRAMMAR_JSON).unwrap();
        assert!(grammar.name.eq_ignore_ascii_case(GRAMMAR_NAME));
        validate(&grammar, START_RULE).unwrap();

        let initializer = grammar.rule("initializer").unwrap();
        assert!(matches!(initializer.rule_type, RuleType::PrecLeft));
        assert_eq!(initializer.precedence(), Some(11));
        assert_eq!(grammar.rule("rangle").unwrap().string_value(), Some(">"));
    }

    #[test]
    fn test_grammar_matches_parser() {
        let grammar = parse_grammar(GRAMMAR_JSON).unwrap();
        let language = descriptor(LANGUAGE).unwrap();
        assert_eq!(language.name(), Some(grammar.name.as_str()));

        // Every visible rule in the description is a node kind in the tables.
        for name in grammar.ordered_rule_names(START_RULE) {
            if !name.starts_with('_') {
                assert_ne!(language.id_for_node_kind(name, true), 0, "{name}");
            }
        }
    }
}
