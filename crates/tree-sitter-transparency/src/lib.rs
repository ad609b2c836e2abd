//! This crate provides Transparency language support for the [tree-sitter] parsing library.
//!
//! Typically, you will use the [`LANGUAGE`] constant to add this language to a
//! tree-sitter [`Parser`], and then use the parser to parse some code:
//!
//! ```
//! let code = "function <int32 a, int32 b> add <int32> { return a + b; }";
//! let mut parser = tree_sitter::Parser::new();
//! let language = tree_sitter_transparency::LANGUAGE;
//! parser
//!     .set_language(&language.into())
//!     .expect("Error loading Transparency grammar");
//! let tree = parser.parse(code, None).unwrap();
//! assert!(!tree.root_node().has_error());
//! ```
//!
//! Hosts that want the load reported step by step, with the grammar named in
//! the failure, go through [`verify`] instead.
//!
//! [`Parser`]: https://docs.rs/tree-sitter/*/tree_sitter/struct.Parser.html
//! [tree-sitter]: https://tree-sitter.github.io/
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::multiple_crate_versions)]

use grove::{GrammarLoad, Language, LanguageError, LoadError};
use tree_sitter_language::LanguageFn;

mod provider;

pub use provider::{descriptor, raw_descriptor};

#[allow(unsafe_code)]
extern "C" {
    fn tree_sitter_transparency() -> *const ();
}

/// The tree-sitter [`LanguageFn`] for this grammar.
#[allow(unsafe_code)]
pub const LANGUAGE: LanguageFn = unsafe { LanguageFn::from_raw(tree_sitter_transparency) };

/// The grammar description the parser was generated from.
pub const GRAMMAR_JSON: &str = include_str!("grammar.json");

/// The display name used in load diagnostics.
pub const GRAMMAR_NAME: &str = "Transparency";

/// The rule every Transparency source file is parsed from.
pub const START_RULE: &str = "source_file";

/// Constructs the Transparency language, checked against the linked runtime.
///
/// # Errors
///
/// Returns a [`LanguageError`] if the runtime rejects the descriptor.
pub fn language() -> Result<Language, LanguageError> {
    grove::construct(descriptor(LANGUAGE))
}

/// Loads the grammar the way a host would and reports the outcome.
///
/// # Errors
///
/// Returns [`LoadError::Rejected`] naming the grammar if the runtime refuses
/// the descriptor.
pub fn verify() -> Result<Language, LoadError> {
    GrammarLoad::run(GRAMMAR_NAME, || descriptor(LANGUAGE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_load_grammar() {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&LANGUAGE.into())
            .expect("Error loading Transparency grammar");
    }

    #[test]
    fn test_verify() {
        let language = verify().expect("Error loading Transparency grammar");
        assert_eq!(language.name(), Some("transparency"));
        assert_eq!(language.abi_version(), tree_sitter::LANGUAGE_VERSION);
        assert_eq!(language, super::language().unwrap());
    }

    #[test]
    fn test_node_kinds() {
        let language = verify().unwrap();
        for kind in ["source_file", "function_definition", "identifier"] {
            assert_ne!(language.id_for_node_kind(kind, true), 0, "{kind}");
        }
        // Keywords are aliased to a single named kind.
        assert_ne!(language.id_for_node_kind("keyword", true), 0);
    }

    #[test]
    fn test_parse_function() {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&verify().unwrap()).unwrap();

        let tree = parser
            .parse("function <int32 a, int32 b> add <int32> { return a + b; }", None)
            .unwrap();
        let root = tree.root_node();
        assert_eq!(root.kind(), START_RULE);
        assert!(!root.has_error(), "{}", root.to_sexp());
        assert!(root
            .to_sexp()
            .contains("(return_statement (keyword) (expression (binary_expression"));
    }

    #[test]
    fn test_c_header_declares_entry_point() {
        let header = include_str!("../bindings/c/tree_sitter/tree-sitter-transparency.h");
        assert!(header.contains("typedef struct TSLanguage TSLanguage;"));
        assert!(header.contains("const TSLanguage *tree_sitter_transparency(void);"));
        assert!(header.contains("extern \"C\""));
    }

    #[test]
    fn test_parse_reports_errors() {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&verify().unwrap()).unwrap();

        let tree = parser.parse("function <int32 a add {", None).unwrap();
        assert_eq!(tree.root_node().kind(), START_RULE);
        assert!(tree.root_node().has_error());

        let empty = parser.parse("", None).unwrap();
        assert_eq!(empty.root_node().to_sexp(), "(source_file)");
    }
}
