//! Loading tree-sitter grammars the way a host runtime does.
//!
//! Grammar crates hand grove the [`tree_sitter::Language`] their C entry point
//! produced; grove checks it against the runtime's ABI window and table
//! invariants and walks the load protocol that ends in a usable language or a
//! failure naming the grammar. The `grammar.json` model and its validation
//! live here too, so grammar crates can check their description at test time.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::multiple_crate_versions)]

/// Core structures and parsing logic for Tree-sitter grammars.
///
/// This module defines how grove understands the declarative shape of a
/// language: the grammar itself. Validation builds on these types.
pub mod grammar;

/// Construction-time checks for languages handed over by a provider.
pub mod language;

/// The request/construct protocol a host follows to load a grammar.
pub mod load;

/// Grammar validation and consistency checking utilities.
///
/// Validation enforces Tree-sitter's invariants and ensures that what's
/// parsed is also semantically meaningful.
pub mod validate;

pub use grammar::{parse_grammar, Grammar, GrammarError, Rule};
pub use language::{construct, LanguageError};
pub use load::{GrammarLoad, LoadError, LoadState};
pub use tree_sitter::Language;
pub use validate::{validate, ValidationError};
