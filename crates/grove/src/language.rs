//! Acceptance checks for a language handed over by a grammar's entry point.
//!
//! The entry point hands back a pointer to a generated `TSLanguage`. Before a
//! host uses it, [`construct`] confirms the pointer was actually produced, that
//! its ABI version falls inside the window this runtime understands, and that
//! its tables are populated. A descriptor that fails any of these is rejected
//! rather than handed to the parser.
use std::ops::RangeInclusive;

use thiserror::Error;
use tree_sitter::{Language, Parser};

/// Why a language descriptor was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageError {
    /// The entry point returned no descriptor.
    #[error("grammar descriptor pointer is null")]
    Null,

    /// The descriptor was generated for an ABI this runtime cannot read.
    #[error("incompatible language version {version}, expected {min}..={max}")]
    Version {
        /// Version recorded in the descriptor.
        version: usize,
        /// Oldest version the runtime accepts.
        min: usize,
        /// Newest version the runtime accepts.
        max: usize,
    },

    /// The descriptor declares no symbols or no parse states.
    #[error("language tables are empty: {node_kinds} node kinds, {parse_states} parse states")]
    EmptyTables {
        /// Declared node kind count.
        node_kinds: usize,
        /// Declared parse state count.
        parse_states: usize,
    },

    /// A node kind id within the declared range has no name.
    #[error("node kind {id} has no name")]
    UnnamedKind {
        /// The offending symbol id.
        id: u16,
    },
}

/// ABI versions the linked tree-sitter runtime accepts.
#[must_use]
pub fn abi_window() -> RangeInclusive<usize> {
    tree_sitter::MIN_COMPATIBLE_LANGUAGE_VERSION..=tree_sitter::LANGUAGE_VERSION
}

/// Accept or reject the descriptor an entry point produced.
///
/// `None` stands for a null entry-point result. Checks run in order: presence,
/// ABI window, table counts, parser acceptance, then node kind names. The first
/// failure wins.
///
/// # Errors
///
/// Returns the [`LanguageError`] for the first check the descriptor fails.
pub fn construct(descriptor: Option<Language>) -> Result<Language, LanguageError> {
    let result = check(descriptor);
    match &result {
        Ok(language) => tracing::debug!(
            abi_version = language.abi_version(),
            node_kinds = language.node_kind_count(),
            parse_states = language.parse_state_count(),
            "constructed language"
        ),
        Err(err) => tracing::warn!(%err, "rejected language descriptor"),
    }
    result
}

fn check(descriptor: Option<Language>) -> Result<Language, LanguageError> {
    let language = descriptor.ok_or(LanguageError::Null)?;

    let window = abi_window();
    let version = language.abi_version();
    if !window.contains(&version) {
        return Err(LanguageError::Version {
            version,
            min: *window.start(),
            max: *window.end(),
        });
    }

    let node_kinds = language.node_kind_count();
    let parse_states = language.parse_state_count();
    if node_kinds == 0 || parse_states == 0 {
        return Err(LanguageError::EmptyTables {
            node_kinds,
            parse_states,
        });
    }

    Parser::new()
        .set_language(&language)
        .map_err(|_| LanguageError::Version {
            version,
            min: *window.start(),
            max: *window.end(),
        })?;

    // Symbol ids are u16 in the C ABI.
    let mut ids = (0..=u16::MAX).take(node_kinds);
    if let Some(id) = ids.find(|&id| language.node_kind_for_id(id).is_none()) {
        return Err(LanguageError::UnnamedKind { id });
    }

    Ok(language)
}
