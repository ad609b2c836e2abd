//! The host-side protocol for loading a grammar.
//!
//! A host asks a provider for its descriptor, hands it to the runtime, and
//! gets either a [`Language`] or a load failure naming the grammar. The
//! intermediate states are explicit so hosts that do the two halves at
//! different times can keep a [`GrammarLoad`] around between them.

use thiserror::Error;
use tree_sitter::Language;

use crate::language::{construct, LanguageError};

/// Where a [`GrammarLoad`] is in the protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// No descriptor has been requested yet.
    Unloaded,
    /// The provider was asked for its descriptor; `present` records whether
    /// it returned one.
    Requested {
        /// `false` when the entry point returned null.
        present: bool,
    },
    /// The runtime accepted the descriptor.
    Constructed(Language),
    /// The runtime refused the descriptor.
    Rejected(LanguageError),
}

/// A failed grammar load, as reported to the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The runtime refused the grammar's descriptor.
    #[error("Error loading {grammar} grammar")]
    Rejected {
        /// Display name of the grammar.
        grammar: &'static str,
        /// Why the runtime refused it.
        #[source]
        source: LanguageError,
    },

    /// [`GrammarLoad::construct`] was called before [`GrammarLoad::request`].
    #[error("no descriptor requested for {grammar} grammar")]
    NotRequested {
        /// Display name of the grammar.
        grammar: &'static str,
    },
}

impl LoadError {
    /// The underlying construction failure, if any.
    #[must_use]
    pub fn language_error(&self) -> Option<&LanguageError> {
        match self {
            Self::Rejected { source, .. } => Some(source),
            Self::NotRequested { .. } => None,
        }
    }
}

/// One attempt to load a named grammar.
#[derive(Debug, Clone)]
pub struct GrammarLoad {
    grammar: &'static str,
    descriptor: Option<Language>,
    state: LoadState,
}

impl GrammarLoad {
    /// Starts a load of the grammar displayed as `grammar`.
    #[must_use]
    pub fn new(grammar: &'static str) -> Self {
        Self {
            grammar,
            descriptor: None,
            state: LoadState::Unloaded,
        }
    }

    /// Loads a grammar in one go.
    ///
    /// `entry` is the provider's entry point, wrapped so a null result comes
    /// back as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Rejected`] if the runtime refuses the descriptor.
    pub fn run<F>(grammar: &'static str, entry: F) -> Result<Language, LoadError>
    where
        F: FnOnce() -> Option<Language>,
    {
        let mut load = Self::new(grammar);
        load.request(entry);
        load.construct()
    }

    /// Calls the provider's entry point and records the descriptor it returns.
    ///
    /// The entry point is called at most once per load; later calls leave the
    /// recorded descriptor and the state alone. Returns whether a descriptor
    /// was produced.
    pub fn request<F>(&mut self, entry: F) -> bool
    where
        F: FnOnce() -> Option<Language>,
    {
        if !matches!(self.state, LoadState::Unloaded) {
            return self.descriptor.is_some();
        }
        self.descriptor = entry();
        let present = self.descriptor.is_some();
        tracing::trace!(grammar = self.grammar, present, "requested descriptor");
        self.state = LoadState::Requested { present };
        present
    }

    /// Hands the requested descriptor to the runtime.
    ///
    /// Once constructed or rejected, calling this again returns the same
    /// outcome without re-validating.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Rejected`] if the runtime refuses the descriptor,
    /// or [`LoadError::NotRequested`] if nothing was requested yet.
    pub fn construct(&mut self) -> Result<Language, LoadError> {
        match &self.state {
            LoadState::Unloaded => {
                return Err(LoadError::NotRequested {
                    grammar: self.grammar,
                })
            }
            LoadState::Requested { .. } => {}
            LoadState::Constructed(language) => return Ok(language.clone()),
            LoadState::Rejected(source) => return Err(self.rejected(source.clone())),
        }

        match construct(self.descriptor.clone()) {
            Ok(language) => {
                self.state = LoadState::Constructed(language.clone());
                Ok(language)
            }
            Err(source) => {
                tracing::error!(grammar = self.grammar, error = %source, "grammar load failed");
                self.state = LoadState::Rejected(source.clone());
                Err(self.rejected(source))
            }
        }
    }

    /// The grammar's display name.
    #[must_use]
    pub fn grammar(&self) -> &'static str {
        self.grammar
    }

    /// The current protocol state.
    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    fn rejected(&self, source: LanguageError) -> LoadError {
        LoadError::Rejected {
            grammar: self.grammar,
            source,
        }
    }
}
