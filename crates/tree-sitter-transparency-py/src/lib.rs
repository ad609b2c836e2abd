//! Python bindings for the Transparency grammar.
//!
//! `language()` returns the generated `TSLanguage` pointer wrapped in a
//! capsule named `tree_sitter.Language`, the form py-tree-sitter's `Language`
//! constructor accepts.
use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use pyo3::types::PyCapsule;
use pyo3::ffi;

use tree_sitter_transparency::{raw_descriptor, verify, GRAMMAR_NAME, LANGUAGE};

const CAPSULE_NAME: &std::ffi::CStr = c"tree_sitter.Language";

/// The grammar descriptor as a `tree_sitter.Language` capsule.
#[pyfunction]
fn language(py: Python<'_>) -> PyResult<Bound<'_, PyCapsule>> {
    let Some(descriptor) = raw_descriptor(LANGUAGE) else {
        return Err(PyRuntimeError::new_err(format!(
            "{GRAMMAR_NAME} entry point returned no language"
        )));
    };
    // SAFETY: the descriptor is a static in the generated parser, so the
    // capsule needs no destructor; the name is a static C string.
    let capsule = unsafe {
        let ptr = ffi::PyCapsule_New(
            descriptor.as_ptr(),
            CAPSULE_NAME.as_ptr(),
            None,
        );
        Bound::from_owned_ptr_or_err(py, ptr)?
    };
    Ok(capsule.downcast_into::<PyCapsule>()?)
}

/// Loads the grammar through the runtime, raising `RuntimeError` on rejection.
#[pyfunction]
fn check() -> PyResult<()> {
    match verify() {
        Ok(_) => Ok(()),
        Err(err) => {
            let message = match err.language_error() {
                Some(cause) => format!("{err}: {cause}"),
                None => err.to_string(),
            };
            Err(PyRuntimeError::new_err(message))
        }
    }
}

#[pymodule]
fn _binding(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(language, m)?)?;
    m.add_function(wrap_pyfunction!(check, m)?)?;
    m.add("GRAMMAR_NAME", GRAMMAR_NAME)?;
    Ok(())
}
