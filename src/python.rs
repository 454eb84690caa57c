use std::collections::HashMap;
use std::path::{Path, PathBuf};

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::error::NormalizeError;

impl From<NormalizeError> for PyErr {
    fn from(err: NormalizeError) -> PyErr {
        match err {
            NormalizeError::Io(e) => PyIOError::new_err(e.to_string()),
            other => PyValueError::new_err(other.to_string()),
        }
    }
}

/// Spell out numerals, symbols and codes in text
#[pyfunction]
fn process_text(text: String) -> PyResult<String> {
    Ok(crate::normalizer().process_text(&text))
}

/// Returns: (normalized_text, rewrite_count)
#[pyfunction]
fn process_text_counted(text: String) -> PyResult<(String, u64)> {
    Ok(crate::normalizer().process_text_counted(&text))
}

/// Route by script: Devanagari -> anusvara rewrite, otherwise English pipeline
#[pyfunction]
fn process_auto(text: String) -> PyResult<String> {
    Ok(crate::normalizer().process_auto(&text))
}

#[pyfunction]
fn normalize_nasal(text: String) -> PyResult<String> {
    Ok(crate::hindi::normalize_nasal(&text))
}

/// Integer to words, Indian scale
#[pyfunction]
fn to_words(n: u64) -> PyResult<String> {
    Ok(crate::normalizer().pipeline().converter().to_words(n)?)
}

#[pyfunction]
fn to_words_decimal(numeral: String) -> PyResult<String> {
    Ok(crate::normalizer().pipeline().converter().to_words_decimal(&numeral)?)
}

/// Count fragments left unresolved after normalization
/// Returns: HashMap<pattern_name, count>
#[pyfunction]
fn audit(text: String) -> PyResult<HashMap<String, u64>> {
    Ok(crate::normalizer().audit(&text))
}

/// Returns: (was_modified, rewrite_count, bytes_read)
#[pyfunction]
fn normalize_file_to_file(input_path: String, output_path: String) -> PyResult<(bool, u64, u64)> {
    Ok(crate::normalize_file_to_file(
        Path::new(&input_path),
        Path::new(&output_path),
    )?)
}

/// Returns: (files_written, total_rewrites)
#[pyfunction]
fn normalize_files_batch(pairs: Vec<(String, String)>) -> PyResult<(u64, u64)> {
    let pairs: Vec<(PathBuf, PathBuf)> = pairs
        .into_iter()
        .map(|(i, o)| (PathBuf::from(i), PathBuf::from(o)))
        .collect();
    Ok(crate::normalize_files_batch(&pairs))
}

/// Install tables from a TOML config; must run before first use
#[pyfunction]
fn init_normalizer(config_path: String) -> PyResult<bool> {
    Ok(crate::config::init_normalizer(&config_path))
}

#[pymodule]
fn rust_text_normalize(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(process_text, m)?)?;
    m.add_function(wrap_pyfunction!(process_text_counted, m)?)?;
    m.add_function(wrap_pyfunction!(process_auto, m)?)?;
    m.add_function(wrap_pyfunction!(normalize_nasal, m)?)?;
    m.add_function(wrap_pyfunction!(to_words, m)?)?;
    m.add_function(wrap_pyfunction!(to_words_decimal, m)?)?;
    m.add_function(wrap_pyfunction!(audit, m)?)?;
    m.add_function(wrap_pyfunction!(normalize_file_to_file, m)?)?;
    m.add_function(wrap_pyfunction!(normalize_files_batch, m)?)?;
    m.add_function(wrap_pyfunction!(init_normalizer, m)?)?;
    Ok(())
}
