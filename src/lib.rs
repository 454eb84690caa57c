//! Spell out numerals, currency amounts, percentages, symbols and
//! letter-number codes in document text, using the Indian numbering system
//! (crore, lakh, thousand, hundred).
//!
//! ```
//! use rust_text_normalize::Normalizer;
//!
//! let normalizer = Normalizer::default();
//! assert_eq!(normalizer.process_text("Rs 100"), "Rupees one hundred");
//! assert_eq!(normalizer.process_text("Q1"), "Quarter one");
//! ```
//!
//! A separate utility, [`normalize_nasal`], rewrites Devanagari anusvara as
//! explicit nasal consonants.

pub mod cardinal;
pub mod config;
pub mod error;
pub mod hindi;
pub mod normalizer;
pub mod pipeline;
pub mod rules;
pub mod scale;

#[cfg(feature = "python")]
mod python;

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

pub use cardinal::{CardinalConverter, MultiplierPolicy};
pub use config::{init_normalizer, normalizer, NormalizerConfig};
pub use error::{NormalizeError, NormalizeResult};
pub use hindi::normalize_nasal;
pub use normalizer::Normalizer;
pub use pipeline::{Pass, RewritePipeline, Span};
pub use rules::{Mapping, PatternRules, RulePreset};
pub use scale::ScaleTable;

/// Normalize text with the global normalizer.
pub fn process_text(text: &str) -> String {
    normalizer().process_text(text)
}

/// Normalize a single file, reading and writing entirely in Rust
/// Returns: (was_modified, rewrite_count, bytes_read)
pub fn normalize_file_to_file(input_path: &Path, output_path: &Path) -> NormalizeResult<(bool, u64, u64)> {
    let content = fs::read_to_string(input_path)?;
    let bytes_read = content.len() as u64;

    let (normalized, rewrites) = normalizer().process_text_counted(&content);
    let was_modified = normalized != content;

    // Ensure parent directory exists
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(output_path, &normalized)?;

    Ok((was_modified, rewrites, bytes_read))
}

/// Normalize many `(input, output)` file pairs in parallel.
/// Unreadable inputs are skipped.
/// Returns: (files_written, total_rewrites)
pub fn normalize_files_batch(pairs: &[(PathBuf, PathBuf)]) -> (u64, u64) {
    pairs
        .par_iter()
        .filter_map(|(input, output)| match normalize_file_to_file(input, output) {
            Ok((_, rewrites, _)) => Some((1, rewrites)),
            Err(e) => {
                tracing::warn!("Skipping {:?}: {}", input, e);
                None
            }
        })
        .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1))
}
