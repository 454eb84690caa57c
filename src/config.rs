//! Normalizer configuration and the process-wide default instance.
//!
//! A config file picks a built-in table preset and layers extra entries on
//! top of it:
//!
//! ```toml
//! preset = "extended"
//! multiplier_policy = "reject"
//!
//! [[extra_prefixes]]
//! key = "Sch"
//! word = "Schedule"
//! ```

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::cardinal::MultiplierPolicy;
use crate::error::{NormalizeError, NormalizeResult};
use crate::normalizer::Normalizer;
use crate::rules::{Mapping, PatternRules, RulePreset};

/// Global normalizer (configured once, reused)
static NORMALIZER: OnceLock<Normalizer> = OnceLock::new();

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub preset: RulePreset,
    pub multiplier_policy: MultiplierPolicy,
    pub extra_symbols: Vec<Mapping>,
    pub extra_currencies: Vec<Mapping>,
    pub extra_prefixes: Vec<Mapping>,
}

impl NormalizerConfig {
    pub fn from_toml_str(content: &str) -> NormalizeResult<Self> {
        toml::from_str(content).map_err(|e| NormalizeError::ConfigParse {
            path: "<inline>".to_string(),
            reason: e.to_string(),
        })
    }

    /// Load a TOML config file.
    pub fn load(path: &Path) -> NormalizeResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| NormalizeError::ConfigParse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        tracing::info!(
            "Loaded normalizer config: {:?} (preset={:?}, +{} symbols, +{} currencies, +{} prefixes)",
            path,
            config.preset,
            config.extra_symbols.len(),
            config.extra_currencies.len(),
            config.extra_prefixes.len()
        );
        Ok(config)
    }

    /// Preset tables with the extra entries merged in.
    pub fn rules(&self) -> PatternRules {
        let mut rules = PatternRules::preset(self.preset);
        rules.merge_symbols(&self.extra_symbols);
        rules.merge_currencies(&self.extra_currencies);
        rules.merge_prefixes(&self.extra_prefixes);
        rules
    }
}

/// Initialize the global normalizer from a config file path.
///
/// Returns false if the file cannot be loaded; the built-in tables are used
/// in that case.
pub fn init_normalizer(config_path: &str) -> bool {
    let path = Path::new(config_path);
    let normalizer = match NormalizerConfig::load(path).and_then(|c| Normalizer::from_config(&c)) {
        Ok(n) => n,
        Err(e) => {
            tracing::warn!("Failed to load normalizer config {}: {}", config_path, e);
            return false;
        }
    };

    match NORMALIZER.set(normalizer) {
        Ok(_) => tracing::info!("Normalizer initialized from {}", config_path),
        Err(_) => tracing::info!("Normalizer already initialized, keeping existing tables"),
    }
    true
}

/// The global normalizer, built from the extended preset if never initialized.
pub fn normalizer() -> &'static Normalizer {
    NORMALIZER.get_or_init(Normalizer::default)
}

/// Check if a normalizer has been installed
pub fn normalizer_initialized() -> bool {
    NORMALIZER.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = NormalizerConfig::from_toml_str("").unwrap();
        assert_eq!(config, NormalizerConfig::default());
        assert_eq!(config.rules(), PatternRules::default());
    }

    #[test]
    fn test_config_parsing() {
        let config = NormalizerConfig::from_toml_str(
            r#"
            preset = "basic"
            multiplier_policy = "decompose"

            [[extra_prefixes]]
            key = "Sch"
            word = "Schedule"

            [[extra_currencies]]
            key = "¥"
            word = "Yen"
            "#,
        )
        .unwrap();

        assert_eq!(config.preset, RulePreset::Basic);
        assert_eq!(config.multiplier_policy, MultiplierPolicy::Decompose);

        let rules = config.rules();
        assert_eq!(rules.expand_prefix("Sch").unwrap(), "Schedule");
        assert!(rules.expand_prefix("Table").is_err());
        assert_eq!(rules.currency_name("¥").unwrap(), "Yen");
    }

    #[test]
    fn test_bad_config() {
        let err = NormalizerConfig::from_toml_str("preset = \"klingon\"").unwrap_err();
        assert!(matches!(err, NormalizeError::ConfigParse { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("normalize.toml");
        fs::write(&path, "[[extra_symbols]]\nkey = \"~\"\nword = \"tilde\"\n").unwrap();

        let config = NormalizerConfig::load(&path).unwrap();
        assert_eq!(config.rules().symbols.last().unwrap(), &Mapping::new("~", "tilde"));

        assert!(matches!(
            NormalizerConfig::load(&dir.path().join("missing.toml")),
            Err(NormalizeError::Io(_))
        ));
    }

    #[test]
    fn test_init_with_missing_file() {
        assert!(!init_normalizer("/nonexistent/normalize.toml"));
        assert_eq!(normalizer().process_text("Q1"), "Quarter one");
    }
}
