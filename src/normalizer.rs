use std::collections::HashMap;

use lazy_static::lazy_static;
use rayon::prelude::*;
use regex::Regex;
use whatlang::Script;

use crate::cardinal::{CardinalConverter, MultiplierPolicy};
use crate::config::NormalizerConfig;
use crate::error::NormalizeResult;
use crate::hindi::normalize_nasal;
use crate::pipeline::RewritePipeline;
use crate::rules::{PatternRules, RulePreset};
use crate::scale::ScaleTable;

lazy_static! {
    // ==========================================================================
    // Fragments the pipeline leaves alone on purpose - COUNT only
    // ==========================================================================
    static ref UNRESOLVED_PATTERNS: Vec<(&'static str, Regex)> = vec![
        // Dates and section numbers such as 27.06.2018 or 4.2.1
        ("multi_point_numeral", Regex::new(r"[0-9]+(?:\.[0-9]+){2,}").unwrap()),
        // `%` with no number in front of it
        ("bare_percent", Regex::new(r"%").unwrap()),
        // Anything still written in digits (includes the two above)
        ("residual_digits", Regex::new(r"[0-9]+").unwrap()),
    ];
}

/// Stateless text normalizer. Owns its tables; safe to share across threads.
#[derive(Debug, Clone)]
pub struct Normalizer {
    pipeline: RewritePipeline,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::with_preset(RulePreset::Extended)
    }
}

impl Normalizer {
    pub fn new(rules: PatternRules, policy: MultiplierPolicy) -> NormalizeResult<Self> {
        let converter = CardinalConverter::new(ScaleTable::indian(), policy);
        Ok(Self {
            pipeline: RewritePipeline::new(rules, converter)?,
        })
    }

    pub fn from_config(config: &NormalizerConfig) -> NormalizeResult<Self> {
        Self::new(config.rules(), config.multiplier_policy)
    }

    /// Built-in tables only.
    pub fn with_preset(preset: RulePreset) -> Self {
        Self::new(PatternRules::preset(preset), MultiplierPolicy::default())
            .expect("built-in rule tables compile")
    }

    pub fn pipeline(&self) -> &RewritePipeline {
        &self.pipeline
    }

    /// Spell out numerals, currency, percentages, symbols and prefix codes.
    ///
    /// Never fails: anything that cannot be rendered is returned as written.
    pub fn process_text(&self, text: &str) -> String {
        self.pipeline.run(text).0
    }

    /// Same as [`Self::process_text`], also returning how many spans were rewritten.
    pub fn process_text_counted(&self, text: &str) -> (String, u64) {
        self.pipeline.run(text)
    }

    /// Normalize many inputs in parallel. Output order matches input order.
    pub fn process_batch(&self, texts: &[String]) -> Vec<String> {
        texts.par_iter().map(|t| self.process_text(t)).collect()
    }

    /// Route by dominant script: Devanagari gets the anusvara rewrite,
    /// everything else the English pipeline.
    pub fn process_auto(&self, text: &str) -> String {
        match whatlang::detect_script(text) {
            Some(Script::Devanagari) => normalize_nasal(text),
            _ => self.process_text(text),
        }
    }

    /// Normalize `text` and count what is left unresolved in the output.
    /// Returns: HashMap<pattern_name, count>
    pub fn audit(&self, text: &str) -> HashMap<String, u64> {
        let normalized = self.process_text(text);
        let mut counts = HashMap::new();
        for (name, pattern) in UNRESOLVED_PATTERNS.iter() {
            let count = pattern.find_iter(&normalized).count() as u64;
            if count > 0 {
                counts.insert(name.to_string(), count);
            }
        }
        counts
    }
}
