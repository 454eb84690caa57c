use serde::{Deserialize, Serialize};

use crate::error::{NormalizeError, NormalizeResult};

/// A single `key -> word` table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub key: String,
    pub word: String,
}

impl Mapping {
    pub fn new(key: &str, word: &str) -> Self {
        Self {
            key: key.to_string(),
            word: word.to_string(),
        }
    }
}

/// Which built-in table set to start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RulePreset {
    /// Numbers and symbols, with the document-structure prefixes
    /// (Table, Type, Level, Grade, Stage, Step, Part).
    #[default]
    Extended,
    /// Numbers and symbols with the short prefix list only.
    Basic,
}

const SYMBOLS: &[(&str, &str)] = &[
    ("%", "percent"),
    ("@", "at"),
    ("&", "and"),
    ("+", "plus"),
    ("=", "equals"),
    ("/", "per"),
    ("#", "number"),
    ("*", "asterisk"),
    ("°", "degrees"),
    ("§", "section"),
    ("¶", "paragraph"),
    ("©", "copyright"),
    ("®", "registered"),
    ("™", "trademark"),
];

const CURRENCIES: &[(&str, &str)] = &[
    ("Rs", "Rupees"),
    ("₹", "Rupees"),
    ("$", "Dollars"),
    ("€", "Euros"),
    ("£", "Pounds"),
];

const BASIC_PREFIXES: &[(&str, &str)] = &[
    ("Q", "Quarter"),
    ("P", "Phase"),
    ("V", "Version"),
    ("Ch", "Chapter"),
    ("Fig", "Figure"),
    ("Sec", "Section"),
    ("App", "Appendix"),
    ("Vol", "Volume"),
    ("Pg", "Page"),
    ("Rev", "Revision"),
    ("ID", "ID"),
    ("No", "Number"),
    ("Ref", "Reference"),
];

const DOCUMENT_PREFIXES: &[(&str, &str)] = &[
    ("Table", "Table"),
    ("Type", "Type"),
    ("Level", "Level"),
    ("Grade", "Grade"),
    ("Stage", "Stage"),
    ("Step", "Step"),
    ("Part", "Part"),
];

pub const PERCENT_SYMBOL: &str = "%";

/// The rewrite tables one pipeline is configured with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRules {
    pub symbols: Vec<Mapping>,
    pub currencies: Vec<Mapping>,
    pub prefixes: Vec<Mapping>,
}

impl Default for PatternRules {
    fn default() -> Self {
        Self::preset(RulePreset::Extended)
    }
}

impl PatternRules {
    pub fn preset(preset: RulePreset) -> Self {
        let mut prefixes = to_mappings(BASIC_PREFIXES);
        if preset == RulePreset::Extended {
            prefixes.extend(to_mappings(DOCUMENT_PREFIXES));
        }
        Self {
            symbols: to_mappings(SYMBOLS),
            currencies: to_mappings(CURRENCIES),
            prefixes,
        }
    }

    /// Word for `%`, used by the percentage pass.
    pub fn percent_word(&self) -> &str {
        lookup(&self.symbols, PERCENT_SYMBOL).unwrap_or("percent")
    }

    /// Symbols for the generic substitution pass (everything but `%`).
    pub fn inline_symbols(&self) -> impl Iterator<Item = &Mapping> {
        self.symbols.iter().filter(|m| m.key != PERCENT_SYMBOL)
    }

    pub fn currency_name(&self, symbol: &str) -> NormalizeResult<&str> {
        lookup(&self.currencies, symbol)
            .ok_or_else(|| NormalizeError::UnknownSymbol(symbol.to_string()))
    }

    /// Exact, case-sensitive prefix expansion.
    pub fn expand_prefix(&self, prefix: &str) -> NormalizeResult<&str> {
        lookup(&self.prefixes, prefix)
            .ok_or_else(|| NormalizeError::UnknownPrefix(prefix.to_string()))
    }

    /// Append entries, replacing the word of any key already present.
    pub fn merge_symbols(&mut self, extra: &[Mapping]) {
        merge(&mut self.symbols, extra);
    }

    pub fn merge_currencies(&mut self, extra: &[Mapping]) {
        merge(&mut self.currencies, extra);
    }

    pub fn merge_prefixes(&mut self, extra: &[Mapping]) {
        merge(&mut self.prefixes, extra);
    }
}

fn to_mappings(entries: &[(&str, &str)]) -> Vec<Mapping> {
    entries.iter().map(|(k, w)| Mapping::new(k, w)).collect()
}

fn lookup<'a>(table: &'a [Mapping], key: &str) -> Option<&'a str> {
    table.iter().find(|m| m.key == key).map(|m| m.word.as_str())
}

fn merge(table: &mut Vec<Mapping>, extra: &[Mapping]) {
    for entry in extra {
        match table.iter_mut().find(|m| m.key == entry.key) {
            Some(existing) => existing.word = entry.word.clone(),
            None => table.push(entry.clone()),
        }
    }
}
