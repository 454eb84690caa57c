//! Ordered multi-pass rewriting of numerals, symbols and codes.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::debug;

use crate::cardinal::CardinalConverter;
use crate::error::{NormalizeError, NormalizeResult};
use crate::rules::PatternRules;

lazy_static! {
    // The captured number is fed back through the whole pipeline; it has no
    // `%` left, so the recursion stops after one level.
    static ref PERCENT_PATTERN: Regex = Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*%").unwrap();
}

const YEAR_RANGE_ALT: &str = r"(?P<full>[0-9]{4})-(?P<short>[0-9]{2})\b";
const NUMERAL_ALT: &str = r"(?P<num>[0-9]+(?:\.[0-9]+)*)(?:\s*(?P<era>BCE|AD|BC|CE)\b)?";

/// One step of the rewrite pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    LetterPrefix,
    Percentage,
    Symbol,
    NumeralSpan,
    Whitespace,
}

impl Pass {
    // Prefix codes before bare numerals, percentages before `%` is lost.
    pub const ORDER: [Pass; 5] = [
        Pass::LetterPrefix,
        Pass::Percentage,
        Pass::Symbol,
        Pass::NumeralSpan,
        Pass::Whitespace,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Pass::LetterPrefix => "letter_prefix",
            Pass::Percentage => "percentage",
            Pass::Symbol => "symbol",
            Pass::NumeralSpan => "numeral_span",
            Pass::Whitespace => "whitespace",
        }
    }
}

/// A substring matched by the numeral-span pattern, resolved to exactly one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span<'t> {
    /// `2024-25`
    YearRange { full: &'t str, short: &'t str },
    /// `Rs 100`, `$1525.75`
    Currency { symbol: &'t str, amount: &'t str },
    /// `3.51`, `500 BC`, and malformed tails such as `27.06.2018`
    Numeral { digits: &'t str, era: Option<&'t str> },
}

impl<'t> Span<'t> {
    fn classify(caps: &Captures<'t>) -> Option<Self> {
        if let (Some(full), Some(short)) = (caps.name("full"), caps.name("short")) {
            return Some(Span::YearRange {
                full: full.as_str(),
                short: short.as_str(),
            });
        }
        if let (Some(symbol), Some(amount)) = (caps.name("currency"), caps.name("amount")) {
            return Some(Span::Currency {
                symbol: symbol.as_str(),
                amount: amount.as_str(),
            });
        }
        caps.name("num").map(|digits| Span::Numeral {
            digits: digits.as_str(),
            era: caps.name("era").map(|m| m.as_str()),
        })
    }
}

/// Rewrite pipeline configured by one set of [`PatternRules`].
#[derive(Debug, Clone)]
pub struct RewritePipeline {
    rules: PatternRules,
    converter: CardinalConverter,
    prefix_pattern: Regex,
    span_pattern: Regex,
}

impl RewritePipeline {
    pub fn new(rules: PatternRules, converter: CardinalConverter) -> NormalizeResult<Self> {
        let prefix_pattern = build_prefix_pattern(&rules)?;
        let span_pattern = build_span_pattern(&rules)?;
        Ok(Self {
            rules,
            converter,
            prefix_pattern,
            span_pattern,
        })
    }

    pub fn rules(&self) -> &PatternRules {
        &self.rules
    }

    pub fn converter(&self) -> &CardinalConverter {
        &self.converter
    }

    /// Run every pass in order. Returns the text and the number of spans rewritten.
    pub fn run(&self, text: &str) -> (String, u64) {
        let mut result = text.to_string();
        let mut total: u64 = 0;
        for pass in Pass::ORDER {
            let (next, count) = self.apply_pass(pass, &result);
            result = next;
            total += count;
        }
        (result, total)
    }

    /// Run a single pass on its own.
    pub fn apply_pass(&self, pass: Pass, text: &str) -> (String, u64) {
        match pass {
            Pass::LetterPrefix => self.rewrite_letter_prefixes(text),
            Pass::Percentage => self.rewrite_percentages(text),
            Pass::Symbol => self.rewrite_symbols(text),
            Pass::NumeralSpan => self.rewrite_spans(text),
            Pass::Whitespace => (collapse_whitespace(text), 0),
        }
    }

    /// Classify every numeral span in `text` without rewriting anything.
    pub fn spans<'t>(&self, text: &'t str) -> Vec<Span<'t>> {
        self.span_pattern
            .captures_iter(text)
            .filter_map(|caps| Span::classify(&caps))
            .collect()
    }

    fn rewrite_letter_prefixes(&self, text: &str) -> (String, u64) {
        let mut count: u64 = 0;
        let result = self
            .prefix_pattern
            .replace_all(text, |caps: &Captures| {
                let whole = &caps[0];
                let prefix = &caps["prefix"];
                let numeral = match caps.name("frac") {
                    Some(frac) => format!("{}.{}", &caps["int"], frac.as_str()),
                    None => caps["int"].to_string(),
                };

                let words = match self.converter.to_words_decimal(&numeral) {
                    Ok(words) => words,
                    Err(e) => {
                        debug!("Letter-prefix code '{}' left unchanged: {}", whole, e);
                        return whole.to_string();
                    }
                };

                let expanded = match self.rules.expand_prefix(prefix) {
                    Ok(word) => word,
                    Err(e) => {
                        debug!("{}; passing prefix through", e);
                        prefix
                    }
                };

                count += 1;
                format!("{} {}", expanded, words)
            })
            .into_owned();
        (result, count)
    }

    fn rewrite_percentages(&self, text: &str) -> (String, u64) {
        let mut count: u64 = 0;
        let percent = self.rules.percent_word();
        let result = PERCENT_PATTERN
            .replace_all(text, |caps: &Captures| {
                let (number, _) = self.run(&caps[1]);
                count += 1;
                format!("{} {}", number, percent)
            })
            .into_owned();
        (result, count)
    }

    fn rewrite_symbols(&self, text: &str) -> (String, u64) {
        let mut result = text.to_string();
        let mut count: u64 = 0;
        for mapping in self.rules.inline_symbols().filter(|m| !m.key.is_empty()) {
            let hits = result.matches(mapping.key.as_str()).count();
            if hits > 0 {
                result = result.replace(mapping.key.as_str(), &format!(" {} ", mapping.word));
                count += hits as u64;
            }
        }
        (result, count)
    }

    fn rewrite_spans(&self, text: &str) -> (String, u64) {
        let mut count: u64 = 0;
        let result = self
            .span_pattern
            .replace_all(text, |caps: &Captures| {
                let whole = &caps[0];
                let rendered = Span::classify(caps)
                    .ok_or_else(|| NormalizeError::Format(whole.to_string()))
                    .and_then(|span| self.render_span(&span));
                match rendered {
                    Ok(words) => {
                        count += 1;
                        words
                    }
                    Err(e) => {
                        debug!("Numeral span '{}' left unchanged: {}", whole, e);
                        whole.to_string()
                    }
                }
            })
            .into_owned();
        (result, count)
    }

    fn render_span(&self, span: &Span) -> NormalizeResult<String> {
        match *span {
            Span::YearRange { full, short } => Ok(format!(
                "{}-{}",
                self.short_year(&full[2..])?,
                self.short_year(short)?
            )),
            Span::Currency { symbol, amount } => {
                let words = self.converter.to_words_decimal(amount)?;
                // The currency alternation is built from the same table, so
                // the symbol fallback only guards hand-edited tables.
                let name = self.rules.currency_name(symbol).unwrap_or(symbol);
                Ok(format!("{} {}", name, words))
            }
            Span::Numeral { digits, era } => {
                let words = self.converter.to_words_decimal(digits)?;
                Ok(format!("{} {}", words, era.unwrap_or("")).trim().to_string())
            }
        }
    }

    // Two-digit year read as "twenty NN"; only meaningful for 20xx.
    fn short_year(&self, digits: &str) -> NormalizeResult<String> {
        let n: u64 = digits
            .parse()
            .map_err(|_| NormalizeError::Format(digits.to_string()))?;
        let word = self
            .converter
            .table()
            .below_hundred(n)
            .ok_or_else(|| NormalizeError::Format(digits.to_string()))?;
        Ok(format!("twenty {}", word))
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escaped table keys, longest first, blanks dropped.
fn alternation<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut keys: Vec<&str> = keys.filter(|k| !k.is_empty()).collect();
    keys.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    keys.into_iter().map(regex::escape).collect()
}

fn build_prefix_pattern(rules: &PatternRules) -> NormalizeResult<Regex> {
    let mut alternatives = alternation(rules.prefixes.iter().map(|m| m.key.as_str()));
    alternatives.push("[a-z]".to_string());
    let pattern = format!(
        r"(?i)(?P<prefix>{})(?P<int>[0-9]+)(?:\.(?P<frac>[0-9]+))?",
        alternatives.join("|")
    );
    Ok(Regex::new(&pattern)?)
}

fn build_span_pattern(rules: &PatternRules) -> NormalizeResult<Regex> {
    let currencies = alternation(rules.currencies.iter().map(|m| m.key.as_str()));
    let mut branches = Vec::new();
    if !currencies.is_empty() {
        branches.push(format!(
            r"(?P<currency>{})\s*(?P<amount>[0-9]+(?:\.[0-9]+)*)",
            currencies.join("|")
        ));
    }
    branches.push(YEAR_RANGE_ALT.to_string());
    branches.push(NUMERAL_ALT.to_string());
    Ok(Regex::new(&branches.join("|"))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Mapping;

    fn pipeline() -> RewritePipeline {
        RewritePipeline::new(PatternRules::default(), CardinalConverter::default()).unwrap()
    }

    #[test]
    fn test_letter_prefix_pass_alone() {
        let p = pipeline();
        let (text, count) = p.apply_pass(Pass::LetterPrefix, "Q1 and 15% in Fig2");
        assert_eq!(text, "Quarter one and 15% in Figure two");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_letter_prefix_decimal_and_unknown() {
        let p = pipeline();
        let (text, _) = p.apply_pass(Pass::LetterPrefix, "V1.0 and A5");
        assert_eq!(text, "Version one point zero and A five");
        // Lowercase code is matched but not in the table.
        let (text, _) = p.apply_pass(Pass::LetterPrefix, "q3");
        assert_eq!(text, "q three");
    }

    #[test]
    fn test_longer_prefix_wins() {
        let p = pipeline();
        let (text, _) = p.apply_pass(Pass::LetterPrefix, "Pg12 Part3 P4");
        assert_eq!(text, "Page twelve Part three Phase four");
    }

    #[test]
    fn test_letter_prefix_overflow_left_alone() {
        let p = pipeline();
        let code = "Q99999999999999999999999";
        let (text, count) = p.apply_pass(Pass::LetterPrefix, code);
        assert_eq!(text, code);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_percentage_pass_alone() {
        let p = pipeline();
        let (text, count) = p.apply_pass(Pass::Percentage, "15% and 17.5 %");
        assert_eq!(text, "fifteen percent and seventeen point five percent");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_symbol_pass_skips_percent() {
        let p = pipeline();
        let (text, count) = p.apply_pass(Pass::Symbol, "A&B @ 5%");
        assert_eq!(text, "A and B  at  5%");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_numeral_pass_without_prefix_pass() {
        // Shows why prefix codes must be consumed first.
        let p = pipeline();
        let (text, _) = p.apply_pass(Pass::NumeralSpan, "Q1");
        assert_eq!(text, "Qone");
        let (text, _) = p.run("Q1");
        assert_eq!(text, "Quarter one");
    }

    #[test]
    fn test_span_classification() {
        let p = pipeline();
        let spans = p.spans("Rs 100 in 2024-25 on 27.06.2018 from 500 BC and 1234-5678");
        assert_eq!(
            spans,
            vec![
                Span::Currency { symbol: "Rs", amount: "100" },
                Span::YearRange { full: "2024", short: "25" },
                Span::Numeral { digits: "27.06.2018", era: None },
                Span::Numeral { digits: "500", era: Some("BC") },
                Span::Numeral { digits: "1234", era: None },
                Span::Numeral { digits: "5678", era: None },
            ]
        );
    }

    #[test]
    fn test_year_range_rendering() {
        let p = pipeline();
        let (text, _) = p.apply_pass(Pass::NumeralSpan, "2024-25");
        assert_eq!(text, "twenty twenty-four-twenty twenty-five");
        let (text, _) = p.apply_pass(Pass::NumeralSpan, "2005-06");
        assert_eq!(text, "twenty five-twenty six");
    }

    #[test]
    fn test_era_suffix() {
        let p = pipeline();
        assert_eq!(p.run("500 BCE").0, "five hundred BCE");
        assert_eq!(p.run("1947 AD").0, "one thousand, nine hundred, forty-seven AD");
        assert_eq!(p.run("5 CEOs").0, "five CEOs");
    }

    #[test]
    fn test_malformed_numeral_unchanged() {
        let p = pipeline();
        let (text, count) = p.run("12.34.56");
        assert_eq!(text, "12.34.56");
        assert_eq!(count, 0);
    }

    #[test]
    fn test_out_of_range_multiplier_unchanged() {
        let p = pipeline();
        assert_eq!(p.run("1000000000 votes").0, "1000000000 votes");
    }

    #[test]
    fn test_bad_currency_amount_unchanged() {
        let p = pipeline();
        let (text, count) = p.run("Rs 1000000000 and Rs 12.34.56");
        assert_eq!(text, "Rs 1000000000 and Rs 12.34.56");
        assert_eq!(count, 0);

        let (text, count) = p.run("Rs 12.5 and Rs 12.34.56");
        assert_eq!(text, "Rupees twelve point five and Rs 12.34.56");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_custom_currency_table() {
        let mut rules = PatternRules::default();
        rules.currencies = vec![Mapping::new("Rs", "Rupees")];
        rules.merge_currencies(&[Mapping::new("USD", "US Dollars")]);
        let p = RewritePipeline::new(rules, CardinalConverter::default()).unwrap();
        assert_eq!(p.run("USD 20").0, "US Dollars twenty");
        assert_eq!(p.run("$20").0, "$twenty");
    }

    #[test]
    fn test_whitespace_collapse() {
        let p = pipeline();
        let (text, count) = p.apply_pass(Pass::Whitespace, "  a \t b\n\nc  ");
        assert_eq!(text, "a b c");
        assert_eq!(count, 0);
    }

    #[test]
    fn test_pass_order() {
        let names: Vec<&str> = Pass::ORDER.iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            vec!["letter_prefix", "percentage", "symbol", "numeral_span", "whitespace"]
        );
    }
}
