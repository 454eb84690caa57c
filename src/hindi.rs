//! Devanagari anusvara to explicit nasal consonant.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NASAL_PATTERNS: Vec<(Regex, &'static str)> = vec![
        // velar
        (Regex::new(r"ं([कखगघ])").unwrap(), "ङ्${1}"),
        // palatal
        (Regex::new(r"ं([चछजझ])").unwrap(), "ञ्${1}"),
        // retroflex
        (Regex::new(r"ं([टठडढण])").unwrap(), "ण्${1}"),
        // dental
        (Regex::new(r"ं([तथदधन])").unwrap(), "न्${1}"),
        // labial
        (Regex::new(r"ं([पफबभम])").unwrap(), "म्${1}"),
    ];
}

/// Replace every class-determined anusvara with its nasal consonant plus
/// virama: `कंप` becomes `कम्प`. The classes are disjoint, so order does not matter.
pub fn normalize_nasal(text: &str) -> String {
    let mut result = text.to_string();
    for (pattern, replacement) in NASAL_PATTERNS.iter() {
        if pattern.is_match(&result) {
            result = pattern.replace_all(&result, *replacement).into_owned();
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labial() {
        assert_eq!(normalize_nasal("कंप, बंब, संभाजी"), "कम्प, बम्ब, सम्भाजी");
    }

    #[test]
    fn test_each_class() {
        assert_eq!(normalize_nasal("गंगा"), "गङ्गा");
        assert_eq!(normalize_nasal("चंचल"), "चञ्चल");
        assert_eq!(normalize_nasal("ठंडा"), "ठण्डा");
        assert_eq!(normalize_nasal("अंत"), "अन्त");
    }

    #[test]
    fn test_untouched() {
        // Anusvara before a sibilant has no class nasal.
        assert_eq!(normalize_nasal("संसार"), "संसार");
        assert_eq!(normalize_nasal("Rs 100"), "Rs 100");
        assert_eq!(normalize_nasal(""), "");
    }

    #[test]
    fn test_unmatched_input_is_byte_identical() {
        let inputs = ["\u{095B}रा cafe\u{0301}", "मं\u{095C}", "ज\u{093C}रा"];
        for input in inputs {
            assert_eq!(normalize_nasal(input).as_bytes(), input.as_bytes());
        }
    }

    #[test]
    fn test_following_consonant_untouched() {
        // Only the anusvara changes; the decomposed nukta letter stays as written.
        assert_eq!(normalize_nasal("मं\u{0921}\u{093C}"), "मण्\u{0921}\u{093C}");
    }
}
