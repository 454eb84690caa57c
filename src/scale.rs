const UNITS: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

// Indexed by tens digit; 0 and 1 are covered by UNITS.
const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const INDIAN_SCALES: [(&str, u64); 4] = [
    ("crore", 10_000_000),
    ("lakh", 100_000),
    ("thousand", 1_000),
    ("hundred", 100),
];

/// Immutable word tables, built once per normalizer.
#[derive(Debug, Clone)]
pub struct ScaleTable {
    scales: Vec<(&'static str, u64)>,
    lookup: Vec<String>,
}

impl Default for ScaleTable {
    fn default() -> Self {
        Self::indian()
    }
}

impl ScaleTable {
    /// Crore/lakh/thousand/hundred with a precomputed 0-99 lookup.
    pub fn indian() -> Self {
        Self {
            scales: INDIAN_SCALES.to_vec(),
            lookup: generate_lookup(),
        }
    }

    /// Scales in descending magnitude.
    pub fn scales(&self) -> &[(&'static str, u64)] {
        &self.scales
    }

    /// Word for 0-99 ("forty-three"), `None` above that.
    pub fn below_hundred(&self, n: u64) -> Option<&str> {
        self.lookup.get(n as usize).map(String::as_str)
    }

    /// Word for a single decimal digit.
    pub fn digit(&self, d: u32) -> Option<&'static str> {
        if d < 10 { Some(UNITS[d as usize]) } else { None }
    }

    pub fn zero(&self) -> &'static str {
        UNITS[0]
    }
}

fn generate_lookup() -> Vec<String> {
    (0..100usize)
        .map(|i| {
            if i < 20 {
                UNITS[i].to_string()
            } else if i % 10 == 0 {
                TENS[i / 10].to_string()
            } else {
                format!("{}-{}", TENS[i / 10], UNITS[i % 10])
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_teens_and_tens() {
        let table = ScaleTable::indian();
        assert_eq!(table.below_hundred(0), Some("zero"));
        assert_eq!(table.below_hundred(19), Some("nineteen"));
        assert_eq!(table.below_hundred(40), Some("forty"));
        assert_eq!(table.below_hundred(43), Some("forty-three"));
        assert_eq!(table.below_hundred(99), Some("ninety-nine"));
        assert_eq!(table.below_hundred(100), None);
    }

    #[test]
    fn test_scales_descending() {
        let table = ScaleTable::indian();
        let values: Vec<u64> = table.scales().iter().map(|(_, v)| *v).collect();
        assert!(values.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(table.scales()[0], ("crore", 10_000_000));
    }

    #[test]
    fn test_digits() {
        let table = ScaleTable::indian();
        assert_eq!(table.digit(7), Some("seven"));
        assert_eq!(table.digit(10), None);
    }
}
