use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    // Numeral errors
    #[error("Malformed numeral: {0}")]
    Format(String),

    #[error("Multiplier {count} for scale '{scale}' is out of range (max 99)")]
    OutOfRangeScale { scale: &'static str, count: u64 },

    // Table lookups
    #[error("Unknown currency symbol: {0}")]
    UnknownSymbol(String),

    #[error("Unknown letter prefix: {0}")]
    UnknownPrefix(String),

    // Construction
    #[error("Rule pattern failed to compile: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Config parse error: {path} - {reason}")]
    ConfigParse { path: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NormalizeResult<T> = Result<T, NormalizeError>;
