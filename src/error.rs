use thiserror::Error;

use crate::Symbol;

pub type Result<T> = std::result::Result<T, HuffmanError>;

#[derive(Debug, Error)]
pub enum HuffmanError {
    #[error("input text is empty, nothing to compress")]
    EmptyInput,

    #[error("frequency table has no entries, cannot build a tree")]
    EmptyFrequencyTable,

    #[error("missing input: {0}")]
    MissingInput(String),

    #[error("symbol {symbol:?} at position {position} has no code in the table")]
    UnknownSymbol { symbol: Symbol, position: usize },

    #[error("code '{code}' is assigned to both {first:?} and {second:?}")]
    DuplicateCode {
        code: String,
        first: Symbol,
        second: Symbol,
    },

    #[error("code of {shorter:?} is a prefix of the code of {longer:?}")]
    AmbiguousCode { shorter: Symbol, longer: Symbol },

    #[error("payload ended with unmatched digits '{buffer}'")]
    IncompleteCode { buffer: String },

    #[error("no code matched at digit {position}: buffer exceeds the longest code ({max_len} digits)")]
    RunawayBuffer { position: usize, max_len: usize },

    #[error("malformed tree: {0}")]
    MalformedTree(String),

    #[error("invalid digit {digit:?} at position {position}, expected '0' or '1'")]
    InvalidDigit { digit: char, position: usize },

    #[error("symbol {symbol:?} has an empty code")]
    EmptyCode { symbol: Symbol },

    #[error("output {output} would overwrite input {input}")]
    OutputCollision { output: String, input: String },

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("key is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
