//! Error types for transaction wire decoding and encoding

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum CodecError {
    /// The buffer ended before a declared field was fully read.
    #[error("Unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    /// A declared length or count exceeds the configured bound.
    #[error("Malformed length for {field}: declared {declared}, maximum {max}")]
    MalformedLength {
        field: &'static str,
        declared: u64,
        max: u64,
    },

    /// Number of witness stacks differs from the number of inputs in a segwit transaction.
    #[error("Witness count mismatch: {inputs} inputs, {witnesses} witness stacks")]
    WitnessCountMismatch { inputs: usize, witnesses: usize },

    /// VarInt encoded wider than its value requires.
    #[error("Non-canonical VarInt: value {value} encoded in {width} bytes")]
    NonCanonicalVarInt { value: u64, width: usize },

    /// Legacy transaction with zero inputs and outputs would read back as segwit.
    #[error("Ambiguous encoding: legacy transaction with zero inputs and {outputs} outputs")]
    AmbiguousEncoding { outputs: usize },

    #[error("Trailing bytes after transaction: {count}")]
    TrailingBytes { count: usize },

    #[error("I/O error: {0}")]
    Io(String),
}

impl CodecError {
    /// True for errors caused by the stream ending early.
    pub fn is_unexpected_eof(&self) -> bool {
        matches!(self, CodecError::UnexpectedEof { .. })
    }

    /// True for length fields that are out of bounds or non-canonically encoded.
    pub fn is_malformed_length(&self) -> bool {
        matches!(
            self,
            CodecError::MalformedLength { .. } | CodecError::NonCanonicalVarInt { .. }
        )
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
