use crate::tokenizer::TokError;
use thiserror::Error;

pub type Result<'a, T> = std::result::Result<T, ParserError<'a>>;

/// Errors produced while turning source text into a syntax tree.
///
/// Each variant keeps a borrow of the full source so callers can render
/// the offending line; see `prettify_error` in the crate root.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParserError<'a> {
    #[error("tokenizer error: {0}")]
    TokenizerError(TokError, &'a str),
    #[error("{message}")]
    SyntaxError {
        message: String,
        offset: usize,
        source_text: &'a str,
    },
    #[error("unsupported construct: {construct}")]
    UnsupportedConstruct {
        construct: String,
        offset: usize,
        source_text: &'a str,
    },
}

impl ParserError<'_> {
    /// Byte offset the error points at.
    pub fn offset(&self) -> usize {
        match self {
            ParserError::TokenizerError(err, _) => err.offset(),
            ParserError::SyntaxError { offset, .. }
            | ParserError::UnsupportedConstruct { offset, .. } => *offset,
        }
    }

    /// The source text the error was raised against.
    pub fn source_text(&self) -> &str {
        match self {
            ParserError::TokenizerError(_, source) => source,
            ParserError::SyntaxError { source_text, .. }
            | ParserError::UnsupportedConstruct { source_text, .. } => source_text,
        }
    }
}
