use thiserror::Error;

use crate::token::TokenType;

/// Errors raised while building a [`crate::LexerConfig`] from host-supplied data.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid lexer settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown token type {name:?}")]
    UnknownTokenType { name: String },

    #[error("invalid type name table at line {line}: {reason}")]
    TypeNameTable { line: usize, reason: String },
}

/// Structural failure while inserting conditional delimiters.
///
/// The lexer never surfaces this to callers; it degrades the whole expression to invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    #[error("conditional function at token {index} is not followed by '('")]
    MissingParenthesis { index: usize },

    #[error("conditional function at token {index} has no matching ')'")]
    UnbalancedParentheses { index: usize },

    #[error("conditional function at token {index} has no condition")]
    MissingCondition { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("token {text:?} of type {kind} cannot be rendered as arithmetic")]
    UnsupportedToken { kind: TokenType, text: String },
}
