//! Token model shared by the lexer, the validators and the delimiter rewriter.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// Marker characters fixed by the tag expression grammar.
///
/// A tag reference is written `$asset|tag|`, a function call `:NAME(...)` and an embedded
/// expression reference `&name|`.
pub struct SpecialChar;

impl SpecialChar {
    /// Starts an asset reference (and therefore a tag reference).
    pub const ASSET: char = '$';
    /// Separates the asset name from the tag name and terminates the tag name.
    pub const TAG: char = '|';
    /// Prefixes a function label.
    pub const FUNCTION: char = ':';
    /// Prefixes an embedded expression label.
    pub const EXPRESSION: char = '&';
}

/// Canonical text of the comparison and boolean operators.
pub mod conditional_ops {
    pub const GT: &str = ">";
    pub const LT: &str = "<";
    pub const GTEQ: &str = ">=";
    pub const LTEQ: &str = "<=";
    pub const EQ: &str = "==";
    pub const NOTEQ: &str = "!=";
    pub const OR: &str = "OR";
    pub const AND: &str = "AND";
}

/// Opening and closing conditional delimiter text.
pub const DELIMITER_OPEN: &str = "[";
pub const DELIMITER_CLOSE: &str = "]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenType {
    #[serde(rename = "LPAREN")]
    LParen,
    #[serde(rename = "RPAREN")]
    RParen,
    #[serde(rename = "OPERATOR")]
    Operator,
    #[serde(rename = "CONDITIONAL_OPERATOR")]
    ConditionalOperator,
    #[serde(rename = "CONDITIONAL_DELIMITER")]
    ConditionalDelimiter,
    #[serde(rename = "TAG")]
    Tag,
    #[serde(rename = "NUMBER")]
    Number,
    #[serde(rename = "WHITESPACE")]
    Whitespace,
    #[serde(rename = "COMMA")]
    Comma,
    #[serde(rename = "FUNCTION")]
    Function,
    #[serde(rename = "EXPRESSION")]
    Expression,
    #[serde(rename = "INVALID")]
    Invalid,
}

impl TokenType {
    pub const ALL: [TokenType; 12] = [
        TokenType::LParen,
        TokenType::RParen,
        TokenType::Operator,
        TokenType::ConditionalOperator,
        TokenType::ConditionalDelimiter,
        TokenType::Tag,
        TokenType::Number,
        TokenType::Whitespace,
        TokenType::Comma,
        TokenType::Function,
        TokenType::Expression,
        TokenType::Invalid,
    ];

    /// Stable identifier used in locale tables and serialized token streams.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenType::LParen => "LPAREN",
            TokenType::RParen => "RPAREN",
            TokenType::Operator => "OPERATOR",
            TokenType::ConditionalOperator => "CONDITIONAL_OPERATOR",
            TokenType::ConditionalDelimiter => "CONDITIONAL_DELIMITER",
            TokenType::Tag => "TAG",
            TokenType::Number => "NUMBER",
            TokenType::Whitespace => "WHITESPACE",
            TokenType::Comma => "COMMA",
            TokenType::Function => "FUNCTION",
            TokenType::Expression => "EXPRESSION",
            TokenType::Invalid => "INVALID",
        }
    }

    /// Inverse of [`TokenType::as_str`]. Matching is case-insensitive.
    pub fn from_name(name: &str) -> Option<TokenType> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenType,
    pub text: String,
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

impl Token {
    pub fn new(kind: TokenType, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            valid: true,
            message: None,
        }
    }

    pub fn invalid(kind: TokenType, text: impl Into<String>, message: Message) -> Self {
        Self {
            kind,
            text: text.into(),
            valid: false,
            message: Some(message),
        }
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenType::Whitespace
    }

    /// Marks the token invalid. The first message recorded on a token is kept.
    pub fn mark_invalid(&mut self, message: Message) {
        self.valid = false;
        if self.message.is_none() {
            self.message = Some(message);
        }
    }

    /// Marks the token invalid, replacing any message recorded earlier.
    pub fn force_invalid(&mut self, message: Message) {
        self.valid = false;
        self.message = Some(message);
    }

    /// Function label without the leading marker (`:ABS` -> `ABS`).
    pub fn function_name(&self) -> Option<&str> {
        if self.kind != TokenType::Function {
            return None;
        }
        self.text.strip_prefix(SpecialChar::FUNCTION)
    }

    pub fn is_logical_operator(&self) -> bool {
        self.kind == TokenType::ConditionalOperator
            && (self.text == conditional_ops::AND || self.text == conditional_ops::OR)
    }

    /// Comparison operator (`>`, `>=`, `==`, ...), i.e. a conditional operator other than
    /// `AND`/`OR`.
    pub fn is_comparison_operator(&self) -> bool {
        self.kind == TokenType::ConditionalOperator && !self.is_logical_operator()
    }

    /// Splits a tag token into its asset part and its `|tag|` part.
    ///
    /// `$pump|flow|` yields `("$pump", "|flow|")`. Returns `None` for non-tag tokens.
    pub fn tag_parts(&self) -> Option<TagParts<'_>> {
        if self.kind != TokenType::Tag {
            return None;
        }
        let (asset, tag) = match self.text.find(SpecialChar::TAG) {
            Some(pos) => self.text.split_at(pos),
            None => (self.text.as_str(), ""),
        };
        Some(TagParts { asset, tag })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagParts<'a> {
    pub asset: &'a str,
    /// The tag name including both delimiters, or empty when the token has no delimiter.
    pub tag: &'a str,
}

impl TagParts<'_> {
    /// Tag name with the surrounding delimiters removed.
    pub fn tag_name(&self) -> &str {
        let inner = self.tag.strip_prefix(SpecialChar::TAG).unwrap_or(self.tag);
        inner.strip_suffix(SpecialChar::TAG).unwrap_or(inner)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TYPE<{}> VALUE<{}> VALID<{}> MESSAGE<",
            self.kind, self.text, self.valid
        )?;
        if let Some(message) = &self.message {
            write!(f, "{message}")?;
        }
        f.write_str(">")
    }
}

/// Returns `true` when every token in the sequence is valid.
pub fn is_valid(tokens: &[Token]) -> bool {
    tokens.iter().all(|t| t.valid)
}
