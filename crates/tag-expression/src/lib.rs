#![forbid(unsafe_code)]
#![deny(unreachable_patterns)]

//! Lexer and validator for tag expressions.
//!
//! A tag expression combines asset tag references (`$asset|tag|`), numeric literals,
//! arithmetic and comparison operators, function calls (`:ABS(...)`) and references to
//! embedded expressions (`&name|`). [`lex`] splits a formula into [`Token`]s and marks every
//! token that breaks the grammar with a [`Message`] that a host can localize.
//!
//! ```
//! use tag_expression::{is_valid, lex, LexerConfig};
//!
//! let tokens = lex(":IF($pump|flow| > 10, $pump|flow|, $tank|level|)", &LexerConfig::default());
//! assert!(is_valid(&tokens));
//! assert_eq!(
//!     tag_expression::display::to_formula(&tokens),
//!     ":IF([$pump|flow| ]>[ 10], $pump|flow|, $tank|level|)"
//! );
//! ```
//!
//! ## Conditional delimiters
//!
//! When a valid expression contains `:IF`, both operands of every comparison in its condition
//! are wrapped in `[` `]` tokens (see [`rewrite`]) so evaluators do not have to re-derive
//! operator precedence.
//!
//! ## Tag names with reserved characters
//!
//! Hosts that know the set of existing tag names can use [`sanitize::lex_with_known_tags`],
//! which accepts names such as `flow<in>` that the plain grammar rejects.

pub mod config;
pub mod display;
pub mod error;
pub mod expressions;
pub mod functions;
pub mod lexer;
pub mod locale;
pub mod message;
pub mod rewrite;
pub mod rules;
pub mod sanitize;
pub mod token;
mod validate;

pub use crate::config::{LexerConfig, LexerSettings};
pub use crate::error::{ConfigError, ProbeError, RewriteError};
pub use crate::expressions::{ExpressionCatalog, ExpressionDefinition};
pub use crate::functions::{FunctionCatalog, FunctionSpec};
pub use crate::lexer::{lex, TagExpressionParser};
pub use crate::locale::TypeNames;
pub use crate::message::{Message, MessageKey};
pub use crate::token::{is_valid, SpecialChar, TagParts, Token, TokenType};
