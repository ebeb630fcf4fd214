//! Renderer-agnostic diagnostics attached to invalid tokens.
//!
//! A [`Message`] never carries human readable text. The host application looks up
//! [`MessageKey::as_str`] in its own string tables and substitutes the named `params`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKey {
    // Lexical.
    #[serde(rename = "tag-expression-error-invalid_character")]
    InvalidCharacter,
    #[serde(rename = "tag-expression-error-invalid_tag_name")]
    InvalidTagName,
    #[serde(rename = "tag-expression-error-invalid_asset_name")]
    InvalidAssetName,
    #[serde(rename = "tag-expression-error-invalid_expression")]
    InvalidExpression,
    #[serde(rename = "tag-expression-error-invalid_embedded_expression")]
    InvalidEmbeddedExpression,
    #[serde(rename = "tag-expression-error-invalid_function_name")]
    InvalidFunctionName,

    // Structural.
    #[serde(rename = "tag-expression-error-invalid_token_before")]
    InvalidTokenBefore,
    #[serde(rename = "tag-expression-error-invalid_token_after")]
    InvalidTokenAfter,
    #[serde(rename = "tag-expression-error-invalid_comma_location")]
    InvalidCommaLocation,
    #[serde(rename = "tag-expression-error-invalid_conditional_operator_location")]
    InvalidConditionalOperatorLocation,

    // Function semantics.
    #[serde(rename = "tag-expression-error-invalid_function_no_parentheses")]
    FunctionNoParentheses,
    #[serde(rename = "tag-expression-error-invalid_function_unbalanced_parentheses")]
    UnbalancedParentheses,
    #[serde(rename = "tag-expression-error-invalid_function_min_params")]
    FunctionMinParams,
    #[serde(rename = "tag-expression-error-invalid_function_max_params")]
    FunctionMaxParams,
    #[serde(rename = "tag-expression-error-invalid_function_param_type")]
    FunctionParamType,
    #[serde(rename = "tag-expression-error-invalid_function_if")]
    NestedConditionalFunction,

    // Conditional semantics.
    #[serde(rename = "tag-expression-error-invalid_conditional")]
    NotConditional,
    #[serde(rename = "tag-expression-error-invalid_conditional_lhs_operand")]
    ConditionalLhsOperand,
    #[serde(rename = "tag-expression-error-invalid_conditional_rhs_operand")]
    ConditionalRhsOperand,
    #[serde(rename = "tag-expression-error-invalid_non_conditional_lhs_operand")]
    NonConditionalLhsOperand,
    #[serde(rename = "tag-expression-error-invalid_non_conditional_rhs_operand")]
    NonConditionalRhsOperand,
    #[serde(rename = "tag-expression-error-invalid_function_if_param")]
    InvalidIfBranch,

    // Whole expression.
    #[serde(rename = "tag-expression-error-incomplete_expression")]
    IncompleteExpression,
    #[serde(rename = "tag-expression-error-tag_not_found")]
    TagNotFound,
}

impl MessageKey {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKey::InvalidCharacter => "tag-expression-error-invalid_character",
            MessageKey::InvalidTagName => "tag-expression-error-invalid_tag_name",
            MessageKey::InvalidAssetName => "tag-expression-error-invalid_asset_name",
            MessageKey::InvalidExpression => "tag-expression-error-invalid_expression",
            MessageKey::InvalidEmbeddedExpression => {
                "tag-expression-error-invalid_embedded_expression"
            }
            MessageKey::InvalidFunctionName => "tag-expression-error-invalid_function_name",
            MessageKey::InvalidTokenBefore => "tag-expression-error-invalid_token_before",
            MessageKey::InvalidTokenAfter => "tag-expression-error-invalid_token_after",
            MessageKey::InvalidCommaLocation => "tag-expression-error-invalid_comma_location",
            MessageKey::InvalidConditionalOperatorLocation => {
                "tag-expression-error-invalid_conditional_operator_location"
            }
            MessageKey::FunctionNoParentheses => {
                "tag-expression-error-invalid_function_no_parentheses"
            }
            MessageKey::UnbalancedParentheses => {
                "tag-expression-error-invalid_function_unbalanced_parentheses"
            }
            MessageKey::FunctionMinParams => "tag-expression-error-invalid_function_min_params",
            MessageKey::FunctionMaxParams => "tag-expression-error-invalid_function_max_params",
            MessageKey::FunctionParamType => "tag-expression-error-invalid_function_param_type",
            MessageKey::NestedConditionalFunction => "tag-expression-error-invalid_function_if",
            MessageKey::NotConditional => "tag-expression-error-invalid_conditional",
            MessageKey::ConditionalLhsOperand => {
                "tag-expression-error-invalid_conditional_lhs_operand"
            }
            MessageKey::ConditionalRhsOperand => {
                "tag-expression-error-invalid_conditional_rhs_operand"
            }
            MessageKey::NonConditionalLhsOperand => {
                "tag-expression-error-invalid_non_conditional_lhs_operand"
            }
            MessageKey::NonConditionalRhsOperand => {
                "tag-expression-error-invalid_non_conditional_rhs_operand"
            }
            MessageKey::InvalidIfBranch => "tag-expression-error-invalid_function_if_param",
            MessageKey::IncompleteExpression => "tag-expression-error-incomplete_expression",
            MessageKey::TagNotFound => "tag-expression-error-tag_not_found",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub key: MessageKey,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
}

impl Message {
    pub fn new(key: MessageKey) -> Self {
        Self {
            key,
            params: BTreeMap::new(),
        }
    }

    /// Adds a named substitution value.
    pub fn with(mut self, name: &str, value: impl ToString) -> Self {
        self.params.insert(name.to_string(), value.to_string());
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

impl From<MessageKey> for Message {
    fn from(key: MessageKey) -> Self {
        Message::new(key)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key.as_str())?;
        if self.params.is_empty() {
            return Ok(());
        }
        f.write_str(" {")?;
        for (idx, (name, value)) in self.params.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value:?}")?;
        }
        f.write_str("}")
    }
}
