//! Placement rules for commas and conditional operators, and the operand analysis shared with
//! the delimiter rewriter.

use std::ops::Range;

use crate::functions::FunctionCatalog;
use crate::message::{Message, MessageKey};
use crate::token::{Token, TokenType};

use super::{first_significant, is_conditional_call, previous_significant};

/// First problem found in a conditional statement. `index` is relative to the checked slice
/// and is `None` when the statement has no significant token to point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Violation {
    pub index: Option<usize>,
    pub message: Message,
}

/// A comma is only valid inside the parentheses of a function call.
pub(crate) fn is_comma_valid(tokens: &[Token], index: usize) -> bool {
    match enclosing_open_paren(tokens, index) {
        Some(open) => previous_significant(tokens, open)
            .is_some_and(|prev| tokens[prev].kind == TokenType::Function),
        None => false,
    }
}

/// A conditional operator is only valid in the first parameter of the conditional function,
/// outside any other call nested in that parameter.
pub(crate) fn is_conditional_op_valid(
    tokens: &[Token],
    index: usize,
    functions: &FunctionCatalog,
) -> bool {
    let mut depth = 0usize;
    for j in (0..index).rev() {
        match tokens[j].kind {
            TokenType::RParen => depth += 1,
            TokenType::LParen if depth > 0 => depth -= 1,
            TokenType::LParen => {
                if let Some(prev) = previous_significant(tokens, j) {
                    if tokens[prev].kind == TokenType::Function {
                        return is_conditional_call(&tokens[prev], functions);
                    }
                }
            }
            TokenType::Comma if depth == 0 => return false,
            _ => {}
        }
    }
    false
}

/// Index of the innermost unmatched `(` before `index`.
fn enclosing_open_paren(tokens: &[Token], index: usize) -> Option<usize> {
    let mut depth = 0usize;
    for j in (0..index).rev() {
        match tokens[j].kind {
            TokenType::RParen => depth += 1,
            TokenType::LParen if depth == 0 => return Some(j),
            TokenType::LParen => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Left operand of the operator at `op`: everything back to the nearest `(`, operator or
/// conditional operator at the same nesting depth, or to the start of `tokens`.
pub(crate) fn lhs_operand(tokens: &[Token], op: usize) -> Range<usize> {
    let mut depth = 0usize;
    let mut start = 0;
    for j in (0..op).rev() {
        match tokens[j].kind {
            TokenType::RParen => depth += 1,
            TokenType::LParen if depth > 0 => depth -= 1,
            TokenType::LParen | TokenType::Operator | TokenType::ConditionalOperator
                if depth == 0 =>
            {
                start = j + 1;
                break;
            }
            _ => {}
        }
    }
    start..op
}

/// Mirror image of [`lhs_operand`].
pub(crate) fn rhs_operand(tokens: &[Token], op: usize) -> Range<usize> {
    let mut depth = 0usize;
    let mut end = tokens.len();
    for j in op + 1..tokens.len() {
        match tokens[j].kind {
            TokenType::LParen => depth += 1,
            TokenType::RParen if depth > 0 => depth -= 1,
            TokenType::RParen | TokenType::Operator | TokenType::ConditionalOperator
                if depth == 0 =>
            {
                end = j;
                break;
            }
            _ => {}
        }
    }
    op + 1..end
}

/// An operand is conditional when it contains a conditional operator at any depth.
pub(crate) fn is_conditional(tokens: &[Token], operand: Range<usize>) -> bool {
    tokens[operand]
        .iter()
        .any(|t| t.kind == TokenType::ConditionalOperator)
}

/// Checks the first parameter of a conditional call.
///
/// Comparison operators and arithmetic operators need plain operands; `AND`/`OR` need
/// conditional operands on both sides. Every conditional operator must sit directly in the
/// statement, not inside another call, and there must be at least one.
pub(crate) fn check_conditional_statement(param: &[Token]) -> Result<(), Violation> {
    let mut found = false;
    for (i, token) in param.iter().enumerate() {
        if token.kind == TokenType::ConditionalOperator {
            found = true;
            if inside_nested_call(param, i) {
                return Err(Violation {
                    index: Some(i),
                    message: Message::new(MessageKey::InvalidConditionalOperatorLocation)
                        .with("operator", &token.text),
                });
            }
        }

        let (lhs_key, rhs_key, want_conditional) = match token.kind {
            TokenType::ConditionalOperator if token.is_logical_operator() => (
                MessageKey::ConditionalLhsOperand,
                MessageKey::ConditionalRhsOperand,
                true,
            ),
            TokenType::Operator | TokenType::ConditionalOperator => (
                MessageKey::NonConditionalLhsOperand,
                MessageKey::NonConditionalRhsOperand,
                false,
            ),
            _ => continue,
        };

        if is_conditional(param, lhs_operand(param, i)) != want_conditional {
            return Err(Violation {
                index: Some(i),
                message: Message::new(lhs_key).with("operator", &token.text),
            });
        }
        if is_conditional(param, rhs_operand(param, i)) != want_conditional {
            return Err(Violation {
                index: Some(i),
                message: Message::new(rhs_key).with("operator", &token.text),
            });
        }
    }

    if !found {
        return Err(Violation {
            index: first_significant(param),
            message: Message::new(MessageKey::NotConditional),
        });
    }
    Ok(())
}

/// `true` when the innermost unmatched `(` before `index` belongs to a function call.
fn inside_nested_call(param: &[Token], index: usize) -> bool {
    enclosing_open_paren(param, index)
        .and_then(|open| previous_significant(param, open))
        .is_some_and(|prev| param[prev].kind == TokenType::Function)
}
