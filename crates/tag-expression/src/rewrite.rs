//! Conditional delimiter insertion.
//!
//! Downstream evaluators need the operands of every comparison in an `:IF` condition to be
//! explicitly bracketed. For `:IF($a|x| > 1, $a|x|, $b|y|)` the rewritten sequence reads
//! `:IF([$a|x| ]>[ 1], $a|x|, $b|y|)`.
//!
//! The rewrite is computed as a list of token ranges and applied in a single pass, so indices
//! never shift while the ranges are being collected.

use std::ops::Range;

use crate::error::RewriteError;
use crate::functions::FunctionCatalog;
use crate::token::{Token, TokenType, DELIMITER_CLOSE, DELIMITER_OPEN};
use crate::validate::conditional::{lhs_operand, rhs_operand};
use crate::validate::function::scan_call;
use crate::validate::is_conditional_call;

/// `true` when `tokens` contain a call to the conditional function.
pub fn contains_conditional_call(tokens: &[Token], functions: &FunctionCatalog) -> bool {
    tokens.iter().any(|t| is_conditional_call(t, functions))
}

/// Returns a copy of `tokens` with conditional delimiters around both operands of every
/// comparison operator in the first parameter of each conditional call.
///
/// Operands that already contain a delimiter are left alone, which makes the rewrite
/// idempotent.
pub fn apply_conditional_delimiters(
    tokens: &[Token],
    functions: &FunctionCatalog,
) -> Result<Vec<Token>, RewriteError> {
    let mut ranges: Vec<Range<usize>> = Vec::new();

    for index in 0..tokens.len() {
        if !is_conditional_call(&tokens[index], functions) {
            continue;
        }
        let call = scan_call(tokens, index).ok_or(RewriteError::MissingParenthesis { index })?;
        if call.close.is_none() {
            return Err(RewriteError::UnbalancedParentheses { index });
        }
        let condition = call
            .params
            .first()
            .cloned()
            .ok_or(RewriteError::MissingCondition { index })?;

        let statement = &tokens[condition.clone()];
        for (i, token) in statement.iter().enumerate() {
            if !token.is_comparison_operator() {
                continue;
            }
            for operand in [lhs_operand(statement, i), rhs_operand(statement, i)] {
                let absolute = condition.start + operand.start..condition.start + operand.end;
                schedule(&mut ranges, tokens, absolute);
            }
        }
    }

    log::trace!("inserting {} conditional delimiter pairs", ranges.len());
    Ok(splice(tokens, &ranges))
}

fn schedule(ranges: &mut Vec<Range<usize>>, tokens: &[Token], candidate: Range<usize>) {
    if candidate.is_empty() {
        return;
    }
    let delimited = tokens[candidate.clone()]
        .iter()
        .any(|t| t.kind == TokenType::ConditionalDelimiter);
    let overlaps = ranges
        .iter()
        .any(|r| r.start < candidate.end && candidate.start < r.end);
    if !delimited && !overlaps {
        ranges.push(candidate);
    }
}

fn splice(tokens: &[Token], ranges: &[Range<usize>]) -> Vec<Token> {
    let mut opens = vec![0usize; tokens.len()];
    let mut closes = vec![0usize; tokens.len()];
    for range in ranges {
        opens[range.start] += 1;
        closes[range.end - 1] += 1;
    }

    let mut out = Vec::with_capacity(tokens.len() + 2 * ranges.len());
    for (i, token) in tokens.iter().enumerate() {
        for _ in 0..opens[i] {
            out.push(Token::new(TokenType::ConditionalDelimiter, DELIMITER_OPEN));
        }
        out.push(token.clone());
        for _ in 0..closes[i] {
            out.push(Token::new(TokenType::ConditionalDelimiter, DELIMITER_CLOSE));
        }
    }
    out
}
