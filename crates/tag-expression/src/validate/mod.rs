//! Token validation passes.
//!
//! [`apply_rules`] walks the freshly scanned token list once and marks every token that breaks
//! the grammar. A token keeps the first message recorded on it, so checks run from the most
//! specific (function signatures, operator placement) to the most generic (adjacency).

use crate::config::LexerConfig;
use crate::functions::FunctionCatalog;
use crate::message::{Message, MessageKey};
use crate::rules::AdjacencyRule;
use crate::token::{Token, TokenType};

pub(crate) mod conditional;
pub(crate) mod function;

/// Runs every validation pass over `tokens`, in place.
pub fn apply_rules(tokens: &mut [Token], config: &LexerConfig) {
    for index in 0..tokens.len() {
        match tokens[index].kind {
            TokenType::Whitespace => {}
            TokenType::Invalid => {
                tokens[index].mark_invalid(Message::new(MessageKey::InvalidExpression));
            }
            _ => {
                check_token(tokens, index, config);
            }
        }
    }
    check_parenthesis_balance(tokens);
}

/// Validates one non-whitespace token and returns whether it is valid.
fn check_token(tokens: &mut [Token], index: usize, config: &LexerConfig) -> bool {
    let kind = tokens[index].kind;
    match kind {
        // Already diagnosed by the lexer.
        TokenType::Tag | TokenType::Expression if !tokens[index].valid => return false,
        TokenType::Function => return function::validate_function(tokens, index, config),
        TokenType::ConditionalOperator => {
            if !conditional::is_conditional_op_valid(tokens, index, config.functions()) {
                let message = Message::new(MessageKey::InvalidConditionalOperatorLocation)
                    .with("operator", &tokens[index].text);
                tokens[index].mark_invalid(message);
                return false;
            }
        }
        TokenType::Comma => {
            if !conditional::is_comma_valid(tokens, index) {
                tokens[index].mark_invalid(Message::new(MessageKey::InvalidCommaLocation));
                return false;
            }
        }
        _ => {}
    }

    let Some(rule) = AdjacencyRule::for_type(kind) else {
        return true;
    };
    let valid_before = check_before(tokens, index, rule, config);
    let valid_after = check_after(tokens, index, rule, config);
    valid_before && valid_after
}

fn check_before(
    tokens: &mut [Token],
    index: usize,
    rule: &AdjacencyRule,
    config: &LexerConfig,
) -> bool {
    let allowed = match previous_significant(tokens, index) {
        None => rule.can_start_expression,
        Some(prev) => rule.allows_predecessor(tokens[prev].kind),
    };
    if allowed {
        return true;
    }

    let names = config.type_names();
    let mut message = Message::new(MessageKey::InvalidTokenBefore);
    if let Some(prev) = previous_significant(tokens, index) {
        message = message.with("beforeToken", names.name(tokens[prev].kind));
    }
    let message = message
        .with("currentToken", names.name(tokens[index].kind))
        .with("tokenValue", &tokens[index].text);
    tokens[index].mark_invalid(message);
    false
}

fn check_after(
    tokens: &mut [Token],
    index: usize,
    rule: &AdjacencyRule,
    config: &LexerConfig,
) -> bool {
    let allowed = match next_significant(tokens, index) {
        None => rule.can_end_expression,
        Some(next) => rule.allows_successor(tokens[next].kind),
    };
    if allowed {
        return true;
    }

    let names = config.type_names();
    let mut message = Message::new(MessageKey::InvalidTokenAfter);
    if let Some(next) = next_significant(tokens, index) {
        message = message.with("afterToken", names.name(tokens[next].kind));
    }
    let message = message
        .with("currentToken", names.name(tokens[index].kind))
        .with("tokenValue", &tokens[index].text);
    tokens[index].mark_invalid(message);
    false
}

/// Marks every parenthesis without a partner.
fn check_parenthesis_balance(tokens: &mut [Token]) {
    let mut open = Vec::new();
    let mut unmatched = Vec::new();
    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenType::LParen => open.push(index),
            TokenType::RParen => {
                if open.pop().is_none() {
                    unmatched.push(index);
                }
            }
            _ => {}
        }
    }
    unmatched.extend(open);

    for index in unmatched {
        tokens[index].mark_invalid(Message::new(MessageKey::UnbalancedParentheses));
    }
}

pub(crate) fn previous_significant(tokens: &[Token], index: usize) -> Option<usize> {
    (0..index).rev().find(|&i| !tokens[i].is_whitespace())
}

pub(crate) fn next_significant(tokens: &[Token], index: usize) -> Option<usize> {
    (index + 1..tokens.len()).find(|&i| !tokens[i].is_whitespace())
}

pub(crate) fn first_significant(tokens: &[Token]) -> Option<usize> {
    tokens.iter().position(|t| !t.is_whitespace())
}

/// `true` for a function token naming the conditional function (`:IF`).
pub(crate) fn is_conditional_call(token: &Token, functions: &FunctionCatalog) -> bool {
    token
        .function_name()
        .and_then(|name| functions.get(name))
        .is_some_and(|spec| spec.is_conditional())
}
