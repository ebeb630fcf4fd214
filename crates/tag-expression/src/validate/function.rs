//! Function call validation: parentheses, arity, parameter types and the extra rules for `:IF`.

use std::ops::Range;

use crate::config::LexerConfig;
use crate::message::{Message, MessageKey};
use crate::token::{Token, TokenType};

use super::{conditional, first_significant, is_conditional_call, next_significant};

/// Layout of one function call in the token list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CallShape {
    /// Index of the opening parenthesis.
    pub open: usize,
    /// Index of the matching closing parenthesis, if there is one.
    pub close: Option<usize>,
    /// Token ranges of the non-empty parameters, split on depth-1 commas.
    pub params: Vec<Range<usize>>,
}

/// Locates the parentheses and parameters of the call at `index`.
///
/// Returns `None` when the next non-whitespace token is not `(`.
pub(crate) fn scan_call(tokens: &[Token], index: usize) -> Option<CallShape> {
    let open = next_significant(tokens, index)?;
    if tokens[open].kind != TokenType::LParen {
        return None;
    }

    let mut depth = 1usize;
    let mut params = Vec::new();
    let mut param_start = open + 1;
    for i in open + 1..tokens.len() {
        match tokens[i].kind {
            TokenType::LParen => depth += 1,
            TokenType::RParen if depth == 1 => {
                if i > param_start {
                    params.push(param_start..i);
                }
                return Some(CallShape {
                    open,
                    close: Some(i),
                    params,
                });
            }
            TokenType::RParen => depth -= 1,
            TokenType::Comma if depth == 1 => {
                if i > param_start {
                    params.push(param_start..i);
                }
                param_start = i + 1;
            }
            _ => {}
        }
    }

    Some(CallShape {
        open,
        close: None,
        params,
    })
}

/// Validates the call at `index`. Diagnostics about the call as a whole go on the function
/// token. A wrong parameter type goes on the first offending token of that parameter; other
/// parameter diagnostics go on the parameter's first non-whitespace token.
pub(crate) fn validate_function(tokens: &mut [Token], index: usize, config: &LexerConfig) -> bool {
    let name = tokens[index].function_name().unwrap_or_default().to_string();
    let Some(spec) = config.functions().get(&name) else {
        let message = Message::new(MessageKey::InvalidFunctionName).with("functionName", name);
        tokens[index].mark_invalid(message);
        return false;
    };

    let Some(call) = scan_call(tokens, index) else {
        let message = Message::new(MessageKey::FunctionNoParentheses).with("functionName", spec.name);
        tokens[index].mark_invalid(message);
        return false;
    };

    if spec.is_conditional() {
        let body_end = call.close.unwrap_or(tokens.len());
        let nested = (call.open + 1..body_end)
            .find(|&i| is_conditional_call(&tokens[i], config.functions()));
        if let Some(nested) = nested {
            let message = Message::new(MessageKey::NestedConditionalFunction)
                .with("functionChild", &tokens[nested].text)
                .with("functionParent", &tokens[index].text);
            tokens[nested].mark_invalid(message);
            return false;
        }
    }

    if call.close.is_none() {
        let message = Message::new(MessageKey::UnbalancedParentheses).with("functionName", spec.name);
        tokens[index].mark_invalid(message);
        return false;
    }

    let count = call.params.len();
    if let Some(min) = spec.min_params.filter(|&min| count < min) {
        let message = Message::new(MessageKey::FunctionMinParams)
            .with("functionName", spec.name)
            .with("params", min);
        tokens[index].mark_invalid(message);
        return false;
    }
    if let Some(max) = spec.max_params.filter(|&max| count > max) {
        let message = Message::new(MessageKey::FunctionMaxParams)
            .with("functionName", spec.name)
            .with("params", max);
        tokens[index].mark_invalid(message);
        return false;
    }

    let mut valid = true;
    for &(param_idx, expected) in spec.param_types {
        let Some(range) = call.params.get(param_idx) else {
            continue;
        };
        let offending = range
            .clone()
            .find(|&i| !tokens[i].is_whitespace() && tokens[i].kind != expected);
        if let Some(offending) = offending {
            let message = Message::new(MessageKey::FunctionParamType)
                .with("functionName", spec.name)
                .with("paramNum", param_idx + 1)
                .with("paramType", config.type_names().name(expected));
            tokens[offending].mark_invalid(message);
            valid = false;
        }
    }

    if spec.is_conditional() {
        valid &= validate_conditional_call(tokens, index, &call, spec.name);
    }
    valid
}

/// The condition must be a well-formed conditional statement and both branches must
/// contain a tag or an embedded expression.
fn validate_conditional_call(
    tokens: &mut [Token],
    index: usize,
    call: &CallShape,
    name: &str,
) -> bool {
    let mut valid = true;

    if let Some(condition) = call.params.first() {
        if let Err(violation) = conditional::check_conditional_statement(&tokens[condition.clone()]) {
            let at = violation.index.map_or(index, |i| condition.start + i);
            tokens[at].mark_invalid(violation.message);
            valid = false;
        }
    }

    for (param_idx, range) in call.params.iter().enumerate().skip(1).take(2) {
        let has_reference = tokens[range.clone()]
            .iter()
            .any(|t| matches!(t.kind, TokenType::Tag | TokenType::Expression));
        if !has_reference {
            let message = Message::new(MessageKey::InvalidIfBranch)
                .with("functionName", name)
                .with("paramNum", param_idx + 1);
            mark_param(tokens, index, range, message);
            valid = false;
        }
    }
    valid
}

/// Marks the first non-whitespace token of `range`, or the function token at `index` when
/// the parameter is blank.
fn mark_param(tokens: &mut [Token], index: usize, range: &Range<usize>, message: Message) {
    let at = first_significant(&tokens[range.clone()]).map_or(index, |i| range.start + i);
    tokens[at].mark_invalid(message);
}
