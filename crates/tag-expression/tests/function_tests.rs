use pretty_assertions::assert_eq;
use tag_expression::{is_valid, lex, LexerConfig, Message, MessageKey, Token, TokenType};

fn lex_default(formula: &str) -> Vec<Token> {
    lex(formula, &LexerConfig::default())
}

/// `(text, message)` for every token that carries a message.
fn diagnostics(tokens: &[Token]) -> Vec<(&str, &Message)> {
    tokens
        .iter()
        .filter_map(|t| t.message.as_ref().map(|m| (t.text.as_str(), m)))
        .collect()
}

#[test]
fn single_argument_function_is_valid() {
    assert!(is_valid(&lex_default(":ABS($a|x|)")));
    assert!(is_valid(&lex_default(":abs($a|x|) + :Sqrt($b|y|)")));
}

#[test]
fn too_many_arguments_marks_the_function() {
    let tokens = lex_default(":ABS($a|x|,$b|y|)");
    let diags = diagnostics(&tokens);
    assert_eq!(diags.len(), 1, "{tokens:#?}");
    let (text, message) = diags[0];
    assert_eq!(text, ":ABS");
    assert_eq!(message.key, MessageKey::FunctionMaxParams);
    assert_eq!(message.param("functionName"), Some("ABS"));
    assert_eq!(message.param("params"), Some("1"));
}

#[test]
fn too_few_arguments_marks_the_function() {
    let tokens = lex_default(":MIN($a|x|)");
    let message = tokens[0].message.as_ref().unwrap();
    assert_eq!(message.key, MessageKey::FunctionMinParams);
    assert_eq!(message.param("params"), Some("2"));
}

#[test]
fn variadic_functions_accept_many_arguments() {
    let tokens = lex_default(":SUM($a|x|, $b|y|, 3, :MAX($c|z|, 4))");
    assert!(is_valid(&tokens), "{tokens:#?}");
}

#[test]
fn function_without_parentheses() {
    let tokens = lex_default("$a|x| + :ABS");
    let last = tokens.last().unwrap();
    assert_eq!(last.text, ":ABS");
    assert_eq!(
        last.message.as_ref().map(|m| m.key),
        Some(MessageKey::FunctionNoParentheses)
    );
}

#[test]
fn unclosed_call_is_unbalanced() {
    let tokens = lex_default(":ABS($a|x|");
    assert_eq!(
        tokens[0].message.as_ref().map(|m| m.key),
        Some(MessageKey::UnbalancedParentheses)
    );
    assert_eq!(
        tokens[1].message.as_ref().map(|m| m.key),
        Some(MessageKey::UnbalancedParentheses)
    );
}

#[test]
fn typed_parameters_are_checked() {
    assert!(is_valid(&lex_default(":MAVG($a|x|, 3)")));

    let tokens = lex_default(":MAVG(3, $a|x|)");
    let diags = diagnostics(&tokens);
    assert_eq!(diags.len(), 2, "{tokens:#?}");

    let (text, message) = diags[0];
    assert_eq!(text, "3");
    assert_eq!(message.key, MessageKey::FunctionParamType);
    assert_eq!(message.param("paramNum"), Some("1"));
    assert_eq!(message.param("paramType"), Some("Tag"));

    let (text, message) = diags[1];
    assert_eq!(text, "$a|x|");
    assert_eq!(message.param("paramNum"), Some("2"));
    assert_eq!(message.param("paramType"), Some("Number"));
}

#[test]
fn nested_if_marks_the_inner_call() {
    let tokens = lex_default(":IF(:IF($a|x|>1,1,0)>0,1,0)");
    let inner = tokens.iter().filter(|t| t.kind == TokenType::Function).nth(1).unwrap();
    let message = inner.message.as_ref().unwrap();
    assert_eq!(message.key, MessageKey::NestedConditionalFunction);
    assert_eq!(message.param("functionChild"), Some(":IF"));
    assert_eq!(message.param("functionParent"), Some(":IF"));
    assert!(!is_valid(&tokens));
}

#[test]
fn if_condition_must_compare() {
    let tokens = lex_default(":IF($a|x|, $a|x|, $b|y|)");
    let diags = diagnostics(&tokens);
    assert_eq!(diags[0].0, "$a|x|");
    assert_eq!(diags[0].1.key, MessageKey::NotConditional);
}

#[test]
fn if_branches_need_a_reference() {
    let tokens = lex_default(":IF($a|x| > 1, 1, $b|y|)");
    let diags = diagnostics(&tokens);
    assert_eq!(diags.len(), 1, "{tokens:#?}");
    let (text, message) = diags[0];
    assert_eq!(text, "1");
    assert_eq!(message.key, MessageKey::InvalidIfBranch);
    assert_eq!(message.param("functionName"), Some("IF"));
    assert_eq!(message.param("paramNum"), Some("2"));
}

#[test]
fn logical_operators_need_conditional_operands() {
    let tokens = lex_default(":IF(1 AND 2, $a|x|, $b|y|)");
    let and = tokens.iter().find(|t| t.text == "AND").unwrap();
    let message = and.message.as_ref().unwrap();
    assert_eq!(message.key, MessageKey::ConditionalLhsOperand);
    assert_eq!(message.param("operator"), Some("AND"));
}

#[test]
fn arithmetic_on_a_comparison_is_rejected() {
    let tokens = lex_default(":IF(($a|x| > 1) + 2 > 1, $a|x|, $b|y|)");
    let plus = tokens.iter().find(|t| t.text == "+").unwrap();
    assert_eq!(
        plus.message.as_ref().map(|m| m.key),
        Some(MessageKey::NonConditionalLhsOperand)
    );
}

#[test]
fn comparison_outside_if_is_misplaced() {
    let tokens = lex_default("$a|x| > 1");
    let op = tokens
        .iter()
        .find(|t| t.kind == TokenType::ConditionalOperator)
        .unwrap();
    let message = op.message.as_ref().unwrap();
    assert_eq!(message.key, MessageKey::InvalidConditionalOperatorLocation);
    assert_eq!(message.param("operator"), Some(">"));
}

#[test]
fn comparison_in_if_branch_is_misplaced() {
    let tokens = lex_default(":IF($a|x| > 1, $a|x| > 2, $b|y|)");
    let ops: Vec<_> = tokens
        .iter()
        .filter(|t| t.kind == TokenType::ConditionalOperator)
        .collect();
    assert!(ops[0].valid);
    assert_eq!(
        ops[1].message.as_ref().map(|m| m.key),
        Some(MessageKey::InvalidConditionalOperatorLocation)
    );
}

#[test]
fn comparison_inside_nested_call_is_misplaced() {
    let tokens = lex_default(":IF(:ABS($a|x| > 1), $a|x|, $b|y|)");
    let op = tokens
        .iter()
        .find(|t| t.kind == TokenType::ConditionalOperator)
        .unwrap();
    assert_eq!(
        op.message.as_ref().map(|m| m.key),
        Some(MessageKey::InvalidConditionalOperatorLocation)
    );
}

#[test]
fn comma_outside_a_call_is_misplaced() {
    let tokens = lex_default("$a|x|, $b|y|");
    assert_eq!(
        tokens[1].message.as_ref().map(|m| m.key),
        Some(MessageKey::InvalidCommaLocation)
    );
}

#[test]
fn parameter_type_marks_the_offending_token() {
    let tokens = lex_default(":MAVG($a|x| + 1, 3)");
    let diags = diagnostics(&tokens);
    assert_eq!(diags.len(), 1, "{tokens:#?}");
    let (text, message) = diags[0];
    assert_eq!(text, "+");
    assert_eq!(message.key, MessageKey::FunctionParamType);
    assert_eq!(message.param("paramNum"), Some("1"));
    assert_eq!(message.param("paramType"), Some("Tag"));

    let tag = tokens.iter().find(|t| t.kind == TokenType::Tag).unwrap();
    assert!(tag.valid);
    assert!(tag.message.is_none());
}

#[test]
fn blank_if_condition_marks_the_function() {
    let tokens = lex_default(":IF( , $a|x|, $b|y|)");
    assert!(!is_valid(&tokens));
    assert_eq!(tokens[0].text, ":IF");
    assert_eq!(
        tokens[0].message.as_ref().map(|m| m.key),
        Some(MessageKey::NotConditional)
    );
    assert!(tokens
        .iter()
        .filter(|t| t.is_whitespace())
        .all(|t| t.message.is_none()));
}

#[test]
fn blank_if_branch_marks_the_function() {
    let tokens = lex_default(":IF($a|x| > 1, , $b|y|)");
    let message = tokens[0].message.as_ref().unwrap();
    assert_eq!(message.key, MessageKey::InvalidIfBranch);
    assert_eq!(message.param("paramNum"), Some("2"));
    assert!(tokens
        .iter()
        .filter(|t| t.is_whitespace())
        .all(|t| t.message.is_none()));
}
