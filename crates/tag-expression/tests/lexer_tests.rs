use pretty_assertions::assert_eq;
use tag_expression::display::to_formula;
use tag_expression::{
    is_valid, lex, ExpressionDefinition, LexerConfig, MessageKey, TagExpressionParser, Token,
    TokenType,
};

fn lex_default(formula: &str) -> Vec<Token> {
    lex(formula, &LexerConfig::default())
}

fn significant(tokens: &[Token]) -> Vec<&Token> {
    tokens.iter().filter(|t| !t.is_whitespace()).collect()
}

fn kinds(tokens: &[Token]) -> Vec<TokenType> {
    tokens.iter().map(|t| t.kind).collect()
}

fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

fn key(token: &Token) -> Option<MessageKey> {
    token.message.as_ref().map(|m| m.key)
}

#[test]
fn simple_arithmetic_over_tags_is_valid() {
    let tokens = lex_default("$pump|flow| + 1.5 * ($tank|level| - 2)");
    assert!(is_valid(&tokens), "{tokens:#?}");
    assert_eq!(
        texts(&tokens),
        vec![
            "$pump|flow|",
            " ",
            "+",
            " ",
            "1.5",
            " ",
            "*",
            " ",
            "(",
            "$tank|level|",
            " ",
            "-",
            " ",
            "2",
            ")",
        ]
    );
}

#[test]
fn well_formed_tag_is_a_single_token() {
    let tokens = lex_default("$asset|tag|");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenType::Tag);
    assert!(tokens[0].valid);
}

#[test]
fn tag_without_terminator_is_an_invalid_tag_name() {
    let tokens = lex_default("$asset|tag");
    assert_eq!(tokens.len(), 1);
    assert!(!tokens[0].valid);
    let message = tokens[0].message.as_ref().unwrap();
    assert_eq!(message.key, MessageKey::InvalidTagName);
    assert_eq!(message.param("tagOrAssetName"), Some("$asset|tag"));
}

#[test]
fn tag_with_empty_asset_is_an_invalid_expression() {
    let tokens = lex_default("$|tag|");
    assert_eq!(key(&tokens[0]), Some(MessageKey::InvalidExpression));
}

#[test]
fn tag_without_separator_is_an_invalid_asset_name() {
    let tokens = lex_default("$asset");
    assert_eq!(key(&tokens[0]), Some(MessageKey::InvalidAssetName));
}

#[test]
fn tag_with_forbidden_character_is_rejected() {
    let tokens = lex_default("$asset|fl?ow|");
    assert_eq!(key(&tokens[0]), Some(MessageKey::InvalidTagName));
}

#[test]
fn minus_after_number_is_an_operator() {
    let tokens = lex_default("3-2");
    assert_eq!(
        kinds(&tokens),
        vec![TokenType::Number, TokenType::Operator, TokenType::Number]
    );
    assert_eq!(texts(&tokens), vec!["3", "-", "2"]);
}

#[test]
fn minus_after_open_paren_is_a_sign() {
    let tokens = lex_default("(-2)");
    assert_eq!(
        kinds(&tokens),
        vec![TokenType::LParen, TokenType::Number, TokenType::RParen]
    );
    assert_eq!(tokens[1].text, "-2");
}

#[test]
fn minus_after_operator_is_a_sign() {
    let tokens = lex_default("$a|x|*-2");
    assert!(is_valid(&tokens), "{tokens:#?}");
    assert_eq!(texts(&tokens), vec!["$a|x|", "*", "-2"]);
}

#[test]
fn dangling_sign_is_an_invalid_character() {
    let tokens = lex_default("(-$a|x|)");
    assert_eq!(tokens[1].kind, TokenType::Invalid);
    assert_eq!(key(&tokens[1]), Some(MessageKey::InvalidCharacter));
}

#[test]
fn two_character_comparisons_are_single_tokens() {
    for op in [">=", "<=", "==", "!="] {
        let formula = format!(":IF($a|x| {op} 1, $a|x|, $b|y|)");
        let tokens = lex_default(&formula);
        let ops: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenType::ConditionalOperator)
            .collect();
        assert_eq!(ops.len(), 1, "{formula}");
        assert_eq!(ops[0].text, op);
        assert!(is_valid(&tokens), "{formula}: {tokens:#?}");
    }
}

#[test]
fn lone_equals_and_bang_are_invalid() {
    for formula in ["$a|x| = 1", "$a|x| ! 1"] {
        let tokens = lex_default(formula);
        let invalid: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenType::Invalid)
            .collect();
        assert_eq!(invalid.len(), 1, "{formula}");
        let message = invalid[0].message.as_ref().unwrap();
        assert_eq!(message.key, MessageKey::InvalidCharacter);
        assert_eq!(message.param("character"), Some(&invalid[0].text[..]));
    }
}

#[test]
fn formula_without_references_is_incomplete() {
    let tokens = lex_default("5+3");
    let last = tokens.last().unwrap();
    assert!(!last.valid);
    assert_eq!(key(last), Some(MessageKey::IncompleteExpression));
    assert!(tokens[..tokens.len() - 1].iter().all(|t| t.valid));
}

#[test]
fn incomplete_expression_overrides_earlier_message() {
    let tokens = lex_default("1 +");
    assert_eq!(key(tokens.last().unwrap()), Some(MessageKey::IncompleteExpression));
}

#[test]
fn invalid_reference_still_counts_as_a_reference() {
    let tokens = lex_default("$asset|tag");
    assert_eq!(key(&tokens[0]), Some(MessageKey::InvalidTagName));
}

#[test]
fn empty_and_blank_formulas() {
    assert!(lex_default("").is_empty());
    let blank = lex_default("   ");
    assert_eq!(kinds(&blank), vec![TokenType::Whitespace]);
}

#[test]
fn unknown_function_name_is_reported() {
    let tokens = lex_default(":FOO($a|x|)");
    assert_eq!(tokens[0].text, ":FOO");
    let message = tokens[0].message.as_ref().unwrap();
    assert_eq!(message.key, MessageKey::InvalidFunctionName);
    assert_eq!(message.param("functionName"), Some("FOO"));
}

#[test]
fn embedded_expressions_resolve_against_the_catalog() {
    let config = LexerConfig::default().with_expressions([ExpressionDefinition::new("NetPower")]);
    let parser = TagExpressionParser::new(config);

    let tokens = parser.lex("&NetPower| * 2");
    assert!(is_valid(&tokens), "{tokens:#?}");
    assert_eq!(tokens[0].kind, TokenType::Expression);

    let tokens = parser.lex("&Missing| * 2");
    let message = tokens[0].message.as_ref().unwrap();
    assert_eq!(message.key, MessageKey::InvalidEmbeddedExpression);
    assert_eq!(message.param("expressionName"), Some("&Missing|"));

    let tokens = parser.lex("&NetPower");
    assert_eq!(
        key(&tokens[0]),
        Some(MessageKey::InvalidEmbeddedExpression)
    );
}

#[test]
fn keywords_need_surrounding_spaces() {
    let formula = ":IF(($a|x| > 1) and ($b|y| < 2), $a|x|, $b|y|)";
    let tokens = lex_default(formula);
    assert!(is_valid(&tokens), "{tokens:#?}");
    assert!(tokens.iter().any(|t| t.text == "AND"));

    let tokens = lex_default("$a|x|AND $b|y|");
    assert!(tokens.iter().any(|t| t.kind == TokenType::Invalid));
}

#[test]
fn adjacent_operands_are_rejected() {
    let tokens = lex_default("$a|x| $b|y|");
    let refs = significant(&tokens);
    assert_eq!(key(refs[0]), Some(MessageKey::InvalidTokenAfter));
    let message = refs[1].message.as_ref().unwrap();
    assert_eq!(message.key, MessageKey::InvalidTokenBefore);
    assert_eq!(message.param("beforeToken"), Some("Tag"));
}

#[test]
fn localized_type_names_flow_into_messages() {
    let names = tag_expression::TypeNames::english()
        .with_overrides([("TAG", "Capteur")])
        .unwrap();
    let config = LexerConfig::default().with_type_names(names);
    let tokens = lex("$a|x| 3", &config);
    let message = tokens.last().unwrap().message.as_ref().unwrap();
    assert_eq!(message.param("beforeToken"), Some("Capteur"));
}

#[test]
fn token_display_form() {
    let tokens = lex_default("$asset|tag");
    assert_eq!(
        tokens[0].to_string(),
        "TYPE<TAG> VALUE<$asset|tag> VALID<false> \
         MESSAGE<tag-expression-error-invalid_tag_name {tagOrAssetName=\"$asset|tag\"}>"
    );
}

#[test]
fn reconstruction_collapses_whitespace() {
    let tokens = lex_default("$a|x|  +\t\t1");
    assert_eq!(to_formula(&tokens), "$a|x| + 1");
}

#[test]
fn tokens_serialize_with_wire_names() {
    let tokens = lex_default("$asset|tag");
    let json = serde_json::to_value(&tokens[0]).unwrap();
    assert_eq!(json["kind"], "TAG");
    assert_eq!(json["valid"], false);
    assert_eq!(
        json["message"]["key"],
        "tag-expression-error-invalid_tag_name"
    );
}

#[test]
fn keywords_accept_any_whitespace() {
    let formula = ":IF(($a|x| > 1)\tAND\n($b|y| < 2), $a|x|, $b|y|)";
    let tokens = lex_default(formula);
    assert!(is_valid(&tokens), "{tokens:#?}");
    assert!(tokens
        .iter()
        .any(|t| t.kind == TokenType::ConditionalOperator && t.text == "AND"));

    let tokens = lex_default(":IF(($a|x| > 1)\u{2003}or\u{a0}($b|y| < 2), $a|x|, $b|y|)");
    assert!(is_valid(&tokens), "{tokens:#?}");
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn parser_types_are_send_and_sync() {
    assert_send_sync::<TagExpressionParser>();
    assert_send_sync::<LexerConfig>();
    assert_send_sync::<tag_expression::FunctionCatalog>();
    assert_send_sync::<Token>();
}

#[test]
fn shared_parser_lexes_the_same_on_every_thread() {
    let parser = TagExpressionParser::default();
    let formulas = [
        "$a|x| + 2 * ($b|y| - 1)",
        ":IF($a|x| > 1 AND $b|y| < 2, $a|x|, $b|y|)",
        ":MAVG($a|x|, 3) / :SUM($b|y|, 4, 5)",
        "$a|x| $b|y|",
        ":IF(:IF($a|x|>1,1,0)>0,1,0)",
    ];
    let expected: Vec<Vec<Token>> = formulas.iter().map(|f| parser.lex(f)).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    (0..16)
                        .flat_map(|_| formulas.iter().map(|f| parser.lex(f)))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            let results = handle.join().unwrap();
            for chunk in results.chunks(formulas.len()) {
                assert_eq!(chunk, expected.as_slice());
            }
        }
    });
}
