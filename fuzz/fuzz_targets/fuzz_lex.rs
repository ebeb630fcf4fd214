#![no_main]

use libfuzzer_sys::fuzz_target;

use tag_expression::display::to_formula;
use tag_expression::rewrite::apply_conditional_delimiters;
use tag_expression::{is_valid, lex, LexerConfig, Token, TokenType};

/// Host editors cap formulas well below this; the harness only needs to stay bounded.
const MAX_FUZZ_FORMULA_CHARS: usize = 4_096;
const MAX_INPUT_BYTES: usize = MAX_FUZZ_FORMULA_CHARS * 4; // max UTF-8 bytes per char

fn truncate_to_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Tag names referenced in `formula`, offered to the sanitizer as the known set.
fn known_tags(tokens: &[Token]) -> Vec<String> {
    tokens
        .iter()
        .filter_map(Token::tag_parts)
        .map(|parts| parts.tag_name().to_string())
        .collect()
}

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let data = if data.len() > MAX_INPUT_BYTES {
        &data[..MAX_INPUT_BYTES]
    } else {
        data
    };

    let input = String::from_utf8_lossy(data);
    let formula = truncate_to_chars(&input, MAX_FUZZ_FORMULA_CHARS);

    let config = LexerConfig::default();
    let tokens = lex(formula, &config);

    // Every non-whitespace character lands in exactly one token.
    let rendered = to_formula(&tokens);
    let significant = |s: &str| s.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        tokens.iter().any(|t| t.kind == TokenType::ConditionalDelimiter)
            || significant(&rendered) == significant(formula),
        "lost characters: {formula:?} -> {rendered:?}"
    );

    if is_valid(&tokens) {
        let again = apply_conditional_delimiters(&tokens, config.functions())
            .expect("valid sequences rewrite cleanly");
        assert_eq!(again, tokens, "rewrite is not idempotent for {formula:?}");
    }

    let known = known_tags(&tokens);
    let _ = tag_expression::sanitize::parse_src_key_formula(formula, &known, &config);
});
