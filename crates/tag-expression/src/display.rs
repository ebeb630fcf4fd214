//! Rendering helpers for token sequences and raw formula text.

use crate::error::ProbeError;
use crate::token::{SpecialChar, Token, TokenType};

/// Concatenates the token texts. For a valid sequence this is the source formula with
/// whitespace runs collapsed and conditional delimiters inserted.
pub fn to_formula(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

/// Renders `tokens` as a plain arithmetic string in which every tag reads `1`, so a host can
/// probe whether the formula is well-formed arithmetic.
pub fn probe_expression(tokens: &[Token]) -> Result<String, ProbeError> {
    let mut out = String::new();
    for token in tokens {
        match token.kind {
            TokenType::Number | TokenType::Operator | TokenType::LParen | TokenType::RParen => {
                out.push_str(&token.text)
            }
            TokenType::Tag => out.push('1'),
            TokenType::Whitespace => out.push(' '),
            kind => {
                return Err(ProbeError::UnsupportedToken {
                    kind,
                    text: token.text.clone(),
                })
            }
        }
    }
    Ok(out)
}

/// Name of the asset whose reference contains the character at `char_pos`: the text between
/// the nearest `$` before the position and the following `|` (or the position itself when
/// the asset name is still being typed).
pub fn asset_name_at(formula: &str, char_pos: usize) -> Option<String> {
    let chars: Vec<char> = formula.chars().collect();
    let pos = char_pos.min(chars.len());
    let marker = chars[..pos].iter().rposition(|&c| c == SpecialChar::ASSET)?;
    let start = marker + 1;
    let end = chars[start..]
        .iter()
        .position(|&c| c == SpecialChar::TAG)
        .map_or(pos, |offset| start + offset);
    Some(chars[start..end].iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_replaces_tags_with_one() {
        let tokens = vec![
            Token::new(TokenType::LParen, "("),
            Token::new(TokenType::Tag, "$a|x|"),
            Token::new(TokenType::Whitespace, " "),
            Token::new(TokenType::Operator, "*"),
            Token::new(TokenType::Number, "2.5"),
            Token::new(TokenType::RParen, ")"),
        ];
        assert_eq!(probe_expression(&tokens).as_deref(), Ok("(1 *2.5)"));
    }

    #[test]
    fn probe_rejects_functions() {
        let tokens = vec![Token::new(TokenType::Function, ":ABS")];
        assert_eq!(
            probe_expression(&tokens),
            Err(ProbeError::UnsupportedToken {
                kind: TokenType::Function,
                text: ":ABS".to_string(),
            })
        );
    }

    #[test]
    fn asset_name_under_cursor() {
        let formula = "1 + $pump|flow| * $tank|lev";
        assert_eq!(asset_name_at(formula, 7).as_deref(), Some("pump"));
        assert_eq!(asset_name_at(formula, 12).as_deref(), Some("pump"));
        assert_eq!(asset_name_at(formula, formula.len()).as_deref(), Some("tank"));
        assert_eq!(asset_name_at("$pu", 3).as_deref(), Some("pu"));
        assert_eq!(asset_name_at(formula, 2), None);
    }
}
