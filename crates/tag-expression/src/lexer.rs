//! Tag expression lexer.
//!
//! [`lex`] turns a formula such as `:IF($pump|flow| > 10, $pump|flow|, $tank|level|)` into a
//! token sequence and then runs every validation pass over it. It never fails: problems are
//! reported per token through [`Token::valid`] and [`Token::message`].

use crate::config::LexerConfig;
use crate::message::{Message, MessageKey};
use crate::rewrite;
use crate::sanitize;
use crate::token::{conditional_ops, is_valid, SpecialChar, Token, TokenType};
use crate::validate;

/// Characters that may never appear inside a tag reference.
const FORBIDDEN_TAG_CHARS: &[char] = &['<', '>', '!', ',', '?', '&', '\\'];

/// Tokenizes and validates `formula`.
pub fn lex(formula: &str, config: &LexerConfig) -> Vec<Token> {
    let mut lexer = Lexer::new(formula, config);
    lexer.scan();
    lexer.finish()
}

/// A lexer bound to one configuration. Cheap to clone and safe to share between threads.
#[derive(Debug, Clone, Default)]
pub struct TagExpressionParser {
    config: LexerConfig,
}

impl TagExpressionParser {
    pub fn new(config: LexerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    pub fn lex(&self, formula: &str) -> Vec<Token> {
        lex(formula, &self.config)
    }

    /// See [`sanitize::lex_with_known_tags`].
    pub fn lex_with_known_tags<S: AsRef<str>>(&self, formula: &str, known_tags: &[S]) -> Vec<Token> {
        sanitize::lex_with_known_tags(formula, known_tags, &self.config)
    }

    /// See [`sanitize::parse_src_key_formula`].
    pub fn src_key_formula<S: AsRef<str>>(&self, formula: &str, known_tags: &[S]) -> String {
        sanitize::parse_src_key_formula(formula, known_tags, &self.config)
    }
}

struct Lexer<'a> {
    chars: Vec<char>,
    idx: usize,
    config: &'a LexerConfig,
    tokens: Vec<Token>,
    /// Set as soon as a tag or embedded expression is scanned, valid or not.
    saw_reference: bool,
}

impl<'a> Lexer<'a> {
    fn new(src: &str, config: &'a LexerConfig) -> Self {
        Self {
            chars: src.chars().collect(),
            idx: 0,
            config,
            tokens: Vec::new(),
            saw_reference: false,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.chars.get(self.idx).copied()
    }

    fn peek_next_char(&self) -> Option<char> {
        self.chars.get(self.idx + 1).copied()
    }

    fn text(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    fn push_single(&mut self, kind: TokenType, text: &str) {
        self.idx += 1;
        self.push(Token::new(kind, text));
    }

    fn push_invalid_char(&mut self, ch: char) {
        self.idx += 1;
        self.push(Token::invalid(
            TokenType::Invalid,
            ch.to_string(),
            Message::new(MessageKey::InvalidCharacter).with("character", ch),
        ));
    }

    fn scan(&mut self) {
        while let Some(ch) = self.peek_char() {
            match ch {
                '(' => self.push_single(TokenType::LParen, "("),
                ')' => self.push_single(TokenType::RParen, ")"),
                ',' => self.push_single(TokenType::Comma, ","),
                '+' => self.push_single(TokenType::Operator, "+"),
                '*' => self.push_single(TokenType::Operator, "*"),
                '/' => self.push_single(TokenType::Operator, "/"),
                '^' => self.push_single(TokenType::Operator, "^"),
                '%' => self.push_single(TokenType::Operator, "%"),
                SpecialChar::ASSET => self.lex_tag(),
                SpecialChar::FUNCTION => self.lex_function(),
                SpecialChar::EXPRESSION => self.lex_expression(),
                '>' => self.lex_comparison(conditional_ops::GT, conditional_ops::GTEQ),
                '<' => self.lex_comparison(conditional_ops::LT, conditional_ops::LTEQ),
                '=' => self.lex_equality(conditional_ops::EQ),
                '!' => self.lex_equality(conditional_ops::NOTEQ),
                'A' | 'a' => self.lex_keyword(conditional_ops::AND),
                'O' | 'o' => self.lex_keyword(conditional_ops::OR),
                '-' if !self.minus_is_sign() => self.push_single(TokenType::Operator, "-"),
                _ => self.lex_default(ch),
            }
        }
    }

    /// A `-` directly after nothing, `(`, `,` or an operator is the sign of a number.
    fn minus_is_sign(&self) -> bool {
        match self.tokens.last() {
            None => true,
            Some(prev) => matches!(
                prev.kind,
                TokenType::LParen | TokenType::Comma | TokenType::Operator
            ),
        }
    }

    fn lex_default(&mut self, ch: char) {
        if ch.is_whitespace() {
            while self.peek_char().is_some_and(char::is_whitespace) {
                self.idx += 1;
            }
            self.push(Token::new(TokenType::Whitespace, " "));
            return;
        }

        match self.number_end() {
            Some(end) => {
                let text = self.text(self.idx, end);
                self.idx = end;
                self.push(Token::new(TokenType::Number, text));
            }
            None => self.push_invalid_char(ch),
        }
    }

    /// End of the numeric literal starting at the cursor: an optional `-`, then digits with
    /// at most one `.`, containing at least one digit.
    fn number_end(&self) -> Option<usize> {
        let mut end = self.idx;
        if self.chars.get(end) == Some(&'-') {
            end += 1;
        }
        let mut digits = 0usize;
        let mut seen_dot = false;
        while let Some(&c) = self.chars.get(end) {
            match c {
                '0'..='9' => digits += 1,
                '.' if !seen_dot => seen_dot = true,
                _ => break,
            }
            end += 1;
        }
        (digits > 0).then_some(end)
    }

    fn lex_comparison(&mut self, single: &str, with_eq: &str) {
        if self.peek_next_char() == Some('=') {
            self.idx += 2;
            self.push(Token::new(TokenType::ConditionalOperator, with_eq));
        } else {
            self.push_single(TokenType::ConditionalOperator, single);
        }
    }

    /// `==` and `!=`; a lone `=` or `!` is not part of the grammar.
    fn lex_equality(&mut self, op: &str) {
        if self.peek_next_char() == Some('=') {
            self.idx += 2;
            self.push(Token::new(TokenType::ConditionalOperator, op));
        } else {
            let ch = self.chars[self.idx];
            self.push_invalid_char(ch);
        }
    }

    /// `AND` / `OR`, which must have whitespace on both sides.
    fn lex_keyword(&mut self, keyword: &str) {
        let is_space = |c: Option<char>| c.is_some_and(char::is_whitespace);

        let len = keyword.chars().count();
        let preceded = self.idx > 0 && is_space(self.chars.get(self.idx - 1).copied());
        let spelled = keyword.chars().enumerate().all(|(offset, expected)| {
            self.chars
                .get(self.idx + offset)
                .is_some_and(|c| c.eq_ignore_ascii_case(&expected))
        });
        let followed = is_space(self.chars.get(self.idx + len).copied());

        if preceded && spelled && followed {
            self.idx += len;
            self.push(Token::new(TokenType::ConditionalOperator, keyword));
        } else {
            let ch = self.chars[self.idx];
            self.push_invalid_char(ch);
        }
    }

    /// `$asset|tag|`: scans through the asset/tag separator and then the tag terminator.
    fn lex_tag(&mut self) {
        self.saw_reference = true;
        let start = self.idx;
        let mut end = start;
        for _ in 0..2 {
            while let Some(&c) = self.chars.get(end) {
                end += 1;
                if c == SpecialChar::TAG {
                    break;
                }
            }
        }

        let text = self.text(start, end);
        self.idx = end;
        let token = match check_tag(&text) {
            None => Token::new(TokenType::Tag, text),
            Some(key) => {
                let message = Message::new(key).with("tagOrAssetName", &text);
                Token::invalid(TokenType::Tag, text, message)
            }
        };
        self.push(token);
    }

    /// `:NAME` up to (not including) the next `(`.
    fn lex_function(&mut self) {
        let start = self.idx;
        let end = (start..self.chars.len())
            .find(|&i| self.chars[i] == '(')
            .unwrap_or(self.chars.len());

        let label = self.text(start, end).trim_end().to_string();
        self.idx = start + label.chars().count();

        let name = label
            .strip_prefix(SpecialChar::FUNCTION)
            .unwrap_or(&label)
            .to_string();
        let token = if self.config.functions().contains(&name) {
            Token::new(TokenType::Function, label)
        } else {
            let message = Message::new(MessageKey::InvalidFunctionName).with("functionName", name);
            Token::invalid(TokenType::Function, label, message)
        };
        self.push(token);
    }

    /// `&name|`, resolved against the configured expression catalog.
    fn lex_expression(&mut self) {
        self.saw_reference = true;
        let start = self.idx;
        let mut end = start + 1;
        while let Some(&c) = self.chars.get(end) {
            end += 1;
            if c == SpecialChar::TAG {
                break;
            }
        }

        let label = self.text(start, end).trim_end().to_string();
        self.idx = start + label.chars().count();

        let name = label
            .strip_prefix(SpecialChar::EXPRESSION)
            .and_then(|rest| rest.strip_suffix(SpecialChar::TAG));
        let token = match name {
            Some(name) if self.config.expressions().contains(name) => {
                Token::new(TokenType::Expression, label)
            }
            _ => {
                let message = Message::new(MessageKey::InvalidEmbeddedExpression)
                    .with("expressionName", &label);
                Token::invalid(TokenType::Expression, label, message)
            }
        };
        self.push(token);
    }

    fn finish(self) -> Vec<Token> {
        let Lexer {
            mut tokens,
            config,
            saw_reference,
            ..
        } = self;

        validate::apply_rules(&mut tokens, config);

        let mut complete = saw_reference;
        if is_valid(&tokens) && rewrite::contains_conditional_call(&tokens, config.functions()) {
            match rewrite::apply_conditional_delimiters(&tokens, config.functions()) {
                Ok(rewritten) => tokens = rewritten,
                Err(err) => {
                    log::debug!("discarding conditional delimiter rewrite: {err}");
                    complete = false;
                }
            }
        }

        if !complete {
            if let Some(last) = tokens.iter_mut().rev().find(|t| !t.is_whitespace()) {
                last.force_invalid(Message::new(MessageKey::IncompleteExpression));
            }
        }

        log::trace!("lexed {} tokens", tokens.len());
        tokens
    }
}

/// Grammar checks for a scanned tag reference, in precedence order.
fn check_tag(tag: &str) -> Option<MessageKey> {
    let Some(separator) = tag.find(SpecialChar::TAG) else {
        return Some(MessageKey::InvalidAssetName);
    };
    if !tag.ends_with(SpecialChar::TAG) {
        return Some(MessageKey::InvalidTagName);
    }
    if tag.matches(SpecialChar::ASSET).count() > 1 {
        return Some(MessageKey::InvalidAssetName);
    }
    if tag.matches(SpecialChar::TAG).count() != 2 {
        return Some(MessageKey::InvalidTagName);
    }

    let asset_start = SpecialChar::ASSET.len_utf8();
    if tag[asset_start..separator].is_empty() {
        return Some(MessageKey::InvalidExpression);
    }
    let name_start = separator + SpecialChar::TAG.len_utf8();
    let name_end = tag.len() - SpecialChar::TAG.len_utf8();
    if tag[name_start..name_end].is_empty() {
        return Some(MessageKey::InvalidExpression);
    }
    if tag.contains(FORBIDDEN_TAG_CHARS) {
        return Some(MessageKey::InvalidTagName);
    }
    None
}
