//! Tag-name sanitization.
//!
//! Real tag names may contain characters the grammar reserves (`$a|flow<in>|` is a legitimate
//! tag called `flow<in>`). When the caller knows which tag names exist, every such name is
//! replaced by a lexer-safe alias before lexing and restored on the resulting tokens.

use std::collections::{HashMap, HashSet};
use std::ops::Range;
use std::str::CharIndices;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::LexerConfig;
use crate::display::to_formula;
use crate::lexer::lex;
use crate::message::{Message, MessageKey};
use crate::token::{SpecialChar, Token, TokenType};

/// Characters removed from a tag name when building its alias.
const SPECIAL_CHARS: &str = r##"#$.,+?|&-_=>^@()[]\/'%!*`{}~<":;"##;

/// Characters that may precede the next `$` or `&` reference.
const REFERENCE_SEPARATORS: &str = "/+-*^%><=(),";

fn asset_prefix() -> &'static Regex {
    static ASSET_PREFIX: OnceLock<Regex> = OnceLock::new();
    ASSET_PREFIX.get_or_init(|| {
        Regex::new(r"\$[^|\n\r\u{2028}\u{2029}]*\|")
            .unwrap_or_else(|err| panic!("invalid asset prefix pattern: {err}"))
    })
}

/// Result of [`sanitize_tag_names`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedFormula {
    pub original: String,
    /// The formula with every tag name replaced by its alias. Only meaningful when
    /// [`SanitizedFormula::all_tags_known`] is set.
    pub lex_safe: String,
    /// Alias -> original tag name.
    pub aliases: HashMap<String, String>,
    /// Set when at least one tag reference was found and every one of them is known.
    pub all_tags_known: bool,
    /// The first tag name that is not in the known set.
    pub unknown_tag: Option<String>,
}

impl SanitizedFormula {
    /// Diagnostic for the first unknown tag, if any.
    pub fn message(&self) -> Option<Message> {
        self.unknown_tag
            .as_ref()
            .map(|tag| Message::new(MessageKey::TagNotFound).with("tagName", tag))
    }
}

/// Replaces every known tag name in `formula` with an alias made of the name stripped of
/// grammar characters plus the character offset of its reference.
///
/// Tag references are located textually: a reference starts at `$`, its asset runs to the
/// first `|`, and its tag name runs to the last `|` before the next reference.
pub fn sanitize_tag_names<S: AsRef<str>>(formula: &str, known_tags: &[S]) -> SanitizedFormula {
    let mut sanitized = SanitizedFormula {
        original: formula.to_string(),
        lex_safe: String::new(),
        aliases: HashMap::new(),
        all_tags_known: false,
        unknown_tag: None,
    };

    let spans = find_tag_references(formula);
    if spans.is_empty() {
        return sanitized;
    }

    let known: HashSet<&str> = known_tags.iter().map(|tag| tag.as_ref()).collect();
    let mut out = String::with_capacity(formula.len());
    let mut copied = 0;
    let (mut counted, mut offset) = (0, 0);
    for span in spans {
        let reference = &formula[span.clone()];
        let (Some(first), Some(last)) = (
            reference.find(SpecialChar::TAG),
            reference.rfind(SpecialChar::TAG),
        ) else {
            continue;
        };
        let tag_name = &reference[first + 1..last];
        if !known.contains(tag_name) {
            sanitized.unknown_tag = Some(tag_name.to_string());
            return sanitized;
        }

        offset += formula[counted..span.start].chars().count();
        counted = span.start;
        let alias = format!("{}{offset}", strip_special_chars(tag_name));
        sanitized.aliases.insert(alias.clone(), tag_name.to_string());

        out.push_str(&formula[copied..span.start + first + 1]);
        out.push_str(&alias);
        copied = span.start + last;
    }
    out.push_str(&formula[copied..]);

    sanitized.lex_safe = out;
    sanitized.all_tags_known = true;
    sanitized
}

/// Lexes `formula`, tolerating reserved characters inside tag names that appear in
/// `known_tags`. Falls back to a plain [`lex`] when some tag is unknown.
pub fn lex_with_known_tags<S: AsRef<str>>(
    formula: &str,
    known_tags: &[S],
    config: &LexerConfig,
) -> Vec<Token> {
    let sanitized = sanitize_tag_names(formula, known_tags);
    if !sanitized.all_tags_known {
        if let Some(tag) = &sanitized.unknown_tag {
            log::warn!("tag {tag:?} is not known; lexing formula without sanitizing");
        }
        return lex(formula, config);
    }

    let mut tokens = lex(&sanitized.lex_safe, config);
    restore_tag_names(&mut tokens, &sanitized.aliases);
    tokens
}

/// Re-renders `formula` from its tokens, including any conditional delimiters. An empty
/// formula is returned unchanged.
pub fn parse_src_key_formula<S: AsRef<str>>(
    formula: &str,
    known_tags: &[S],
    config: &LexerConfig,
) -> String {
    if formula.is_empty() {
        return String::new();
    }
    to_formula(&lex_with_known_tags(formula, known_tags, config))
}

fn restore_tag_names(tokens: &mut [Token], aliases: &HashMap<String, String>) {
    for token in tokens.iter_mut().filter(|t| t.kind == TokenType::Tag) {
        let Some(parts) = token.tag_parts() else {
            continue;
        };
        let Some(original) = aliases.get(parts.tag_name()) else {
            continue;
        };
        let alias_text = token.text.clone();
        token.text = format!(
            "{}{tag}{original}{tag}",
            parts.asset,
            tag = SpecialChar::TAG
        );

        if let Some(message) = &mut token.message {
            if message.param("tagOrAssetName") == Some(alias_text.as_str()) {
                message.params.insert("tagOrAssetName".to_string(), token.text.clone());
            }
        }
    }
}

fn strip_special_chars(name: &str) -> String {
    name.chars().filter(|c| !SPECIAL_CHARS.contains(*c)).collect()
}

/// Byte ranges of every `$asset|tag|` reference in `formula`.
fn find_tag_references(formula: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut search_from = 0;
    let mut line: Option<Line> = None;
    while let Some(prefix) = asset_prefix().find_at(formula, search_from) {
        let tag_start = prefix.end();
        let current = match line {
            Some(known) if known.covers(tag_start) => known,
            _ => Line::at(formula, tag_start),
        };
        line = Some(current);

        let limit = tag_scan_limit(formula, tag_start, current);
        match formula[tag_start..limit].rfind(SpecialChar::TAG) {
            Some(rel) => {
                let end = tag_start + rel + SpecialChar::TAG.len_utf8();
                spans.push(prefix.start()..end);
                search_from = end;
            }
            None => search_from = prefix.start() + SpecialChar::ASSET.len_utf8(),
        }
    }
    spans
}

/// The rest of a line: from some offset up to the next line break.
#[derive(Debug, Clone, Copy)]
struct Line {
    start: usize,
    end: usize,
    last_pipe: Option<usize>,
}

impl Line {
    fn at(formula: &str, start: usize) -> Self {
        let end = formula[start..]
            .find(is_line_break)
            .map_or(formula.len(), |i| start + i);
        let last_pipe = formula[start..end]
            .rfind(SpecialChar::TAG)
            .map(|i| start + i);
        Self { start, end, last_pipe }
    }

    fn covers(&self, offset: usize) -> bool {
        (self.start..=self.end).contains(&offset)
    }
}

/// First byte offset at or after `from` where a tag name can no longer extend: a line break,
/// or the start of the next reference (a separator, `$` or `&`, a word character and a `|`
/// later on the same line).
fn tag_scan_limit(formula: &str, from: usize, line: Line) -> usize {
    let Some(last_pipe) = line.last_pipe.filter(|&pipe| pipe >= from) else {
        return line.end;
    };

    let mut chars = formula[from..line.end].char_indices();
    while let Some((pos, sep)) = chars.next() {
        if starts_reference(sep, chars.clone(), last_pipe - from) {
            return from + pos;
        }
    }
    line.end
}

/// `ahead` yields the characters after `sep`; `last_pipe` is the offset of the last `|` on
/// the line, relative to the same start as `ahead`.
fn starts_reference(sep: char, mut ahead: CharIndices<'_>, last_pipe: usize) -> bool {
    let (Some((_, marker)), Some((_, word)), Some(_), Some((pipe_from, _))) =
        (ahead.next(), ahead.next(), ahead.next(), ahead.next())
    else {
        return false;
    };
    let is_separator = sep.is_whitespace() || REFERENCE_SEPARATORS.contains(sep);
    let is_marker = marker == SpecialChar::ASSET || marker == SpecialChar::EXPRESSION;
    let is_word = word.is_ascii_alphanumeric() || word == '_';
    is_separator && is_marker && is_word && pipe_from <= last_pipe
}

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
