use winnow::ascii::digit1;
use winnow::combinator::{alt, cut_err, opt, preceded};
use winnow::error::{ContextError, ErrMode, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

use crate::error::SyntaxError;


// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Str,
    Ident,
    Punct,
    /// `.name` not joined to a preceding `.`
    GlobalFunc,
}

/// A lexical token with its byte span in the condition text.
///
/// `text` is the string body (without quotes) for `Str` and the bare name
/// (without the leading dot) for `GlobalFunc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub pos: usize,
    pub end: usize,
}

impl Token {
    pub fn is_punct(&self, p: &str) -> bool {
        self.kind == TokenKind::Punct && self.text == p
    }

    pub fn is_keyword(&self, kw: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == kw
    }
}

/// How the lexer treats characters that start no token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LexMode {
    /// Skip them.
    #[default]
    Lenient,
    /// Reject them with a [`SyntaxError`].
    Strict,
}

const SINGLE_PUNCT: [char; 16] = [
    '+', '-', '*', '/', '%', '(', ')', ',', '[', ']', '{', '}', '.', '<', '>', '=',
];

// ---------------------------------------------------------------------------
// Public entry
// ---------------------------------------------------------------------------

pub fn tokenize(text: &str) -> Result<Vec<Token>, SyntaxError> {
    tokenize_with(text, LexMode::Lenient)
}

/// Scan `text` left to right into tokens. Whitespace only separates.
pub fn tokenize_with(text: &str, mode: LexMode) -> Result<Vec<Token>, SyntaxError> {
    let mut input = text;
    let mut tokens = Vec::new();

    loop {
        input = input.trim_start();
        let pos = text.len() - input.len();
        let Some(ch) = input.chars().next() else {
            break;
        };

        let saved = input;
        match next_token.parse_next(&mut input) {
            Ok((kind, body)) => tokens.push(Token {
                kind,
                text: body,
                pos,
                end: text.len() - input.len(),
            }),
            Err(ErrMode::Cut(_)) => {
                return Err(SyntaxError::new(
                    "unterminated string literal",
                    Some(saved.to_string()),
                    pos,
                ));
            }
            Err(_) => {
                if mode == LexMode::Strict {
                    return Err(SyntaxError::new(
                        format!("unexpected character {ch:?}"),
                        Some(ch.to_string()),
                        pos,
                    ));
                }
                tracing::debug!(
                    domain = "load",
                    position = pos,
                    character = %ch,
                    "skipping unrecognized character"
                );
                input = &saved[ch.len_utf8()..];
            }
        }
    }

    Ok(tokens)
}

// ---------------------------------------------------------------------------
// Token classes, tried in this order
// ---------------------------------------------------------------------------

fn next_token(input: &mut &str) -> ModalResult<(TokenKind, String)> {
    alt((
        two_char_op.map(|op: &str| (TokenKind::Punct, op.to_string())),
        string_body.map(|s: &str| (TokenKind::Str, s.to_string())),
        number.map(|n: &str| (TokenKind::Number, n.to_string())),
        global_func.map(|name: &str| (TokenKind::GlobalFunc, name.to_string())),
        ident.map(|id: &str| (TokenKind::Ident, id.to_string())),
        one_of(SINGLE_PUNCT).map(|c: char| (TokenKind::Punct, c.to_string())),
    ))
    .parse_next(input)
}

fn two_char_op<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    alt((">>", "==", "!=", ">=", "<=", "..", "//")).parse_next(input)
}

/// `"..."` without escapes; a missing closing quote is a hard error.
fn string_body<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    "\"".parse_next(input)?;
    let body = take_while(0.., |c: char| c != '"').parse_next(input)?;
    cut_err("\"")
        .context(StrContext::Expected(StrContextValue::Description(
            "closing quote",
        )))
        .parse_next(input)?;
    Ok(body)
}

/// Digits with at most one fractional part. The dot must be followed by a
/// digit, so `1..10` lexes as `1`, `..`, `10`.
fn number<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (digit1, opt((".", digit1))).take().parse_next(input)
}

fn global_func<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    preceded(".", ident).parse_next(input)
}

fn ident<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    if !input.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}
