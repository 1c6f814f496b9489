mod expr;

use crate::ast::Expr;
use crate::error::SyntaxError;
use crate::lexer::{LexMode, Token, tokenize_with};

#[cfg(test)]
mod tests;

// ---------------------------------------------------------------------------
// Public entry
// ---------------------------------------------------------------------------

/// Parse one condition expression (marker and comment already stripped).
///
/// An empty expression parses to `False`.
pub fn parse_expr(text: &str) -> Result<Expr, SyntaxError> {
    parse_expr_with(text, LexMode::Lenient)
}

pub fn parse_expr_with(text: &str, mode: LexMode) -> Result<Expr, SyntaxError> {
    let tokens = tokenize_with(text, mode)?;
    parse_tokens(&tokens)
}

/// Parse a token sequence. Every token must be consumed.
pub fn parse_tokens(tokens: &[Token]) -> Result<Expr, SyntaxError> {
    if tokens.is_empty() {
        return Ok(Expr::Bool(false));
    }
    let mut parser = Parser::new(tokens);
    let expr = parser.or_expr()?;
    if let Some(tok) = parser.peek() {
        return Err(SyntaxError::unexpected(tok));
    }
    Ok(expr)
}

// ---------------------------------------------------------------------------
// Token cursor
// ---------------------------------------------------------------------------

pub(crate) struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    eof: usize,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        let eof = tokens.last().map_or(0, |t| t.end);
        Self {
            tokens,
            pos: 0,
            eof,
        }
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn peek_nth(&self, n: usize) -> Option<&'t Token> {
        self.tokens.get(self.pos + n)
    }

    fn bump(&mut self) -> Option<&'t Token> {
        let tok = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(tok)
    }

    /// Whether the next token starts exactly where the previous one ended.
    fn adjacent(&self) -> bool {
        match (self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)), self.peek()) {
            (Some(prev), Some(next)) => prev.end == next.pos,
            _ => false,
        }
    }

    fn at_punct(&self, p: &str) -> bool {
        self.peek().is_some_and(|t| t.is_punct(p))
    }

    fn eat_punct(&mut self, p: &str) -> bool {
        if self.at_punct(p) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, kw: &str) -> bool {
        if self.peek().is_some_and(|t| t.is_keyword(kw)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, p: &str) -> Result<&'t Token, SyntaxError> {
        match self.peek() {
            Some(tok) if tok.is_punct(p) => {
                self.pos += 1;
                Ok(tok)
            }
            Some(tok) => Err(SyntaxError::new(
                format!("expected {p:?}, got {:?}", tok.text),
                Some(tok.text.clone()),
                tok.pos,
            )),
            None => Err(SyntaxError::end_of_input(&format!("{p:?}"), self.eof)),
        }
    }
}
