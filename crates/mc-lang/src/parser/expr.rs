use crate::ast::{Access, BinOp, Expr, TableLit, VarRef};
use crate::builtins::is_builtin;
use crate::error::SyntaxError;
use crate::lexer::{Token, TokenKind};

use super::Parser;

const KEYWORDS: [&str; 3] = ["and", "or", "not"];

impl<'t> Parser<'t> {
    // -----------------------------------------------------------------------
    // Precedence levels (loosest to tightest)
    // -----------------------------------------------------------------------

    /// `or_expr = and_expr { "or" and_expr }`
    pub(super) fn or_expr(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.and_expr()?;
        while self.eat_keyword("or") {
            let right = self.and_expr()?;
            left = Expr::binary(BinOp::Or, left, right);
        }
        Ok(left)
    }

    /// `and_expr = attribution { "and" attribution }`
    fn and_expr(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.attribution()?;
        while self.eat_keyword("and") {
            let right = self.attribution()?;
            left = Expr::binary(BinOp::And, left, right);
        }
        Ok(left)
    }

    /// `attribution = cmp_expr { ">>" ident { "," ident } }`
    fn attribution(&mut self) -> Result<Expr, SyntaxError> {
        let mut value = self.cmp_expr()?;
        while self.eat_punct(">>") {
            let mut vars = vec![self.var_name()?];
            while self.eat_punct(",") {
                vars.push(self.var_name()?);
            }
            value = Expr::Attribution {
                value: Box::new(value),
                vars,
            };
        }
        Ok(value)
    }

    fn var_name(&mut self) -> Result<String, SyntaxError> {
        match self.bump() {
            Some(tok) if tok.kind == TokenKind::Ident => Ok(tok.text.clone()),
            Some(tok) => Err(SyntaxError::new(
                format!("expected variable name after '>>', got {:?}", tok.text),
                Some(tok.text.clone()),
                tok.pos,
            )),
            None => Err(SyntaxError::end_of_input("variable name", self.eof)),
        }
    }

    /// `cmp_expr = concat_expr [ cmp_op concat_expr ]`, never chained.
    fn cmp_expr(&mut self) -> Result<Expr, SyntaxError> {
        let left = self.concat_expr()?;
        let op = match self.peek().map(|t| (t.kind, t.text.as_str())) {
            Some((TokenKind::Punct, "==")) => BinOp::Eq,
            Some((TokenKind::Punct, "!=")) => BinOp::Ne,
            Some((TokenKind::Punct, ">")) => BinOp::Gt,
            Some((TokenKind::Punct, "<")) => BinOp::Lt,
            Some((TokenKind::Punct, ">=")) => BinOp::Ge,
            Some((TokenKind::Punct, "<=")) => BinOp::Le,
            _ => return Ok(left),
        };
        self.pos += 1;
        let right = self.concat_expr()?;
        Ok(Expr::binary(op, left, right))
    }

    /// `concat_expr = add_expr { ".." add_expr }`
    fn concat_expr(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.add_expr()?;
        while self.eat_punct("..") {
            let right = self.add_expr()?;
            left = Expr::binary(BinOp::Concat, left, right);
        }
        Ok(left)
    }

    /// `add_expr = mul_expr { ("+" | "-") mul_expr }`
    fn add_expr(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.mul_expr()?;
        loop {
            let op = if self.eat_punct("+") {
                BinOp::Add
            } else if self.eat_punct("-") {
                BinOp::Sub
            } else {
                break;
            };
            let right = self.mul_expr()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    /// `mul_expr = unary { ("*" | "/" | "%" | "//") unary }`
    fn mul_expr(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.unary()?;
        loop {
            let op = match self.peek().map(|t| (t.kind, t.text.as_str())) {
                Some((TokenKind::Punct, "*")) => BinOp::Mul,
                Some((TokenKind::Punct, "/")) => BinOp::Div,
                Some((TokenKind::Punct, "%")) => BinOp::Mod,
                Some((TokenKind::Punct, "//")) => BinOp::FloorDiv,
                _ => break,
            };
            self.pos += 1;
            let right = self.unary()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    /// `unary = "not" unary | primary`
    fn unary(&mut self) -> Result<Expr, SyntaxError> {
        if self.eat_keyword("not") {
            let operand = self.unary()?;
            return Ok(Expr::not(operand));
        }
        self.primary()
    }

    // -----------------------------------------------------------------------
    // Primary expressions
    // -----------------------------------------------------------------------

    fn primary(&mut self) -> Result<Expr, SyntaxError> {
        let Some(tok) = self.bump() else {
            return Err(SyntaxError::end_of_input("an expression", self.eof));
        };

        let expr = match tok.kind {
            TokenKind::Number => match self.range_tail(tok)? {
                Some(range) => range,
                None => Expr::Number(number_value(tok)?),
            },
            TokenKind::Str => Expr::Str(tok.text.clone()),
            TokenKind::Ident => match tok.text.as_str() {
                "True" => Expr::Bool(true),
                "False" => Expr::Bool(false),
                kw if KEYWORDS.contains(&kw) => return Err(SyntaxError::unexpected(tok)),
                _ => return self.variable(tok),
            },
            TokenKind::GlobalFunc => {
                let args = self.call_args()?;
                Expr::Call {
                    target: None,
                    name: tok.text.clone(),
                    args,
                }
            }
            TokenKind::Punct if tok.text == "(" => {
                let inner = self.or_expr()?;
                self.expect_punct(")")?;
                inner
            }
            TokenKind::Punct if tok.text == "{" => self.table()?,
            TokenKind::Punct => return Err(SyntaxError::unexpected(tok)),
        };

        self.method_chain(expr)
    }

    /// `Number ".." Number` with no whitespace around the dots.
    fn range_tail(&mut self, start: &Token) -> Result<Option<Expr>, SyntaxError> {
        let (Some(dots), Some(end)) = (self.peek(), self.peek_nth(1)) else {
            return Ok(None);
        };
        let is_range = dots.is_punct("..")
            && dots.pos == start.end
            && end.kind == TokenKind::Number
            && end.pos == dots.end;
        if !is_range {
            return Ok(None);
        }
        self.pos += 2;
        Ok(Some(Expr::Range {
            start: number_value(start)?,
            end: number_value(end)?,
        }))
    }

    /// Variable reference with its access chain. A joined `.name` is a
    /// property unless `name` is a built-in, which turns the rest into a
    /// method chain on the reference built so far.
    fn variable(&mut self, first: &Token) -> Result<Expr, SyntaxError> {
        let mut var = VarRef::new(first.text.clone());
        loop {
            let Some(tok) = self.peek() else { break };
            if tok.is_punct("[") {
                self.pos += 1;
                let key = self.index_key()?;
                self.expect_punct("]")?;
                var.path.push(Access::Index(key));
            } else if tok.kind == TokenKind::GlobalFunc && self.adjacent() {
                if is_builtin(&tok.text) {
                    return self.method_chain(Expr::Var(var));
                }
                self.pos += 1;
                var.path.push(Access::Property(tok.text.clone()));
            } else {
                break;
            }
        }
        Ok(Expr::Var(var))
    }

    fn index_key(&mut self) -> Result<String, SyntaxError> {
        match self.bump() {
            Some(tok) if matches!(tok.kind, TokenKind::Str | TokenKind::Number) => {
                Ok(tok.text.clone())
            }
            Some(tok) => Err(SyntaxError::new(
                format!("expected string or number in brackets, got {:?}", tok.text),
                Some(tok.text.clone()),
                tok.pos,
            )),
            None => Err(SyntaxError::end_of_input("index key", self.eof)),
        }
    }

    /// Joined `.name args…` suffixes applied to an already parsed value.
    fn method_chain(&mut self, mut expr: Expr) -> Result<Expr, SyntaxError> {
        while let Some(tok) = self.peek()
            && tok.kind == TokenKind::GlobalFunc
            && self.adjacent()
        {
            self.pos += 1;
            let args = self.call_args()?;
            expr = Expr::Call {
                target: Some(Box::new(expr)),
                name: tok.text.clone(),
                args,
            };
        }
        Ok(expr)
    }

    /// Arguments are primaries taken greedily until a token that cannot
    /// start one.
    fn call_args(&mut self) -> Result<Vec<Expr>, SyntaxError> {
        let mut args = Vec::new();
        while self.starts_argument() {
            args.push(self.primary()?);
        }
        Ok(args)
    }

    fn starts_argument(&self) -> bool {
        let Some(tok) = self.peek() else {
            return false;
        };
        match tok.kind {
            TokenKind::Number | TokenKind::Str => true,
            TokenKind::Ident => !KEYWORDS.contains(&tok.text.as_str()),
            TokenKind::GlobalFunc => !self.adjacent(),
            TokenKind::Punct => tok.text == "(" || tok.text == "{",
        }
    }

    /// Table literal after `{`. Dictionary form once a `key = value` pair
    /// appears; commas between entries are optional.
    fn table(&mut self) -> Result<Expr, SyntaxError> {
        let mut items = Vec::new();
        let mut pairs = Vec::new();
        loop {
            let Some(tok) = self.peek() else {
                return Err(SyntaxError::end_of_input("'}'", self.eof));
            };
            if tok.is_punct("}") {
                self.pos += 1;
                break;
            }
            let is_pair = tok.kind == TokenKind::Ident
                && self.peek_nth(1).is_some_and(|t| t.is_punct("="));
            let mixed = if is_pair {
                !items.is_empty()
            } else {
                !pairs.is_empty()
            };
            if mixed {
                return Err(SyntaxError::new(
                    "table mixes array elements and key = value pairs",
                    Some(tok.text.clone()),
                    tok.pos,
                ));
            }
            if is_pair {
                self.pos += 2;
                pairs.push((tok.text.clone(), self.or_expr()?));
            } else {
                items.push(self.or_expr()?);
            }
            self.eat_punct(",");
        }

        let table = if pairs.is_empty() {
            TableLit::Array(items)
        } else {
            TableLit::Dict(pairs)
        };
        Ok(Expr::Table(table))
    }
}

fn number_value(tok: &Token) -> Result<f64, SyntaxError> {
    tok.text.parse::<f64>().map_err(|_| {
        SyntaxError::new(
            format!("invalid number {:?}", tok.text),
            Some(tok.text.clone()),
            tok.pos,
        )
    })
}
