//! Recursive-descent parser producing an [`Expr`] tree.
//!
//! Precedence, lowest first: `or`, `and`, `not`, comparisons, `+ -`,
//! `* / %`, unary `-`, `^` (right-associative). Unary minus binds looser
//! than `^`, so `-2 ^ 2` is `-4`.
//!
//! Formulas are limited to [`MAX_TOKENS`] tokens and [`MAX_DEPTH`] levels of
//! nesting, which bounds the recursion of both parsing and evaluation.

use super::FormulaError;
use super::lexer::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    And,
    Or,
}

/// Formula syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(i32),
    Str(String),
    Var(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
}

/// Longest accepted formula, in tokens.
pub const MAX_TOKENS: usize = 1024;

/// Deepest accepted nesting of parentheses, calls and prefix operators.
pub const MAX_DEPTH: usize = 128;

struct Parser<'a> {
    tokens: &'a [Token],
    index: usize,
    depth: usize,
    /// Offset reported for errors at end of input.
    end: usize,
}

pub(crate) fn parse(tokens: &[Token], source_len: usize) -> Result<Expr, FormulaError> {
    if let Some(token) = tokens.get(MAX_TOKENS) {
        return Err(FormulaError::Syntax {
            pos: token.pos,
            message: format!("formula longer than {} tokens", MAX_TOKENS),
        });
    }
    let mut parser = Parser {
        tokens,
        index: 0,
        depth: 0,
        end: source_len,
    };
    let expr = parser.or_expr()?;
    if let Some(token) = parser.peek() {
        return Err(FormulaError::Syntax {
            pos: token.pos,
            message: format!("unexpected trailing token {:?}", token.kind),
        });
    }
    Ok(expr)
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        matches!(self.peek_kind(), Some(TokenKind::Ident(name)) if name == keyword)
    }

    fn error_here(&self, message: &str) -> FormulaError {
        FormulaError::Syntax {
            pos: self.peek().map(|t| t.pos).unwrap_or(self.end),
            message: message.to_string(),
        }
    }

    /// Run a nested production, failing past [`MAX_DEPTH`].
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, FormulaError>) -> Result<T, FormulaError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error_here("formula nested too deeply"));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<(), FormulaError> {
        if self.peek_kind() == Some(&kind) {
            self.index += 1;
            Ok(())
        } else {
            Err(self.error_here(&format!("expected {}", what)))
        }
    }

    fn or_expr(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.and_expr()?;
        while self.peek_keyword("or") {
            self.index += 1;
            let rhs = self.and_expr()?;
            lhs = binary(BinaryOp::Or, lhs, rhs);
        }
        Ok(lhs)
    }

    fn and_expr(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.not_expr()?;
        while self.peek_keyword("and") {
            self.index += 1;
            let rhs = self.not_expr()?;
            lhs = binary(BinaryOp::And, lhs, rhs);
        }
        Ok(lhs)
    }

    fn not_expr(&mut self) -> Result<Expr, FormulaError> {
        if self.peek_keyword("not") {
            self.index += 1;
            let operand = self.nested(Self::not_expr)?;
            return Ok(Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            });
        }
        self.comparison()
    }

    fn comparison(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.additive()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Eq) => BinaryOp::Eq,
                Some(TokenKind::NotEq) => BinaryOp::NotEq,
                Some(TokenKind::Less) => BinaryOp::Less,
                Some(TokenKind::LessEq) => BinaryOp::LessEq,
                Some(TokenKind::Greater) => BinaryOp::Greater,
                Some(TokenKind::GreaterEq) => BinaryOp::GreaterEq,
                _ => return Ok(lhs),
            };
            self.index += 1;
            let rhs = self.additive()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn additive(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.multiplicative()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.index += 1;
            let rhs = self.multiplicative()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn multiplicative(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => BinaryOp::Mul,
                Some(TokenKind::Slash) => BinaryOp::Div,
                Some(TokenKind::Percent) => BinaryOp::Mod,
                _ => return Ok(lhs),
            };
            self.index += 1;
            let rhs = self.unary()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn unary(&mut self) -> Result<Expr, FormulaError> {
        if self.peek_kind() == Some(&TokenKind::Minus) {
            self.index += 1;
            let operand = self.nested(Self::unary)?;
            return Ok(Expr::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(operand),
            });
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr, FormulaError> {
        let base = self.primary()?;
        if self.peek_kind() == Some(&TokenKind::Caret) {
            self.index += 1;
            let exponent = self.nested(Self::unary)?;
            return Ok(binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, FormulaError> {
        let tokens = self.tokens;
        let Some(token) = tokens.get(self.index) else {
            return Err(self.error_here("unexpected end of formula"));
        };
        self.index += 1;
        let pos = token.pos;

        match token.kind.clone() {
            TokenKind::Int(n) => Ok(Expr::Int(n)),
            TokenKind::Str(s) => Ok(Expr::Str(s)),
            TokenKind::Ident(name) => {
                if self.peek_kind() == Some(&TokenKind::LParen) {
                    self.index += 1;
                    let args = self.arguments()?;
                    Ok(Expr::Call { name, args })
                } else {
                    Ok(Expr::Var(name))
                }
            }
            TokenKind::LParen => {
                let inner = self.nested(Self::or_expr)?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            other => Err(FormulaError::Syntax {
                pos,
                message: format!("unexpected token {:?}", other),
            }),
        }
    }

    /// Comma-separated arguments; the opening parenthesis is already consumed.
    fn arguments(&mut self) -> Result<Vec<Expr>, FormulaError> {
        let mut args = Vec::new();
        if self.peek_kind() == Some(&TokenKind::RParen) {
            self.index += 1;
            return Ok(args);
        }
        loop {
            args.push(self.nested(Self::or_expr)?);
            match self.peek_kind() {
                Some(TokenKind::Comma) => self.index += 1,
                Some(TokenKind::RParen) => {
                    self.index += 1;
                    return Ok(args);
                }
                _ => return Err(self.error_here("expected ',' or ')'")),
            }
        }
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}
