//! Formula tokenizer.

use super::FormulaError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Int(i32),
    Str(String),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    LParen,
    RParen,
    Comma,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    /// Byte offset in the source.
    pub pos: usize,
}

fn syntax(pos: usize, message: impl Into<String>) -> FormulaError {
    FormulaError::Syntax {
        pos,
        message: message.into(),
    }
}

pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>, FormulaError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        if ch.is_ascii_digit() {
            let mut end = pos;
            while let Some(&(i, c)) = chars.peek() {
                if !c.is_ascii_digit() {
                    break;
                }
                end = i + c.len_utf8();
                chars.next();
            }
            // Literals wrap like the arithmetic does.
            let value = source[pos..end]
                .bytes()
                .fold(0i32, |acc, b| acc.wrapping_mul(10).wrapping_add((b - b'0') as i32));
            tokens.push(Token {
                kind: TokenKind::Int(value),
                pos,
            });
            continue;
        }

        if ch.is_alphabetic() || ch == '_' {
            let mut end = pos;
            while let Some(&(i, c)) = chars.peek() {
                if !(c.is_alphanumeric() || c == '_') {
                    break;
                }
                end = i + c.len_utf8();
                chars.next();
            }
            tokens.push(Token {
                kind: TokenKind::Ident(source[pos..end].to_string()),
                pos,
            });
            continue;
        }

        if ch == '\'' {
            chars.next();
            let mut text = String::new();
            let mut closed = false;
            for (_, c) in chars.by_ref() {
                if c == '\'' {
                    closed = true;
                    break;
                }
                text.push(c);
            }
            if !closed {
                return Err(syntax(pos, "unterminated string literal"));
            }
            tokens.push(Token {
                kind: TokenKind::Str(text),
                pos,
            });
            continue;
        }

        chars.next();
        let next_is_eq = matches!(chars.peek(), Some(&(_, '=')));
        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            '=' => TokenKind::Eq,
            '!' if next_is_eq => {
                chars.next();
                TokenKind::NotEq
            }
            '<' if next_is_eq => {
                chars.next();
                TokenKind::LessEq
            }
            '<' => TokenKind::Less,
            '>' if next_is_eq => {
                chars.next();
                TokenKind::GreaterEq
            }
            '>' => TokenKind::Greater,
            other => return Err(syntax(pos, format!("unexpected character '{}'", other))),
        };
        tokens.push(Token { kind, pos });
    }

    Ok(tokens)
}
