//! Tokenizer for calculator expressions.

use crate::errors::{CalcError, CalcResult};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset into the source text
    pub position: usize,
}

/// Split `source` into tokens. Whitespace is skipped.
pub fn tokenize(source: &str) -> CalcResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(position, c)) = chars.peek() {
        let kind = match c {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '0'..='9' | '.' => {
                let mut end = position;
                let mut seen_dot = false;
                while let Some(&(i, d)) = chars.peek() {
                    if d.is_ascii_digit() || (d == '.' && !seen_dot) {
                        seen_dot |= d == '.';
                        end = i + d.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let text = &source[position..end];
                let value = text
                    .parse::<f64>()
                    .map_err(|_| CalcError::parse(source, position, format!("invalid number '{}'", text)))?;
                TokenKind::Number(value)
            }
            c if c.is_ascii_alphabetic() => {
                let mut end = position;
                while let Some(&(i, a)) = chars.peek() {
                    if a.is_ascii_alphanumeric() || a == '_' {
                        end = i + a.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                TokenKind::Ident(source[position..end].to_ascii_lowercase())
            }
            _ => {
                chars.next();
                match c {
                    '+' => TokenKind::Plus,
                    '-' => TokenKind::Minus,
                    '*' => TokenKind::Star,
                    '/' => TokenKind::Slash,
                    '^' => TokenKind::Caret,
                    '(' => TokenKind::LParen,
                    ')' => TokenKind::RParen,
                    other => {
                        return Err(CalcError::parse(
                            source,
                            position,
                            format!("unexpected character '{}'", other),
                        ))
                    }
                }
            }
        };
        tokens.push(Token { kind, position });
    }

    Ok(tokens)
}
