//! Recursive-descent parser producing an [`Expr`] tree.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('-' | '+') unary | power
//! power   := primary ('^' unary)?
//! primary := NUMBER | CONSTANT | 'x' | FUNC '(' expr ')' | '(' expr ')'
//! ```
//!
//! `^` is right-associative and binds tighter than unary minus, so
//! `-2^2 = -4` and `2^3^2 = 512`.
//!
//! Input is bounded in length and nesting so parsing, evaluation and
//! dropping the tree all stay within a small, fixed recursion depth.

use serde::{Deserialize, Serialize};

use super::lexer::{tokenize, Token, TokenKind};
use crate::errors::{CalcError, CalcResult};

/// Longest accepted expression, in tokens
pub const MAX_TOKENS: usize = 512;
/// Deepest accepted nesting of parentheses, calls, signs and exponents
pub const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Function {
    Sin,
    Cos,
    Tan,
    /// Base 10
    Log,
    Ln,
    Sqrt,
    Abs,
}

impl Function {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Function::Sin),
            "cos" => Some(Function::Cos),
            "tan" => Some(Function::Tan),
            "log" => Some(Function::Log),
            "ln" => Some(Function::Ln),
            "sqrt" => Some(Function::Sqrt),
            "abs" => Some(Function::Abs),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Log => "log",
            Function::Ln => "ln",
            Function::Sqrt => "sqrt",
            Function::Abs => "abs",
        }
    }

    pub fn is_trigonometric(&self) -> bool {
        matches!(self, Function::Sin | Function::Cos | Function::Tan)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    /// The free variable `x`
    Variable,
    Neg(Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Call(Function, Box<Expr>),
}

impl Expr {
    /// True if the tree references `x`.
    pub fn uses_variable(&self) -> bool {
        match self {
            Expr::Number(_) => false,
            Expr::Variable => true,
            Expr::Neg(inner) | Expr::Call(_, inner) => inner.uses_variable(),
            Expr::Binary(_, lhs, rhs) => lhs.uses_variable() || rhs.uses_variable(),
        }
    }
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn position(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map_or(self.source.len(), |t| t.position)
    }

    fn error(&self, reason: impl Into<String>) -> CalcError {
        CalcError::parse(self.source, self.position(), reason)
    }

    fn advance(&mut self) -> Option<TokenKind> {
        let kind = self.tokens.get(self.pos).map(|t| t.kind.clone());
        self.pos += 1;
        kind
    }

    fn expect(&mut self, expected: TokenKind, what: &str) -> CalcResult<()> {
        if self.peek() == Some(&expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(format!("expected {}", what)))
        }
    }

    /// Run `f` one nesting level deeper.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> CalcResult<T>) -> CalcResult<T> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("expression nested too deeply"));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn expr(&mut self) -> CalcResult<Expr> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn term(&mut self) -> CalcResult<Expr> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Star) => BinaryOp::Mul,
                Some(TokenKind::Slash) => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn unary(&mut self) -> CalcResult<Expr> {
        match self.peek() {
            Some(TokenKind::Minus) => {
                self.pos += 1;
                let operand = self.nested(Self::unary)?;
                Ok(Expr::Neg(Box::new(operand)))
            }
            Some(TokenKind::Plus) => {
                self.pos += 1;
                self.nested(Self::unary)
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> CalcResult<Expr> {
        let base = self.primary()?;
        if self.peek() == Some(&TokenKind::Caret) {
            self.pos += 1;
            let exponent = self.nested(Self::unary)?;
            return Ok(Expr::Binary(BinaryOp::Pow, Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> CalcResult<Expr> {
        let start = self.position();
        match self.advance() {
            Some(TokenKind::Number(value)) => Ok(Expr::Number(value)),
            Some(TokenKind::LParen) => {
                let inner = self.nested(Self::expr)?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            Some(TokenKind::Ident(name)) => match name.as_str() {
                "x" => Ok(Expr::Variable),
                "pi" => Ok(Expr::Number(std::f64::consts::PI)),
                "e" => Ok(Expr::Number(std::f64::consts::E)),
                _ => {
                    let function = Function::from_name(&name).ok_or_else(|| {
                        CalcError::parse(self.source, start, format!("unknown identifier '{}'", name))
                    })?;
                    self.expect(TokenKind::LParen, &format!("'(' after {}", name))?;
                    let argument = self.nested(Self::expr)?;
                    self.expect(TokenKind::RParen, "')'")?;
                    Ok(Expr::Call(function, Box::new(argument)))
                }
            },
            Some(_) => Err(CalcError::parse(self.source, start, "expected a number, name or '('")),
            None => Err(CalcError::parse(self.source, start, "unexpected end of expression")),
        }
    }
}

/// Parse a complete expression; trailing tokens are an error.
pub fn parse(source: &str) -> CalcResult<Expr> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(CalcError::missing_field("expression"));
    }
    if let Some(extra) = tokens.get(MAX_TOKENS) {
        return Err(CalcError::parse(
            source,
            extra.position,
            format!("expression longer than {} tokens", MAX_TOKENS),
        ));
    }
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.expr()?;
    if parser.pos < parser.tokens.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(v: f64) -> Box<Expr> {
        Box::new(Expr::Number(v))
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            parse("1 + 2 * 3").unwrap(),
            Expr::Binary(
                BinaryOp::Add,
                num(1.0),
                Box::new(Expr::Binary(BinaryOp::Mul, num(2.0), num(3.0)))
            )
        );
    }

    #[test]
    fn test_power_binds_tighter_than_negation() {
        assert_eq!(
            parse("-2^2").unwrap(),
            Expr::Neg(Box::new(Expr::Binary(BinaryOp::Pow, num(2.0), num(2.0))))
        );
    }

    #[test]
    fn test_function_call_and_variable() {
        let expr = parse("sqrt(x)").unwrap();
        assert_eq!(expr, Expr::Call(Function::Sqrt, Box::new(Expr::Variable)));
        assert!(expr.uses_variable());
        assert!(!parse("sin(pi)").unwrap().uses_variable());
    }

    #[test]
    fn test_errors_carry_position() {
        match parse("2 * (3 + 4").unwrap_err() {
            CalcError::ParseError { position, .. } => assert_eq!(position, 10),
            other => panic!("unexpected error {:?}", other),
        }
        match parse("foo(2)").unwrap_err() {
            CalcError::ParseError { position, reason, .. } => {
                assert_eq!(position, 0);
                assert!(reason.contains("foo"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(parse("1 +").is_err());
        assert!(parse("2 3").is_err());
        assert!(parse("sin 2").is_err());
        assert!(parse(")").is_err());
        assert_eq!(parse("   ").unwrap_err().error_code(), "MISSING_FIELD");
    }

    fn reason(err: CalcError) -> String {
        match err {
            CalcError::ParseError { reason, .. } => reason,
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_deep_nesting_rejected() {
        let nested = |levels: usize| format!("{}1{}", "(".repeat(levels), ")".repeat(levels));
        assert!(parse(&nested(MAX_DEPTH - 1)).is_ok());
        assert!(reason(parse(&nested(MAX_DEPTH + 1)).unwrap_err()).contains("nested too deeply"));

        let calls = format!("{}1{}", "abs(".repeat(100), ")".repeat(100));
        assert!(reason(parse(&calls).unwrap_err()).contains("nested too deeply"));

        let signs = format!("{}1", "-".repeat(100));
        assert!(reason(parse(&signs).unwrap_err()).contains("nested too deeply"));

        let tower = vec!["2"; 100].join("^");
        assert!(reason(parse(&tower).unwrap_err()).contains("nested too deeply"));
    }

    #[test]
    fn test_huge_input_is_an_error_not_a_crash() {
        let parens = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(parse(&parens).unwrap_err().error_code(), "PARSE_ERROR");

        let chain = vec!["1"; 10_000].join("+");
        assert!(reason(parse(&chain).unwrap_err()).contains("longer than"));
        assert!(parse(&vec!["1"; 200].join("+")).is_ok());
    }
}
