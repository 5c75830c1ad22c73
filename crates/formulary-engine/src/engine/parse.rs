//! Tokenizer and recursive-descent parser for arithmetic expressions.
//!
//! Grammar (standard precedence, left-associative binary operators):
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/') unary)*
//! unary  := ('+' | '-') unary | atom
//! atom   := number | identifier | '(' expr ')'
//! ```
//!
//! Identifiers are resolved to positions in the declared variable list while
//! parsing, so the resulting tree can only ever read declared bindings.

use thiserror::Error;

/// Nesting limit for parentheses and unary operators.
pub const MAX_DEPTH: usize = 256;

/// Height limit of the parsed tree. Every binary operator in a chain adds a
/// level, so this also bounds expressions such as `1 + 1 + ... + 1`.
pub const MAX_HEIGHT: usize = 1024;

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Num(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Parsed expression tree. `Var` holds the index of a declared variable.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    Var(usize),
    Neg(Box<Expr>),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

#[derive(Error, Clone, Debug, PartialEq)]
pub enum ParseError {
    #[error("unexpected character '{0}' at {1}")]
    UnexpectedChar(char, usize),

    #[error("invalid number literal: {0}")]
    InvalidNumber(String),

    #[error("unexpected token {0:?}")]
    UnexpectedToken(Token),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unknown identifier: {0}")]
    UnknownIdentifier(String),

    #[error("expression nested too deeply")]
    TooDeep,
}

/// Split an expression into tokens.
///
/// Number literals are decimal: digits with at most one dot (`12`, `1.5`,
/// `.5`, `5.`). Exponent notation is not recognised.
pub fn tokenize(s: &str) -> Result<Vec<Token>, ParseError> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let single = match c {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '*' => Some(Token::Star),
            '/' => Some(Token::Slash),
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            _ => None,
        };
        if let Some(tok) = single {
            out.push(tok);
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let literal: String = chars[start..i].iter().collect();
            if literal == "." || literal.matches('.').count() > 1 {
                return Err(ParseError::InvalidNumber(literal));
            }
            let value = literal
                .parse::<f64>()
                .map_err(|_| ParseError::InvalidNumber(literal.clone()))?;
            out.push(Token::Num(value));
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            out.push(Token::Ident(chars[start..i].iter().collect()));
            continue;
        }

        return Err(ParseError::UnexpectedChar(c, i));
    }

    Ok(out)
}

/// Parse an expression, resolving identifiers against `declared`.
pub fn parse<S: AsRef<str>>(s: &str, declared: &[S]) -> Result<Expr, ParseError> {
    let tokens = tokenize(s)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        declared: declared.iter().map(|d| d.as_ref()).collect(),
    };
    let node = parser.parse_add_sub()?;
    match parser.peek() {
        None => Ok(node.expr),
        Some(tok) => Err(ParseError::UnexpectedToken(tok.clone())),
    }
}

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    declared: Vec<&'a str>,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::TooDeep);
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_add_sub(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_mul_div()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_mul_div()?;
            left = Node::binary(op, left, right)?;
        }
        Ok(left)
    }

    fn parse_mul_div(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_unary()?;
            left = Node::binary(op, left, right)?;
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Node, ParseError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                self.enter()?;
                let inner = self.parse_unary()?;
                self.leave();
                Node::neg(inner)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.enter()?;
                let inner = self.parse_unary()?;
                self.leave();
                Ok(inner)
            }
            _ => self.parse_atom(),
        }
    }

    fn parse_atom(&mut self) -> Result<Node, ParseError> {
        match self.next() {
            Some(Token::Num(n)) => Ok(Node::leaf(Expr::Number(n))),
            Some(Token::Ident(name)) => self
                .declared
                .iter()
                .position(|d| *d == name)
                .map(|idx| Node::leaf(Expr::Var(idx)))
                .ok_or(ParseError::UnknownIdentifier(name)),
            Some(Token::LParen) => {
                self.enter()?;
                let inner = self.parse_add_sub()?;
                self.leave();
                match self.next() {
                    Some(Token::RParen) => Ok(inner),
                    Some(tok) => Err(ParseError::UnexpectedToken(tok)),
                    None => Err(ParseError::UnexpectedEnd),
                }
            }
            Some(tok) => Err(ParseError::UnexpectedToken(tok)),
            None => Err(ParseError::UnexpectedEnd),
        }
    }
}

/// A parsed subtree and its height.
struct Node {
    expr: Expr,
    height: usize,
}

impl Node {
    fn leaf(expr: Expr) -> Self {
        Node { expr, height: 1 }
    }

    fn grow(expr: Expr, height: usize) -> Result<Self, ParseError> {
        if height > MAX_HEIGHT {
            return Err(ParseError::TooDeep);
        }
        Ok(Node { expr, height })
    }

    fn neg(inner: Node) -> Result<Self, ParseError> {
        Node::grow(Expr::Neg(Box::new(inner.expr)), inner.height + 1)
    }

    fn binary(op: BinOp, left: Node, right: Node) -> Result<Self, ParseError> {
        let height = left.height.max(right.height) + 1;
        Node::grow(
            Expr::Binary {
                op,
                left: Box::new(left.expr),
                right: Box::new(right.expr),
            },
            height,
        )
    }
}
