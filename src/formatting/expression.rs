//! Sandboxed boolean expressions over a single record.
//!
//! The evaluator only reads record fields; there is no function call
//! syntax and nesting depth is bounded.

use serde_json::{Map, Number, Value};
use thiserror::Error;

const MAX_DEPTH: usize = 64;

/// Binary operators allowed in one expression. Operator chains build
/// left-deep trees, so this bounds evaluation depth as well.
const MAX_OPERATORS: usize = 256;

/// Record-path prefixes that refer to the record itself.
const RECORD_ALIASES: &[&str] = &["record", "data", "row"];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    #[error("Unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("Unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },

    #[error("Unexpected token: {0}")]
    UnexpectedToken(String),

    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    #[error("Expression nested deeper than {} levels", MAX_DEPTH)]
    TooDeep,

    #[error("Expression has more than {} operators", MAX_OPERATORS)]
    TooLong,

    #[error("Operator '{op}' cannot be applied to {left} and {right}")]
    TypeMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("Division by zero")]
    DivisionByZero,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Str(String),
    Ident(String),
    Dot,
    LParen,
    RParen,
    Not,
    And,
    Or,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    And,
    Or,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    fn symbol(&self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Or => "||",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
        }
    }
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Path(Vec<String>),
    Not(Box<Expr>),
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    /// Parse an expression. A surrounding `${ ... }` is ignored.
    pub fn parse(source: &str) -> Result<Self, ExpressionError> {
        let trimmed = source.trim();
        let inner = trimmed
            .strip_prefix("${")
            .and_then(|rest| rest.strip_suffix('}'))
            .unwrap_or(trimmed);

        let tokens = tokenize(inner)?;
        let mut parser = Parser {
            tokens,
            pos: 0,
            depth: 0,
            operators: 0,
        };
        let expr = parser.parse_or()?;
        match parser.peek() {
            None => Ok(expr),
            Some(token) => Err(ExpressionError::UnexpectedToken(format!("{token:?}"))),
        }
    }

    /// Evaluate against a record.
    pub fn eval(&self, record: &Map<String, Value>) -> Result<Value, ExpressionError> {
        match self {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Path(path) => Ok(lookup(record, path)),
            Expr::Not(inner) => Ok(Value::Bool(!truthy(&inner.eval(record)?))),
            Expr::Neg(inner) => {
                let value = inner.eval(record)?;
                match value.as_f64() {
                    Some(n) => Ok(number(-n)),
                    None => Err(ExpressionError::TypeMismatch {
                        op: "-",
                        left: "number",
                        right: type_name(&value),
                    }),
                }
            }
            Expr::Binary { op, left, right } => eval_binary(*op, left, right, record),
        }
    }
}

/// Parse and evaluate, reducing the result to a boolean.
pub fn evaluate_condition(
    source: &str,
    record: &Map<String, Value>,
) -> Result<bool, ExpressionError> {
    let expr = Expr::parse(source)?;
    Ok(truthy(&expr.eval(record)?))
}

fn eval_binary(
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    record: &Map<String, Value>,
) -> Result<Value, ExpressionError> {
    let lhs = left.eval(record)?;
    match op {
        BinaryOp::And => {
            if !truthy(&lhs) {
                return Ok(Value::Bool(false));
            }
            return Ok(Value::Bool(truthy(&right.eval(record)?)));
        }
        BinaryOp::Or => {
            if truthy(&lhs) {
                return Ok(Value::Bool(true));
            }
            return Ok(Value::Bool(truthy(&right.eval(record)?)));
        }
        _ => {}
    }

    let rhs = right.eval(record)?;
    let mismatch = || ExpressionError::TypeMismatch {
        op: op.symbol(),
        left: type_name(&lhs),
        right: type_name(&rhs),
    };

    match op {
        BinaryOp::Eq => Ok(Value::Bool(strict_equals(&lhs, &rhs))),
        BinaryOp::Ne => Ok(Value::Bool(!strict_equals(&lhs, &rhs))),
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let ordering = match (&lhs, &rhs) {
                (Value::Number(a), Value::Number(b)) => {
                    let a = a.as_f64().unwrap_or(f64::NAN);
                    let b = b.as_f64().unwrap_or(f64::NAN);
                    a.partial_cmp(&b)
                }
                (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
                _ => return Err(mismatch()),
            };
            let Some(ordering) = ordering else {
                return Ok(Value::Bool(false));
            };
            let result = match op {
                BinaryOp::Lt => ordering.is_lt(),
                BinaryOp::Le => ordering.is_le(),
                BinaryOp::Gt => ordering.is_gt(),
                _ => ordering.is_ge(),
            };
            Ok(Value::Bool(result))
        }
        BinaryOp::Add => match (&lhs, &rhs) {
            (Value::String(a), b) => Ok(Value::String(format!("{a}{}", display(b)))),
            (a, Value::String(b)) => Ok(Value::String(format!("{}{b}", display(a)))),
            (Value::Number(_), Value::Number(_)) => {
                arithmetic(&lhs, &rhs, |a, b| a + b).ok_or_else(mismatch)
            }
            _ => Err(mismatch()),
        },
        BinaryOp::Sub => arithmetic(&lhs, &rhs, |a, b| a - b).ok_or_else(mismatch),
        BinaryOp::Mul => arithmetic(&lhs, &rhs, |a, b| a * b).ok_or_else(mismatch),
        BinaryOp::Div | BinaryOp::Rem => {
            let (Some(a), Some(b)) = (lhs.as_f64(), rhs.as_f64()) else {
                return Err(mismatch());
            };
            if b == 0.0 {
                return Err(ExpressionError::DivisionByZero);
            }
            Ok(number(if op == BinaryOp::Div { a / b } else { a % b }))
        }
        BinaryOp::And | BinaryOp::Or => unreachable!("short-circuit operators handled above"),
    }
}

fn arithmetic(lhs: &Value, rhs: &Value, f: impl Fn(f64, f64) -> f64) -> Option<Value> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Some(number(f(a.as_f64()?, b.as_f64()?))),
        _ => None,
    }
}

fn lookup(record: &Map<String, Value>, path: &[String]) -> Value {
    // A real field named like an alias shadows the alias.
    let path = match path.split_first() {
        Some((head, rest))
            if !rest.is_empty()
                && RECORD_ALIASES.contains(&head.as_str())
                && !record.contains_key(head) =>
        {
            rest
        }
        _ => path,
    };

    let Some((first, rest)) = path.split_first() else {
        return Value::Null;
    };
    let mut current = match record.get(first) {
        Some(value) => value,
        None => return Value::Null,
    };
    for segment in rest {
        current = match current.get(segment.as_str()) {
            Some(value) => value,
            None => return Value::Null,
        };
    }
    current.clone()
}

/// Equality without coercion; numbers compare by value.
pub(crate) fn strict_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn number(n: f64) -> Value {
    Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn tokenize(source: &str) -> Result<Vec<Token>, ExpressionError> {
    let chars: Vec<(usize, char)> = source.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (offset, ch) = chars[i];
        let next = chars.get(i + 1).map(|(_, c)| *c);
        let after = chars.get(i + 2).map(|(_, c)| *c);

        if ch.is_whitespace() {
            i += 1;
            continue;
        }

        if ch.is_ascii_digit() || (ch == '.' && next.is_some_and(|c| c.is_ascii_digit())) {
            let start = i;
            while i < chars.len() && (chars[i].1.is_ascii_digit() || chars[i].1 == '.') {
                i += 1;
            }
            let text: String = chars[start..i].iter().map(|(_, c)| c).collect();
            let value = text
                .parse::<f64>()
                .map_err(|_| ExpressionError::UnexpectedToken(text.clone()))?;
            tokens.push(Token::Number(value));
            continue;
        }

        if ch == '\'' || ch == '"' {
            let quote = ch;
            let mut text = String::new();
            i += 1;
            let mut closed = false;
            while i < chars.len() {
                let c = chars[i].1;
                if c == '\\' && i + 1 < chars.len() {
                    text.push(chars[i + 1].1);
                    i += 2;
                    continue;
                }
                i += 1;
                if c == quote {
                    closed = true;
                    break;
                }
                text.push(c);
            }
            if !closed {
                return Err(ExpressionError::UnterminatedString { offset });
            }
            tokens.push(Token::Str(text));
            continue;
        }

        if ch.is_alphabetic() || ch == '_' || ch == '$' {
            let start = i;
            while i < chars.len()
                && (chars[i].1.is_alphanumeric() || chars[i].1 == '_' || chars[i].1 == '$')
            {
                i += 1;
            }
            let word: String = chars[start..i].iter().map(|(_, c)| c).collect();
            tokens.push(Token::Ident(word));
            continue;
        }

        let (token, width) = match (ch, next, after) {
            ('=', Some('='), Some('=')) => (Token::Eq, 3),
            ('!', Some('='), Some('=')) => (Token::Ne, 3),
            ('=', Some('='), _) => (Token::Eq, 2),
            ('!', Some('='), _) => (Token::Ne, 2),
            ('<', Some('='), _) => (Token::Le, 2),
            ('>', Some('='), _) => (Token::Ge, 2),
            ('&', Some('&'), _) => (Token::And, 2),
            ('|', Some('|'), _) => (Token::Or, 2),
            ('<', _, _) => (Token::Lt, 1),
            ('>', _, _) => (Token::Gt, 1),
            ('!', _, _) => (Token::Not, 1),
            ('(', _, _) => (Token::LParen, 1),
            (')', _, _) => (Token::RParen, 1),
            ('.', _, _) => (Token::Dot, 1),
            ('+', _, _) => (Token::Plus, 1),
            ('-', _, _) => (Token::Minus, 1),
            ('*', _, _) => (Token::Star, 1),
            ('/', _, _) => (Token::Slash, 1),
            ('%', _, _) => (Token::Percent, 1),
            _ => return Err(ExpressionError::UnexpectedChar { ch, offset }),
        };
        tokens.push(token);
        i += width;
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    operators: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn enter(&mut self) -> Result<(), ExpressionError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExpressionError::TooDeep);
        }
        Ok(())
    }

    fn binary(
        &mut self,
        token_op: impl Fn(&Token) -> Option<BinaryOp>,
        next: fn(&mut Self) -> Result<Expr, ExpressionError>,
    ) -> Result<Expr, ExpressionError> {
        let mut left = next(self)?;
        while let Some(op) = self.peek().and_then(&token_op) {
            self.pos += 1;
            self.operators += 1;
            if self.operators > MAX_OPERATORS {
                return Err(ExpressionError::TooLong);
            }
            let right = next(self)?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<Expr, ExpressionError> {
        self.enter()?;
        let expr = self.binary(
            |t| matches!(t, Token::Or).then_some(BinaryOp::Or),
            Self::parse_and,
        );
        self.depth -= 1;
        expr
    }

    fn parse_and(&mut self) -> Result<Expr, ExpressionError> {
        self.binary(
            |t| matches!(t, Token::And).then_some(BinaryOp::And),
            Self::parse_equality,
        )
    }

    fn parse_equality(&mut self) -> Result<Expr, ExpressionError> {
        self.binary(
            |t| match t {
                Token::Eq => Some(BinaryOp::Eq),
                Token::Ne => Some(BinaryOp::Ne),
                _ => None,
            },
            Self::parse_comparison,
        )
    }

    fn parse_comparison(&mut self) -> Result<Expr, ExpressionError> {
        self.binary(
            |t| match t {
                Token::Lt => Some(BinaryOp::Lt),
                Token::Le => Some(BinaryOp::Le),
                Token::Gt => Some(BinaryOp::Gt),
                Token::Ge => Some(BinaryOp::Ge),
                _ => None,
            },
            Self::parse_additive,
        )
    }

    fn parse_additive(&mut self) -> Result<Expr, ExpressionError> {
        self.binary(
            |t| match t {
                Token::Plus => Some(BinaryOp::Add),
                Token::Minus => Some(BinaryOp::Sub),
                _ => None,
            },
            Self::parse_multiplicative,
        )
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ExpressionError> {
        self.binary(
            |t| match t {
                Token::Star => Some(BinaryOp::Mul),
                Token::Slash => Some(BinaryOp::Div),
                Token::Percent => Some(BinaryOp::Rem),
                _ => None,
            },
            Self::parse_unary,
        )
    }

    fn parse_unary(&mut self) -> Result<Expr, ExpressionError> {
        match self.peek() {
            Some(Token::Not) => {
                self.pos += 1;
                self.enter()?;
                let inner = self.parse_unary()?;
                self.depth -= 1;
                Ok(Expr::Not(Box::new(inner)))
            }
            Some(Token::Minus) => {
                self.pos += 1;
                self.enter()?;
                let inner = self.parse_unary()?;
                self.depth -= 1;
                Ok(Expr::Neg(Box::new(inner)))
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ExpressionError> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(Expr::Literal(number(n))),
            Some(Token::Str(s)) => Ok(Expr::Literal(Value::String(s))),
            Some(Token::Ident(word)) => match word.as_str() {
                "true" => Ok(Expr::Literal(Value::Bool(true))),
                "false" => Ok(Expr::Literal(Value::Bool(false))),
                "null" | "undefined" => Ok(Expr::Literal(Value::Null)),
                _ => self.parse_path(word),
            },
            Some(Token::LParen) => {
                let inner = self.parse_or()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(inner),
                    Some(other) => Err(ExpressionError::UnexpectedToken(format!("{other:?}"))),
                    None => Err(ExpressionError::UnexpectedEnd),
                }
            }
            Some(other) => Err(ExpressionError::UnexpectedToken(format!("{other:?}"))),
            None => Err(ExpressionError::UnexpectedEnd),
        }
    }

    fn parse_path(&mut self, head: String) -> Result<Expr, ExpressionError> {
        let mut path = vec![head];
        while matches!(self.peek(), Some(Token::Dot)) {
            self.pos += 1;
            match self.advance() {
                Some(Token::Ident(segment)) => path.push(segment),
                Some(other) => return Err(ExpressionError::UnexpectedToken(format!("{other:?}"))),
                None => return Err(ExpressionError::UnexpectedEnd),
            }
        }
        Ok(Expr::Path(path))
    }
}
