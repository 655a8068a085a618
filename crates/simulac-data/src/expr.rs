//! Constrained evaluator for the right-hand side of setup statements.
//!
//! Only literals and arithmetic are accepted: integers, floats, quoted
//! strings, `True`/`False`, unary `+`/`-`, `+ - * / // % **` and
//! parentheses. Names other than the two boolean literals are rejected.

use std::fmt;

use serde::{Deserialize, Serialize};
use simulac_core::{ErrorInfo, SimulacError};

/// Value bound to a name in a setup file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SetupValue {
    /// Boolean literal.
    Bool(bool),
    /// Integer literal or integer arithmetic result.
    Int(i64),
    /// Floating point literal or result.
    Float(f64),
    /// Quoted string literal.
    Str(String),
}

impl SetupValue {
    /// Returns the value as a column index when it is a non-negative integer.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            SetupValue::Int(value) => usize::try_from(*value).ok(),
            _ => None,
        }
    }

    /// Returns the value as a float when it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SetupValue::Int(value) => Some(*value as f64),
            SetupValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SetupValue::Str(value) => Some(value),
            _ => None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            SetupValue::Bool(_) => "bool",
            SetupValue::Int(_) => "int",
            SetupValue::Float(_) => "float",
            SetupValue::Str(_) => "str",
        }
    }
}

impl fmt::Display for SetupValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupValue::Bool(true) => write!(f, "True"),
            SetupValue::Bool(false) => write!(f, "False"),
            SetupValue::Int(value) => write!(f, "{value}"),
            SetupValue::Float(value) => write!(f, "{value}"),
            SetupValue::Str(value) => write!(f, "'{value}'"),
        }
    }
}

/// Evaluates an expression and returns its value.
pub fn evaluate(source: &str) -> Result<SetupValue, SimulacError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
    };
    let value = parser.expr()?;
    if parser.pos != tokens.len() {
        return Err(syntax_error(source, "unexpected trailing input"));
    }
    Ok(value)
}

fn syntax_error(source: &str, message: &str) -> SimulacError {
    SimulacError::Parse(ErrorInfo::new("expr_syntax", message).with_context("expression", source))
}

fn eval_error(code: &str, message: impl Into<String>) -> SimulacError {
    SimulacError::Parse(ErrorInfo::new(code, message))
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Int(i64),
    Float(f64),
    Str(String),
    Name(String),
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    SlashSlash,
    Percent,
    LParen,
    RParen,
}

fn tokenize(source: &str) -> Result<Vec<Token>, SimulacError> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut idx = 0;
    while idx < chars.len() {
        let ch = chars[idx];
        match ch {
            c if c.is_whitespace() => idx += 1,
            '+' => {
                tokens.push(Token::Plus);
                idx += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                idx += 1;
            }
            '*' if chars.get(idx + 1) == Some(&'*') => {
                tokens.push(Token::StarStar);
                idx += 2;
            }
            '*' => {
                tokens.push(Token::Star);
                idx += 1;
            }
            '/' if chars.get(idx + 1) == Some(&'/') => {
                tokens.push(Token::SlashSlash);
                idx += 2;
            }
            '/' => {
                tokens.push(Token::Slash);
                idx += 1;
            }
            '%' => {
                tokens.push(Token::Percent);
                idx += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                idx += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                idx += 1;
            }
            '\'' | '"' => {
                let quote = ch;
                let start = idx + 1;
                let end = chars[start..]
                    .iter()
                    .position(|&c| c == quote)
                    .map(|offset| start + offset)
                    .ok_or_else(|| syntax_error(source, "unterminated string literal"))?;
                tokens.push(Token::Str(chars[start..end].iter().collect()));
                idx = end + 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let (token, next) = number(source, &chars, idx)?;
                tokens.push(token);
                idx = next;
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = idx;
                while idx < chars.len() && (chars[idx].is_alphanumeric() || chars[idx] == '_') {
                    idx += 1;
                }
                tokens.push(Token::Name(chars[start..idx].iter().collect()));
            }
            _ => return Err(syntax_error(source, "unexpected character")),
        }
    }
    Ok(tokens)
}

fn number(source: &str, chars: &[char], start: usize) -> Result<(Token, usize), SimulacError> {
    let mut idx = start;
    let mut is_float = false;
    while idx < chars.len() && chars[idx].is_ascii_digit() {
        idx += 1;
    }
    if idx < chars.len() && chars[idx] == '.' {
        is_float = true;
        idx += 1;
        while idx < chars.len() && chars[idx].is_ascii_digit() {
            idx += 1;
        }
    }
    if idx < chars.len() && (chars[idx] == 'e' || chars[idx] == 'E') {
        let mut probe = idx + 1;
        if probe < chars.len() && (chars[probe] == '+' || chars[probe] == '-') {
            probe += 1;
        }
        if probe < chars.len() && chars[probe].is_ascii_digit() {
            is_float = true;
            idx = probe;
            while idx < chars.len() && chars[idx].is_ascii_digit() {
                idx += 1;
            }
        }
    }
    let text: String = chars[start..idx].iter().collect();
    let token = if is_float {
        Token::Float(
            text.parse()
                .map_err(|_| syntax_error(source, "invalid float literal"))?,
        )
    } else {
        Token::Int(
            text.parse()
                .map_err(|_| syntax_error(source, "invalid integer literal"))?,
        )
    };
    Ok((token, idx))
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn expr(&mut self) -> Result<SetupValue, SimulacError> {
        let mut lhs = self.term()?;
        while let Some(op) = self.peek().cloned() {
            if !matches!(op, Token::Plus | Token::Minus) {
                break;
            }
            self.pos += 1;
            let rhs = self.term()?;
            lhs = binary(&op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<SetupValue, SimulacError> {
        let mut lhs = self.unary()?;
        while let Some(op) = self.peek().cloned() {
            if !matches!(
                op,
                Token::Star | Token::Slash | Token::SlashSlash | Token::Percent
            ) {
                break;
            }
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = binary(&op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<SetupValue, SimulacError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                negate(self.unary()?)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                let value = self.unary()?;
                numeric(value, "unary +")
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<SetupValue, SimulacError> {
        let base = self.atom()?;
        if self.peek() == Some(&Token::StarStar) {
            self.pos += 1;
            let exponent = self.unary()?;
            return binary(&Token::StarStar, base, exponent);
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<SetupValue, SimulacError> {
        match self.next().cloned() {
            Some(Token::Int(value)) => Ok(SetupValue::Int(value)),
            Some(Token::Float(value)) => Ok(SetupValue::Float(value)),
            Some(Token::Str(value)) => Ok(SetupValue::Str(value)),
            Some(Token::Name(name)) => match name.as_str() {
                "True" => Ok(SetupValue::Bool(true)),
                "False" => Ok(SetupValue::Bool(false)),
                _ => Err(SimulacError::Parse(
                    ErrorInfo::new("expr_name", "names are not allowed in setup expressions")
                        .with_context("name", name),
                )),
            },
            Some(Token::LParen) => {
                let value = self.expr()?;
                match self.next() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err(eval_error("expr_syntax", "expected ')'")),
                }
            }
            Some(_) => Err(eval_error("expr_syntax", "expected a literal or '('")),
            None => Err(eval_error("expr_syntax", "unexpected end of expression")),
        }
    }
}

fn numeric(value: SetupValue, op: &str) -> Result<SetupValue, SimulacError> {
    match value {
        SetupValue::Bool(flag) => Ok(SetupValue::Int(i64::from(flag))),
        SetupValue::Str(_) => Err(SimulacError::Parse(
            ErrorInfo::new("expr_type", "unsupported operand type")
                .with_context("operator", op)
                .with_context("operand", "str"),
        )),
        other => Ok(other),
    }
}

fn negate(value: SetupValue) -> Result<SetupValue, SimulacError> {
    match numeric(value, "unary -")? {
        SetupValue::Int(value) => value
            .checked_neg()
            .map(SetupValue::Int)
            .ok_or_else(|| eval_error("expr_overflow", "integer overflow")),
        SetupValue::Float(value) => Ok(SetupValue::Float(-value)),
        other => Ok(other),
    }
}

fn op_name(op: &Token) -> &'static str {
    match op {
        Token::Plus => "+",
        Token::Minus => "-",
        Token::Star => "*",
        Token::StarStar => "**",
        Token::Slash => "/",
        Token::SlashSlash => "//",
        Token::Percent => "%",
        _ => "?",
    }
}

fn binary(op: &Token, lhs: SetupValue, rhs: SetupValue) -> Result<SetupValue, SimulacError> {
    if let (Token::Plus, SetupValue::Str(a), SetupValue::Str(b)) = (op, &lhs, &rhs) {
        return Ok(SetupValue::Str(format!("{a}{b}")));
    }
    if matches!(lhs, SetupValue::Str(_)) || matches!(rhs, SetupValue::Str(_)) {
        return Err(SimulacError::Parse(
            ErrorInfo::new("expr_type", "unsupported operand types")
                .with_context("operator", op_name(op))
                .with_context("lhs", lhs.type_name())
                .with_context("rhs", rhs.type_name()),
        ));
    }
    let lhs = numeric(lhs, op_name(op))?;
    let rhs = numeric(rhs, op_name(op))?;
    match (lhs, rhs) {
        (SetupValue::Int(a), SetupValue::Int(b)) => int_binary(op, a, b),
        (a, b) => {
            let a = a.as_f64().unwrap_or(f64::NAN);
            let b = b.as_f64().unwrap_or(f64::NAN);
            float_binary(op, a, b)
        }
    }
}

fn overflow() -> SimulacError {
    eval_error("expr_overflow", "integer overflow")
}

fn division_by_zero() -> SimulacError {
    eval_error("expr_division_by_zero", "division by zero")
}

fn int_binary(op: &Token, a: i64, b: i64) -> Result<SetupValue, SimulacError> {
    let value = match op {
        Token::Plus => a.checked_add(b).ok_or_else(overflow)?,
        Token::Minus => a.checked_sub(b).ok_or_else(overflow)?,
        Token::Star => a.checked_mul(b).ok_or_else(overflow)?,
        Token::Slash => return float_binary(op, a as f64, b as f64),
        Token::SlashSlash => {
            if b == 0 {
                return Err(division_by_zero());
            }
            let quotient = a.checked_div(b).ok_or_else(overflow)?;
            if a % b != 0 && ((a < 0) != (b < 0)) {
                quotient - 1
            } else {
                quotient
            }
        }
        Token::Percent => {
            if b == 0 {
                return Err(division_by_zero());
            }
            let rem = a.checked_rem(b).ok_or_else(overflow)?;
            if rem != 0 && ((rem < 0) != (b < 0)) {
                rem + b
            } else {
                rem
            }
        }
        Token::StarStar => {
            if b < 0 {
                return float_binary(op, a as f64, b as f64);
            }
            let exponent = u32::try_from(b).map_err(|_| overflow())?;
            a.checked_pow(exponent).ok_or_else(overflow)?
        }
        _ => return Err(eval_error("expr_syntax", "unknown operator")),
    };
    Ok(SetupValue::Int(value))
}

fn float_binary(op: &Token, a: f64, b: f64) -> Result<SetupValue, SimulacError> {
    let value = match op {
        Token::Plus => a + b,
        Token::Minus => a - b,
        Token::Star => a * b,
        Token::Slash => {
            if b == 0.0 {
                return Err(division_by_zero());
            }
            a / b
        }
        Token::SlashSlash => {
            if b == 0.0 {
                return Err(division_by_zero());
            }
            (a / b).floor()
        }
        Token::Percent => {
            if b == 0.0 {
                return Err(division_by_zero());
            }
            a - b * (a / b).floor()
        }
        Token::StarStar => a.powf(b),
        _ => return Err(eval_error("expr_syntax", "unknown operator")),
    };
    Ok(SetupValue::Float(value))
}
