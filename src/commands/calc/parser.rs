//! Calculator Expression Parser
//!
//! Recursive-descent evaluator for `+ - * /`, parentheses, unary signs and
//! decimal numbers. Any other character is rejected.
//!
//! Grammar:
//!   expr    := term (('+' | '-') term)*
//!   term    := unary (('*' | '/') unary)*
//!   unary   := ('+' | '-') unary | primary
//!   primary := number | '(' expr ')'

use thiserror::Error;

/// Deepest nesting of parentheses and unary signs accepted.
pub const MAX_DEPTH: usize = 200;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("malformed number '{0}'")]
    BadNumber(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NotFinite,

    #[error("expression nested deeper than {} levels", MAX_DEPTH)]
    TooDeep,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => n.to_string(),
            Token::Plus => "+".into(),
            Token::Minus => "-".into(),
            Token::Star => "*".into(),
            Token::Slash => "/".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' => {
                i += 1;
            }
            '+' => { tokens.push(Token::Plus); i += 1; }
            '-' => { tokens.push(Token::Minus); i += 1; }
            '*' => { tokens.push(Token::Star); i += 1; }
            '/' => { tokens.push(Token::Slash); i += 1; }
            '(' => { tokens.push(Token::LParen); i += 1; }
            ')' => { tokens.push(Token::RParen); i += 1; }
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| EvalError::BadNumber(literal.clone()))?;
                tokens.push(Token::Number(value));
            }
            other => return Err(EvalError::UnexpectedChar(other)),
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn descend(&mut self) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::TooDeep);
        }
        Ok(())
    }

    fn parse_expr(&mut self) -> Result<f64, EvalError> {
        let mut left = self.parse_term()?;
        while let Some(op) = self.current() {
            let add = match op {
                Token::Plus => true,
                Token::Minus => false,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            left = if add { left + right } else { left - right };
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<f64, EvalError> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.current() {
            let multiply = match op {
                Token::Star => true,
                Token::Slash => false,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = if multiply {
                left * right
            } else if right == 0.0 {
                return Err(EvalError::DivisionByZero);
            } else {
                left / right
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<f64, EvalError> {
        match self.current() {
            Some(Token::Minus) => {
                self.advance();
                self.descend()?;
                let value = self.parse_unary()?;
                self.depth -= 1;
                Ok(-value)
            }
            Some(Token::Plus) => {
                self.advance();
                self.descend()?;
                let value = self.parse_unary()?;
                self.depth -= 1;
                Ok(value)
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<f64, EvalError> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LParen) => {
                self.descend()?;
                let value = self.parse_expr()?;
                self.depth -= 1;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    Some(other) => Err(EvalError::UnexpectedToken(other.describe())),
                    None => Err(EvalError::UnexpectedEnd),
                }
            }
            Some(other) => Err(EvalError::UnexpectedToken(other.describe())),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}

/// Evaluate an arithmetic expression.
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, pos: 0, depth: 0 };
    let value = parser.parse_expr()?;
    if let Some(extra) = parser.current() {
        return Err(EvalError::UnexpectedToken(extra.describe()));
    }
    if !value.is_finite() {
        return Err(EvalError::NotFinite);
    }
    Ok(value)
}

/// Render a result the way a calculator display would: integral values
/// without a fractional part.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
