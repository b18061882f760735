//! Arithmetic question handling
//!
//! Key security features:
//! - Whole-string character allow-list checked before any parsing
//! - Dedicated recursive-descent evaluator over `+ - * / ( )` and
//!   decimal literals; no general-purpose expression engine
//! - Malformed input, division by zero, and non-finite results all
//!   collapse to `None` instead of an error

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static QUESTION_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)what is\s+(.+?)\s*\?").unwrap());

/// Pull an arithmetic expression out of a "What is 5+5?" style question
/// and evaluate it. Returns `None` when the question does not match the
/// pattern or the expression is rejected by the evaluator.
pub fn extract_arithmetic_answer(question: &str) -> Option<String> {
    let captures = QUESTION_PATTERN.captures(question)?;
    let expr = captures.get(1)?.as_str();
    debug!(expression = expr, "Extracted arithmetic expression");
    evaluate_expression(expr)
}

/// Evaluate a restricted arithmetic expression. The allow-list check is
/// the sandbox boundary: anything outside digits, operators, decimal
/// points, parentheses, and blanks is rejected before tokenization.
pub fn evaluate_expression(expr: &str) -> Option<String> {
    if expr.trim().is_empty() || !expr.chars().all(is_allowed_char) {
        return None;
    }

    let tokens = tokenize(expr)?;
    let mut parser = Parser::new(tokens);
    let value = parser.expression()?;

    // Trailing tokens mean the expression was not fully consumed,
    // e.g. "2+3)" or "1 2".
    if !parser.at_end() {
        return None;
    }

    if !value.is_finite() {
        return None;
    }

    Some(value.to_string())
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '.' | '(' | ')' | ' ' | '\t')
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    OpenParen,
    CloseParen,
}

fn tokenize(expr: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = expr.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '(' => {
                chars.next();
                tokens.push(Token::OpenParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::CloseParen);
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                // Rejects "1.2.3", "." and friends.
                let value = literal.parse::<f64>().ok()?;
                tokens.push(Token::Number(value));
            }
            _ => return None,
        }
    }

    Some(tokens)
}

/// Recursive-descent parser with the usual precedence:
/// expression := term (('+' | '-') term)*
/// term       := factor (('*' | '/') factor)*
/// factor     := ('+' | '-') factor | '(' expression ')' | number
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn at_end(&self) -> bool {
        self.pos == self.tokens.len()
    }

    fn expression(&mut self) -> Option<f64> {
        let mut value = self.term()?;

        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.advance();
                    value += self.term()?;
                }
                Token::Minus => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => break,
            }
        }

        Some(value)
    }

    fn term(&mut self) -> Option<f64> {
        let mut value = self.factor()?;

        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.advance();
                    value *= self.factor()?;
                }
                Token::Slash => {
                    self.advance();
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return None;
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }

        Some(value)
    }

    fn factor(&mut self) -> Option<f64> {
        match self.advance()? {
            Token::Number(value) => Some(value),
            Token::Plus => self.factor(),
            Token::Minus => self.factor().map(|v| -v),
            Token::OpenParen => {
                let value = self.expression()?;
                match self.advance()? {
                    Token::CloseParen => Some(value),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}
