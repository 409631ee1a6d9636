//! Restricted arithmetic expression evaluator
//!
//! Some numeric fields (the warmup ratio) may be authored as an arithmetic
//! expression string such as `"1.0 / 3.0"`. This module evaluates exactly
//! that grammar: numeric literals, `+ - * /`, parentheses and unary minus.
//! Anything else is rejected, so a document can never smuggle code through
//! an expression field.

/// Expression token
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
    Eof,
}

/// Expression evaluation errors
#[derive(Debug, thiserror::Error)]
pub enum ExprError {
    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),
    #[error("unexpected token {0:?}")]
    UnexpectedToken(Token),
    #[error("unexpected end of expression")]
    UnexpectedEof,
    #[error("invalid numeric literal `{0}`")]
    InvalidNumber(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("expression does not evaluate to a finite number")]
    NonFinite,
}

type Result<T> = std::result::Result<T, ExprError>;

/// Evaluate a restricted arithmetic expression.
pub fn eval(input: &str) -> Result<f64> {
    let mut parser = ExprParser::new(tokenize(input)?);
    let value = parser.parse_expression()?;
    parser.expect_eof()?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ExprError::NonFinite)
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            ' ' | '\t' | '\n' | '\r' => {
                chars.next();
            }
            '+' => {
                tokens.push(Token::Plus);
                chars.next();
            }
            '-' => {
                tokens.push(Token::Minus);
                chars.next();
            }
            '*' => {
                tokens.push(Token::Star);
                chars.next();
            }
            '/' => {
                tokens.push(Token::Slash);
                chars.next();
            }
            '(' => {
                tokens.push(Token::LeftParen);
                chars.next();
            }
            ')' => {
                tokens.push(Token::RightParen);
                chars.next();
            }
            _ if ch.is_ascii_digit() => {
                let mut number = String::new();
                let mut seen_dot = false;

                while let Some(&c) = chars.peek() {
                    if c.is_ascii_digit() {
                        number.push(c);
                        chars.next();
                    } else if c == '.' && !seen_dot {
                        seen_dot = true;
                        number.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }

                let value: f64 = number
                    .parse()
                    .map_err(|_| ExprError::InvalidNumber(number.clone()))?;
                tokens.push(Token::Number(value));
            }
            _ => return Err(ExprError::UnexpectedChar(ch)),
        }
    }

    tokens.push(Token::Eof);
    Ok(tokens)
}

/// Recursive-descent parser over the token stream; one method per
/// precedence level.
struct ExprParser {
    tokens: Vec<Token>,
    position: usize,
}

impl ExprParser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, position: 0 }
    }

    fn current_token(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    fn expect_eof(&self) -> Result<()> {
        match self.current_token() {
            Token::Eof => Ok(()),
            token => Err(ExprError::UnexpectedToken(token.clone())),
        }
    }

    fn parse_expression(&mut self) -> Result<f64> {
        let mut value = self.parse_term()?;

        loop {
            match self.current_token() {
                Token::Plus => {
                    self.advance();
                    value += self.parse_term()?;
                }
                Token::Minus => {
                    self.advance();
                    value -= self.parse_term()?;
                }
                _ => break,
            }
        }

        Ok(value)
    }

    fn parse_term(&mut self) -> Result<f64> {
        let mut value = self.parse_factor()?;

        loop {
            match self.current_token() {
                Token::Star => {
                    self.advance();
                    value *= self.parse_factor()?;
                }
                Token::Slash => {
                    self.advance();
                    let divisor = self.parse_factor()?;
                    if divisor == 0.0 {
                        return Err(ExprError::DivisionByZero);
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }

        Ok(value)
    }

    fn parse_factor(&mut self) -> Result<f64> {
        match self.current_token() {
            Token::Minus => {
                self.advance();
                Ok(-self.parse_factor()?)
            }
            Token::Number(value) => {
                let value = *value;
                self.advance();
                Ok(value)
            }
            Token::LeftParen => {
                self.advance();
                let value = self.parse_expression()?;
                match self.current_token() {
                    Token::RightParen => {
                        self.advance();
                        Ok(value)
                    }
                    Token::Eof => Err(ExprError::UnexpectedEof),
                    token => Err(ExprError::UnexpectedToken(token.clone())),
                }
            }
            Token::Eof => Err(ExprError::UnexpectedEof),
            token => Err(ExprError::UnexpectedToken(token.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_literals_and_operators() {
        assert_eq!(eval("42").unwrap(), 42.0);
        assert_eq!(eval("1 + 2 * 3").unwrap(), 7.0);
        assert_eq!(eval("(1 + 2) * 3").unwrap(), 9.0);
        assert_eq!(eval("10 - 4 - 3").unwrap(), 3.0);
        assert_eq!(eval("-2 * -3").unwrap(), 6.0);
    }

    #[test]
    fn test_eval_warmup_ratio_expression() {
        let value = eval("1.0 / 3.0").unwrap();
        assert!((value - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_eval_rejects_non_arithmetic_input() {
        assert!(matches!(eval("import os"), Err(ExprError::UnexpectedChar('i'))));
        assert!(matches!(eval("1 + x"), Err(ExprError::UnexpectedChar('x'))));
        assert!(matches!(eval("pow(2, 3)"), Err(ExprError::UnexpectedChar('p'))));
    }

    #[test]
    fn test_eval_rejects_malformed_expressions() {
        assert!(matches!(eval(""), Err(ExprError::UnexpectedEof)));
        assert!(matches!(eval("1 +"), Err(ExprError::UnexpectedEof)));
        assert!(matches!(eval("(1 + 2"), Err(ExprError::UnexpectedEof)));
        assert!(matches!(eval("1 2"), Err(ExprError::UnexpectedToken(_))));
        assert!(matches!(eval("1..5"), Err(ExprError::UnexpectedChar('.'))));
    }

    #[test]
    fn test_eval_rejects_division_by_zero() {
        assert!(matches!(eval("1 / 0"), Err(ExprError::DivisionByZero)));
        assert!(matches!(eval("1 / (2 - 2)"), Err(ExprError::DivisionByZero)));
    }
}
