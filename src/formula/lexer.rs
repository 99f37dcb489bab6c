use std::{fmt, iter::Peekable, str::Chars};

use super::error::LexError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    /// Variable or function name, possibly dotted (`Math.max`)
    Identifier(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LParen,
    RParen,
    Comma,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    EqualEqual,
    NotEqual,
    AndAnd,
    OrOr,
    Bang,
    Question,
    Colon
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "number {}", n),
            TokenKind::Identifier(name) => write!(f, "'{}'", name),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Percent => write!(f, "'%'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Less => write!(f, "'<'"),
            TokenKind::LessEqual => write!(f, "'<='"),
            TokenKind::Greater => write!(f, "'>'"),
            TokenKind::GreaterEqual => write!(f, "'>='"),
            TokenKind::EqualEqual => write!(f, "'=='"),
            TokenKind::NotEqual => write!(f, "'!='"),
            TokenKind::AndAnd => write!(f, "'&&'"),
            TokenKind::OrOr => write!(f, "'||'"),
            TokenKind::Bang => write!(f, "'!'"),
            TokenKind::Question => write!(f, "'?'"),
            TokenKind::Colon => write!(f, "':'")
        }
    }
}

/// A token and the character offset it starts at.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: usize
}

pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    tokenize_with_limit(source, crate::model::constants::MAX_FORMULA_LENGTH)
}

/// Splits `source` into tokens, failing fast when it is longer than `max_length` characters.
pub fn tokenize_with_limit(source: &str, max_length: usize) -> Result<Vec<Token>, LexError> {
    let len = source.chars().count();
    if len > max_length {
        return Err(LexError::TooLong { len, max: max_length });
    }

    Lexer {
        chars: source.chars().peekable(),
        pos: 0
    }
    .run()
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    pos: usize
}

impl Lexer<'_> {
    fn run(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(&ch) = self.chars.peek() {
            let start = self.pos;

            if ch.is_whitespace() {
                self.bump();
                continue;
            }

            let kind = if ch.is_ascii_digit() || ch == '.' {
                self.number(start)?
            } else if ch.is_ascii_alphabetic() || ch == '_' {
                self.identifier(start)?
            } else {
                self.bump();
                self.operator(ch, start)?
            };

            tokens.push(Token { kind, pos: start });
        }

        Ok(tokens)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.chars.peek() == Some(&expected) {
            self.bump();
            return true;
        }
        false
    }

    fn number(&mut self, start: usize) -> Result<TokenKind, LexError> {
        let mut literal = String::new();
        self.digits(&mut literal);

        if self.eat('.') {
            literal.push('.');
            let before = literal.len();
            self.digits(&mut literal);

            // `1.` and a lone `.` have no fractional digits
            if literal.len() == before {
                return Err(LexError::InvalidNumber { pos: start, literal });
            }
        }

        match literal.parse::<f64>() {
            // Literals too large for f64 would otherwise become infinity
            Ok(value) if value.is_finite() => Ok(TokenKind::Number(value)),
            _ => Err(LexError::InvalidNumber { pos: start, literal })
        }
    }

    fn digits(&mut self, literal: &mut String) {
        while let Some(&ch) = self.chars.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            literal.push(ch);
            self.bump();
        }
    }

    fn identifier(&mut self, start: usize) -> Result<TokenKind, LexError> {
        let mut name = String::new();
        self.segment(&mut name);

        while self.eat('.') {
            match self.chars.peek() {
                Some(&ch) if ch.is_ascii_alphabetic() || ch == '_' => {
                    name.push('.');
                    self.segment(&mut name);
                }
                _ => {
                    return Err(LexError::UnexpectedCharacter {
                        pos: self.pos - 1,
                        ch: '.'
                    })
                }
            }
        }

        Ok(TokenKind::Identifier(name))
    }

    fn segment(&mut self, name: &mut String) {
        while let Some(&ch) = self.chars.peek() {
            if !(ch.is_ascii_alphanumeric() || ch == '_') {
                break;
            }
            name.push(ch);
            self.bump();
        }
    }

    fn operator(&mut self, ch: char, start: usize) -> Result<TokenKind, LexError> {
        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            '?' => TokenKind::Question,
            ':' => TokenKind::Colon,
            '<' if self.eat('=') => TokenKind::LessEqual,
            '<' => TokenKind::Less,
            '>' if self.eat('=') => TokenKind::GreaterEqual,
            '>' => TokenKind::Greater,
            '!' if self.eat('=') => TokenKind::NotEqual,
            '!' => TokenKind::Bang,
            '=' if self.eat('=') => TokenKind::EqualEqual,
            '&' if self.eat('&') => TokenKind::AndAnd,
            '|' if self.eat('|') => TokenKind::OrOr,
            _ => return Err(LexError::UnexpectedCharacter { pos: start, ch })
        };

        Ok(kind)
    }
}
