use super::{
    ast::{Ast, BinaryOp, Expr, UnaryOp},
    error::ParseError,
    lexer::{Token, TokenKind}
};
use crate::model::constants::MAX_FORMULA_DEPTH;

const END_OF_FORMULA: &str = "end of formula";

pub fn parse(tokens: &[Token]) -> Result<Ast, ParseError> {
    parse_with_depth(tokens, MAX_FORMULA_DEPTH)
}

/// Precedence-climbing parser. Nesting beyond `max_depth` fails with [`ParseError::TooDeep`]
/// before the recursion can grow any further.
pub fn parse_with_depth(tokens: &[Token], max_depth: usize) -> Result<Ast, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parser = Parser {
        tokens,
        cursor: 0,
        depth: 0,
        max_depth
    };

    let root = parser.expression()?;

    match parser.peek() {
        None => Ok(Ast { root }),
        Some(Token {
            kind: TokenKind::RParen,
            pos
        }) => Err(ParseError::UnbalancedParens { pos: *pos }),
        Some(token) => Err(ParseError::UnexpectedToken {
            pos: token.pos,
            expected: "an operator or end of formula".to_string(),
            found: token.kind.to_string()
        })
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    cursor: usize,
    depth: usize,
    max_depth: usize
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.cursor);
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.cursor += 1;
            return true;
        }
        false
    }

    /// Position used when the formula ends unexpectedly.
    fn end_pos(&self) -> usize {
        self.tokens.last().map(|t| t.pos + 1).unwrap_or(0)
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::UnexpectedToken {
                pos: token.pos,
                expected: expected.to_string(),
                found: token.kind.to_string()
            },
            None => ParseError::UnexpectedToken {
                pos: self.end_pos(),
                expected: expected.to_string(),
                found: END_OF_FORMULA.to_string()
            }
        }
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ParseError::TooDeep { max: self.max_depth });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn expression(&mut self) -> Result<Expr, ParseError> {
        self.enter()?;
        let expr = self.ternary();
        self.leave();
        expr
    }

    fn ternary(&mut self) -> Result<Expr, ParseError> {
        let condition = self.binary(0)?;

        if !self.eat(&TokenKind::Question) {
            return Ok(condition);
        }

        let then_branch = self.expression()?;
        if !self.eat(&TokenKind::Colon) {
            return Err(self.unexpected("':'"));
        }
        let else_branch = self.expression()?;

        Ok(Expr::Conditional {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch)
        })
    }

    /// Left-associative binary levels, lowest precedence first.
    fn binary(&mut self, level: usize) -> Result<Expr, ParseError> {
        if level == BINARY_LEVELS {
            return self.unary();
        }

        let mut left = self.binary(level + 1)?;

        while let Some(op) = self.peek_kind().and_then(|kind| binary_op(level, kind)) {
            self.cursor += 1;
            let right = self.binary(level + 1)?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right)
            };
        }

        Ok(left)
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.peek_kind() {
            Some(TokenKind::Minus) => UnaryOp::Neg,
            Some(TokenKind::Bang) => UnaryOp::Not,
            _ => return self.atom()
        };
        self.cursor += 1;

        self.enter()?;
        let operand = self.unary();
        self.leave();

        Ok(Expr::Unary {
            op,
            operand: Box::new(operand?)
        })
    }

    fn atom(&mut self) -> Result<Expr, ParseError> {
        let Some(token) = self.advance().cloned() else {
            return Err(self.unexpected("a number, variable, function call or '('"));
        };

        match token.kind {
            TokenKind::Number(value) => Ok(Expr::Number(value)),
            TokenKind::Identifier(name) => {
                if self.eat(&TokenKind::LParen) {
                    let args = self.arguments(token.pos)?;
                    Ok(Expr::Call { name, args })
                } else {
                    Ok(Expr::Variable(name))
                }
            }
            TokenKind::LParen => {
                let inner = self.expression()?;
                self.close_paren(token.pos)?;
                Ok(inner)
            }
            _ => {
                self.cursor -= 1;
                Err(self.unexpected("a number, variable, function call or '('"))
            }
        }
    }

    fn arguments(&mut self, call_pos: usize) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();

        if self.eat(&TokenKind::RParen) {
            return Ok(args);
        }

        loop {
            args.push(self.expression()?);

            if self.eat(&TokenKind::Comma) {
                continue;
            }
            self.close_paren(call_pos)?;
            return Ok(args);
        }
    }

    fn close_paren(&mut self, open_pos: usize) -> Result<(), ParseError> {
        if self.eat(&TokenKind::RParen) {
            return Ok(());
        }
        match self.peek() {
            None => Err(ParseError::UnbalancedParens { pos: open_pos }),
            Some(_) => Err(self.unexpected("')'"))
        }
    }
}

const BINARY_LEVELS: usize = 6;

/// Maps a token to its binary operator at the given precedence level (0 binds loosest).
fn binary_op(level: usize, kind: &TokenKind) -> Option<BinaryOp> {
    let op = match (level, kind) {
        (0, TokenKind::OrOr) => BinaryOp::Or,
        (1, TokenKind::AndAnd) => BinaryOp::And,
        (2, TokenKind::EqualEqual) => BinaryOp::Equal,
        (2, TokenKind::NotEqual) => BinaryOp::NotEqual,
        (3, TokenKind::Less) => BinaryOp::Less,
        (3, TokenKind::LessEqual) => BinaryOp::LessEqual,
        (3, TokenKind::Greater) => BinaryOp::Greater,
        (3, TokenKind::GreaterEqual) => BinaryOp::GreaterEqual,
        (4, TokenKind::Plus) => BinaryOp::Add,
        (4, TokenKind::Minus) => BinaryOp::Sub,
        (5, TokenKind::Star) => BinaryOp::Mul,
        (5, TokenKind::Slash) => BinaryOp::Div,
        (5, TokenKind::Percent) => BinaryOp::Rem,
        _ => return None
    };
    Some(op)
}
