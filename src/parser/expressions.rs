//! Expression parsing implementation
//!
//! This module handles parsing of HoleyC expressions using precedence climbing
//! for binary operators and recursive descent for everything else.
//!
//! # Supported Expressions
//!
//! - Literals: integers, characters, strings, `true`, `false`, `NULLPTR`
//! - Lvalues: `x`, `x[exp]`, `@x` (dereference), `^x` (address-of)
//! - Assignment: `lval = exp`
//! - Binary operators: arithmetic, relational, logical (`and`, `or`)
//! - Unary operators: `-`, `!`
//! - Calls: `f(a, b)`
//!
//! # Precedence
//!
//! From loosest to tightest binding; every binary level is left-associative:
//!
//! ```text
//! or
//! and
//! == != < <= > >=
//! + -
//! * /
//! - !      (prefix)
//! ```
//!
//! An assignment is recognised where a term starts with an lvalue followed
//! by `=`; its right-hand side is a full expression.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{TokenKind, TokenValue};
use crate::parser::parse::{Parser, SyntaxError};

/// Binding power of the loosest binary operator
const LOWEST_PRECEDENCE: u8 = 1;

/// Binary operator table: token, operator, binding power.
const BINARY_OPERATORS: [(TokenKind, BinOp, u8); 12] = [
    (TokenKind::Or, BinOp::Or, 1),
    (TokenKind::And, BinOp::And, 2),
    (TokenKind::Equals, BinOp::Equals, 3),
    (TokenKind::NotEquals, BinOp::NotEquals, 3),
    (TokenKind::Less, BinOp::Less, 3),
    (TokenKind::LessEq, BinOp::LessEq, 3),
    (TokenKind::Greater, BinOp::Greater, 3),
    (TokenKind::GreaterEq, BinOp::GreaterEq, 3),
    (TokenKind::Cross, BinOp::Plus, 4),
    (TokenKind::Dash, BinOp::Minus, 4),
    (TokenKind::Star, BinOp::Times, 5),
    (TokenKind::Slash, BinOp::Divide, 5),
];

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, SyntaxError> {
        self.nested(|parser| parser.parse_binary(LOWEST_PRECEDENCE))
    }

    /// Precedence climbing over [`BINARY_OPERATORS`]
    fn parse_binary(&mut self, min_precedence: u8) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_unary()?;

        while let Some((op, precedence)) = self.peek_binary_operator() {
            if precedence < min_precedence {
                break;
            }
            self.advance();

            // Left-associative: the right operand only takes tighter operators
            let right = self.parse_binary(precedence + 1)?;
            let location = left.location();
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location,
            };
        }

        Ok(left)
    }

    fn peek_binary_operator(&mut self) -> Option<(BinOp, u8)> {
        for (kind, op, precedence) in BINARY_OPERATORS {
            if self.check(kind) {
                return Some((op, precedence));
            }
        }
        None
    }

    /// Parse unary (- !)
    fn parse_unary(&mut self) -> Result<Expr, SyntaxError> {
        let loc = self.current_location();

        let op = if self.match_token(TokenKind::Dash) {
            UnOp::Negate
        } else if self.match_token(TokenKind::Not) {
            UnOp::Not
        } else {
            return self.parse_term();
        };

        let operand = Box::new(self.nested(Self::parse_unary)?);
        Ok(Expr::Unary {
            op,
            operand,
            location: loc,
        })
    }

    /// Parse term (lvalues, calls, assignments, literals, parenthesized expressions)
    fn parse_term(&mut self) -> Result<Expr, SyntaxError> {
        let loc = self.current_location();

        if self.check(TokenKind::Id) {
            let id = self.expect_identifier()?;
            if self.check(TokenKind::LParen) {
                return Ok(Expr::Call(self.parse_call_rest(id)?));
            }
            let lval = self.parse_lvalue_after_id(id)?;
            return self.parse_assignment_rest(lval);
        }

        if self.check(TokenKind::At) || self.check(TokenKind::Carat) {
            let lval = self.parse_lvalue()?;
            return self.parse_assignment_rest(lval);
        }

        if self.check(TokenKind::IntLiteral) {
            let token = self.advance().clone();
            return match token.value {
                Some(TokenValue::Int(n)) => Ok(Expr::IntLit(n, loc)),
                _ => Err(Self::malformed(&token)),
            };
        }

        if self.check(TokenKind::StrLiteral) {
            let token = self.advance().clone();
            return match token.value {
                Some(TokenValue::Str(s)) => Ok(Expr::StrLit(s, loc)),
                _ => Err(Self::malformed(&token)),
            };
        }

        if self.check(TokenKind::CharLiteral) {
            let token = self.advance().clone();
            return match token.value {
                Some(TokenValue::Char(c)) => Ok(Expr::CharLit(c, loc)),
                _ => Err(Self::malformed(&token)),
            };
        }

        if self.match_token(TokenKind::True) {
            return Ok(Expr::True(loc));
        }

        if self.match_token(TokenKind::False) {
            return Ok(Expr::False(loc));
        }

        if self.match_token(TokenKind::NullPtr) {
            return Ok(Expr::NullPtr(loc));
        }

        if self.match_token(TokenKind::LParen) {
            let expr = self.parse_expression()?;
            self.expect(TokenKind::RParen)?;
            return Ok(expr);
        }

        Err(self.unexpected())
    }

    /// An lvalue is either assigned to or used as a value
    fn parse_assignment_rest(&mut self, target: LValue) -> Result<Expr, SyntaxError> {
        if !self.match_token(TokenKind::Assign) {
            return Ok(Expr::LValue(target));
        }

        let source = Box::new(self.parse_expression()?);
        let location = target.location();
        Ok(Expr::Assign(AssignExp {
            target,
            source,
            location,
        }))
    }

    /// Parse lvalue: `ID`, `ID '[' exp ']'`, `'@' ID`, `'^' ID`
    pub(crate) fn parse_lvalue(&mut self) -> Result<LValue, SyntaxError> {
        let loc = self.current_location();

        if self.check(TokenKind::Id) {
            let id = self.expect_identifier()?;
            return self.parse_lvalue_after_id(id);
        }

        if self.match_token(TokenKind::At) {
            let base = self.expect_identifier()?;
            return Ok(LValue::Dereference {
                base,
                location: loc,
            });
        }

        if self.match_token(TokenKind::Carat) {
            let base = self.expect_identifier()?;
            return Ok(LValue::AddressOf {
                base,
                location: loc,
            });
        }

        Err(self.unexpected())
    }

    /// Parse the optional `'[' exp ']'` after an identifier
    pub(crate) fn parse_lvalue_after_id(&mut self, id: Identifier) -> Result<LValue, SyntaxError> {
        if !self.match_token(TokenKind::LBrace) {
            return Ok(LValue::Id(id));
        }

        let offset = Box::new(self.parse_expression()?);
        self.expect(TokenKind::RBrace)?;
        let location = id.location;
        Ok(LValue::Index {
            base: id,
            offset,
            location,
        })
    }

    /// Parse `'(' (exp (',' exp)*)? ')'` after a callee name
    pub(crate) fn parse_call_rest(&mut self, callee: Identifier) -> Result<CallExp, SyntaxError> {
        self.expect(TokenKind::LParen)?;

        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                args.push(self.parse_expression()?);

                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenKind::RParen)?;

        let location = callee.location;
        Ok(CallExp {
            callee,
            args,
            location,
        })
    }
}
