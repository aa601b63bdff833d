//! Statement parsing implementation
//!
//! This module handles parsing of all HoleyC statement types:
//!
//! - Local variable declarations: `int x;`
//! - Assignments and post-increment/decrement: `x = 1;`, `x++;`
//! - Console I/O: `FROMCONSOLE x;`, `TOCONSOLE exp;`
//! - Control flow: `if`, `if`/`else`, `while`, `return`
//! - Call statements: `f(a, b);`
//!
//! # Grammar
//!
//! ```text
//! stmt ::= varDecl ';'
//!        | lval '=' exp ';' | lval '++' ';' | lval '--' ';'
//!        | 'FROMCONSOLE' lval ';' | 'TOCONSOLE' exp ';'
//!        | 'if' '(' exp ')' block ('else' block)?
//!        | 'while' '(' exp ')' block
//!        | 'return' exp? ';'
//!        | call ';'
//! block ::= '{' stmt* '}'
//! ```
//!
//! Bodies always have braces, so an `else` can only belong to the `if`
//! whose block it directly follows.
//!
//! Statement blocks are where panic-mode recovery happens: a failed statement
//! is reported and the parser resynchronizes before the next one.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Boundary, Parser, SyntaxError};

impl Parser {
    /// Parse `'{' stmt* '}'`
    pub(crate) fn parse_block(&mut self) -> Result<Vec<Stmt>, SyntaxError> {
        self.nested(|parser| {
            parser.expect(TokenKind::LCurly)?;
            let statements = parser.parse_block_statements();
            parser.expect(TokenKind::RCurly)?;
            Ok(statements)
        })
    }

    /// Parse block statements (inside braces, excluding the braces themselves),
    /// recovering from errors in individual statements
    pub(crate) fn parse_block_statements(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::RCurly) && !self.is_at_end() && !self.is_aborted() {
            let start = self.position;
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(err) => {
                    self.report(err);
                    self.synchronize(start, Boundary::Statement);
                }
            }
        }

        statements
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, SyntaxError> {
        let loc = self.current_location();

        if self.check_type_keyword() {
            let var_type = self.parse_type()?;
            let name = self.expect_identifier()?;
            self.expect(TokenKind::Semicolon)?;
            return Ok(Stmt::VarDecl(VarDecl {
                var_type,
                name,
                location: loc,
            }));
        }

        if self.match_token(TokenKind::FromConsole) {
            let target = self.parse_lvalue()?;
            self.expect(TokenKind::Semicolon)?;
            return Ok(Stmt::Input {
                target,
                location: loc,
            });
        }

        if self.match_token(TokenKind::ToConsole) {
            let value = self.parse_expression()?;
            self.expect(TokenKind::Semicolon)?;
            return Ok(Stmt::Output {
                value,
                location: loc,
            });
        }

        if self.match_token(TokenKind::If) {
            return self.parse_if_statement(loc);
        }

        if self.match_token(TokenKind::While) {
            return self.parse_while_statement(loc);
        }

        if self.match_token(TokenKind::Return) {
            return self.parse_return_statement(loc);
        }

        if self.check(TokenKind::Id) {
            let id = self.expect_identifier()?;
            if self.check(TokenKind::LParen) {
                let call = self.parse_call_rest(id)?;
                self.expect(TokenKind::Semicolon)?;
                return Ok(Stmt::Call(call));
            }
            let target = self.parse_lvalue_after_id(id)?;
            return self.parse_lvalue_statement(target);
        }

        if self.check(TokenKind::At) || self.check(TokenKind::Carat) {
            let target = self.parse_lvalue()?;
            return self.parse_lvalue_statement(target);
        }

        Err(self.unexpected())
    }

    /// Parse the rest of a statement that starts with an lvalue
    fn parse_lvalue_statement(&mut self, target: LValue) -> Result<Stmt, SyntaxError> {
        let location = target.location();

        if self.match_token(TokenKind::Assign) {
            let source = self.parse_expression()?;
            self.expect(TokenKind::Semicolon)?;
            return Ok(Stmt::Assign(AssignExp {
                target,
                source: Box::new(source),
                location,
            }));
        }

        if self.match_token(TokenKind::CrossCross) {
            self.expect(TokenKind::Semicolon)?;
            return Ok(Stmt::PostIncrement { target, location });
        }

        if self.match_token(TokenKind::DashDash) {
            self.expect(TokenKind::Semicolon)?;
            return Ok(Stmt::PostDecrement { target, location });
        }

        Err(self.unexpected())
    }

    /// Parse return statement
    fn parse_return_statement(&mut self, loc: SourceLocation) -> Result<Stmt, SyntaxError> {
        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        self.expect(TokenKind::Semicolon)?;

        Ok(Stmt::Return {
            value,
            location: loc,
        })
    }

    /// Parse if statement, with or without an else arm
    fn parse_if_statement(&mut self, loc: SourceLocation) -> Result<Stmt, SyntaxError> {
        let condition = self.parse_condition()?;
        let then_body = self.parse_block()?;

        if self.match_token(TokenKind::Else) {
            let else_body = self.parse_block()?;
            return Ok(Stmt::IfElse {
                condition,
                then_body,
                else_body,
                location: loc,
            });
        }

        Ok(Stmt::If {
            condition,
            then_body,
            location: loc,
        })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self, loc: SourceLocation) -> Result<Stmt, SyntaxError> {
        let condition = self.parse_condition()?;
        let body = self.parse_block()?;

        Ok(Stmt::While {
            condition,
            body,
            location: loc,
        })
    }

    /// `'(' exp ')'` after `if` / `while`
    fn parse_condition(&mut self) -> Result<Expr, SyntaxError> {
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        Ok(condition)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::TokenKind;
    use crate::parser::parse::{parse_source, FrontendError, SyntaxError};

    fn body_of(source: &str) -> Vec<Stmt> {
        let program = parse_source(source).unwrap();
        match program.decls.into_iter().next() {
            Some(Decl::Fn(decl)) => decl.body,
            other => panic!("Expected function definition, got {:?}", other),
        }
    }

    fn errors_of(source: &str) -> Vec<SyntaxError> {
        match parse_source(source) {
            Err(FrontendError::Syntax(errors)) => errors,
            other => panic!("Expected syntax errors, got {:?}", other),
        }
    }

    #[test]
    fn test_simple_statements() {
        let body = body_of(
            "void main() { int x; x = 1; x++; x--; FROMCONSOLE x; TOCONSOLE x; f(); return; }",
        );

        assert_eq!(body.len(), 8);
        assert!(matches!(body[0], Stmt::VarDecl(_)));
        assert!(matches!(body[1], Stmt::Assign(_)));
        assert!(matches!(body[2], Stmt::PostIncrement { .. }));
        assert!(matches!(body[3], Stmt::PostDecrement { .. }));
        assert!(matches!(body[4], Stmt::Input { .. }));
        assert!(matches!(body[5], Stmt::Output { .. }));
        assert!(matches!(&body[6], Stmt::Call(call) if call.args.is_empty()));
        assert!(matches!(body[7], Stmt::Return { value: None, .. }));
    }

    #[test]
    fn test_lvalue_targets() {
        let body = body_of("void main() { @p = 1; a[2] = 3; ^q++; FROMCONSOLE a[0]; }");

        assert!(matches!(
            &body[0],
            Stmt::Assign(AssignExp { target: LValue::Dereference { .. }, .. })
        ));
        assert!(matches!(
            &body[1],
            Stmt::Assign(AssignExp { target: LValue::Index { .. }, .. })
        ));
        assert!(matches!(
            &body[2],
            Stmt::PostIncrement { target: LValue::AddressOf { .. }, .. }
        ));
        assert!(matches!(
            &body[3],
            Stmt::Input { target: LValue::Index { .. }, .. }
        ));
    }

    #[test]
    fn test_return_with_value() {
        let body = body_of("int main() { return 1 + 2; }");
        assert!(matches!(
            &body[0],
            Stmt::Return { value: Some(Expr::Binary { op: BinOp::Plus, .. }), .. }
        ));
    }

    #[test]
    fn test_if_else_and_while() {
        let body = body_of(
            "void main() { if (a) { x = 1; } else { x = 2; y = 3; } while (b) { } if (c) { } }",
        );

        match &body[0] {
            Stmt::IfElse {
                then_body,
                else_body,
                ..
            } => {
                assert_eq!(then_body.len(), 1);
                assert_eq!(else_body.len(), 2);
            }
            other => panic!("Expected if/else, got {:?}", other),
        }
        assert!(matches!(&body[1], Stmt::While { body, .. } if body.is_empty()));
        assert!(matches!(&body[2], Stmt::If { then_body, .. } if then_body.is_empty()));
    }

    #[test]
    fn test_dangling_else_binds_to_nearest_if() {
        let body = body_of("void main() { if (a) { } if (b) { } else { } }");

        assert_eq!(body.len(), 2);
        assert!(matches!(&body[0], Stmt::If { .. }));
        match &body[1] {
            Stmt::IfElse {
                condition: Expr::LValue(LValue::Id(id)),
                ..
            } => assert_eq!(id.name, "b"),
            other => panic!("Expected if/else on b, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_else_binds_to_inner_if() {
        let body = body_of("void main() { if (a) { if (b) { } else { } } }");

        match &body[0] {
            Stmt::If { then_body, .. } => {
                assert!(matches!(&then_body[0], Stmt::IfElse { .. }));
            }
            other => panic!("Expected if without else, got {:?}", other),
        }
    }

    #[test]
    fn test_statement_positions() {
        let body = body_of("void main() {\n  x = 1;\n  return;\n}");

        assert_eq!(body[0].location(), SourceLocation::new(2, 3));
        assert_eq!(body[1].location(), SourceLocation::new(3, 3));
    }

    #[test]
    fn test_two_missing_semicolons_yield_two_errors() {
        let errors = errors_of(
            "int main() {\n    int x\n    x = 1;\n    y = 2\n    return x;\n}\n",
        );

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].location, SourceLocation::new(3, 5));
        assert_eq!(errors[0].expected, vec![TokenKind::Semicolon]);
        assert_eq!(errors[1].location, SourceLocation::new(5, 5));
        assert!(errors[1].expected.contains(&TokenKind::Semicolon));
        assert!(errors[1].expected.contains(&TokenKind::Cross));
    }

    #[test]
    fn test_error_in_condition_skips_whole_block() {
        let errors = errors_of(
            "void main() {\n  if (x + ) {\n    y = 1;\n  }\n  z = ;\n}\nint ok;\n",
        );

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].location, SourceLocation::new(2, 11));
        assert_eq!(errors[1].location, SourceLocation::new(5, 7));
    }

    #[test]
    fn test_invalid_statement_start() {
        let errors = errors_of("void main() { else; x = 1; }");

        assert_eq!(errors.len(), 1);
        assert!(errors[0].expected.contains(&TokenKind::RCurly));
        assert!(errors[0].expected.contains(&TokenKind::If));
        assert!(errors[0].expected.contains(&TokenKind::Id));
    }
}
