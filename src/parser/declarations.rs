//! Declaration parsing implementation
//!
//! This module handles the declaration-level productions:
//!
//! - Global variables: `type name;`
//! - Function definitions: `type name(formals) { body }`
//! - Types: `int`, `intptr`, `char`, `charptr`, `bool`, `boolptr`, `void`
//! - Formal parameter lists
//!
//! # Grammar
//!
//! ```text
//! decl    ::= varDecl ';' | fnDecl
//! varDecl ::= type ID
//! fnDecl  ::= type ID '(' formals ')' '{' stmt* '}'
//! formals ::= ε | formal (',' formal)*
//! formal  ::= type ID
//! ```
//!
//! Both declaration forms begin with `type ID`, so the choice is made on the
//! token after the name.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Parser, SyntaxError};

impl Parser {
    /// Parse a top-level declaration (global variable or function definition)
    pub(crate) fn parse_declaration(&mut self) -> Result<Decl, SyntaxError> {
        let decl_type = self.parse_type()?;
        let name = self.expect_identifier()?;

        if self.check(TokenKind::LParen) {
            return Ok(Decl::Fn(self.parse_function_rest(decl_type, name)?));
        }

        self.expect(TokenKind::Semicolon)?;
        let location = decl_type.location;
        Ok(Decl::Var(VarDecl {
            var_type: decl_type,
            name,
            location,
        }))
    }

    /// Parse `'(' formals ')' '{' stmt* '}'` after a function's name
    fn parse_function_rest(
        &mut self,
        return_type: Type,
        name: Identifier,
    ) -> Result<FnDecl, SyntaxError> {
        self.expect(TokenKind::LParen)?;
        let formals = self.parse_formals()?;
        self.expect(TokenKind::RParen)?;

        let body = self.parse_block()?;

        let location = return_type.location;
        Ok(FnDecl {
            return_type,
            name,
            formals,
            body,
            location,
        })
    }

    /// Parse formal parameter list (without the parentheses)
    fn parse_formals(&mut self) -> Result<Vec<FormalDecl>, SyntaxError> {
        let mut formals = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(formals);
        }

        loop {
            let param_type = self.parse_type()?;
            let name = self.expect_identifier()?;
            let location = param_type.location;
            formals.push(FormalDecl {
                param_type,
                name,
                location,
            });

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(formals)
    }

    /// Parse a type keyword
    pub(crate) fn parse_type(&mut self) -> Result<Type, SyntaxError> {
        let location = self.current_location();
        let ty = match self.peek_kind() {
            TokenKind::Int => Type::new(BaseType::Int, location),
            TokenKind::IntPtr => Type::pointer(BaseType::Int, location),
            TokenKind::Char => Type::new(BaseType::Char, location),
            TokenKind::CharPtr => Type::pointer(BaseType::Char, location),
            TokenKind::Bool => Type::new(BaseType::Bool, location),
            TokenKind::BoolPtr => Type::pointer(BaseType::Bool, location),
            TokenKind::Void => Type::new(BaseType::Void, location),
            _ => {
                self.check_type_keyword();
                return Err(self.unexpected());
            }
        };

        self.advance();
        Ok(ty)
    }
}
