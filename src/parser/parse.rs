//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, panic-mode recovery and the public
//! entry points.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, error collection and recovery
//! - `declarations`: program, global/function declarations, types, formals
//! - `statements`: statements and statement blocks
//! - `expressions`: expressions with precedence climbing
//!
//! # Error reporting
//!
//! Every kind the parser tests the lookahead against is remembered until the
//! lookahead is consumed. When a production fails, that set is exactly the
//! set of tokens that would have let the parse continue, and it is reported
//! together with the offending token.
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind, TokenSource, TokenValue};
use std::fmt;
use tracing::debug;

/// A token sequence that cannot be derived from the grammar.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    pub location: SourceLocation,
    /// Description of the offending token
    pub found: String,
    /// Token kinds that would have been accepted, in the order they were tried
    pub expected: Vec<TokenKind>,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "syntax error at {}: unexpected {}", self.location, self.found)?;
        match self.expected.as_slice() {
            [] => Ok(()),
            [only] => write!(f, ", expected {}", only),
            kinds => {
                write!(f, ", expected one of ")?;
                for (i, kind) in kinds.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", kind)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for SyntaxError {}

/// Anything that stops source text from becoming a [`Program`].
#[derive(Debug, Clone, PartialEq)]
pub enum FrontendError {
    Lex(LexError),
    Syntax(Vec<SyntaxError>),
}

impl fmt::Display for FrontendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrontendError::Lex(err) => write!(f, "{}", err),
            FrontendError::Syntax(errors) => {
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for FrontendError {}

impl From<LexError> for FrontendError {
    fn from(err: LexError) -> Self {
        FrontendError::Lex(err)
    }
}

impl From<Vec<SyntaxError>> for FrontendError {
    fn from(errors: Vec<SyntaxError>) -> Self {
        FrontendError::Syntax(errors)
    }
}

/// Deepest nesting of blocks and expressions the parser accepts.
///
/// Reaching it aborts the parse with a syntax error rather than letting
/// recursion exhaust the stack.
pub const MAX_DEPTH: usize = 256;

/// Where the parser is when it has to resynchronize after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Boundary {
    /// Between top-level declarations
    Declaration,
    /// Between statements of a body
    Statement,
}

/// Recursive descent parser for HoleyC
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    /// Kinds tested against the current lookahead since it became current
    expected: Vec<TokenKind>,
    errors: Vec<SyntaxError>,
    /// Set once recovery runs off the end of the input or nesting is too deep
    aborted: bool,
    /// Blocks and expressions currently open
    depth: usize,
}

impl Parser {
    /// Create a parser over an already-lexed token sequence.
    ///
    /// A trailing [`TokenKind::Eof`] is added if the sequence lacks one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let location = tokens
                .last()
                .map(|t| t.location)
                .unwrap_or(SourceLocation::SYNTHETIC);
            tokens.push(Token::new(TokenKind::Eof, location));
        }

        Self {
            tokens,
            position: 0,
            expected: Vec::new(),
            errors: Vec::new(),
            aborted: false,
            depth: 0,
        }
    }

    /// Drain a token source up to and including its end-of-input token.
    pub fn from_token_source<S: TokenSource>(source: &mut S) -> Result<Self, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = source.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        Ok(Self::new(tokens))
    }

    /// Lex `source` and create a parser over the result.
    pub fn from_source(source: &str) -> Result<Self, LexError> {
        Self::from_token_source(&mut Lexer::new(source))
    }

    /// Parse the entire program (top-level declarations).
    ///
    /// Returns every syntax error found in this pass if there was at least one.
    pub fn parse_program(&mut self) -> Result<Program, Vec<SyntaxError>> {
        let mut decls = Vec::new();

        while !self.is_at_end() && !self.aborted {
            let start = self.position;
            match self.parse_declaration() {
                Ok(decl) => decls.push(decl),
                Err(err) => {
                    self.report(err);
                    self.synchronize(start, Boundary::Declaration);
                }
            }
        }

        if self.errors.is_empty() {
            Ok(Program::new(decls))
        } else {
            Err(std::mem::take(&mut self.errors))
        }
    }

    /// Parse a single expression spanning the whole token sequence.
    pub fn parse_standalone_expression(&mut self) -> Result<Expr, SyntaxError> {
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Eof)?;
        Ok(expr)
    }

    // ===== Error collection and recovery =====

    pub(crate) fn report(&mut self, err: SyntaxError) {
        if self.aborted {
            return;
        }
        debug!(
            line = err.location.line,
            column = err.location.column,
            found = %err.found,
            "syntax error"
        );
        self.errors.push(err);
    }

    pub(crate) fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Panic-mode recovery: discard tokens until a synchronizing point.
    ///
    /// `start` is the position the failed production began at; at least one
    /// token is discarded if nothing was consumed since then. Braces are
    /// tracked so that a block inside the discarded region is skipped whole.
    pub(crate) fn synchronize(&mut self, start: usize, boundary: Boundary) {
        if self.aborted {
            return;
        }
        if self.position == start && !self.is_at_end() {
            self.advance();
        }

        let skipped_from = self.position;
        let mut depth = 0usize;

        loop {
            let kind = self.peek().kind;

            if kind == TokenKind::Eof {
                debug!("end of input reached while recovering; giving up");
                self.aborted = true;
                return;
            }

            if depth == 0 {
                match (kind, boundary) {
                    (TokenKind::Semicolon, _) => {
                        self.advance();
                        break;
                    }
                    (TokenKind::RCurly, Boundary::Statement) => break,
                    (TokenKind::RCurly, Boundary::Declaration) => {
                        self.advance();
                        break;
                    }
                    (kind, Boundary::Statement) if Self::starts_statement(kind) => break,
                    (kind, Boundary::Declaration) if kind.is_type() => break,
                    _ => {}
                }
            }

            match kind {
                TokenKind::LCurly => depth += 1,
                TokenKind::RCurly => {
                    depth -= 1;
                    if depth == 0 {
                        self.advance();
                        break;
                    }
                }
                _ => {}
            }
            self.advance();
        }

        let resume = self.current_location();
        debug!(
            discarded = self.position - skipped_from,
            line = resume.line,
            column = resume.column,
            "resynchronized"
        );
    }

    /// Run `parse` one nesting level deeper, aborting at [`MAX_DEPTH`].
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<T, SyntaxError> {
        if self.depth >= MAX_DEPTH {
            let err = SyntaxError {
                location: self.current_location(),
                found: format!("{} nested more than {} levels deep", self.peek(), MAX_DEPTH),
                expected: Vec::new(),
            };
            self.report(err.clone());
            debug!("nesting limit reached; giving up");
            self.aborted = true;
            return Err(err);
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Keyword tokens that can only begin a statement
    fn starts_statement(kind: TokenKind) -> bool {
        kind.is_type()
            || matches!(
                kind,
                TokenKind::If
                    | TokenKind::While
                    | TokenKind::Return
                    | TokenKind::FromConsole
                    | TokenKind::ToConsole
            )
    }

    // ===== Helper methods =====

    /// Build an error describing the current lookahead.
    pub(crate) fn unexpected(&self) -> SyntaxError {
        SyntaxError {
            location: self.current_location(),
            found: self.peek().to_string(),
            expected: self.expected.clone(),
        }
    }

    pub(crate) fn check(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            true
        } else {
            if !self.expected.contains(&kind) {
                self.expected.push(kind);
            }
            false
        }
    }

    pub(crate) fn check_type_keyword(&mut self) -> bool {
        let mut found = false;
        for kind in TokenKind::TYPES {
            found |= self.check(kind);
        }
        found
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
            self.expected.clear();
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn previous_location(&self) -> SourceLocation {
        self.previous().location()
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }

    /// Consume a token of `kind` or fail with the current expected set.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<SourceLocation, SyntaxError> {
        if self.match_token(kind) {
            Ok(self.previous_location())
        } else {
            Err(self.unexpected())
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<Identifier, SyntaxError> {
        if !self.check(TokenKind::Id) {
            return Err(self.unexpected());
        }
        let token = self.advance().clone();
        match token.value {
            Some(TokenValue::Str(name)) => Ok(Identifier::new(name, token.location)),
            _ => Err(Self::malformed(&token)),
        }
    }

    /// Error for a name or literal token that arrived without its value.
    pub(crate) fn malformed(token: &Token) -> SyntaxError {
        SyntaxError {
            location: token.location,
            found: format!("{} without a value", token.kind),
            expected: Vec::new(),
        }
    }
}

/// Parse a token sequence into a [`Program`], collecting every syntax error.
pub fn parse(tokens: Vec<Token>) -> Result<Program, Vec<SyntaxError>> {
    Parser::new(tokens).parse_program()
}

/// Lex and parse HoleyC source text.
pub fn parse_source(source: &str) -> Result<Program, FrontendError> {
    let mut parser = Parser::from_source(source)?;
    Ok(parser.parse_program()?)
}

/// Lex and parse a single expression.
pub fn parse_expression_source(source: &str) -> Result<Expr, FrontendError> {
    let mut parser = Parser::from_source(source)?;
    parser
        .parse_standalone_expression()
        .map_err(|err| FrontendError::Syntax(vec![err]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_function() {
        let program = parse_source("int main() { return 0; }").unwrap();

        assert_eq!(program.decls.len(), 1);
        match &program.decls[0] {
            Decl::Fn(FnDecl {
                name,
                formals,
                return_type,
                body,
                ..
            }) => {
                assert_eq!(name.name, "main");
                assert!(formals.is_empty());
                assert_eq!(return_type.base, BaseType::Int);
                assert_eq!(body.len(), 1);
            }
            _ => panic!("Expected function definition"),
        }
    }

    #[test]
    fn test_parse_empty_program() {
        let program = parse_source("  // nothing here\n").unwrap();
        assert!(program.decls.is_empty());
        assert_eq!(program.location(), SourceLocation::SYNTHETIC);
    }

    #[test]
    fn test_missing_eof_is_added() {
        let mut tokens = Lexer::new("int x;").tokenize().unwrap();
        tokens.pop();
        let program = parse(tokens).unwrap();
        assert_eq!(program.decls.len(), 1);
    }

    #[test]
    fn test_expected_set_is_reported() {
        let errors = match parse_source("int x int y;") {
            Err(FrontendError::Syntax(errors)) => errors,
            other => panic!("Expected syntax errors, got {:?}", other),
        };

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].location, SourceLocation::new(1, 7));
        assert_eq!(errors[0].found, "'int'");
        assert_eq!(
            errors[0].expected,
            vec![TokenKind::LParen, TokenKind::Semicolon]
        );
        assert_eq!(
            errors[0].to_string(),
            "syntax error at [1,7]: unexpected 'int', expected one of '(', ';'"
        );
    }

    #[test]
    fn test_recovery_reaching_eof_aborts() {
        let errors = match parse_source("int f() { x = 1 ") {
            Err(FrontendError::Syntax(errors)) => errors,
            other => panic!("Expected syntax errors, got {:?}", other),
        };

        // The missing '}' is not reported once recovery has given up.
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].location, SourceLocation::new(1, 17));
        assert_eq!(errors[0].found, "end of file");
    }

    #[test]
    fn test_stray_tokens_at_top_level() {
        let errors = match parse_source("} ; int x; 5 int y;") {
            Err(FrontendError::Syntax(errors)) => errors,
            other => panic!("Expected syntax errors, got {:?}", other),
        };

        // The ';' after the stray '}' is swallowed by the first recovery.
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].location, SourceLocation::new(1, 1));
        assert_eq!(errors[1].location, SourceLocation::new(1, 12));
    }

    fn deep_parens(levels: usize) -> String {
        format!(
            "int f() {{ return {}1{}; }}",
            "(".repeat(levels),
            ")".repeat(levels)
        )
    }

    #[test]
    fn test_nesting_below_limit_parses() {
        let program = parse_source(&deep_parens(200)).unwrap();
        assert_eq!(program.decls.len(), 1);
    }

    #[test]
    fn test_too_deep_parentheses_abort() {
        let errors = match parse_source(&deep_parens(100_000)) {
            Err(FrontendError::Syntax(errors)) => errors,
            other => panic!("Expected syntax errors, got {:?}", other),
        };

        // One level is taken by the function body
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].location, SourceLocation::new(1, 17 + MAX_DEPTH));
        assert!(errors[0].found.contains("nested more than 256 levels deep"));
    }

    #[test]
    fn test_too_deep_unary_and_blocks_abort() {
        let unary = format!("int f() {{ return {}x; }}", "!".repeat(100_000));
        assert!(matches!(parse_source(&unary), Err(FrontendError::Syntax(_))));

        let blocks = format!(
            "void f() {{ {}{} }} int ok;",
            "while (x) { ".repeat(100_000),
            "}".repeat(100_000)
        );
        assert!(matches!(parse_source(&blocks), Err(FrontendError::Syntax(_))));

        let expr = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        assert!(parse_expression_source(&expr).is_err());
    }

    #[test]
    fn test_lex_error_surfaces() {
        assert!(matches!(
            parse_source("int x = $;"),
            Err(FrontendError::Lex(_))
        ));
    }
}
