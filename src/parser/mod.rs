//! HoleyC source parser
//!
//! This module transforms HoleyC source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), error collection and recovery
//! - [`ast`]: AST node definitions
//!
//! # Language
//!
//! - Types: `int`, `char`, `bool`, `void` and the pointer types `intptr`,
//!   `charptr`, `boolptr`
//! - Declarations: global variables and function definitions
//! - Statements: local declarations, assignment, `++`/`--`, `FROMCONSOLE`,
//!   `TOCONSOLE`, `if`/`else`, `while`, `return`, calls
//! - Expressions: arithmetic, relational, `and`/`or`/`!`, `@` (dereference),
//!   `^` (address-of), indexing, calls, assignment
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
pub mod lexer;
pub mod parse;

mod declarations;
mod expressions;
mod statements;

pub use parse::{parse, parse_expression_source, parse_source, FrontendError, Parser, SyntaxError};
