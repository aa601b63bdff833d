//! # Introduction
//!
//! `holeyc` is the front end of a compiler for HoleyC, a small C-like
//! teaching language. It turns source text into an abstract syntax tree and
//! renders any tree back out as canonical source.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Unparser → Source
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds an AST, reporting every
//!    syntax error it can recover from in one pass.
//! 2. [`unparse`]: renders AST nodes as fully parenthesized, tab-indented
//!    source, and dumps them as position-free terms for comparison.
//!
//! ## Example
//!
//! ```
//! use holeyc::{parse_source, render};
//!
//! let program = parse_source("int main() { return 1 + 2 * 3; }").unwrap();
//! assert_eq!(render(&program, 0), "int main() {\n\treturn (1+(2*3));\n}\n");
//! ```
//!
//! Rendering and re-parsing gives a structurally equal tree, and rendering
//! that tree again gives the same text.

pub mod parser;
pub mod unparse;

pub use parser::ast::Program;
pub use parser::{parse, parse_source, FrontendError, SyntaxError};
pub use unparse::tree::dump;
pub use unparse::{render, Unparse};
