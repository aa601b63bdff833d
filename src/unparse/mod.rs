//! Canonical source rendering of the AST
//!
//! Every node can write itself back out as HoleyC text. The rendering is not
//! the original source: comments and layout are gone, binary and unary
//! expressions are fully parenthesized, and blocks are re-indented with one
//! tab per nesting level. Parsing the rendering again gives a tree with the
//! same shape, literals and child order, and rendering that tree gives the
//! same text.
//!
//! - [`declarations`]: programs, declarations, types, formals
//! - [`statements`]: statements and blocks
//! - [`expressions`]: expressions, lvalues, literal escaping
//! - [`tree`]: position-free structural dump used to compare trees
//!
//! Indentation is a statement-level concept: expressions are always rendered
//! at level 0 and ignore the level they are given.
//!
//! Rendering and dumping recurse once per nesting level. Trees produced by
//! the parser are never deeper than
//! [`MAX_DEPTH`](crate::parser::parse::MAX_DEPTH); hand-built trees carry no
//! such bound.

mod declarations;
mod expressions;
mod statements;
pub mod tree;

use crate::parser::ast::*;
use std::fmt;

/// A node that can render itself as source text.
pub trait Unparse {
    /// Write this node to `out`, starting lines at `indent` levels.
    fn unparse(&self, out: &mut dyn fmt::Write, indent: usize) -> fmt::Result;
}

/// Write `indent` indentation units.
pub(crate) fn do_indent(out: &mut dyn fmt::Write, indent: usize) -> fmt::Result {
    for _ in 0..indent {
        out.write_char('\t')?;
    }
    Ok(())
}

/// Adapter that renders a node through [`fmt::Display`].
struct Rendered<'a, N: ?Sized> {
    node: &'a N,
    indent: usize,
}

impl<N: Unparse + ?Sized> fmt::Display for Rendered<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node.unparse(f, self.indent)
    }
}

/// Render `node` as source text at the given indentation level.
///
/// `render(&program, 0)` is the whole-program rendering.
pub fn render<N: Unparse + ?Sized>(node: &N, indent: usize) -> String {
    Rendered { node, indent }.to_string()
}

macro_rules! display_via_unparse {
    ($($node:ty),* $(,)?) => {
        $(
            impl fmt::Display for $node {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    self.unparse(f, 0)
                }
            }
        )*
    };
}

display_via_unparse!(
    Program, Decl, VarDecl, FnDecl, FormalDecl, Type, Stmt, Expr, LValue, AssignExp, CallExp,
    BinOp, UnOp,
);

impl Unparse for [Stmt] {
    /// Render a statement list as a braced block.
    ///
    /// The opening brace continues the current line; the closing brace is
    /// indented to `indent` and ends its line.
    fn unparse(&self, out: &mut dyn fmt::Write, indent: usize) -> fmt::Result {
        out.write_str("{\n")?;
        for stmt in self {
            stmt.unparse(out, indent + 1)?;
        }
        do_indent(out, indent)?;
        out.write_str("}")
    }
}
