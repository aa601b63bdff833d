//! Rendering of statements
//!
//! Every statement starts on a fresh line at its indentation level and ends
//! with a newline. Simple statements end in `;`; compound statements end with
//! their closing brace.

use super::{do_indent, Unparse};
use crate::parser::ast::*;
use std::fmt;

impl Unparse for Stmt {
    fn unparse(&self, out: &mut dyn fmt::Write, indent: usize) -> fmt::Result {
        do_indent(out, indent)?;
        match self {
            Stmt::VarDecl(decl) => {
                decl.var_type.unparse(out, 0)?;
                write!(out, " {};", decl.name.name)?;
            }
            Stmt::Assign(assign) => {
                assign.unparse_bare(out)?;
                out.write_str(";")?;
            }
            Stmt::Call(call) => {
                call.unparse(out, 0)?;
                out.write_str(";")?;
            }
            Stmt::PostIncrement { target, .. } => {
                target.unparse(out, 0)?;
                out.write_str("++;")?;
            }
            Stmt::PostDecrement { target, .. } => {
                target.unparse(out, 0)?;
                out.write_str("--;")?;
            }
            Stmt::Input { target, .. } => {
                out.write_str("FROMCONSOLE ")?;
                target.unparse(out, 0)?;
                out.write_str(";")?;
            }
            Stmt::Output { value, .. } => {
                out.write_str("TOCONSOLE ")?;
                value.unparse(out, 0)?;
                out.write_str(";")?;
            }
            Stmt::If {
                condition,
                then_body,
                ..
            } => {
                unparse_condition(out, "if", condition)?;
                then_body.unparse(out, indent)?;
            }
            Stmt::IfElse {
                condition,
                then_body,
                else_body,
                ..
            } => {
                unparse_condition(out, "if", condition)?;
                then_body.unparse(out, indent)?;
                out.write_str(" else ")?;
                else_body.unparse(out, indent)?;
            }
            Stmt::While {
                condition, body, ..
            } => {
                unparse_condition(out, "while", condition)?;
                body.unparse(out, indent)?;
            }
            Stmt::Return { value: None, .. } => out.write_str("return;")?,
            Stmt::Return {
                value: Some(value), ..
            } => {
                out.write_str("return ")?;
                value.unparse(out, 0)?;
                out.write_str(";")?;
            }
        }
        out.write_char('\n')
    }
}

/// `keyword (exp) `, leaving the line open for the block
fn unparse_condition(out: &mut dyn fmt::Write, keyword: &str, condition: &Expr) -> fmt::Result {
    write!(out, "{} (", keyword)?;
    condition.unparse(out, 0)?;
    out.write_str(") ")
}
