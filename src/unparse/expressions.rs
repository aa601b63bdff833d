//! Rendering of expressions
//!
//! Binary and unary expressions are fully parenthesized so the rendered text
//! never depends on operator precedence. `and` / `or` are surrounded by
//! spaces; symbolic operators are not.

use super::Unparse;
use crate::parser::ast::*;
use std::fmt;

impl Unparse for Expr {
    fn unparse(&self, out: &mut dyn fmt::Write, _indent: usize) -> fmt::Result {
        match self {
            // No negative literal syntax
            Expr::IntLit(value, _) if *value < 0 => write!(out, "(-{})", value.unsigned_abs()),
            Expr::IntLit(value, _) => write!(out, "{}", value),
            Expr::StrLit(value, _) => {
                out.write_char('"')?;
                for ch in value.chars() {
                    write_escaped(out, ch, '"')?;
                }
                out.write_char('"')
            }
            Expr::CharLit(value, _) => {
                out.write_char('\'')?;
                write_escaped(out, *value, '\'')?;
                out.write_char('\'')
            }
            Expr::True(_) => out.write_str("true"),
            Expr::False(_) => out.write_str("false"),
            Expr::NullPtr(_) => out.write_str("NULLPTR"),
            Expr::Assign(assign) => assign.unparse(out, 0),
            Expr::Binary {
                op, left, right, ..
            } => {
                out.write_char('(')?;
                left.unparse(out, 0)?;
                op.unparse(out, 0)?;
                right.unparse(out, 0)?;
                out.write_char(')')
            }
            Expr::Unary { op, operand, .. } => {
                out.write_char('(')?;
                op.unparse(out, 0)?;
                operand.unparse(out, 0)?;
                out.write_char(')')
            }
            Expr::Call(call) => call.unparse(out, 0),
            Expr::LValue(lval) => lval.unparse(out, 0),
        }
    }
}

/// Write `ch` as it would appear inside a literal delimited by `quote`.
fn write_escaped(out: &mut dyn fmt::Write, ch: char, quote: char) -> fmt::Result {
    match ch {
        '\n' => out.write_str("\\n"),
        '\t' => out.write_str("\\t"),
        '\r' => out.write_str("\\r"),
        '\0' => out.write_str("\\0"),
        '\\' => out.write_str("\\\\"),
        c if c == quote => {
            out.write_char('\\')?;
            out.write_char(c)
        }
        c => out.write_char(c),
    }
}

impl Unparse for BinOp {
    fn unparse(&self, out: &mut dyn fmt::Write, _indent: usize) -> fmt::Result {
        let text = match self {
            BinOp::Plus => "+",
            BinOp::Minus => "-",
            BinOp::Times => "*",
            BinOp::Divide => "/",
            BinOp::And => " and ",
            BinOp::Or => " or ",
            BinOp::Equals => "==",
            BinOp::NotEquals => "!=",
            BinOp::Less => "<",
            BinOp::LessEq => "<=",
            BinOp::Greater => ">",
            BinOp::GreaterEq => ">=",
        };
        out.write_str(text)
    }
}

impl Unparse for UnOp {
    fn unparse(&self, out: &mut dyn fmt::Write, _indent: usize) -> fmt::Result {
        out.write_char(match self {
            UnOp::Negate => '-',
            UnOp::Not => '!',
        })
    }
}

impl Unparse for LValue {
    fn unparse(&self, out: &mut dyn fmt::Write, _indent: usize) -> fmt::Result {
        match self {
            LValue::Id(id) => out.write_str(&id.name),
            LValue::Dereference { base, .. } => write!(out, "@{}", base.name),
            LValue::AddressOf { base, .. } => write!(out, "^{}", base.name),
            LValue::Index { base, offset, .. } => {
                write!(out, "{}[", base.name)?;
                offset.unparse(out, 0)?;
                out.write_char(']')
            }
        }
    }
}

impl AssignExp {
    /// `target = source` without the enclosing parentheses, as used by
    /// assignment statements.
    pub(crate) fn unparse_bare(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        self.target.unparse(out, 0)?;
        out.write_str(" = ")?;
        self.source.unparse(out, 0)
    }
}

impl Unparse for AssignExp {
    /// An assignment used as a value is parenthesized.
    fn unparse(&self, out: &mut dyn fmt::Write, _indent: usize) -> fmt::Result {
        out.write_char('(')?;
        self.unparse_bare(out)?;
        out.write_char(')')
    }
}

impl Unparse for CallExp {
    fn unparse(&self, out: &mut dyn fmt::Write, _indent: usize) -> fmt::Result {
        write!(out, "{}(", self.callee.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                out.write_str(", ")?;
            }
            arg.unparse(out, 0)?;
        }
        out.write_char(')')
    }
}
