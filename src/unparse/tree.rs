//! Position-free structural dump
//!
//! Renders a node as a nested term such as
//! `Plus(IntLit(1), Times(IntLit(2), IntLit(3)))`. Positions are left out, so
//! two trees are structurally equal exactly when their dumps are equal; this
//! is how round trips through [`render`](super::render) are checked.

use super::Unparse;
use crate::parser::ast::*;
use std::fmt::{self, Write};

/// A node with a structural dump.
pub trait Tree {
    fn write_tree(&self, out: &mut dyn Write) -> fmt::Result;
}

struct Dumped<'a, N: ?Sized>(&'a N);

impl<N: Tree + ?Sized> fmt::Display for Dumped<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_tree(f)
    }
}

/// Dump `node` as a single-line term.
pub fn dump<N: Tree + ?Sized>(node: &N) -> String {
    Dumped(node).to_string()
}

/// `[a, b, c]`
fn write_list<T: Tree>(out: &mut dyn Write, items: &[T]) -> fmt::Result {
    out.write_char('[')?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        item.write_tree(out)?;
    }
    out.write_char(']')
}

impl Tree for Program {
    fn write_tree(&self, out: &mut dyn Write) -> fmt::Result {
        out.write_str("Program(")?;
        for (i, decl) in self.decls.iter().enumerate() {
            if i > 0 {
                out.write_str(", ")?;
            }
            decl.write_tree(out)?;
        }
        out.write_char(')')
    }
}

impl Tree for Decl {
    fn write_tree(&self, out: &mut dyn Write) -> fmt::Result {
        match self {
            Decl::Var(decl) => decl.write_tree(out),
            Decl::Fn(decl) => decl.write_tree(out),
        }
    }
}

impl Tree for Type {
    fn write_tree(&self, out: &mut dyn Write) -> fmt::Result {
        self.unparse(out, 0)
    }
}

impl Tree for VarDecl {
    fn write_tree(&self, out: &mut dyn Write) -> fmt::Result {
        out.write_str("VarDecl(")?;
        self.var_type.write_tree(out)?;
        write!(out, ", {})", self.name.name)
    }
}

impl Tree for FormalDecl {
    fn write_tree(&self, out: &mut dyn Write) -> fmt::Result {
        out.write_str("FormalDecl(")?;
        self.param_type.write_tree(out)?;
        write!(out, ", {})", self.name.name)
    }
}

impl Tree for FnDecl {
    fn write_tree(&self, out: &mut dyn Write) -> fmt::Result {
        out.write_str("FnDecl(")?;
        self.return_type.write_tree(out)?;
        write!(out, ", {}, ", self.name.name)?;
        write_list(out, &self.formals)?;
        out.write_str(", ")?;
        write_list(out, &self.body)?;
        out.write_char(')')
    }
}

impl Tree for Stmt {
    fn write_tree(&self, out: &mut dyn Write) -> fmt::Result {
        match self {
            Stmt::VarDecl(decl) => {
                out.write_str("VarDeclStmt(")?;
                decl.write_tree(out)?;
            }
            Stmt::Assign(assign) => {
                out.write_str("AssignStmt(")?;
                assign.write_tree(out)?;
            }
            Stmt::Call(call) => {
                out.write_str("CallStmt(")?;
                call.write_tree(out)?;
            }
            Stmt::PostIncrement { target, .. } => {
                out.write_str("PostIncrement(")?;
                target.write_tree(out)?;
            }
            Stmt::PostDecrement { target, .. } => {
                out.write_str("PostDecrement(")?;
                target.write_tree(out)?;
            }
            Stmt::Input { target, .. } => {
                out.write_str("Input(")?;
                target.write_tree(out)?;
            }
            Stmt::Output { value, .. } => {
                out.write_str("Output(")?;
                value.write_tree(out)?;
            }
            Stmt::If {
                condition,
                then_body,
                ..
            } => {
                out.write_str("If(")?;
                condition.write_tree(out)?;
                out.write_str(", ")?;
                write_list(out, then_body)?;
            }
            Stmt::IfElse {
                condition,
                then_body,
                else_body,
                ..
            } => {
                out.write_str("IfElse(")?;
                condition.write_tree(out)?;
                out.write_str(", ")?;
                write_list(out, then_body)?;
                out.write_str(", ")?;
                write_list(out, else_body)?;
            }
            Stmt::While {
                condition, body, ..
            } => {
                out.write_str("While(")?;
                condition.write_tree(out)?;
                out.write_str(", ")?;
                write_list(out, body)?;
            }
            Stmt::Return { value: None, .. } => return out.write_str("Return"),
            Stmt::Return {
                value: Some(value), ..
            } => {
                out.write_str("Return(")?;
                value.write_tree(out)?;
            }
        }
        out.write_char(')')
    }
}

impl Tree for AssignExp {
    fn write_tree(&self, out: &mut dyn Write) -> fmt::Result {
        out.write_str("Assign(")?;
        self.target.write_tree(out)?;
        out.write_str(", ")?;
        self.source.write_tree(out)?;
        out.write_char(')')
    }
}

impl Tree for CallExp {
    fn write_tree(&self, out: &mut dyn Write) -> fmt::Result {
        write!(out, "Call({}, ", self.callee.name)?;
        write_list(out, &self.args)?;
        out.write_char(')')
    }
}

impl Tree for LValue {
    fn write_tree(&self, out: &mut dyn Write) -> fmt::Result {
        match self {
            LValue::Id(id) => write!(out, "Id({})", id.name),
            LValue::Dereference { base, .. } => write!(out, "Dereference({})", base.name),
            LValue::AddressOf { base, .. } => write!(out, "AddressOf({})", base.name),
            LValue::Index { base, offset, .. } => {
                write!(out, "Index({}, ", base.name)?;
                offset.write_tree(out)?;
                out.write_char(')')
            }
        }
    }
}

impl Tree for Expr {
    fn write_tree(&self, out: &mut dyn Write) -> fmt::Result {
        match self {
            Expr::IntLit(value, _) => write!(out, "IntLit({})", value),
            Expr::StrLit(value, _) => write!(out, "StrLit({:?})", value),
            Expr::CharLit(value, _) => write!(out, "CharLit({:?})", value),
            Expr::True(_) => out.write_str("True"),
            Expr::False(_) => out.write_str("False"),
            Expr::NullPtr(_) => out.write_str("NullPtr"),
            Expr::Assign(assign) => assign.write_tree(out),
            Expr::Binary {
                op, left, right, ..
            } => {
                write!(out, "{:?}(", op)?;
                left.write_tree(out)?;
                out.write_str(", ")?;
                right.write_tree(out)?;
                out.write_char(')')
            }
            Expr::Unary { op, operand, .. } => {
                write!(out, "{:?}(", op)?;
                operand.write_tree(out)?;
                out.write_char(')')
            }
            Expr::Call(call) => call.write_tree(out),
            Expr::LValue(lval) => lval.write_tree(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::dump;
    use crate::parser::parse::{parse_expression_source, parse_source};

    #[test]
    fn test_dump_precedence() {
        let expr = parse_expression_source("1 + 2 * 3").unwrap();
        assert_eq!(dump(&expr), "Plus(IntLit(1), Times(IntLit(2), IntLit(3)))");
    }

    #[test]
    fn test_dump_program() {
        let program =
            parse_source("intptr p; int f(int a) { return; } void main() { }").unwrap();
        assert_eq!(
            dump(&program),
            "Program(VarDecl(intptr, p), FnDecl(int, f, [FormalDecl(int, a)], [Return]), \
             FnDecl(void, main, [], []))"
        );
    }

    #[test]
    fn test_dump_statements() {
        let program = parse_source(
            "void main() { x = f(1); f(); if (!a) { TOCONSOLE 'c'; } else { FROMCONSOLE @p; } }",
        )
        .unwrap();
        assert_eq!(
            dump(&program),
            "Program(FnDecl(void, main, [], [\
             AssignStmt(Assign(Id(x), Call(f, [IntLit(1)]))), \
             CallStmt(Call(f, [])), \
             IfElse(Not(Id(a)), [Output(CharLit('c'))], [Input(Dereference(p))])]))"
        );
    }

    #[test]
    fn test_dump_ignores_positions() {
        let a = parse_source("int main() { return a[1] - \"s\"; }").unwrap();
        let b = parse_source("int main()\n{\n    return a [ 1 ]-\"s\" ;\n}").unwrap();
        assert_ne!(a, b);
        assert_eq!(dump(&a), dump(&b));
    }
}
