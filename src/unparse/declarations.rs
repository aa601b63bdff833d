//! Rendering of programs, declarations, types and formals

use super::{do_indent, Unparse};
use crate::parser::ast::*;
use std::fmt;

impl Unparse for Program {
    fn unparse(&self, out: &mut dyn fmt::Write, indent: usize) -> fmt::Result {
        for decl in &self.decls {
            decl.unparse(out, indent)?;
        }
        Ok(())
    }
}

impl Unparse for Decl {
    fn unparse(&self, out: &mut dyn fmt::Write, indent: usize) -> fmt::Result {
        match self {
            Decl::Var(decl) => decl.unparse(out, indent),
            Decl::Fn(decl) => decl.unparse(out, indent),
        }
    }
}

impl Unparse for VarDecl {
    fn unparse(&self, out: &mut dyn fmt::Write, indent: usize) -> fmt::Result {
        do_indent(out, indent)?;
        self.var_type.unparse(out, 0)?;
        writeln!(out, " {};", self.name.name)
    }
}

impl Unparse for FnDecl {
    fn unparse(&self, out: &mut dyn fmt::Write, indent: usize) -> fmt::Result {
        do_indent(out, indent)?;
        self.return_type.unparse(out, 0)?;
        write!(out, " {}(", self.name.name)?;
        for (i, formal) in self.formals.iter().enumerate() {
            if i > 0 {
                out.write_str(", ")?;
            }
            formal.unparse(out, 0)?;
        }
        out.write_str(") ")?;
        self.body.unparse(out, indent)?;
        out.write_char('\n')
    }
}

impl Unparse for FormalDecl {
    fn unparse(&self, out: &mut dyn fmt::Write, _indent: usize) -> fmt::Result {
        self.param_type.unparse(out, 0)?;
        write!(out, " {}", self.name.name)
    }
}

impl Unparse for Type {
    /// `void` has no pointer spelling; its pointer flag is not rendered.
    fn unparse(&self, out: &mut dyn fmt::Write, _indent: usize) -> fmt::Result {
        let name = match (self.base, self.is_pointer) {
            (BaseType::Int, false) => "int",
            (BaseType::Int, true) => "intptr",
            (BaseType::Char, false) => "char",
            (BaseType::Char, true) => "charptr",
            (BaseType::Bool, false) => "bool",
            (BaseType::Bool, true) => "boolptr",
            (BaseType::Void, _) => "void",
        };
        out.write_str(name)
    }
}
