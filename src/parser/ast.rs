//! AST (Abstract Syntax Tree) definitions for HoleyC
//!
//! The tree is purely syntactic: every node records where it started in the
//! source and owns its children outright. Nodes are built once by the parser
//! and never mutated afterwards.
//!
//! Node families are closed sum types ([`Decl`], [`Stmt`], [`Expr`],
//! [`LValue`]) so that every renderer has to handle every variant.

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    /// Position given to nodes that have no single originating token.
    pub const SYNTHETIC: SourceLocation = SourceLocation { line: 1, column: 1 };

    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.line, self.column)
    }
}

/// A name occurrence: variable, function, or parameter name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
    pub location: SourceLocation,
}

impl Identifier {
    pub fn new(name: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

/// Scalar types of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    Int,
    Char,
    Bool,
    Void,
}

/// A declared type. Pointer-to-scalar is its own surface type (`intptr`),
/// so it is a flag here rather than a nested type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub base: BaseType,
    pub is_pointer: bool,
    pub location: SourceLocation,
}

impl Type {
    pub fn new(base: BaseType, location: SourceLocation) -> Self {
        Type {
            base,
            is_pointer: false,
            location,
        }
    }

    pub fn pointer(base: BaseType, location: SourceLocation) -> Self {
        Type {
            base,
            is_pointer: true,
            location,
        }
    }
}

/// Variable declaration (global or local): `type name;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub var_type: Type,
    pub name: Identifier,
    pub location: SourceLocation,
}

/// Formal parameter of a function: `type name`
#[derive(Debug, Clone, PartialEq)]
pub struct FormalDecl {
    pub param_type: Type,
    pub name: Identifier,
    pub location: SourceLocation,
}

/// Function definition
#[derive(Debug, Clone, PartialEq)]
pub struct FnDecl {
    pub return_type: Type,
    pub name: Identifier,
    pub formals: Vec<FormalDecl>,
    pub body: Vec<Stmt>,
    pub location: SourceLocation,
}

/// Top-level declarations
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Var(VarDecl),
    Fn(FnDecl),
}

impl Decl {
    pub fn location(&self) -> SourceLocation {
        match self {
            Decl::Var(decl) => decl.location,
            Decl::Fn(decl) => decl.location,
        }
    }

    pub fn name(&self) -> &Identifier {
        match self {
            Decl::Var(decl) => &decl.name,
            Decl::Fn(decl) => &decl.name,
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Plus,
    Minus,
    Times,
    Divide,
    // Logical
    And,
    Or,
    // Relational
    Equals,
    NotEquals,
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Negate, // -x
    Not,    // !x
}

/// Expressions that name a storage location
#[derive(Debug, Clone, PartialEq)]
pub enum LValue {
    Id(Identifier),
    /// `@x`
    Dereference {
        base: Identifier,
        location: SourceLocation,
    },
    /// `x[offset]`
    Index {
        base: Identifier,
        offset: Box<Expr>,
        location: SourceLocation,
    },
    /// `^x`
    AddressOf {
        base: Identifier,
        location: SourceLocation,
    },
}

impl LValue {
    pub fn location(&self) -> SourceLocation {
        match self {
            LValue::Id(id) => id.location,
            LValue::Dereference { location, .. }
            | LValue::Index { location, .. }
            | LValue::AddressOf { location, .. } => *location,
        }
    }

    /// The identifier this lvalue is rooted at.
    pub fn base(&self) -> &Identifier {
        match self {
            LValue::Id(id) => id,
            LValue::Dereference { base, .. }
            | LValue::Index { base, .. }
            | LValue::AddressOf { base, .. } => base,
        }
    }
}

/// `target = source`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignExp {
    pub target: LValue,
    pub source: Box<Expr>,
    pub location: SourceLocation,
}

/// `callee(args...)`; `args` is empty, never absent, for `f()`
#[derive(Debug, Clone, PartialEq)]
pub struct CallExp {
    pub callee: Identifier,
    pub args: Vec<Expr>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Always non-negative when parsed: `-5` is `Negate(IntLit(5))`
    IntLit(i32, SourceLocation),
    StrLit(String, SourceLocation),
    CharLit(char, SourceLocation),
    True(SourceLocation),
    False(SourceLocation),
    NullPtr(SourceLocation),
    Assign(AssignExp),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
        location: SourceLocation,
    },
    Call(CallExp),
    LValue(LValue),
}

impl Expr {
    /// Get the source location of this expression
    pub fn location(&self) -> SourceLocation {
        match self {
            Expr::IntLit(_, loc)
            | Expr::StrLit(_, loc)
            | Expr::CharLit(_, loc)
            | Expr::True(loc)
            | Expr::False(loc)
            | Expr::NullPtr(loc) => *loc,
            Expr::Assign(assign) => assign.location,
            Expr::Binary { location, .. } | Expr::Unary { location, .. } => *location,
            Expr::Call(call) => call.location,
            Expr::LValue(lval) => lval.location(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDecl),
    Assign(AssignExp),
    Call(CallExp),
    PostIncrement {
        target: LValue,
        location: SourceLocation,
    },
    PostDecrement {
        target: LValue,
        location: SourceLocation,
    },
    /// `FROMCONSOLE lval;`
    Input {
        target: LValue,
        location: SourceLocation,
    },
    /// `TOCONSOLE exp;`
    Output {
        value: Expr,
        location: SourceLocation,
    },
    If {
        condition: Expr,
        then_body: Vec<Stmt>,
        location: SourceLocation,
    },
    IfElse {
        condition: Expr,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
        location: SourceLocation,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
        location: SourceLocation,
    },
    Return {
        value: Option<Expr>,
        location: SourceLocation,
    },
}

impl Stmt {
    /// Get the source location of this statement
    pub fn location(&self) -> SourceLocation {
        match self {
            Stmt::VarDecl(decl) => decl.location,
            Stmt::Assign(assign) => assign.location,
            Stmt::Call(call) => call.location,
            Stmt::PostIncrement { location, .. }
            | Stmt::PostDecrement { location, .. }
            | Stmt::Input { location, .. }
            | Stmt::Output { location, .. }
            | Stmt::If { location, .. }
            | Stmt::IfElse { location, .. }
            | Stmt::While { location, .. }
            | Stmt::Return { location, .. } => *location,
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub decls: Vec<Decl>, // Globals and functions, in source order
}

impl Program {
    pub fn new(decls: Vec<Decl>) -> Self {
        Program { decls }
    }

    /// The program root has no token of its own.
    pub fn location(&self) -> SourceLocation {
        SourceLocation::SYNTHETIC
    }
}
