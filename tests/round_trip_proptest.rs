//! Property-based tests for rendering
//!
//! Trees are generated directly, rendered, and parsed back:
//! - the reparsed tree has the same structure as the generated one
//! - rendering the reparsed tree gives the same text again

use holeyc::parser::ast::*;
use holeyc::parser::parse_expression_source;
use holeyc::{dump, parse_source, render};
use proptest::prelude::*;

fn loc() -> SourceLocation {
    SourceLocation::SYNTHETIC
}

/// Generated names never collide with keywords
fn ident() -> impl Strategy<Value = Identifier> {
    "x_[a-z0-9_]{0,4}".prop_map(|name| Identifier::new(name, loc()))
}

fn value_type() -> impl Strategy<Value = Type> {
    (
        prop::sample::select(vec![BaseType::Int, BaseType::Char, BaseType::Bool]),
        any::<bool>(),
    )
        .prop_map(|(base, is_pointer)| Type {
            base,
            is_pointer,
            location: loc(),
        })
}

fn any_type() -> impl Strategy<Value = Type> {
    prop_oneof![
        4 => value_type(),
        1 => Just(Type::new(BaseType::Void, loc())),
    ]
}

fn char_value() -> impl Strategy<Value = char> {
    prop::sample::select(vec!['a', 'Z', '0', ' ', '\'', '"', '\\', '\n', '\t', '\r', '\0'])
}

fn literal() -> BoxedStrategy<Expr> {
    prop_oneof![
        (0..=i32::MAX).prop_map(|n| Expr::IntLit(n, loc())),
        "[a-zA-Z0-9 \"'\\\\\t\n]{0,8}".prop_map(|s| Expr::StrLit(s, loc())),
        char_value().prop_map(|c| Expr::CharLit(c, loc())),
        Just(Expr::True(loc())),
        Just(Expr::False(loc())),
        Just(Expr::NullPtr(loc())),
    ]
    .boxed()
}

fn simple_lvalue() -> BoxedStrategy<LValue> {
    prop_oneof![
        ident().prop_map(LValue::Id),
        ident().prop_map(|base| LValue::Dereference {
            base,
            location: loc()
        }),
        ident().prop_map(|base| LValue::AddressOf {
            base,
            location: loc()
        }),
    ]
    .boxed()
}

fn lvalue(expr: BoxedStrategy<Expr>) -> BoxedStrategy<LValue> {
    prop_oneof![
        3 => simple_lvalue(),
        1 => (ident(), expr).prop_map(|(base, offset)| LValue::Index {
            base,
            offset: Box::new(offset),
            location: loc(),
        }),
    ]
    .boxed()
}

fn call(expr: BoxedStrategy<Expr>) -> impl Strategy<Value = CallExp> {
    (ident(), prop::collection::vec(expr, 0..3)).prop_map(|(callee, args)| CallExp {
        callee,
        args,
        location: loc(),
    })
}

fn assign(expr: BoxedStrategy<Expr>) -> impl Strategy<Value = AssignExp> {
    (lvalue(expr.clone()), expr).prop_map(|(target, source)| AssignExp {
        target,
        source: Box::new(source),
        location: loc(),
    })
}

fn expr() -> BoxedStrategy<Expr> {
    let leaf = prop_oneof![literal(), simple_lvalue().prop_map(Expr::LValue)];

    leaf.prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            (
                prop::sample::select(vec![
                    BinOp::Plus,
                    BinOp::Minus,
                    BinOp::Times,
                    BinOp::Divide,
                    BinOp::And,
                    BinOp::Or,
                    BinOp::Equals,
                    BinOp::NotEquals,
                    BinOp::Less,
                    BinOp::LessEq,
                    BinOp::Greater,
                    BinOp::GreaterEq,
                ]),
                inner.clone(),
                inner.clone(),
            )
                .prop_map(|(op, left, right)| Expr::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                    location: loc(),
                }),
            (
                prop::sample::select(vec![UnOp::Negate, UnOp::Not]),
                inner.clone()
            )
                .prop_map(|(op, operand)| Expr::Unary {
                    op,
                    operand: Box::new(operand),
                    location: loc(),
                }),
            lvalue(inner.clone()).prop_map(Expr::LValue),
            call(inner.clone()).prop_map(Expr::Call),
            assign(inner).prop_map(Expr::Assign),
        ]
    })
    .boxed()
}

fn var_decl() -> impl Strategy<Value = VarDecl> {
    (any_type(), ident()).prop_map(|(var_type, name)| VarDecl {
        var_type,
        name,
        location: loc(),
    })
}

fn stmt() -> BoxedStrategy<Stmt> {
    let leaf = prop_oneof![
        var_decl().prop_map(Stmt::VarDecl),
        assign(expr()).prop_map(Stmt::Assign),
        call(expr()).prop_map(Stmt::Call),
        lvalue(expr()).prop_map(|target| Stmt::PostIncrement {
            target,
            location: loc()
        }),
        lvalue(expr()).prop_map(|target| Stmt::PostDecrement {
            target,
            location: loc()
        }),
        lvalue(expr()).prop_map(|target| Stmt::Input {
            target,
            location: loc()
        }),
        expr().prop_map(|value| Stmt::Output {
            value,
            location: loc()
        }),
        prop::option::of(expr()).prop_map(|value| Stmt::Return {
            value,
            location: loc()
        }),
    ];

    leaf.prop_recursive(3, 16, 3, |inner| {
        let block = prop::collection::vec(inner, 0..3);
        prop_oneof![
            (expr(), block.clone()).prop_map(|(condition, then_body)| Stmt::If {
                condition,
                then_body,
                location: loc(),
            }),
            (expr(), block.clone(), block.clone()).prop_map(
                |(condition, then_body, else_body)| Stmt::IfElse {
                    condition,
                    then_body,
                    else_body,
                    location: loc(),
                }
            ),
            (expr(), block).prop_map(|(condition, body)| Stmt::While {
                condition,
                body,
                location: loc(),
            }),
        ]
    })
    .boxed()
}

fn fn_decl() -> impl Strategy<Value = FnDecl> {
    let formal = (value_type(), ident()).prop_map(|(param_type, name)| FormalDecl {
        param_type,
        name,
        location: loc(),
    });

    (
        any_type(),
        ident(),
        prop::collection::vec(formal, 0..3),
        prop::collection::vec(stmt(), 0..4),
    )
        .prop_map(|(return_type, name, formals, body)| FnDecl {
            return_type,
            name,
            formals,
            body,
            location: loc(),
        })
}

fn program() -> impl Strategy<Value = Program> {
    prop::collection::vec(
        prop_oneof![var_decl().prop_map(Decl::Var), fn_decl().prop_map(Decl::Fn)],
        0..4,
    )
    .prop_map(Program::new)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn test_program_round_trip(program in program()) {
        let text = render(&program, 0);
        let reparsed = parse_source(&text);

        prop_assert!(reparsed.is_ok(), "Failed to reparse:\n{}\n{:?}", text, reparsed);
        let reparsed = reparsed.unwrap();
        prop_assert_eq!(dump(&reparsed), dump(&program));
    }

    #[test]
    fn test_rendering_is_a_fixed_point(program in program()) {
        let text = render(&program, 0);
        let reparsed = parse_source(&text).unwrap();

        prop_assert_eq!(render(&reparsed, 0), text);
    }

    #[test]
    fn test_expression_round_trip(expr in expr()) {
        let text = render(&expr, 0);
        let reparsed = parse_expression_source(&text);

        prop_assert!(reparsed.is_ok(), "Failed to reparse: {}", text);
        prop_assert_eq!(dump(&reparsed.unwrap()), dump(&expr));
    }
}
