//! Unit tests for the AST module.
//!
//! Nodes are built by hand here; trees produced by the parser are covered
//! in the parser and integration tests.

use super::{
    ast::{Decl, FnHeader, Identifier, Program, VarDecl},
    expressions::{BinaryOp, Expr, ExprKind, OperatorCategory, UnaryOp},
    printer::{print_shape, print_tree},
    statements::{Block, Stmt, StmtKind},
    types::{Primitive, Type, TypeKind},
    unparse::{unparse, unparse_expr},
};
use crate::{Position, Span};

fn at(line: u32, column: u32) -> Span {
    Span::new(Position::new(line, column), Position::new(line, column))
}

fn ident(name: &str, line: u32) -> Identifier {
    Identifier::new(name, at(line, 1))
}

fn var(name: &str, line: u32) -> Expr {
    Expr::new(
        ExprKind::FieldAccess {
            receiver: None,
            field: ident(name, line),
        },
        at(line, 1),
    )
}

fn int(value: i32, line: u32) -> Expr {
    Expr::new(ExprKind::IntConstant(value), at(line, 1))
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    let span = left.span.join(right.span);
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}

fn main_with(stmts: Vec<Stmt>) -> Program {
    let header = FnHeader {
        name: ident("main", 1),
        return_type: Type::primitive(Primitive::Void, at(1, 1)),
        formals: vec![],
        span: at(1, 1),
    };
    let body = Block {
        decls: vec![VarDecl {
            name: ident("x", 2),
            ty: Type::primitive(Primitive::Int, at(2, 1)),
            span: at(2, 1),
        }],
        stmts,
        span: at(1, 12),
    };

    Program {
        decls: vec![Decl::Fn(header.with_body(body))],
        span: at(1, 1),
    }
}

#[test]
fn test_operator_categories() {
    assert_eq!(BinaryOp::Mod.category(), OperatorCategory::Arithmetic);
    assert_eq!(BinaryOp::GreaterEq.category(), OperatorCategory::Relational);
    assert_eq!(BinaryOp::NotEq.category(), OperatorCategory::Equality);
    assert_eq!(BinaryOp::Or.category(), OperatorCategory::Logical);
    assert_eq!(UnaryOp::Not.category(), OperatorCategory::Logical);
    assert_eq!(UnaryOp::Neg.category(), OperatorCategory::Arithmetic);
}

#[test]
fn test_lvalues() {
    let index = Expr::new(
        ExprKind::ArrayAccess {
            array: Box::new(var("a", 1)),
            index: Box::new(int(0, 1)),
        },
        at(1, 1),
    );

    assert!(var("x", 1).is_lvalue());
    assert!(index.is_lvalue());
    assert!(!int(3, 1).is_lvalue());
    assert!(!Expr::new(ExprKind::This, at(1, 1)).is_lvalue());
}

#[test]
fn test_array_types() {
    let element = Type::named(ident("Shape", 1));
    let array = Type::array_of(Type::array_of(element, at(1, 6)), at(1, 8));

    assert_eq!(array.dimensions(), 2);
    assert_eq!(array.to_string(), "Shape[][]");
    assert!(matches!(array.kind, TypeKind::Array(_)));
    assert!(Type::primitive(Primitive::Void, at(1, 1)).is_void());
}

#[test]
fn test_header_into_prototype() {
    let header = FnHeader {
        name: ident("area", 3),
        return_type: Type::primitive(Primitive::Double, at(3, 1)),
        formals: vec![],
        span: Span::new(Position::new(3, 1), Position::new(3, 13)),
    };
    let prototype = header.into_prototype();

    assert!(prototype.body.is_none());
    assert_eq!(prototype.span.end, Position::new(3, 13));
}

#[test]
fn test_unparse_parenthesizes_everything() {
    let expr = binary(
        BinaryOp::Add,
        int(1, 1),
        binary(BinaryOp::Mul, int(2, 1), var("y", 1)),
    );
    assert_eq!(unparse_expr(&expr), "(1 + (2 * y))");

    let double = Expr::new(ExprKind::DoubleConstant(150.0), at(1, 1));
    assert_eq!(unparse_expr(&double), "150.0");
}

#[test]
fn test_unparse_program() {
    let assign = Expr::new(
        ExprKind::Assign {
            target: Box::new(var("x", 3)),
            value: Box::new(int(4, 3)),
        },
        at(3, 1),
    );
    let program = main_with(vec![
        Stmt {
            kind: StmtKind::Expr(assign),
            span: at(3, 1),
        },
        Stmt {
            kind: StmtKind::Return {
                value: Expr::empty(at(4, 7)),
            },
            span: at(4, 1),
        },
    ]);

    assert_eq!(
        unparse(&program),
        "void main() {\n    int x;\n    (x = 4);\n    return;\n}\n"
    );
}

#[test]
fn test_print_tree() {
    let print = Stmt {
        kind: StmtKind::Print {
            args: vec![binary(BinaryOp::Less, var("x", 3), int(2, 3))],
        },
        span: at(3, 1),
    };
    let program = main_with(vec![print]);

    let expected = [
        "   1 Program:",
        "   1    FnDecl:",
        "           (return type) Type: void",
        "   1       Identifier: main",
        "           (body) StmtBlock:",
        "   2          VarDecl:",
        "                 Type: int",
        "   2             Identifier: x",
        "   3          PrintStmt:",
        "   3             (args) RelationalExpr:",
        "   3                FieldAccess:",
        "   3                   Identifier: x",
        "   3                Operator: <",
        "   3                IntConstant: 2",
        "",
    ]
    .join("\n");

    pretty_assertions::assert_eq!(print_tree(&program), expected);
}

#[test]
fn test_print_shape_ignores_lines() {
    let first = main_with(vec![]);
    let mut second = main_with(vec![]);
    second.span = at(7, 3);
    if let Decl::Fn(function) = &mut second.decls[0] {
        function.name.span = at(9, 9);
    }

    assert_ne!(print_tree(&first), print_tree(&second));
    assert_eq!(print_shape(&first), print_shape(&second));
}
