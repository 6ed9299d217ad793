//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Variable, function, class and interface declarations
//! - Expressions, precedence and associativity
//! - Control flow statements, including dangling else and switch
//! - Error reporting and recovery

use crate::{
    ast::{
        ast::{Decl, Program},
        expressions::{BinaryOp, Expr, ExprKind, PostfixOp, UnaryOp},
        statements::{Block, StmtKind},
        types::{Primitive, TypeKind},
    },
    errors::{errors::ErrorImpl, session::Session},
    lexer::{lexer::Lexer, tokens::TokenStream},
    parse_source, Position,
};

use super::parser::parse;

fn parse_ok(source: &str) -> Program {
    let (session, result) = parse_source(source, "test.decaf");
    assert_eq!(
        session.error_count(),
        0,
        "unexpected diagnostics: {:?}",
        session.diagnostics()
    );
    result.unwrap()
}

fn fn_body(program: &Program, index: usize) -> &Block {
    match &program.decls[index] {
        Decl::Fn(function) => function.body.as_ref().unwrap(),
        other => panic!("expected a function, got {:?}", other),
    }
}

/// Parses `body` as the body of a function and returns its expression
/// statements.
fn exprs(body: &str) -> Vec<Expr> {
    let program = parse_ok(&format!("void f() {{ {} }}", body));
    fn_body(&program, 0)
        .stmts
        .iter()
        .map(|stmt| match &stmt.kind {
            StmtKind::Expr(expr) => expr.clone(),
            other => panic!("expected an expression statement, got {:?}", other),
        })
        .collect()
}

fn expr(body: &str) -> Expr {
    exprs(body).remove(0)
}

fn error_count(source: &str) -> usize {
    parse_source(source, "test.decaf").0.error_count()
}

fn field_name(expr: &Expr) -> &str {
    match &expr.kind {
        ExprKind::FieldAccess { field, .. } => &field.name,
        other => panic!("expected a field access, got {:?}", other),
    }
}

#[test]
fn test_parse_variable_declaration() {
    let program = parse_ok("int x;");

    assert_eq!(program.decls.len(), 1);
    let Decl::Var(var) = &program.decls[0] else {
        panic!("expected a variable");
    };
    assert_eq!(var.name.name, "x");
    assert_eq!(var.ty.kind, TypeKind::Primitive(Primitive::Int));
    assert_eq!(var.span.start, Position::new(1, 1));
    assert_eq!(var.span.end, Position::new(1, 6));
}

#[test]
fn test_parse_array_declaration() {
    let program = parse_ok("int[][] grid;");
    let Decl::Var(var) = &program.decls[0] else {
        panic!("expected a variable");
    };

    assert_eq!(var.ty.dimensions(), 2);
    let TypeKind::Array(inner) = &var.ty.kind else {
        panic!("expected an array type");
    };
    let TypeKind::Array(element) = &inner.kind else {
        panic!("expected a nested array type");
    };
    assert_eq!(element.kind, TypeKind::Primitive(Primitive::Int));
}

#[test]
fn test_parse_function_declaration() {
    let program = parse_ok("int add(int a, Point b) { return a + b; }");
    let Decl::Fn(function) = &program.decls[0] else {
        panic!("expected a function");
    };

    assert_eq!(function.name.name, "add");
    assert_eq!(function.formals.len(), 2);
    assert_eq!(function.formals[1].name.name, "b");
    assert!(matches!(function.formals[1].ty.kind, TypeKind::Named(_)));

    let body = function.body.as_ref().unwrap();
    let StmtKind::Return { value } = &body.stmts[0].kind else {
        panic!("expected a return");
    };
    assert!(matches!(value.kind, ExprKind::Binary { op: BinaryOp::Add, .. }));
}

#[test]
fn test_parse_void_function_without_formals() {
    let program = parse_ok("void main() { }");
    let Decl::Fn(function) = &program.decls[0] else {
        panic!("expected a function");
    };

    assert!(function.return_type.is_void());
    assert!(function.formals.is_empty());
    assert!(function.body.as_ref().unwrap().stmts.is_empty());
}

#[test]
fn test_void_variable_is_an_error() {
    assert_eq!(error_count("void x;"), 1);
}

#[test]
fn test_top_level_declarations_keep_source_order() {
    let program = parse_ok("int a; void f() {} class C {} interface I {}");
    let names: Vec<&str> = program
        .decls
        .iter()
        .map(|decl| decl.name().name.as_str())
        .collect();

    assert_eq!(names, vec!["a", "f", "C", "I"]);
    assert!(matches!(program.decls[2], Decl::Class(_)));
    assert!(matches!(program.decls[3], Decl::Interface(_)));
}

#[test]
fn test_declaration_count_matches_source() {
    for n in 0..6 {
        let source: String = (0..n).map(|i| format!("int v{};\n", i)).collect();
        let program = parse_ok(&source);

        assert_eq!(program.decls.len(), n);
        for (i, decl) in program.decls.iter().enumerate() {
            assert_eq!(decl.name().name, format!("v{}", i));
        }
    }
}

#[test]
fn test_multiplication_binds_tighter() {
    let expr = expr("1 + 2 * 3;");
    let ExprKind::Binary { op, left, right } = &expr.kind else {
        panic!("expected a binary expression");
    };

    assert_eq!(*op, BinaryOp::Add);
    assert_eq!(left.kind, ExprKind::IntConstant(1));
    assert!(matches!(right.kind, ExprKind::Binary { op: BinaryOp::Mul, .. }));
}

#[test]
fn test_parentheses_override_precedence() {
    let expr = expr("(1 + 2) * 3;");
    let ExprKind::Binary { op, left, right } = &expr.kind else {
        panic!("expected a binary expression");
    };

    assert_eq!(*op, BinaryOp::Mul);
    assert!(matches!(left.kind, ExprKind::Binary { op: BinaryOp::Add, .. }));
    assert_eq!(right.kind, ExprKind::IntConstant(3));
}

#[test]
fn test_binary_operators_are_left_associative() {
    let expr = expr("a - b - c;");
    let ExprKind::Binary { op, left, right } = &expr.kind else {
        panic!("expected a binary expression");
    };

    assert_eq!(*op, BinaryOp::Sub);
    assert!(matches!(left.kind, ExprKind::Binary { op: BinaryOp::Sub, .. }));
    assert_eq!(field_name(right), "c");
}

#[test]
fn test_assignment_is_right_associative() {
    let expr = expr("a = b = 3;");
    let ExprKind::Assign { target, value } = &expr.kind else {
        panic!("expected an assignment");
    };

    assert_eq!(field_name(target), "a");
    let ExprKind::Assign { target, value } = &value.kind else {
        panic!("expected a nested assignment");
    };
    assert_eq!(field_name(target), "b");
    assert_eq!(value.kind, ExprKind::IntConstant(3));
}

#[test]
fn test_logical_and_equality_precedence() {
    let or = expr("a || b && c;");
    let ExprKind::Binary { op, right, .. } = &or.kind else {
        panic!("expected a binary expression");
    };
    assert_eq!(*op, BinaryOp::Or);
    assert!(matches!(right.kind, ExprKind::Binary { op: BinaryOp::And, .. }));

    let eq = expr("a == b < c;");
    let ExprKind::Binary { op, right, .. } = &eq.kind else {
        panic!("expected a binary expression");
    };
    assert_eq!(*op, BinaryOp::Eq);
    assert!(matches!(right.kind, ExprKind::Binary { op: BinaryOp::Less, .. }));
}

#[test]
fn test_unary_operators() {
    let negated = expr("-a * b;");
    let ExprKind::Binary { op, left, .. } = &negated.kind else {
        panic!("expected a binary expression");
    };
    assert_eq!(*op, BinaryOp::Mul);
    assert!(matches!(left.kind, ExprKind::Unary { op: UnaryOp::Neg, .. }));

    let not = expr("!a.done;");
    let ExprKind::Unary { op, operand } = &not.kind else {
        panic!("expected a unary expression");
    };
    assert_eq!(*op, UnaryOp::Not);
    assert_eq!(field_name(operand), "done");
}

#[test]
fn test_postfix_on_array_element() {
    let expr = expr("a[i]++;");
    let ExprKind::Postfix { op, operand } = &expr.kind else {
        panic!("expected a postfix expression");
    };

    assert_eq!(*op, PostfixOp::Increment);
    assert!(matches!(operand.kind, ExprKind::ArrayAccess { .. }));
}

#[test]
fn test_method_call_on_field() {
    let expr = expr("this.items.add(1, x);");
    let ExprKind::Call {
        receiver,
        method,
        args,
    } = &expr.kind
    else {
        panic!("expected a call");
    };

    assert_eq!(method.name, "add");
    assert_eq!(args.len(), 2);
    let receiver = receiver.as_ref().unwrap();
    let ExprKind::FieldAccess { receiver, field } = &receiver.kind else {
        panic!("expected a field access");
    };
    assert_eq!(field.name, "items");
    assert_eq!(receiver.as_ref().unwrap().kind, ExprKind::This);
}

#[test]
fn test_call_without_receiver() {
    let expr = expr("print(x);");
    let ExprKind::Call { receiver, method, args } = &expr.kind else {
        panic!("expected a call");
    };

    assert!(receiver.is_none());
    assert_eq!(method.name, "print");
    assert_eq!(args.len(), 1);
}

#[test]
fn test_builtin_expressions() {
    let exprs = exprs("a = NewArray(10, int[]); o = New(Foo); n = ReadInteger(); s = ReadLine();");
    let values: Vec<&ExprKind> = exprs
        .iter()
        .map(|expr| match &expr.kind {
            ExprKind::Assign { value, .. } => &value.kind,
            other => panic!("expected an assignment, got {:?}", other),
        })
        .collect();

    let ExprKind::NewArray { size, element } = values[0] else {
        panic!("expected NewArray");
    };
    assert_eq!(size.kind, ExprKind::IntConstant(10));
    assert_eq!(element.dimensions(), 1);

    let ExprKind::New { class } = values[1] else {
        panic!("expected New");
    };
    assert_eq!(class.name, "Foo");
    assert_eq!(*values[2], ExprKind::ReadInteger);
    assert_eq!(*values[3], ExprKind::ReadLine);
}

#[test]
fn test_constants() {
    let exprs = exprs("a = 0x10; b = 2.5; c = true; d = \"hi\"; e = null;");
    let values: Vec<ExprKind> = exprs
        .into_iter()
        .map(|expr| match expr.kind {
            ExprKind::Assign { value, .. } => value.kind,
            other => panic!("expected an assignment, got {:?}", other),
        })
        .collect();

    assert_eq!(
        values,
        vec![
            ExprKind::IntConstant(16),
            ExprKind::DoubleConstant(2.5),
            ExprKind::BoolConstant(true),
            ExprKind::StringConstant(String::from("hi")),
            ExprKind::Null,
        ]
    );
}

#[test]
fn test_invalid_assignment_targets() {
    let (session, result) = parse_source("void f() { 3 = x; }", "test.decaf");

    assert!(result.is_ok());
    assert_eq!(session.error_count(), 1);
    assert!(matches!(
        session.diagnostics()[0].get_impl(),
        ErrorImpl::InvalidAssignmentTarget { .. }
    ));

    assert_eq!(error_count("void f() { a + b = c; }"), 1);
    assert_eq!(error_count("void f() { f()++; }"), 1);
}

#[test]
fn test_assignment_below_logical_operator_is_rejected() {
    let (session, _) = parse_source("void f() { a || b = c; }", "test.decaf");

    assert_eq!(session.error_count(), 1);
    assert!(matches!(
        session.diagnostics()[0].get_impl(),
        ErrorImpl::InvalidAssignmentTarget { .. }
    ));

    let assign = expr("a || (b = c);");
    let ExprKind::Binary { right, .. } = &assign.kind else {
        panic!("expected a logical expression");
    };
    assert!(matches!(right.kind, ExprKind::Assign { .. }));
}

#[test]
fn test_dangling_else_binds_to_nearest_if() {
    let program = parse_ok("void f() { if (a) if (b) x = 1; else x = 2; }");
    let stmt = &fn_body(&program, 0).stmts[0];

    let StmtKind::If {
        then_body,
        else_body,
        ..
    } = &stmt.kind
    else {
        panic!("expected an if");
    };
    assert!(else_body.is_none());

    let StmtKind::If { else_body, .. } = &then_body.kind else {
        panic!("expected a nested if");
    };
    assert!(else_body.is_some());
}

#[test]
fn test_while_and_block() {
    let program = parse_ok("void f() { while (i < 3) { int j; j = i; i = i + 1; } }");
    let StmtKind::While { body, .. } = &fn_body(&program, 0).stmts[0].kind else {
        panic!("expected a while");
    };
    let StmtKind::Block(block) = &body.kind else {
        panic!("expected a block");
    };

    assert_eq!(block.decls.len(), 1);
    assert_eq!(block.stmts.len(), 2);
}

#[test]
fn test_for_with_omitted_slots() {
    let program = parse_ok("void f() {\nfor (; i < 10; ) i++;\n}");
    let StmtKind::For {
        init,
        condition,
        step,
        ..
    } = &fn_body(&program, 0).stmts[0].kind
    else {
        panic!("expected a for");
    };

    assert!(init.is_empty());
    assert_eq!(init.span.start, Position::new(2, 6));
    assert!(matches!(condition.kind, ExprKind::Binary { op: BinaryOp::Less, .. }));
    assert!(step.is_empty());
    assert_eq!(step.span.start, Position::new(2, 16));
}

#[test]
fn test_for_requires_condition() {
    assert_eq!(error_count("void f() { for (;;) x = 1; }"), 1);
}

#[test]
fn test_return_break_and_empty_statements() {
    let program = parse_ok("void f() { return; ; while (true) break; return 1; }");
    let stmts = &fn_body(&program, 0).stmts;

    let StmtKind::Return { value } = &stmts[0].kind else {
        panic!("expected a return");
    };
    assert!(value.is_empty());

    let StmtKind::Expr(empty) = &stmts[1].kind else {
        panic!("expected an empty statement");
    };
    assert!(empty.is_empty());

    let StmtKind::While { body, .. } = &stmts[2].kind else {
        panic!("expected a while");
    };
    assert_eq!(body.kind, StmtKind::Break);

    let StmtKind::Return { value } = &stmts[3].kind else {
        panic!("expected a return");
    };
    assert_eq!(value.kind, ExprKind::IntConstant(1));
}

#[test]
fn test_print_statement() {
    let program = parse_ok("void f() { Print(a, \"s\", 3); }");
    let StmtKind::Print { args } = &fn_body(&program, 0).stmts[0].kind else {
        panic!("expected a print");
    };

    assert_eq!(args.len(), 3);
    assert_eq!(error_count("void f() { Print(); }"), 1);
}

#[test]
fn test_switch_with_cases_and_default() {
    let source = "void f() { switch (x) { case 1: y = 1; case 2: default: y = 3; Print(y); } }";
    let program = parse_ok(source);
    let StmtKind::Switch(switch) = &fn_body(&program, 0).stmts[0].kind else {
        panic!("expected a switch");
    };

    assert_eq!(field_name(&switch.scrutinee), "x");
    assert_eq!(switch.cases.len(), 2);
    assert_eq!(switch.cases[0].label, 1);
    assert_eq!(switch.cases[0].body.len(), 1);
    assert_eq!(switch.cases[1].label, 2);
    assert!(switch.cases[1].body.is_empty());
    assert_eq!(switch.default.as_ref().unwrap().body.len(), 2);
}

#[test]
fn test_switch_without_default() {
    let program = parse_ok("void f() { switch (x) { case 3: break; } }");
    let StmtKind::Switch(switch) = &fn_body(&program, 0).stmts[0].kind else {
        panic!("expected a switch");
    };

    assert_eq!(switch.cases.len(), 1);
    assert!(switch.default.is_none());
}

#[test]
fn test_malformed_switches() {
    assert!(error_count("void f() { switch (x) { default: y = 1; case 1: y = 2; } }") >= 1);
    assert_eq!(error_count("void f() { switch (x) { case 1: default: default: } }"), 1);
    assert_eq!(error_count("void f() { switch (x) { } }"), 1);
    assert_eq!(error_count("void f() { switch (x) { default: y = 1; } }"), 1);
}

#[test]
fn test_malformed_switch_stays_inside_enclosing_block() {
    let source = "void f() {\n while (x) {\n switch (x) { case y: a = 1; }\n a = b;\n }\n c = d;\n}";
    let (session, result) = parse_source(source, "test.decaf");
    let program = result.unwrap();

    assert_eq!(session.error_count(), 1);
    assert_eq!(session.diagnostics()[0].get_span().start, Position::new(3, 20));

    let body = fn_body(&program, 0);
    assert_eq!(body.stmts.len(), 2);
    let StmtKind::While { body: loop_body, .. } = &body.stmts[0].kind else {
        panic!("expected a while loop");
    };
    let StmtKind::Block(loop_block) = &loop_body.kind else {
        panic!("expected a block as the loop body");
    };
    assert_eq!(loop_block.stmts.len(), 2);
    assert!(matches!(loop_block.stmts[0].kind, StmtKind::Switch(_)));
    assert!(matches!(loop_block.stmts[1].kind, StmtKind::Expr(_)));
}

#[test]
fn test_bad_case_label_keeps_later_arms() {
    let source = "void f() { switch (x) { case y: a = 1; case 2: b = 2; default: c = 3; } }";
    let (session, result) = parse_source(source, "test.decaf");
    let program = result.unwrap();

    assert_eq!(session.error_count(), 1);
    let StmtKind::Switch(switch) = &fn_body(&program, 0).stmts[0].kind else {
        panic!("expected a switch");
    };
    assert_eq!(switch.cases.len(), 1);
    assert_eq!(switch.cases[0].label, 2);
    assert!(switch.default.is_some());
}

#[test]
fn test_misplaced_arm_does_not_leak_out_of_switch() {
    let source = "void f() { switch (x) { case 1: default: a = 1; case 2: { b = 2; } c = 2; } d = 3; }";
    let (session, result) = parse_source(source, "test.decaf");
    let program = result.unwrap();

    assert_eq!(session.error_count(), 1);
    let body = fn_body(&program, 0);
    assert_eq!(body.stmts.len(), 2);
    let StmtKind::Switch(switch) = &body.stmts[0].kind else {
        panic!("expected a switch");
    };
    assert_eq!(switch.cases.len(), 1);
    assert_eq!(switch.default.as_ref().unwrap().body.len(), 1);
}

#[test]
fn test_class_declaration() {
    let source = "class Square extends Shape implements Drawable, Comparable {\n\
                  double side;\n\
                  double area() { return side * side; }\n\
                  }";
    let program = parse_ok(source);
    let Decl::Class(class) = &program.decls[0] else {
        panic!("expected a class");
    };

    assert_eq!(class.name.name, "Square");
    assert_eq!(class.extends.as_ref().unwrap().name, "Shape");
    let interfaces: Vec<&str> = class.implements.iter().map(|name| name.name.as_str()).collect();
    assert_eq!(interfaces, vec!["Drawable", "Comparable"]);
    assert_eq!(class.members.len(), 2);
    assert!(matches!(class.members[0], Decl::Var(_)));
    assert!(matches!(class.members[1], Decl::Fn(_)));
}

#[test]
fn test_class_without_clauses() {
    let program = parse_ok("class Empty { }");
    let Decl::Class(class) = &program.decls[0] else {
        panic!("expected a class");
    };

    assert!(class.extends.is_none());
    assert!(class.implements.is_empty());
    assert!(class.members.is_empty());
}

#[test]
fn test_interface_declaration() {
    let program = parse_ok("interface Drawable { void draw(); int size(int scale); }");
    let Decl::Interface(interface) = &program.decls[0] else {
        panic!("expected an interface");
    };

    assert_eq!(interface.prototypes.len(), 2);
    assert!(interface.prototypes.iter().all(|prototype| prototype.body.is_none()));
    assert_eq!(interface.prototypes[1].formals.len(), 1);
}

#[test]
fn test_interface_with_field_is_an_error() {
    let (session, result) = parse_source("interface I { int x; void f(); }", "test.decaf");
    let program = result.unwrap();

    assert_eq!(session.error_count(), 1);
    let Decl::Interface(interface) = &program.decls[0] else {
        panic!("expected an interface");
    };
    assert_eq!(interface.prototypes.len(), 1);
}

#[test]
fn test_block_local_declarations() {
    let program = parse_ok("void f() { int x; Foo y; Foo[] z; x = 1; y.go(); }");
    let body = fn_body(&program, 0);

    assert_eq!(body.decls.len(), 3);
    assert!(matches!(body.decls[1].ty.kind, TypeKind::Named(_)));
    assert_eq!(body.decls[2].ty.dimensions(), 1);
    assert_eq!(body.stmts.len(), 2);
}

#[test]
fn test_declaration_after_statement_is_an_error() {
    assert_eq!(error_count("void f() { x = 1; int y; }"), 1);
    assert_eq!(error_count("void f() { x = 1; Foo y; }"), 1);
}

#[test]
fn test_each_malformed_statement_is_reported_once() {
    let source = "void f() {\n\
                  x = ;\n\
                  y = 1;\n\
                  z = * 2;\n\
                  w = 2;\n\
                  q = );\n\
                  }";
    let (session, result) = parse_source(source, "test.decaf");
    let program = result.unwrap();

    assert_eq!(session.error_count(), 3);
    let lines: Vec<u32> = session
        .diagnostics()
        .iter()
        .map(|error| error.get_span().start.line)
        .collect();
    assert_eq!(lines, vec![2, 4, 6]);
    assert_eq!(fn_body(&program, 0).stmts.len(), 2);
}

#[test]
fn test_errors_close_together_are_not_cascaded() {
    assert_eq!(error_count("void f() { x = ; y = ; }"), 1);
}

#[test]
fn test_recovery_inside_class_body() {
    let (session, result) = parse_source("class A { int x int y; void f() {} }", "test.decaf");
    let program = result.unwrap();

    assert_eq!(session.error_count(), 1);
    let Decl::Class(class) = &program.decls[0] else {
        panic!("expected a class");
    };
    assert_eq!(class.members.len(), 1);
    assert_eq!(class.members[0].name().name, "f");
}

#[test]
fn test_recovery_skips_nested_braces() {
    let source = "void f() { if (x ==) { a = 1; } y = 2; }";
    let (session, result) = parse_source(source, "test.decaf");
    let program = result.unwrap();

    assert_eq!(session.error_count(), 1);
    assert_eq!(fn_body(&program, 0).stmts.len(), 1);
}

#[test]
fn test_stray_closing_brace_at_top_level() {
    let (session, result) = parse_source("} int x;", "test.decaf");

    assert_eq!(session.error_count(), 1);
    assert_eq!(result.unwrap().decls.len(), 1);
}

#[test]
fn test_lexical_errors_are_counted() {
    let (session, result) = parse_source("void f() { x = 1 # ; }", "test.decaf");
    let program = result.unwrap();

    assert_eq!(session.error_count(), 1);
    assert!(session.diagnostics()[0].is_lexical());
    assert_eq!(fn_body(&program, 0).stmts.len(), 1);
}

#[test]
fn test_recovery_exhausted_at_end_of_input() {
    let (session, result) = parse_source("void f() { x = 1;", "test.decaf");

    assert_eq!(session.error_count(), 1);
    assert!(matches!(
        session.diagnostics()[0].get_impl(),
        ErrorImpl::UnexpectedEndOfInput
    ));
    assert!(matches!(
        result.unwrap_err().get_impl(),
        ErrorImpl::RecoveryExhausted
    ));
}

#[test]
fn test_empty_program() {
    assert!(parse_ok("").decls.is_empty());
    assert!(parse_ok("// nothing here\n").decls.is_empty());
}

#[test]
fn test_expression_spans() {
    let program = parse_ok("void f() {\n  a + bc;\n}");
    let StmtKind::Expr(expr) = &fn_body(&program, 0).stmts[0].kind else {
        panic!("expected an expression statement");
    };

    assert_eq!(expr.span.start, Position::new(2, 3));
    assert_eq!(expr.span.end, Position::new(2, 8));
}

#[test]
fn test_parse_from_token_stream() {
    let tokens = crate::lexer::lexer::tokenize("int x; void f() { x = 1; }", None).unwrap();
    let mut session = Session::silent();
    let program = parse(TokenStream::new(tokens), &mut session).unwrap();

    assert_eq!(session.error_count(), 0);
    assert_eq!(program.decls.len(), 2);
}

#[test]
fn test_parse_from_lexer() {
    let mut session = Session::silent();
    let lexer = Lexer::new("class A { }", Some(String::from("a.decaf")));
    let program = parse(lexer, &mut session).unwrap();

    assert!(matches!(program.decls[0], Decl::Class(_)));
}
