//! Indented debug dump of a parsed program.
//!
//! Each node gets its own line: the source line number right-aligned in a
//! four column gutter, three spaces of indentation per level, an optional
//! `(label)` naming the child's role and the node name.
//!
//! ```text
//!    1 Program:
//!    1    FnDecl:
//!            (return type) Type: void
//!    1       Identifier: main
//! ```

use std::fmt::Write;

use super::{
    ast::{ClassDecl, Decl, FnDecl, Identifier, InterfaceDecl, Program, VarDecl},
    expressions::{Expr, ExprKind, OperatorCategory},
    statements::{Block, Stmt, StmtKind, SwitchStmt},
    types::{Type, TypeKind},
};

const GUTTER: usize = 4;
const INDENT: usize = 3;

/// Dumps `program` with line numbers.
pub fn print_tree(program: &Program) -> String {
    let mut printer = TreePrinter::new(true);
    printer.program(program);
    printer.out
}

/// Dumps `program` without the line-number gutter, leaving only the shape
/// of the tree and the names and values it holds.
pub fn print_shape(program: &Program) -> String {
    let mut printer = TreePrinter::new(false);
    printer.program(program);
    printer.out
}

struct TreePrinter {
    out: String,
    with_lines: bool,
}

impl TreePrinter {
    fn new(with_lines: bool) -> Self {
        TreePrinter {
            out: String::new(),
            with_lines,
        }
    }

    fn line(&mut self, depth: usize, line: Option<u32>, label: Option<&str>, text: &str) {
        if self.with_lines {
            match line {
                Some(line) => {
                    let _ = write!(self.out, "{:>GUTTER$}", line);
                }
                None => self.out.push_str(&" ".repeat(GUTTER)),
            }
        }
        self.out.push_str(&" ".repeat(depth * INDENT + 1));
        if let Some(label) = label {
            let _ = write!(self.out, "({}) ", label);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn program(&mut self, program: &Program) {
        self.line(0, Some(program.span.start.line), None, "Program:");
        for decl in &program.decls {
            self.decl(1, decl);
        }
    }

    fn decl(&mut self, depth: usize, decl: &Decl) {
        match decl {
            Decl::Var(var) => self.var_decl(depth, None, var),
            Decl::Fn(function) => self.fn_decl(depth, function),
            Decl::Class(class) => self.class_decl(depth, class),
            Decl::Interface(interface) => self.interface_decl(depth, interface),
        }
    }

    fn identifier(&mut self, depth: usize, label: Option<&str>, identifier: &Identifier) {
        self.line(
            depth,
            Some(identifier.span.start.line),
            label,
            &format!("Identifier: {}", identifier.name),
        );
    }

    fn ty(&mut self, depth: usize, label: Option<&str>, ty: &Type) {
        match &ty.kind {
            TypeKind::Primitive(primitive) => {
                self.line(depth, None, label, &format!("Type: {}", primitive.keyword()))
            }
            TypeKind::Named(name) => {
                self.line(depth, Some(ty.span.start.line), label, "NamedType:");
                self.identifier(depth + 1, None, name);
            }
            TypeKind::Array(element) => {
                self.line(depth, Some(ty.span.start.line), label, "ArrayType:");
                self.ty(depth + 1, None, element);
            }
        }
    }

    fn var_decl(&mut self, depth: usize, label: Option<&str>, var: &VarDecl) {
        self.line(depth, Some(var.span.start.line), label, "VarDecl:");
        self.ty(depth + 1, None, &var.ty);
        self.identifier(depth + 1, None, &var.name);
    }

    fn fn_decl(&mut self, depth: usize, function: &FnDecl) {
        self.line(depth, Some(function.span.start.line), None, "FnDecl:");
        self.ty(depth + 1, Some("return type"), &function.return_type);
        self.identifier(depth + 1, None, &function.name);
        for formal in &function.formals {
            self.var_decl(depth + 1, Some("formals"), formal);
        }
        if let Some(body) = &function.body {
            self.block(depth + 1, Some("body"), body);
        }
    }

    fn class_decl(&mut self, depth: usize, class: &ClassDecl) {
        self.line(depth, Some(class.span.start.line), None, "ClassDecl:");
        self.identifier(depth + 1, None, &class.name);
        if let Some(parent) = &class.extends {
            self.named(depth + 1, "extends", parent);
        }
        for interface in &class.implements {
            self.named(depth + 1, "implements", interface);
        }
        for member in &class.members {
            self.decl(depth + 1, member);
        }
    }

    fn named(&mut self, depth: usize, label: &str, name: &Identifier) {
        self.line(depth, Some(name.span.start.line), Some(label), "NamedType:");
        self.identifier(depth + 1, None, name);
    }

    fn interface_decl(&mut self, depth: usize, interface: &InterfaceDecl) {
        self.line(depth, Some(interface.span.start.line), None, "InterfaceDecl:");
        self.identifier(depth + 1, None, &interface.name);
        for prototype in &interface.prototypes {
            self.fn_decl(depth + 1, prototype);
        }
    }

    fn block(&mut self, depth: usize, label: Option<&str>, block: &Block) {
        self.line(depth, None, label, "StmtBlock:");
        for decl in &block.decls {
            self.var_decl(depth + 1, None, decl);
        }
        for stmt in &block.stmts {
            self.stmt(depth + 1, None, stmt);
        }
    }

    fn stmt(&mut self, depth: usize, label: Option<&str>, stmt: &Stmt) {
        let line = Some(stmt.span.start.line);
        match &stmt.kind {
            StmtKind::Block(block) => self.block(depth, label, block),
            StmtKind::If {
                condition,
                then_body,
                else_body,
            } => {
                self.line(depth, line, label, "IfStmt:");
                self.expr(depth + 1, Some("test"), condition);
                self.stmt(depth + 1, Some("then"), then_body);
                if let Some(else_body) = else_body {
                    self.stmt(depth + 1, Some("else"), else_body);
                }
            }
            StmtKind::While { condition, body } => {
                self.line(depth, line, label, "WhileStmt:");
                self.expr(depth + 1, Some("test"), condition);
                self.stmt(depth + 1, Some("body"), body);
            }
            StmtKind::For {
                init,
                condition,
                step,
                body,
            } => {
                self.line(depth, line, label, "ForStmt:");
                self.expr(depth + 1, Some("init"), init);
                self.expr(depth + 1, Some("test"), condition);
                self.expr(depth + 1, Some("step"), step);
                self.stmt(depth + 1, Some("body"), body);
            }
            StmtKind::Return { value } => {
                self.line(depth, line, label, "ReturnStmt:");
                self.expr(depth + 1, None, value);
            }
            StmtKind::Break => self.line(depth, line, label, "BreakStmt:"),
            StmtKind::Print { args } => {
                self.line(depth, line, label, "PrintStmt:");
                for arg in args {
                    self.expr(depth + 1, Some("args"), arg);
                }
            }
            StmtKind::Switch(switch) => self.switch(depth, line, label, switch),
            StmtKind::Expr(expr) => self.expr(depth, label, expr),
        }
    }

    fn switch(&mut self, depth: usize, line: Option<u32>, label: Option<&str>, switch: &SwitchStmt) {
        self.line(depth, line, label, "SwitchStmt:");
        self.expr(depth + 1, None, &switch.scrutinee);
        for case in &switch.cases {
            self.line(depth + 1, Some(case.span.start.line), None, "Case:");
            self.line(
                depth + 2,
                Some(case.label_span.start.line),
                None,
                &format!("IntConstant: {}", case.label),
            );
            for stmt in &case.body {
                self.stmt(depth + 2, None, stmt);
            }
        }
        if let Some(default) = &switch.default {
            self.line(depth + 1, Some(default.span.start.line), None, "Default:");
            for stmt in &default.body {
                self.stmt(depth + 2, None, stmt);
            }
        }
    }

    fn operator(&mut self, depth: usize, line: u32, symbol: &str) {
        self.line(depth, Some(line), None, &format!("Operator: {}", symbol));
    }

    fn expr(&mut self, depth: usize, label: Option<&str>, expr: &Expr) {
        let line = Some(expr.span.start.line);
        match &expr.kind {
            ExprKind::Empty => self.line(depth, None, label, "Empty:"),
            ExprKind::IntConstant(value) => {
                self.line(depth, line, label, &format!("IntConstant: {}", value))
            }
            ExprKind::DoubleConstant(value) => {
                self.line(depth, line, label, &format!("DoubleConstant: {}", value))
            }
            ExprKind::BoolConstant(value) => {
                self.line(depth, line, label, &format!("BoolConstant: {}", value))
            }
            ExprKind::StringConstant(value) => {
                self.line(depth, line, label, &format!("StringConstant: \"{}\"", value))
            }
            ExprKind::Null => self.line(depth, line, label, "NullConstant:"),
            ExprKind::This => self.line(depth, line, label, "This:"),
            ExprKind::Assign { target, value } => {
                self.line(depth, line, label, "AssignExpr:");
                self.expr(depth + 1, None, target);
                self.operator(depth + 1, target.span.end.line, "=");
                self.expr(depth + 1, None, value);
            }
            ExprKind::Binary { op, left, right } => {
                let name = match op.category() {
                    OperatorCategory::Arithmetic => "ArithmeticExpr:",
                    OperatorCategory::Relational => "RelationalExpr:",
                    OperatorCategory::Equality => "EqualityExpr:",
                    OperatorCategory::Logical => "LogicalExpr:",
                };
                self.line(depth, line, label, name);
                self.expr(depth + 1, None, left);
                self.operator(depth + 1, left.span.end.line, op.symbol());
                self.expr(depth + 1, None, right);
            }
            ExprKind::Unary { op, operand } => {
                let name = match op.category() {
                    OperatorCategory::Logical => "LogicalExpr:",
                    _ => "ArithmeticExpr:",
                };
                self.line(depth, line, label, name);
                self.operator(depth + 1, expr.span.start.line, op.symbol());
                self.expr(depth + 1, None, operand);
            }
            ExprKind::Postfix { op, operand } => {
                self.line(depth, line, label, "PostfixExpr:");
                self.expr(depth + 1, None, operand);
                self.operator(depth + 1, expr.span.end.line, op.symbol());
            }
            ExprKind::FieldAccess { receiver, field } => {
                self.line(depth, line, label, "FieldAccess:");
                if let Some(receiver) = receiver {
                    self.expr(depth + 1, None, receiver);
                }
                self.identifier(depth + 1, None, field);
            }
            ExprKind::ArrayAccess { array, index } => {
                self.line(depth, line, label, "ArrayAccess:");
                self.expr(depth + 1, None, array);
                self.expr(depth + 1, None, index);
            }
            ExprKind::Call {
                receiver,
                method,
                args,
            } => {
                self.line(depth, line, label, "Call:");
                if let Some(receiver) = receiver {
                    self.expr(depth + 1, None, receiver);
                }
                self.identifier(depth + 1, None, method);
                for arg in args {
                    self.expr(depth + 1, Some("actuals"), arg);
                }
            }
            ExprKind::New { class } => {
                self.line(depth, line, label, "NewExpr:");
                self.named(depth + 1, "class", class);
            }
            ExprKind::NewArray { size, element } => {
                self.line(depth, line, label, "NewArrayExpr:");
                self.expr(depth + 1, None, size);
                self.ty(depth + 1, None, element);
            }
            ExprKind::ReadInteger => self.line(depth, line, label, "ReadIntegerExpr:"),
            ExprKind::ReadLine => self.line(depth, line, label, "ReadLineExpr:"),
        }
    }
}
