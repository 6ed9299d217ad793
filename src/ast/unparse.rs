//! Turns a tree back into Decaf source.
//!
//! Output is canonical rather than faithful: one declaration or statement
//! per line, four-space indentation and every compound expression wrapped
//! in parentheses, so that parsing the text again gives the same tree.

use super::{
    ast::{ClassDecl, Decl, FnDecl, InterfaceDecl, Program, VarDecl},
    expressions::{Expr, ExprKind},
    statements::{Block, Stmt, StmtKind, SwitchStmt},
};

pub fn unparse(program: &Program) -> String {
    let mut writer = SourceWriter::default();
    for decl in &program.decls {
        writer.decl(decl);
    }
    writer.out
}

pub fn unparse_expr(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Empty => String::new(),
        ExprKind::IntConstant(value) => value.to_string(),
        ExprKind::DoubleConstant(value) => {
            let mut text = value.to_string();
            if !text.contains('.') {
                text.push_str(".0");
            }
            text
        }
        ExprKind::BoolConstant(value) => value.to_string(),
        ExprKind::StringConstant(value) => format!("\"{}\"", value),
        ExprKind::Null => String::from("null"),
        ExprKind::This => String::from("this"),
        ExprKind::Assign { target, value } => {
            format!("({} = {})", unparse_expr(target), unparse_expr(value))
        }
        ExprKind::Binary { op, left, right } => format!(
            "({} {} {})",
            unparse_expr(left),
            op.symbol(),
            unparse_expr(right)
        ),
        ExprKind::Unary { op, operand } => format!("({}{})", op.symbol(), unparse_expr(operand)),
        ExprKind::Postfix { op, operand } => format!("({}{})", unparse_expr(operand), op.symbol()),
        ExprKind::FieldAccess { receiver, field } => match receiver {
            Some(receiver) => format!("{}.{}", unparse_expr(receiver), field.name),
            None => field.name.clone(),
        },
        ExprKind::ArrayAccess { array, index } => {
            format!("{}[{}]", unparse_expr(array), unparse_expr(index))
        }
        ExprKind::Call {
            receiver,
            method,
            args,
        } => {
            let args = args.iter().map(unparse_expr).collect::<Vec<_>>().join(", ");
            match receiver {
                Some(receiver) => format!("{}.{}({})", unparse_expr(receiver), method.name, args),
                None => format!("{}({})", method.name, args),
            }
        }
        ExprKind::New { class } => format!("New({})", class.name),
        ExprKind::NewArray { size, element } => {
            format!("NewArray({}, {})", unparse_expr(size), element)
        }
        ExprKind::ReadInteger => String::from("ReadInteger()"),
        ExprKind::ReadLine => String::from("ReadLine()"),
    }
}

#[derive(Default)]
struct SourceWriter {
    out: String,
    depth: usize,
}

impl SourceWriter {
    fn line(&mut self, text: &str) {
        self.out.push_str(&"    ".repeat(self.depth));
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Var(var) => self.var_decl(var),
            Decl::Fn(function) => self.fn_decl(function),
            Decl::Class(class) => self.class_decl(class),
            Decl::Interface(interface) => self.interface_decl(interface),
        }
    }

    fn var_decl(&mut self, var: &VarDecl) {
        self.line(&format!("{} {};", var.ty, var.name.name));
    }

    fn fn_decl(&mut self, function: &FnDecl) {
        let formals = function
            .formals
            .iter()
            .map(|formal| format!("{} {}", formal.ty, formal.name.name))
            .collect::<Vec<_>>()
            .join(", ");
        let header = format!("{} {}({})", function.return_type, function.name.name, formals);

        match &function.body {
            Some(body) => {
                self.line(&format!("{} {{", header));
                self.block_contents(body);
                self.line("}");
            }
            None => self.line(&format!("{};", header)),
        }
    }

    fn class_decl(&mut self, class: &ClassDecl) {
        let mut header = format!("class {}", class.name.name);
        if let Some(parent) = &class.extends {
            header.push_str(&format!(" extends {}", parent.name));
        }
        if !class.implements.is_empty() {
            let names = class
                .implements
                .iter()
                .map(|name| name.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            header.push_str(&format!(" implements {}", names));
        }

        self.line(&format!("{} {{", header));
        self.depth += 1;
        for member in &class.members {
            self.decl(member);
        }
        self.depth -= 1;
        self.line("}");
    }

    fn interface_decl(&mut self, interface: &InterfaceDecl) {
        self.line(&format!("interface {} {{", interface.name.name));
        self.depth += 1;
        for prototype in &interface.prototypes {
            self.fn_decl(prototype);
        }
        self.depth -= 1;
        self.line("}");
    }

    fn block_contents(&mut self, block: &Block) {
        self.depth += 1;
        for decl in &block.decls {
            self.var_decl(decl);
        }
        for stmt in &block.stmts {
            self.stmt(stmt);
        }
        self.depth -= 1;
    }

    /// Statements nested under `if`/`while`/`for` go on their own line,
    /// one level deeper, unless they are blocks.
    fn nested(&mut self, head: String, body: &Stmt) {
        if let StmtKind::Block(block) = &body.kind {
            self.line(&format!("{} {{", head));
            self.block_contents(block);
            self.line("}");
        } else {
            self.line(&head);
            self.depth += 1;
            self.stmt(body);
            self.depth -= 1;
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Block(block) => {
                self.line("{");
                self.block_contents(block);
                self.line("}");
            }
            StmtKind::If {
                condition,
                then_body,
                else_body,
            } => {
                self.nested(format!("if ({})", unparse_expr(condition)), then_body);
                if let Some(else_body) = else_body {
                    self.nested(String::from("else"), else_body);
                }
            }
            StmtKind::While { condition, body } => {
                self.nested(format!("while ({})", unparse_expr(condition)), body);
            }
            StmtKind::For {
                init,
                condition,
                step,
                body,
            } => {
                let head = format!(
                    "for ({}; {}; {})",
                    unparse_expr(init),
                    unparse_expr(condition),
                    unparse_expr(step)
                );
                self.nested(head, body);
            }
            StmtKind::Return { value } if value.is_empty() => self.line("return;"),
            StmtKind::Return { value } => self.line(&format!("return {};", unparse_expr(value))),
            StmtKind::Break => self.line("break;"),
            StmtKind::Print { args } => {
                let args = args.iter().map(unparse_expr).collect::<Vec<_>>().join(", ");
                self.line(&format!("Print({});", args));
            }
            StmtKind::Switch(switch) => self.switch(switch),
            StmtKind::Expr(expr) => self.line(&format!("{};", unparse_expr(expr))),
        }
    }

    fn switch(&mut self, switch: &SwitchStmt) {
        self.line(&format!("switch ({}) {{", unparse_expr(&switch.scrutinee)));
        self.depth += 1;
        for case in &switch.cases {
            self.line(&format!("case {}:", case.label));
            self.depth += 1;
            for stmt in &case.body {
                self.stmt(stmt);
            }
            self.depth -= 1;
        }
        if let Some(default) = &switch.default {
            self.line("default:");
            self.depth += 1;
            for stmt in &default.body {
                self.stmt(stmt);
            }
            self.depth -= 1;
        }
        self.depth -= 1;
        self.line("}");
    }
}
