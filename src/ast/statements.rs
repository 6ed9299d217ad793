use crate::Span;

use super::{ast::VarDecl, expressions::Expr};

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Block(Block),
    If {
        condition: Expr,
        then_body: Box<Stmt>,
        else_body: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    /// Omitted `init`/`step` are `ExprKind::Empty`.
    For {
        init: Expr,
        condition: Expr,
        step: Expr,
        body: Box<Stmt>,
    },
    /// `return;` carries an `ExprKind::Empty` value.
    Return {
        value: Expr,
    },
    Break,
    Print {
        args: Vec<Expr>,
    },
    Switch(SwitchStmt),
    /// An expression followed by `;`. A lone `;` holds `ExprKind::Empty`.
    Expr(Expr),
}

impl Stmt {
    pub fn get_span(&self) -> Span {
        self.span
    }
}

/// Block Statement
/// Local variable declarations always precede the statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub decls: Vec<VarDecl>,
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStmt {
    pub scrutinee: Expr,
    pub cases: Vec<Case>,
    pub default: Option<DefaultArm>,
}

/// `case <label>:` followed by its statements, which may be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub label: i32,
    pub label_span: Span,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultArm {
    pub body: Vec<Stmt>,
    pub span: Span,
}
