use crate::Span;

use super::{ast::Identifier, types::Type};

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Stands in for an omitted optional expression: `return;`, a lone `;`
    /// and the init/step slots of `for`.
    Empty,
    IntConstant(i32),
    DoubleConstant(f64),
    BoolConstant(bool),
    StringConstant(String),
    Null,
    This,
    /// `target` is always a field or array access.
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// `operand` is always a field or array access.
    Postfix {
        op: PostfixOp,
        operand: Box<Expr>,
    },
    /// A bare `x` has no receiver, `a.x` has `a` as receiver.
    FieldAccess {
        receiver: Option<Box<Expr>>,
        field: Identifier,
    },
    ArrayAccess {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    Call {
        receiver: Option<Box<Expr>>,
        method: Identifier,
        args: Vec<Expr>,
    },
    New {
        class: Identifier,
    },
    NewArray {
        size: Box<Expr>,
        element: Type,
    },
    ReadInteger,
    ReadLine,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    pub fn empty(span: Span) -> Self {
        Expr {
            kind: ExprKind::Empty,
            span,
        }
    }

    pub fn get_span(&self) -> Span {
        self.span
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.kind, ExprKind::Empty)
    }

    /// Whether the expression denotes a storage location.
    pub fn is_lvalue(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::FieldAccess { .. } | ExprKind::ArrayAccess { .. }
        )
    }
}

/// Grouping of binary operators, mirrors how later phases type-check them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorCategory {
    Arithmetic,
    Relational,
    Equality,
    Logical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Eq,
    NotEq,
    And,
    Or,
}

impl BinaryOp {
    pub fn category(&self) -> OperatorCategory {
        match self {
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
                OperatorCategory::Arithmetic
            }
            BinaryOp::Less | BinaryOp::LessEq | BinaryOp::Greater | BinaryOp::GreaterEq => {
                OperatorCategory::Relational
            }
            BinaryOp::Eq | BinaryOp::NotEq => OperatorCategory::Equality,
            BinaryOp::And | BinaryOp::Or => OperatorCategory::Logical,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Less => "<",
            BinaryOp::LessEq => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEq => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub fn category(&self) -> OperatorCategory {
        match self {
            UnaryOp::Neg => OperatorCategory::Arithmetic,
            UnaryOp::Not => OperatorCategory::Logical,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixOp {
    Increment,
    Decrement,
}

impl PostfixOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            PostfixOp::Increment => "++",
            PostfixOp::Decrement => "--",
        }
    }
}
