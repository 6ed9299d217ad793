//! Type annotations in the AST.
//!
//! Types here are purely syntactic: a named type is just the identifier
//! that was written, resolution happens in a later phase.

use std::fmt::Display;

use crate::Span;

use super::ast::Identifier;

/// Built-in types of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Void,
    Bool,
    Int,
    Double,
    String,
}

impl Primitive {
    pub fn keyword(&self) -> &'static str {
        match self {
            Primitive::Void => "void",
            Primitive::Bool => "bool",
            Primitive::Int => "int",
            Primitive::Double => "double",
            Primitive::String => "string",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Primitive(Primitive),
    /// Reference to a class or interface.
    Named(Identifier),
    /// One level of `[]` around the element type.
    Array(Box<Type>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub kind: TypeKind,
    pub span: Span,
}

impl Type {
    pub fn primitive(primitive: Primitive, span: Span) -> Self {
        Type {
            kind: TypeKind::Primitive(primitive),
            span,
        }
    }

    pub fn named(name: Identifier) -> Self {
        Type {
            span: name.span,
            kind: TypeKind::Named(name),
        }
    }

    /// Wraps `element` one array level deeper; `dims` is the `[]` token's span.
    pub fn array_of(element: Type, dims: Span) -> Self {
        Type {
            span: element.span.join(dims),
            kind: TypeKind::Array(Box::new(element)),
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self.kind, TypeKind::Primitive(Primitive::Void))
    }

    /// Number of `[]` levels around the innermost element type.
    pub fn dimensions(&self) -> usize {
        match &self.kind {
            TypeKind::Array(element) => 1 + element.dimensions(),
            _ => 0,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            TypeKind::Primitive(primitive) => write!(f, "{}", primitive.keyword()),
            TypeKind::Named(name) => write!(f, "{}", name.name),
            TypeKind::Array(element) => write!(f, "{}[]", element),
        }
    }
}
