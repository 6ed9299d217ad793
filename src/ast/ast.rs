//! Declarations and the translation-unit root.
//!
//! Every node owns its children outright; a `Program` is dropped as a whole
//! once the translation unit is done with.

use crate::Span;

use super::{statements::Block, types::Type};

/// The whole translation unit: top-level declarations in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub decls: Vec<Decl>,
    pub span: Span,
}

/// A name as written in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Identifier {
            name: name.into(),
            span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Var(VarDecl),
    Fn(FnDecl),
    Class(ClassDecl),
    Interface(InterfaceDecl),
}

impl Decl {
    pub fn get_span(&self) -> Span {
        match self {
            Decl::Var(decl) => decl.span,
            Decl::Fn(decl) => decl.span,
            Decl::Class(decl) => decl.span,
            Decl::Interface(decl) => decl.span,
        }
    }

    pub fn name(&self) -> &Identifier {
        match self {
            Decl::Var(decl) => &decl.name,
            Decl::Fn(decl) => &decl.name,
            Decl::Class(decl) => &decl.name,
            Decl::Interface(decl) => &decl.name,
        }
    }
}

/// Variable Declaration
/// Used for globals, class fields, formals and block locals.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: Identifier,
    pub ty: Type,
    pub span: Span,
}

/// Function header, the first half of a function declaration.
///
/// The parser produces the header as soon as the closing `)` of the
/// formals is seen and only afterwards decides whether a body or a `;`
/// follows.
#[derive(Debug, Clone, PartialEq)]
pub struct FnHeader {
    pub name: Identifier,
    pub return_type: Type,
    pub formals: Vec<VarDecl>,
    pub span: Span,
}

impl FnHeader {
    pub fn with_body(self, body: Block) -> FnDecl {
        FnDecl {
            span: self.span.join(body.span),
            name: self.name,
            return_type: self.return_type,
            formals: self.formals,
            body: Some(body),
        }
    }

    /// A body-less declaration, as found in interfaces.
    pub fn into_prototype(self) -> FnDecl {
        FnDecl {
            span: self.span,
            name: self.name,
            return_type: self.return_type,
            formals: self.formals,
            body: None,
        }
    }
}

/// Function Declaration
#[derive(Debug, Clone, PartialEq)]
pub struct FnDecl {
    pub name: Identifier,
    pub return_type: Type,
    pub formals: Vec<VarDecl>,
    pub body: Option<Block>,
    pub span: Span,
}

/// Class Declaration
///
/// `members` only ever holds `Decl::Var` and `Decl::Fn`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: Identifier,
    pub extends: Option<Identifier>,
    pub implements: Vec<Identifier>,
    pub members: Vec<Decl>,
    pub span: Span,
}

/// Interface Declaration
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDecl {
    pub name: Identifier,
    pub prototypes: Vec<FnDecl>,
    pub span: Span,
}
