//! Declarations: globals, functions, classes and interfaces.

use crate::{
    ast::{
        ast::{ClassDecl, Decl, FnDecl, FnHeader, Identifier, InterfaceDecl, Program, VarDecl},
        types::Type,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    lookups::BindingPower,
    parser::Parser,
    recovery::{recover, SyncScope},
    stmt::parse_block,
    types::{parse_return_type, parse_type},
};

/// `Decl*` up to end of input. Every declaration is a recovery point.
pub fn parse_program(parser: &mut Parser) -> Result<Program, Error> {
    let start = parser.current_token().span;
    let mut decls = vec![];

    while parser.has_tokens() {
        match parse_decl(parser) {
            Ok(decl) => decls.push(decl),
            Err(error) => recover(parser, error, SyncScope::TopLevel)?,
        }
    }

    Ok(Program {
        decls,
        span: start.join(parser.previous_span()),
    })
}

pub fn parse_decl(parser: &mut Parser) -> Result<Decl, Error> {
    match parser.current_token_kind() {
        TokenKind::Class => Ok(Decl::Class(parse_class_decl(parser)?)),
        TokenKind::Interface => Ok(Decl::Interface(parse_interface_decl(parser)?)),
        _ => parse_var_or_fn_decl(parser),
    }
}

fn parse_identifier(parser: &mut Parser, message: &str) -> Result<Identifier, Error> {
    let error = parser.unexpected_detailed(message);
    let token = parser.expect_error(TokenKind::Identifier, Some(error))?;

    Ok(Identifier::new(token.value, token.span))
}

/// A variable or a function with body; both start with `Type ident`.
/// Used at top level and for class members.
fn parse_var_or_fn_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let ty = parse_return_type(parser)?;
    let name = parse_identifier(parser, "expected a name for the declaration")?;

    if parser.at(TokenKind::OpenParen) {
        let header = parse_fn_header_rest(parser, ty, name)?;
        let body = parse_block(parser)?;
        return Ok(Decl::Fn(header.with_body(body)));
    }

    if ty.is_void() {
        return Err(parser.unexpected_detailed("only functions can be declared `void`"));
    }

    let semicolon = parser.expect(TokenKind::Semicolon)?;
    Ok(Decl::Var(VarDecl {
        span: ty.span.join(semicolon.span),
        name,
        ty,
    }))
}

/// `Type ident`, as used for formals.
pub fn parse_variable(parser: &mut Parser) -> Result<VarDecl, Error> {
    let ty = parse_type(parser, BindingPower::Default)?;
    let name = parse_identifier(parser, "expected a variable name")?;

    Ok(VarDecl {
        span: ty.span.join(name.span),
        name,
        ty,
    })
}

/// `Type ident ;`
pub fn parse_var_decl(parser: &mut Parser) -> Result<VarDecl, Error> {
    let ty = parse_type(parser, BindingPower::Default)?;
    finish_var_decl(parser, ty)
}

/// The `ident ;` half of a variable declaration whose type is known.
pub fn finish_var_decl(parser: &mut Parser, ty: Type) -> Result<VarDecl, Error> {
    let name = parse_identifier(parser, "expected a variable name")?;
    let semicolon = parser.expect(TokenKind::Semicolon)?;

    Ok(VarDecl {
        span: ty.span.join(semicolon.span),
        name,
        ty,
    })
}

pub fn parse_fn_header(parser: &mut Parser) -> Result<FnHeader, Error> {
    let return_type = parse_return_type(parser)?;
    let name = parse_identifier(parser, "expected a function name")?;

    parse_fn_header_rest(parser, return_type, name)
}

/// `( Formals )` after the return type and name.
fn parse_fn_header_rest(parser: &mut Parser, return_type: Type, name: Identifier) -> Result<FnHeader, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut formals = vec![];
    if !parser.at(TokenKind::CloseParen) {
        loop {
            formals.push(parse_variable(parser)?);
            if parser.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
    }

    let close = parser.expect(TokenKind::CloseParen)?;

    Ok(FnHeader {
        span: return_type.span.join(close.span),
        name,
        return_type,
        formals,
    })
}

/// `class ident [extends ident] [implements ident {, ident}] { Field* }`
pub fn parse_class_decl(parser: &mut Parser) -> Result<ClassDecl, Error> {
    let start = parser.advance().span;
    let name = parse_identifier(parser, "expected a class name")?;

    let extends = match parser.eat(TokenKind::Extends) {
        Some(_) => Some(parse_identifier(parser, "expected a superclass name")?),
        None => None,
    };

    let mut implements = vec![];
    if parser.eat(TokenKind::Implements).is_some() {
        loop {
            implements.push(parse_identifier(parser, "expected an interface name")?);
            if parser.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
    }

    parser.expect(TokenKind::OpenCurly)?;

    let mut members = vec![];
    while parser.has_tokens() && !parser.at(TokenKind::CloseCurly) {
        match parse_var_or_fn_decl(parser) {
            Ok(member) => members.push(member),
            Err(error) => recover(parser, error, SyncScope::Nested)?,
        }
    }

    let close = parser.expect(TokenKind::CloseCurly)?;

    Ok(ClassDecl {
        name,
        extends,
        implements,
        members,
        span: start.join(close.span),
    })
}

/// `interface ident { (FnHeader ;)* }`
pub fn parse_interface_decl(parser: &mut Parser) -> Result<InterfaceDecl, Error> {
    let start = parser.advance().span;
    let name = parse_identifier(parser, "expected an interface name")?;
    parser.expect(TokenKind::OpenCurly)?;

    let mut prototypes = vec![];
    while parser.has_tokens() && !parser.at(TokenKind::CloseCurly) {
        match parse_prototype(parser) {
            Ok(prototype) => prototypes.push(prototype),
            Err(error) => recover(parser, error, SyncScope::Nested)?,
        }
    }

    let close = parser.expect(TokenKind::CloseCurly)?;

    Ok(InterfaceDecl {
        name,
        prototypes,
        span: start.join(close.span),
    })
}

fn parse_prototype(parser: &mut Parser) -> Result<FnDecl, Error> {
    let header = parse_fn_header(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(header.into_prototype())
}
