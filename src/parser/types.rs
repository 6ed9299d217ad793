//! Type parsing implementation.
//!
//! This module handles parsing of type annotations. It supports:
//!
//! - Primitive types (`int`, `double`, `bool`, `string`)
//! - Named types (class and interface identifiers)
//! - Array types, one level per `[]` suffix
//!
//! Similar to expression parsing, it uses NUD/LED handlers with
//! binding powers; `[]` is the only type operator.

use std::collections::HashMap;

use crate::{
    ast::{
        ast::Identifier,
        types::{Primitive, Type},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser<'_>) -> Result<Type, Error>;

/// Type alias for type left denotation handler functions.
pub type TypeLEDHandler = fn(&mut Parser<'_>, Type, BindingPower) -> Result<Type, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Type alias for type LED lookup table.
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

/// Type alias for type binding power lookup table.
pub type TypeBPLookup = HashMap<TokenKind, BindingPower>;

/// Initializes the type parsing lookup tables.
///
/// `void` has no handler here, it is only valid as a return type (see
/// `parse_return_type`).
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::IntType, parse_primitive_type);
    parser.type_nud(TokenKind::DoubleType, parse_primitive_type);
    parser.type_nud(TokenKind::BoolType, parse_primitive_type);
    parser.type_nud(TokenKind::StringType, parse_primitive_type);
    parser.type_nud(TokenKind::Identifier, parse_named_type);
    parser.type_led(TokenKind::Dims, BindingPower::Postfix, parse_array_type);
}

pub fn parse_primitive_type(parser: &mut Parser) -> Result<Type, Error> {
    let primitive = match parser.current_token_kind() {
        TokenKind::IntType => Primitive::Int,
        TokenKind::DoubleType => Primitive::Double,
        TokenKind::BoolType => Primitive::Bool,
        TokenKind::StringType => Primitive::String,
        _ => return Err(parser.unexpected()),
    };

    let token = parser.advance();
    Ok(Type::primitive(primitive, token.span))
}

pub fn parse_named_type(parser: &mut Parser) -> Result<Type, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    Ok(Type::named(Identifier::new(token.value, token.span)))
}

pub fn parse_array_type(parser: &mut Parser, left: Type, _bp: BindingPower) -> Result<Type, Error> {
    let dims = parser.expect(TokenKind::Dims)?;
    Ok(Type::array_of(left, dims.span))
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<Type, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_type_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected_detailed("expected a type"));
    };

    let left = nud(parser)?;

    parse_type_from(parser, left, bp)
}

/// Applies any `[]` suffixes to an already parsed element type.
pub fn parse_type_from(parser: &mut Parser, mut left: Type, bp: BindingPower) -> Result<Type, Error> {
    // Each `[]` wraps what was parsed so far, so `int[][]` is built inside-out
    loop {
        let token_kind = parser.current_token_kind();
        let token_bp = parser
            .get_type_bp_lookup()
            .get(&token_kind)
            .copied()
            .unwrap_or(BindingPower::Default);
        if token_bp <= bp {
            break;
        }

        let Some(led) = parser.get_type_led_lookup().get(&token_kind).copied() else {
            return Err(parser.unexpected());
        };
        left = led(parser, left, token_bp)?;
    }

    Ok(left)
}

/// A function's return type: any type, or `void`.
pub fn parse_return_type(parser: &mut Parser) -> Result<Type, Error> {
    if let Some(token) = parser.eat(TokenKind::Void) {
        return Ok(Type::primitive(Primitive::Void, token.span));
    }

    parse_type(parser, BindingPower::Default)
}

/// Continues a type whose leading identifier has already been consumed.
pub fn parse_type_from_name(parser: &mut Parser, name: Identifier) -> Result<Type, Error> {
    parse_type_from(parser, Type::named(name), BindingPower::Default)
}
