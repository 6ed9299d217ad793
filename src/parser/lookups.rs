use std::collections::HashMap;

use crate::{
    ast::{expressions::Expr, statements::Stmt},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator precedence, weakest first.
///
/// The Pratt loop keeps extending the left operand while the next token
/// binds strictly tighter than the level it was called with, which makes
/// every binary operator left-associative.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Assignment,
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Postfix,
    Member,
    Primary,
}

pub type StmtHandler = fn(&mut Parser<'_>) -> Result<Stmt, Error>;
pub type NUDHandler = fn(&mut Parser<'_>) -> Result<Expr, Error>;
pub type LEDHandler = fn(&mut Parser<'_>, Expr, BindingPower) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    parser.led(TokenKind::Assignment, BindingPower::Assignment, parse_assignment_expr);

    // Logical
    parser.led(TokenKind::Or, BindingPower::LogicalOr, parse_binary_expr);
    parser.led(TokenKind::And, BindingPower::LogicalAnd, parse_binary_expr);

    // Equality and relational
    parser.led(TokenKind::Equals, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::Less, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::LessEquals, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::Greater, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Percent, BindingPower::Multiplicative, parse_binary_expr);

    parser.led(TokenKind::PlusPlus, BindingPower::Postfix, parse_postfix_expr);
    parser.led(TokenKind::MinusMinus, BindingPower::Postfix, parse_postfix_expr);

    // Member and index
    parser.led(TokenKind::Dot, BindingPower::Member, parse_member_expr);
    parser.led(TokenKind::OpenBracket, BindingPower::Member, parse_index_expr);

    // Literals and symbols
    parser.nud(TokenKind::IntConstant, parse_constant_expr);
    parser.nud(TokenKind::DoubleConstant, parse_constant_expr);
    parser.nud(TokenKind::BoolConstant, parse_constant_expr);
    parser.nud(TokenKind::StringConstant, parse_constant_expr);
    parser.nud(TokenKind::Null, parse_constant_expr);
    parser.nud(TokenKind::This, parse_this_expr);
    parser.nud(TokenKind::Identifier, parse_identifier_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::Not, parse_prefix_expr);

    // Built-ins
    parser.nud(TokenKind::ReadInteger, parse_read_expr);
    parser.nud(TokenKind::ReadLine, parse_read_expr);
    parser.nud(TokenKind::New, parse_new_expr);
    parser.nud(TokenKind::NewArray, parse_new_array_expr);

    // Statements
    parser.stmt(TokenKind::OpenCurly, parse_block_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);
    parser.stmt(TokenKind::For, parse_for_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::Break, parse_break_stmt);
    parser.stmt(TokenKind::Print, parse_print_stmt);
    parser.stmt(TokenKind::Switch, parse_switch_stmt);
    parser.stmt(TokenKind::Semicolon, parse_empty_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
