use crate::{
    ast::{
        ast::{Identifier, VarDecl},
        expressions::Expr,
        statements::{Block, Case, DefaultArm, Stmt, StmtKind, SwitchStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Literal, TokenKind},
    parser::{
        expr::{parse_expr, parse_expr_from, parse_identifier_tail},
        lookups::BindingPower,
    },
};

use super::{
    decl::{finish_var_decl, parse_var_decl},
    parser::Parser,
    recovery::{recover, SyncScope},
    types::parse_type_from_name,
};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token_kind = parser.current_token_kind();
    if let Some(handler) = parser.get_stmt_lookup().get(&token_kind).copied() {
        return handler(parser);
    }

    parse_expr_stmt(parser)
}

pub fn parse_expr_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let expr = parse_expr(parser, BindingPower::Default)?;
    let semicolon = parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt {
        span: expr.span.join(semicolon.span),
        kind: StmtKind::Expr(expr),
    })
}

/// A lone `;`.
pub fn parse_empty_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let semicolon = parser.advance();

    Ok(Stmt {
        kind: StmtKind::Expr(Expr::empty(semicolon.span)),
        span: semicolon.span,
    })
}

enum BlockItem {
    Decl(VarDecl),
    Stmt(Stmt),
}

/// `{ VarDecl* Stmt* }`
///
/// Each local declaration and statement is a recovery point.
pub fn parse_block(parser: &mut Parser) -> Result<Block, Error> {
    let open = parser.expect(TokenKind::OpenCurly)?;

    let mut decls = vec![];
    let mut stmts = vec![];
    let mut accepts_decls = true;

    while parser.has_tokens() && !parser.at(TokenKind::CloseCurly) {
        match parse_block_item(parser, accepts_decls) {
            Ok(BlockItem::Decl(decl)) => decls.push(decl),
            Ok(BlockItem::Stmt(stmt)) => {
                accepts_decls = false;
                stmts.push(stmt);
            }
            Err(error) => recover(parser, error, SyncScope::Nested)?,
        }
    }

    let close = parser.expect(TokenKind::CloseCurly)?;

    Ok(Block {
        decls,
        stmts,
        span: open.span.join(close.span),
    })
}

/// One item of a block body.
///
/// With a single token of lookahead a leading identifier is ambiguous: it
/// starts a declaration when another identifier or `[]` follows it, and an
/// expression otherwise. The identifier is consumed first and the decision
/// is made on the token after it.
fn parse_block_item(parser: &mut Parser, accepts_decls: bool) -> Result<BlockItem, Error> {
    const DECL_AFTER_STMT: &str = "variable declarations must come before statements";

    let token_kind = parser.current_token_kind();

    if token_kind.is_primitive_type() {
        if !accepts_decls {
            return Err(parser.unexpected_detailed(DECL_AFTER_STMT));
        }
        return Ok(BlockItem::Decl(parse_var_decl(parser)?));
    }

    if token_kind != TokenKind::Identifier {
        return Ok(BlockItem::Stmt(parse_stmt(parser)?));
    }

    let first = parser.advance();

    if parser.at(TokenKind::Identifier) || parser.at(TokenKind::Dims) {
        if !accepts_decls {
            return Err(parser.unexpected_detailed(DECL_AFTER_STMT));
        }
        let ty = parse_type_from_name(parser, Identifier::new(first.value, first.span))?;
        return Ok(BlockItem::Decl(finish_var_decl(parser, ty)?));
    }

    let start = first.span;
    let left = parse_identifier_tail(parser, first)?;
    let expr = parse_expr_from(parser, left, BindingPower::Default)?;
    let semicolon = parser.expect(TokenKind::Semicolon)?;

    Ok(BlockItem::Stmt(Stmt {
        kind: StmtKind::Expr(expr),
        span: start.join(semicolon.span),
    }))
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let block = parse_block(parser)?;

    Ok(Stmt {
        span: block.span,
        kind: StmtKind::Block(block),
    })
}

/// `( Expr )` around a condition.
fn parse_condition(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(condition)
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span;
    let condition = parse_condition(parser)?;
    let then_body = parse_stmt(parser)?;

    // An `else` belongs to the innermost `if` still waiting for one, which
    // is always the one being parsed here.
    let else_body = match parser.eat(TokenKind::Else) {
        Some(_) => Some(Box::new(parse_stmt(parser)?)),
        None => None,
    };

    Ok(Stmt {
        kind: StmtKind::If {
            condition,
            then_body: Box::new(then_body),
            else_body,
        },
        span: start.join(parser.previous_span()),
    })
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span;
    let condition = parse_condition(parser)?;
    let body = parse_stmt(parser)?;

    Ok(Stmt {
        kind: StmtKind::While {
            condition,
            body: Box::new(body),
        },
        span: start.join(parser.previous_span()),
    })
}

/// An expression, or the empty marker when `terminator` comes right away.
fn parse_optional_expr(parser: &mut Parser, terminator: TokenKind) -> Result<Expr, Error> {
    if parser.at(terminator) {
        return Ok(Expr::empty(parser.current_token().span));
    }

    parse_expr(parser, BindingPower::Default)
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span;
    parser.expect(TokenKind::OpenParen)?;

    let init = parse_optional_expr(parser, TokenKind::Semicolon)?;
    parser.expect(TokenKind::Semicolon)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;
    let step = parse_optional_expr(parser, TokenKind::CloseParen)?;
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_stmt(parser)?;

    Ok(Stmt {
        kind: StmtKind::For {
            init,
            condition,
            step,
            body: Box::new(body),
        },
        span: start.join(parser.previous_span()),
    })
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span;
    let value = parse_optional_expr(parser, TokenKind::Semicolon)?;
    let semicolon = parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt {
        kind: StmtKind::Return { value },
        span: start.join(semicolon.span),
    })
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span;
    let semicolon = parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt {
        kind: StmtKind::Break,
        span: start.join(semicolon.span),
    })
}

/// `Print ( Expr {, Expr} ) ;` with at least one argument.
pub fn parse_print_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span;
    parser.expect(TokenKind::OpenParen)?;

    let mut args = vec![];
    loop {
        args.push(parse_expr(parser, BindingPower::Default)?);
        if parser.eat(TokenKind::Comma).is_none() {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    let semicolon = parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt {
        kind: StmtKind::Print { args },
        span: start.join(semicolon.span),
    })
}

/// `switch ( Expr ) { Case+ Default? }`
///
/// Every arm is a recovery point, so an error inside the braces never
/// reaches the enclosing block and the switch always closes on its own `}`.
pub fn parse_switch_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span;
    let scrutinee = parse_condition(parser)?;
    parser.expect(TokenKind::OpenCurly)?;

    let mut cases = vec![];
    let mut default = None;
    while parser.has_tokens() && !parser.at(TokenKind::CloseCurly) {
        match parse_switch_arm(parser, default.is_some()) {
            Ok(SwitchArm::Case(case)) => cases.push(case),
            Ok(SwitchArm::Default(arm)) => default = Some(arm),
            Err(error) => recover(parser, error, SyncScope::SwitchArms)?,
        }
    }

    if cases.is_empty() && parser.has_tokens() {
        let error = parser.unexpected_detailed("a switch needs at least one `case` arm");
        parser.enter_recovery(error);
    }
    let close = parser.expect(TokenKind::CloseCurly)?;

    Ok(Stmt {
        kind: StmtKind::Switch(SwitchStmt {
            scrutinee,
            cases,
            default,
        }),
        span: start.join(close.span),
    })
}

enum SwitchArm {
    Case(Case),
    Default(DefaultArm),
}

/// One `case` or `default` arm. Nothing may follow the default arm.
fn parse_switch_arm(parser: &mut Parser, after_default: bool) -> Result<SwitchArm, Error> {
    if !parser.at(TokenKind::Case) && !parser.at(TokenKind::Default) {
        return Err(parser.unexpected_detailed("expected `case` or `default`"));
    }

    let keyword = parser.advance();
    if after_default {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: keyword.value,
                message: String::from("the `default` arm must be the last one"),
            },
            keyword.span,
        ));
    }

    if keyword.kind == TokenKind::Default {
        parser.expect(TokenKind::Colon)?;
        let body = parse_arm_body(parser)?;
        return Ok(SwitchArm::Default(DefaultArm {
            body,
            span: keyword.span.join(parser.previous_span()),
        }));
    }

    let error = parser.unexpected_detailed("expected an integer case label");
    let label_token = parser.expect_error(TokenKind::IntConstant, Some(error))?;
    let label = match label_token.literal {
        Some(Literal::Int(value)) => value,
        _ => return Err(parser.unexpected()),
    };
    parser.expect(TokenKind::Colon)?;

    let body = parse_arm_body(parser)?;

    Ok(SwitchArm::Case(Case {
        label,
        label_span: label_token.span,
        body,
        span: keyword.span.join(parser.previous_span()),
    }))
}

/// Statements of one switch arm, up to the next arm or the closing `}`.
/// Each statement is a recovery point.
fn parse_arm_body(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    const ARM_END: [TokenKind; 4] = [
        TokenKind::Case,
        TokenKind::Default,
        TokenKind::CloseCurly,
        TokenKind::EOF,
    ];

    let mut body = vec![];
    while !parser.current_token().is_one_of_many(&ARM_END) {
        match parse_stmt(parser) {
            Ok(stmt) => body.push(stmt),
            Err(error) => recover(parser, error, SyncScope::Nested)?,
        }
    }

    Ok(body)
}
