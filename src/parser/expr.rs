use crate::{
    ast::{
        ast::Identifier,
        expressions::{BinaryOp, Expr, ExprKind, PostfixOp, UnaryOp},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Literal, Token, TokenKind},
};

use super::{lookups::BindingPower, parser::Parser, types::parse_type};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected());
    };

    let left = nud(parser)?;

    parse_expr_from(parser, left, bp)
}

/// Continues a Pratt parse with `left` already built.
///
/// Used directly when a caller had to consume the first token of an
/// expression before knowing it was one (a leading identifier in a block).
pub fn parse_expr_from(parser: &mut Parser, mut left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    // While the current token binds tighter than `bp`, it extends the lhs
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let token_bp = parser.current_binding_power();
        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Err(parser.unexpected());
        };

        left = led(parser, left, token_bp)?;
    }

    Ok(left)
}

pub fn parse_constant_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance();

    let kind = match (token.kind, &token.literal) {
        (TokenKind::IntConstant, Some(Literal::Int(value))) => ExprKind::IntConstant(*value),
        (TokenKind::DoubleConstant, Some(Literal::Double(value))) => ExprKind::DoubleConstant(*value),
        (TokenKind::BoolConstant, Some(Literal::Bool(value))) => ExprKind::BoolConstant(*value),
        (TokenKind::StringConstant, Some(Literal::Str(value))) => {
            ExprKind::StringConstant(value.clone())
        }
        (TokenKind::Null, _) => ExprKind::Null,
        _ => return Err(token_error(&token)),
    };

    Ok(Expr::new(kind, token.span))
}

pub fn parse_this_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance();
    Ok(Expr::new(ExprKind::This, token.span))
}

pub fn parse_identifier_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance();
    parse_identifier_tail(parser, token)
}

/// Builds the expression a bare identifier starts: a call when `(`
/// follows, otherwise a field access without receiver.
pub fn parse_identifier_tail(parser: &mut Parser, token: Token) -> Result<Expr, Error> {
    let span = token.span;
    let name = Identifier::new(token.value, span);

    if parser.at(TokenKind::OpenParen) {
        let args = parse_actuals(parser)?;
        return Ok(Expr::new(
            ExprKind::Call {
                receiver: None,
                method: name,
                args,
            },
            span.join(parser.previous_span()),
        ));
    }

    Ok(Expr::new(
        ExprKind::FieldAccess {
            receiver: None,
            field: name,
        },
        span,
    ))
}

/// `( [Expr {, Expr}] )`
pub fn parse_actuals(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut args = vec![];
    if parser.eat(TokenKind::CloseParen).is_some() {
        return Ok(args);
    }

    loop {
        args.push(parse_expr(parser, BindingPower::Default)?);
        if parser.eat(TokenKind::Comma).is_none() {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    Ok(args)
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let open = parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    let close = parser.expect(TokenKind::CloseParen)?;

    Ok(Expr {
        span: open.span.join(close.span),
        ..expr
    })
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let op = match operator_token.kind {
        TokenKind::Dash => UnaryOp::Neg,
        TokenKind::Not => UnaryOp::Not,
        _ => return Err(token_error(&operator_token)),
    };
    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::new(
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
        },
        operator_token.span.join(parser.previous_span()),
    ))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let op = binary_operator(&operator_token)?;
    let right = parse_expr(parser, bp)?;
    let span = left.span.join(right.span);

    Ok(Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    ))
}

pub fn parse_assignment_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    if !left.is_lvalue() {
        return Err(invalid_target(parser));
    }

    parser.advance();
    // Right-associative: `a = b = c` is `a = (b = c)`
    let value = parse_expr(parser, BindingPower::Default)?;
    let span = left.span.join(value.span);

    Ok(Expr::new(
        ExprKind::Assign {
            target: Box::new(left),
            value: Box::new(value),
        },
        span,
    ))
}

pub fn parse_postfix_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    if !left.is_lvalue() {
        return Err(invalid_target(parser));
    }

    let operator_token = parser.advance();
    let op = match operator_token.kind {
        TokenKind::PlusPlus => PostfixOp::Increment,
        TokenKind::MinusMinus => PostfixOp::Decrement,
        _ => return Err(token_error(&operator_token)),
    };
    let span = left.span.join(operator_token.span);

    Ok(Expr::new(
        ExprKind::Postfix {
            op,
            operand: Box::new(left),
        },
        span,
    ))
}

pub fn parse_member_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let error = parser.unexpected_detailed("expected a field or method name after `.`");
    let name_token = parser.expect_error(TokenKind::Identifier, Some(error))?;
    let name = Identifier::new(name_token.value, name_token.span);
    let start = left.span;

    if parser.at(TokenKind::OpenParen) {
        let args = parse_actuals(parser)?;
        return Ok(Expr::new(
            ExprKind::Call {
                receiver: Some(Box::new(left)),
                method: name,
                args,
            },
            start.join(parser.previous_span()),
        ));
    }

    Ok(Expr::new(
        ExprKind::FieldAccess {
            receiver: Some(Box::new(left)),
            field: name,
        },
        start.join(name_token.span),
    ))
}

pub fn parse_index_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let index = parse_expr(parser, BindingPower::Default)?;
    let close = parser.expect(TokenKind::CloseBracket)?;
    let span = left.span.join(close.span);

    Ok(Expr::new(
        ExprKind::ArrayAccess {
            array: Box::new(left),
            index: Box::new(index),
        },
        span,
    ))
}

/// `ReadInteger()` and `ReadLine()`
pub fn parse_read_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let keyword = parser.advance();
    let kind = match keyword.kind {
        TokenKind::ReadInteger => ExprKind::ReadInteger,
        TokenKind::ReadLine => ExprKind::ReadLine,
        _ => return Err(token_error(&keyword)),
    };

    parser.expect(TokenKind::OpenParen)?;
    let close = parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::new(kind, keyword.span.join(close.span)))
}

pub fn parse_new_expr(parser: &mut Parser) -> Result<Expr, Error> {
    // New(ClassName)
    let keyword = parser.advance();
    parser.expect(TokenKind::OpenParen)?;

    let error = parser.unexpected_detailed("expected a class name");
    let class = parser.expect_error(TokenKind::Identifier, Some(error))?;
    let close = parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::new(
        ExprKind::New {
            class: Identifier::new(class.value, class.span),
        },
        keyword.span.join(close.span),
    ))
}

pub fn parse_new_array_expr(parser: &mut Parser) -> Result<Expr, Error> {
    // NewArray(size, ElementType)
    let keyword = parser.advance();
    parser.expect(TokenKind::OpenParen)?;
    let size = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Comma)?;
    let element = parse_type(parser, BindingPower::Default)?;
    let close = parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::new(
        ExprKind::NewArray {
            size: Box::new(size),
            element,
        },
        keyword.span.join(close.span),
    ))
}

fn binary_operator(token: &Token) -> Result<BinaryOp, Error> {
    let op = match token.kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Dash => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::Less => BinaryOp::Less,
        TokenKind::LessEquals => BinaryOp::LessEq,
        TokenKind::Greater => BinaryOp::Greater,
        TokenKind::GreaterEquals => BinaryOp::GreaterEq,
        TokenKind::Equals => BinaryOp::Eq,
        TokenKind::NotEquals => BinaryOp::NotEq,
        TokenKind::And => BinaryOp::And,
        TokenKind::Or => BinaryOp::Or,
        _ => return Err(token_error(token)),
    };

    Ok(op)
}

/// Error at the current operator, whose left operand is not assignable.
fn invalid_target(parser: &Parser) -> Error {
    let token = parser.current_token();
    Error::new(
        ErrorImpl::InvalidAssignmentTarget {
            operator: token.value.clone(),
        },
        token.span,
    )
}

fn token_error(token: &Token) -> Error {
    Error::new(
        ErrorImpl::UnexpectedToken {
            token: token.value.clone(),
        },
        token.span,
    )
}
