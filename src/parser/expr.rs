use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{
    ast::{
        ast::Expr,
        expressions::{AccessExpr, BinaryExpr, BinaryOperator, FunctionExpr, GroupExpr, Literal, LiteralExpr},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected("expected an expression"));
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while *parser.get_bp_lookup().get(&parser.current_token_kind()).unwrap_or(&BindingPower::Default) > bp {
        let token_kind = parser.current_token_kind();
        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: parser.current_token().value.clone(),
                },
                parser.get_position(),
            ));
        };

        let binding_power = *parser.get_bp_lookup().get(&token_kind).unwrap_or(&BindingPower::Default);
        left = led(parser, left, binding_power)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();

    let literal = match token.kind {
        TokenKind::Nil => Literal::Nil,
        TokenKind::True => Literal::Boolean(true),
        TokenKind::False => Literal::Boolean(false),
        TokenKind::Integer => {
            let digits = token.value.trim_start_matches('+');
            Literal::Integer(BigInt::from_str(digits).map_err(|_| number_error(&token.value, &token.span))?)
        }
        TokenKind::Decimal => {
            let digits = token.value.trim_start_matches('+');
            Literal::Decimal(BigDecimal::from_str(digits).map_err(|_| number_error(&token.value, &token.span))?)
        }
        TokenKind::Character => match token.value.chars().next() {
            Some(character) => Literal::Character(character),
            None => return Err(Error::new(ErrorImpl::UnterminatedLiteral, token.span.start.clone())),
        },
        TokenKind::String => Literal::String(token.value.clone()),
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken { token: token.value.clone() },
                token.span.start.clone(),
            ))
        }
    };

    Ok(Expr::Literal(LiteralExpr {
        literal,
        ty: None,
        span: token.span,
    }))
}

fn number_error(value: &str, span: &Span) -> Error {
    Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: String::from(value),
            message: String::from("malformed number"),
        },
        span.start.clone(),
    )
}

/// A bare name, or a call when followed by an argument list.
pub fn parse_identifier_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();

    if parser.current_token_kind() == TokenKind::OpenParen {
        let arguments = parse_arguments(parser)?;
        return Ok(Expr::Function(FunctionExpr {
            receiver: None,
            name: token.value,
            arguments,
            function: None,
            span: Span {
                start: token.span.start,
                end: parser.get_end_position(),
            },
        }));
    }

    Ok(Expr::Access(AccessExpr {
        receiver: None,
        name: token.value,
        variable: None,
        span: token.span,
    }))
}

fn parse_arguments(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut arguments = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        arguments.push(parse_expr(parser, BindingPower::Default)?);
        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            arguments.push(parse_expr(parser, BindingPower::Default)?);
        }
    }

    let error = parser.unexpected("expected `,` or `)` in argument list");
    parser.expect_error(TokenKind::CloseParen, Some(error))?;

    Ok(arguments)
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let Some(operator) = BinaryOperator::from_token(operator_token.kind) else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: operator_token.value,
            },
            operator_token.span.start,
        ));
    };

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        left: Box::new(left),
        operator,
        right: Box::new(right),
        ty: None,
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start.clone();
    let expression = parse_expr(parser, BindingPower::Default)?;

    let error = parser.unexpected("expected `)` to close the group");
    parser.expect_error(TokenKind::CloseParen, Some(error))?;

    Ok(Expr::Group(GroupExpr {
        expression: Box::new(expression),
        ty: None,
        span: Span {
            start,
            end: parser.get_end_position(),
        },
    }))
}

/// `receiver.name` or `receiver.name(args)`.
pub fn parse_member_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let error = parser.unexpected("expected a field or method name after `.`");
    let member = parser.expect_error(TokenKind::Identifier, Some(error))?;
    let start = left.get_span().start.clone();

    if parser.current_token_kind() == TokenKind::OpenParen {
        let arguments = parse_arguments(parser)?;
        return Ok(Expr::Function(FunctionExpr {
            receiver: Some(Box::new(left)),
            name: member.value,
            arguments,
            function: None,
            span: Span {
                start,
                end: parser.get_end_position(),
            },
        }));
    }

    Ok(Expr::Access(AccessExpr {
        receiver: Some(Box::new(left)),
        name: member.value,
        variable: None,
        span: Span {
            start,
            end: member.span.end,
        },
    }))
}
