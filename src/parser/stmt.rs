use crate::{
    ast::{
        ast::{Field, Method, Stmt},
        statements::{AssignmentStmt, DeclarationStmt, ExpressionStmt, ForStmt, IfStmt, ReturnStmt, WhileStmt},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        return handler(parser);
    }

    let start = parser.get_position();
    let expression = parse_expr(parser, BindingPower::Default)?;

    if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        let value = parse_expr(parser, BindingPower::Default)?;
        expect_semicolon(parser)?;

        return Ok(Stmt::Assignment(AssignmentStmt {
            receiver: expression,
            value,
            span: Span {
                start,
                end: parser.get_end_position(),
            },
        }));
    }

    expect_semicolon(parser)?;

    Ok(Stmt::Expression(ExpressionStmt {
        expression,
        span: Span {
            start,
            end: parser.get_end_position(),
        },
    }))
}

fn expect_semicolon(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::Semicolon)?;
    Ok(())
}

/// Parses statements until one of `terminators` is reached, without consuming it.
fn parse_block(parser: &mut Parser, terminators: &[TokenKind]) -> Result<Vec<Stmt>, Error> {
    let mut statements = Vec::new();

    while !terminators.contains(&parser.current_token_kind()) {
        if !parser.has_tokens() {
            return Err(parser.unexpected("expected END before the end of input"));
        }
        statements.push(parse_stmt(parser)?);
    }

    Ok(statements)
}

fn expect_identifier(parser: &mut Parser, message: &str) -> Result<String, Error> {
    let error = parser.unexpected(message);
    Ok(parser.expect_error(TokenKind::Identifier, Some(error))?.value)
}

/// `LET name: Type (= value)?;`
pub fn parse_field(parser: &mut Parser) -> Result<Field, Error> {
    let start = parser.advance().span.start.clone();

    let name = expect_identifier(parser, "expected identifier during field declaration")?;

    let error = parser.unexpected("fields require an explicit type");
    parser.expect_error(TokenKind::Colon, Some(error))?;
    let type_name = expect_identifier(parser, "expected a type name")?;

    let value = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    expect_semicolon(parser)?;

    Ok(Field {
        name,
        type_name,
        value,
        variable: None,
        span: Span {
            start,
            end: parser.get_end_position(),
        },
    })
}

/// `DEF name(param: Type, ...)(: Type)? DO statements END`
pub fn parse_method(parser: &mut Parser) -> Result<Method, Error> {
    let start = parser.advance().span.start.clone();

    let name = expect_identifier(parser, "expected identifier during method declaration")?;

    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = Vec::new();
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            let parameter = expect_identifier(parser, "expected a parameter name")?;
            parser.expect(TokenKind::Colon)?;
            let type_name = expect_identifier(parser, "expected a type name")?;
            parameters.push((parameter, type_name));

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    let error = parser.unexpected("expected `,` or `)` in parameter list");
    parser.expect_error(TokenKind::CloseParen, Some(error))?;

    let return_type_name = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(expect_identifier(parser, "expected a return type name")?)
    } else {
        None
    };

    parser.expect(TokenKind::Do)?;
    let statements = parse_block(parser, &[TokenKind::End])?;
    parser.expect(TokenKind::End)?;

    Ok(Method {
        name,
        parameters,
        return_type_name,
        statements,
        function: None,
        span: Span {
            start,
            end: parser.get_end_position(),
        },
    })
}

/// `LET name (: Type)? (= value)?;`
pub fn parse_declaration_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let name = expect_identifier(parser, "expected identifier during variable declaration")?;

    let type_name = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(expect_identifier(parser, "expected a type name")?)
    } else {
        None
    };

    let value = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    expect_semicolon(parser)?;

    Ok(Stmt::Declaration(DeclarationStmt {
        name,
        type_name,
        value,
        variable: None,
        span: Span {
            start,
            end: parser.get_end_position(),
        },
    }))
}

/// `IF condition DO statements (ELSE statements)? END`
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Do)?;
    let then_statements = parse_block(parser, &[TokenKind::Else, TokenKind::End])?;

    let else_statements = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        parse_block(parser, &[TokenKind::End])?
    } else {
        Vec::new()
    };

    parser.expect(TokenKind::End)?;

    Ok(Stmt::If(IfStmt {
        condition,
        then_statements,
        else_statements,
        span: Span {
            start,
            end: parser.get_end_position(),
        },
    }))
}

/// `FOR name IN value DO statements END`
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let name = expect_identifier(parser, "expected a loop variable")?;
    parser.expect(TokenKind::In)?;
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Do)?;
    let statements = parse_block(parser, &[TokenKind::End])?;
    parser.expect(TokenKind::End)?;

    Ok(Stmt::For(ForStmt {
        name,
        value,
        statements,
        span: Span {
            start,
            end: parser.get_end_position(),
        },
    }))
}

/// `WHILE condition DO statements END`
pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Do)?;
    let statements = parse_block(parser, &[TokenKind::End])?;
    parser.expect(TokenKind::End)?;

    Ok(Stmt::While(WhileStmt {
        condition,
        statements,
        span: Span {
            start,
            end: parser.get_end_position(),
        },
    }))
}

/// `RETURN value;`
pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let value = parse_expr(parser, BindingPower::Default)?;
    expect_semicolon(parser)?;

    Ok(Stmt::Return(ReturnStmt {
        value,
        span: Span {
            start,
            end: parser.get_end_position(),
        },
    }))
}
