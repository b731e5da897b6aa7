//! The expression ladder.
//!
//! Expressions are parsed by precedence climbing: [`operation_expr`] takes
//! a precedence level and either handles that level's construct or falls
//! through to the next tighter one. Levels 0 through 9 are the
//! left-associative binary operators from loosest (`||`) to tightest
//! (`..`/`..=`); the remaining levels are prefix, postfix and primary
//! forms. Entering at level 0 via [`any_expr`] parses a full expression.

use crate::{
    ast::expressions::{
        BinaryExpr, BlockExpr, BooleanExpr, CallExpr, Expr, GetFieldExpr, GetIndexExpr, GroupExpr,
        IdentExpr, IfExpr, MatchArm, MatchExpr, NumberExpr, ObjectExpr, StringExpr, UnaryExpr,
    },
    errors::errors::{Error, ErrorKind, ErrorOrigin},
    lexer::tokens::TokenKind,
    Span,
};

use super::{parser::Parser, stmt::parse_decl};

/// Parses a full expression (the ladder from level 0).
pub fn any_expr(parser: &mut Parser) -> Result<Expr, Error> {
    operation_expr(parser, 0)
}

/// The binary operators handled at each of the ladder's binary levels.
fn binary_operators(precedence: u8) -> &'static [TokenKind] {
    match precedence {
        0 => &[TokenKind::LogicOr],
        1 => &[TokenKind::LogicAnd],
        2 => &[TokenKind::BitwiseXor],
        3 => &[TokenKind::BitwiseOr],
        4 => &[TokenKind::BitwiseAnd],
        5 => &[TokenKind::EqualEqual, TokenKind::BangEqual],
        6 => &[
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
        ],
        7 => &[TokenKind::Plus, TokenKind::Minus],
        8 => &[TokenKind::Asterisk, TokenKind::Slash, TokenKind::Modulus],
        9 => &[TokenKind::DotDot, TokenKind::DotDotEqual],
        _ => &[],
    }
}

/// Parses the expression form at the given precedence level, falling
/// through to the next tighter level when the current token does not
/// introduce this level's construct.
pub fn operation_expr(parser: &mut Parser, precedence: u8) -> Result<Expr, Error> {
    match precedence {
        // Left-associative binary ladder, loosest first.
        0..=9 => {
            let mut expr = operation_expr(parser, precedence + 1)?;

            while parser.match_any(binary_operators(precedence)) {
                let operator = parser.prev_token();
                let right = operation_expr(parser, precedence + 1)?;

                expr = Expr::Binary(BinaryExpr {
                    span: Span {
                        start: expr.span().start.clone(),
                        end: right.span().end.clone(),
                    },
                    left: Box::new(expr),
                    operator,
                    right: Box::new(right),
                });
            }

            Ok(expr)
        }

        // Type casts (`expr as Type`) are reserved; currently a
        // pass-through.
        10 => operation_expr(parser, 11),

        // Unary prefix, right-recursive so `!!x` nests.
        11 => {
            if parser.check(TokenKind::Bang, 0) || parser.check(TokenKind::Minus, 0) {
                let operator = parser.advance();
                let expr = operation_expr(parser, 11)?;

                return Ok(Expr::Unary(UnaryExpr {
                    span: Span {
                        start: operator.span.start.clone(),
                        end: expr.span().end.clone(),
                    },
                    operator,
                    expr: Box::new(expr),
                }));
            }

            operation_expr(parser, 12)
        }

        // Postfix chains: call, index, field access.
        12 => postfix_expr(parser),

        13 => {
            if !parser.check(TokenKind::Match, 0) {
                return operation_expr(parser, 14);
            }

            match_expr(parser)
        }

        14 => {
            if !parser.check(TokenKind::LeftParen, 0) {
                return operation_expr(parser, 15);
            }

            let start = parser.advance().span.start.clone();
            let expr = any_expr(parser)?;
            parser.expect(TokenKind::RightParen)?;

            Ok(Expr::Group(GroupExpr {
                expr: Box::new(expr),
                span: Span {
                    start,
                    end: parser.prev_end(),
                },
            }))
        }

        15 => {
            if !parser.check(TokenKind::If, 0) {
                return operation_expr(parser, 16);
            }

            if_expr(parser)
        }

        // A leading `{` is either an object literal or a block. The object
        // form is more specific, so it is tried first under a checkpoint;
        // on failure the cursor and diagnostics rewind and the block
        // matcher gets a clean run at the same tokens.
        16 => {
            if !parser.check(TokenKind::LeftBrace, 0) {
                return operation_expr(parser, 17);
            }

            let checkpoint = parser.checkpoint();
            match object_expr(parser) {
                Ok(expr) => Ok(expr),
                Err(_) => {
                    parser.rewind(checkpoint);
                    Ok(Expr::Block(block_expr(parser)?))
                }
            }
        }

        // `::` paths bind tighter than everything above and chain
        // left-associatively; the left side must itself be an identifier
        // or an already-built path.
        17 => {
            let mut expr = scalar_expr(parser)?;

            while parser.check(TokenKind::ColonColon, 0) && is_path_operand(&expr) {
                let operator = parser.advance();
                let field = parser.expect(TokenKind::Ident)?;
                let right = Expr::Ident(IdentExpr {
                    span: field.span.clone(),
                    ident: field,
                });

                expr = Expr::Binary(BinaryExpr {
                    span: Span {
                        start: expr.span().start.clone(),
                        end: right.span().end.clone(),
                    },
                    left: Box::new(expr),
                    operator,
                    right: Box::new(right),
                });
            }

            Ok(expr)
        }

        _ => scalar_expr(parser),
    }
}

fn is_path_operand(expr: &Expr) -> bool {
    match expr {
        Expr::Ident(_) => true,
        Expr::Binary(binary) => binary.operator.kind == TokenKind::ColonColon,
        _ => false,
    }
}

/// Parses a postfix chain: any number of `(args)`, `[index]` and `.field`
/// suffixes looping on the same head, so `a.b.c(1)[2]` builds one nested
/// chain.
pub fn postfix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let mut expr = operation_expr(parser, 13)?;

    loop {
        if parser.match_any(&[TokenKind::LeftParen]) {
            let mut args = vec![];
            while !parser.check(TokenKind::RightParen, 0) && parser.has_tokens() {
                args.push(any_expr(parser)?);

                // Each argument is followed by `,` or the closing paren;
                // a trailing comma is tolerated.
                if !parser.check(TokenKind::RightParen, 0) {
                    parser.expect(TokenKind::Comma)?;
                }
            }
            parser.expect(TokenKind::RightParen)?;

            expr = Expr::Call(CallExpr {
                span: Span {
                    start: expr.span().start.clone(),
                    end: parser.prev_end(),
                },
                func: Box::new(expr),
                args,
            });
        } else if parser.match_any(&[TokenKind::LeftBracket]) {
            let index = any_expr(parser)?;
            parser.expect(TokenKind::RightBracket)?;

            expr = Expr::GetIndex(GetIndexExpr {
                span: Span {
                    start: expr.span().start.clone(),
                    end: parser.prev_end(),
                },
                expr: Box::new(expr),
                index: Box::new(index),
            });
        } else if parser.match_any(&[TokenKind::Dot]) {
            let field = parser.expect(TokenKind::Ident)?;

            expr = Expr::GetField(GetFieldExpr {
                span: Span {
                    start: expr.span().start.clone(),
                    end: field.span.end.clone(),
                },
                expr: Box::new(expr),
                field,
            });
        } else {
            break;
        }
    }

    Ok(expr)
}

/// Parses `switch subject { pattern => body, ... }`.
///
/// Patterns and bodies are both full expressions; a trailing comma on the
/// last arm is optional.
pub fn match_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start.clone();

    let subject = any_expr(parser)?;
    parser.expect(TokenKind::LeftBrace)?;

    let mut arms = vec![];
    while !parser.match_any(&[TokenKind::RightBrace]) {
        if !parser.has_tokens() {
            return Err(parser.error(TokenKind::RightBrace));
        }

        let pattern = any_expr(parser)?;
        parser.expect(TokenKind::FatArrow)?;
        let body = any_expr(parser)?;

        arms.push(MatchArm {
            span: Span {
                start: pattern.span().start.clone(),
                end: body.span().end.clone(),
            },
            expr: pattern,
            body,
        });

        if !parser.match_any(&[TokenKind::Comma]) {
            parser.expect(TokenKind::RightBrace)?;
            break;
        }
    }

    Ok(Expr::Match(MatchExpr {
        expr: Box::new(subject),
        arms,
        span: Span {
            start,
            end: parser.prev_end(),
        },
    }))
}

/// Parses `if cond { ... } (else if ... | else { ... })?`.
///
/// Conditions are restricted to shapes that can plausibly evaluate to a
/// boolean; literal numbers, strings, objects and matches are rejected up
/// front rather than left for the checker.
pub fn if_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start.clone();

    let condition_pos = parser.get_position();
    let condition = any_expr(parser)?;

    if !is_condition_shape(&condition) {
        return Err(Error::new(
            ErrorOrigin::Parser,
            ErrorKind::InvalidCondition,
            condition_pos,
        ));
    }

    let then_block = block_expr(parser)?;

    let else_branch = if parser.match_any(&[TokenKind::Else]) {
        if parser.check(TokenKind::If, 0) {
            Some(Box::new(if_expr(parser)?))
        } else {
            Some(Box::new(Expr::Block(block_expr(parser)?)))
        }
    } else {
        None
    };

    Ok(Expr::If(IfExpr {
        condition: Box::new(condition),
        then_block,
        else_branch,
        span: Span {
            start,
            end: parser.prev_end(),
        },
    }))
}

fn is_condition_shape(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Boolean(_)
            | Expr::Ident(_)
            | Expr::Call(_)
            | Expr::Block(_)
            | Expr::GetField(_)
            | Expr::GetIndex(_)
            | Expr::Unary(_)
            | Expr::Binary(_)
            | Expr::Group(_)
    )
}

/// Parses an object literal: `{ name: expr, ... }` with at least one
/// property. An empty `{}` is a block, so this matcher fails on it and the
/// caller falls back.
pub fn object_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::LeftBrace)?.span.start.clone();

    let mut properties = vec![];
    loop {
        let name = parser.expect(TokenKind::Ident)?;
        parser.expect(TokenKind::Colon)?;
        let value = any_expr(parser)?;
        properties.push((name, value));

        if !parser.match_any(&[TokenKind::Comma]) {
            parser.expect(TokenKind::RightBrace)?;
            break;
        }

        // Trailing comma.
        if parser.match_any(&[TokenKind::RightBrace]) {
            break;
        }
    }

    Ok(Expr::Object(ObjectExpr {
        properties,
        span: Span {
            start,
            end: parser.prev_end(),
        },
    }))
}

/// Parses a `{ ... }` statement block. Errors inside the block are
/// recorded and recovery resumes at the next token, so one bad statement
/// does not lose the rest of the block.
pub fn block_expr(parser: &mut Parser) -> Result<BlockExpr, Error> {
    let start = parser.expect(TokenKind::LeftBrace)?.span.start.clone();

    let mut stmts = vec![];
    while !parser.check(TokenKind::RightBrace, 0) && parser.has_tokens() {
        match parse_decl(parser) {
            Ok(stmt) => stmts.push(stmt),
            Err(error) => {
                parser.record(error);
                parser.skip();
            }
        }
    }

    parser.expect(TokenKind::RightBrace)?;

    Ok(BlockExpr {
        stmts,
        span: Span {
            start,
            end: parser.prev_end(),
        },
    })
}

/// Parses a terminal: boolean, number or string literal, or an identifier.
pub fn scalar_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    match token.kind {
        TokenKind::True | TokenKind::False => {
            parser.advance();
            Ok(Expr::Boolean(BooleanExpr {
                value: token.kind == TokenKind::True,
                span: token.span,
            }))
        }
        TokenKind::Number => {
            parser.advance();
            match token.value.parse::<f64>() {
                Ok(value) => Ok(Expr::Number(NumberExpr {
                    value,
                    span: token.span,
                })),
                Err(_) => Err(Error::new(
                    ErrorOrigin::Parser,
                    ErrorKind::MalformedNumber { token: token.value },
                    token.span.start,
                )),
            }
        }
        TokenKind::String => {
            parser.advance();
            Ok(Expr::String(StringExpr {
                value: token.value,
                span: token.span,
            }))
        }
        TokenKind::Ident => {
            parser.advance();
            Ok(Expr::Ident(IdentExpr {
                span: token.span.clone(),
                ident: token,
            }))
        }
        _ => Err(parser.error_expected("an expression")),
    }
}
