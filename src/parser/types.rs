//! Type annotation parsing.
//!
//! Annotations are optional almost everywhere; callers only invoke
//! [`parse_type`] after seeing the `:` that introduces one, except for
//! function parameters where the annotation is mandatory.

use crate::{
    ast::types::{FunctionType, Param, Type},
    errors::errors::Error,
    lexer::tokens::TokenKind,
    Span,
};

use super::parser::Parser;

/// Parses a function signature: `name(params) (: return_type)?`.
///
/// The leading `fn` keyword (where one exists) has already been consumed
/// by the caller, so this is shared verbatim between `fn` declarations,
/// `impl` methods and `trait` methods.
pub fn function_type(parser: &mut Parser) -> Result<FunctionType, Error> {
    let name = parser.expect(TokenKind::Ident)?;

    parser.expect(TokenKind::LeftParen)?;

    let mut params = vec![];
    while !parser.check(TokenKind::RightParen, 0) && parser.has_tokens() {
        let mutable = parser.match_any(&[TokenKind::Mut]);
        let param_name = parser.expect(TokenKind::Ident)?;
        parser.expect(TokenKind::Colon)?;
        let ty = parse_type(parser)?;

        params.push(Param {
            name: param_name,
            ty,
            mutable,
        });

        // Each parameter is followed by `,` or the closing paren; a
        // trailing comma is tolerated.
        if !parser.check(TokenKind::RightParen, 0) {
            parser.expect(TokenKind::Comma)?;
        }
    }
    parser.expect(TokenKind::RightParen)?;

    let return_type = if parser.match_any(&[TokenKind::Colon]) {
        Some(parse_type(parser)?)
    } else {
        None
    };

    Ok(FunctionType {
        span: Span {
            start: name.span.start.clone(),
            end: parser.prev_end(),
        },
        name,
        params,
        return_type,
    })
}

/// Parses a type annotation: a base name followed by any number of `[]`
/// array suffixes, innermost first, so `num[][]` is an array of arrays of
/// numbers.
pub fn parse_type(parser: &mut Parser) -> Result<Type, Error> {
    let token = parser.current_token().clone();
    let mut ty = match token.kind {
        TokenKind::Any => {
            parser.advance();
            Type::Any { value: token.value }
        }
        TokenKind::Ident => {
            parser.advance();
            match token.value.as_str() {
                "num" => Type::Number { value: token.value },
                "str" => Type::String { value: token.value },
                "bool" => Type::Boolean { value: token.value },
                _ => Type::Ident { value: token.value },
            }
        }
        _ => return Err(parser.error_expected("a type")),
    };

    while parser.check(TokenKind::LeftBracket, 0) && parser.check(TokenKind::RightBracket, 1) {
        parser.advance();
        parser.advance();
        ty = Type::Array {
            element: Box::new(ty),
        };
    }

    Ok(ty)
}
