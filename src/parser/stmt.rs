//! Statement and declaration matchers.
//!
//! [`parse_decl`] tries the keyword-introduced declaration matchers in a
//! fixed priority order. Each matcher is non-consuming until its leading
//! keyword matches; after that, failures are genuine syntax errors that
//! propagate to the recovery loop in the caller.

use crate::{
    ast::{
        expressions::Expr,
        statements::{
            AssignStmt, BreakStmt, ConstStmt, ContinueStmt, EnumStmt, EnumVariant, ExprStmt,
            FnStmt, ForStmt, ImplStmt, LetStmt, ReturnStmt, Stmt, StructField, StructStmt,
            TraitMethod, TraitStmt, WhileStmt,
        },
    },
    errors::errors::{Error, ErrorKind, ErrorOrigin},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    expr::{any_expr, block_expr, scalar_expr},
    parser::Parser,
    types::{function_type, parse_type},
};

/// Parses one declaration or statement, whichever matches first.
pub fn parse_decl(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(stmt) = const_decl(parser)? {
        return Ok(stmt);
    }
    if let Some(stmt) = fn_decl(parser)? {
        return Ok(Stmt::Fn(stmt));
    }
    if let Some(stmt) = enum_decl(parser)? {
        return Ok(stmt);
    }
    if let Some(stmt) = struct_decl(parser)? {
        return Ok(stmt);
    }
    if let Some(stmt) = impl_decl(parser)? {
        return Ok(stmt);
    }
    if let Some(stmt) = trait_decl(parser)? {
        return Ok(stmt);
    }
    if let Some(stmt) = let_decl(parser)? {
        return Ok(stmt);
    }

    any_stmt(parser)
}

/// Parses one non-declaration statement.
pub fn any_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(stmt) = while_stmt(parser)? {
        return Ok(stmt);
    }
    if let Some(stmt) = for_stmt(parser)? {
        return Ok(stmt);
    }
    if let Some(stmt) = break_stmt(parser)? {
        return Ok(stmt);
    }
    if let Some(stmt) = continue_stmt(parser)? {
        return Ok(stmt);
    }
    if let Some(stmt) = return_stmt(parser)? {
        return Ok(stmt);
    }

    expr_or_assign_stmt(parser)
}

/// `const name (: type)? = scalar;`
pub fn const_decl(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    if !parser.check(TokenKind::Const, 0) {
        return Ok(None);
    }
    let start = parser.advance().span.start.clone();

    let name = parser.expect(TokenKind::Ident)?;

    let ty = if parser.match_any(&[TokenKind::Colon]) {
        Some(parse_type(parser)?)
    } else {
        None
    };

    parser.expect(TokenKind::Equal)?;
    let init = scalar_expr(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Some(Stmt::Const(ConstStmt {
        name,
        ty,
        init,
        span: Span {
            start,
            end: parser.prev_end(),
        },
    })))
}

/// `let mut? name (: type)? = expr;`
pub fn let_decl(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    if !parser.check(TokenKind::Let, 0) {
        return Ok(None);
    }
    let start = parser.advance().span.start.clone();

    let mutable = parser.match_any(&[TokenKind::Mut]);
    let name = parser.expect(TokenKind::Ident)?;

    let ty = if parser.match_any(&[TokenKind::Colon]) {
        Some(parse_type(parser)?)
    } else {
        None
    };

    parser.expect(TokenKind::Equal)?;
    let init = any_expr(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Some(Stmt::Let(LetStmt {
        name,
        ty,
        init,
        mutable,
        span: Span {
            start,
            end: parser.prev_end(),
        },
    })))
}

/// `fn signature { ... }`. Returns the bare [`FnStmt`] so `impl` blocks
/// can collect methods without the `Stmt` wrapper.
pub fn fn_decl(parser: &mut Parser) -> Result<Option<FnStmt>, Error> {
    if !parser.check(TokenKind::Fn, 0) {
        return Ok(None);
    }
    let start = parser.advance().span.start.clone();

    let ty = function_type(parser)?;
    let block = block_expr(parser)?;

    Ok(Some(FnStmt {
        ty,
        block,
        span: Span {
            start,
            end: parser.prev_end(),
        },
    }))
}

/// `enum Name { Variant(type...)?, ... }` — payload types are listed
/// bare between the variant name and the comma.
pub fn enum_decl(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    if !parser.check(TokenKind::Enum, 0) {
        return Ok(None);
    }
    let start = parser.advance().span.start.clone();

    let name = parser.expect(TokenKind::Ident)?;
    parser.expect(TokenKind::LeftBrace)?;

    let mut variants = vec![];
    while !parser.check(TokenKind::RightBrace, 0) && parser.has_tokens() {
        let variant_name = parser.expect(TokenKind::Ident)?;

        let mut types = vec![];
        while !parser.check(TokenKind::Comma, 0)
            && !parser.check(TokenKind::RightBrace, 0)
            && parser.has_tokens()
        {
            types.push(parse_type(parser)?);
        }

        variants.push(EnumVariant {
            name: variant_name,
            types,
        });

        if !parser.match_any(&[TokenKind::Comma]) {
            break;
        }
    }
    parser.expect(TokenKind::RightBrace)?;

    Ok(Some(Stmt::Enum(EnumStmt {
        name,
        variants,
        span: Span {
            start,
            end: parser.prev_end(),
        },
    })))
}

/// `struct Name { field: type, ... }`; `type` is accepted as a synonym
/// for the leading keyword.
pub fn struct_decl(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    if !parser.check(TokenKind::Struct, 0) && !parser.check(TokenKind::Type, 0) {
        return Ok(None);
    }
    let start = parser.advance().span.start.clone();

    let name = parser.expect(TokenKind::Ident)?;
    parser.expect(TokenKind::LeftBrace)?;

    let mut fields = vec![];
    while !parser.check(TokenKind::RightBrace, 0) && parser.has_tokens() {
        let field_name = parser.expect(TokenKind::Ident)?;
        parser.expect(TokenKind::Colon)?;
        let ty = parse_type(parser)?;

        fields.push(StructField {
            name: field_name,
            ty,
        });

        if !parser.match_any(&[TokenKind::Comma]) {
            break;
        }
    }
    parser.expect(TokenKind::RightBrace)?;

    Ok(Some(Stmt::Struct(StructStmt {
        name,
        fields,
        span: Span {
            start,
            end: parser.prev_end(),
        },
    })))
}

/// `impl Name (for Trait)? { fn ... }` — only method declarations are
/// legal in the body.
pub fn impl_decl(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    if !parser.check(TokenKind::Impl, 0) {
        return Ok(None);
    }
    let start = parser.advance().span.start.clone();

    let impl_name = parser.expect(TokenKind::Ident)?;

    let for_name = if parser.match_any(&[TokenKind::For]) {
        Some(parser.expect(TokenKind::Ident)?)
    } else {
        None
    };

    parser.expect(TokenKind::LeftBrace)?;

    let mut methods = vec![];
    while !parser.match_any(&[TokenKind::RightBrace]) {
        if !parser.has_tokens() {
            return Err(parser.error(TokenKind::RightBrace));
        }

        match fn_decl(parser)? {
            Some(method) => methods.push(method),
            None => return Err(parser.error(TokenKind::Fn)),
        }
    }

    Ok(Some(Stmt::Impl(ImplStmt {
        impl_name,
        for_name,
        methods,
        span: Span {
            start,
            end: parser.prev_end(),
        },
    })))
}

/// `trait Name { fn signature (;|{ ... }) ... }` — each method is a
/// signature terminated either by `;` or by a default body.
pub fn trait_decl(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    if !parser.check(TokenKind::Trait, 0) {
        return Ok(None);
    }
    let start = parser.advance().span.start.clone();

    let name = parser.expect(TokenKind::Ident)?;
    parser.expect(TokenKind::LeftBrace)?;

    let mut methods = vec![];
    while !parser.match_any(&[TokenKind::RightBrace]) {
        if !parser.has_tokens() {
            return Err(parser.error(TokenKind::RightBrace));
        }

        parser.expect(TokenKind::Fn)?;
        let ty = function_type(parser)?;

        let block = if parser.match_any(&[TokenKind::Semicolon]) {
            None
        } else {
            Some(block_expr(parser)?)
        };

        methods.push(TraitMethod { ty, block });
    }

    Ok(Some(Stmt::Trait(TraitStmt {
        name,
        methods,
        span: Span {
            start,
            end: parser.prev_end(),
        },
    })))
}

/// `while cond { ... }`
pub fn while_stmt(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    if !parser.check(TokenKind::While, 0) {
        return Ok(None);
    }
    let start = parser.advance().span.start.clone();

    let condition = any_expr(parser)?;
    let block = block_expr(parser)?;

    Ok(Some(Stmt::While(WhileStmt {
        condition,
        block,
        span: Span {
            start,
            end: parser.prev_end(),
        },
    })))
}

/// `for name in iter { ... }`
pub fn for_stmt(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    if !parser.check(TokenKind::For, 0) {
        return Ok(None);
    }
    let start = parser.advance().span.start.clone();

    let name = parser.expect(TokenKind::Ident)?;
    parser.expect(TokenKind::In)?;
    let iter = any_expr(parser)?;
    let block = block_expr(parser)?;

    Ok(Some(Stmt::For(ForStmt {
        name,
        iter,
        block,
        span: Span {
            start,
            end: parser.prev_end(),
        },
    })))
}

pub fn break_stmt(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    if !parser.check(TokenKind::Break, 0) {
        return Ok(None);
    }
    let start = parser.advance().span.start.clone();

    parser.expect(TokenKind::Semicolon)?;

    Ok(Some(Stmt::Break(BreakStmt {
        span: Span {
            start,
            end: parser.prev_end(),
        },
    })))
}

pub fn continue_stmt(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    if !parser.check(TokenKind::Continue, 0) {
        return Ok(None);
    }
    let start = parser.advance().span.start.clone();

    parser.expect(TokenKind::Semicolon)?;

    Ok(Some(Stmt::Continue(ContinueStmt {
        span: Span {
            start,
            end: parser.prev_end(),
        },
    })))
}

/// `return expr?;`
pub fn return_stmt(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    if !parser.check(TokenKind::Return, 0) {
        return Ok(None);
    }
    let start = parser.advance().span.start.clone();

    let expr = if parser.match_any(&[TokenKind::Semicolon]) {
        None
    } else {
        let expr = any_expr(parser)?;
        parser.expect(TokenKind::Semicolon)?;
        Some(expr)
    };

    Ok(Some(Stmt::Return(ReturnStmt {
        expr,
        span: Span {
            start,
            end: parser.prev_end(),
        },
    })))
}

/// An expression in statement position, promoted to an assignment when an
/// assignment operator follows it.
///
/// The target-shape check runs after the value parses, so `1 = 2` reports
/// the bad target rather than stopping at `=`. Block-shaped expressions
/// (`if`, `switch`, bare blocks) close themselves, so their trailing
/// semicolon is optional.
pub fn expr_or_assign_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let expr = any_expr(parser)?;

    if parser.current_token_kind().is_assignment_operator() {
        let operator = parser.advance();
        let value = any_expr(parser)?;

        if !expr.is_assignable() {
            return Err(Error::new(
                ErrorOrigin::Parser,
                ErrorKind::InvalidAssignmentTarget,
                parser.get_position(),
            ));
        }

        parser.expect(TokenKind::Semicolon)?;

        return Ok(Stmt::Assign(AssignStmt {
            span: Span {
                start: expr.span().start.clone(),
                end: parser.prev_end(),
            },
            expr,
            operator,
            value,
        }));
    }

    if matches!(expr, Expr::If(_) | Expr::Block(_) | Expr::Match(_)) {
        parser.match_any(&[TokenKind::Semicolon]);
    } else {
        parser.expect(TokenKind::Semicolon)?;
    }

    Ok(Stmt::Expr(ExprStmt {
        span: Span {
            start: expr.span().start.clone(),
            end: parser.prev_end(),
        },
        expr,
    }))
}
