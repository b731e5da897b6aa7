//! Cursor-driven parser over an immutable token stream.
//!
//! The token stream is randomly indexable and never consumed destructively,
//! which is what makes the grammar's backtracking possible: any matcher may
//! take a [`Checkpoint`] before a speculative parse and rewind both the
//! cursor and the diagnostics list if the attempt fails.
//!
//! Errors are data. A matcher that cannot apply returns a value inspected
//! by its caller; only the top-level statement loop and the block loop
//! record errors into the shared diagnostics list, skipping one token to
//! guarantee forward progress before resuming.

use std::rc::Rc;

use crate::{
    ast::ast::Ast,
    errors::errors::{Error, ErrorKind, ErrorOrigin},
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::stmt::parse_decl;

/// The parser state: the token stream, a cursor into it, and the
/// diagnostics accumulated so far.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    file: Rc<String>,
    errors: Vec<Error>,
}

/// A saved cursor/diagnostics position, restored by [`Parser::rewind`]
/// when a speculative parse fails.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint {
    pos: usize,
    errors_len: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>) -> Self {
        // The stream always ends in an EOF sentinel so the cursor can be
        // clamped instead of bounds-checked at every call site.
        if tokens.last().map(|t| t.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|t| t.span.end.clone())
                .unwrap_or_else(|| Position(0, Rc::clone(&file)));
            tokens.push(MK_TOKEN!(
                TokenKind::EOF,
                String::from("EOF"),
                Span {
                    start: end.clone(),
                    end,
                }
            ));
        }

        Parser {
            tokens,
            pos: 0,
            file,
            errors: vec![],
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        let index = self.pos.min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Consumes and returns the current token. Advancing past EOF keeps
    /// returning the sentinel.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// The most recently consumed token.
    pub fn prev_token(&self) -> Token {
        let index = self.pos.saturating_sub(1).min(self.tokens.len() - 1);
        self.tokens[index].clone()
    }

    /// The end position of the most recently consumed token; used as the
    /// end of every node span.
    pub fn prev_end(&self) -> Position {
        if self.pos == 0 {
            return self.tokens[0].span.start.clone();
        }
        self.prev_token().span.end.clone()
    }

    /// The source position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    /// Non-consuming lookahead: is the token at `offset` of this kind?
    pub fn check(&self, expected: TokenKind, offset: isize) -> bool {
        let index = self.pos as isize + offset;
        if index < 0 || index >= self.tokens.len() as isize {
            return false;
        }
        self.tokens[index as usize].kind == expected
    }

    /// Consumes the current token if its kind is one of `expected`.
    pub fn match_any(&mut self, expected: &[TokenKind]) -> bool {
        if !expected.contains(&self.current_token_kind()) {
            return false;
        }

        self.pos += 1;
        true
    }

    /// Expects a token of the given kind, consuming it, or returns an
    /// `UnexpectedToken` diagnostic with the expected/found pair.
    pub fn expect(&mut self, expected: TokenKind) -> Result<Token, Error> {
        if self.current_token_kind() != expected {
            return Err(self.error(expected));
        }

        Ok(self.advance())
    }

    /// Builds an `UnexpectedToken` error for the current token.
    pub fn error(&self, expected: TokenKind) -> Error {
        Error::new(
            ErrorOrigin::Parser,
            ErrorKind::UnexpectedToken {
                expected: expected.to_string(),
                found: self.current_token().value.clone(),
            },
            self.get_position(),
        )
    }

    /// Like [`Parser::error`] but for productions with no single expected
    /// token kind (scalar expressions, types).
    pub fn error_expected(&self, expected: &str) -> Error {
        Error::new(
            ErrorOrigin::Parser,
            ErrorKind::UnexpectedToken {
                expected: String::from(expected),
                found: self.current_token().value.clone(),
            },
            self.get_position(),
        )
    }

    /// Records a diagnostic into the shared list.
    pub fn record(&mut self, error: Error) {
        self.errors.push(error);
    }

    /// Skips one token to regain forward progress after a recorded error.
    pub fn skip(&mut self) {
        if self.has_tokens() {
            self.pos += 1;
        }
    }

    /// Saves the cursor and the diagnostics length before a speculative
    /// parse.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            errors_len: self.errors.len(),
        }
    }

    /// Restores a checkpoint, discarding any tokens consumed and any
    /// diagnostics emitted since it was taken.
    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.errors.truncate(checkpoint.errors_len);
    }

    /// The current cursor index into the token stream.
    pub fn cursor(&self) -> usize {
        self.pos
    }

    pub fn get_file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    /// Whether unconsumed, non-EOF tokens remain.
    pub fn has_tokens(&self) -> bool {
        self.pos < self.tokens.len() && self.current_token_kind() != TokenKind::EOF
    }
}

/// Parses a token stream into an AST plus accumulated diagnostics.
///
/// This is the main entry point for parsing. Declaration matchers are
/// attempted in fixed priority order at the top level; a genuine syntax
/// error is recorded, the cursor skips one token, and matching resumes, so
/// the run always terminates with a best-effort tree.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> (Ast, Vec<Error>) {
    let mut parser = Parser::new(tokens, file);

    let mut stmts = vec![];
    while parser.has_tokens() {
        match parse_decl(&mut parser) {
            Ok(stmt) => stmts.push(stmt),
            Err(error) => {
                parser.record(error);
                parser.skip();
            }
        }
    }

    (Ast::new(stmts), parser.errors)
}
