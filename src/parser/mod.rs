//! Backtracking recursive-descent parser.
//!
//! The parser turns the lexer's token stream into the AST defined in
//! [`crate::ast`], accumulating syntax errors as data rather than
//! stopping at the first one. Statement matchers are tried in priority
//! order ([`stmt`]), expressions are parsed by precedence climbing
//! ([`expr`]), and the shared cursor machinery and entry point live in
//! [`parser`].

pub mod expr;
pub mod parser;
pub mod stmt;
pub mod types;
