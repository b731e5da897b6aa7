//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Token position tracking for error reporting
//! - Comments and whitespace handling
//!
//! Lexing never aborts: unrecognised characters, unterminated strings and
//! malformed numbers are recorded as diagnostics and scanning continues.

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
