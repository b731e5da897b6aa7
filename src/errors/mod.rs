//! Error types and error handling for the front end.
//!
//! This module defines the diagnostic types accumulated during lexing
//! and parsing. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for the lexer and parser
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
