use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// Which phase of the front end produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorOrigin {
    Lexer,
    Parser,
}

/// A structured diagnostic: origin, kind, and the byte position of the
/// offending token or character. Errors are data, accumulated by the
/// lexer and parser rather than raised; no diagnostic aborts a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    origin: ErrorOrigin,
    kind: ErrorKind,
    position: Position,
}

impl Error {
    pub fn new(origin: ErrorOrigin, kind: ErrorKind, position: Position) -> Self {
        Error {
            origin,
            kind,
            position,
        }
    }

    pub fn get_origin(&self) -> ErrorOrigin {
        self.origin
    }

    pub fn get_kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.kind {
            ErrorKind::UnrecognisedCharacter { .. } => "UnrecognisedCharacter",
            ErrorKind::UnterminatedString => "UnterminatedString",
            ErrorKind::ExpectedDigit => "ExpectedDigit",
            ErrorKind::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorKind::MalformedNumber { .. } => "MalformedNumber",
            ErrorKind::InvalidAssignmentTarget => "InvalidAssignmentTarget",
            ErrorKind::InvalidCondition => "InvalidCondition",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.kind {
            ErrorKind::UnrecognisedCharacter { .. } => ErrorTip::None,
            ErrorKind::UnterminatedString => {
                ErrorTip::Suggestion(String::from("Couldn't find the closing `\"` of this string"))
            }
            ErrorKind::ExpectedDigit => {
                ErrorTip::Suggestion(String::from("Expected a digit after the decimal point"))
            }
            ErrorKind::UnexpectedToken { expected, found } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, expected {}",
                found, expected
            )),
            ErrorKind::MalformedNumber { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the representable limit?",
                token
            )),
            ErrorKind::InvalidAssignmentTarget => ErrorTip::Suggestion(String::from(
                "Only identifiers, field accesses and index accesses can be assigned to",
            )),
            ErrorKind::InvalidCondition => ErrorTip::Suggestion(String::from(
                "This expression shape cannot appear as an `if` condition",
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorKind {
    #[error("unrecognised character: {character:?}")]
    UnrecognisedCharacter { character: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("expected digit after decimal point")]
    ExpectedDigit,
    #[error("unexpected token: expected {expected}, found {found:?}")]
    UnexpectedToken { expected: String, found: String },
    #[error("error parsing number: {token:?}")]
    MalformedNumber { token: String },
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("invalid condition expression")]
    InvalidCondition,
}
